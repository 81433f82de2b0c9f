use ratatui::style::Color;

// Streaming palette
pub const ACCENT: Color = Color::Rgb(255, 94, 170);      // Sakura pink
pub const ACCENT_DIM: Color = Color::Rgb(120, 45, 90);
pub const HIGHLIGHT: Color = Color::Rgb(255, 214, 102);  // Focus ring
pub const SURFACE: Color = Color::Rgb(40, 40, 60);
pub const TEXT_PRIMARY: Color = Color::White;
pub const TEXT_SECONDARY: Color = Color::Rgb(200, 200, 215);
pub const TEXT_DIM: Color = Color::Rgb(120, 120, 140);
pub const LIVE_GREEN: Color = Color::Rgb(80, 220, 120);
pub const MOCK_ORANGE: Color = Color::Rgb(255, 160, 60);
pub const ERROR_RED: Color = Color::Rgb(255, 85, 85);

// Top 10 podium
pub const GOLD: Color = Color::Rgb(255, 215, 0);
pub const SILVER: Color = Color::Rgb(192, 192, 192);
pub const BRONZE: Color = Color::Rgb(205, 127, 50);
