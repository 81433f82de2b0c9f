use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::config::AppConfig;
use crate::ui::colors::{ACCENT, ERROR_RED, TEXT_DIM, TEXT_PRIMARY, TEXT_SECONDARY};
use crate::ui::utils::centered_rect;

pub fn render_help_popup(f: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(Span::styled(" Controls ", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_type(BorderType::Thick)
        .border_style(Style::default().fg(ACCENT));

    let area = centered_rect(60, 70, area);
    f.render_widget(Clear, area);

    let shortcuts = [
        ("← ↑ ↓ →  h j k l", "Move focus"),
        ("Enter / Space", "Select"),
        ("Esc / Backspace", "Back"),
        ("Tab", "Open / close the menu"),
        ("[ ]", "Previous / next spotlight"),
        ("/", "Search"),
        ("r", "Reload the catalog"),
        ("?", "This help"),
        ("q", "Quit"),
    ];
    let lines: Vec<Line> = shortcuts
        .iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!("  {:<20}", keys), Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
                Span::styled(*action, Style::default().fg(TEXT_PRIMARY)),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}

pub fn render_settings_popup(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(Span::styled(" Settings ", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_type(BorderType::Thick)
        .border_style(Style::default().fg(ACCENT));

    let area = centered_rect(70, 60, area);
    f.render_widget(Clear, area);

    let config = &app.config;
    let path = AppConfig::config_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "unavailable".to_string());
    let rotation = match config.spotlight_interval_secs {
        0 => "off".to_string(),
        secs => format!("every {}s", secs),
    };
    let rows = [
        ("API", config.api_base_url.clone()),
        ("Offline", if config.offline { "yes" } else { "no" }.to_string()),
        ("Spotlight", rotation),
        ("Timeout", format!("{}s", config.request_timeout_secs)),
        ("Retries", config.max_retries.to_string()),
        ("Navigation", format!("{:?}", config.navigation).to_lowercase()),
        ("Config file", path),
    ];

    let mut lines: Vec<Line> = rows
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("  {:<12}", label), Style::default().fg(TEXT_DIM)),
                Span::styled(value, Style::default().fg(TEXT_PRIMARY)),
            ])
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Edit the config file and restart to change these.",
        Style::default().fg(TEXT_SECONDARY),
    )));

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

pub fn render_error_popup(f: &mut Frame, area: Rect, error: &str) {
    let block = Block::default()
        .title(Span::styled(" Error ", Style::default().fg(ERROR_RED).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_type(BorderType::Thick)
        .border_style(Style::default().fg(ERROR_RED));

    let area = centered_rect(60, 30, area);
    f.render_widget(Clear, area);
    f.render_widget(block, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    let error_text = Paragraph::new(error)
        .style(Style::default().fg(TEXT_PRIMARY))
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);

    let dismiss_text = Paragraph::new("Press [Esc] to Acknowledge")
        .style(Style::default().fg(TEXT_DIM))
        .alignment(Alignment::Center);

    f.render_widget(error_text, layout[0]);
    f.render_widget(dismiss_text, layout[1]);
}
