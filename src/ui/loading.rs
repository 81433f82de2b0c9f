use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::colors::{ACCENT, ACCENT_DIM, TEXT_PRIMARY};
use crate::ui::utils::centered_rect;

pub fn render_loading(f: &mut Frame, app: &App, area: Rect) {
    let Some(stage) = &app.loading else {
        return;
    };
    let popup_area = centered_rect(50, 20, area);
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT_DIM));
    f.render_widget(block, popup_area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Kana shimmer
            Constraint::Length(1), // Message
        ])
        .margin(1)
        .split(popup_area);

    // Kana shimmer, one highlighted glyph sweeping across
    let kana = ["ア", "ニ", "メ", "ス", "ト", "リ", "ー", "ム"];
    let tick = app.loading_tick;
    let lit = (tick / 2) as usize % kana.len();
    let shimmer: Vec<Span> = kana
        .iter()
        .enumerate()
        .map(|(i, k)| {
            let style = if i == lit {
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(ACCENT_DIM)
            };
            Span::styled(*k, style)
        })
        .collect();
    f.render_widget(
        Paragraph::new(Line::from(shimmer)).alignment(Alignment::Center),
        layout[0],
    );

    let dots = ".".repeat(((tick / 8) % 4) as usize);
    let spinner_chars = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
    let spinner = spinner_chars[(tick % spinner_chars.len() as u64) as usize];

    let loading_text = Paragraph::new(Line::from(vec![
        Span::styled(format!(" {} ", spinner), Style::default().fg(ACCENT)),
        Span::styled(
            stage.display_name(),
            Style::default().fg(TEXT_PRIMARY).add_modifier(Modifier::BOLD),
        ),
        Span::styled(dots, Style::default().fg(ACCENT_DIM)),
    ]))
    .alignment(Alignment::Center);

    f.render_widget(loading_text, layout[1]);
}
