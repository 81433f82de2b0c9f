use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::api::DataSource;
use crate::app::{App, CurrentScreen};
use crate::ui::colors::{ACCENT, LIVE_GREEN, MOCK_ORANGE, TEXT_DIM, TEXT_PRIMARY};

pub fn render_footer(f: &mut Frame, app: &App, area: Rect) {
    let key_style = Style::default().fg(ACCENT).add_modifier(Modifier::BOLD);
    let label_style = Style::default().fg(TEXT_PRIMARY);

    let left = if let Some(status) = &app.status_message {
        Line::from(Span::styled(
            format!(" {}", status),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ))
    } else {
        let mut spans = vec![
            Span::styled(" ←↑↓→ ", key_style),
            Span::styled("Move  ", label_style),
            Span::styled(" Enter ", key_style),
            Span::styled("Select  ", label_style),
            Span::styled(" Esc ", key_style),
            Span::styled("Back  ", label_style),
            Span::styled(" Tab ", key_style),
            Span::styled("Menu  ", label_style),
        ];
        if app.is_typing() {
            spans.push(Span::styled(" ↓ ", key_style));
            spans.push(Span::styled("Results", label_style));
        } else {
            if app.current_screen == CurrentScreen::Home {
                spans.push(Span::styled(" [ ] ", key_style));
                spans.push(Span::styled("Slides  ", label_style));
            }
            spans.push(Span::styled(" / ", key_style));
            spans.push(Span::styled("Search  ", label_style));
            spans.push(Span::styled(" ? ", key_style));
            spans.push(Span::styled("Help  ", label_style));
            spans.push(Span::styled(" q ", key_style));
            spans.push(Span::styled("Quit", label_style));
        }
        Line::from(spans)
    };
    f.render_widget(Paragraph::new(left).alignment(Alignment::Left), area);

    // Focus id, data source and load time (bottom right)
    let mut right = vec![Span::styled(
        format!("{} ", app.focus_id()),
        Style::default().fg(TEXT_DIM),
    )];
    if let Some(source) = app.data_source {
        let color = match source {
            DataSource::Live => LIVE_GREEN,
            DataSource::Mock => MOCK_ORANGE,
        };
        right.push(Span::styled(
            format!("[{}]", source.label()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    }
    if let Some(at) = app.loaded_at {
        right.push(Span::styled(
            format!(" {} ", at.format("%H:%M")),
            Style::default().fg(TEXT_DIM),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(right)).alignment(Alignment::Right), area);
}
