use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, CurrentScreen, SidebarItem};
use crate::focus::{Focus, Region};
use crate::ui::colors::{ACCENT, ACCENT_DIM, TEXT_SECONDARY};

/// Icon rail that widens into labelled entries while it holds focus.
pub fn render_sidebar(f: &mut Frame, app: &mut App, area: Rect) {
    let expanded = app.focus_manager().in_sidebar();
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(if expanded { ACCENT } else { ACCENT_DIM }));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let logo = if expanded { " ◆ AnimeStream" } else { " ◆" };
    f.render_widget(
        Paragraph::new(logo).style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)),
        Rect::new(inner.x, inner.y, inner.width, 1),
    );

    for (i, item) in SidebarItem::ALL.iter().enumerate() {
        let y = inner.y + 2 + i as u16 * 2;
        if y >= inner.bottom() {
            break;
        }
        let rect = Rect::new(inner.x, y, inner.width, 1);
        let focused = app.is_focused(Region::Sidebar, i);
        let active = matches!(
            (item, app.current_screen),
            (SidebarItem::Home, CurrentScreen::Home) | (SidebarItem::Search, CurrentScreen::Search)
        );

        let style = if focused {
            Style::default().fg(Color::Black).bg(ACCENT).add_modifier(Modifier::BOLD)
        } else if active {
            Style::default().fg(ACCENT)
        } else {
            Style::default().fg(TEXT_SECONDARY)
        };
        let text = if expanded {
            format!(" {} {}", item.icon(), item.label())
        } else {
            format!(" {}", item.icon())
        };

        f.render_widget(Paragraph::new(text).style(style), rect);
        app.hit_areas.push((rect, Focus::new(Region::Sidebar, i)));
    }
}
