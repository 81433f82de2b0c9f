use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::focus::{Focus, Region};
use crate::ui::colors::{ACCENT, HIGHLIGHT, SURFACE, TEXT_DIM, TEXT_PRIMARY, TEXT_SECONDARY};
use crate::ui::utils::{button_style, truncate};
use crate::viewport;

pub fn render_search(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Input
            Constraint::Length(1), // Recent queries
            Constraint::Min(0),    // Results
            Constraint::Length(1), // Pager
        ])
        .split(area);

    render_input(f, app, chunks[0]);

    let recent = app.search_history.suggestions(app.search_input.value());
    if !recent.is_empty() {
        f.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(" Recent: ", Style::default().fg(TEXT_DIM)),
                Span::styled(recent.join(" · "), Style::default().fg(TEXT_SECONDARY)),
            ])),
            chunks[1],
        );
    }

    render_results(f, app, chunks[2]);
    render_pager(f, app, chunks[3]);
}

fn render_input(f: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.search_focus.region_focused(Region::SearchInput);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if focused { BorderType::Thick } else { BorderType::Rounded })
        .border_style(Style::default().fg(if focused { HIGHLIGHT } else { TEXT_DIM }))
        .title(Span::styled(" Search ", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)));

    let value = app.search_input.value();
    let mut display = if value.is_empty() && !focused {
        "Press / to search titles".to_string()
    } else {
        value.to_string()
    };

    // Blinking block cursor
    if focused && (app.loading_tick / 5) % 2 == 0 {
        let cursor = app.search_input.visual_cursor();
        if cursor >= display.chars().count() {
            display.push('█');
        } else {
            display = display
                .chars()
                .enumerate()
                .map(|(i, c)| if i == cursor { '█' } else { c })
                .collect();
        }
    }

    let style = if value.is_empty() && !focused {
        Style::default().fg(TEXT_DIM)
    } else {
        Style::default().fg(TEXT_PRIMARY)
    };
    let inner_width = area.width.saturating_sub(4) as usize;
    let skip = display.chars().count().saturating_sub(inner_width);
    let visible: String = display.chars().skip(skip).collect();

    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("> ", Style::default().fg(ACCENT)),
            Span::styled(visible, style),
        ]))
        .block(block),
        area,
    );
    app.hit_areas.push((area, Focus::new(Region::SearchInput, 0)));
}

fn render_results(f: &mut Frame, app: &mut App, area: Rect) {
    let rows: Vec<(String, String, String)> = match &app.search_results {
        None => {
            f.render_widget(
                Paragraph::new("  Type a title and press Enter").style(Style::default().fg(TEXT_DIM)),
                area,
            );
            return;
        }
        Some(results) if results.animes.is_empty() => {
            f.render_widget(
                Paragraph::new(format!("  No results for \"{}\"", results.search_query))
                    .style(Style::default().fg(TEXT_DIM)),
                area,
            );
            return;
        }
        Some(results) => results
            .animes
            .iter()
            .map(|a| (a.name.clone(), a.kind.clone(), a.episodes.label()))
            .collect(),
    };

    let visible = area.height as usize;
    let anchor = app
        .search_focus
        .current()
        .filter(|focus| focus.region == Region::SearchResults)
        .map(|focus| focus.index)
        .unwrap_or_else(|| app.search_focus.remembered(Region::SearchResults));
    app.search_scroll = viewport::follow_offset(app.search_scroll, anchor, visible);

    let name_width = area.width.saturating_sub(28) as usize;
    for (slot, (index, (name, kind, episodes))) in rows
        .iter()
        .enumerate()
        .skip(app.search_scroll)
        .take(visible)
        .enumerate()
    {
        let rect = Rect::new(area.x, area.y + slot as u16, area.width, 1);
        let focused = app.is_focused(Region::SearchResults, index);
        let line = Line::from(vec![
            Span::styled(if focused { "▸ " } else { "  " }, Style::default().fg(HIGHLIGHT)),
            Span::styled(
                format!("{:<width$}", truncate(name, name_width), width = name_width),
                if focused {
                    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(TEXT_PRIMARY)
                },
            ),
            Span::styled(format!("  {:<7}", kind), Style::default().fg(ACCENT)),
            Span::styled(episodes.clone(), Style::default().fg(TEXT_DIM)),
        ]);
        let row_style = if focused { Style::default().bg(SURFACE) } else { Style::default() };
        f.render_widget(Paragraph::new(line).style(row_style), rect);
        app.hit_areas.push((rect, Focus::new(Region::SearchResults, index)));
    }
}

fn render_pager(f: &mut Frame, app: &mut App, area: Rect) {
    let Some((current, total)) = app
        .search_results
        .as_ref()
        .filter(|r| r.total_pages > 1 || r.current_page > 1)
        .map(|r| (r.current_page, r.total_pages))
    else {
        return;
    };

    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(10),
            Constraint::Length(16),
            Constraint::Length(10),
            Constraint::Min(0),
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(format!("  Page {} / {}", current, total.max(current)))
            .style(Style::default().fg(TEXT_SECONDARY)),
        cells[1],
    );

    for (index, (label, rect)) in [(" ◀ Prev ", cells[0]), (" Next ▶ ", cells[2])]
        .into_iter()
        .enumerate()
    {
        let focused = app.is_focused(Region::Pager, index);
        f.render_widget(Paragraph::new(label).style(button_style(focused)), rect);
        app.hit_areas.push((rect, Focus::new(Region::Pager, index)));
    }
}
