use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::api::AnimeDetails;
use crate::app::{App, DETAIL_ACTIONS};
use crate::focus::{Focus, Region};
use crate::ui::cards::{render_card_row, Card, CARD_HEIGHT};
use crate::ui::colors::{ACCENT, ACCENT_DIM, TEXT_DIM, TEXT_PRIMARY, TEXT_SECONDARY};
use crate::ui::utils::button_style;

/// Characters of the synopsis shown before "More Info" expands it.
const SYNOPSIS_PREVIEW: usize = 320;

fn stats_line(details: &AnimeDetails) -> String {
    let stats = &details.info().stats;
    let episodes = stats.episodes.label();
    [
        stats.rating.as_str(),
        stats.quality.as_str(),
        stats.kind.as_str(),
        stats.duration.as_str(),
        episodes.as_str(),
    ]
    .iter()
    .filter(|s| !s.is_empty())
    .cloned()
    .collect::<Vec<_>>()
    .join(" • ")
}

fn synopsis(description: &str, expanded: bool) -> String {
    if description.is_empty() {
        return "No synopsis available.".to_string();
    }
    if expanded || description.chars().count() <= SYNOPSIS_PREVIEW {
        return description.to_string();
    }
    let preview: String = description.chars().take(SYNOPSIS_PREVIEW).collect();
    format!("{}…", preview.trim_end())
}

pub fn render_detail(f: &mut Frame, app: &mut App, area: Rect) {
    let details = app.details.clone();
    let related: Vec<Card> = details
        .as_ref()
        .map(|d| d.recommended_animes.iter().map(Card::from).collect())
        .unwrap_or_default();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(4), // Stats / genres / facts
            Constraint::Min(3),    // Synopsis
            Constraint::Length(2), // Actions
            Constraint::Length(if related.is_empty() { 0 } else { CARD_HEIGHT + 1 }),
        ])
        .split(area);

    let header = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(ACCENT_DIM));
    let (title, subtitle) = match &details {
        Some(d) => (
            d.info().name.clone(),
            d.more_info("japanese").unwrap_or_default(),
        ),
        None if app.pending_details_id.is_some() => ("Loading...".to_string(), String::new()),
        None => ("No details available".to_string(), String::new()),
    };
    f.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(
                title,
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                subtitle,
                Style::default().fg(TEXT_DIM).add_modifier(Modifier::ITALIC),
            )),
        ])
        .block(header),
        chunks[0],
    );

    if let Some(d) = &details {
        let mut facts: Vec<Span> = Vec::new();
        for (label, key) in [("Status", "status"), ("Aired", "aired"), ("Studios", "studios")] {
            if let Some(value) = d.more_info(key) {
                facts.push(Span::styled(format!("{}: ", label), Style::default().fg(TEXT_DIM)));
                facts.push(Span::styled(format!("{}   ", value), Style::default().fg(TEXT_SECONDARY)));
            }
        }
        let genres = d.genres();
        let lines = vec![
            Line::from(Span::styled(stats_line(d), Style::default().fg(TEXT_PRIMARY))),
            Line::from(vec![
                Span::styled("Genres: ", Style::default().fg(TEXT_DIM)),
                Span::styled(
                    if genres.is_empty() { "-".to_string() } else { genres.join(", ") },
                    Style::default().fg(ACCENT),
                ),
            ]),
            Line::from(facts),
        ];
        f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), chunks[1]);

        f.render_widget(
            Paragraph::new(synopsis(&d.info().description, app.detail_expanded))
                .style(Style::default().fg(TEXT_SECONDARY))
                .wrap(Wrap { trim: true }),
            chunks[2],
        );
    }

    render_actions(f, app, chunks[3]);

    if !related.is_empty() {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(chunks[4]);
        let focused = app.detail_focus.region_focused(Region::Related);
        f.render_widget(
            Paragraph::new(Span::styled(
                "Recommended",
                Style::default()
                    .fg(if focused { ACCENT } else { TEXT_PRIMARY })
                    .add_modifier(Modifier::BOLD),
            )),
            rows[0],
        );
        render_card_row(f, app, rows[1], Region::Related, &related);
    }
}

fn render_actions(f: &mut Frame, app: &mut App, area: Rect) {
    let info_label = if app.detail_expanded { " ℹ Less Info " } else { " ℹ More Info " };
    let labels = [" ← Back ", " ▶ Watch Now ", info_label];

    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(10),
            Constraint::Length(2),
            Constraint::Length(15),
            Constraint::Length(2),
            Constraint::Length(15),
            Constraint::Min(0),
        ])
        .split(Rect::new(area.x, area.y, area.width, area.height.min(1)));

    for index in 0..DETAIL_ACTIONS {
        let rect = cells[index * 2];
        let focused = app.is_focused(Region::DetailActions, index);
        f.render_widget(Paragraph::new(labels[index]).style(button_style(focused)), rect);
        app.hit_areas.push((rect, Focus::new(Region::DetailActions, index)));
    }
}
