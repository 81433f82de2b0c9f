use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::api::{HomeData, Period, RailKind};
use crate::app::App;
use crate::focus::{Focus, Region};
use crate::ui::cards::{render_card_row, Card, CARD_HEIGHT};
use crate::ui::colors::{ACCENT, ACCENT_DIM, HIGHLIGHT, SURFACE, TEXT_DIM, TEXT_PRIMARY, TEXT_SECONDARY};
use crate::ui::utils::{button_style, rank_color, truncate};
use crate::viewport;

const SPOTLIGHT_HEIGHT: u16 = 10;
const RAIL_HEIGHT: u16 = CARD_HEIGHT + 2;
const EMPTY_RAIL_HEIGHT: u16 = 3;
const TAB_WIDTH: u16 = 9;

#[derive(Debug, Clone, Copy, PartialEq)]
enum HomeSection {
    Spotlight,
    Rail(RailKind),
    Top10,
}

fn home_sections(data: &HomeData, period: Period) -> Vec<(HomeSection, u16)> {
    let mut sections = Vec::new();
    if !data.spotlight_animes.is_empty() {
        sections.push((HomeSection::Spotlight, SPOTLIGHT_HEIGHT));
    }
    for kind in RailKind::ALL {
        let height = if data.rail(kind).is_empty() { EMPTY_RAIL_HEIGHT } else { RAIL_HEIGHT };
        sections.push((HomeSection::Rail(kind), height));
    }
    let rows = data.top10(period).len().max(1) as u16;
    sections.push((HomeSection::Top10, 3 + rows + 1));
    sections
}

fn section_of(focus: Option<Focus>, sections: &[(HomeSection, u16)]) -> Option<usize> {
    let target = match focus?.region {
        Region::Spotlight => HomeSection::Spotlight,
        Region::Rail(kind) => HomeSection::Rail(kind),
        Region::Periods | Region::Ranked => HomeSection::Top10,
        _ => return None,
    };
    sections.iter().position(|(s, _)| *s == target)
}

pub fn render_home(f: &mut Frame, app: &mut App, area: Rect) {
    let sections = match app.home.as_ref() {
        Some(home) => home_sections(&home.data, app.period),
        None => {
            let text = if app.loading.is_some() {
                "Loading catalog..."
            } else {
                "No catalog loaded. Press [r] to retry."
            };
            f.render_widget(
                Paragraph::new(text)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(TEXT_DIM)),
                Rect::new(area.x, area.y + area.height / 2, area.width, area.height.min(1)),
            );
            return;
        }
    };

    let heights: Vec<u16> = sections.iter().map(|(_, h)| *h).collect();
    let focused = section_of(app.home_focus.current(), &sections).unwrap_or(app.home_scroll);
    app.home_scroll = viewport::first_visible(app.home_scroll, focused, &heights, area.height);

    let mut y = area.y;
    for (section, height) in sections.iter().skip(app.home_scroll) {
        if y >= area.bottom() {
            break;
        }
        let rect = Rect::new(area.x, y, area.width, (*height).min(area.bottom() - y));
        match section {
            HomeSection::Spotlight => render_spotlight(f, app, rect),
            HomeSection::Rail(kind) => render_rail(f, app, rect, *kind),
            HomeSection::Top10 => render_top10(f, app, rect),
        }
        y += rect.height;
    }
}

fn render_spotlight(f: &mut Frame, app: &mut App, area: Rect) {
    let Some(anime) = app.current_spotlight().cloned() else {
        return;
    };
    let region_focused = app.home_focus.region_focused(Region::Spotlight);

    let dots: String = (0..app.spotlight.len())
        .map(|i| if i == app.spotlight.index() { "● " } else { "○ " })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if region_focused { ACCENT } else { ACCENT_DIM }))
        .title(Span::styled(
            format!(" #{} Spotlight ", anime.rank),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(Span::styled(dots, Style::default().fg(ACCENT))).right_aligned());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(1), // Japanese title
            Constraint::Length(1), // Other info
            Constraint::Min(0),    // Description
            Constraint::Length(1), // Buttons
        ])
        .split(inner);

    f.render_widget(
        Paragraph::new(anime.name.as_str())
            .style(Style::default().fg(TEXT_PRIMARY).add_modifier(Modifier::BOLD)),
        rows[0],
    );
    f.render_widget(
        Paragraph::new(anime.jname.as_str())
            .style(Style::default().fg(TEXT_DIM).add_modifier(Modifier::ITALIC)),
        rows[1],
    );

    let mut info: Vec<String> = anime.other_info.iter().filter(|s| !s.is_empty()).cloned().collect();
    info.push(anime.episodes.label());
    f.render_widget(
        Paragraph::new(info.join(" • ")).style(Style::default().fg(TEXT_SECONDARY)),
        rows[2],
    );

    f.render_widget(
        Paragraph::new(anime.description.as_str())
            .style(Style::default().fg(TEXT_SECONDARY))
            .wrap(Wrap { trim: true }),
        rows[3],
    );

    let buttons = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(15),
            Constraint::Length(2),
            Constraint::Length(15),
            Constraint::Min(0),
        ])
        .split(rows[4]);

    for (index, (label, rect)) in [(" ▶ Watch Now ", buttons[0]), (" ℹ More Info ", buttons[2])]
        .into_iter()
        .enumerate()
    {
        let focused = app.is_focused(Region::Spotlight, index);
        f.render_widget(Paragraph::new(label).style(button_style(focused)), rect);
        app.hit_areas.push((rect, Focus::new(Region::Spotlight, index)));
    }
}

fn section_title<'a>(title: &'a str, count: usize, focused: bool) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            title,
            Style::default()
                .fg(if focused { ACCENT } else { TEXT_PRIMARY })
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", count), Style::default().fg(TEXT_DIM)),
    ])
}

fn render_rail(f: &mut Frame, app: &mut App, area: Rect, kind: RailKind) {
    let cards: Vec<Card> = app
        .home
        .as_ref()
        .map(|h| h.data.rail(kind).iter().map(Card::from).collect())
        .unwrap_or_default();
    let region = Region::Rail(kind);
    let focused = app.home_focus.region_focused(region);

    f.render_widget(
        Paragraph::new(section_title(kind.title(), cards.len(), focused)),
        Rect::new(area.x, area.y, area.width, area.height.min(1)),
    );

    let body = Rect::new(
        area.x,
        area.y + area.height.min(1),
        area.width,
        area.height.saturating_sub(1),
    );
    if cards.is_empty() {
        if body.height > 0 {
            f.render_widget(
                Paragraph::new("  Nothing here yet").style(Style::default().fg(TEXT_DIM)),
                Rect::new(body.x, body.y, body.width, 1),
            );
        }
        return;
    }
    render_card_row(f, app, body, region, &cards);
}

fn render_top10(f: &mut Frame, app: &mut App, area: Rect) {
    let entries: Vec<(u32, String, String)> = app
        .home
        .as_ref()
        .map(|h| {
            h.data
                .top10(app.period)
                .iter()
                .map(|t| (t.rank, t.name.clone(), t.episodes.label()))
                .collect()
        })
        .unwrap_or_default();
    let tabs_focused = app.home_focus.region_focused(Region::Periods);
    let list_focused = app.home_focus.region_focused(Region::Ranked);

    f.render_widget(
        Paragraph::new(section_title("Top 10", entries.len(), tabs_focused || list_focused)),
        Rect::new(area.x, area.y, area.width, area.height.min(1)),
    );
    if area.height < 2 {
        return;
    }

    // Period tabs
    let tab_y = area.y + 1;
    for (index, period) in Period::ALL.iter().enumerate() {
        let x = area.x + index as u16 * (TAB_WIDTH + 1);
        if x + TAB_WIDTH > area.right() {
            break;
        }
        let rect = Rect::new(x, tab_y, TAB_WIDTH, 1);
        let style = if app.is_focused(Region::Periods, index) {
            button_style(true)
        } else if *period == app.period {
            Style::default()
                .fg(ACCENT)
                .bg(SURFACE)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(TEXT_DIM)
        };
        f.render_widget(
            Paragraph::new(period.label()).alignment(Alignment::Center).style(style),
            rect,
        );
        app.hit_areas.push((rect, Focus::new(Region::Periods, index)));
    }

    let list_y = area.y + 3;
    if entries.is_empty() {
        if list_y < area.bottom() {
            f.render_widget(
                Paragraph::new("  No rankings for this period").style(Style::default().fg(TEXT_DIM)),
                Rect::new(area.x, list_y, area.width, 1),
            );
        }
        return;
    }

    // Scroll so the focused (or remembered) rank stays inside the rows we have
    let visible = area.bottom().saturating_sub(list_y) as usize;
    let anchor = app
        .home_focus
        .current()
        .filter(|focus| focus.region == Region::Ranked)
        .map(|focus| focus.index)
        .unwrap_or_else(|| app.home_focus.remembered(Region::Ranked));
    app.ranked_scroll = viewport::follow_offset(app.ranked_scroll, anchor, visible);

    let name_width = area.width.saturating_sub(30) as usize;
    for (slot, (index, (rank, name, episodes))) in entries
        .iter()
        .enumerate()
        .skip(app.ranked_scroll)
        .take(visible)
        .enumerate()
    {
        let y = list_y + slot as u16;
        let rect = Rect::new(area.x, y, area.width, 1);
        let focused = app.is_focused(Region::Ranked, index);
        let marker = if focused { "▸ " } else { "  " };
        let name_style = if focused {
            Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT_PRIMARY)
        };

        let line = Line::from(vec![
            Span::styled(marker, Style::default().fg(HIGHLIGHT)),
            Span::styled(
                format!("{:02}  ", rank),
                Style::default().fg(rank_color(*rank)).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("{:<width$}", truncate(name, name_width), width = name_width), name_style),
            Span::styled(format!("  {}", episodes), Style::default().fg(TEXT_DIM)),
        ]);
        let row_style = if focused { Style::default().bg(SURFACE) } else { Style::default() };
        f.render_widget(Paragraph::new(line).style(row_style), rect);
        app.hit_areas.push((rect, Focus::new(Region::Ranked, index)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DataSource;
    use crate::config::AppConfig;
    use crate::mock;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn draw_top10(app: &mut App, height: u16) -> Vec<Focus> {
        let mut terminal = Terminal::new(TestBackend::new(80, height)).unwrap();
        app.hit_areas.clear();
        terminal
            .draw(|f| render_top10(f, app, Rect::new(0, 0, 80, height)))
            .unwrap();
        app.hit_areas.iter().map(|(_, focus)| *focus).collect()
    }

    #[test]
    fn test_sections_follow_rail_order() {
        let home = mock::home_page();
        let sections = home_sections(&home.data, Period::Today);
        assert_eq!(sections.len(), 1 + RailKind::ALL.len() + 1);
        assert_eq!(sections[0], (HomeSection::Spotlight, SPOTLIGHT_HEIGHT));
        assert_eq!(sections[1], (HomeSection::Rail(RailKind::Trending), RAIL_HEIGHT));
        // Most Favorite is empty in the built-in catalog
        assert_eq!(sections[6], (HomeSection::Rail(RailKind::MostFavorite), EMPTY_RAIL_HEIGHT));
        assert_eq!(sections[8], (HomeSection::Top10, 3 + 3 + 1));
    }

    #[test]
    fn test_ranked_focus_maps_to_top10_section() {
        let home = mock::home_page();
        let sections = home_sections(&home.data, Period::Week);
        assert_eq!(section_of(Some(Focus::new(Region::Ranked, 0)), &sections), Some(8));
        assert_eq!(section_of(Some(Focus::new(Region::Sidebar, 0)), &sections), None);
        assert_eq!(section_of(None, &sections), None);
    }

    #[test]
    fn test_short_top10_scrolls_to_focused_rank() {
        let mut app = App::new(AppConfig {
            offline: true,
            ..Default::default()
        });
        app.set_home(mock::home_page(), DataSource::Mock);
        assert!(app.home_focus.focus(Region::Ranked, 2));

        // Title + tabs + gap leave two list rows
        let drawn = draw_top10(&mut app, 5);
        assert!(drawn.contains(&Focus::new(Region::Ranked, 2)));
        assert!(!drawn.contains(&Focus::new(Region::Ranked, 0)));
        assert_eq!(app.ranked_scroll, 1);

        assert!(app.home_focus.focus(Region::Ranked, 0));
        let drawn = draw_top10(&mut app, 5);
        assert!(drawn.contains(&Focus::new(Region::Ranked, 0)));
        assert_eq!(app.ranked_scroll, 0);
    }
}
