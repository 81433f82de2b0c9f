use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::api::BasicAnime;
use crate::app::App;
use crate::focus::{Focus, Region};
use crate::ui::colors::{ACCENT, HIGHLIGHT, TEXT_DIM, TEXT_PRIMARY, TEXT_SECONDARY};
use crate::ui::utils::truncate;
use crate::viewport;

pub const CARD_WIDTH: u16 = 22;
pub const CARD_HEIGHT: u16 = 5;
const CARD_GAP: u16 = 1;

/// What a poster card shows.
#[derive(Debug, Clone)]
pub struct Card {
    pub title: String,
    pub kind: String,
    pub episodes: String,
}

impl From<&BasicAnime> for Card {
    fn from(anime: &BasicAnime) -> Self {
        Card {
            title: anime.name.clone(),
            kind: anime.kind.clone(),
            episodes: anime.episodes.label(),
        }
    }
}

/// Number of whole cards that fit in `width` columns.
pub fn visible_cards(width: u16) -> usize {
    ((width + CARD_GAP) / (CARD_WIDTH + CARD_GAP)).max(1) as usize
}

/// Draws a horizontal strip of cards, scrolled so the focused (or last
/// focused) card stays centred.
pub fn render_card_row(f: &mut Frame, app: &mut App, area: Rect, region: Region, cards: &[Card]) {
    if cards.is_empty() || area.height < 3 || area.width < 4 {
        return;
    }

    let manager = app.focus_manager();
    let focused_index = manager.current().filter(|focus| focus.region == region).map(|focus| focus.index);
    let anchor = focused_index.unwrap_or_else(|| manager.remembered(region));
    let visible = visible_cards(area.width);
    let offset = viewport::center_offset(anchor, cards.len(), visible);

    for (slot, (index, card)) in cards.iter().enumerate().skip(offset).take(visible).enumerate() {
        let x = area.x + slot as u16 * (CARD_WIDTH + CARD_GAP);
        let width = CARD_WIDTH.min(area.right().saturating_sub(x));
        if width < 4 {
            break;
        }
        let rect = Rect::new(x, area.y, width, CARD_HEIGHT.min(area.height));
        let focused = focused_index == Some(index);
        let inner_width = width.saturating_sub(2) as usize;

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(if focused { BorderType::Thick } else { BorderType::Rounded })
            .border_style(Style::default().fg(if focused { HIGHLIGHT } else { TEXT_DIM }));

        let title_style = if focused {
            Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(TEXT_PRIMARY)
        };

        let mut lines = vec![Line::from(Span::styled(truncate(&card.title, inner_width), title_style))];
        // Type only appears on the focused card
        if focused && !card.kind.is_empty() {
            lines.push(Line::from(Span::styled(
                truncate(&card.kind, inner_width),
                Style::default().fg(ACCENT),
            )));
        } else {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            truncate(&card.episodes, inner_width),
            Style::default().fg(if focused { TEXT_SECONDARY } else { TEXT_DIM }),
        )));

        f.render_widget(Paragraph::new(lines).block(block), rect);
        app.hit_areas.push((rect, Focus::new(region, index)));
    }

    if offset > 0 {
        f.render_widget(
            Paragraph::new("‹").style(Style::default().fg(ACCENT)),
            Rect::new(area.x, area.y + 2, 1, 1),
        );
    }
    if offset + visible < cards.len() {
        f.render_widget(
            Paragraph::new("›").style(Style::default().fg(ACCENT)),
            Rect::new(area.right() - 1, area.y + 2, 1, 1),
        );
    }
}
