use crossterm::event::{Event, KeyCode, KeyEvent};
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use crate::focus::NavKey;

/// Remote-style mapping: arrows or vim keys move, Enter/Space select,
/// Esc/Backspace go back.
pub fn nav_key(key: &KeyEvent) -> Option<NavKey> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(NavKey::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(NavKey::Down),
        KeyCode::Left | KeyCode::Char('h') => Some(NavKey::Left),
        KeyCode::Right | KeyCode::Char('l') => Some(NavKey::Right),
        KeyCode::Enter | KeyCode::Char(' ') => Some(NavKey::Select),
        KeyCode::Esc | KeyCode::Backspace => Some(NavKey::Back),
        _ => None,
    }
}

/// Feeds a key to a text box. Returns true if the text or cursor changed.
pub fn edit_input(input: &mut Input, key: KeyEvent) -> bool {
    input.handle_event(&Event::Key(key)).is_some()
}
