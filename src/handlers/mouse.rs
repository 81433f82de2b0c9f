use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::app::{App, Request};
use crate::focus::NavKey;

pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> Option<Request> {
    if app.error_message.is_some() || app.popup.is_some() {
        return None;
    }
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let focus = app.hit_test(mouse.column, mouse.row)?;
            app.focus_element(focus)
        }
        MouseEventKind::ScrollDown => app.navigate(NavKey::Down),
        MouseEventKind::ScrollUp => app.navigate(NavKey::Up),
        _ => None,
    }
}
