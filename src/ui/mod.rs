pub mod cards;
pub mod colors;
pub mod detail;
pub mod footer;
pub mod home;
pub mod loading;
pub mod popups;
pub mod search;
pub mod sidebar;
pub mod utils;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::{App, CurrentScreen, Popup};

pub const SIDEBAR_COLLAPSED: u16 = 5;
pub const SIDEBAR_EXPANDED: u16 = 18;

pub fn ui(f: &mut Frame, app: &mut App) {
    let area = f.area();
    app.hit_areas.clear();

    let sidebar_width = if app.focus_manager().in_sidebar() {
        SIDEBAR_EXPANDED
    } else {
        SIDEBAR_COLLAPSED
    };
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(sidebar_width), Constraint::Min(0)])
        .split(area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Footer
        ])
        .split(columns[1]);

    sidebar::render_sidebar(f, app, columns[0]);

    match app.current_screen {
        CurrentScreen::Home => home::render_home(f, app, rows[0]),
        CurrentScreen::Detail => detail::render_detail(f, app, rows[0]),
        CurrentScreen::Search => search::render_search(f, app, rows[0]),
    }

    footer::render_footer(f, app, rows[1]);

    // Overlays
    if app.loading.is_some() {
        loading::render_loading(f, app, area);
    }

    match app.popup {
        Some(Popup::Help) => popups::render_help_popup(f, area),
        Some(Popup::Settings) => popups::render_settings_popup(f, app, area),
        None => {}
    }

    if let Some(error) = &app.error_message {
        popups::render_error_popup(f, area, error);
    }
}
