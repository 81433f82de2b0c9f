use animestream_lib::api::{AnimeDetails, DataSource, HomePageData, RailKind};
use animestream_lib::app::{App, AsyncAction, CurrentScreen, Popup, Request};
use animestream_lib::config::AppConfig;
use animestream_lib::errors::LoadingStage;
use animestream_lib::focus::{Focus, NavigationStyle, Region};
use animestream_lib::handlers::async_actions::handle_async_action;
use animestream_lib::handlers::mouse::handle_mouse_event;
use animestream_lib::mock;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

// ─── Helpers ───────────────────────────────────────────────────────────────────

fn make_key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::empty(),
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

fn press(app: &mut App, codes: &[KeyCode]) -> Option<Request> {
    let mut last = None;
    for code in codes {
        last = app.handle_key_event(make_key(*code));
    }
    last
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        app.handle_key_event(make_key(KeyCode::Char(c)));
    }
}

fn click(app: &mut App, focus: Focus) -> Option<Request> {
    let (rect, _) = *app
        .hit_areas
        .iter()
        .find(|(_, f)| *f == focus)
        .unwrap_or_else(|| panic!("{} was not drawn", focus));
    handle_mouse_event(
        app,
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: rect.x,
            row: rect.y,
            modifiers: KeyModifiers::empty(),
        },
    )
}

fn offline_app() -> App {
    App::new(AppConfig {
        offline: true,
        ..Default::default()
    })
}

fn loaded_app() -> App {
    let mut app = offline_app();
    let request = app.start();
    assert_eq!(request, Request::Home);
    handle_async_action(
        &mut app,
        AsyncAction::HomeLoaded(Box::new(mock::home_page()), DataSource::Mock),
    );
    app
}

/// Render one frame of the UI at the given size and return its text; panics on crash
fn render_sized(app: &mut App, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|f| {
            animestream_lib::ui::ui(f, app);
        })
        .unwrap();
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

fn render_frame(app: &mut App) -> String {
    render_sized(app, 120, 40)
}

// ─── Test 1: All Screens Render Without Panic (Empty State) ────────────────────

#[test]
fn test_all_screens_render_empty_state() {
    for screen in [CurrentScreen::Home, CurrentScreen::Detail, CurrentScreen::Search] {
        let mut app = offline_app();
        app.current_screen = screen;
        render_frame(&mut app);
    }
}

#[test]
fn test_home_shows_loading_until_catalog_arrives() {
    let mut app = offline_app();
    app.start();
    assert_eq!(app.loading, Some(LoadingStage::Home));
    render_frame(&mut app);

    handle_async_action(
        &mut app,
        AsyncAction::HomeLoaded(Box::new(mock::home_page()), DataSource::Mock),
    );
    assert_eq!(app.loading, None);
    let screen = render_frame(&mut app);
    assert!(screen.contains("Chainsaw Man"), "spotlight title should be drawn");
    assert!(screen.contains("Trending Now"));
    assert!(screen.contains("[MOCK]"));
}

// ─── Test 2: Directional Navigation Across the Home Page ───────────────────────

#[test]
fn test_home_focus_walks_rails_and_top10() {
    let mut app = loaded_app();
    assert_eq!(app.focus_id(), "watch-button");

    press(&mut app, &[KeyCode::Right]);
    assert_eq!(app.focus_id(), "info-button");

    press(&mut app, &[KeyCode::Down]);
    assert_eq!(app.focus_id(), "trending-card-0");
    press(&mut app, &[KeyCode::Right, KeyCode::Right]);
    assert_eq!(app.focus_id(), "trending-card-0", "two cards wrap back to the first");

    press(&mut app, &[KeyCode::Down, KeyCode::Right]);
    assert_eq!(app.focus_id(), "latest-card-1");

    // Empty rails are skipped on the way to the Top 10 tabs
    press(&mut app, &[KeyCode::Down, KeyCode::Down, KeyCode::Down, KeyCode::Down]);
    assert_eq!(app.focus_id(), "period-0");

    press(&mut app, &[KeyCode::Right]);
    assert_eq!(app.focus_id(), "period-1");
    assert_eq!(app.period.label(), "Week");

    press(&mut app, &[KeyCode::Down]);
    assert_eq!(app.focus_id(), "rank-1");

    // Up walks back through the sections and remembers each card index
    press(&mut app, &[KeyCode::Up, KeyCode::Up, KeyCode::Up, KeyCode::Up, KeyCode::Up]);
    assert_eq!(app.focus_id(), "latest-card-1");

    // Every intermediate frame draws
    render_frame(&mut app);
}

#[test]
fn test_edge_navigation_leaves_rail_for_sidebar() {
    let mut app = App::new(AppConfig {
        offline: true,
        navigation: NavigationStyle::Edge,
        ..Default::default()
    });
    handle_async_action(
        &mut app,
        AsyncAction::HomeLoaded(Box::new(mock::home_page()), DataSource::Mock),
    );

    press(&mut app, &[KeyCode::Down, KeyCode::Right, KeyCode::Right]);
    assert_eq!(app.focus_id(), "trending-card-1", "edge style stops at the end");

    press(&mut app, &[KeyCode::Left, KeyCode::Left]);
    assert_eq!(app.focus_id(), "sidebar-home");

    press(&mut app, &[KeyCode::Right]);
    assert_eq!(app.focus_id(), "trending-card-0");
}

#[test]
fn test_sidebar_shortcuts() {
    let mut app = loaded_app();
    press(&mut app, &[KeyCode::Tab]);
    assert_eq!(app.focus_id(), "sidebar-home");

    press(&mut app, &[KeyCode::Down]);
    assert_eq!(app.focus_id(), "sidebar-search");
    press(&mut app, &[KeyCode::Enter]);
    assert_eq!(app.current_screen, CurrentScreen::Search);
    assert!(app.is_typing());
    render_frame(&mut app);

    press(&mut app, &[KeyCode::Esc]);
    assert_eq!(app.current_screen, CurrentScreen::Home);
    assert_eq!(app.focus_id(), "sidebar-search", "home keeps its sidebar focus");

    // Upcoming jumps straight to its rail
    press(&mut app, &[KeyCode::Down, KeyCode::Down, KeyCode::Down]);
    assert_eq!(app.focus_id(), "sidebar-upcoming");
    press(&mut app, &[KeyCode::Enter]);
    assert_eq!(app.focus_id(), "upcoming-card-0");
    let screen = render_frame(&mut app);
    assert!(screen.contains("Tower of God"));
}

#[test]
fn test_spotlight_paging_keys() {
    let mut app = loaded_app();
    assert_eq!(app.current_spotlight().map(|s| s.name.as_str()), Some("Chainsaw Man"));
    press(&mut app, &[KeyCode::Char(']')]);
    assert_eq!(
        app.current_spotlight().map(|s| s.name.as_str()),
        Some("Frieren: Beyond Journey's End")
    );
    press(&mut app, &[KeyCode::Char('['), KeyCode::Char('[')]);
    assert_eq!(app.current_spotlight().map(|s| s.name.as_str()), Some("Blue Lock"));
    render_frame(&mut app);
}

// ─── Test 3: Detail Screen ─────────────────────────────────────────────────────

#[test]
fn test_open_details_from_rail_and_go_back() {
    let mut app = loaded_app();
    let request = press(&mut app, &[KeyCode::Down, KeyCode::Enter]);
    assert_eq!(
        request,
        Some(Request::Details {
            id: "wind-breaker-171745".to_string()
        })
    );
    assert_eq!(app.current_screen, CurrentScreen::Detail);
    assert_eq!(app.focus_id(), "back-button");

    // The summary is shown while the full record loads
    let screen = render_frame(&mut app);
    assert!(screen.contains("Wind Breaker"));

    let mut details = AnimeDetails::from_summary(
        &app.home.as_ref().unwrap().data.rail(RailKind::Trending)[0],
        Some("Street fights in Makochi."),
    );
    details.recommended_animes = mock::home_page().data.most_popular_animes;
    handle_async_action(
        &mut app,
        AsyncAction::DetailsLoaded("wind-breaker-171745".into(), Box::new(details)),
    );
    assert_eq!(app.loading, None);
    let screen = render_frame(&mut app);
    assert!(screen.contains("Street fights in Makochi."));
    assert!(screen.contains("Recommended"));

    press(&mut app, &[KeyCode::Right, KeyCode::Right, KeyCode::Enter]);
    assert!(app.detail_expanded);
    render_frame(&mut app);

    press(&mut app, &[KeyCode::Down]);
    assert_eq!(app.focus_id(), "related-card-0");

    press(&mut app, &[KeyCode::Esc]);
    assert_eq!(app.current_screen, CurrentScreen::Home);
    assert_eq!(app.focus_id(), "trending-card-0", "home focus survives the detour");
}

#[test]
fn test_details_failure_shows_error_popup() {
    let mut app = loaded_app();
    press(&mut app, &[KeyCode::Enter, KeyCode::Right]);
    assert_eq!(app.focus_id(), "info-button");
    let request = press(&mut app, &[KeyCode::Enter]);
    assert_eq!(
        request,
        Some(Request::Details {
            id: "chainsaw-man-17406".to_string()
        })
    );

    handle_async_action(
        &mut app,
        AsyncAction::DetailsFailed("chainsaw-man-17406".into(), "Server unavailable".into()),
    );
    let screen = render_frame(&mut app);
    assert!(screen.contains("Server unavailable"));
    assert!(screen.contains("Acknowledge"));

    // Keys are swallowed until the popup is dismissed
    press(&mut app, &[KeyCode::Right]);
    assert_eq!(app.focus_id(), "back-button");
    press(&mut app, &[KeyCode::Esc]);
    assert!(app.error_message.is_none());
    assert_eq!(app.current_screen, CurrentScreen::Detail);
}

#[test]
fn test_stale_details_are_ignored() {
    let mut app = loaded_app();
    press(&mut app, &[KeyCode::Down, KeyCode::Enter, KeyCode::Esc]);
    assert_eq!(app.current_screen, CurrentScreen::Home);

    let summary = app.home.as_ref().unwrap().data.rail(RailKind::Trending)[0].clone();
    handle_async_action(
        &mut app,
        AsyncAction::DetailsLoaded(
            summary.id.clone(),
            Box::new(AnimeDetails::from_summary(&summary, None)),
        ),
    );
    assert_eq!(app.current_screen, CurrentScreen::Home);
    assert!(app.pending_details_id.is_none());
}

// ─── Test 4: Search Screen ─────────────────────────────────────────────────────

#[test]
fn test_search_flow() {
    let mut app = loaded_app();
    press(&mut app, &[KeyCode::Char('/')]);
    assert_eq!(app.current_screen, CurrentScreen::Search);
    assert_eq!(app.focus_id(), "search-input");

    // Enter with an empty box does nothing but hint
    assert_eq!(press(&mut app, &[KeyCode::Enter]), None);

    // 'q' is text while typing, not quit
    type_text(&mut app, "quiet");
    assert!(!app.should_quit);
    for _ in 0.."quiet".len() {
        press(&mut app, &[KeyCode::Backspace]);
    }

    type_text(&mut app, "chain");
    let request = press(&mut app, &[KeyCode::Enter]);
    assert_eq!(
        request,
        Some(Request::Search {
            query: "chain".to_string(),
            page: 1
        })
    );
    render_frame(&mut app);

    handle_async_action(&mut app, AsyncAction::SearchLoaded("chain".into(), 1, mock::search("chain", 1)));
    assert_eq!(app.focus_id(), "result-0");
    let screen = render_frame(&mut app);
    assert!(screen.contains("Chainsaw Man"));

    let request = press(&mut app, &[KeyCode::Enter]);
    assert_eq!(
        request,
        Some(Request::Details {
            id: "chainsaw-man-17406".to_string()
        })
    );
    assert_eq!(app.current_screen, CurrentScreen::Detail);

    press(&mut app, &[KeyCode::Esc]);
    assert_eq!(app.current_screen, CurrentScreen::Search);
    assert_eq!(app.focus_id(), "result-0");
}

#[test]
fn test_search_without_matches() {
    let mut app = loaded_app();
    press(&mut app, &[KeyCode::Char('/')]);
    type_text(&mut app, "zzz");
    press(&mut app, &[KeyCode::Enter]);
    handle_async_action(&mut app, AsyncAction::SearchLoaded("zzz".into(), 1, mock::search("zzz", 1)));

    assert_eq!(app.focus_id(), "search-input");
    let screen = render_frame(&mut app);
    assert!(screen.contains("No results"));
}

// ─── Test 5: Mouse ─────────────────────────────────────────────────────────────

#[test]
fn test_click_focuses_then_activates() {
    let mut app = loaded_app();
    render_frame(&mut app);

    let card = Focus::new(Region::Rail(RailKind::Trending), 1);
    assert_eq!(click(&mut app, card), None);
    assert_eq!(app.focus_id(), "trending-card-1");

    let request = click(&mut app, card);
    assert_eq!(
        request,
        Some(Request::Details {
            id: "kaiju-no-8-170001".to_string()
        })
    );
}

// ─── Test 6: Popups and Small Terminals ────────────────────────────────────────

#[test]
fn test_popups_render_and_close() {
    let mut app = loaded_app();
    press(&mut app, &[KeyCode::Char('?')]);
    assert_eq!(app.popup, Some(Popup::Help));
    render_frame(&mut app);
    press(&mut app, &[KeyCode::Esc]);
    assert_eq!(app.popup, None);

    press(&mut app, &[KeyCode::Tab]);
    press(&mut app, &[KeyCode::Down; 5]);
    assert_eq!(app.focus_id(), "sidebar-settings");
    press(&mut app, &[KeyCode::Enter]);
    assert_eq!(app.popup, Some(Popup::Settings));
    let screen = render_frame(&mut app);
    assert!(screen.contains("offline") || screen.contains("Offline"));
}

#[test]
fn test_tiny_terminal_does_not_panic() {
    let mut app = loaded_app();
    for (w, h) in [(20, 6), (40, 12), (80, 24), (200, 60)] {
        render_sized(&mut app, w, h);
    }
    press(&mut app, &[KeyCode::Down, KeyCode::Enter]);
    render_sized(&mut app, 30, 8);
    press(&mut app, &[KeyCode::Esc, KeyCode::Char('/')]);
    render_sized(&mut app, 30, 8);
    app.error_message = Some("x".repeat(500));
    render_sized(&mut app, 20, 5);
}

#[test]
fn test_mock_home_from_failed_live_api_sets_status() {
    let mut app = App::new(AppConfig::default());
    handle_async_action(
        &mut app,
        AsyncAction::HomeLoaded(Box::new(mock::home_page()), DataSource::Mock),
    );
    assert!(app.status_message.is_some());

    // A refresh keeps the user's place
    press(&mut app, &[KeyCode::Down, KeyCode::Right]);
    let request = press(&mut app, &[KeyCode::Char('r')]);
    assert_eq!(request, Some(Request::Home));
    let data: HomePageData = mock::home_page();
    handle_async_action(&mut app, AsyncAction::HomeLoaded(Box::new(data), DataSource::Live));
    assert_eq!(app.focus_id(), "trending-card-1");
    assert_eq!(app.data_source, Some(DataSource::Live));
}
