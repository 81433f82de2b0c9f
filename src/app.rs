use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Position, Rect};
use tui_input::Input;

use crate::api::{
    AnimeDetails, DataSource, HomePageData, Period, RailKind, SearchResults, SpotlightAnime,
};
use crate::config::AppConfig;
use crate::errors::{LoadingStage, SearchHistory};
use crate::focus::{Focus, FocusLayout, FocusManager, NavKey, Region, Transition};
use crate::handlers::input::{edit_input, nav_key};
use crate::spotlight::SpotlightRotation;

/// Results of background requests, applied by `handlers::async_actions`.
#[derive(Debug, Clone)]
pub enum AsyncAction {
    HomeLoaded(Box<HomePageData>, DataSource),
    DetailsLoaded(String, Box<AnimeDetails>),
    DetailsFailed(String, String),
    /// Query and page as requested, then the results.
    SearchLoaded(String, u32, SearchResults),
    SearchFailed(String, u32, String),
}

/// Work the run loop should start on behalf of the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Home,
    Details { id: String },
    Search { query: String, page: u32 },
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum CurrentScreen {
    Home,   // Spotlight, rails and Top 10
    Detail, // One title
    Search, // Query box and paged results
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum Popup {
    Help,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarItem {
    Home,
    Search,
    Trending,
    Favorites,
    Upcoming,
    Settings,
}

impl SidebarItem {
    pub const ALL: [SidebarItem; 6] = [
        SidebarItem::Home,
        SidebarItem::Search,
        SidebarItem::Trending,
        SidebarItem::Favorites,
        SidebarItem::Upcoming,
        SidebarItem::Settings,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SidebarItem::Home => "Home",
            SidebarItem::Search => "Search",
            SidebarItem::Trending => "Trending",
            SidebarItem::Favorites => "Favorites",
            SidebarItem::Upcoming => "Upcoming",
            SidebarItem::Settings => "Settings",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            SidebarItem::Home => "⌂",
            SidebarItem::Search => "⌕",
            SidebarItem::Trending => "↗",
            SidebarItem::Favorites => "♥",
            SidebarItem::Upcoming => "◷",
            SidebarItem::Settings => "⚙",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            SidebarItem::Home => "home",
            SidebarItem::Search => "search",
            SidebarItem::Trending => "trending",
            SidebarItem::Favorites => "favorites",
            SidebarItem::Upcoming => "upcoming",
            SidebarItem::Settings => "settings",
        }
    }

    /// Home rail this item jumps to.
    pub fn rail(&self) -> Option<RailKind> {
        match self {
            SidebarItem::Trending => Some(RailKind::Trending),
            SidebarItem::Favorites => Some(RailKind::MostFavorite),
            SidebarItem::Upcoming => Some(RailKind::TopUpcoming),
            _ => None,
        }
    }
}

/// Back / Watch Now / More Info.
pub const DETAIL_ACTIONS: usize = 3;
/// Previous / Next.
const PAGER_BUTTONS: usize = 2;

pub struct App {
    pub config: AppConfig,
    pub current_screen: CurrentScreen,
    pub screen_stack: Vec<CurrentScreen>,
    pub should_quit: bool,

    // Home
    pub home: Option<HomePageData>,
    pub data_source: Option<DataSource>,
    pub loaded_at: Option<chrono::DateTime<chrono::Local>>,
    pub period: Period,
    pub spotlight: SpotlightRotation,
    pub home_focus: FocusManager,
    pub home_scroll: usize,
    pub ranked_scroll: usize,

    // Detail
    pub details: Option<AnimeDetails>,
    pub pending_details_id: Option<String>,
    pub detail_expanded: bool,
    pub detail_focus: FocusManager,

    // Search
    pub search_input: Input,
    pub search_results: Option<SearchResults>,
    pub search_history: SearchHistory,
    pub search_focus: FocusManager,
    pub search_scroll: usize,
    pub pending_search: Option<(String, u32)>,

    // Overlays
    pub loading: Option<LoadingStage>,
    pub loading_tick: u64,
    pub error_message: Option<String>,
    pub status_message: Option<String>,
    pub popup: Option<Popup>,

    // Layout tracking for mouse support, refreshed every frame
    pub hit_areas: Vec<(Rect, Focus)>,
}

impl App {
    pub fn new(config: AppConfig) -> App {
        let now = Instant::now();
        let style = config.navigation;
        let mut app = App {
            spotlight: SpotlightRotation::new(config.spotlight_interval(), now),
            config,
            current_screen: CurrentScreen::Home,
            screen_stack: Vec::new(),
            should_quit: false,

            home: None,
            data_source: None,
            loaded_at: None,
            period: Period::Today,
            home_focus: FocusManager::new(style),
            home_scroll: 0,
            ranked_scroll: 0,

            details: None,
            pending_details_id: None,
            detail_expanded: false,
            detail_focus: FocusManager::new(style),

            search_input: Input::default(),
            search_results: None,
            search_history: SearchHistory::new(),
            search_focus: FocusManager::new(style),
            search_scroll: 0,
            pending_search: None,

            loading: None,
            loading_tick: 0,
            error_message: None,
            status_message: None,
            popup: None,

            hit_areas: Vec::new(),
        };
        app.rebuild_home_layout();
        app.rebuild_detail_layout();
        app.rebuild_search_layout();
        app
    }

    /// First request of a session.
    pub fn start(&mut self) -> Request {
        self.reload()
    }

    pub fn focus_manager(&self) -> &FocusManager {
        match self.current_screen {
            CurrentScreen::Home => &self.home_focus,
            CurrentScreen::Detail => &self.detail_focus,
            CurrentScreen::Search => &self.search_focus,
        }
    }

    pub fn focus_manager_mut(&mut self) -> &mut FocusManager {
        match self.current_screen {
            CurrentScreen::Home => &mut self.home_focus,
            CurrentScreen::Detail => &mut self.detail_focus,
            CurrentScreen::Search => &mut self.search_focus,
        }
    }

    pub fn current_focus(&self) -> Option<Focus> {
        self.focus_manager().current()
    }

    pub fn is_focused(&self, region: Region, index: usize) -> bool {
        self.focus_manager().is_focused(region, index)
    }

    /// Stable id of the focused element, e.g. `trending-card-3`.
    pub fn focus_id(&self) -> String {
        match self.current_focus() {
            Some(Focus {
                region: Region::Sidebar,
                index,
            }) => match SidebarItem::ALL.get(index) {
                Some(item) => format!("sidebar-{}", item.slug()),
                None => format!("sidebar-{}", index),
            },
            Some(focus) => focus.to_string(),
            None => "none".to_string(),
        }
    }

    pub fn current_spotlight(&self) -> Option<&SpotlightAnime> {
        self.home
            .as_ref()
            .and_then(|h| h.data.spotlight_animes.get(self.spotlight.index()))
    }

    pub fn is_typing(&self) -> bool {
        self.current_screen == CurrentScreen::Search
            && self.search_focus.region_focused(Region::SearchInput)
    }

    fn home_layout(&self) -> FocusLayout {
        let layout = FocusLayout::new(SidebarItem::ALL.len());
        let Some(home) = &self.home else {
            return layout;
        };
        let data = &home.data;

        let buttons = if data.spotlight_animes.is_empty() { 0 } else { 2 };
        let mut layout = layout.with_section(Region::Spotlight, buttons);
        for kind in RailKind::ALL {
            layout = layout.with_section(Region::Rail(kind), data.rail(kind).len());
        }
        let has_ranked = Period::ALL.iter().any(|p| !data.top10(*p).is_empty());
        layout
            .with_section(Region::Periods, if has_ranked { Period::ALL.len() } else { 0 })
            .with_section(Region::Ranked, data.top10(self.period).len())
    }

    pub fn rebuild_home_layout(&mut self) {
        let layout = self.home_layout();
        self.home_focus.set_layout(layout);
        self.sync_spotlight_pause();
    }

    pub fn rebuild_detail_layout(&mut self) {
        let related = self
            .details
            .as_ref()
            .map(|d| d.recommended_animes.len())
            .unwrap_or(0);
        self.detail_focus.set_layout(
            FocusLayout::new(SidebarItem::ALL.len())
                .with_section(Region::DetailActions, DETAIL_ACTIONS)
                .with_section(Region::Related, related),
        );
    }

    pub fn rebuild_search_layout(&mut self) {
        let results = self.search_results.as_ref();
        let count = results.map(|r| r.animes.len()).unwrap_or(0);
        let paged = results
            .map(|r| r.total_pages > 1 || r.current_page > 1)
            .unwrap_or(false);
        self.search_focus.set_layout(
            FocusLayout::new(SidebarItem::ALL.len())
                .with_section(Region::SearchInput, 1)
                .with_section(Region::SearchResults, count)
                .with_section(Region::Pager, if paged { PAGER_BUTTONS } else { 0 }),
        );
    }

    fn sync_spotlight_pause(&mut self) {
        let paused = self.current_screen == CurrentScreen::Home
            && self.home_focus.region_focused(Region::Spotlight);
        self.spotlight.set_paused(paused, Instant::now());
    }

    /// Advances animations. Returns true when the spotlight slide changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.loading_tick = self.loading_tick.wrapping_add(1);
        if self.current_screen == CurrentScreen::Home {
            self.spotlight.tick(now)
        } else {
            false
        }
    }

    /// Handles a key event and returns an optional Request to be spawned.
    /// This allows testing the logic without running the full TUI.
    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<Request> {
        // Only process key press events, not release (Windows sends both)
        if key.kind != KeyEventKind::Press {
            return None;
        }
        self.status_message = None;

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return None;
        }

        if self.error_message.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace) {
                self.error_message = None;
            }
            return None;
        }

        if self.popup.is_some() {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.popup = None;
            }
            return None;
        }

        if self.is_typing() {
            if let Some(request) = self.handle_typing(key) {
                return request;
            }
        }

        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return None;
            }
            KeyCode::Char('?') => {
                self.popup = Some(Popup::Help);
                return None;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                let transition = self.focus_manager_mut().toggle_sidebar();
                return self.apply_transition(transition);
            }
            KeyCode::Char('/') => {
                self.open_search();
                return None;
            }
            KeyCode::Char('r') => return Some(self.reload()),
            KeyCode::Char('[') if self.current_screen == CurrentScreen::Home => {
                self.spotlight.previous(Instant::now());
                return None;
            }
            KeyCode::Char(']') if self.current_screen == CurrentScreen::Home => {
                self.spotlight.next(Instant::now());
                return None;
            }
            _ => {}
        }

        let nav = nav_key(&key)?;
        self.navigate(nav)
    }

    /// `Some(request)` when the search box consumed the key.
    fn handle_typing(&mut self, key: KeyEvent) -> Option<Option<Request>> {
        match key.code {
            KeyCode::Enter => Some(self.submit_search()),
            KeyCode::Backspace if self.search_input.value().is_empty() => None,
            KeyCode::Left if self.search_input.cursor() == 0 => None,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Esc | KeyCode::Up | KeyCode::Down => None,
            _ => {
                edit_input(&mut self.search_input, key);
                Some(None)
            }
        }
    }

    pub fn navigate(&mut self, nav: NavKey) -> Option<Request> {
        let transition = self.focus_manager_mut().navigate(nav);
        tracing::trace!(?nav, ?transition, "navigate");
        self.apply_transition(transition)
    }

    fn apply_transition(&mut self, transition: Transition) -> Option<Request> {
        match transition {
            Transition::Activated(focus) => self.activate(focus),
            Transition::Back => {
                self.go_back();
                None
            }
            Transition::Moved(focus) | Transition::Wrapped(focus) | Transition::Entered(focus) => {
                self.on_focus_changed(focus);
                None
            }
            Transition::Blocked | Transition::None => None,
        }
    }

    fn on_focus_changed(&mut self, focus: Focus) {
        if self.current_screen == CurrentScreen::Home {
            if focus.region == Region::Periods {
                let period = Period::from_index(focus.index);
                if period != self.period {
                    self.period = period;
                    self.ranked_scroll = 0;
                    self.rebuild_home_layout();
                }
            }
            self.sync_spotlight_pause();
        }
    }

    /// Mouse click on an element: the first click focuses, a second one
    /// activates.
    pub fn focus_element(&mut self, focus: Focus) -> Option<Request> {
        if self.focus_manager().current() == Some(focus) {
            return self.activate(focus);
        }
        if self.focus_manager_mut().focus(focus.region, focus.index) {
            self.on_focus_changed(focus);
        }
        None
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<Focus> {
        let position = Position::new(column, row);
        self.hit_areas
            .iter()
            .rev()
            .find(|(rect, _)| rect.contains(position))
            .map(|(_, focus)| *focus)
    }

    fn activate(&mut self, focus: Focus) -> Option<Request> {
        tracing::debug!(focus = %focus, "activate");
        match focus.region {
            Region::Sidebar => self.activate_sidebar(focus.index),
            Region::Spotlight => {
                let (id, name) = self
                    .current_spotlight()
                    .map(|s| (s.id.clone(), s.name.clone()))?;
                if focus.index == 0 {
                    self.watch(&id, &name);
                    None
                } else {
                    Some(self.open_details(&id))
                }
            }
            Region::Rail(kind) => {
                let id = self.home.as_ref()?.data.rail(kind).get(focus.index)?.id.clone();
                Some(self.open_details(&id))
            }
            Region::Periods => self.navigate(NavKey::Down),
            Region::Ranked => {
                let id = self
                    .home
                    .as_ref()?
                    .data
                    .top10(self.period)
                    .get(focus.index)?
                    .id
                    .clone();
                Some(self.open_details(&id))
            }
            Region::DetailActions => {
                match focus.index {
                    0 => self.go_back(),
                    1 => {
                        let (id, name) = self
                            .details
                            .as_ref()
                            .map(|d| (d.info().id.clone(), d.info().name.clone()))?;
                        self.watch(&id, &name);
                    }
                    _ => self.detail_expanded = !self.detail_expanded,
                }
                None
            }
            Region::Related => {
                let id = self
                    .details
                    .as_ref()?
                    .recommended_animes
                    .get(focus.index)?
                    .id
                    .clone();
                Some(self.open_details(&id))
            }
            Region::SearchInput => self.submit_search(),
            Region::SearchResults => {
                let id = self
                    .search_results
                    .as_ref()?
                    .animes
                    .get(focus.index)?
                    .id
                    .clone();
                Some(self.open_details(&id))
            }
            Region::Pager => {
                let results = self.search_results.as_ref()?;
                let page = if focus.index == 0 {
                    if results.current_page <= 1 {
                        return None;
                    }
                    results.current_page - 1
                } else {
                    if !results.has_next_page {
                        return None;
                    }
                    results.current_page + 1
                };
                let query = results.search_query.clone();
                self.search(query, page)
            }
        }
    }

    fn activate_sidebar(&mut self, index: usize) -> Option<Request> {
        let item = *SidebarItem::ALL.get(index)?;
        match item {
            SidebarItem::Home => self.go_home(),
            SidebarItem::Search => self.open_search(),
            SidebarItem::Settings => self.popup = Some(Popup::Settings),
            SidebarItem::Trending | SidebarItem::Favorites | SidebarItem::Upcoming => {
                if let Some(kind) = item.rail() {
                    self.jump_to_rail(kind);
                }
            }
        }
        None
    }

    fn watch(&mut self, id: &str, name: &str) {
        tracing::info!(%id, "watch requested");
        self.status_message = Some(format!("▶ Watch Now: {}", name));
    }

    pub fn go_home(&mut self) {
        self.leave_current_screen();
        self.screen_stack.clear();
        self.current_screen = CurrentScreen::Home;
        if self.home_focus.in_sidebar() {
            self.home_focus.toggle_sidebar();
        }
        self.sync_spotlight_pause();
    }

    fn jump_to_rail(&mut self, kind: RailKind) {
        if self.current_screen != CurrentScreen::Home {
            self.go_home();
        }
        let region = Region::Rail(kind);
        let index = self.home_focus.remembered(region);
        if self.home_focus.focus(region, index) {
            self.on_focus_changed(Focus::new(region, index));
        } else {
            self.status_message = Some(format!("{} is empty", kind.title()));
        }
    }

    pub fn open_details(&mut self, id: &str) -> Request {
        let summary = self
            .home
            .as_ref()
            .and_then(|h| {
                h.data
                    .find_summary(id)
                    .map(|s| AnimeDetails::from_summary(&s, h.data.description_for(id)))
            })
            .or_else(|| {
                self.search_results
                    .as_ref()
                    .and_then(|r| r.animes.iter().find(|a| a.id == id))
                    .map(|s| AnimeDetails::from_summary(s, None))
            })
            .or_else(|| {
                self.details
                    .as_ref()
                    .and_then(|d| d.recommended_animes.iter().find(|a| a.id == id))
                    .map(|s| AnimeDetails::from_summary(s, None))
            });
        let name = summary
            .as_ref()
            .map(|d| d.info().name.clone())
            .unwrap_or_default();

        if self.current_screen != CurrentScreen::Detail {
            self.screen_stack.push(self.current_screen);
            self.current_screen = CurrentScreen::Detail;
        }
        self.details = summary;
        self.detail_expanded = false;
        self.pending_details_id = Some(id.to_string());
        self.detail_focus = FocusManager::new(self.config.navigation);
        self.rebuild_detail_layout();
        self.loading = Some(LoadingStage::Details { name });
        self.sync_spotlight_pause();

        tracing::info!(%id, "opening details");
        Request::Details { id: id.to_string() }
    }

    pub fn open_search(&mut self) {
        if self.current_screen != CurrentScreen::Search {
            self.screen_stack.push(self.current_screen);
            self.current_screen = CurrentScreen::Search;
        }
        self.search_focus.focus(Region::SearchInput, 0);
        self.sync_spotlight_pause();
    }

    fn submit_search(&mut self) -> Option<Request> {
        let query = self.search_input.value().trim().to_string();
        self.search(query, 1)
    }

    /// Starts a search; the results are only accepted for this query and page.
    pub fn search(&mut self, query: String, page: u32) -> Option<Request> {
        if query.is_empty() {
            self.status_message = Some("Type something to search for".to_string());
            return None;
        }
        self.search_history.add(&query);
        self.pending_search = Some((query.clone(), page));
        self.loading = Some(LoadingStage::Search {
            query: query.clone(),
            page,
        });
        tracing::info!(%query, page, "searching");
        Some(Request::Search { query, page })
    }

    pub fn reload(&mut self) -> Request {
        self.loading = Some(LoadingStage::Home);
        Request::Home
    }

    pub fn go_back(&mut self) {
        if self.focus_manager().in_sidebar() {
            let transition = self.focus_manager_mut().toggle_sidebar();
            self.apply_transition(transition);
            return;
        }
        if let Some(screen) = self.screen_stack.pop() {
            self.leave_current_screen();
            self.current_screen = screen;
            self.sync_spotlight_pause();
        }
    }

    /// Drops in-flight work that belongs to the screen being left.
    fn leave_current_screen(&mut self) {
        match self.current_screen {
            CurrentScreen::Detail => {
                self.pending_details_id = None;
                if matches!(self.loading, Some(LoadingStage::Details { .. })) {
                    self.loading = None;
                }
            }
            CurrentScreen::Search => {
                self.pending_search = None;
                if matches!(self.loading, Some(LoadingStage::Search { .. })) {
                    self.loading = None;
                }
            }
            CurrentScreen::Home => {}
        }
    }

    pub fn set_home(&mut self, home: HomePageData, source: DataSource) {
        let first_load = self.home.is_none();
        tracing::info!(
            source = source.label(),
            spotlight = home.data.spotlight_animes.len(),
            "catalog ready"
        );

        self.spotlight
            .set_len(home.data.spotlight_animes.len(), Instant::now());
        self.home = Some(home);
        self.data_source = Some(source);
        self.loaded_at = Some(chrono::Local::now());
        if first_load {
            self.home_focus = FocusManager::new(self.config.navigation);
            self.home_scroll = 0;
        }
        self.rebuild_home_layout();

        if matches!(self.loading, Some(LoadingStage::Home)) {
            self.loading = None;
        }
        if source == DataSource::Mock && !self.config.offline {
            self.status_message = Some("API unavailable, showing the built-in catalog".to_string());
        }
    }

    pub fn set_details(&mut self, id: &str, details: AnimeDetails) {
        if self.pending_details_id.as_deref() != Some(id) {
            tracing::debug!(%id, "dropping stale details");
            return;
        }
        self.pending_details_id = None;
        self.details = Some(details);
        if matches!(self.loading, Some(LoadingStage::Details { .. })) {
            self.loading = None;
        }
        self.rebuild_detail_layout();
    }

    pub fn details_failed(&mut self, id: &str, message: String) {
        if self.pending_details_id.as_deref() != Some(id) {
            return;
        }
        self.pending_details_id = None;
        if matches!(self.loading, Some(LoadingStage::Details { .. })) {
            self.loading = None;
        }
        self.error_message = Some(message);
    }

    fn is_pending_search(&self, query: &str, page: u32) -> bool {
        matches!(&self.pending_search, Some((q, p)) if q == query && *p == page)
    }

    pub fn set_search_results(&mut self, query: &str, page: u32, results: SearchResults) {
        if !self.is_pending_search(query, page) {
            tracing::debug!(%query, page, "dropping stale search results");
            return;
        }
        self.pending_search = None;
        if matches!(self.loading, Some(LoadingStage::Search { .. })) {
            self.loading = None;
        }
        let has_results = !results.animes.is_empty();
        if !has_results {
            self.status_message = Some(format!("No results for \"{}\"", results.search_query));
        }
        self.search_results = Some(results);
        self.search_scroll = 0;
        self.rebuild_search_layout();
        if has_results && self.current_screen == CurrentScreen::Search {
            self.search_focus.focus(Region::SearchResults, 0);
        }
    }

    pub fn search_failed(&mut self, query: &str, page: u32, message: String) {
        if !self.is_pending_search(query, page) {
            return;
        }
        self.pending_search = None;
        if matches!(self.loading, Some(LoadingStage::Search { .. })) {
            self.loading = None;
        }
        self.error_message = Some(message);
    }
}
