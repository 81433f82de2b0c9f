//! Directional focus navigation.
//!
//! Every screen is described as a [`FocusLayout`]: a vertical stack of
//! sections (spotlight buttons, card rails, period tabs, ranked list, ...)
//! plus an optional sidebar. Arrow keys are resolved through a single
//! adjacency table, [`RULES`], mapping `(region kind, key)` to a [`Rule`].
//! [`FocusManager`] applies those rules, skips empty sections, remembers the
//! last index of every region and keeps focus in bounds when the layout
//! changes underneath it.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::api::RailKind;

/// Remote / keyboard input after key mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    Left,
    Right,
    Select,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A focusable group of elements on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Sidebar,
    /// Watch / Info buttons of the spotlight banner.
    Spotlight,
    Rail(RailKind),
    /// Today / Week / Month tabs above the ranked list.
    Periods,
    Ranked,
    /// Back / Watch / More Info on the detail page.
    DetailActions,
    /// Recommended titles on the detail page.
    Related,
    SearchInput,
    SearchResults,
    /// Previous / next page buttons under search results.
    Pager,
}

/// Region without payload, the key of the adjacency table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    Sidebar,
    Spotlight,
    Rail,
    Periods,
    Ranked,
    DetailActions,
    Related,
    SearchInput,
    SearchResults,
    Pager,
}

impl Region {
    pub fn kind(&self) -> RegionKind {
        match self {
            Region::Sidebar => RegionKind::Sidebar,
            Region::Spotlight => RegionKind::Spotlight,
            Region::Rail(_) => RegionKind::Rail,
            Region::Periods => RegionKind::Periods,
            Region::Ranked => RegionKind::Ranked,
            Region::DetailActions => RegionKind::DetailActions,
            Region::Related => RegionKind::Related,
            Region::SearchInput => RegionKind::SearchInput,
            Region::SearchResults => RegionKind::SearchResults,
            Region::Pager => RegionKind::Pager,
        }
    }

    pub fn axis(&self) -> Axis {
        match self {
            Region::Sidebar | Region::Ranked | Region::SearchResults => Axis::Vertical,
            _ => Axis::Horizontal,
        }
    }
}

/// Where focus goes when it leaves its region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leave {
    PrevSection,
    NextSection,
    Sidebar,
    Main,
}

/// What happens when a step runs past either end of a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Wrap,
    Stay,
    Leave(Leave),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Move one element along the region's axis.
    Step(Edge),
    Leave(Leave),
    Stay,
}

/// The adjacency map. Pairs not listed resolve to [`Rule::Stay`].
pub const RULES: &[(RegionKind, NavKey, Rule)] = &[
    (RegionKind::Sidebar, NavKey::Up, Rule::Step(Edge::Stay)),
    (RegionKind::Sidebar, NavKey::Down, Rule::Step(Edge::Stay)),
    (RegionKind::Sidebar, NavKey::Right, Rule::Leave(Leave::Main)),
    (RegionKind::Spotlight, NavKey::Left, Rule::Step(Edge::Wrap)),
    (RegionKind::Spotlight, NavKey::Right, Rule::Step(Edge::Wrap)),
    (RegionKind::Spotlight, NavKey::Down, Rule::Leave(Leave::NextSection)),
    (RegionKind::Rail, NavKey::Left, Rule::Step(Edge::Wrap)),
    (RegionKind::Rail, NavKey::Right, Rule::Step(Edge::Wrap)),
    (RegionKind::Rail, NavKey::Up, Rule::Leave(Leave::PrevSection)),
    (RegionKind::Rail, NavKey::Down, Rule::Leave(Leave::NextSection)),
    (RegionKind::Periods, NavKey::Left, Rule::Step(Edge::Wrap)),
    (RegionKind::Periods, NavKey::Right, Rule::Step(Edge::Wrap)),
    (RegionKind::Periods, NavKey::Up, Rule::Leave(Leave::PrevSection)),
    (RegionKind::Periods, NavKey::Down, Rule::Leave(Leave::NextSection)),
    (RegionKind::Ranked, NavKey::Up, Rule::Step(Edge::Leave(Leave::PrevSection))),
    (RegionKind::Ranked, NavKey::Down, Rule::Step(Edge::Leave(Leave::NextSection))),
    (RegionKind::Ranked, NavKey::Left, Rule::Leave(Leave::Sidebar)),
    (RegionKind::DetailActions, NavKey::Left, Rule::Step(Edge::Stay)),
    (RegionKind::DetailActions, NavKey::Right, Rule::Step(Edge::Stay)),
    (RegionKind::DetailActions, NavKey::Up, Rule::Leave(Leave::PrevSection)),
    (RegionKind::DetailActions, NavKey::Down, Rule::Leave(Leave::NextSection)),
    (RegionKind::Related, NavKey::Left, Rule::Step(Edge::Wrap)),
    (RegionKind::Related, NavKey::Right, Rule::Step(Edge::Wrap)),
    (RegionKind::Related, NavKey::Up, Rule::Leave(Leave::PrevSection)),
    (RegionKind::Related, NavKey::Down, Rule::Leave(Leave::NextSection)),
    (RegionKind::SearchInput, NavKey::Down, Rule::Leave(Leave::NextSection)),
    (RegionKind::SearchResults, NavKey::Up, Rule::Step(Edge::Leave(Leave::PrevSection))),
    (RegionKind::SearchResults, NavKey::Down, Rule::Step(Edge::Leave(Leave::NextSection))),
    (RegionKind::SearchResults, NavKey::Left, Rule::Leave(Leave::Sidebar)),
    (RegionKind::Pager, NavKey::Left, Rule::Step(Edge::Stay)),
    (RegionKind::Pager, NavKey::Right, Rule::Step(Edge::Stay)),
    (RegionKind::Pager, NavKey::Up, Rule::Leave(Leave::PrevSection)),
];

pub fn lookup(kind: RegionKind, key: NavKey) -> Rule {
    RULES
        .iter()
        .find(|(k, n, _)| *k == kind && *n == key)
        .map(|(_, _, rule)| *rule)
        .unwrap_or(Rule::Stay)
}

/// How horizontal regions behave at their ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationStyle {
    /// Left/Right wrap around (modulo the row length).
    #[default]
    Wrap,
    /// Rows stop at their ends; Left at the first element opens the sidebar.
    Edge,
}

impl FromStr for NavigationStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wrap" => Ok(NavigationStyle::Wrap),
            "edge" => Ok(NavigationStyle::Edge),
            other => Err(format!("unknown navigation style '{}' (expected wrap or edge)", other)),
        }
    }
}

/// The element currently holding focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Focus {
    pub region: Region,
    pub index: usize,
}

impl Focus {
    pub fn new(region: Region, index: usize) -> Self {
        Self { region, index }
    }
}

impl fmt::Display for Focus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.region, self.index) {
            (Region::Sidebar, i) => write!(f, "sidebar-{}", i),
            (Region::Spotlight, 0) => write!(f, "watch-button"),
            (Region::Spotlight, _) => write!(f, "info-button"),
            (Region::Rail(kind), i) => write!(f, "{}-card-{}", kind.slug(), i),
            (Region::Periods, i) => write!(f, "period-{}", i),
            (Region::Ranked, i) => write!(f, "rank-{}", i + 1),
            (Region::DetailActions, 0) => write!(f, "back-button"),
            (Region::DetailActions, 1) => write!(f, "watch-button"),
            (Region::DetailActions, _) => write!(f, "info-button"),
            (Region::Related, i) => write!(f, "related-card-{}", i),
            (Region::SearchInput, _) => write!(f, "search-input"),
            (Region::SearchResults, i) => write!(f, "result-{}", i),
            (Region::Pager, 0) => write!(f, "prev-page"),
            (Region::Pager, _) => write!(f, "next-page"),
        }
    }
}

/// Result of feeding one key to the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Nothing is focusable.
    None,
    Moved(Focus),
    /// Moved by wrapping around a row.
    Wrapped(Focus),
    /// Focus changed region.
    Entered(Focus),
    /// The rule forbids moving this way.
    Blocked,
    Activated(Focus),
    Back,
}

impl Transition {
    pub fn changed_focus(&self) -> Option<Focus> {
        match self {
            Transition::Moved(f) | Transition::Wrapped(f) | Transition::Entered(f) => Some(*f),
            _ => None,
        }
    }
}

/// Sections of a screen in vertical order plus the sidebar length.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FocusLayout {
    pub sections: Vec<(Region, usize)>,
    pub sidebar_len: usize,
}

impl FocusLayout {
    pub fn new(sidebar_len: usize) -> Self {
        Self {
            sections: Vec::new(),
            sidebar_len,
        }
    }

    pub fn with_section(mut self, region: Region, len: usize) -> Self {
        self.sections.push((region, len));
        self
    }

    pub fn len_of(&self, region: Region) -> usize {
        if region == Region::Sidebar {
            return self.sidebar_len;
        }
        self.sections
            .iter()
            .find(|(r, _)| *r == region)
            .map(|(_, len)| *len)
            .unwrap_or(0)
    }

    fn position(&self, region: Region) -> Option<usize> {
        self.sections.iter().position(|(r, _)| *r == region)
    }

    fn first_section(&self) -> Option<Region> {
        self.sections
            .iter()
            .find(|(_, len)| *len > 0)
            .map(|(r, _)| *r)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FocusManager {
    style: NavigationStyle,
    layout: FocusLayout,
    current: Option<Focus>,
    memory: HashMap<Region, usize>,
    /// Main-area region to return to when leaving the sidebar.
    main_return: Option<Region>,
}

impl FocusManager {
    pub fn new(style: NavigationStyle) -> Self {
        Self {
            style,
            ..Default::default()
        }
    }

    pub fn style(&self) -> NavigationStyle {
        self.style
    }

    pub fn layout(&self) -> &FocusLayout {
        &self.layout
    }

    pub fn current(&self) -> Option<Focus> {
        self.current
    }

    pub fn in_sidebar(&self) -> bool {
        matches!(self.current, Some(Focus { region: Region::Sidebar, .. }))
    }

    pub fn is_focused(&self, region: Region, index: usize) -> bool {
        self.current == Some(Focus { region, index })
    }

    pub fn region_focused(&self, region: Region) -> bool {
        self.current.map(|f| f.region == region).unwrap_or(false)
    }

    /// Last index used in `region`, clamped to its current length.
    pub fn remembered(&self, region: Region) -> usize {
        let len = self.layout.len_of(region);
        let index = self.memory.get(&region).copied().unwrap_or(0);
        if len == 0 {
            0
        } else {
            index.min(len - 1)
        }
    }

    /// Replaces the layout and pulls focus back into bounds.
    pub fn set_layout(&mut self, layout: FocusLayout) {
        self.layout = layout;

        let still_valid = self.current.and_then(|focus| {
            let len = self.layout.len_of(focus.region);
            let present = focus.region == Region::Sidebar || self.layout.position(focus.region).is_some();
            (present && len > 0).then(|| Focus::new(focus.region, focus.index.min(len - 1)))
        });

        match still_valid {
            Some(focus) => self.set(focus),
            None => {
                self.current = None;
                if let Some(region) = self.layout.first_section() {
                    self.enter(region);
                } else if self.layout.sidebar_len > 0 {
                    self.enter(Region::Sidebar);
                }
            }
        }
    }

    /// Focuses an element directly (mouse, shortcuts). Returns false when
    /// the region has nothing to focus.
    pub fn focus(&mut self, region: Region, index: usize) -> bool {
        let len = self.layout.len_of(region);
        if len == 0 {
            return false;
        }
        if region == Region::Sidebar {
            if let Some(current) = self.current.filter(|f| f.region != Region::Sidebar) {
                self.main_return = Some(current.region);
            }
        }
        self.set(Focus::new(region, index.min(len - 1)));
        true
    }

    /// Moves into the sidebar, or back to the main area when already there.
    pub fn toggle_sidebar(&mut self) -> Transition {
        match self.current {
            Some(focus) if focus.region == Region::Sidebar => self.leave(focus, Leave::Main),
            Some(focus) => self.leave(focus, Leave::Sidebar),
            None if self.layout.sidebar_len > 0 => self.enter(Region::Sidebar),
            None => Transition::None,
        }
    }

    pub fn navigate(&mut self, key: NavKey) -> Transition {
        let Some(current) = self.current else {
            return Transition::None;
        };

        match key {
            NavKey::Select => return Transition::Activated(current),
            NavKey::Back => return Transition::Back,
            _ => {}
        }

        match self.rule_for(current.region, key) {
            Rule::Stay => Transition::Blocked,
            Rule::Leave(leave) => self.leave(current, leave),
            Rule::Step(edge) => self.step(current, key, edge),
        }
    }

    fn rule_for(&self, region: Region, key: NavKey) -> Rule {
        let rule = lookup(region.kind(), key);
        if self.style == NavigationStyle::Wrap
            || region == Region::Sidebar
            || region.axis() != Axis::Horizontal
        {
            return rule;
        }
        match (rule, key) {
            (Rule::Step(_), NavKey::Left) => Rule::Step(Edge::Leave(Leave::Sidebar)),
            (Rule::Step(Edge::Wrap), _) => Rule::Step(Edge::Stay),
            _ => rule,
        }
    }

    fn step(&mut self, current: Focus, key: NavKey, edge: Edge) -> Transition {
        let len = self.layout.len_of(current.region);
        let forward = matches!(key, NavKey::Right | NavKey::Down);

        if forward && current.index + 1 < len {
            let focus = Focus::new(current.region, current.index + 1);
            self.set(focus);
            return Transition::Moved(focus);
        }
        if !forward && current.index > 0 {
            let focus = Focus::new(current.region, current.index - 1);
            self.set(focus);
            return Transition::Moved(focus);
        }

        match edge {
            Edge::Stay => Transition::Blocked,
            Edge::Leave(leave) => self.leave(current, leave),
            Edge::Wrap if len <= 1 => Transition::Blocked,
            Edge::Wrap => {
                let focus = Focus::new(current.region, if forward { 0 } else { len - 1 });
                self.set(focus);
                Transition::Wrapped(focus)
            }
        }
    }

    fn leave(&mut self, current: Focus, leave: Leave) -> Transition {
        match leave {
            Leave::PrevSection | Leave::NextSection => {
                let Some(pos) = self.layout.position(current.region) else {
                    return Transition::Blocked;
                };
                let target = if leave == Leave::NextSection {
                    self.layout.sections[pos + 1..]
                        .iter()
                        .find(|(_, len)| *len > 0)
                        .map(|(r, _)| *r)
                } else {
                    self.layout.sections[..pos]
                        .iter()
                        .rev()
                        .find(|(_, len)| *len > 0)
                        .map(|(r, _)| *r)
                };
                match target {
                    Some(region) => self.enter(region),
                    None => Transition::Blocked,
                }
            }
            Leave::Sidebar => {
                if self.layout.sidebar_len == 0 || current.region == Region::Sidebar {
                    return Transition::Blocked;
                }
                self.main_return = Some(current.region);
                self.enter(Region::Sidebar)
            }
            Leave::Main => {
                let target = self
                    .main_return
                    .filter(|r| self.layout.len_of(*r) > 0 && self.layout.position(*r).is_some())
                    .or_else(|| self.layout.first_section());
                match target {
                    Some(region) => self.enter(region),
                    None => Transition::Blocked,
                }
            }
        }
    }

    fn enter(&mut self, region: Region) -> Transition {
        if self.layout.len_of(region) == 0 {
            return Transition::Blocked;
        }
        let focus = Focus::new(region, self.remembered(region));
        self.set(focus);
        Transition::Entered(focus)
    }

    fn set(&mut self, focus: Focus) {
        self.current = Some(focus);
        self.memory.insert(focus.region, focus.index);
    }
}
