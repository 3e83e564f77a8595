//! Navigation layer
//!
//! A root stack with a single `Main` entry wrapping the tab navigator.
//! The stack header is hidden, so the root renders no chrome of its own.

use crate::types::Tab;
use tracing::debug;

/// Icon name for a route, looked up by route name
pub fn icon_for_route(route: &str) -> &'static str {
    match route {
        "Home" => "home",
        "Eco-Points" => "leaf",
        "Marketplace" => "cart",
        "Impact Tracker" => "stats-chart",
        _ => "person",
    }
}

/// Terminal glyph for an icon name
pub fn glyph_for_icon(icon: &str) -> &'static str {
    match icon {
        "home" => "⌂",
        "leaf" => "❦",
        "cart" => "¤",
        "stats-chart" => "▃▇",
        _ => "☺",
    }
}

/// Bottom-tab navigator over the five screens
#[derive(Debug, Clone, Copy, Default)]
pub struct TabNavigator {
    active: Tab,
}

impl TabNavigator {
    pub fn active(&self) -> Tab {
        self.active
    }

    /// Focus a tab. Returns true if the active tab changed.
    pub fn select(&mut self, tab: Tab) -> bool {
        if self.active == tab {
            return false;
        }
        debug!(from = self.active.label(), to = tab.label(), "tab switch");
        self.active = tab;
        true
    }

    pub fn select_next(&mut self) -> bool {
        self.select(self.active.next())
    }

    pub fn select_previous(&mut self) -> bool {
        self.select(self.active.previous())
    }

    /// Tab bar entries: (route name, glyph)
    pub fn entries(&self) -> Vec<(&'static str, &'static str)> {
        Tab::all()
            .iter()
            .map(|tab| {
                let name = tab.label();
                (name, glyph_for_icon(icon_for_route(name)))
            })
            .collect()
    }
}

/// A route in the root stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackRoute {
    Main,
}

impl StackRoute {
    pub fn name(&self) -> &'static str {
        match self {
            StackRoute::Main => "Main",
        }
    }
}

/// Root stack navigator
#[derive(Debug, Clone)]
pub struct RootStack {
    routes: Vec<StackRoute>,
    pub header_shown: bool,
    pub tabs: TabNavigator,
}

impl Default for RootStack {
    fn default() -> Self {
        Self {
            routes: vec![StackRoute::Main],
            header_shown: false,
            tabs: TabNavigator::default(),
        }
    }
}

impl RootStack {
    pub fn current(&self) -> StackRoute {
        self.routes.last().copied().unwrap_or(StackRoute::Main)
    }

    /// Header height in rows for the current route
    pub fn header_height(&self) -> u16 {
        if self.header_shown {
            1
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_lookup() {
        assert_eq!(icon_for_route("Home"), "home");
        assert_eq!(icon_for_route("Eco-Points"), "leaf");
        assert_eq!(icon_for_route("Marketplace"), "cart");
        assert_eq!(icon_for_route("Impact Tracker"), "stats-chart");
        assert_eq!(icon_for_route("Profile"), "person");
        assert_eq!(icon_for_route("Anything else"), "person");
    }

    #[test]
    fn test_select() {
        let mut nav = TabNavigator::default();
        assert_eq!(nav.active(), Tab::Home);
        assert!(!nav.select(Tab::Home));
        assert!(nav.select(Tab::ImpactTracker));
        assert_eq!(nav.active(), Tab::ImpactTracker);
        nav.select_next();
        assert_eq!(nav.active(), Tab::Profile);
        nav.select_next();
        assert_eq!(nav.active(), Tab::Home);
        nav.select_previous();
        assert_eq!(nav.active(), Tab::Profile);
    }

    #[test]
    fn test_entries_follow_tab_order() {
        let nav = TabNavigator::default();
        let names: Vec<_> = nav.entries().into_iter().map(|(n, _)| n).collect();
        assert_eq!(
            names,
            ["Home", "Eco-Points", "Marketplace", "Impact Tracker", "Profile"]
        );
    }

    #[test]
    fn test_root_stack_is_pass_through() {
        let root = RootStack::default();
        assert_eq!(root.current(), StackRoute::Main);
        assert_eq!(root.current().name(), "Main");
        assert_eq!(root.header_height(), 0);
    }
}
