//! Core data types for ecotrack
//!
//! This module defines the screen content and local screen state shared
//! between the application state and the renderer.

use crate::picker::PickResult;

/// Points every user starts a session with
pub const INITIAL_POINTS: u32 = 100;

/// Points awarded for each uploaded proof
pub const PROOF_REWARD: u32 = 50;

/// Application tabs, in navigator order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Home,
    EcoPoints,
    Marketplace,
    ImpactTracker,
    Profile,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[
            Tab::Home,
            Tab::EcoPoints,
            Tab::Marketplace,
            Tab::ImpactTracker,
            Tab::Profile,
        ]
    }

    pub fn index(&self) -> usize {
        match self {
            Tab::Home => 0,
            Tab::EcoPoints => 1,
            Tab::Marketplace => 2,
            Tab::ImpactTracker => 3,
            Tab::Profile => 4,
        }
    }

    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Tab::Home,
            1 => Tab::EcoPoints,
            2 => Tab::Marketplace,
            3 => Tab::ImpactTracker,
            4 => Tab::Profile,
            _ => Tab::Home,
        }
    }

    /// Route name shown in the tab bar
    pub fn label(&self) -> &'static str {
        match self {
            Tab::Home => "Home",
            Tab::EcoPoints => "Eco-Points",
            Tab::Marketplace => "Marketplace",
            Tab::ImpactTracker => "Impact Tracker",
            Tab::Profile => "Profile",
        }
    }

    /// Heading rendered at the top of the screen
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Home => "Eco-Feed & Community Challenges",
            Tab::EcoPoints => "Your Eco-Points",
            Tab::Marketplace => "Sustainable Marketplace",
            Tab::ImpactTracker => "Your Impact Tracker",
            Tab::Profile => "Profile & Badges",
        }
    }

    pub fn next(&self) -> Self {
        Self::from_index((self.index() + 1) % Self::all().len())
    }

    pub fn previous(&self) -> Self {
        let len = Self::all().len();
        Self::from_index((self.index() + len - 1) % len)
    }
}

/// Home feed cards
pub const HOME_FEED: &[&str] = &[
    "🌱 Join today's eco challenge: Recycle an old T-shirt!",
    "🏆 Top eco-friendly users of the week announced!",
    "🌍 Compete in community sustainability goals!",
];

/// Profile badge cards
pub const PROFILE_BADGES: &[&str] = &[
    "🏆 Eco-Warrior Level 3",
    "🔥 Streak: 10 Days of Sustainable Actions!",
];

/// A reward listed in the marketplace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketItem {
    pub emoji: &'static str,
    pub name: &'static str,
    pub price: u32,
    pub image_url: Option<&'static str>,
}

impl MarketItem {
    /// Card text, e.g. "👖 Recycled Jeans - 50 Points"
    pub fn card_text(&self) -> String {
        format!("{} {} - {} Points", self.emoji, self.name, self.price)
    }
}

pub const MARKETPLACE: &[MarketItem] = &[
    MarketItem {
        emoji: "👕",
        name: "Eco-Friendly T-shirt",
        price: 20,
        image_url: Some("https://images.unsplash.com/photo-1593642709921-3b3b7f4a2f3b"),
    },
    MarketItem {
        emoji: "👖",
        name: "Recycled Jeans",
        price: 50,
        image_url: None,
    },
];

/// Monthly carbon savings in kg
#[derive(Debug, Clone, PartialEq)]
pub struct CarbonSeries {
    labels: [&'static str; 7],
    samples: [f64; 7],
}

impl Default for CarbonSeries {
    fn default() -> Self {
        Self {
            labels: ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul"],
            samples: [5.0, 7.0, 9.0, 12.0, 15.0, 18.0, 22.0],
        }
    }
}

impl CarbonSeries {
    pub fn labels(&self) -> &[&'static str] {
        &self.labels
    }

    pub fn total(&self) -> f64 {
        self.samples.iter().sum()
    }

    pub fn max(&self) -> f64 {
        self.samples.iter().copied().fold(0.0, f64::max)
    }

    /// Samples as chart coordinates, x being the month index
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .enumerate()
            .map(|(i, v)| (i as f64, *v))
            .collect()
    }

    /// Summary line, e.g. "Total Carbon Saved: 88 kg"
    pub fn total_line(&self) -> String {
        format!("Total Carbon Saved: {} kg", format_kg(self.total()))
    }
}

/// Local state of the Eco-Points screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EcoPoints {
    pub points: u32,
    pub image: Option<String>,
}

impl Default for EcoPoints {
    fn default() -> Self {
        Self {
            points: INITIAL_POINTS,
            image: None,
        }
    }
}

impl EcoPoints {
    /// Apply a picker result. Returns true if points were awarded.
    pub fn apply_pick(&mut self, result: &PickResult) -> bool {
        match result.first_uri() {
            Some(uri) => {
                self.image = Some(uri.to_string());
                self.points = self.points.saturating_add(PROOF_REWARD);
                true
            }
            None => false,
        }
    }

    pub fn points_line(&self) -> String {
        format!("{} Points", self.points)
    }
}

// Helper functions

/// Format kilograms without a trailing ".0" for whole values
pub fn format_kg(kg: f64) -> String {
    if kg.fract() == 0.0 {
        format!("{}", kg as i64)
    } else {
        format!("{:.2}", kg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::Asset;

    fn picked(uri: &str) -> PickResult {
        PickResult::Picked {
            assets: vec![Asset {
                uri: uri.into(),
                file_name: "receipt.jpg".into(),
                file_size: 1024,
            }],
        }
    }

    #[test]
    fn test_pick_awards_points() {
        let mut state = EcoPoints::default();
        assert!(state.apply_pick(&picked("file:///tmp/receipt.jpg")));
        assert_eq!(state.points, 150);
        assert_eq!(state.image.as_deref(), Some("file:///tmp/receipt.jpg"));

        state.apply_pick(&picked("file:///tmp/second.png"));
        assert_eq!(state.points, 200);
        assert_eq!(state.image.as_deref(), Some("file:///tmp/second.png"));
    }

    #[test]
    fn test_cancel_is_noop() {
        let mut state = EcoPoints::default();
        assert!(!state.apply_pick(&PickResult::Canceled));
        assert_eq!(state, EcoPoints::default());

        let empty = PickResult::Picked { assets: Vec::new() };
        assert!(!state.apply_pick(&empty));
        assert_eq!(state.points, INITIAL_POINTS);
    }

    #[test]
    fn test_carbon_total() {
        let series = CarbonSeries::default();
        assert_eq!(series.total(), 88.0);
        assert_eq!(series.total_line(), "Total Carbon Saved: 88 kg");
        assert_eq!(series.labels().len(), series.points().len());
        assert_eq!(series.max(), 22.0);
    }

    #[test]
    fn test_tab_cycle() {
        assert_eq!(Tab::Home.next(), Tab::EcoPoints);
        assert_eq!(Tab::Profile.next(), Tab::Home);
        assert_eq!(Tab::Home.previous(), Tab::Profile);
        for tab in Tab::all() {
            assert_eq!(Tab::from_index(tab.index()), *tab);
        }
    }

    #[test]
    fn test_market_card_text() {
        assert_eq!(MARKETPLACE[0].card_text(), "👕 Eco-Friendly T-shirt - 20 Points");
        assert_eq!(MARKETPLACE[1].card_text(), "👖 Recycled Jeans - 50 Points");
    }

    #[test]
    fn test_format_kg() {
        assert_eq!(format_kg(88.0), "88");
        assert_eq!(format_kg(2.5), "2.50");
    }
}
