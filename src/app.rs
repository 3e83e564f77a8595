//! Application state and event handling
//!
//! This is the core of ecotrack, managing:
//! - Navigation between the five screens
//! - Local state of each screen
//! - The modal media picker and other popups

use crate::config::Config;
use crate::nav::RootStack;
use crate::picker::{ImagePicker, PickResult, PickerOptions};
use crate::types::{CarbonSeries, EcoPoints, Tab, HOME_FEED, MARKETPLACE, PROOF_REWARD};
use crate::ui::Theme;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;
use tracing::{info, warn};

/// Main application state
pub struct App {
    // Core state
    pub should_quit: bool,
    pub root: RootStack,
    pub config: Config,
    pub theme: Theme,

    // Screen state
    pub home_scroll: usize,
    pub eco_points: EcoPoints,
    pub market_scroll: usize,
    pub carbon: CarbonSeries,

    // Popup state
    pub popup: PopupState,

    // Flash message (temporary feedback)
    pub flash_message: Option<(String, bool, Instant)>, // (message, is_error, timestamp)
}

/// Popup overlay state
#[derive(Debug, Clone)]
pub enum PopupState {
    None,
    Help,
    Error { title: String, message: String },
    Picker(ImagePicker),
}

/// Application state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    Picking,
    ShowHelp,
    ShowError,
}

impl App {
    /// Create a new App instance
    pub fn new(config: Config) -> Self {
        let theme = Theme::from_name(config.theme);

        Self {
            should_quit: false,
            root: RootStack::default(),
            config,
            theme,

            home_scroll: 0,
            eco_points: EcoPoints::default(),
            market_scroll: 0,
            carbon: CarbonSeries::default(),

            popup: PopupState::None,
            flash_message: None,
        }
    }

    pub fn active_tab(&self) -> Tab {
        self.root.tabs.active()
    }

    /// Get current app state
    pub fn state(&self) -> AppState {
        match &self.popup {
            PopupState::None => AppState::Normal,
            PopupState::Help => AppState::ShowHelp,
            PopupState::Error { .. } => AppState::ShowError,
            PopupState::Picker(_) => AppState::Picking,
        }
    }

    /// Clear the flash message once it has been shown for a few seconds
    pub fn tick(&mut self) {
        if let Some((_, _, instant)) = &self.flash_message {
            if instant.elapsed().as_secs() >= 3 {
                self.flash_message = None;
            }
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }

        match self.state() {
            AppState::Picking => self.handle_picker_key(key),
            AppState::ShowHelp | AppState::ShowError => {
                if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('o' | '?' | 'q')) {
                    self.popup = PopupState::None;
                }
                Ok(())
            }
            AppState::Normal => self.handle_normal_key(key),
        }
    }

    /// Handle key in normal state
    fn handle_normal_key(&mut self, key: KeyEvent) -> Result<()> {
        // Global keys (work in all tabs)
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return Ok(());
            }
            KeyCode::Char('?') => {
                self.popup = PopupState::Help;
                return Ok(());
            }
            KeyCode::Char('t') => return self.cycle_theme(),
            KeyCode::Char(c @ '1'..='5') => {
                let idx = c as usize - '1' as usize;
                self.select_tab(Tab::from_index(idx));
                return Ok(());
            }
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
                if self.root.tabs.select_next() {
                    info!(tab = self.active_tab().label(), "switched tab");
                }
                return Ok(());
            }
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                if self.root.tabs.select_previous() {
                    info!(tab = self.active_tab().label(), "switched tab");
                }
                return Ok(());
            }
            _ => {}
        }

        // Tab-specific handling
        match self.active_tab() {
            Tab::Home => {
                scroll(&mut self.home_scroll, HOME_FEED.len(), key.code);
                Ok(())
            }
            Tab::EcoPoints => self.handle_points_key(key),
            Tab::Marketplace => {
                scroll(&mut self.market_scroll, MARKETPLACE.len(), key.code);
                Ok(())
            }
            // Static screens without actions
            Tab::ImpactTracker | Tab::Profile => Ok(()),
        }
    }

    pub fn select_tab(&mut self, tab: Tab) {
        if self.root.tabs.select(tab) {
            info!(tab = tab.label(), "switched tab");
        }
    }

    /// Handle keys in the Eco-Points tab
    fn handle_points_key(&mut self, key: KeyEvent) -> Result<()> {
        if matches!(key.code, KeyCode::Char('u') | KeyCode::Enter) {
            self.pick_image();
        }
        Ok(())
    }

    /// Launch the media picker for a proof upload
    pub fn pick_image(&mut self) {
        let start_dir = self.config.picker_start_dir();
        match ImagePicker::open(&start_dir, self.config.picker.show_hidden, PickerOptions::proof_upload()) {
            Ok(picker) => {
                info!(dir = %picker.dir.display(), "opened media picker");
                self.popup = PopupState::Picker(picker);
            }
            Err(e) => {
                warn!(error = %e, "media picker unavailable");
                self.show_error("Media Picker", &e.to_string());
            }
        }
    }

    fn handle_picker_key(&mut self, key: KeyEvent) -> Result<()> {
        let PopupState::Picker(picker) = &mut self.popup else {
            return Ok(());
        };

        if let Some(result) = picker.handle_key(key) {
            self.popup = PopupState::None;
            self.resolve_pick(&result);
        }
        Ok(())
    }

    /// Apply a resolved picker result to the Eco-Points screen
    pub fn resolve_pick(&mut self, result: &PickResult) {
        if result.is_canceled() {
            info!("media picker canceled");
            return;
        }
        if self.eco_points.apply_pick(result) {
            info!(
                points = self.eco_points.points,
                image = self.eco_points.image.as_deref().unwrap_or_default(),
                "proof uploaded"
            );
            self.show_flash(&format!("+{} points for your proof", PROOF_REWARD), false);
        } else {
            warn!("media picker returned no assets");
        }
    }

    /// Switch to the next theme and persist the choice
    fn cycle_theme(&mut self) -> Result<()> {
        self.config.theme = self.config.theme.next();
        self.theme = Theme::from_name(self.config.theme);
        info!(theme = self.config.theme.as_str(), "changed theme");

        if let Err(e) = self.config.save() {
            warn!(error = %e, "failed to save config");
            self.show_flash("Theme changed, but the config could not be saved", true);
        } else {
            self.show_flash(&format!("Theme: {}", self.config.theme.as_str()), false);
        }
        Ok(())
    }

    /// Show an error popup
    fn show_error(&mut self, title: &str, message: &str) {
        self.popup = PopupState::Error {
            title: title.into(),
            message: message.into(),
        };
    }

    /// Show a flash message
    fn show_flash(&mut self, message: &str, is_error: bool) {
        self.flash_message = Some((message.into(), is_error, Instant::now()));
    }
}

/// Move a list cursor with j/k, g/G
fn scroll(offset: &mut usize, len: usize, code: KeyCode) {
    match code {
        KeyCode::Char('j') | KeyCode::Down => {
            if *offset < len.saturating_sub(1) {
                *offset += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => *offset = offset.saturating_sub(1),
        KeyCode::Char('g') => *offset = 0,
        KeyCode::Char('G') => *offset = len.saturating_sub(1),
        _ => {}
    }
}
