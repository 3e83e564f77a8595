//! User Interface layer
//!
//! This module contains all UI-related code:
//! - Theme definitions and the shared style table
//! - Reusable widgets
//! - Impact chart helpers
//! - Main render entry point

pub mod chart;
pub mod render;
pub mod theme;
pub mod widgets;

pub use render::render;
pub use theme::Theme;
