//! Theme definitions for ecotrack
//!
//! Provides three built-in themes: Eco, Forest, and Transparent.
//! Each theme carries the shared style table every screen draws with.

use crate::config::ThemeName;
use ratatui::style::{Color, Modifier, Style};

/// Complete theme with all required colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub fg_dim: Color,

    // Accent colors
    pub accent: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // UI element colors
    pub border: Color,
    pub border_focused: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,

    // Style table
    pub card_bg: Color,
    pub card_fg: Color,
    pub button_bg: Color,
    pub button_fg: Color,

    // Impact chart
    pub chart_bg: Color,
    pub chart_line: Color,
    pub chart_label: Color,
}

impl Theme {
    /// Create a theme from a theme name
    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Eco => Self::eco(),
            ThemeName::Forest => Self::forest(),
            ThemeName::Transparent => Self::transparent(),
        }
    }

    /// Light theme built on the app's card and button colors (default)
    pub fn eco() -> Self {
        Self {
            bg: Color::Rgb(250, 250, 250),
            fg: Color::Rgb(33, 33, 33),
            fg_dim: Color::Rgb(117, 117, 117),

            accent: Color::Rgb(2, 136, 209),       // #0288d1

            success: Color::Rgb(46, 125, 50),      // #2e7d32
            warning: Color::Rgb(239, 108, 0),      // #ef6c00
            error: Color::Rgb(198, 40, 40),        // #c62828

            border: Color::Rgb(189, 189, 189),
            border_focused: Color::Rgb(2, 136, 209),
            selection_bg: Color::Rgb(224, 247, 250), // #e0f7fa
            selection_fg: Color::Rgb(1, 87, 155),

            card_bg: Color::Rgb(224, 247, 250),    // #e0f7fa
            card_fg: Color::Rgb(33, 33, 33),
            button_bg: Color::Rgb(2, 136, 209),    // #0288d1
            button_fg: Color::Rgb(255, 255, 255),  // #fff

            chart_bg: Color::Rgb(226, 106, 0),     // #e26a00
            chart_line: Color::Rgb(255, 255, 255),
            chart_label: Color::Rgb(255, 167, 38), // #ffa726
        }
    }

    /// Dark green theme
    pub fn forest() -> Self {
        Self {
            bg: Color::Rgb(27, 38, 32),
            fg: Color::Rgb(220, 237, 200),         // #dcedc8
            fg_dim: Color::Rgb(129, 150, 120),

            accent: Color::Rgb(156, 204, 101),     // #9ccc65

            success: Color::Rgb(129, 199, 132),
            warning: Color::Rgb(255, 183, 77),
            error: Color::Rgb(229, 115, 115),

            border: Color::Rgb(56, 79, 64),
            border_focused: Color::Rgb(156, 204, 101),
            selection_bg: Color::Rgb(56, 79, 64),
            selection_fg: Color::Rgb(220, 237, 200),

            card_bg: Color::Rgb(38, 56, 45),
            card_fg: Color::Rgb(220, 237, 200),
            button_bg: Color::Rgb(104, 159, 56),
            button_fg: Color::Rgb(27, 38, 32),

            chart_bg: Color::Rgb(38, 56, 45),
            chart_line: Color::Rgb(251, 140, 0),   // #fb8c00
            chart_label: Color::Rgb(255, 167, 38), // #ffa726
        }
    }

    /// Transparent theme (uses terminal colors)
    pub fn transparent() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::Reset,
            fg_dim: Color::DarkGray,

            accent: Color::Cyan,

            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,

            border: Color::DarkGray,
            border_focused: Color::Cyan,
            selection_bg: Color::DarkGray,
            selection_fg: Color::White,

            card_bg: Color::Reset,
            card_fg: Color::Reset,
            button_bg: Color::Blue,
            button_fg: Color::White,

            chart_bg: Color::Reset,
            chart_line: Color::Yellow,
            chart_label: Color::Yellow,
        }
    }

    // Style helpers for common UI patterns

    /// Background for blocks and panels
    pub fn block_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Default text style
    pub fn text(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Dimmed text style
    pub fn text_dim(&self) -> Style {
        Style::default().fg(self.fg_dim).bg(self.bg)
    }

    /// Screen heading
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Card background and text
    pub fn card(&self) -> Style {
        Style::default().fg(self.card_fg).bg(self.card_bg)
    }

    /// Button face
    pub fn button(&self) -> Style {
        Style::default().bg(self.button_bg)
    }

    /// Button label
    pub fn button_text(&self) -> Style {
        Style::default()
            .fg(self.button_fg)
            .bg(self.button_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Points counter
    pub fn points(&self) -> Style {
        Style::default()
            .fg(self.fg)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Receipt preview frame
    pub fn receipt(&self) -> Style {
        Style::default().fg(self.success).bg(self.bg)
    }

    /// Selected item style
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.selection_fg)
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Border style (unfocused)
    pub fn border(&self) -> Style {
        Style::default().fg(self.border).bg(self.bg)
    }

    /// Border style (focused)
    pub fn border_focused(&self) -> Style {
        Style::default().fg(self.border_focused).bg(self.bg)
    }

    /// Tab style (inactive)
    pub fn tab_inactive(&self) -> Style {
        Style::default().fg(self.fg_dim).bg(self.bg)
    }

    /// Tab style (active)
    pub fn tab_active(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn success(&self) -> Style {
        Style::default().fg(self.success).bg(self.bg)
    }

    pub fn warning(&self) -> Style {
        Style::default().fg(self.warning).bg(self.bg)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.error).bg(self.bg)
    }

    /// Chart plot area
    pub fn chart(&self) -> Style {
        Style::default().fg(self.chart_label).bg(self.chart_bg)
    }

    pub fn chart_line(&self) -> Style {
        Style::default().fg(self.chart_line).bg(self.chart_bg)
    }

    pub fn chart_label(&self) -> Style {
        Style::default().fg(self.chart_label).bg(self.chart_bg)
    }
}
