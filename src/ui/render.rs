//! Main rendering module
//!
//! Handles rendering the complete UI including:
//! - Tab bar with route icons
//! - Active screen content
//! - Popups and overlays
//! - Status bar

use crate::app::{App, PopupState};
use crate::picker;
use crate::types::{Tab, HOME_FEED, MARKETPLACE, PROFILE_BADGES};
use crate::ui::{chart, widgets};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Tabs},
    Frame,
};

/// Main render function - entry point for all UI rendering
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // The root stack header is hidden, so this is usually zero rows
    let header = app.root.header_height();

    let layout = Layout::vertical([
        Constraint::Length(header),
        Constraint::Min(8),     // Active screen
        Constraint::Length(2),  // Tab bar
        Constraint::Length(1),  // Status bar
    ])
    .split(area);

    frame.render_widget(Block::default().style(app.theme.block_style()), area);

    if header > 0 {
        let title = Paragraph::new(app.root.current().name()).style(app.theme.title());
        frame.render_widget(title, layout[0]);
    }

    render_screen(frame, app, layout[1]);
    render_tab_bar(frame, app, layout[2]);
    render_status_bar(frame, app, layout[3]);

    // Render popup overlays (if any)
    render_popups(frame, app, area);
}

/// Render the bottom tab bar
fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let active = app.active_tab();

    let block = Block::default()
        .style(theme.block_style())
        .borders(Borders::TOP)
        .border_style(theme.border());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let titles: Vec<Line> = app
        .root
        .tabs
        .entries()
        .into_iter()
        .enumerate()
        .map(|(i, (name, glyph))| {
            let style = if active.index() == i {
                theme.tab_active()
            } else {
                theme.tab_inactive()
            };
            Line::styled(format!("{} {} {}", i + 1, glyph, name), style)
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(active.index())
        .divider(" │ ")
        .style(theme.text());
    frame.render_widget(tabs, inner);
}

/// Render the active screen
fn render_screen(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let tab = app.active_tab();

    let block = Block::default()
        .style(theme.block_style())
        .title(format!(" {} ", tab.label()))
        .title_style(theme.text_dim())
        .borders(Borders::ALL)
        .border_style(theme.border_focused());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Screen padding
    let inner = Rect {
        x: inner.x + 2,
        y: inner.y + 1,
        width: inner.width.saturating_sub(4),
        height: inner.height.saturating_sub(1),
    };

    let [title_area, body] = Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(inner);
    widgets::render_title(frame, tab.title(), theme, title_area);

    match tab {
        Tab::Home => render_cards(frame, app, HOME_FEED, app.home_scroll, body),
        Tab::EcoPoints => render_points_screen(frame, app, body),
        Tab::Marketplace => render_marketplace_screen(frame, app, body),
        Tab::ImpactTracker => render_impact_screen(frame, app, body),
        Tab::Profile => render_cards(frame, app, PROFILE_BADGES, 0, body),
    }
}

/// Stack static cards from `offset`, as many as fit
fn render_cards(frame: &mut Frame, app: &App, cards: &[&str], offset: usize, area: Rect) {
    let mut y = area.y;
    for text in cards.iter().skip(offset) {
        let remaining = Rect {
            y,
            height: area.bottom().saturating_sub(y),
            ..area
        };
        let used = widgets::render_card(frame, text, None, &app.theme, remaining);
        if used == 0 {
            break;
        }
        y += used;
    }
}

/// Eco-Points: counter, upload button and receipt preview
fn render_points_screen(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let state = &app.eco_points;

    let [points_area, _, button_area, _, receipt_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(area);

    let points = Paragraph::new(Line::styled(state.points_line(), theme.points()))
        .alignment(Alignment::Center);
    frame.render_widget(points, points_area);

    widgets::render_button(frame, "Upload Proof (Receipt, Image)", 'u', theme, button_area);

    if let Some(uri) = &state.image {
        let width = 48.min(receipt_area.width);
        let preview_area = Rect {
            x: receipt_area.x + (receipt_area.width - width) / 2,
            width,
            height: 4.min(receipt_area.height),
            ..receipt_area
        };
        let preview = Paragraph::new(vec![
            Line::styled(file_name_of(uri), theme.receipt()),
            Line::styled(uri.clone(), theme.text_dim()),
        ])
        .block(
            Block::default()
                .title(" Receipt ")
                .borders(Borders::ALL)
                .border_style(theme.receipt()),
        )
        .alignment(Alignment::Center);
        frame.render_widget(preview, preview_area);
    }
}

/// Last path segment of a URI, percent-decoded
fn file_name_of(uri: &str) -> String {
    let segment = uri.rsplit('/').next().unwrap_or(uri);
    picker::percent_decode(segment)
}

/// Marketplace: item cards with their image links
fn render_marketplace_screen(frame: &mut Frame, app: &App, area: Rect) {
    let mut y = area.y;
    for item in MARKETPLACE.iter().skip(app.market_scroll) {
        let remaining = Rect {
            y,
            height: area.bottom().saturating_sub(y),
            ..area
        };
        let used = widgets::render_card(frame, &item.card_text(), item.image_url, &app.theme, remaining);
        if used == 0 {
            break;
        }
        y += used;
    }
}

/// Impact tracker: total line and carbon-savings chart
fn render_impact_screen(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let series = &app.carbon;

    let [total_area, chart_area] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(area);

    let total = Paragraph::new(series.total_line()).style(theme.text());
    frame.render_widget(total, total_area);

    let samples = series.points();
    let curve = if app.config.chart.smooth {
        chart::smooth_curve(&samples, app.config.chart.samples_per_segment)
    } else {
        samples.clone()
    };

    let datasets = vec![
        Dataset::default()
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(theme.chart_line())
            .data(&curve),
        Dataset::default()
            .marker(symbols::Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(theme.chart_line())
            .data(&samples),
    ];

    let upper = chart::y_upper_bound(series.max());
    let x_labels: Vec<Span> = series
        .labels()
        .iter()
        .map(|l| Span::styled(*l, theme.chart_label()))
        .collect();

    let chart = Chart::new(datasets)
        .style(theme.chart())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_set(symbols::border::ROUNDED)
                .border_style(theme.chart_label())
                .style(theme.chart()),
        )
        .x_axis(
            Axis::default()
                .style(theme.chart_label())
                .bounds([0.0, (samples.len().saturating_sub(1)) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(theme.chart_label())
                .bounds([0.0, upper])
                .labels(chart::y_labels(upper, 6)),
        );

    frame.render_widget(chart, chart_area);
}

/// Render status bar with keybindings
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.active_tab() {
        Tab::Home | Tab::Marketplace => "[1-5/Tab] Switch  [j/k] Scroll  [t] Theme  [?] Help  [q] Quit",
        Tab::EcoPoints => "[1-5/Tab] Switch  [u] Upload Proof  [t] Theme  [?] Help  [q] Quit",
        Tab::ImpactTracker | Tab::Profile => "[1-5/Tab] Switch  [t] Theme  [?] Help  [q] Quit",
    };
    let right = format!("{} pts", app.eco_points.points);

    widgets::render_status_bar(frame, hints, &right, &app.theme, area);
}

/// Render popups if active
fn render_popups(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;

    match &app.popup {
        PopupState::None => {}
        PopupState::Help => widgets::render_help_popup(frame, theme, area),
        PopupState::Error { title, message } => {
            widgets::render_error_popup(frame, title, message, theme, area);
        }
        PopupState::Picker(picker) => widgets::render_picker_popup(frame, picker, theme, area),
    }

    // Flash message (success/error feedback)
    if let Some((msg, is_error, _)) = &app.flash_message {
        widgets::render_flash_message(frame, msg, *is_error, theme, area);
    }
}
