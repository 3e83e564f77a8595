//! Reusable UI widgets
//!
//! Contains common UI components used across multiple screens:
//! - Cards and buttons from the shared style table
//! - Popup dialogs (help, error, media picker)
//! - Flash messages and the status bar

use crate::picker::{EntryKind, ImagePicker};
use crate::ui::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Padding, Paragraph, Wrap},
    Frame,
};

/// Rows occupied by one card, including its vertical margin
pub const CARD_HEIGHT: u16 = 4;

/// Render a text card; returns the rows consumed
pub fn render_card(frame: &mut Frame, text: &str, detail: Option<&str>, theme: &Theme, area: Rect) -> u16 {
    if area.height < CARD_HEIGHT {
        return 0;
    }

    let card_area = Rect {
        x: area.x,
        y: area.y + 1,
        width: area.width,
        height: CARD_HEIGHT - 1,
    };

    let mut lines = vec![Line::styled(text.to_string(), theme.card())];
    if let Some(detail) = detail {
        lines.push(Line::styled(
            detail.to_string(),
            theme.card().add_modifier(Modifier::DIM),
        ));
    }

    let card = Paragraph::new(lines)
        .style(theme.card())
        .block(Block::default().padding(Padding::new(2, 2, if detail.is_some() { 0 } else { 1 }, 0)))
        .wrap(Wrap { trim: true });
    frame.render_widget(card, card_area);

    CARD_HEIGHT
}

/// Render a centered, bold screen heading
pub fn render_title(frame: &mut Frame, title: &str, theme: &Theme, area: Rect) {
    let heading = Paragraph::new(Line::styled(title.to_string(), theme.title()))
        .alignment(Alignment::Center);
    frame.render_widget(heading, area);
}

/// Render a filled button with a key hint
pub fn render_button(frame: &mut Frame, label: &str, key: char, theme: &Theme, area: Rect) {
    let face = Paragraph::new(Line::from(vec![
        Span::styled(format!("[{}] ", key), theme.button_text()),
        Span::styled(label.to_string(), theme.button_text()),
    ]))
    .style(theme.button())
    .alignment(Alignment::Center)
    .block(Block::default().padding(Padding::vertical(1)).style(theme.button()));
    frame.render_widget(face, area);
}

/// Render a centered popup dialog
pub fn render_popup(
    frame: &mut Frame,
    title: &str,
    content: Vec<Line>,
    buttons: &[(&str, char)], // (label, key)
    theme: &Theme,
    area: Rect,
) {
    let popup_width = 60.min(area.width.saturating_sub(4));
    let popup_height = (content.len() as u16 + 6).min(area.height.saturating_sub(2));

    let popup_area = centered_rect(popup_width, popup_height, area);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(theme.title())
        .borders(Borders::ALL)
        .border_style(theme.border_focused())
        .style(theme.text());

    frame.render_widget(block, popup_area);

    let inner = Rect {
        x: popup_area.x + 2,
        y: popup_area.y + 1,
        width: popup_area.width.saturating_sub(4),
        height: popup_area.height.saturating_sub(4),
    };

    let content_widget = Paragraph::new(content)
        .style(theme.text())
        .wrap(Wrap { trim: false });
    frame.render_widget(content_widget, inner);

    if !buttons.is_empty() {
        let button_area = Rect {
            x: popup_area.x + 2,
            y: popup_area.y + popup_area.height.saturating_sub(2),
            width: popup_area.width.saturating_sub(4),
            height: 1,
        };

        let button_spans: Vec<Span> = buttons
            .iter()
            .enumerate()
            .flat_map(|(i, (label, key))| {
                let mut spans = vec![
                    Span::styled("[", theme.text_dim()),
                    Span::styled(
                        key.to_string(),
                        Style::default()
                            .fg(theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled("] ", theme.text_dim()),
                    Span::styled(*label, theme.text()),
                ];
                if i < buttons.len() - 1 {
                    spans.push(Span::raw("    "));
                }
                spans
            })
            .collect();

        let buttons_widget = Paragraph::new(Line::from(button_spans))
            .alignment(Alignment::Center);
        frame.render_widget(buttons_widget, button_area);
    }
}

/// Render an error popup
pub fn render_error_popup(frame: &mut Frame, title: &str, message: &str, theme: &Theme, area: Rect) {
    let content = vec![
        Line::raw(""),
        Line::styled(message.to_string(), theme.error()),
    ];

    render_popup(frame, title, content, &[("OK", 'o')], theme, area);
}

/// Render the keybinding help popup
pub fn render_help_popup(frame: &mut Frame, theme: &Theme, area: Rect) {
    let bindings = [
        ("1-5", "Switch tabs"),
        ("Tab / h l", "Next / previous tab"),
        ("j / k", "Scroll"),
        ("u / Enter", "Upload proof (Eco-Points)"),
        ("t", "Cycle theme"),
        ("?", "Toggle this help"),
        ("q", "Quit"),
    ];

    let content: Vec<Line> = bindings
        .iter()
        .map(|(keys, action)| {
            Line::from(vec![
                Span::styled(format!("{:<12}", keys), Style::default().fg(theme.accent)),
                Span::styled(*action, theme.text()),
            ])
        })
        .collect();

    render_popup(frame, "Keybindings", content, &[("Close", '?')], theme, area);
}

/// Render the media picker as a modal list
pub fn render_picker_popup(frame: &mut Frame, picker: &ImagePicker, theme: &Theme, area: Rect) {
    let popup_width = 70.min(area.width.saturating_sub(4));
    let popup_height = 20.min(area.height.saturating_sub(2));
    let popup_area = centered_rect(popup_width, popup_height, area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Choose Proof Image ")
        .title_style(theme.title())
        .title_bottom(Line::styled(
            " [Enter] Open/Pick  [Backspace] Up  [.] Hidden  [Esc] Cancel ",
            theme.text_dim(),
        ))
        .borders(Borders::ALL)
        .border_style(theme.border_focused())
        .style(theme.text());

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let header = Paragraph::new(vec![
        Line::styled(picker.dir.display().to_string(), theme.text()),
        Line::styled(picker.options.summary(), theme.text_dim()),
    ]);
    frame.render_widget(header, Rect { height: 2.min(inner.height), ..inner });

    let list_area = Rect {
        x: inner.x,
        y: inner.y + 3,
        width: inner.width,
        height: inner.height.saturating_sub(4),
    };

    if picker.entries.is_empty() {
        let empty = Paragraph::new("No images in this folder")
            .style(theme.text_dim())
            .alignment(Alignment::Center);
        frame.render_widget(empty, list_area);
    } else {
        // Keep the cursor visible
        let visible = list_area.height as usize;
        let offset = picker.selected.saturating_sub(visible.saturating_sub(1));

        let items: Vec<ListItem> = picker
            .entries
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .map(|(i, entry)| {
                let (icon, size) = match entry.kind {
                    EntryKind::Directory => ("▸ ", String::new()),
                    EntryKind::File => ("  ", format_size(entry.size)),
                };
                let style = if i == picker.selected {
                    theme.selected()
                } else {
                    theme.text()
                };
                let name_width = (list_area.width as usize).saturating_sub(12);
                ListItem::new(Line::from(vec![
                    Span::styled(icon, style),
                    Span::styled(format!("{:<width$}", entry.name, width = name_width), style),
                    Span::styled(format!("{:>8}", size), theme.text_dim()),
                ]))
            })
            .collect();

        frame.render_widget(List::new(items), list_area);
    }

    if let Some(msg) = &picker.message {
        let msg_area = Rect {
            x: inner.x,
            y: inner.y + inner.height.saturating_sub(1),
            width: inner.width,
            height: 1,
        };
        frame.render_widget(Paragraph::new(msg.as_str()).style(theme.warning()), msg_area);
    }
}

/// Render a flash message (bottom of screen)
pub fn render_flash_message(frame: &mut Frame, message: &str, is_error: bool, theme: &Theme, area: Rect) {
    let style = if is_error { theme.error() } else { theme.success() };
    let prefix = if is_error { "✗ " } else { "✓ " };

    let flash_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    frame.render_widget(Clear, flash_area);
    let flash = Paragraph::new(Line::from(vec![
        Span::styled(prefix, style),
        Span::styled(message.to_string(), style),
    ]));

    frame.render_widget(flash, flash_area);
}

/// Render status bar at bottom
pub fn render_status_bar(frame: &mut Frame, left_content: &str, right_content: &str, theme: &Theme, area: Rect) {
    let status_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    frame.render_widget(Clear, status_area);

    let left_widget = Paragraph::new(left_content.to_string()).style(theme.text_dim());

    let right_len = right_content.chars().count() as u16;
    let right_area = Rect {
        x: status_area.x + status_area.width.saturating_sub(right_len + 1),
        y: status_area.y,
        width: (right_len + 1).min(status_area.width),
        height: 1,
    };
    let right_widget = Paragraph::new(right_content.to_string()).style(theme.text_dim());

    frame.render_widget(left_widget, status_area);
    frame.render_widget(right_widget, right_area);
}

/// Helper: Create a centered rect of given size
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect { x, y, width: width.min(area.width), height: height.min(area.height) }
}

/// Format a byte count for the picker listing
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
