use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Padding, Paragraph};

use crate::app::Model;

use super::{CONTENT_LEFT_PADDING, body, overlays, status};

/// Columns left for the page body in a terminal `total_width` wide.
pub const fn content_width(total_width: u16) -> u16 {
    let width = total_width.saturating_sub(CONTENT_LEFT_PADDING);
    if width == 0 { 1 } else { width }
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let toast_active = model.active_toast().is_some();
    let footer_rows = 1 + u16::from(toast_active);

    let body_area = Rect {
        height: area.height.saturating_sub(footer_rows),
        ..area
    };
    let toast_area = Rect {
        y: area.y + area.height.saturating_sub(2),
        height: 1,
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: 1,
        ..area
    };

    let layout = body::layout(model, content_width(area.width));
    let range = model.viewport.visible_range();
    let visible = layout
        .lines
        .into_iter()
        .skip(range.start)
        .take(usize::from(body_area.height))
        .collect::<Vec<_>>();

    let block = Block::default()
        .borders(Borders::NONE)
        .padding(Padding::left(CONTENT_LEFT_PADDING));
    frame.render_widget(Paragraph::new(visible).block(block), body_area);

    if toast_active {
        status::render_toast_bar(model, frame, toast_area);
    }
    status::render_status_bar(model, frame, status_area);

    if model.help_visible {
        overlays::render_help_overlay(model, frame, area);
    }
}
