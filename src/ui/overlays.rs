use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::app::Model;

const KEYS: &[(&str, &[(&str, &str)])] = &[
    (
        "Features",
        &[
            ("h / Left", "Previous feature"),
            ("l / Right", "Next feature"),
            ("1-9", "Jump to feature"),
        ],
    ),
    (
        "Page",
        &[
            ("j/k or Up/Down", "Scroll"),
            ("Space / b", "Page down / up"),
            ("g / G", "Top / bottom"),
            ("Mouse wheel", "Scroll"),
        ],
    ),
    (
        "Analysis",
        &[
            ("Tab / Shift-Tab", "Select section"),
            ("Enter / e", "Expand or collapse"),
        ],
    ),
    (
        "Other",
        &[
            ("w", "Toggle watch"),
            ("r", "Reload deck"),
            ("?", "Toggle help"),
            ("q / Ctrl-c", "Quit"),
        ],
    ),
];

pub fn render_help_overlay(model: &Model, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(12).max(48);
    let popup_height = area.height.saturating_sub(4).max(12);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let section_style = Style::default()
        .fg(model.theme.accent)
        .add_modifier(Modifier::BOLD);
    let dim_style = Style::default().fg(Color::Indexed(245));

    let mut lines: Vec<Line> = Vec::new();
    for (section, keys) in KEYS {
        lines.push(Line::styled(*section, section_style));
        for (key, action) in *keys {
            lines.push(Line::raw(format!("  {key:<18}{action}")));
        }
        lines.push(Line::raw(""));
    }

    let path_or = |path: Option<&std::path::PathBuf>, fallback: &str| {
        path.map_or_else(|| fallback.to_string(), |p| p.display().to_string())
    };
    lines.push(Line::styled("Config", section_style));
    lines.push(Line::raw(format!(
        "  Global: {}",
        path_or(model.config_global_path.as_ref(), "<unknown>")
    )));
    lines.push(Line::raw(format!(
        "  Local override: {}",
        path_or(model.config_local_path.as_ref(), "<none>")
    )));
    lines.push(Line::raw(format!(
        "  Deck: {}",
        path_or(model.deck_path.as_ref(), "<built-in>")
    )));
    lines.push(Line::raw(""));
    lines.push(Line::styled("Any key closes", dim_style));

    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(Style::default().bg(Color::Black).fg(Color::White));

    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
