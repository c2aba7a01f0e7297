use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let carousel = &model.carousel;
    let position = carousel.position();
    let feature = &carousel.current().title;
    let moving = if carousel.is_locked() { " »" } else { "" };
    let watch_indicator = if model.watch_enabled {
        " [watching]"
    } else {
        ""
    };

    let status = format!(
        " {}  ‹{}/{}› {}{}  [{}%]{}  ?:help",
        model.deck.hero.title,
        position + 1,
        carousel.len(),
        feature,
        moving,
        model.viewport.scroll_percent(),
        watch_indicator,
    );

    let bar = Paragraph::new(status).style(
        Style::default()
            .bg(model.theme.status_bg)
            .fg(model.theme.status_fg),
    );
    frame.render_widget(bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
