use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};

use crate::app::{App, Message, Model};

use super::event_loop::ResizeDebouncer;

/// Rows moved per mouse wheel notch.
const WHEEL_ROWS: usize = 3;

impl App {
    pub(super) fn handle_event(
        event: &Event,
        model: &Model,
        now_ms: u64,
        resize_debouncer: &mut ResizeDebouncer,
    ) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Resize(w, h) => {
                tracing::trace!(width = w, height = h, "resize queued");
                resize_debouncer.queue(*w, *h, now_ms);
                None
            }
            _ => None,
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return None;
        }
        match mouse.kind {
            MouseEventKind::ScrollDown if model.viewport.can_scroll_down() => {
                Some(Message::ScrollDown(WHEEL_ROWS))
            }
            MouseEventKind::ScrollUp if model.viewport.can_scroll_up() => {
                Some(Message::ScrollUp(WHEEL_ROWS))
            }
            MouseEventKind::ScrollLeft => Some(Message::CarouselPrev),
            MouseEventKind::ScrollRight => Some(Message::CarouselNext),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        if model.help_visible {
            return Some(Message::HideHelp);
        }

        match key.code {
            // Carousel
            KeyCode::Char('h') | KeyCode::Left => Some(Message::CarouselPrev),
            KeyCode::Char('l') | KeyCode::Right => Some(Message::CarouselNext),
            KeyCode::Char(c @ '1'..='9') => {
                let index = c.to_digit(10).and_then(|d| usize::try_from(d).ok())? - 1;
                Some(Message::CarouselJump(index))
            }

            // Page
            KeyCode::Char('j') | KeyCode::Down if model.viewport.can_scroll_down() => {
                Some(Message::ScrollDown(1))
            }
            KeyCode::Char('k') | KeyCode::Up if model.viewport.can_scroll_up() => {
                Some(Message::ScrollUp(1))
            }
            KeyCode::Char(' ') | KeyCode::PageDown if model.viewport.can_scroll_down() => {
                Some(Message::PageDown)
            }
            KeyCode::Char('b') | KeyCode::PageUp if model.viewport.can_scroll_up() => {
                Some(Message::PageUp)
            }
            KeyCode::Char('g') | KeyCode::Home => Some(Message::GoToTop),
            KeyCode::Char('G') | KeyCode::End => Some(Message::GoToBottom),

            // Analysis
            KeyCode::Tab => Some(Message::FocusNextSection),
            KeyCode::BackTab => Some(Message::FocusPrevSection),
            KeyCode::Enter | KeyCode::Char('e') => Some(Message::ToggleSection),

            // Deck
            KeyCode::Char('w') => Some(Message::ToggleWatch),
            KeyCode::Char('r' | 'R') => Some(Message::ForceReload),
            KeyCode::Char('?') | KeyCode::F(1) => Some(Message::ToggleHelp),

            KeyCode::Char('q') => Some(Message::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Message::Quit)
            }

            _ => None,
        }
    }
}
