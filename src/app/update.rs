use crate::app::Model;
use crate::carousel::{AdvanceOutcome, Direction};

/// All possible events and actions in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Carousel
    /// Move the strip one card back
    CarouselPrev,
    /// Move the strip one card forward
    CarouselNext,
    /// Move the strip to the feature at this index
    CarouselJump(usize),

    // Page scrolling
    ScrollUp(usize),
    ScrollDown(usize),
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,

    // Analysis sections
    /// Focus the next analysis section, wrapping around
    FocusNextSection,
    /// Focus the previous analysis section, wrapping around
    FocusPrevSection,
    /// Expand or collapse the focused section
    ToggleSection,

    // File watching
    ToggleWatch,
    /// Deck file changed on disk
    FileChanged,
    /// Reload the deck now
    ForceReload,

    ToggleHelp,
    HideHelp,

    /// Terminal resized
    Resize(u16, u16),
    /// Clock advanced to this many milliseconds since start
    Tick(u64),
    Quit,
}

/// Pure state transition.
///
/// Side effects (file IO, watchers) are handled by the event loop after
/// the model has been updated.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::CarouselPrev => step(&mut model, Direction::Previous),
        Message::CarouselNext => step(&mut model, Direction::Next),
        Message::CarouselJump(index) => {
            let now = model.now_ms;
            if model.carousel.jump_to(index, now) == AdvanceOutcome::Started {
                model.carousel.poll(now);
            }
        }

        Message::ScrollUp(n) => model.viewport.scroll_up(n),
        Message::ScrollDown(n) => model.viewport.scroll_down(n),
        Message::PageUp => model.viewport.page_up(),
        Message::PageDown => model.viewport.page_down(),
        Message::GoToTop => model.viewport.go_to_top(),
        Message::GoToBottom => model.viewport.go_to_bottom(),

        Message::FocusNextSection | Message::FocusPrevSection => {
            let count = model.deck.analysis.len();
            if count > 0 {
                let next = match (model.focused_section, &msg) {
                    (None, Message::FocusNextSection) => 0,
                    (None, _) => count - 1,
                    (Some(i), Message::FocusNextSection) => (i + 1) % count,
                    (Some(i), _) => (i + count - 1) % count,
                };
                model.focused_section = Some(next);
                if let Some(row) = model.section_row(next) {
                    model.viewport.reveal(row);
                }
            }
        }
        Message::ToggleSection => {
            if let Some(flag) = model
                .focused_section
                .and_then(|i| model.expanded.get_mut(i))
            {
                *flag = !*flag;
                model.reflow_layout();
            }
        }

        Message::ToggleWatch => {
            model.watch_enabled = !model.watch_enabled;
        }
        Message::ToggleHelp => {
            model.help_visible = !model.help_visible;
        }
        Message::HideHelp => {
            model.help_visible = false;
        }
        // Handled by the event loop (side effect)
        Message::FileChanged | Message::ForceReload => {}

        Message::Resize(width, height) => {
            model.viewport.resize(width, height.saturating_sub(1));
            model.reflow_layout();
        }
        Message::Tick(now_ms) => {
            model.now_ms = now_ms;
            if let Some(done) = model.carousel.poll(now_ms) {
                tracing::trace!(offset = done.offset, rebased = done.rebased, "slide settled");
            }
            model.expire_toast(now_ms);
        }
        Message::Quit => {
            model.should_quit = true;
        }
    }
    model
}

fn step(model: &mut Model, direction: Direction) {
    let now = model.now_ms;
    if model.carousel.advance(direction, now) == AdvanceOutcome::Started {
        // Completes at once when animations are off.
        model.carousel.poll(now);
    }
}
