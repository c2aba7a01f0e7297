use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, ToastLevel, update};
use crate::content::Deck;
use crate::watcher::DeckWatcher;

/// Poll interval while the strip is moving, about 60 frames a second.
const ANIMATION_POLL_MS: u64 = 16;
const IDLE_POLL_MS: u64 = 250;

pub(super) struct ResizeDebouncer {
    delay_ms: u64,
    pending: Option<(u16, u16, u64)>,
}

impl ResizeDebouncer {
    pub(super) const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub(super) const fn queue(&mut self, width: u16, height: u16, now_ms: u64) {
        self.pending = Some((width, height, now_ms));
    }

    pub(super) fn take_ready(&mut self, now_ms: u64) -> Option<(u16, u16)> {
        let (width, height, queued_at) = self.pending?;
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending = None;
            Some((width, height))
        } else {
            None
        }
    }

    pub(super) const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl App {
    /// Run the viewer until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if the deck cannot be loaded, the terminal cannot
    /// be initialised, or terminal IO fails.
    pub fn run(&self) -> Result<()> {
        let _run_scope = crate::perf::scope("app.run.total");

        let deck = match &self.deck_path {
            Some(path) => Deck::load(path)?,
            None => Deck::builtin(),
        };

        let init_scope = crate::perf::scope("app.ratatui_init");
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal; folio requires an interactive terminal")?;
        let size = terminal.size()?;
        drop(init_scope);

        let result = self
            .build_model(deck, (size.width, size.height))
            .and_then(|model| {
                execute!(stdout(), EnableMouseCapture)?;
                Self::event_loop(&mut terminal, model)
            });

        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();
        result
    }

    fn build_model(&self, deck: Deck, size: (u16, u16)) -> Result<Model> {
        let mut model = Model::new(deck, self.carousel_config, size)
            .context("Deck cannot be shown")?
            .with_deck_path(self.deck_path.clone())
            .with_theme(crate::ui::style::Theme::for_mode(self.theme));
        model.watch_enabled = self.watch_enabled;
        model
            .config_global_path
            .clone_from(&self.config_global_path);
        model.config_local_path.clone_from(&self.config_local_path);
        Ok(model)
    }

    /// Apply `msg` as of `now_ms`, then run its side effects.
    ///
    /// The clock moves first so a slide requested after an idle wait starts
    /// at the moment of the request.
    pub(super) fn dispatch(
        model: Model,
        msg: Message,
        now_ms: u64,
        deck_watcher: &mut Option<DeckWatcher>,
    ) -> Model {
        let model = update(model, Message::Tick(now_ms));
        let side_msg = msg.clone();
        let mut model = update(model, msg);
        Self::handle_message_side_effects(&mut model, deck_watcher, &side_msg);
        model
    }

    fn event_loop(terminal: &mut DefaultTerminal, mut model: Model) -> Result<()> {
        let start = Instant::now();
        let elapsed_ms = || u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        let mut resize_debouncer = ResizeDebouncer::new(100);
        let mut deck_watcher = if model.watch_enabled {
            match Self::make_deck_watcher(&model) {
                Ok(watcher) => Some(watcher),
                Err(err) => {
                    model.watch_enabled = false;
                    tracing::warn!(%err, "watch unavailable");
                    model.show_toast(ToastLevel::Warning, format!("Watch unavailable: {err}"));
                    None
                }
            }
        } else {
            None
        };
        let mut frame_idx: u64 = 0;
        let mut needs_render = true;

        loop {
            let now_ms = elapsed_ms();
            let was_animating = model.carousel.is_locked();
            let had_toast = model.active_toast().is_some();
            model = update(model, Message::Tick(now_ms));
            if was_animating || had_toast != model.active_toast().is_some() {
                needs_render = true;
            }

            if let Some((width, height)) = resize_debouncer.take_ready(now_ms) {
                tracing::debug!(width, height, "resize applied");
                model = update(model, Message::Resize(width, height));
                needs_render = true;
            }

            if model.watch_enabled
                && deck_watcher
                    .as_mut()
                    .is_some_and(|watcher| watcher.poll_change(now_ms))
            {
                model = update(model, Message::FileChanged);
                Self::handle_message_side_effects(
                    &mut model,
                    &mut deck_watcher,
                    &Message::FileChanged,
                );
                needs_render = true;
            }

            let poll_ms = if needs_render {
                0
            } else if model.carousel.is_locked() {
                ANIMATION_POLL_MS
            } else if resize_debouncer.is_pending() {
                10
            } else {
                IDLE_POLL_MS
            };
            if event::poll(Duration::from_millis(poll_ms))? {
                // Key repeat bursts are drained before the next frame.
                let mut handled = 0_u32;
                loop {
                    let event_ms = elapsed_ms();
                    let event = event::read()?;
                    if let Some(msg) =
                        Self::handle_event(&event, &model, event_ms, &mut resize_debouncer)
                    {
                        tracing::trace!(frame = frame_idx, ?msg, "message");
                        model = Self::dispatch(model, msg, event_ms, &mut deck_watcher);
                        handled += 1;
                        needs_render = true;
                    }
                    if !event::poll(Duration::from_millis(0))? {
                        break;
                    }
                }
                if handled > 1 {
                    tracing::trace!(frame = frame_idx, handled, "coalesced input");
                }
            }

            if needs_render {
                frame_idx += 1;
                let _draw_scope = crate::perf::scope("frame.draw");
                terminal.draw(|frame| crate::ui::render(&model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }
}
