use crate::app::{App, Message, Model, ToastLevel};
use crate::watcher::{DEFAULT_DEBOUNCE_MS, DeckWatcher};

impl App {
    pub(super) fn make_deck_watcher(model: &Model) -> anyhow::Result<DeckWatcher> {
        let Some(path) = model.deck_path.as_ref() else {
            anyhow::bail!("the built-in deck has no file");
        };
        Ok(DeckWatcher::new(path, DEFAULT_DEBOUNCE_MS)?)
    }

    pub(super) fn handle_message_side_effects(
        model: &mut Model,
        deck_watcher: &mut Option<DeckWatcher>,
        msg: &Message,
    ) {
        match msg {
            Message::ToggleWatch => {
                if model.watch_enabled {
                    match Self::make_deck_watcher(model) {
                        Ok(watcher) => {
                            *deck_watcher = Some(watcher);
                            model.show_toast(ToastLevel::Info, "Watching deck for changes");
                        }
                        Err(err) => {
                            model.watch_enabled = false;
                            *deck_watcher = None;
                            tracing::warn!(%err, "watch unavailable");
                            model.show_toast(
                                ToastLevel::Warning,
                                format!("Watch unavailable: {err}"),
                            );
                        }
                    }
                } else {
                    *deck_watcher = None;
                    model.show_toast(ToastLevel::Info, "Watch disabled");
                }
            }
            Message::ForceReload | Message::FileChanged => {
                let _scope = crate::perf::scope("deck.reload");
                match model.reload_from_disk() {
                    Ok(()) => {
                        tracing::info!(features = model.carousel.len(), "deck reloaded");
                        model.show_toast(ToastLevel::Info, "Reloaded");
                    }
                    Err(err) => {
                        tracing::warn!("reload failed: {err:#}");
                        model.show_toast(ToastLevel::Error, format!("Reload failed: {err:#}"));
                    }
                }
            }
            _ => {}
        }
    }
}
