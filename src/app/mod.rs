//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Model, ToastLevel};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::carousel::CarouselConfig;
use crate::config::ThemeMode;

/// Owns the terminal session and runs the event loop.
pub struct App {
    deck_path: Option<PathBuf>,
    carousel_config: CarouselConfig,
    watch_enabled: bool,
    theme: ThemeMode,
    config_global_path: Option<PathBuf>,
    config_local_path: Option<PathBuf>,
}

impl App {
    /// Create an application for the deck at `deck_path`, or the built-in
    /// deck when `None`.
    pub fn new(deck_path: Option<PathBuf>) -> Self {
        Self {
            deck_path,
            carousel_config: CarouselConfig {
                item_width: crate::ui::CARD_PITCH,
                ..CarouselConfig::default()
            },
            watch_enabled: false,
            theme: ThemeMode::Auto,
            config_global_path: None,
            config_local_path: None,
        }
    }

    #[must_use]
    pub const fn with_carousel_config(mut self, config: CarouselConfig) -> Self {
        self.carousel_config = config;
        self
    }

    #[must_use]
    pub const fn with_watch(mut self, enabled: bool) -> Self {
        self.watch_enabled = enabled;
        self
    }

    #[must_use]
    pub const fn with_theme(mut self, theme: ThemeMode) -> Self {
        self.theme = theme;
        self
    }

    /// Set config paths to show in help.
    #[must_use]
    pub fn with_config_paths(
        mut self,
        global_path: Option<PathBuf>,
        local_path: Option<PathBuf>,
    ) -> Self {
        self.config_global_path = global_path;
        self.config_local_path = local_path;
        self
    }
}

#[cfg(test)]
mod tests;
