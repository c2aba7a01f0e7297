use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::carousel::{Carousel, CarouselConfig, CarouselError};
use crate::content::{Deck, FeatureItem};
use crate::ui::style::Theme;
use crate::ui::viewport::Viewport;

/// How long a toast stays up.
const TOAST_MS: u64 = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at_ms: u64,
}

/// The complete application state.
#[derive(Debug)]
pub struct Model {
    pub deck: Deck,
    /// Source of the deck; `None` for the built-in one.
    pub deck_path: Option<PathBuf>,
    pub carousel: Carousel<FeatureItem>,
    pub viewport: Viewport,
    pub theme: Theme,
    /// Clock of the last `Tick`, in milliseconds since start.
    pub now_ms: u64,
    /// Expanded flag per analysis section.
    pub expanded: Vec<bool>,
    pub focused_section: Option<usize>,
    pub watch_enabled: bool,
    pub help_visible: bool,
    pub config_global_path: Option<PathBuf>,
    pub config_local_path: Option<PathBuf>,
    pub should_quit: bool,
    /// Header row of each analysis section in the laid-out body.
    pub(super) section_rows: Vec<usize>,
    toast: Option<Toast>,
}

impl Model {
    /// Build the model for `deck` on a terminal of `terminal_size`.
    ///
    /// # Errors
    ///
    /// Returns an error if the deck has no features or `config` is invalid.
    pub fn new(
        deck: Deck,
        config: CarouselConfig,
        terminal_size: (u16, u16),
    ) -> Result<Self, CarouselError> {
        let carousel = Carousel::new(deck.features.clone(), config)?;
        let expanded = initial_expanded(&deck);
        let mut model = Self {
            deck,
            deck_path: None,
            carousel,
            viewport: Viewport::new(terminal_size.0, terminal_size.1.saturating_sub(1), 0),
            theme: Theme::default(),
            now_ms: 0,
            expanded,
            focused_section: None,
            watch_enabled: false,
            help_visible: false,
            config_global_path: None,
            config_local_path: None,
            should_quit: false,
            section_rows: Vec::new(),
            toast: None,
        };
        model.reflow_layout();
        Ok(model)
    }

    #[must_use]
    pub fn with_deck_path(mut self, path: Option<PathBuf>) -> Self {
        self.deck_path = path;
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Width available to the page body.
    pub fn content_width(&self) -> u16 {
        crate::ui::content_width(self.viewport.width())
    }

    /// Recompute the body length after anything that changes its shape.
    pub fn reflow_layout(&mut self) {
        let layout = crate::ui::layout(self, self.content_width());
        self.viewport.set_total_rows(layout.lines.len());
        self.section_rows = layout.section_rows;
    }

    pub(super) fn section_row(&self, index: usize) -> Option<usize> {
        self.section_rows.get(index).copied()
    }

    /// Swap in a new deck with a fresh carousel using the same tuning.
    ///
    /// # Errors
    ///
    /// Returns an error if the new deck has no features.
    pub fn replace_deck(&mut self, deck: Deck) -> Result<(), CarouselError> {
        let carousel = Carousel::new(deck.features.clone(), *self.carousel.config())?;
        self.carousel = carousel;
        self.expanded = initial_expanded(&deck);
        self.focused_section = None;
        self.deck = deck;
        self.reflow_layout();
        Ok(())
    }

    pub(super) fn reload_from_disk(&mut self) -> Result<()> {
        let deck = match &self.deck_path {
            Some(path) => Deck::load(path)?,
            None => Deck::builtin(),
        };
        self.replace_deck(deck).context("reloaded deck is unusable")
    }

    pub fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at_ms: self.now_ms + TOAST_MS,
        });
    }

    pub(super) fn expire_toast(&mut self, now_ms: u64) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at_ms <= now_ms)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

/// The first analysis section starts open.
fn initial_expanded(deck: &Deck) -> Vec<bool> {
    (0..deck.analysis.len()).map(|i| i == 0).collect()
}
