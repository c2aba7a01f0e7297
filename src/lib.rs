// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. carousel::CarouselConfig)
    clippy::module_name_repetitions
)]

//! # Folio
//!
//! A terminal viewer for single-page portfolio decks.
//!
//! A deck is a hero header, a markdown narrative, an infinitely looping
//! strip of feature cards, benchmark tables, grouped bar charts and
//! collapsible analysis sections. Folio draws it as one scrollable page.
//!
//! ## Architecture
//!
//! Folio uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`carousel`]: Infinite carousel controller over a virtual sequence
//! - [`content`]: Deck data model, JSON loading and the built-in deck
//! - [`table`]: Best-value highlighting for benchmark tables
//! - [`chart`]: Grouped bar chart geometry
//! - [`markdown`]: Narrative markdown to styled, wrapped lines
//! - [`app`]: Main application loop and state
//! - [`ui`]: Terminal UI components
//! - [`watcher`]: Deck file watching
//! - [`config`]: Persisted command-line defaults
//! - [`perf`]: Timing scopes

pub mod app;
pub mod carousel;
pub mod chart;
pub mod config;
pub mod content;
pub mod markdown;
pub mod perf;
pub mod table;
pub mod ui;
pub mod watcher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::carousel::{Carousel, CarouselConfig, Direction};
    pub use crate::content::{Deck, FeatureItem};
    pub use crate::ui::viewport::Viewport;
}
