//! Terminal UI components.
//!
//! - [`viewport`]: Vertical scroll position over the page body
//! - [`style`]: Theming and colors
//! - `body`: Lays the deck out as rows
//! - `render`, `status`, `overlays`: Draw a frame

pub mod style;
pub mod viewport;

mod body;
mod overlays;
mod render;
mod status;

pub use body::{BodyLayout, CARD_GAP, CARD_PITCH, CARD_WIDTH, STRIP_HEIGHT, layout};
pub use render::{content_width, render};

pub const CONTENT_LEFT_PADDING: u16 = 2;
