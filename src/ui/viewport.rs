//! Vertical scrolling over the rendered page body.
//!
//! The page is laid out as a flat list of terminal rows. [`Viewport`]
//! tracks which slice of those rows is on screen.

use std::ops::Range;

/// The visible window over the page body.
///
/// # Example
///
/// ```
/// use folio::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(80, 20, 50);
/// assert_eq!(vp.visible_range(), 0..20);
///
/// vp.page_down();
/// assert_eq!(vp.visible_range(), 20..40);
/// vp.page_down();
/// assert_eq!(vp.visible_range(), 30..50);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
    offset: usize,
    total_rows: usize,
}

impl Viewport {
    /// A viewport `width` x `height` cells over a body of `total_rows`.
    pub const fn new(width: u16, height: u16, total_rows: usize) -> Self {
        Self {
            width,
            height,
            offset: 0,
            total_rows,
        }
    }

    /// First visible body row.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    pub const fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Body rows currently on screen.
    pub fn visible_range(&self) -> Range<usize> {
        let end = (self.offset + self.height as usize).min(self.total_rows);
        self.offset.min(end)..end
    }

    /// How far through the body the viewport is, 0-100.
    ///
    /// A body that fits on screen reports 100.
    pub fn scroll_percent(&self) -> u8 {
        let max_offset = self.max_offset();
        if max_offset == 0 {
            return 100;
        }
        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        {
            ((self.offset as f64 / max_offset as f64) * 100.0).round() as u8
        }
    }

    pub const fn can_scroll_up(&self) -> bool {
        self.offset > 0
    }

    pub const fn can_scroll_down(&self) -> bool {
        self.offset < self.max_offset()
    }

    pub const fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.offset = self.offset.saturating_add(n).min(self.max_offset());
    }

    pub const fn page_up(&mut self) {
        self.scroll_up(self.height as usize);
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.height as usize);
    }

    pub const fn go_to_top(&mut self) {
        self.offset = 0;
    }

    pub const fn go_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Bring `row` on screen, scrolling as little as possible.
    pub fn reveal(&mut self, row: usize) {
        let height = (self.height as usize).max(1);
        if row < self.offset {
            self.offset = row;
        } else if row >= self.offset + height {
            self.offset = row + 1 - height;
        }
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.offset = self.offset.min(self.max_offset());
    }

    /// Update the body length after a relayout.
    pub fn set_total_rows(&mut self, total: usize) {
        self.total_rows = total;
        self.offset = self.offset.min(self.max_offset());
    }

    const fn max_offset(&self) -> usize {
        self.total_rows.saturating_sub(self.height as usize)
    }
}
