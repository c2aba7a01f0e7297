//! Infinite feature carousel.
//!
//! The carousel presents a short list of items as an endless strip of
//! fixed-width cards. Internally the list is repeated many times into a
//! [`VirtualSequence`] and the strip scrolls over it by `offset` units.
//! After every completed move the offset is checked against a safety band
//! around the middle repetition; when it drifts out, it is silently moved
//! back by a whole number of repetitions, so the visible card never changes.
//!
//! Timing is driven by the caller: `advance` starts a transition at a
//! timestamp (milliseconds on any monotonic clock) and `poll` fires the
//! deferred completion once the configured duration has elapsed.
//!
//! # Example
//!
//! ```
//! use folio::carousel::{AdvanceOutcome, Carousel, CarouselConfig, Direction};
//!
//! let mut carousel = Carousel::new(vec!["A", "B", "C"], CarouselConfig::default()).unwrap();
//! assert_eq!(carousel.current(), &"A");
//!
//! assert_eq!(carousel.advance(Direction::Next, 0), AdvanceOutcome::Started);
//! // A second request while the first is in flight is dropped.
//! assert_eq!(carousel.advance(Direction::Next, 10), AdvanceOutcome::Ignored);
//!
//! carousel.poll(400);
//! assert_eq!(carousel.current(), &"B");
//! ```

mod sequence;

use std::ops::RangeInclusive;
use std::time::Duration;

use thiserror::Error;

pub use sequence::VirtualSequence;

/// Card width (220) plus gap (16) of the web layout, in pixels.
pub const DEFAULT_ITEM_WIDTH: u64 = 236;
/// How many copies of the source list make up the strip.
pub const DEFAULT_REPEAT_FACTOR: usize = 100;
/// Safety band half-width, in whole repetitions of the source list.
pub const DEFAULT_TOLERANCE: usize = 10;
/// Duration of one card transition.
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(400);
/// Largest accepted repeat factor.
pub const MAX_REPEAT_FACTOR: usize = 10_000;
/// Largest virtual sequence, in slots.
pub const MAX_SLOTS: usize = 1 << 20;

/// Errors raised when building a carousel.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CarouselError {
    #[error("carousel needs at least one item")]
    Empty,
    #[error("invalid carousel config: {0}")]
    InvalidConfig(String),
}

/// Tuning constants for a carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarouselConfig {
    /// Distance between the left edges of two neighbouring cards.
    pub item_width: u64,
    /// Number of source-list copies in the virtual sequence (`M`).
    pub repeat_factor: usize,
    /// Safety band half-width in repetitions (`K`).
    pub tolerance: usize,
    /// Length of the move animation. Zero completes on the next poll.
    pub transition: Duration,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            item_width: DEFAULT_ITEM_WIDTH,
            repeat_factor: DEFAULT_REPEAT_FACTOR,
            tolerance: DEFAULT_TOLERANCE,
            transition: DEFAULT_TRANSITION,
        }
    }
}

impl CarouselConfig {
    /// Check that every offset the carousel can reach maps to a real slot.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::InvalidConfig`] when the item width is zero,
    /// the repeat factor exceeds [`MAX_REPEAT_FACTOR`], the strip width
    /// overflows `u64`, or the safety band does not fit inside the virtual
    /// sequence.
    pub fn validate(&self) -> Result<(), CarouselError> {
        if self.item_width == 0 {
            return Err(CarouselError::InvalidConfig(
                "item width must be positive".to_string(),
            ));
        }
        if self.repeat_factor > MAX_REPEAT_FACTOR {
            return Err(CarouselError::InvalidConfig(format!(
                "repeat factor {} exceeds {MAX_REPEAT_FACTOR}",
                self.repeat_factor
            )));
        }
        self.strip_width(1)?;
        let half = self.repeat_factor / 2;
        // One card of headroom on each side of the band: a move may step
        // just outside it before the rebase pulls it back.
        if self.tolerance >= half || half + self.tolerance + 1 >= self.repeat_factor {
            return Err(CarouselError::InvalidConfig(format!(
                "tolerance {} does not fit in {} repetitions",
                self.tolerance, self.repeat_factor
            )));
        }
        Ok(())
    }

    /// Slot count for `items_len` items.
    fn slot_count(&self, items_len: usize) -> Result<usize, CarouselError> {
        items_len
            .checked_mul(self.repeat_factor)
            .filter(|slots| *slots <= MAX_SLOTS)
            .ok_or_else(|| {
                CarouselError::InvalidConfig(format!(
                    "{items_len} items repeated {} times exceed {MAX_SLOTS} slots",
                    self.repeat_factor
                ))
            })
    }

    /// Width of the whole strip plus one card, the furthest a move can reach.
    fn strip_width(&self, items_len: usize) -> Result<u64, CarouselError> {
        self.slot_count(items_len)
            .ok()
            .and_then(|slots| u64::try_from(slots).ok())
            .and_then(|slots| slots.checked_add(1))
            .and_then(|slots| slots.checked_mul(self.item_width))
            .ok_or_else(|| {
                CarouselError::InvalidConfig(format!(
                    "item width {} overflows a strip of {items_len} items",
                    self.item_width
                ))
            })
    }

    fn transition_ms(&self) -> u64 {
        u64::try_from(self.transition.as_millis()).unwrap_or(u64::MAX)
    }
}

/// Navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Whether a move is in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Transitioning,
}

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// A transition started and the carousel is now locked.
    Started,
    /// The request was dropped (locked, or nothing to do).
    Ignored,
}

/// Emitted once when a transition finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    /// Offset after the move and any rebase.
    pub offset: u64,
    /// True when the offset was pulled back toward the middle.
    pub rebased: bool,
}

/// A card intersecting the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotView<'a, T> {
    pub slot: usize,
    pub source_index: usize,
    pub item: &'a T,
    /// Left edge relative to the viewport; negative when partly scrolled off.
    pub x: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Transition {
    from: u64,
    to: u64,
    started_ms: u64,
}

/// Circular carousel over a fixed, non-empty list of items.
#[derive(Debug, Clone)]
pub struct Carousel<T> {
    items: Vec<T>,
    sequence: VirtualSequence,
    config: CarouselConfig,
    offset: u64,
    transition: Option<Transition>,
    rebase_count: u64,
}

impl<T> Carousel<T> {
    /// Build a carousel positioned on the first item of the middle repetition.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::Empty`] for an empty item list and
    /// [`CarouselError::InvalidConfig`] when `config` fails validation.
    pub fn new(items: Vec<T>, config: CarouselConfig) -> Result<Self, CarouselError> {
        if items.is_empty() {
            return Err(CarouselError::Empty);
        }
        config.validate()?;
        config.strip_width(items.len())?;

        let sequence = VirtualSequence::repeat(items.len(), config.repeat_factor);
        let mut carousel = Self {
            items,
            sequence,
            config,
            offset: 0,
            transition: None,
            rebase_count: 0,
        };
        carousel.offset = carousel.slot_offset(carousel.middle_start_index());
        tracing::debug!(
            items = carousel.items.len(),
            slots = carousel.sequence.len(),
            offset = carousel.offset,
            "carousel initialized"
        );
        Ok(carousel)
    }

    /// Request a one-card move. Dropped while another move is in flight.
    pub fn advance(&mut self, direction: Direction, now_ms: u64) -> AdvanceOutcome {
        if self.is_locked() {
            tracing::trace!(?direction, "carousel locked, advance dropped");
            return AdvanceOutcome::Ignored;
        }
        let to = match direction {
            Direction::Previous => self.offset.saturating_sub(self.config.item_width),
            Direction::Next => self.offset + self.config.item_width,
        };
        self.start(to, now_ms)
    }

    /// Animate to source item `index` within the current repetition.
    ///
    /// Follows the same lock as [`Carousel::advance`]. An out-of-range index
    /// or the already-visible index is ignored.
    pub fn jump_to(&mut self, index: usize, now_ms: u64) -> AdvanceOutcome {
        if self.is_locked() || index >= self.items.len() || index == self.position() {
            return AdvanceOutcome::Ignored;
        }
        let slot = self.current_slot() - self.position() + index;
        self.start(self.slot_offset(slot), now_ms)
    }

    /// Fire the deferred completion if the transition has run its course.
    pub fn poll(&mut self, now_ms: u64) -> Option<Completion> {
        let transition = self.transition?;
        if now_ms.saturating_sub(transition.started_ms) < self.config.transition_ms() {
            return None;
        }
        Some(self.finish_transition(transition))
    }

    /// Complete the in-flight transition immediately.
    pub fn finish(&mut self) -> Option<Completion> {
        let transition = self.transition?;
        Some(self.finish_transition(transition))
    }

    /// Pull the offset back toward the middle repetition if it left the
    /// safety band. Returns whether the offset changed.
    pub fn rebase(&mut self) -> bool {
        if self.safety_band().contains(&self.offset) {
            return false;
        }
        let before = self.offset;
        let cycle = self.cycle_width();
        self.offset = self.slot_offset(self.middle_start_index()) + self.offset % cycle;
        self.rebase_count += 1;
        tracing::debug!(before, after = self.offset, "carousel rebased");
        true
    }

    /// Offset to draw at `now_ms`: eased between the endpoints of an
    /// in-flight transition, the resting offset otherwise.
    pub fn render_offset(&self, now_ms: u64) -> u64 {
        let Some(transition) = self.transition else {
            return self.offset;
        };
        let duration = self.config.transition_ms();
        if duration == 0 {
            return transition.to;
        }
        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        {
            let elapsed = now_ms.saturating_sub(transition.started_ms);
            let t = (elapsed as f64 / duration as f64).clamp(0.0, 1.0);
            let eased = smoothstep(t);
            let from = transition.from as f64;
            let to = transition.to as f64;
            (from + (to - from) * eased).round().max(0.0) as u64
        }
    }

    /// Cards that intersect a viewport `viewport_width` units wide at `now_ms`.
    pub fn visible_slots(&self, viewport_width: u64, now_ms: u64) -> Vec<SlotView<'_, T>> {
        let offset = self.render_offset(now_ms);
        let width = self.config.item_width;
        let first = usize::try_from(offset / width).unwrap_or(usize::MAX);
        let shift = i64::try_from(offset % width).unwrap_or(0);
        let stride = i64::try_from(width).unwrap_or(i64::MAX);
        let limit = i64::try_from(viewport_width).unwrap_or(i64::MAX);

        let mut views = Vec::new();
        let mut x = -shift;
        let mut slot = first;
        while x < limit {
            let Some(source_index) = self.sequence.source_index(slot) else {
                break;
            };
            views.push(SlotView {
                slot,
                source_index,
                item: &self.items[source_index],
                x,
            });
            x = x.saturating_add(stride);
            slot += 1;
        }
        views
    }

    /// Resting offset (the committed position, not the animated one).
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    pub const fn is_locked(&self) -> bool {
        self.transition.is_some()
    }

    pub const fn phase(&self) -> Phase {
        if self.is_locked() {
            Phase::Transitioning
        } else {
            Phase::Idle
        }
    }

    /// Target offset of the in-flight transition.
    pub fn pending_offset(&self) -> Option<u64> {
        self.transition.map(|t| t.to)
    }

    /// Slot at the left edge of the strip.
    pub fn current_slot(&self) -> usize {
        usize::try_from(self.offset / self.config.item_width).unwrap_or(usize::MAX)
    }

    /// Logical position in `0..len()`.
    pub fn position(&self) -> usize {
        self.current_slot() % self.items.len()
    }

    /// Item at the left edge of the strip.
    pub fn current(&self) -> &T {
        &self.items[self.position()]
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Pairs with [`Carousel::len`]. Construction rejects empty lists, so
    /// this is false for every built carousel.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub const fn sequence(&self) -> &VirtualSequence {
        &self.sequence
    }

    pub const fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// First slot of the middle repetition.
    pub fn middle_start_index(&self) -> usize {
        (self.config.repeat_factor / 2) * self.sequence.source_len()
    }

    /// Offsets that need no rebase.
    pub fn safety_band(&self) -> RangeInclusive<u64> {
        let half = self.config.repeat_factor / 2;
        let low = half - self.config.tolerance;
        let high = half + self.config.tolerance;
        self.cycle_width() * low as u64..=self.cycle_width() * high as u64
    }

    /// How many rebases have happened since construction.
    pub const fn rebase_count(&self) -> u64 {
        self.rebase_count
    }

    fn start(&mut self, to: u64, now_ms: u64) -> AdvanceOutcome {
        self.transition = Some(Transition {
            from: self.offset,
            to,
            started_ms: now_ms,
        });
        tracing::trace!(from = self.offset, to, "carousel transition started");
        AdvanceOutcome::Started
    }

    fn finish_transition(&mut self, transition: Transition) -> Completion {
        self.offset = transition.to;
        let rebased = self.rebase();
        self.transition = None;
        Completion {
            offset: self.offset,
            rebased,
        }
    }

    fn slot_offset(&self, slot: usize) -> u64 {
        slot as u64 * self.config.item_width
    }

    fn cycle_width(&self) -> u64 {
        self.sequence.source_len() as u64 * self.config.item_width
    }
}

fn smoothstep(t: f64) -> f64 {
    t * t * (2.0f64.mul_add(-t, 3.0))
}

#[cfg(test)]
mod tests;
