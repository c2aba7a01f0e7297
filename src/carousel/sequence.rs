//! The repeated-copy slot list behind the carousel strip.

/// A read-only sequence made of the source list concatenated with itself
/// `repeat_factor` times.
///
/// Each slot stores the index of the source item it shows, so the
/// sequence never clones the items themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualSequence {
    slots: Vec<usize>,
    source_len: usize,
}

impl VirtualSequence {
    /// Build the sequence for `source_len` items repeated `repeat_factor` times.
    pub fn repeat(source_len: usize, repeat_factor: usize) -> Self {
        let slots = (0..repeat_factor)
            .flat_map(|_| 0..source_len)
            .collect::<Vec<_>>();
        Self { slots, source_len }
    }

    /// Total number of slots (`source_len * repeat_factor`).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Length of one repetition.
    pub const fn source_len(&self) -> usize {
        self.source_len
    }

    /// Source index shown in `slot`, if the slot exists.
    pub fn source_index(&self, slot: usize) -> Option<usize> {
        self.slots.get(slot).copied()
    }
}
