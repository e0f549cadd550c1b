// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Trail-based backtracking.
//!
//! Every write to trailed search state first records the slot and its old
//! value here. Backtracking is then an explicit step: rewind to a checkpoint
//! and each recorded write is undone, newest first.
//!
//! The trail itself only stores records. Applying them is the job of the
//! owner of the state (see [`SearchContext::rewind_to`]).
//!
//! [`SearchContext::rewind_to`]: crate::context::SearchContext::rewind_to

/// A trailed location in the dynamic search state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Recipient chosen for the participant at this search position.
    Recipient(usize),
    /// Whether the participant at this position is already someone's recipient.
    Taken(usize),
}

/// A single entry in the trail, recording one state change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrailEntry {
    pub slot: Slot,
    /// The value before the change.
    pub old_value: u64,
}

/// The trail of undoable writes.
///
/// A checkpoint is just the trail length at some moment; rewinding to it
/// yields every entry recorded since.
#[derive(Debug, Default)]
pub struct Trail {
    entries: Vec<TrailEntry>,
}

impl Trail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a trail with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Current position, for a later [`Trail::rewind_to`].
    pub fn checkpoint(&self) -> usize {
        self.entries.len()
    }

    /// Record that `slot` held `old_value` before being overwritten.
    pub fn record_change(&mut self, slot: Slot, old_value: u64) {
        self.entries.push(TrailEntry { slot, old_value });
    }

    /// Remove every entry recorded after `checkpoint`, newest first.
    ///
    /// The caller must write each `old_value` back into its slot. Rewinding to
    /// a checkpoint at or beyond the current length yields nothing.
    pub fn rewind_to(&mut self, checkpoint: usize) -> impl Iterator<Item = TrailEntry> + '_ {
        let start = checkpoint.min(self.entries.len());
        self.entries.drain(start..).rev()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trail_new() {
        let trail = Trail::new();
        assert_eq!(trail.len(), 0);
        assert_eq!(trail.checkpoint(), 0);
        assert!(trail.is_empty());
    }

    #[test]
    fn test_rewind_yields_newest_first() {
        let mut trail = Trail::new();
        trail.record_change(Slot::Recipient(0), 10);

        let checkpoint = trail.checkpoint();
        assert_eq!(checkpoint, 1);

        trail.record_change(Slot::Recipient(1), 20);
        trail.record_change(Slot::Taken(3), 0);

        let undone: Vec<_> = trail.rewind_to(checkpoint).collect();
        assert_eq!(
            undone,
            vec![
                TrailEntry { slot: Slot::Taken(3), old_value: 0 },
                TrailEntry { slot: Slot::Recipient(1), old_value: 20 },
            ]
        );
        assert_eq!(trail.len(), 1);
    }

    #[test]
    fn test_nested_checkpoints() {
        let mut trail = Trail::new();
        let outer = trail.checkpoint();
        trail.record_change(Slot::Taken(0), 0);
        let inner = trail.checkpoint();
        trail.record_change(Slot::Taken(1), 0);

        assert_eq!(trail.rewind_to(inner).count(), 1);
        assert_eq!(trail.len(), 1);
        assert_eq!(trail.rewind_to(outer).count(), 1);
        assert!(trail.is_empty());
    }

    #[test]
    fn test_rewind_past_end_is_noop() {
        let mut trail = Trail::new();
        trail.record_change(Slot::Taken(0), 0);
        assert_eq!(trail.rewind_to(5).count(), 0);
        assert_eq!(trail.len(), 1);
    }
}
