// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search context combining the candidate table and the dynamic state.
//!
//! The SearchContext is the data passed through the engine:
//! - the immutable [`CandidateTable`], built before the search starts
//! - the mutable partial assignment, with every write recorded on the trail
//! - per-search statistics
//!
//! Contexts are independent of one another, so separate attempts (or
//! separate threads) each build their own.

pub mod dynamic;

pub use dynamic::{DynamicState, UNASSIGNED};

use crate::candidates::CandidateTable;
use crate::state::statistics::Statistics;
use crate::trail::{Slot, Trail};

/// Search context combining immutable and dynamic state.
///
/// ```text
/// SearchContext {
///     memo: CandidateTable,   // immutable, built once
///     trail: Trail,           // undo records
///     state: DynamicState,    // partial assignment
/// }
/// ```
///
/// # Example
///
/// ```
/// use secret_santa::candidates::CandidateTable;
/// use secret_santa::context::SearchContext;
///
/// let table = CandidateTable::from_parts(
///     vec!["A".into(), "B".into()],
///     vec![vec![1], vec![0]],
/// );
/// let mut ctx = SearchContext::new(table);
/// let checkpoint = ctx.trail.checkpoint();
/// ctx.assign(0, 1);
/// assert!(ctx.is_taken(1));
///
/// ctx.rewind_to(checkpoint);
/// assert!(!ctx.is_taken(1));
/// assert_eq!(ctx.recipient(0), None);
/// ```
#[derive(Debug)]
pub struct SearchContext {
    /// Immutable candidate table.
    pub memo: CandidateTable,
    /// Undo records for `state`.
    pub trail: Trail,
    /// Partial assignment.
    pub state: DynamicState,
    /// Counters for this search.
    pub statistics: Statistics,
}

impl SearchContext {
    pub fn new(memo: CandidateTable) -> Self {
        let participants = memo.len();
        Self {
            memo,
            // Each assignment writes two slots.
            trail: Trail::with_capacity(2 * participants),
            state: DynamicState::new(participants),
            statistics: Statistics::new(),
        }
    }

    /// Number of participants being matched.
    pub fn participants(&self) -> usize {
        self.memo.len()
    }

    /// Assign `recipient` to the participant at `position`, trailing both writes.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn assign(&mut self, position: usize, recipient: usize) {
        self.set(Slot::Recipient(position), recipient as u64);
        self.set(Slot::Taken(recipient), 1);
    }

    /// Whether the participant at `position` is already someone's recipient.
    pub fn is_taken(&self, position: usize) -> bool {
        self.state.taken[position] != 0
    }

    /// Recipient assigned to `position`, if any.
    pub fn recipient(&self, position: usize) -> Option<usize> {
        match self.state.recipients[position] {
            UNASSIGNED => None,
            value => Some(value as usize),
        }
    }

    /// Number of positions holding a recipient.
    pub fn assigned_count(&self) -> usize {
        self.state
            .recipients
            .iter()
            .filter(|&&value| value != UNASSIGNED)
            .count()
    }

    /// Undo every write made since `checkpoint`.
    pub fn rewind_to(&mut self, checkpoint: usize) {
        for entry in self.trail.rewind_to(checkpoint) {
            *self.state.slot_mut(entry.slot) = entry.old_value;
        }
    }

    fn set(&mut self, slot: Slot, value: u64) {
        let target = self.state.slot_mut(slot);
        let old_value = *target;
        *target = value;
        self.trail.record_change(slot, old_value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_way() -> SearchContext {
        SearchContext::new(CandidateTable::from_parts(
            vec!["A".into(), "B".into(), "C".into()],
            vec![vec![1, 2], vec![0, 2], vec![0, 1]],
        ))
    }

    #[test]
    fn test_search_context_new() {
        let ctx = three_way();
        assert_eq!(ctx.participants(), 3);
        assert!(ctx.trail.is_empty());
        assert_eq!(ctx.assigned_count(), 0);
        assert!((0..3).all(|p| !ctx.is_taken(p) && ctx.recipient(p).is_none()));
    }

    #[test]
    fn test_assign_records_two_entries() {
        let mut ctx = three_way();
        ctx.assign(0, 2);
        assert_eq!(ctx.trail.len(), 2);
        assert_eq!(ctx.recipient(0), Some(2));
        assert!(ctx.is_taken(2));
        assert_eq!(ctx.assigned_count(), 1);
    }

    #[test]
    fn test_nested_rewind_restores_each_level() {
        let mut ctx = three_way();
        let cp1 = ctx.trail.checkpoint();
        ctx.assign(0, 1);
        let cp2 = ctx.trail.checkpoint();
        ctx.assign(1, 2);
        ctx.assign(2, 0);
        assert_eq!(ctx.assigned_count(), 3);

        ctx.rewind_to(cp2);
        assert_eq!(ctx.recipient(0), Some(1));
        assert_eq!(ctx.recipient(1), None);
        assert!(!ctx.is_taken(2));
        assert!(!ctx.is_taken(0));

        ctx.rewind_to(cp1);
        assert_eq!(ctx.state, DynamicState::new(3));
    }
}
