// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Mutable search state (the partial assignment).

use crate::trail::Slot;

/// Marker for a search position that has no recipient yet.
pub const UNASSIGNED: u64 = u64::MAX;

/// Mutable search state.
///
/// Both vectors are indexed by search position. Every write goes through
/// [`SearchContext`](super::SearchContext) so that it lands on the trail.
///
/// Values are stored as `u64` to fit the trail's record format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamicState {
    /// `recipients[p]` is the position assigned to `p`, or [`UNASSIGNED`].
    pub recipients: Vec<u64>,

    /// `taken[r]` is 1 while position `r` is somebody's recipient.
    pub taken: Vec<u64>,
}

impl DynamicState {
    /// Empty partial assignment for `participants` people.
    pub fn new(participants: usize) -> Self {
        Self {
            recipients: vec![UNASSIGNED; participants],
            taken: vec![0; participants],
        }
    }

    pub(crate) fn slot_mut(&mut self, slot: Slot) -> &mut u64 {
        match slot {
            Slot::Recipient(position) => &mut self.recipients[position],
            Slot::Taken(position) => &mut self.taken[position],
        }
    }
}
