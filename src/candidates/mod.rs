// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Candidate lists for every participant.
//!
//! This is the immutable half of a search: it is computed once, before the
//! engine starts, and only read afterwards.
//!
//! Building a table does two shuffles with the same [`OrderSource`]:
//!
//! 1. The roster is permuted once. That permutation is the search order, and
//!    every index in the table refers to a position in it.
//! 2. Each participant's eligible recipients (everyone except themselves and
//!    their exclusions) are permuted independently. The search tries them in
//!    that order and never reshuffles.

use crate::order::OrderSource;
use crate::roster::{Participant, Roster};

/// Search order plus, for each position, the shuffled eligible recipients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateTable {
    /// Participants in search order.
    participants: Vec<Participant>,

    /// `candidates[p]` lists positions eligible as recipient for position `p`.
    candidates: Vec<Vec<usize>>,
}

impl CandidateTable {
    /// Shuffle the roster into search order and build every candidate list.
    pub fn build(roster: &Roster, order: &mut impl OrderSource) -> Self {
        let mut search_order: Vec<usize> = (0..roster.len()).collect();
        order.shuffle(&mut search_order);

        let participants: Vec<Participant> = search_order
            .iter()
            .map(|&index| roster.entry(index).participant.clone())
            .collect();

        let candidates = search_order
            .iter()
            .map(|&index| {
                let entry = roster.entry(index);
                let mut eligible: Vec<usize> = participants
                    .iter()
                    .enumerate()
                    .filter(|(_, name)| **name != entry.participant && !entry.excludes(name))
                    .map(|(position, _)| position)
                    .collect();
                order.shuffle(&mut eligible);
                eligible
            })
            .collect();

        Self {
            participants,
            candidates,
        }
    }

    /// Build a table from an explicit search order and candidate lists.
    ///
    /// No filtering or shuffling happens; the lists are used exactly as given.
    ///
    /// # Panics
    ///
    /// Panics if the two vectors differ in length or a candidate index is out
    /// of range.
    pub fn from_parts(participants: Vec<Participant>, candidates: Vec<Vec<usize>>) -> Self {
        assert_eq!(
            participants.len(),
            candidates.len(),
            "every participant needs a candidate list"
        );
        assert!(
            candidates.iter().flatten().all(|&c| c < participants.len()),
            "candidate index out of range"
        );
        Self {
            participants,
            candidates,
        }
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    /// Participants in search order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant(&self, position: usize) -> &Participant {
        &self.participants[position]
    }

    /// Eligible recipient positions for the participant at `position`.
    pub fn candidates(&self, position: usize) -> &[usize] {
        &self.candidates[position]
    }

    /// Positions whose candidate list is empty. Any such position makes the
    /// search fail.
    pub fn stranded(&self) -> impl Iterator<Item = usize> + '_ {
        self.candidates
            .iter()
            .enumerate()
            .filter(|(_, list)| list.is_empty())
            .map(|(position, _)| position)
    }
}
