// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Completed assignments and the matcher that produces them.

pub mod matcher;

pub use matcher::{find_assignment, search_candidates, Matcher, SearchReport};

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::context::SearchContext;
use crate::roster::{Participant, Roster};

/// One giver and the person they buy for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pair {
    pub giver: Participant,
    pub recipient: Participant,
}

/// A complete participant-to-recipient mapping, in search order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Assignment {
    pairs: Vec<Pair>,
}

/// Ways an assignment can break the matching rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("{0} is assigned to themselves")]
    SelfAssigned(Participant),
    #[error("{giver} is assigned excluded recipient {recipient}")]
    Excluded {
        giver: Participant,
        recipient: Participant,
    },
    #[error("{0} is the recipient of more than one giver")]
    SharedRecipient(Participant),
    #[error("{0} has no recipient")]
    Missing(Participant),
    #[error("{0} is not on the roster")]
    Unknown(Participant),
}

impl Assignment {
    pub fn new(pairs: Vec<Pair>) -> Self {
        Self { pairs }
    }

    /// Read a finished assignment out of a search context.
    ///
    /// Returns `None` while any participant is still unassigned.
    pub fn from_context(ctx: &SearchContext) -> Option<Self> {
        let pairs = (0..ctx.participants())
            .map(|giver| {
                ctx.recipient(giver).map(|recipient| Pair {
                    giver: ctx.memo.participant(giver).clone(),
                    recipient: ctx.memo.participant(recipient).clone(),
                })
            })
            .collect::<Option<Vec<_>>>()?;
        Some(Self { pairs })
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pair> {
        self.pairs.iter()
    }

    pub fn recipient_of(&self, giver: &str) -> Option<&Participant> {
        self.pairs
            .iter()
            .find(|pair| pair.giver.as_str() == giver)
            .map(|pair| &pair.recipient)
    }

    /// Check the assignment against `roster`.
    ///
    /// Valid means: every roster participant gives exactly once, nobody draws
    /// themselves or an excluded name, and no two givers share a recipient.
    pub fn check(&self, roster: &Roster) -> Result<(), Violation> {
        let mut recipients = HashSet::new();
        for pair in &self.pairs {
            let entry = roster
                .find(pair.giver.as_str())
                .ok_or_else(|| Violation::Unknown(pair.giver.clone()))?;
            if roster.find(pair.recipient.as_str()).is_none() {
                return Err(Violation::Unknown(pair.recipient.clone()));
            }
            if pair.giver == pair.recipient {
                return Err(Violation::SelfAssigned(pair.giver.clone()));
            }
            if entry.excludes(&pair.recipient) {
                return Err(Violation::Excluded {
                    giver: pair.giver.clone(),
                    recipient: pair.recipient.clone(),
                });
            }
            if !recipients.insert(&pair.recipient) {
                return Err(Violation::SharedRecipient(pair.recipient.clone()));
            }
        }

        for participant in roster.participants() {
            if self.recipient_of(participant.as_str()).is_none() {
                return Err(Violation::Missing(participant.clone()));
            }
        }
        Ok(())
    }
}

/// One `giver -> recipient` line per pair.
impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for pair in &self.pairs {
            writeln!(f, "{} -> {}", pair.giver, pair.recipient)?;
        }
        Ok(())
    }
}
