// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Participants and their exclusion lists.
//!
//! A [`Roster`] is the input handed to the matcher: an ordered list of
//! participants, each with the set of names they must never be assigned to.
//!
//! # Text format
//!
//! One participant per line. The first whitespace-separated token is the
//! participant, every following token is a name that participant must not
//! draw:
//!
//! ```text
//! # Amy never draws Bob
//! Amy Bob
//! Bob
//! Carol Amy Dan
//! Dan
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::io::Read;

use serde::Serialize;
use tracing::warn;

use crate::error::RosterError;

/// An opaque participant identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Participant(String);

impl Participant {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Participant {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// One roster line: a participant and the names they may not be assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub participant: Participant,
    pub excluded: BTreeSet<Participant>,
}

impl Entry {
    /// Whether `candidate` is on this participant's exclusion list.
    pub fn excludes(&self, candidate: &Participant) -> bool {
        self.excluded.contains(candidate)
    }
}

/// Ordered participant list with per-participant exclusions.
///
/// Names are expected to be unique. The roster does not enforce this; the
/// matcher treats participants with equal names as the same person when
/// filtering self-assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    entries: Vec<Entry>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a participant with the given exclusions.
    ///
    /// Adding the same name twice adds a second entry.
    pub fn add<I, S>(&mut self, participant: impl Into<Participant>, excluded: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Participant>,
    {
        self.entries.push(Entry {
            participant: participant.into(),
            excluded: excluded.into_iter().map(Into::into).collect(),
        });
        self
    }

    /// Builder-style variant of [`Roster::add`].
    pub fn with<I, S>(mut self, participant: impl Into<Participant>, excluded: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Participant>,
    {
        self.add(participant, excluded);
        self
    }

    /// Parse the line-oriented text format described in the module docs.
    pub fn parse(text: &str) -> Self {
        let mut roster = Roster::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut names = line.split_whitespace();
            if let Some(participant) = names.next() {
                roster.add(participant, names);
            }
        }
        roster
    }

    /// Read and parse a roster from any reader.
    pub fn from_reader(mut reader: impl Read) -> Result<Self, RosterError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(Self::parse(&text))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, index: usize) -> &Entry {
        &self.entries[index]
    }

    pub fn participants(&self) -> impl Iterator<Item = &Participant> {
        self.entries.iter().map(|entry| &entry.participant)
    }

    /// Find the entry for a participant by name.
    pub fn find(&self, name: &str) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.participant.as_str() == name)
    }

    /// Exclusions that name nobody on the roster, as `(participant, unknown name)`.
    ///
    /// These are harmless to the search; they simply never match.
    pub fn unknown_exclusions(&self) -> Vec<(&Participant, &Participant)> {
        let known: HashSet<&Participant> = self.participants().collect();
        let known = &known;
        self.entries
            .iter()
            .flat_map(move |entry| {
                entry
                    .excluded
                    .iter()
                    .filter(move |name| !known.contains(*name))
                    .map(move |name| (&entry.participant, name))
            })
            .collect()
    }

    /// Names that appear more than once, in first-seen order.
    pub fn duplicates(&self) -> Vec<&Participant> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        self.participants()
            .filter(|name| !seen.insert(*name) && reported.insert(*name))
            .collect()
    }

    /// Log roster problems that do not stop matching.
    pub fn warn_suspicious(&self) {
        for name in self.duplicates() {
            warn!(participant = %name, "participant listed more than once");
        }
        for (participant, name) in self.unknown_exclusions() {
            warn!(%participant, excluded = %name, "exclusion names an unknown participant");
        }
    }
}
