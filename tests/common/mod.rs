// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Common test utilities shared across integration tests.

#![allow(dead_code)]

use secret_santa::{Assignment, Roster};

/// Build a roster from `(participant, excluded names)` rows.
pub fn roster(rows: &[(&str, &[&str])]) -> Roster {
    rows.iter().fold(Roster::new(), |roster, (name, excluded)| {
        roster.with(*name, excluded.iter().copied())
    })
}

/// Panic with a readable message unless `assignment` is valid for `roster`.
pub fn assert_valid(roster: &Roster, assignment: &Assignment) {
    if let Err(violation) = assignment.check(roster) {
        panic!("invalid assignment ({violation}):\n{assignment}");
    }
    assert_eq!(assignment.len(), roster.len());
}

/// Four couples; nobody may draw their partner.
pub fn couples() -> Roster {
    Roster::parse(
        "Ann Bill\nBill Ann\n\
         Cat Dan\nDan Cat\n\
         Eve Fred\nFred Eve\n\
         Gina Hal\nHal Gina\n",
    )
}
