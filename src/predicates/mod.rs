// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Search predicates.
//!
//! - `assign`: AssignPredicate, one round per participant
//! - Built-in terminals: `FailPredicate`, `SuspendPredicate`

pub mod assign;

pub use assign::AssignPredicate;

use crate::context::SearchContext;
use crate::engine::{Predicate, PredicateResult, TerminalPredicate};

/// Built-in fail predicate (Prolog's `fail.`).
///
/// Always fails, forcing backtracking. Ending a program with it makes the
/// engine explore every alternative and then report exhaustion.
#[derive(Debug)]
pub struct FailPredicate;

impl Predicate for FailPredicate {
    fn try_pred(&mut self, _ctx: &mut SearchContext, _round: usize) -> PredicateResult {
        PredicateResult::Failure
    }

    fn name(&self) -> &str {
        "Fail"
    }
}

impl TerminalPredicate for FailPredicate {}

/// Suspends the engine, leaving the solution in the context.
#[derive(Debug)]
pub struct SuspendPredicate;

impl Predicate for SuspendPredicate {
    fn try_pred(&mut self, _ctx: &mut SearchContext, _round: usize) -> PredicateResult {
        PredicateResult::Suspend
    }

    fn name(&self) -> &str {
        "Suspend"
    }
}

impl TerminalPredicate for SuspendPredicate {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::CandidateTable;

    #[test]
    fn test_terminals() {
        let mut ctx = SearchContext::new(CandidateTable::from_parts(vec![], vec![]));
        assert_eq!(FailPredicate.try_pred(&mut ctx, 0), PredicateResult::Failure);
        assert_eq!(SuspendPredicate.try_pred(&mut ctx, 0), PredicateResult::Suspend);
    }
}
