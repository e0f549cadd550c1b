// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! AssignPredicate - gives each participant a recipient, in search order.
//!
//! Round `r` handles the participant at search position `r`. Its choices are
//! that participant's candidate list, tried in the stored (shuffled) order.
//! A candidate someone earlier already drew is skipped. Round `n` means
//! everyone has a recipient and the predicate succeeds.

use crate::context::SearchContext;
use crate::engine::{Predicate, PredicateResult};
use crate::state::Counters;

#[derive(Debug)]
pub struct AssignPredicate;

impl Predicate for AssignPredicate {
    fn try_pred(&mut self, ctx: &mut SearchContext, round: usize) -> PredicateResult {
        if round == ctx.participants() {
            return PredicateResult::Success;
        }

        match ctx.memo.candidates(round).len() {
            0 => {
                ctx.statistics.increment_counter(Counters::DeadEnds);
                PredicateResult::Failure
            }
            n => PredicateResult::Choices(n),
        }
    }

    fn retry_pred(
        &mut self,
        ctx: &mut SearchContext,
        round: usize,
        choice: usize,
    ) -> PredicateResult {
        let recipient = ctx.memo.candidates(round)[choice];

        if ctx.is_taken(recipient) {
            ctx.statistics.increment_counter(Counters::Conflicts);
            return PredicateResult::Failure;
        }

        ctx.assign(round, recipient);
        ctx.statistics.increment_counter(Counters::TentativePicks);
        PredicateResult::SuccessSamePredicate
    }

    fn name(&self) -> &str {
        "Assign"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidates::CandidateTable;
    use crate::engine::EngineBuilder;
    use crate::predicates::SuspendPredicate;

    fn table(lists: Vec<Vec<usize>>) -> CandidateTable {
        let names = (0..lists.len()).map(|i| format!("P{}", i).as_str().into()).collect();
        CandidateTable::from_parts(names, lists)
    }

    fn solve(table: CandidateTable) -> (Option<Vec<usize>>, SearchContext) {
        let mut ctx = SearchContext::new(table);
        let engine = EngineBuilder::new()
            .add(Box::new(AssignPredicate))
            .terminal(Box::new(SuspendPredicate))
            .build();
        let found = engine.search(&mut ctx).map(|_| {
            (0..ctx.participants())
                .map(|p| ctx.recipient(p).unwrap())
                .collect()
        });
        (found, ctx)
    }

    #[test]
    fn test_try_pred_offers_candidates() {
        let mut ctx = SearchContext::new(table(vec![vec![1, 2], vec![0], vec![]]));
        let mut pred = AssignPredicate;
        assert_eq!(pred.try_pred(&mut ctx, 0), PredicateResult::Choices(2));
        assert_eq!(pred.try_pred(&mut ctx, 1), PredicateResult::Choices(1));
        assert_eq!(pred.try_pred(&mut ctx, 2), PredicateResult::Failure);
        assert_eq!(pred.try_pred(&mut ctx, 3), PredicateResult::Success);
        assert_eq!(ctx.statistics.get(Counters::DeadEnds), 1);
    }

    #[test]
    fn test_retry_pred_skips_taken_recipient() {
        let mut ctx = SearchContext::new(table(vec![vec![1], vec![1, 0]]));
        let mut pred = AssignPredicate;
        ctx.assign(0, 1);
        assert_eq!(pred.retry_pred(&mut ctx, 1, 0), PredicateResult::Failure);
        assert_eq!(pred.retry_pred(&mut ctx, 1, 1), PredicateResult::SuccessSamePredicate);
        assert_eq!(ctx.recipient(1), Some(0));
        assert_eq!(ctx.statistics.get(Counters::Conflicts), 1);
    }

    #[test]
    fn test_first_choice_wins_without_conflict() {
        let (found, ctx) = solve(table(vec![vec![1, 2], vec![2, 0], vec![0, 1]]));
        assert_eq!(found, Some(vec![1, 2, 0]));
        assert_eq!(ctx.statistics.get(Counters::TentativePicks), 3);
        assert_eq!(ctx.statistics.get(Counters::Conflicts), 0);
    }

    #[test]
    fn test_backtracks_out_of_dead_branch() {
        // P0=2 forces P1=0, which leaves P2 (only option 0) stuck.
        // Backtracking to P0 gives P0=1, P1=2, P2=0.
        let (found, ctx) = solve(table(vec![vec![2, 1], vec![2, 0], vec![0]]));
        assert_eq!(found, Some(vec![1, 2, 0]));
        assert!(ctx.statistics.get(Counters::Conflicts) >= 2);
        // Nothing from abandoned branches survives on the trail
        assert_eq!(ctx.trail.len(), 6);
    }

    #[test]
    fn test_unsolvable_leaves_state_clean() {
        let (found, ctx) = solve(table(vec![vec![1], vec![1]]));
        assert_eq!(found, None);
        assert_eq!(ctx.assigned_count(), 0);
        assert!(ctx.trail.is_empty());
    }
}
