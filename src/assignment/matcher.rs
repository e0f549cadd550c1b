// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Running the assignment search.
//!
//! [`search_candidates`] runs one search over one candidate table.
//! [`Matcher`] wraps it with the input check and the retry policy: it builds
//! a fresh table per attempt and stops at the first success.

use tracing::{debug, info};

use crate::candidates::CandidateTable;
use crate::config::MatchConfig;
use crate::context::SearchContext;
use crate::engine::{EngineBuilder, SearchEngine};
use crate::error::MatchError;
use crate::order::OrderSource;
use crate::predicates::{AssignPredicate, SuspendPredicate};
use crate::roster::Roster;
use crate::state::{Counters, Statistics};

use super::Assignment;

/// Outcome of searching a single candidate table.
#[derive(Debug, Clone)]
pub struct SearchReport {
    /// The first complete assignment found, if any.
    pub assignment: Option<Assignment>,
    /// Counters collected during the search.
    pub statistics: Statistics,
    /// `(try_pred, retry_pred)` calls, known only when the search succeeded.
    pub steps: Option<(u64, u64)>,
}

impl SearchReport {
    /// Whether the search stopped at the step cap rather than running out of options.
    pub fn aborted(&self) -> bool {
        self.statistics.get(Counters::StepLimitAborts) > 0
    }
}

/// The engine program for one assignment search.
fn assignment_program(step_limit: Option<u64>) -> SearchEngine {
    EngineBuilder::new()
        .add(Box::new(AssignPredicate))
        .add(Statistics::counting_predicate(Counters::Solutions, None))
        .terminal(Box::new(SuspendPredicate))
        .step_limit(step_limit)
        .build()
}

/// Search one candidate table depth-first, stopping at the first complete
/// assignment.
///
/// Participants are handled in the table's order and each tries its
/// candidates in the stored order. Nothing is reshuffled.
pub fn search_candidates(table: CandidateTable, step_limit: Option<u64>) -> SearchReport {
    let mut ctx = SearchContext::new(table);
    let engine = assignment_program(step_limit);

    match engine.search(&mut ctx) {
        Some(engine) => SearchReport {
            assignment: Assignment::from_context(&ctx),
            statistics: ctx.statistics,
            steps: Some(engine.statistics()),
        },
        None => SearchReport {
            assignment: None,
            statistics: ctx.statistics,
            steps: None,
        },
    }
}

/// Finds assignments for rosters, reshuffling between attempts.
#[derive(Debug)]
pub struct Matcher<O: OrderSource> {
    order: O,
    config: MatchConfig,
}

impl<O: OrderSource> Matcher<O> {
    /// A matcher with the default, single-attempt configuration.
    pub fn new(order: O) -> Self {
        Self::with_config(order, MatchConfig::default())
    }

    pub fn with_config(order: O, config: MatchConfig) -> Self {
        Self { order, config }
    }

    /// Find one valid assignment for `roster`.
    ///
    /// Duplicate names and exclusions of unknown people are logged as warnings.
    ///
    /// # Errors
    ///
    /// - [`MatchError::DegenerateInput`] with fewer than two participants
    /// - [`MatchError::StepLimitExceeded`] if the last attempt hit the step cap
    /// - [`MatchError::NoAssignmentFound`] if every attempt was exhausted
    pub fn find(&mut self, roster: &Roster) -> Result<Assignment, MatchError> {
        roster.warn_suspicious();
        if roster.len() < 2 {
            return Err(MatchError::DegenerateInput {
                participants: roster.len(),
            });
        }

        let attempts = self.config.effective_attempts();
        let mut last_aborted = false;

        for attempt in 1..=attempts {
            let table = CandidateTable::build(roster, &mut self.order);
            debug!(
                attempt,
                participants = table.len(),
                stranded = table.stranded().count(),
                "searching for assignment"
            );

            let report = search_candidates(table, self.config.max_steps);
            let aborted = report.aborted();
            if let Some(assignment) = report.assignment {
                let (tries, retries) = report.steps.unwrap_or_default();
                info!(
                    attempt,
                    tries,
                    retries,
                    conflicts = report.statistics.get(Counters::Conflicts),
                    "assignment found"
                );
                return Ok(assignment);
            }

            last_aborted = aborted;
            debug!(attempt, aborted = last_aborted, "attempt failed");
        }

        match (last_aborted, self.config.max_steps) {
            (true, Some(limit)) => Err(MatchError::StepLimitExceeded { limit }),
            _ => Err(MatchError::NoAssignmentFound { attempts }),
        }
    }
}

/// Single-attempt convenience wrapper around [`Matcher`].
pub fn find_assignment(roster: &Roster, order: impl OrderSource) -> Result<Assignment, MatchError> {
    Matcher::new(order).find(roster)
}
