// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Non-deterministic search engine.
//!
//! This module implements a backtracking search engine that runs predicates
//! in sequence. Backtracking is explicit: the engine keeps its own stack and
//! rewinds the context's trail, so search depth is not limited by the call
//! stack.
//!
//! # Architecture
//!
//! Each stack entry tracks:
//! - Which predicate is executing
//! - Current round number (for predicates that execute multiple times)
//! - Choice mode state (whether we're trying alternatives)
//! - Current choice index and number of choices
//! - Trail checkpoint to rewind to before each attempt
//!
//! Execution model:
//! 1. Call try_pred(round) on the predicate of the top entry
//! 2. If Success: push an entry for the next predicate
//! 3. If SuccessSamePredicate: push an entry for the same predicate, next round
//!
//! Either success from try_pred leaves no alternatives, so backtracking into
//! that entry pops it.
//! 4. If Choices(n): enter choice mode, call retry_pred(round, 0..n-1) in turn
//! 5. If Failure: pop the entry (backtrack)
//! 6. If Suspend: pause and return control to caller
//!
//! # Example
//!
//! ```
//! use secret_santa::candidates::CandidateTable;
//! use secret_santa::context::SearchContext;
//! use secret_santa::engine::EngineBuilder;
//! use secret_santa::predicates::{AssignPredicate, SuspendPredicate};
//!
//! let table = CandidateTable::from_parts(
//!     vec!["A".into(), "B".into()],
//!     vec![vec![1], vec![0]],
//! );
//! let mut ctx = SearchContext::new(table);
//! let engine = EngineBuilder::new()
//!     .add(Box::new(AssignPredicate))
//!     .terminal(Box::new(SuspendPredicate))
//!     .build();
//!
//! // Engine is consumed, returns Some(engine) if suspended
//! assert!(engine.search(&mut ctx).is_some());
//! assert_eq!(ctx.recipient(0), Some(1));
//! ```

pub mod predicate;

pub use predicate::{Predicate, PredicateResult, TerminalPredicate};

use tracing::{debug, warn};

use crate::context::SearchContext;
use crate::state::Counters;

/// Stack entry tracking the state of one predicate execution.
#[derive(Debug)]
struct StackEntry {
    /// Index of the predicate in the predicates list.
    predicate_index: usize,

    /// Current round number (incremented by SuccessSamePredicate).
    round: usize,

    /// Whether we're in choice mode (exploring alternatives).
    in_choice_mode: bool,

    /// Next choice to try (when in_choice_mode is true).
    current_choice: usize,

    /// Total number of choices (when in_choice_mode is true).
    num_choices: usize,

    /// Trail checkpoint for this stack entry.
    trail_checkpoint: usize,
}

impl StackEntry {
    fn new(predicate_index: usize, round: usize, trail_checkpoint: usize) -> Self {
        Self {
            predicate_index,
            round,
            in_choice_mode: false,
            current_choice: 0,
            num_choices: 0,
            trail_checkpoint,
        }
    }
}

/// Builds an engine program, which must end in a terminal predicate.
#[derive(Debug, Default)]
pub struct EngineBuilder {
    predicates: Vec<Box<dyn Predicate>>,
    terminated: bool,
    step_limit: Option<u64>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a predicate to the program.
    pub fn add(mut self, predicate: Box<dyn Predicate>) -> Self {
        assert!(!self.terminated, "cannot add predicates after the terminal predicate");
        self.predicates.push(predicate);
        self
    }

    /// Append the terminal predicate that ends the program.
    pub fn terminal<T: TerminalPredicate + 'static>(mut self, predicate: Box<T>) -> Self {
        assert!(!self.terminated, "program already has a terminal predicate");
        self.predicates.push(predicate);
        self.terminated = true;
        self
    }

    /// Abandon the search after this many predicate calls.
    ///
    /// The terminal predicate is not subject to the limit.
    pub fn step_limit(mut self, limit: Option<u64>) -> Self {
        self.step_limit = limit;
        self
    }

    /// # Panics
    ///
    /// Panics if no terminal predicate was given.
    pub fn build(self) -> SearchEngine {
        assert!(self.terminated, "engine program must end with a terminal predicate");
        let mut engine = SearchEngine::new(self.predicates);
        engine.step_limit = self.step_limit;
        engine
    }
}

/// Search engine that coordinates predicate execution and backtracking.
pub struct SearchEngine {
    /// List of predicates to execute in sequence.
    predicates: Vec<Box<dyn Predicate>>,

    /// Stack of predicate execution states.
    stack: Vec<StackEntry>,

    /// Statistics: number of try_pred calls.
    try_count: u64,

    /// Statistics: number of retry_pred calls.
    retry_count: u64,

    /// Maximum number of try_pred + retry_pred calls per search.
    step_limit: Option<u64>,
}

impl SearchEngine {
    /// Create a new search engine with the given predicates.
    ///
    /// Prefer [`EngineBuilder`], which checks the program ends with a
    /// terminal predicate.
    pub fn new(predicates: Vec<Box<dyn Predicate>>) -> Self {
        Self {
            predicates,
            stack: Vec::new(),
            try_count: 0,
            retry_count: 0,
            step_limit: None,
        }
    }

    /// Run the search to find one solution.
    ///
    /// Consumes the engine and returns:
    /// - `Some(engine)` if suspended; the solution is the state of `ctx`
    /// - `None` if exhausted (backtracked past the first predicate) or if the
    ///   step limit was reached, which is also counted in `ctx.statistics`
    ///
    /// # Panics
    ///
    /// Panics if the predicate sequence is invalid (reaches the end without
    /// failing or suspending), or if `retry_pred` returns `Choices`/`Suspend`.
    pub fn search(mut self, ctx: &mut SearchContext) -> Option<Self> {
        self.stack.clear();
        self.try_count = 0;
        self.retry_count = 0;

        if self.predicates.is_empty() {
            return None;
        }

        self.stack.push(StackEntry::new(0, 0, ctx.trail.checkpoint()));

        loop {
            if self.stack.is_empty() {
                debug!(
                    tries = self.try_count,
                    retries = self.retry_count,
                    "search exhausted"
                );
                return None;
            }

            // The terminal step always runs so a finished search is not lost
            let at_terminal = self
                .stack
                .last()
                .is_some_and(|top| top.predicate_index + 1 == self.predicates.len());

            if let (Some(limit), false) = (self.step_limit, at_terminal) {
                if self.try_count + self.retry_count >= limit {
                    warn!(limit, depth = self.stack.len(), "search step limit reached");
                    ctx.statistics.increment_counter(Counters::StepLimitAborts);
                    return None;
                }
            }

            let Some(entry) = self.stack.last_mut() else {
                return None;
            };

            // Undo anything a previous attempt at this entry wrote
            ctx.rewind_to(entry.trail_checkpoint);

            if !entry.in_choice_mode {
                let pred_idx = entry.predicate_index;
                let round = entry.round;
                self.try_count += 1;
                let result = self.predicates[pred_idx].try_pred(ctx, round);

                match result {
                    PredicateResult::Success => {
                        self.close_top();
                        self.push_next_predicate(ctx);
                    }
                    PredicateResult::SuccessSamePredicate => {
                        self.close_top();
                        self.push_same_predicate(ctx);
                    }
                    PredicateResult::Failure => {
                        self.stack.pop();
                    }
                    PredicateResult::Choices(n) => {
                        if let Some(entry) = self.stack.last_mut() {
                            entry.in_choice_mode = true;
                            entry.current_choice = 0;
                            entry.num_choices = n;
                            entry.trail_checkpoint = ctx.trail.checkpoint();
                        }
                    }
                    PredicateResult::Suspend => return Some(self),
                }
            } else {
                if entry.current_choice >= entry.num_choices {
                    self.stack.pop();
                    continue;
                }

                let pred_idx = entry.predicate_index;
                let round = entry.round;
                let choice = entry.current_choice;
                entry.current_choice += 1;
                self.retry_count += 1;
                let result = self.predicates[pred_idx].retry_pred(ctx, round, choice);

                match result {
                    PredicateResult::Success => self.push_next_predicate(ctx),
                    PredicateResult::SuccessSamePredicate => self.push_same_predicate(ctx),
                    PredicateResult::Failure => {
                        // Try next choice (loop continues)
                    }
                    PredicateResult::Choices(_) | PredicateResult::Suspend => {
                        panic!("retry_pred returned invalid result: {:?}", result);
                    }
                }
            }
        }
    }

    /// A deterministic success has no alternatives: leave the top entry in
    /// choice mode with nothing left, so backtracking into it pops it.
    fn close_top(&mut self) {
        if let Some(entry) = self.stack.last_mut() {
            entry.in_choice_mode = true;
            entry.current_choice = 0;
            entry.num_choices = 0;
        }
    }

    /// Push a new stack entry for the next predicate in sequence.
    ///
    /// Panics if we've reached the end of the predicate sequence; every valid
    /// program ends with a failing or suspending predicate.
    fn push_next_predicate(&mut self, ctx: &SearchContext) {
        let Some(current) = self.stack.last() else {
            return;
        };
        let next_index = current.predicate_index + 1;

        if next_index >= self.predicates.len() {
            panic!(
                "Invalid predicate sequence: reached end without FAIL or SUSPEND. \
                 Engine programs must terminate with a terminal predicate."
            );
        }

        self.stack
            .push(StackEntry::new(next_index, 0, ctx.trail.checkpoint()));
    }

    /// Push a new stack entry for the same predicate with incremented round.
    fn push_same_predicate(&mut self, ctx: &SearchContext) {
        let Some(current) = self.stack.last() else {
            return;
        };
        let entry = StackEntry::new(current.predicate_index, current.round + 1, ctx.trail.checkpoint());
        self.stack.push(entry);
    }

    /// Returns (try_count, retry_count): how many times predicates were
    /// tried and retried in the last search.
    pub fn statistics(&self) -> (u64, u64) {
        (self.try_count, self.retry_count)
    }

    /// Current depth of the predicate stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}
