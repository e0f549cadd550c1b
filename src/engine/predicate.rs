// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Predicate trait for non-deterministic search.
//!
//! The search engine works by trying predicates in sequence. Each predicate
//! represents a choice point in the search space. Predicates can succeed,
//! fail, or offer a number of alternatives.
//!
//! # Example
//!
//! ```
//! use secret_santa::engine::{Predicate, PredicateResult};
//! use secret_santa::context::SearchContext;
//!
//! #[derive(Debug)]
//! struct CoinFlip;
//!
//! impl Predicate for CoinFlip {
//!     fn try_pred(&mut self, _ctx: &mut SearchContext, _round: usize) -> PredicateResult {
//!         // Two alternatives: heads, then tails
//!         PredicateResult::Choices(2)
//!     }
//!
//!     fn retry_pred(&mut self, _ctx: &mut SearchContext, _round: usize, choice: usize) -> PredicateResult {
//!         if choice < 2 {
//!             PredicateResult::Success
//!         } else {
//!             PredicateResult::Failure
//!         }
//!     }
//!
//!     fn name(&self) -> &str {
//!         "CoinFlip"
//!     }
//! }
//! ```

use crate::context::SearchContext;
use std::fmt::Debug;

/// Result of attempting a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredicateResult {
    /// Predicate succeeded. Move to next predicate in sequence.
    Success,

    /// Predicate succeeded but stay at same predicate with next round.
    /// Lets a single predicate run once per participant.
    SuccessSamePredicate,

    /// Predicate has no (more) valid choices. Backtrack.
    Failure,

    /// Predicate has `n` choices to explore.
    /// Engine will call retry_pred(round, choice) for each choice in 0..n.
    Choices(usize),

    /// Suspend execution. Engine returns control with state preserved.
    Suspend,
}

/// A predicate that ends an engine program.
///
/// Terminal predicates fail or suspend; they never return Success.
/// [`EngineBuilder::terminal`](super::EngineBuilder::terminal) only accepts these.
pub trait TerminalPredicate: Predicate {}

/// Trait for search predicates in the non-deterministic engine.
///
/// # Lifecycle
///
/// 1. Engine calls `try_pred` when first reaching the predicate for a round
/// 2. If Success: engine advances to next predicate
/// 3. If Choices(n): engine calls `retry_pred` with 0, 1, ... until one succeeds
/// 4. If a later predicate fails, the engine rewinds the trail and retries the next choice
/// 5. When all choices are used up, the engine backtracks further
///
/// # Trail Integration
///
/// Predicates modify the `SearchContext` through its trailed setters. Before
/// every `try_pred` and `retry_pred` the engine rewinds the trail to the
/// checkpoint of the current stack entry, so a retried choice always starts
/// from the state that preceded the previous attempt.
pub trait Predicate: Debug {
    /// Try this predicate for a given round.
    ///
    /// The round starts at 0 and increments each time the predicate returns
    /// `SuccessSamePredicate`.
    fn try_pred(&mut self, ctx: &mut SearchContext, round: usize) -> PredicateResult;

    /// Retry this predicate with a specific choice.
    ///
    /// Called after try_pred returns Choices(n), for each choice in 0..n.
    /// Returning `Failure` moves on to the next choice. Returning `Choices`
    /// or `Suspend` from here is a programming error.
    #[allow(unused)]
    fn retry_pred(
        &mut self,
        ctx: &mut SearchContext,
        round: usize,
        choice: usize,
    ) -> PredicateResult {
        // Predicates that return Choices must implement this.
        panic!("{}::retry_pred should never be called", self.name());
    }

    /// Name for logs and debugging. Defaults to the type name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
