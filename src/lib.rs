// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Secret Santa assignment with exclusions.
//!
//! Every participant is given exactly one recipient such that nobody draws
//! themselves, nobody draws a name on their exclusion list, and no two people
//! draw the same recipient.
//!
//! # Architecture
//!
//! The implementation splits the problem into two tiers:
//!
//! ## Tier 1: Candidate table (immutable)
//!
//! Built once per attempt by [`CandidateTable::build`]:
//! - the roster is shuffled into the search order
//! - each participant gets a shuffled list of eligible recipients
//!
//! ## Tier 2: Dynamic state (mutable)
//!
//! The partial assignment, tracked on the trail:
//! - [`Trail`] - records every write so backtracking is an explicit undo
//! - recipient per search position, and which recipients are taken
//!
//! # Search Algorithm
//!
//! A predicate engine with its own stack runs [`predicates::AssignPredicate`]
//! once per participant. Each round offers that participant's candidates as
//! choices; a candidate already taken is skipped; a round with no remaining
//! choice backtracks. The first complete assignment wins.
//!
//! The randomness lives entirely in the [`OrderSource`] used to build the
//! table, so tests can pin it down with [`order::KeepOrder`] or
//! [`order::SeededOrder`].
//!
//! # Example
//!
//! ```
//! use secret_santa::{find_assignment, Roster, SeededOrder};
//!
//! let roster = Roster::parse("Amy Bob\nBob\nCarol\n");
//! let assignment = find_assignment(&roster, SeededOrder::new(7)).unwrap();
//!
//! assert_eq!(assignment.recipient_of("Amy").unwrap().as_str(), "Carol");
//! assert!(assignment.check(&roster).is_ok());
//! ```

pub mod assignment;
pub mod candidates;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod order;
pub mod predicates;
pub mod roster;
pub mod state;
pub mod trail;

// Re-export commonly used types
pub use assignment::{find_assignment, search_candidates, Assignment, Matcher, Pair};
pub use candidates::CandidateTable;
pub use config::MatchConfig;
pub use context::SearchContext;
pub use engine::{EngineBuilder, Predicate, PredicateResult, SearchEngine};
pub use error::MatchError;
pub use order::{EntropyOrder, KeepOrder, OrderSource, SeededOrder};
pub use roster::{Participant, Roster};
pub use trail::Trail;
