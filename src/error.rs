// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Error types.
//!
//! A failed match is an ordinary outcome for the caller, so every variant here
//! is returned as a value. Nothing in this crate aborts on user input.

use std::path::PathBuf;

use thiserror::Error;

/// Reasons a matching run produced no assignment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// Fewer than two participants; the search is never started.
    #[error("a match cannot be made with {participants} participant(s)")]
    DegenerateInput { participants: usize },

    /// Every attempted ordering was searched to exhaustion.
    #[error("no assignment found after {attempts} attempt(s)")]
    NoAssignmentFound { attempts: u32 },

    /// The last attempt was abandoned because it hit the configured step cap.
    #[error("search abandoned after {limit} steps")]
    StepLimitExceeded { limit: u64 },
}

/// Errors reading a roster.
#[derive(Debug, Error)]
pub enum RosterError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors loading a [`MatchConfig`](crate::config::MatchConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}
