// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Matching configuration.
//!
//! ```toml
//! # Try up to 5 independent shuffles before giving up.
//! attempts = 5
//! # Abandon an attempt after this many engine steps.
//! max_steps = 1000000
//! # Reproducible orderings.
//! seed = 2024
//! ```
//!
//! Every key is optional.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchConfig {
    /// Number of independent orderings to search. Each attempt reshuffles
    /// the roster and every candidate list. `1` searches a single ordering.
    pub attempts: u32,

    /// Per-attempt cap on engine steps (predicate calls).
    pub max_steps: Option<u64>,

    /// Seed for reproducible orderings; thread entropy when absent.
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            attempts: 1,
            max_steps: None,
            seed: None,
        }
    }
}

impl MatchConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Attempts to actually make; zero is treated as one.
    pub fn effective_attempts(&self) -> u32 {
        self.attempts.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_single_attempt() {
        let config = MatchConfig::default();
        assert_eq!(config.attempts, 1);
        assert_eq!(config.max_steps, None);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_from_toml_partial() {
        let config = MatchConfig::from_toml_str("attempts = 4\nseed = 9\n").unwrap();
        assert_eq!(config.attempts, 4);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.max_steps, None);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(MatchConfig::from_toml_str("").unwrap(), MatchConfig::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(matches!(
            MatchConfig::from_toml_str("retries = 3"),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn test_zero_attempts_means_one() {
        let config = MatchConfig {
            attempts: 0,
            ..MatchConfig::default()
        };
        assert_eq!(config.effective_attempts(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let err = MatchConfig::load(Path::new("/nonexistent/santa.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
