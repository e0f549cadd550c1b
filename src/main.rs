// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! `santa` - draw Secret Santa recipients from a roster file.
//!
//! ```text
//! santa names.txt
//! santa --seed 2024 --output matches.txt names.txt
//! cat names.txt | santa --format json
//! ```

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use secret_santa::error::{ConfigError, RosterError};
use secret_santa::{Assignment, EntropyOrder, MatchConfig, MatchError, Matcher, Roster, SeededOrder};

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("failed to read roster: {0}")]
    Roster(#[from] RosterError),
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write matches: {0}")]
    Write(#[from] io::Error),
    #[error("failed to encode matches: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Match(#[from] MatchError),
}

const TOO_FEW_PEOPLE: &str = "A match cannot be made with fewer than two people.";

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            CliError::Match(MatchError::DegenerateInput { .. }) => 1,
            CliError::Match(_) => 2,
            _ => 3,
        }
    }

    /// The line printed to stderr before exiting.
    fn message(&self) -> String {
        match self {
            CliError::Match(MatchError::DegenerateInput { .. }) => TOO_FEW_PEOPLE.to_string(),
            err => format!("santa: {err}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One `giver -> recipient` line per participant.
    Text,
    /// JSON array of `{giver, recipient}` objects.
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "santa", version, about = "Secret Santa name generator")]
struct Cli {
    /// Roster file, one participant per line followed by names they must not draw.
    /// Reads stdin when omitted or `-`.
    #[arg(value_name = "ROSTER")]
    roster: Option<PathBuf>,

    /// Write matches to this file instead of stdout.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// TOML file with matching settings.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for reproducible draws.
    #[arg(long)]
    seed: Option<u64>,

    /// Number of independent shuffles to try.
    #[arg(long)]
    attempts: Option<u32>,

    /// Abandon an attempt after this many search steps.
    #[arg(long)]
    max_steps: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(io::stderr))
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err.message());
            ExitCode::from(err.exit_code())
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = match &cli.config {
        Some(path) => MatchConfig::load(path)?,
        None => MatchConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if let Some(attempts) = cli.attempts {
        config.attempts = attempts;
    }
    if cli.max_steps.is_some() {
        config.max_steps = cli.max_steps;
    }

    let roster = read_roster(cli.roster.as_ref())?;
    info!(participants = roster.len(), "roster loaded");

    let assignment = match config.seed {
        Some(seed) => Matcher::with_config(SeededOrder::new(seed), config).find(&roster)?,
        None => Matcher::with_config(EntropyOrder::new(), config).find(&roster)?,
    };

    match &cli.output {
        Some(path) => {
            save_assignment(path, &assignment, cli.format)?;
            eprintln!("The matches have been saved to {}", path.display());
        }
        None => write_assignment(io::stdout().lock(), &assignment, cli.format)?,
    }
    Ok(())
}

fn save_assignment(path: &Path, assignment: &Assignment, format: Format) -> Result<(), CliError> {
    let file = File::create(path).map_err(|source| CliError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    write_assignment(file, assignment, format)
}

fn read_roster(path: Option<&PathBuf>) -> Result<Roster, CliError> {
    match path {
        Some(path) if path.as_os_str() != "-" => {
            let file = File::open(path).map_err(|source| CliError::Open {
                path: path.clone(),
                source,
            })?;
            Ok(Roster::from_reader(file)?)
        }
        _ => Ok(Roster::from_reader(io::stdin().lock())?),
    }
}

fn write_assignment(mut out: impl Write, assignment: &Assignment, format: Format) -> Result<(), CliError> {
    match format {
        Format::Text => write!(out, "{assignment}")?,
        Format::Json => {
            serde_json::to_writer_pretty(&mut out, assignment)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secret_santa::KeepOrder;

    fn three_people() -> Assignment {
        let roster = Roster::parse("Amy\nBob\nCarol\n");
        secret_santa::find_assignment(&roster, KeepOrder).unwrap()
    }

    fn written(format: Format) -> String {
        let mut out = Vec::new();
        write_assignment(&mut out, &three_people(), format).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_text_output() {
        assert_eq!(written(Format::Text), "Amy -> Bob\nBob -> Carol\nCarol -> Amy\n");
    }

    #[test]
    fn test_json_output() {
        let value: serde_json::Value = serde_json::from_str(&written(Format::Json)).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                {"giver": "Amy", "recipient": "Bob"},
                {"giver": "Bob", "recipient": "Carol"},
                {"giver": "Carol", "recipient": "Amy"},
            ])
        );
    }

    #[test]
    fn test_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("matches.txt");
        save_assignment(&path, &three_people(), Format::Text).unwrap();
        let saved = std::fs::read_to_string(&path).unwrap();
        assert_eq!(saved, "Amy -> Bob\nBob -> Carol\nCarol -> Amy\n");
    }

    #[test]
    fn test_output_file_in_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("matches.txt");
        let err = save_assignment(&path, &three_people(), Format::Text).unwrap_err();
        assert!(matches!(err, CliError::Open { .. }));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_exit_codes() {
        let degenerate = CliError::Match(MatchError::DegenerateInput { participants: 1 });
        assert_eq!(degenerate.exit_code(), 1);
        assert_eq!(degenerate.message(), "A match cannot be made with fewer than two people.");

        let no_match = CliError::Match(MatchError::NoAssignmentFound { attempts: 1 });
        assert_eq!(no_match.exit_code(), 2);
        let capped = CliError::Match(MatchError::StepLimitExceeded { limit: 10 });
        assert_eq!(capped.exit_code(), 2);

        let io_error = CliError::Write(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        assert_eq!(io_error.exit_code(), 3);
        assert!(io_error.message().starts_with("santa: failed to write matches"));

        let config = CliError::Config(MatchConfig::from_toml_str("attempts = \"many\"").unwrap_err());
        assert_eq!(config.exit_code(), 3);
    }

    #[test]
    fn test_degenerate_roster_exit_code() {
        let roster = Roster::from_reader("Solo\n".as_bytes()).unwrap();
        let err = CliError::from(Matcher::new(KeepOrder).find(&roster).unwrap_err());
        assert_eq!(err.exit_code(), 1);
    }
}
