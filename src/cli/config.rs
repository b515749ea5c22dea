//! Validated run configuration built from the command-line arguments.

use std::path::PathBuf;

use thiserror::Error;

use crate::cli::batch::BatchArgs;
use crate::cli::pair::PairArgs;
use crate::cli::{Cli, Commands, OutputFormat};
use crate::matching::MatchingConfig;
use crate::parsing::discovery::DEFAULT_PREFIX;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Batch mode needs either --input-dir or --solutions-file")]
    MissingSource,

    #[error("--input-dir and --solutions-file cannot be used together")]
    ConflictingSources,

    #[error("{option} only applies together with {requires}")]
    OrphanOption {
        option: &'static str,
        requires: &'static str,
    },

    #[error("Invalid thread count: {0} (must be at least 1)")]
    InvalidThreads(usize),
}

/// Options shared by every command
#[derive(Debug, Clone)]
pub struct Settings {
    pub format: OutputFormat,
    pub weights: Option<PathBuf>,
    pub matching: MatchingConfig,
    pub compact_labels: bool,
}

impl Settings {
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            weights: cli.weights.clone(),
            matching: MatchingConfig {
                solver: cli.solver,
                ..MatchingConfig::default()
            },
            compact_labels: cli.compact_labels,
        }
    }
}

/// What to run, checked before any input is read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunConfig {
    Pair(PairConfig),
    Batch(BatchConfig),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairConfig {
    /// Inline vector or membership file of the reference partition
    pub first: String,
    /// Inline vector or membership file of the compared partition
    pub second: String,
    /// Print the relabeled second partition instead of the distance
    pub relative: bool,
}

/// Where the solutions of a batch come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchSource {
    /// Files of `dir` whose name starts with `prefix`
    Directory { dir: PathBuf, prefix: String },
    /// Paths listed in `file`, relative to `base_dir`
    List { file: PathBuf, base_dir: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    pub source: BatchSource,
    pub output_dir: PathBuf,
    /// Worker threads; `None` uses every core
    pub threads: Option<usize>,
}

impl From<&PairArgs> for PairConfig {
    fn from(args: &PairArgs) -> Self {
        Self {
            first: args.first.clone(),
            second: args.second.clone(),
            relative: args.relative,
        }
    }
}

impl TryFrom<&BatchArgs> for BatchConfig {
    type Error = ConfigError;

    fn try_from(args: &BatchArgs) -> Result<Self, Self::Error> {
        let source = match (&args.input_dir, &args.solutions_file) {
            (Some(_), Some(_)) => return Err(ConfigError::ConflictingSources),
            (None, None) => return Err(ConfigError::MissingSource),
            (Some(dir), None) => {
                if args.base_dir.is_some() {
                    return Err(ConfigError::OrphanOption {
                        option: "--base-dir",
                        requires: "--solutions-file",
                    });
                }
                BatchSource::Directory {
                    dir: dir.clone(),
                    prefix: args
                        .prefix
                        .clone()
                        .unwrap_or_else(|| DEFAULT_PREFIX.to_string()),
                }
            }
            (None, Some(file)) => {
                if args.prefix.is_some() {
                    return Err(ConfigError::OrphanOption {
                        option: "--prefix",
                        requires: "--input-dir",
                    });
                }
                BatchSource::List {
                    file: file.clone(),
                    base_dir: args.base_dir.clone().unwrap_or_else(|| PathBuf::from(".")),
                }
            }
        };

        if let Some(threads @ 0) = args.threads {
            return Err(ConfigError::InvalidThreads(threads));
        }

        Ok(Self {
            source,
            output_dir: args.output_dir.clone(),
            threads: args.threads,
        })
    }
}

impl TryFrom<&Commands> for RunConfig {
    type Error = ConfigError;

    fn try_from(command: &Commands) -> Result<Self, Self::Error> {
        match command {
            Commands::Pair(args) => Ok(Self::Pair(PairConfig::from(args))),
            Commands::Batch(args) => BatchConfig::try_from(args).map(Self::Batch),
        }
    }
}
