//! Command-line interface for partition-edit.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **pair**: Edit distance (or relative membership) between two partitions
//! - **batch**: Distance matrix between every pair of a set of solutions
//!
//! ## Usage
//!
//! ```text
//! # Distance between two inline membership vectors
//! partition-edit pair 1,1,2,2 1,2,1,2
//!
//! # Second partition relabeled in the ids of the first
//! partition-edit pair 1,1,2,2 2,2,1,1 --relative
//!
//! # JSON output for scripting
//! partition-edit --format json pair membership1 membership2
//!
//! # All-pairs matrix of membership* files in a directory
//! partition-edit batch --input-dir runs/ --output-dir results/
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::matching::overlap::ItemWeights;
use crate::matching::SolverPolicy;
use crate::parsing::weights::read_weights_file;

pub mod batch;
pub mod config;
pub mod pair;

use config::{RunConfig, Settings};

#[derive(Parser)]
#[command(name = "partition-edit")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Edit distance between partitions of the same items")]
#[command(
    long_about = "partition-edit measures how many items must change cluster to turn one partition into another.\n\nClusters of the two partitions are matched one-to-one so that as many items as possible keep their cluster; clusters without a useful counterpart become new clusters. It can also:\n- Relabel one partition in the cluster ids of another\n- Weight the matching with pairwise item affinities\n- Compute the distance matrix of a whole set of solutions"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Headerless CSV of pairwise item weights for weighted matching
    #[arg(short, long, global = true)]
    pub weights: Option<PathBuf>,

    /// Correspondence solver: `exact` costs O(N^3) time and O(N^2) memory for
    /// N = the larger cluster count, `auto` turns greedy above 500 clusters
    #[arg(long, global = true, default_value = "auto")]
    pub solver: SolverPolicy,

    /// Renumber cluster ids to 1..=k instead of rejecting gaps
    #[arg(long, global = true)]
    pub compact_labels: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compare two partitions
    Pair(pair::PairArgs),

    /// Compare every pair of a set of partitions
    Batch(batch::BatchArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Validate the arguments and run the selected command.
///
/// # Errors
///
/// Returns an error if the arguments are inconsistent, an input cannot be
/// read or validated, or the output cannot be written.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let settings = Settings::from_cli(cli);
    let config = RunConfig::try_from(&cli.command)?;

    let weights = load_weights(&settings)?;

    match config {
        RunConfig::Pair(pair) => pair::run(&pair, &settings, weights.as_ref()),
        RunConfig::Batch(batch) => batch::run(&batch, &settings, weights.as_ref()),
    }
}

fn load_weights(settings: &Settings) -> anyhow::Result<Option<ItemWeights>> {
    settings
        .weights
        .as_deref()
        .map(|path| {
            read_weights_file(path)
                .with_context(|| format!("Failed to load weights from {}", path.display()))
        })
        .transpose()
}
