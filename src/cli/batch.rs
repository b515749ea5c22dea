use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use serde::Serialize;
use tracing::{debug, info};

use crate::batch::output::write_matrix;
use crate::batch::BatchComparator;
use crate::cli::config::{BatchConfig, BatchSource, Settings};
use crate::cli::OutputFormat;
use crate::core::matrix::DistanceMatrix;
use crate::matching::overlap::ItemWeights;
use crate::matching::MatchingEngine;
use crate::parsing::discovery::{discover_solutions, read_solutions_list};
use crate::parsing::membership::read_partitions;

#[derive(Args)]
pub struct BatchArgs {
    /// Directory searched for membership files
    #[arg(short, long)]
    pub input_dir: Option<PathBuf>,

    /// File name prefix of the solutions in --input-dir [default: membership]
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// File listing one solution path per line
    #[arg(short, long)]
    pub solutions_file: Option<PathBuf>,

    /// Directory the paths of --solutions-file are relative to [default: .]
    #[arg(short, long)]
    pub base_dir: Option<PathBuf>,

    /// Directory receiving dist-matrix-Edit.csv (created if missing)
    #[arg(short, long, required = true)]
    pub output_dir: PathBuf,

    /// Worker threads (default: all cores)
    #[arg(short, long)]
    pub threads: Option<usize>,
}

#[derive(Serialize)]
struct BatchReport<'a> {
    output: &'a PathBuf,
    solutions: Vec<String>,
    matrix: &'a DistanceMatrix,
}

pub fn run(
    config: &BatchConfig,
    settings: &Settings,
    weights: Option<&ItemWeights>,
) -> anyhow::Result<()> {
    let paths = match &config.source {
        BatchSource::Directory { dir, prefix } => discover_solutions(dir, prefix)?,
        BatchSource::List { file, base_dir } => read_solutions_list(file, base_dir)?,
    };
    for (idx, path) in paths.iter().enumerate() {
        debug!("sol{}: {}", idx, path.display());
    }

    let partitions = read_partitions(&paths, settings.compact_labels)?;

    let mut engine = MatchingEngine::with_config(settings.matching);
    if let Some(weights) = weights {
        engine = engine.with_weights(weights);
    }
    let mut comparator = BatchComparator::new(engine);
    if let Some(threads) = config.threads {
        comparator = comparator.with_threads(threads);
    }

    let matrix = comparator.distance_matrix(&partitions)?;
    let output = write_matrix(&matrix, &config.output_dir)
        .with_context(|| format!("Failed to write results to {}", config.output_dir.display()))?;
    info!("{} solutions compared", partitions.len());

    match settings.format {
        OutputFormat::Text => println!("{}", output.display()),
        OutputFormat::Json => {
            let report = BatchReport {
                output: &output,
                solutions: paths.iter().map(|p| p.display().to_string()).collect(),
                matrix: &matrix,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
