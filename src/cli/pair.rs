use clap::Args;
use tracing::info;

use crate::cli::config::{PairConfig, Settings};
use crate::cli::OutputFormat;
use crate::matching::engine::{Comparison, ComparisonReport};
use crate::matching::overlap::ItemWeights;
use crate::matching::MatchingEngine;
use crate::parsing::membership::resolve_operand;

#[derive(Args)]
pub struct PairArgs {
    /// Reference partition: inline vector such as 1,1,2,2 or a membership file
    #[arg(required = true)]
    pub first: String,

    /// Partition to compare: inline vector or membership file
    #[arg(required = true)]
    pub second: String,

    /// Print the second partition relabeled in the cluster ids of the first
    #[arg(long)]
    pub relative: bool,
}

pub fn run(
    config: &PairConfig,
    settings: &Settings,
    weights: Option<&ItemWeights>,
) -> anyhow::Result<()> {
    let first = resolve_operand(&config.first, settings.compact_labels)?;
    let second = resolve_operand(&config.second, settings.compact_labels)?;
    info!(
        "first: {} items in {} clusters, second: {} items in {} clusters",
        first.len(),
        first.cluster_count(),
        second.len(),
        second.cluster_count()
    );

    let mut engine = MatchingEngine::with_config(settings.matching);
    if let Some(weights) = weights {
        engine = engine.with_weights(weights);
    }

    let comparison = engine.compare(&first, &second)?;

    match settings.format {
        OutputFormat::Text => println!("{}", render_text(&comparison, config.relative)),
        OutputFormat::Json => {
            let report = ComparisonReport::from(&comparison);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn render_text(comparison: &Comparison, relative: bool) -> String {
    if relative {
        comparison
            .relative_membership
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",")
    } else {
        comparison.distance.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::partition::Partition;

    #[test]
    fn test_render_text() {
        let a = Partition::new(vec![1, 1, 1, 1]).unwrap();
        let b = Partition::new(vec![1, 2, 3, 4]).unwrap();
        let comparison = MatchingEngine::new().compare(&a, &b).unwrap();

        assert_eq!(render_text(&comparison, false), "3");
        assert_eq!(render_text(&comparison, true), "1,2,3,4");
    }
}
