use serde::Serialize;
use tracing::debug;

use crate::core::partition::{ClusterId, Partition};
use crate::matching::correspondence::Correspondence;
use crate::matching::distance::edit_distance;
use crate::matching::overlap::{aggregate, ItemWeights, OverlapTable};
use crate::matching::relative::relative_membership;
use crate::matching::solver::{solve, SolverPolicy, DEFAULT_EXACT_LIMIT};
use crate::matching::MatchingError;

/// Result of comparing a source partition with a target partition
///
/// Distance and relative membership are derived from the same correspondence,
/// so `source.mismatches(&relative_membership) == Some(distance)` always holds.
#[derive(Debug, Clone)]
pub struct Comparison {
    /// Items that must change cluster
    pub distance: usize,

    /// Items that keep their cluster
    pub retained: usize,

    /// Target labels rewritten in the source id space
    pub relative_membership: Vec<ClusterId>,

    /// The chosen cluster correspondence
    pub correspondence: Correspondence,

    /// Total overlap weight of the matched pairs
    pub matched_weight: f64,
}

impl Comparison {
    /// Matched `(source, target)` cluster pairs
    #[must_use]
    pub fn matched_pairs(&self) -> Vec<(ClusterId, ClusterId)> {
        self.correspondence.pairs().collect()
    }
}

/// Summary of a comparison for machine-readable output
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub items: usize,
    pub source_clusters: usize,
    pub target_clusters: usize,
    pub distance: usize,
    pub retained: usize,
    pub matched_weight: f64,
    pub matched_pairs: Vec<(ClusterId, ClusterId)>,
    pub relative_membership: Vec<ClusterId>,
}

impl From<&Comparison> for ComparisonReport {
    fn from(comparison: &Comparison) -> Self {
        Self {
            items: comparison.relative_membership.len(),
            source_clusters: comparison.correspondence.source_clusters(),
            target_clusters: comparison.correspondence.target_clusters(),
            distance: comparison.distance,
            retained: comparison.retained,
            matched_weight: comparison.matched_weight,
            matched_pairs: comparison.matched_pairs(),
            relative_membership: comparison.relative_membership.clone(),
        }
    }
}

/// Configuration for the matching engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchingConfig {
    /// Strategy used to solve the correspondence
    pub solver: SolverPolicy,
    /// Largest cluster count solved exactly under [`SolverPolicy::Auto`]
    pub exact_limit: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            solver: SolverPolicy::Auto,
            exact_limit: DEFAULT_EXACT_LIMIT,
        }
    }
}

/// The main matching engine
///
/// Holds no per-comparison state, so one engine can be shared by several
/// threads comparing different pairs.
#[derive(Debug, Clone, Default)]
pub struct MatchingEngine<'a> {
    config: MatchingConfig,
    /// Pairwise item weights for weighted overlap
    weights: Option<&'a ItemWeights>,
}

impl<'a> MatchingEngine<'a> {
    /// Create a new matching engine with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new matching engine with custom configuration
    #[must_use]
    pub fn with_config(config: MatchingConfig) -> Self {
        Self {
            config,
            weights: None,
        }
    }

    /// Use pairwise item weights instead of plain co-membership counts
    #[must_use]
    pub fn with_weights(mut self, weights: &'a ItemWeights) -> Self {
        self.weights = Some(weights);
        self
    }

    #[must_use]
    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Overlap table and best correspondence from `source` to `target`
    ///
    /// # Errors
    ///
    /// Returns `MatchingError` if the partitions (or the weights) disagree on the
    /// number of items, or if the assignment cannot be solved.
    pub fn correspondence(
        &self,
        source: &Partition,
        target: &Partition,
    ) -> Result<(OverlapTable, Correspondence), MatchingError> {
        let table = aggregate(source, target, self.weights)?;
        let correspondence = solve(&table, self.config.solver, self.config.exact_limit)?;
        Ok((table, correspondence))
    }

    /// Minimum number of items to move so that `target` matches `source`
    ///
    /// # Errors
    ///
    /// Returns `MatchingError` if the partitions (or the weights) disagree on the
    /// number of items.
    pub fn edit_distance(
        &self,
        source: &Partition,
        target: &Partition,
    ) -> Result<usize, MatchingError> {
        let (table, correspondence) = self.correspondence(source, target)?;
        Ok(edit_distance(&table, &correspondence))
    }

    /// `target` relabeled in the id space of `source`
    ///
    /// # Errors
    ///
    /// Returns `MatchingError` if the partitions (or the weights) disagree on the
    /// number of items.
    pub fn relative_membership(
        &self,
        source: &Partition,
        target: &Partition,
    ) -> Result<Vec<ClusterId>, MatchingError> {
        let (_, correspondence) = self.correspondence(source, target)?;
        Ok(relative_membership(
            target,
            source.cluster_count(),
            &correspondence,
        ))
    }

    /// Distance and relative membership from a single correspondence
    ///
    /// # Errors
    ///
    /// Returns `MatchingError` if the partitions (or the weights) disagree on the
    /// number of items.
    pub fn compare(
        &self,
        source: &Partition,
        target: &Partition,
    ) -> Result<Comparison, MatchingError> {
        let (table, correspondence) = self.correspondence(source, target)?;

        let distance = edit_distance(&table, &correspondence);
        let relative = relative_membership(target, source.cluster_count(), &correspondence);
        debug_assert_eq!(source.mismatches(&relative), Some(distance));

        debug!(
            "compared {} items: {} source vs {} target clusters, distance {}",
            source.len(),
            source.cluster_count(),
            target.cluster_count(),
            distance
        );

        Ok(Comparison {
            distance,
            retained: table.items() - distance,
            matched_weight: correspondence.total_weight(&table),
            relative_membership: relative,
            correspondence,
        })
    }
}
