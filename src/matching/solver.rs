//! Best correspondence between source and target clusters.
//!
//! Every cell of the overlap table gets an integer score. Shared item counts
//! come first; in weighted mode the weights only break ties between equal
//! counts, so a partition always matches itself perfectly.
//!
//! Two strategies are available:
//!
//! - **Exact**: Kuhn-Munkres assignment on the zero-padded square matrix,
//!   `O(N^3)` with `N = max(p, q)`. Among equally good correspondences the
//!   lowest source cluster takes the lowest target cluster it can.
//! - **Greedy**: Repeatedly takes the highest-scoring free cell, ties broken
//!   by the lower source id and then the lower target id
//!
//! In both cases a source cluster whose partner would score nothing is sent to
//! the sink instead.

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::matching::assignment::max_score_assignment;
use crate::matching::correspondence::{Correspondence, Target};
use crate::matching::overlap::{OverlapMode, OverlapTable};
use crate::matching::MatchingError;

/// Default largest `max(p, q)` solved exactly under [`SolverPolicy::Auto`]
pub const DEFAULT_EXACT_LIMIT: usize = 500;

/// Steps a weighted tie-break is scaled to, at most
pub const WEIGHT_RESOLUTION: i64 = 1_000_000;

/// Strategy used to find the correspondence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SolverPolicy {
    /// Exact up to the cluster limit, greedy above
    #[default]
    Auto,
    /// Always solve the assignment problem exactly
    Exact,
    /// Always use the greedy heuristic
    Greedy,
}

/// Integer score of every `(source, target)` cell, indexed from zero.
///
/// In count mode the score is the shared item count. In weighted mode it is
/// `count * scale + tie`, where `tie` is the cell weight rescaled to
/// `0..=resolution` and `scale` exceeds the largest possible sum of ties, so
/// no amount of weight outweighs a single item.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub fn cell_scores(table: &OverlapTable) -> Array2<i64> {
    let counts = table.counts();
    let to_score = |count: usize| i64::try_from(count).unwrap_or(i64::MAX);

    if table.mode() == OverlapMode::Count {
        return counts.mapv(to_score);
    }

    let weights = table.real_weights();
    let matched = table.source_clusters().min(table.target_clusters());
    let resolution = tie_resolution(table.items(), matched);
    let scale = to_score(matched).saturating_mul(resolution).saturating_add(1);
    let max_weight = weights.iter().copied().fold(0.0_f64, f64::max);

    let mut scores = counts.mapv(|count| to_score(count).saturating_mul(scale));
    if max_weight > 0.0 {
        for (score, &w) in scores.iter_mut().zip(weights.iter()) {
            let tie = (w / max_weight * resolution as f64).round() as i64;
            *score = score.saturating_add(tie.clamp(0, resolution));
        }
    }
    scores
}

/// Largest tie resolution that keeps `items * scale` well inside `i64`.
fn tie_resolution(items: usize, matched: usize) -> i64 {
    let items = i64::try_from(items).unwrap_or(i64::MAX);
    let matched = i64::try_from(matched).unwrap_or(i64::MAX);
    let room = (i64::MAX / 4) / items.saturating_add(1).saturating_mul(matched.saturating_add(1));
    room.clamp(1, WEIGHT_RESOLUTION)
}

/// Find the correspondence keeping the most items, using weights to break
/// ties in weighted mode.
///
/// `exact_limit` only matters for [`SolverPolicy::Auto`].
///
/// # Errors
///
/// Returns `MatchingError::Unsolvable` if the exact assignment fails.
pub fn solve(
    table: &OverlapTable,
    policy: SolverPolicy,
    exact_limit: usize,
) -> Result<Correspondence, MatchingError> {
    let size = table.source_clusters().max(table.target_clusters());

    match policy {
        SolverPolicy::Exact => solve_exact(table),
        SolverPolicy::Greedy => Ok(solve_greedy(table)),
        SolverPolicy::Auto if size <= exact_limit => solve_exact(table),
        SolverPolicy::Auto => {
            warn!(
                "{} clusters exceed the exact solver limit of {}, using greedy matching",
                size, exact_limit
            );
            Ok(solve_greedy(table))
        }
    }
}

/// Exact maximum-score assignment.
///
/// # Errors
///
/// Returns `MatchingError::Unsolvable` if the assignment solver fails.
pub fn solve_exact(table: &OverlapTable) -> Result<Correspondence, MatchingError> {
    let p = table.source_clusters();
    let q = table.target_clusters();
    let scores = cell_scores(table);

    let targets = max_score_assignment(scores.view())?
        .into_iter()
        .map(|b| b.map_or(Target::Sink, |b| Target::Cluster(b + 1)))
        .collect();

    let correspondence = Correspondence::from_targets(targets, q);
    debug!(
        "exact correspondence: {} of {} source clusters matched, weight {:.3}",
        correspondence.pairs().count(),
        p,
        correspondence.total_weight(table)
    );
    Ok(correspondence)
}

/// Greedy assignment: highest-scoring free cell first.
#[must_use]
pub fn solve_greedy(table: &OverlapTable) -> Correspondence {
    let p = table.source_clusters();
    let q = table.target_clusters();
    let scores = cell_scores(table);

    let mut cells: Vec<(usize, usize, i64)> = scores
        .indexed_iter()
        .filter(|(_, &score)| score > 0)
        .map(|((a, b), &score)| (a, b, score))
        .collect();

    cells.sort_by(|x, y| y.2.cmp(&x.2).then(x.0.cmp(&y.0)).then(x.1.cmp(&y.1)));

    let mut targets = vec![Target::Sink; p];
    let mut column_used = vec![false; q];
    for (a, b, _) in cells {
        if targets[a] == Target::Sink && !column_used[b] {
            targets[a] = Target::Cluster(b + 1);
            column_used[b] = true;
        }
    }

    let correspondence = Correspondence::from_targets(targets, q);
    debug!(
        "greedy correspondence: {} of {} source clusters matched, weight {:.3}",
        correspondence.pairs().count(),
        p,
        correspondence.total_weight(table)
    );
    correspondence
}
