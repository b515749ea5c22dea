use serde::Serialize;

use crate::core::partition::ClusterId;
use crate::matching::overlap::OverlapTable;

/// Where a source cluster is sent by a [`Correspondence`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// A real cluster of the target partition
    Cluster(ClusterId),
    /// No beneficial counterpart
    Sink,
}

/// Mapping from every source cluster to a target cluster or the sink
///
/// No two source clusters share a real target cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Correspondence {
    // indexed by source id - 1
    forward: Vec<Target>,
    // indexed by target id - 1
    inverse: Vec<Option<ClusterId>>,
}

impl Correspondence {
    /// Build from the target of each source cluster, in source id order.
    ///
    /// # Panics
    ///
    /// Panics if a target id is outside `1..=target_clusters` or is used twice.
    #[must_use]
    pub fn from_targets(forward: Vec<Target>, target_clusters: usize) -> Self {
        let mut inverse = vec![None; target_clusters];
        for (idx, target) in forward.iter().enumerate() {
            if let Target::Cluster(b) = *target {
                assert!(
                    (1..=target_clusters).contains(&b),
                    "target cluster {b} out of range"
                );
                assert!(
                    inverse[b - 1].is_none(),
                    "target cluster {b} matched twice"
                );
                inverse[b - 1] = Some(idx + 1);
            }
        }
        Self { forward, inverse }
    }

    /// Identity mapping for a partition compared with itself
    #[must_use]
    pub fn identity(clusters: usize) -> Self {
        Self::from_targets((1..=clusters).map(Target::Cluster).collect(), clusters)
    }

    /// Target of source cluster `a`
    ///
    /// # Panics
    ///
    /// Panics if `a` is not a source cluster id.
    #[must_use]
    pub fn target(&self, a: ClusterId) -> Target {
        self.forward[a - 1]
    }

    /// The source cluster matched to target cluster `b`, if any
    #[must_use]
    pub fn source_for(&self, b: ClusterId) -> Option<ClusterId> {
        b.checked_sub(1)
            .and_then(|idx| self.inverse.get(idx))
            .copied()
            .flatten()
    }

    #[must_use]
    pub fn source_clusters(&self) -> usize {
        self.forward.len()
    }

    #[must_use]
    pub fn target_clusters(&self) -> usize {
        self.inverse.len()
    }

    /// Matched `(source, target)` pairs in source id order
    pub fn pairs(&self) -> impl Iterator<Item = (ClusterId, ClusterId)> + '_ {
        self.forward
            .iter()
            .enumerate()
            .filter_map(|(idx, target)| match target {
                Target::Cluster(b) => Some((idx + 1, *b)),
                Target::Sink => None,
            })
    }

    /// Source clusters sent to the sink, ascending
    #[must_use]
    pub fn unmatched_sources(&self) -> Vec<ClusterId> {
        self.forward
            .iter()
            .enumerate()
            .filter(|(_, target)| **target == Target::Sink)
            .map(|(idx, _)| idx + 1)
            .collect()
    }

    /// Target clusters no source cluster maps to, ascending
    #[must_use]
    pub fn unmatched_targets(&self) -> Vec<ClusterId> {
        self.inverse
            .iter()
            .enumerate()
            .filter(|(_, source)| source.is_none())
            .map(|(idx, _)| idx + 1)
            .collect()
    }

    /// Sum of the overlap weights of the matched pairs
    #[must_use]
    pub fn total_weight(&self, table: &OverlapTable) -> f64 {
        self.pairs()
            .map(|(a, b)| table.weight(a, Target::Cluster(b)))
            .sum()
    }

    /// Number of items that keep their cluster under this correspondence
    #[must_use]
    pub fn retained_items(&self, table: &OverlapTable) -> usize {
        self.pairs().map(|(a, b)| table.count(a, b)).sum()
    }
}
