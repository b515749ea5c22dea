use serde::Serialize;
use std::collections::BTreeMap;

use crate::utils::validation::{check_item_limit, cluster_sizes, ValidationError};

/// Cluster ids are 1-based; `0` never names a cluster
pub type ClusterId = usize;

/// An immutable, validated membership vector
///
/// Every item `i` in `0..len()` belongs to exactly one cluster `label(i)` and the
/// cluster ids cover `1..=cluster_count()` without gaps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Partition {
    labels: Vec<ClusterId>,

    /// Number of items per cluster, indexed by `id - 1`
    #[serde(skip)]
    sizes: Vec<usize>,
}

impl Partition {
    /// Build a partition from raw labels.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyPartition` for no labels,
    /// `ValidationError::NonPositiveLabel` if a label is `0`,
    /// `ValidationError::TooManyItems` past the item limit,
    /// `ValidationError::LabelOutOfRange` for an id above the item count, or
    /// `ValidationError::EmptyCluster` when the ids leave a gap.
    pub fn new(labels: Vec<ClusterId>) -> Result<Self, ValidationError> {
        if labels.is_empty() {
            return Err(ValidationError::EmptyPartition);
        }
        check_item_limit(labels.len() - 1)?;
        if let Some(position) = labels.iter().position(|&l| l == 0) {
            return Err(ValidationError::NonPositiveLabel { position, value: 0 });
        }

        let sizes = cluster_sizes(&labels)?;
        Ok(Self { labels, sizes })
    }

    /// Build a partition from labels that may leave gaps in the id range.
    ///
    /// Ids are renumbered to `1..=k` in ascending order of the original id, so
    /// `[5, 2, 9, 2]` becomes `[2, 1, 3, 1]`.
    ///
    /// # Errors
    ///
    /// Same as [`Partition::new`], except that gaps are not an error.
    pub fn compact(labels: Vec<ClusterId>) -> Result<Self, ValidationError> {
        if let Some(position) = labels.iter().position(|&l| l == 0) {
            return Err(ValidationError::NonPositiveLabel { position, value: 0 });
        }

        let mut renumber: BTreeMap<ClusterId, ClusterId> =
            labels.iter().map(|&label| (label, 0)).collect();
        for (rank, id) in renumber.values_mut().enumerate() {
            *id = rank + 1;
        }

        let relabeled = labels.iter().map(|label| renumber[label]).collect();
        Self::new(relabeled)
    }

    /// Number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false: a partition holds at least one item
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Cluster id of item `i`
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.len()`.
    #[must_use]
    pub fn label(&self, i: usize) -> ClusterId {
        self.labels[i]
    }

    #[must_use]
    pub fn labels(&self) -> &[ClusterId] {
        &self.labels
    }

    /// Number of distinct clusters
    #[must_use]
    pub fn cluster_count(&self) -> usize {
        self.sizes.len()
    }

    /// Number of items in cluster `id`, 0 for ids outside `1..=cluster_count()`
    #[must_use]
    pub fn cluster_size(&self, id: ClusterId) -> usize {
        id.checked_sub(1)
            .and_then(|idx| self.sizes.get(idx))
            .copied()
            .unwrap_or(0)
    }

    /// Number of positions where the two label vectors disagree.
    ///
    /// This is a plain equality count, with no cluster matching involved.
    /// Returns `None` when the lengths differ.
    #[must_use]
    pub fn mismatches(&self, other: &[ClusterId]) -> Option<usize> {
        if self.labels.len() != other.len() {
            return None;
        }
        Some(
            self.labels
                .iter()
                .zip(other)
                .filter(|(a, b)| a != b)
                .count(),
        )
    }
}

impl std::fmt::Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined: Vec<String> = self.labels.iter().map(ToString::to_string).collect();
        write!(f, "{}", joined.join(","))
    }
}

impl TryFrom<Vec<ClusterId>> for Partition {
    type Error = ValidationError;

    fn try_from(labels: Vec<ClusterId>) -> Result<Self, Self::Error> {
        Self::new(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_new() {
        let p = Partition::new(vec![1, 1, 2, 3, 2]).unwrap();
        assert_eq!(p.len(), 5);
        assert!(!p.is_empty());
        assert_eq!(p.cluster_count(), 3);
        assert_eq!(p.label(3), 3);
        assert_eq!(p.cluster_size(1), 2);
        assert_eq!(p.cluster_size(2), 2);
        assert_eq!(p.cluster_size(3), 1);
        assert_eq!(p.cluster_size(0), 0);
        assert_eq!(p.cluster_size(4), 0);
    }

    #[test]
    fn test_partition_rejects_empty() {
        assert_eq!(Partition::new(vec![]), Err(ValidationError::EmptyPartition));
    }

    #[test]
    fn test_partition_rejects_zero_label() {
        assert_eq!(
            Partition::new(vec![1, 0, 2]),
            Err(ValidationError::NonPositiveLabel {
                position: 1,
                value: 0
            })
        );
    }

    #[test]
    fn test_partition_rejects_gap() {
        assert_eq!(
            Partition::new(vec![1, 3, 3]),
            Err(ValidationError::EmptyCluster {
                id: 2,
                cluster_count: 3
            })
        );
    }

    #[test]
    fn test_partition_rejects_huge_label() {
        assert_eq!(
            Partition::new(vec![1, usize::MAX]),
            Err(ValidationError::LabelOutOfRange {
                position: 1,
                value: usize::MAX,
                items: 2
            })
        );
        // renumbering brings the same labels in range
        assert_eq!(Partition::compact(vec![1, usize::MAX]).unwrap().labels(), &[1, 2]);
    }

    #[test]
    fn test_partition_compact() {
        let p = Partition::compact(vec![5, 2, 9, 2]).unwrap();
        assert_eq!(p.labels(), &[2, 1, 3, 1]);
        assert_eq!(p.cluster_count(), 3);

        // Already contiguous labels are left alone
        let q = Partition::compact(vec![2, 1, 2]).unwrap();
        assert_eq!(q.labels(), &[2, 1, 2]);
    }

    #[test]
    fn test_mismatches() {
        let p = Partition::new(vec![1, 1, 2, 2]).unwrap();
        assert_eq!(p.mismatches(&[1, 1, 2, 2]), Some(0));
        assert_eq!(p.mismatches(&[1, 2, 2, 3]), Some(2));
        assert_eq!(p.mismatches(&[1, 2]), None);
    }

    #[test]
    fn test_display() {
        let p = Partition::new(vec![7, 6, 1, 2, 3, 4, 5]).unwrap();
        assert_eq!(p.to_string(), "7,6,1,2,3,4,5");
    }
}
