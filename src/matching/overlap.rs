//! Overlap between the clusters of two partitions.
//!
//! The overlap of source cluster `a` with target cluster `b` is either the number
//! of items they share (count mode) or, when pairwise item weights are supplied,
//! the summed weight between items of `a` and items of `b` (weighted mode).

use ndarray::{s, Array2, ArrayView2};
use tracing::debug;

use crate::core::partition::{ClusterId, Partition};
use crate::matching::correspondence::Target;
use crate::matching::MatchingError;
use crate::utils::validation::ValidationError;

/// Square matrix of pairwise item weights, `d[i][j] >= 0`
#[derive(Debug, Clone, PartialEq)]
pub struct ItemWeights {
    matrix: Array2<f64>,
}

impl ItemWeights {
    /// Wrap a square matrix of finite, non-negative weights.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NotSquare` if the matrix is not square and
    /// `ValidationError::InvalidWeight` for the first negative or non-finite entry.
    pub fn new(matrix: Array2<f64>) -> Result<Self, ValidationError> {
        let (rows, columns) = matrix.dim();
        if rows != columns {
            return Err(ValidationError::NotSquare { rows, columns });
        }

        if let Some(((row, column), value)) = matrix
            .indexed_iter()
            .find(|(_, v)| !v.is_finite() || **v < 0.0)
        {
            return Err(ValidationError::InvalidWeight {
                row,
                column,
                value: value.to_string(),
            });
        }

        Ok(Self { matrix })
    }

    /// Build from row vectors, as read from a file.
    ///
    /// # Errors
    ///
    /// Same as [`ItemWeights::new`]; rows of unequal length are rejected with
    /// `ValidationError::RaggedWeights`.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, ValidationError> {
        let size = rows.len();
        for (row, values) in rows.iter().enumerate() {
            if values.len() != size {
                return Err(ValidationError::RaggedWeights {
                    row,
                    expected: size,
                    found: values.len(),
                });
            }
        }

        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        let matrix = Array2::from_shape_vec((size, size), flat).map_err(|_| {
            ValidationError::NotSquare {
                rows: size,
                columns: size,
            }
        })?;
        Self::new(matrix)
    }

    /// Number of items covered by the matrix
    #[must_use]
    pub fn len(&self) -> usize {
        self.matrix.nrows()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.matrix[[i, j]]
    }

    #[must_use]
    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.matrix.view()
    }
}

/// How the overlap weights were computed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapMode {
    /// Shared item counts
    Count,
    /// Summed pairwise item weights
    Weighted,
}

/// Overlap weights between source clusters `1..=p` and target clusters `1..=q`
///
/// The weight table has one extra row and column for the sink; both are always
/// zero. The plain contingency counts are kept next to the weights since the
/// edit distance is measured in items whatever mode chose the correspondence.
#[derive(Debug, Clone)]
pub struct OverlapTable {
    // (p + 1, q + 1), last row and column are the sink
    weights: Array2<f64>,
    // (p, q)
    counts: Array2<usize>,
    items: usize,
    mode: OverlapMode,
}

impl OverlapTable {
    /// Number of source clusters `p`
    #[must_use]
    pub fn source_clusters(&self) -> usize {
        self.counts.nrows()
    }

    /// Number of target clusters `q`
    #[must_use]
    pub fn target_clusters(&self) -> usize {
        self.counts.ncols()
    }

    /// Number of items in both partitions
    #[must_use]
    pub fn items(&self) -> usize {
        self.items
    }

    #[must_use]
    pub fn mode(&self) -> OverlapMode {
        self.mode
    }

    /// Overlap weight between source cluster `a` and a target.
    ///
    /// # Panics
    ///
    /// Panics if `a` or the target cluster is out of range.
    #[must_use]
    pub fn weight(&self, a: ClusterId, target: Target) -> f64 {
        let column = match target {
            Target::Cluster(b) => b - 1,
            Target::Sink => self.target_clusters(),
        };
        self.weights[[a - 1, column]]
    }

    /// Number of items in source cluster `a` and target cluster `b`.
    ///
    /// # Panics
    ///
    /// Panics if `a` or `b` is out of range.
    #[must_use]
    pub fn count(&self, a: ClusterId, b: ClusterId) -> usize {
        self.counts[[a - 1, b - 1]]
    }

    /// The `p x q` weights without the sink row and column
    #[must_use]
    pub fn real_weights(&self) -> ArrayView2<'_, f64> {
        self.weights
            .slice(s![..self.source_clusters(), ..self.target_clusters()])
    }

    /// The full `(p + 1) x (q + 1)` weights including the sink
    #[must_use]
    pub fn weights_with_sink(&self) -> ArrayView2<'_, f64> {
        self.weights.view()
    }

    #[must_use]
    pub fn counts(&self) -> ArrayView2<'_, usize> {
        self.counts.view()
    }
}

/// Affinity of every item toward every target cluster.
///
/// Entry `(i, b - 1)` is the sum of `d[i][j]` over the items `j != i` with
/// `target.label(j) == b`. The result has `q + 1` columns; the last one stands
/// for a new cluster and stays zero.
///
/// The caller guarantees that `weights` covers exactly the items of `target`.
#[must_use]
pub fn item_affinities(target: &Partition, weights: &ItemWeights) -> Array2<f64> {
    let n = target.len();
    let mut affinity = Array2::<f64>::zeros((n, target.cluster_count() + 1));
    let d = weights.view();

    for i in 0..n {
        let mut row = affinity.row_mut(i);
        for (j, &b) in target.labels().iter().enumerate() {
            if i != j {
                row[b - 1] += d[[i, j]];
            }
        }
    }
    affinity
}

/// Build the overlap table between `source` (rows) and `target` (columns).
///
/// # Errors
///
/// Returns `MatchingError::IncompatibleLength` when the partitions have a
/// different number of items and `MatchingError::WeightDimension` when the
/// weight matrix does not cover exactly those items.
pub fn aggregate(
    source: &Partition,
    target: &Partition,
    weights: Option<&ItemWeights>,
) -> Result<OverlapTable, MatchingError> {
    if source.len() != target.len() {
        return Err(MatchingError::IncompatibleLength {
            left: source.len(),
            right: target.len(),
        });
    }

    let n = source.len();
    let p = source.cluster_count();
    let q = target.cluster_count();

    let mut counts = Array2::<usize>::zeros((p, q));
    for (&a, &b) in source.labels().iter().zip(target.labels()) {
        counts[[a - 1, b - 1]] += 1;
    }

    let mut table = Array2::<f64>::zeros((p + 1, q + 1));
    let mode = match weights {
        None => {
            for ((a, b), &count) in counts.indexed_iter() {
                #[allow(clippy::cast_precision_loss)]
                {
                    table[[a, b]] = count as f64;
                }
            }
            OverlapMode::Count
        }
        Some(weights) => {
            if weights.len() != n {
                let (rows, columns) = weights.view().dim();
                return Err(MatchingError::WeightDimension {
                    rows,
                    columns,
                    items: n,
                });
            }

            let affinity = item_affinities(target, weights);
            for (i, &a) in source.labels().iter().enumerate() {
                let mut row = table.row_mut(a - 1);
                row += &affinity.row(i);
            }
            // the sink column collected nothing but keep it exact
            table.column_mut(q).fill(0.0);
            OverlapMode::Weighted
        }
    };

    debug!(
        "overlap table computed ({}x{} clusters, {:?} mode)",
        p, q, mode
    );

    Ok(OverlapTable {
        weights: table,
        counts,
        items: n,
        mode,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn partition(labels: &[usize]) -> Partition {
        Partition::new(labels.to_vec()).unwrap()
    }

    #[test]
    fn test_count_mode() {
        let a = partition(&[1, 1, 2, 2, 2]);
        let b = partition(&[1, 2, 2, 2, 3]);
        let table = aggregate(&a, &b, None).unwrap();

        assert_eq!(table.source_clusters(), 2);
        assert_eq!(table.target_clusters(), 3);
        assert_eq!(table.items(), 5);
        assert_eq!(table.mode(), OverlapMode::Count);

        assert_eq!(table.count(1, 1), 1);
        assert_eq!(table.count(1, 2), 1);
        assert_eq!(table.count(2, 2), 2);
        assert_eq!(table.count(2, 3), 1);
        assert_eq!(table.count(1, 3), 0);

        assert!((table.weight(2, Target::Cluster(2)) - 2.0).abs() < 1e-12);
        assert!(table.weight(1, Target::Sink).abs() < 1e-12);
        assert_eq!(table.weights_with_sink().dim(), (3, 4));
        assert_eq!(table.real_weights().dim(), (2, 3));
    }

    #[test]
    fn test_counts_sum_to_items() {
        let a = partition(&[1, 2, 3, 1, 2, 3, 4]);
        let b = partition(&[2, 2, 1, 1, 3, 3, 3]);
        let table = aggregate(&a, &b, None).unwrap();
        assert_eq!(table.counts().sum(), 7);
    }

    #[test]
    fn test_incompatible_length() {
        let a = partition(&[1, 1, 2]);
        let b = partition(&[1, 2]);
        assert_eq!(
            aggregate(&a, &b, None).unwrap_err(),
            MatchingError::IncompatibleLength { left: 3, right: 2 }
        );
    }

    #[test]
    fn test_item_affinities() {
        let b = partition(&[1, 1, 2]);
        let weights = ItemWeights::from_rows(vec![
            vec![0.0, 1.0, 2.0],
            vec![1.0, 0.0, 3.0],
            vec![2.0, 3.0, 0.0],
        ])
        .unwrap();

        let affinity = item_affinities(&b, &weights);
        assert_eq!(affinity.dim(), (3, 3));
        // item 0: toward cluster 1 only item 1 counts, toward cluster 2 item 2
        assert!((affinity[[0, 0]] - 1.0).abs() < 1e-12);
        assert!((affinity[[0, 1]] - 2.0).abs() < 1e-12);
        assert!((affinity[[2, 0]] - 5.0).abs() < 1e-12);
        assert!(affinity[[2, 1]].abs() < 1e-12);
        // new cluster column
        assert!(affinity.column(2).iter().all(|v| v.abs() < 1e-12));
    }

    #[test]
    fn test_weighted_mode() {
        let a = partition(&[1, 1, 2]);
        let b = partition(&[1, 1, 2]);
        let weights = ItemWeights::from_rows(vec![
            vec![0.0, 1.0, 2.0],
            vec![1.0, 0.0, 3.0],
            vec![2.0, 3.0, 0.0],
        ])
        .unwrap();

        let table = aggregate(&a, &b, Some(&weights)).unwrap();
        assert_eq!(table.mode(), OverlapMode::Weighted);
        // items 0 and 1 toward cluster 1: 1 + 1
        assert!((table.weight(1, Target::Cluster(1)) - 2.0).abs() < 1e-12);
        // items 0 and 1 toward cluster 2: 2 + 3
        assert!((table.weight(1, Target::Cluster(2)) - 5.0).abs() < 1e-12);
        // item 2 toward cluster 1: 2 + 3, toward itself nothing
        assert!((table.weight(2, Target::Cluster(1)) - 5.0).abs() < 1e-12);
        assert!(table.weight(2, Target::Cluster(2)).abs() < 1e-12);
        assert!(table.weight(2, Target::Sink).abs() < 1e-12);
        // counts are still plain co-membership
        assert_eq!(table.count(1, 1), 2);
        assert_eq!(table.count(2, 2), 1);
    }

    #[test]
    fn test_weight_dimension_mismatch() {
        let a = partition(&[1, 1, 2]);
        let weights = ItemWeights::from_rows(vec![vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
        assert_eq!(
            aggregate(&a, &a, Some(&weights)).unwrap_err(),
            MatchingError::WeightDimension {
                rows: 2,
                columns: 2,
                items: 3
            }
        );
    }

    #[test]
    fn test_item_weights_validation() {
        assert!(matches!(
            ItemWeights::from_rows(vec![vec![0.0, 1.0], vec![1.0]]),
            Err(ValidationError::RaggedWeights { row: 1, .. })
        ));
        assert!(matches!(
            ItemWeights::from_rows(vec![vec![0.0, -1.0], vec![1.0, 0.0]]),
            Err(ValidationError::InvalidWeight { row: 0, column: 1, .. })
        ));
        assert_eq!(
            ItemWeights::new(Array2::zeros((2, 3))),
            Err(ValidationError::NotSquare {
                rows: 2,
                columns: 3
            })
        );

        let ok = ItemWeights::from_rows(vec![vec![0.0, 0.5], vec![0.5, 0.0]]).unwrap();
        assert_eq!(ok.len(), 2);
        assert!(!ok.is_empty());
        assert!((ok.get(0, 1) - 0.5).abs() < 1e-12);
    }
}
