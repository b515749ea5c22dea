//! All-pairs comparison of a set of partitions.
//!
//! [`BatchComparator`] fills a symmetric [`DistanceMatrix`] with one edit
//! distance per unordered pair, running the pairs on a rayon thread pool.
//! [`output::write_matrix`] serializes the result as CSV.

use std::path::PathBuf;

use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use crate::core::matrix::DistanceMatrix;
use crate::core::partition::Partition;
use crate::matching::{MatchingEngine, MatchingError};
use crate::parsing::ParseError;

pub mod output;

#[derive(Error, Debug)]
pub enum BatchError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Matching(#[from] MatchingError),

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Csv { path: PathBuf, source: csv::Error },

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Computes the pairwise distance matrix of a set of partitions
#[derive(Debug, Clone, Default)]
pub struct BatchComparator<'a> {
    engine: MatchingEngine<'a>,
    /// Worker threads; `None` uses the global rayon pool
    threads: Option<usize>,
}

impl<'a> BatchComparator<'a> {
    #[must_use]
    pub fn new(engine: MatchingEngine<'a>) -> Self {
        Self {
            engine,
            threads: None,
        }
    }

    /// Run the comparisons on a dedicated pool of `threads` workers
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Distance between every pair of partitions, rows named `sol0..`.
    ///
    /// Entry `(i, j)` with `i < j` is the edit distance from partition `i` to
    /// partition `j`, mirrored into `(j, i)`. Nothing is returned unless every
    /// pair succeeds.
    ///
    /// # Errors
    ///
    /// Returns `BatchError::Matching` when two partitions (or the weights) do
    /// not cover the same items, and `BatchError::ThreadPool` if the dedicated
    /// pool cannot be created.
    pub fn distance_matrix(&self, partitions: &[Partition]) -> Result<DistanceMatrix, BatchError> {
        let m = partitions.len();
        let pairs: Vec<(usize, usize)> = (0..m)
            .flat_map(|i| (i + 1..m).map(move |j| (i, j)))
            .collect();
        info!("comparing {} partitions ({} pairs)", m, pairs.len());

        let compute = || {
            pairs
                .par_iter()
                .map(|&(i, j)| {
                    self.engine
                        .edit_distance(&partitions[i], &partitions[j])
                        .map(|d| (i, j, d))
                })
                .collect::<Result<Vec<_>, MatchingError>>()
        };

        let distances = match self.threads {
            Some(threads) => {
                debug!("using a pool of {} threads", threads);
                rayon::ThreadPoolBuilder::new()
                    .num_threads(threads)
                    .build()?
                    .install(compute)?
            }
            None => compute()?,
        };

        let mut matrix = DistanceMatrix::zeros(m);
        for (i, j, d) in distances {
            matrix.set_symmetric(i, j, d);
        }
        Ok(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::overlap::ItemWeights;

    fn partitions(all: &[&[usize]]) -> Vec<Partition> {
        all.iter()
            .map(|labels| Partition::new(labels.to_vec()).unwrap())
            .collect()
    }

    #[test]
    fn test_batch_example() {
        let solutions = partitions(&[&[1, 1, 2], &[1, 2, 2], &[1, 1, 2]]);
        let matrix = BatchComparator::default()
            .distance_matrix(&solutions)
            .unwrap();

        assert_eq!(matrix.size(), 3);
        assert!(matrix.is_symmetric());
        assert_eq!(matrix.get(0, 2), 0);
        assert_eq!(matrix.get(2, 0), 0);
        assert_eq!(matrix.get(0, 1), 1);
        assert_eq!(matrix.get(1, 2), 1);
        assert_eq!(matrix.names(), &["sol0", "sol1", "sol2"]);
    }

    #[test]
    fn test_dedicated_pool_matches_global_pool() {
        let solutions = partitions(&[
            &[1, 1, 2, 2, 3],
            &[1, 2, 2, 3, 3],
            &[3, 3, 1, 1, 2],
            &[1, 1, 1, 1, 1],
        ]);
        let global = BatchComparator::default()
            .distance_matrix(&solutions)
            .unwrap();
        let pooled = BatchComparator::default()
            .with_threads(2)
            .distance_matrix(&solutions)
            .unwrap();
        assert_eq!(global, pooled);
        assert_eq!(global.get(0, 2), 0);
    }

    #[test]
    fn test_single_and_empty_input() {
        let single = BatchComparator::default()
            .distance_matrix(&partitions(&[&[1, 2]]))
            .unwrap();
        assert_eq!(single.size(), 1);
        assert_eq!(single.get(0, 0), 0);

        let empty = BatchComparator::default().distance_matrix(&[]).unwrap();
        assert_eq!(empty.size(), 0);
    }

    #[test]
    fn test_length_mismatch_fails_whole_batch() {
        let solutions = partitions(&[&[1, 1, 2], &[1, 2]]);
        let err = BatchComparator::default()
            .distance_matrix(&solutions)
            .unwrap_err();
        assert!(matches!(
            err,
            BatchError::Matching(MatchingError::IncompatibleLength { left: 3, right: 2 })
        ));
    }

    #[test]
    fn test_weighted_batch() {
        let weights = ItemWeights::from_rows(vec![vec![1.0; 3]; 3]).unwrap();
        let solutions = partitions(&[&[1, 1, 2], &[1, 1, 2]]);
        let matrix = BatchComparator::new(MatchingEngine::new().with_weights(&weights))
            .distance_matrix(&solutions)
            .unwrap();
        assert!(matrix.is_symmetric());
        assert!(matrix.get(0, 1) <= 3);
    }
}
