//! Cluster matching engine and edit distance between partitions.
//!
//! This module provides the core comparison functionality:
//!
//! - [`aggregate`]: Builds the [`OverlapTable`] between the clusters of two partitions
//! - [`solve`]: Finds the best cluster-to-cluster [`Correspondence`]
//! - [`edit_distance`]: Number of items that must change cluster
//! - [`relative_membership`]: One partition relabeled in the other's id space
//! - [`MatchingEngine`]: Main entry point chaining the steps above
//!
//! ## Matching Algorithm
//!
//! 1. **Overlap**: For every source cluster `a` and target cluster `b`, count the
//!    items assigned to both (or sum pairwise item weights in weighted mode)
//! 2. **Correspondence**: Solve the assignment between source and target
//!    clusters keeping the most items (weights break ties in weighted mode);
//!    clusters with no useful partner go to a zero-weight sink
//! 3. **Distance**: `n` minus the items kept by the chosen correspondence
//! 4. **Relabeling**: Matched target clusters take their source id, unmatched
//!    ones get fresh ids after the source range
//!
//! ## Example
//!
//! ```rust
//! use partition_edit::{MatchingEngine, Partition};
//!
//! let a = Partition::new(vec![1, 1, 2, 2]).unwrap();
//! let b = Partition::new(vec![2, 2, 1, 1]).unwrap();
//!
//! let engine = MatchingEngine::new();
//! let comparison = engine.compare(&a, &b).unwrap();
//!
//! assert_eq!(comparison.distance, 0);
//! assert_eq!(comparison.relative_membership, vec![1, 1, 2, 2]);
//! ```

use thiserror::Error;

pub mod assignment;
pub mod correspondence;
pub mod distance;
pub mod engine;
pub mod overlap;
pub mod relative;
pub mod solver;

pub use correspondence::{Correspondence, Target};
pub use distance::edit_distance;
pub use engine::{Comparison, MatchingConfig, MatchingEngine};
pub use overlap::{aggregate, ItemWeights, OverlapTable};
pub use relative::relative_membership;
pub use solver::{solve, SolverPolicy};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchingError {
    #[error("Cannot compare partitions of different sizes: {left} vs {right} items")]
    IncompatibleLength { left: usize, right: usize },

    #[error("Weight matrix is {rows}x{columns} but the partitions have {items} items")]
    WeightDimension {
        rows: usize,
        columns: usize,
        items: usize,
    },

    #[error("Cluster assignment could not be solved: {0}")]
    Unsolvable(String),
}
