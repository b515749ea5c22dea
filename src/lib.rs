//! # partition-edit
//!
//! A library for measuring how far apart two partitions of the same items are.
//!
//! Clustering and community-detection runs produce membership vectors that
//! assign every item a cluster id. Two runs rarely agree on the ids themselves,
//! so comparing the vectors position by position is meaningless. The edit
//! distance used here is the smallest number of items that must change cluster
//! once the clusters of both partitions are matched one-to-one in the best
//! possible way.
//!
//! ## Features
//!
//! - **Exact matching**: Kuhn-Munkres assignment between clusters, with a sink
//!   for clusters that have no useful counterpart and a fixed choice among ties
//! - **Greedy fallback**: Heaviest-overlap-first matching for very large inputs
//! - **Relative membership**: One partition relabeled in the ids of another
//! - **Weighted overlap**: Pairwise item affinities break ties between counts
//! - **Batch mode**: Parallel all-pairs distance matrix written as CSV
//!
//! ## Example
//!
//! ```rust
//! use partition_edit::{MatchingEngine, Partition};
//!
//! let a = Partition::new(vec![1, 1, 1, 1]).unwrap();
//! let b = Partition::new(vec![1, 2, 3, 4]).unwrap();
//!
//! let engine = MatchingEngine::new();
//! let comparison = engine.compare(&a, &b).unwrap();
//!
//! assert_eq!(comparison.distance, 3);
//! assert_eq!(comparison.relative_membership, vec![1, 2, 3, 4]);
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Partitions and distance matrices
//! - [`matching`]: Overlap tables, correspondence solvers and the matching engine
//! - [`batch`]: All-pairs comparison and CSV output
//! - [`parsing`]: Membership vectors, weight matrices and solution discovery
//! - [`cli`]: Command-line interface implementation

pub mod batch;
pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use batch::BatchComparator;
pub use core::matrix::DistanceMatrix;
pub use core::partition::{ClusterId, Partition};
pub use matching::engine::{Comparison, MatchingConfig, MatchingEngine};
pub use matching::overlap::ItemWeights;
pub use matching::solver::SolverPolicy;
