//! Core data types for partition comparison.
//!
//! - [`Partition`]: A validated membership vector, one cluster id per item
//! - [`DistanceMatrix`]: Pairwise edit distances between several partitions
//!
//! ## Cluster Ids
//!
//! Cluster ids are positive and contiguous: a partition with `k` clusters uses
//! exactly the ids `1..=k`. Inputs with gaps can be renumbered with
//! [`Partition::compact`].
//!
//! [`Partition`]: partition::Partition
//! [`Partition::compact`]: partition::Partition::compact
//! [`DistanceMatrix`]: matrix::DistanceMatrix

pub mod matrix;
pub mod partition;
