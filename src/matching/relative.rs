use crate::core::partition::{ClusterId, Partition};
use crate::matching::correspondence::Correspondence;

/// Express `target` in the id space of the source partition.
///
/// Items of a matched target cluster `b` take the source id `a` with
/// `f(a) = b`. Each unmatched target cluster becomes a new cluster numbered
/// after the `source_clusters` existing ones, in ascending order of `b`.
///
/// # Panics
///
/// Panics if `correspondence` was not built for `target`'s clusters.
#[must_use]
pub fn relative_membership(
    target: &Partition,
    source_clusters: usize,
    correspondence: &Correspondence,
) -> Vec<ClusterId> {
    assert_eq!(
        correspondence.target_clusters(),
        target.cluster_count(),
        "correspondence does not match the target partition"
    );

    // new id for every target cluster, indexed by b - 1
    let mut relabel = vec![0; target.cluster_count()];
    let mut next_fresh = source_clusters + 1;
    for (idx, slot) in relabel.iter_mut().enumerate() {
        *slot = match correspondence.source_for(idx + 1) {
            Some(a) => a,
            None => {
                let fresh = next_fresh;
                next_fresh += 1;
                fresh
            }
        };
    }

    target.labels().iter().map(|&b| relabel[b - 1]).collect()
}
