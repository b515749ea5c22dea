use crate::matching::correspondence::Correspondence;
use crate::matching::overlap::OverlapTable;

/// Number of items that must change cluster under `correspondence`.
///
/// Items of source cluster `a` that also sit in target cluster `f(a)` keep their
/// cluster; every other item is an edit. The result lies in `0..=n`.
#[must_use]
pub fn edit_distance(table: &OverlapTable, correspondence: &Correspondence) -> usize {
    let retained = correspondence.retained_items(table);
    debug_assert!(retained <= table.items());
    table.items() - retained
}
