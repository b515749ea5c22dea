//! Maximum-score assignment with a canonical choice among the optima.
//!
//! The optimum itself comes from the Kuhn-Munkres solver of the `munkres`
//! crate. Dual potentials for that optimum then mark the tight cells, and every
//! maximum assignment is a perfect matching on tight cells. Rows are fixed in
//! ascending order, each to the lowest positive column some optimum allows.

use std::collections::VecDeque;

use munkres::{solve_assignment, WeightMatrix};
use ndarray::ArrayView2;
use tracing::debug;

use crate::matching::MatchingError;

/// Square minimization problem built from a `p x q` score table
struct CostMatrix<'a> {
    scores: ArrayView2<'a, i64>,
    max_score: i64,
    size: usize,
}

impl CostMatrix<'_> {
    fn score(&self, row: usize, column: usize) -> i64 {
        let (p, q) = self.scores.dim();
        if row < p && column < q {
            self.scores[[row, column]]
        } else {
            0
        }
    }

    fn cost(&self, row: usize, column: usize) -> i64 {
        self.max_score - self.score(row, column)
    }
}

/// Rows of `scores` matched to columns, maximizing the total score.
///
/// Among all maximum assignments the result is the lexicographically smallest
/// when read row by row, where a row's key is its column if the cell score is
/// positive and "unmatched" (above every column) otherwise. Entry `a` is
/// `Some(b)` for a positive cell and `None` for an unmatched row.
///
/// Scores must be non-negative.
///
/// # Errors
///
/// Returns `MatchingError::Unsolvable` when the underlying solver fails or
/// returns something other than a permutation.
pub fn max_score_assignment(scores: ArrayView2<'_, i64>) -> Result<Vec<Option<usize>>, MatchingError> {
    let (p, q) = scores.dim();
    let size = p.max(q);
    if size == 0 {
        return Ok(Vec::new());
    }

    let matrix = CostMatrix {
        scores,
        max_score: scores.iter().copied().max().unwrap_or(0),
        size,
    };

    let mut column_of = optimal_permutation(&matrix)?;
    canonicalize(&matrix, &mut column_of);

    Ok(column_of
        .into_iter()
        .take(p)
        .enumerate()
        .map(|(a, b)| (b < q && scores[[a, b]] > 0).then_some(b))
        .collect())
}

fn optimal_permutation(matrix: &CostMatrix<'_>) -> Result<Vec<usize>, MatchingError> {
    let n = matrix.size;
    let mut weights = WeightMatrix::from_fn(n, |(i, j)| matrix.cost(i, j));
    let positions = solve_assignment(&mut weights)
        .map_err(|e| MatchingError::Unsolvable(format!("{e:?}")))?;

    let mut column_of = vec![usize::MAX; n];
    let mut taken = vec![false; n];
    for position in positions {
        let (row, column) = (position.row, position.column);
        if row >= n || column >= n || taken[column] || column_of[row] != usize::MAX {
            return Err(MatchingError::Unsolvable(format!(
                "cell ({row}, {column}) breaks the assignment"
            )));
        }
        column_of[row] = column;
        taken[column] = true;
    }
    if column_of.contains(&usize::MAX) {
        return Err(MatchingError::Unsolvable(
            "some rows were left without a column".to_string(),
        ));
    }
    Ok(column_of)
}

/// Row potentials `u` and column potentials `v` with `cost - u - v >= 0`
/// everywhere and `== 0` on the assignment.
///
/// Shortest paths over columns, where moving row `i` from its column to `j`
/// costs `cost(i, j) - cost(i, column_of[i])`. No negative cycle exists since
/// the assignment is optimal, so `n` rounds of relaxation are enough.
fn potentials(matrix: &CostMatrix<'_>, column_of: &[usize]) -> (Vec<i128>, Vec<i128>) {
    let n = matrix.size;
    let mut dist = vec![0_i128; n];

    for _ in 0..n {
        let mut changed = false;
        for (i, &from) in column_of.iter().enumerate() {
            let base = dist[from] - i128::from(matrix.cost(i, from));
            for (j, d) in dist.iter_mut().enumerate() {
                let candidate = base + i128::from(matrix.cost(i, j));
                if candidate < *d {
                    *d = candidate;
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }

    let u = column_of
        .iter()
        .enumerate()
        .map(|(i, &j)| i128::from(matrix.cost(i, j)) - dist[j])
        .collect();
    (u, dist)
}

fn canonicalize(matrix: &CostMatrix<'_>, column_of: &mut [usize]) {
    let n = matrix.size;
    let (p, q) = matrix.scores.dim();
    let (u, v) = potentials(matrix, column_of);
    let tight = |row: usize, column: usize| {
        i128::from(matrix.cost(row, column)) - u[row] - v[column] == 0
    };

    let mut row_of = vec![0usize; n];
    for (row, &column) in column_of.iter().enumerate() {
        row_of[column] = row;
    }
    let mut fixed = vec![false; n];
    let mut moved = 0usize;

    for a in 0..p {
        let current = column_of[a];
        let key = if current < q && matrix.score(a, current) > 0 {
            current
        } else {
            q
        };

        for c in 0..key {
            if fixed[c] || matrix.score(a, c) <= 0 || !tight(a, c) {
                continue;
            }
            if let Some(parent) = alternating_path(c, current, &row_of, &fixed, &tight) {
                reroute(a, c, current, &parent, column_of, &mut row_of);
                moved += 1;
                break;
            }
        }
        fixed[column_of[a]] = true;
    }

    if moved > 0 {
        debug!("tie-break moved {} rows to lower columns", moved);
    }
}

/// Breadth-first search for rows that can shift along tight cells so that row
/// `a` can take column `start` while giving up `freed`.
///
/// Returns, for every reached column, the column whose row moves into it.
fn alternating_path(
    start: usize,
    freed: usize,
    row_of: &[usize],
    fixed: &[bool],
    tight: &impl Fn(usize, usize) -> bool,
) -> Option<Vec<usize>> {
    let n = row_of.len();
    let mut parent = vec![usize::MAX; n];
    let mut seen = vec![false; n];
    let mut queue = VecDeque::from([start]);
    seen[start] = true;

    while let Some(column) = queue.pop_front() {
        let row = row_of[column];
        for next in 0..n {
            if seen[next] || fixed[next] || !tight(row, next) {
                continue;
            }
            seen[next] = true;
            parent[next] = column;
            if next == freed {
                return Some(parent);
            }
            queue.push_back(next);
        }
    }
    None
}

fn reroute(
    a: usize,
    start: usize,
    freed: usize,
    parent: &[usize],
    column_of: &mut [usize],
    row_of: &mut [usize],
) {
    let mut column = freed;
    loop {
        let from = parent[column];
        let row = row_of[from];
        column_of[row] = column;
        row_of[column] = row;
        if from == start {
            break;
        }
        column = from;
    }
    column_of[a] = start;
    row_of[start] = a;
}
