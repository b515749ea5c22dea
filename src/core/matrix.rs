use serde::Serialize;

/// Square, symmetric matrix of pairwise edit distances
///
/// Row and column `i` both refer to the `i`-th compared partition, named by
/// `names[i]`. The diagonal is always zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DistanceMatrix {
    names: Vec<String>,
    values: Vec<Vec<usize>>,
}

impl DistanceMatrix {
    /// Create an all-zero matrix with the default `sol0..sol(m-1)` names
    #[must_use]
    pub fn zeros(size: usize) -> Self {
        Self::with_names((0..size).map(|i| format!("sol{i}")).collect())
    }

    /// Create an all-zero matrix, one row per name
    #[must_use]
    pub fn with_names(names: Vec<String>) -> Self {
        let size = names.len();
        Self {
            names,
            values: vec![vec![0; size]; size],
        }
    }

    /// Set both `(i, j)` and `(j, i)`
    ///
    /// # Panics
    ///
    /// Panics if `i == j` with a non-zero distance, or if an index is out of range.
    pub fn set_symmetric(&mut self, i: usize, j: usize, distance: usize) {
        assert!(i != j || distance == 0, "diagonal must stay zero");
        self.values[i][j] = distance;
        self.values[j][i] = distance;
    }

    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> usize {
        self.values[i][j]
    }

    /// Number of rows (and columns)
    #[must_use]
    pub fn size(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn row(&self, i: usize) -> &[usize] {
        &self.values[i]
    }

    /// True when the matrix equals its transpose and has a zero diagonal
    #[must_use]
    pub fn is_symmetric(&self) -> bool {
        let m = self.size();
        (0..m).all(|i| {
            self.values[i][i] == 0 && (0..i).all(|j| self.values[i][j] == self.values[j][i])
        })
    }
}
