//! Centralized validation and helper functions.

/// Maximum number of items allowed in a single partition (DOS protection)
pub const MAX_ITEMS: usize = 10_000_000;

/// Validation error types for labels, membership files and weight matrices
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Empty membership: at least one item is required")]
    EmptyPartition,
    #[error("Invalid label at position {position}: '{token}' is not an integer")]
    InvalidLabel { position: usize, token: String },
    #[error("Invalid label at position {position}: {value} is not a positive cluster id")]
    NonPositiveLabel { position: usize, value: i64 },
    #[error("Wrong number of labels: expected {expected}, found {found}")]
    LengthMismatch { expected: usize, found: usize },
    #[error("Unexpected content on line {line}: more labels than the expected {expected}")]
    TrailingContent { line: usize, expected: usize },
    #[error("Cluster {id} is empty: ids must cover 1..={cluster_count} without gaps")]
    EmptyCluster { id: usize, cluster_count: usize },
    #[error("Label {value} at position {position} is out of range: {items} items use at most ids 1..={items}")]
    LabelOutOfRange {
        position: usize,
        value: usize,
        items: usize,
    },
    #[error("Too many items: {0} exceeds maximum allowed ({MAX_ITEMS})")]
    TooManyItems(usize),
    #[error("Invalid weight at row {row}, column {column}: '{value}'")]
    InvalidWeight {
        row: usize,
        column: usize,
        value: String,
    },
    #[error("Weight matrix must be square: it has {rows} rows and {columns} columns")]
    NotSquare { rows: usize, columns: usize },
    #[error("Weight matrix must be square: row {row} has {found} fields, expected {expected}")]
    RaggedWeights {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Check if adding another item would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new item.
/// Returns an error if adding would exceed the limit.
///
/// # Errors
///
/// Returns `ValidationError::TooManyItems` when `count` already reached [`MAX_ITEMS`].
pub fn check_item_limit(count: usize) -> Result<(), ValidationError> {
    if count >= MAX_ITEMS {
        Err(ValidationError::TooManyItems(count))
    } else {
        Ok(())
    }
}

/// Parse a single cluster label.
///
/// `position` is 0-based and only used for diagnostics. Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns `ValidationError::InvalidLabel` for non-integer tokens and
/// `ValidationError::NonPositiveLabel` for zero or negative ids.
pub fn parse_label(token: &str, position: usize) -> Result<usize, ValidationError> {
    let trimmed = token.trim();
    let value: i64 = trimmed.parse().map_err(|_| ValidationError::InvalidLabel {
        position,
        token: trimmed.to_string(),
    })?;

    if value <= 0 {
        return Err(ValidationError::NonPositiveLabel { position, value });
    }

    usize::try_from(value).map_err(|_| ValidationError::InvalidLabel {
        position,
        token: trimmed.to_string(),
    })
}

/// Parse a single entry of an item weight matrix.
///
/// Weights must be finite and non-negative so that a zero-weight sink is
/// never worse than a real correspondence.
///
/// # Errors
///
/// Returns `ValidationError::InvalidWeight` when the token is not a finite,
/// non-negative number.
pub fn parse_weight(token: &str, row: usize, column: usize) -> Result<f64, ValidationError> {
    let trimmed = token.trim();
    let invalid = || ValidationError::InvalidWeight {
        row,
        column,
        value: trimmed.to_string(),
    };

    let value: f64 = trimmed.parse().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    Ok(value)
}

/// Verify that the labels use every id in `1..=max` at least once.
///
/// Returns the per-cluster sizes indexed by `id - 1`.
///
/// # Errors
///
/// Returns `ValidationError::EmptyPartition` for an empty slice,
/// `ValidationError::LabelOutOfRange` for the first id above the item count
/// and `ValidationError::EmptyCluster` for the first id with no item.
pub fn cluster_sizes(labels: &[usize]) -> Result<Vec<usize>, ValidationError> {
    let max = labels
        .iter()
        .copied()
        .max()
        .ok_or(ValidationError::EmptyPartition)?;

    // n items fill at most n clusters; checked before sizing the table
    if max > labels.len() {
        let position = labels.iter().position(|&l| l > labels.len()).unwrap_or(0);
        return Err(ValidationError::LabelOutOfRange {
            position,
            value: labels[position],
            items: labels.len(),
        });
    }

    let mut sizes = vec![0usize; max];
    for &label in labels {
        sizes[label - 1] += 1;
    }

    if let Some(missing) = sizes.iter().position(|&size| size == 0) {
        return Err(ValidationError::EmptyCluster {
            id: missing + 1,
            cluster_count: max,
        });
    }

    Ok(sizes)
}
