//! Membership vectors, inline or one label per line.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::partition::{ClusterId, Partition};
use crate::parsing::ParseError;
use crate::utils::validation::{check_item_limit, parse_label, ValidationError};

/// Build a partition, renumbering ids when `compact` is set.
///
/// # Errors
///
/// Returns the `ValidationError` of [`Partition::new`] or [`Partition::compact`].
pub fn build_partition(labels: Vec<ClusterId>, compact: bool) -> Result<Partition, ValidationError> {
    if compact {
        Partition::compact(labels)
    } else {
        Partition::new(labels)
    }
}

/// Parse comma-separated labels such as `"7,6,1,1,7,3"`.
///
/// # Errors
///
/// Returns `ValidationError::EmptyPartition` for blank input, or the error of
/// the first token that is not a positive integer.
pub fn parse_inline_labels(text: &str) -> Result<Vec<ClusterId>, ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::EmptyPartition);
    }

    let mut labels = Vec::new();
    for (position, token) in text.split(',').enumerate() {
        check_item_limit(labels.len())?;
        labels.push(parse_label(token, position)?);
    }
    Ok(labels)
}

/// Parse an inline vector into a partition.
///
/// # Errors
///
/// Returns `ValidationError` for malformed labels or an invalid partition.
pub fn parse_inline(text: &str, compact: bool) -> Result<Partition, ValidationError> {
    build_partition(parse_inline_labels(text)?, compact)
}

/// Number of labels in membership text: lines up to the last non-empty one.
#[must_use]
pub fn count_labels(text: &str) -> usize {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .last()
        .map_or(0, |(idx, _)| idx + 1)
}

/// Parse membership text holding one label per line.
///
/// With `expected = Some(n)` exactly `n` labels are read and any non-empty
/// line after them is an error. With `None` the count comes from
/// [`count_labels`]. Blank lines after the labels are ignored.
///
/// # Errors
///
/// Returns `ValidationError::EmptyPartition` when no label is present,
/// `ValidationError::LengthMismatch` when fewer than `n` lines exist,
/// `ValidationError::TrailingContent` for extra labels, or the label error of
/// the first malformed line.
pub fn parse_membership_text(
    text: &str,
    expected: Option<usize>,
) -> Result<Vec<ClusterId>, ValidationError> {
    let count = expected.unwrap_or_else(|| count_labels(text));
    if count == 0 {
        return Err(ValidationError::EmptyPartition);
    }
    check_item_limit(count - 1)?;

    let mut labels = Vec::with_capacity(count);
    for (idx, line) in text.lines().enumerate() {
        if idx < count {
            labels.push(parse_label(line, idx)?);
        } else if !line.trim().is_empty() {
            return Err(ValidationError::TrailingContent {
                line: idx + 1,
                expected: count,
            });
        }
    }

    if labels.len() < count {
        return Err(ValidationError::LengthMismatch {
            expected: count,
            found: labels.len(),
        });
    }
    Ok(labels)
}

fn read_text(path: &Path) -> Result<String, ParseError> {
    std::fs::read_to_string(path).map_err(|e| ParseError::io(path, e))
}

/// Count the labels of a membership file.
///
/// # Errors
///
/// Returns `ParseError::NotFound` or `ParseError::Io` if the file cannot be read.
pub fn count_labels_in_file(path: &Path) -> Result<usize, ParseError> {
    Ok(count_labels(&read_text(path)?))
}

/// Read the labels of a membership file.
///
/// # Errors
///
/// Returns `ParseError::NotFound` or `ParseError::Io` if the file cannot be
/// read, and `ParseError::Validation` naming the file for malformed content.
pub fn read_membership_file(
    path: &Path,
    expected: Option<usize>,
) -> Result<Vec<ClusterId>, ParseError> {
    let text = read_text(path)?;
    parse_membership_text(&text, expected)
        .map_err(|e| ParseError::validation(path.display(), e))
}

/// Read a membership file into a partition.
///
/// # Errors
///
/// Same as [`read_membership_file`], plus `ParseError::Validation` when the
/// labels do not form a valid partition.
pub fn read_partition(
    path: &Path,
    expected: Option<usize>,
    compact: bool,
) -> Result<Partition, ParseError> {
    let labels = read_membership_file(path, expected)?;
    build_partition(labels, compact).map_err(|e| ParseError::validation(path.display(), e))
}

/// Read every file as a partition over the same items.
///
/// The item count is taken from the first file; every other file must hold
/// exactly that many labels.
///
/// # Errors
///
/// Returns `ParseError::NotFound` for an empty list, or the first error met
/// while reading the files.
pub fn read_partitions(paths: &[PathBuf], compact: bool) -> Result<Vec<Partition>, ParseError> {
    let first = paths
        .first()
        .ok_or_else(|| ParseError::NotFound("no membership files to read".to_string()))?;
    let items = count_labels_in_file(first)?;
    debug!("{} membership files, {} items each", paths.len(), items);

    paths
        .iter()
        .map(|path| read_partition(path, Some(items), compact))
        .collect()
}

/// Resolve a command-line operand: an existing file is read, anything else
/// is parsed as an inline vector.
///
/// # Errors
///
/// Returns `ParseError::Validation` naming the operand for malformed input, or
/// an I/O error when the file cannot be read.
pub fn resolve_operand(operand: &str, compact: bool) -> Result<Partition, ParseError> {
    let path = Path::new(operand);
    if path.is_file() {
        debug!("reading membership file {}", path.display());
        return read_partition(path, None, compact);
    }
    parse_inline(operand, compact).map_err(|e| ParseError::validation(format!("'{operand}'"), e))
}
