//! Pairwise item weights from a headerless CSV file.

use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::matching::overlap::ItemWeights;
use crate::parsing::ParseError;
use crate::utils::validation::{check_item_limit, parse_weight, ValidationError};

/// Parse an `n x n` weight matrix from CSV text without header.
///
/// `origin` names the source in error messages.
///
/// # Errors
///
/// Returns `ParseError::Csv` for malformed CSV and `ParseError::Validation`
/// for non-numeric, negative or non-finite entries or a non-square matrix.
pub fn parse_weights<R: Read>(reader: R, origin: &Path) -> Result<ItemWeights, ParseError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let invalid = |e: ValidationError| ParseError::validation(origin.display(), e);

    let mut rows: Vec<Vec<f64>> = Vec::new();
    for (row, record) in rdr.records().enumerate() {
        let record = record.map_err(|source| ParseError::Csv {
            path: origin.to_path_buf(),
            source,
        })?;
        check_item_limit(rows.len()).map_err(invalid)?;

        let values = record
            .iter()
            .enumerate()
            .map(|(column, field)| parse_weight(field, row, column))
            .collect::<Result<Vec<f64>, _>>()
            .map_err(invalid)?;
        rows.push(values);
    }

    if rows.is_empty() {
        return Err(invalid(ValidationError::EmptyPartition));
    }

    let weights = ItemWeights::from_rows(rows).map_err(invalid)?;
    debug!("read {0}x{0} weight matrix from {1}", weights.len(), origin.display());
    Ok(weights)
}

/// Read an `n x n` weight matrix from a CSV file.
///
/// # Errors
///
/// Returns `ParseError::NotFound` or `ParseError::Io` when the file cannot be
/// opened, and the errors of [`parse_weights`] for its content.
pub fn read_weights_file(path: &Path) -> Result<ItemWeights, ParseError> {
    let file = std::fs::File::open(path).map_err(|e| ParseError::io(path, e))?;
    parse_weights(std::io::BufReader::new(file), path)
}
