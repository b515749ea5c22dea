//! CSV serialization of the distance matrix.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::batch::BatchError;
use crate::core::matrix::DistanceMatrix;

/// File name of the matrix inside the output directory
pub const DEFAULT_MATRIX_FILE_NAME: &str = "dist-matrix-Edit.csv";

/// Write `matrix` as CSV: a header `,sol0,sol1,...` then one named row per partition.
///
/// # Errors
///
/// Returns `csv::Error` if a record cannot be written.
pub fn write_csv<W: Write>(matrix: &DistanceMatrix, writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec![String::new()];
    header.extend(matrix.names().iter().cloned());
    wtr.write_record(&header)?;

    for (i, name) in matrix.names().iter().enumerate() {
        let mut record = vec![name.clone()];
        record.extend(matrix.row(i).iter().map(ToString::to_string));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write `matrix` to [`DEFAULT_MATRIX_FILE_NAME`] inside `output_dir`, creating
/// the directory when needed.
///
/// # Errors
///
/// Returns `BatchError::Io` if the directory or file cannot be created and
/// `BatchError::Csv` if writing fails.
pub fn write_matrix(matrix: &DistanceMatrix, output_dir: &Path) -> Result<PathBuf, BatchError> {
    std::fs::create_dir_all(output_dir).map_err(|source| BatchError::Io {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let path = output_dir.join(DEFAULT_MATRIX_FILE_NAME);
    let file = std::fs::File::create(&path).map_err(|source| BatchError::Io {
        path: path.clone(),
        source,
    })?;

    write_csv(matrix, std::io::BufWriter::new(file)).map_err(|source| BatchError::Csv {
        path: path.clone(),
        source,
    })?;

    info!("wrote {}x{} distance matrix to {}", matrix.size(), matrix.size(), path.display());
    Ok(path)
}
