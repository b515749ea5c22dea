//! Readers turning text and files into validated inputs.
//!
//! This module provides parsers for:
//!
//! - **Inline vectors**: comma-separated labels such as `"7,6,1,1,7,3"`
//! - **Membership files**: one positive cluster id per line
//! - **Weight matrices**: headerless CSV with `n` rows of `n` numbers
//! - **Solution discovery**: membership files found by name prefix or listed
//!   in a solutions file, in natural order
//!
//! ## Example
//!
//! ```rust
//! use partition_edit::parsing::membership::{parse_inline, parse_membership_text};
//!
//! let partition = parse_inline("2,2,1,1", false).unwrap();
//! assert_eq!(partition.cluster_count(), 2);
//!
//! // blank trailing lines are tolerated
//! let labels = parse_membership_text("1\n2\n2\n\n", None).unwrap();
//! assert_eq!(labels, vec![1, 2, 2]);
//! ```

use std::path::PathBuf;

use thiserror::Error;

use crate::utils::validation::ValidationError;

pub mod discovery;
pub mod membership;
pub mod weights;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input {origin}: {source}")]
    Validation {
        origin: String,
        source: ValidationError,
    },

    #[error("Malformed CSV in {}: {source}", path.display())]
    Csv { path: PathBuf, source: csv::Error },
}

impl ParseError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(path.display().to_string())
        } else {
            Self::Io { path, source }
        }
    }

    pub(crate) fn validation(origin: impl std::fmt::Display, source: ValidationError) -> Self {
        Self::Validation {
            origin: origin.to_string(),
            source,
        }
    }
}
