//! Locating the membership files of a batch run.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::parsing::ParseError;
use crate::utils::natural::natural_cmp;

/// Default file name prefix of discovered solutions
pub const DEFAULT_PREFIX: &str = "membership";

fn sort_naturally(paths: &mut [PathBuf]) {
    paths.sort_by(|a, b| natural_cmp(&a.to_string_lossy(), &b.to_string_lossy()));
}

/// Regular files in `dir` whose name starts with `prefix`, in natural order.
///
/// # Errors
///
/// Returns `ParseError::NotFound` when the directory is missing or holds no
/// matching file, and `ParseError::Io` when it cannot be listed.
pub fn discover_solutions(dir: &Path, prefix: &str) -> Result<Vec<PathBuf>, ParseError> {
    let entries = std::fs::read_dir(dir).map_err(|e| ParseError::io(dir, e))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ParseError::io(dir, e))?;
        let path = entry.path();
        let matches_prefix = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with(prefix));
        if matches_prefix && path.is_file() {
            paths.push(path);
        }
    }

    if paths.is_empty() {
        return Err(ParseError::NotFound(format!(
            "no files starting with '{prefix}' in {}",
            dir.display()
        )));
    }

    sort_naturally(&mut paths);
    debug!("discovered {} solutions in {}", paths.len(), dir.display());
    Ok(paths)
}

/// Paths listed one per line in `list`, resolved against `base_dir`, in natural order.
///
/// Blank lines are skipped and absolute entries are kept as they are.
///
/// # Errors
///
/// Returns `ParseError::NotFound` when the list is missing or empty, and
/// `ParseError::Io` when it cannot be read.
pub fn read_solutions_list(list: &Path, base_dir: &Path) -> Result<Vec<PathBuf>, ParseError> {
    let text = std::fs::read_to_string(list).map_err(|e| ParseError::io(list, e))?;

    let mut paths: Vec<PathBuf> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| base_dir.join(line))
        .collect();

    if paths.is_empty() {
        return Err(ParseError::NotFound(format!(
            "no solutions listed in {}",
            list.display()
        )));
    }

    sort_naturally(&mut paths);
    debug!("{} solutions listed in {}", paths.len(), list.display());
    Ok(paths)
}
