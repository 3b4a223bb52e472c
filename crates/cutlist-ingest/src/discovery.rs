//! Order file discovery.

use std::path::{Path, PathBuf};

use crate::error::{IngestError, Result};

/// Number of leading digits that marks a file as a machine-generated
/// companion rather than an order file.
const SKIP_DIGIT_PREFIX: usize = 3;

/// Returns true for `*.csv` names that do not start with three digits.
pub fn is_order_file_name(name: &str) -> bool {
    let is_csv = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return false;
    }
    let leading_digits = name
        .chars()
        .take(SKIP_DIGIT_PREFIX)
        .filter(|ch| is_decimal_digit(*ch))
        .count();
    leading_digits < SKIP_DIGIT_PREFIX
}

fn is_decimal_digit(ch: char) -> bool {
    ch.is_ascii_digit() || ('０'..='９').contains(&ch)
}

/// Lists order files in a directory.
///
/// Returns files sorted by filename.
pub fn list_order_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let is_order = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(is_order_file_name);
        if is_order {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}
