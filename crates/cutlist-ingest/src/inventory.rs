//! Inventory master loading from CSV or Excel workbooks.

use std::path::Path;

use calamine::{Reader, open_workbook_auto};
use cutlist_common::normalize_header;
use cutlist_model::{InventoryError, InventoryMaster};

use crate::table::{decode_text, parse_csv_text};

/// File name the desktop tool looked for next to the executable.
pub const DEFAULT_MASTER_FILE_NAME: &str = "規格板厚マスタ.xlsx";

const WORKBOOK_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

/// Loads the inventory master, choosing the reader by file extension.
pub fn load_inventory(path: &Path) -> Result<InventoryMaster, InventoryError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let master = if extension == "csv" {
        let bytes = std::fs::read(path).map_err(|e| InventoryError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        read_inventory_bytes(path, &bytes)?
    } else if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
        read_inventory_workbook(path)?
    } else {
        return Err(InventoryError::UnsupportedFormat {
            path: path.to_path_buf(),
        });
    };

    tracing::info!(
        path = %path.display(),
        grades = master.grade_count(),
        thicknesses = master.thickness_count(),
        "loaded inventory master"
    );
    Ok(master)
}

/// Builds the inventory from CSV bytes using the order-file encoding fallback.
pub fn read_inventory_bytes(path: &Path, bytes: &[u8]) -> Result<InventoryMaster, InventoryError> {
    let (text, _) = decode_text(bytes).ok_or_else(|| InventoryError::Parse {
        path: path.to_path_buf(),
        message: "could not decode as UTF-8 or Shift_JIS".to_string(),
    })?;
    let table =
        parse_csv_text(&path.display().to_string(), &text).map_err(|e| InventoryError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    InventoryMaster::from_table(&table.headers, &table.rows)
}

fn read_inventory_workbook(path: &Path) -> Result<InventoryMaster, InventoryError> {
    let parse_error = |message: String| InventoryError::Parse {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| parse_error(e.to_string()))?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| parse_error("workbook has no worksheets".to_string()))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| parse_error(e.to_string()))?;

    let mut rows = range.rows();
    let headers: Vec<String> = rows
        .next()
        .map(|header_row| {
            header_row
                .iter()
                .map(|cell| normalize_header(&cell.to_string()))
                .collect()
        })
        .unwrap_or_default();
    let data: Vec<Vec<String>> = rows
        .map(|row| row.iter().map(ToString::to_string).collect())
        .collect();

    InventoryMaster::from_table(&headers, &data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_unsupported_extension() {
        let err = load_inventory(Path::new("master.txt")).unwrap_err();
        assert!(matches!(err, InventoryError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_load_csv_master() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        write!(file, "規格,備考,t1,t2\nSS400,,3.0,4.5\nSPHC,,1.6,\n").unwrap();
        let master = load_inventory(file.path()).unwrap();
        assert!(master.is_allowed("SS400", 4.5));
        assert!(master.is_allowed("SPHC", 1.6));
        assert_eq!(master.grade_count(), 2);
    }

    #[test]
    fn test_missing_csv_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = load_inventory(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, InventoryError::Read { .. }));
    }
}
