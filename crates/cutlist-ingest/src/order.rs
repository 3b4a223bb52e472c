//! Conversion from CSV tables to order files.

use std::collections::BTreeMap;
use std::path::Path;

use cutlist_model::{Field, OrderFile, OrderRow};

use crate::error::{IngestError, Result};
use crate::table::{CsvTable, read_csv_bytes};

/// Row number of the first data line (the header is line 1).
const FIRST_DATA_ROW: usize = 2;

/// Maps a parsed table onto canonical fields.
///
/// Required columns are checked in canonical order and the first missing one
/// is returned as [`IngestError::MissingColumn`]. When a header appears more
/// than once (for example both a legacy alias and its canonical name), the
/// first occurrence wins.
pub fn build_order_file(name: &str, table: &CsvTable) -> Result<OrderFile> {
    let mut found: BTreeMap<Field, usize> = BTreeMap::new();
    for (index, header) in table.headers.iter().enumerate() {
        if let Some(field) = Field::from_header(header) {
            found.entry(field).or_insert(index);
        }
    }
    if let Some(missing) = Field::REQUIRED
        .into_iter()
        .find(|field| !found.contains_key(field))
    {
        return Err(IngestError::MissingColumn {
            column: missing.header().to_string(),
        });
    }
    let optional: Vec<Field> = Field::OPTIONAL
        .into_iter()
        .filter(|field| found.contains_key(field))
        .collect();
    let columns: Vec<(Field, usize)> = found.into_iter().collect();

    let rows = table
        .rows
        .iter()
        .enumerate()
        .map(|(offset, cells)| {
            let mut row = OrderRow::new(offset + FIRST_DATA_ROW);
            for (field, index) in &columns {
                if let Some(value) = cells.get(*index) {
                    row.set(*field, value);
                }
            }
            row
        })
        .collect();

    Ok(OrderFile::new(name, rows).with_columns(optional))
}

/// Decodes, parses and maps raw order-file bytes.
pub fn read_order_bytes(name: &str, bytes: &[u8]) -> Result<OrderFile> {
    let (table, _) = read_csv_bytes(name, bytes)?;
    build_order_file(name, &table)
}

/// Reads an order file from disk. The diagnostic identifier is the path.
pub fn read_order_file(path: &Path) -> Result<OrderFile> {
    let bytes = std::fs::read(path).map_err(|e| IngestError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    read_order_bytes(&path.display().to_string(), &bytes)
}
