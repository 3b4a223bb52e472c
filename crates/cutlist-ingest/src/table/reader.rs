//! CSV record parsing.

use csv::ReaderBuilder;

use crate::error::{IngestError, Result};

use super::decode::{SourceEncoding, decode_text};
use super::header::canonical_header;

/// A header row plus string cells, before any field mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Parses decoded CSV text.
///
/// Headers are trimmed and mapped through the alias table. Lines shorter
/// than the header are padded with empty cells; longer lines are an error.
/// Blank lines are skipped.
pub fn parse_csv_text(file: &str, text: &str) -> Result<CsvTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let header_record = match records.next() {
        Some(record) => record.map_err(|e| csv_error(file, &e))?,
        None => {
            return Err(IngestError::EmptyCsv {
                file: file.to_string(),
            });
        }
    };
    let headers: Vec<String> = header_record.iter().map(canonical_header).collect();

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(|e| csv_error(file, &e))?;
        if record.len() > headers.len() {
            return Err(IngestError::RaggedRow {
                file: file.to_string(),
                line: record.position().map_or(0, csv::Position::line),
                expected: headers.len(),
                found: record.len(),
            });
        }
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        row.resize(headers.len(), String::new());
        rows.push(row);
    }

    Ok(CsvTable { headers, rows })
}

/// Decodes and parses raw CSV bytes.
pub fn read_csv_bytes(file: &str, bytes: &[u8]) -> Result<(CsvTable, SourceEncoding)> {
    let (text, encoding) = decode_text(bytes).ok_or_else(|| IngestError::Undecodable {
        file: file.to_string(),
    })?;
    tracing::debug!(file, encoding = encoding.label(), "decoded CSV");
    let table = parse_csv_text(file, &text)?;
    Ok((table, encoding))
}

fn csv_error(file: &str, error: &csv::Error) -> IngestError {
    IngestError::CsvParse {
        file: file.to_string(),
        message: error.to_string(),
    }
}
