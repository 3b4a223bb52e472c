//! Error types for order ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading an order file.
///
/// Every variant is structural: the file cannot be evaluated at all and
/// yields a single diagnostic.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Directory not found or not readable.
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Decoding Errors ===
    /// None of the fallback encodings could decode the file.
    #[error("could not decode {file} as UTF-8 or Shift_JIS")]
    Undecodable { file: String },

    // === CSV Parsing Errors ===
    /// The CSV reader rejected the content.
    #[error("failed to parse CSV {file}: {message}")]
    CsvParse { file: String, message: String },

    /// CSV file has no header line.
    #[error("CSV file is empty: {file}")]
    EmptyCsv { file: String },

    /// A data line has more cells than the header.
    #[error("expected {expected} fields in line {line} of {file}, saw {found}")]
    RaggedRow {
        file: String,
        line: u64,
        expected: usize,
        found: usize,
    },

    // === Schema Errors ===
    /// Required canonical column not found after alias mapping.
    #[error("必須列が存在しません: '{column}'")]
    MissingColumn { column: String },
}

impl IngestError {
    /// True for a missing required column, which is reported verbatim
    /// rather than as a generic processing error.
    pub fn is_missing_column(&self) -> bool {
        matches!(self, Self::MissingColumn { .. })
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
