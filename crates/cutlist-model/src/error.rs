use std::path::PathBuf;

use thiserror::Error;

/// Invalid rule configuration. Raised before any file is processed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("shot rule A and B must be finite numbers and C an integer")]
    NotNumeric,
    #[error("shot rule A, B and C must all be positive (a={a}, b={b}, c={c})")]
    NotPositive { a: f64, b: f64, c: i64 },
    #[error("shot rule requires A < B (a={a}, b={b})")]
    NotAscending { a: f64, b: f64 },
    #[error("unknown rule '{name}'")]
    UnknownRule { name: String },
}

/// Failure to build the grade/thickness inventory. Fatal to the whole run.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("inventory master has no '規格' (grade) column")]
    MissingGradeColumn,

    #[error("inventory master yielded no thickness values; put numbers from the third column on")]
    NoThickness,

    #[error("failed to read inventory master {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse inventory master {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("unsupported inventory master format: {path}")]
    UnsupportedFormat { path: PathBuf },
}
