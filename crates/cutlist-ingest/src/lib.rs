//! Cut-list order ingestion.
//!
//! This crate turns raw order-file bytes into [`OrderFile`] values the rule
//! engine can evaluate, and loads the grade/thickness inventory master.
//!
//! # Features
//!
//! - **Decoding**: UTF-8 (with or without BOM), then Shift_JIS (cp932)
//! - **CSV Loading**: header trimming, legacy header aliases, ragged-row checks
//! - **Required Columns**: first missing canonical column is reported
//! - **Discovery**: lists `*.csv` order files in a folder
//! - **Inventory Master**: CSV or Excel workbooks
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use cutlist_ingest::{list_order_files, load_inventory, read_order_file};
//!
//! let inventory = load_inventory(Path::new("規格板厚マスタ.xlsx"))?;
//! for path in list_order_files(Path::new("orders"))? {
//!     let order = read_order_file(&path)?;
//! }
//! ```

mod discovery;
mod error;
mod inventory;
mod order;
mod table;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading ===
pub use table::{
    CsvTable, HEADER_ALIASES, SourceEncoding, canonical_header, decode_text, parse_csv_text,
    read_csv_bytes,
};

// === Order Files ===
pub use order::{build_order_file, read_order_bytes, read_order_file};

// === File Discovery ===
pub use discovery::{is_order_file_name, list_order_files};

// === Inventory Master ===
pub use inventory::{DEFAULT_MASTER_FILE_NAME, load_inventory, read_inventory_bytes};
