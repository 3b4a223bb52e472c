//! CSV table reading: decoding, header aliases and record parsing.

mod decode;
mod header;
mod reader;

pub use decode::{SourceEncoding, decode_text};
pub use header::{HEADER_ALIASES, canonical_header};
pub use reader::{CsvTable, parse_csv_text, read_csv_bytes};
