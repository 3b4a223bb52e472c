//! Shared utilities for the cut-list checker crates.
//!
//! Every cell read from an order file or an inventory master passes through
//! [`normalize_cell`] before any rule looks at it, so full-width digits and
//! symbols typed on Japanese keyboards compare equal to their ASCII forms.

mod numeric;
mod text;

pub use numeric::{format_numeric, parse_number, round_to};
pub use text::{code_value, is_present, normalize_cell, normalize_header};
