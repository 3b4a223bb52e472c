//! Cell text normalization.

use unicode_normalization::UnicodeNormalization;

use crate::numeric::format_numeric;

const IDEOGRAPHIC_SPACE: char = '\u{3000}';
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Canonicalizes a free-text cell value.
///
/// Applies NFKC compatibility normalization (full-width digits, `@`, `.` and
/// punctuation become half-width), turns the ideographic space into an
/// ordinary space and trims surrounding whitespace. The result is stable:
/// normalizing an already normalized value returns it unchanged.
///
/// # Examples
///
/// ```
/// use cutlist_common::normalize_cell;
///
/// assert_eq!(normalize_cell("２２＠３"), "22@3");
/// assert_eq!(normalize_cell("\u{3000}φ１８@２ "), "φ18@2");
/// assert_eq!(normalize_cell(""), "");
/// ```
pub fn normalize_cell(raw: &str) -> String {
    let composed: String = raw.nfkc().collect();
    composed
        .replace(IDEOGRAPHIC_SPACE, " ")
        .trim_matches(|ch: char| ch.is_whitespace() || ch == BYTE_ORDER_MARK)
        .to_string()
}

/// Trims a header cell. Header names are matched verbatim after trimming,
/// so no compatibility normalization is applied here.
pub fn normalize_header(raw: &str) -> String {
    raw.trim_matches(|ch: char| ch.is_whitespace() || ch == BYTE_ORDER_MARK)
        .to_string()
}

/// Returns true when the normalized cell is non-empty.
pub fn is_present(raw: &str) -> bool {
    !normalize_cell(raw).is_empty()
}

/// Normalizes a code-like cell (machine code, comment code, flags).
///
/// Spreadsheet exports often write integral codes as floats (`33.0`), so an
/// integral decimal spelling collapses to its integer form.
///
/// ```
/// use cutlist_common::code_value;
///
/// assert_eq!(code_value("33.0"), "33");
/// assert_eq!(code_value(" ４１ "), "41");
/// assert_eq!(code_value("4.5"), "4.5");
/// assert_eq!(code_value("A1"), "A1");
/// ```
pub fn code_value(raw: &str) -> String {
    let normalized = normalize_cell(raw);
    if normalized.contains('.')
        && let Ok(value) = normalized.parse::<f64>()
        && value.is_finite()
        && value.fract() == 0.0
    {
        return format_numeric(value);
    }
    normalized
}
