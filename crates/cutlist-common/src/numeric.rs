//! Numeric parsing and formatting helpers.

use crate::text::normalize_cell;

/// Parses a cell as a finite number after normalization.
///
/// Empty cells, non-numeric text and `inf`/`NaN` spellings return `None`.
///
/// ```
/// use cutlist_common::parse_number;
///
/// assert_eq!(parse_number("４．５"), Some(4.5));
/// assert_eq!(parse_number(" 12 "), Some(12.0));
/// assert_eq!(parse_number("abc"), None);
/// assert_eq!(parse_number("NaN"), None);
/// ```
pub fn parse_number(raw: &str) -> Option<f64> {
    let normalized = normalize_cell(raw);
    if normalized.is_empty() {
        return None;
    }
    normalized
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Rounds to a fixed number of decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Formats a floating-point number as a string without trailing zeros after decimal.
///
/// ```
/// use cutlist_common::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(1.50), "1.5");
/// assert_eq!(format_numeric(0.0), "0");
/// assert_eq!(format_numeric(6500.0), "6500");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number_variants() {
        assert_eq!(parse_number("1e3"), Some(1000.0));
        assert_eq!(parse_number("-2.5"), Some(-2.5));
        assert_eq!(parse_number("１６"), Some(16.0));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("12mm"), None);
    }

    #[test]
    fn test_round_to_three_decimals() {
        assert_eq!(round_to(4.50049, 3), 4.5);
        assert_eq!(round_to(3.2004, 3), 3.2);
        assert_eq!(round_to(12.0, 3), 12.0);
    }

    #[test]
    fn test_format_numeric_keeps_fraction() {
        assert_eq!(format_numeric(4.501), "4.501");
        assert_eq!(format_numeric(22.5), "22.5");
        assert_eq!(format_numeric(-2.25), "-2.25");
    }
}
