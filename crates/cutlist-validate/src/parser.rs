//! Compound field grammar for drill and relief cells.
//!
//! A cell is normalized, then split on `,` `、` `，` `/` `／` into tokens.
//! Drill tokens are `<diameter>@<count>`. Relief tokens carry a `φ` marker
//! before the diameter (`φ22.5@3`); tokens without the marker are not relief
//! holes and are ignored.

use std::sync::LazyLock;

use cutlist_common::{normalize_cell, round_to};
use cutlist_model::machine;
use cutlist_model::{Field, OrderRow};
use regex::Regex;
use thiserror::Error;

/// Token separators, full-width forms included.
pub const SEPARATORS: [char; 5] = [',', '、', '，', '/', '／'];

/// Smallest value the shot-mix size extraction treats as a diameter;
/// anything below is assumed to be a hole count.
pub const MIN_SHOT_MIX_DIAMETER: f64 = 10.0;

static RELIEF_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[φΦ]\s*([0-9]+(?:\.[0-9]+)?)\s*@\s*([0-9]+)").expect("Invalid relief regex")
});

static RELIEF_DIAMETER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[φΦ]\s*([0-9]+(?:\.[0-9]+)?)\s*@").expect("Invalid relief diameter regex")
});

static ANY_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+(?:\.[0-9]+)?").expect("Invalid number regex"));

/// One `diameter@count` entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HolePair {
    pub diameter: f64,
    pub count: u32,
}

impl HolePair {
    pub fn new(diameter: f64, count: u32) -> Self {
        Self { diameter, count }
    }
}

/// Why a drill token failed the `size@count` grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DrillTokenError {
    #[error("ドリルの形式が不正（@なし）")]
    MissingSeparator,
    #[error("ドリルの形式が不正（サイズまたは個数が空）")]
    EmptySide,
    #[error("ドリルのサイズが数値でない")]
    InvalidDiameter,
    #[error("ドリルの個数が数値でない")]
    InvalidCount,
}

/// A drill cell with a token that does not parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} → {token}")]
pub struct DrillFormatError {
    pub token: String,
    pub kind: DrillTokenError,
}

/// Splits a cell into non-empty, trimmed tokens.
pub fn split_tokens(text: &str) -> Vec<String> {
    normalize_cell(text)
        .split(SEPARATORS)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses one drill token.
///
/// The count side may be written as an integral float (`3.0`); a fraction
/// is truncated.
pub fn parse_drill_token(token: &str) -> Result<HolePair, DrillTokenError> {
    let (left, right) = token
        .split_once('@')
        .ok_or(DrillTokenError::MissingSeparator)?;
    let (left, right) = (left.trim(), right.trim());
    if left.is_empty() || right.is_empty() {
        return Err(DrillTokenError::EmptySide);
    }
    let diameter = left
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or(DrillTokenError::InvalidDiameter)?;
    let count = right
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
        .ok_or(DrillTokenError::InvalidCount)?;
    Ok(HolePair::new(diameter, count.trunc() as u32))
}

/// Parses a drill cell, failing on the first malformed token.
pub fn parse_drill_pairs(text: &str) -> Result<Vec<HolePair>, DrillFormatError> {
    split_tokens(text)
        .into_iter()
        .map(|token| parse_drill_token(&token).map_err(|kind| DrillFormatError { token, kind }))
        .collect()
}

/// Parses a drill cell, skipping malformed tokens.
pub fn drill_pairs_lenient(text: &str) -> Vec<HolePair> {
    split_tokens(text)
        .iter()
        .filter_map(|token| parse_drill_token(token).ok())
        .collect()
}

/// Parses the marked `φd@n` entries of a relief cell.
pub fn parse_relief_pairs(text: &str) -> Vec<HolePair> {
    split_tokens(text)
        .iter()
        .filter_map(|token| {
            let captures = RELIEF_PAIR.captures(token)?;
            let diameter = captures[1].parse::<f64>().ok()?;
            let count = captures[2].parse::<u32>().ok()?;
            Some(HolePair::new(diameter, count))
        })
        .collect()
}

/// True when any marked relief diameter is at least `threshold`.
pub fn relief_has_diameter_at_least(text: &str, threshold: f64, epsilon: f64) -> bool {
    parse_relief_pairs(text)
        .iter()
        .any(|pair| pair.diameter >= threshold - epsilon)
}

/// The number a filler relief cell is judged by: the first `φd@` diameter,
/// or failing that the first number anywhere in the cell. Returned as text
/// so the decimal digits can be inspected.
pub fn relief_number_text(text: &str) -> Option<String> {
    let normalized = normalize_cell(text);
    if let Some(captures) = RELIEF_DIAMETER.captures(&normalized) {
        return Some(captures[1].to_string());
    }
    ANY_NUMBER
        .find(&normalized)
        .map(|found| found.as_str().to_string())
}

/// Hole sizes the shot-mix rules compare across a file.
///
/// Only rows on the shot-mix machines contribute. Drill sizes are the text
/// left of `@`; relief sizes are every `φd@` diameter, or every number in
/// the cell when no marker is present. Values under
/// [`MIN_SHOT_MIX_DIAMETER`] are dropped.
pub fn shot_mix_sizes(row: &OrderRow) -> Vec<f64> {
    if !row.machine_in(&machine::SHOT_MIX) {
        return Vec::new();
    }

    let mut sizes = Vec::new();
    for token in split_tokens(row.get(Field::Drill)) {
        let left = token.split('@').next().unwrap_or_default().trim();
        if let Ok(value) = left.parse::<f64>() {
            sizes.push(value);
        }
    }

    let relief = row.text(Field::Relief);
    if !relief.is_empty() {
        let marked: Vec<f64> = RELIEF_DIAMETER
            .captures_iter(&relief)
            .filter_map(|captures| captures[1].parse::<f64>().ok())
            .collect();
        if marked.is_empty() {
            sizes.extend(
                ANY_NUMBER
                    .find_iter(&relief)
                    .filter_map(|found| found.as_str().parse::<f64>().ok()),
            );
        } else {
            sizes.extend(marked);
        }
    }

    sizes
        .into_iter()
        .filter(|value| value.is_finite() && *value >= MIN_SHOT_MIX_DIAMETER)
        .map(|value| round_to(value, 3))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drill_token_grammar() {
        assert_eq!(parse_drill_token("22@3"), Ok(HolePair::new(22.0, 3)));
        assert_eq!(parse_drill_token("17.5@1.0"), Ok(HolePair::new(17.5, 1)));
        assert_eq!(parse_drill_token("22"), Err(DrillTokenError::MissingSeparator));
        assert_eq!(parse_drill_token("@3"), Err(DrillTokenError::EmptySide));
        assert_eq!(parse_drill_token("22@"), Err(DrillTokenError::EmptySide));
        assert_eq!(parse_drill_token("φ22@3"), Err(DrillTokenError::InvalidDiameter));
        assert_eq!(parse_drill_token("22@x"), Err(DrillTokenError::InvalidCount));
        assert_eq!(parse_drill_token("22@3@4"), Err(DrillTokenError::InvalidCount));
    }

    #[test]
    fn test_parse_drill_pairs_reports_first_bad_token() {
        assert_eq!(
            parse_drill_pairs("２２＠３／18@2"),
            Ok(vec![HolePair::new(22.0, 3), HolePair::new(18.0, 2)])
        );
        let err = parse_drill_pairs("22@3,18,x@1").unwrap_err();
        assert_eq!(err.token, "18");
        assert_eq!(err.kind, DrillTokenError::MissingSeparator);
        assert_eq!(err.to_string(), "ドリルの形式が不正（@なし） → 18");
        assert_eq!(parse_drill_pairs(""), Ok(Vec::new()));
    }

    #[test]
    fn test_lenient_drill_pairs_skip_bad_tokens() {
        assert_eq!(
            drill_pairs_lenient("22@3、bad、18@1"),
            vec![HolePair::new(22.0, 3), HolePair::new(18.0, 1)]
        );
    }

    #[test]
    fn test_relief_pairs_require_marker() {
        assert_eq!(
            parse_relief_pairs("φ22.5@3, 18@2 / Φ 40 @ 1"),
            vec![HolePair::new(22.5, 3), HolePair::new(40.0, 1)]
        );
        assert!(parse_relief_pairs("22@3").is_empty());
        assert!(relief_has_diameter_at_least("φ18@2/φ38@1", 38.0, 1e-9));
        assert!(!relief_has_diameter_at_least("φ37.9@1", 38.0, 1e-9));
    }

    #[test]
    fn test_relief_number_text() {
        assert_eq!(relief_number_text("φ２２．５＠３").as_deref(), Some("22.5"));
        assert_eq!(relief_number_text("22@3").as_deref(), Some("22"));
        assert_eq!(relief_number_text("穴あり"), None);
    }

    #[test]
    fn test_shot_mix_sizes() {
        let row = OrderRow::new(2)
            .with(Field::Machine, "42")
            .with(Field::Drill, "15@2,8@1")
            .with(Field::Relief, "φ22@3");
        assert_eq!(shot_mix_sizes(&row), vec![15.0, 22.0]);

        let unmarked = OrderRow::new(2)
            .with(Field::Machine, "41")
            .with(Field::Relief, "18 x 3");
        assert_eq!(shot_mix_sizes(&unmarked), vec![18.0]);

        let other_machine = OrderRow::new(2)
            .with(Field::Machine, "40")
            .with(Field::Drill, "15@2");
        assert!(shot_mix_sizes(&other_machine).is_empty());
    }
}
