//! Diagnostics produced by the rule engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One finding for one order file.
///
/// `message` is the exact presentation text. Row-level findings carry the
/// row number inside the message as `"<row>行目: ..."`; `row` and `rule`
/// repeat that information for grouping and machine-readable output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    pub message: String,
}

impl Diagnostic {
    /// A finding on one data row.
    pub fn for_row(file: &str, row: usize, rule: &str, text: &str) -> Self {
        Self {
            file: file.to_string(),
            row: Some(row),
            rule: Some(rule.to_string()),
            message: format!("{row}行目: {text}"),
        }
    }

    /// A whole-file consistency finding.
    pub fn for_file(file: &str, rule: &str, text: &str) -> Self {
        Self {
            file: file.to_string(),
            row: None,
            rule: Some(rule.to_string()),
            message: text.to_string(),
        }
    }

    /// A structural failure (decode, parse, missing column) that replaces all
    /// other findings for the file.
    pub fn structural(file: &str, text: impl Into<String>) -> Self {
        Self {
            file: file.to_string(),
            row: None,
            rule: None,
            message: text.into(),
        }
    }

    pub fn is_row_level(&self) -> bool {
        self.row.is_some()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_prefix() {
        let diagnostic = Diagnostic::for_row("x.csv", 7, "date_check", "日付が不正");
        assert_eq!(diagnostic.to_string(), "7行目: 日付が不正");
        assert!(diagnostic.is_row_level());
    }

    #[test]
    fn test_file_level_has_no_prefix() {
        let diagnostic = Diagnostic::for_file("x.csv", "file_mix", "混在");
        assert_eq!(diagnostic.message, "混在");
        assert!(!diagnostic.is_row_level());
        assert_eq!(Diagnostic::structural("x.csv", "boom").rule, None);
    }
}
