//! Rule evaluation errors.

use thiserror::Error;

/// A rule could not evaluate its input.
///
/// The engine turns this into a diagnostic naming the rule; the remaining
/// rules still run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleError {
    #[error("{0}")]
    Failed(String),
}

impl RuleError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}
