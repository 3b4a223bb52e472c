//! Row and file rules.
//!
//! Every QC check is a small type implementing [`RowRule`] or [`FileRule`].
//! The [`RuleRegistry`] holds them in evaluation order and filters them by
//! the enable map, so callers iterate once per row or file instead of
//! consulting flags at each call site.
//!
//! Rules return plain message text. The engine adds the `"<row>行目: "`
//! prefix for row rules and wraps everything into [`Diagnostic`]s.
//!
//! [`Diagnostic`]: cutlist_model::Diagnostic

mod date;
mod dimension;
mod drill;
mod file;
mod machine;
mod material;
mod registry;
mod shot;

use chrono::NaiveDate;
use cutlist_model::{InventoryMaster, OrderFile, OrderRow, RuleConfiguration};
use serde::Serialize;

use crate::error::RuleError;

pub use date::DateCheck;
pub use dimension::{DimensionLimit, DrillWorkSize, RoundDrill, ShotDimension};
pub use drill::{DrillFormat, DrillMix};
pub use file::{FileMix, GrooveConsistency, ShotMix};
pub use machine::{DecimalRelief, DiaDimension, MachineThickness, PlasmaRelief, SabiComment};
pub use material::ThicknessGrade;
pub use registry::RuleRegistry;
pub use shot::ShotComment;

/// Float slack for inclusive comparisons against table limits.
pub(crate) const EPSILON: f64 = 1e-9;

/// Shared, read-only inputs every rule may consult.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub inventory: &'a InventoryMaster,
    pub config: &'a RuleConfiguration,
    /// Reference date for the order/delivery date window.
    pub today: NaiveDate,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        inventory: &'a InventoryMaster,
        config: &'a RuleConfiguration,
        today: NaiveDate,
    ) -> Self {
        Self {
            inventory,
            config,
            today,
        }
    }
}

/// A check applied to every data row.
///
/// # Implementing
///
/// ```ignore
/// use cutlist_model::OrderRow;
/// use cutlist_validate::{RowRule, RuleContext, RuleError};
///
/// struct NoEmptyGrade;
///
/// impl RowRule for NoEmptyGrade {
///     fn name(&self) -> &'static str { "no_empty_grade" }
///     fn label(&self) -> &'static str { "材質空欄チェック" }
///
///     fn check(&self, row: &OrderRow, _ctx: &RuleContext<'_>) -> Result<Vec<String>, RuleError> {
///         Ok(if row.grade.trim().is_empty() {
///             vec!["材質が空です".to_string()]
///         } else {
///             Vec::new()
///         })
///     }
/// }
/// ```
pub trait RowRule: Send + Sync {
    /// Configuration key, also used as the diagnostic tag.
    fn name(&self) -> &'static str;

    /// Human-readable name used in error diagnostics and listings.
    fn label(&self) -> &'static str;

    /// Returns the messages for this row; empty when the row passes or the
    /// rule does not apply.
    fn check(&self, row: &OrderRow, ctx: &RuleContext<'_>) -> Result<Vec<String>, RuleError>;
}

/// A consistency check evaluated once per file.
pub trait FileRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn label(&self) -> &'static str;

    fn check(&self, file: &OrderFile, ctx: &RuleContext<'_>) -> Result<Vec<String>, RuleError>;
}

/// Whether a rule runs per row or per file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleScope {
    Row,
    File,
}

impl RuleScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Row => "row",
            Self::File => "file",
        }
    }
}

/// Listing entry for a registered rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleDescriptor {
    pub name: &'static str,
    pub label: &'static str,
    pub scope: RuleScope,
    pub enabled: bool,
}

/// Wraps a single message into the rule result shape.
pub(crate) fn single(message: String) -> Result<Vec<String>, RuleError> {
    Ok(vec![message])
}

/// No finding.
pub(crate) fn pass() -> Result<Vec<String>, RuleError> {
    Ok(Vec::new())
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::LazyLock;

    use super::*;

    pub static INVENTORY: LazyLock<InventoryMaster> = LazyLock::new(|| {
        InventoryMaster::from_pairs([("SS400", &[3.0, 4.5, 6.0, 16.0][..])]).unwrap()
    });

    pub static CONFIG: LazyLock<RuleConfiguration> = LazyLock::new(RuleConfiguration::default);

    pub fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    pub fn ctx() -> RuleContext<'static> {
        RuleContext::new(&INVENTORY, &CONFIG, today())
    }

    pub fn run_row(rule: &dyn RowRule, row: &OrderRow) -> Vec<String> {
        rule.check(row, &ctx()).unwrap()
    }
}
