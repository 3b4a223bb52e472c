use std::collections::BTreeSet;

use cutlist_model::{Field, OrderRow, machine, rule_names};

use super::{RowRule, RuleContext, pass, single};
use crate::error::RuleError;
use crate::parser::{SEPARATORS, parse_drill_token, split_tokens};

/// Drill diameters at or below this are too small to drill.
pub const MIN_DRILL_DIAMETER: f64 = 5.0;

/// Drill diameters at or above this are cut as reliefs instead.
pub const MAX_DRILL_DIAMETER: f64 = 51.0;

/// Every drill token must be `size@count` with a size inside the drillable range.
pub struct DrillFormat;

impl RowRule for DrillFormat {
    fn name(&self) -> &'static str {
        rule_names::DRILL_FORMAT
    }

    fn label(&self) -> &'static str {
        "ドリル径チェック"
    }

    fn check(&self, row: &OrderRow, _ctx: &RuleContext<'_>) -> Result<Vec<String>, RuleError> {
        for token in split_tokens(&row.drill_spec) {
            let pair = match parse_drill_token(&token) {
                Ok(pair) => pair,
                Err(kind) => return single(format!("{kind} → {token}")),
            };
            if pair.diameter <= MIN_DRILL_DIAMETER {
                return single(format!("ドリルサイズがφ5以下 → {token}"));
            }
            if pair.diameter >= MAX_DRILL_DIAMETER {
                return single(format!("ドリルサイズが51以上 → {token}"));
            }
        }
        pass()
    }
}

/// The drilling line takes one drill specification per row.
pub struct DrillMix;

impl RowRule for DrillMix {
    fn name(&self) -> &'static str {
        rule_names::DRILL_MIX
    }

    fn label(&self) -> &'static str {
        "ドリル混在チェック"
    }

    fn check(&self, row: &OrderRow, _ctx: &RuleContext<'_>) -> Result<Vec<String>, RuleError> {
        if row.machine() != machine::DRILL_CHECK {
            return pass();
        }
        let tokens = split_tokens(&row.drill_spec);
        let distinct: BTreeSet<&str> = tokens.iter().map(String::as_str).collect();
        if tokens.len() < 2 || distinct.len() < 2 {
            return pass();
        }
        single(format!(
            "ドリルの値が混在 → 機種:{}, ドリル:{}",
            row.machine(),
            row.text(Field::Drill).replace(SEPARATORS, ",")
        ))
    }
}
