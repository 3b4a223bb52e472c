use cutlist_model::{Field, OrderRow, rule_names};

use super::{RowRule, RuleContext, pass, single};
use crate::error::RuleError;

/// The grade must be stocked in the ordered thickness.
pub struct ThicknessGrade;

impl RowRule for ThicknessGrade {
    fn name(&self) -> &'static str {
        rule_names::THICKNESS_GRADE
    }

    fn label(&self) -> &'static str {
        "板厚x材質チェック"
    }

    fn check(&self, row: &OrderRow, ctx: &RuleContext<'_>) -> Result<Vec<String>, RuleError> {
        let allowed = row
            .number_of(Field::Thickness)
            .is_some_and(|thickness| ctx.inventory.is_allowed(&row.grade, thickness));
        if allowed {
            return pass();
        }
        single(format!(
            "板厚と材質の組合せが無効 → 板厚:{}, 材質:{}",
            row.thickness.trim(),
            row.grade.trim()
        ))
    }
}
