use cutlist_model::{OrderRow, rule_names};

use super::{RowRule, RuleContext, pass, single};
use crate::dates::{parse_order_datetime, spans_today};
use crate::error::RuleError;

/// The order date must not be in the future and the delivery date must not
/// have passed.
pub struct DateCheck;

impl RowRule for DateCheck {
    fn name(&self) -> &'static str {
        rule_names::DATE_CHECK
    }

    fn label(&self) -> &'static str {
        "日付チェック"
    }

    fn check(&self, row: &OrderRow, ctx: &RuleContext<'_>) -> Result<Vec<String>, RuleError> {
        let order = parse_order_datetime(&row.order_date);
        let delivery = parse_order_datetime(&row.delivery_date);
        if let (Some(order), Some(delivery)) = (order, delivery)
            && spans_today(order, delivery, ctx.today)
        {
            return pass();
        }
        single(format!(
            "日付が不正（Y≦today≦Z） → Y:{}, Z:{}",
            row.order_date.trim(),
            row.delivery_date.trim()
        ))
    }
}
