use cutlist_common::format_numeric;
use cutlist_model::{Field, OrderRow, machine, rule_names};

use super::{EPSILON, RowRule, RuleContext, pass, single};
use crate::error::RuleError;
use crate::parser::{drill_pairs_lenient, parse_relief_pairs, relief_has_diameter_at_least};

/// Relief diameter from which the shot comment rule may be skipped.
pub const LARGE_RELIEF_DIAMETER: f64 = 38.0;

/// Distance within which a hole counts as the "no shot" diameter A.
const DIAMETER_MATCH: f64 = 1e-3;

/// Comment 33 (shot blasting) must follow the total hole count.
///
/// With `c` from the shot rule parameters, a row with at least `c` holes
/// needs comment 33 and a row with fewer must not carry it. Rows with a
/// hole of diameter `a` get an extra note when 33 is set.
pub struct ShotComment;

impl RowRule for ShotComment {
    fn name(&self) -> &'static str {
        rule_names::SHOT_COMMENT
    }

    fn label(&self) -> &'static str {
        "ショットコメントチェック"
    }

    fn check(&self, row: &OrderRow, ctx: &RuleContext<'_>) -> Result<Vec<String>, RuleError> {
        if !row.machine_in(&machine::SHOT_RULE) {
            return pass();
        }

        let params = ctx.config.shot_rule();
        if params.ignore_when_relief_at_least_38()
            && relief_has_diameter_at_least(&row.relief_spec, LARGE_RELIEF_DIAMETER, EPSILON)
        {
            return pass();
        }

        let mut pairs = drill_pairs_lenient(row.get(Field::Drill));
        pairs.extend(parse_relief_pairs(row.get(Field::Relief)));
        if pairs.is_empty() {
            return pass();
        }

        let total: u64 = pairs.iter().map(|pair| u64::from(pair.count)).sum();
        let needed = u64::from(params.c());
        let shot = row.is_shot();

        let mut notes = Vec::new();
        if total >= needed {
            if !shot {
                notes.push(format!(
                    "孔数合計{total}が{needed}以上です。コメント33を入れてください。"
                ));
            }
        } else if shot {
            notes.push(format!(
                "孔数合計{total}が{needed}未満のためコメント33は不要です。"
            ));
            if pairs
                .iter()
                .any(|pair| (pair.diameter - params.a()).abs() <= DIAMETER_MATCH)
            {
                notes.push(format!(
                    "φ{} はショット無し想定のためコメント33は不要です。",
                    format_numeric(params.a())
                ));
            }
        }

        if notes.is_empty() {
            return pass();
        }
        single(notes.join(" / "))
    }
}
