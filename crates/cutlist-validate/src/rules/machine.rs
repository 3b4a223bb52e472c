//! Machine-specific row rules.

use cutlist_common::{code_value, format_numeric};
use cutlist_model::machine::{self, DIA_SPLICE, DIA_SPLICE_MAIN, FILLER, PLASMA};
use cutlist_model::{Field, OrderRow, rule_names};

use super::{EPSILON, RowRule, RuleContext, pass, single};
use crate::error::RuleError;
use crate::parser::relief_number_text;

/// Filler relief diameters are only checked up to this thickness.
const FILLER_RELIEF_MAX_THICKNESS: f64 = 6.0;

/// The plasma cutter cannot cut reliefs.
pub struct PlasmaRelief;

impl RowRule for PlasmaRelief {
    fn name(&self) -> &'static str {
        rule_names::PLASMA_RELIEF
    }

    fn label(&self) -> &'static str {
        "プラズマ中抜きチェック"
    }

    fn check(&self, row: &OrderRow, _ctx: &RuleContext<'_>) -> Result<Vec<String>, RuleError> {
        let relief = row.text(Field::Relief);
        if row.machine() != PLASMA || relief.is_empty() {
            return pass();
        }
        single(format!(
            "プラズマで中抜きがあります → 機種:{}, 中抜き:'{relief}'",
            row.machine()
        ))
    }
}

/// Diamond/splice machines cut to dimension only.
pub struct DiaDimension;

impl RowRule for DiaDimension {
    fn name(&self) -> &'static str {
        rule_names::DIA_DIMENSION
    }

    fn label(&self) -> &'static str {
        "ダイアSPL寸法切りチェック"
    }

    fn check(&self, row: &OrderRow, _ctx: &RuleContext<'_>) -> Result<Vec<String>, RuleError> {
        if !row.machine_in(&DIA_SPLICE) || code_value(&row.dimension_cut_flag) == "1" {
            return pass();
        }
        single(format!(
            "ダイア・スプライスが寸法でない → 機種:{}, 寸法・型切:{}",
            row.machine(),
            row.dimension_cut_flag.trim()
        ))
    }
}

/// Rust removal on the main diamond/splice machines needs comment 33.
pub struct SabiComment;

impl RowRule for SabiComment {
    fn name(&self) -> &'static str {
        rule_names::SABI_COMMENT
    }

    fn label(&self) -> &'static str {
        "サビコメントチェック"
    }

    fn check(&self, row: &OrderRow, _ctx: &RuleContext<'_>) -> Result<Vec<String>, RuleError> {
        let sabi = code_value(&row.sabi_flag);
        if !row.machine_in(&DIA_SPLICE_MAIN) || sabi != "1" || row.is_shot() {
            return pass();
        }
        single(format!(
            "サビありですがコメント33が入っていません → 機種:{}, サビ:{sabi}, コメント:{}",
            row.machine(),
            row.comment()
        ))
    }
}

/// Filler machines: no drilling, and on thin plate the relief diameter must
/// be raised to a `.5` value.
pub struct DecimalRelief;

impl RowRule for DecimalRelief {
    fn name(&self) -> &'static str {
        rule_names::DECIMAL_RELIEF
    }

    fn label(&self) -> &'static str {
        "フィラー中抜きUPチェック"
    }

    fn check(&self, row: &OrderRow, _ctx: &RuleContext<'_>) -> Result<Vec<String>, RuleError> {
        if !row.machine_in(&FILLER) {
            return pass();
        }

        let drill = row.text(Field::Drill);
        if !drill.is_empty() {
            return single(format!("機種フィラーがドリルになっています → ドリル:{drill}"));
        }

        let thin = row
            .number_of(Field::Thickness)
            .is_some_and(|t| t <= FILLER_RELIEF_MAX_THICKNESS);
        if !thin || !row.has(Field::Relief) {
            return pass();
        }

        let raw = row.relief_spec.trim();
        let Some(number) = relief_number_text(&row.relief_spec) else {
            return single(format!(
                "中抜きに数値が見つかりません（小数第1位=5必須） → 中抜き:{raw}"
            ));
        };
        let Some((_, decimals)) = number.split_once('.') else {
            return single(format!(
                "中抜きは小数必須（第1位=5）ですが整数です → 中抜き:{raw}"
            ));
        };
        let Some(first) = decimals.chars().next() else {
            return single(format!("中抜きの小数部が不正 → 中抜き:{raw}"));
        };
        if first != '5' {
            return single(format!(
                "フィラーの中抜きUPしていません（実際: {first}） → 中抜き:{raw}"
            ));
        }
        pass()
    }
}

/// Each cutting machine handles a fixed thickness range.
pub struct MachineThickness;

impl RowRule for MachineThickness {
    fn name(&self) -> &'static str {
        rule_names::MACHINE_THICKNESS
    }

    fn label(&self) -> &'static str {
        "機種×板厚チェック"
    }

    fn check(&self, row: &OrderRow, _ctx: &RuleContext<'_>) -> Result<Vec<String>, RuleError> {
        let Some(range) = machine::thickness_range(&row.machine()) else {
            return pass();
        };
        let Some(thickness) = row.number_of(Field::Thickness) else {
            return pass();
        };
        if range.contains(thickness, EPSILON) {
            return pass();
        }
        single(format!(
            "{} → 板厚:{}",
            range.requirement,
            format_numeric(thickness)
        ))
    }
}
