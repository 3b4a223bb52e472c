//! Size-based row rules.

use std::f64::consts::PI;

use cutlist_common::format_numeric;
use cutlist_model::{Field, OrderRow, rule_names};

use super::{EPSILON, RowRule, RuleContext, pass, single};
use crate::error::RuleError;
use crate::parser::parse_relief_pairs;

/// Longest side any machine can cut.
pub const MAX_DIMENSION: f64 = 6000.0;

/// Plates up to this thickness are bought as standard 4×8 / 5×10 sheets.
pub const SHEET_THICKNESS_LIMIT: f64 = 4.5;

/// Shot blasting limit for heavy plate, applied to both sides.
pub const MAX_SHOT_SIDE: f64 = 500.0;

/// Heavy plate threshold for the shot dimension limit.
pub const SHOT_MIN_THICKNESS: f64 = 16.0;

/// Both sides at or above this cannot be drilled.
pub const MAX_DRILL_WORK_SIDE: f64 = 1501.0;

/// Allowed difference when deciding a piece is a circle.
const ROUND_TOLERANCE: f64 = 1.0;

/// (width, length) limits of the standard sheets.
const SHEET_5X10: (f64, f64) = (1500.0, 3000.0);
const SHEET_4X8: (f64, f64) = (1200.0, 2400.0);

/// Absolute size limit, plus the sheet-size tiers for thin plate.
pub struct DimensionLimit;

impl RowRule for DimensionLimit {
    fn name(&self) -> &'static str {
        rule_names::DIMENSION_LIMIT
    }

    fn label(&self) -> &'static str {
        "寸法制限チェック"
    }

    fn check(&self, row: &OrderRow, _ctx: &RuleContext<'_>) -> Result<Vec<String>, RuleError> {
        let (Some(width), Some(length), Some(thickness)) = (
            row.number_of(Field::Width),
            row.number_of(Field::Length),
            row.number_of(Field::Thickness),
        ) else {
            return pass();
        };

        let mut messages = Vec::new();
        if width > MAX_DIMENSION || length > MAX_DIMENSION {
            messages.push(format!(
                "幅{}または長さ{}が6000を超えています。",
                format_numeric(width),
                format_numeric(length)
            ));
        }
        if thickness <= SHEET_THICKNESS_LIMIT {
            if width > SHEET_5X10.0 || length > SHEET_5X10.1 {
                messages.push("製品寸法が5x10を超えています。要確認".to_string());
            } else if width > SHEET_4X8.0 || length > SHEET_4X8.1 {
                messages.push("製品寸法が4x8より大きいです。5x10はありますか？".to_string());
            }
        }
        Ok(messages)
    }
}

/// Shot-blasted heavy plate must fit 500×500 on at least one side.
pub struct ShotDimension;

impl RowRule for ShotDimension {
    fn name(&self) -> &'static str {
        rule_names::SHOT_DIMENSION
    }

    fn label(&self) -> &'static str {
        "ショット寸法チェック"
    }

    fn check(&self, row: &OrderRow, _ctx: &RuleContext<'_>) -> Result<Vec<String>, RuleError> {
        if !row.is_shot() {
            return pass();
        }
        let (Some(thickness), Some(width), Some(length)) = (
            row.number_of(Field::Thickness),
            row.number_of(Field::Width),
            row.number_of(Field::Length),
        ) else {
            return pass();
        };
        if thickness < SHOT_MIN_THICKNESS - EPSILON
            || width <= MAX_SHOT_SIDE
            || length <= MAX_SHOT_SIDE
        {
            return pass();
        }
        single(format!(
            "ショット品（板厚:{}）の寸法が500×500を超過 → 幅:{}, 長さ:{}（コメント:{}）",
            format_numeric(thickness),
            format_numeric(width),
            format_numeric(length),
            row.comment()
        ))
    }
}

/// Large pieces cannot go through the drill.
pub struct DrillWorkSize;

impl RowRule for DrillWorkSize {
    fn name(&self) -> &'static str {
        rule_names::DRILL_WORK_SIZE
    }

    fn label(&self) -> &'static str {
        "ドリル加工サイズチェック"
    }

    fn check(&self, row: &OrderRow, _ctx: &RuleContext<'_>) -> Result<Vec<String>, RuleError> {
        if !row.has(Field::Drill) {
            return pass();
        }
        let (Some(width), Some(length)) = (
            dimension_or_zero(row, Field::Width),
            dimension_or_zero(row, Field::Length),
        ) else {
            return pass();
        };
        if width < MAX_DRILL_WORK_SIDE || length < MAX_DRILL_WORK_SIDE {
            return pass();
        }
        single(format!(
            "製品寸法 {}×{} でドリル孔あり → NG",
            format_numeric(width),
            format_numeric(length)
        ))
    }
}

/// A round piece with drilling should not also carry scribing or reliefs.
///
/// A piece is round when width and length agree and both match the diameter
/// implied by the cut length, after the relief circumferences are removed.
pub struct RoundDrill;

impl RowRule for RoundDrill {
    fn name(&self) -> &'static str {
        rule_names::ROUND_DRILL
    }

    fn label(&self) -> &'static str {
        "丸切りドリルチェック"
    }

    fn check(&self, row: &OrderRow, _ctx: &RuleContext<'_>) -> Result<Vec<String>, RuleError> {
        let positive = |field| row.number_of(field).filter(|value| *value > 0.0);
        let (Some(width), Some(length), Some(cut_length)) = (
            positive(Field::Width),
            positive(Field::Length),
            positive(Field::CutLength),
        ) else {
            return pass();
        };

        let relief_perimeter: f64 = parse_relief_pairs(&row.relief_spec)
            .iter()
            .map(|pair| pair.diameter * PI * f64::from(pair.count))
            .sum();
        let outline = cut_length - relief_perimeter;
        if outline <= 0.0 {
            return pass();
        }

        let diameter = outline / PI;
        let round = (width - length).abs() <= ROUND_TOLERANCE
            && (width - diameter).abs() <= ROUND_TOLERANCE
            && (length - diameter).abs() <= ROUND_TOLERANCE;
        if !round || !row.has(Field::Drill) {
            return pass();
        }
        if !row.has(Field::ScribeDetail) && !row.has(Field::Relief) {
            return pass();
        }
        single(
            "丸切りでドリルあり。ケガキor中抜きがあるようなので確認してください".to_string(),
        )
    }
}

/// Blank reads as zero; text that is not a number yields `None`.
fn dimension_or_zero(row: &OrderRow, field: Field) -> Option<f64> {
    if row.has(field) {
        row.number_of(field)
    } else {
        Some(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::run_row;

    fn sized(thickness: &str, width: &str, length: &str) -> OrderRow {
        OrderRow::new(2)
            .with(Field::Thickness, thickness)
            .with(Field::Width, width)
            .with(Field::Length, length)
    }

    #[test]
    fn test_dimension_tiers() {
        assert!(run_row(&DimensionLimit, &sized("4.0", "1200", "2400")).is_empty());
        assert_eq!(
            run_row(&DimensionLimit, &sized("4.0", "1300", "2000")),
            vec!["製品寸法が4x8より大きいです。5x10はありますか？"]
        );
        assert_eq!(
            run_row(&DimensionLimit, &sized("4.0", "1600", "2000")),
            vec!["製品寸法が5x10を超えています。要確認"]
        );
        assert_eq!(
            run_row(&DimensionLimit, &sized("4.0", "1400", "3200")),
            vec!["製品寸法が5x10を超えています。要確認"]
        );
        // thick plate has no sheet tiers
        assert!(run_row(&DimensionLimit, &sized("6", "1600", "3200")).is_empty());
    }

    #[test]
    fn test_dimension_absolute_limit() {
        assert_eq!(
            run_row(&DimensionLimit, &sized("9", "6500", "100")),
            vec!["幅6500または長さ100が6000を超えています。"]
        );
        assert_eq!(run_row(&DimensionLimit, &sized("3.2", "100", "6001")).len(), 2);
        assert!(run_row(&DimensionLimit, &sized("x", "6500", "100")).is_empty());
    }

    #[test]
    fn test_shot_dimension() {
        let shot = |t: &str, w: &str, l: &str| sized(t, w, l).with(Field::Comment, "33");
        assert_eq!(
            run_row(&ShotDimension, &shot("16", "510", "510")),
            vec!["ショット品（板厚:16）の寸法が500×500を超過 → 幅:510, 長さ:510（コメント:33）"]
        );
        assert!(run_row(&ShotDimension, &shot("16", "600", "400")).is_empty());
        assert!(run_row(&ShotDimension, &shot("15.9", "600", "600")).is_empty());
        assert!(run_row(&ShotDimension, &sized("16", "600", "600")).is_empty());
    }

    #[test]
    fn test_drill_work_size() {
        let row = sized("9", "1501", "1600").with(Field::Drill, "22@1");
        assert_eq!(
            run_row(&DrillWorkSize, &row),
            vec!["製品寸法 1501×1600 でドリル孔あり → NG"]
        );
        assert!(run_row(&DrillWorkSize, &sized("9", "1501", "1600")).is_empty());
        let narrow = sized("9", "1500", "1600").with(Field::Drill, "22@1");
        assert!(run_row(&DrillWorkSize, &narrow).is_empty());
        let blank = sized("9", "", "1600").with(Field::Drill, "22@1");
        assert!(run_row(&DrillWorkSize, &blank).is_empty());
    }

    #[test]
    fn test_round_drill() {
        // 300 mm circle: cut length 300π plus one φ50 relief
        let cut = 300.0 * PI + 50.0 * PI;
        let row = sized("9", "300", "300")
            .with(Field::CutLength, &format!("{cut:.3}"))
            .with(Field::Relief, "φ50@1")
            .with(Field::Drill, "22@4");
        assert_eq!(
            run_row(&RoundDrill, &row),
            vec!["丸切りでドリルあり。ケガキor中抜きがあるようなので確認してください"]
        );

        let no_drill = row.clone().with(Field::Drill, "");
        assert!(run_row(&RoundDrill, &no_drill).is_empty());

        let square = sized("9", "300", "300")
            .with(Field::CutLength, "1200")
            .with(Field::ScribeDetail, "あり")
            .with(Field::Drill, "22@4");
        assert!(run_row(&RoundDrill, &square).is_empty());

        let scribed_circle = sized("9", "300", "300")
            .with(Field::CutLength, &format!("{:.3}", 300.0 * PI))
            .with(Field::ScribeDetail, "あり")
            .with(Field::Drill, "22@4");
        assert_eq!(run_row(&RoundDrill, &scribed_circle).len(), 1);

        let missing_cut = sized("9", "300", "300").with(Field::Drill, "22@4");
        assert!(run_row(&RoundDrill, &missing_cut).is_empty());
    }
}
