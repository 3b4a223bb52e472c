//! Whole-file consistency rules.

use cutlist_model::{Field, OrderFile, OrderRow, rule_names};

use super::{EPSILON, FileRule, RuleContext, pass, single};
use crate::error::RuleError;
use crate::parser::shot_mix_sizes;

/// Distance within which a size counts as the small diameter of a shot-mix pair.
const DIAMETER_MATCH: f64 = 1e-3;

/// Presence of a field across the rows of a file.
#[derive(Debug, Default, Clone, Copy)]
struct Presence {
    present: bool,
    absent: bool,
}

impl Presence {
    fn scan(rows: &[OrderRow], field: Field) -> Self {
        rows.iter().fold(Self::default(), |acc, row| {
            let has = row.has(field);
            Self {
                present: acc.present || has,
                absent: acc.absent || !has,
            }
        })
    }

    fn is_mixed(self) -> bool {
        self.present && self.absent
    }
}

/// Relief and drill work are run as separate batches, so a file must not
/// mix rows with and without them.
pub struct FileMix;

impl FileRule for FileMix {
    fn name(&self) -> &'static str {
        rule_names::FILE_MIX
    }

    fn label(&self) -> &'static str {
        "ファイル内の中抜き/ドリル混在チェック"
    }

    fn check(&self, file: &OrderFile, _ctx: &RuleContext<'_>) -> Result<Vec<String>, RuleError> {
        let relief = Presence::scan(&file.rows, Field::Relief);
        let drill = Presence::scan(&file.rows, Field::Drill);

        let mut messages = Vec::new();
        if relief.is_mixed() {
            messages.push(
                "ファイル内で『中抜きの有無』が混在しています（あり/なし）。ファイルを分けてください。"
                    .to_string(),
            );
        }
        if drill.is_mixed() {
            messages.push(
                "ファイル内で『ドリルの有無』が混在しています（あり/なし）。ファイルを分けてください。"
                    .to_string(),
            );
        }
        if drill.present && relief.present {
            messages.push(
                "ファイル内で『ドリル』と『中抜き』が混在しています。ファイルを分けてください。"
                    .to_string(),
            );
        }
        Ok(messages)
    }
}

/// Bevel (K/V groove) details must be filled in the same way on every row.
pub struct GrooveConsistency;

impl GrooveConsistency {
    fn pattern_label(state: (bool, bool)) -> &'static str {
        match state {
            (true, false) => "Kのみ",
            (false, true) => "Vのみ",
            (true, true) => "K+Vあり",
            (false, false) => "K/Vなし",
        }
    }
}

impl FileRule for GrooveConsistency {
    fn name(&self) -> &'static str {
        rule_names::GROOVE_CONSISTENCY
    }

    fn label(&self) -> &'static str {
        "開先K/V整合チェック"
    }

    fn check(&self, file: &OrderFile, _ctx: &RuleContext<'_>) -> Result<Vec<String>, RuleError> {
        if !file.has_column(Field::GrooveK) && !file.has_column(Field::GrooveV) {
            return pass();
        }

        // first-seen order
        let mut counts: Vec<((bool, bool), usize)> = Vec::new();
        for row in &file.rows {
            let state = (row.has(Field::GrooveK), row.has(Field::GrooveV));
            match counts.iter_mut().find(|(seen, _)| *seen == state) {
                Some((_, count)) => *count += 1,
                None => counts.push((state, 1)),
            }
        }
        if counts.len() <= 1 {
            return pass();
        }

        let detail = counts
            .iter()
            .map(|(state, count)| format!("{}:{count}行", Self::pattern_label(*state)))
            .collect::<Vec<_>>()
            .join(" / ");
        single(format!(
            "開先K/Vがファイル内で混在しています → {detail}。ファイルを分けるか、入力を統一してください。"
        ))
    }
}

/// Flags files that mix a no-shot hole size with larger, shot-blasted sizes
/// on the shot machines.
pub struct ShotMix {
    name: &'static str,
    label: &'static str,
    small: f64,
    large: f64,
}

impl ShotMix {
    /// φ15 together with φ18 or larger.
    pub fn fifteen_eighteen() -> Self {
        Self {
            name: rule_names::SHOT_MIX_15_18,
            label: "ショット有無15-18チェック（機種41〜45）",
            small: 15.0,
            large: 18.0,
        }
    }

    /// φ18 together with φ22 or larger.
    pub fn eighteen_twentytwo() -> Self {
        Self {
            name: rule_names::SHOT_MIX_18_22,
            label: "ショット有無18-22チェック（機種41〜45）",
            small: 18.0,
            large: 22.0,
        }
    }
}

impl FileRule for ShotMix {
    fn name(&self) -> &'static str {
        self.name
    }

    fn label(&self) -> &'static str {
        self.label
    }

    fn check(&self, file: &OrderFile, _ctx: &RuleContext<'_>) -> Result<Vec<String>, RuleError> {
        let sizes: Vec<f64> = file.rows.iter().flat_map(shot_mix_sizes).collect();
        let has_small = sizes
            .iter()
            .any(|size| (size - self.small).abs() <= DIAMETER_MATCH);
        let has_large = sizes.iter().any(|size| *size >= self.large - EPSILON);
        if !(has_small && has_large) {
            return pass();
        }
        let (small, large) = (self.small, self.large);
        single(format!(
            "ショット有無{small}-{large}チェック：φ{small} と φ{large}以上があります。ショット確認してください。"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::test_support::ctx;

    fn file(rows: Vec<OrderRow>) -> OrderFile {
        OrderFile::new("mix.csv", rows)
    }

    fn relief_row(number: usize, relief: &str) -> OrderRow {
        OrderRow::new(number).with(Field::Relief, relief)
    }

    #[test]
    fn test_relief_presence_mix() {
        let mixed = file(vec![relief_row(2, "φ22@1"), relief_row(3, "")]);
        assert_eq!(
            FileMix.check(&mixed, &ctx()).unwrap(),
            vec!["ファイル内で『中抜きの有無』が混在しています（あり/なし）。ファイルを分けてください。"]
        );

        let uniform = file(vec![relief_row(2, ""), relief_row(3, " ")]);
        assert!(FileMix.check(&uniform, &ctx()).unwrap().is_empty());
    }

    #[test]
    fn test_drill_and_relief_in_one_file() {
        let rows = vec![
            OrderRow::new(2).with(Field::Drill, "22@1"),
            OrderRow::new(3).with(Field::Relief, "φ22@1"),
        ];
        let messages = FileMix.check(&file(rows), &ctx()).unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(
            messages[2],
            "ファイル内で『ドリル』と『中抜き』が混在しています。ファイルを分けてください。"
        );
    }

    #[test]
    fn test_groove_patterns() {
        let rows = vec![
            OrderRow::new(2).with(Field::GrooveK, "K"),
            OrderRow::new(3),
            OrderRow::new(4).with(Field::GrooveK, "K"),
            OrderRow::new(5)
                .with(Field::GrooveK, "K")
                .with(Field::GrooveV, "V"),
        ];
        let order = file(rows).with_columns([Field::GrooveK, Field::GrooveV]);
        assert_eq!(
            GrooveConsistency.check(&order, &ctx()).unwrap(),
            vec![
                "開先K/Vがファイル内で混在しています → Kのみ:2行 / K/Vなし:1行 / K+Vあり:1行。ファイルを分けるか、入力を統一してください。"
            ]
        );
    }

    #[test]
    fn test_groove_skipped_without_columns() {
        let rows = vec![OrderRow::new(2).with(Field::GrooveK, "K"), OrderRow::new(3)];
        assert!(GrooveConsistency.check(&file(rows), &ctx()).unwrap().is_empty());
    }

    #[test]
    fn test_groove_single_column_reads_other_as_empty() {
        let rows = vec![
            OrderRow::new(2).with(Field::GrooveV, "V"),
            OrderRow::new(3).with(Field::GrooveV, "V"),
        ];
        let order = file(rows).with_columns([Field::GrooveV]);
        assert!(GrooveConsistency.check(&order, &ctx()).unwrap().is_empty());
    }

    #[test]
    fn test_shot_mix_pairs() {
        let rows = vec![
            OrderRow::new(2)
                .with(Field::Machine, "42")
                .with(Field::Drill, "15@2"),
            OrderRow::new(3)
                .with(Field::Machine, "43")
                .with(Field::Relief, "φ18@1"),
        ];
        let order = file(rows);
        assert_eq!(
            ShotMix::fifteen_eighteen().check(&order, &ctx()).unwrap(),
            vec!["ショット有無15-18チェック：φ15 と φ18以上があります。ショット確認してください。"]
        );
        assert!(ShotMix::eighteen_twentytwo().check(&order, &ctx()).unwrap().is_empty());

        let rows = vec![
            OrderRow::new(2)
                .with(Field::Machine, "44")
                .with(Field::Drill, "18@2,24@1"),
        ];
        assert_eq!(
            ShotMix::eighteen_twentytwo().check(&file(rows), &ctx()).unwrap(),
            vec!["ショット有無18-22チェック：φ18 と φ22以上があります。ショット確認してください。"]
        );
    }

    #[test]
    fn test_shot_mix_ignores_other_machines() {
        let rows = vec![
            OrderRow::new(2)
                .with(Field::Machine, "40")
                .with(Field::Drill, "15@2,18@1"),
        ];
        assert!(ShotMix::fifteen_eighteen().check(&file(rows), &ctx()).unwrap().is_empty());
    }
}
