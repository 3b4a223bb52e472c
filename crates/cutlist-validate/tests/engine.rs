//! End-to-end validation of order files.

use std::io::Write;

use chrono::NaiveDate;
use cutlist_model::{
    Field, InventoryMaster, OrderFile, OrderRow, RuleConfiguration, rule_names,
};
use cutlist_validate::{
    FileRule, RowRule, RuleContext, RuleError, RuleRegistry, ValidationEngine, validate,
};

const HEADER: &str = "板厚,材質,幅,長さ,コメント,ドリル,中抜き,機種,寸法・型切,サビ,Y,Z";

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn ss400() -> InventoryMaster {
    InventoryMaster::from_pairs([("SS400", &[3.0, 4.5][..])]).unwrap()
}

fn single_row(thickness: &str) -> String {
    format!("{HEADER}\n{thickness},SS400,100,200,,,,43,,,2024/05/01,2024/07/01\n")
}

#[test]
fn thickness_grade_tolerance_end_to_end() {
    let inventory = ss400();
    let config = RuleConfiguration::default();

    let run = |thickness: &str| {
        validate(
            "ss400.csv",
            single_row(thickness).as_bytes(),
            &inventory,
            &config,
            today(),
        )
    };

    let not_stocked = run("4.0");
    assert_eq!(not_stocked.len(), 1);
    assert_eq!(
        not_stocked[0].message,
        "2行目: 板厚と材質の組合せが無効 → 板厚:4.0, 材質:SS400"
    );
    assert_eq!(not_stocked[0].rule.as_deref(), Some(rule_names::THICKNESS_GRADE));

    assert_eq!(run("4.501").len(), 1);
    assert!(run("4.4995").is_empty());
}

#[test]
fn thickness_exactly_one_thousandth_away_is_stocked() {
    let inventory = ss400();
    let config = RuleConfiguration::default();
    let run = |thickness: &str| {
        validate(
            "ss400.csv",
            single_row(thickness).as_bytes(),
            &inventory,
            &config,
            today(),
        )
    };

    assert!(run("3.001").is_empty());
    assert!(run("2.999").is_empty());

    let outside = run("3.0011");
    assert_eq!(outside.len(), 1);
    assert_eq!(outside[0].rule.as_deref(), Some(rule_names::THICKNESS_GRADE));
}

#[test]
fn shift_jis_file_on_disk() {
    let inventory = ss400();
    let config = RuleConfiguration::default();
    let ctx = RuleContext::new(&inventory, &config, today());

    let text = single_row("４．５").replace("43,", "41,");
    let (encoded, _, _) = encoding_rs::SHIFT_JIS.encode(&text);
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(&encoded).unwrap();

    let diagnostics = ValidationEngine::new(&config).validate_path(file.path(), &ctx);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].file, file.path().display().to_string());
    assert_eq!(
        diagnostics[0].message,
        "2行目: 機種プラズマは板厚6以上40まで → 板厚:4.5"
    );
}

#[test]
fn missing_file_yields_one_diagnostic() {
    let inventory = ss400();
    let config = RuleConfiguration::default();
    let ctx = RuleContext::new(&inventory, &config, today());
    let dir = tempfile::TempDir::new().unwrap();

    let diagnostics = ValidationEngine::new(&config).validate_path(&dir.path().join("x.csv"), &ctx);
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message.starts_with("ファイル処理エラー: "));
}

struct Exploding;

impl RowRule for Exploding {
    fn name(&self) -> &'static str {
        "exploding"
    }

    fn label(&self) -> &'static str {
        "爆発チェック"
    }

    fn check(&self, row: &OrderRow, _ctx: &RuleContext<'_>) -> Result<Vec<String>, RuleError> {
        if row.number == 2 {
            Err(RuleError::failed("cell could not be read"))
        } else {
            Ok(Vec::new())
        }
    }
}

struct RowCount;

impl FileRule for RowCount {
    fn name(&self) -> &'static str {
        "row_count"
    }

    fn label(&self) -> &'static str {
        "行数チェック"
    }

    fn check(&self, file: &OrderFile, _ctx: &RuleContext<'_>) -> Result<Vec<String>, RuleError> {
        Ok(vec![format!("{}行", file.rows.len())])
    }
}

#[test]
fn rule_errors_are_contained() {
    let inventory = ss400();
    let config = RuleConfiguration::default();
    let ctx = RuleContext::new(&inventory, &config, today());

    let mut registry = RuleRegistry::new();
    registry.register_row(Box::new(Exploding));
    registry.register_file(Box::new(RowCount));
    let engine = ValidationEngine::with_registry(registry);

    let order = OrderFile::new(
        "custom.csv",
        vec![
            OrderRow::new(2).with(Field::Grade, "SS400"),
            OrderRow::new(3).with(Field::Grade, "SS400"),
        ],
    );
    let diagnostics = engine.validate_order(&order, &ctx);
    let messages: Vec<&str> = diagnostics.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(
        messages,
        vec!["2行目: 爆発チェックでエラー → cell could not be read", "2行"]
    );
}

#[test]
fn engine_uses_configuration_for_enable_map() {
    let inventory = ss400();
    let mut config = RuleConfiguration::default();
    config.set_enabled(rule_names::THICKNESS_GRADE, false).unwrap();
    let engine = ValidationEngine::new(&config);
    assert!(!engine.registry().is_enabled(rule_names::THICKNESS_GRADE));

    let ctx = RuleContext::new(&inventory, &config, today());
    let diagnostics = engine.validate_bytes("a.csv", single_row("4.0").as_bytes(), &ctx);
    assert!(diagnostics.is_empty());
}
