//! Integration tests for the batch pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use cutlist_cli::pipeline::{BatchOptions, CancellationToken, run_batch};
use cutlist_model::{InventoryMaster, RuleConfiguration};
use cutlist_validate::{RuleContext, ValidationEngine};

const HEADER: &str = "板厚,材質,幅,長さ,コメント,ドリル,中抜き,機種,寸法・型切,サビ,Y,Z";

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
}

fn inventory() -> InventoryMaster {
    InventoryMaster::from_pairs([("SS400", &[3.0, 4.5][..])]).unwrap()
}

/// Writes `count` order files; every file has two rows with an unstocked
/// thickness, so each yields exactly two diagnostics.
fn write_orders(dir: &Path, count: usize) -> Vec<PathBuf> {
    (0..count)
        .map(|index| {
            let path = dir.join(format!("order_{index:02}.csv"));
            let body = format!(
                "{HEADER}\n\
                 4.0,SS400,100,200,,,,43,,,2024/05/01,2024/07/01\n\
                 4.5,SS400,100,200,,,,43,,,2024/05/01,2024/07/01\n\
                 5.0,SS400,100,200,,,,43,,,2024/05/01,2024/07/01\n"
            );
            fs::write(&path, body).unwrap();
            path
        })
        .collect()
}

#[test]
fn test_every_file_is_checked_and_stays_contiguous() {
    let dir = tempfile::tempdir().unwrap();
    let files = write_orders(dir.path(), 9);
    let inventory = inventory();
    let config = RuleConfiguration::default();
    let engine = ValidationEngine::new(&config);
    let ctx = RuleContext::new(&inventory, &config, today());

    let mut progress = Vec::new();
    let outcome = run_batch(
        &files,
        &engine,
        &ctx,
        BatchOptions { workers: 3 },
        &CancellationToken::new(),
        |done, total, _| progress.push((done, total)),
    );

    assert_eq!(outcome.total, 9);
    assert_eq!(outcome.completed, 9);
    assert!(!outcome.cancelled);
    assert_eq!(outcome.diagnostics.len(), 18);
    assert_eq!(outcome.files_with_diagnostics(), 9);
    assert_eq!(progress, (1..=9).map(|done| (done, 9)).collect::<Vec<_>>());

    for pair in outcome.diagnostics.chunks(2) {
        assert_eq!(pair[0].file, pair[1].file);
        assert_eq!(pair[0].row, Some(2));
        assert_eq!(pair[1].row, Some(4));
    }
}

#[test]
fn test_pre_cancelled_batch_checks_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let files = write_orders(dir.path(), 4);
    let inventory = inventory();
    let config = RuleConfiguration::default();
    let engine = ValidationEngine::new(&config);
    let ctx = RuleContext::new(&inventory, &config, today());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let outcome = run_batch(
        &files,
        &engine,
        &ctx,
        BatchOptions::default(),
        &cancel,
        |_, _, _| {},
    );

    assert_eq!(outcome.completed, 0);
    assert_eq!(outcome.total, 4);
    assert!(outcome.cancelled);
    assert!(outcome.diagnostics.is_empty());
}

#[test]
fn test_cancel_during_batch_finishes_in_flight_files_only() {
    let dir = tempfile::tempdir().unwrap();
    let files = write_orders(dir.path(), 6);
    let inventory = inventory();
    let config = RuleConfiguration::default();
    let engine = ValidationEngine::new(&config);
    let ctx = RuleContext::new(&inventory, &config, today());
    let cancel = CancellationToken::new();

    let outcome = run_batch(
        &files,
        &engine,
        &ctx,
        BatchOptions { workers: 1 },
        &cancel,
        |done, _, _| {
            if done == 1 {
                cancel.cancel();
            }
        },
    );

    assert!(outcome.cancelled);
    assert_eq!(outcome.total, 6);
    // The first file plus at most the one the worker already held.
    assert!((1..=2).contains(&outcome.completed), "{}", outcome.completed);
    assert_eq!(outcome.diagnostics.len(), outcome.completed * 2);
    for pair in outcome.diagnostics.chunks(2) {
        assert_eq!(pair[0].file, pair[1].file);
        assert_eq!(pair[0].row, Some(2));
        assert_eq!(pair[1].row, Some(4));
    }
}

#[test]
fn test_zero_workers_still_runs_and_missing_files_are_reported() {
    let dir = tempfile::tempdir().unwrap();
    let mut files = write_orders(dir.path(), 1);
    files.push(dir.path().join("missing.csv"));
    let inventory = inventory();
    let config = RuleConfiguration::default();
    let engine = ValidationEngine::new(&config);
    let ctx = RuleContext::new(&inventory, &config, today());

    let outcome = run_batch(
        &files,
        &engine,
        &ctx,
        BatchOptions { workers: 0 },
        &CancellationToken::new(),
        |_, _, _| {},
    );

    assert_eq!(outcome.completed, 2);
    assert_eq!(outcome.diagnostics.len(), 3);
    let missing: Vec<_> = outcome
        .diagnostics
        .iter()
        .filter(|d| d.file.ends_with("missing.csv"))
        .collect();
    assert_eq!(missing.len(), 1);
    assert!(missing[0].message.starts_with("ファイル処理エラー: "));
    assert_eq!(missing[0].rule, None);
}

#[test]
fn test_empty_batch() {
    let inventory = inventory();
    let config = RuleConfiguration::default();
    let engine = ValidationEngine::new(&config);
    let ctx = RuleContext::new(&inventory, &config, today());

    let outcome = run_batch(
        &[],
        &engine,
        &ctx,
        BatchOptions::default(),
        &CancellationToken::new(),
        |_, _, _| {},
    );

    assert_eq!(outcome.total, 0);
    assert_eq!(outcome.completed, 0);
    assert!(!outcome.cancelled);
}
