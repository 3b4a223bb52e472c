//! Result rendering: per-file grouped text, a flat table and JSON.

use std::collections::BTreeMap;
use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};
use cutlist_model::Diagnostic;
use cutlist_validate::{RuleDescriptor, RuleScope};
use serde::Serialize;

use crate::pipeline::BatchOutcome;

pub const ALL_CLEAR: &str = "すべて正常でした！";
pub const NO_FILES: &str = "処理対象のCSVファイルが見つかりません";
pub const STOPPED: &str = "処理が停止されました";

/// File name shown to the user: the last path component.
pub fn display_name(file: &str) -> &str {
    Path::new(file)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(file)
}

/// Diagnostic messages grouped by display name, file names sorted.
pub fn group_by_file(diagnostics: &[Diagnostic]) -> BTreeMap<&str, Vec<&str>> {
    let mut groups: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for diagnostic in diagnostics {
        groups
            .entry(display_name(&diagnostic.file))
            .or_default()
            .push(diagnostic.message.as_str());
    }
    groups
}

/// One-line status for the end of a run.
pub fn status_line(outcome: &BatchOutcome) -> String {
    if outcome.cancelled {
        return format!("{STOPPED}（{}/{}）", outcome.completed, outcome.total);
    }
    if outcome.total == 0 {
        return NO_FILES.to_string();
    }
    if outcome.diagnostics.is_empty() {
        return ALL_CLEAR.to_string();
    }
    format!(
        "チェック完了: {}件のエラーが見つかりました（{}ファイル）",
        outcome.diagnostics.len(),
        group_by_file(&outcome.diagnostics).len()
    )
}

/// Findings grouped per file, each group headed by `name（n件）`.
pub fn render_text(diagnostics: &[Diagnostic]) -> String {
    let mut out = String::new();
    for (index, (file, messages)) in group_by_file(diagnostics).into_iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        out.push_str(&format!("{file}（{}件）\n", messages.len()));
        for message in messages {
            out.push_str("  ");
            out.push_str(message);
            out.push('\n');
        }
    }
    out
}

/// Every finding as one table row: file name and message.
pub fn render_table(diagnostics: &[Diagnostic]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("ファイル名"), header_cell("違反内容")]);
    apply_findings_table_style(&mut table);
    let mut previous: Option<&str> = None;
    for diagnostic in diagnostics {
        let name = display_name(&diagnostic.file);
        let file_cell = if previous == Some(name) {
            dim_cell(name)
        } else {
            Cell::new(name).fg(Color::Blue).add_attribute(Attribute::Bold)
        };
        previous = Some(name);
        table.add_row(vec![file_cell, message_cell(diagnostic)]);
    }
    table
}

/// Registry listing for `cutlist rules`.
pub fn render_rules(descriptors: &[RuleDescriptor]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rule"),
        header_cell("Scope"),
        header_cell("Label"),
        header_cell("Enabled"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Center);
    for descriptor in descriptors {
        table.add_row(vec![
            Cell::new(descriptor.name),
            scope_cell(descriptor.scope),
            Cell::new(descriptor.label),
            enabled_cell(descriptor.enabled),
        ]);
    }
    table
}

#[derive(Serialize)]
struct JsonReport<'a> {
    total: usize,
    completed: usize,
    cancelled: bool,
    diagnostics: &'a [Diagnostic],
}

/// Machine-readable report.
pub fn render_json(outcome: &BatchOutcome) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        total: outcome.total,
        completed: outcome.completed,
        cancelled: outcome.cancelled,
        diagnostics: &outcome.diagnostics,
    })
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_findings_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
    if table.column_count() >= 2 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
            ColumnConstraint::LowerBoundary(Width::Fixed(40)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn message_cell(diagnostic: &Diagnostic) -> Cell {
    if diagnostic.rule.is_none() {
        Cell::new(&diagnostic.message)
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    } else if diagnostic.is_row_level() {
        Cell::new(&diagnostic.message)
    } else {
        Cell::new(&diagnostic.message).fg(Color::Yellow)
    }
}

fn scope_cell(scope: RuleScope) -> Cell {
    match scope {
        RuleScope::Row => Cell::new(scope.as_str()),
        RuleScope::File => Cell::new(scope.as_str()).fg(Color::Magenta),
    }
}

fn enabled_cell(enabled: bool) -> Cell {
    if enabled {
        Cell::new("✓").fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        dim_cell("-")
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
