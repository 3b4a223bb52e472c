//! Per-file validation.
//!
//! The engine decodes an order file, checks its structure and then runs the
//! enabled row rules on every row followed by the file rules. A structural
//! failure yields exactly one diagnostic and no rule runs for that file.

use std::path::Path;

use chrono::NaiveDate;
use cutlist_ingest::{IngestError, read_order_bytes, read_order_file};
use cutlist_model::{Diagnostic, InventoryMaster, OrderFile, RuleConfiguration};
use tracing::{debug, trace, warn};

use crate::rules::{RuleContext, RuleRegistry};

/// Runs a registry of rules against order files.
#[derive(Default)]
pub struct ValidationEngine {
    registry: RuleRegistry,
}

impl ValidationEngine {
    /// Standard rules filtered by the configuration's enable map.
    pub fn new(config: &RuleConfiguration) -> Self {
        Self::with_registry(RuleRegistry::for_configuration(config))
    }

    pub fn with_registry(registry: RuleRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Validates a file on disk. The file name in diagnostics is the path.
    pub fn validate_path(&self, path: &Path, ctx: &RuleContext<'_>) -> Vec<Diagnostic> {
        match read_order_file(path) {
            Ok(order) => self.validate_order(&order, ctx),
            Err(err) => vec![structural(&path.display().to_string(), &err)],
        }
    }

    /// Validates raw file content.
    pub fn validate_bytes(
        &self,
        file: &str,
        bytes: &[u8],
        ctx: &RuleContext<'_>,
    ) -> Vec<Diagnostic> {
        match read_order_bytes(file, bytes) {
            Ok(order) => self.validate_order(&order, ctx),
            Err(err) => vec![structural(file, &err)],
        }
    }

    /// Runs the enabled rules on an already parsed file.
    ///
    /// Diagnostics are ordered by row, each row in rule order, followed by
    /// the file-level findings.
    pub fn validate_order(&self, order: &OrderFile, ctx: &RuleContext<'_>) -> Vec<Diagnostic> {
        debug!(file = %order.name, rows = order.rows.len(), "validating order file");
        let mut diagnostics = Vec::new();

        for row in &order.rows {
            for rule in self.registry.row_rules() {
                let texts = match rule.check(row, ctx) {
                    Ok(texts) => texts,
                    Err(err) => {
                        warn!(file = %order.name, row = row.number, rule = rule.name(), error = %err, "rule failed");
                        vec![format!("{}でエラー → {err}", rule.label())]
                    }
                };
                for text in texts {
                    trace!(file = %order.name, row = row.number, rule = rule.name(), "{text}");
                    diagnostics.push(Diagnostic::for_row(&order.name, row.number, rule.name(), &text));
                }
            }
        }

        for rule in self.registry.file_rules() {
            let texts = match rule.check(order, ctx) {
                Ok(texts) => texts,
                Err(err) => {
                    warn!(file = %order.name, rule = rule.name(), error = %err, "rule failed");
                    vec![format!("{}でエラー → {err}", rule.label())]
                }
            };
            for text in texts {
                trace!(file = %order.name, rule = rule.name(), "{text}");
                diagnostics.push(Diagnostic::for_file(&order.name, rule.name(), &text));
            }
        }

        diagnostics
    }
}

/// Single diagnostic for a file that could not be evaluated.
fn structural(file: &str, err: &IngestError) -> Diagnostic {
    warn!(file, error = %err, "order file rejected");
    if err.is_missing_column() {
        Diagnostic::structural(file, err.to_string())
    } else {
        Diagnostic::structural(file, format!("ファイル処理エラー: {err}"))
    }
}

/// Validates raw content with the standard rules filtered by `ctx.config`.
pub fn validate_bytes(file: &str, bytes: &[u8], ctx: &RuleContext<'_>) -> Vec<Diagnostic> {
    ValidationEngine::new(ctx.config).validate_bytes(file, bytes, ctx)
}

/// One-shot validation of file content against an inventory and configuration.
pub fn validate(
    file: &str,
    content: &[u8],
    inventory: &InventoryMaster,
    config: &RuleConfiguration,
    today: NaiveDate,
) -> Vec<Diagnostic> {
    validate_bytes(file, content, &RuleContext::new(inventory, config, today))
}

/// Validates a file on disk with the standard rules filtered by `ctx.config`.
pub fn validate_path(path: &Path, ctx: &RuleContext<'_>) -> Vec<Diagnostic> {
    ValidationEngine::new(ctx.config).validate_path(path, ctx)
}
