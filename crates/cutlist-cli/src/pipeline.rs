//! Parallel batch validation.
//!
//! A fixed number of scoped worker threads pull file indices from a shared
//! counter and send each file's diagnostics back over a rendezvous channel.
//! The calling thread collects results and reports progress. A worker holds
//! at most one finished file while the caller handles the previous one, so
//! cancelling from the progress callback stops new work within one file per
//! worker.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;

use cutlist_model::Diagnostic;
use cutlist_validate::{RuleContext, ValidationEngine};
use tracing::{debug, info};

use crate::settings::DEFAULT_WORKERS;

/// Cooperative cancellation flag shared between the caller and the workers.
///
/// Workers check it before taking the next file; a file already being
/// validated always finishes.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BatchOptions {
    /// Number of worker threads. Zero is treated as one.
    pub workers: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
        }
    }
}

/// Result of a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Diagnostics of every completed file. Each file's diagnostics are
    /// contiguous; files appear in completion order.
    pub diagnostics: Vec<Diagnostic>,
    pub completed: usize,
    pub total: usize,
    pub cancelled: bool,
}

impl BatchOutcome {
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Number of distinct files with at least one diagnostic.
    pub fn files_with_diagnostics(&self) -> usize {
        let mut count = 0;
        let mut last: Option<&str> = None;
        for diagnostic in &self.diagnostics {
            if last != Some(diagnostic.file.as_str()) {
                count += 1;
                last = Some(diagnostic.file.as_str());
            }
        }
        count
    }
}

/// Validates `files` on a pool of worker threads.
///
/// `on_progress(completed, total, path)` runs on the calling thread after
/// each file finishes.
pub fn run_batch<F>(
    files: &[PathBuf],
    engine: &ValidationEngine,
    ctx: &RuleContext<'_>,
    options: BatchOptions,
    cancel: &CancellationToken,
    mut on_progress: F,
) -> BatchOutcome
where
    F: FnMut(usize, usize, &Path),
{
    let total = files.len();
    let workers = options.workers.max(1).min(total.max(1));
    let next = AtomicUsize::new(0);
    let mut outcome = BatchOutcome {
        total,
        ..BatchOutcome::default()
    };
    debug!(files = total, workers, "starting batch");

    thread::scope(|scope| {
        let (sender, receiver) = mpsc::sync_channel::<(usize, Vec<Diagnostic>)>(0);
        for _ in 0..workers {
            let sender = sender.clone();
            let next = &next;
            scope.spawn(move || {
                loop {
                    if cancel.is_cancelled() {
                        break;
                    }
                    let index = next.fetch_add(1, Ordering::SeqCst);
                    let Some(path) = files.get(index) else {
                        break;
                    };
                    let diagnostics = engine.validate_path(path, ctx);
                    if sender.send((index, diagnostics)).is_err() {
                        break;
                    }
                }
            });
        }
        drop(sender);

        for (index, diagnostics) in receiver {
            outcome.completed += 1;
            outcome.diagnostics.extend(diagnostics);
            on_progress(outcome.completed, total, files[index].as_path());
        }
    });

    outcome.cancelled = cancel.is_cancelled() && outcome.completed < total;
    if outcome.cancelled {
        info!(
            completed = outcome.completed,
            total, "batch cancelled before all files were checked"
        );
    }
    outcome
}
