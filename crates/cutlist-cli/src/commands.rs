use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use chrono::Local;
use cutlist_cli::pipeline::{BatchOptions, BatchOutcome, CancellationToken, run_batch};
use cutlist_cli::report::{
    display_name, render_json, render_rules, render_table, render_text, status_line,
};
use cutlist_cli::settings::{
    Settings, load_settings, load_settings_from, save_settings_to, settings_path,
};
use cutlist_ingest::{DEFAULT_MASTER_FILE_NAME, list_order_files, load_inventory};
use cutlist_model::RuleConfiguration;
use cutlist_validate::{RuleContext, RuleRegistry, ValidationEngine};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, info_span, warn};

use crate::cli::{CheckArgs, OutputFormatArg};

pub fn run_check(args: &CheckArgs) -> Result<BatchOutcome> {
    let check_span = info_span!("check", paths = args.paths.len());
    let _check_guard = check_span.enter();
    let started = Instant::now();

    let settings = resolve_settings(args.config.as_deref())?;
    let config = build_configuration(&settings, args)?;
    let disabled: Vec<&str> = config.disabled_rules().collect();
    debug!(?disabled, "rule configuration");

    let master_path = resolve_master(args.master.as_deref(), &settings)?;
    let inventory = load_inventory(&master_path)
        .with_context(|| format!("load master {}", master_path.display()))?;
    info!(
        path = %master_path.display(),
        grades = inventory.grade_count(),
        thicknesses = inventory.thickness_count(),
        "loaded master"
    );

    let files = collect_files(&args.paths)?;
    if files.is_empty() {
        warn!("no order files found");
        return Ok(BatchOutcome::default());
    }

    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let engine = ValidationEngine::new(&config);
    let ctx = RuleContext::new(&inventory, &config, today);
    let options = BatchOptions {
        workers: args.workers.unwrap_or(settings.workers),
    };
    let cancel = CancellationToken::new();
    let progress = progress_bar(files.len(), args.no_progress);

    let outcome = run_batch(&files, &engine, &ctx, options, &cancel, |done, _, path| {
        progress.set_position(done as u64);
        progress.set_message(display_name(&path.to_string_lossy()).to_string());
    });
    progress.finish_and_clear();

    info!(
        files = outcome.completed,
        diagnostics = outcome.diagnostics.len(),
        duration_ms = started.elapsed().as_millis(),
        "check complete"
    );
    Ok(outcome)
}

pub fn print_outcome(outcome: &BatchOutcome, format: OutputFormatArg) -> Result<()> {
    match format {
        OutputFormatArg::Json => {
            println!("{}", render_json(outcome).context("serialize report")?);
            return Ok(());
        }
        OutputFormatArg::Table if outcome.has_diagnostics() => {
            println!("{}", render_table(&outcome.diagnostics));
        }
        OutputFormatArg::Text if outcome.has_diagnostics() => {
            print!("{}", render_text(&outcome.diagnostics));
            println!();
        }
        OutputFormatArg::Table | OutputFormatArg::Text => {}
    }
    println!("{}", status_line(outcome));
    Ok(())
}

pub fn run_rules(config: Option<&Path>) -> Result<()> {
    let settings = resolve_settings(config)?;
    let config = RuleConfiguration::from_settings(&settings.rule_settings())
        .context("invalid rule configuration")?;
    let registry = RuleRegistry::for_configuration(&config);
    println!("{}", render_rules(&registry.descriptors()));
    Ok(())
}

pub fn run_config(init: bool) -> Result<()> {
    let path = settings_path().ok_or_else(|| anyhow!("could not determine settings path"))?;
    if init && !path.exists() {
        save_settings_to(&path, &Settings::default())
            .with_context(|| format!("write settings {}", path.display()))?;
        info!(path = %path.display(), "wrote default settings");
    }
    println!("# {}", path.display());
    let settings = load_settings();
    print!(
        "{}",
        toml::to_string_pretty(&settings).context("serialize settings")?
    );
    Ok(())
}

fn resolve_settings(config: Option<&Path>) -> Result<Settings> {
    match config {
        Some(path) => {
            load_settings_from(path).with_context(|| format!("load settings {}", path.display()))
        }
        None => Ok(load_settings()),
    }
}

/// Settings, then command-line overrides, validated together.
fn build_configuration(settings: &Settings, args: &CheckArgs) -> Result<RuleConfiguration> {
    let mut rule_settings = settings.rule_settings();
    if let Some(a) = args.shot_a {
        rule_settings.shot_rule.a = a;
    }
    if let Some(b) = args.shot_b {
        rule_settings.shot_rule.b = b;
    }
    if let Some(c) = args.shot_c {
        rule_settings.shot_rule.c = c;
    }
    if args.no_ignore_large_relief {
        rule_settings.shot_rule.ignore_when_relief_at_least_38 = false;
    }
    let mut config =
        RuleConfiguration::from_settings(&rule_settings).context("invalid rule configuration")?;
    for name in &args.disable {
        config
            .set_enabled(name, false)
            .with_context(|| format!("--disable {name}"))?;
    }
    for name in &args.enable {
        config
            .set_enabled(name, true)
            .with_context(|| format!("--enable {name}"))?;
    }
    Ok(config)
}

fn resolve_master(explicit: Option<&Path>, settings: &Settings) -> Result<PathBuf> {
    if let Some(path) = explicit.or(settings.master.as_deref()) {
        return Ok(path.to_path_buf());
    }
    let exe = std::env::current_exe().context("locate executable")?;
    let dir = exe
        .parent()
        .ok_or_else(|| anyhow!("executable has no parent directory"))?;
    Ok(dir.join(DEFAULT_MASTER_FILE_NAME))
}

/// Expands folders into their order files; explicit files are taken as is.
fn collect_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let found = list_order_files(path)
                .with_context(|| format!("list order files in {}", path.display()))?;
            debug!(dir = %path.display(), files = found.len(), "discovered order files");
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn progress_bar(len: usize, hidden: bool) -> ProgressBar {
    if hidden || !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    bar.set_style(style);
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}
