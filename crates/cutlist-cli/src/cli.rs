//! CLI argument definitions for the cut-list checker.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "cutlist",
    version,
    about = "Cut-list order checker - QC rules for plate-cutting order CSV files",
    long_about = "Check plate-cutting order CSV files against the grade/thickness master\n\
                  and the machine, drill, relief, shot and date rules.\n\n\
                  Exit status is 0 when every file is clean, 1 when findings were\n\
                  reported and 2 on a fatal error."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check order files or folders of order files.
    Check(CheckArgs),

    /// List the QC rules in evaluation order.
    Rules {
        /// Settings file used to mark rules as enabled or disabled.
        #[arg(long = "config", value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Show the settings file location and the effective settings.
    Config {
        /// Write the default settings file if it does not exist yet.
        #[arg(long = "init")]
        init: bool,
    },
}

#[derive(Parser)]
pub struct CheckArgs {
    /// Order CSV files or folders containing them.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Grade/thickness master (default: 規格板厚マスタ.xlsx beside the executable).
    #[arg(long = "master", value_name = "FILE")]
    pub master: Option<PathBuf>,

    /// Settings file (TOML, or a legacy config.json).
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Number of files checked in parallel.
    #[arg(long = "workers", value_name = "N")]
    pub workers: Option<usize>,

    /// Disable a rule by name (repeatable).
    #[arg(long = "disable", value_name = "RULE")]
    pub disable: Vec<String>,

    /// Enable a rule by name (repeatable).
    #[arg(long = "enable", value_name = "RULE")]
    pub enable: Vec<String>,

    /// Shot rule A: hole diameter that needs no shot blasting.
    #[arg(long = "shot-a", value_name = "MM")]
    pub shot_a: Option<f64>,

    /// Shot rule B: hole diameter that needs shot blasting.
    #[arg(long = "shot-b", value_name = "MM")]
    pub shot_b: Option<f64>,

    /// Shot rule C: hole count from which comment 33 is required.
    #[arg(long = "shot-c", value_name = "COUNT")]
    pub shot_c: Option<i64>,

    /// Apply the shot rule even when a relief of φ38 or more is present.
    #[arg(long = "no-ignore-large-relief")]
    pub no_ignore_large_relief: bool,

    /// Reference date for the date window (YYYY-MM-DD, default: today).
    #[arg(long = "today", value_name = "DATE")]
    pub today: Option<NaiveDate>,

    /// Result output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,

    /// Hide the progress bar.
    #[arg(long = "no-progress")]
    pub no_progress: bool,
}

/// How findings are printed.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    /// One table row per finding.
    Table,
    /// Findings grouped under each file name.
    Text,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
