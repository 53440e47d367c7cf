//! CLI argument definitions for the surveillance pipeline.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "surv",
    version,
    about = "Disease surveillance analysis pipeline",
    long_about = "Transform a disease-surveillance dataset into derived views.\n\n\
                  Produces a normalized wide table, a long table with rolling\n\
                  averages and year-over-year growth, and per-country outlier\n\
                  flags from seeded isolation forests."
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
    /// Analyze a surveillance dataset and write the derived tables.
    Analyze(AnalyzeArgs),

    /// List the supported disease metrics.
    Diseases,
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Path to the surveillance dataset (CSV with a header row).
    #[arg(value_name = "DATA_FILE")]
    pub data_file: PathBuf,

    /// Output directory for derived files (default: <DATA_FILE dir>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Expected fraction of anomalous years, in the open interval (0, 1).
    #[arg(long = "contamination", default_value_t = 0.1)]
    pub contamination: f64,

    /// Restrict anomaly detection to specific countries (repeatable).
    #[arg(long = "country", value_name = "NAME")]
    pub country: Vec<String>,

    /// Skip anomaly detection entirely.
    #[arg(long = "no-anomaly")]
    pub no_anomaly: bool,

    /// Seed for the outlier models; identical seeds reproduce identical flags.
    #[arg(long = "seed", default_value_t = 42)]
    pub seed: u64,

    /// Run the pipeline and report without writing output files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
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
