//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "prepcheck",
    version,
    about = "Data quality profiler for tabular datasets",
    long_about = "Profile a tabular dataset for quality issues: missing values,\n\
                  target leakage, outliers, drift, and more. Generates structured\n\
                  fix suggestions and Python remediation code."
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
    /// Analyze a CSV dataset and report quality issues.
    Analyze(AnalyzeArgs),

    /// List all supported check names.
    Checks,
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Path to the CSV dataset.
    #[arg(value_name = "DATA_CSV")]
    pub data: PathBuf,

    /// Target/label column for leakage and imbalance checks.
    #[arg(long = "target", value_name = "COLUMN")]
    pub target: Option<String>,

    /// Comparison CSV for drift detection.
    #[arg(long = "compare", value_name = "CSV")]
    pub compare: Option<PathBuf>,

    /// Comma-separated list of checks to run (default: all).
    #[arg(long = "checks", value_name = "NAMES", value_delimiter = ',')]
    pub checks: Option<Vec<String>>,

    /// Write the full analysis result as JSON to this path.
    #[arg(long = "json", value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Write a generated pandas cleaning script to this path.
    #[arg(long = "fix-script", value_name = "PATH")]
    pub fix_script: Option<PathBuf>,

    /// Write a generated sklearn pipeline script to this path.
    #[arg(long = "pipeline-script", value_name = "PATH")]
    pub pipeline_script: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
