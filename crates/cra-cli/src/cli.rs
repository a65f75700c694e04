//! CLI argument definitions for the analytics tool.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "clinic-revenue",
    version,
    about = "Clinic revenue analytics - revenue and patient-behavior metrics from visit records",
    long_about = "Compute revenue and patient-behavior analytics from clinic visit and\n\
                  accounting records (remote-API JSON batches or CSV uploads).\n\
                  Produces period revenue metrics, cross-sell transition matrices,\n\
                  an operating-day calendar, and record validation results."
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

    /// Allow patient-level values in logs (disabled by default).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyze record batches and print revenue/behavior metrics.
    Analyze(AnalyzeArgs),

    /// Print the treatment taxonomy and consultation mapping tables.
    Taxonomy,
}

#[derive(Parser)]
pub struct AnalyzeArgs {
    /// Record batch files (.csv uploads or .json API batches).
    #[arg(value_name = "RECORDS", required = true)]
    pub records: Vec<PathBuf>,

    /// Separate accounting batch; defaults to extracting accounting
    /// fields from the record batches themselves.
    #[arg(long = "accounting", value_name = "FILE")]
    pub accounting: Option<PathBuf>,

    /// Period start date (default: earliest record date).
    #[arg(long = "from", value_name = "DATE")]
    pub from: Option<NaiveDate>,

    /// Period end date (default: latest record date).
    #[arg(long = "to", value_name = "DATE")]
    pub to: Option<NaiveDate>,

    /// Custom taxonomy table (CSV with 専門科/施術名 columns).
    #[arg(long = "taxonomy", value_name = "FILE")]
    pub taxonomy: Option<PathBuf>,

    /// Custom consultation mapping table (CSV).
    #[arg(long = "consultations", value_name = "FILE")]
    pub consultations: Option<PathBuf>,

    /// Output directory for JSON reports (default: current directory).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Skip writing the JSON analytics report.
    #[arg(long = "no-report")]
    pub no_report: bool,

    /// Skip the cross-sell transition analysis.
    #[arg(long = "no-transitions")]
    pub no_transitions: bool,

    /// Include per-day metric rows in the printed summary.
    #[arg(long = "daily")]
    pub daily: bool,
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
