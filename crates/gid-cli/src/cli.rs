//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use gid_transform::YearMatching;

#[derive(Parser)]
#[command(
    name = "gid",
    version,
    about = "Global indicator data reshaper - wide CSV to long-format Excel",
    long_about = "Reshape a World Development Indicators style wide CSV (one column per year)\n\
                  into a long table, merge income-group classification, and export it\n\
                  to an Excel workbook split by indicator and sheet row limits.\n\n\
                  Without a subcommand, `run` is executed with default settings."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
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
    /// Load, reshape and export the dataset.
    Run(RunArgs),

    /// Show how each column header of a file is classified.
    Columns(ColumnsArgs),
}

/// Settings shared by every subcommand.
#[derive(Args, Default)]
pub struct ConfigArgs {
    /// TOML configuration file; command-line flags take precedence.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Year column detection rule.
    #[arg(long = "year-matching", value_enum)]
    pub year_matching: Option<YearMatchingArg>,
}

#[derive(Args, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Wide-format main dataset (default: data_main.csv).
    #[arg(long = "main", value_name = "CSV")]
    pub main_input: Option<PathBuf>,

    /// Classification table with income groups (default: data_country.csv).
    #[arg(long = "classification", value_name = "CSV")]
    pub classification_input: Option<PathBuf>,

    /// Output workbook (default: global_indicator_output.xlsx).
    #[arg(short = 'o', long = "output", value_name = "XLSX")]
    pub output: Option<PathBuf>,

    /// Skip loading and merging the classification table.
    #[arg(long = "no-classification")]
    pub no_classification: bool,

    /// Preview the long table without writing the workbook.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Rows shown in the preview (0 disables it).
    #[arg(long = "preview-rows", value_name = "N")]
    pub preview_rows: Option<usize>,
}

#[derive(Args)]
pub struct ColumnsArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// File to inspect (default: the configured main input).
    #[arg(value_name = "CSV")]
    pub input: Option<PathBuf>,
}

/// CLI year matching choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum YearMatchingArg {
    /// Header contains "19", "20" or "YR".
    Substring,
    /// Header is a four-digit year or "YYYY [YRYYYY]".
    Strict,
}

impl From<YearMatchingArg> for YearMatching {
    fn from(arg: YearMatchingArg) -> Self {
        match arg {
            YearMatchingArg::Substring => Self::Substring,
            YearMatchingArg::Strict => Self::Strict,
        }
    }
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
