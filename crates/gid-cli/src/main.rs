//! Global indicator data reshaper CLI.

use std::io::{self, IsTerminal};
use std::path::Path;

use clap::{ColorChoice, Parser};
use gid_cli::config::PipelineConfig;
use gid_cli::console::ConsoleReporter;
use gid_cli::error::{EXIT_CONFIG, EXIT_MISSING_COLUMNS, EXIT_SUCCESS};
use gid_cli::logging::{LogConfig, LogFormat, init_logging};
use gid_cli::pipeline::{inspect_columns, run_pipeline};
use gid_common::Reporter;
use tracing::level_filters::LevelFilter;

mod cli;
mod summary;

use crate::cli::{Cli, ColumnsArgs, Command, ConfigArgs, LogFormatArg, LogLevelArg, RunArgs};
use crate::summary::{print_columns, print_summary};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(EXIT_CONFIG);
    }
    let reporter = ConsoleReporter;
    let command = cli
        .command
        .unwrap_or_else(|| Command::Run(RunArgs::default()));
    let exit_code = match command {
        Command::Run(args) => run(&args, &reporter),
        Command::Columns(args) => columns(&args, &reporter),
    };
    std::process::exit(exit_code);
}

fn run(args: &RunArgs, reporter: &ConsoleReporter) -> i32 {
    let config = match run_config(args) {
        Ok(config) => config,
        Err(error) => return report_config_error(&error, reporter),
    };
    reporter.banner("GLOBAL INDICATOR DATA READER & EXPORTER");
    match run_pipeline(&config, reporter) {
        Ok(outcome) => {
            reporter.banner("PROCESS COMPLETED SUCCESSFULLY");
            print_summary(&outcome);
            EXIT_SUCCESS
        }
        Err(error) => error.exit_code(),
    }
}

fn columns(args: &ColumnsArgs, reporter: &ConsoleReporter) -> i32 {
    let config = match base_config(&args.config) {
        Ok(config) => config,
        Err(error) => return report_config_error(&error, reporter),
    };
    let path = args.input.as_deref().unwrap_or(config.main_input.as_path());
    match inspect_columns(path, &config, reporter) {
        Ok(report) => {
            print_columns(&report);
            if report.missing.is_empty() {
                EXIT_SUCCESS
            } else {
                EXIT_MISSING_COLUMNS
            }
        }
        Err(error) => error.exit_code(),
    }
}

fn report_config_error(error: &anyhow::Error, reporter: &dyn Reporter) -> i32 {
    reporter.fail(&format!("{error:#}"));
    EXIT_CONFIG
}

/// Loads the config file (if any) and applies the shared overrides.
fn base_config(args: &ConfigArgs) -> anyhow::Result<PipelineConfig> {
    let mut config = PipelineConfig::load(args.config.as_deref())?;
    if let Some(year_matching) = args.year_matching {
        config.year_matching = year_matching.into();
    }
    Ok(config)
}

/// Applies `run` flags on top of the file configuration.
fn run_config(args: &RunArgs) -> anyhow::Result<PipelineConfig> {
    let mut config = base_config(&args.config)?;
    override_path(&mut config.main_input, args.main_input.as_deref());
    override_path(
        &mut config.classification_input,
        args.classification_input.as_deref(),
    );
    override_path(&mut config.output, args.output.as_deref());
    if args.no_classification {
        config.classification = false;
    }
    if args.dry_run {
        config.dry_run = true;
    }
    if let Some(rows) = args.preview_rows {
        config.preview_rows = rows;
    }
    Ok(config)
}

fn override_path(target: &mut std::path::PathBuf, value: Option<&Path>) {
    if let Some(value) = value {
        *target = value.to_path_buf();
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use gid_transform::YearMatching;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("gid").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_no_subcommand_means_default_run() {
        let cli = parse(&[]);
        assert!(cli.command.is_none());
        let config = run_config(&RunArgs::default()).unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_run_flags_override_defaults() {
        let cli = parse(&[
            "run",
            "--main",
            "wdi.csv",
            "-o",
            "long.xlsx",
            "--no-classification",
            "--dry-run",
            "--year-matching",
            "strict",
        ]);
        let Some(Command::Run(args)) = cli.command else {
            panic!("expected run subcommand");
        };

        let config = run_config(&args).unwrap();

        assert_eq!(config.main_input, Path::new("wdi.csv"));
        assert_eq!(config.output, Path::new("long.xlsx"));
        assert!(!config.classification);
        assert!(config.dry_run);
        assert_eq!(config.year_matching, YearMatching::Strict);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let cli = parse(&["run", "--config", "/nonexistent/gid.toml"]);
        let Some(Command::Run(args)) = cli.command else {
            panic!("expected run subcommand");
        };
        assert!(run_config(&args).is_err());
    }

    #[test]
    fn test_columns_takes_optional_input() {
        let cli = parse(&["columns", "wdi.csv"]);
        let Some(Command::Columns(args)) = cli.command else {
            panic!("expected columns subcommand");
        };
        assert_eq!(args.input.as_deref(), Some(Path::new("wdi.csv")));
    }
}
