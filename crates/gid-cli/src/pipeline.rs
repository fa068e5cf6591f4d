//! The load, reshape and export stages in sequence.
//!
//! 1. **Load**: read the main wide table and, optionally, the classification
//!    table (a failure there only downgrades to a warning)
//! 2. **Reshape**: pivot to the long table, merge the category column and
//!    collect indicator metadata
//! 3. **Export**: preview, partition and write the workbook
//!
//! Every failure is reported through the [`Reporter`] by the stage that hit
//! it before being returned, so callers only need the exit code.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use gid_common::Reporter;
use gid_ingest::{LoadOptions, LoadedTable, load_table};
use gid_output::{ExportSummary, export_workbook, preview_long_table};
use gid_transform::{
    ColumnClassifier, ColumnRole, Reshaped, TransformError, classify_columns, extract_year,
    reshape,
};
use tracing::{info, info_span};

use crate::config::PipelineConfig;
use crate::error::PipelineError;

// ============================================================================
// Stage 1: Load
// ============================================================================

/// Tables read by the load stage.
#[derive(Debug)]
pub struct LoadResult {
    pub main: LoadedTable,
    /// `None` when classification is disabled or could not be read.
    pub classification: Option<LoadedTable>,
}

/// Reads the main table, then the classification table if enabled.
pub fn load_inputs(
    config: &PipelineConfig,
    options: &LoadOptions,
    reporter: &dyn Reporter,
) -> Result<LoadResult, PipelineError> {
    let main = load_table(&config.main_input, options, reporter)?;
    let classification = if config.classification {
        match load_table(&config.classification_input, options, reporter) {
            Ok(table) => Some(table),
            Err(error) => {
                reporter.warn(&format!("Could not merge classification info: {error}"));
                None
            }
        }
    } else {
        None
    };
    Ok(LoadResult {
        main,
        classification,
    })
}

// ============================================================================
// Stage 2: Reshape
// ============================================================================

/// Pivots the main table and merges the classification column.
pub fn reshape_stage(
    loaded: &LoadResult,
    config: &PipelineConfig,
    reporter: &dyn Reporter,
) -> Result<Reshaped, PipelineError> {
    let classification = loaded.classification.as_ref().map(|loaded| &loaded.table);
    reshape(
        &loaded.main.table,
        classification,
        &config.reshape_options(),
        reporter,
    )
    .map_err(|error| {
        // Missing columns are reported by the reshaper itself.
        if !matches!(error, TransformError::MissingColumns { .. }) {
            reporter.fail(&format!("Reshape error: {error}"));
        }
        PipelineError::from(error)
    })
}

// ============================================================================
// Stage 3: Export
// ============================================================================

/// Writes the workbook, or only previews the long table on a dry run.
pub fn export_stage(
    reshaped: &Reshaped,
    config: &PipelineConfig,
    reporter: &dyn Reporter,
) -> Result<Option<ExportSummary>, PipelineError> {
    let options = config.export_options();
    if config.dry_run {
        preview_long_table(&reshaped.long, options.preview_rows, reporter).inspect_err(
            |error| reporter.fail(&format!("Preview error: {error}")),
        )?;
        reporter.note("Dry run: workbook not written.");
        return Ok(None);
    }
    let summary = export_workbook(
        &reshaped.long,
        reshaped.indicator_info.as_ref(),
        &config.output,
        &options,
        reporter,
    )?;
    Ok(Some(summary))
}

// ============================================================================
// Full run
// ============================================================================

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub main_input: PathBuf,
    /// Encoding that decoded the main input.
    pub encoding: &'static str,
    pub year_columns: usize,
    /// Rows in the long table.
    pub records: usize,
    pub merged: bool,
    /// Distinct indicator code/name pairs, when a name column exists.
    pub indicators: Option<usize>,
    /// `None` on a dry run.
    pub export: Option<ExportSummary>,
    pub elapsed: Duration,
}

/// Runs load, reshape and export once.
pub fn run_pipeline(
    config: &PipelineConfig,
    reporter: &dyn Reporter,
) -> Result<PipelineOutcome, PipelineError> {
    let span = info_span!("pipeline", main = %config.main_input.display());
    let _guard = span.enter();
    let started = Instant::now();

    let options = config.load_options().inspect_err(|error| {
        reporter.fail(&format!("{error:#}"));
    })?;

    reporter.note("[1/3] Reading input files...");
    let loaded = load_inputs(config, &options, reporter)?;

    reporter.note("[2/3] Converting to long format...");
    let reshaped = reshape_stage(&loaded, config, reporter)?;

    reporter.note("[3/3] Exporting to Excel...");
    let export = export_stage(&reshaped, config, reporter)?;

    let elapsed = started.elapsed();
    info!(
        records = reshaped.long.height(),
        sheets = export.as_ref().map_or(0, |summary| summary.sheets.len()),
        elapsed_ms = elapsed.as_millis(),
        "pipeline finished"
    );
    Ok(PipelineOutcome {
        main_input: loaded.main.path.clone(),
        encoding: loaded.main.encoding.name(),
        year_columns: reshaped.layout.years.len(),
        records: reshaped.long.height(),
        merged: reshaped.merged,
        indicators: reshaped.indicator_info.as_ref().map(|info| info.height()),
        export,
        elapsed,
    })
}

// ============================================================================
// Column inspection
// ============================================================================

/// How one header of a wide table is classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub index: usize,
    pub name: String,
    pub role: ColumnRole,
    /// Year extracted from the name, for year columns.
    pub year: Option<i32>,
}

/// Classification of every header of one file.
#[derive(Debug, Clone)]
pub struct ColumnReport {
    pub path: PathBuf,
    pub encoding: &'static str,
    pub columns: Vec<ColumnInfo>,
    /// Key columns that could not be found.
    pub missing: Vec<String>,
}

/// Loads `path` and classifies its headers with the configured rules.
///
/// Missing key columns do not fail the inspection; they are listed in
/// [`ColumnReport::missing`] and the remaining headers are still classified.
pub fn inspect_columns(
    path: &Path,
    config: &PipelineConfig,
    reporter: &dyn Reporter,
) -> Result<ColumnReport, PipelineError> {
    let options = config.load_options().inspect_err(|error| {
        reporter.fail(&format!("{error:#}"));
    })?;
    let loaded = load_table(path, &options, reporter)?;
    let headers = &loaded.table.headers;
    let classifier = config.year_matching.classifier();

    let (roles, missing): (Vec<ColumnRole>, Vec<String>) =
        match classify_columns(headers, classifier) {
            Ok(layout) => ((0..headers.len()).map(|idx| layout.role(idx)).collect(), Vec::new()),
            Err(TransformError::MissingColumns { missing }) => {
                reporter.fail("Required columns not found!");
                let roles = headers
                    .iter()
                    .enumerate()
                    .map(|(idx, name)| {
                        if classifier.is_year(idx, name.trim()) {
                            ColumnRole::Year
                        } else {
                            ColumnRole::Identifier
                        }
                    })
                    .collect();
                (roles, missing)
            }
            Err(error) => return Err(error.into()),
        };

    let columns = headers
        .iter()
        .zip(roles)
        .enumerate()
        .map(|(index, (name, role))| ColumnInfo {
            index,
            name: name.clone(),
            role,
            year: (role == ColumnRole::Year)
                .then(|| extract_year(name))
                .flatten(),
        })
        .collect();

    Ok(ColumnReport {
        path: loaded.path,
        encoding: loaded.encoding.name(),
        columns,
        missing,
    })
}
