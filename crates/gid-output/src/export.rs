//! Workbook assembly and the export stage entry point.

use std::path::{Path, PathBuf};

use gid_common::{Reporter, cell_number, cell_text};
use polars::prelude::DataFrame;
use rust_xlsxwriter::{ColNum, Format, RowNum, Workbook, Worksheet, XlsxError};
use tracing::{debug, info, info_span};

use crate::error::Result;
use crate::naming::ensure_unique;
use crate::partition::{ROW_CEILING, SheetLayout, plan_sheets};
use crate::preview::{DEFAULT_PREVIEW_ROWS, render_preview};
use crate::target::OutputTarget;

/// Name of the sheet holding indicator code/name pairs.
pub const INDICATOR_INFO_SHEET: &str = "Indicator_Info";

/// Options for [`export_workbook`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Maximum data rows per sheet.
    pub row_ceiling: usize,
    /// Rows shown in the pre-export preview; 0 disables it.
    pub preview_rows: usize,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            row_ceiling: ROW_CEILING,
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

/// One data sheet that was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenSheet {
    pub name: String,
    pub rows: usize,
    pub indicator: Option<String>,
    pub part: Option<usize>,
}

/// What [`export_workbook`] wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub sheets: Vec<WrittenSheet>,
    /// Row count of the `Indicator_Info` sheet, when one was written.
    pub indicator_info_rows: Option<usize>,
    /// Long-table rows left out because their indicator code was missing.
    pub unassigned_rows: usize,
}

impl ExportSummary {
    /// Data rows written across all data sheets.
    pub fn total_rows(&self) -> usize {
        self.sheets.iter().map(|sheet| sheet.rows).sum()
    }
}

/// Reports the first `rows` rows of `long` as a preview.
pub fn preview_long_table(long: &DataFrame, rows: usize, reporter: &dyn Reporter) -> Result<()> {
    if rows == 0 {
        return Ok(());
    }
    let rendered = render_preview(long, rows)?;
    reporter.preview(&format!("SAMPLE ({rows} ROWS):"), &rendered);
    Ok(())
}

/// Writes `long` (and `indicator_info`, if any) to a workbook at `path`.
///
/// The output file is opened and locked before any sheet is built, and its
/// content is replaced in a single write once the whole workbook has been
/// serialized. A locked output is reported separately from other failures.
pub fn export_workbook(
    long: &DataFrame,
    indicator_info: Option<&DataFrame>,
    path: &Path,
    options: &ExportOptions,
    reporter: &dyn Reporter,
) -> Result<ExportSummary> {
    let span = info_span!("export", path = %path.display(), rows = long.height());
    let _guard = span.enter();

    preview_long_table(long, options.preview_rows, reporter)?;

    match write_workbook(long, indicator_info, path, options, reporter) {
        Ok(summary) => {
            info!(sheets = summary.sheets.len(), "export completed");
            reporter.note(&format!("Export completed: {}", path.display()));
            Ok(summary)
        }
        Err(error) => {
            if error.is_locked() {
                reporter.fail(&format!(
                    "'{}' is open in another program! Please close it and retry.",
                    path.display()
                ));
            } else {
                reporter.fail(&format!("Export error: {error}"));
            }
            Err(error)
        }
    }
}

fn write_workbook(
    long: &DataFrame,
    indicator_info: Option<&DataFrame>,
    path: &Path,
    options: &ExportOptions,
    reporter: &dyn Reporter,
) -> Result<ExportSummary> {
    let target = OutputTarget::open(path)?;

    let layout = plan_sheets(long, options.row_ceiling)?;
    report_layout(&layout, reporter);
    let info_name = indicator_info.map(|_| INDICATOR_INFO_SHEET);
    ensure_unique(
        layout
            .sheets
            .iter()
            .map(|sheet| sheet.name.as_str())
            .chain(info_name),
    )?;

    let header = Format::new().set_bold();
    let mut workbook = Workbook::new();
    let mut sheets = Vec::with_capacity(layout.sheets.len());
    for plan in &layout.sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&plan.name)?;
        write_rows(worksheet, long, &plan.rows, &header)?;
        let prefix = if plan.part.is_some() && plan.indicator.is_some() {
            "   "
        } else {
            ""
        };
        reporter.note(&format!("{prefix}→ '{}' ({} rows)", plan.name, plan.rows.len()));
        sheets.push(WrittenSheet {
            name: plan.name.clone(),
            rows: plan.rows.len(),
            indicator: plan.indicator.clone(),
            part: plan.part,
        });
    }

    let mut indicator_info_rows = None;
    if let Some(info) = indicator_info {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(INDICATOR_INFO_SHEET)?;
        let rows: Vec<usize> = (0..info.height()).collect();
        write_rows(worksheet, info, &rows, &header)?;
        indicator_info_rows = Some(info.height());
    }

    let bytes = workbook.save_to_buffer()?;
    debug!(bytes = bytes.len(), "workbook serialized");
    target.commit(&bytes)?;

    Ok(ExportSummary {
        path: path.to_path_buf(),
        sheets,
        indicator_info_rows,
        unassigned_rows: layout.unassigned_rows,
    })
}

fn report_layout(layout: &SheetLayout, reporter: &dyn Reporter) {
    if layout.indicator_column.is_some() {
        reporter.note(&format!(
            "→ {} indicators found. Writing by indicator...",
            layout.indicator_count
        ));
    }
    if layout.unassigned_rows > 0 {
        reporter.warn(&format!(
            "{} rows have no indicator code and were not written.",
            layout.unassigned_rows
        ));
    }
}

/// Writes a bold header row and then `rows` of `frame` below it.
///
/// Numeric columns become number cells; everything else is written as text.
/// Null cells are left blank.
fn write_rows(
    worksheet: &mut Worksheet,
    frame: &DataFrame,
    rows: &[usize],
    header: &Format,
) -> Result<()> {
    for (col_idx, column) in frame.get_columns().iter().enumerate() {
        let col = ColNum::try_from(col_idx).map_err(|_| XlsxError::RowColumnLimitError)?;
        worksheet.write_string_with_format(0, col, column.name().as_str(), header)?;
        let numeric = column.dtype().is_primitive_numeric();
        for (offset, &row_idx) in rows.iter().enumerate() {
            let row = RowNum::try_from(offset + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
            let value = column.get(row_idx)?;
            if value.is_null() {
                continue;
            }
            if numeric {
                if let Some(number) = cell_number(value) {
                    worksheet.write_number(row, col, number)?;
                }
            } else {
                worksheet.write_string(row, col, cell_text(value))?;
            }
        }
    }
    Ok(())
}
