//! Spreadsheet export of the long indicator table.
//!
//! The long table is partitioned into sheets of at most [`ROW_CEILING`] data
//! rows: one sheet per indicator code in order of first appearance, with
//! `_p{n}` parts for indicators that overflow, or `Part{n}` chunks when no
//! indicator column exists. An optional `Indicator_Info` sheet follows the
//! data sheets.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use gid_common::TracingReporter;
//! use gid_output::{ExportOptions, export_workbook};
//!
//! let summary = export_workbook(&long, info.as_ref(), Path::new("out.xlsx"),
//!     &ExportOptions::default(), &TracingReporter)?;
//! println!("{} sheets", summary.sheets.len());
//! ```

mod error;
mod export;
mod naming;
mod partition;
mod preview;
mod target;

pub use error::{ExportError, Result};
pub use export::{
    ExportOptions, ExportSummary, INDICATOR_INFO_SHEET, WrittenSheet, export_workbook,
    preview_long_table,
};
pub use naming::{
    MAX_SHEET_NAME_LEN, SINGLE_SHEET_CODE_LEN, SPLIT_SHEET_CODE_LEN, ensure_unique,
    indicator_part_name, indicator_sheet_name, row_part_name, sanitize_sheet_name,
};
pub use partition::{
    EXCEL_MAX_ROWS, ROW_CEILING, SheetLayout, SheetPlan, chunk_rows, find_indicator_column,
    group_rows, is_indicator_column, plan_sheets,
};
pub use preview::{DEFAULT_PREVIEW_ROWS, render_preview};
pub use target::{OutputTarget, is_lock_error};
