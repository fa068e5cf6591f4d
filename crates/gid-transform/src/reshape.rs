//! Reshape stage entry point.

use gid_common::Reporter;
use gid_ingest::CsvTable;
use polars::prelude::DataFrame;
use tracing::{debug, info_span};

use crate::classify::{ColumnLayout, YearMatching, classify_columns};
use crate::error::Result;
use crate::merge::{MergeOptions, merge_classification};
use crate::metadata::indicator_info;
use crate::pivot::{PivotStats, pivot_long};

/// Options for [`reshape`].
#[derive(Debug, Clone, Default)]
pub struct ReshapeOptions {
    pub year_matching: YearMatching,
    /// Join settings for the classification table. `None` skips the merge
    /// even when a classification table is supplied.
    pub merge: Option<MergeOptions>,
}

/// Everything produced by the reshape stage.
#[derive(Debug, Clone)]
pub struct Reshaped {
    /// Long table: identifier columns, `Year`, `Value`, optional category.
    pub long: DataFrame,
    /// Distinct (indicator code, indicator name) pairs, when a name column exists.
    pub indicator_info: Option<DataFrame>,
    pub layout: ColumnLayout,
    pub stats: PivotStats,
    /// Whether the classification category column was added.
    pub merged: bool,
}

/// Turns a wide table into the long table plus indicator metadata.
///
/// Missing key columns abort the stage with
/// [`TransformError::MissingColumns`](crate::TransformError::MissingColumns).
/// A classification merge failure is only reported as a warning and the
/// unmerged long table is returned.
pub fn reshape(
    wide: &CsvTable,
    classification: Option<&CsvTable>,
    options: &ReshapeOptions,
    reporter: &dyn Reporter,
) -> Result<Reshaped> {
    let span = info_span!("reshape", rows = wide.len(), columns = wide.width());
    let _guard = span.enter();

    let layout = match classify_columns(&wide.headers, options.year_matching.classifier()) {
        Ok(layout) => layout,
        Err(error) => {
            reporter.fail("Required columns not found!");
            return Err(error);
        }
    };
    reporter.note(&format!("→ {} year columns detected.", layout.years.len()));

    let pivoted = pivot_long(wide, &layout)?;
    let stats = pivoted.stats;
    debug!(
        valid_year_columns = stats.valid_year_columns,
        dropped_values = stats.dropped_values,
        "pivoted"
    );
    reporter.note(&format!("→ {} clean records ready.", stats.output_rows));

    let mut long = pivoted.frame;
    let mut merged = false;
    if let (Some(table), Some(merge_options)) = (classification, options.merge.as_ref()) {
        let entity_column = wide.headers[layout.entity_code].trim();
        match merge_classification(&long, entity_column, table, merge_options) {
            Ok(result) => {
                debug!(matched_rows = result.matched_rows, "classification merged");
                long = result.frame;
                merged = true;
                reporter.note("→ Classification info merged.");
            }
            Err(error) => {
                reporter.warn(&format!("Could not merge classification info: {error}"));
            }
        }
    }

    let indicator_info = indicator_info(wide, &layout)?;
    reporter.note(&format!("Total {} records ready.", long.height()));

    Ok(Reshaped {
        long,
        indicator_info,
        layout,
        stats,
        merged,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransformError;
    use gid_common::{MemoryReporter, MessageLevel};

    fn wide() -> CsvTable {
        CsvTable::new(
            vec![
                "Country Code".to_string(),
                "Indicator Code".to_string(),
                "1990".to_string(),
            ],
            vec![vec![
                Some("ARG".to_string()),
                Some("SP.POP".to_string()),
                Some("1".to_string()),
            ]],
        )
    }

    #[test]
    fn test_missing_columns_are_reported() {
        let table = CsvTable::new(vec!["Country Name".to_string()], vec![]);
        let reporter = MemoryReporter::new();

        let err = reshape(&table, None, &ReshapeOptions::default(), &reporter).unwrap_err();

        assert!(matches!(err, TransformError::MissingColumns { .. }));
        assert!(reporter.contains(MessageLevel::Fail, "Required columns not found"));
    }

    #[test]
    fn test_merge_failure_is_only_a_warning() {
        let classification = CsvTable::new(vec!["Code".to_string()], vec![]);
        let options = ReshapeOptions {
            merge: Some(MergeOptions::default()),
            ..ReshapeOptions::default()
        };
        let reporter = MemoryReporter::new();

        let reshaped = reshape(&wide(), Some(&classification), &options, &reporter).unwrap();

        assert!(!reshaped.merged);
        assert_eq!(reshaped.long.height(), 1);
        assert_eq!(reshaped.long.width(), 4);
        assert!(reporter.contains(MessageLevel::Warn, "Could not merge classification info"));
    }

    #[test]
    fn test_merge_skipped_without_options() {
        let classification = CsvTable::new(
            vec!["Country Code".to_string(), "Income Group".to_string()],
            vec![],
        );
        let reporter = MemoryReporter::new();

        let reshaped = reshape(
            &wide(),
            Some(&classification),
            &ReshapeOptions::default(),
            &reporter,
        )
        .unwrap();

        assert!(!reshaped.merged);
        assert!(reshaped.indicator_info.is_none());
    }
}
