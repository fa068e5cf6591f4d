//! Wide-to-long pivot with year and value coercion.

use gid_ingest::CsvTable;
use polars::prelude::{Column, DataFrame, NamedFrom, Series};

use crate::classify::ColumnLayout;
use crate::error::Result;
use crate::numeric::parse_value;
use crate::year::extract_year;

/// Name of the year column in the long table.
pub const YEAR_COLUMN: &str = "Year";
/// Name of the value column in the long table.
pub const VALUE_COLUMN: &str = "Value";

/// Counters describing one pivot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PivotStats {
    pub input_rows: usize,
    /// Columns classified as year columns.
    pub year_columns: usize,
    /// Year columns whose name yielded a four-digit year.
    pub valid_year_columns: usize,
    /// Cells under valid year columns that were dropped as non-numeric.
    pub dropped_values: usize,
    pub output_rows: usize,
}

/// Output of [`pivot_long`].
#[derive(Debug, Clone)]
pub struct Pivoted {
    pub frame: DataFrame,
    pub stats: PivotStats,
}

/// Melts the year columns of `table` into (`Year`, `Value`) rows.
///
/// Rows are emitted column-major: every input row for the first year column,
/// then every input row for the next one. Identifier columns are repeated on
/// each output row. Year columns without a four-digit year, and cells that do
/// not coerce to a finite number, produce no rows.
pub fn pivot_long(table: &CsvTable, layout: &ColumnLayout) -> Result<Pivoted> {
    let mut stats = PivotStats {
        input_rows: table.len(),
        year_columns: layout.years.len(),
        ..PivotStats::default()
    };

    let mut identifier_values: Vec<Vec<Option<String>>> =
        vec![Vec::new(); layout.identifiers.len()];
    let mut years: Vec<i32> = Vec::new();
    let mut values: Vec<f64> = Vec::new();

    for &year_idx in &layout.years {
        let Some(year) = extract_year(&table.headers[year_idx]) else {
            continue;
        };
        stats.valid_year_columns += 1;
        for row in &table.rows {
            let parsed = row
                .get(year_idx)
                .and_then(|cell| cell.as_deref())
                .and_then(parse_value);
            let Some(value) = parsed else {
                stats.dropped_values += 1;
                continue;
            };
            for (slot, &id_idx) in identifier_values.iter_mut().zip(&layout.identifiers) {
                slot.push(row.get(id_idx).cloned().flatten());
            }
            years.push(year);
            values.push(value);
        }
    }
    stats.output_rows = values.len();

    let mut columns: Vec<Column> = Vec::with_capacity(layout.identifiers.len() + 2);
    for (values, &id_idx) in identifier_values.iter().zip(&layout.identifiers) {
        let name = table.headers[id_idx].trim();
        columns.push(Series::new(name.into(), values).into());
    }
    columns.push(Series::new(YEAR_COLUMN.into(), years).into());
    columns.push(Series::new(VALUE_COLUMN.into(), values).into());

    let frame = DataFrame::new(columns)?;
    Ok(Pivoted { frame, stats })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{SubstringYears, classify_columns};

    fn table(headers: &[&str], rows: &[&[Option<&str>]]) -> CsvTable {
        CsvTable::new(
            headers.iter().map(|h| (*h).to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|cell| cell.map(str::to_string)).collect())
                .collect(),
        )
    }

    #[test]
    fn test_pivot_is_column_major() {
        let wide = table(
            &["Country Code", "Indicator Code", "1990", "1991"],
            &[
                &[Some("ARG"), Some("SP.POP"), Some("1"), Some("2")],
                &[Some("BRA"), Some("SP.POP"), Some("3"), Some("4")],
            ],
        );
        let layout = classify_columns(&wide.headers, &SubstringYears).unwrap();
        let pivoted = pivot_long(&wide, &layout).unwrap();
        let frame = &pivoted.frame;

        let names: Vec<String> = frame
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            names,
            vec!["Country Code", "Indicator Code", YEAR_COLUMN, VALUE_COLUMN]
        );
        let codes = frame.column("Country Code").unwrap().str().unwrap();
        let years = frame.column(YEAR_COLUMN).unwrap().i32().unwrap();
        let values = frame.column(VALUE_COLUMN).unwrap().f64().unwrap();
        assert_eq!(codes.get(0), Some("ARG"));
        assert_eq!(codes.get(1), Some("BRA"));
        assert_eq!(years.get(0), Some(1990));
        assert_eq!(years.get(2), Some(1991));
        assert_eq!(values.get(3), Some(4.0));
        assert_eq!(pivoted.stats.output_rows, 4);
    }

    #[test]
    fn test_missing_and_non_numeric_cells_are_dropped() {
        let wide = table(
            &["Country Code", "Indicator Code", "1990", "1991"],
            &[&[Some("ARG"), Some("SP.POP"), None, Some("n/a")]],
        );
        let layout = classify_columns(&wide.headers, &SubstringYears).unwrap();
        let pivoted = pivot_long(&wide, &layout).unwrap();

        assert_eq!(pivoted.frame.height(), 0);
        assert_eq!(pivoted.stats.dropped_values, 2);
    }

    #[test]
    fn test_year_columns_without_year_are_dropped() {
        let wide = table(
            &["Country Code", "Indicator Code", "YR", "2000"],
            &[&[Some("ARG"), Some("SP.POP"), Some("5"), Some("6")]],
        );
        let layout = classify_columns(&wide.headers, &SubstringYears).unwrap();
        let pivoted = pivot_long(&wide, &layout).unwrap();

        assert_eq!(pivoted.stats.year_columns, 2);
        assert_eq!(pivoted.stats.valid_year_columns, 1);
        assert_eq!(pivoted.frame.height(), 1);
    }

    #[test]
    fn test_missing_identifiers_stay_null() {
        let wide = table(
            &["Country Name", "Country Code", "Indicator Code", "1990"],
            &[&[None, Some("ARG"), Some("SP.POP"), Some("1")]],
        );
        let layout = classify_columns(&wide.headers, &SubstringYears).unwrap();
        let pivoted = pivot_long(&wide, &layout).unwrap();

        let names = pivoted.frame.column("Country Name").unwrap().str().unwrap();
        assert_eq!(names.get(0), None);
    }
}
