//! Indicator code to display-name mapping.

use gid_ingest::CsvTable;
use indexmap::IndexSet;
use polars::prelude::{Column, DataFrame};

use crate::classify::ColumnLayout;
use crate::error::Result;

/// Distinct (indicator code, indicator name) pairs from the wide table.
///
/// Pairs keep the order of their first appearance. Returns `None` when the
/// layout has no indicator-name column.
pub fn indicator_info(table: &CsvTable, layout: &ColumnLayout) -> Result<Option<DataFrame>> {
    let Some(name_idx) = layout.indicator_name else {
        return Ok(None);
    };
    let code_idx = layout.indicator_code;

    let pairs: IndexSet<(Option<&str>, Option<&str>)> = table
        .rows
        .iter()
        .map(|row| {
            (
                row.get(code_idx).and_then(|cell| cell.as_deref()),
                row.get(name_idx).and_then(|cell| cell.as_deref()),
            )
        })
        .collect();
    let (codes, names): (Vec<Option<&str>>, Vec<Option<&str>>) = pairs.into_iter().unzip();

    let frame = DataFrame::new(vec![
        Column::new(table.headers[code_idx].trim().into(), codes),
        Column::new(table.headers[name_idx].trim().into(), names),
    ])?;
    Ok(Some(frame))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::{SubstringYears, classify_columns};

    fn row(cells: &[Option<&str>]) -> Vec<Option<String>> {
        cells.iter().map(|cell| cell.map(str::to_string)).collect()
    }

    #[test]
    fn test_distinct_pairs_in_first_appearance_order() {
        let table = CsvTable::new(
            vec![
                "Country Code".to_string(),
                "Indicator Name".to_string(),
                "Indicator Code".to_string(),
                "1990".to_string(),
            ],
            vec![
                row(&[Some("ARG"), Some("Population"), Some("SP.POP"), Some("1")]),
                row(&[Some("ARG"), Some("GDP"), Some("NY.GDP"), Some("2")]),
                row(&[Some("BRA"), Some("Population"), Some("SP.POP"), Some("3")]),
            ],
        );
        let layout = classify_columns(&table.headers, &SubstringYears).unwrap();

        let info = indicator_info(&table, &layout).unwrap().unwrap();

        assert_eq!(info.height(), 2);
        let codes = info.column("Indicator Code").unwrap().str().unwrap();
        let names = info.column("Indicator Name").unwrap().str().unwrap();
        assert_eq!(codes.get(0), Some("SP.POP"));
        assert_eq!(names.get(1), Some("GDP"));
    }

    #[test]
    fn test_absent_without_name_column() {
        let table = CsvTable::new(
            vec!["Country Code".to_string(), "Indicator Code".to_string()],
            vec![row(&[Some("ARG"), Some("SP.POP")])],
        );
        let layout = classify_columns(&table.headers, &SubstringYears).unwrap();

        assert!(indicator_info(&table, &layout).unwrap().is_none());
    }
}
