//! Splitting the long table into sheet-sized partitions.

use indexmap::IndexMap;
use polars::prelude::{DataFrame, DataType};

use crate::error::Result;
use crate::naming::{indicator_part_name, indicator_sheet_name, row_part_name, sanitize_sheet_name};

/// Rows addressable on one spreadsheet sheet.
pub const EXCEL_MAX_ROWS: usize = 1_048_576;
/// Data rows per sheet, one row being reserved for the header.
pub const ROW_CEILING: usize = EXCEL_MAX_ROWS - 1;

const INDICATOR_SPELLINGS: &[&str] = &["indicator code", "indicator_code", "indicatorcode"];

/// One sheet to write: its name and the long-table rows it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetPlan {
    pub name: String,
    /// Indicator code the rows belong to, when partitioning by indicator.
    pub indicator: Option<String>,
    /// 1-based part number when the rows were split by the ceiling.
    pub part: Option<usize>,
    /// Row indices into the long table, in table order.
    pub rows: Vec<usize>,
}

/// All sheets planned for a long table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SheetLayout {
    pub sheets: Vec<SheetPlan>,
    /// Name of the column used for grouping, if any.
    pub indicator_column: Option<String>,
    /// Distinct indicator codes found in the grouping column.
    pub indicator_count: usize,
    /// Rows with a missing indicator code, which no sheet receives.
    pub unassigned_rows: usize,
}

/// Returns true if `name` looks like an indicator-code column.
pub fn is_indicator_column(name: &str) -> bool {
    name.contains("Indicator Code") || INDICATOR_SPELLINGS.contains(&name.to_lowercase().as_str())
}

/// Name of the first indicator-code column of `frame`.
pub fn find_indicator_column(frame: &DataFrame) -> Option<String> {
    frame
        .get_column_names()
        .into_iter()
        .find(|name| is_indicator_column(name.as_str()))
        .map(|name| name.to_string())
}

/// Groups row indices by key, in order of first appearance.
///
/// Rows with a missing key are counted but belong to no group.
pub fn group_rows<'a, I>(keys: I) -> (IndexMap<&'a str, Vec<usize>>, usize)
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut groups: IndexMap<&'a str, Vec<usize>> = IndexMap::new();
    let mut missing = 0usize;
    for (idx, key) in keys.into_iter().enumerate() {
        match key {
            Some(key) => groups.entry(key).or_default().push(idx),
            None => missing += 1,
        }
    }
    (groups, missing)
}

/// Splits `rows` into consecutive chunks of at most `ceiling` rows.
pub fn chunk_rows(rows: &[usize], ceiling: usize) -> Vec<Vec<usize>> {
    rows.chunks(ceiling.max(1)).map(<[usize]>::to_vec).collect()
}

/// Plans the data sheets for `frame`.
///
/// With an indicator-code column, each distinct code gets its own sheet (or
/// `_p{n}` parts once it exceeds `row_ceiling`), in order of first
/// appearance. Without one, rows are chunked by position into `Part{n}`
/// sheets. `row_ceiling` is clamped to `1..=ROW_CEILING`.
pub fn plan_sheets(frame: &DataFrame, row_ceiling: usize) -> Result<SheetLayout> {
    let ceiling = row_ceiling.clamp(1, ROW_CEILING);
    let mut layout = SheetLayout::default();

    let Some(indicator_column) = find_indicator_column(frame) else {
        let all_rows: Vec<usize> = (0..frame.height()).collect();
        for (idx, rows) in chunk_rows(&all_rows, ceiling).into_iter().enumerate() {
            let part = idx + 1;
            layout.sheets.push(SheetPlan {
                name: sanitize_sheet_name(&row_part_name(part), layout.sheets.len() + 1),
                indicator: None,
                part: Some(part),
                rows,
            });
        }
        return Ok(layout);
    };

    let codes = frame.column(&indicator_column)?.cast(&DataType::String)?;
    let codes = codes.str()?;
    let (groups, unassigned) = group_rows(codes.iter());
    layout.unassigned_rows = unassigned;
    layout.indicator_count = groups.len();

    for (code, rows) in groups {
        if rows.len() <= ceiling {
            layout.sheets.push(SheetPlan {
                name: sanitize_sheet_name(&indicator_sheet_name(code), layout.sheets.len() + 1),
                indicator: Some(code.to_string()),
                part: None,
                rows,
            });
            continue;
        }
        for (idx, chunk) in chunk_rows(&rows, ceiling).into_iter().enumerate() {
            let part = idx + 1;
            layout.sheets.push(SheetPlan {
                name: sanitize_sheet_name(
                    &indicator_part_name(code, part),
                    layout.sheets.len() + 1,
                ),
                indicator: Some(code.to_string()),
                part: Some(part),
                rows: chunk,
            });
        }
    }
    layout.indicator_column = Some(indicator_column);
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{Column, NamedFrom};

    #[test]
    fn test_indicator_column_spellings() {
        assert!(is_indicator_column("Indicator Code"));
        assert!(is_indicator_column("WDI Indicator Code"));
        assert!(is_indicator_column("indicator_code"));
        assert!(is_indicator_column("IndicatorCode"));
        assert!(!is_indicator_column("Indicator Name"));
        assert!(!is_indicator_column("indicator"));
    }

    #[test]
    fn test_group_rows_keeps_first_appearance_order() {
        let keys = vec![Some("B"), Some("A"), None, Some("B")];
        let (groups, missing) = group_rows(keys);
        let order: Vec<&str> = groups.keys().copied().collect();
        assert_eq!(order, vec!["B", "A"]);
        assert_eq!(groups["B"], vec![0, 3]);
        assert_eq!(missing, 1);
    }

    #[test]
    fn test_plan_by_indicator() {
        let frame = DataFrame::new(vec![
            Column::new("Indicator Code".into(), vec!["NY.GDP", "SP.POP", "NY.GDP"]),
            Column::new("Value".into(), vec![1.0, 2.0, 3.0]),
        ])
        .unwrap();

        let layout = plan_sheets(&frame, ROW_CEILING).unwrap();

        let names: Vec<&str> = layout.sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["NY.GDP", "SP.POP"]);
        assert_eq!(layout.sheets[0].rows, vec![0, 2]);
        assert_eq!(layout.indicator_count, 2);
        assert_eq!(layout.indicator_column.as_deref(), Some("Indicator Code"));
    }

    #[test]
    fn test_plan_splits_large_indicator() {
        let frame = DataFrame::new(vec![Column::new(
            "Indicator Code".into(),
            vec!["SP.POP"; 5],
        )])
        .unwrap();

        let layout = plan_sheets(&frame, 2).unwrap();

        let names: Vec<&str> = layout.sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["SP.POP_p1", "SP.POP_p2", "SP.POP_p3"]);
        let sizes: Vec<usize> = layout.sheets.iter().map(|s| s.rows.len()).collect();
        assert_eq!(sizes, vec![2, 2, 1]);
    }

    #[test]
    fn test_plan_by_position_without_indicator() {
        let frame = DataFrame::new(vec![Column::new("Value".into(), vec![1.0; 5])]).unwrap();

        let layout = plan_sheets(&frame, 3).unwrap();

        let names: Vec<&str> = layout.sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Part1", "Part2"]);
        assert_eq!(layout.sheets[1].rows, vec![3, 4]);
        assert!(layout.indicator_column.is_none());
    }

    #[test]
    fn test_missing_codes_are_unassigned() {
        let frame = DataFrame::new(vec![Column::new(
            "Indicator Code".into(),
            vec![Some("SP.POP"), None],
        )])
        .unwrap();

        let layout = plan_sheets(&frame, ROW_CEILING).unwrap();

        assert_eq!(layout.sheets.len(), 1);
        assert_eq!(layout.unassigned_rows, 1);
    }
}
