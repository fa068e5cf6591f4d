//! Parsing decoded CSV text into a [`CsvTable`].

use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{IngestError, Result};
use crate::missing::MissingValues;
use crate::table::CsvTable;

use super::header::normalize_headers;

/// Parses comma-separated `text` whose first record is the header.
///
/// Short rows are padded with missing cells. Rows with more fields than the
/// header are rejected. Fully blank lines are skipped. `path` is only used in
/// error messages.
pub fn parse_csv_text(text: &str, missing: &MissingValues, path: &Path) -> Result<CsvTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut records = reader.records();

    let header_record = match records.next() {
        Some(record) => record.map_err(|e| csv_error(path, &e))?,
        None => {
            return Err(IngestError::EmptyCsv {
                path: path.to_path_buf(),
            });
        }
    };
    let raw_headers: Vec<&str> = header_record.iter().collect();
    if raw_headers.iter().all(|value| value.trim().is_empty()) {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    let headers = normalize_headers(raw_headers.as_slice());
    let width = headers.len();

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(|e| csv_error(path, &e))?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        if record.len() > width {
            return Err(IngestError::RowTooLong {
                path: path.to_path_buf(),
                line: record.position().map_or(0, csv::Position::line),
                expected: width,
                found: record.len(),
            });
        }
        let mut row: Vec<Option<String>> = record.iter().map(|value| missing.cell(value)).collect();
        row.resize(width, None);
        rows.push(row);
    }

    Ok(CsvTable::new(headers, rows))
}

fn csv_error(path: &Path, error: &csv::Error) -> IngestError {
    IngestError::CsvParse {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<CsvTable> {
        parse_csv_text(text, &MissingValues::default(), Path::new("test.csv"))
    }

    #[test]
    fn test_parse_simple_table() {
        let table = parse("Country Code,1990,1991\nARG,1.5,..\nBRA,,2\n").unwrap();
        assert_eq!(table.headers, vec!["Country Code", "1990", "1991"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell(0, 1), Some("1.5"));
        assert_eq!(table.cell(0, 2), None);
        assert_eq!(table.cell(1, 1), None);
        assert_eq!(table.cell(1, 2), Some("2"));
    }

    #[test]
    fn test_quoted_fields_keep_commas() {
        let table = parse("Country Name,Country Code\n\"Korea, Rep.\",KOR\n").unwrap();
        assert_eq!(table.cell(0, 0), Some("Korea, Rep."));
    }

    #[test]
    fn test_short_rows_are_padded() {
        let table = parse("A,B,C\n1\n").unwrap();
        assert_eq!(table.rows[0], vec![Some("1".to_string()), None, None]);
    }

    #[test]
    fn test_long_rows_are_rejected() {
        let result = parse("A,B\n1,2,3\n");
        assert!(matches!(
            result,
            Err(IngestError::RowTooLong {
                expected: 2,
                found: 3,
                ..
            })
        ));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let table = parse("A,B\n1,2\n,\n3,4\n").unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_empty_text_is_an_error() {
        assert!(matches!(parse(""), Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_trailing_comma_column_is_unnamed() {
        let table = parse("Country Code,1990,\nARG,1,\n").unwrap();
        assert_eq!(table.headers, vec!["Country Code", "1990", "Unnamed: 2"]);
        assert_eq!(table.cell(0, 2), None);
    }
}
