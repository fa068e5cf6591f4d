//! In-memory representation of a parsed delimited file.

/// A parsed CSV file: unique header names plus rows of optional cells.
///
/// Every row has exactly `headers.len()` cells; `None` marks a missing value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl CsvTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { headers, rows }
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Index of the first column whose name equals `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header == name)
    }

    /// Index of the first column whose name contains `needle`.
    pub fn find_column_containing(&self, needle: &str) -> Option<usize> {
        self.headers.iter().position(|header| header.contains(needle))
    }

    /// Cell at (`row`, `column`), `None` when missing or out of range.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .and_then(|cell| cell.as_deref())
    }

    /// Iterates over one column's cells in row order.
    pub fn column_values(&self, column: usize) -> impl Iterator<Item = Option<&str>> + '_ {
        self.rows
            .iter()
            .map(move |cells| cells.get(column).and_then(|cell| cell.as_deref()))
    }
}
