//! Error types for workbook export.

use std::path::PathBuf;

use rust_xlsxwriter::XlsxError;
use thiserror::Error;

/// Errors raised while exporting the long table.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The output file is held by another process (or not writable by us).
    #[error("output file is locked or in use: {path}")]
    OutputLocked {
        path: PathBuf,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Any other I/O failure on the output file.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The spreadsheet engine rejected the workbook.
    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] XlsxError),

    /// Two sheets would end up with the same (case-insensitive) name.
    #[error("duplicate sheet name: '{name}'")]
    DuplicateSheetName { name: String },

    /// A DataFrame operation failed.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl ExportError {
    /// Returns true for the locked/in-use condition.
    pub fn is_locked(&self) -> bool {
        matches!(self, Self::OutputLocked { .. })
    }
}

impl From<polars::prelude::PolarsError> for ExportError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locked_is_distinct() {
        let locked = ExportError::OutputLocked {
            path: PathBuf::from("out.xlsx"),
            source: None,
        };
        let duplicate = ExportError::DuplicateSheetName {
            name: "SP.POP".to_string(),
        };
        assert!(locked.is_locked());
        assert!(!duplicate.is_locked());
        assert_eq!(locked.to_string(), "output file is locked or in use: out.xlsx");
    }
}
