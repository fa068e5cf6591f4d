//! Error types for CSV ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a delimited file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file does not exist.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Input exists but could not be read.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Encoding Errors ===
    /// A configured encoding label is not known.
    #[error("unknown encoding label '{label}'")]
    UnknownEncoding { label: String },

    /// No configured encoding could decode the file.
    #[error("{path} could not be decoded with any of: {tried}")]
    EncodingExhausted { path: PathBuf, tried: String },

    // === CSV Parsing Errors ===
    /// The CSV reader rejected the content.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// File has no header row.
    #[error("CSV file is empty: {path}")]
    EmptyCsv { path: PathBuf },

    /// A data row has more fields than the header.
    #[error("{path}: line {line} has {found} fields, expected at most {expected}")]
    RowTooLong {
        path: PathBuf,
        line: u64,
        expected: usize,
        found: usize,
    },
}

impl IngestError {
    /// Returns true for failures caused by the file's location rather than its content.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound { .. })
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/data/data_main.csv"),
        };
        assert_eq!(err.to_string(), "file not found: /data/data_main.csv");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_row_too_long_display() {
        let err = IngestError::RowTooLong {
            path: PathBuf::from("main.csv"),
            line: 3,
            expected: 4,
            found: 5,
        };
        assert_eq!(
            err.to_string(),
            "main.csv: line 3 has 5 fields, expected at most 4"
        );
        assert!(!err.is_not_found());
    }
}
