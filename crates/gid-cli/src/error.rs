//! Process-level errors and exit codes.

use gid_ingest::IngestError;
use gid_output::ExportError;
use gid_transform::TransformError;
use thiserror::Error;

pub const EXIT_SUCCESS: i32 = 0;
/// Bad command line or configuration.
pub const EXIT_CONFIG: i32 = 1;
/// Main input missing, undecodable or unparsable.
pub const EXIT_INPUT: i32 = 2;
/// Required key columns not found in the main input.
pub const EXIT_MISSING_COLUMNS: i32 = 3;
/// Workbook could not be written.
pub const EXIT_WRITE: i32 = 4;
/// Workbook is open in another process.
pub const EXIT_LOCKED: i32 = 5;

/// A failure that aborted the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration error: {0:#}")]
    Config(anyhow::Error),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl PipelineError {
    /// Exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Ingest(IngestError::UnknownEncoding { .. }) => EXIT_CONFIG,
            Self::Ingest(_) => EXIT_INPUT,
            Self::Transform(TransformError::MissingColumns { .. }) => EXIT_MISSING_COLUMNS,
            Self::Transform(_) => EXIT_INPUT,
            Self::Export(error) if error.is_locked() => EXIT_LOCKED,
            Self::Export(_) => EXIT_WRITE,
        }
    }
}

impl From<anyhow::Error> for PipelineError {
    fn from(error: anyhow::Error) -> Self {
        Self::Config(error)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let not_found: PipelineError = IngestError::FileNotFound {
            path: PathBuf::from("data_main.csv"),
        }
        .into();
        let missing: PipelineError = TransformError::MissingColumns {
            missing: vec!["Country Code".to_string()],
        }
        .into();
        let locked: PipelineError = ExportError::OutputLocked {
            path: PathBuf::from("out.xlsx"),
            source: None,
        }
        .into();
        let write: PipelineError = ExportError::DuplicateSheetName {
            name: "A".to_string(),
        }
        .into();
        let config = PipelineError::Config(anyhow::anyhow!("bad toml"));

        assert_eq!(not_found.exit_code(), EXIT_INPUT);
        assert_eq!(missing.exit_code(), EXIT_MISSING_COLUMNS);
        assert_eq!(locked.exit_code(), EXIT_LOCKED);
        assert_eq!(write.exit_code(), EXIT_WRITE);
        assert_eq!(config.exit_code(), EXIT_CONFIG);
    }
}
