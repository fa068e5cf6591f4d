//! Error types for the reshape stage.

use thiserror::Error;

/// Errors raised while reshaping a wide table.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Required key columns could not be located in the wide table.
    #[error("required columns not found: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },

    /// The auxiliary classification table could not be merged.
    #[error("classification merge failed: {reason}")]
    Merge { reason: String },

    /// A DataFrame operation failed.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for TransformError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for reshape operations.
pub type Result<T> = std::result::Result<T, TransformError>;
