//! Error kinds raised by the data layer.

use std::path::PathBuf;

use thiserror::Error;

/// Failures of the query and filter operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The caller passed a malformed argument (bad date, reversed range).
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// The operation has no defined result on zero missions.
    #[error("operation is undefined on an empty dataset")]
    EmptyDataset,
}

impl QueryError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        QueryError::InvalidArgument {
            message: message.into(),
        }
    }
}

/// Failures while reading a dataset file into a `MissionTable`.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("dataset unavailable at {}: {source}", .path.display())]
    DatasetUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `row` is 1-based over data rows; `None` for header-level problems.
    #[error("schema violation{}: {message}", .row.map(|r| format!(" at row {r}")).unwrap_or_default())]
    SchemaViolation { row: Option<usize>, message: String },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl LoadError {
    pub(crate) fn schema(row: Option<usize>, message: impl Into<String>) -> Self {
        LoadError::SchemaViolation {
            row,
            message: message.into(),
        }
    }
}
