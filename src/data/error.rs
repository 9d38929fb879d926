use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// DatasetError – every failure surfaced by the data layer
// ---------------------------------------------------------------------------

/// Errors raised while resolving, loading, or transforming a questionnaire
/// dataset. None of them poison the loaded table: a failed operation leaves
/// the data exactly as it was.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The argument cannot represent a file-system path.
    #[error("invalid path argument: {0}")]
    InvalidArgument(String),

    /// The resolved path is not an existing regular file.
    #[error("file does not exist: {}", .0.display())]
    NotFound(PathBuf),

    /// Reading or parsing the backing file failed.
    #[error("failed to load {}: {message}", .path.display())]
    Load { path: PathBuf, message: String },

    /// A required column appears in none of the records.
    #[error("missing column '{0}'")]
    MissingColumn(String),

    /// A cell holds a value of the wrong kind for its column.
    #[error("row {row}, column '{column}': {message}")]
    InvalidValue {
        row: usize,
        column: String,
        message: String,
    },

    /// A subject's truncated mean does not fit an unsigned 8-bit score.
    #[error("row {row}: mean grade {mean} is outside the score range 0..=255")]
    ScoreOutOfRange { row: usize, mean: f64 },
}

pub type DatasetResult<T> = Result<T, DatasetError>;
