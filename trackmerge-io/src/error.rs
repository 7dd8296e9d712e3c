//! I/O error types.

use thiserror::Error;

/// Result type for I/O operations.
pub type Result<T> = std::result::Result<T, Error>;

/// I/O error types.
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A file's content is not parseable as tabular text. Names the
    /// offending file; one bad file fails the whole batch.
    #[error("malformed file '{file}': {reason}")]
    Malformed {
        /// The file that failed to parse.
        file: String,
        /// What was wrong with it.
        reason: String,
    },

    /// Inconsistent read options (e.g. data start not past the header row).
    #[error("invalid read options: {0}")]
    InvalidOptions(String),

    /// CSV serialization error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Core library error.
    #[error("core error: {0}")]
    Core(#[from] trackmerge_core::Error),
}
