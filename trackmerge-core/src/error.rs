//! Error types for trackmerge-core.

use thiserror::Error;

/// Result type alias for trackmerge operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for trackmerge operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Nothing to work on (no raw tables).
    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    /// A column selection that does not resolve: names that do not exist in
    /// the table, or an empty selection (`columns` is empty then).
    #[error("unknown column(s): {}", describe_columns(.columns))]
    UnknownColumn {
        /// The requested names that were not found, in request order.
        columns: Vec<String>,
    },

    /// A structurally required column (track/frame identifier, filename) is absent.
    #[error("missing required column: {column}")]
    MissingRequiredColumn {
        /// The absent column name.
        column: String,
    },
}

fn describe_columns(columns: &[String]) -> String {
    if columns.is_empty() {
        "none selected".to_string()
    } else {
        columns.join(", ")
    }
}
