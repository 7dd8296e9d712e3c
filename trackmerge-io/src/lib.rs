//! trackmerge-io: CSV reading and export for trackmerge.
//!
//! Raw measurement files come in as delimited tabular text with a header
//! row (and optionally a preamble); the master table goes back out as a
//! UTF-8 CSV artifact.
//!

mod error;
mod reader;
mod writer;

pub use error::{Error, Result};
pub use reader::{read_path, read_paths, read_raw_table, ReadOptions};
pub use writer::{write_csv, write_csv_path};
