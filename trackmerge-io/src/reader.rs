//! CSV readers for raw measurement tables.
//!
//! Files are read fully and the handle released; cells are typed at load
//! time via [`Value::parse`]. Tables with preamble rows are handled through
//! [`ReadOptions`]. Column-name normalization happens later, at merge time.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use trackmerge_core::{RawTable, Table, Value};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Row-layout options for tables with non-standard preambles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReadOptions {
    /// 0-based index of the header row; rows before it are skipped.
    pub header_row: usize,
    /// 0-based index of the first data row. Defaults to the row after the
    /// header; must be strictly greater than `header_row`.
    pub data_start_row: Option<usize>,
}

impl ReadOptions {
    /// Checks that the data start lies strictly past the header row.
    ///
    /// # Errors
    /// Returns [`Error::InvalidOptions`] otherwise.
    pub fn validate(&self) -> Result<()> {
        if let Some(start) = self.data_start_row {
            if start <= self.header_row {
                return Err(Error::InvalidOptions(format!(
                    "data start row {start} must be greater than header row {}",
                    self.header_row
                )));
            }
        }
        Ok(())
    }

    fn data_start(&self) -> usize {
        self.data_start_row.unwrap_or(self.header_row + 1)
    }
}

/// Reads one delimited table from a byte stream.
///
/// Records shorter than the header are padded with Missing; a record longer
/// than the header is malformed. Blank lines are skipped.
///
/// # Errors
/// [`Error::InvalidOptions`] for inconsistent options, [`Error::Malformed`]
/// (naming `source_filename`) when the stream is not parseable as tabular
/// text or the header row is absent.
pub fn read_raw_table<R: Read>(
    source_filename: &str,
    reader: R,
    options: &ReadOptions,
) -> Result<RawTable> {
    options.validate()?;

    let malformed = |reason: String| Error::Malformed {
        file: source_filename.to_string(),
        reason,
    };

    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);
    let mut records = Vec::new();
    for record in csv_reader.records() {
        records.push(record.map_err(|e| malformed(e.to_string()))?);
    }

    let Some(header) = records.get(options.header_row) else {
        return Err(malformed(format!(
            "no header row at index {}",
            options.header_row
        )));
    };
    let names: Vec<String> = header.iter().map(ToString::to_string).collect();
    if names.iter().all(String::is_empty) {
        return Err(malformed("empty header row".to_string()));
    }

    let mut table = Table::with_columns(names);
    let n_columns = table.n_columns();
    for (offset, record) in records.iter().enumerate().skip(options.data_start()) {
        if record.len() > n_columns {
            return Err(malformed(format!(
                "row {offset} has {} fields, header has {n_columns}",
                record.len()
            )));
        }
        let mut row: Vec<Value> = record.iter().map(Value::parse).collect();
        row.resize(n_columns, Value::Missing);
        table.push_row(row);
    }
    Ok(RawTable::new(source_filename, table))
}

/// Reads one CSV file from disk, deriving the source filename from the path.
///
/// # Errors
/// As [`read_raw_table`], plus [`Error::Io`] if the file cannot be opened.
pub fn read_path<P: AsRef<Path>>(path: P, options: &ReadOptions) -> Result<RawTable> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    let file = File::open(path)?;
    read_raw_table(&name, file, options)
}

/// Reads a batch of CSV files in upload order.
///
/// # Errors
/// Fails fast on the first unreadable or malformed file; no partial batch
/// is returned.
pub fn read_paths<P: AsRef<Path>>(paths: &[P], options: &ReadOptions) -> Result<Vec<RawTable>> {
    paths.iter().map(|p| read_path(p, options)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn read(name: &str, text: &str, options: &ReadOptions) -> Result<RawTable> {
        read_raw_table(name, Cursor::new(text.to_string()), options)
    }

    #[test]
    fn test_basic_read_types_cells() {
        let raw = read(
            "m1_p1.csv",
            "TRACK_ID,area,label\n1,2.5,alpha\n2,,beta\n",
            &ReadOptions::default(),
        )
        .unwrap();
        assert_eq!(raw.source_filename, "m1_p1.csv");
        assert_eq!(raw.table.n_rows(), 2);
        assert_eq!(raw.table.column("TRACK_ID").unwrap()[0], Value::Int(1));
        assert_eq!(raw.table.column("area").unwrap()[0], Value::Float(2.5));
        assert_eq!(raw.table.column("area").unwrap()[1], Value::Missing);
        assert_eq!(
            raw.table.column("label").unwrap()[1],
            Value::Text("beta".into())
        );
    }

    #[test]
    fn test_preamble_skipped() {
        let text = "exported by tracker v2\n,,\nTRACK_ID,area\nunits,um2\n1,3.5\n";
        let options = ReadOptions {
            header_row: 2,
            data_start_row: Some(4),
        };
        let raw = read("m1.csv", text, &options).unwrap();
        assert_eq!(raw.table.n_rows(), 1);
        assert_eq!(raw.table.column("area").unwrap()[0], Value::Float(3.5));
    }

    #[test]
    fn test_invalid_options_rejected() {
        let options = ReadOptions {
            header_row: 3,
            data_start_row: Some(3),
        };
        assert!(matches!(
            read("f.csv", "a\n1\n", &options),
            Err(Error::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_short_rows_padded() {
        let raw = read("f.csv", "a,b,c\n1,2\n", &ReadOptions::default()).unwrap();
        assert_eq!(raw.table.column("c").unwrap()[0], Value::Missing);
    }

    #[test]
    fn test_long_row_is_malformed() {
        let err = read("bad.csv", "a,b\n1,2,3\n", &ReadOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Malformed { file, .. } if file == "bad.csv"));
    }

    #[test]
    fn test_empty_stream_is_malformed() {
        let err = read("empty.csv", "", &ReadOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Malformed { file, .. } if file == "empty.csv"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_read_options_serde_round_trip() {
        let options = ReadOptions {
            header_row: 2,
            data_start_row: Some(4),
        };
        let json = serde_json::to_string(&options).unwrap();
        let back: ReadOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);
    }

    #[test]
    fn test_quoted_fields() {
        let raw = read(
            "f.csv",
            "name,v\n\"x, with comma\",7\n",
            &ReadOptions::default(),
        )
        .unwrap();
        assert_eq!(
            raw.table.column("name").unwrap()[0],
            Value::Text("x, with comma".into())
        );
    }
}
