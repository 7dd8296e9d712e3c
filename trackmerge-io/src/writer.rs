//! CSV export of tables.
//!
//! This is the downloadable-artifact surface: UTF-8 CSV with a header row
//! matching the table's column names, Missing rendered as an empty field.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use trackmerge_core::Table;

use crate::Result;

/// Writes a table as CSV to any writer.
///
/// # Errors
/// Returns an error if the underlying writer fails.
pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(table.column_names())?;
    for row in 0..table.n_rows() {
        csv_writer.write_record(table.row(row).map(ToString::to_string))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes a table as a CSV file.
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn write_csv_path<P: AsRef<Path>>(table: &Table, path: P) -> Result<()> {
    let file = File::create(path)?;
    write_csv(table, BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use trackmerge_core::Value;

    fn sample() -> Table {
        let mut t = Table::with_columns(vec!["ID2".into(), "area".into()]);
        t.push_row(vec![Value::Text("m1_1".into()), Value::Float(2.5)]);
        t.push_row(vec![Value::Text("m1_1".into()), Value::Missing]);
        t
    }

    #[test]
    fn test_header_and_missing_fields() {
        let mut buffer = Vec::new();
        write_csv(&sample(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("ID2,area"));
        assert_eq!(lines.next(), Some("m1_1,2.5"));
        assert_eq!(lines.next(), Some("m1_1,"));
    }

    #[test]
    fn test_write_to_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        write_csv_path(&sample(), file.path()).unwrap();
        let content = std::fs::read_to_string(file.path()).unwrap();
        assert!(content.starts_with("ID2,area"));
    }
}
