//! Merging per-file tables into one master table.
//!
//! Each raw table gets its column names normalized, its filename and
//! filename-derived metadata broadcast onto every row, and is then
//! concatenated with the others: file order first, within-file row order
//! second. Columns present in some files and absent in others are filled
//! with Missing for the rows that lack them.

use crate::error::{Error, Result};
use crate::metadata::FilenameMetadata;
use crate::normalize::normalize_columns;
use crate::table::{RawTable, Table};
use crate::value::Value;

/// Name of the broadcast source-filename column.
pub const FILENAME_COLUMN: &str = "filename";

/// Name of the broadcast subject-id column.
pub const MOUSE_COLUMN: &str = "mouse";

/// Name of the broadcast position column.
pub const POSITION_COLUMN: &str = "position";

/// Name of the broadcast class column.
pub const CLASS_COLUMN: &str = "class";

/// Name of the broadcast secondary-condition column.
pub const CONDITION2_COLUMN: &str = "condition2";

/// Merges raw tables into a single master table.
///
/// The master's row count is the sum of the inputs' row counts; its column
/// set is the union of the per-file column sets in first-seen order, with
/// Missing filled in where a file lacks a column.
///
/// # Errors
/// Returns [`Error::EmptyInput`] if `raw_tables` is empty. Column
/// heterogeneity is never an error.
pub fn merge(raw_tables: &[RawTable]) -> Result<Table> {
    if raw_tables.is_empty() {
        return Err(Error::EmptyInput("no raw tables to merge"));
    }

    let prepared: Vec<Table> = raw_tables.iter().map(prepare).collect();

    // column union, first-seen order
    let mut names: Vec<String> = Vec::new();
    for table in &prepared {
        for name in table.column_names() {
            if !names.iter().any(|n| n == name) {
                names.push(name.clone());
            }
        }
    }

    let mut master = Table::with_columns(names);
    for table in &prepared {
        let indices: Vec<Option<usize>> = master
            .column_names()
            .iter()
            .map(|n| table.column_index(n))
            .collect();
        for row in 0..table.n_rows() {
            let cells = indices
                .iter()
                .map(|idx| idx.map_or(Value::Missing, |i| table.cell(row, i).clone()))
                .collect();
            master.push_row(cells);
        }
    }
    Ok(master)
}

/// Normalizes one raw table and broadcasts its filename metadata.
fn prepare(raw: &RawTable) -> Table {
    let mut table = raw.table.clone();
    normalize_columns(&mut table);

    let meta = FilenameMetadata::parse(&raw.source_filename);
    let n = table.n_rows();
    let broadcast = |v: Value| vec![v; n];

    table.set_column(
        FILENAME_COLUMN,
        broadcast(Value::Text(raw.source_filename.clone())),
    );
    table.set_column(MOUSE_COLUMN, broadcast(Value::Text(meta.mouse)));
    table.set_column(POSITION_COLUMN, broadcast(Value::from_opt_text(meta.position)));
    table.set_column(CLASS_COLUMN, broadcast(Value::from_opt_text(meta.class)));
    table.set_column(
        CONDITION2_COLUMN,
        broadcast(Value::from_opt_text(meta.condition2)),
    );
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, cols: &[&str], rows: &[&[Value]]) -> RawTable {
        let mut t = Table::with_columns(cols.iter().map(ToString::to_string).collect());
        for row in rows {
            t.push_row(row.to_vec());
        }
        RawTable::new(name, t)
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(merge(&[]), Err(Error::EmptyInput(_))));
    }

    #[test]
    fn test_metadata_broadcast() {
        let r = raw(
            "m1_p2_ctrl_d3.csv",
            &["v"],
            &[&[Value::Int(1)], &[Value::Int(2)]],
        );
        let master = merge(&[r]).unwrap();
        assert_eq!(master.n_rows(), 2);
        assert_eq!(
            master.column(MOUSE_COLUMN),
            Some(&[Value::Text("m1".into()), Value::Text("m1".into())][..])
        );
        assert_eq!(
            master.column(CONDITION2_COLUMN).unwrap()[0],
            Value::Text("d3".into())
        );
    }

    #[test]
    fn test_short_filename_broadcasts_missing() {
        let r = raw("m1.csv", &["v"], &[&[Value::Int(1)]]);
        let master = merge(&[r]).unwrap();
        assert_eq!(master.column(POSITION_COLUMN).unwrap()[0], Value::Missing);
        assert_eq!(master.column(CLASS_COLUMN).unwrap()[0], Value::Missing);
    }

    #[test]
    fn test_column_union_fills_missing() {
        let a = raw("a_1.csv", &["x"], &[&[Value::Int(1)]]);
        let b = raw("b_2.csv", &["x", "y"], &[&[Value::Int(2), Value::Float(0.5)]]);
        let master = merge(&[a, b]).unwrap();
        assert_eq!(master.n_rows(), 2);
        let y = master.column("y").unwrap();
        assert_eq!(y[0], Value::Missing);
        assert_eq!(y[1], Value::Float(0.5));
    }

    #[test]
    fn test_row_and_file_order_preserved() {
        let a = raw("a.csv", &["v"], &[&[Value::Int(1)], &[Value::Int(2)]]);
        let b = raw("b.csv", &["v"], &[&[Value::Int(3)]]);
        let master = merge(&[a, b]).unwrap();
        assert_eq!(
            master.column("v"),
            Some(&[Value::Int(1), Value::Int(2), Value::Int(3)][..])
        );
    }

    #[test]
    fn test_aliases_unify_across_files() {
        let a = raw("a.csv", &["TID"], &[&[Value::Int(5)]]);
        let b = raw("b.csv", &["TRACK_ID"], &[&[Value::Int(6)]]);
        let master = merge(&[a, b]).unwrap();
        assert_eq!(
            master.column("TRACK_ID"),
            Some(&[Value::Int(5), Value::Int(6)][..])
        );
    }
}
