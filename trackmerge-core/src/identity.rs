//! Per-sample identifier assignment.
//!
//! Each distinct source filename receives a dense rank (1..k) ordered by how
//! many rows it contributed, most rows first, ties broken by first
//! appearance in the master table. Upload order is the tie-break source of
//! truth. `ID2` combines the subject id with that rank; it is a convenience
//! grouping key and is not globally unique if two different mice happen to
//! share a rank value.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::merge::{FILENAME_COLUMN, MOUSE_COLUMN};
use crate::table::Table;
use crate::value::Value;

/// Name of the derived filename-rank column.
pub const RANKS_COLUMN: &str = "ranks";

/// Name of the derived sample-identifier column.
pub const ID2_COLUMN: &str = "ID2";

/// Adds the `ranks` and `ID2` derived columns to a master table.
///
/// All rows sharing a filename share a rank, and for a fixed mouse the same
/// `ID2` (`"{mouse}_{ranks}"`).
///
/// # Errors
/// Returns [`Error::MissingRequiredColumn`] if the `filename` or `mouse`
/// column is absent.
#[allow(clippy::cast_possible_wrap)]
pub fn assign_sample_ids(master: &mut Table) -> Result<()> {
    let filenames = master
        .column(FILENAME_COLUMN)
        .ok_or_else(|| Error::MissingRequiredColumn {
            column: FILENAME_COLUMN.to_string(),
        })?;
    let mice = master
        .column(MOUSE_COLUMN)
        .ok_or_else(|| Error::MissingRequiredColumn {
            column: MOUSE_COLUMN.to_string(),
        })?;

    // occurrence count and first-seen row per distinct filename
    let mut stats: BTreeMap<&Value, (usize, usize)> = BTreeMap::new();
    for (row, name) in filenames.iter().enumerate() {
        let entry = stats.entry(name).or_insert((0, row));
        entry.0 += 1;
    }

    let mut ordered: Vec<(&Value, usize, usize)> = stats
        .into_iter()
        .map(|(name, (count, first))| (name, count, first))
        .collect();
    ordered.sort_by_key(|&(_, count, first)| (Reverse(count), first));

    let ranks_by_name: BTreeMap<&Value, i64> = ordered
        .iter()
        .enumerate()
        .map(|(i, &(name, _, _))| (name, i as i64 + 1))
        .collect();

    let ranks: Vec<Value> = filenames
        .iter()
        .map(|name| Value::Int(ranks_by_name[name]))
        .collect();
    let id2: Vec<Value> = mice
        .iter()
        .zip(&ranks)
        .map(|(mouse, rank)| Value::Text(format!("{mouse}_{rank}")))
        .collect();

    master.set_column(RANKS_COLUMN, ranks);
    master.set_column(ID2_COLUMN, id2);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge::merge;
    use crate::table::RawTable;

    fn one_row_file(name: &str) -> RawTable {
        let mut t = Table::with_columns(vec!["v".into()]);
        t.push_row(vec![Value::Int(0)]);
        RawTable::new(name, t)
    }

    #[test]
    fn test_rank_by_frequency_then_first_seen() {
        let files = [
            one_row_file("a_1_x.csv"),
            one_row_file("a_1_x.csv"),
            one_row_file("b_2_y.csv"),
        ];
        let mut master = merge(&files).unwrap();
        assign_sample_ids(&mut master).unwrap();

        assert_eq!(
            master.column(RANKS_COLUMN),
            Some(&[Value::Int(1), Value::Int(1), Value::Int(2)][..])
        );
        assert_eq!(
            master.column(ID2_COLUMN),
            Some(
                &[
                    Value::Text("a_1".into()),
                    Value::Text("a_1".into()),
                    Value::Text("b_2".into()),
                ][..]
            )
        );
    }

    #[test]
    fn test_ties_follow_upload_order() {
        let files = [one_row_file("z_9.csv"), one_row_file("a_1.csv")];
        let mut master = merge(&files).unwrap();
        assign_sample_ids(&mut master).unwrap();
        // equal counts: the file uploaded first ranks first
        assert_eq!(
            master.column(RANKS_COLUMN),
            Some(&[Value::Int(1), Value::Int(2)][..])
        );
    }

    #[test]
    fn test_single_file_constant_id2() {
        let mut t = Table::with_columns(vec!["v".into()]);
        for i in 0..4 {
            t.push_row(vec![Value::Int(i)]);
        }
        let mut master = merge(&[RawTable::new("m7_p1.csv", t)]).unwrap();
        assign_sample_ids(&mut master).unwrap();
        let id2 = master.column(ID2_COLUMN).unwrap();
        assert!(id2.iter().all(|v| *v == Value::Text("m7_1".into())));
    }

    #[test]
    fn test_missing_filename_column() {
        let mut t = Table::with_columns(vec!["v".into()]);
        t.push_row(vec![Value::Int(1)]);
        let err = assign_sample_ids(&mut t).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingRequiredColumn { column } if column == FILENAME_COLUMN
        ));
    }
}
