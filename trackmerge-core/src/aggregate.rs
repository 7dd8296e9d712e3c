//! Group-wise aggregation.
//!
//! Rows are partitioned by the tuple of values across the selected grouping
//! columns; each partition reports its row count and the mean of every
//! remaining numeric column. Missing cells are excluded from a mean's
//! denominator. Groups are emitted in sorted key order so repeated runs
//! produce identical output.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::table::Table;
use crate::value::Value;

/// Name of the per-group row-count column in the summary table.
pub const COUNT_COLUMN: &str = "count";

/// Outcome of an aggregation request.
#[derive(Debug, Clone, PartialEq)]
pub enum Aggregation {
    /// No numeric columns remain once the grouping set is excluded. A valid
    /// outcome, not a failure; callers decide how to surface it.
    NoAggregableColumns,
    /// The per-group summary: grouping columns, `count`, then one mean
    /// column per retained numeric column (keeping its source name).
    Summary(Table),
}

struct GroupAcc {
    count: usize,
    sums: Vec<f64>,
    present: Vec<usize>,
}

/// Aggregates a master table by the given grouping columns.
///
/// A column is aggregable when it is outside the grouping set, has at least
/// one non-missing value, and every non-missing value is numeric. Missing is
/// a legitimate grouping-key value and forms its own group.
///
/// # Errors
/// Returns [`Error::UnknownColumn`]: with an empty name list when
/// `group_columns` is empty, otherwise naming every requested column that
/// does not exist. Unknown columns are never silently dropped.
pub fn aggregate(master: &Table, group_columns: &[String]) -> Result<Aggregation> {
    if group_columns.is_empty() {
        return Err(Error::UnknownColumn { columns: Vec::new() });
    }
    let unknown: Vec<String> = group_columns
        .iter()
        .filter(|name| !master.has_column(name))
        .cloned()
        .collect();
    if !unknown.is_empty() {
        return Err(Error::UnknownColumn { columns: unknown });
    }

    let group_idx: Vec<usize> = group_columns
        .iter()
        .map(|name| master.column_index(name).unwrap_or_default())
        .collect();

    let numeric_idx: Vec<usize> = (0..master.n_columns())
        .filter(|i| !group_idx.contains(i))
        .filter(|&i| {
            let col = &master.columns[i];
            col.iter().any(|v| !v.is_missing())
                && col.iter().all(|v| v.is_missing() || v.is_numeric())
        })
        .collect();
    if numeric_idx.is_empty() {
        return Ok(Aggregation::NoAggregableColumns);
    }

    let mut groups: BTreeMap<Vec<Value>, GroupAcc> = BTreeMap::new();
    for row in 0..master.n_rows() {
        let key: Vec<Value> = group_idx.iter().map(|&i| master.cell(row, i).clone()).collect();
        let acc = groups.entry(key).or_insert_with(|| GroupAcc {
            count: 0,
            sums: vec![0.0; numeric_idx.len()],
            present: vec![0; numeric_idx.len()],
        });
        acc.count += 1;
        for (slot, &i) in numeric_idx.iter().enumerate() {
            if let Some(x) = master.cell(row, i).as_f64() {
                acc.sums[slot] += x;
                acc.present[slot] += 1;
            }
        }
    }

    let mut names: Vec<String> = group_columns.to_vec();
    names.push(COUNT_COLUMN.to_string());
    for &i in &numeric_idx {
        names.push(master.column_names()[i].clone());
    }

    let mut summary = Table::with_columns(names);
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
    for (key, acc) in groups {
        let mut row = key;
        row.push(Value::Int(acc.count as i64));
        for slot in 0..numeric_idx.len() {
            // a group where the column is entirely missing has no mean
            row.push(if acc.present[slot] == 0 {
                Value::Missing
            } else {
                Value::Float(acc.sums[slot] / acc.present[slot] as f64)
            });
        }
        summary.push_row(row);
    }
    Ok(Aggregation::Summary(summary))
}
