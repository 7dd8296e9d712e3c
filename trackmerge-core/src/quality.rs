//! Missing-value reporting.

use crate::table::Table;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Missing-value count for one column.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ColumnMissing {
    /// Column name.
    pub column: String,
    /// Number of missing cells in the column.
    pub missing: usize,
}

/// Counts missing cells per column, in column order.
///
/// A table with no missing cells yields all zeros; this never fails.
#[must_use]
pub fn missing_summary(master: &Table) -> Vec<ColumnMissing> {
    master
        .column_names()
        .iter()
        .enumerate()
        .map(|(i, name)| ColumnMissing {
            column: name.clone(),
            missing: master.columns[i].iter().filter(|v| v.is_missing()).count(),
        })
        .collect()
}

/// Returns the rows containing at least one missing cell, in master order.
#[must_use]
pub fn rows_with_any_missing(master: &Table) -> Table {
    let indices: Vec<usize> = (0..master.n_rows())
        .filter(|&row| master.row(row).any(crate::value::Value::is_missing))
        .collect();
    master.filter_rows(&indices)
}
