//! Columnar table storage.
//!
//! Tables store cells column-major: one `Vec<Value>` per named column, all
//! the same length. Rows keep their insertion order, which downstream
//! ranking and reporting rely on for determinism.

use crate::value::Value;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A columnar table of dynamically-typed cells.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Table {
    pub(crate) names: Vec<String>,
    pub(crate) columns: Vec<Vec<Value>>,
}

impl Table {
    /// Creates an empty table with no columns.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table with the given column names.
    #[must_use]
    pub fn with_columns(names: Vec<String>) -> Self {
        let columns = names.iter().map(|_| Vec::new()).collect();
        Self { names, columns }
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn n_columns(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n_rows() == 0
    }

    /// Returns the column names in order.
    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.names
    }

    /// Returns the index of a column by name.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Returns true if the named column exists.
    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Returns the cells of a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.column_index(name).map(|i| self.columns[i].as_slice())
    }

    /// Returns the cell at (row, column index).
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> &Value {
        &self.columns[col][row]
    }

    /// Iterates the cells of one row in column order.
    pub fn row(&self, row: usize) -> impl Iterator<Item = &Value> {
        self.columns.iter().map(move |c| &c[row])
    }

    /// Appends one row of cells, one per column.
    ///
    /// # Panics
    /// Panics if the row length does not match the column count; callers
    /// construct rows from this table's own column set.
    pub fn push_row(&mut self, row: Vec<Value>) {
        assert_eq!(row.len(), self.names.len(), "row/column arity mismatch");
        for (column, cell) in self.columns.iter_mut().zip(row) {
            column.push(cell);
        }
    }

    /// Appends a derived column, or replaces the column of the same name.
    ///
    /// Existing columns are never mutated in place by any operation; derived
    /// columns (`ranks`, `ID2`, broadcast metadata) arrive through here.
    ///
    /// # Panics
    /// Panics if `values` does not have one cell per row.
    pub fn set_column(&mut self, name: &str, values: Vec<Value>) {
        assert_eq!(values.len(), self.n_rows(), "column length mismatch");
        if let Some(i) = self.column_index(name) {
            self.columns[i] = values;
        } else {
            self.names.push(name.to_string());
            self.columns.push(values);
        }
    }

    /// Keeps only the rows whose indices are listed, preserving order.
    #[must_use]
    pub fn filter_rows(&self, indices: &[usize]) -> Self {
        let columns = self
            .columns
            .iter()
            .map(|col| indices.iter().map(|&i| col[i].clone()).collect())
            .collect();
        Self {
            names: self.names.clone(),
            columns,
        }
    }
}

/// One uploaded file: its name plus the table parsed from it.
///
/// Raw tables are immutable once read; the merger consumes them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawTable {
    /// Name of the source file, used for metadata extraction and ranking.
    pub source_filename: String,
    /// The parsed cells.
    pub table: Table,
}

impl RawTable {
    /// Creates a raw table from a source filename and parsed cells.
    #[must_use]
    pub fn new(source_filename: impl Into<String>, table: Table) -> Self {
        Self {
            source_filename: source_filename.into(),
            table,
        }
    }
}
