//! Column-name canonicalization.
//!
//! Exported tables name the same things differently across tool versions;
//! headers also pick up stray whitespace. Normalization trims every name and
//! applies a declarative alias table of exact-match renames.

use crate::table::Table;

/// Canonical name of the track-identifier column.
pub const TRACK_ID_COLUMN: &str = "TRACK_ID";

/// Canonical name of the frame/timepoint column.
pub const FRAME_COLUMN: &str = "FRAME";

/// Known exact-match synonyms, alias first.
pub const COLUMN_ALIASES: &[(&str, &str)] = &[
    ("TID", TRACK_ID_COLUMN),
    ("PID", FRAME_COLUMN),
];

/// Returns the canonical form of a raw column name: trimmed, and renamed if
/// it exactly matches a known alias. Partial matches are never renamed.
#[must_use]
pub fn canonical_name(raw: &str) -> &str {
    let trimmed = raw.trim();
    for (alias, canonical) in COLUMN_ALIASES {
        if trimmed == *alias {
            return canonical;
        }
    }
    trimmed
}

/// Canonicalizes every column name of a table in place.
///
/// Collision policy (deterministic, last-write-wins): if trimming or
/// renaming makes two columns share a name, the later column's data replaces
/// the earlier one, at the earlier column's position.
pub fn normalize_columns(table: &mut Table) {
    let canonical: Vec<String> = table
        .names
        .iter()
        .map(|n| canonical_name(n).to_string())
        .collect();

    let mut names: Vec<String> = Vec::with_capacity(canonical.len());
    let mut columns = Vec::with_capacity(canonical.len());
    for (name, column) in canonical.into_iter().zip(table.columns.drain(..)) {
        if let Some(i) = names.iter().position(|n| *n == name) {
            columns[i] = column;
        } else {
            names.push(name);
            columns.push(column);
        }
    }
    table.names = names;
    table.columns = columns;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn test_canonical_name() {
        assert_eq!(canonical_name("  x "), "x");
        assert_eq!(canonical_name("TID"), "TRACK_ID");
        assert_eq!(canonical_name("PID"), "FRAME");
        // exact matches only
        assert_eq!(canonical_name("TID2"), "TID2");
        assert_eq!(canonical_name("MY_TID"), "MY_TID");
    }

    #[test]
    fn test_normalize_trims_and_renames() {
        let mut t = Table::with_columns(vec![" area ".into(), "TID".into(), "PID".into()]);
        t.push_row(vec![Value::Float(1.5), Value::Int(7), Value::Int(0)]);
        normalize_columns(&mut t);
        assert_eq!(t.column_names(), &["area", "TRACK_ID", "FRAME"]);
        assert_eq!(t.column("TRACK_ID"), Some(&[Value::Int(7)][..]));
    }

    #[test]
    fn test_collision_last_write_wins() {
        // both TID and TRACK_ID present: the later column's data survives
        let mut t = Table::with_columns(vec!["TRACK_ID".into(), "TID".into()]);
        t.push_row(vec![Value::Int(1), Value::Int(2)]);
        normalize_columns(&mut t);
        assert_eq!(t.column_names(), &["TRACK_ID"]);
        assert_eq!(t.column("TRACK_ID"), Some(&[Value::Int(2)][..]));
    }
}
