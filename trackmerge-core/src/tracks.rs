//! Track and timepoint summaries.
//!
//! A track is one tracked entity (a cell, a particle) observed across
//! frames. These summaries feed histogram/line-plot consumers: timepoint
//! counts per track per experimental unit, and distinct-value counts per
//! timepoint within each unit.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};
use crate::normalize::FRAME_COLUMN;
use crate::table::Table;
use crate::value::Value;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of observed timepoints for one (unit, track) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrackTimepointCount {
    /// Experimental unit (typically the `ID2` sample identifier).
    pub unit: Value,
    /// Track identifier within the unit.
    pub track: Value,
    /// Number of master-table rows sharing this (unit, track) pair.
    pub timepoint_count: usize,
}

/// Distinct-value count at one timepoint.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimepointUnique {
    /// The timepoint/frame value.
    pub timepoint: Value,
    /// Number of distinct non-missing values observed at that timepoint.
    pub unique_values: usize,
}

/// Distinct-value series for one experimental unit, timepoints ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnitSeries {
    /// Experimental unit.
    pub unit: Value,
    /// Per-timepoint distinct-value counts, ascending by timepoint.
    pub points: Vec<TimepointUnique>,
}

/// Counts rows (timepoints) per track per experimental unit.
///
/// Output is sorted by (unit, track).
///
/// # Errors
/// The track column and the canonical frame column are structural
/// requirements: either being absent is [`Error::MissingRequiredColumn`]
/// naming it. An absent `unit_column` is [`Error::UnknownColumn`].
pub fn track_counts(
    master: &Table,
    unit_column: &str,
    track_column: &str,
) -> Result<Vec<TrackTimepointCount>> {
    for required in [track_column, FRAME_COLUMN] {
        if !master.has_column(required) {
            return Err(Error::MissingRequiredColumn {
                column: required.to_string(),
            });
        }
    }
    let units = column(master, unit_column)?;
    let tracks = master.column(track_column).unwrap_or_default();

    let mut counts: BTreeMap<(Value, Value), usize> = BTreeMap::new();
    for (unit, track) in units.iter().zip(tracks) {
        *counts.entry((unit.clone(), track.clone())).or_insert(0) += 1;
    }
    Ok(counts
        .into_iter()
        .map(|((unit, track), timepoint_count)| TrackTimepointCount {
            unit,
            track,
            timepoint_count,
        })
        .collect())
}

/// Counts distinct `value_column` values per timepoint within each unit.
///
/// Missing cells do not count as a distinct value; a missing timepoint or
/// unit is still a legitimate grouping key. Units and timepoints are both
/// emitted in ascending order.
///
/// # Errors
/// An absent `timepoint_column` is [`Error::MissingRequiredColumn`]; absent
/// unit/value columns are [`Error::UnknownColumn`] naming every one missing.
pub fn unique_per_timepoint(
    master: &Table,
    unit_column: &str,
    timepoint_column: &str,
    value_column: &str,
) -> Result<Vec<UnitSeries>> {
    if !master.has_column(timepoint_column) {
        return Err(Error::MissingRequiredColumn {
            column: timepoint_column.to_string(),
        });
    }
    let unknown: Vec<String> = [unit_column, value_column]
        .iter()
        .filter(|name| !master.has_column(name))
        .map(ToString::to_string)
        .collect();
    if !unknown.is_empty() {
        return Err(Error::UnknownColumn { columns: unknown });
    }

    let units = master.column(unit_column).unwrap_or_default();
    let timepoints = master.column(timepoint_column).unwrap_or_default();
    let values = master.column(value_column).unwrap_or_default();

    let mut sets: BTreeMap<Value, BTreeMap<Value, BTreeSet<Value>>> = BTreeMap::new();
    for ((unit, timepoint), value) in units.iter().zip(timepoints).zip(values) {
        let per_timepoint = sets
            .entry(unit.clone())
            .or_default()
            .entry(timepoint.clone())
            .or_default();
        if !value.is_missing() {
            per_timepoint.insert(value.clone());
        }
    }

    Ok(sets
        .into_iter()
        .map(|(unit, per_timepoint)| UnitSeries {
            unit,
            points: per_timepoint
                .into_iter()
                .map(|(timepoint, distinct)| TimepointUnique {
                    timepoint,
                    unique_values: distinct.len(),
                })
                .collect(),
        })
        .collect())
}

fn column<'t>(master: &'t Table, name: &str) -> Result<&'t [Value]> {
    master.column(name).ok_or_else(|| Error::UnknownColumn {
        columns: vec![name.to_string()],
    })
}
