//! Equal-width histogram binning for plotting consumers.

use crate::error::{Error, Result};
use crate::table::Table;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Smallest accepted bin count.
pub const MIN_BINS: usize = 5;

/// Largest accepted bin count.
pub const MAX_BINS: usize = 100;

/// Binned counts of a numeric feature.
///
/// `edges` has one more entry than `counts`; bin `i` covers
/// `edges[i]..edges[i + 1]`, with the last bin closed on the right.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FeatureHistogram {
    /// Bin edges, equally spaced over the observed range.
    pub edges: Vec<f64>,
    /// Per-bin value counts.
    pub counts: Vec<u64>,
}

impl FeatureHistogram {
    /// Returns true if no numeric values were observed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Bins the numeric values of a column into `bins` equal-width bins.
///
/// Missing and non-numeric cells are excluded before the range is computed;
/// `bins` is clamped to `MIN_BINS..=MAX_BINS`. A column with no numeric
/// values yields an empty histogram; a degenerate range (all values equal)
/// yields a single bin holding everything.
///
/// # Errors
/// Returns [`Error::UnknownColumn`] if the column does not exist.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn feature_histogram(master: &Table, column: &str, bins: usize) -> Result<FeatureHistogram> {
    let cells = master.column(column).ok_or_else(|| Error::UnknownColumn {
        columns: vec![column.to_string()],
    })?;

    let values: Vec<f64> = cells
        .iter()
        .filter_map(crate::value::Value::as_f64)
        .filter(|x| x.is_finite())
        .collect();
    if values.is_empty() {
        return Ok(FeatureHistogram {
            edges: Vec::new(),
            counts: Vec::new(),
        });
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if (max - min).abs() < f64::EPSILON {
        return Ok(FeatureHistogram {
            edges: vec![min, max],
            counts: vec![values.len() as u64],
        });
    }

    let bins = bins.clamp(MIN_BINS, MAX_BINS);
    let width = (max - min) / bins as f64;
    let mut counts = vec![0u64; bins];
    for x in &values {
        let bin = ((x - min) / width) as usize;
        // max lands in the last bin
        counts[bin.min(bins - 1)] += 1;
    }
    let edges = (0..=bins).map(|i| min + i as f64 * width).collect();
    Ok(FeatureHistogram { edges, counts })
}
