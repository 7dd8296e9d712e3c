//! trackmerge-core: CSV consolidation and aggregation engine.
//!
//! This crate merges per-file measurement tables from an imaging/tracking
//! pipeline into one master table enriched with filename-derived metadata,
//! assigns per-sample identifiers, and computes the missing-value, group-wise
//! and track/timepoint summaries consumed by a front-end or CLI.
//!

pub mod aggregate;
pub mod error;
pub mod histogram;
pub mod identity;
pub mod merge;
pub mod metadata;
pub mod normalize;
pub mod quality;
pub mod table;
pub mod tracks;
pub mod value;

pub use aggregate::{aggregate, Aggregation, COUNT_COLUMN};
pub use error::{Error, Result};
pub use histogram::{feature_histogram, FeatureHistogram, MAX_BINS, MIN_BINS};
pub use identity::{assign_sample_ids, ID2_COLUMN, RANKS_COLUMN};
pub use merge::{
    merge, CLASS_COLUMN, CONDITION2_COLUMN, FILENAME_COLUMN, MOUSE_COLUMN, POSITION_COLUMN,
};
pub use metadata::FilenameMetadata;
pub use normalize::{canonical_name, normalize_columns, FRAME_COLUMN, TRACK_ID_COLUMN};
pub use quality::{missing_summary, rows_with_any_missing, ColumnMissing};
pub use table::{RawTable, Table};
pub use tracks::{
    track_counts, unique_per_timepoint, TimepointUnique, TrackTimepointCount, UnitSeries,
};
pub use value::Value;
