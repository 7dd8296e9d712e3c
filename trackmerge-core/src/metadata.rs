//! Filename metadata extraction.
//!
//! Measurement files follow the convention
//! `{mouse}_{position}_{class}_{condition2}.{ext}`. Parsing is purely
//! positional and never fails: a filename with fewer segments simply leaves
//! the trailing fields unset. Segments beyond the fourth are ignored.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Structured fields parsed from a measurement filename.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FilenameMetadata {
    /// Subject identifier, the first underscore-delimited segment.
    pub mouse: String,
    /// Imaging position, the second segment.
    pub position: Option<String>,
    /// Experimental class, the third segment.
    pub class: Option<String>,
    /// Secondary condition, the fourth segment with the file extension
    /// (everything from the first `.`) stripped.
    pub condition2: Option<String>,
}

impl FilenameMetadata {
    /// Parses metadata out of a filename.
    #[must_use]
    pub fn parse(filename: &str) -> Self {
        let mut segments = filename.split('_');
        // split always yields at least one segment
        let mouse = segments.next().unwrap_or_default().to_string();
        let position = segments.next().map(ToString::to_string);
        let class = segments.next().map(ToString::to_string);
        let condition2 = segments
            .next()
            .map(|s| s.split('.').next().unwrap_or_default().to_string());
        Self {
            mouse,
            position,
            class,
            condition2,
        }
    }
}
