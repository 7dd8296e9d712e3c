//! Dynamically-typed cell values.
//!
//! Every cell in a table is a [`Value`]: an integer, a float, a piece of
//! text, or explicitly missing. Missing is its own variant so that "unknown"
//! never collapses into zero or the empty string.

use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single table cell.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// Absent / unknown cell.
    Missing,
    /// Integer cell.
    Int(i64),
    /// Floating-point cell.
    Float(f64),
    /// Text cell.
    Text(String),
}

impl Value {
    /// Parses a raw CSV field into a typed value.
    ///
    /// An empty field or a bare `na` / `nan` / `null` token (any case) is
    /// Missing; otherwise integer parsing is tried first, then float, and
    /// anything else is kept as text verbatim.
    #[must_use]
    pub fn parse(field: &str) -> Self {
        let trimmed = field.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("na")
            || trimmed.eq_ignore_ascii_case("nan")
            || trimmed.eq_ignore_ascii_case("null")
        {
            return Self::Missing;
        }
        if let Ok(i) = trimmed.parse::<i64>() {
            return Self::Int(i);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            return Self::Float(f);
        }
        Self::Text(field.to_string())
    }

    /// Returns true if the cell is missing.
    #[must_use]
    #[inline]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Returns true if the cell holds a number.
    #[must_use]
    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }

    /// Returns the numeric value, if any.
    #[must_use]
    #[inline]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            Self::Missing | Self::Text(_) => None,
        }
    }

    /// Returns the text content, if any.
    #[must_use]
    #[inline]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Lifts an optional string into a cell, mapping `None` to Missing.
    #[must_use]
    pub fn from_opt_text(text: Option<String>) -> Self {
        text.map_or(Self::Missing, Self::Text)
    }
}

// Values key group-by maps, so they carry a deterministic total order:
// Missing < numbers (ints and floats on the real line) < text. Equality
// follows the same comparison, so Int(2) and Float(2.0) land in one group.
impl Ord for Value {
    #[allow(clippy::cast_precision_loss)]
    fn cmp(&self, other: &Self) -> Ordering {
        fn class(v: &Value) -> u8 {
            match v {
                Value::Missing => 0,
                Value::Int(_) | Value::Float(_) => 1,
                Value::Text(_) => 2,
            }
        }
        match (self, other) {
            (Self::Missing, Self::Missing) => Ordering::Equal,
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (a, b) if a.is_numeric() && b.is_numeric() => {
                let x = a.as_f64().unwrap_or(f64::NAN);
                let y = b.as_f64().unwrap_or(f64::NAN);
                x.total_cmp(&y)
            }
            (a, b) => class(a).cmp(&class(b)),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => Ok(()),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}
