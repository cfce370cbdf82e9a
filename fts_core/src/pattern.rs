//! Patterns and fuzzy logical relationships
//!
//! A pattern is the tuple of `order` consecutive observations that precedes a
//! value. Sliding that window over a series yields one relationship per
//! position: the pattern and the observation that followed it.

use crate::{validate_order, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// An ordered tuple of consecutive values used as an exact-match key
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pattern(Vec<f64>);

impl Pattern {
    /// Create a pattern from its values, oldest first
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// Get the pattern values
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    /// Number of values in the pattern
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the pattern holds no values
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Most recent value of the pattern
    pub fn last(&self) -> Option<f64> {
        self.0.last().copied()
    }
}

// Bits with negative zero folded into positive zero, so that hashing agrees
// with `==` on the values.
fn canonical_bits(value: f64) -> u64 {
    if value == 0.0 {
        0.0_f64.to_bits()
    } else {
        value.to_bits()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len()
            && self
                .0
                .iter()
                .zip(other.0.iter())
                .all(|(a, b)| canonical_bits(*a) == canonical_bits(*b))
    }
}

impl Eq for Pattern {}

impl Hash for Pattern {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.len().hash(state);
        for value in &self.0 {
            canonical_bits(*value).hash(state);
        }
    }
}

impl From<&[f64]> for Pattern {
    fn from(values: &[f64]) -> Self {
        Self(values.to_vec())
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, ")")
    }
}

/// A pattern together with the value observed right after it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyRelationship {
    /// The preceding window
    pub pattern: Pattern,
    /// The observation that followed the window
    pub successor: f64,
}

/// Slide a window of `order` values over `series` and pair each window with
/// its successor.
///
/// A series of length `L` yields `L - order` relationships. When `order >= L`
/// no window has a successor and the result is empty.
pub fn extract_pairs(series: &[f64], order: usize) -> Result<Vec<FuzzyRelationship>> {
    validate_order(order)?;

    if order >= series.len() {
        tracing::warn!(
            order,
            len = series.len(),
            "series too short for the requested order, no relationships formed"
        );
        return Ok(Vec::new());
    }

    let pairs: Vec<FuzzyRelationship> = series
        .windows(order + 1)
        .map(|window| FuzzyRelationship {
            pattern: Pattern::from(&window[..order]),
            successor: window[order],
        })
        .collect();

    tracing::debug!(order, pairs = pairs.len(), "extracted fuzzy relationships");
    Ok(pairs)
}
