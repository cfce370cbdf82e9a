//! # FTS Core
//!
//! Core calculations for fuzzy time series forecasting.
//! This crate turns a numeric series into fuzzy logical relationships,
//! averages them into a transition mapping and runs the autoregressive
//! forecast loop over that mapping.
//!
//! ```
//! use fts_core::{build_transitions, extract_pairs, forecast};
//!
//! let series = [10.0, 12.0, 14.0, 16.0];
//! let pairs = extract_pairs(&series, 2).unwrap();
//! let transitions = build_transitions(&pairs);
//!
//! let values = forecast(&[14.0, 16.0], &transitions, 2, 2).unwrap();
//! assert_eq!(values, vec![16.0, 16.0]);
//! ```

use thiserror::Error;

pub mod forecasting;
pub mod pattern;
pub mod transitions;

pub use crate::forecasting::{forecast, AutoregressiveForecaster};
pub use crate::pattern::{extract_pairs, FuzzyRelationship, Pattern};
pub use crate::transitions::{build_transitions, TransitionMap};

/// Errors that can occur in fuzzy time series calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Insufficient history: need at least {needed} values, got {got}")]
    InsufficientHistory { needed: usize, got: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for fuzzy time series operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Reject a zero lag window.
pub(crate) fn validate_order(order: usize) -> Result<()> {
    if order == 0 {
        return Err(CoreError::InvalidInput(
            "Order must be at least 1".to_string(),
        ));
    }
    Ok(())
}
