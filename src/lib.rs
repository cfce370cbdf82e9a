//! # Migas Workspace
//!
//! Umbrella crate re-exporting the forecasting core and the monthly import
//! forecasting pipeline.
//!
//! ```
//! use migas_workspace::fts::{build_transitions, extract_pairs, forecast};
//!
//! let series = [10.0, 12.0, 14.0, 16.0];
//! let transitions = build_transitions(&extract_pairs(&series, 2).unwrap());
//! assert_eq!(forecast(&series, &transitions, 2, 2).unwrap(), vec![16.0, 16.0]);
//! ```

pub use fts_core as fts;
pub use migas_forecast as forecast;
