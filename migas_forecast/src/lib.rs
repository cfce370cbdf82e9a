//! # Migas Forecast
//!
//! Forecasting of monthly oil and gas import values with a fuzzy time series
//! Markov chain model.
//!
//! ## Features
//!
//! - Validation and preprocessing of Year / Month / Import Value tables
//! - Fuzzy logical relationships over a configurable lag window (order)
//! - Transition mapping by averaging the successors of each pattern
//! - Autoregressive multi-step forecasts with a persistence fallback
//! - Accuracy metrics and report tables (relationships, mapping, linguistic
//!   labels, test errors, swarm parameter summary)
//!
//! ## Quick Start
//!
//! ```no_run
//! use migas_forecast::config::PipelineConfig;
//! use migas_forecast::data::DataLoader;
//! use migas_forecast::pipeline;
//!
//! let config = PipelineConfig::default();
//! let table = DataLoader::from_csv("imports.csv")?;
//!
//! let report = pipeline::run(&table, &config)?;
//! println!("{}", report);
//! # Ok::<(), migas_forecast::ForecastError>(())
//! ```
//!
//! The swarm parameters in [`config::SwarmParameters`] are displayed in the
//! report only. No swarm optimization is performed.

pub mod config;
pub mod data;
pub mod error;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod utils;

// Re-export commonly used types
pub use crate::config::{ColumnNames, ForecastParameters, PipelineConfig, SwarmParameters};
pub use crate::data::{preprocess, CleanSeries, DataLoader};
pub use crate::error::ForecastError;
pub use crate::models::{ForecastModel, ForecastResult, TrainedForecastModel};
pub use crate::pipeline::{forecast_series, ForecastOutcome};
pub use crate::report::ForecastReport;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
