//! Pipeline configuration
//!
//! Everything the pipeline consumes is passed in explicitly. A configuration
//! can be built in code, or loaded from a JSON file where every section and
//! field is optional and falls back to its default.

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Largest order the pipeline accepts
pub const MAX_ORDER: usize = 10;

/// Names of the input columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub year: String,
    pub month: String,
    pub value: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            year: "Year".to_string(),
            month: "Month".to_string(),
            value: "Import Value".to_string(),
        }
    }
}

impl ColumnNames {
    /// All required column names in input order
    pub fn required(&self) -> [&str; 3] {
        [self.year.as_str(), self.month.as_str(), self.value.as_str()]
    }
}

/// Parameters consumed by the forecasting stages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastParameters {
    /// Lag window size
    pub order: usize,
    /// Share of the series used for training
    pub train_ratio: f64,
    /// Number of steps to forecast, defaults to the test set length
    pub horizon: Option<usize>,
}

impl Default for ForecastParameters {
    fn default() -> Self {
        Self {
            order: 3,
            train_ratio: 0.8,
            horizon: None,
        }
    }
}

impl ForecastParameters {
    /// Create validated parameters
    pub fn new(order: usize, train_ratio: f64, horizon: Option<usize>) -> Result<Self> {
        let params = Self {
            order,
            train_ratio,
            horizon,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if self.order == 0 || self.order > MAX_ORDER {
            return Err(ForecastError::InvalidParameter(format!(
                "Order must be between 1 and {}, got {}",
                MAX_ORDER, self.order
            )));
        }

        if !(self.train_ratio > 0.0 && self.train_ratio < 1.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "Train ratio must be between 0 and 1 (exclusive), got {}",
                self.train_ratio
            )));
        }

        Ok(())
    }
}

/// Particle swarm settings.
///
/// These are only validated and shown in the summary table. No swarm search
/// runs anywhere in the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwarmParameters {
    pub iterations: usize,
    pub particles: usize,
    /// Inertia weight
    pub inertia: f64,
    pub c1: f64,
    pub c2: f64,
}

impl Default for SwarmParameters {
    fn default() -> Self {
        Self {
            iterations: 10,
            particles: 30,
            inertia: 0.5,
            c1: 1.5,
            c2: 1.5,
        }
    }
}

impl SwarmParameters {
    pub fn validate(&self) -> Result<()> {
        check_count("iterations", self.iterations, 1, 100)?;
        check_count("particles", self.particles, 1, 100)?;
        check_range("inertia weight", self.inertia, 0.0, 1.0)?;
        check_range("c1", self.c1, 0.0, 2.0)?;
        check_range("c2", self.c2, 0.0, 2.0)?;
        Ok(())
    }
}

fn check_count(name: &str, value: usize, min: usize, max: usize) -> Result<()> {
    if value < min || value > max {
        return Err(ForecastError::InvalidParameter(format!(
            "{} must be between {} and {}, got {}",
            name, min, max, value
        )));
    }
    Ok(())
}

fn check_range(name: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if !(value >= min && value <= max) {
        return Err(ForecastError::InvalidParameter(format!(
            "{} must be between {} and {}, got {}",
            name, min, max, value
        )));
    }
    Ok(())
}

/// Complete configuration for a pipeline run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub columns: ColumnNames,
    pub forecast: ForecastParameters,
    pub swarm: SwarmParameters,
}

impl PipelineConfig {
    /// Load and validate a configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parse and validate a configuration from JSON text
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: PipelineConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.forecast.validate()?;
        self.swarm.validate()
    }
}
