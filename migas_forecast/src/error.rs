//! Error types for the migas_forecast crate

use fts_core::CoreError;
use polars::prelude::PolarsError;
use std::fmt;
use thiserror::Error;

/// A raw input row that failed validation
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidRow {
    /// Zero-based position of the row in the input table
    pub row: usize,
    /// Raw cell text of the checked columns, e.g. `Year=abc, Month=3`
    pub cells: String,
}

impl fmt::Display for InvalidRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {}: {}", self.row, self.cells)
    }
}

fn list_rows(rows: &[InvalidRow]) -> String {
    rows.iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

fn quote_columns(columns: &[String]) -> String {
    columns
        .iter()
        .map(|c| format!("'{}'", c))
        .collect::<Vec<_>>()
        .join(" or ")
}

/// Custom error types for the migas_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Required input columns are absent
    #[error("Schema error: missing columns: {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    /// Values that are not numeric or are null after coercion
    #[error(
        "Data type error: column {} contains non-numeric or null values: {}",
        quote_columns(.columns),
        list_rows(.rows)
    )]
    DataType {
        columns: Vec<String>,
        rows: Vec<InvalidRow>,
    },

    /// Month values outside 1..=12
    #[error("Range error: month must be between 1 and 12: {}", list_rows(.rows))]
    Range { rows: Vec<InvalidRow> },

    /// Year and month that do not form a calendar date
    #[error("Date construction error at row {row}: year {year}, month {month}")]
    DateConstruction { row: usize, year: f64, month: f64 },

    /// Seed series shorter than the model order
    #[error("Insufficient history: need at least {needed} values, got {got}")]
    InsufficientHistory { needed: usize, got: usize },

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error related to parameter or input validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from Polars operations
    #[error("Polars error: {0}")]
    PolarsError(String),

    /// Error reading a spreadsheet workbook
    #[error("Excel error: {0}")]
    ExcelError(String),

    /// Error writing CSV tables
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error reading configuration or writing JSON reports
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<PolarsError> for ForecastError {
    fn from(err: PolarsError) -> Self {
        ForecastError::PolarsError(err.to_string())
    }
}

impl From<calamine::Error> for ForecastError {
    fn from(err: calamine::Error) -> Self {
        ForecastError::ExcelError(err.to_string())
    }
}

impl From<CoreError> for ForecastError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InsufficientHistory { needed, got } => {
                ForecastError::InsufficientHistory { needed, got }
            }
            CoreError::InvalidInput(msg) => ForecastError::InvalidParameter(msg),
        }
    }
}
