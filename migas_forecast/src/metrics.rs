//! Scoring a forecast against the held-out test values

use crate::error::{ForecastError, Result};
use serde::Serialize;

/// Accuracy of a forecast over the scored periods
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastAccuracy {
    pub mae: f64,
    pub mse: f64,
    pub rmse: f64,
    /// Mean absolute percentage error, in percent
    pub mape: f64,
    /// Symmetric MAPE, in percent
    pub smape: f64,
}

/// Per-period errors, `actual - forecast`
pub fn forecast_errors(forecast: &[f64], actual: &[f64]) -> Vec<f64> {
    forecast
        .iter()
        .zip(actual.iter())
        .map(|(&f, &a)| a - f)
        .collect()
}

fn scored_periods(forecast: &[f64], actual: &[f64]) -> Result<usize> {
    if forecast.is_empty() || forecast.len() != actual.len() {
        return Err(ForecastError::ValidationError(format!(
            "Cannot score {} forecast values against {} actual values",
            forecast.len(),
            actual.len()
        )));
    }
    Ok(forecast.len())
}

/// Mean absolute percentage error, in percent.
///
/// Periods with a zero actual value add nothing to the sum but still count
/// towards the number of periods.
pub fn mean_absolute_percentage_error(forecast: &[f64], actual: &[f64]) -> Result<f64> {
    let periods = scored_periods(forecast, actual)?;

    let total: f64 = actual
        .iter()
        .zip(forecast.iter())
        .filter(|(&a, _)| a != 0.0)
        .map(|(&a, &f)| ((a - f) / a).abs())
        .sum();

    Ok(total * 100.0 / periods as f64)
}

/// Score a forecast against actual values of the same length
pub fn forecast_accuracy(forecast: &[f64], actual: &[f64]) -> Result<ForecastAccuracy> {
    let periods = scored_periods(forecast, actual)? as f64;

    let (abs_total, sq_total, sym_total) = actual.iter().zip(forecast.iter()).fold(
        (0.0, 0.0, 0.0),
        |(abs_total, sq_total, sym_total), (&a, &f)| {
            let error = a - f;
            let scale = a.abs() + f.abs();
            let sym = if scale == 0.0 { 0.0 } else { 2.0 * error.abs() / scale };
            (abs_total + error.abs(), sq_total + error * error, sym_total + sym)
        },
    );

    let mse = sq_total / periods;
    Ok(ForecastAccuracy {
        mae: abs_total / periods,
        mse,
        rmse: mse.sqrt(),
        mape: mean_absolute_percentage_error(forecast, actual)?,
        smape: sym_total * 100.0 / periods,
    })
}

impl std::fmt::Display for ForecastAccuracy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Forecast Accuracy Metrics:")?;
        let rows = [
            ("MAE", self.mae, ""),
            ("MSE", self.mse, ""),
            ("RMSE", self.rmse, ""),
            ("MAPE", self.mape, "%"),
            ("SMAPE", self.smape, "%"),
        ];
        for (label, value, unit) in rows {
            writeln!(f, "  {:<20}  {:>10.4}{}", label, value, unit)?;
        }
        Ok(())
    }
}
