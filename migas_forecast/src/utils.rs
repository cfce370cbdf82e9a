//! Utility functions for the migas_forecast crate

use crate::data::CleanSeries;
use crate::error::{ForecastError, Result};
use chrono::{Datelike, Months, NaiveDate};

/// Split a series into training and test sets.
///
/// The training set holds the first `floor(len * train_ratio)` observations.
pub fn train_test_split(
    series: &CleanSeries,
    train_ratio: f64,
) -> Result<(CleanSeries, CleanSeries)> {
    if !(train_ratio > 0.0 && train_ratio < 1.0) {
        return Err(ForecastError::InvalidParameter(format!(
            "Train ratio must be between 0 and 1 (exclusive), got {}",
            train_ratio
        )));
    }

    let train_size = (series.len() as f64 * train_ratio).floor() as usize;
    series.split_at(train_size)
}

/// Consecutive first-of-month dates beginning at `start`
pub fn month_starts(start: NaiveDate, count: usize) -> Result<Vec<NaiveDate>> {
    (0..count)
        .map(|i| {
            let offset = u32::try_from(i).map_err(|_| {
                ForecastError::ValidationError(format!("Month offset {} is too large", i))
            })?;
            start.checked_add_months(Months::new(offset)).ok_or_else(|| {
                ForecastError::ValidationError(format!(
                    "Date {} plus {} months is out of range",
                    start, offset
                ))
            })
        })
        .collect()
}

/// First day of the month after `date`
pub fn next_month_start(date: NaiveDate) -> Result<NaiveDate> {
    let shifted = date.checked_add_months(Months::new(1)).ok_or_else(|| {
        ForecastError::ValidationError(format!("No month follows {}", date))
    })?;
    NaiveDate::from_ymd_opt(shifted.year(), shifted.month(), 1)
        .ok_or_else(|| ForecastError::ValidationError(format!("No month follows {}", date)))
}
