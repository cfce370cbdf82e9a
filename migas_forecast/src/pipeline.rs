//! Explicit forecasting pipeline
//!
//! preprocess -> split -> train -> forecast -> evaluate. Each stage takes the
//! previous stage's output by reference and returns a new value; nothing is
//! kept between runs.

use crate::config::{ForecastParameters, PipelineConfig};
use crate::data::{preprocess, CleanSeries};
use crate::error::{ForecastError, Result};
use crate::metrics::{forecast_accuracy, ForecastAccuracy};
use crate::models::fuzzy_markov::{FuzzyMarkovModel, TrainedFuzzyMarkov};
use crate::models::{ForecastModel, TrainedForecastModel};
use crate::report::ForecastReport;
use crate::utils::{month_starts, next_month_start, train_test_split};
use chrono::NaiveDate;
use polars::prelude::DataFrame;

/// Everything produced by one forecasting run
#[derive(Debug, Clone)]
pub struct ForecastOutcome {
    train: CleanSeries,
    test: CleanSeries,
    model: TrainedFuzzyMarkov,
    forecast: Vec<f64>,
    forecast_dates: Vec<NaiveDate>,
    accuracy: Option<ForecastAccuracy>,
}

impl ForecastOutcome {
    pub fn train(&self) -> &CleanSeries {
        &self.train
    }

    pub fn test(&self) -> &CleanSeries {
        &self.test
    }

    /// The trained model, holding the relationships and the transition mapping
    pub fn model(&self) -> &TrainedFuzzyMarkov {
        &self.model
    }

    pub fn forecast(&self) -> &[f64] {
        &self.forecast
    }

    /// Monthly dates for each forecast value
    pub fn forecast_dates(&self) -> &[NaiveDate] {
        &self.forecast_dates
    }

    /// Accuracy over the periods where both a forecast and a test value exist
    pub fn accuracy(&self) -> Option<&ForecastAccuracy> {
        self.accuracy.as_ref()
    }
}

/// Split, train and forecast a clean series.
///
/// The horizon defaults to the length of the test set. Test values are only
/// used to score the forecast after it has been produced.
pub fn forecast_series(
    series: &CleanSeries,
    params: &ForecastParameters,
) -> Result<ForecastOutcome> {
    params.validate()?;

    let (train, test) = train_test_split(series, params.train_ratio)?;
    let horizon = params.horizon.unwrap_or(test.len());

    let model = FuzzyMarkovModel::new(params.order)?.train(&train)?;
    let forecast = model.forecast(horizon)?.into_values();

    let start = match (test.first_date(), train.last_date()) {
        (Some(first_test), _) => first_test,
        (None, Some(last_train)) => next_month_start(last_train)?,
        (None, None) => {
            return Err(ForecastError::ValidationError(
                "Cannot date a forecast for an empty series".to_string(),
            ))
        }
    };
    let forecast_dates = month_starts(start, forecast.len())?;

    let scored = forecast.len().min(test.len());
    let accuracy = if scored > 0 {
        Some(forecast_accuracy(&forecast[..scored], &test.values()[..scored])?)
    } else {
        None
    };

    tracing::info!(
        order = params.order,
        train = train.len(),
        test = test.len(),
        horizon,
        mape = ?accuracy.as_ref().map(|a| a.mape),
        "forecast run complete"
    );

    Ok(ForecastOutcome {
        train,
        test,
        model,
        forecast,
        forecast_dates,
        accuracy,
    })
}

/// Run the whole pipeline on a raw table and build the report
pub fn run(df: &DataFrame, config: &PipelineConfig) -> Result<ForecastReport> {
    config.validate()?;

    let series = preprocess(df, &config.columns)?;
    let outcome = forecast_series(&series, &config.forecast)?;
    Ok(ForecastReport::new(&outcome, &config.swarm))
}
