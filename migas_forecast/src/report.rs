//! Report tables built from a forecasting run
//!
//! Each table is a list of serializable rows. The report prints as aligned
//! text, writes one CSV file per table, or serializes whole to JSON.

use crate::config::SwarmParameters;
use crate::error::Result;
use crate::metrics::{forecast_errors, ForecastAccuracy};
use crate::models::TrainedForecastModel;
use crate::pipeline::ForecastOutcome;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;

/// Label of observations in the training set
pub const TRAIN_LABEL: &str = "A";
/// Label of observations in the test set
pub const TEST_LABEL: &str = "B";

/// One fuzzy logical relationship
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationshipRow {
    pub period: usize,
    pub pattern: String,
    pub successor: f64,
}

/// One entry of the transition mapping
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MappingRow {
    pub pattern: String,
    pub expected_next: f64,
    pub occurrences: usize,
}

/// One observation with its train/test label and, for test rows, the forecast
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinguisticRow {
    pub period: usize,
    pub date: NaiveDate,
    pub value: f64,
    pub label: String,
    pub forecast: Option<f64>,
}

/// Forecast error for one test period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorRow {
    pub period: usize,
    pub date: NaiveDate,
    pub actual: f64,
    pub forecast: f64,
    pub error: f64,
}

/// A dated forecast value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// One swarm parameter or the accuracy figure shown next to them
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwarmRow {
    pub parameter: String,
    pub value: Option<f64>,
}

/// All tables of a forecasting run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastReport {
    pub model: String,
    pub order: usize,
    pub relationships: Vec<RelationshipRow>,
    pub mapping: Vec<MappingRow>,
    pub linguistic: Vec<LinguisticRow>,
    pub errors: Vec<ErrorRow>,
    pub forecast: Vec<ForecastPoint>,
    pub swarm: Vec<SwarmRow>,
    pub accuracy: Option<ForecastAccuracy>,
}

impl ForecastReport {
    /// Build every table from a run and the displayed swarm settings
    pub fn new(outcome: &ForecastOutcome, swarm: &SwarmParameters) -> Self {
        let model = outcome.model();

        let relationships = model
            .relationships()
            .iter()
            .enumerate()
            .map(|(i, r)| RelationshipRow {
                period: i + 1,
                pattern: r.pattern.to_string(),
                successor: r.successor,
            })
            .collect();

        let mapping = model
            .transitions()
            .iter()
            .map(|(pattern, t)| MappingRow {
                pattern: pattern.to_string(),
                expected_next: t.mean,
                occurrences: t.count,
            })
            .collect();

        let train = outcome.train();
        let test = outcome.test();
        let forecast = outcome.forecast();

        let linguistic = train
            .iter()
            .map(|(date, value)| (date, value, TRAIN_LABEL, None))
            .chain(
                test.iter()
                    .enumerate()
                    .map(|(i, (date, value))| (date, value, TEST_LABEL, forecast.get(i).copied())),
            )
            .enumerate()
            .map(|(i, (date, value, label, predicted))| LinguisticRow {
                period: i + 1,
                date,
                value,
                label: label.to_string(),
                forecast: predicted,
            })
            .collect();

        let errors = forecast_errors(forecast, test.values())
            .into_iter()
            .zip(test.iter().zip(forecast.iter()))
            .enumerate()
            .map(|(i, (error, ((date, actual), &predicted)))| ErrorRow {
                period: i + 1,
                date,
                actual,
                forecast: predicted,
                error,
            })
            .collect();

        let forecast_points = outcome
            .forecast_dates()
            .iter()
            .zip(forecast.iter())
            .map(|(&date, &value)| ForecastPoint { date, value })
            .collect();

        let accuracy = outcome.accuracy().cloned();

        Self {
            model: model.name().to_string(),
            order: model.order(),
            relationships,
            mapping,
            linguistic,
            errors,
            forecast: forecast_points,
            swarm: swarm_rows(swarm, accuracy.as_ref().map(|a| a.mape)),
            accuracy,
        }
    }

    /// Serialize the report as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write one CSV file per table into `dir`, creating it if needed
    pub fn write_csv_dir<P: AsRef<Path>>(&self, dir: P) -> Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        write_csv(dir.join("relationships.csv"), &self.relationships)?;
        write_csv(dir.join("mapping.csv"), &self.mapping)?;
        write_csv(dir.join("linguistic.csv"), &self.linguistic)?;
        write_csv(dir.join("errors.csv"), &self.errors)?;
        write_csv(dir.join("forecast.csv"), &self.forecast)?;
        write_csv(dir.join("swarm.csv"), &self.swarm)?;

        tracing::info!(dir = %dir.display(), "wrote report tables");
        Ok(())
    }
}

fn swarm_rows(swarm: &SwarmParameters, mape: Option<f64>) -> Vec<SwarmRow> {
    [
        ("Iterations", Some(swarm.iterations as f64)),
        ("Particles", Some(swarm.particles as f64)),
        ("Inertia Weight (w)", Some(swarm.inertia)),
        ("C1", Some(swarm.c1)),
        ("C2", Some(swarm.c2)),
        ("MAPE", mape),
    ]
    .into_iter()
    .map(|(parameter, value)| SwarmRow {
        parameter: parameter.to_string(),
        value,
    })
    .collect()
}

/// Write serializable rows to a CSV file with a header
pub fn write_csv<P: AsRef<Path>, T: Serialize>(path: P, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn fmt_opt(value: Option<f64>) -> String {
    value.map(|v| format!("{:.4}", v)).unwrap_or_else(|| "-".to_string())
}

impl fmt::Display for ForecastReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model: {}", self.model)?;
        writeln!(f, "Order: {}", self.order)?;
        writeln!(f)?;

        writeln!(f, "Fuzzy Logical Relationships:")?;
        writeln!(f, "  {:>6}  {:<40}  {:>14}", "Period", "Pattern", "Next")?;
        for row in &self.relationships {
            writeln!(f, "  {:>6}  {:<40}  {:>14.4}", row.period, row.pattern, row.successor)?;
        }
        writeln!(f)?;

        writeln!(f, "Transition Mapping:")?;
        writeln!(f, "  {:<40}  {:>14}  {:>5}", "Pattern", "Expected", "Count")?;
        for row in &self.mapping {
            writeln!(
                f,
                "  {:<40}  {:>14.4}  {:>5}",
                row.pattern, row.expected_next, row.occurrences
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Linguistic Mapping:")?;
        writeln!(
            f,
            "  {:>6}  {:<10}  {:>14}  {:>5}  {:>14}",
            "Period", "Date", "Value", "Label", "Forecast"
        )?;
        for row in &self.linguistic {
            writeln!(
                f,
                "  {:>6}  {:<10}  {:>14.4}  {:>5}  {:>14}",
                row.period,
                row.date,
                row.value,
                row.label,
                fmt_opt(row.forecast)
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Test Results:")?;
        writeln!(
            f,
            "  {:>6}  {:<10}  {:>14}  {:>14}  {:>14}",
            "Period", "Date", "Actual", "Forecast", "Error"
        )?;
        for row in &self.errors {
            writeln!(
                f,
                "  {:>6}  {:<10}  {:>14.4}  {:>14.4}  {:>14.4}",
                row.period, row.date, row.actual, row.forecast, row.error
            )?;
        }
        writeln!(f)?;

        writeln!(f, "Forecast:")?;
        for point in &self.forecast {
            writeln!(f, "  {:<10}  {:>14.4}", point.date, point.value)?;
        }
        writeln!(f)?;

        writeln!(f, "Swarm Parameters:")?;
        for row in &self.swarm {
            writeln!(f, "  {:<20}  {:>10}", row.parameter, fmt_opt(row.value))?;
        }

        if let Some(accuracy) = &self.accuracy {
            writeln!(f)?;
            write!(f, "{}", accuracy)?;
        }
        Ok(())
    }
}
