use migas_forecast::config::{ColumnNames, ForecastParameters};
use migas_forecast::data::DataLoader;
use migas_forecast::models::fuzzy_markov::FuzzyMarkovModel;
use migas_forecast::models::{ForecastModel, TrainedForecastModel};
use migas_forecast::pipeline::forecast_series;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Migas Forecast: Basic Forecasting Example");
    println!("=========================================\n");

    let csv_path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("demos")
        .join("csv")
        .join("oil_gas_imports.csv");

    println!("Loading data from: {}", csv_path.display());
    let series = DataLoader::series_from_csv(&csv_path, &ColumnNames::default())?;
    println!("Loaded {} monthly observations\n", series.len());

    // Train directly on the whole series and look one year ahead
    let model = FuzzyMarkovModel::new(1)?;
    let trained = model.train(&series)?;
    let forecast = trained.forecast(12)?;

    println!("{} learned {} patterns", trained.name(), trained.transitions().len());
    for (pattern, transition) in trained.transitions().iter().take(5) {
        println!(
            "  {} -> {:.2} (seen {} times)",
            pattern, transition.mean, transition.count
        );
    }
    println!("12-month forecast: {:?}\n", forecast.values());

    // Hold out the last 20% and score the forecast against it
    let params = ForecastParameters::new(2, 0.8, None)?;
    let outcome = forecast_series(&series, &params)?;

    println!("Held-out evaluation (order {}):", outcome.model().order());
    for ((date, value), actual) in outcome
        .forecast_dates()
        .iter()
        .zip(outcome.forecast())
        .zip(outcome.test().values())
    {
        println!("  {}: forecast {:.2}, actual {:.2}", date, value, actual);
    }
    if let Some(accuracy) = outcome.accuracy() {
        println!("\n{}", accuracy);
    }

    Ok(())
}
