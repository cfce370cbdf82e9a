//! # migas-forecast
//!
//! Command-line interface: load a monthly import table (CSV or Excel),
//! forecast it and print or write the report tables.

use clap::Parser;
use migas_forecast::config::PipelineConfig;
use migas_forecast::data::DataLoader;
use migas_forecast::error::Result;
use migas_forecast::pipeline;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "migas-forecast")]
#[command(
    about = "Fuzzy time series Markov chain forecasting of monthly import values",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Input CSV file or Excel workbook with year, month and value columns
    #[arg(short, long)]
    input: PathBuf,

    /// JSON configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Lag window size, overrides the configuration
    #[arg(short, long)]
    order: Option<usize>,

    /// Number of months to forecast, defaults to the test set length
    #[arg(long)]
    horizon: Option<usize>,

    /// Share of the series used for training, overrides the configuration
    #[arg(long)]
    train_ratio: Option<f64>,

    /// Directory to write the report tables to as CSV
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn load_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_json_file(path)?,
            None => PipelineConfig::default(),
        };

        if let Some(order) = self.order {
            config.forecast.order = order;
        }
        if let Some(ratio) = self.train_ratio {
            config.forecast.train_ratio = ratio;
        }
        if self.horizon.is_some() {
            config.forecast.horizon = self.horizon;
        }

        config.validate()?;
        Ok(config)
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.load_config()?;
    tracing::debug!(?config, "loaded configuration");

    let table = DataLoader::load(&cli.input)?;
    let report = pipeline::run(&table, &config)?;

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report);
    }

    if let Some(dir) = &cli.output_dir {
        report.write_csv_dir(dir)?;
    }

    Ok(())
}

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "migas_forecast=info".into()),
        )
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "forecast failed");
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
