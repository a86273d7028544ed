//! tickerpredict - company name to stock ticker prediction.
//!
//! `train` fits a model from a labeled CSV and persists it, `predict`
//! resolves one name, `batch` resolves every name in a CSV.
//!
//! # Environment Variables
//! - `TEST_FRACTION` - held-out evaluation fraction (default: 0.2)
//! - `PREDICTION_CONFIDENCE` - flag predictions below this score (default: 0.08)
//! - `DATA_PATH` / `MODEL_PATH` - default file locations

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tickerpredict::application::predictor::TickerPredictor;
use tickerpredict::config::Config;
use tickerpredict::domain::types::StockPrediction;
use tickerpredict::infrastructure::csv_loader;
use tracing::{info, warn, Level};
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Train a model from a CSV of stock_name,ticker pairs
    Train {
        /// Path to training data CSV (default: DATA_PATH)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Path to write the model artifact (default: MODEL_PATH)
        #[arg(long)]
        model: Option<PathBuf>,
    },
    /// Predict the ticker for a single company name
    Predict {
        /// Free-form company name
        name: String,

        #[arg(long)]
        model: Option<PathBuf>,
    },
    /// Predict tickers for every name in a CSV
    Batch {
        #[arg(long)]
        input: Option<PathBuf>,

        #[arg(long)]
        model: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stdout_layer)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let predictor = TickerPredictor::new(config.trainer_params());

    match cli.command {
        Command::Train { input, model } => {
            let input = input.unwrap_or_else(|| config.data_path.clone());
            let model = model.unwrap_or_else(|| config.model_path.clone());

            let records = csv_loader::load_training_data(&input)?;
            let metrics = predictor.train(&records, &model)?;
            info!(
                "Trained on {} records, log-loss {:.6} over {} held-out examples",
                records.len(),
                metrics.log_loss,
                metrics.test_examples
            );
        }
        Command::Predict { name, model } => {
            let model = model.unwrap_or_else(|| config.model_path.clone());

            let prediction = predictor.predict(&name, &model)?;
            report(&prediction, config.prediction_confidence);
        }
        Command::Batch { input, model } => {
            let input = input.unwrap_or_else(|| config.data_path.clone());
            let model = model.unwrap_or_else(|| config.model_path.clone());

            let records = csv_loader::load_training_data(&input)?;
            let predictions = predictor.predict_batch(&records, &model)?;
            for prediction in &predictions {
                report(prediction, config.prediction_confidence);
            }
        }
    }

    Ok(())
}

fn report(prediction: &StockPrediction, confidence: f64) {
    let score = prediction.max_score();
    if score < confidence {
        warn!(
            "'{}' => {} (score {:.4} below confidence threshold {:.2})",
            prediction.stock_name, prediction.predicted_ticker, score, confidence
        );
    } else {
        info!(
            "'{}' => {} (score {:.4})",
            prediction.stock_name, prediction.predicted_ticker, score
        );
    }
}
