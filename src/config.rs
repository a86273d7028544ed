use crate::application::ml::sdca::TrainerParams;
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Fraction of training examples held out for evaluation.
    pub test_fraction: f64,
    /// Threshold collaborators may apply to `max_score` before accepting a
    /// prediction. Not enforced by the core; the CLI uses it to flag
    /// low-confidence results.
    pub prediction_confidence: f64,
    pub data_path: PathBuf,
    pub model_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let test_fraction = env::var("TEST_FRACTION")
            .unwrap_or_else(|_| "0.2".to_string())
            .parse::<f64>()
            .context("Failed to parse TEST_FRACTION")?;
        if !(0.0..1.0).contains(&test_fraction) {
            anyhow::bail!("TEST_FRACTION must be in [0, 1), got {}", test_fraction);
        }

        let prediction_confidence = env::var("PREDICTION_CONFIDENCE")
            .unwrap_or_else(|_| "0.08".to_string())
            .parse::<f64>()
            .context("Failed to parse PREDICTION_CONFIDENCE")?;

        let data_path = env::var("DATA_PATH")
            .unwrap_or_else(|_| "data/data.csv".to_string())
            .into();
        let model_path = env::var("MODEL_PATH")
            .unwrap_or_else(|_| "models/stock_model.json".to_string())
            .into();

        Ok(Self {
            test_fraction,
            prediction_confidence,
            data_path,
            model_path,
        })
    }

    /// Trainer parameters derived from this config. The seed stays fixed
    /// at 0 so repeated runs over the same data reproduce the same model.
    pub fn trainer_params(&self) -> TrainerParams {
        TrainerParams {
            test_fraction: self.test_fraction,
            ..TrainerParams::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        // Env-free construction path: defaults mirror from_env's fallbacks.
        let config = Config {
            test_fraction: 0.2,
            prediction_confidence: 0.08,
            data_path: PathBuf::from("data/data.csv"),
            model_path: PathBuf::from("models/stock_model.json"),
        };

        let params = config.trainer_params();
        assert_eq!(params.seed, 0);
        assert_eq!(params.test_fraction, 0.2);
    }
}
