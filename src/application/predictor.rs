//! End-to-end ticker prediction service: train once, persist the artifact,
//! then serve single and batch lookups against the loaded model.

use crate::application::ml::evaluator::EvaluationMetrics;
use crate::application::ml::featurizer::TextFeaturizer;
use crate::application::ml::label_encoder::LabelEncoder;
use crate::application::ml::model::softmax;
use crate::application::ml::sdca::{SdcaTrainer, TrainerParams};
use crate::domain::errors::{PredictorError, TrainingError};
use crate::domain::types::{StockPrediction, StockRecord};
use crate::infrastructure::model_store::{ModelArtifact, ModelStore};
use rayon::prelude::*;
use std::path::Path;
use tracing::info;

pub struct TickerPredictor {
    featurizer: TextFeaturizer,
    params: TrainerParams,
}

impl Default for TickerPredictor {
    fn default() -> Self {
        Self::new(TrainerParams::default())
    }
}

impl TickerPredictor {
    pub fn new(params: TrainerParams) -> Self {
        Self {
            featurizer: TextFeaturizer,
            params,
        }
    }

    /// Fit the featurizer, label encoder and classifier over `records`,
    /// evaluate on the held-out split, and persist the artifact.
    ///
    /// Nothing is written to `model_path` unless the whole run succeeds.
    pub fn train(
        &self,
        records: &[StockRecord],
        model_path: &Path,
    ) -> Result<EvaluationMetrics, PredictorError> {
        info!("Starting model training");
        if records.is_empty() {
            return Err(TrainingError::EmptyTrainingSet.into());
        }

        let names: Vec<String> = records.iter().map(|r| r.stock_name.clone()).collect();
        let tickers: Vec<String> = records.iter().map(|r| r.ticker.clone()).collect();

        let vocabulary = self.featurizer.fit(&names);
        let labels = LabelEncoder::fit(&tickers);

        let features: Vec<Vec<f64>> = names
            .iter()
            .map(|name| self.featurizer.transform(name, &vocabulary))
            .collect();
        let label_ids = tickers
            .iter()
            .map(|ticker| labels.encode(ticker))
            .collect::<Result<Vec<_>, _>>()?;

        info!("Fitting the model");
        let trainer = SdcaTrainer::new(self.params);
        let (classifier, metrics) = trainer.train(&features, &label_ids, labels.len())?;

        info!("Saving the model");
        let artifact = ModelArtifact::new(vocabulary, labels, classifier);
        ModelStore::save(&artifact, model_path)?;

        info!("Model training completed successfully");
        Ok(metrics)
    }

    /// Predict the most probable ticker for one name.
    ///
    /// Always returns a full [`StockPrediction`]; an empty name scores only
    /// the per-label biases (see [`StockPrediction::is_empty_input`]).
    pub fn predict(
        &self,
        stock_name: &str,
        model_path: &Path,
    ) -> Result<StockPrediction, PredictorError> {
        let artifact = ModelStore::load(model_path)?;
        let prediction = self.predict_with_artifact(stock_name, &artifact)?;
        info!(
            "Prediction completed: {} => {}",
            stock_name, prediction.predicted_ticker
        );
        Ok(prediction)
    }

    /// Predict tickers for many names, loading the artifact once.
    ///
    /// Order-preserving: one output per input record, same order. Only the
    /// `stock_name` field of each record is consulted. A failure on any
    /// item fails the whole call.
    pub fn predict_batch(
        &self,
        records: &[StockRecord],
        model_path: &Path,
    ) -> Result<Vec<StockPrediction>, PredictorError> {
        let artifact = ModelStore::load(model_path)?;

        let predictions = records
            .par_iter()
            .map(|record| self.predict_with_artifact(&record.stock_name, &artifact))
            .collect::<Result<Vec<_>, _>>()?;

        info!("Batch prediction completed for {} inputs", predictions.len());
        Ok(predictions)
    }

    /// Score one name against an already-loaded artifact.
    pub fn predict_with_artifact(
        &self,
        stock_name: &str,
        artifact: &ModelArtifact,
    ) -> Result<StockPrediction, PredictorError> {
        let features = self.featurizer.transform(stock_name, &artifact.vocabulary);
        let scores = softmax(&artifact.classifier.score(&features));

        // First strictly-greater wins, so ties resolve to the lowest id.
        let mut best = 0;
        for (id, &score) in scores.iter().enumerate() {
            if score > scores[best] {
                best = id;
            }
        }
        let predicted_ticker = artifact.labels.decode(best)?.to_string();

        Ok(StockPrediction {
            stock_name: stock_name.to_string(),
            predicted_ticker,
            scores,
        })
    }
}
