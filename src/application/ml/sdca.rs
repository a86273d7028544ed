//! Multinomial classifier training via stochastic dual coordinate ascent.
//!
//! Each label is fitted as an independent one-vs-rest L2-regularized
//! logistic problem. SDCA keeps one dual variable per training example and
//! maintains the primal weights incrementally, so every ascent step is a
//! single pass over one example's feature vector. The per-label problems
//! share nothing and are trained in parallel.

use crate::application::ml::evaluator::{self, EvaluationMetrics};
use crate::application::ml::model::ClassifierModel;
use crate::domain::errors::TrainingError;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// Explicit training configuration. The seed is passed in rather than held
/// in process-wide state so concurrent training runs cannot interfere.
#[derive(Debug, Clone, Copy)]
pub struct TrainerParams {
    pub seed: u64,
    pub test_fraction: f64,
    pub l2: f64,
    pub max_epochs: usize,
    pub tolerance: f64,
}

impl Default for TrainerParams {
    fn default() -> Self {
        Self {
            seed: 0,
            test_fraction: 0.2,
            l2: 0.01,
            max_epochs: 1000,
            tolerance: 1e-8,
        }
    }
}

pub struct SdcaTrainer {
    params: TrainerParams,
}

impl SdcaTrainer {
    pub fn new(params: TrainerParams) -> Self {
        Self { params }
    }

    /// Fit one weight row per label and evaluate log-loss on the held-out
    /// partition.
    ///
    /// The split is shuffled with a seeded RNG so identical inputs always
    /// produce identical partitions and identical weights. An example is
    /// held out only if its label keeps at least one example in the
    /// training partition; with one example per label the held-out set is
    /// empty and the reported log-loss is in-sample.
    pub fn train(
        &self,
        features: &[Vec<f64>],
        labels: &[usize],
        num_labels: usize,
    ) -> Result<(ClassifierModel, EvaluationMetrics), TrainingError> {
        if features.is_empty() {
            return Err(TrainingError::EmptyTrainingSet);
        }
        if features.len() != labels.len() {
            return Err(TrainingError::LengthMismatch {
                features: features.len(),
                labels: labels.len(),
            });
        }
        if num_labels < 2 {
            return Err(TrainingError::InsufficientLabels { found: num_labels });
        }
        debug_assert!(labels.iter().all(|&l| l < num_labels));

        let num_features = features[0].len();
        let (train_idx, test_idx) = split_train_test(
            labels,
            num_labels,
            self.params.seed,
            self.params.test_fraction,
        );
        info!(
            "Training on {} examples ({} held out) across {} labels",
            train_idx.len(),
            test_idx.len(),
            num_labels
        );

        // Squared norms include the implicit bias input of 1.0.
        let norms: Vec<f64> = features
            .iter()
            .map(|x| x.iter().map(|v| v * v).sum::<f64>() + 1.0)
            .collect();

        let weights: Vec<Vec<f64>> = (0..num_labels)
            .into_par_iter()
            .map(|label| {
                self.fit_one_vs_rest(features, labels, &norms, &train_idx, label, num_features)
            })
            .collect();
        let model = ClassifierModel::new(weights, num_features);

        let metrics = if test_idx.is_empty() {
            warn!("Held-out partition is empty; reporting in-sample log-loss");
            evaluator::evaluate(&model, features, labels, &train_idx)
        } else {
            evaluator::evaluate(&model, features, labels, &test_idx)
        };
        info!("Log-loss: {:.6}", metrics.log_loss);

        Ok((model, metrics))
    }

    /// Binary SDCA for one label: y = +1 for the label, -1 otherwise.
    ///
    /// Dual variables live in [0, 1]; each ascent step moves alpha toward
    /// its optimality condition `alpha = 1 / (1 + exp(y * score))`, damped
    /// by the logistic smoothness bound. The primal weights are kept in
    /// sync as `w = sum(alpha_i * y_i * x_i) / (l2 * n)`.
    fn fit_one_vs_rest(
        &self,
        features: &[Vec<f64>],
        labels: &[usize],
        norms: &[f64],
        train_idx: &[usize],
        label: usize,
        num_features: usize,
    ) -> Vec<f64> {
        let n = train_idx.len() as f64;
        let scale = self.params.l2 * n;

        let mut weights = vec![0.0; num_features + 1];
        let mut alpha = vec![0.0; train_idx.len()];

        for epoch in 0..self.params.max_epochs {
            let mut max_delta = 0.0_f64;
            for (slot, &i) in train_idx.iter().enumerate() {
                let x = &features[i];
                let y = if labels[i] == label { 1.0 } else { -1.0 };

                let score: f64 = weights
                    .iter()
                    .zip(x.iter())
                    .map(|(w, v)| w * v)
                    .sum::<f64>()
                    + weights[num_features];

                let target = 1.0 / (1.0 + (y * score).exp());
                let damping = (0.25 + norms[i] / scale).max(1.0);
                let updated = (alpha[slot] + (target - alpha[slot]) / damping).clamp(0.0, 1.0);
                let delta = updated - alpha[slot];

                if delta != 0.0 {
                    alpha[slot] = updated;
                    let step = delta * y / scale;
                    for (w, v) in weights.iter_mut().zip(x.iter()) {
                        *w += step * v;
                    }
                    weights[num_features] += step;
                }
                max_delta = max_delta.max(delta.abs());
            }

            if max_delta < self.params.tolerance {
                debug!(
                    "Label {} converged after {} epochs (max dual step {:.3e})",
                    label, epoch, max_delta
                );
                break;
            }
        }

        weights
    }
}

/// Seeded, reproducible train/test partition over example indices.
///
/// Target held-out size is `floor(n * test_fraction)`. A shuffled example
/// only moves to the held-out set while its label still has another example
/// left for training, so no label disappears from the training partition.
fn split_train_test(
    labels: &[usize],
    num_labels: usize,
    seed: u64,
    test_fraction: f64,
) -> (Vec<usize>, Vec<usize>) {
    let n = labels.len();
    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let test_target = (n as f64 * test_fraction.clamp(0.0, 1.0)).floor() as usize;
    let mut available = vec![0_usize; num_labels];
    for &label in labels {
        available[label] += 1;
    }

    let mut train = Vec::with_capacity(n);
    let mut test = Vec::with_capacity(test_target);
    for idx in indices {
        if test.len() < test_target && available[labels[idx]] > 1 {
            available[labels[idx]] -= 1;
            test.push(idx);
        } else {
            train.push(idx);
        }
    }
    (train, test)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_hot(index: usize, dim: usize) -> Vec<f64> {
        let mut v = vec![0.0; dim];
        v[index] = 1.0;
        v
    }

    #[test]
    fn test_empty_training_set_fails() {
        let trainer = SdcaTrainer::new(TrainerParams::default());
        let err = trainer.train(&[], &[], 2).unwrap_err();
        assert!(matches!(err, TrainingError::EmptyTrainingSet));
    }

    #[test]
    fn test_single_label_fails() {
        let trainer = SdcaTrainer::new(TrainerParams::default());
        let err = trainer
            .train(&[vec![1.0], vec![1.0]], &[0, 0], 1)
            .unwrap_err();
        assert!(matches!(
            err,
            TrainingError::InsufficientLabels { found: 1 }
        ));
    }

    #[test]
    fn test_length_mismatch_fails() {
        let trainer = SdcaTrainer::new(TrainerParams::default());
        let err = trainer.train(&[vec![1.0]], &[0, 1], 2).unwrap_err();
        assert!(matches!(err, TrainingError::LengthMismatch { .. }));
    }

    #[test]
    fn test_separable_problem_is_learned() {
        let features: Vec<Vec<f64>> = (0..8).map(|i| one_hot(i % 4, 4)).collect();
        let labels: Vec<usize> = (0..8).map(|i| i % 4).collect();

        let trainer = SdcaTrainer::new(TrainerParams::default());
        let (model, _metrics) = trainer.train(&features, &labels, 4).unwrap();

        for class in 0..4 {
            let scores = model.score(&one_hot(class, 4));
            let best = scores
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
                .map(|(i, _)| i)
                .unwrap();
            assert_eq!(best, class);
        }
    }

    #[test]
    fn test_training_is_deterministic() {
        let features: Vec<Vec<f64>> = (0..10).map(|i| one_hot(i % 3, 3)).collect();
        let labels: Vec<usize> = (0..10).map(|i| i % 3).collect();

        let trainer = SdcaTrainer::new(TrainerParams::default());
        let (model_a, metrics_a) = trainer.train(&features, &labels, 3).unwrap();
        let (model_b, metrics_b) = trainer.train(&features, &labels, 3).unwrap();

        assert_eq!(model_a, model_b);
        assert_eq!(metrics_a.log_loss, metrics_b.log_loss);
    }

    #[test]
    fn test_split_is_reproducible() {
        let labels = vec![0, 1, 0, 1, 0, 1, 0, 1, 0, 1];
        let (train_a, test_a) = split_train_test(&labels, 2, 0, 0.2);
        let (train_b, test_b) = split_train_test(&labels, 2, 0, 0.2);
        assert_eq!(train_a, train_b);
        assert_eq!(test_a, test_b);
        assert_eq!(test_a.len(), 2);
        assert_eq!(train_a.len() + test_a.len(), labels.len());
    }

    #[test]
    fn test_split_keeps_every_label_in_training() {
        // One example per label: nothing is eligible for holdout.
        let labels = vec![0, 1, 2, 3, 4, 5, 6, 7];
        let (train, test) = split_train_test(&labels, 8, 0, 0.2);
        assert!(test.is_empty());
        assert_eq!(train.len(), 8);
    }
}
