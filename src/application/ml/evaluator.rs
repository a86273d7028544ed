//! Held-out evaluation: multiclass log-loss.

use crate::application::ml::model::{softmax, ClassifierModel};
use serde::{Deserialize, Serialize};

const PROBABILITY_FLOOR: f64 = 1e-15;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    /// Average negative log-probability assigned to the true label.
    pub log_loss: f64,
    /// Number of examples the metric was computed over.
    pub test_examples: usize,
}

/// Score each selected example, softmax the raw scores, and average the
/// negative log-probability of the true label.
pub fn evaluate(
    model: &ClassifierModel,
    features: &[Vec<f64>],
    labels: &[usize],
    indices: &[usize],
) -> EvaluationMetrics {
    if indices.is_empty() {
        return EvaluationMetrics {
            log_loss: 0.0,
            test_examples: 0,
        };
    }

    let mut total = 0.0;
    for &i in indices {
        let probabilities = softmax(&model.score(&features[i]));
        let p_true = probabilities[labels[i]].max(PROBABILITY_FLOOR);
        total -= p_true.ln();
    }

    EvaluationMetrics {
        log_loss: total / indices.len() as f64,
        test_examples: indices.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_model_has_near_zero_log_loss() {
        // Large margins: softmax probability of the true label ~= 1.
        let model = ClassifierModel::new(
            vec![vec![50.0, -50.0, 0.0], vec![-50.0, 50.0, 0.0]],
            2,
        );
        let features = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let labels = vec![0, 1];

        let metrics = evaluate(&model, &features, &labels, &[0, 1]);
        assert_eq!(metrics.test_examples, 2);
        assert!(metrics.log_loss < 1e-6);
    }

    #[test]
    fn test_uninformative_model_log_loss_is_ln_k() {
        let model = ClassifierModel::zeros(2, 4);
        let features = vec![vec![1.0, 0.0]];
        let labels = vec![2];

        let metrics = evaluate(&model, &features, &labels, &[0]);
        assert!((metrics.log_loss - (4.0_f64).ln()).abs() < 1e-12);
    }

    #[test]
    fn test_empty_selection() {
        let model = ClassifierModel::zeros(2, 2);
        let metrics = evaluate(&model, &[], &[], &[]);
        assert_eq!(metrics.test_examples, 0);
        assert_eq!(metrics.log_loss, 0.0);
    }
}
