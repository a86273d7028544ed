//! Multiclass linear model: one weight row per ticker label.

use serde::{Deserialize, Serialize};

/// Trained classifier weights.
///
/// One row per label, each of length `num_features + 1` with the bias in
/// the last slot. Immutable once training completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierModel {
    weights: Vec<Vec<f64>>,
    num_features: usize,
}

impl ClassifierModel {
    pub fn new(weights: Vec<Vec<f64>>, num_features: usize) -> Self {
        debug_assert!(weights.iter().all(|row| row.len() == num_features + 1));
        Self {
            weights,
            num_features,
        }
    }

    pub fn zeros(num_features: usize, num_labels: usize) -> Self {
        Self {
            weights: vec![vec![0.0; num_features + 1]; num_labels],
            num_features,
        }
    }

    pub fn num_labels(&self) -> usize {
        self.weights.len()
    }

    pub fn num_features(&self) -> usize {
        self.num_features
    }

    /// Raw per-label scores: dot product with the feature vector plus the
    /// label's bias term. An all-zero input degenerates to the biases.
    pub fn score(&self, features: &[f64]) -> Vec<f64> {
        self.weights
            .iter()
            .map(|row| {
                let dot: f64 = row
                    .iter()
                    .zip(features.iter())
                    .map(|(w, x)| w * x)
                    .sum();
                dot + row[self.num_features]
            })
            .collect()
    }
}

/// Numerically stable softmax over raw label scores.
pub fn softmax(scores: &[f64]) -> Vec<f64> {
    if scores.is_empty() {
        return Vec::new();
    }
    let max = scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_includes_bias() {
        let model = ClassifierModel::new(vec![vec![1.0, 0.0, 0.5], vec![0.0, 1.0, -0.5]], 2);

        let scores = model.score(&[2.0, 3.0]);
        assert_eq!(scores, vec![2.5, 2.5]);
    }

    #[test]
    fn test_zero_input_scores_biases() {
        let model = ClassifierModel::new(vec![vec![1.0, 0.3], vec![-1.0, 0.7]], 1);

        let scores = model.score(&[0.0]);
        assert_eq!(scores, vec![0.3, 0.7]);
    }

    #[test]
    fn test_softmax_sums_to_one() {
        let probs = softmax(&[1.0, 2.0, 3.0]);
        let sum: f64 = probs.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
        assert!(probs[2] > probs[1] && probs[1] > probs[0]);
    }

    #[test]
    fn test_softmax_uniform_for_equal_scores() {
        let probs = softmax(&[0.0, 0.0]);
        assert!((probs[0] - 0.5).abs() < 1e-12);
        assert!((probs[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_softmax_empty() {
        assert!(softmax(&[]).is_empty());
    }
}
