//! Bag-of-tokens text featurization for company names.
//!
//! Names are lowercased and trimmed, then broken into whitespace word
//! tokens plus character bigrams and trigrams over the whole normalized
//! string. The character n-grams are what make near-miss inputs like
//! "Appl" or "Microsft" land close to their training neighbors.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

const CHAR_NGRAM_SIZES: [usize; 2] = [2, 3];

/// Token -> column index mapping, fitted once over the training names and
/// immutable afterwards. Unknown tokens at transform time are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    index: HashMap<String, usize>,
}

impl Vocabulary {
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn column(&self, token: &str) -> Option<usize> {
        self.index.get(token).copied()
    }
}

/// Fits a [`Vocabulary`] and turns names into fixed-length term-frequency
/// vectors (L2-normalized).
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFeaturizer;

impl TextFeaturizer {
    /// Build the vocabulary from all training names, assigning columns in
    /// first-seen order so repeated fits over the same data are identical.
    pub fn fit(&self, names: &[String]) -> Vocabulary {
        let mut index = HashMap::new();
        for name in names {
            for token in tokenize(name) {
                let next = index.len();
                index.entry(token).or_insert(next);
            }
        }
        debug!("Fitted vocabulary with {} tokens", index.len());
        Vocabulary { index }
    }

    /// Term-frequency vector for `name` against a fitted vocabulary.
    ///
    /// The vector is L2-normalized so that score magnitudes are comparable
    /// across short and long names. An empty or fully-unknown input yields
    /// an all-zero vector, never an error.
    pub fn transform(&self, name: &str, vocab: &Vocabulary) -> Vec<f64> {
        let mut vector = vec![0.0; vocab.len()];
        for token in tokenize(name) {
            if let Some(column) = vocab.column(&token) {
                vector[column] += 1.0;
            }
        }

        let norm = vector.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

fn tokenize(name: &str) -> Vec<String> {
    let normalized = normalize(name);
    if normalized.is_empty() {
        return Vec::new();
    }

    let mut tokens: Vec<String> = normalized.split_whitespace().map(str::to_string).collect();

    let chars: Vec<char> = normalized.chars().collect();
    for size in CHAR_NGRAM_SIZES {
        if chars.len() < size {
            continue;
        }
        for window in chars.windows(size) {
            tokens.push(window.iter().collect());
        }
    }

    tokens
}
