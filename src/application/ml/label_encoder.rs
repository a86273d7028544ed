//! Bidirectional ticker <-> dense label id mapping.

use crate::domain::errors::LabelError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maps tickers to dense ids `0..K` in first-seen order over the training
/// set. The ordering only fixes the weight-vector column layout; it is not
/// externally observable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    tickers: Vec<String>,
    ids: HashMap<String, usize>,
}

impl LabelEncoder {
    pub fn fit(tickers: &[String]) -> Self {
        let mut encoder = Self::default();
        for ticker in tickers {
            if !encoder.ids.contains_key(ticker) {
                encoder.ids.insert(ticker.clone(), encoder.tickers.len());
                encoder.tickers.push(ticker.clone());
            }
        }
        encoder
    }

    /// Number of distinct labels.
    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }

    pub fn encode(&self, ticker: &str) -> Result<usize, LabelError> {
        self.ids
            .get(ticker)
            .copied()
            .ok_or_else(|| LabelError::UnknownLabel {
                ticker: ticker.to_string(),
            })
    }

    pub fn decode(&self, id: usize) -> Result<&str, LabelError> {
        self.tickers
            .get(id)
            .map(String::as_str)
            .ok_or(LabelError::InvalidLabelIndex {
                index: id,
                num_labels: self.tickers.len(),
            })
    }
}
