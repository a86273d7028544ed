use serde::{Deserialize, Serialize};

/// One labeled training example: a free-form company name and the ticker
/// symbol it should resolve to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    #[serde(alias = "StockName")]
    pub stock_name: String,
    #[serde(alias = "Ticker", default)]
    pub ticker: String,
}

impl StockRecord {
    pub fn new(stock_name: impl Into<String>, ticker: impl Into<String>) -> Self {
        Self {
            stock_name: stock_name.into(),
            ticker: ticker.into(),
        }
    }

    /// Unlabeled record for batch prediction inputs, where only the name
    /// column is consulted.
    pub fn unlabeled(stock_name: impl Into<String>) -> Self {
        Self::new(stock_name, "")
    }
}

/// Prediction output for a single input name.
///
/// `scores` holds one probability per known ticker, in label-encoder order,
/// normalized via softmax so they sum to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockPrediction {
    pub stock_name: String,
    pub predicted_ticker: String,
    pub scores: Vec<f64>,
}

impl StockPrediction {
    /// Best score found across all labels, 0.0 when there are none.
    pub fn max_score(&self) -> f64 {
        self.scores.iter().cloned().fold(0.0, f64::max)
    }

    /// True when the input name was empty or whitespace.
    ///
    /// An empty name featurizes to an all-zero vector, so the prediction
    /// degenerates to the label with the highest bias. Callers that want
    /// the stricter "no prediction for empty input" contract should guard
    /// on this instead of expecting a null result.
    pub fn is_empty_input(&self) -> bool {
        self.stock_name.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_score_empty_is_zero() {
        let prediction = StockPrediction {
            stock_name: "Apple".to_string(),
            predicted_ticker: String::new(),
            scores: vec![],
        };
        assert_eq!(prediction.max_score(), 0.0);
    }

    #[test]
    fn test_max_score_picks_largest() {
        let prediction = StockPrediction {
            stock_name: "Apple".to_string(),
            predicted_ticker: "AAPL".to_string(),
            scores: vec![0.2, 0.7, 0.1],
        };
        assert_eq!(prediction.max_score(), 0.7);
    }

    #[test]
    fn test_empty_input_detection() {
        let prediction = StockPrediction {
            stock_name: "   ".to_string(),
            predicted_ticker: "AAPL".to_string(),
            scores: vec![1.0],
        };
        assert!(prediction.is_empty_input());
    }
}
