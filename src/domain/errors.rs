use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while fitting the classifier.
#[derive(Debug, Error)]
pub enum TrainingError {
    #[error("Training set is empty")]
    EmptyTrainingSet,

    #[error("Need at least 2 distinct tickers to train, found {found}")]
    InsufficientLabels { found: usize },

    #[error("Feature/label length mismatch: {features} features vs {labels} labels")]
    LengthMismatch { features: usize, labels: usize },
}

/// Errors related to label <-> id encoding consistency.
///
/// Outside of fit-time use these indicate a bug, not bad input.
#[derive(Debug, Error)]
pub enum LabelError {
    #[error("Ticker '{ticker}' was not seen when the label encoder was fitted")]
    UnknownLabel { ticker: String },

    #[error("Label index {index} out of range for {num_labels} labels")]
    InvalidLabelIndex { index: usize, num_labels: usize },
}

/// Errors related to persisting and loading the model artifact.
#[derive(Debug, Error)]
pub enum ModelStoreError {
    #[error("Model not found at {path:?}")]
    NotFound { path: PathBuf },

    #[error("Model at {path:?} is corrupt: {reason}")]
    Corrupt { path: PathBuf, reason: String },

    #[error("Model I/O failed at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Umbrella error surfaced by the predictor service entry points.
#[derive(Debug, Error)]
pub enum PredictorError {
    #[error(transparent)]
    Training(#[from] TrainingError),

    #[error(transparent)]
    Label(#[from] LabelError),

    #[error(transparent)]
    Store(#[from] ModelStoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_training_error_formatting() {
        let err = TrainingError::InsufficientLabels { found: 1 };
        assert!(err.to_string().contains("at least 2"));
        assert!(err.to_string().contains('1'));
    }

    #[test]
    fn test_label_error_formatting() {
        let err = LabelError::InvalidLabelIndex {
            index: 7,
            num_labels: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains('7'));
        assert!(msg.contains('3'));
    }

    #[test]
    fn test_store_error_carries_path() {
        let err = ModelStoreError::NotFound {
            path: PathBuf::from("models/missing.json"),
        };
        assert!(err.to_string().contains("missing.json"));
    }
}
