use std::path::PathBuf;

use thiserror::Error;

/// Render labels the way the exercise prints them: `['a', 'b']`.
pub(crate) fn label_list(labels: &[String]) -> String {
    let quoted: Vec<String> = labels.iter().map(|l| format!("'{l}'")).collect();
    format!("[{}]", quoted.join(", "))
}

/// Errors raised while turning a loaded table into a dataset.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("column '{name}' not found; available columns: {available:?}")]
    MissingColumn { name: String, available: Vec<String> },
    #[error("feature column '{column}', row {row}: '{value}' is not numeric")]
    NonNumericFeature {
        column: String,
        row: usize,
        value: String,
    },
    #[error("column '{column}', row {row}: missing value")]
    MissingValue { column: String, row: usize },
    #[error("dataset has no feature columns besides '{target}'")]
    NoFeatures { target: String },
    #[error("row index {index} out of range for {len} rows")]
    RowOutOfRange { index: usize, len: usize },
    #[error("features have {rows} rows but target has {targets} labels")]
    LengthMismatch { rows: usize, targets: usize },
}

/// Errors raised by the scoring functions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricError {
    #[error("found input variables with inconsistent numbers of samples: [{y_true}, {y_pred}]")]
    LengthMismatch { y_true: usize, y_pred: usize },
    #[error("cannot compute a score on zero samples")]
    Empty,
    #[error("pos_label={pos_label} is not a valid label. It should be one of {}", label_list(.labels))]
    InvalidPosLabel {
        pos_label: String,
        labels: Vec<String>,
    },
    #[error(
        "target is multiclass (labels {}) but average='binary'; choose a per-class metric instead",
        label_list(.labels)
    )]
    MulticlassBinary { labels: Vec<String> },
    #[error("'{0}' is not a valid scoring value; use one of accuracy, balanced_accuracy, precision, recall, f1")]
    UnknownMetric(String),
}

/// Errors raised while fitting or querying an estimator.
#[derive(Debug, Error)]
pub enum FitError {
    #[error("estimator is not fitted yet; call fit before predict")]
    NotFitted,
    #[error("cannot fit on an empty training set")]
    EmptyTrainingSet,
    #[error("estimator was fitted with {expected} features but got {got}")]
    FeatureMismatch { expected: usize, got: usize },
    #[error(transparent)]
    Linfa(#[from] linfa::Error),
}

/// Errors raised by the cross-validation driver and splitters.
#[derive(Debug, Error)]
pub enum CvError {
    #[error("k-fold cross-validation requires at least one train/test split by setting n_splits=2 or more, got n_splits={0}")]
    TooFewSplits(usize),
    #[error("cannot have number of splits n_splits={n_splits} greater than the number of samples: n_samples={n_samples}")]
    TooManySplits { n_splits: usize, n_samples: usize },
    #[error("n_splits={0} cannot be greater than the number of members in each class")]
    ClassTooSmall(usize),
    #[error("no scorers given to cross_validate")]
    NoScorers,
    #[error("scorer name '{0}' is used more than once")]
    DuplicateScorer(String),
    #[error("{source}")]
    Fit { split: usize, source: FitError },
    #[error("{source}")]
    Score {
        split: usize,
        scorer: String,
        source: MetricError,
    },
    #[error(transparent)]
    Data(#[from] DataError),
}

/// Errors raised while reading an experiment configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_pos_label_message_lists_labels() {
        let err = MetricError::InvalidPosLabel {
            pos_label: "1".into(),
            labels: vec!["donated".into(), "not donated".into()],
        };
        assert_eq!(
            err.to_string(),
            "pos_label=1 is not a valid label. It should be one of ['donated', 'not donated']"
        );
    }

    #[test]
    fn score_error_displays_underlying_metric_error() {
        let err = CvError::Score {
            split: 3,
            scorer: "precision".into(),
            source: MetricError::Empty,
        };
        assert_eq!(err.to_string(), MetricError::Empty.to_string());
    }
}
