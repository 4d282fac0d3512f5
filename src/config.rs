//! Experiment settings, read from an optional JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::estimator::{Criterion, DecisionTreeClassifier};
use crate::metrics::{make_scorer, Metric, PosLabel, Scorer};
use crate::model_selection::{CvStrategy, ErrorScore, StratifiedKFold};

/// Everything needed to evaluate a classifier on a table.
///
/// Missing fields take their defaults, so `{}` is a valid file:
///
/// ```json
/// { "target": "Class", "pos_label": "donated", "n_splits": 10, "shuffle": true, "seed": 42,
///   "error_score": "raise" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Label column.
    pub target: String,
    /// Class treated as positive by precision, recall and F1.
    pub pos_label: PosLabel,
    pub n_splits: usize,
    pub shuffle: bool,
    pub seed: Option<u64>,
    pub metrics: Vec<Metric>,
    /// `"raise"` stops at the first failing split; `"nan"` or a number
    /// replaces failed scores.
    pub error_score: ErrorScore,
    pub return_train_score: bool,
    pub max_depth: Option<usize>,
    pub criterion: Criterion,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            target: "Class".to_string(),
            pos_label: PosLabel::from("donated"),
            n_splits: 10,
            shuffle: false,
            seed: Some(0),
            metrics: vec![Metric::Accuracy, Metric::BalancedAccuracy],
            error_score: ErrorScore::default(),
            return_train_score: false,
            max_depth: None,
            criterion: Criterion::Gini,
        }
    }
}

impl ExperimentConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: ExperimentConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_splits < 2 {
            return Err(ConfigError::Invalid(format!(
                "n_splits must be at least 2, got {}",
                self.n_splits
            )));
        }
        if self.metrics.is_empty() {
            return Err(ConfigError::Invalid("metrics must not be empty".into()));
        }
        for (i, metric) in self.metrics.iter().enumerate() {
            if self.metrics[..i].contains(metric) {
                return Err(ConfigError::Invalid(format!(
                    "metric {metric} is listed more than once"
                )));
            }
        }
        if self.target.is_empty() {
            return Err(ConfigError::Invalid("target column name is empty".into()));
        }
        Ok(())
    }

    pub fn cv(&self) -> CvStrategy {
        if self.shuffle {
            CvStrategy::Stratified(StratifiedKFold::new(self.n_splits).shuffled(self.seed))
        } else {
            CvStrategy::Folds(self.n_splits)
        }
    }

    /// One scorer per metric, all sharing the configured positive label.
    pub fn scorers(&self) -> Vec<Scorer> {
        self.metrics
            .iter()
            .map(|&m| make_scorer(m, self.pos_label.clone()))
            .collect()
    }

    pub fn error_score(&self) -> ErrorScore {
        self.error_score
    }

    pub fn tree(&self) -> DecisionTreeClassifier {
        DecisionTreeClassifier::new()
            .with_max_depth(self.max_depth)
            .with_criterion(self.criterion)
    }
}
