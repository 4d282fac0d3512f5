//! Cross-validation and classification metrics for tabular data.
//!
//! The library half of `rusty-folds`: loading a table, splitting off the
//! label column, fitting classifiers fold by fold and scoring them. The
//! desktop viewer and the `exercise` binary are thin layers on top.

pub mod config;
pub mod data;
pub mod error;
pub mod estimator;
pub mod exercise;
pub mod metrics;
pub mod model_selection;

pub use config::ExperimentConfig;
pub use data::model::{CellValue, Dataset, Table};
pub use error::{ConfigError, CvError, DataError, FitError, MetricError};
pub use estimator::{Classifier, DecisionTreeClassifier, DummyClassifier};
pub use metrics::{make_scorer, Metric, PosLabel, Scorer};
pub use model_selection::{
    cross_val_score, cross_validate, CvResults, CvStrategy, ErrorScore, KFold, ScoreSummary,
    StratifiedKFold,
};
