use std::collections::BTreeSet;
use std::path::PathBuf;

use rusty_folds::data::model::{CellValue, Table};
use rusty_folds::metrics::{Metric, PosLabel};
use rusty_folds::model_selection::{cross_validate, CvResults};
use rusty_folds::{DummyClassifier, ExperimentConfig};

use crate::color::ColorMap;

/// Which estimator the viewer evaluates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EstimatorKind {
    #[default]
    DecisionTree,
    MostFrequent,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded table (None until user loads a file).
    pub table: Option<Table>,

    /// File the table came from.
    pub source: Option<PathBuf>,

    /// Target column, positive label, folds, metrics, tree settings.
    pub config: ExperimentConfig,

    pub estimator: EstimatorKind,

    /// Scores of the last run.
    pub results: Option<CvResults>,

    /// One colour per metric.
    pub color_map: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            table: None,
            source: None,
            config: ExperimentConfig::default(),
            estimator: EstimatorKind::default(),
            results: None,
            color_map: ColorMap::new(&Metric::ALL),
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded table and pick a target column and positive label.
    pub fn set_table(&mut self, table: Table, source: Option<PathBuf>) {
        if !table.column_names.contains(&self.config.target) {
            if let Some(last) = table.column_names.last() {
                self.config.target = last.clone();
            }
        }
        self.table = Some(table);
        self.source = source;
        self.ensure_pos_label();

        self.results = None;
        self.status_message = None;
    }

    /// Unique values of the current target column.
    pub fn target_values(&self) -> BTreeSet<CellValue> {
        self.table
            .as_ref()
            .and_then(|t| t.unique_values.get(&self.config.target))
            .cloned()
            .unwrap_or_default()
    }

    /// Change the target column; results of the old target are dropped.
    pub fn set_target(&mut self, column: String) {
        self.config.target = column;
        self.ensure_pos_label();
        self.results = None;
    }

    /// Keep the positive label if the target has it, else take its first value.
    fn ensure_pos_label(&mut self) {
        let values = self.target_values();
        let current = self.config.pos_label.0.clone();
        if !values.iter().any(|v| v.to_string() == current) {
            if let Some(first) = values.iter().next() {
                self.config.pos_label = PosLabel(first.to_string());
            }
        }
    }

    pub fn toggle_metric(&mut self, metric: Metric) {
        if let Some(pos) = self.config.metrics.iter().position(|&m| m == metric) {
            self.config.metrics.remove(pos);
        } else {
            self.config.metrics.push(metric);
            self.config.metrics.sort();
        }
    }

    /// Cross-validate the chosen estimator with the current settings.
    pub fn run_evaluation(&mut self) {
        let Some(table) = &self.table else {
            self.status_message = Some("Open a file first".to_string());
            return;
        };

        let outcome = self.config.validate().map_err(anyhow::Error::from).and_then(|()| {
            let data = table.split_target(&self.config.target)?;
            let cv = self.config.cv();
            let scorers = self.config.scorers();
            let error_score = self.config.error_score();
            let results = match self.estimator {
                EstimatorKind::DecisionTree => cross_validate(
                    &self.config.tree(),
                    &data,
                    &cv,
                    &scorers,
                    error_score,
                    self.config.return_train_score,
                ),
                EstimatorKind::MostFrequent => cross_validate(
                    &DummyClassifier::new(),
                    &data,
                    &cv,
                    &scorers,
                    error_score,
                    self.config.return_train_score,
                ),
            }?;
            Ok(results)
        });

        match outcome {
            Ok(results) => {
                log::info!(
                    "Evaluated {} splits: {:?}",
                    results.n_splits(),
                    results.test_scores.keys().collect::<Vec<_>>()
                );
                self.results = Some(results);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Evaluation failed: {e:#}");
                self.results = None;
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
