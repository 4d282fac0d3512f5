//! The cross-validation exercise on the blood-transfusion data, step by step.
//!
//! 1. split the `Class` column off the loaded table
//! 2. build a decision tree
//! 3. stratified k-fold accuracy, then balanced accuracy
//! 4. precision with the default positive label (rejected, error kept)
//! 5. precision through `make_scorer` with the configured positive label
//! 6. accuracy and balanced accuracy together through `cross_validate`

use std::collections::BTreeMap;
use std::fmt;

use crate::config::ExperimentConfig;
use crate::data::filter::class_counts;
use crate::data::model::{Dataset, Table};
use crate::error::CvError;
use crate::metrics::{make_scorer, Metric, Scorer};
use crate::model_selection::{
    cross_val_score, cross_validate, CvResults, ErrorScore, ScoreSummary,
};

/// Outcome of every exercise step.
#[derive(Debug, Clone)]
pub struct ExerciseReport {
    pub n_samples: usize,
    pub feature_names: Vec<String>,
    pub class_counts: BTreeMap<String, usize>,
    pub accuracy: Vec<f64>,
    pub balanced_accuracy: Vec<f64>,
    /// Message of the error raised by precision without a positive label,
    /// `None` when the target happens to use the default label.
    pub precision_error: Option<String>,
    pub precision: Vec<f64>,
    pub multi_metric: CvResults,
}

/// Run all steps on a loaded table.
pub fn run(table: &Table, config: &ExperimentConfig) -> anyhow::Result<ExerciseReport> {
    let data = table.split_target(&config.target)?;
    run_on_dataset(&data, config)
}

pub fn run_on_dataset(data: &Dataset, config: &ExperimentConfig) -> anyhow::Result<ExerciseReport> {
    config.validate()?;
    let tree = config.tree();
    let cv = config.cv();

    let accuracy = cross_val_score(
        &tree,
        data,
        &cv,
        &Scorer::from_name("accuracy")?,
        ErrorScore::Raise,
    )?;
    let balanced_accuracy = cross_val_score(
        &tree,
        data,
        &cv,
        &Scorer::from_name("balanced_accuracy")?,
        ErrorScore::Raise,
    )?;

    let precision_error = match cross_val_score(
        &tree,
        data,
        &cv,
        &Scorer::from_name("precision")?,
        ErrorScore::Raise,
    ) {
        Ok(_) => None,
        Err(err @ CvError::Score { .. }) => Some(err.to_string()),
        Err(other) => return Err(other.into()),
    };
    if let Some(msg) = &precision_error {
        log::info!("precision without positive label rejected: {msg}");
    }

    let precision = cross_val_score(
        &tree,
        data,
        &cv,
        &make_scorer(Metric::Precision, config.pos_label.clone()),
        config.error_score(),
    )?;

    let multi_metric = cross_validate(
        &tree,
        data,
        &cv,
        &config.scorers(),
        config.error_score(),
        config.return_train_score,
    )?;

    Ok(ExerciseReport {
        n_samples: data.len(),
        feature_names: data.feature_names.clone(),
        class_counts: class_counts(&data.target),
        accuracy,
        balanced_accuracy,
        precision_error,
        precision,
        multi_metric,
    })
}

fn write_scores(f: &mut fmt::Formatter<'_>, name: &str, scores: &[f64]) -> fmt::Result {
    let rendered: Vec<String> = scores.iter().map(|s| format!("{s:.3}")).collect();
    writeln!(f, "{name}: [{}]", rendered.join(", "))?;
    match ScoreSummary::from_scores(scores) {
        Some(s) => writeln!(f, "  mean {:.3} +/- {:.3}", s.mean, s.std),
        None => writeln!(f, "  no valid scores"),
    }
}

/// Text rendering of a box plot: whiskers, quartiles and median on a 0..1 axis.
pub fn text_box_plot(scores: &[f64], width: usize) -> String {
    if width == 0 {
        return String::new();
    }
    let Some(s) = ScoreSummary::from_scores(scores) else {
        return String::new();
    };
    let col = |v: f64| ((v.clamp(0.0, 1.0)) * (width - 1) as f64).round() as usize;
    let mut line = vec![' '; width];
    for c in line.iter_mut().take(col(s.q1)).skip(col(s.lower_whisker)) {
        *c = '-';
    }
    for c in line.iter_mut().take(col(s.upper_whisker) + 1).skip(col(s.q3)) {
        *c = '-';
    }
    for c in line.iter_mut().take(col(s.q3) + 1).skip(col(s.q1)) {
        *c = '=';
    }
    line[col(s.lower_whisker)] = '|';
    line[col(s.upper_whisker)] = '|';
    line[col(s.median)] = '#';
    for o in s.outliers(scores) {
        line[col(o)] = 'o';
    }
    line.into_iter().collect()
}

impl fmt::Display for ExerciseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} samples, features {:?}, classes {:?}",
            self.n_samples, self.feature_names, self.class_counts
        )?;
        writeln!(f)?;
        write_scores(f, "accuracy", &self.accuracy)?;
        write_scores(f, "balanced_accuracy", &self.balanced_accuracy)?;
        writeln!(f)?;
        match &self.precision_error {
            Some(msg) => writeln!(f, "precision (default pos_label): {msg}")?,
            None => writeln!(f, "precision (default pos_label): accepted")?,
        }
        write_scores(f, "precision (make_scorer)", &self.precision)?;
        writeln!(f)?;
        writeln!(f, "cross_validate, {} splits", self.multi_metric.n_splits())?;
        const WIDTH: usize = 51;
        writeln!(f, "{:>20} 0{}1", "", " ".repeat(WIDTH - 2))?;
        for (name, scores) in &self.multi_metric.test_scores {
            writeln!(f, "{:>20} {}", format!("test_{name}"), text_box_plot(scores, WIDTH))?;
        }
        Ok(())
    }
}
