//! Classification metrics and scorers.
//!
//! Binary metrics (precision, recall, F1) need to know which label is the
//! positive class. The default positive label is `"1"`, which only matches
//! targets encoded as `0/1`; text labels such as `"donated"` must be named
//! explicitly through [`make_scorer`].

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MetricError;

/// Positive label used when none is given.
pub const DEFAULT_POS_LABEL: &str = "1";

// ---------------------------------------------------------------------------
// Positive label
// ---------------------------------------------------------------------------

/// The class value treated as "positive" by binary metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PosLabel(pub String);

impl Default for PosLabel {
    fn default() -> Self {
        PosLabel(DEFAULT_POS_LABEL.to_string())
    }
}

impl From<&str> for PosLabel {
    fn from(s: &str) -> Self {
        PosLabel(s.to_string())
    }
}

impl fmt::Display for PosLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Metric names
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Accuracy,
    BalancedAccuracy,
    Precision,
    Recall,
    F1,
}

impl Metric {
    pub const ALL: [Metric; 5] = [
        Metric::Accuracy,
        Metric::BalancedAccuracy,
        Metric::Precision,
        Metric::Recall,
        Metric::F1,
    ];

    /// Scoring name as accepted by [`Scorer::from_name`].
    pub fn name(self) -> &'static str {
        match self {
            Metric::Accuracy => "accuracy",
            Metric::BalancedAccuracy => "balanced_accuracy",
            Metric::Precision => "precision",
            Metric::Recall => "recall",
            Metric::F1 => "f1",
        }
    }

    /// Whether the metric depends on a positive label.
    pub fn is_binary(self) -> bool {
        matches!(self, Metric::Precision | Metric::Recall | Metric::F1)
    }

    pub fn compute(
        self,
        y_true: &[String],
        y_pred: &[String],
        pos_label: &str,
    ) -> Result<f64, MetricError> {
        match self {
            Metric::Accuracy => accuracy_score(y_true, y_pred),
            Metric::BalancedAccuracy => balanced_accuracy_score(y_true, y_pred),
            Metric::Precision => precision_score(y_true, y_pred, pos_label),
            Metric::Recall => recall_score(y_true, y_pred, pos_label),
            Metric::F1 => f1_score(y_true, y_pred, pos_label),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = MetricError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| MetricError::UnknownMetric(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Scorer
// ---------------------------------------------------------------------------

/// A named metric with its positive label, applied to predictions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scorer {
    pub name: String,
    pub metric: Metric,
    pub pos_label: PosLabel,
}

impl Scorer {
    /// Scorer for a scoring name such as `"balanced_accuracy"`. Binary
    /// metrics get the default positive label.
    pub fn from_name(name: &str) -> Result<Self, MetricError> {
        let metric: Metric = name.parse()?;
        Ok(Scorer {
            name: metric.name().to_string(),
            metric,
            pos_label: PosLabel::default(),
        })
    }

    /// Rename the scorer; results are keyed by this name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn score(&self, y_true: &[String], y_pred: &[String]) -> Result<f64, MetricError> {
        self.metric.compute(y_true, y_pred, &self.pos_label.0)
    }
}

/// Build a scorer from a metric and an explicit positive label.
pub fn make_scorer(metric: Metric, pos_label: impl Into<PosLabel>) -> Scorer {
    Scorer {
        name: metric.name().to_string(),
        metric,
        pos_label: pos_label.into(),
    }
}

// ---------------------------------------------------------------------------
// Score functions
// ---------------------------------------------------------------------------

fn check_lengths(y_true: &[String], y_pred: &[String]) -> Result<(), MetricError> {
    if y_true.len() != y_pred.len() {
        return Err(MetricError::LengthMismatch {
            y_true: y_true.len(),
            y_pred: y_pred.len(),
        });
    }
    if y_true.is_empty() {
        return Err(MetricError::Empty);
    }
    Ok(())
}

/// Fraction of predictions equal to the true label.
pub fn accuracy_score(y_true: &[String], y_pred: &[String]) -> Result<f64, MetricError> {
    check_lengths(y_true, y_pred)?;
    let correct = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
    Ok(correct as f64 / y_true.len() as f64)
}

/// Square confusion matrix over the union of true and predicted labels.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfusionMatrix {
    /// Sorted labels; row = true label, column = predicted label.
    pub labels: Vec<String>,
    pub counts: Vec<Vec<usize>>,
}

pub fn confusion_matrix(
    y_true: &[String],
    y_pred: &[String],
) -> Result<ConfusionMatrix, MetricError> {
    check_lengths(y_true, y_pred)?;
    let labels: Vec<String> = present_labels(y_true, y_pred).into_iter().collect();
    let index = |l: &String| labels.binary_search(l).unwrap_or(0);
    let mut counts = vec![vec![0usize; labels.len()]; labels.len()];
    for (t, p) in y_true.iter().zip(y_pred) {
        counts[index(t)][index(p)] += 1;
    }
    Ok(ConfusionMatrix { labels, counts })
}

/// Mean of the per-class recall, over classes present in `y_true`.
pub fn balanced_accuracy_score(y_true: &[String], y_pred: &[String]) -> Result<f64, MetricError> {
    let cm = confusion_matrix(y_true, y_pred)?;
    let recalls: Vec<f64> = cm
        .counts
        .iter()
        .enumerate()
        .filter_map(|(i, row)| {
            let support: usize = row.iter().sum();
            if support == 0 {
                log::warn!(
                    "y_pred contains class '{}' absent from y_true; ignored by balanced accuracy",
                    cm.labels[i]
                );
                None
            } else {
                Some(row[i] as f64 / support as f64)
            }
        })
        .collect();
    Ok(recalls.iter().sum::<f64>() / recalls.len() as f64)
}

/// True/false positive/negative counts for one positive label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BinaryCounts {
    pub tp: usize,
    pub fp: usize,
    pub fn_: usize,
    pub tn: usize,
}

/// Count outcomes for `pos_label`, rejecting targets that are not binary or
/// a positive label that is not one of the labels present.
pub fn binary_counts(
    y_true: &[String],
    y_pred: &[String],
    pos_label: &str,
) -> Result<BinaryCounts, MetricError> {
    check_lengths(y_true, y_pred)?;
    let present = present_labels(y_true, y_pred);
    if present.len() > 2 {
        return Err(MetricError::MulticlassBinary {
            labels: present.into_iter().collect(),
        });
    }
    if present.len() == 2 && !present.contains(pos_label) {
        return Err(MetricError::InvalidPosLabel {
            pos_label: pos_label.to_string(),
            labels: present.into_iter().collect(),
        });
    }

    let mut counts = BinaryCounts::default();
    for (t, p) in y_true.iter().zip(y_pred) {
        match (t == pos_label, p == pos_label) {
            (true, true) => counts.tp += 1,
            (false, true) => counts.fp += 1,
            (true, false) => counts.fn_ += 1,
            (false, false) => counts.tn += 1,
        }
    }
    Ok(counts)
}

fn ratio_or_zero(num: usize, den: usize, what: &str) -> f64 {
    if den == 0 {
        log::warn!("{what} is ill-defined and being set to 0.0 (no samples in the denominator)");
        0.0
    } else {
        num as f64 / den as f64
    }
}

/// `tp / (tp + fp)` for the positive label.
pub fn precision_score(
    y_true: &[String],
    y_pred: &[String],
    pos_label: &str,
) -> Result<f64, MetricError> {
    let c = binary_counts(y_true, y_pred, pos_label)?;
    Ok(ratio_or_zero(c.tp, c.tp + c.fp, "precision"))
}

/// `tp / (tp + fn)` for the positive label.
pub fn recall_score(
    y_true: &[String],
    y_pred: &[String],
    pos_label: &str,
) -> Result<f64, MetricError> {
    let c = binary_counts(y_true, y_pred, pos_label)?;
    Ok(ratio_or_zero(c.tp, c.tp + c.fn_, "recall"))
}

/// Harmonic mean of precision and recall.
pub fn f1_score(y_true: &[String], y_pred: &[String], pos_label: &str) -> Result<f64, MetricError> {
    let c = binary_counts(y_true, y_pred, pos_label)?;
    Ok(ratio_or_zero(2 * c.tp, 2 * c.tp + c.fp + c.fn_, "f1"))
}

fn present_labels(y_true: &[String], y_pred: &[String]) -> BTreeSet<String> {
    y_true.iter().chain(y_pred).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    const D: &str = "donated";
    const N: &str = "not donated";

    #[test]
    fn accuracy_counts_matches() {
        let score = accuracy_score(&v(&[D, N, N, N]), &v(&[D, N, D, N])).unwrap();
        assert!((score - 0.75).abs() < 1e-12);
    }

    #[test]
    fn balanced_accuracy_weights_classes_equally() {
        // recall(donated) = 1/2, recall(not donated) = 3/3
        let y_true = v(&[D, D, N, N, N]);
        let y_pred = v(&[D, N, N, N, N]);
        let score = balanced_accuracy_score(&y_true, &y_pred).unwrap();
        assert!((score - 0.75).abs() < 1e-12);
    }

    #[test]
    fn balanced_accuracy_of_constant_prediction_is_half() {
        let y_true = v(&[D, N, N, N]);
        let y_pred = v(&[N, N, N, N]);
        assert!((balanced_accuracy_score(&y_true, &y_pred).unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn precision_without_pos_label_rejects_text_classes() {
        let scorer = Scorer::from_name("precision").unwrap();
        let err = scorer.score(&v(&[D, N]), &v(&[D, D])).unwrap_err();
        assert_eq!(
            err,
            MetricError::InvalidPosLabel {
                pos_label: "1".into(),
                labels: v(&[D, N]),
            }
        );
    }

    #[test]
    fn precision_with_explicit_pos_label() {
        let scorer = make_scorer(Metric::Precision, D);
        let score = scorer
            .score(&v(&[D, N, D, N]), &v(&[D, D, N, N]))
            .unwrap();
        assert!((score - 0.5).abs() < 1e-12);
        assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn default_pos_label_works_for_zero_one_targets() {
        let score = precision_score(&v(&["1", "0", "1"]), &v(&["1", "1", "1"]), DEFAULT_POS_LABEL)
            .unwrap();
        assert!((score - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn zero_division_yields_zero() {
        let score = precision_score(&v(&[D, N]), &v(&[N, N]), D).unwrap();
        assert_eq!(score, 0.0);
        let f1 = f1_score(&v(&[N, N]), &v(&[N, N]), D).unwrap();
        assert_eq!(f1, 0.0);
    }

    #[test]
    fn recall_and_f1() {
        let y_true = v(&[D, D, D, N]);
        let y_pred = v(&[D, D, N, D]);
        let r = recall_score(&y_true, &y_pred, D).unwrap();
        let f = f1_score(&y_true, &y_pred, D).unwrap();
        assert!((r - 2.0 / 3.0).abs() < 1e-12);
        assert!((f - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn multiclass_targets_are_rejected_by_binary_metrics() {
        let err = precision_score(&v(&["a", "b", "c"]), &v(&["a", "b", "c"]), "a").unwrap_err();
        assert!(matches!(err, MetricError::MulticlassBinary { .. }));
    }

    #[test]
    fn length_mismatch_is_an_error() {
        let err = accuracy_score(&v(&[D]), &v(&[D, N])).unwrap_err();
        assert_eq!(err, MetricError::LengthMismatch { y_true: 1, y_pred: 2 });
    }

    #[test]
    fn metric_names_parse() {
        assert_eq!("balanced_accuracy".parse::<Metric>().unwrap(), Metric::BalancedAccuracy);
        assert!("roc_auc".parse::<Metric>().is_err());
    }

    #[test]
    fn confusion_matrix_rows_are_true_labels() {
        let cm = confusion_matrix(&v(&[D, N, N]), &v(&[N, N, D])).unwrap();
        assert_eq!(cm.labels, v(&[D, N]));
        assert_eq!(cm.counts, vec![vec![0, 1], vec![1, 1]]);
    }
}
