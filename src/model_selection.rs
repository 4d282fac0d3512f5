//! Fold splitters and the cross-validation driver.
//!
//! ```text
//!   Dataset ──► CvStrategy::split ──► [Split { train, test }; k]
//!                                          │  per split:
//!                                          │    clone estimator, fit(train)
//!                                          │    predict(test), score with every Scorer
//!                                          ▼
//!                                     CvResults { fit_time, score_time, test_<name>, .. }
//! ```

use std::collections::BTreeMap;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::data::filter::{complement_indices, encode_by_first_appearance};
use crate::data::model::Dataset;
use crate::error::{CvError, FitError, MetricError};
use crate::estimator::Classifier;
use crate::metrics::Scorer;

/// Number of folds used when none is given.
pub const DEFAULT_N_SPLITS: usize = 5;

/// Row indices of one train/test split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

fn shuffler(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn check_n_splits(n_splits: usize, n_samples: usize) -> Result<(), CvError> {
    if n_splits < 2 {
        return Err(CvError::TooFewSplits(n_splits));
    }
    if n_splits > n_samples {
        return Err(CvError::TooManySplits {
            n_splits,
            n_samples,
        });
    }
    Ok(())
}

fn splits_from_test_sets(n_samples: usize, tests: Vec<Vec<usize>>) -> Vec<Split> {
    tests
        .into_iter()
        .map(|test| Split {
            train: complement_indices(n_samples, &test),
            test,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// KFold
// ---------------------------------------------------------------------------

/// Consecutive folds; the first `n % k` folds hold one extra sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KFold {
    pub n_splits: usize,
    pub shuffle: bool,
    pub seed: Option<u64>,
}

impl KFold {
    pub fn new(n_splits: usize) -> Self {
        KFold {
            n_splits,
            shuffle: false,
            seed: None,
        }
    }

    pub fn shuffled(mut self, seed: Option<u64>) -> Self {
        self.shuffle = true;
        self.seed = seed;
        self
    }

    pub fn split(&self, n_samples: usize) -> Result<Vec<Split>, CvError> {
        check_n_splits(self.n_splits, n_samples)?;

        let mut indices: Vec<usize> = (0..n_samples).collect();
        if self.shuffle {
            indices.shuffle(&mut shuffler(self.seed));
        }

        let base = n_samples / self.n_splits;
        let extra = n_samples % self.n_splits;
        let mut start = 0;
        let mut tests = Vec::with_capacity(self.n_splits);
        for fold in 0..self.n_splits {
            let size = base + usize::from(fold < extra);
            let mut test = indices[start..start + size].to_vec();
            test.sort_unstable();
            tests.push(test);
            start += size;
        }
        Ok(splits_from_test_sets(n_samples, tests))
    }
}

// ---------------------------------------------------------------------------
// StratifiedKFold
// ---------------------------------------------------------------------------

/// Folds that preserve the class proportions of the target.
///
/// Classes are numbered by first appearance. The sorted codes are dealt
/// round-robin over the folds, which fixes how many samples of each class
/// every fold receives; each class's fold assignments are then (optionally
/// shuffled and) handed out to its rows in row order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StratifiedKFold {
    pub n_splits: usize,
    pub shuffle: bool,
    pub seed: Option<u64>,
}

impl StratifiedKFold {
    pub fn new(n_splits: usize) -> Self {
        StratifiedKFold {
            n_splits,
            shuffle: false,
            seed: None,
        }
    }

    pub fn shuffled(mut self, seed: Option<u64>) -> Self {
        self.shuffle = true;
        self.seed = seed;
        self
    }

    pub fn split(&self, labels: &[String]) -> Result<Vec<Split>, CvError> {
        let n_samples = labels.len();
        check_n_splits(self.n_splits, n_samples)?;

        let (codes, classes) = encode_by_first_appearance(labels);
        let n_classes = classes.len();
        let mut class_sizes = vec![0usize; n_classes];
        for &c in &codes {
            class_sizes[c] += 1;
        }

        if class_sizes.iter().all(|&n| self.n_splits > n) {
            return Err(CvError::ClassTooSmall(self.n_splits));
        }
        if let Some(&smallest) = class_sizes.iter().min() {
            if self.n_splits > smallest {
                log::warn!(
                    "The least populated class in y has only {smallest} members, which is less than n_splits={}",
                    self.n_splits
                );
            }
        }

        let mut sorted_codes = codes.clone();
        sorted_codes.sort_unstable();
        // allocation[fold][class]
        let mut allocation = vec![vec![0usize; n_classes]; self.n_splits];
        for (i, &c) in sorted_codes.iter().enumerate() {
            allocation[i % self.n_splits][c] += 1;
        }

        let mut rng = self.shuffle.then(|| shuffler(self.seed));
        let mut test_fold = vec![0usize; n_samples];
        for class in 0..n_classes {
            let mut folds_for_class: Vec<usize> = (0..self.n_splits)
                .flat_map(|fold| std::iter::repeat(fold).take(allocation[fold][class]))
                .collect();
            if let Some(rng) = rng.as_mut() {
                folds_for_class.shuffle(rng);
            }
            let rows = codes
                .iter()
                .enumerate()
                .filter(|&(_, &c)| c == class)
                .map(|(row, _)| row);
            for (row, fold) in rows.zip(folds_for_class) {
                test_fold[row] = fold;
            }
        }

        let mut tests = vec![Vec::new(); self.n_splits];
        for (row, &fold) in test_fold.iter().enumerate() {
            tests[fold].push(row);
        }
        Ok(splits_from_test_sets(n_samples, tests))
    }
}

// ---------------------------------------------------------------------------
// Strategy
// ---------------------------------------------------------------------------

/// How a dataset is cut into folds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CvStrategy {
    /// `k` stratified folds without shuffling, the default for classifiers.
    Folds(usize),
    KFold(KFold),
    Stratified(StratifiedKFold),
}

impl Default for CvStrategy {
    fn default() -> Self {
        CvStrategy::Folds(DEFAULT_N_SPLITS)
    }
}

impl CvStrategy {
    pub fn n_splits(&self) -> usize {
        match self {
            CvStrategy::Folds(k) => *k,
            CvStrategy::KFold(kf) => kf.n_splits,
            CvStrategy::Stratified(skf) => skf.n_splits,
        }
    }

    pub fn split(&self, data: &Dataset) -> Result<Vec<Split>, CvError> {
        match self {
            CvStrategy::Folds(k) => StratifiedKFold::new(*k).split(&data.target),
            CvStrategy::KFold(kf) => kf.split(data.len()),
            CvStrategy::Stratified(skf) => skf.split(&data.target),
        }
    }
}

// ---------------------------------------------------------------------------
// Error policy
// ---------------------------------------------------------------------------

/// What to record when fitting or scoring a split fails.
///
/// Written in config files as `"raise"`, `"nan"` or a number.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ErrorScoreRepr", into = "ErrorScoreRepr")]
pub enum ErrorScore {
    /// Stop at the first failing split and return its error.
    Raise,
    /// Log a warning and record this value for the failing split.
    Value(f64),
}

impl Default for ErrorScore {
    fn default() -> Self {
        ErrorScore::Value(f64::NAN)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum ErrorScoreRepr {
    Keyword(String),
    Number(f64),
}

impl From<ErrorScore> for ErrorScoreRepr {
    fn from(score: ErrorScore) -> Self {
        match score {
            ErrorScore::Raise => ErrorScoreRepr::Keyword("raise".into()),
            ErrorScore::Value(v) if v.is_nan() => ErrorScoreRepr::Keyword("nan".into()),
            ErrorScore::Value(v) => ErrorScoreRepr::Number(v),
        }
    }
}

impl TryFrom<ErrorScoreRepr> for ErrorScore {
    type Error = String;

    fn try_from(repr: ErrorScoreRepr) -> Result<Self, Self::Error> {
        match repr {
            ErrorScoreRepr::Number(v) => Ok(ErrorScore::Value(v)),
            ErrorScoreRepr::Keyword(k) => match k.to_ascii_lowercase().as_str() {
                "raise" => Ok(ErrorScore::Raise),
                "nan" => Ok(ErrorScore::Value(f64::NAN)),
                _ => Err(format!(
                    "error_score must be \"raise\", \"nan\" or a number, got \"{k}\""
                )),
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Per-split timings and scores from [`cross_validate`].
#[derive(Debug, Clone, Default)]
pub struct CvResults {
    /// Seconds spent fitting each split.
    pub fit_time: Vec<f64>,
    /// Seconds spent predicting and scoring each split.
    pub score_time: Vec<f64>,
    /// Scorer name → one test score per split.
    pub test_scores: BTreeMap<String, Vec<f64>>,
    /// Scorer name → one train score per split, when requested.
    pub train_scores: Option<BTreeMap<String, Vec<f64>>>,
}

impl CvResults {
    pub fn n_splits(&self) -> usize {
        self.fit_time.len()
    }

    /// Test scores of one scorer (`test_<name>` in the result table).
    pub fn test(&self, name: &str) -> Option<&[f64]> {
        self.test_scores.get(name).map(Vec::as_slice)
    }

    pub fn train(&self, name: &str) -> Option<&[f64]> {
        self.train_scores
            .as_ref()
            .and_then(|t| t.get(name))
            .map(Vec::as_slice)
    }
}

enum SplitFailure {
    Fit(FitError),
    Score { scorer: String, source: MetricError },
}

fn score_all<C: Classifier + ?Sized>(
    estimator: &C,
    data: &Dataset,
    scorers: &[Scorer],
) -> Result<Vec<f64>, SplitFailure> {
    let y_pred = estimator
        .predict(&data.features)
        .map_err(SplitFailure::Fit)?;
    scorers
        .iter()
        .map(|s| {
            s.score(&data.target, &y_pred)
                .map_err(|source| SplitFailure::Score {
                    scorer: s.name.clone(),
                    source,
                })
        })
        .collect()
}

/// Evaluate `estimator` with one or more scorers over the folds of `cv`.
///
/// The estimator is cloned for every split, so the caller's instance is
/// never fitted.
pub fn cross_validate<C: Classifier + Clone>(
    estimator: &C,
    data: &Dataset,
    cv: &CvStrategy,
    scorers: &[Scorer],
    error_score: ErrorScore,
    return_train_score: bool,
) -> Result<CvResults, CvError> {
    if scorers.is_empty() {
        return Err(CvError::NoScorers);
    }
    for (i, s) in scorers.iter().enumerate() {
        if scorers[..i].iter().any(|other| other.name == s.name) {
            return Err(CvError::DuplicateScorer(s.name.clone()));
        }
    }
    let splits = cv.split(data)?;
    log::info!(
        "cross-validating {} on {} samples: {} splits, scorers {:?}",
        estimator.name(),
        data.len(),
        splits.len(),
        scorers.iter().map(|s| s.name.as_str()).collect::<Vec<_>>()
    );

    let mut results = CvResults {
        train_scores: return_train_score.then(BTreeMap::new),
        ..CvResults::default()
    };
    for s in scorers {
        results.test_scores.entry(s.name.clone()).or_default();
        if let Some(train) = results.train_scores.as_mut() {
            train.entry(s.name.clone()).or_default();
        }
    }

    for (split_no, split) in splits.iter().enumerate() {
        let train = data.select(&split.train)?;
        let test = data.select(&split.test)?;

        let fit_start = Instant::now();
        let mut model = estimator.clone();
        let fitted = model.fit(&train);
        results.fit_time.push(fit_start.elapsed().as_secs_f64());

        let score_start = Instant::now();
        let outcome = fitted.map_err(SplitFailure::Fit).and_then(|()| {
            let test_scores = score_all(&model, &test, scorers)?;
            let train_scores = if return_train_score {
                Some(score_all(&model, &train, scorers)?)
            } else {
                None
            };
            Ok((test_scores, train_scores))
        });
        results.score_time.push(score_start.elapsed().as_secs_f64());

        let (test_scores, train_scores) = match (outcome, error_score) {
            (Ok(scores), _) => scores,
            (Err(failure), ErrorScore::Raise) => {
                return Err(match failure {
                    SplitFailure::Fit(source) => CvError::Fit {
                        split: split_no,
                        source,
                    },
                    SplitFailure::Score { scorer, source } => CvError::Score {
                        split: split_no,
                        scorer,
                        source,
                    },
                });
            }
            (Err(failure), ErrorScore::Value(value)) => {
                let reason = match failure {
                    SplitFailure::Fit(e) => format!("fit failed: {e}"),
                    SplitFailure::Score { scorer, source } => {
                        format!("scorer '{scorer}' failed: {source}")
                    }
                };
                log::warn!("split {split_no}: {reason}; recording score {value}");
                let filler = vec![value; scorers.len()];
                (filler.clone(), return_train_score.then_some(filler))
            }
        };

        for (s, score) in scorers.iter().zip(test_scores) {
            if let Some(v) = results.test_scores.get_mut(&s.name) {
                v.push(score);
            }
        }
        if let (Some(train), Some(scores)) = (results.train_scores.as_mut(), train_scores) {
            for (s, score) in scorers.iter().zip(scores) {
                if let Some(v) = train.get_mut(&s.name) {
                    v.push(score);
                }
            }
        }
    }

    Ok(results)
}

/// One test score per split for a single scorer.
pub fn cross_val_score<C: Classifier + Clone>(
    estimator: &C,
    data: &Dataset,
    cv: &CvStrategy,
    scorer: &Scorer,
    error_score: ErrorScore,
) -> Result<Vec<f64>, CvError> {
    let mut results = cross_validate(
        estimator,
        data,
        cv,
        std::slice::from_ref(scorer),
        error_score,
        false,
    )?;
    Ok(results.test_scores.remove(&scorer.name).unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Summaries for box plots
// ---------------------------------------------------------------------------

/// Five-number summary plus mean/std of a score sequence. NaN scores are
/// ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Lowest score within `q1 - 1.5 * IQR`.
    pub lower_whisker: f64,
    /// Highest score within `q3 + 1.5 * IQR`.
    pub upper_whisker: f64,
}

impl ScoreSummary {
    pub fn from_scores(scores: &[f64]) -> Option<Self> {
        let mut sorted: Vec<f64> = scores.iter().copied().filter(|s| !s.is_nan()).collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len();
        let mean = sorted.iter().sum::<f64>() / n as f64;
        let var = sorted.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n as f64;

        let q1 = quantile(&sorted, 0.25);
        let q3 = quantile(&sorted, 0.75);
        let iqr = q3 - q1;
        let lo = q1 - 1.5 * iqr;
        let hi = q3 + 1.5 * iqr;

        Some(ScoreSummary {
            count: n,
            mean,
            std: var.sqrt(),
            min: sorted[0],
            q1,
            median: quantile(&sorted, 0.5),
            q3,
            max: sorted[n - 1],
            lower_whisker: sorted.iter().copied().find(|&s| s >= lo).unwrap_or(sorted[0]),
            upper_whisker: sorted
                .iter()
                .rev()
                .copied()
                .find(|&s| s <= hi)
                .unwrap_or(sorted[n - 1]),
        })
    }

    /// Scores lying outside the whiskers.
    pub fn outliers(&self, scores: &[f64]) -> Vec<f64> {
        scores
            .iter()
            .copied()
            .filter(|&s| s < self.lower_whisker || s > self.upper_whisker)
            .collect()
    }
}

/// Linear-interpolation quantile of sorted, non-empty data.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::{DecisionTreeClassifier, DummyClassifier};
    use crate::metrics::{make_scorer, Metric};
    use ndarray::Array2;

    /// `n` rows; every fourth row is "donated" and carries a strong signal.
    fn dataset(n: usize) -> Dataset {
        let target: Vec<String> = (0..n)
            .map(|i| if i % 4 == 3 { "donated" } else { "not donated" }.to_string())
            .collect();
        let values: Vec<f64> = target
            .iter()
            .enumerate()
            .flat_map(|(i, l)| {
                let signal = if l == "donated" { 10.0 } else { 0.0 };
                [signal + (i % 4) as f64, (i % 7) as f64]
            })
            .collect();
        let features = Array2::from_shape_vec((n, 2), values).unwrap();
        Dataset::new(
            vec!["signal".into(), "noise".into()],
            features,
            "Class".into(),
            target,
        )
        .unwrap()
    }

    fn assert_partition(splits: &[Split], n: usize) {
        let mut seen = vec![0usize; n];
        for split in splits {
            assert_eq!(split.train.len() + split.test.len(), n);
            for &i in &split.test {
                seen[i] += 1;
                assert!(!split.train.contains(&i));
            }
        }
        assert!(seen.iter().all(|&c| c == 1));
    }

    #[test]
    fn kfold_sizes_follow_remainder_rule() {
        let splits = KFold::new(3).split(10).unwrap();
        let sizes: Vec<usize> = splits.iter().map(|s| s.test.len()).collect();
        assert_eq!(sizes, vec![4, 3, 3]);
        assert_eq!(splits[0].test, vec![0, 1, 2, 3]);
        assert_partition(&splits, 10);
    }

    #[test]
    fn shuffled_kfold_is_reproducible_with_seed() {
        let a = KFold::new(4).shuffled(Some(7)).split(20).unwrap();
        let b = KFold::new(4).shuffled(Some(7)).split(20).unwrap();
        assert_eq!(a, b);
        assert_partition(&a, 20);
    }

    #[test]
    fn kfold_rejects_bad_split_counts() {
        assert!(matches!(KFold::new(1).split(10), Err(CvError::TooFewSplits(1))));
        assert!(matches!(
            KFold::new(11).split(10),
            Err(CvError::TooManySplits { n_splits: 11, n_samples: 10 })
        ));
    }

    #[test]
    fn stratified_folds_balance_classes() {
        let data = dataset(48);
        for skf in [StratifiedKFold::new(4), StratifiedKFold::new(4).shuffled(Some(3))] {
            let splits = skf.split(&data.target).unwrap();
            assert_eq!(splits.len(), 4);
            assert_partition(&splits, data.len());
            for split in &splits {
                let pos = split
                    .test
                    .iter()
                    .filter(|&&i| data.target[i] == "donated")
                    .count();
                assert_eq!(pos, 3);
                assert_eq!(split.test.len(), 12);
            }
        }
    }

    #[test]
    fn stratified_counts_differ_by_at_most_one() {
        let data = dataset(30);
        let splits = StratifiedKFold::new(4).split(&data.target).unwrap();
        let pos: Vec<usize> = splits
            .iter()
            .map(|s| s.test.iter().filter(|&&i| data.target[i] == "donated").count())
            .collect();
        let max = *pos.iter().max().unwrap();
        let min = *pos.iter().min().unwrap();
        assert!(max - min <= 1);
        assert_eq!(pos.iter().sum::<usize>(), 7);
    }

    #[test]
    fn stratified_rejects_splits_above_every_class_size() {
        let target: Vec<String> = ["a", "a", "b", "b"].iter().map(|s| s.to_string()).collect();
        assert!(matches!(
            StratifiedKFold::new(3).split(&target),
            Err(CvError::ClassTooSmall(3))
        ));
    }

    #[test]
    fn cross_validate_returns_one_score_per_fold() {
        let data = dataset(40);
        let scorers = [
            Scorer::from_name("accuracy").unwrap(),
            Scorer::from_name("balanced_accuracy").unwrap(),
        ];
        let res = cross_validate(
            &DecisionTreeClassifier::new(),
            &data,
            &CvStrategy::Folds(5),
            &scorers,
            ErrorScore::Raise,
            true,
        )
        .unwrap();
        assert_eq!(res.n_splits(), 5);
        let acc = res.test("accuracy").unwrap();
        let bal = res.test("balanced_accuracy").unwrap();
        assert_eq!(acc.len(), 5);
        assert_eq!(bal.len(), 5);
        assert!(acc.iter().chain(bal).all(|s| (0.0..=1.0).contains(s)));
        assert_eq!(res.train("accuracy").unwrap().len(), 5);
        assert_eq!(res.score_time.len(), 5);
    }

    #[test]
    fn precision_without_pos_label_raises() {
        let data = dataset(40);
        let err = cross_val_score(
            &DecisionTreeClassifier::new(),
            &data,
            &CvStrategy::Folds(10),
            &Scorer::from_name("precision").unwrap(),
            ErrorScore::Raise,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CvError::Score { source: MetricError::InvalidPosLabel { .. }, .. }
        ));
    }

    #[test]
    fn precision_failures_become_nan_by_default() {
        let data = dataset(40);
        let scores = cross_val_score(
            &DecisionTreeClassifier::new(),
            &data,
            &CvStrategy::Folds(5),
            &Scorer::from_name("precision").unwrap(),
            ErrorScore::default(),
        )
        .unwrap();
        assert_eq!(scores.len(), 5);
        assert!(scores.iter().all(|s| s.is_nan()));
    }

    #[test]
    fn precision_with_pos_label_succeeds() {
        let data = dataset(40);
        let scores = cross_val_score(
            &DecisionTreeClassifier::new(),
            &data,
            &CvStrategy::Folds(5),
            &make_scorer(Metric::Precision, "donated"),
            ErrorScore::Raise,
        )
        .unwrap();
        assert_eq!(scores.len(), 5);
        assert!(scores.iter().all(|s| (0.0..=1.0).contains(s)));
    }

    #[test]
    fn majority_baseline_has_half_balanced_accuracy() {
        let data = dataset(40);
        let scores = cross_val_score(
            &DummyClassifier::new(),
            &data,
            &CvStrategy::Folds(5),
            &Scorer::from_name("balanced_accuracy").unwrap(),
            ErrorScore::Raise,
        )
        .unwrap();
        assert!(scores.iter().all(|s| (s - 0.5).abs() < 1e-12));
    }

    #[test]
    fn cross_validate_needs_scorers() {
        let data = dataset(10);
        assert!(matches!(
            cross_validate(
                &DummyClassifier::new(),
                &data,
                &CvStrategy::default(),
                &[],
                ErrorScore::Raise,
                false
            ),
            Err(CvError::NoScorers)
        ));
    }

    #[test]
    fn cross_validate_rejects_repeated_scorer_names() {
        let data = dataset(40);
        let scorers = [
            make_scorer(Metric::Precision, "donated"),
            make_scorer(Metric::Precision, "not donated"),
        ];
        let err = cross_validate(
            &DecisionTreeClassifier::new(),
            &data,
            &CvStrategy::Folds(5),
            &scorers,
            ErrorScore::Raise,
            false,
        )
        .unwrap_err();
        assert!(matches!(err, CvError::DuplicateScorer(ref name) if name == "precision"));
    }

    #[test]
    fn renamed_scorers_keep_one_score_per_fold() {
        let data = dataset(40);
        let scorers = [
            make_scorer(Metric::Precision, "donated").named("precision_donated"),
            make_scorer(Metric::Precision, "not donated").named("precision_not_donated"),
        ];
        let res = cross_validate(
            &DecisionTreeClassifier::new(),
            &data,
            &CvStrategy::Folds(5),
            &scorers,
            ErrorScore::Raise,
            false,
        )
        .unwrap();
        assert_eq!(res.test_scores.len(), 2);
        assert_eq!(res.test("precision_donated").unwrap().len(), 5);
        assert_eq!(res.test("precision_not_donated").unwrap().len(), 5);
    }

    #[test]
    fn summary_quartiles_and_whiskers() {
        let s = ScoreSummary::from_scores(&[0.1, 0.6, 0.7, 0.8, 0.9, f64::NAN]).unwrap();
        assert_eq!(s.count, 5);
        assert!((s.median - 0.7).abs() < 1e-12);
        assert!((s.q1 - 0.6).abs() < 1e-12);
        assert!((s.q3 - 0.8).abs() < 1e-12);
        assert!((s.lower_whisker - 0.6).abs() < 1e-12);
        assert_eq!(s.outliers(&[0.1, 0.6, 0.7]), vec![0.1]);
        assert!(ScoreSummary::from_scores(&[f64::NAN]).is_none());
    }
}
