//! Classifiers evaluated by the cross-validation driver.

use std::fmt;
use std::sync::Arc;

use linfa::traits::{Fit, Predict};
use linfa_trees::{DecisionTree, SplitQuality};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::data::filter::class_counts;
use crate::data::model::Dataset;
use crate::error::FitError;

/// A model that learns labels from numeric features.
///
/// Cross-validation clones the unfitted estimator for every split, so
/// `fit` may assume a fresh instance.
pub trait Classifier {
    fn name(&self) -> &str;
    fn fit(&mut self, data: &Dataset) -> Result<(), FitError>;
    fn predict(&self, features: &Array2<f64>) -> Result<Vec<String>, FitError>;
}

// ---------------------------------------------------------------------------
// Decision tree
// ---------------------------------------------------------------------------

/// Impurity measure used to choose splits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criterion {
    #[default]
    Gini,
    Entropy,
}

/// CART decision tree, fitted with `linfa-trees`.
#[derive(Clone)]
pub struct DecisionTreeClassifier {
    pub criterion: Criterion,
    /// `None` grows the tree until leaves are pure.
    pub max_depth: Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    fitted: Option<FittedTree>,
}

#[derive(Clone)]
struct FittedTree {
    model: Arc<DecisionTree<f64, usize>>,
    /// Sorted labels; the tree predicts indices into this list.
    classes: Vec<String>,
    n_features: usize,
}

impl Default for DecisionTreeClassifier {
    fn default() -> Self {
        Self {
            criterion: Criterion::Gini,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            fitted: None,
        }
    }
}

impl fmt::Debug for DecisionTreeClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecisionTreeClassifier")
            .field("criterion", &self.criterion)
            .field("max_depth", &self.max_depth)
            .field("min_samples_split", &self.min_samples_split)
            .field("min_samples_leaf", &self.min_samples_leaf)
            .field("fitted", &self.fitted.is_some())
            .finish()
    }
}

impl DecisionTreeClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_criterion(mut self, criterion: Criterion) -> Self {
        self.criterion = criterion;
        self
    }

    /// Labels seen during `fit`, sorted.
    pub fn classes(&self) -> Option<&[String]> {
        self.fitted.as_ref().map(|f| f.classes.as_slice())
    }
}

impl Classifier for DecisionTreeClassifier {
    fn name(&self) -> &str {
        "DecisionTreeClassifier"
    }

    fn fit(&mut self, data: &Dataset) -> Result<(), FitError> {
        if data.is_empty() {
            return Err(FitError::EmptyTrainingSet);
        }
        let classes = data.classes();
        let codes: Vec<usize> = data
            .target
            .iter()
            .map(|label| classes.binary_search(label).unwrap_or(0))
            .collect();
        let train = linfa::DatasetBase::new(data.features.clone(), Array1::from_vec(codes));

        let quality = match self.criterion {
            Criterion::Gini => SplitQuality::Gini,
            Criterion::Entropy => SplitQuality::Entropy,
        };
        let model = DecisionTree::params()
            .split_quality(quality)
            .max_depth(self.max_depth)
            .min_weight_split(self.min_samples_split as f32)
            .min_weight_leaf(self.min_samples_leaf as f32)
            .fit(&train)?;

        log::debug!(
            "fitted decision tree on {} samples, {} classes",
            data.len(),
            classes.len()
        );
        self.fitted = Some(FittedTree {
            model: Arc::new(model),
            classes,
            n_features: data.n_features(),
        });
        Ok(())
    }

    fn predict(&self, features: &Array2<f64>) -> Result<Vec<String>, FitError> {
        let fitted = self.fitted.as_ref().ok_or(FitError::NotFitted)?;
        if features.ncols() != fitted.n_features {
            return Err(FitError::FeatureMismatch {
                expected: fitted.n_features,
                got: features.ncols(),
            });
        }
        let model: &DecisionTree<f64, usize> = &fitted.model;
        let codes: Array1<usize> = model.predict(features);
        Ok(codes
            .iter()
            .map(|&c| fitted.classes[c.min(fitted.classes.len() - 1)].clone())
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Baseline
// ---------------------------------------------------------------------------

/// Predicts the most frequent training label for every sample.
///
/// Ties go to the label that sorts first.
#[derive(Debug, Clone, Default)]
pub struct DummyClassifier {
    majority: Option<String>,
}

impl DummyClassifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Classifier for DummyClassifier {
    fn name(&self) -> &str {
        "DummyClassifier"
    }

    fn fit(&mut self, data: &Dataset) -> Result<(), FitError> {
        let counts = class_counts(&data.target);
        let mut best: Option<(&String, usize)> = None;
        for (label, &n) in &counts {
            if best.map_or(true, |(_, m)| n > m) {
                best = Some((label, n));
            }
        }
        let (label, _) = best.ok_or(FitError::EmptyTrainingSet)?;
        self.majority = Some(label.clone());
        Ok(())
    }

    fn predict(&self, features: &Array2<f64>) -> Result<Vec<String>, FitError> {
        let label = self.majority.as_ref().ok_or(FitError::NotFitted)?;
        Ok(vec![label.clone(); features.nrows()])
    }
}
