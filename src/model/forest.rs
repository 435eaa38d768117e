//! Bootstrap-aggregated decision tree forest.
//!
//! Each tree is a `linfa-trees` Gini decision tree fitted on a bootstrap
//! resample of the training set. Class probabilities are the fraction of
//! trees voting for each class.

use linfa::DatasetBase;
use linfa::traits::{Fit, Predict};
use linfa_trees::{DecisionTree, SplitQuality};
use ndarray::{Array1, Array2, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{IrisError, Result};
use crate::traits::{Classifier, arg_max};

/// Hyperparameters for [`RandomForest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestParams {
    /// Number of trees in the ensemble (default: 100).
    pub n_trees: usize,
    /// Maximum depth of each tree (default: 5).
    pub max_depth: usize,
    /// Seed for bootstrap resampling (default: 42).
    pub seed: u64,
    /// Fit each tree on a bootstrap resample instead of the full set (default: true).
    pub bootstrap: bool,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 5,
            seed: 42,
            bootstrap: true,
        }
    }
}

impl ForestParams {
    pub fn n_trees(mut self, n_trees: usize) -> Self {
        self.n_trees = n_trees;
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn bootstrap(mut self, bootstrap: bool) -> Self {
        self.bootstrap = bootstrap;
        self
    }

    fn check(&self) -> Result<()> {
        if self.n_trees == 0 {
            return Err(IrisError::Training("n_trees must be at least 1".into()));
        }
        if self.max_depth == 0 {
            return Err(IrisError::Training("max_depth must be at least 1".into()));
        }
        Ok(())
    }

    /// Fit a forest on `records` (samples × features) and class indices `targets`.
    ///
    /// The number of classes is one more than the largest target index.
    pub fn fit(&self, records: &Array2<f64>, targets: &Array1<usize>) -> Result<RandomForest> {
        self.check()?;

        let n_samples = records.nrows();
        if n_samples == 0 {
            return Err(IrisError::Training(
                "cannot fit a forest on an empty dataset".into(),
            ));
        }
        if targets.len() != n_samples {
            return Err(IrisError::Training(format!(
                "{n_samples} records but {} targets",
                targets.len()
            )));
        }
        let n_classes = targets.iter().max().map_or(0, |max| max + 1);

        let tree_params = DecisionTree::params()
            .split_quality(SplitQuality::Gini)
            .max_depth(Some(self.max_depth));

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut trees = Vec::with_capacity(self.n_trees);
        for _ in 0..self.n_trees {
            let indices: Vec<usize> = if self.bootstrap {
                (0..n_samples).map(|_| rng.gen_range(0..n_samples)).collect()
            } else {
                (0..n_samples).collect()
            };
            let sample = DatasetBase::new(
                records.select(Axis(0), &indices),
                targets.select(Axis(0), &indices),
            );
            let tree = tree_params
                .fit(&sample)
                .map_err(|e| IrisError::Training(e.to_string()))?;
            trees.push(tree);
        }

        debug!(
            n_trees = trees.len(),
            n_classes,
            n_samples,
            "fitted random forest"
        );

        Ok(RandomForest {
            trees,
            n_classes,
            n_features: records.ncols(),
            params: *self,
        })
    }
}

/// An ensemble of decision trees voting on the class of each sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    trees: Vec<DecisionTree<f64, usize>>,
    n_classes: usize,
    n_features: usize,
    params: ForestParams,
}

impl RandomForest {
    /// Default hyperparameters, to be adjusted and then fitted.
    pub fn params() -> ForestParams {
        ForestParams::default()
    }

    /// Hyperparameters this forest was fitted with.
    pub fn fitted_params(&self) -> &ForestParams {
        &self.params
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Vote shares for every row of `records`, shape (samples × classes).
    pub fn vote_shares(&self, records: &Array2<f64>) -> Result<Array2<f64>> {
        if records.ncols() != self.n_features {
            return Err(IrisError::Inference(format!(
                "expected {} features, got {}",
                self.n_features,
                records.ncols()
            )));
        }
        let mut votes = Array2::<f64>::zeros((records.nrows(), self.n_classes));
        for tree in &self.trees {
            let predicted: Array1<usize> = tree.predict(records);
            for (row, class) in predicted.iter().enumerate() {
                if *class >= self.n_classes {
                    return Err(IrisError::Inference(format!(
                        "tree voted for unknown class {class}"
                    )));
                }
                votes[(row, *class)] += 1.0;
            }
        }
        if !self.trees.is_empty() {
            votes /= self.trees.len() as f64;
        }
        Ok(votes)
    }

    /// Predicted class index for every row of `records`.
    pub fn predict_classes(&self, records: &Array2<f64>) -> Result<Array1<usize>> {
        let shares = self.vote_shares(records)?;
        Ok(shares
            .rows()
            .into_iter()
            .map(|row| arg_max(&row.to_vec()))
            .collect())
    }
}

impl Classifier for RandomForest {
    fn n_classes(&self) -> usize {
        self.n_classes
    }

    fn n_features(&self) -> usize {
        self.n_features
    }

    fn class_probabilities(&self, features: &[f64]) -> Result<Vec<f64>> {
        let sample = Array2::from_shape_vec((1, features.len()), features.to_vec())
            .map_err(|e| IrisError::Inference(e.to_string()))?;
        let shares = self.vote_shares(&sample)?;
        Ok(shares.row(0).to_vec())
    }
}
