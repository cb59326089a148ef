//! Bagged ensemble of CART regression trees.
//!
//! Trees are grown in parallel; tree `i` draws its bootstrap resample and its per-split
//! feature order from an RNG seeded with `seed + i`, so a fixed seed reproduces the same
//! forest regardless of how the work is scheduled.

mod tree;

use ndarray::{ArrayView1, ArrayView2};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rayon::prelude::*;

use crate::{HousingError, Result};

pub use tree::RegressionTree;

/// Hyperparameters of a [`RandomForest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForestParams {
    pub n_trees: usize,
    /// Split levels allowed below the root, `0` grows single-leaf trees.
    pub max_depth: usize,
    /// Non-constant features scanned per split.
    pub max_features: usize,
    pub min_samples_split: usize,
    pub min_samples_leaf: usize,
    /// Fit every tree on a resample drawn with replacement.
    pub bootstrap: bool,
    pub seed: u64,
}

impl ForestParams {
    fn validate(&self) -> Result<()> {
        if self.n_trees == 0 {
            return Err(HousingError::FitFailure("n_trees must be greater than zero".into()));
        }
        if self.max_features == 0 {
            return Err(HousingError::FitFailure(
                "max_features must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

/// A fitted random-forest regressor.
#[derive(Debug, Clone)]
pub struct RandomForest {
    params: ForestParams,
    n_features: usize,
    trees: Vec<RegressionTree>,
    importances: Vec<f64>,
}

impl RandomForest {
    /// Fits the forest on a feature matrix and its targets.
    ///
    /// # Arguments
    /// * `x` - One row per sample.
    /// * `y` - One target per row of `x`.
    /// * `params` - The forest hyperparameters.
    ///
    /// # Errors
    /// `FitFailure` if there are no samples, no features, the shapes disagree or the
    /// hyperparameters are invalid.
    pub fn fit(x: ArrayView2<f64>, y: ArrayView1<f64>, params: ForestParams) -> Result<Self> {
        params.validate()?;

        let (n_samples, n_features) = x.dim();
        if n_samples == 0 {
            return Err(HousingError::FitFailure("no samples to fit on".into()));
        }
        if n_features == 0 {
            return Err(HousingError::FitFailure("no features to fit on".into()));
        }
        if y.len() != n_samples {
            return Err(HousingError::FitFailure(format!(
                "got {} targets for {n_samples} samples",
                y.len()
            )));
        }

        let trees: Vec<RegressionTree> = (0..params.n_trees)
            .into_par_iter()
            .map(|i| {
                let mut rng = StdRng::seed_from_u64(params.seed.wrapping_add(i as u64));
                let samples = if params.bootstrap {
                    (0..n_samples)
                        .map(|_| rng.random_range(0..n_samples))
                        .collect()
                } else {
                    (0..n_samples).collect()
                };
                RegressionTree::fit(x, y, samples, &params, &mut rng)
            })
            .collect();

        let mut importances = vec![0.0; n_features];
        for tree in &trees {
            for (acc, v) in importances.iter_mut().zip(tree.importances()) {
                *acc += v;
            }
        }
        let total: f64 = importances.iter().sum();
        if total > 0.0 {
            importances.iter_mut().for_each(|v| *v /= total);
        }

        Ok(Self {
            params,
            n_features,
            trees,
            importances,
        })
    }

    /// Averages the tree outputs for one feature row.
    ///
    /// # Panics
    /// If `features` is shorter than [`RandomForest::n_features`].
    pub fn predict_one(&self, features: &[f64]) -> f64 {
        debug_assert_eq!(features.len(), self.n_features);
        let sum: f64 = self.trees.iter().map(|t| t.predict_one(features)).sum();
        sum / self.trees.len() as f64
    }

    pub fn params(&self) -> &ForestParams {
        &self.params
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn trees(&self) -> &[RegressionTree] {
        &self.trees
    }

    /// Mean impurity decrease per feature, summing to one unless no tree ever split.
    pub fn feature_importances(&self) -> &[f64] {
        &self.importances
    }
}
