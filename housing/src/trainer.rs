use std::time::Instant;

use log::info;

use crate::{
    dataset::{Column, Dataset},
    features::FeatureVector,
    forest::{ForestParams, RandomForest},
    HousingError, Result,
};

pub const N_TREES: usize = 200;
pub const MAX_DEPTH: usize = 7;
pub const MAX_FEATURES: usize = 3;

/// The forest configuration the app is published with.
///
/// Changing any of these values changes every prediction.
pub fn housing_params(seed: u64) -> ForestParams {
    ForestParams {
        n_trees: N_TREES,
        max_depth: MAX_DEPTH,
        max_features: MAX_FEATURES,
        min_samples_split: 2,
        min_samples_leaf: 1,
        bootstrap: true,
        seed,
    }
}

/// A forest fitted on the full dataset, immutable once built.
#[derive(Debug, Clone)]
pub struct TrainedModel {
    forest: RandomForest,
    rows: usize,
}

impl TrainedModel {
    /// Raw model output, in the dataset's target units.
    pub fn predict(&self, vector: &FeatureVector) -> f64 {
        self.forest.predict_one(&vector.to_array())
    }

    pub fn seed(&self) -> u64 {
        self.forest.params().seed
    }

    pub fn params(&self) -> &ForestParams {
        self.forest.params()
    }

    /// Number of records the model was fitted on.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Importance per feature, paired with its column.
    pub fn feature_importances(&self) -> Vec<(Column, f64)> {
        Column::FEATURES
            .into_iter()
            .zip(self.forest.feature_importances().iter().copied())
            .collect()
    }
}

/// Fits the housing forest on every record of `dataset`.
///
/// # Arguments
/// * `dataset` - The training data, features in [`Column::FEATURES`] order.
/// * `seed` - Fixes the forest's randomness. When `None` a fresh seed is drawn and logged,
///   so a run can still be reproduced afterwards.
///
/// # Errors
/// `FitFailure` if the dataset is empty.
pub fn train(dataset: &Dataset, seed: Option<u64>) -> Result<TrainedModel> {
    if dataset.is_empty() {
        return Err(HousingError::FitFailure("dataset has no rows".into()));
    }

    let seed = seed.unwrap_or_else(rand::random);
    let params = housing_params(seed);
    info!(
        "fitting forest: trees={} max_depth={} max_features={} seed={seed} rows={}",
        params.n_trees,
        params.max_depth,
        params.max_features,
        dataset.len()
    );

    let started = Instant::now();
    let x = dataset.feature_matrix();
    let y = dataset.targets();
    let forest = RandomForest::fit(x.view(), y.view(), params)?;
    info!("forest fitted in {:?}", started.elapsed());

    Ok(TrainedModel {
        forest,
        rows: dataset.len(),
    })
}
