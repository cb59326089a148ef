use std::path::PathBuf;

use serde::Deserialize;

pub const DEFAULT_DATASET: &str = "data/housing.csv";
pub const DEFAULT_LOG_FILE: &str = "housing-tui.log";

/// Startup settings of the app.
///
/// Every field is optional in the JSON file; missing ones take the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// CSV file the dataset is read from.
    pub dataset_path: PathBuf,
    /// Seed for the forest, `None` draws a fresh one per run.
    pub seed: Option<u64>,
    /// Where log records go while the terminal is taken over.
    pub log_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset_path: DEFAULT_DATASET.into(),
            seed: None,
            log_path: DEFAULT_LOG_FILE.into(),
        }
    }
}
