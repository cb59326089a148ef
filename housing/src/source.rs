use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use crate::{dataset::Dataset, HousingError, Result};

/// Where the dataset comes from.
///
/// Implementations are read at most once per process when wrapped in a
/// [`DatasetCache`](crate::cache::DatasetCache).
pub trait DatasetSource {
    /// Reads and parses the full dataset.
    ///
    /// # Errors
    /// `ResourceUnavailable` if the resource is missing or malformed.
    fn read(&self) -> Result<Dataset>;

    /// Short description used in log lines.
    fn describe(&self) -> String;
}

/// A CSV file on disk.
#[derive(Debug, Clone)]
pub struct CsvFile {
    path: PathBuf,
}

impl CsvFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatasetSource for CsvFile {
    fn read(&self) -> Result<Dataset> {
        let file = File::open(&self.path)
            .map_err(|e| HousingError::unavailable(&self.path, format!("cannot open: {e}")))?;

        Dataset::from_csv_reader(BufReader::new(file), &self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
