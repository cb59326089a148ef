use std::sync::{Arc, OnceLock};

use log::{debug, info};

use crate::{dataset::Dataset, source::DatasetSource, trainer, trainer::TrainedModel, Result};

/// Write-once holder for the dataset of a process.
///
/// The first successful [`DatasetCache::load`] reads the source; later calls hand out the
/// same `Arc` without touching it again. Failed reads are not cached.
pub struct DatasetCache<S> {
    source: S,
    cell: OnceLock<Arc<Dataset>>,
}

impl<S: DatasetSource> DatasetCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cell: OnceLock::new(),
        }
    }

    /// Returns the dataset, reading the source only on the first call.
    ///
    /// # Errors
    /// Whatever the source returns on a failed read, usually `ResourceUnavailable`.
    pub fn load(&self) -> Result<Arc<Dataset>> {
        if let Some(dataset) = self.cell.get() {
            debug!("dataset served from cache");
            return Ok(Arc::clone(dataset));
        }

        info!("loading dataset from {}", self.source.describe());
        let dataset = Arc::new(self.source.read()?);
        info!("loaded {} records", dataset.len());

        Ok(Arc::clone(self.cell.get_or_init(|| dataset)))
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

/// The dataset and the model fitted on it, shared by every render of the page.
#[derive(Debug, Clone)]
pub struct AppContext {
    dataset: Arc<Dataset>,
    model: Arc<TrainedModel>,
}

impl AppContext {
    /// Loads the dataset through `cache` and fits the model on it.
    ///
    /// Training is not attempted when the dataset cannot be loaded.
    ///
    /// # Errors
    /// `ResourceUnavailable` from the load, `FitFailure` from training.
    pub fn bootstrap<S: DatasetSource>(cache: &DatasetCache<S>, seed: Option<u64>) -> Result<Self> {
        let dataset = cache.load()?;
        Self::fit(dataset, seed)
    }

    /// Fits the model on an already loaded dataset.
    ///
    /// # Errors
    /// `FitFailure` if the dataset cannot be trained on.
    pub fn from_dataset(dataset: Dataset, seed: Option<u64>) -> Result<Self> {
        Self::fit(Arc::new(dataset), seed)
    }

    fn fit(dataset: Arc<Dataset>, seed: Option<u64>) -> Result<Self> {
        let model = Arc::new(trainer::train(&dataset, seed)?);
        Ok(Self { dataset, model })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn model(&self) -> &TrainedModel {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, path::Path};

    use super::*;
    use crate::{dataset::tests::SAMPLE_CSV, HousingError};

    struct CountingSource {
        text: &'static str,
        reads: Cell<usize>,
    }

    impl CountingSource {
        fn new(text: &'static str) -> Self {
            Self {
                text,
                reads: Cell::new(0),
            }
        }
    }

    impl DatasetSource for CountingSource {
        fn read(&self) -> Result<Dataset> {
            self.reads.set(self.reads.get() + 1);
            Dataset::from_csv_reader(self.text.as_bytes(), Path::new("memory"))
        }

        fn describe(&self) -> String {
            "memory".into()
        }
    }

    #[test]
    fn reads_source_once() {
        let cache = DatasetCache::new(CountingSource::new(SAMPLE_CSV));
        assert!(!cache.is_loaded());

        let first = cache.load().unwrap();
        let second = cache.load().unwrap();
        let third = cache.load().unwrap();

        assert_eq!(cache.source().reads.get(), 1);
        assert_eq!(first, second);
        assert!(Arc::ptr_eq(&second, &third));
        assert!(cache.is_loaded());
    }

    #[test]
    fn failed_read_is_retried() {
        let cache = DatasetCache::new(CountingSource::new("not,a,housing,file\n1,2,3,4\n"));

        assert!(cache.load().is_err());
        assert!(cache.load().is_err());
        assert_eq!(cache.source().reads.get(), 2);
        assert!(!cache.is_loaded());
    }

    #[test]
    fn bootstrap_stops_before_training_on_bad_resource() {
        let cache = DatasetCache::new(CountingSource::new("garbage"));
        let err = AppContext::bootstrap(&cache, Some(0)).unwrap_err();
        assert!(matches!(err, HousingError::ResourceUnavailable { .. }));
    }

    #[test]
    fn bootstrap_reuses_cached_dataset() {
        let cache = DatasetCache::new(CountingSource::new(SAMPLE_CSV));
        let ctx = AppContext::bootstrap(&cache, Some(3)).unwrap();

        assert_eq!(ctx.dataset().len(), 3);
        assert_eq!(ctx.model().rows(), 3);
        assert_eq!(ctx.model().seed(), 3);

        cache.load().unwrap();
        assert_eq!(cache.source().reads.get(), 1);
    }
}
