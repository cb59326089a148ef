//! Data and model layer of the housing price app.
//!
//! Loads the housing table once, fits a random-forest regressor on it and exposes the
//! operations the page is built from. Nothing in here knows about the terminal.

pub mod cache;
pub mod dataset;
mod error;
pub mod features;
pub mod forest;
pub mod histogram;
pub mod prediction;
pub mod range;
pub mod source;
pub mod trainer;

pub use cache::{AppContext, DatasetCache};
pub use dataset::{list_columns, Column, Dataset, Record, TablePreview, DEFAULT_SELECTION};
pub use error::{HousingError, Result};
pub use features::{FeatureDefaults, FeatureVector, RiverBoundary};
pub use histogram::{Histogram, HISTOGRAM_BINS};
pub use prediction::{format_price, predict, PRICE_SCALE};
pub use range::PriceRange;
pub use source::{CsvFile, DatasetSource};
pub use trainer::{train, TrainedModel};
