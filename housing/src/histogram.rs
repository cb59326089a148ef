use crate::dataset::{Column, Dataset};

/// Number of bins of the price distribution chart.
pub const HISTOGRAM_BINS: usize = 100;

/// A single equal-width bin, `[lo, hi)` except for the last one which includes `hi`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub lo: f64,
    pub hi: f64,
    pub count: u64,
}

/// Distribution of the target column over a dataset subset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Histogram {
    bins: Vec<Bin>,
}

impl Histogram {
    /// Bins the target values of `subset` into `bins` equal-width buckets spanning the
    /// subset's minimum and maximum.
    ///
    /// An empty subset, or `bins == 0`, yields an empty histogram. When every value is the
    /// same the span is widened to one unit so all rows land in the first bin.
    pub fn of_targets(subset: &Dataset, bins: usize) -> Self {
        let values = subset.column_values(Column::TARGET);
        let (Some(min), Some(max)) = (subset.target_min(), subset.target_max()) else {
            return Self::default();
        };
        if bins == 0 {
            return Self::default();
        }

        let span = if max > min { max - min } else { 1.0 };
        let width = span / bins as f64;

        let mut out: Vec<Bin> = (0..bins)
            .map(|i| Bin {
                lo: min + width * i as f64,
                hi: if i + 1 == bins {
                    min + span
                } else {
                    min + width * (i + 1) as f64
                },
                count: 0,
            })
            .collect();

        for v in values {
            let idx = (((v - min) / width) as usize).min(bins - 1);
            out[idx].count += 1;
        }

        Self { bins: out }
    }

    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    pub fn counts(&self) -> Vec<u64> {
        self.bins.iter().map(|b| b.count).collect()
    }

    pub fn total(&self) -> u64 {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Lower edge of the first bin and upper edge of the last one.
    pub fn range(&self) -> Option<(f64, f64)> {
        Some((self.bins.first()?.lo, self.bins.last()?.hi))
    }

    /// Largest bin count, used to scale the chart.
    pub fn peak(&self) -> u64 {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }
}
