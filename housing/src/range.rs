use crate::dataset::Dataset;

/// Upper bound of the price range control.
pub const PRICE_RANGE_CEILING: f64 = 150.0;

/// Selection shown before the user moves either handle.
pub const INITIAL_SELECTION: (f64, f64) = (10.0, 100.0);

/// A two-handle range control over the target column.
///
/// Invariant: `floor <= low <= high <= ceiling`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    floor: f64,
    ceiling: f64,
    low: f64,
    high: f64,
}

impl PriceRange {
    /// Creates a control spanning `[floor, ceiling]` with the initial selection clamped
    /// into it. A ceiling below the floor is raised to the floor.
    pub fn new(floor: f64, ceiling: f64) -> Self {
        let ceiling = ceiling.max(floor);
        let low = INITIAL_SELECTION.0.clamp(floor, ceiling);
        let high = INITIAL_SELECTION.1.clamp(low, ceiling);

        Self {
            floor,
            ceiling,
            low,
            high,
        }
    }

    /// Control bounded by the smallest target of `dataset` and [`PRICE_RANGE_CEILING`].
    pub fn for_dataset(dataset: &Dataset) -> Self {
        let floor = dataset.target_min().unwrap_or(0.0);
        Self::new(floor, PRICE_RANGE_CEILING)
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    /// Moves the lower handle, never past the floor or the upper handle.
    pub fn nudge_low(&mut self, delta: f64) {
        self.low = (self.low + delta).clamp(self.floor, self.high);
    }

    /// Moves the upper handle, never past the lower handle or the ceiling.
    pub fn nudge_high(&mut self, delta: f64) {
        self.high = (self.high + delta).clamp(self.low, self.ceiling);
    }

    /// Records of `dataset` whose target lies inside the selection.
    pub fn apply(&self, dataset: &Dataset) -> Dataset {
        dataset.filter_by_target_range(self.low, self.high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::tests::with_targets;

    #[test]
    fn starts_at_initial_selection() {
        let r = PriceRange::for_dataset(&with_targets(&[5.0, 50.0]));
        assert_eq!((r.floor(), r.ceiling()), (5.0, 150.0));
        assert_eq!((r.low(), r.high()), (10.0, 100.0));
    }

    #[test]
    fn initial_selection_is_clamped() {
        let r = PriceRange::new(12.0, 40.0);
        assert_eq!((r.low(), r.high()), (12.0, 40.0));

        let r = PriceRange::new(200.0, 150.0);
        assert_eq!((r.floor(), r.ceiling()), (200.0, 200.0));
        assert_eq!((r.low(), r.high()), (200.0, 200.0));
    }

    #[test]
    fn handles_never_cross_or_leave_bounds() {
        let mut r = PriceRange::new(5.0, 150.0);

        r.nudge_low(-100.0);
        assert_eq!(r.low(), 5.0);

        r.nudge_low(500.0);
        assert_eq!(r.low(), r.high());

        r.nudge_high(1_000.0);
        assert_eq!(r.high(), 150.0);

        r.nudge_high(-1_000.0);
        assert_eq!(r.high(), r.low());
    }

    #[test]
    fn applies_inclusive_filter() {
        let ds = with_targets(&[15.0, 22.0, 50.0]);
        let mut r = PriceRange::new(10.0, 150.0);
        r.nudge_high(-75.0);

        assert_eq!((r.low(), r.high()), (10.0, 25.0));
        assert_eq!(r.apply(&ds).len(), 2);
    }
}
