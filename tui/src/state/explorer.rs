use housing::{
    Column, Dataset, Histogram, PriceRange, TablePreview, DEFAULT_SELECTION, HISTOGRAM_BINS,
};

/// Rows shown in the table preview.
pub const PREVIEW_ROWS: usize = 10;
/// Handle movement per arrow key.
pub const NUDGE_STEP: f64 = 1.0;
/// Handle movement per page key.
pub const NUDGE_JUMP: f64 = 10.0;

/// Which end of the price range the arrow keys move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Low,
    High,
}

/// Column picker and price-range selection of the page.
#[derive(Debug, Clone)]
pub struct ExplorerState {
    cursor: usize,
    selected: Vec<Column>,
    range: PriceRange,
    handle: Handle,
}

/// Everything the explorer half of the page draws, derived from the dataset on each render.
#[derive(Debug, Clone)]
pub struct ExplorerView {
    pub preview: TablePreview,
    pub histogram: Histogram,
    pub in_range: usize,
}

impl ExplorerState {
    pub fn new(dataset: &Dataset) -> Self {
        Self {
            cursor: 0,
            selected: DEFAULT_SELECTION.to_vec(),
            range: PriceRange::for_dataset(dataset),
            handle: Handle::Low,
        }
    }

    /// Column under the picker cursor.
    pub fn cursor(&self) -> Column {
        Column::ALL[self.cursor]
    }

    /// Moves the picker cursor, wrapping at both ends.
    pub fn move_cursor(&mut self, delta: isize) {
        let n = Column::ALL.len() as isize;
        self.cursor = (self.cursor as isize + delta).rem_euclid(n) as usize;
    }

    /// Adds or removes the column under the cursor. Newly added columns go to the end.
    ///
    /// Returns whether the column is selected afterwards.
    pub fn toggle(&mut self) -> bool {
        let column = self.cursor();
        match self.selected.iter().position(|&c| c == column) {
            Some(idx) => {
                self.selected.remove(idx);
                false
            }
            None => {
                self.selected.push(column);
                true
            }
        }
    }

    pub fn is_selected(&self, column: Column) -> bool {
        self.selected.contains(&column)
    }

    pub fn range(&self) -> &PriceRange {
        &self.range
    }

    pub fn handle(&self) -> Handle {
        self.handle
    }

    pub fn switch_handle(&mut self) {
        self.handle = match self.handle {
            Handle::Low => Handle::High,
            Handle::High => Handle::Low,
        };
    }

    /// Moves the active handle by `delta`.
    pub fn nudge(&mut self, delta: f64) {
        match self.handle {
            Handle::Low => self.range.nudge_low(delta),
            Handle::High => self.range.nudge_high(delta),
        }
    }

    pub fn view(&self, dataset: &Dataset) -> ExplorerView {
        let subset = self.range.apply(dataset);

        ExplorerView {
            preview: dataset.preview(&self.selected, PREVIEW_ROWS),
            histogram: Histogram::of_targets(&subset, HISTOGRAM_BINS),
            in_range: subset.len(),
        }
    }
}
