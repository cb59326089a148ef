use std::{io, path::Path};

use ndarray::{Array1, Array2};
use serde::Deserialize;

use crate::{HousingError, Result};

/// A named field of the housing dataset, in header order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Crim,
    Indus,
    Chas,
    Nox,
    Rm,
    Ptratio,
    B,
    Lstat,
    Medv,
}

impl Column {
    /// Every column, in the order of the CSV header.
    pub const ALL: [Column; 9] = [
        Column::Crim,
        Column::Indus,
        Column::Chas,
        Column::Nox,
        Column::Rm,
        Column::Ptratio,
        Column::B,
        Column::Lstat,
        Column::Medv,
    ];

    /// The model inputs, in the order the forest is trained on.
    pub const FEATURES: [Column; 8] = [
        Column::Crim,
        Column::Indus,
        Column::Chas,
        Column::Nox,
        Column::Rm,
        Column::Ptratio,
        Column::B,
        Column::Lstat,
    ];

    /// The column the model predicts.
    pub const TARGET: Column = Column::Medv;

    /// Header name as it appears in the CSV resource.
    pub fn name(self) -> &'static str {
        match self {
            Column::Crim => "CRIM",
            Column::Indus => "INDUS",
            Column::Chas => "CHAS",
            Column::Nox => "NOX",
            Column::Rm => "RM",
            Column::Ptratio => "PTRATIO",
            Column::B => "B",
            Column::Lstat => "LSTAT",
            Column::Medv => "MEDV",
        }
    }

    /// Human readable label used by input widgets.
    pub fn label(self) -> &'static str {
        match self {
            Column::Crim => "Crime rate",
            Column::Indus => "Business acreage proportion",
            Column::Chas => "Bounds the river?",
            Column::Nox => "Nitric oxide concentration",
            Column::Rm => "Number of rooms",
            Column::Ptratio => "Pupil-teacher ratio",
            Column::B => "African-American descent proportion",
            Column::Lstat => "Lower-status population %",
            Column::Medv => "Median value",
        }
    }

    pub fn from_name(name: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|c| c.name() == name)
    }
}

/// Columns selected in the table preview before the user changes anything.
pub const DEFAULT_SELECTION: [Column; 4] =
    [Column::Rm, Column::Ptratio, Column::Lstat, Column::Medv];

/// Header names of the dataset, in order.
pub fn list_columns() -> Vec<&'static str> {
    Column::ALL.iter().map(|c| c.name()).collect()
}

/// One row of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Record {
    #[serde(rename = "CRIM")]
    pub crim: f64,
    #[serde(rename = "INDUS")]
    pub indus: f64,
    #[serde(rename = "CHAS")]
    pub chas: f64,
    #[serde(rename = "NOX")]
    pub nox: f64,
    #[serde(rename = "RM")]
    pub rm: f64,
    #[serde(rename = "PTRATIO")]
    pub ptratio: f64,
    #[serde(rename = "B")]
    pub b: f64,
    #[serde(rename = "LSTAT")]
    pub lstat: f64,
    #[serde(rename = "MEDV")]
    pub medv: f64,
}

impl Record {
    pub fn value(&self, column: Column) -> f64 {
        match column {
            Column::Crim => self.crim,
            Column::Indus => self.indus,
            Column::Chas => self.chas,
            Column::Nox => self.nox,
            Column::Rm => self.rm,
            Column::Ptratio => self.ptratio,
            Column::B => self.b,
            Column::Lstat => self.lstat,
            Column::Medv => self.medv,
        }
    }

    /// Checks the per-row invariants of the resource.
    fn validate(&self) -> std::result::Result<(), String> {
        if let Some(c) = Column::ALL.into_iter().find(|&c| !self.value(c).is_finite()) {
            return Err(format!("{} is not a finite number", c.name()));
        }

        if self.chas != 0.0 && self.chas != 1.0 {
            return Err(format!("CHAS must be 0 or 1, got {}", self.chas));
        }

        Ok(())
    }
}

/// The first rows of a column subset, ready to be rendered as a table.
#[derive(Debug, Clone, PartialEq)]
pub struct TablePreview {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<f64>>,
}

/// An immutable, ordered collection of records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// Parses a dataset from CSV text with the fixed housing header.
    ///
    /// # Arguments
    /// * `reader` - The CSV source.
    /// * `origin` - Where the text came from, used in error messages.
    ///
    /// # Errors
    /// `ResourceUnavailable` if the header differs from the expected one, a cell is not a
    /// finite number, or `CHAS` is not binary.
    pub fn from_csv_reader<R: io::Read>(reader: R, origin: &Path) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr
            .headers()
            .map_err(|e| HousingError::unavailable(origin, format!("cannot read header: {e}")))?;

        let got: Vec<&str> = headers.iter().collect();
        if got != list_columns() {
            return Err(HousingError::unavailable(
                origin,
                format!(
                    "unexpected header [{}], expected [{}]",
                    got.join(", "),
                    list_columns().join(", ")
                ),
            ));
        }

        let mut records = Vec::new();
        for (i, row) in rdr.deserialize::<Record>().enumerate() {
            // header is line 1
            let line = i + 2;
            let record = row
                .map_err(|e| HousingError::unavailable(origin, format!("line {line}: {e}")))?;
            record.validate().map_err(|reason| {
                HousingError::unavailable(origin, format!("line {line}: {reason}"))
            })?;
            records.push(record);
        }

        Ok(Self { records })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[inline]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn column_values(&self, column: Column) -> Vec<f64> {
        self.records.iter().map(|r| r.value(column)).collect()
    }

    /// Arithmetic mean of a column, `None` for an empty dataset.
    pub fn mean(&self, column: Column) -> Option<f64> {
        if self.is_empty() {
            return None;
        }

        let sum: f64 = self.records.iter().map(|r| r.value(column)).sum();
        Some(sum / self.len() as f64)
    }

    pub fn target_min(&self) -> Option<f64> {
        self.records.iter().map(|r| r.medv).reduce(f64::min)
    }

    pub fn target_max(&self) -> Option<f64> {
        self.records.iter().map(|r| r.medv).reduce(f64::max)
    }

    /// Returns the records whose target lies in `[low, high]`, keeping their order.
    ///
    /// An inverted range (`low > high`) yields an empty dataset.
    pub fn filter_by_target_range(&self, low: f64, high: f64) -> Dataset {
        let records = self
            .records
            .iter()
            .filter(|r| low <= r.medv && r.medv <= high)
            .copied()
            .collect();

        Dataset { records }
    }

    /// Feature matrix with one row per record and the columns in [`Column::FEATURES`] order.
    pub fn feature_matrix(&self) -> Array2<f64> {
        let width = Column::FEATURES.len();
        Array2::from_shape_fn((self.len(), width), |(i, j)| {
            self.records[i].value(Column::FEATURES[j])
        })
    }

    pub fn targets(&self) -> Array1<f64> {
        self.records.iter().map(|r| r.value(Column::TARGET)).collect()
    }

    /// Takes the first `n` rows of the given columns, in the order the columns were given.
    pub fn preview(&self, columns: &[Column], n: usize) -> TablePreview {
        let headers = columns.iter().map(|c| c.name()).collect();
        let rows = self
            .records
            .iter()
            .take(n)
            .map(|r| columns.iter().map(|&c| r.value(c)).collect())
            .collect();

        TablePreview { headers, rows }
    }
}
