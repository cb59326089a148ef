use std::ops::RangeInclusive;

use crate::{
    dataset::{Column, Dataset},
    HousingError, Result,
};

/// Placeholder shown for the room count until the user types a value.
pub const ROOM_COUNT_PLACEHOLDER: f64 = 1.0;

/// Whether the tract bounds the river, collected as a yes/no choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RiverBoundary {
    #[default]
    Yes,
    No,
}

impl RiverBoundary {
    pub fn as_value(self) -> f64 {
        match self {
            RiverBoundary::Yes => 1.0,
            RiverBoundary::No => 0.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiverBoundary::Yes => "yes",
            RiverBoundary::No => "no",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            RiverBoundary::Yes => RiverBoundary::No,
            RiverBoundary::No => RiverBoundary::Yes,
        }
    }
}

/// One prediction input.
///
/// Fields are named rather than positional; [`FeatureVector::to_array`] is the single place
/// that fixes the order the model sees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub crim: f64,
    pub indus: f64,
    pub chas: RiverBoundary,
    pub nox: f64,
    pub rm: f64,
    pub ptratio: f64,
    pub b: f64,
    pub lstat: f64,
}

impl FeatureVector {
    /// The model input, in [`Column::FEATURES`] order.
    pub fn to_array(&self) -> [f64; 8] {
        [
            self.crim,
            self.indus,
            self.chas.as_value(),
            self.nox,
            self.rm,
            self.ptratio,
            self.b,
            self.lstat,
        ]
    }

    pub fn get(&self, column: Column) -> Option<f64> {
        let idx = Column::FEATURES.iter().position(|&c| c == column)?;
        Some(self.to_array()[idx])
    }
}

/// Inclusive range a user-entered value must fall in, `None` for the choice field.
pub fn bounds(column: Column) -> Option<RangeInclusive<f64>> {
    match column {
        Column::Crim => Some(0.0..=100.0),
        Column::Indus => Some(0.0..=100.0),
        Column::Chas => None,
        Column::Nox => Some(0.0..=1.0),
        Column::Rm => Some(1.0..=20.0),
        Column::Ptratio => Some(1.0..=40.0),
        Column::B => Some(0.0..=400.0),
        Column::Lstat => Some(0.0..=100.0),
        Column::Medv => None,
    }
}

/// Parses a numeric input field, rejecting anything the model should not see.
///
/// # Errors
/// `InvalidInput` if the text is not a finite number or falls outside [`bounds`].
pub fn parse_feature(column: Column, text: &str) -> Result<f64> {
    let invalid = |reason: String| HousingError::InvalidInput {
        field: column.name(),
        value: text.to_string(),
        reason,
    };

    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| invalid("not a number".into()))?;

    check_feature(column, value).map_err(|e| match e {
        HousingError::InvalidInput { reason, .. } => invalid(reason),
        other => other,
    })
}

/// Checks an already numeric value against the field's accepted range.
///
/// # Errors
/// `InvalidInput` if the value is not finite, out of [`bounds`], or the column is not a
/// numeric input.
pub fn check_feature(column: Column, value: f64) -> Result<f64> {
    let invalid = |reason: String| HousingError::InvalidInput {
        field: column.name(),
        value: value.to_string(),
        reason,
    };

    let range = bounds(column).ok_or_else(|| invalid("not a numeric input".into()))?;

    if !value.is_finite() {
        return Err(invalid("must be finite".into()));
    }

    if !range.contains(&value) {
        return Err(invalid(format!(
            "must be between {} and {}",
            range.start(),
            range.end()
        )));
    }

    Ok(value)
}

/// Initial widget values: column means, except the room count placeholder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureDefaults(FeatureVector);

impl FeatureDefaults {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let mean = |c: Column| dataset.mean(c).unwrap_or(0.0);

        Self(FeatureVector {
            crim: mean(Column::Crim),
            indus: mean(Column::Indus),
            chas: RiverBoundary::default(),
            nox: mean(Column::Nox),
            rm: ROOM_COUNT_PLACEHOLDER,
            ptratio: mean(Column::Ptratio),
            b: mean(Column::B),
            lstat: mean(Column::Lstat),
        })
    }

    pub fn vector(&self) -> FeatureVector {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::tests::with_targets;

    fn vector() -> FeatureVector {
        FeatureVector {
            crim: 1.0,
            indus: 2.0,
            chas: RiverBoundary::No,
            nox: 0.4,
            rm: 5.0,
            ptratio: 16.0,
            b: 380.0,
            lstat: 7.0,
        }
    }

    #[test]
    fn array_follows_training_order() {
        let v = vector();
        assert_eq!(v.to_array(), [1.0, 2.0, 0.0, 0.4, 5.0, 16.0, 380.0, 7.0]);

        for (i, c) in Column::FEATURES.into_iter().enumerate() {
            assert_eq!(v.get(c), Some(v.to_array()[i]));
        }
        assert_eq!(v.get(Column::Medv), None);
    }

    #[test]
    fn river_choice_maps_to_binary() {
        assert_eq!(RiverBoundary::Yes.as_value(), 1.0);
        assert_eq!(RiverBoundary::No.as_value(), 0.0);
        assert_eq!(RiverBoundary::Yes.toggled(), RiverBoundary::No);
    }

    #[test]
    fn parses_values_inside_bounds() {
        assert_eq!(parse_feature(Column::Nox, " 0.538 ").unwrap(), 0.538);
        assert_eq!(parse_feature(Column::Rm, "1").unwrap(), 1.0);
        assert_eq!(parse_feature(Column::B, "400").unwrap(), 400.0);
    }

    #[test]
    fn rejects_garbage_and_out_of_range() {
        for (col, text) in [
            (Column::Crim, "abc"),
            (Column::Crim, ""),
            (Column::Crim, "-0.5"),
            (Column::Nox, "1.5"),
            (Column::Lstat, "NaN"),
            (Column::Ptratio, "inf"),
            (Column::Chas, "1"),
        ] {
            let err = parse_feature(col, text).unwrap_err();
            assert!(
                matches!(err, HousingError::InvalidInput { field, .. } if field == col.name()),
                "{col:?} {text:?} -> {err}"
            );
        }
    }

    #[test]
    fn checks_numeric_values() {
        assert_eq!(check_feature(Column::Lstat, 12.5).unwrap(), 12.5);
        assert!(check_feature(Column::Rm, 0.5).is_err());
        assert!(check_feature(Column::Chas, 1.0).is_err());
        assert!(check_feature(Column::Crim, f64::INFINITY).is_err());
    }

    #[test]
    fn defaults_use_column_means_and_room_placeholder() {
        let ds = with_targets(&[10.0, 20.0, 30.0]);
        let d = FeatureDefaults::from_dataset(&ds).vector();

        assert_eq!(d.indus, ds.mean(Column::Indus).unwrap());
        assert_eq!(d.crim, ds.mean(Column::Crim).unwrap());
        assert_eq!(d.lstat, 10.0);
        assert_eq!(d.rm, ROOM_COUNT_PLACEHOLDER);
        assert_eq!(d.chas, RiverBoundary::Yes);
    }
}
