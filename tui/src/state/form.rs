use housing::{
    features::{check_feature, parse_feature},
    predict, Column, FeatureDefaults, FeatureVector, HousingError, RiverBoundary, TrainedModel,
};

/// Sidebar slots: one per feature, then the button.
pub const SLOTS: usize = Column::FEATURES.len() + 1;

/// What the sidebar cursor is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Field(Column),
    Predict,
}

/// Result of the last button press, cleared as soon as any input changes.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Price(String),
    Rejected(HousingError),
}

/// The prediction sidebar.
///
/// Numeric fields keep their default until the user types; an untouched field feeds the
/// exact default to the model rather than its rounded rendering.
#[derive(Debug, Clone)]
pub struct FormState {
    defaults: FeatureVector,
    edits: [Option<String>; 8],
    river: RiverBoundary,
    cursor: usize,
    outcome: Option<Outcome>,
}

impl FormState {
    pub fn new(defaults: FeatureDefaults) -> Self {
        let defaults = defaults.vector();
        Self {
            defaults,
            edits: Default::default(),
            river: defaults.chas,
            cursor: 0,
            outcome: None,
        }
    }

    pub fn focused(&self) -> Slot {
        match Column::FEATURES.get(self.cursor) {
            Some(&column) => Slot::Field(column),
            None => Slot::Predict,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves between fields and the button, wrapping at both ends.
    pub fn move_cursor(&mut self, delta: isize) {
        self.cursor = (self.cursor as isize + delta).rem_euclid(SLOTS as isize) as usize;
    }

    /// Types `c` into the focused numeric field.
    ///
    /// The first keystroke on an untouched field replaces its default. Characters that
    /// cannot be part of a number are ignored. Returns whether the field changed.
    pub fn input(&mut self, c: char) -> bool {
        if !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')) {
            return false;
        }

        let Some(idx) = self.numeric_slot() else {
            return false;
        };

        self.edits[idx].get_or_insert_with(String::new).push(c);
        self.touched();
        true
    }

    /// Deletes the last character of the focused numeric field.
    ///
    /// On an untouched field this starts editing from the rendered default.
    pub fn backspace(&mut self) -> bool {
        let Some(idx) = self.numeric_slot() else {
            return false;
        };

        let default = render(self.defaults.to_array()[idx]);
        self.edits[idx].get_or_insert(default).pop();
        self.touched();
        true
    }

    /// Puts the focused field back to its default.
    pub fn reset_field(&mut self) -> bool {
        match self.focused() {
            Slot::Field(Column::Chas) if self.river != self.defaults.chas => {
                self.river = self.defaults.chas;
            }
            Slot::Field(_) => match self.numeric_slot() {
                Some(idx) if self.edits[idx].is_some() => self.edits[idx] = None,
                _ => return false,
            },
            Slot::Predict => return false,
        }
        self.touched();
        true
    }

    pub fn toggle_river(&mut self) {
        self.river = self.river.toggled();
        self.touched();
    }

    /// Text shown for a field: what the user typed, or the rendered default.
    pub fn display(&self, column: Column) -> String {
        if column == Column::Chas {
            return self.river.label().to_string();
        }

        match feature_slot(column) {
            Some(idx) => self.edits[idx]
                .clone()
                .unwrap_or_else(|| render(self.defaults.to_array()[idx])),
            None => String::new(),
        }
    }

    pub fn is_edited(&self, column: Column) -> bool {
        feature_slot(column).is_some_and(|idx| self.edits[idx].is_some())
    }

    /// Value the model would get for a field.
    ///
    /// # Errors
    /// `InvalidInput` if the field holds something the model must not see.
    pub fn value(&self, column: Column) -> housing::Result<f64> {
        if column == Column::Chas {
            return Ok(self.river.as_value());
        }

        let idx = feature_slot(column).ok_or_else(|| HousingError::InvalidInput {
            field: column.name(),
            value: String::new(),
            reason: "not a prediction input".into(),
        })?;

        match &self.edits[idx] {
            Some(text) => parse_feature(column, text),
            None => check_feature(column, self.defaults.to_array()[idx]),
        }
    }

    /// Assembles the model input from the current field values.
    ///
    /// # Errors
    /// The first `InvalidInput`, in field order.
    pub fn collect(&self) -> housing::Result<FeatureVector> {
        Ok(FeatureVector {
            crim: self.value(Column::Crim)?,
            indus: self.value(Column::Indus)?,
            chas: self.river,
            nox: self.value(Column::Nox)?,
            rm: self.value(Column::Rm)?,
            ptratio: self.value(Column::Ptratio)?,
            b: self.value(Column::B)?,
            lstat: self.value(Column::Lstat)?,
        })
    }

    /// The button press: validates, predicts and keeps the outcome until the next edit.
    ///
    /// # Errors
    /// `InvalidInput` if any field is rejected; nothing is predicted then.
    pub fn submit(&mut self, model: &TrainedModel) -> housing::Result<String> {
        let outcome = self.collect().map(|vector| predict(model, &vector));

        self.outcome = Some(match &outcome {
            Ok(price) => Outcome::Price(price.clone()),
            Err(e) => Outcome::Rejected(e.clone()),
        });

        outcome
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    fn numeric_slot(&self) -> Option<usize> {
        match self.focused() {
            Slot::Field(column) if column != Column::Chas => feature_slot(column),
            _ => None,
        }
    }

    fn touched(&mut self) {
        self.outcome = None;
    }
}

fn feature_slot(column: Column) -> Option<usize> {
    Column::FEATURES.iter().position(|&c| c == column)
}

fn render(value: f64) -> String {
    format!("{value:.2}")
}
