use std::{
    error::Error,
    fmt::{self, Display},
    path::PathBuf,
};

/// The result type used across the housing data and model layer.
pub type Result<T> = std::result::Result<T, HousingError>;

/// Errors produced while loading the dataset, fitting the model or reading user input.
#[derive(Debug, Clone, PartialEq)]
pub enum HousingError {
    /// The dataset resource is missing or malformed. Fatal at startup.
    ResourceUnavailable { path: PathBuf, reason: String },
    /// The model could not be fitted. Fatal at startup.
    FitFailure(String),
    /// A user-entered feature value was rejected at the input boundary.
    InvalidInput {
        field: &'static str,
        value: String,
        reason: String,
    },
}

impl HousingError {
    pub(crate) fn unavailable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ResourceUnavailable {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if the error must abort the process.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::InvalidInput { .. })
    }
}

impl Display for HousingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResourceUnavailable { path, reason } => {
                write!(f, "dataset '{}' is unavailable: {reason}", path.display())
            }
            Self::FitFailure(reason) => write!(f, "model fitting failed: {reason}"),
            Self::InvalidInput {
                field,
                value,
                reason,
            } => write!(f, "invalid value '{value}' for {field}: {reason}"),
        }
    }
}

impl Error for HousingError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_input_errors_are_recoverable() {
        assert!(HousingError::unavailable("x.csv", "missing").is_fatal());
        assert!(HousingError::FitFailure("empty".into()).is_fatal());

        let input = HousingError::InvalidInput {
            field: "NOX",
            value: "abc".into(),
            reason: "not a number".into(),
        };
        assert!(!input.is_fatal());
        assert_eq!(input.to_string(), "invalid value 'abc' for NOX: not a number");
    }
}
