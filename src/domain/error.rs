//! Domain error types.

use super::validation::ValidationErrors;

/// Top-level error type for kubun-valuation.
#[derive(Debug, thiserror::Error)]
pub enum ValuationError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("cannot read input {file}: {reason}")]
    InputParse { file: String, reason: String },

    #[error("invalid input: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ValuationError {
    /// Process exit status for this error category.
    pub fn exit_status(&self) -> u8 {
        match self {
            ValuationError::Io(_) => 1,
            ValuationError::ConfigParse { .. } | ValuationError::ConfigInvalid { .. } => 2,
            ValuationError::InputParse { .. } | ValuationError::Validation(_) => 3,
            ValuationError::Report { .. } => 4,
        }
    }
}

impl From<&ValuationError> for std::process::ExitCode {
    fn from(err: &ValuationError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::input::Field;

    #[test]
    fn validation_errors_convert_and_display() {
        let mut errors = ValidationErrors::new();
        errors.insert(Field::Floor, "floor must be 0 or greater");
        let err: ValuationError = errors.into();
        assert_eq!(
            err.to_string(),
            "invalid input: floor: floor must be 0 or greater"
        );
    }

    #[test]
    fn exit_codes_by_category() {
        let config = ValuationError::ConfigInvalid {
            section: "rates".into(),
            key: "rent_right_rate".into(),
            reason: "out of range".into(),
        };
        assert_eq!(config.exit_status(), 2);

        let input = ValuationError::Validation(ValidationErrors::new());
        assert_eq!(input.exit_status(), 3);

        let report = ValuationError::Report {
            reason: "boom".into(),
        };
        assert_eq!(report.exit_status(), 4);

        let io = ValuationError::Io(std::io::Error::other("disk"));
        assert_eq!(io.exit_status(), 1);
    }
}
