use thiserror::Error;

pub type WwResult<T> = Result<T, WwError>;

#[derive(Error, Debug)]
pub enum WwError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("{what} must be positive, got {value}")]
    NotPositive { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Invariant violated: {what}")]
    Invariant { what: &'static str },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Rejected operator input. Raised before any calculation runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Non-finite value for {field}: {value}")]
    NonFinite { field: &'static str, value: f64 },

    #[error("Influent flow must be positive, got {value}")]
    NonPositiveFlow { value: f64 },

    #[error("Concentration {field} must be non-negative, got {value} mg/L")]
    NegativeConcentration { field: &'static str, value: f64 },

    #[error("Adjustment {field} must be within [{min}, {max}] %, got {value}")]
    AdjustmentOutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_converts_into_core_error() {
        let err: WwError = ValidationError::NonPositiveFlow { value: 0.0 }.into();
        assert!(matches!(err, WwError::Validation(_)));
        assert!(err.to_string().contains("must be positive"));
    }
}
