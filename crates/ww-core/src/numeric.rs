//! Checks on raw parameter values before they reach a formula.

use crate::WwError;

pub fn ensure_finite(value: f64, what: &'static str) -> Result<f64, WwError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(WwError::NonFinite { what, value })
    }
}

/// Finite and strictly positive. Used for denominators in parameter tables.
pub fn ensure_positive(value: f64, what: &'static str) -> Result<f64, WwError> {
    match ensure_finite(value, what)? {
        v if v > 0.0 => Ok(v),
        v => Err(WwError::NotPositive { what, value: v }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_parameters_are_named() {
        let err = ensure_finite(f64::NAN, "aeration.sote").unwrap_err();
        assert!(err.to_string().contains("aeration.sote"));
        assert!(ensure_finite(f64::INFINITY, "kinetics.y").is_err());
        assert_eq!(ensure_finite(-2.0, "kinetics.kd").unwrap(), -2.0);
    }

    #[test]
    fn ensure_positive_rejects_zero() {
        assert!(ensure_positive(0.0, "sote").is_err());
        assert!(ensure_positive(-1.0, "sote").is_err());
        assert!(ensure_positive(f64::NAN, "sote").is_err());
        assert_eq!(ensure_positive(0.3, "sote").unwrap(), 0.3);
    }
}
