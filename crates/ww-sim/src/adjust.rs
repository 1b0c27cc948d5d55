//! Operator adjustment factors.

use serde::{Deserialize, Serialize};
use ww_core::ValidationError;

/// Percentage multipliers applied to design-basis rates. 100 leaves a rate
/// unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAdjustments")]
pub struct AdjustmentFactors {
    eq_pump_pct: f64,
    ras_pump_pct: f64,
    was_pump_pct: f64,
    air_blower_pct: f64,
}

#[derive(Deserialize)]
#[serde(default)]
struct RawAdjustments {
    eq_pump_pct: f64,
    ras_pump_pct: f64,
    was_pump_pct: f64,
    air_blower_pct: f64,
}

impl Default for RawAdjustments {
    fn default() -> Self {
        Self {
            eq_pump_pct: 100.0,
            ras_pump_pct: 100.0,
            was_pump_pct: 100.0,
            air_blower_pct: 100.0,
        }
    }
}

impl TryFrom<RawAdjustments> for AdjustmentFactors {
    type Error = ValidationError;

    fn try_from(raw: RawAdjustments) -> Result<Self, Self::Error> {
        AdjustmentFactors::new(
            raw.eq_pump_pct,
            raw.ras_pump_pct,
            raw.was_pump_pct,
            raw.air_blower_pct,
        )
    }
}

impl Default for AdjustmentFactors {
    fn default() -> Self {
        Self {
            eq_pump_pct: 100.0,
            ras_pump_pct: 100.0,
            was_pump_pct: 100.0,
            air_blower_pct: 100.0,
        }
    }
}

impl AdjustmentFactors {
    pub const MIN_PCT: f64 = 0.0;
    pub const MAX_PCT: f64 = 150.0;

    pub fn new(
        eq_pump_pct: f64,
        ras_pump_pct: f64,
        was_pump_pct: f64,
        air_blower_pct: f64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            eq_pump_pct: check_pct("eq_pump_pct", eq_pump_pct)?,
            ras_pump_pct: check_pct("ras_pump_pct", ras_pump_pct)?,
            was_pump_pct: check_pct("was_pump_pct", was_pump_pct)?,
            air_blower_pct: check_pct("air_blower_pct", air_blower_pct)?,
        })
    }

    pub fn eq_pump_pct(&self) -> f64 {
        self.eq_pump_pct
    }

    pub fn ras_pump_pct(&self) -> f64 {
        self.ras_pump_pct
    }

    pub fn was_pump_pct(&self) -> f64 {
        self.was_pump_pct
    }

    pub fn air_blower_pct(&self) -> f64 {
        self.air_blower_pct
    }

    pub fn eq_scale(&self) -> f64 {
        self.eq_pump_pct / 100.0
    }

    pub fn ras_scale(&self) -> f64 {
        self.ras_pump_pct / 100.0
    }

    pub fn was_scale(&self) -> f64 {
        self.was_pump_pct / 100.0
    }

    pub fn air_scale(&self) -> f64 {
        self.air_blower_pct / 100.0
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

fn check_pct(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFinite { field, value });
    }
    if !(AdjustmentFactors::MIN_PCT..=AdjustmentFactors::MAX_PCT).contains(&value) {
        return Err(ValidationError::AdjustmentOutOfRange {
            field,
            value,
            min: AdjustmentFactors::MIN_PCT,
            max: AdjustmentFactors::MAX_PCT,
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        assert!(AdjustmentFactors::new(0.0, 150.0, 100.0, 100.0).is_ok());
        let err = AdjustmentFactors::new(100.0, 150.1, 100.0, 100.0).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::AdjustmentOutOfRange {
                field: "ras_pump_pct",
                ..
            }
        ));
        assert!(AdjustmentFactors::new(-1.0, 100.0, 100.0, 100.0).is_err());
        assert!(AdjustmentFactors::new(100.0, 100.0, f64::NAN, 100.0).is_err());
    }

    #[test]
    fn missing_fields_default_to_100() {
        let adj: AdjustmentFactors = serde_json::from_str(r#"{"ras_pump_pct": 50}"#).unwrap();
        assert_eq!(adj.ras_scale(), 0.5);
        assert_eq!(adj.air_blower_pct(), 100.0);
        assert!(!adj.is_identity());
        assert!(AdjustmentFactors::default().is_identity());
    }

    #[test]
    fn out_of_range_rejected_on_load() {
        let res: Result<AdjustmentFactors, _> = serde_json::from_str(r#"{"air_blower_pct": 200}"#);
        assert!(res.is_err());
    }
}
