//! Heterotrophic growth constants shared by sizing and the mass balance.

use serde::{Deserialize, Serialize};
use ww_core::{WwResult, ensure_finite, ensure_positive};

/// Single-substrate biomass kinetics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KineticParams {
    /// Yield, kg VSS per kg BOD removed
    pub y: f64,
    /// Endogenous decay rate, 1/day
    pub kd: f64,
    /// TSS/VSS ratio of waste sludge
    pub tss_vss_ratio: f64,
}

impl Default for KineticParams {
    fn default() -> Self {
        Self {
            y: 0.6,
            kd: 0.06,
            tss_vss_ratio: 1.25,
        }
    }
}

impl KineticParams {
    pub fn validate(&self) -> WwResult<()> {
        ensure_positive(self.y, "kinetics.y")?;
        ensure_finite(self.kd, "kinetics.kd")?;
        if self.kd < 0.0 {
            return Err(ww_core::WwError::InvalidArg {
                what: "kinetics.kd cannot be negative",
            });
        }
        ensure_positive(self.tss_vss_ratio, "kinetics.tss_vss_ratio")?;
        Ok(())
    }

    /// Net observed yield at the given SRT: Y / (1 + kd·SRT).
    pub fn observed_yield(&self, srt_days: f64) -> f64 {
        self.y / (1.0 + self.kd * srt_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observed_yield_at_ten_days() {
        let k = KineticParams::default();
        assert!((k.observed_yield(10.0) - 0.375).abs() < 1e-12);
    }

    #[test]
    fn validate_rejects_negative_decay() {
        let k = KineticParams {
            kd: -0.1,
            ..KineticParams::default()
        };
        assert!(k.validate().is_err());
        assert!(KineticParams::default().validate().is_ok());
    }
}
