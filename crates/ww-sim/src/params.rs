//! Engine constants, grouped by concern.
//!
//! Every group has a `Default` holding the stock design values and
//! deserializes field by field, so a case file may override any subset.

use serde::{Deserialize, Serialize};
use ww_core::{ensure_finite, ensure_positive};
use ww_process::KineticParams;

use crate::error::{SimError, SimResult};

/// Oxygen demand and air transfer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AerationParams {
    /// kg O₂ per kg BOD removed
    pub o2_per_bod: f64,
    /// kg O₂ per kg N nitrified
    pub o2_per_n: f64,
    /// Standard oxygen transfer efficiency, fraction
    pub sote: f64,
    /// Mass fraction of O₂ in air
    pub o2_mass_fraction: f64,
    /// Air density, kg/m³
    pub air_density_kg_m3: f64,
}

impl Default for AerationParams {
    fn default() -> Self {
        Self {
            o2_per_bod: 1.5,
            o2_per_n: 4.57,
            sote: 0.30,
            o2_mass_fraction: 0.232,
            air_density_kg_m3: 1.225,
        }
    }
}

impl AerationParams {
    /// kg O₂ delivered per m³ of air supplied.
    pub fn o2_per_m3_air(&self) -> f64 {
        self.sote * self.o2_mass_fraction * self.air_density_kg_m3
    }
}

/// Chemical dose and chemical sludge ratios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChemicalFactors {
    /// kg alum per kg P removed
    pub alum_per_p: f64,
    /// kg methanol per kg N removed
    pub methanol_per_n: f64,
    /// kg chemical sludge per kg P removed chemically
    pub sludge_per_p: f64,
}

impl Default for ChemicalFactors {
    fn default() -> Self {
        Self {
            alum_per_p: 9.7,
            methanol_per_n: 2.86,
            sludge_per_p: 4.5,
        }
    }
}

/// Full width of the uniform noise applied to each effluent target, mg/L.
/// A draw is `target + U(-0.5, 0.5) · span`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseSpans {
    pub bod_mg_l: f64,
    pub tss_mg_l: f64,
    pub tkn_mg_l: f64,
    pub tp_mg_l: f64,
}

impl Default for NoiseSpans {
    fn default() -> Self {
        Self {
            bod_mg_l: 3.0,
            tss_mg_l: 4.0,
            tkn_mg_l: 1.0,
            tp_mg_l: 0.2,
        }
    }
}

impl NoiseSpans {
    /// No noise; draws return the targets.
    pub fn zero() -> Self {
        Self {
            bod_mg_l: 0.0,
            tss_mg_l: 0.0,
            tkn_mg_l: 0.0,
            tp_mg_l: 0.0,
        }
    }
}

/// Sludge handling and the fallbacks used when a train has no SRT/MLSS.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SludgeParams {
    /// WAS solids concentration as a fraction of MLSS
    pub was_solids_factor: f64,
    /// RAS flow as a fraction of influent flow
    pub ras_ratio: f64,
    pub default_srt_days: f64,
    pub default_mlss_mg_l: f64,
}

impl Default for SludgeParams {
    fn default() -> Self {
        Self {
            was_solids_factor: 0.8,
            ras_ratio: 0.75,
            default_srt_days: 10.0,
            default_mlss_mg_l: 3500.0,
        }
    }
}

/// Conditions for sizing the RAS/WAS control valves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValveParams {
    /// Pressure drop across the valve, bar
    pub pressure_drop_bar: f64,
    /// Sludge density, kg/m³
    pub density_kg_m3: f64,
    /// Reference density for Kv, kg/m³
    pub reference_density_kg_m3: f64,
}

impl Default for ValveParams {
    fn default() -> Self {
        Self {
            pressure_drop_bar: 0.5,
            density_kg_m3: 1000.0,
            reference_density_kg_m3: 1000.0,
        }
    }
}

/// Everything the simulator reads besides the influent and the sizing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimParams {
    pub kinetics: KineticParams,
    pub aeration: AerationParams,
    pub chemicals: ChemicalFactors,
    pub noise: NoiseSpans,
    pub sludge: SludgeParams,
    pub valve: ValveParams,
}

impl SimParams {
    pub fn validate(&self) -> SimResult<()> {
        self.kinetics.validate()?;

        let a = &self.aeration;
        ensure_finite(a.o2_per_bod, "aeration.o2_per_bod")?;
        ensure_finite(a.o2_per_n, "aeration.o2_per_n")?;
        ensure_positive(a.sote, "aeration.sote")?;
        ensure_positive(a.o2_mass_fraction, "aeration.o2_mass_fraction")?;
        ensure_positive(a.air_density_kg_m3, "aeration.air_density_kg_m3")?;
        if a.sote > 1.0 || a.o2_mass_fraction > 1.0 {
            return Err(SimError::NonPhysical {
                what: "aeration fractions must not exceed 1",
            });
        }

        let c = &self.chemicals;
        ensure_finite(c.alum_per_p, "chemicals.alum_per_p")?;
        ensure_finite(c.methanol_per_n, "chemicals.methanol_per_n")?;
        ensure_finite(c.sludge_per_p, "chemicals.sludge_per_p")?;
        if c.alum_per_p < 0.0 || c.methanol_per_n < 0.0 || c.sludge_per_p < 0.0 {
            return Err(SimError::InvalidArg {
                what: "chemical ratios cannot be negative",
            });
        }

        let n = &self.noise;
        for (span, what) in [
            (n.bod_mg_l, "noise.bod_mg_l"),
            (n.tss_mg_l, "noise.tss_mg_l"),
            (n.tkn_mg_l, "noise.tkn_mg_l"),
            (n.tp_mg_l, "noise.tp_mg_l"),
        ] {
            ensure_finite(span, what)?;
            if span < 0.0 {
                return Err(SimError::InvalidArg {
                    what: "noise spans cannot be negative",
                });
            }
        }

        let s = &self.sludge;
        ensure_positive(s.was_solids_factor, "sludge.was_solids_factor")?;
        ensure_finite(s.ras_ratio, "sludge.ras_ratio")?;
        if s.ras_ratio < 0.0 {
            return Err(SimError::InvalidArg {
                what: "sludge.ras_ratio cannot be negative",
            });
        }
        ensure_finite(s.default_srt_days, "sludge.default_srt_days")?;
        ensure_positive(s.default_mlss_mg_l, "sludge.default_mlss_mg_l")?;

        let v = &self.valve;
        ensure_positive(v.pressure_drop_bar, "valve.pressure_drop_bar")?;
        ensure_positive(v.density_kg_m3, "valve.density_kg_m3")?;
        ensure_positive(v.reference_density_kg_m3, "valve.reference_density_kg_m3")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        SimParams::default().validate().unwrap();
    }

    #[test]
    fn air_transfer_constant() {
        let a = AerationParams::default();
        assert!((a.o2_per_m3_air() - 0.30 * 0.232 * 1.225).abs() < 1e-15);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let params: SimParams =
            serde_json::from_str(r#"{"aeration": {"sote": 0.25}, "sludge": {"ras_ratio": 1.0}}"#)
                .unwrap();
        assert_eq!(params.aeration.sote, 0.25);
        assert_eq!(params.aeration.o2_per_n, 4.57);
        assert_eq!(params.sludge.ras_ratio, 1.0);
        assert_eq!(params.sludge.default_mlss_mg_l, 3500.0);
        assert_eq!(params.chemicals, ChemicalFactors::default());
    }

    #[test]
    fn rejects_zero_transfer_efficiency() {
        let mut params = SimParams::default();
        params.aeration.sote = 0.0;
        assert!(params.validate().is_err());

        params.aeration.sote = 1.5;
        assert!(matches!(params.validate(), Err(SimError::NonPhysical { .. })));
    }

    #[test]
    fn rejects_negative_noise() {
        let mut params = SimParams::default();
        params.noise.tp_mg_l = -0.1;
        assert!(params.validate().is_err());
    }
}
