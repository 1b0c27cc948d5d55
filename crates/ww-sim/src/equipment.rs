//! Pump, blower and valve duty points.
//!
//! Equipment is sized at the design basis and operated at the adjusted rate.
//! Valve coefficients therefore always come from unadjusted flows.

use serde::{Deserialize, Serialize};

use crate::adjust::AdjustmentFactors;
use crate::params::ValveParams;

/// Kv → Cv conversion (US gpm/psi vs m³/h/bar).
const KV_PER_CV: f64 = 0.865;

/// A rate at design basis and at the operating point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PumpDuty {
    /// m³/h
    pub design_m3_h: f64,
    /// m³/h
    pub operating_m3_h: f64,
    /// Applied adjustment, %
    pub adjustment_pct: f64,
}

impl PumpDuty {
    fn new(design_m3_h: f64, adjustment_pct: f64) -> Self {
        Self {
            design_m3_h,
            operating_m3_h: design_m3_h * adjustment_pct / 100.0,
            adjustment_pct,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquipmentDuty {
    pub eq_pump: PumpDuty,
    /// `None` for trains without sludge return
    pub ras_pump: Option<PumpDuty>,
    pub was_pump: Option<PumpDuty>,
    /// Air, m³/h
    pub blower: PumpDuty,
    pub ras_valve_cv: Option<f64>,
    pub was_valve_cv: Option<f64>,
}

impl EquipmentDuty {
    /// All flows in m³/day at design basis.
    pub fn from_design(
        influent_m3_day: f64,
        ras_m3_day: Option<f64>,
        was_m3_day: Option<f64>,
        air_m3_day: f64,
        adjustments: &AdjustmentFactors,
        valve: &ValveParams,
    ) -> Self {
        let ras_m3_h = ras_m3_day.map(|q| q / 24.0);
        let was_m3_h = was_m3_day.map(|q| q / 24.0);
        Self {
            eq_pump: PumpDuty::new(influent_m3_day / 24.0, adjustments.eq_pump_pct()),
            ras_pump: ras_m3_h.map(|q| PumpDuty::new(q, adjustments.ras_pump_pct())),
            was_pump: was_m3_h.map(|q| PumpDuty::new(q, adjustments.was_pump_pct())),
            blower: PumpDuty::new(air_m3_day / 24.0, adjustments.air_blower_pct()),
            ras_valve_cv: ras_m3_h.and_then(|q| valve_cv(q, valve)),
            was_valve_cv: was_m3_h.and_then(|q| valve_cv(q, valve)),
        }
    }
}

/// Liquid-service valve coefficient for a flow in m³/h.
///
/// `Kv = Q·√(ρ_ref / (ρ·ΔP))`, `Cv = Kv / 0.865`. `None` when the flow or the
/// valve conditions are not positive.
pub fn valve_cv(flow_m3_h: f64, valve: &ValveParams) -> Option<f64> {
    if !(flow_m3_h > 0.0 && valve.pressure_drop_bar > 0.0 && valve.density_kg_m3 > 0.0) {
        return None;
    }
    let kv = flow_m3_h
        * (valve.reference_density_kg_m3 / (valve.density_kg_m3 * valve.pressure_drop_bar)).sqrt();
    Some(kv / KV_PER_CV)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cv_for_water_at_half_bar() {
        let cv = valve_cv(100.0, &ValveParams::default()).unwrap();
        let expected = 100.0 * 2.0_f64.sqrt() / 0.865;
        assert!((cv - expected).abs() < 1e-9);
    }

    #[test]
    fn no_cv_without_flow() {
        assert_eq!(valve_cv(0.0, &ValveParams::default()), None);
        assert_eq!(valve_cv(-5.0, &ValveParams::default()), None);
    }

    #[test]
    fn operating_rate_scales_design_rate() {
        let adj = AdjustmentFactors::new(120.0, 50.0, 100.0, 80.0).unwrap();
        let duty = EquipmentDuty::from_design(
            24_000.0,
            Some(18_000.0),
            Some(240.0),
            48_000.0,
            &adj,
            &ValveParams::default(),
        );
        assert_eq!(duty.eq_pump.design_m3_h, 1000.0);
        assert_eq!(duty.eq_pump.operating_m3_h, 1200.0);
        let ras = duty.ras_pump.unwrap();
        assert_eq!(ras.design_m3_h, 750.0);
        assert_eq!(ras.operating_m3_h, 375.0);
        assert_eq!(duty.blower.operating_m3_h, 1600.0);
        assert_eq!(duty.ras_valve_cv, valve_cv(750.0, &ValveParams::default()));
    }
}
