//! Operator-facing unit conversion.
//!
//! Builds parallel display records from canonical results. Canonical values
//! are only read, never written; the mass balance never sees these numbers.

use serde::Serialize;
use ww_core::{UnitSystem, WaterQuality};
use ww_process::SizingResult;
use ww_sim::{PumpDuty, SimulationResult};

/// A converted value and the label of its unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quantity {
    pub value: f64,
    pub unit: &'static str,
}

impl Quantity {
    pub fn new(value: f64, unit: &'static str) -> Self {
        Self { value, unit }
    }
}

const HOURS: &str = "h";
const DAYS: &str = "days";
const MG_L: &str = "mg/L";
const KG_DAY: &str = "kg/day";
const LMH: &str = "L/m²/h";
const AIR_M3_H: &str = "m³/h";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizingDisplay {
    pub units: UnitSystem,
    pub hrt: Quantity,
    pub srt: Option<Quantity>,
    pub mlss: Option<Quantity>,
    pub total_volume: Quantity,
    pub anoxic_volume: Quantity,
    pub aerobic_volume: Quantity,
    pub clarifier_area: Option<Quantity>,
    pub clarifier_sor: Option<Quantity>,
    pub membrane_area: Option<Quantity>,
    pub membrane_flux: Option<Quantity>,
    pub media_volume: Option<Quantity>,
    pub media_area: Option<Quantity>,
}

impl SizingDisplay {
    pub fn new(sizing: &SizingResult, units: UnitSystem) -> Self {
        let volume = |m3: f64| Quantity::new(units.volume(m3), units.volume_label());
        let area = |m2: f64| Quantity::new(units.area(m2), units.area_label());
        Self {
            units,
            hrt: Quantity::new(sizing.hrt_hours, HOURS),
            srt: sizing.srt_days.map(|d| Quantity::new(d, DAYS)),
            mlss: sizing.mlss_mg_l.map(|c| Quantity::new(c, MG_L)),
            total_volume: volume(sizing.total_volume_m3),
            anoxic_volume: volume(sizing.anoxic_volume_m3),
            aerobic_volume: volume(sizing.aerobic_volume_m3),
            clarifier_area: sizing.clarifier.map(|c| area(c.area_m2)),
            clarifier_sor: sizing
                .clarifier
                .map(|c| Quantity::new(units.sor(c.sor_m3_m2_day), units.sor_label())),
            membrane_area: sizing.membrane.map(|m| area(m.area_m2)),
            membrane_flux: sizing.membrane.map(|m| Quantity::new(m.flux_lmh, LMH)),
            media_volume: sizing.media.map(|m| volume(m.volume_m3)),
            media_area: sizing
                .media
                .and_then(|m| m.required_area_m2)
                .map(area),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PumpDisplay {
    pub design: Quantity,
    pub operating: Quantity,
    pub adjustment_pct: f64,
}

impl PumpDisplay {
    fn pump(duty: &PumpDuty, units: UnitSystem) -> Self {
        let rate = |m3_h: f64| Quantity::new(units.pump_rate(m3_h), units.pump_rate_label());
        Self {
            design: rate(duty.design_m3_h),
            operating: rate(duty.operating_m3_h),
            adjustment_pct: duty.adjustment_pct,
        }
    }

    /// Blowers stay in m³/h for every unit system.
    fn blower(duty: &PumpDuty) -> Self {
        Self {
            design: Quantity::new(duty.design_m3_h, AIR_M3_H),
            operating: Quantity::new(duty.operating_m3_h, AIR_M3_H),
            adjustment_pct: duty.adjustment_pct,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationDisplay {
    pub units: UnitSystem,
    pub effluent: WaterQuality,
    pub ras_flow: Quantity,
    pub was_flow: Quantity,
    pub design_ras_flow: Quantity,
    pub design_was_flow: Quantity,
    pub alum_dose: Quantity,
    pub carbon_dose: Quantity,
    pub biological_sludge: Quantity,
    pub chemical_sludge: Quantity,
    pub total_sludge: Quantity,
    pub oxygen_demand: Quantity,
    pub required_air: Quantity,
    pub eq_pump: PumpDisplay,
    pub ras_pump: Option<PumpDisplay>,
    pub was_pump: Option<PumpDisplay>,
    pub blower: PumpDisplay,
    pub ras_valve_cv: Option<f64>,
    pub was_valve_cv: Option<f64>,
}

impl SimulationDisplay {
    pub fn new(sim: &SimulationResult, units: UnitSystem) -> Self {
        let flow = |m3_day: f64| Quantity::new(units.flow(m3_day), units.flow_label());
        let load = |kg_day: f64| Quantity::new(kg_day, KG_DAY);
        let eq = &sim.equipment;
        Self {
            units,
            effluent: sim.effluent,
            ras_flow: flow(sim.ras_flow_m3_day),
            was_flow: flow(sim.was_flow_m3_day),
            design_ras_flow: flow(sim.design_basis.ras_m3_day),
            design_was_flow: flow(sim.design_basis.was_m3_day),
            alum_dose: load(sim.alum_dose_kg_day),
            carbon_dose: load(sim.carbon_dose_kg_day),
            biological_sludge: load(sim.biological_sludge_kg_day),
            chemical_sludge: load(sim.chemical_sludge_kg_day),
            total_sludge: load(sim.total_sludge_kg_day),
            oxygen_demand: load(sim.oxygen_demand_kg_day),
            required_air: Quantity::new(sim.required_air_m3_h(), AIR_M3_H),
            eq_pump: PumpDisplay::pump(&eq.eq_pump, units),
            ras_pump: eq.ras_pump.as_ref().map(|d| PumpDisplay::pump(d, units)),
            was_pump: eq.was_pump.as_ref().map(|d| PumpDisplay::pump(d, units)),
            blower: PumpDisplay::blower(&eq.blower),
            ras_valve_cv: eq.ras_valve_cv,
            was_valve_cv: eq.was_valve_cv,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ww_core::InfluentInput;
    use ww_process::{SizingConfig, Technology, size};

    fn within(a: f64, b: f64, rel: f64) -> bool {
        (a - b).abs() <= rel * b.abs().max(1e-12)
    }

    #[test]
    fn us_display_round_trips_to_canonical() {
        let spec = InfluentInput::default().normalize().unwrap();
        let units = UnitSystem::UsCustomary;
        for tech in Technology::ALL {
            let sizing = size(&tech.profile(), &spec, &SizingConfig::default());
            let shown = SizingDisplay::new(&sizing, units);

            let back = units.volume_to_canonical(shown.total_volume.value);
            assert!(within(back, sizing.total_volume_m3, 1e-3));
            if let (Some(area), Some(c)) = (shown.clarifier_area, sizing.clarifier) {
                assert!(within(units.area_to_canonical(area.value), c.area_m2, 1e-3));
                let sor = shown.clarifier_sor.unwrap();
                assert!(within(units.sor_to_canonical(sor.value), c.sor_m3_m2_day, 1e-3));
            }
            assert_eq!(shown.total_volume.unit, "gal");
        }
    }

    #[test]
    fn influent_flow_round_trips_through_mgd() {
        let spec = InfluentInput::default().normalize().unwrap();
        let units = UnitSystem::UsCustomary;
        let shown = units.flow(spec.flow_m3_day());
        assert!(within(units.flow_to_canonical(shown), spec.flow_m3_day(), 1e-3));
    }

    #[test]
    fn metric_display_is_identity_for_sizing() {
        let spec = InfluentInput::default().normalize().unwrap();
        let sizing = size(&Technology::Ifas.profile(), &spec, &SizingConfig::default());
        let shown = SizingDisplay::new(&sizing, UnitSystem::Metric);
        assert_eq!(shown.total_volume.value, sizing.total_volume_m3);
        assert_eq!(shown.media_volume.unwrap().value, sizing.media.unwrap().volume_m3);
        assert!(shown.media_area.is_none());
        assert_eq!(shown.srt.unwrap().value, 8.0);
    }
}
