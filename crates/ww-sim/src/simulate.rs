//! Stochastic performance simulation of one sized process train.
//!
//! ## Algorithm
//!
//! Draw order is fixed so a seeded generator reproduces a run exactly:
//!
//! 1. TKN, then TP: `target + U(-0.5, 0.5)·span`, not floored
//! 2. carbon-source dosing pulls TKN down to its dosing target
//! 3. alum dosing pulls TP down to its dosing target
//! 4. BOD, then TSS: `max(0, target + U·span)`
//! 5. mass balance: biological + chemical sludge, WAS/RAS, O₂ and air
//! 6. adjustments scale RAS, WAS and air after the design basis is fixed
//!
//! Dosing only ever lowers a concentration. When the drawn value already
//! meets the dosing target the dose is zero and the value is kept.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ww_core::{ComputationWarning, InfluentSpec, Pollutant, WaterQuality};
use ww_process::{SizingResult, Technology};

use crate::adjust::AdjustmentFactors;
use crate::equipment::EquipmentDuty;
use crate::error::SimResult;
use crate::params::SimParams;
use crate::rng::{SimRng, centered};

/// Unadjusted rates the equipment is sized for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignBasisFlows {
    pub ras_m3_day: f64,
    pub was_m3_day: f64,
    pub air_m3_day: f64,
}

/// Fallback values substituted because the sizing carried none.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DefaultsApplied {
    pub srt_days: Option<f64>,
    pub mlss_mg_l: Option<f64>,
}

impl DefaultsApplied {
    pub fn any(&self) -> bool {
        self.srt_days.is_some() || self.mlss_mg_l.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub technology: Technology,
    pub effluent: WaterQuality,
    /// Operating RAS flow, m³/day
    pub ras_flow_m3_day: f64,
    /// Operating WAS flow, m³/day
    pub was_flow_m3_day: f64,
    pub design_basis: DesignBasisFlows,
    pub alum_dose_kg_day: f64,
    pub carbon_dose_kg_day: f64,
    pub bod_removed_kg_day: f64,
    /// Nitrogen removed through nitrification, kg/day
    pub nitrogen_removed_kg_day: f64,
    pub biological_sludge_kg_day: f64,
    pub chemical_sludge_kg_day: f64,
    pub total_sludge_kg_day: f64,
    pub oxygen_demand_kg_day: f64,
    /// Operating air flow, m³/day
    pub required_air_m3_day: f64,
    pub equipment: EquipmentDuty,
    pub adjustments: Option<AdjustmentFactors>,
    pub defaults_applied: DefaultsApplied,
    #[serde(default)]
    pub warnings: Vec<ComputationWarning>,
    /// Seed the noise source was built from, when known
    pub seed: Option<u64>,
}

impl SimulationResult {
    pub fn required_air_m3_h(&self) -> f64 {
        self.required_air_m3_day / 24.0
    }

    pub fn is_adjusted(&self) -> bool {
        self.adjustments.is_some()
    }
}

/// Dose needed to bring `current` down to `target`. Returns the removed load
/// (kg/day) and the new concentration; nothing is removed when `current`
/// already meets the target.
fn dose_down(current_mg_l: f64, target_mg_l: f64, flow_m3_day: f64) -> (f64, f64) {
    let to_remove = (current_mg_l - target_mg_l) * flow_m3_day / 1000.0;
    if to_remove > 0.0 {
        (to_remove, target_mg_l)
    } else {
        (0.0, current_mg_l)
    }
}

/// Run the mass balance once.
///
/// `params` are assumed valid (see [`SimParams::validate`]). Invalid sizing
/// values are tolerated and flow through, flagged as warnings.
pub fn simulate<R: Rng>(
    spec: &InfluentSpec,
    sizing: &SizingResult,
    adjustments: Option<&AdjustmentFactors>,
    params: &SimParams,
    rng: &mut R,
) -> SimulationResult {
    let q = spec.flow_m3_day();
    let targets = sizing.targets;
    let noise = &params.noise;
    let mut warnings = Vec::new();

    // 1. nutrients
    let mut tkn = targets.tkn_mg_l + centered(rng) * noise.tkn_mg_l;
    let mut tp = targets.tp_mg_l + centered(rng) * noise.tp_mg_l;

    // 2. carbon source
    let mut carbon_dose_kg_day = 0.0;
    if spec.use_carbon_source() {
        let (removed, after) = dose_down(tkn, sizing.dosing_targets.tkn_mg_l, q);
        carbon_dose_kg_day = removed * params.chemicals.methanol_per_n;
        tkn = after;
    }

    // 3. alum
    let mut alum_dose_kg_day = 0.0;
    let mut p_removed_chemically = 0.0;
    if spec.use_alum() {
        let (removed, after) = dose_down(tp, sizing.dosing_targets.tp_mg_l, q);
        p_removed_chemically = removed;
        alum_dose_kg_day = removed * params.chemicals.alum_per_p;
        tp = after;
    }

    // 4. organics and solids
    let bod = (targets.bod_mg_l + centered(rng) * noise.bod_mg_l).max(0.0);
    let tss = (targets.tss_mg_l + centered(rng) * noise.tss_mg_l).max(0.0);
    let effluent = WaterQuality::new(bod, tss, tkn, tp);

    // 5. sludge
    let mut defaults_applied = DefaultsApplied::default();
    let srt = match sizing.srt_days {
        Some(srt) => srt,
        None => {
            defaults_applied.srt_days = Some(params.sludge.default_srt_days);
            params.sludge.default_srt_days
        }
    };

    let bod_removed_kg_day = (spec.bod_mg_l() - bod) * q / 1000.0;
    if bod_removed_kg_day < 0.0 {
        warnings.push(ComputationWarning::NegativeRemoval {
            pollutant: Pollutant::Bod,
            removed_kg_day: bod_removed_kg_day,
        });
    }
    let k = &params.kinetics;
    let vss = bod_removed_kg_day * k.observed_yield(srt);
    let biological_sludge_kg_day = vss * k.tss_vss_ratio;
    let chemical_sludge_kg_day = p_removed_chemically * params.chemicals.sludge_per_p;
    let total_sludge_kg_day = biological_sludge_kg_day + chemical_sludge_kg_day;

    // 6. sludge streams
    let (ras_design, was_design) = if sizing.sludge_return {
        let mlss = match sizing.mlss_mg_l {
            Some(mlss) => mlss,
            None => {
                defaults_applied.mlss_mg_l = Some(params.sludge.default_mlss_mg_l);
                params.sludge.default_mlss_mg_l
            }
        };
        let was = total_sludge_kg_day * 1000.0 / (params.sludge.was_solids_factor * mlss);
        if was < 0.0 {
            warnings.push(ComputationWarning::NegativeWasFlow { was_m3_day: was });
        }
        (q * params.sludge.ras_ratio, was)
    } else {
        (0.0, 0.0)
    };

    // 7. aeration
    let nitrogen_removed_kg_day = (spec.tkn_mg_l() - tkn) * q / 1000.0;
    if nitrogen_removed_kg_day < 0.0 {
        warnings.push(ComputationWarning::NegativeRemoval {
            pollutant: Pollutant::Tkn,
            removed_kg_day: nitrogen_removed_kg_day,
        });
    }
    let a = &params.aeration;
    let oxygen_demand_kg_day =
        bod_removed_kg_day * a.o2_per_bod + nitrogen_removed_kg_day * a.o2_per_n;
    let air_design = oxygen_demand_kg_day / a.o2_per_m3_air();

    // 8. operating point
    let factors = adjustments.copied().unwrap_or_default();
    let equipment = EquipmentDuty::from_design(
        q,
        sizing.sludge_return.then_some(ras_design),
        sizing.sludge_return.then_some(was_design),
        air_design,
        &factors,
        &params.valve,
    );

    debug!(
        technology = %sizing.technology,
        bod_removed_kg_day,
        total_sludge_kg_day,
        oxygen_demand_kg_day,
        air_design_m3_day = air_design,
        "mass balance closed"
    );
    for w in &warnings {
        warn!(technology = %sizing.technology, "{w}");
    }

    SimulationResult {
        technology: sizing.technology,
        effluent,
        ras_flow_m3_day: ras_design * factors.ras_scale(),
        was_flow_m3_day: was_design * factors.was_scale(),
        design_basis: DesignBasisFlows {
            ras_m3_day: ras_design,
            was_m3_day: was_design,
            air_m3_day: air_design,
        },
        alum_dose_kg_day,
        carbon_dose_kg_day,
        bod_removed_kg_day,
        nitrogen_removed_kg_day,
        biological_sludge_kg_day,
        chemical_sludge_kg_day,
        total_sludge_kg_day,
        oxygen_demand_kg_day,
        required_air_m3_day: air_design * factors.air_scale(),
        equipment,
        adjustments: adjustments.copied(),
        defaults_applied,
        warnings,
        seed: None,
    }
}

/// Validate `params`, then simulate with a fresh generator built from `seed`.
pub fn simulate_seeded(
    spec: &InfluentSpec,
    sizing: &SizingResult,
    adjustments: Option<&AdjustmentFactors>,
    params: &SimParams,
    seed: u64,
) -> SimResult<SimulationResult> {
    params.validate()?;
    let mut rng = SimRng::from_seed_u64(seed);
    let mut result = simulate(spec, sizing, adjustments, params, &mut rng);
    result.seed = Some(seed);
    Ok(result)
}
