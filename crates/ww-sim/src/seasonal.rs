//! Synthetic year-long effluent signal for trend charts.
//!
//! Each pollutant follows `base · (1 + A·cos(2π(day − peak)/365)) + U·span`,
//! floored at zero. Nothing here feeds back into sizing or the mass balance.

use std::f64::consts::TAU;

use rand::Rng;
use serde::{Deserialize, Serialize};
use ww_core::WaterQuality;

use crate::params::NoiseSpans;
use crate::rng::centered;
use crate::simulate::SimulationResult;

const DAYS_PER_YEAR: f64 = 365.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonalParams {
    /// Relative amplitude per pollutant
    pub amplitude: WaterQuality,
    /// Day of year with the worst effluent (cold-season nitrification loss)
    pub peak_day: f64,
    pub noise: NoiseSpans,
}

impl Default for SeasonalParams {
    fn default() -> Self {
        Self {
            amplitude: WaterQuality::new(0.15, 0.15, 0.25, 0.10),
            peak_day: 15.0,
            noise: NoiseSpans::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeasonalPoint {
    /// Day index starting at 0
    pub day: u32,
    pub effluent: WaterQuality,
}

pub fn seasonal_series<R: Rng>(
    result: &SimulationResult,
    days: u32,
    params: &SeasonalParams,
    rng: &mut R,
) -> Vec<SeasonalPoint> {
    let base = result.effluent;
    let amp = params.amplitude;
    let noise = &params.noise;

    (0..days)
        .map(|day| {
            let phase = (TAU * (f64::from(day) - params.peak_day) / DAYS_PER_YEAR).cos();
            let mut point = |value: f64, a: f64, span: f64| {
                let u = centered(rng);
                (value * (1.0 + a * phase) + u * span).max(0.0)
            };
            // draw order matches the single-shot simulation: TKN, TP, BOD, TSS
            let tkn = point(base.tkn_mg_l, amp.tkn_mg_l, noise.tkn_mg_l);
            let tp = point(base.tp_mg_l, amp.tp_mg_l, noise.tp_mg_l);
            let bod = point(base.bod_mg_l, amp.bod_mg_l, noise.bod_mg_l);
            let tss = point(base.tss_mg_l, amp.tss_mg_l, noise.tss_mg_l);
            SeasonalPoint {
                day,
                effluent: WaterQuality::new(bod, tss, tkn, tp),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{NoiseSpans, SimParams};
    use crate::rng::SimRng;
    use crate::simulate::simulate;
    use ww_core::{FlowUnit, normalize};
    use ww_process::{SizingConfig, TechnologyProfile, size};

    fn cas_result() -> SimulationResult {
        let spec =
            normalize(10_000.0, FlowUnit::CubicMetersPerDay, 250.0, 220.0, 40.0, 7.0, false, false)
                .unwrap();
        let sizing = size(&TechnologyProfile::CAS, &spec, &SizingConfig::default());
        simulate(&spec, &sizing, None, &SimParams::default(), &mut SimRng::default())
    }

    #[test]
    fn noiseless_series_peaks_on_peak_day() {
        let result = cas_result();
        let params = SeasonalParams {
            noise: NoiseSpans::zero(),
            ..SeasonalParams::default()
        };
        let series = seasonal_series(&result, 365, &params, &mut SimRng::default());
        assert_eq!(series.len(), 365);

        let peak = &series[15];
        assert!((peak.effluent.tkn_mg_l - result.effluent.tkn_mg_l * 1.25).abs() < 1e-9);
        let max_tkn = series
            .iter()
            .map(|p| p.effluent.tkn_mg_l)
            .fold(f64::MIN, f64::max);
        assert_eq!(max_tkn, peak.effluent.tkn_mg_l);
    }

    #[test]
    fn series_is_never_negative() {
        let result = cas_result();
        let params = SeasonalParams {
            amplitude: WaterQuality::new(2.0, 2.0, 2.0, 2.0),
            ..SeasonalParams::default()
        };
        let series = seasonal_series(&result, 365, &params, &mut SimRng::from_seed_u64(3));
        for p in series {
            for v in [p.effluent.bod_mg_l, p.effluent.tss_mg_l, p.effluent.tkn_mg_l, p.effluent.tp_mg_l] {
                assert!(v >= 0.0);
            }
        }
    }
}
