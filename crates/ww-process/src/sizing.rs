//! Nominal reactor, clarifier, membrane and media sizing.
//!
//! ## Model
//!
//! Volume is derived from the profile's [`DesignBasis`]:
//!
//! ```text
//! Kinetic:      HRT_h = SRT·Y·(BOD_in − BOD_design) / (MLSS·(1 + kd·SRT)) · 24
//! FixedHrt:     HRT_h = const
//! both:         V_total = Q · HRT_h / 24
//! MediaLoading: A_media = Q·BOD_in/1000 / L_BOD        (m²)
//!               V_media = A_media / SSA                (m³ carrier)
//!               V_aerobic = V_media / fill
//! ```
//!
//! For media loading the hydraulic volume `Q · HRT_nominal / 24` is evaluated
//! first and then replaced; BOD areal loading, not retention time, governs
//! the reactor.
//!
//! Negative outputs (influent BOD below the kinetic design target) are not
//! rejected. They are flagged with a [`ComputationWarning`] and, by default,
//! propagated unchanged.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ww_core::units::{Area, Time, Volume, hours, m2, m3};
use ww_core::{ComputationWarning, EffluentTargets, InfluentSpec, Pollutant, SizingField};

use crate::kinetics::KineticParams;
use crate::technology::{DesignBasis, DosingTargets, MediaSpec, Separation, Technology, TechnologyProfile};

/// What to do with a negative sizing output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativeSizingPolicy {
    /// Report the value as computed
    #[default]
    Propagate,
    /// Replace with zero (the warning is still recorded)
    ClampToZero,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SizingConfig {
    #[serde(default)]
    pub kinetics: KineticParams,
    #[serde(default)]
    pub negative_sizing: NegativeSizingPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClarifierSizing {
    pub area_m2: f64,
    pub sor_m3_m2_day: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MembraneSizing {
    pub area_m2: f64,
    pub flux_lmh: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MediaSizing {
    pub fill_fraction: f64,
    pub specific_surface_m2_m3: f64,
    /// Bulk carrier volume, m³
    pub volume_m3: f64,
    /// Protected surface the BOD load requires (media-loading basis only)
    pub required_area_m2: Option<f64>,
}

/// Output of a sizing calculator for one (influent, profile) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingResult {
    pub technology: Technology,
    pub hrt_hours: f64,
    pub srt_days: Option<f64>,
    pub mlss_mg_l: Option<f64>,
    pub total_volume_m3: f64,
    pub anoxic_volume_m3: f64,
    pub aerobic_volume_m3: f64,
    pub clarifier: Option<ClarifierSizing>,
    pub membrane: Option<MembraneSizing>,
    pub media: Option<MediaSizing>,
    pub targets: EffluentTargets,
    pub dosing_targets: DosingTargets,
    pub sludge_return: bool,
    #[serde(default)]
    pub warnings: Vec<ComputationWarning>,
}

impl SizingResult {
    pub fn hrt(&self) -> Time {
        hours(self.hrt_hours)
    }

    pub fn total_volume(&self) -> Volume {
        m3(self.total_volume_m3)
    }

    pub fn anoxic_volume(&self) -> Volume {
        m3(self.anoxic_volume_m3)
    }

    pub fn aerobic_volume(&self) -> Volume {
        m3(self.aerobic_volume_m3)
    }

    /// Clarifier or membrane area, whichever the train has.
    pub fn separation_area(&self) -> Option<Area> {
        self.clarifier
            .map(|c| c.area_m2)
            .or(self.membrane.map(|mb| mb.area_m2))
            .map(m2)
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Size one process train. Pure and total for any validated influent.
pub fn size(
    profile: &TechnologyProfile,
    spec: &InfluentSpec,
    config: &SizingConfig,
) -> SizingResult {
    let q = spec.flow_m3_day();
    let policy = config.negative_sizing;
    let mut warnings = Vec::new();

    let (hrt_hours, aerobic_override, loading_media) = match profile.basis {
        DesignBasis::Kinetic {
            srt_days,
            mlss_mg_l,
            design_bod_mg_l,
        } => {
            if spec.bod_mg_l() < design_bod_mg_l {
                warnings.push(ComputationWarning::InfluentBelowTarget {
                    pollutant: Pollutant::Bod,
                    influent_mg_l: spec.bod_mg_l(),
                    target_mg_l: design_bod_mg_l,
                });
            }
            let k = &config.kinetics;
            let hrt = srt_days * k.y * (spec.bod_mg_l() - design_bod_mg_l)
                / (mlss_mg_l * (1.0 + k.kd * srt_days))
                * 24.0;
            (hrt, None, None)
        }
        DesignBasis::FixedHrt { hrt_hours } => (hrt_hours, None, None),
        DesignBasis::MediaLoading {
            nominal_hrt_hours,
            bod_loading_g_m2_day,
            media,
        } => {
            let hydraulic_volume = q * nominal_hrt_hours / 24.0;
            let required_area = spec.bod_load_kg_day() / bod_loading_g_m2_day;
            let media_volume = required_area / media.specific_surface_m2_m3;
            let aerobic = media_volume / media.fill_fraction;
            debug!(
                technology = %profile.technology,
                hydraulic_volume_m3 = hydraulic_volume,
                loading_volume_m3 = aerobic,
                "media loading governs aerobic volume"
            );
            (
                nominal_hrt_hours,
                Some(aerobic),
                Some((media, media_volume, required_area)),
            )
        }
    };

    let hrt_hours = checked(SizingField::Hrt, hrt_hours, policy, &mut warnings);

    let (total, anoxic, aerobic) = match aerobic_override {
        Some(aerobic) => {
            let total = aerobic / (1.0 - profile.anoxic_fraction);
            (total, total - aerobic, aerobic)
        }
        None => {
            let total = q * hrt_hours / 24.0;
            let anoxic = total * profile.anoxic_fraction;
            (total, anoxic, total * (1.0 - profile.anoxic_fraction))
        }
    };
    let total_volume_m3 = checked(SizingField::TotalVolume, total, policy, &mut warnings);
    let anoxic_volume_m3 = checked(SizingField::AnoxicVolume, anoxic, policy, &mut warnings);
    let aerobic_volume_m3 = checked(SizingField::AerobicVolume, aerobic, policy, &mut warnings);

    let media = match loading_media {
        Some((spec_media, volume, area)) => Some(MediaSizing {
            fill_fraction: spec_media.fill_fraction,
            specific_surface_m2_m3: spec_media.specific_surface_m2_m3,
            volume_m3: checked(SizingField::MediaVolume, volume, policy, &mut warnings),
            required_area_m2: Some(checked(SizingField::MediaArea, area, policy, &mut warnings)),
        }),
        None => profile
            .carrier_media
            .map(|m| hybrid_media(m, aerobic_volume_m3, policy, &mut warnings)),
    };

    let (clarifier, membrane) = match profile.separation {
        Separation::Clarifier { sor_m3_m2_day } => (
            Some(ClarifierSizing {
                area_m2: q / sor_m3_m2_day,
                sor_m3_m2_day,
            }),
            None,
        ),
        Separation::Membrane { flux_lmh } => (
            None,
            Some(MembraneSizing {
                area_m2: (q * 1000.0 / 24.0) / flux_lmh,
                flux_lmh,
            }),
        ),
        Separation::None => (None, None),
    };

    debug!(
        technology = %profile.technology,
        hrt_hours,
        total_volume_m3,
        anoxic_volume_m3,
        aerobic_volume_m3,
        "sized process train"
    );
    for w in &warnings {
        warn!(technology = %profile.technology, "{w}");
    }

    SizingResult {
        technology: profile.technology,
        hrt_hours,
        srt_days: profile.srt_days,
        mlss_mg_l: profile.mlss_mg_l,
        total_volume_m3,
        anoxic_volume_m3,
        aerobic_volume_m3,
        clarifier,
        membrane,
        media,
        targets: profile.targets,
        dosing_targets: profile.dosing_targets,
        sludge_return: profile.sludge_return,
        warnings,
    }
}

fn hybrid_media(
    media: MediaSpec,
    aerobic_volume_m3: f64,
    policy: NegativeSizingPolicy,
    warnings: &mut Vec<ComputationWarning>,
) -> MediaSizing {
    let volume = aerobic_volume_m3 * media.fill_fraction;
    MediaSizing {
        fill_fraction: media.fill_fraction,
        specific_surface_m2_m3: media.specific_surface_m2_m3,
        volume_m3: checked(SizingField::MediaVolume, volume, policy, warnings),
        required_area_m2: None,
    }
}

fn checked(
    field: SizingField,
    value: f64,
    policy: NegativeSizingPolicy,
    warnings: &mut Vec<ComputationWarning>,
) -> f64 {
    if value >= 0.0 {
        return value;
    }
    let clamped = policy == NegativeSizingPolicy::ClampToZero;
    warnings.push(ComputationWarning::NegativeSizing {
        field,
        value,
        clamped,
    });
    if clamped { 0.0 } else { value }
}
