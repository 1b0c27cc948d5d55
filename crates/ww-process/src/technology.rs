//! Technology set and their fixed design profiles.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use ww_core::{EffluentTargets, WaterQuality};

/// Supported treatment technologies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Technology {
    /// Conventional Activated Sludge
    #[serde(rename = "CAS", alias = "cas")]
    Cas,
    /// Integrated Fixed-Film Activated Sludge
    #[serde(rename = "IFAS", alias = "ifas")]
    Ifas,
    /// Membrane Bioreactor
    #[serde(rename = "MBR", alias = "mbr")]
    Mbr,
    /// Moving Bed Biofilm Reactor
    #[serde(rename = "MBBR", alias = "mbbr")]
    Mbbr,
}

impl Technology {
    pub const ALL: [Technology; 4] = [
        Technology::Cas,
        Technology::Ifas,
        Technology::Mbr,
        Technology::Mbbr,
    ];

    /// Stable position in [`Technology::ALL`].
    pub fn index(self) -> usize {
        match self {
            Technology::Cas => 0,
            Technology::Ifas => 1,
            Technology::Mbr => 2,
            Technology::Mbbr => 3,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Technology::Cas => "CAS",
            Technology::Ifas => "IFAS",
            Technology::Mbr => "MBR",
            Technology::Mbbr => "MBBR",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Technology::Cas => "Conventional Activated Sludge",
            Technology::Ifas => "Integrated Fixed-Film Activated Sludge",
            Technology::Mbr => "Membrane Bioreactor",
            Technology::Mbbr => "Moving Bed Biofilm Reactor",
        }
    }

    pub fn profile(self) -> TechnologyProfile {
        match self {
            Technology::Cas => TechnologyProfile::CAS,
            Technology::Ifas => TechnologyProfile::IFAS,
            Technology::Mbr => TechnologyProfile::MBR,
            Technology::Mbbr => TechnologyProfile::MBBR,
        }
    }
}

impl fmt::Display for Technology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Technology {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Technology::ALL
            .into_iter()
            .find(|t| t.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown technology '{s}' (expected CAS, IFAS, MBR or MBBR)"))
    }
}

/// Plastic carrier media.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MediaSpec {
    /// Carrier fill as a fraction of the reactor volume
    pub fill_fraction: f64,
    /// Protected specific surface area, m²/m³ of carrier
    pub specific_surface_m2_m3: f64,
}

/// How the reactor volume is derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DesignBasis {
    /// HRT from single-substrate kinetics at a fixed SRT and MLSS.
    Kinetic {
        srt_days: f64,
        mlss_mg_l: f64,
        design_bod_mg_l: f64,
    },
    /// HRT fixed by rule of thumb.
    FixedHrt { hrt_hours: f64 },
    /// Aerobic volume governed by BOD areal loading on carrier media. The
    /// nominal HRT volume is still evaluated but not reported.
    MediaLoading {
        nominal_hrt_hours: f64,
        bod_loading_g_m2_day: f64,
        media: MediaSpec,
    },
}

/// Solids separation step after the bioreactor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Separation {
    Clarifier { sor_m3_m2_day: f64 },
    /// Flux in L/m²/h
    Membrane { flux_lmh: f64 },
    /// Not sized
    None,
}

/// Effluent concentrations chemical dosing drives toward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DosingTargets {
    /// Carbon-source (methanol) dosing target
    pub tkn_mg_l: f64,
    /// Alum dosing target
    pub tp_mg_l: f64,
}

/// Fixed design constants for one technology. Engineering defaults, never
/// derived from influent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TechnologyProfile {
    pub technology: Technology,
    pub srt_days: Option<f64>,
    pub mlss_mg_l: Option<f64>,
    pub basis: DesignBasis,
    /// Fraction of total volume that is anoxic, in [0, 1)
    pub anoxic_fraction: f64,
    /// Hybrid media placed in the aerobic zone (IFAS)
    pub carrier_media: Option<MediaSpec>,
    pub separation: Separation,
    pub targets: EffluentTargets,
    pub dosing_targets: DosingTargets,
    /// Whether the train has RAS/WAS streams
    pub sludge_return: bool,
}

const CAS_SRT_DAYS: f64 = 10.0;
const CAS_MLSS_MG_L: f64 = 3500.0;

impl TechnologyProfile {
    pub const CAS: TechnologyProfile = TechnologyProfile {
        technology: Technology::Cas,
        srt_days: Some(CAS_SRT_DAYS),
        mlss_mg_l: Some(CAS_MLSS_MG_L),
        basis: DesignBasis::Kinetic {
            srt_days: CAS_SRT_DAYS,
            mlss_mg_l: CAS_MLSS_MG_L,
            design_bod_mg_l: 10.0,
        },
        anoxic_fraction: 0.3,
        carrier_media: None,
        separation: Separation::Clarifier {
            sor_m3_m2_day: 24.0,
        },
        targets: WaterQuality::new(10.0, 12.0, 8.0, 2.0),
        dosing_targets: DosingTargets {
            tkn_mg_l: 3.0,
            tp_mg_l: 0.8,
        },
        sludge_return: true,
    };

    pub const IFAS: TechnologyProfile = TechnologyProfile {
        technology: Technology::Ifas,
        srt_days: Some(8.0),
        mlss_mg_l: Some(3000.0),
        basis: DesignBasis::FixedHrt { hrt_hours: 6.0 },
        anoxic_fraction: 0.3,
        carrier_media: Some(MediaSpec {
            fill_fraction: 0.4,
            specific_surface_m2_m3: 500.0,
        }),
        separation: Separation::Clarifier {
            sor_m3_m2_day: 28.0,
        },
        targets: WaterQuality::new(8.0, 10.0, 5.0, 1.5),
        dosing_targets: DosingTargets {
            tkn_mg_l: 2.0,
            tp_mg_l: 0.8,
        },
        sludge_return: true,
    };

    pub const MBR: TechnologyProfile = TechnologyProfile {
        technology: Technology::Mbr,
        srt_days: Some(15.0),
        mlss_mg_l: Some(8000.0),
        basis: DesignBasis::FixedHrt { hrt_hours: 5.0 },
        anoxic_fraction: 0.4,
        carrier_media: None,
        separation: Separation::Membrane { flux_lmh: 20.0 },
        targets: WaterQuality::new(5.0, 1.0, 4.0, 1.0),
        dosing_targets: DosingTargets {
            tkn_mg_l: 2.0,
            tp_mg_l: 0.5,
        },
        sludge_return: true,
    };

    pub const MBBR: TechnologyProfile = TechnologyProfile {
        technology: Technology::Mbbr,
        srt_days: None,
        mlss_mg_l: None,
        basis: DesignBasis::MediaLoading {
            nominal_hrt_hours: 4.0,
            bod_loading_g_m2_day: 5.0,
            media: MediaSpec {
                fill_fraction: 0.5,
                specific_surface_m2_m3: 500.0,
            },
        },
        anoxic_fraction: 0.0,
        carrier_media: None,
        separation: Separation::None,
        targets: WaterQuality::new(15.0, 20.0, 10.0, 2.5),
        dosing_targets: DosingTargets {
            tkn_mg_l: 3.0,
            tp_mg_l: 0.8,
        },
        sludge_return: false,
    };

    /// Whether the train has a separate anoxic zone.
    pub fn has_anoxic_zone(&self) -> bool {
        self.anoxic_fraction > 0.0
    }
}
