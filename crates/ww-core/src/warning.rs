//! Non-fatal computation warnings.
//!
//! Physically implausible intermediate values (negative HRT when the influent
//! is already cleaner than the design target, negative removal loads, ...)
//! are carried through the records as-is and flagged here, so a front-end
//! can show a badge instead of aborting.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::quality::Pollutant;

/// Sizing output a warning refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingField {
    Hrt,
    TotalVolume,
    AnoxicVolume,
    AerobicVolume,
    MediaVolume,
    MediaArea,
}

impl SizingField {
    pub fn label(self) -> &'static str {
        match self {
            SizingField::Hrt => "HRT",
            SizingField::TotalVolume => "total basin volume",
            SizingField::AnoxicVolume => "anoxic volume",
            SizingField::AerobicVolume => "aerobic volume",
            SizingField::MediaVolume => "media volume",
            SizingField::MediaArea => "media surface area",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComputationWarning {
    /// Influent concentration is below the technology's design target.
    InfluentBelowTarget {
        pollutant: Pollutant,
        influent_mg_l: f64,
        target_mg_l: f64,
    },
    /// A sizing output came out negative. `clamped` is set when the
    /// configured policy replaced it with zero.
    NegativeSizing {
        field: SizingField,
        value: f64,
        clamped: bool,
    },
    /// Effluent concentration exceeds influent, so the removal load is negative.
    NegativeRemoval {
        pollutant: Pollutant,
        removed_kg_day: f64,
    },
    /// Sludge production went negative and took the WAS flow with it.
    NegativeWasFlow { was_m3_day: f64 },
}

impl fmt::Display for ComputationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComputationWarning::InfluentBelowTarget {
                pollutant,
                influent_mg_l,
                target_mg_l,
            } => write!(
                f,
                "influent {pollutant} ({influent_mg_l} mg/L) is below the design target ({target_mg_l} mg/L)"
            ),
            ComputationWarning::NegativeSizing {
                field,
                value,
                clamped,
            } => {
                write!(f, "{} is negative ({value:.3})", field.label())?;
                if *clamped {
                    write!(f, ", clamped to zero")?;
                }
                Ok(())
            }
            ComputationWarning::NegativeRemoval {
                pollutant,
                removed_kg_day,
            } => write!(
                f,
                "{pollutant} removal is negative ({removed_kg_day:.2} kg/day)"
            ),
            ComputationWarning::NegativeWasFlow { was_m3_day } => {
                write!(f, "WAS flow is negative ({was_m3_day:.2} m³/day)")
            }
        }
    }
}
