//! Stored result types.

use core::fmt;

use serde::{Deserialize, Serialize};
use ww_process::{SizingResult, Technology};
use ww_sim::{AdjustmentFactors, SimulationResult};

pub type CaseId = String;

/// Whether a record is the initial design or an operator re-run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Variant {
    Initial,
    Adjusted,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Initial => f.write_str("initial"),
            Variant::Adjusted => f.write_str("adjusted"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResultKey {
    pub technology: Technology,
    pub variant: Variant,
}

impl ResultKey {
    pub fn initial(technology: Technology) -> Self {
        Self {
            technology,
            variant: Variant::Initial,
        }
    }

    pub fn adjusted(technology: Technology) -> Self {
        Self {
            technology,
            variant: Variant::Adjusted,
        }
    }
}

impl fmt::Display for ResultKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.technology, self.variant)
    }
}

/// One sizing plus one simulation, as produced by a design or adjust action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignRecord {
    pub case_id: CaseId,
    pub variant: Variant,
    /// RFC 3339
    pub created_at: String,
    pub seed: u64,
    pub sizing: SizingResult,
    pub simulation: SimulationResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjustments: Option<AdjustmentFactors>,
}

impl DesignRecord {
    pub fn new(
        case_id: CaseId,
        seed: u64,
        sizing: SizingResult,
        simulation: SimulationResult,
        adjustments: Option<AdjustmentFactors>,
    ) -> Self {
        let variant = if adjustments.is_some() {
            Variant::Adjusted
        } else {
            Variant::Initial
        };
        Self {
            case_id,
            variant,
            created_at: chrono::Utc::now().to_rfc3339(),
            seed,
            sizing,
            simulation,
            adjustments,
        }
    }

    pub fn key(&self) -> ResultKey {
        ResultKey {
            technology: self.sizing.technology,
            variant: self.variant,
        }
    }

    pub fn technology(&self) -> Technology {
        self.sizing.technology
    }
}
