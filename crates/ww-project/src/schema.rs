//! Design case schema.

use serde::{Deserialize, Serialize};
use ww_core::{InfluentInput, InfluentSpec, UnitSystem};
use ww_process::{NegativeSizingPolicy, SizingConfig, Technology};
use ww_sim::{AdjustmentFactors, DEFAULT_SEED, SimParams};

pub const LATEST_VERSION: u32 = 1;

/// One plant design scenario: influent, what to size, and engine overrides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DesignCase {
    pub version: u32,
    pub name: String,
    pub influent: InfluentInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_units: Option<UnitSystem>,
    /// Empty means every technology
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub technologies: Vec<Technology>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adjustments: Option<AdjustmentFactors>,
    #[serde(default)]
    pub parameters: SimParams,
    #[serde(default)]
    pub negative_sizing: NegativeSizingPolicy,
}

impl DesignCase {
    pub fn new(name: impl Into<String>, influent: InfluentInput) -> Self {
        Self {
            version: LATEST_VERSION,
            name: name.into(),
            influent,
            display_units: None,
            technologies: Vec::new(),
            seed: None,
            adjustments: None,
            parameters: SimParams::default(),
            negative_sizing: NegativeSizingPolicy::default(),
        }
    }

    pub fn influent_spec(&self) -> Result<InfluentSpec, ww_core::ValidationError> {
        self.influent.normalize()
    }

    /// Explicit display system, else the one matching the influent flow unit.
    pub fn display_units(&self) -> UnitSystem {
        self.display_units
            .unwrap_or_else(|| UnitSystem::for_flow_unit(self.influent.flow_unit))
    }

    /// Selected technologies in canonical order.
    pub fn technologies(&self) -> Vec<Technology> {
        if self.technologies.is_empty() {
            return Technology::ALL.to_vec();
        }
        let mut techs = self.technologies.clone();
        techs.sort();
        techs.dedup();
        techs
    }

    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    pub fn sizing_config(&self) -> SizingConfig {
        SizingConfig {
            kinetics: self.parameters.kinetics,
            negative_sizing: self.negative_sizing,
        }
    }
}
