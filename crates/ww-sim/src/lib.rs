//! Stochastic mass-balance simulation for sized process trains.
//!
//! Provides:
//! - Effluent quality draws around each technology's targets
//! - Carbon-source and alum dosing feedback
//! - Sludge production, RAS/WAS flows, oxygen and air demand
//! - Operator adjustment factors and equipment duty (pumps, blower, valve Cv)
//! - A synthetic seasonal effluent series for charting
//!
//! Every call takes its noise source explicitly. [`simulate_seeded`] builds a
//! fresh [`SimRng`] per call so equal seeds give equal results.

pub mod adjust;
pub mod equipment;
pub mod error;
pub mod params;
pub mod rng;
pub mod seasonal;
pub mod simulate;

// Re-exports for public API
pub use adjust::AdjustmentFactors;
pub use equipment::{EquipmentDuty, PumpDuty, valve_cv};
pub use error::{SimError, SimResult};
pub use params::{AerationParams, ChemicalFactors, NoiseSpans, SimParams, SludgeParams, ValveParams};
pub use rng::{DEFAULT_SEED, SimRng, centered, derive_seed};
pub use seasonal::{SeasonalParams, SeasonalPoint, seasonal_series};
pub use simulate::{DefaultsApplied, DesignBasisFlows, SimulationResult, simulate, simulate_seeded};
