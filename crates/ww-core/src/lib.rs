//! ww-core: stable foundation for the WWTP designer.
//!
//! Contains:
//! - units (fixed conversion tables, flow units, display unit systems, uom constructors)
//! - numeric (finiteness and positivity checks)
//! - influent (raw influent input and the validated `InfluentSpec`)
//! - quality (water quality records shared by targets and effluent)
//! - warning (non-fatal computation warnings)
//! - error (shared error types)

pub mod error;
pub mod influent;
pub mod numeric;
pub mod quality;
pub mod units;
pub mod warning;

// Re-exports: nice ergonomics for downstream crates
pub use error::{ValidationError, WwError, WwResult};
pub use influent::{InfluentInput, InfluentSpec, normalize};
pub use numeric::{ensure_finite, ensure_positive};
pub use quality::{EffluentTargets, Pollutant, WaterQuality};
pub use units::{FlowUnit, UnitSystem};
pub use warning::{ComputationWarning, SizingField};
