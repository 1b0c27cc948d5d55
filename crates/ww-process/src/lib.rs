//! ww-process: treatment technologies and their sizing calculators.
//!
//! Each supported technology (CAS, IFAS, MBR, MBBR) is a variant of the closed
//! [`Technology`] enum carrying a constant [`TechnologyProfile`]. A single
//! [`size`] function turns a profile and a validated influent into a
//! [`SizingResult`]. Sizing is pure and deterministic.
//!
//! # Example
//!
//! ```
//! use ww_core::InfluentInput;
//! use ww_process::{SizingConfig, Technology, size};
//!
//! let spec = InfluentInput::default().normalize().unwrap();
//! let sizing = size(&Technology::Mbr.profile(), &spec, &SizingConfig::default());
//! assert_eq!(sizing.hrt_hours, 5.0);
//! ```

pub mod kinetics;
pub mod sizing;
pub mod technology;

// Re-exports
pub use kinetics::KineticParams;
pub use sizing::{
    ClarifierSizing, MediaSizing, MembraneSizing, NegativeSizingPolicy, SizingConfig,
    SizingResult, size,
};
pub use technology::{
    DesignBasis, DosingTargets, MediaSpec, Separation, Technology, TechnologyProfile,
};
