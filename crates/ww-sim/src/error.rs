//! Error types for simulation operations.

use thiserror::Error;

/// Errors raised before a simulation runs. The mass balance itself has no
/// failure path.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-physical condition: {what}")]
    NonPhysical { what: &'static str },

    #[error(transparent)]
    Core(#[from] ww_core::WwError),
}

pub type SimResult<T> = Result<T, SimError>;

impl From<ww_core::ValidationError> for SimError {
    fn from(e: ww_core::ValidationError) -> Self {
        SimError::Core(e.into())
    }
}
