//! Design case validation logic.

use std::collections::HashSet;

use crate::schema::{DesignCase, LATEST_VERSION};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Duplicate technology: {technology}")]
    DuplicateTechnology { technology: String },

    #[error("Invalid influent: {0}")]
    Influent(#[from] ww_core::ValidationError),

    #[error("Invalid parameters: {0}")]
    Parameters(#[from] ww_sim::SimError),
}

pub fn validate_case(case: &DesignCase) -> Result<(), ValidationError> {
    if case.version == 0 || case.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: case.version,
        });
    }

    if case.name.trim().is_empty() {
        return Err(ValidationError::InvalidValue {
            field: "name".to_string(),
            value: format!("{:?}", case.name),
            reason: "case name cannot be empty".to_string(),
        });
    }

    case.influent_spec()?;

    let mut seen = HashSet::new();
    for tech in &case.technologies {
        if !seen.insert(*tech) {
            return Err(ValidationError::DuplicateTechnology {
                technology: tech.code().to_string(),
            });
        }
    }

    case.parameters.validate()?;
    Ok(())
}
