//! Case loading, saving and validation.

use std::path::Path;

use ww_core::UnitSystem;
use ww_process::Technology;
use ww_project::DesignCase;

use crate::error::{AppError, AppResult};

/// Summary of a case for listing.
#[derive(Debug, Clone)]
pub struct CaseSummary {
    pub name: String,
    pub flow_m3_day: f64,
    pub display_units: UnitSystem,
    pub technologies: Vec<Technology>,
    pub seed: u64,
    pub has_adjustments: bool,
}

/// Load a case file (YAML or JSON by extension).
pub fn load_case(path: &Path) -> AppResult<DesignCase> {
    if !path.exists() {
        return Err(AppError::CaseFileRead {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file does not exist"),
        });
    }
    let case = ww_project::load_case(path)?;
    tracing::debug!(name = %case.name, path = %path.display(), "loaded case");
    Ok(case)
}

pub fn save_case(path: &Path, case: &DesignCase) -> AppResult<()> {
    ww_project::save_case(path, case)?;
    Ok(())
}

pub fn validate_case(case: &DesignCase) -> AppResult<()> {
    ww_project::validate_case(case)?;
    Ok(())
}

pub fn summarize(case: &DesignCase) -> AppResult<CaseSummary> {
    let spec = case.influent_spec()?;
    Ok(CaseSummary {
        name: case.name.clone(),
        flow_m3_day: spec.flow_m3_day(),
        display_units: case.display_units(),
        technologies: case.technologies(),
        seed: case.seed(),
        has_adjustments: case.adjustments.is_some(),
    })
}
