//! Read-side helpers over stored designs.

use std::path::Path;

use ww_core::UnitSystem;
use ww_process::Technology;
use ww_project::DesignCase;
use ww_results::{
    DesignRecord, DesignStore, ExportTable, FlowTopology, ResultKey, Variant, compute_case_id,
};
use ww_sim::{SeasonalParams, SeasonalPoint, SimRng, seasonal_series};

use crate::design_service::ENGINE_VERSION;
use crate::error::{AppError, AppResult};

/// ChaCha stream reserved for seasonal draws, so a series never replays the
/// simulation's own noise.
const SEASONAL_STREAM: u64 = 1;

pub fn load_store(case_path: &Path) -> AppResult<DesignStore> {
    let path = DesignStore::path_for_case(case_path)?;
    Ok(DesignStore::load_or_default(&path)?)
}

/// Stored record for `technology`, checked against the current case.
pub fn get_record(
    case: &DesignCase,
    store: &DesignStore,
    technology: Technology,
    variant: Variant,
) -> AppResult<DesignRecord> {
    let key = ResultKey {
        technology,
        variant,
    };
    let record = store
        .get(&key)
        .ok_or(AppError::DesignNotFound(technology))?;
    if record.case_id != compute_case_id(case, ENGINE_VERSION) {
        return Err(AppError::StaleStore);
    }
    Ok(record.clone())
}

pub fn export_table(record: &DesignRecord, units: UnitSystem) -> ExportTable {
    ExportTable::for_design(&record.sizing, &record.simulation, units)
}

pub fn topology(case: &DesignCase, record: &DesignRecord, units: UnitSystem) -> AppResult<FlowTopology> {
    let spec = case.influent_spec()?;
    Ok(FlowTopology::build(
        &spec,
        &record.sizing,
        &record.simulation,
        units,
    ))
}

/// Daily synthetic effluent series around a stored result.
pub fn seasonal(record: &DesignRecord, days: u32, params: &SeasonalParams) -> Vec<SeasonalPoint> {
    let mut rng = SimRng::from_seed_u64(record.seed);
    rng.0.set_stream(SEASONAL_STREAM);
    seasonal_series(&record.simulation, days, params, &mut rng)
}
