//! Design and adjustment runs.
//!
//! Technologies run in parallel. Each derives its own seed from the case
//! seed, so the output does not depend on scheduling.

use std::path::Path;

use rayon::prelude::*;
use tracing::{info, warn};
use ww_core::InfluentSpec;
use ww_process::{Technology, size};
use ww_project::DesignCase;
use ww_results::{DesignRecord, DesignStore, compute_case_id};
use ww_sim::{AdjustmentFactors, derive_seed, simulate_seeded};

use crate::case_service;
use crate::error::{AppError, AppResult};

/// Engine version folded into case IDs.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Overrides applied on top of the case file.
#[derive(Debug, Clone, Default)]
pub struct DesignOptions {
    pub seed: Option<u64>,
    /// Restrict to these technologies (must be selected in the case)
    pub technologies: Option<Vec<Technology>>,
}

/// Request to design (or adjust) a case stored on disk.
pub struct DesignRequest<'a> {
    pub case_path: &'a Path,
    pub options: DesignOptions,
}

#[derive(Debug, Clone)]
pub struct DesignResponse {
    pub case: DesignCase,
    pub case_id: String,
    pub records: Vec<DesignRecord>,
}

fn selected_technologies(case: &DesignCase, options: &DesignOptions) -> AppResult<Vec<Technology>> {
    let in_case = case.technologies();
    match &options.technologies {
        None => Ok(in_case),
        Some(requested) => {
            let mut techs = Vec::new();
            for tech in requested {
                if !in_case.contains(tech) {
                    return Err(AppError::TechnologyNotInCase(*tech));
                }
                if !techs.contains(tech) {
                    techs.push(*tech);
                }
            }
            techs.sort();
            Ok(techs)
        }
    }
}

fn log_warnings(record: &DesignRecord) {
    let count = record.sizing.warnings.len() + record.simulation.warnings.len();
    if count > 0 {
        warn!(technology = %record.technology(), count, "design carries warnings");
    }
}

/// Size and simulate one technology.
pub fn design_technology(
    case: &DesignCase,
    case_id: &str,
    spec: &InfluentSpec,
    technology: Technology,
    base_seed: u64,
) -> AppResult<DesignRecord> {
    let seed = derive_seed(base_seed, technology);
    let sizing = size(&technology.profile(), spec, &case.sizing_config());
    let simulation = simulate_seeded(spec, &sizing, None, &case.parameters, seed)?;
    let record = DesignRecord::new(case_id.to_string(), seed, sizing, simulation, None);
    log_warnings(&record);
    Ok(record)
}

/// Initial designs for the selected technologies, in canonical order.
pub fn run_design(case: &DesignCase, options: &DesignOptions) -> AppResult<Vec<DesignRecord>> {
    ww_project::validate_case(case)?;
    let spec = case.influent_spec()?;
    let case_id = compute_case_id(case, ENGINE_VERSION);
    let base_seed = options.seed.unwrap_or_else(|| case.seed());
    let techs = selected_technologies(case, options)?;

    info!(case = %case.name, base_seed, technologies = techs.len(), "running design");

    techs
        .par_iter()
        .map(|tech| design_technology(case, &case_id, &spec, *tech, base_seed))
        .collect()
}

/// Re-simulate stored initial designs at an adjusted operating point.
///
/// Sizing and seed come from the stored INITIAL record; nothing is resized.
pub fn run_adjusted(
    case: &DesignCase,
    store: &DesignStore,
    adjustments: &AdjustmentFactors,
    options: &DesignOptions,
) -> AppResult<Vec<DesignRecord>> {
    ww_project::validate_case(case)?;
    let spec = case.influent_spec()?;
    let case_id = compute_case_id(case, ENGINE_VERSION);
    let techs = match &options.technologies {
        Some(_) => selected_technologies(case, options)?,
        None => store.technologies(),
    };
    if techs.is_empty() {
        return Err(AppError::InvalidInput(
            "no stored designs to adjust; run `design` first".to_string(),
        ));
    }

    let initials = techs
        .iter()
        .map(|tech| {
            let initial = store.initial(*tech).ok_or(AppError::DesignNotFound(*tech))?;
            if initial.case_id != case_id {
                return Err(AppError::StaleStore);
            }
            Ok(initial)
        })
        .collect::<AppResult<Vec<_>>>()?;

    info!(
        case = %case.name,
        eq_pct = adjustments.eq_pump_pct(),
        ras_pct = adjustments.ras_pump_pct(),
        was_pct = adjustments.was_pump_pct(),
        air_pct = adjustments.air_blower_pct(),
        "running adjusted simulation"
    );

    initials
        .par_iter()
        .map(|initial| {
            // same derivation as `design_technology`, so an equal base seed
            // replays the initial draws
            let seed = options
                .seed
                .map(|base| derive_seed(base, initial.technology()))
                .unwrap_or(initial.seed);
            let simulation = simulate_seeded(
                &spec,
                &initial.sizing,
                Some(adjustments),
                &case.parameters,
                seed,
            )?;
            let record = DesignRecord::new(
                case_id.clone(),
                seed,
                initial.sizing.clone(),
                simulation,
                Some(*adjustments),
            );
            log_warnings(&record);
            Ok(record)
        })
        .collect()
}

/// Load the case, design it and persist the records next to the case file.
pub fn design_case(request: DesignRequest<'_>) -> AppResult<DesignResponse> {
    let case = case_service::load_case(request.case_path)?;
    let records = run_design(&case, &request.options)?;

    let store_path = DesignStore::path_for_case(request.case_path)?;
    let mut store = DesignStore::load_or_default(&store_path)?;
    for record in &records {
        store.insert_initial(record.clone())?;
    }
    store.save(&store_path)?;
    info!(path = %store_path.display(), records = records.len(), "saved designs");

    Ok(DesignResponse {
        case_id: compute_case_id(&case, ENGINE_VERSION),
        case,
        records,
    })
}

/// Load the case and its store, apply `adjustments` (or the case's own) and
/// persist the ADJUSTED records.
pub fn adjust_case(
    request: DesignRequest<'_>,
    adjustments: Option<AdjustmentFactors>,
) -> AppResult<DesignResponse> {
    let case = case_service::load_case(request.case_path)?;
    let adjustments = adjustments.or(case.adjustments).ok_or_else(|| {
        AppError::InvalidInput("no adjustments given and none in the case file".to_string())
    })?;

    let store_path = DesignStore::path_for_case(request.case_path)?;
    let mut store = DesignStore::load_or_default(&store_path)?;
    let records = run_adjusted(&case, &store, &adjustments, &request.options)?;
    for record in &records {
        store.insert_adjusted(record.clone())?;
    }
    store.save(&store_path)?;
    info!(path = %store_path.display(), records = records.len(), "saved adjusted runs");

    Ok(DesignResponse {
        case_id: compute_case_id(&case, ENGINE_VERSION),
        case,
        records,
    })
}
