//! Shared application service layer for the WWTP designer.
//!
//! Loads design cases, runs sizing and simulation across technologies,
//! keeps the INITIAL/ADJUSTED result store next to the case file and
//! answers queries for front-ends.

pub mod case_service;
pub mod design_service;
pub mod error;
pub mod query;

// Re-export key types for convenience
pub use case_service::{CaseSummary, load_case, save_case, summarize, validate_case};
pub use design_service::{
    DesignOptions, DesignRequest, DesignResponse, ENGINE_VERSION, adjust_case, design_case,
    design_technology, run_adjusted, run_design,
};
pub use error::{AppError, AppResult};
pub use query::{export_table, get_record, load_store, seasonal, topology};
