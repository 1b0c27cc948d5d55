//! ww-results: result presentation and storage.
//!
//! - display: unit-system views of canonical results
//! - export: flat key/value/unit table and CSV
//! - topology: process flow summary and DOT rendering
//! - store: INITIAL/ADJUSTED records per technology, persisted as JSON

pub mod display;
pub mod export;
pub mod hash;
pub mod store;
pub mod topology;
pub mod types;

pub use display::{PumpDisplay, Quantity, SimulationDisplay, SizingDisplay};
pub use export::{ExportRow, ExportTable};
pub use hash::compute_case_id;
pub use store::DesignStore;
pub use topology::{Annotation, FlowTopology, SideStream, SideStreamKind, Stage, StageId};
pub use types::*;

use ww_process::Technology;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid path: {message}")]
    InvalidPath { message: String },

    #[error("Unsupported store version: {version}")]
    UnsupportedVersion { version: u32 },

    #[error("Expected a {expected} record, got {found}")]
    WrongVariant { expected: Variant, found: Variant },

    #[error("No initial design stored for {technology}")]
    MissingInitial { technology: Technology },

    #[error("Stored design belongs to case {expected}, not {found}")]
    CaseMismatch { expected: String, found: String },

    #[error("Adjusted run for {technology} does not reuse the stored sizing")]
    SizingMismatch { technology: Technology },
}
