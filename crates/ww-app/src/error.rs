//! Error types for the ww-app service layer.

use std::path::PathBuf;

use ww_process::Technology;

/// Application error type that wraps errors from the engine crates and
/// gives front-ends a single error to report.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Case error: {0}")]
    Case(String),

    #[error("Failed to read case file: {path}")]
    CaseFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("No stored design for {0}; run `design` first")]
    DesignNotFound(Technology),

    #[error("{0} is not selected in this case")]
    TechnologyNotInCase(Technology),

    #[error("Stored designs were computed from a different case; run `design` again")]
    StaleStore,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for ww-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<ww_project::ProjectError> for AppError {
    fn from(err: ww_project::ProjectError) -> Self {
        match err {
            ww_project::ProjectError::Validation(e) => AppError::Validation(e.to_string()),
            other => AppError::Case(other.to_string()),
        }
    }
}

impl From<ww_project::ValidationError> for AppError {
    fn from(err: ww_project::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<ww_core::ValidationError> for AppError {
    fn from(err: ww_core::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<ww_sim::SimError> for AppError {
    fn from(err: ww_sim::SimError) -> Self {
        AppError::Simulation(err.to_string())
    }
}

impl From<ww_results::ResultsError> for AppError {
    fn from(err: ww_results::ResultsError) -> Self {
        AppError::Results(err.to_string())
    }
}
