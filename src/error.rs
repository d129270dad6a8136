//! Error type shared by the generator, loader and server

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while configuring, generating or loading loss data
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Generator or server configuration rejected during validation
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Data file not found at load time
    #[error("data file not found: {} (run `loss_ratio_dashboard generate` first)", .path.display())]
    MissingData { path: PathBuf },

    /// Row present but unusable (bad date, negative amount, developed < incurred)
    #[error("malformed data at line {line}: {message}")]
    Malformed { line: u64, message: String },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
