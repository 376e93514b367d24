//! Error handling for telemetry ingest and inspection.
//!
//! Per-line problems never surface here: they are counted in
//! [`IngestStats`](crate::ingest::IngestStats) and logged. These variants
//! cover the failures a host has to present to the user.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to ingest {path}: {reason}")]
    IngestFailure { path: PathBuf, reason: String },

    #[error("Dataset not found: {key}")]
    DatasetNotFound { key: String },

    #[error("Unknown telemetry field: {name}")]
    UnknownField { name: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Export failed for {path}: {reason}")]
    Export { path: PathBuf, reason: String },

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl TelemetryError {
    /// Create an ingest failure for a source that could not be read
    pub fn ingest_failure(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::IngestFailure {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a dataset lookup error
    pub fn dataset_not_found(key: impl Into<String>) -> Self {
        Self::DatasetNotFound { key: key.into() }
    }

    /// Create an unknown field error
    pub fn unknown_field(name: impl Into<String>) -> Self {
        Self::UnknownField { name: name.into() }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an export error
    pub fn export(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Export {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TelemetryError>;
