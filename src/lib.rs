//! Telemetry Viewer Library
//!
//! A Rust library for ingesting the text logs written by a vehicle's onboard
//! data logger and preparing them for map and chart display.
//!
//! This library provides tools for:
//! - Filtering `>23|01:` record lines out of the mixed logger stream
//! - Decoding the 50-column record payload through one named column table
//! - Rebasing record times to the start of the file and flagging GPS coverage
//! - Keeping several ingested files side by side in an explicit store
//! - Speed-coloured tracks, hover lookup and chart series for viewers
//! - Exporting datasets to CSV or Parquet

pub mod config;
pub mod constants;
pub mod dataset;
pub mod error;
pub mod export;
pub mod ingest;
pub mod models;
pub mod schema;
pub mod store;
pub mod views;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::ViewerConfig;
pub use dataset::{Dataset, DatasetSummary};
pub use error::{Result, TelemetryError};
pub use ingest::{IngestStats, LogIngestPipeline};
pub use models::{GpsPoint, TelemetryRecord};
pub use store::{DatasetKey, DatasetStore};
