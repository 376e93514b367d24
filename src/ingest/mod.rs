//! Log ingest pipeline for onboard logger files
//!
//! Turns the raw text of one logger file into a [`Dataset`](crate::dataset::Dataset).
//! Ingest is best-effort per line and all-or-nothing per file: a malformed
//! record line is logged and dropped, only an unreadable source fails.
//!
//! ## Architecture
//!
//! - [`pipeline`] - File reading and per-file orchestration (GPS flag, time rebasing)
//! - [`line`] - Record marker filtering, payload extraction and line decoding
//! - [`field_parsers`] - Lenient numeric parsing into absent-value sentinels
//! - [`stats`] - Per-file ingest counters
//!
//! ## Usage
//!
//! ```rust
//! use telemetry_viewer::ingest::LogIngestPipeline;
//!
//! let pipeline = LogIngestPipeline::default();
//! let dataset = pipeline.ingest(">23|01:10.0,12.5,0,0,0,0,0,0,0,52.37,4.89,18.4\n");
//!
//! assert_eq!(dataset.len(), 1);
//! assert!(dataset.has_gps());
//! ```

pub mod field_parsers;
pub mod line;
pub mod pipeline;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use line::LineError;
pub use pipeline::LogIngestPipeline;
pub use stats::IngestStats;
