//! Core ingest pipeline implementation
//!
//! Handles reading the source, filtering record lines, and the per-file
//! bookkeeping that no single line can do on its own: the GPS flag and the
//! time base shared by every record of the file.

use std::path::Path;
use tracing::{debug, info, warn};

use super::line::{decode_payload, extract_payload};
use super::stats::IngestStats;
use crate::config::IngestConfig;
use crate::dataset::Dataset;
use crate::error::{Result, TelemetryError};

/// Ingest pipeline for logger text files
///
/// The pipeline holds only its configuration, so one instance can ingest
/// any number of independent inputs.
#[derive(Debug, Clone, Default)]
pub struct LogIngestPipeline {
    config: IngestConfig,
}

impl LogIngestPipeline {
    /// Create a pipeline with the given line format settings
    pub fn new(config: IngestConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Read a logger file and ingest it
    ///
    /// Fails only when the file cannot be read or is not UTF-8 text; no
    /// partial dataset is returned in that case.
    pub async fn ingest_file(&self, path: &Path) -> Result<Dataset> {
        info!("Ingesting telemetry file: {}", path.display());

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| TelemetryError::ingest_failure(path, format!("cannot read file: {}", e)))?;

        let text = String::from_utf8(bytes).map_err(|e| {
            TelemetryError::ingest_failure(path, format!("file is not UTF-8 text: {}", e))
        })?;

        Ok(self.ingest(&text))
    }

    /// Decode raw logger text into a dataset
    ///
    /// Never fails: lines without the record marker are skipped, malformed
    /// record lines are logged and dropped.
    pub fn ingest(&self, raw_text: &str) -> Dataset {
        let mut stats = IngestStats::new();
        let mut records = Vec::new();
        let mut has_gps = false;
        let mut time_offset: Option<f64> = None;

        for (line_index, line) in raw_text.lines().enumerate() {
            stats.total_lines += 1;

            let Some(payload) = extract_payload(line, &self.config) else {
                stats.lines_skipped += 1;
                continue;
            };
            stats.record_lines += 1;

            let decoded = match decode_payload(payload, &self.config) {
                Ok(decoded) => decoded,
                Err(e) => {
                    stats.lines_malformed += 1;
                    stats.errors.push(format!("Line {}: {}", line_index + 1, e));
                    warn!("Discarding line {}: {} ({:?})", line_index + 1, e, line);
                    continue;
                }
            };

            let mut record = decoded.record;
            stats.missing_fields += decoded.missing_fields;

            if record.is_gps_valid() {
                has_gps = true;
                stats.gps_records += 1;
            } else {
                record.clear_coordinates();
            }

            // The first decoded record with a usable time fixes the time base
            if time_offset.is_none() && record.time.is_finite() {
                debug!("Time base {} from line {}", record.time, line_index + 1);
                time_offset = Some(record.time);
            }
            record.time -= time_offset.unwrap_or(0.0);

            records.push(record);
            stats.records_decoded += 1;
        }

        info!(
            "Ingested {} records from {} lines ({} malformed, GPS: {})",
            stats.records_decoded, stats.total_lines, stats.lines_malformed, has_gps
        );

        Dataset::new(records, has_gps, time_offset.unwrap_or(0.0), stats)
    }
}
