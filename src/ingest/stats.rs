//! Ingest statistics for one processed file

use serde::{Deserialize, Serialize};

/// Counters collected while ingesting one file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestStats {
    /// Lines seen in the input (a trailing empty line is not counted)
    pub total_lines: usize,

    /// Lines carrying the record marker
    pub record_lines: usize,

    /// Records decoded and kept
    pub records_decoded: usize,

    /// Lines without the record marker (other channels, framing)
    pub lines_skipped: usize,

    /// Record lines dropped because they could not be decoded
    pub lines_malformed: usize,

    /// Individual fields stored as absent across all kept records
    pub missing_fields: usize,

    /// Records that carried a valid coordinate pair
    pub gps_records: usize,

    /// Diagnostics for dropped lines
    pub errors: Vec<String>,
}

impl IngestStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self {
            total_lines: 0,
            record_lines: 0,
            records_decoded: 0,
            lines_skipped: 0,
            lines_malformed: 0,
            missing_fields: 0,
            gps_records: 0,
            errors: Vec::new(),
        }
    }

    /// Share of record lines that decoded, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.record_lines == 0 {
            0.0
        } else {
            (self.records_decoded as f64 / self.record_lines as f64) * 100.0
        }
    }

    /// Check if ingest was mostly successful (>90% of record lines decoded)
    pub fn is_successful(&self) -> bool {
        self.success_rate() > 90.0
    }
}

impl Default for IngestStats {
    fn default() -> Self {
        Self::new()
    }
}
