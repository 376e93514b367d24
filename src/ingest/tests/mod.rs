//! Test utilities for the ingest pipeline
//!
//! Builders for record lines with a full or partial payload, and a helper
//! for writing logger text to a temporary file.

use std::io::Write;
use tempfile::NamedTempFile;

use crate::constants::{RECORD_MARKER, SCHEMA_FIELD_COUNT};

// Test modules
mod field_parser_tests;
mod stats_tests;

/// Build a record line whose payload has all schema fields
///
/// Every field is `0` apart from the ones overridden by `(index, value)`.
pub fn full_record_line(overrides: &[(usize, &str)]) -> String {
    let mut fields = vec!["0".to_string(); SCHEMA_FIELD_COUNT];
    for &(index, value) in overrides {
        fields[index] = value.to_string();
    }
    format!("{}{}", RECORD_MARKER, fields.join(","))
}

/// Build a record line from the given leading fields only
pub fn short_record_line(fields: &[&str]) -> String {
    format!("{}{}", RECORD_MARKER, fields.join(","))
}

/// Write logger text to a temporary file
pub fn create_temp_file(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}
