//! Application constants for the telemetry viewer
//!
//! This module contains the logger wire-format constants, default values
//! and small helpers used throughout the crate.

// =============================================================================
// Logger Wire Format
// =============================================================================

/// Prefix identifying a telemetry record line in the mixed logger stream
pub const RECORD_MARKER: &str = ">23|01:";

/// Start of trailing framing after the record payload
pub const PAYLOAD_TERMINATOR: char = '<';

/// Separator between payload fields
pub const FIELD_DELIMITER: char = ',';

/// Number of positional fields written by current firmware
pub const SCHEMA_FIELD_COUNT: usize = 50;

/// Fields 0..=11 (time, power, lat, lon, speed) must be present on every line
pub const MIN_REQUIRED_FIELDS: usize = 12;

/// Version of the column table in [`crate::schema`]
pub const SCHEMA_VERSION: u32 = 5;

// =============================================================================
// Map and Chart Defaults
// =============================================================================

/// Maximum pointer distance (metres) for a hover lookup to report a point
pub const DEFAULT_HOVER_RADIUS_METERS: f64 = 30.0;

/// Number of intervals in the speed legend
pub const DEFAULT_LEGEND_STEPS: usize = 5;

/// Fixed speed domain (km/h) of the green-to-red palette
pub const FIXED_SPEED_DOMAIN_KMH: (f64, f64) = (0.0, 30.0);

/// Mean Earth radius used for haversine distances
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

// =============================================================================
// Host Application
// =============================================================================

/// Directory name under the user config directory
pub const CONFIG_DIR_NAME: &str = "telemetry-viewer";

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Logging target used by the env filter
pub const LOG_TARGET: &str = "telemetry_viewer";

// =============================================================================
// Helper Functions
// =============================================================================

/// Build the store key for a dataset loaded from `file_name` at `timestamp_ms`
pub fn dataset_key(file_name: &str, timestamp_ms: i64) -> String {
    format!("{}_{}", file_name, timestamp_ms)
}
