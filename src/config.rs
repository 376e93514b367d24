//! Configuration management and validation.
//!
//! Provides the record line format, map view defaults and export settings.
//! Every section has working defaults; a TOML file only needs the keys it
//! changes.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_HOVER_RADIUS_METERS, DEFAULT_LEGEND_STEPS,
    FIELD_DELIMITER, MIN_REQUIRED_FIELDS, PAYLOAD_TERMINATOR, RECORD_MARKER, SCHEMA_FIELD_COUNT,
};
use crate::error::{Result, TelemetryError};
use crate::views::color::Palette;

/// Record line format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Prefix that marks a telemetry record line
    pub record_marker: String,

    /// Character starting trailing framing after the payload
    pub payload_terminator: char,

    /// Separator between payload fields
    pub field_delimiter: char,

    /// Fewer payload fields than this drops the line
    pub min_fields: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            record_marker: RECORD_MARKER.to_string(),
            payload_terminator: PAYLOAD_TERMINATOR,
            field_delimiter: FIELD_DELIMITER,
            min_fields: MIN_REQUIRED_FIELDS,
        }
    }
}

/// Map view settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Colour ramp for the speed-coloured track
    pub palette: Palette,

    /// Fixed speed domain in km/h; derived from the data when unset
    pub speed_domain: Option<(f64, f64)>,

    /// Number of intervals in the speed legend
    pub legend_steps: usize,

    /// Hover lookups further than this (metres) report nothing
    pub hover_radius_m: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            palette: Palette::Viridis,
            speed_domain: None,
            legend_steps: DEFAULT_LEGEND_STEPS,
            hover_radius_m: DEFAULT_HOVER_RADIUS_METERS,
        }
    }
}

/// Output file format for exported datasets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Parquet,
}

impl ExportFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "csv" => Some(ExportFormat::Csv),
            "parquet" | "pq" => Some(ExportFormat::Parquet),
            _ => None,
        }
    }
}

/// Supported compression algorithms for parquet export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CompressionAlgorithm {
    /// Snappy compression - good balance of speed and compression
    Snappy,
    /// ZSTD compression - better compression ratio, slower
    Zstd,
    /// LZ4 compression - fastest, lower compression ratio
    Lz4,
    /// No compression
    Uncompressed,
}

impl CompressionAlgorithm {
    /// Convert to polars ParquetCompression type
    pub fn to_polars_compression(&self) -> polars::prelude::ParquetCompression {
        use polars::prelude::ParquetCompression;
        match self {
            CompressionAlgorithm::Snappy => ParquetCompression::Snappy,
            CompressionAlgorithm::Zstd => ParquetCompression::Zstd(None),
            CompressionAlgorithm::Lz4 => ParquetCompression::Lz4Raw,
            CompressionAlgorithm::Uncompressed => ParquetCompression::Uncompressed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub format: ExportFormat,
    pub compression: CompressionAlgorithm,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            compression: CompressionAlgorithm::Snappy,
        }
    }
}

/// Global configuration for the viewer
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub ingest: IngestConfig,
    pub map: MapConfig,
    pub export: ExportConfig,
}

impl ViewerConfig {
    /// Default config file location (`<config dir>/telemetry-viewer/config.toml`)
    pub fn default_config_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
            .ok_or_else(|| {
                TelemetryError::configuration("Could not determine user config directory")
            })
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            TelemetryError::configuration(format!("Cannot read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml(&content)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse and validate TOML configuration text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| TelemetryError::configuration(format!("Invalid TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load an explicit file, else the default file if present, else defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_config_path() {
            Ok(default_path) if default_path.exists() => Self::load(&default_path),
            _ => {
                debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Check settings for values the pipeline and views cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.ingest.record_marker.is_empty() {
            return Err(TelemetryError::configuration("record_marker must not be empty"));
        }

        if self.ingest.min_fields < MIN_REQUIRED_FIELDS
            || self.ingest.min_fields > SCHEMA_FIELD_COUNT
        {
            return Err(TelemetryError::configuration(format!(
                "min_fields must be between {} and {}, got {}",
                MIN_REQUIRED_FIELDS, SCHEMA_FIELD_COUNT, self.ingest.min_fields
            )));
        }

        if self.ingest.payload_terminator == self.ingest.field_delimiter {
            return Err(TelemetryError::configuration(
                "payload_terminator and field_delimiter must differ",
            ));
        }

        if self.map.legend_steps == 0 {
            return Err(TelemetryError::configuration("legend_steps must be at least 1"));
        }

        if !(self.map.hover_radius_m.is_finite() && self.map.hover_radius_m > 0.0) {
            return Err(TelemetryError::configuration(format!(
                "hover_radius_m must be a positive distance, got {}",
                self.map.hover_radius_m
            )));
        }

        if let Some((min, max)) = self.map.speed_domain {
            if !(min.is_finite() && max.is_finite() && min < max) {
                return Err(TelemetryError::configuration(format!(
                    "speed_domain must be an increasing range, got ({}, {})",
                    min, max
                )));
            }
        }

        Ok(())
    }

    /// Use a different colour ramp for the track
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.map.palette = palette;
        self
    }

    /// Pin the speed colour domain instead of deriving it from the data
    pub fn with_speed_domain(mut self, min: f64, max: f64) -> Self {
        self.map.speed_domain = Some((min, max));
        self
    }

    pub fn with_hover_radius(mut self, meters: f64) -> Self {
        self.map.hover_radius_m = meters;
        self
    }

    pub fn with_export_format(mut self, format: ExportFormat) -> Self {
        self.export.format = format;
        self
    }

    pub fn with_compression(mut self, compression: CompressionAlgorithm) -> Self {
        self.export.compression = compression;
        self
    }
}
