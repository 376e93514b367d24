//! Command-line argument definitions for the telemetry viewer
//!
//! This module defines the CLI interface using the clap derive API. Logging
//! and configuration flags are global so they can follow any subcommand.

use crate::config::{CompressionAlgorithm, ExportFormat};
use crate::error::{Result, TelemetryError};
use crate::schema;
use crate::views::Palette;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// CLI arguments for the telemetry viewer
///
/// Ingests onboard logger text files and prints summaries, map track data,
/// chart series, or exports the decoded records.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "telemetry-viewer",
    version,
    about = "Inspect, chart and export onboard telemetry logger files",
    long_about = "Reads the text logs written by the onboard data logger, keeps the \
                  telemetry record lines, decodes their 50-column payload and rebases \
                  record times to the start of each file. Results can be summarised, \
                  turned into a speed-coloured map track or chart series, or exported \
                  to CSV and Parquet."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    ///
    /// TOML configuration file for the record format, map and export
    /// settings. If not specified, looks for
    /// <config dir>/telemetry-viewer/config.toml and falls back to defaults.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        global = true,
        help = "Path to configuration file (TOML format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Summarise one or more logger files
    Inspect(InspectArgs),
    /// Speed-coloured map track for a logger file
    Track(TrackArgs),
    /// Chart series of numeric fields against time
    Series(SeriesArgs),
    /// Export decoded records to CSV or Parquet
    Export(ExportArgs),
    /// List the record line columns
    Fields(FieldsArgs),
}

/// Arguments for the inspect command
#[derive(Debug, Clone, Parser)]
pub struct InspectArgs {
    /// Logger files to ingest, in order
    #[arg(value_name = "FILES", required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Output format for the summary
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the summary"
    )]
    pub output_format: OutputFormat,
}

/// Arguments for the track command
#[derive(Debug, Clone, Parser)]
pub struct TrackArgs {
    /// Logger file to ingest
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Colour ramp for the speed-coloured track
    #[arg(long = "palette", value_enum, help = "Colour ramp for the track")]
    pub palette: Option<Palette>,

    /// Fixed speed domain in km/h
    ///
    /// Specify as min,max. By default the domain is derived from the speeds
    /// found in the file.
    #[arg(
        long = "speed-domain",
        value_name = "MIN,MAX",
        help = "Fixed speed colour domain in km/h (min,max)"
    )]
    pub speed_domain: Option<SpeedDomain>,

    /// Report the track point nearest to a position
    ///
    /// Specify as lat,lon. Nothing is reported when no point lies within
    /// the configured hover radius.
    #[arg(
        long = "hover",
        value_name = "LAT,LON",
        help = "Look up the nearest track point to lat,lon"
    )]
    pub hover: Option<HoverPoint>,
}

/// Arguments for the series command
#[derive(Debug, Clone, Parser)]
pub struct SeriesArgs {
    /// Logger file to ingest
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Fields to chart (repeatable)
    ///
    /// Any numeric field of the record schema. Defaults to voltage, speed,
    /// systemVoltage and the three acceleration axes.
    #[arg(
        short = 'f',
        long = "field",
        value_name = "NAME",
        help = "Field to chart, may be repeated"
    )]
    pub fields: Vec<String>,

    /// Output format for the series
    #[arg(
        long = "format",
        value_enum,
        default_value = "csv",
        help = "Output format for the series"
    )]
    pub output_format: SeriesFormat,
}

/// Arguments for the export command
#[derive(Debug, Clone, Parser)]
pub struct ExportArgs {
    /// Logger file to ingest
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output file path
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Output file for the exported records"
    )]
    pub output_path: PathBuf,

    /// Output file format
    ///
    /// Guessed from the output file extension when not given, then taken
    /// from the configuration.
    #[arg(long = "format", value_enum, help = "Output file format")]
    pub format: Option<ExportFormat>,

    /// Parquet compression algorithm
    #[arg(long = "compression", value_enum, help = "Parquet compression algorithm")]
    pub compression: Option<CompressionAlgorithm>,

    /// Force overwrite of an existing output file
    #[arg(long = "force", help = "Force overwrite of an existing output file")]
    pub force_overwrite: bool,
}

/// Arguments for the fields command
#[derive(Debug, Clone, Parser)]
pub struct FieldsArgs {
    /// Output format for the column list
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the column list"
    )]
    pub output_format: OutputFormat,
}

/// Output format options for summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

/// Output format options for chart series
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeriesFormat {
    /// One `field,time,value` row per point
    Csv,
    /// One JSON object per series
    Json,
}

/// Map position given as `lat,lon`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverPoint {
    pub lat: f64,
    pub lon: f64,
}

impl FromStr for HoverPoint {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self> {
        let (lat, lon) = parse_pair(s, "lat,lon")?;

        if !(-90.0..=90.0).contains(&lat) {
            return Err(TelemetryError::configuration(format!(
                "Latitude out of range: {}",
                lat
            )));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(TelemetryError::configuration(format!(
                "Longitude out of range: {}",
                lon
            )));
        }

        Ok(HoverPoint { lat, lon })
    }
}

/// Speed domain given as `min,max`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedDomain {
    pub min: f64,
    pub max: f64,
}

impl FromStr for SpeedDomain {
    type Err = TelemetryError;

    fn from_str(s: &str) -> Result<Self> {
        let (min, max) = parse_pair(s, "min,max")?;
        if min >= max {
            return Err(TelemetryError::configuration(
                "Speed domain minimum must be less than maximum",
            ));
        }
        Ok(SpeedDomain { min, max })
    }
}

fn parse_pair(s: &str, expected: &str) -> Result<(f64, f64)> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 2 {
        return Err(TelemetryError::configuration(format!(
            "Expected two numbers in format: {}",
            expected
        )));
    }

    let parse = |raw: &str| {
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or_else(|| TelemetryError::configuration(format!("Invalid number: {}", raw)))
    };

    Ok((parse(parts[0])?, parse(parts[1])?))
}

impl Args {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }

    /// Validate arguments that clap cannot check on its own
    pub fn validate(&self) -> Result<()> {
        if let Some(config_file) = &self.config_file {
            if !config_file.exists() {
                return Err(TelemetryError::configuration(format!(
                    "Config file does not exist: {}",
                    config_file.display()
                )));
            }
        }

        match &self.command {
            Some(Commands::Series(series)) => series.validate(),
            Some(Commands::Export(export)) => export.validate(),
            _ => Ok(()),
        }
    }
}

impl SeriesArgs {
    /// Validate requested field names against the record schema
    pub fn validate(&self) -> Result<()> {
        match self.fields.iter().find(|name| schema::column(name).is_none()) {
            Some(unknown) => Err(TelemetryError::unknown_field(unknown.as_str())),
            None => Ok(()),
        }
    }
}

impl ExportArgs {
    /// Validate the output location
    pub fn validate(&self) -> Result<()> {
        if let Some(parent) = self.output_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(TelemetryError::configuration(format!(
                    "Output directory does not exist: {}",
                    parent.display()
                )));
            }
        }

        if self.output_path.exists() && !self.force_overwrite {
            return Err(TelemetryError::configuration(format!(
                "Output file already exists: {} (use --force to overwrite)",
                self.output_path.display()
            )));
        }

        Ok(())
    }

    /// Output format: flag, then output extension, then `fallback`
    pub fn resolve_format(&self, fallback: ExportFormat) -> ExportFormat {
        self.format
            .or_else(|| ExportFormat::from_path(&self.output_path))
            .unwrap_or(fallback)
    }
}

/// File name used for dataset keys
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
