//! Command implementations for the telemetry viewer CLI
//!
//! This module wires the parsed arguments to the library: logging setup,
//! configuration loading, file ingest into a [`DatasetStore`] and the
//! per-command output.

use crate::cli::args::{
    Args, Commands, ExportArgs, FieldsArgs, InspectArgs, OutputFormat, SeriesArgs, SeriesFormat,
    TrackArgs, display_name,
};
use crate::config::ViewerConfig;
use crate::constants::{LOG_TARGET, SCHEMA_VERSION};
use crate::dataset::DatasetSummary;
use crate::export::write_dataset;
use crate::ingest::LogIngestPipeline;
use crate::schema::{COLUMNS, FieldKind};
use crate::store::{DatasetKey, DatasetStore};
use crate::views::{CHART_FIELDS, Series, TrackView, series, y_domain};
use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Run the selected subcommand
pub async fn run(args: Args) -> Result<()> {
    setup_logging(&args)?;
    args.validate()?;

    let config = load_configuration(&args)?;

    match &args.command {
        Some(Commands::Inspect(inspect)) => run_inspect(&args, inspect, &config).await,
        Some(Commands::Track(track)) => run_track(&args, track, &config).await,
        Some(Commands::Series(series_args)) => run_series(&args, series_args, &config).await,
        Some(Commands::Export(export)) => run_export(&args, export, &config).await,
        Some(Commands::Fields(fields)) => run_fields(fields),
        None => Ok(()),
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", LOG_TARGET, log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Load configuration from the given file, the default location, or defaults
fn load_configuration(args: &Args) -> Result<ViewerConfig> {
    let config = ViewerConfig::load_or_default(args.config_file.as_deref())
        .context("Failed to load configuration")?;
    debug!("Using configuration: {:?}", config);
    Ok(config)
}

/// Ingest files one after another into a fresh store
async fn load_datasets(
    files: &[PathBuf],
    config: &ViewerConfig,
    show_progress: bool,
) -> Result<(DatasetStore, Vec<DatasetKey>)> {
    let pipeline = LogIngestPipeline::new(config.ingest.clone());
    let mut store = DatasetStore::new();
    let mut keys = Vec::with_capacity(files.len());

    let progress = (show_progress && files.len() > 1).then(|| create_progress_bar(files.len()));

    for path in files {
        if let Some(pb) = &progress {
            pb.set_message(display_name(path));
        }

        let dataset = pipeline
            .ingest_file(path)
            .await
            .with_context(|| format!("Could not process {}", path.display()))?;

        if !dataset.stats().is_successful() && dataset.stats().record_lines > 0 {
            warn!(
                "Only {:.1}% of record lines in {} decoded",
                dataset.stats().success_rate(),
                path.display()
            );
        }

        keys.push(store.insert(&display_name(path), dataset));

        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    Ok((store, keys))
}

/// Ingest a single file, returning the store and its key
async fn load_single(file: &Path, config: &ViewerConfig) -> Result<(DatasetStore, DatasetKey)> {
    let (store, mut keys) = load_datasets(&[file.to_path_buf()], config, false).await?;
    let key = keys.pop().context("Ingest produced no dataset")?;
    Ok((store, key))
}

fn create_progress_bar(total: usize) -> ProgressBar {
    let pb = ProgressBar::new(total as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb
}

async fn run_inspect(args: &Args, inspect: &InspectArgs, config: &ViewerConfig) -> Result<()> {
    let start = Instant::now();
    let (store, keys) = load_datasets(&inspect.files, config, args.show_progress()).await?;

    let summaries: Vec<DatasetSummary> = keys
        .iter()
        .map(|key| store.get(key.as_str()).map(|dataset| dataset.summary(key.as_str())))
        .collect::<crate::Result<_>>()?;

    info!(
        "Inspected {} files in {}",
        summaries.len(),
        HumanDuration(start.elapsed())
    );

    match inspect.output_format {
        OutputFormat::Human => print_human_summaries(&summaries),
        OutputFormat::Json => {
            let report = serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "datasets": summaries,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

fn print_human_summaries(summaries: &[DatasetSummary]) {
    for summary in summaries {
        println!();
        println!("{}", summary.key.bright_green().bold());
        println!("   • Records: {}", summary.records);
        println!(
            "   • GPS: {}",
            if summary.has_gps {
                format!("yes ({} fixes)", summary.gps_records).bright_cyan()
            } else {
                "no".bright_black()
            }
        );
        println!("   • Time offset: {}", summary.time_offset);
        println!("   • Duration: {:.1} s", summary.duration_seconds);
        println!("   • Skipped lines: {}", summary.lines_skipped);
        println!("   • Missing fields: {}", summary.missing_fields);

        if summary.lines_malformed > 0 {
            println!(
                "   {} Malformed lines dropped: {}",
                "!".bright_yellow().bold(),
                summary.lines_malformed
            );
        }
    }
    println!();
}

async fn run_track(_args: &Args, track: &TrackArgs, config: &ViewerConfig) -> Result<()> {
    let mut map_config = config.map.clone();
    if let Some(palette) = track.palette {
        map_config.palette = palette;
    }
    if let Some(domain) = track.speed_domain {
        map_config.speed_domain = Some((domain.min, domain.max));
    }

    let (store, key) = load_single(&track.file, config).await?;
    let dataset = store.get(key.as_str())?;

    if !dataset.has_gps() {
        warn!("{} has no GPS fixes, track is empty", key);
    }

    let view = TrackView::build(dataset, &map_config);
    let hover = track.hover.and_then(|point| view.hover(point.lat, point.lon));
    debug!(
        "Built track with {} segments for {}",
        view.segments.len(),
        key
    );

    let output = serde_json::json!({
        "key": key,
        "has_gps": dataset.has_gps(),
        "track": view,
        "hover": hover,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn run_series(_args: &Args, series_args: &SeriesArgs, config: &ViewerConfig) -> Result<()> {
    let fields: Vec<&str> = if series_args.fields.is_empty() {
        CHART_FIELDS.iter().map(|field| field.name).collect()
    } else {
        series_args.fields.iter().map(String::as_str).collect()
    };

    let (store, key) = load_single(&series_args.file, config).await?;
    let dataset = store.get(key.as_str())?;

    let all_series: Vec<Series> = fields
        .iter()
        .map(|field| series(dataset, field))
        .collect::<crate::Result<_>>()?;

    match series_args.output_format {
        SeriesFormat::Csv => {
            println!("field,time,value");
            for s in &all_series {
                for (time, value) in &s.points {
                    println!("{},{},{}", s.field, time, value);
                }
            }
        }
        SeriesFormat::Json => {
            let output = serde_json::json!({
                "key": key,
                "y_domain": y_domain(&all_series),
                "series": all_series,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

async fn run_export(args: &Args, export: &ExportArgs, config: &ViewerConfig) -> Result<()> {
    let mut export_config = config.export.clone();
    export_config.format = export.resolve_format(export_config.format);
    if let Some(compression) = export.compression {
        export_config.compression = compression;
    }

    let (store, key) = load_single(&export.file, config).await?;
    let dataset = store.get(key.as_str())?;

    let rows = write_dataset(dataset, &export.output_path, &export_config)?;

    if args.show_progress() {
        println!(
            "{} {} records from {} to {}",
            "Exported".bright_green().bold(),
            rows,
            key,
            export.output_path.display()
        );
    }
    Ok(())
}

fn run_fields(fields: &FieldsArgs) -> Result<()> {
    match fields.output_format {
        OutputFormat::Human => {
            println!(
                "{}",
                format!("Record columns (schema v{})", SCHEMA_VERSION)
                    .bright_green()
                    .bold()
            );
            for column in COLUMNS.iter() {
                let kind = match column.kind {
                    FieldKind::Float => "float",
                    FieldKind::Int => "int",
                };
                println!(
                    "   {:>2}  {:<20} {:<6} {}",
                    column.index,
                    column.name,
                    kind,
                    column.group.label().bright_black()
                );
            }
        }
        OutputFormat::Json => {
            let columns: Vec<_> = COLUMNS
                .iter()
                .map(|column| {
                    serde_json::json!({
                        "index": column.index,
                        "name": column.name,
                        "kind": column.kind,
                        "group": column.group,
                    })
                })
                .collect();
            let output = serde_json::json!({
                "schema_version": SCHEMA_VERSION,
                "columns": columns,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn logger_file(lines: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file
    }

    #[tokio::test]
    async fn test_load_datasets_keeps_file_order() {
        let first = logger_file(&[">23|01:1,12,0,0,0,0,0,0,0,52.0,4.0,10"]);
        let second = logger_file(&["no records"]);
        let files = vec![first.path().to_path_buf(), second.path().to_path_buf()];

        let (store, keys) = load_datasets(&files, &ViewerConfig::default(), false)
            .await
            .unwrap();

        assert_eq!(keys.len(), 2);
        assert_eq!(store.len(), 2);
        assert!(store.has_gps(keys[0].as_str()).unwrap());
        assert!(!store.has_gps(keys[1].as_str()).unwrap());
    }

    #[tokio::test]
    async fn test_load_datasets_fails_on_missing_file() {
        let files = vec![PathBuf::from("/nonexistent/ride.txt")];
        let result = load_datasets(&files, &ViewerConfig::default(), false).await;

        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("/nonexistent/ride.txt"));
    }

    #[tokio::test]
    async fn test_export_command_writes_file() {
        let input = logger_file(&[
            ">23|01:1,12,0,0,0,0,0,0,0,52.0,4.0,10",
            ">23|01:2,12,0,0,0,0,0,0,0,52.1,4.1,11",
        ]);
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("ride.csv");
        let input_arg = input.path().to_string_lossy().into_owned();
        let output_arg = output.to_string_lossy().into_owned();

        let args = Args::parse_from([
            "telemetry-viewer",
            "-q",
            "export",
            &input_arg,
            "-o",
            &output_arg,
        ]);
        let Some(Commands::Export(export)) = &args.command else {
            panic!("expected export command");
        };

        run_export(&args, export, &ViewerConfig::default())
            .await
            .unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        assert_eq!(content.lines().count(), 3);
    }
}
