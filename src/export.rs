//! Dataset export to CSV and Parquet
//!
//! Columns come straight from the schema table in payload order. Absent
//! values are written as nulls, integer columns stay integers.

use polars::prelude::{
    Column as FrameColumn, CsvWriter, DataFrame, ParquetWriter, SerWriter,
};
use std::fs::File;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::config::{ExportConfig, ExportFormat};
use crate::dataset::Dataset;
use crate::error::{Result, TelemetryError};
use crate::schema::{COLUMNS, FieldKind, FieldValue};

/// Convert a dataset into a DataFrame with one column per schema field
pub fn dataset_to_dataframe(dataset: &Dataset) -> Result<DataFrame> {
    let records = dataset.records();
    debug!(
        "Converting {} records to DataFrame with {} columns",
        records.len(),
        COLUMNS.len()
    );

    let columns = COLUMNS
        .iter()
        .map(|column| match column.kind {
            FieldKind::Float => {
                let values: Vec<Option<f64>> = records
                    .iter()
                    .map(|record| (column.value)(record).as_f64())
                    .collect();
                FrameColumn::new(column.name.into(), values)
            }
            FieldKind::Int => {
                let values: Vec<Option<i64>> = records
                    .iter()
                    .map(|record| match (column.value)(record) {
                        FieldValue::Int(value) => value,
                        FieldValue::Float(_) => None,
                    })
                    .collect();
                FrameColumn::new(column.name.into(), values)
            }
        })
        .collect();

    Ok(DataFrame::new(columns)?)
}

/// Write a dataset to `path`, returning the number of rows written
pub fn write_dataset(dataset: &Dataset, path: &Path, config: &ExportConfig) -> Result<usize> {
    if dataset.is_empty() {
        return Err(TelemetryError::export(path, "dataset has no records"));
    }

    let mut df = dataset_to_dataframe(dataset)?;

    write_atomically(path, |file| {
        match config.format {
            ExportFormat::Csv => {
                CsvWriter::new(file)
                    .include_header(true)
                    .finish(&mut df)
                    .map_err(|e| {
                        TelemetryError::export(path, format!("CSV write failed: {}", e))
                    })?;
            }
            ExportFormat::Parquet => {
                ParquetWriter::new(file)
                    .with_compression(config.compression.to_polars_compression())
                    .finish(&mut df)
                    .map_err(|e| {
                        TelemetryError::export(path, format!("Parquet write failed: {}", e))
                    })?;
            }
        }
        Ok(())
    })?;

    info!(
        "Exported {} records to {} ({:?})",
        df.height(),
        path.display(),
        config.format
    );
    Ok(df.height())
}

/// Run `write` against a temporary file next to `path`, then rename it into place
///
/// On error the temporary file is removed and `path` is left untouched.
fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    debug!("Writing export to temporary file {}", tmp.path().display());
    write(tmp.as_file_mut())?;

    tmp.persist(path).map_err(|e| {
        TelemetryError::export(path, format!("cannot move export into place: {}", e.error))
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SCHEMA_FIELD_COUNT;
    use crate::ingest::LogIngestPipeline;
    use tempfile::TempDir;

    fn dataset() -> Dataset {
        LogIngestPipeline::default().ingest(
            ">23|01:50,12.5,1.1,2.2,7,0,0,0,7,52.1,4.2,18.4\n>23|01:51,12.4,1.0,2.0,x,0,0,0,8\n",
        )
    }

    #[test]
    fn test_dataframe_shape_and_nulls() {
        let df = dataset_to_dataframe(&dataset()).unwrap();
        assert_eq!(df.height(), 1);
        assert_eq!(df.width(), SCHEMA_FIELD_COUNT);
        assert_eq!(df.get_column_names()[0].as_str(), "time");

        let energy = df.column("totalEnergy10A").unwrap();
        assert_eq!(energy.null_count(), 0);
        let supercaps = df.column("supercapsVoltage").unwrap();
        assert_eq!(supercaps.null_count(), 1);
    }

    #[test]
    fn test_write_csv() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ride.csv");

        let rows = write_dataset(&dataset(), &path, &ExportConfig::default()).unwrap();
        assert_eq!(rows, 1);

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert!(lines.next().unwrap().starts_with("time,voltage,current10A"));
        assert!(lines.next().unwrap().starts_with("0.0,12.5,1.1"));
    }

    #[test]
    fn test_write_parquet() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ride.parquet");
        let config = ExportConfig {
            format: ExportFormat::Parquet,
            ..ExportConfig::default()
        };

        write_dataset(&dataset(), &path, &config).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");
        let empty = LogIngestPipeline::default().ingest("no records here\n");

        let err = write_dataset(&empty, &path, &ExportConfig::default()).unwrap_err();
        assert!(matches!(err, TelemetryError::Export { .. }));
        assert!(!path.exists());
    }

    fn entries(dir: &TempDir) -> Vec<std::path::PathBuf> {
        std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect()
    }

    #[test]
    fn test_failed_write_leaves_no_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ride.csv");

        let result = write_atomically(&path, |file| {
            use std::io::Write;
            file.write_all(b"time,volt")?;
            Err(TelemetryError::export(&path, "writer gave up"))
        });

        assert!(result.is_err());
        assert!(!path.exists());
        assert!(entries(&dir).is_empty());
    }

    #[test]
    fn test_failed_write_keeps_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ride.csv");
        std::fs::write(&path, "previous export\n").unwrap();

        let result = write_atomically(&path, |_| Err(TelemetryError::export(&path, "boom")));

        assert!(result.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "previous export\n");
        assert_eq!(entries(&dir), vec![path]);
    }

    #[test]
    fn test_export_replaces_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ride.csv");
        std::fs::write(&path, "previous export\n").unwrap();

        write_dataset(&dataset(), &path, &ExportConfig::default()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("time,voltage"));
        assert_eq!(entries(&dir).len(), 1);
    }

    #[test]
    fn test_missing_directory_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("ride.csv");

        assert!(write_dataset(&dataset(), &path, &ExportConfig::default()).is_err());
        assert!(!path.exists());
    }
}
