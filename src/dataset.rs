//! Decoded output of one logger file.

use serde::Serialize;

use crate::ingest::IngestStats;
use crate::models::{GpsPoint, TelemetryRecord};

/// All records of one ingested file
///
/// Built once by the ingest pipeline and read-only afterwards. Records keep
/// the order of their source lines, and their `time` is relative to
/// [`Dataset::time_offset`].
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<TelemetryRecord>,
    has_gps: bool,
    time_offset: f64,
    stats: IngestStats,
}

impl Dataset {
    pub(crate) fn new(
        records: Vec<TelemetryRecord>,
        has_gps: bool,
        time_offset: f64,
        stats: IngestStats,
    ) -> Self {
        Self {
            records,
            has_gps,
            time_offset,
            stats,
        }
    }

    pub fn records(&self) -> &[TelemetryRecord] {
        &self.records
    }

    /// True if at least one record carries a valid coordinate pair
    pub fn has_gps(&self) -> bool {
        self.has_gps
    }

    /// Raw logger time of the first record, subtracted from every record
    pub fn time_offset(&self) -> f64 {
        self.time_offset
    }

    pub fn stats(&self) -> &IngestStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// GPS-valid records in file order
    pub fn gps_points(&self) -> impl Iterator<Item = GpsPoint> + '_ {
        self.records.iter().filter_map(TelemetryRecord::gps_point)
    }

    /// Last GPS-valid position, the map's "current position"
    pub fn last_position(&self) -> Option<GpsPoint> {
        self.records.iter().rev().find_map(TelemetryRecord::gps_point)
    }

    /// Smallest and largest rebased time
    pub fn time_range(&self) -> Option<(f64, f64)> {
        self.records
            .iter()
            .map(|record| record.time)
            .filter(|time| time.is_finite())
            .fold(None, |range, time| match range {
                None => Some((time, time)),
                Some((min, max)) => Some((min.min(time), max.max(time))),
            })
    }

    /// Seconds covered by the records
    pub fn duration(&self) -> f64 {
        self.time_range().map_or(0.0, |(start, end)| end - start)
    }

    /// Summary for reports, keyed by the dataset's store key
    pub fn summary(&self, key: &str) -> DatasetSummary {
        DatasetSummary {
            key: key.to_string(),
            records: self.records.len(),
            has_gps: self.has_gps,
            gps_records: self.stats.gps_records,
            time_offset: self.time_offset,
            duration_seconds: self.duration(),
            lines_malformed: self.stats.lines_malformed,
            lines_skipped: self.stats.lines_skipped,
            missing_fields: self.stats.missing_fields,
        }
    }
}

/// Serializable overview of a dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub key: String,
    pub records: usize,
    pub has_gps: bool,
    pub gps_records: usize,
    pub time_offset: f64,
    pub duration_seconds: f64,
    pub lines_malformed: usize,
    pub lines_skipped: usize,
    pub missing_fields: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(time: f64, coords: Option<(f64, f64)>) -> TelemetryRecord {
        let mut record = TelemetryRecord::default();
        record.time = time;
        if let Some((lat, lon)) = coords {
            record.gps.lat = lat;
            record.gps.lon = lon;
            record.gps.speed = 10.0;
        }
        record
    }

    #[test]
    fn test_gps_points_and_last_position() {
        let dataset = Dataset::new(
            vec![
                record(0.0, Some((52.0, 4.0))),
                record(1.0, None),
                record(2.0, Some((52.1, 4.1))),
                record(3.0, None),
            ],
            true,
            100.0,
            IngestStats::new(),
        );

        let points: Vec<_> = dataset.gps_points().collect();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].time, 2.0);

        let last = dataset.last_position().unwrap();
        assert_eq!((last.lat, last.lon), (52.1, 4.1));
    }

    #[test]
    fn test_time_range_ignores_absent_times() {
        let dataset = Dataset::new(
            vec![record(f64::NAN, None), record(0.0, None), record(7.5, None)],
            false,
            0.0,
            IngestStats::new(),
        );

        assert_eq!(dataset.time_range(), Some((0.0, 7.5)));
        assert_eq!(dataset.duration(), 7.5);
    }

    #[test]
    fn test_empty_dataset() {
        let dataset = Dataset::new(Vec::new(), false, 0.0, IngestStats::new());
        assert!(dataset.is_empty());
        assert!(dataset.last_position().is_none());
        assert_eq!(dataset.duration(), 0.0);

        let summary = dataset.summary("empty.txt_1");
        assert_eq!(summary.records, 0);
        assert!(!summary.has_gps);
    }
}
