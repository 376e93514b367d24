//! Host-owned store of ingested datasets.
//!
//! Each loaded file gets its own `name_timestamp` key, so several files can
//! be open side by side and map/chart consumers address them explicitly.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::constants::dataset_key;
use crate::dataset::Dataset;
use crate::error::{Result, TelemetryError};
use crate::models::TelemetryRecord;

/// Identifier of a dataset within a [`DatasetStore`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DatasetKey(String);

impl DatasetKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DatasetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for DatasetKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Datasets keyed by file name and load time, in insertion order
#[derive(Debug, Default)]
pub struct DatasetStore {
    datasets: HashMap<DatasetKey, Dataset>,
    order: Vec<DatasetKey>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a dataset under `<file_name>_<now in unix millis>`
    pub fn insert(&mut self, file_name: &str, dataset: Dataset) -> DatasetKey {
        let timestamp_ms = chrono::Utc::now().timestamp_millis();
        self.insert_with_timestamp(file_name, timestamp_ms, dataset)
    }

    /// Store a dataset under `<file_name>_<timestamp_ms>`
    ///
    /// A clashing key gets a `-N` suffix; existing datasets are never replaced.
    pub fn insert_with_timestamp(
        &mut self,
        file_name: &str,
        timestamp_ms: i64,
        dataset: Dataset,
    ) -> DatasetKey {
        let base = dataset_key(file_name, timestamp_ms);
        let mut candidate = base.clone();
        let mut suffix = 1;
        while self.datasets.contains_key(candidate.as_str()) {
            candidate = format!("{}-{}", base, suffix);
            suffix += 1;
        }

        let key = DatasetKey(candidate);
        debug!("Storing dataset {} ({} records)", key, dataset.len());
        self.order.push(key.clone());
        self.datasets.insert(key.clone(), dataset);
        key
    }

    pub fn get(&self, key: &str) -> Result<&Dataset> {
        self.datasets
            .get(key)
            .ok_or_else(|| TelemetryError::dataset_not_found(key))
    }

    /// Records of a dataset in file order
    pub fn get_records(&self, key: &str) -> Result<&[TelemetryRecord]> {
        self.get(key).map(Dataset::records)
    }

    pub fn has_gps(&self, key: &str) -> Result<bool> {
        self.get(key).map(Dataset::has_gps)
    }

    pub fn get_time_offset(&self, key: &str) -> Result<f64> {
        self.get(key).map(Dataset::time_offset)
    }

    /// Drop a dataset, returning it
    pub fn remove(&mut self, key: &str) -> Result<Dataset> {
        let dataset = self
            .datasets
            .remove(key)
            .ok_or_else(|| TelemetryError::dataset_not_found(key))?;
        self.order.retain(|k| k.as_str() != key);
        Ok(dataset)
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &DatasetKey> {
        self.order.iter()
    }

    /// Datasets in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&DatasetKey, &Dataset)> {
        self.order
            .iter()
            .filter_map(|key| self.datasets.get(key).map(|dataset| (key, dataset)))
    }

    /// Most recently stored dataset
    pub fn latest(&self) -> Option<(&DatasetKey, &Dataset)> {
        self.order
            .last()
            .and_then(|key| self.datasets.get(key).map(|dataset| (key, dataset)))
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::LogIngestPipeline;

    fn sample_dataset(lines: &str) -> Dataset {
        LogIngestPipeline::default().ingest(lines)
    }

    #[test]
    fn test_insert_and_lookup() {
        let mut store = DatasetStore::new();
        let dataset = sample_dataset(">23|01:100,12,0,0,0,0,0,0,0,52.1,4.2,5\n");
        let key = store.insert_with_timestamp("ride.txt", 1_000, dataset);

        assert_eq!(key.as_str(), "ride.txt_1000");
        assert_eq!(store.get_records("ride.txt_1000").unwrap().len(), 1);
        assert!(store.has_gps("ride.txt_1000").unwrap());
        assert_eq!(store.get_time_offset("ride.txt_1000").unwrap(), 100.0);
    }

    #[test]
    fn test_unknown_key() {
        let store = DatasetStore::new();
        let err = store.get("missing_1").unwrap_err();
        assert!(matches!(err, TelemetryError::DatasetNotFound { .. }));
        assert!(store.has_gps("missing_1").is_err());
    }

    #[test]
    fn test_key_collision_keeps_both() {
        let mut store = DatasetStore::new();
        let first = store.insert_with_timestamp("a.txt", 5, sample_dataset(""));
        let second = store.insert_with_timestamp("a.txt", 5, sample_dataset(""));

        assert_ne!(first, second);
        assert_eq!(second.as_str(), "a.txt_5-1");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_insertion_order_and_remove() {
        let mut store = DatasetStore::new();
        let a = store.insert_with_timestamp("a.txt", 2, sample_dataset(""));
        let b = store.insert_with_timestamp("b.txt", 1, sample_dataset(""));

        let keys: Vec<_> = store.keys().cloned().collect();
        assert_eq!(keys, vec![a.clone(), b.clone()]);
        assert_eq!(store.latest().unwrap().0, &b);

        store.remove(b.as_str()).unwrap();
        assert_eq!(store.latest().unwrap().0, &a);
        assert!(store.remove(b.as_str()).is_err());
    }
}
