//! Tests for ingest statistics

use super::super::stats::IngestStats;

#[test]
fn test_ingest_stats_calculation() {
    let stats = IngestStats {
        record_lines: 100,
        records_decoded: 95,
        lines_malformed: 5,
        ..IngestStats::new()
    };

    assert_eq!(stats.success_rate(), 95.0);
    assert!(stats.is_successful());

    let poor_stats = IngestStats {
        record_lines: 100,
        records_decoded: 80,
        lines_malformed: 20,
        ..IngestStats::new()
    };

    assert_eq!(poor_stats.success_rate(), 80.0);
    assert!(!poor_stats.is_successful());
}

#[test]
fn test_ingest_stats_empty() {
    let empty_stats = IngestStats::default();

    assert_eq!(empty_stats.total_lines, 0);
    assert_eq!(empty_stats.records_decoded, 0);
    assert!(empty_stats.errors.is_empty());
    assert_eq!(empty_stats.success_rate(), 0.0);
    assert!(!empty_stats.is_successful());
}

#[test]
fn test_skipped_lines_do_not_affect_rate() {
    let stats = IngestStats {
        total_lines: 1000,
        lines_skipped: 990,
        record_lines: 10,
        records_decoded: 10,
        ..IngestStats::new()
    };

    assert_eq!(stats.success_rate(), 100.0);
}

#[test]
fn test_ingest_stats_json() {
    let stats = IngestStats {
        total_lines: 3,
        errors: vec!["Line 2: too short".to_string()],
        ..IngestStats::new()
    };

    let json = serde_json::to_string(&stats).unwrap();
    let back: IngestStats = serde_json::from_str(&json).unwrap();
    assert_eq!(back, stats);
}
