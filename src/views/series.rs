//! Time series for the chart view
//!
//! Any numeric schema field can be plotted against rebased time. Records
//! where the field is absent leave a gap rather than a zero.

use serde::Serialize;

use crate::dataset::Dataset;
use crate::error::{Result, TelemetryError};
use crate::schema;

/// A field offered in the chart's field selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartField {
    pub name: &'static str,
    pub label: &'static str,
}

/// Fields offered for charting by default
pub const CHART_FIELDS: &[ChartField] = &[
    ChartField {
        name: "voltage",
        label: "Voltage (V)",
    },
    ChartField {
        name: "speed",
        label: "Speed (km/h)",
    },
    ChartField {
        name: "systemVoltage",
        label: "System Voltage (V)",
    },
    ChartField {
        name: "accelX",
        label: "X Acceleration (G)",
    },
    ChartField {
        name: "accelY",
        label: "Y Acceleration (G)",
    },
    ChartField {
        name: "accelZ",
        label: "Z Acceleration (G)",
    },
];

/// Display label for a field, falling back to its schema name
pub fn label_for(name: &str) -> &str {
    CHART_FIELDS
        .iter()
        .find(|field| field.name == name)
        .map_or(name, |field| field.label)
}

/// One plotted line: `(time, value)` pairs in file order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub field: String,
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

impl Series {
    /// Smallest and largest value
    pub fn value_range(&self) -> Option<(f64, f64)> {
        min_max(self.points.iter().map(|&(_, value)| value))
    }
}

/// Build the series for one schema field
pub fn series(dataset: &Dataset, field: &str) -> Result<Series> {
    let column = schema::column(field).ok_or_else(|| TelemetryError::unknown_field(field))?;

    let points = dataset
        .records()
        .iter()
        .filter(|record| record.time.is_finite())
        .filter_map(|record| (column.value)(record).as_f64().map(|value| (record.time, value)))
        .collect();

    Ok(Series {
        field: column.name.to_string(),
        label: label_for(column.name).to_string(),
        points,
    })
}

/// Shared y-axis domain across several series
pub fn y_domain(series: &[Series]) -> Option<(f64, f64)> {
    min_max(
        series
            .iter()
            .flat_map(|s| s.points.iter().map(|&(_, value)| value)),
    )
}

fn min_max(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |range, value| match range {
        None => Some((value, value)),
        Some((min, max)) => Some((min.min(value), max.max(value))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::LogIngestPipeline;

    fn dataset() -> Dataset {
        let text = "\
>23|01:100,12.5,0,0,0,0,0,0,0,,,3.0
>23|01:101,bad,0,0,0,0,0,0,0,,,4.0
>23|01:102,12.1,0,0,0,0,0,0,0,,,5.0
";
        LogIngestPipeline::default().ingest(text)
    }

    #[test]
    fn test_series_skips_absent_values() {
        let voltage = series(&dataset(), "voltage").unwrap();
        assert_eq!(voltage.points, vec![(0.0, 12.5), (2.0, 12.1)]);
        assert_eq!(voltage.label, "Voltage (V)");
        assert_eq!(voltage.value_range(), Some((12.1, 12.5)));
    }

    #[test]
    fn test_integer_field_series() {
        let energy = series(&dataset(), "totalEnergy10A").unwrap();
        assert_eq!(energy.points.len(), 3);
        assert_eq!(energy.label, "totalEnergy10A");
    }

    #[test]
    fn test_unknown_field() {
        let err = series(&dataset(), "altitude").unwrap_err();
        assert!(matches!(err, TelemetryError::UnknownField { .. }));
    }

    #[test]
    fn test_y_domain_across_series() {
        let data = dataset();
        let all = vec![
            series(&data, "voltage").unwrap(),
            series(&data, "speed").unwrap(),
        ];
        assert_eq!(y_domain(&all), Some((3.0, 12.5)));
        assert_eq!(y_domain(&[]), None);
    }

    #[test]
    fn test_chart_fields_exist_in_schema() {
        for field in CHART_FIELDS {
            assert!(schema::column(field.name).is_some(), "{}", field.name);
        }
    }
}
