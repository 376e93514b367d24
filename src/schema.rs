//! Column table for the logger record line.
//!
//! [`COLUMNS`] is the single mapping from payload position to field name,
//! numeric type, decoder and accessor. The ingest pipeline decodes through
//! it, the exporter writes columns from it and the chart series view looks
//! fields up in it by name. Growing the firmware schema means appending a
//! row here and nowhere else.

use serde::Serialize;

use crate::constants::SCHEMA_FIELD_COUNT;
use crate::ingest::field_parsers::{parse_float, parse_int};
use crate::models::TelemetryRecord;

/// Numeric type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Float,
    Int,
}

/// Logical channel a column belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldGroup {
    Time,
    Power,
    Gps,
    Buttons,
    Imu,
    PowerMonitoring,
    Storage,
    System,
}

impl FieldGroup {
    pub fn label(&self) -> &'static str {
        match self {
            FieldGroup::Time => "Time",
            FieldGroup::Power => "Power",
            FieldGroup::Gps => "GPS",
            FieldGroup::Buttons => "Buttons",
            FieldGroup::Imu => "IMU",
            FieldGroup::PowerMonitoring => "Power monitoring",
            FieldGroup::Storage => "Storage",
            FieldGroup::System => "System",
        }
    }
}

/// A decoded value read back from a record
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Float(f64),
    Int(Option<i64>),
}

impl FieldValue {
    /// Numeric value, `None` when absent or not finite
    pub fn as_f64(self) -> Option<f64> {
        match self {
            FieldValue::Float(value) => value.is_finite().then_some(value),
            FieldValue::Int(value) => value.map(|v| v as f64),
        }
    }

    pub fn is_absent(self) -> bool {
        self.as_f64().is_none()
    }
}

/// One row of the column table
#[derive(Debug, Clone, Copy)]
pub struct Column {
    /// Position in the comma-separated payload
    pub index: usize,
    /// External field name used by exporters and chart lookups
    pub name: &'static str,
    pub kind: FieldKind,
    pub group: FieldGroup,
    /// Store the raw field text into the record, absent on parse failure
    pub decode: fn(&mut TelemetryRecord, &str),
    /// Read the field back from a record
    pub value: fn(&TelemetryRecord) -> FieldValue,
}

macro_rules! column {
    ($index:expr, $name:literal, $group:ident, float, $($field:tt)+) => {
        Column {
            index: $index,
            name: $name,
            kind: FieldKind::Float,
            group: FieldGroup::$group,
            decode: |record, raw| {
                record.$($field)+ = parse_float(raw);
            },
            value: |record| FieldValue::Float(record.$($field)+),
        }
    };
    ($index:expr, $name:literal, $group:ident, int, $($field:tt)+) => {
        Column {
            index: $index,
            name: $name,
            kind: FieldKind::Int,
            group: FieldGroup::$group,
            decode: |record, raw| {
                record.$($field)+ = parse_int(raw);
            },
            value: |record| FieldValue::Int(record.$($field)+),
        }
    };
}

/// Record line columns in payload order
pub static COLUMNS: [Column; SCHEMA_FIELD_COUNT] = [
    column!(0, "time", Time, float, time),
    column!(1, "voltage", Power, float, power.voltage),
    column!(2, "current10A", Power, float, power.current_10a),
    column!(3, "avgPower10A", Power, float, power.avg_power_10a),
    column!(4, "totalEnergy10A", Power, int, power.total_energy_10a),
    column!(5, "current50A", Power, float, power.current_50a),
    column!(6, "avgPower50A", Power, float, power.avg_power_50a),
    column!(7, "totalEnergy50A", Power, int, power.total_energy_50a),
    column!(8, "totalEnergyBoth", Power, int, power.total_energy_both),
    column!(9, "lat", Gps, float, gps.lat),
    column!(10, "lon", Gps, float, gps.lon),
    column!(11, "speed", Gps, float, gps.speed),
    column!(12, "course", Gps, float, gps.course),
    column!(13, "btn1State", Buttons, int, buttons[0].state),
    column!(14, "btn1LastChange", Buttons, float, buttons[0].last_change_time),
    column!(15, "btn1TotalChanges", Buttons, int, buttons[0].total_changes),
    column!(16, "btn2State", Buttons, int, buttons[1].state),
    column!(17, "btn2LastChange", Buttons, float, buttons[1].last_change_time),
    column!(18, "btn2TotalChanges", Buttons, int, buttons[1].total_changes),
    column!(19, "btn3State", Buttons, int, buttons[2].state),
    column!(20, "btn3LastChange", Buttons, float, buttons[2].last_change_time),
    column!(21, "btn3TotalChanges", Buttons, int, buttons[2].total_changes),
    column!(22, "btn4State", Buttons, int, buttons[3].state),
    column!(23, "btn4LastChange", Buttons, float, buttons[3].last_change_time),
    column!(24, "btn4TotalChanges", Buttons, int, buttons[3].total_changes),
    column!(25, "btn5State", Buttons, int, buttons[4].state),
    column!(26, "btn5LastChange", Buttons, float, buttons[4].last_change_time),
    column!(27, "btn5TotalChanges", Buttons, int, buttons[4].total_changes),
    column!(28, "btn6State", Buttons, int, buttons[5].state),
    column!(29, "btn6LastChange", Buttons, float, buttons[5].last_change_time),
    column!(30, "btn6TotalChanges", Buttons, int, buttons[5].total_changes),
    column!(31, "gpsPpsTime", Gps, float, gps.pps_time),
    column!(32, "oscillatorDeviation", Gps, float, gps.oscillator_deviation),
    column!(33, "accelX", Imu, float, imu.accel_x),
    column!(34, "accelY", Imu, float, imu.accel_y),
    column!(35, "accelZ", Imu, float, imu.accel_z),
    column!(36, "gyroX", Imu, float, imu.gyro_x),
    column!(37, "gyroY", Imu, float, imu.gyro_y),
    column!(38, "gyroZ", Imu, float, imu.gyro_z),
    column!(39, "imuTemp", Imu, float, imu.temp),
    column!(40, "ltcConversionTime", PowerMonitoring, float, power_monitor.conversion_time),
    column!(41, "ltcAVCC", PowerMonitoring, float, power_monitor.avcc),
    column!(42, "ltcVREF", PowerMonitoring, float, power_monitor.vref),
    column!(43, "ltcTemp", PowerMonitoring, float, power_monitor.temp),
    column!(44, "sense50ATemp", PowerMonitoring, float, power_monitor.sense_50a_temp),
    column!(45, "sense10ATemp", PowerMonitoring, float, power_monitor.sense_10a_temp),
    column!(46, "sdWriteStart", Storage, float, storage.write_start),
    column!(47, "sdWriteDuration", Storage, int, storage.write_duration),
    column!(48, "systemVoltage", System, float, system.system_voltage),
    column!(49, "supercapsVoltage", System, float, system.supercaps_voltage),
];

/// Look up a column by its field name
pub fn column(name: &str) -> Option<&'static Column> {
    COLUMNS.iter().find(|column| column.name == name)
}
