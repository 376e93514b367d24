//! Core data structures for decoded telemetry.
//!
//! A [`TelemetryRecord`] is one decoded logger line. Floating fields use
//! `NaN` for an absent value and integer fields use `None`, so a record can
//! always be built even when most of the line failed to parse.

use serde::Serialize;

/// Number of button channels reported by the logger
pub const BUTTON_CHANNELS: usize = 6;

/// Power measurements from the 10A and 50A sense paths
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerReadings {
    pub voltage: f64,
    #[serde(rename = "current10A")]
    pub current_10a: f64,
    #[serde(rename = "avgPower10A")]
    pub avg_power_10a: f64,
    #[serde(rename = "totalEnergy10A")]
    pub total_energy_10a: Option<i64>,
    #[serde(rename = "current50A")]
    pub current_50a: f64,
    #[serde(rename = "avgPower50A")]
    pub avg_power_50a: f64,
    #[serde(rename = "totalEnergy50A")]
    pub total_energy_50a: Option<i64>,
    pub total_energy_both: Option<i64>,
}

impl Default for PowerReadings {
    fn default() -> Self {
        Self {
            voltage: f64::NAN,
            current_10a: f64::NAN,
            avg_power_10a: f64::NAN,
            total_energy_10a: None,
            current_50a: f64::NAN,
            avg_power_50a: f64::NAN,
            total_energy_50a: None,
            total_energy_both: None,
        }
    }
}

/// GPS fix and PPS timing
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GpsReadings {
    pub lat: f64,
    pub lon: f64,
    /// Ground speed in km/h
    pub speed: f64,
    pub course: f64,
    #[serde(rename = "gpsPpsTime")]
    pub pps_time: f64,
    pub oscillator_deviation: f64,
}

impl Default for GpsReadings {
    fn default() -> Self {
        Self {
            lat: f64::NAN,
            lon: f64::NAN,
            speed: f64::NAN,
            course: f64::NAN,
            pps_time: f64::NAN,
            oscillator_deviation: f64::NAN,
        }
    }
}

/// One driver button channel (regen, full power, cruise, speed mode, status, CC drive)
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonChannel {
    /// 1 when active
    pub state: Option<i64>,
    /// Logger-local time of the last toggle
    pub last_change_time: f64,
    pub total_changes: Option<i64>,
}

impl Default for ButtonChannel {
    fn default() -> Self {
        Self {
            state: None,
            last_change_time: f64::NAN,
            total_changes: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImuReadings {
    pub accel_x: f64,
    pub accel_y: f64,
    pub accel_z: f64,
    pub gyro_x: f64,
    pub gyro_y: f64,
    pub gyro_z: f64,
    pub temp: f64,
}

impl Default for ImuReadings {
    fn default() -> Self {
        Self {
            accel_x: f64::NAN,
            accel_y: f64::NAN,
            accel_z: f64::NAN,
            gyro_x: f64::NAN,
            gyro_y: f64::NAN,
            gyro_z: f64::NAN,
            temp: f64::NAN,
        }
    }
}

/// LTC power monitor housekeeping
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PowerMonitor {
    #[serde(rename = "ltcConversionTime")]
    pub conversion_time: f64,
    #[serde(rename = "ltcAVCC")]
    pub avcc: f64,
    #[serde(rename = "ltcVREF")]
    pub vref: f64,
    #[serde(rename = "ltcTemp")]
    pub temp: f64,
    #[serde(rename = "sense50ATemp")]
    pub sense_50a_temp: f64,
    #[serde(rename = "sense10ATemp")]
    pub sense_10a_temp: f64,
}

impl Default for PowerMonitor {
    fn default() -> Self {
        Self {
            conversion_time: f64::NAN,
            avcc: f64::NAN,
            vref: f64::NAN,
            temp: f64::NAN,
            sense_50a_temp: f64::NAN,
            sense_10a_temp: f64::NAN,
        }
    }
}

/// SD card write timing
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StorageMetrics {
    #[serde(rename = "sdWriteStart")]
    pub write_start: f64,
    #[serde(rename = "sdWriteDuration")]
    pub write_duration: Option<i64>,
}

impl Default for StorageMetrics {
    fn default() -> Self {
        Self {
            write_start: f64::NAN,
            write_duration: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemPower {
    pub system_voltage: f64,
    pub supercaps_voltage: f64,
}

impl Default for SystemPower {
    fn default() -> Self {
        Self {
            system_voltage: f64::NAN,
            supercaps_voltage: f64::NAN,
        }
    }
}

/// One decoded telemetry line
///
/// `Default` yields a record with every field absent; the ingest pipeline
/// starts from it and fills in whatever decodes.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryRecord {
    /// Seconds since the first record of the file once rebased
    pub time: f64,
    pub power: PowerReadings,
    pub gps: GpsReadings,
    pub buttons: [ButtonChannel; BUTTON_CHANNELS],
    pub imu: ImuReadings,
    pub power_monitor: PowerMonitor,
    pub storage: StorageMetrics,
    pub system: SystemPower,
}

impl Default for TelemetryRecord {
    fn default() -> Self {
        Self {
            time: f64::NAN,
            power: PowerReadings::default(),
            gps: GpsReadings::default(),
            buttons: [ButtonChannel::default(); BUTTON_CHANNELS],
            imu: ImuReadings::default(),
            power_monitor: PowerMonitor::default(),
            storage: StorageMetrics::default(),
            system: SystemPower::default(),
        }
    }
}

impl TelemetryRecord {
    /// True when both coordinates are real numbers
    pub fn is_gps_valid(&self) -> bool {
        self.gps.lat.is_finite() && self.gps.lon.is_finite()
    }

    /// The coordinate pair, if the record carries one
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.is_gps_valid().then_some((self.gps.lat, self.gps.lon))
    }

    /// Mark both coordinates absent
    pub fn clear_coordinates(&mut self) {
        self.gps.lat = f64::NAN;
        self.gps.lon = f64::NAN;
    }

    /// Drive mode selected on the handlebar buttons
    ///
    /// Button 1 (boost) wins over button 2 (power); a zero or absent state
    /// counts as released.
    pub fn power_mode(&self) -> PowerMode {
        let pressed = |channel: &ButtonChannel| channel.state.is_some_and(|state| state != 0);

        if pressed(&self.buttons[0]) {
            PowerMode::Boost
        } else if pressed(&self.buttons[1]) {
            PowerMode::Power
        } else {
            PowerMode::None
        }
    }

    /// Map-facing view of the record, if it is GPS-valid
    pub fn gps_point(&self) -> Option<GpsPoint> {
        self.coordinates().map(|(lat, lon)| GpsPoint {
            time: self.time,
            lat,
            lon,
            speed: self.gps.speed,
            voltage: self.power.voltage,
            power_mode: self.power_mode(),
        })
    }
}

/// Drive mode derived from the button channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PowerMode {
    Boost,
    Power,
    None,
}

/// A GPS-valid position as consumed by the map view
///
/// Carries what the hover tooltip shows alongside the position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GpsPoint {
    pub time: f64,
    pub lat: f64,
    pub lon: f64,
    pub speed: f64,
    pub voltage: f64,
    pub power_mode: PowerMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_is_absent() {
        let record = TelemetryRecord::default();
        assert!(record.time.is_nan());
        assert!(record.power.total_energy_10a.is_none());
        assert!(record.buttons.iter().all(|b| b.state.is_none()));
        assert!(!record.is_gps_valid());
        assert!(record.gps_point().is_none());
    }

    #[test]
    fn test_coordinates_require_both_values() {
        let mut record = TelemetryRecord::default();
        record.gps.lat = 52.0;
        assert!(record.coordinates().is_none());

        record.gps.lon = 4.9;
        assert_eq!(record.coordinates(), Some((52.0, 4.9)));

        record.gps.lon = f64::INFINITY;
        assert!(!record.is_gps_valid());
    }

    #[test]
    fn test_clear_coordinates() {
        let mut record = TelemetryRecord::default();
        record.gps.lat = 52.0;
        record.gps.lon = 4.9;
        record.clear_coordinates();
        assert!(record.gps.lat.is_nan());
        assert!(record.gps.lon.is_nan());
    }

    fn with_buttons(btn1: Option<i64>, btn2: Option<i64>) -> TelemetryRecord {
        let mut record = TelemetryRecord::default();
        record.buttons[0].state = btn1;
        record.buttons[1].state = btn2;
        record
    }

    #[test]
    fn test_power_mode_boost_wins() {
        assert_eq!(with_buttons(Some(1), Some(1)).power_mode(), PowerMode::Boost);
        assert_eq!(with_buttons(Some(1), None).power_mode(), PowerMode::Boost);
        assert_eq!(with_buttons(Some(0), Some(1)).power_mode(), PowerMode::Power);
        assert_eq!(with_buttons(None, Some(2)).power_mode(), PowerMode::Power);
    }

    #[test]
    fn test_power_mode_none_when_released_or_absent() {
        assert_eq!(with_buttons(None, None).power_mode(), PowerMode::None);
        assert_eq!(with_buttons(Some(0), Some(0)).power_mode(), PowerMode::None);
        assert_eq!(TelemetryRecord::default().power_mode(), PowerMode::None);
    }

    #[test]
    fn test_gps_point_carries_tooltip_values() {
        let mut record = with_buttons(None, Some(1));
        record.time = 4.0;
        record.gps.lat = 52.37;
        record.gps.lon = 4.89;
        record.gps.speed = 18.4;
        record.power.voltage = 12.6;

        let point = record.gps_point().unwrap();
        assert_eq!(point.voltage, 12.6);
        assert_eq!(point.power_mode, PowerMode::Power);

        let json = serde_json::to_value(point).unwrap();
        assert_eq!(json["powerMode"], "Power");
    }

    #[test]
    fn test_serialized_names_follow_logger_columns() {
        let mut record = TelemetryRecord::default();
        record.time = 1.5;
        record.power.current_10a = 2.0;
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["time"], 1.5);
        assert_eq!(json["power"]["current10A"], 2.0);
        assert!(json["gps"]["lat"].is_null());
        assert!(json["powerMonitor"]["ltcAVCC"].is_null());
        assert_eq!(json["buttons"].as_array().unwrap().len(), BUTTON_CHANNELS);
    }
}
