use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;

use crate::datetime;

/// Number of temperature channels the device can report.
pub const TEMP_CHANNELS: usize = 12;
/// Number of alarm/setpoint flag channels carried by the current format.
pub const ALARM_CHANNELS: usize = 3;

/// Reserved temperature value meaning "sensor absent or invalid", as
/// distinct from `NaN` which marks a missing/unparsable field.
pub const INVALID_TEMP: f64 = -127.0;

/// One timestamped sample from the device.
///
/// Date and time are kept verbatim as written in the file; coordinates use
/// `0` as the "no fix" sentinel and temperatures use [`INVALID_TEMP`].
/// Rows are immutable once parsed - display transforms build new series
/// instead of rewriting them.
#[derive(Clone, Debug, Serialize)]
pub struct TelemetryRow {
    /// Calendar date, `dd/mm/yyyy`.
    pub date: String,
    /// Time of day, `HH:mm` or `HH:mm:ss`.
    pub time_of_day: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Temperature channels Temp1..Temp12, °C.
    pub temps: [f64; TEMP_CHANNELS],
    /// Alarm flag channels AF/AS/AT.
    pub alarms: [f64; ALARM_CHANNELS],
}

impl Default for TelemetryRow {
    fn default() -> Self {
        Self {
            date: String::new(),
            time_of_day: String::new(),
            latitude: f64::NAN,
            longitude: f64::NAN,
            temps: [f64::NAN; TEMP_CHANNELS],
            alarms: [f64::NAN; ALARM_CHANNELS],
        }
    }
}

impl TelemetryRow {
    /// Composite timestamp built from date and time of day, `None` when
    /// either part is malformed.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        datetime::parse_timestamp(&self.date, &self.time_of_day)
    }

    /// True when both coordinates are parsed and nonzero.
    pub fn has_fix(&self) -> bool {
        !self.latitude.is_nan()
            && !self.longitude.is_nan()
            && self.latitude != 0.0
            && self.longitude != 0.0
    }

    /// True when both date and time of day are present as text. Statistics
    /// only look at rows passing this test.
    pub fn has_datetime(&self) -> bool {
        !self.date.is_empty() && !self.time_of_day.is_empty()
    }
}

/// Result of parsing one log file: chronologically sorted rows plus the
/// sensor display names extracted from the header row.
#[derive(Clone, Debug, Default, Serialize)]
pub struct TripLog {
    pub rows: Vec<TelemetryRow>,
    /// Channel key (`Temp1`..`Temp12`) to header-derived display name.
    /// Channels whose header column was empty are absent.
    pub sensor_names: HashMap<String, String>,
}

impl TripLog {
    /// Header display name for a 1-based sensor id, if the header carried one.
    pub fn sensor_name(&self, id: usize) -> Option<&str> {
        self.sensor_names
            .get(&format!("Temp{}", id))
            .map(String::as_str)
    }
}

/// File-structural failures. Content-level anomalies (bad numbers, bad
/// timestamps, undecodable characters) never surface here; they degrade to
/// `NaN` fields or missing timestamps inside the rows instead.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("file content is empty")]
    EmptyInput,
    #[error("no header row found within the first {scanned} lines and the file has only {lines} lines")]
    UnrecognizedFormat { scanned: usize, lines: usize },
    #[error("no telemetry rows found after the header")]
    NoData,
}

/// Trait for log file parsers.
pub trait Parseable {
    fn parse(&self, data: &str) -> Result<TripLog, ParseError>;
}
