//! Per-trip summary statistics for the header card and print layout.

use serde::Serialize;

use super::distance::{direct_distance_nm, nm_to_km, total_distance_nm};
use crate::datetime::{format_duration, normalize_time};
use crate::parsers::types::{TripLog, INVALID_TEMP, TEMP_CHANNELS};
use crate::settings::ChartSettings;

/// Scalar trip statistics derived from a parsed log.
#[derive(Clone, Debug, Default, Serialize)]
pub struct TripSummary {
    /// First timestamped row, `dd/mm/yyyy HH:mm:ss`.
    pub start: Option<String>,
    /// Last timestamped row, `dd/mm/yyyy HH:mm:ss`.
    pub end: Option<String>,
    /// Elapsed time formatted `D Jr, H Hr et M Mn`.
    pub duration: Option<String>,
    /// Total path distance, nautical miles.
    pub distance_nm: f64,
    pub distance_km: f64,
    /// First-to-last fix distance, nautical miles.
    pub direct_distance_nm: f64,
    pub direct_distance_km: f64,
    /// Enabled sensor channels with at least one valid reading.
    pub sensor_count: usize,
    /// Display names of those channels, in settings order.
    pub active_sensors: Vec<String>,
}

/// Compute the trip summary. Sensor enablement and labels come from the
/// chart settings, which this function only reads.
pub fn summarize(log: &TripLog, settings: &ChartSettings) -> TripSummary {
    let mut summary = TripSummary {
        distance_nm: total_distance_nm(&log.rows),
        direct_distance_nm: direct_distance_nm(&log.rows),
        ..Default::default()
    };
    summary.distance_km = nm_to_km(summary.distance_nm);
    summary.direct_distance_km = nm_to_km(summary.direct_distance_nm);

    for sensor in &settings.sensors {
        if !sensor.enabled {
            continue;
        }
        let Some(channel) = (sensor.id as usize).checked_sub(1) else {
            continue;
        };
        if channel >= TEMP_CHANNELS {
            continue;
        }

        let has_valid = log
            .rows
            .iter()
            .any(|row| !row.temps[channel].is_nan() && row.temps[channel] != INVALID_TEMP);
        if has_valid {
            let name = if !sensor.label.is_empty() {
                sensor.label.clone()
            } else if let Some(header_name) = log.sensor_name(sensor.id as usize) {
                header_name.to_string()
            } else {
                format!("Temp{}", sensor.id)
            };
            summary.active_sensors.push(name);
            summary.sensor_count += 1;
        }
    }

    let mut timestamped = log.rows.iter().filter(|row| row.has_datetime());
    let first = timestamped.next();
    let last = timestamped.last().or(first);

    if let (Some(first), Some(last)) = (first, last) {
        summary.start = Some(format!(
            "{} {}",
            first.date,
            normalize_time(&first.time_of_day)
        ));
        summary.end = Some(format!("{} {}", last.date, normalize_time(&last.time_of_day)));
        summary.duration = first
            .timestamp()
            .zip(last.timestamp())
            .map(|(a, b)| format_duration(a, b));
    }

    summary
}
