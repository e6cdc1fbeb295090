//! Timestamp handling for telemetry rows.
//!
//! The device writes calendar dates as `dd/mm/yyyy` (two-digit years occur in
//! older firmware and are expanded to `20YY`) and times as `HH:mm` or
//! `HH:mm:ss`. Malformed values never abort a parse; they simply yield no
//! timestamp and are filtered out by the statistics downstream.

use chrono::{NaiveDate, NaiveDateTime, Timelike};

/// Parse a `dd/mm/yyyy` date plus `HH:mm[:ss]` time into a timestamp.
/// Returns `None` when either part is malformed.
pub fn parse_timestamp(date: &str, time: &str) -> Option<NaiveDateTime> {
    let mut date_parts = date.split('/');
    let day: u32 = date_parts.next()?.trim().parse().ok()?;
    let month: u32 = date_parts.next()?.trim().parse().ok()?;
    let mut year: i32 = date_parts.next()?.trim().parse().ok()?;
    if year < 100 {
        // Two-digit years are from the 2000s per device firmware.
        year += 2000;
    }

    let mut time_parts = time.split(':');
    let hour: u32 = time_parts.next()?.trim().parse().ok()?;
    let minute: u32 = time_parts.next()?.trim().parse().ok()?;
    let second: u32 = match time_parts.next() {
        Some(s) => s.trim().parse().ok()?,
        None => 0,
    };

    NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)
}

/// Normalize a time string to three `:`-separated parts: `HH:mm` becomes
/// `HH:mm:00`, anything longer is cut back to `HH:mm:ss`.
pub fn normalize_time(time: &str) -> String {
    let parts: Vec<&str> = time.split(':').collect();
    match parts.len() {
        2 => format!("{}:{}:00", parts[0], parts[1]),
        n if n >= 3 => format!("{}:{}:{}", parts[0], parts[1], parts[2]),
        _ => time.to_string(),
    }
}

/// Format the elapsed time between two timestamps as `D Jr, H Hr et M Mn`.
///
/// Seconds are ignored on both ends (the legacy viewer computed trip
/// duration from hour/minute only) and the decomposition uses floor
/// division of the remaining minutes.
pub fn format_duration(start: NaiveDateTime, end: NaiveDateTime) -> String {
    let start = truncate_to_minute(start);
    let end = truncate_to_minute(end);

    let total_minutes = (end - start).num_minutes();
    let days = total_minutes / (24 * 60);
    let hours = total_minutes / 60 % 24;
    let minutes = total_minutes % 60;

    format!("{} Jr, {} Hr et {} Mn", days, hours, minutes)
}

fn truncate_to_minute(ts: NaiveDateTime) -> NaiveDateTime {
    ts.with_second(0).unwrap_or(ts).with_nanosecond(0).unwrap_or(ts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_timestamp() {
        let ts = parse_timestamp("12/06/2024", "08:30:15").unwrap();
        assert_eq!(ts.to_string(), "2024-06-12 08:30:15");
    }

    #[test]
    fn test_parse_without_seconds() {
        let ts = parse_timestamp("01/01/2023", "23:59").unwrap();
        assert_eq!(ts.to_string(), "2023-01-01 23:59:00");
    }

    #[test]
    fn test_two_digit_year_expands_to_2000s() {
        let ts = parse_timestamp("05/03/24", "00:00").unwrap();
        assert_eq!(ts.to_string(), "2024-03-05 00:00:00");
    }

    #[test]
    fn test_malformed_inputs_yield_none() {
        assert!(parse_timestamp("", "08:00").is_none());
        assert!(parse_timestamp("12/06/2024", "").is_none());
        assert!(parse_timestamp("12-06-2024", "08:00").is_none());
        assert!(parse_timestamp("99/99/2024", "08:00").is_none());
        assert!(parse_timestamp("12/06/2024", "25:00").is_none());
        assert!(parse_timestamp("abc", "def").is_none());
    }

    #[test]
    fn test_normalize_time() {
        assert_eq!(normalize_time("08:30"), "08:30:00");
        assert_eq!(normalize_time("08:30:15"), "08:30:15");
        assert_eq!(normalize_time("08:30:15:99"), "08:30:15");
        assert_eq!(normalize_time("0830"), "0830");
    }

    #[test]
    fn test_format_duration() {
        let start = parse_timestamp("12/06/2024", "08:00").unwrap();
        let end = parse_timestamp("14/06/2024", "10:45").unwrap();
        assert_eq!(format_duration(start, end), "2 Jr, 2 Hr et 45 Mn");
    }

    #[test]
    fn test_format_duration_ignores_seconds() {
        // 08:00:30 -> 09:00:10 is 60 whole minutes once seconds are dropped.
        let start = parse_timestamp("12/06/2024", "08:00:30").unwrap();
        let end = parse_timestamp("12/06/2024", "09:00:10").unwrap();
        assert_eq!(format_duration(start, end), "0 Jr, 1 Hr et 0 Mn");
    }

    #[test]
    fn test_format_duration_zero() {
        let ts = parse_timestamp("12/06/2024", "08:00").unwrap();
        assert_eq!(format_duration(ts, ts), "0 Jr, 0 Hr et 0 Mn");
    }
}
