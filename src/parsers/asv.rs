//! Parser for the ASV unit's CSV export format.
//!
//! A file is a handful of metadata lines, a column-header row, then one data
//! row per sample. Any of these lines may be plaintext or run through the
//! substitution codec - files freely mix both - so classification happens
//! per line. Header lookup resolves Date/Time/Lat/Lon by column name with
//! legacy positional fallbacks; temperature and alarm channels always come
//! from fixed positions, which is how the device has laid them out since the
//! first firmware.

use rayon::prelude::*;
use std::collections::HashMap;

use super::types::{
    ParseError, Parseable, TelemetryRow, TripLog, ALARM_CHANNELS, TEMP_CHANNELS,
};
use crate::codec::{is_plaintext, Codec};

/// How many leading lines are scanned for the header row.
const HEADER_SCAN_LINES: usize = 25;
/// Header row index assumed when the scan finds nothing (legacy exports).
const LEGACY_HEADER_ROW: usize = 20;
/// First temperature column; Temp1..Temp12 occupy columns 3..=14.
const TEMP_FIRST_COL: usize = 3;
/// First alarm flag column; AF/AS/AT occupy columns 15..=17.
const ALARM_FIRST_COL: usize = 15;
/// Coordinate columns in the legacy layout.
const LEGACY_LAT_COL: usize = 27;
const LEGACY_LON_COL: usize = 28;

/// Legacy positions for the name-resolved fields: 0=ID, 1=Date, 2=Time.
const LEGACY_DATE_COL: usize = 1;
const LEGACY_TIME_COL: usize = 2;

/// ASV log file parser. Holds the codec it decodes lines with; construct
/// once and reuse, parses are independent and reentrant.
pub struct Asv {
    codec: Codec,
}

impl Asv {
    pub fn new() -> Self {
        Self {
            codec: Codec::new(),
        }
    }

    /// Scan the first lines of the file for the column-header row, testing
    /// each line both raw and decoded. Falls back to the legacy fixed index
    /// when nothing matches.
    fn locate_header(&self, lines: &[&str]) -> usize {
        for (index, line) in lines.iter().take(HEADER_SCAN_LINES).enumerate() {
            if header_markers(line) || header_markers(&self.codec.decode(line)) {
                return index;
            }
        }
        tracing::warn!(
            "no header row within the first {} lines, assuming legacy layout at row {}",
            HEADER_SCAN_LINES,
            LEGACY_HEADER_ROW
        );
        LEGACY_HEADER_ROW
    }

    /// Parse one data line into a telemetry row. Never fails: unresolvable
    /// fields come out as empty strings or `NaN`.
    fn parse_line(&self, line: &str, col_map: &HashMap<String, usize>) -> TelemetryRow {
        let decoded;
        let line = if is_plaintext(line) {
            line
        } else {
            decoded = self.codec.decode(line);
            &decoded
        };

        let values: Vec<&str> = line.split(',').collect();

        // Empty fields count as absent so lookup chains fall through, the
        // same way the legacy viewer's truthiness checks did.
        let by_name = |name: &str| {
            col_map
                .get(name)
                .and_then(|&idx| values.get(idx))
                .copied()
                .filter(|v| !v.is_empty())
        };
        let by_index = |idx: usize| values.get(idx).copied().filter(|v| !v.is_empty());

        let mut row = TelemetryRow {
            date: by_name("Date")
                .or_else(|| by_index(LEGACY_DATE_COL))
                .unwrap_or("")
                .to_string(),
            time_of_day: by_name("Time of Day")
                .or_else(|| by_index(LEGACY_TIME_COL))
                .unwrap_or("")
                .to_string(),
            latitude: coerce(by_name("Latitude").or_else(|| by_name("Lat"))),
            longitude: coerce(
                by_name("Longitude")
                    .or_else(|| by_name("Long"))
                    .or_else(|| by_name("Lng")),
            ),
            ..Default::default()
        };

        // Temperatures are positional only; the column map never applies.
        for channel in 0..TEMP_CHANNELS {
            row.temps[channel] = coerce(values.get(TEMP_FIRST_COL + channel).copied());
        }

        for (channel, name) in ["AF", "AS", "AT"].into_iter().enumerate().take(ALARM_CHANNELS) {
            row.alarms[channel] =
                coerce(by_name(name).or_else(|| by_index(ALARM_FIRST_COL + channel)));
        }

        // Legacy layout keeps coordinates far right; re-read both when name
        // resolution produced nothing and the row is wide enough.
        if row.latitude.is_nan() && values.len() > LEGACY_LAT_COL {
            row.latitude = coerce(values.get(LEGACY_LAT_COL).copied());
            row.longitude = coerce(values.get(LEGACY_LON_COL).copied());
        }

        row
    }
}

impl Default for Asv {
    fn default() -> Self {
        Self::new()
    }
}

impl Parseable for Asv {
    fn parse(&self, contents: &str) -> Result<TripLog, ParseError> {
        if contents.trim().is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let lines: Vec<&str> = contents.split('\n').collect();

        let header_index = self.locate_header(&lines);
        let Some(header_line) = lines.get(header_index) else {
            return Err(ParseError::UnrecognizedFormat {
                scanned: lines.len().min(HEADER_SCAN_LINES),
                lines: lines.len(),
            });
        };

        let mut header = header_line.to_string();
        if !header.contains(',') || (!header.contains("Date") && !header.contains("SavingID")) {
            header = self.codec.decode(&header);
        }

        let columns: Vec<&str> = header.split(',').map(str::trim).collect();

        // Last occurrence wins when a header name repeats.
        let mut col_map: HashMap<String, usize> = HashMap::with_capacity(columns.len());
        for (index, &column) in columns.iter().enumerate() {
            col_map.insert(column.to_string(), index);
        }

        // Sensor display names sit in the temperature column window.
        let mut sensor_names = HashMap::new();
        for id in 1..=TEMP_CHANNELS {
            if let Some(&name) = columns.get(TEMP_FIRST_COL + id - 1) {
                if !name.is_empty() {
                    sensor_names.insert(format!("Temp{}", id), name.to_string());
                }
            }
        }

        let data_lines: Vec<&str> = lines[header_index + 1..]
            .iter()
            .copied()
            .filter(|l| !l.trim().is_empty())
            .collect();

        let mut rows: Vec<TelemetryRow> = data_lines
            .par_iter()
            .map(|line| self.parse_line(line, &col_map))
            .collect();

        if rows.is_empty() {
            return Err(ParseError::NoData);
        }

        // Restore chronology after the parallel parse. Rows without a
        // parseable timestamp sort first (None < Some), keeping the order
        // total and deterministic.
        rows.sort_by_cached_key(|row| row.timestamp());

        tracing::debug!(
            "parsed {} rows, header at line {}, {} named sensors",
            rows.len(),
            header_index,
            sensor_names.len()
        );

        Ok(TripLog { rows, sensor_names })
    }
}

fn header_markers(line: &str) -> bool {
    (line.contains("SavingID") && line.contains("Date"))
        || (line.contains("Date") && line.contains("Time"))
}

/// Field-to-number coercion: absent, empty or whitespace-only fields give
/// `NaN`, anything else goes through [`parse_float_prefix`].
fn coerce(value: Option<&str>) -> f64 {
    match value {
        Some(v) if !v.trim().is_empty() => parse_float_prefix(v),
        _ => f64::NAN,
    }
}

/// Permissive float parsing: the longest valid leading number wins and
/// trailing garbage is ignored, so firmware artifacts like `"12.5\r"` or
/// `"7abc"` still read as numbers. No leading number at all gives `NaN`.
pub fn parse_float_prefix(raw: &str) -> f64 {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        i = 1;
    }

    let mut mantissa_digits = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
        mantissa_digits += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
            mantissa_digits += 1;
        }
    }
    if mantissa_digits == 0 {
        return f64::NAN;
    }

    let mut end = i;
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+') | Some(b'-')) {
            j += 1;
        }
        let exponent_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        // An exponent marker without digits is garbage, not an exponent.
        if j > exponent_start {
            end = j;
        }
    }

    s[..end].parse().unwrap_or(f64::NAN)
}
