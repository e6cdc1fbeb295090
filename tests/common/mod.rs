//! Common test utilities shared across all test modules
//!
//! Builders for ASV log fixtures in both plaintext and encoded form. The
//! column layout mirrors real exports: SavingID, Date, Time of Day, twelve
//! sensor columns, three alarm flags, nine reserved columns, then
//! Latitude/Longitude at indices 27/28.

#![allow(dead_code)]

use mareelog::codec::Codec;

/// Standard header row with three named sensors.
pub const HEADER: &str = "SavingID,Date,Time of Day,Cale avant,Cale arriere,Tunnel,,,,,,,,,,AF,AS,AT,,,,,,,,,,Latitude,Longitude";

/// Build one 29-column data line. Temperatures beyond `temp1` stay empty.
pub fn data_line(id: u32, date: &str, time: &str, temp1: &str, lat: &str, lon: &str) -> String {
    let mut fields: Vec<String> = vec![
        id.to_string(),
        date.to_string(),
        time.to_string(),
        temp1.to_string(),
    ];
    fields.extend(std::iter::repeat(String::new()).take(11)); // Temp2..Temp12
    fields.extend(["0".to_string(), "0".to_string(), "0".to_string()]); // AF/AS/AT
    fields.extend(std::iter::repeat(String::new()).take(9)); // reserved
    fields.push(lat.to_string());
    fields.push(lon.to_string());
    fields.join(",")
}

/// Plaintext file: header followed by the given data lines.
pub fn plaintext_file(data_lines: &[String]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for line in data_lines {
        out.push_str(line);
        out.push('\n');
    }
    out
}

/// Fully encoded file with the header at row 20: twenty encoded metadata
/// lines, the encoded header, then encoded data lines. This is the shape of
/// a real device export.
pub fn encoded_file(data_lines: &[String]) -> String {
    let codec = Codec::new();
    let mut out = String::new();
    for i in 0..20 {
        out.push_str(&codec.encode(&format!("device-meta-{:02}", i)));
        out.push('\n');
    }
    out.push_str(&codec.encode(HEADER));
    out.push('\n');
    for line in data_lines {
        out.push_str(&codec.encode(line));
        out.push('\n');
    }
    out
}

/// Assert two floats are within `tol` of each other.
pub fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() < tol,
        "expected {} within {} of {}",
        actual,
        tol,
        expected
    );
}
