//! Great-circle distance over the trip's position fixes.

use crate::parsers::types::TelemetryRow;

/// Mean Earth radius in nautical miles.
pub const EARTH_RADIUS_NM: f64 = 3440.0647948;

const NM_TO_KM: f64 = 1.852;

/// Distance in nautical miles between two fixes, spherical law of cosines.
/// A zero anywhere means "no fix" and the pair contributes nothing.
pub fn pair_distance_nm(lat_a: f64, lng_a: f64, lat_b: f64, lng_b: f64) -> f64 {
    if lat_a == 0.0 || lng_a == 0.0 || lat_b == 0.0 || lng_b == 0.0 {
        return 0.0;
    }
    let rad = std::f64::consts::PI / 180.0;
    EARTH_RADIUS_NM
        * ((lat_a * rad).cos() * (lat_b * rad).cos() * ((lng_b - lng_a) * rad).cos()
            + (lat_a * rad).sin() * (lat_b * rad).sin())
        .acos()
}

/// Total path distance in nautical miles: pairwise legs between successive
/// valid fixes, rounded to 3 decimals.
///
/// A row with a zero coordinate contributes a zero-length leg and does not
/// become the new reference fix, so the next valid fix measures against the
/// last valid one rather than the gap. Legs that come out `NaN` (rows whose
/// coordinates failed to parse) count as zero.
pub fn total_distance_nm(rows: &[TelemetryRow]) -> f64 {
    let mut distance = 0.0;
    let mut prev: Option<&TelemetryRow> = None;

    for row in rows {
        if let Some(p) = prev {
            let leg = pair_distance_nm(p.latitude, p.longitude, row.latitude, row.longitude);
            if !leg.is_nan() {
                distance += leg;
            }
        }
        if row.latitude != 0.0 && row.longitude != 0.0 {
            prev = Some(row);
        }
    }

    round3(distance)
}

/// Great-circle distance between the first and last row with a valid
/// nonzero fix, rounded to 3 decimals. Zero when fewer than two such rows
/// exist.
pub fn direct_distance_nm(rows: &[TelemetryRow]) -> f64 {
    let fixes: Vec<&TelemetryRow> = rows.iter().filter(|r| r.has_fix()).collect();
    let (Some(first), Some(last)) = (fixes.first(), fixes.last()) else {
        return 0.0;
    };
    if fixes.len() < 2 {
        return 0.0;
    }
    round3(pair_distance_nm(
        first.latitude,
        first.longitude,
        last.latitude,
        last.longitude,
    ))
}

/// Nautical miles to kilometres, rounded to 2 decimals for display.
pub fn nm_to_km(nm: f64) -> f64 {
    (nm * NM_TO_KM * 100.0).round() / 100.0
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
