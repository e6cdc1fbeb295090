//! Display-series preparation: gap filling, thinning and pagination.
//!
//! These transforms sit between the parsed rows and the chart layer. They
//! all take slices in and hand new vectors back; telemetry rows themselves
//! are never rewritten.

use crate::datetime::parse_timestamp;
use crate::parsers::types::{TelemetryRow, INVALID_TEMP};
use crate::settings::ChartSettings;

/// Build the display series for one temperature channel (0-based) by
/// carrying the last known-good value over sentinel and missing readings.
/// Rows before the first valid reading come out as `None`.
pub fn carry_forward(rows: &[TelemetryRow], channel: usize) -> Vec<Option<f64>> {
    let mut last_valid: Option<f64> = None;
    rows.iter()
        .map(|row| {
            let raw = row.temps.get(channel).copied().unwrap_or(f64::NAN);
            if raw != INVALID_TEMP && !raw.is_nan() {
                last_valid = Some(raw);
                Some(raw)
            } else {
                last_valid
            }
        })
        .collect()
}

/// Split rows into pages of `size`, then give every page after the first
/// one point of overlap with its predecessor: the previous page's original
/// last row is prepended, so a rendered line segment spans the page break
/// without a visual gap.
pub fn paginate(rows: &[TelemetryRow], size: usize) -> Vec<Vec<TelemetryRow>> {
    if size == 0 {
        return Vec::new();
    }

    let mut pages: Vec<Vec<TelemetryRow>> = rows.chunks(size).map(<[_]>::to_vec).collect();

    let mut carried: Option<TelemetryRow> = None;
    for page in &mut pages {
        let tail = page.last().cloned();
        if let Some(previous_last) = carried.take() {
            page.insert(0, previous_last);
        }
        carried = tail;
    }

    pages
}

/// Pages sized for rendering: the configured points per page scaled by the
/// display step, so a chart covers proportionally more time when thinned.
pub fn paginate_for_display(
    rows: &[TelemetryRow],
    settings: &ChartSettings,
) -> Vec<Vec<TelemetryRow>> {
    paginate(rows, settings.effective_points_per_page())
}

/// Thin a page to points at least `step_minutes` apart. The first row is
/// always kept; rows whose timestamp cannot be parsed are dropped, since
/// there is nothing to place them against on a time axis.
pub fn step_filter(rows: &[TelemetryRow], step_minutes: u32) -> Vec<TelemetryRow> {
    let Some(first) = rows.first() else {
        return Vec::new();
    };

    let mut out = vec![first.clone()];
    let mut last_included = parse_timestamp(&first.date, &first.time_of_day);

    for row in &rows[1..] {
        let (Some(anchor), Some(current)) = (last_included, row.timestamp()) else {
            continue;
        };
        let elapsed_minutes = (current - anchor).num_milliseconds() as f64 / 60_000.0;
        if elapsed_minutes >= step_minutes as f64 {
            out.push(row.clone());
            last_included = Some(current);
        }
    }

    out
}

/// Drop consecutive rows with identical date and time of day. The device
/// occasionally writes the same second twice around power events.
pub fn collapse_duplicates(rows: &[TelemetryRow]) -> Vec<TelemetryRow> {
    let mut out: Vec<TelemetryRow> = Vec::with_capacity(rows.len());
    for row in rows {
        let duplicate = out
            .last()
            .is_some_and(|prev| prev.date == row.date && prev.time_of_day == row.time_of_day);
        if !duplicate {
            out.push(row.clone());
        }
    }
    out
}

/// Full display preparation for one page: step thinning then duplicate
/// collapse, in that order.
pub fn prepare_page(rows: &[TelemetryRow], step_minutes: u32) -> Vec<TelemetryRow> {
    collapse_duplicates(&step_filter(rows, step_minutes))
}
