//! Timestamp normalization service
//!
//! Converts raw export timestamps to a single canonical timezone-naive
//! instant per record and derives the two aggregation keys (month, hour
//! of day). The reporting convention treats all instants as one frame:
//! offset-aware timestamps are converted to UTC and the offset is then
//! stripped. DST transitions get no special handling; UTC-then-strip is
//! the sole policy, applied uniformly.

use chrono::{DateTime, NaiveDateTime};

use crate::types::{hour_of_day, MeterRecord, MonthKey, RawInterval, Result, SmeterError};

/// Naive timestamp formats accepted after the RFC 3339 attempt fails.
/// Naive inputs are taken as already being in the reporting frame.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Parse one raw timestamp into a naive instant.
///
/// Offset-aware inputs (RFC 3339, or `YYYY-mm-dd HH:MM:SS+ZZ:ZZ`) are
/// normalized to UTC before the offset is stripped.
pub fn parse_instant(raw: &str) -> Result<NaiveDateTime> {
    let trimmed = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.to_utc().naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%z") {
        return Ok(dt.to_utc().naive_utc());
    }
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt);
        }
    }

    Err(SmeterError::TimeParse(format!(
        "unparseable timestamp '{raw}'"
    )))
}

/// Derive the aggregation keys for a normalized start instant.
///
/// Pure function of `start`; re-deriving on an already-normalized record
/// yields identical keys (idempotence).
pub fn derive_keys(start: NaiveDateTime) -> (MonthKey, u32) {
    (MonthKey::from_instant(start), hour_of_day(start))
}

/// Normalize a full raw interval set into `MeterRecord`s (without cost).
///
/// Fails fast on the first unparseable timestamp or inverted interval;
/// no partial output is produced.
pub fn normalize(intervals: &[RawInterval]) -> Result<Vec<MeterRecord>> {
    let mut records = Vec::with_capacity(intervals.len());

    for interval in intervals {
        let start = parse_instant(&interval.start)?;
        let end = parse_instant(&interval.end)?;
        if start >= end {
            return Err(SmeterError::MalformedInput(format!(
                "interval start {start} is not before end {end}"
            )));
        }

        let (month_key, hour) = derive_keys(start);
        records.push(MeterRecord {
            start,
            end,
            consumption_kwh: interval.consumption_kwh,
            cost: None,
            month_key,
            hour_of_day: hour,
        });
    }

    Ok(records)
}
