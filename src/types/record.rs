//! Domain types for meter readings and tariff reporting

use chrono::{Datelike, NaiveDateTime, Timelike};
use serde::Serialize;
use std::fmt;

/// Calendar year + month aggregation key.
///
/// Ordering is chronological (year first, then month), which lets
/// aggregation output be sorted with a plain `sort` / `BTreeMap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    /// Derive the key from a normalized instant. Pure; calling it twice on
    /// the same instant always yields the same key.
    pub fn from_instant(instant: NaiveDateTime) -> Self {
        Self {
            year: instant.year(),
            month: instant.month(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Derive the hour-of-day key (0..=23) from a normalized instant.
pub fn hour_of_day(instant: NaiveDateTime) -> u32 {
    instant.hour()
}

/// One raw CSV row, before timestamp normalization.
///
/// Timestamps stay as strings here; the normalizer owns parsing so that
/// read errors and time errors surface as distinct kinds.
#[derive(Debug, Clone, PartialEq)]
pub struct RawInterval {
    pub start: String,
    pub end: String,
    pub consumption_kwh: f64,
}

/// One billing interval with normalized instants and derived keys.
///
/// `month_key` and `hour_of_day` are pure functions of `start`; they are
/// computed once by the normalizer and never independently mutated.
/// `cost` is absent until the tariff has been applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeterRecord {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub consumption_kwh: f64,
    pub cost: Option<f64>,
    pub month_key: MonthKey,
    pub hour_of_day: u32,
}

/// One monthly aggregation row.
///
/// `total_cost` is `Some` only when every source record carried a cost;
/// a partially-costed record set yields no cost column at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyBucket {
    pub month_key: MonthKey,
    pub total_consumption_kwh: f64,
    pub total_cost: Option<f64>,
}

/// Billing parameters for one commodity. Immutable, supplied by config.
#[derive(Debug, Clone, Copy, PartialEq, serde::Deserialize, Serialize)]
pub struct TariffPlan {
    pub per_kwh_rate: f64,
    pub standing_charge_per_day: f64,
}

/// The reduced report row set for one commodity: eight labeled, formatted
/// rows plus the scalar total charge used for cross-commodity combination.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryStatistics {
    pub rows: Vec<(String, String)>,
    pub total_charge: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn instant(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_month_key_from_instant() {
        let key = MonthKey::from_instant(instant(2024, 3, 15, 12));
        assert_eq!(key, MonthKey { year: 2024, month: 3 });
    }

    #[test]
    fn test_month_key_display_zero_padded() {
        let key = MonthKey { year: 2024, month: 1 };
        assert_eq!(key.to_string(), "2024-01");
    }

    #[test]
    fn test_month_key_ordering_chronological() {
        let dec_23 = MonthKey { year: 2023, month: 12 };
        let jan_24 = MonthKey { year: 2024, month: 1 };
        let feb_24 = MonthKey { year: 2024, month: 2 };
        assert!(dec_23 < jan_24);
        assert!(jan_24 < feb_24);
    }

    #[test]
    fn test_hour_of_day_range() {
        assert_eq!(hour_of_day(instant(2024, 1, 1, 0)), 0);
        assert_eq!(hour_of_day(instant(2024, 1, 1, 23)), 23);
    }
}
