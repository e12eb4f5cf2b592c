//! Tariff cost derivation service
//!
//! Applies a commodity's per-kWh rate to a normalized record set and
//! computes the standing charge for a billing duration. Transformations
//! are pure: `apply_rate` returns a new record vector and never mutates
//! its input.

use chrono::NaiveDate;

use crate::types::{MeterRecord, Result, SmeterError};

/// Cost calculator for a single commodity's tariff
pub struct CostCalculator;

impl CostCalculator {
    /// Set `cost = consumption_kwh * per_kwh_rate` on every record,
    /// returning a new record set. Consumption is never modified.
    pub fn apply_rate(records: &[MeterRecord], per_kwh_rate: f64) -> Result<Vec<MeterRecord>> {
        if per_kwh_rate < 0.0 {
            return Err(SmeterError::InvalidTariff(format!(
                "per-kWh rate must be non-negative, got {per_kwh_rate}"
            )));
        }

        Ok(records
            .iter()
            .map(|r| MeterRecord {
                cost: Some(r.consumption_kwh * per_kwh_rate),
                ..r.clone()
            })
            .collect())
    }

    /// Standing charge for a billing duration: `rate_per_day * duration_days`.
    ///
    /// A negative duration (reporting window with `end < start`) is
    /// rejected here rather than pre-validated by callers.
    pub fn standing_charge(rate_per_day: f64, duration_days: i64) -> Result<f64> {
        if rate_per_day < 0.0 {
            return Err(SmeterError::InvalidTariff(format!(
                "standing charge rate must be non-negative, got {rate_per_day}"
            )));
        }
        if duration_days < 0 {
            return Err(SmeterError::InvalidTariff(format!(
                "billing duration must be non-negative, got {duration_days} days"
            )));
        }
        Ok(rate_per_day * duration_days as f64)
    }

    /// Whole days between the reporting window bounds, truncating toward
    /// zero. Exclusive of the end date: 2024-01-01 → 2024-01-02 is 1 day.
    pub fn duration_days(window_start: NaiveDate, window_end: NaiveDate) -> i64 {
        (window_end - window_start).num_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::normalizer::normalize;
    use crate::types::RawInterval;

    const TOLERANCE: f64 = 1e-9;

    fn records(consumptions: &[f64]) -> Vec<MeterRecord> {
        let intervals: Vec<RawInterval> = consumptions
            .iter()
            .enumerate()
            .map(|(i, &kwh)| RawInterval {
                start: format!("2024-01-01T{:02}:00:00Z", i),
                end: format!("2024-01-01T{:02}:30:00Z", i),
                consumption_kwh: kwh,
            })
            .collect();
        normalize(&intervals).unwrap()
    }

    // ========== apply_rate ==========

    #[test]
    fn test_apply_rate_sets_cost() {
        let costed = CostCalculator::apply_rate(&records(&[1.0, 2.0]), 0.29).unwrap();
        assert!((costed[0].cost.unwrap() - 0.29).abs() < TOLERANCE);
        assert!((costed[1].cost.unwrap() - 0.58).abs() < TOLERANCE);
    }

    #[test]
    fn test_apply_rate_preserves_consumption() {
        let input = records(&[0.125, 3.5]);
        let costed = CostCalculator::apply_rate(&input, 0.2922).unwrap();
        for (before, after) in input.iter().zip(&costed) {
            assert_eq!(before.consumption_kwh, after.consumption_kwh);
            assert_eq!(before.month_key, after.month_key);
        }
        // Input itself is untouched
        assert!(input.iter().all(|r| r.cost.is_none()));
    }

    #[test]
    fn test_apply_rate_is_linear_in_rate() {
        let base = CostCalculator::apply_rate(&records(&[0.3, 1.7, 2.2]), 0.1).unwrap();
        let scaled = CostCalculator::apply_rate(&records(&[0.3, 1.7, 2.2]), 0.3).unwrap();
        for (b, s) in base.iter().zip(&scaled) {
            assert!((s.cost.unwrap() - 3.0 * b.cost.unwrap()).abs() < TOLERANCE);
        }
    }

    #[test]
    fn test_apply_rate_rejects_negative_rate() {
        let err = CostCalculator::apply_rate(&records(&[1.0]), -0.1).unwrap_err();
        assert!(matches!(err, SmeterError::InvalidTariff(_)));
    }

    // ========== standing_charge ==========

    #[test]
    fn test_standing_charge_full_year() {
        let charge = CostCalculator::standing_charge(0.27, 365).unwrap();
        assert!((charge - 98.55).abs() < TOLERANCE);
    }

    #[test]
    fn test_standing_charge_zero_days() {
        assert_eq!(CostCalculator::standing_charge(0.42, 0).unwrap(), 0.0);
    }

    #[test]
    fn test_standing_charge_rejects_negative_duration() {
        let err = CostCalculator::standing_charge(0.27, -3).unwrap_err();
        assert!(matches!(err, SmeterError::InvalidTariff(_)));
    }

    #[test]
    fn test_standing_charge_rejects_negative_rate() {
        let err = CostCalculator::standing_charge(-0.01, 10).unwrap_err();
        assert!(matches!(err, SmeterError::InvalidTariff(_)));
    }

    // ========== duration_days ==========

    #[test]
    fn test_duration_days_exclusive_of_end() {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
        assert_eq!(CostCalculator::duration_days(start, end), 364);
    }

    #[test]
    fn test_duration_days_negative_window() {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let days = CostCalculator::duration_days(start, end);
        assert!(days < 0);
        // The negative window surfaces as an invalid tariff downstream.
        let err = CostCalculator::standing_charge(0.27, days).unwrap_err();
        assert!(matches!(err, SmeterError::InvalidTariff(_)));
    }
}
