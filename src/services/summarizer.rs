//! Summary statistics service
//!
//! Reduces a fully-costed record set (plus its standing charge) into the
//! fixed eight-row statistics table used by the report, and combines the
//! two commodities' total charges at the reporting boundary.

use crate::types::{MeterRecord, Result, SmeterError, SummaryStatistics};

/// Fixed reporting cycle used for the combined monthly average. This is
/// deliberately not derived from the number of distinct months present
/// in the data.
pub const REPORTING_MONTHS: f64 = 12.0;

/// Summarizer producing the per-commodity statistics table
pub struct StatisticsSummarizer;

impl StatisticsSummarizer {
    /// Reduce a record set into eight labeled rows plus the scalar total
    /// charge (`standing_charge + Σcost`).
    ///
    /// Labels are suffixed with the commodity `label` so tables from
    /// several commodities can sit in one document. Average and maximum
    /// are the plain arithmetic mean and maximum, unweighted by interval
    /// duration. Fails with `EmptyDataset` on zero records and never
    /// returns partial statistics.
    pub fn summarize(
        records: &[MeterRecord],
        standing_charge: f64,
        label: &str,
    ) -> Result<SummaryStatistics> {
        if records.is_empty() {
            return Err(SmeterError::EmptyDataset);
        }
        if records.iter().any(|r| r.cost.is_none()) {
            return Err(SmeterError::InvalidTariff(format!(
                "cannot summarize '{label}': records are missing cost; apply the tariff first"
            )));
        }

        let count = records.len() as f64;

        let total_kwh: f64 = records.iter().map(|r| r.consumption_kwh).sum();
        let avg_kwh = total_kwh / count;
        let max_kwh = records
            .iter()
            .map(|r| r.consumption_kwh)
            .fold(f64::MIN, f64::max);

        let total_cost: f64 = records.iter().filter_map(|r| r.cost).sum();
        let avg_cost = total_cost / count;
        let max_cost = records
            .iter()
            .filter_map(|r| r.cost)
            .fold(f64::MIN, f64::max);

        let total_charge = standing_charge + total_cost;

        let rows = vec![
            (format!("Total Consumption {label}"), format!("{total_kwh:.2} kwh")),
            (format!("Average Consumption {label}"), format!("{avg_kwh:.2} kwh")),
            (format!("Maximum Consumption {label}"), format!("{max_kwh:.2} kwh")),
            (format!("Total Cost {label}"), format!("£{total_cost:.2}")),
            (format!("Average Cost {label}"), format!("£{avg_cost:.2}")),
            (format!("Maximum Cost {label}"), format!("£{max_cost:.2}")),
            (format!("Standing Charge {label}"), format!("£{standing_charge:.2}")),
            (format!("Total Charge {label}"), format!("£{total_charge:.2}")),
        ];

        Ok(SummaryStatistics { rows, total_charge })
    }
}

/// Combine two commodities' total charges into the yearly total and the
/// monthly average over the fixed reporting cycle.
pub fn combine_totals(charge_a: f64, charge_b: f64) -> (f64, f64) {
    let yearly_total = charge_a + charge_b;
    (yearly_total, yearly_total / REPORTING_MONTHS)
}
