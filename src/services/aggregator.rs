//! Monthly aggregation service
//!
//! Reduces a normalized record set into one row per calendar month.
//! Aggregation is a terminal operation on raw records; re-aggregating
//! an already-aggregated bucket sequence is not supported.

use std::collections::HashMap;

use crate::types::{MeterRecord, MonthKey, MonthlyBucket};

/// Aggregator for computing per-month consumption and cost totals
pub struct MonthlyAggregator;

impl MonthlyAggregator {
    /// Group records by month key, summing consumption (sorted by month
    /// ascending).
    ///
    /// The cost column is summed only when every record carries a cost;
    /// if any record lacks one the column is omitted entirely rather
    /// than partially summed. Empty input yields an empty sequence.
    pub fn monthly(records: &[MeterRecord]) -> Vec<MonthlyBucket> {
        if records.is_empty() {
            return Vec::new();
        }

        let all_costed = records.iter().all(|r| r.cost.is_some());

        let mut buckets: HashMap<MonthKey, (f64, f64)> = HashMap::new();
        for record in records {
            let entry = buckets.entry(record.month_key).or_insert((0.0, 0.0));
            entry.0 += record.consumption_kwh;
            entry.1 += record.cost.unwrap_or(0.0);
        }

        let mut result: Vec<MonthlyBucket> = buckets
            .into_iter()
            .map(|(month_key, (kwh, cost))| MonthlyBucket {
                month_key,
                total_consumption_kwh: kwh,
                total_cost: all_costed.then_some(cost),
            })
            .collect();

        result.sort_by_key(|b| b.month_key);
        result
    }
}
