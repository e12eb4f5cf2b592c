//! Single-commodity pipeline orchestration
//!
//! One parameterized pipeline (read → normalize → cost → aggregate →
//! summarize) invoked once per commodity, so gas and electricity cannot
//! drift apart structurally. Each stage is a pure transformation over
//! the previous stage's output; failures abort the commodity's run with
//! no partial output.

use std::collections::HashMap;
use std::io::Read;
use std::path::PathBuf;

use chrono::NaiveDateTime;
use tracing::info;

use crate::config::{ColumnConfig, CommodityConfig};
use crate::readers::IntervalReader;
use crate::services::aggregator::MonthlyAggregator;
use crate::services::normalizer;
use crate::services::summarizer::StatisticsSummarizer;
use crate::services::tariff::CostCalculator;
use crate::types::{MeterRecord, MonthlyBucket, RawInterval, Result, SummaryStatistics, TariffPlan};

/// Everything one commodity's pipeline produces: the costed record set,
/// its monthly view, and the report-ready summary.
#[derive(Debug)]
pub struct CommodityRun {
    pub label: String,
    pub color: String,
    pub records: Vec<MeterRecord>,
    pub monthly: Vec<MonthlyBucket>,
    pub standing_charge: f64,
    pub stats: SummaryStatistics,
}

impl CommodityRun {
    /// Per-interval consumption series for the raw time-series chart.
    pub fn consumption_series(&self) -> Vec<(NaiveDateTime, f64)> {
        self.records
            .iter()
            .map(|r| (r.start, r.consumption_kwh))
            .collect()
    }

    /// Per-interval cost series for the cost time-series chart.
    pub fn cost_series(&self) -> Vec<(NaiveDateTime, f64)> {
        self.records
            .iter()
            .map(|r| (r.start, r.cost.unwrap_or(0.0)))
            .collect()
    }
}

/// One commodity's full pipeline, parameterized by tariff and source
pub struct CommodityPipeline {
    label: String,
    color: String,
    path: PathBuf,
    tariff: TariffPlan,
    column_renames: HashMap<String, String>,
    duration_days: i64,
}

impl CommodityPipeline {
    /// Build a pipeline from config plus the reporting window duration
    /// (whole days, derived by the caller from the window bounds).
    pub fn new(commodity: &CommodityConfig, columns: &ColumnConfig, duration_days: i64) -> Self {
        Self {
            label: commodity.label.clone(),
            color: commodity.color.clone(),
            path: commodity.path.clone(),
            tariff: commodity.tariff,
            column_renames: columns.renames.clone(),
            duration_days,
        }
    }

    /// Run the pipeline against the configured CSV file.
    pub fn run(&self) -> Result<CommodityRun> {
        info!(label = %self.label, path = %self.path.display(), "reading meter intervals");
        let reader = IntervalReader::with_renames(self.column_renames.clone());
        let intervals = reader.read_path(&self.path)?;
        self.run_intervals(intervals)
    }

    /// Run the pipeline against any CSV byte stream (used by tests and
    /// benchmarks).
    pub fn run_from<R: Read>(&self, source: R) -> Result<CommodityRun> {
        let reader = IntervalReader::with_renames(self.column_renames.clone());
        let intervals = reader.read_from(source)?;
        self.run_intervals(intervals)
    }

    fn run_intervals(&self, intervals: Vec<RawInterval>) -> Result<CommodityRun> {
        let records = normalizer::normalize(&intervals)?;
        let costed = CostCalculator::apply_rate(&records, self.tariff.per_kwh_rate)?;
        let standing_charge = CostCalculator::standing_charge(
            self.tariff.standing_charge_per_day,
            self.duration_days,
        )?;
        let monthly = MonthlyAggregator::monthly(&costed);
        let stats = StatisticsSummarizer::summarize(&costed, standing_charge, &self.label)?;

        info!(
            label = %self.label,
            records = costed.len(),
            months = monthly.len(),
            total_charge = stats.total_charge,
            "pipeline complete"
        );

        Ok(CommodityRun {
            label: self.label.clone(),
            color: self.color.clone(),
            records: costed,
            monthly,
            standing_charge,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MonthKey, SmeterError};

    const TOLERANCE: f64 = 1e-9;

    const GAS_CSV: &str = "\
 Start, End,Consumption (kwh)
2024-01-01T00:00:00+00:00,2024-01-01T00:30:00+00:00,1.0
2024-02-01T00:00:00+00:00,2024-02-01T00:30:00+00:00,2.0
";

    fn pipeline(rate: f64, standing: f64, duration_days: i64) -> CommodityPipeline {
        let commodity = CommodityConfig {
            label: "gas".to_string(),
            path: PathBuf::from("unused.csv"),
            tariff: TariffPlan {
                per_kwh_rate: rate,
                standing_charge_per_day: standing,
            },
            color: "blue".to_string(),
        };
        let columns = ColumnConfig {
            renames: HashMap::from([
                (" Start".to_string(), "Start".to_string()),
                (" End".to_string(), "End".to_string()),
            ]),
            ..ColumnConfig::default()
        };
        CommodityPipeline::new(&commodity, &columns, duration_days)
    }

    #[test]
    fn test_full_pipeline_worked_example() {
        let run = pipeline(0.29, 0.27, 365)
            .run_from(GAS_CSV.as_bytes())
            .unwrap();

        assert_eq!(run.records.len(), 2);
        assert!((run.records[0].cost.unwrap() - 0.29).abs() < TOLERANCE);
        assert!((run.records[1].cost.unwrap() - 0.58).abs() < TOLERANCE);

        assert_eq!(run.monthly.len(), 2);
        assert_eq!(run.monthly[0].month_key, MonthKey { year: 2024, month: 1 });
        assert!((run.monthly[0].total_consumption_kwh - 1.0).abs() < TOLERANCE);
        assert!((run.monthly[1].total_consumption_kwh - 2.0).abs() < TOLERANCE);

        assert!((run.standing_charge - 98.55).abs() < TOLERANCE);
        assert!((run.stats.total_charge - (98.55 + 0.87)).abs() < TOLERANCE);
    }

    #[test]
    fn test_pipeline_series_align_with_records() {
        let run = pipeline(0.29, 0.0, 0).run_from(GAS_CSV.as_bytes()).unwrap();
        let consumption = run.consumption_series();
        let cost = run.cost_series();
        assert_eq!(consumption.len(), 2);
        assert_eq!(consumption[0].0, run.records[0].start);
        assert!((cost[1].1 - 0.58).abs() < TOLERANCE);
    }

    #[test]
    fn test_pipeline_empty_csv_fails_with_empty_dataset() {
        let csv = "Start,End,Consumption (kwh)\n";
        let err = pipeline(0.29, 0.27, 365)
            .run_from(csv.as_bytes())
            .unwrap_err();
        assert!(matches!(err, SmeterError::EmptyDataset));
    }

    #[test]
    fn test_pipeline_negative_duration_fails() {
        let err = pipeline(0.29, 0.27, -1)
            .run_from(GAS_CSV.as_bytes())
            .unwrap_err();
        assert!(matches!(err, SmeterError::InvalidTariff(_)));
    }
}
