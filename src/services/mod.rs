//! Services for the meter data pipeline

pub mod aggregator;
pub mod normalizer;
pub mod pipeline;
pub mod summarizer;
pub mod tariff;

pub use aggregator::MonthlyAggregator;
pub use pipeline::{CommodityPipeline, CommodityRun};
pub use summarizer::{combine_totals, StatisticsSummarizer};
pub use tariff::CostCalculator;
