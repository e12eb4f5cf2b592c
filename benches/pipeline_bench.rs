//! Criterion benchmarks for the commodity pipeline hot path

use std::collections::HashMap;
use std::fmt::Write;
use std::hint::black_box;
use std::path::PathBuf;

use chrono::{Duration, NaiveDate};
use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use smeter::config::{ColumnConfig, CommodityConfig};
use smeter::services::CommodityPipeline;
use smeter::types::TariffPlan;

/// A year of half-hourly intervals.
const INTERVALS: usize = 17_520;

fn synth_csv(rows: usize) -> String {
    let mut csv = String::from(" Start, End,Consumption (kwh)\n");
    let mut start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    for i in 0..rows {
        let end = start + Duration::minutes(30);
        writeln!(
            csv,
            "{}+00:00,{}+00:00,{:.3}",
            start.format("%Y-%m-%dT%H:%M:%S"),
            end.format("%Y-%m-%dT%H:%M:%S"),
            0.05 + (i % 48) as f64 * 0.01
        )
        .unwrap();
        start = end;
    }
    csv
}

fn bench_pipeline(c: &mut Criterion) {
    let csv = synth_csv(INTERVALS);
    let commodity = CommodityConfig {
        label: "elec".to_string(),
        path: PathBuf::from("unused.csv"),
        tariff: TariffPlan {
            per_kwh_rate: 0.2922,
            standing_charge_per_day: 0.42,
        },
        color: "red".to_string(),
    };
    let columns = ColumnConfig {
        renames: HashMap::from([
            (" Start".to_string(), "Start".to_string()),
            (" End".to_string(), "End".to_string()),
        ]),
        ..ColumnConfig::default()
    };
    let pipeline = CommodityPipeline::new(&commodity, &columns, 364);

    let mut group = c.benchmark_group("pipeline");
    group.throughput(Throughput::Elements(INTERVALS as u64));
    group.bench_function("year_of_half_hourly_intervals", |b| {
        b.iter(|| pipeline.run_from(black_box(csv.as_bytes())).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
