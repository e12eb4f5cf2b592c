use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;

use crate::config::AppConfig;
use crate::render::{parse_color, ReportAssembler, SeriesRenderer};
use crate::services::{combine_totals, CommodityPipeline, CommodityRun, CostCalculator};

/// Smart-meter cost & consumption report generator
#[derive(Parser)]
#[command(name = "smeter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(long, global = true, default_value = "smeter.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run both pipelines and produce charts + the report document (default)
    Report,

    /// Print the summary statistics tables without rendering artifacts
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let config = AppConfig::load(&self.config)?;
        match self.command {
            None | Some(Commands::Report) => report(&config),
            Some(Commands::Stats { json }) => stats(&config, json),
        }
    }
}

/// Run the gas and electricity pipelines in parallel. The two runs share
/// no state; the first error of either aborts the report.
fn run_pipelines(config: &AppConfig) -> anyhow::Result<(CommodityRun, CommodityRun)> {
    let duration_days = CostCalculator::duration_days(config.window.start, config.window.end);
    info!(
        start = %config.window.start,
        end = %config.window.end,
        duration_days,
        "reporting window"
    );

    let gas_pipeline = CommodityPipeline::new(&config.gas, &config.columns, duration_days);
    let elec_pipeline = CommodityPipeline::new(&config.elec, &config.columns, duration_days);

    let (gas, elec) = rayon::join(|| gas_pipeline.run(), || elec_pipeline.run());
    Ok((gas?, elec?))
}

fn report(config: &AppConfig) -> anyhow::Result<()> {
    let (gas, elec) = run_pipelines(config)?;

    let renderer = SeriesRenderer::new(&config.output.plots_dir);
    let mut charts = Vec::new();
    for run in [&elec, &gas] {
        let color = parse_color(&run.color);
        charts.push(renderer.render_series(
            &run.label,
            "Consumption (kwh)",
            &run.consumption_series(),
            color,
        )?);
        charts.push(renderer.render_series(
            &format!("{}_cost", run.label),
            "Consumption (£)",
            &run.cost_series(),
            color,
        )?);
        charts.push(renderer.render_monthly(&run.label, &run.monthly)?);
    }

    let (yearly_total, monthly_average) =
        combine_totals(elec.stats.total_charge, gas.stats.total_charge);
    let totals = combined_rows(yearly_total, monthly_average);

    let assembler = ReportAssembler::new(&config.output.reports_dir);
    let path = assembler.assemble(&elec.stats, &gas.stats, &totals, &charts)?;
    println!("Report written to {}", path.display());
    Ok(())
}

fn stats(config: &AppConfig, json: bool) -> anyhow::Result<()> {
    let (gas, elec) = run_pipelines(config)?;
    let (yearly_total, monthly_average) =
        combine_totals(elec.stats.total_charge, gas.stats.total_charge);

    if json {
        let output = serde_json::json!({
            "elec": elec.stats,
            "gas": gas.stats,
            "combined": {
                "yearly_total": yearly_total,
                "monthly_average": monthly_average,
            },
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        for row_set in [&elec.stats.rows, &gas.stats.rows] {
            for (label, value) in row_set {
                println!("{label:<32} {value}");
            }
            println!();
        }
        for (label, value) in combined_rows(yearly_total, monthly_average) {
            println!("{label:<42} {value}");
        }
    }
    Ok(())
}

/// The two combined-totals rows shown at the reporting boundary.
fn combined_rows(yearly_total: f64, monthly_average: f64) -> Vec<(String, String)> {
    vec![
        (
            "Total Charge for elec and gas".to_string(),
            format!("£{yearly_total:.2}"),
        ),
        (
            "Total Charge for elec and gas (monthly)".to_string(),
            format!("£{monthly_average:.2}"),
        ),
    ]
}
