//! Chart artifact rendering
//!
//! Consumes labeled numeric series (raw per-interval or monthly) and
//! writes PNG chart images. No aggregation logic lives here; callers
//! hand over ready-made series.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate, NaiveDateTime};
use plotters::prelude::*;
use tracing::warn;

use crate::types::{MonthlyBucket, Result, SmeterError};

const CHART_SIZE: (u32, u32) = (1024, 640);

/// Parse a configured color hint into an RGB color.
///
/// Accepts a small set of named colors plus `#rrggbb` hex. Unknown
/// hints fall back to blue.
pub fn parse_color(hint: &str) -> RGBColor {
    match hint.trim().to_ascii_lowercase().as_str() {
        "blue" => RGBColor(31, 119, 180),
        "red" => RGBColor(214, 39, 40),
        "green" => RGBColor(44, 160, 44),
        "orange" => RGBColor(255, 127, 14),
        "purple" => RGBColor(148, 103, 189),
        "black" => RGBColor(0, 0, 0),
        "grey" | "gray" => RGBColor(127, 127, 127),
        hex => {
            if let Some(rgb) = parse_hex(hex) {
                rgb
            } else {
                warn!(hint, "unknown chart color, falling back to blue");
                RGBColor(31, 119, 180)
            }
        }
    }
}

fn parse_hex(hex: &str) -> Option<RGBColor> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some(RGBColor(r, g, b))
}

/// Renderer writing PNG chart artifacts keyed by plot name
pub struct SeriesRenderer {
    plots_dir: PathBuf,
}

impl SeriesRenderer {
    pub fn new<P: Into<PathBuf>>(plots_dir: P) -> Self {
        Self {
            plots_dir: plots_dir.into(),
        }
    }

    /// Artifact path for a plot name (`<plots_dir>/<name>.png`).
    pub fn artifact_path(&self, name: &str) -> PathBuf {
        self.plots_dir.join(format!("{name}.png"))
    }

    /// Render a per-interval time series as a line chart.
    pub fn render_series(
        &self,
        name: &str,
        y_label: &str,
        series: &[(NaiveDateTime, f64)],
        color: RGBColor,
    ) -> Result<PathBuf> {
        if series.is_empty() {
            return Err(SmeterError::Render(format!(
                "cannot render '{name}': empty series"
            )));
        }
        fs::create_dir_all(&self.plots_dir)?;

        let path = self.artifact_path(name);
        draw_line_chart(&path, name, y_label, series, color)
            .map_err(|e| SmeterError::Render(format!("chart '{name}': {e}")))?;
        Ok(path)
    }

    /// Render monthly buckets as a scatter chart
    /// (`<plots_dir>/<name>_monthly.png`).
    pub fn render_monthly(&self, name: &str, buckets: &[MonthlyBucket]) -> Result<PathBuf> {
        if buckets.is_empty() {
            return Err(SmeterError::Render(format!(
                "cannot render '{name}_monthly': no monthly buckets"
            )));
        }
        fs::create_dir_all(&self.plots_dir)?;

        let mut points = Vec::with_capacity(buckets.len());
        for bucket in buckets {
            let day = NaiveDate::from_ymd_opt(bucket.month_key.year, bucket.month_key.month, 1)
                .ok_or_else(|| {
                    SmeterError::Render(format!("invalid month key {}", bucket.month_key))
                })?;
            points.push((day, bucket.total_consumption_kwh));
        }

        let plot_name = format!("{name}_monthly");
        let path = self.artifact_path(&plot_name);
        draw_monthly_chart(&path, &points)
            .map_err(|e| SmeterError::Render(format!("chart '{plot_name}': {e}")))?;
        Ok(path)
    }
}

fn draw_line_chart(
    path: &Path,
    label: &str,
    y_label: &str,
    series: &[(NaiveDateTime, f64)],
    color: RGBColor,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let (x_min, x_max) = time_bounds(series.iter().map(|(t, _)| *t));
    let y_max = value_ceiling(series.iter().map(|(_, v)| *v));

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Energy Consumption Over Time", ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(46)
        .y_label_area_size(60)
        .build_cartesian_2d(RangedDateTime::from(x_min..x_max), 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Time")
        .y_desc(y_label)
        .x_label_formatter(&|t| t.format("%b %Y").to_string())
        .draw()?;

    chart
        .draw_series(LineSeries::new(series.iter().copied(), &color))?
        .label(label.to_string())
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn draw_monthly_chart(
    path: &Path,
    points: &[(NaiveDate, f64)],
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let (x_min, x_max) = date_bounds(points.iter().map(|(d, _)| *d));
    let y_max = value_ceiling(points.iter().map(|(_, v)| *v));

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Energy Consumption Over Time (months)", ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(46)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Time")
        .y_desc("Consumption (kwh)")
        .x_label_formatter(&|d| d.format("%b %Y").to_string())
        .draw()?;

    chart.draw_series(
        points
            .iter()
            .map(|(d, v)| Circle::new((*d, *v), 5, RGBColor(214, 39, 40).filled())),
    )?;

    root.present()?;
    Ok(())
}

/// Time axis bounds, padded so single-point series keep a non-zero span.
fn time_bounds(times: impl Iterator<Item = NaiveDateTime> + Clone) -> (NaiveDateTime, NaiveDateTime) {
    let min = times.clone().min().unwrap_or_default();
    let max = times.max().unwrap_or_default();
    if min == max {
        (min - Duration::hours(12), max + Duration::hours(12))
    } else {
        (min, max)
    }
}

fn date_bounds(dates: impl Iterator<Item = NaiveDate> + Clone) -> (NaiveDate, NaiveDate) {
    let min = dates.clone().min().unwrap_or_default();
    let max = dates.max().unwrap_or_default();
    if min == max {
        (min - Duration::days(15), max + Duration::days(15))
    } else {
        (min, max)
    }
}

/// Y-axis ceiling with headroom; axis floor is always 0.
fn value_ceiling(values: impl Iterator<Item = f64>) -> f64 {
    let max = values.fold(0.0_f64, f64::max);
    if max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}
