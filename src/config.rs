//! TOML configuration for a report run
//!
//! One config file drives both commodity pipelines: CSV locations,
//! tariff parameters, header renames, the reporting window, and the
//! artifact output directories.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;

use crate::types::{Result, SmeterError, TariffPlan};

/// Column handling options shared by both commodities.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnConfig {
    /// Header rename map applied before column lookup
    /// (e.g. `" Start" = "Start"` for exports with stray whitespace).
    #[serde(default)]
    pub renames: HashMap<String, String>,
    /// Columns holding timestamps (canonical names, after renaming).
    #[serde(default = "default_datetime_columns")]
    pub datetime: Vec<String>,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            renames: HashMap::new(),
            datetime: default_datetime_columns(),
        }
    }
}

fn default_datetime_columns() -> Vec<String> {
    vec!["Start".to_string(), "End".to_string()]
}

/// One commodity's data source, tariff, and chart hints.
#[derive(Debug, Clone, Deserialize)]
pub struct CommodityConfig {
    /// Display label ("gas", "elec"); also keys the chart artifacts.
    pub label: String,
    /// CSV export path for this commodity.
    pub path: PathBuf,
    #[serde(flatten)]
    pub tariff: TariffPlan,
    /// Chart color hint (named color or `#rrggbb`).
    #[serde(default = "default_color")]
    pub color: String,
}

fn default_color() -> String {
    "blue".to_string()
}

/// The billing window the standing charge is prorated over.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WindowConfig {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Artifact output locations.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_plots_dir")]
    pub plots_dir: PathBuf,
    #[serde(default = "default_reports_dir")]
    pub reports_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            plots_dir: default_plots_dir(),
            reports_dir: default_reports_dir(),
        }
    }
}

fn default_plots_dir() -> PathBuf {
    PathBuf::from("plots")
}

fn default_reports_dir() -> PathBuf {
    PathBuf::from("reports")
}

/// Top-level configuration for one report run.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub window: WindowConfig,
    #[serde(default)]
    pub columns: ColumnConfig,
    #[serde(default)]
    pub output: OutputConfig,
    pub gas: CommodityConfig,
    pub elec: CommodityConfig,
}

impl AppConfig {
    /// Load and parse a TOML config file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| SmeterError::Config(format!("failed to read {}: {e}", path.display())))?;
        Self::from_toml(&contents)
    }

    /// Parse a TOML config string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(contents).map_err(|e| SmeterError::Config(e.to_string()))?;

        // The pipeline normalizes the interval bounds; both must be
        // declared as datetime columns.
        for required in [crate::readers::COL_START, crate::readers::COL_END] {
            if !config.columns.datetime.iter().any(|c| c == required) {
                return Err(SmeterError::Config(format!(
                    "columns.datetime must include '{required}'"
                )));
            }
        }

        Ok(config)
    }
}
