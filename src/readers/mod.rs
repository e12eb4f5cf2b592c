//! CSV ingestion for per-interval smart-meter exports
//!
//! Reads a per-commodity CSV export into ordered `RawInterval` rows.
//! Some supplier exports prefix header names with stray whitespace; a
//! configured rename map (old header → canonical header) is applied
//! before column lookup to canonicalize those.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::types::{RawInterval, Result, SmeterError};

/// Canonical column names expected after renaming.
pub const COL_START: &str = "Start";
pub const COL_END: &str = "End";
pub const COL_CONSUMPTION: &str = "Consumption (kwh)";

/// Reader for per-interval meter CSV exports
pub struct IntervalReader {
    column_renames: HashMap<String, String>,
}

impl IntervalReader {
    /// Create a reader with no header renames
    pub fn new() -> Self {
        Self {
            column_renames: HashMap::new(),
        }
    }

    /// Create a reader applying the given header rename map before lookup
    pub fn with_renames(column_renames: HashMap<String, String>) -> Self {
        Self { column_renames }
    }

    /// Read all intervals from a CSV file, in source row order
    pub fn read_path(&self, path: &Path) -> Result<Vec<RawInterval>> {
        let file = File::open(path).map_err(|e| {
            SmeterError::MalformedInput(format!("failed to open {}: {e}", path.display()))
        })?;
        self.read_from(file)
    }

    /// Read all intervals from any CSV byte stream, in source row order
    pub fn read_from<R: Read>(&self, reader: R) -> Result<Vec<RawInterval>> {
        let mut rdr = csv::Reader::from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()
            .map_err(|e| SmeterError::MalformedInput(format!("failed to read CSV headers: {e}")))?
            .iter()
            .map(|h| self.canonical_name(h))
            .collect();

        let column = |name: &str| -> Result<usize> {
            headers.iter().position(|h| h == name).ok_or_else(|| {
                SmeterError::MalformedInput(format!("missing column '{name}' in CSV header"))
            })
        };

        let start_idx = column(COL_START)?;
        let end_idx = column(COL_END)?;
        let consumption_idx = column(COL_CONSUMPTION)?;

        let mut intervals = Vec::new();
        for (row, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| {
                SmeterError::MalformedInput(format!("failed to read CSV record {row}: {e}"))
            })?;

            let get = |idx: usize, name: &str| -> Result<&str> {
                record.get(idx).ok_or_else(|| {
                    SmeterError::MalformedInput(format!("row {row}: missing value for '{name}'"))
                })
            };

            let start = get(start_idx, COL_START)?.trim().to_string();
            let end = get(end_idx, COL_END)?.trim().to_string();
            let consumption_kwh = parse_consumption(get(consumption_idx, COL_CONSUMPTION)?, row)?;

            intervals.push(RawInterval {
                start,
                end,
                consumption_kwh,
            });
        }

        Ok(intervals)
    }

    fn canonical_name(&self, header: &str) -> String {
        self.column_renames
            .get(header)
            .cloned()
            .unwrap_or_else(|| header.to_string())
    }
}

impl Default for IntervalReader {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_consumption(raw: &str, row: usize) -> Result<f64> {
    let value: f64 = raw.trim().parse().map_err(|_| {
        SmeterError::MalformedInput(format!("row {row}: invalid consumption '{raw}'"))
    })?;
    if !value.is_finite() || value < 0.0 {
        return Err(SmeterError::MalformedInput(format!(
            "row {row}: consumption must be a non-negative number, got '{raw}'"
        )));
    }
    Ok(value)
}
