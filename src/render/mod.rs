//! Chart and report artifact rendering

pub mod charts;
pub mod report;

pub use charts::{parse_color, SeriesRenderer};
pub use report::ReportAssembler;
