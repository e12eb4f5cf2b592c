//! Report document assembly
//!
//! Consumes the per-commodity statistics tables, the combined totals
//! table, and the rendered chart artifacts, and produces one
//! self-contained paginated HTML document. Chart images are embedded as
//! data URIs so the document has no external references.

use std::fs;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use tracing::info;

use crate::types::{Result, SmeterError, SummaryStatistics};

const REPORT_TITLE: &str = "Cost of Energy Consumption Report";
const REPORT_FILE: &str = "report.html";

/// Assembler writing the final report document
pub struct ReportAssembler {
    reports_dir: PathBuf,
}

impl ReportAssembler {
    pub fn new<P: Into<PathBuf>>(reports_dir: P) -> Self {
        Self {
            reports_dir: reports_dir.into(),
        }
    }

    /// Assemble the final document from both commodities' statistics,
    /// the combined totals rows, and the chart image artifacts.
    pub fn assemble(
        &self,
        elec_stats: &SummaryStatistics,
        gas_stats: &SummaryStatistics,
        totals_rows: &[(String, String)],
        chart_paths: &[PathBuf],
    ) -> Result<PathBuf> {
        let mut images = Vec::with_capacity(chart_paths.len());
        for path in chart_paths {
            images.push(embed_image(path)?);
        }

        let html = build_html(&elec_stats.rows, &gas_stats.rows, totals_rows, &images);

        fs::create_dir_all(&self.reports_dir)?;
        let path = self.reports_dir.join(REPORT_FILE);
        fs::write(&path, html)?;
        info!(path = %path.display(), "report assembled");
        Ok(path)
    }
}

fn embed_image(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| {
        SmeterError::Render(format!("missing chart artifact {}: {e}", path.display()))
    })?;
    Ok(format!("data:image/png;base64,{}", BASE64.encode(bytes)))
}

/// Build the report HTML. Pure; exercised directly by tests.
fn build_html(
    elec_rows: &[(String, String)],
    gas_rows: &[(String, String)],
    totals_rows: &[(String, String)],
    image_uris: &[String],
) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{REPORT_TITLE}</title>\n"));
    html.push_str(
        "<style>\n\
         body { font-family: Helvetica, Arial, sans-serif; margin: 2em; }\n\
         h1 { text-align: center; }\n\
         table { border-collapse: collapse; margin: 1em auto; }\n\
         th, td { border: 1px solid #000; padding: 6px 12px; }\n\
         tr:first-child td { background: #d3d3d3; font-weight: bold; }\n\
         td { text-align: center; }\n\
         .page { page-break-after: always; }\n\
         img { display: block; margin: 1em auto; width: 640px; }\n\
         </style>\n</head>\n<body>\n",
    );
    html.push_str(&format!("<section class=\"page\">\n<h1>{REPORT_TITLE}</h1>\n"));

    push_table(&mut html, elec_rows);
    push_table(&mut html, gas_rows);
    push_table(&mut html, totals_rows);
    html.push_str("</section>\n");

    for uri in image_uris {
        html.push_str(&format!(
            "<section class=\"page\">\n<img src=\"{uri}\" alt=\"chart\">\n</section>\n"
        ));
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn push_table(html: &mut String, rows: &[(String, String)]) {
    html.push_str("<table>\n");
    for (label, value) in rows {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>\n",
            escape(label),
            escape(value)
        ));
    }
    html.push_str("</table>\n");
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
