//! JSON output format for reports
//!
//! `--format json` prints this document instead of progress text.

use crate::csv_output::SummaryRow;
use crate::report::{Report, SkipCounts};
use serde::Serialize;
use std::path::Path;

/// Complete report document
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport<'a> {
    /// Path of the CSV summary table that was written
    pub results_file: String,
    pub rows: &'a [SummaryRow],
    pub skipped: SkipCounts,
}

impl<'a> JsonReport<'a> {
    pub fn new(report: &'a Report, results_file: &Path) -> Self {
        Self {
            results_file: results_file.display().to_string(),
            rows: report.rows(),
            skipped: report.skipped,
        }
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
