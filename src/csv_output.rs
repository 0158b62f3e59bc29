//! CSV summary table
//!
//! One row per (scheduler, trace) pair:
//!
//! ```text
//! Scheduler,Trace File,Throughput,Avg Turnaround,Avg Wait,Avg Response
//! RR,test1,0.011364,265.40,188.60,41.00
//! ```
//!
//! Rows are CRLF-terminated, like the output of Python's `csv.writer`.

use crate::error::{ReportError, Result};
use crate::metrics::SchedulerMetrics;
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Row terminator
pub const LINE_TERMINATOR: &str = "\r\n";

/// Column names, in output order
pub const HEADER: [&str; 6] = [
    "Scheduler",
    "Trace File",
    "Throughput",
    "Avg Turnaround",
    "Avg Wait",
    "Avg Response",
];

/// A single summary row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub scheduler: String,
    pub test_name: String,
    #[serde(flatten)]
    pub metrics: SchedulerMetrics,
}

/// CSV output formatter for summary rows
#[derive(Debug, Default)]
pub struct CsvSummaryOutput {
    rows: Vec<SummaryRow>,
}

impl CsvSummaryOutput {
    /// Create an empty summary table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row to the table
    pub fn add_row(&mut self, row: SummaryRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    /// Header line
    pub fn header() -> String {
        HEADER
            .iter()
            .map(|h| Self::escape_field(h))
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Escape CSV field (handle commas, quotes, line breaks)
    fn escape_field(field: &str) -> String {
        if field.contains([',', '"', '\n', '\r']) {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    /// Format a summary row
    fn format_row(row: &SummaryRow) -> String {
        let m = &row.metrics;
        [
            Self::escape_field(&row.scheduler),
            Self::escape_field(&row.test_name),
            format!("{:.6}", m.throughput),
            format!("{:.2}", m.avg_turnaround),
            format!("{:.2}", m.avg_wait),
            format!("{:.2}", m.avg_response),
        ]
        .join(",")
    }

    /// Rows only, each terminated by [`LINE_TERMINATOR`]
    fn body(&self) -> String {
        let mut output = String::new();
        for row in &self.rows {
            output.push_str(&Self::format_row(row));
            output.push_str(LINE_TERMINATOR);
        }
        output
    }

    /// Generate the full table as a string
    pub fn to_csv(&self) -> String {
        let mut output = Self::header();
        output.push_str(LINE_TERMINATOR);
        output.push_str(&self.body());
        output
    }

    /// Write the table to `path`
    ///
    /// With `append`, rows are added to an existing file and the header is
    /// only written when the file is new or empty.
    pub fn write_to(&self, path: &Path, append: bool) -> Result<()> {
        if !append {
            return fs::write(path, self.to_csv()).map_err(|e| ReportError::io(path, e));
        }

        let needs_header = fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| ReportError::io(path, e))?;

        let contents = if needs_header {
            self.to_csv()
        } else {
            self.body()
        };

        file.write_all(contents.as_bytes())
            .map_err(|e| ReportError::io(path, e))
    }
}
