//! sched-report - offline metrics for CPU-scheduler simulation logs
//!
//! Reads process traces and the execution logs a scheduler simulator wrote
//! for them, and summarizes each run as throughput, average turnaround,
//! average wait and average response time in a CSV table.

pub mod cli;
pub mod config;
pub mod csv_output;
pub mod discovery;
pub mod error;
pub mod exec_log;
pub mod json_output;
pub mod metrics;
pub mod report;
pub mod trace;

pub use config::{ReportConfig, SchedulerSource};
pub use error::ReportError;
pub use metrics::{calculate_metrics, SchedulerMetrics};
