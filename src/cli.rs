//! CLI argument parsing for sched-report

use crate::config::{ReportConfig, SchedulerSource};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Console output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable progress lines (default)
    Text,
    /// JSON report for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "sched-report")]
#[command(version)]
#[command(
    about = "Compute throughput, turnaround, wait and response time from scheduler simulation logs",
    long_about = None
)]
pub struct Cli {
    /// TOML config file (CLI flags override its values)
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory containing testN.txt process traces
    #[arg(short = 'i', long = "input-dir", value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// CSV summary table to write
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Scheduler output directory as NAME=DIR (repeatable, replaces defaults)
    #[arg(short = 's', long = "scheduler", value_name = "NAME=DIR")]
    pub schedulers: Vec<SchedulerSource>,

    /// Append rows to an existing results file
    #[arg(long = "append")]
    pub append: bool,

    /// Console output format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Enable debug logging to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Merge the config file (if any) with command-line overrides
    pub fn resolve_config(&self) -> Result<ReportConfig> {
        let mut config = match &self.config {
            Some(path) => ReportConfig::from_file(path)?,
            None => ReportConfig::default(),
        };

        if let Some(dir) = &self.input_dir {
            config.input_dir = dir.clone();
        }
        if let Some(output) = &self.output {
            config.results_file = output.clone();
        }
        if !self.schedulers.is_empty() {
            config.schedulers = self.schedulers.clone();
        }
        if self.append {
            config.append = true;
        }

        config.validate()?;
        Ok(config)
    }
}
