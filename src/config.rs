//! Report configuration
//!
//! Defaults match the usual assignment layout: traces in `input_files/`,
//! one output directory per scheduler under `output_files/`. Any field can
//! be overridden from a TOML file:
//!
//! ```toml
//! input_dir = "traces"
//! results_file = "metrics.csv"
//!
//! [[schedulers]]
//! name = "FCFS"
//! dir = "out/fcfs"
//! ```

use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// One scheduler's output directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerSource {
    /// Label written to the `Scheduler` column
    pub name: String,
    /// Directory holding `*_execution.txt` logs
    pub dir: PathBuf,
}

impl SchedulerSource {
    pub fn new(name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
        }
    }
}

impl FromStr for SchedulerSource {
    type Err = ReportError;

    /// Parse `NAME=DIR`
    fn from_str(s: &str) -> Result<Self> {
        match s.split_once('=') {
            Some((name, dir)) if !name.trim().is_empty() && !dir.trim().is_empty() => {
                Ok(Self::new(name.trim(), dir.trim()))
            }
            _ => Err(ReportError::InvalidSchedulerSpec(s.to_string())),
        }
    }
}

/// Configuration for a report run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Directory containing `testN.txt` trace files
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,

    /// CSV summary table to write
    #[serde(default = "default_results_file")]
    pub results_file: PathBuf,

    /// Scheduler sources, processed in order
    #[serde(default = "default_schedulers")]
    pub schedulers: Vec<SchedulerSource>,

    /// Append rows to an existing results file instead of truncating it
    pub append: bool,
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("input_files")
}

fn default_results_file() -> PathBuf {
    PathBuf::from("scheduler_metrics_from_existing.csv")
}

fn default_schedulers() -> Vec<SchedulerSource> {
    vec![
        SchedulerSource::new("EP", "output_files/EP_algorithm_tests"),
        SchedulerSource::new("RR", "output_files/RR_algorithm_tests"),
        SchedulerSource::new("EP_RR", "output_files/EP_RR_algorithm_tests"),
    ]
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            results_file: default_results_file(),
            schedulers: default_schedulers(),
            append: false,
        }
    }
}

impl ReportConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Load and validate configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;

        let config = Self::from_toml_str(&contents).map_err(|e| ReportError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.schedulers.is_empty() {
            return Err(ReportError::InvalidConfig(
                "at least one scheduler source is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for source in &self.schedulers {
            if source.name.trim().is_empty() {
                return Err(ReportError::InvalidConfig(
                    "scheduler name must not be empty".to_string(),
                ));
            }
            if !seen.insert(source.name.as_str()) {
                return Err(ReportError::InvalidConfig(format!(
                    "duplicate scheduler name: {}",
                    source.name
                )));
            }
        }

        Ok(())
    }
}
