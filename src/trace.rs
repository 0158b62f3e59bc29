//! Process-trace parsing
//!
//! A trace file lists the processes handed to the simulator, one per line:
//!
//! ```text
//! pid, memory_size, arrival, cpu_burst, io_freq, io_duration
//! ```
//!
//! Lines that do not fit this layout are skipped.

use crate::error::{ReportError, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Minimum number of comma-separated fields on a trace line
const TRACE_FIELDS: usize = 6;

/// Static description of one simulated process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessSpec {
    pub pid: u32,
    /// Memory requirement; informational only, `None` if not numeric
    pub memory_size: Option<u64>,
    pub arrival: u64,
    pub cpu_burst: u64,
    /// CPU time between I/O requests (0 = never does I/O)
    pub io_freq: u64,
    /// Duration of each I/O request
    pub io_duration: u64,
}

/// Processes keyed by pid
pub type ProcessTable = BTreeMap<u32, ProcessSpec>;

impl ProcessSpec {
    /// Parse a single trace line, returning `None` for malformed input
    pub fn from_line(line: &str) -> Option<Self> {
        let parts: Vec<&str> = line.split(',').map(str::trim).collect();
        if parts.len() < TRACE_FIELDS {
            return None;
        }

        Some(Self {
            pid: parts[0].parse().ok()?,
            memory_size: parts[1].parse().ok(),
            arrival: parts[2].parse().ok()?,
            cpu_burst: parts[3].parse().ok()?,
            io_freq: parts[4].parse().ok()?,
            io_duration: parts[5].parse().ok()?,
        })
    }
}

/// Parse trace contents; a later line for the same pid replaces the earlier one
pub fn parse_trace_str(contents: &str) -> ProcessTable {
    let mut table = ProcessTable::new();

    for (lineno, line) in contents.lines().enumerate() {
        match ProcessSpec::from_line(line) {
            Some(spec) => {
                table.insert(spec.pid, spec);
            }
            None if !line.trim().is_empty() => {
                tracing::debug!("Ignoring malformed trace line {}: {:?}", lineno + 1, line);
            }
            None => {}
        }
    }

    table
}

/// Read and parse a trace file
pub fn parse_trace_file<P: AsRef<Path>>(path: P) -> Result<ProcessTable> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
    Ok(parse_trace_str(&contents))
}
