//! Pairing execution logs with their process-trace inputs
//!
//! A scheduler's output directory holds logs named like
//! `rr_test3_execution.txt`; the matching trace is `<input_dir>/test3.txt`.

use crate::error::{ReportError, Result};
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Suffix that marks a file as an execution log
pub const EXECUTION_SUFFIX: &str = "_execution.txt";

/// An execution log and the trace it was produced from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// Test identifier, e.g. `test3`
    pub name: String,
    pub log_path: PathBuf,
    pub trace_path: PathBuf,
}

fn test_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(test\d+)_execution").expect("valid test-name regex"))
}

/// Extract the `testN` identifier from a log file name
pub fn test_name_from_log(file_name: &str) -> Option<&str> {
    test_name_pattern()
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// List execution logs in `dir`, sorted by file name
pub fn execution_logs(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|e| ReportError::io(dir, e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ReportError::io(dir, e))?;
        if let Some(name) = entry.file_name().to_str() {
            if name.ends_with(EXECUTION_SUFFIX) {
                names.push(name.to_string());
            }
        }
    }

    names.sort();
    Ok(names)
}

/// Resolve a log file name to a test case
///
/// Returns `None` when the name carries no test identifier.
pub fn resolve_test_case(log_dir: &Path, input_dir: &Path, log_name: &str) -> Option<TestCase> {
    let name = test_name_from_log(log_name)?;

    Some(TestCase {
        name: name.to_string(),
        log_path: log_dir.join(log_name),
        trace_path: input_dir.join(format!("{}.txt", name)),
    })
}
