//! Report generation: walk every scheduler source, compute metrics per
//! test, and write the summary table.

use crate::config::{ReportConfig, SchedulerSource};
use crate::csv_output::{CsvSummaryOutput, SummaryRow};
use crate::discovery::{self, TestCase};
use crate::exec_log;
use crate::metrics;
use crate::trace;
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Inputs that were passed over, by reason
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SkipCounts {
    /// Scheduler directories that do not exist
    pub missing_dirs: usize,
    /// Logs whose trace file is missing
    pub missing_traces: usize,
    /// Logs with no `testN` in their name
    pub unnamed_logs: usize,
    /// Tests in which no process terminated
    pub no_completions: usize,
}

/// Outcome of a report run
#[derive(Debug, Default)]
pub struct Report {
    pub table: CsvSummaryOutput,
    pub skipped: SkipCounts,
}

impl Report {
    pub fn rows(&self) -> &[SummaryRow] {
        self.table.rows()
    }
}

/// Compute metrics for one test case
///
/// Returns `Ok(None)` when no process in the log terminated.
pub fn evaluate_test_case(case: &TestCase) -> Result<Option<metrics::SchedulerMetrics>> {
    let procs = trace::parse_trace_file(&case.trace_path)?;
    let events = exec_log::parse_log_file(&case.log_path);
    tracing::debug!(
        "{}: {} processes, {} events",
        case.name,
        procs.len(),
        events.len()
    );
    Ok(metrics::calculate_metrics(&procs, &events))
}

fn process_source<W: Write>(
    source: &SchedulerSource,
    input_dir: &Path,
    report: &mut Report,
    progress: &mut W,
) -> Result<()> {
    writeln!(
        progress,
        "\nProcessing {} results from {}...",
        source.name,
        source.dir.display()
    )?;

    if !source.dir.is_dir() {
        tracing::warn!("Directory not found: {}", source.dir.display());
        writeln!(progress, "  Directory not found: {}", source.dir.display())?;
        report.skipped.missing_dirs += 1;
        return Ok(());
    }

    for log_name in discovery::execution_logs(&source.dir)? {
        let Some(case) = discovery::resolve_test_case(&source.dir, input_dir, &log_name) else {
            tracing::debug!("No test name in {}, skipping", log_name);
            report.skipped.unnamed_logs += 1;
            continue;
        };

        if !case.trace_path.exists() {
            tracing::warn!(
                "Input file missing for {}: {}",
                log_name,
                case.trace_path.display()
            );
            writeln!(
                progress,
                "  Input file missing for {}: {}",
                log_name,
                case.trace_path.display()
            )?;
            report.skipped.missing_traces += 1;
            continue;
        }

        let Some(m) = evaluate_test_case(&case)? else {
            tracing::warn!("{}/{}: no process terminated", source.name, case.name);
            writeln!(progress, "  {}: no process terminated, skipped", case.name)?;
            report.skipped.no_completions += 1;
            continue;
        };

        writeln!(
            progress,
            "  {}: Turnaround={:.1}, Wait={:.1}",
            case.name, m.avg_turnaround, m.avg_wait
        )?;

        report.table.add_row(SummaryRow {
            scheduler: source.name.clone(),
            test_name: case.name,
            metrics: m,
        });
    }

    Ok(())
}

/// Build the report for every configured scheduler, without writing it
pub fn collect_report<W: Write>(config: &ReportConfig, progress: &mut W) -> Result<Report> {
    config.validate()?;

    let mut report = Report::default();
    for source in &config.schedulers {
        process_source(source, &config.input_dir, &mut report, progress)?;
    }

    Ok(report)
}

/// Build the report and write the summary table to `config.results_file`
pub fn generate_report<W: Write>(config: &ReportConfig, progress: &mut W) -> Result<Report> {
    writeln!(progress, "--- Starting Metric Calculation from Existing Files ---")?;

    let report = collect_report(config, progress)?;

    report
        .table
        .write_to(&config.results_file, config.append)
        .with_context(|| {
            format!(
                "Failed to write results to {}",
                config.results_file.display()
            )
        })?;

    writeln!(
        progress,
        "\n[DONE] Results saved to {}",
        config.results_file.display()
    )?;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const TRACE: &str = "1, 1, 0, 5, 0, 0\n2, 1, 1, 3, 0, 0\n";

    const LOG: &str = "\
| Time of Transition | PID | Old State | New State |
|  0 | 1 |     NEW |      READY |
|  0 | 1 |   READY |    RUNNING |
|  1 | 2 |     NEW |      READY |
|  5 | 1 | RUNNING | TERMINATED |
|  5 | 2 |   READY |    RUNNING |
|  8 | 2 | RUNNING | TERMINATED |
";

    struct Fixture {
        dir: TempDir,
        config: ReportConfig,
    }

    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let input_dir = dir.path().join("input_files");
        let rr_dir = dir.path().join("rr");
        fs::create_dir_all(&input_dir).unwrap();
        fs::create_dir_all(&rr_dir).unwrap();

        fs::write(input_dir.join("test1.txt"), TRACE).unwrap();
        fs::write(rr_dir.join("rr_test1_execution.txt"), LOG).unwrap();

        let config = ReportConfig {
            input_dir,
            results_file: dir.path().join("results.csv"),
            schedulers: vec![SchedulerSource::new("RR", rr_dir)],
            append: false,
        };

        Fixture { dir, config }
    }

    #[test]
    fn test_generate_report_writes_row() {
        let fx = fixture();
        let mut progress = Vec::new();

        let report = generate_report(&fx.config, &mut progress).unwrap();
        assert_eq!(report.rows().len(), 1);
        assert_eq!(report.rows()[0].test_name, "test1");

        let csv = fs::read_to_string(&fx.config.results_file).unwrap();
        assert_eq!(
            csv,
            "Scheduler,Trace File,Throughput,Avg Turnaround,Avg Wait,Avg Response\r\n\
             RR,test1,0.250000,6.00,2.00,2.00\r\n"
        );

        let progress = String::from_utf8(progress).unwrap();
        assert!(progress.contains("  test1: Turnaround=6.0, Wait=2.0"));
        assert!(progress.contains("[DONE] Results saved to"));
    }

    #[test]
    fn test_missing_scheduler_dir_skipped() {
        let mut fx = fixture();
        fx.config
            .schedulers
            .insert(0, SchedulerSource::new("EP", fx.dir.path().join("nope")));

        let report = collect_report(&fx.config, &mut std::io::sink()).unwrap();
        assert_eq!(report.skipped.missing_dirs, 1);
        assert_eq!(report.rows().len(), 1);
        assert_eq!(report.rows()[0].scheduler, "RR");
    }

    #[test]
    fn test_missing_trace_skipped() {
        let fx = fixture();
        fs::write(
            fx.config.schedulers[0].dir.join("rr_test2_execution.txt"),
            LOG,
        )
        .unwrap();

        let report = collect_report(&fx.config, &mut std::io::sink()).unwrap();
        assert_eq!(report.skipped.missing_traces, 1);
        assert_eq!(report.rows().len(), 1);
    }

    #[test]
    fn test_unnamed_log_skipped() {
        let fx = fixture();
        fs::write(
            fx.config.schedulers[0].dir.join("rr_sample_execution.txt"),
            LOG,
        )
        .unwrap();

        let report = collect_report(&fx.config, &mut std::io::sink()).unwrap();
        assert_eq!(report.skipped.unnamed_logs, 1);
    }

    #[test]
    fn test_no_completions_produces_no_row() {
        let fx = fixture();
        fs::write(
            fx.config.schedulers[0].dir.join("rr_test1_execution.txt"),
            "|  0 | 1 | READY | RUNNING |\n",
        )
        .unwrap();

        let mut progress = Vec::new();
        let report = collect_report(&fx.config, &mut progress).unwrap();
        assert!(report.rows().is_empty());
        assert_eq!(report.skipped.no_completions, 1);

        let progress = String::from_utf8(progress).unwrap();
        assert!(progress.contains("  test1: no process terminated, skipped"));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut fx = fixture();
        fx.config.schedulers.clear();
        assert!(collect_report(&fx.config, &mut std::io::sink()).is_err());
    }

    #[test]
    fn test_evaluate_test_case_missing_trace_is_error() {
        let case = TestCase {
            name: "test9".to_string(),
            log_path: PathBuf::from("/nonexistent/log"),
            trace_path: PathBuf::from("/nonexistent/test9.txt"),
        };
        assert!(evaluate_test_case(&case).is_err());
    }
}
