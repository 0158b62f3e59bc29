//! Execution-log parsing
//!
//! Simulators print a table of state transitions:
//!
//! ```text
//! +------------------------------------------------+
//! | Time of Transition | PID | Old State | New State |
//! +------------------------------------------------+
//! |                  0 |   1 |       NEW |     READY |
//! |                  0 |   1 |     READY |   RUNNING |
//! ```
//!
//! Any line containing a `| time | pid | state | state |` cell sequence is
//! an event; everything else is decoration. Only the new state has to be a
//! known name: an unrecognized old state is kept as `None`.

use regex::Regex;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

/// Process states that appear in execution logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessState {
    New,
    Ready,
    Running,
    Waiting,
    Terminated,
}

impl FromStr for ProcessState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEW" => Ok(Self::New),
            "READY" => Ok(Self::Ready),
            "RUNNING" => Ok(Self::Running),
            "WAITING" => Ok(Self::Waiting),
            "TERMINATED" => Ok(Self::Terminated),
            other => Err(format!("unknown process state: {}", other)),
        }
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::New => "NEW",
            Self::Ready => "READY",
            Self::Running => "RUNNING",
            Self::Waiting => "WAITING",
            Self::Terminated => "TERMINATED",
        };
        f.pad(name)
    }
}

/// A single state transition recorded by the simulator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionEvent {
    pub time: u64,
    pub pid: u32,
    /// Previous state, `None` if the log used a name outside [`ProcessState`]
    pub from: Option<ProcessState>,
    pub to: ProcessState,
}

fn event_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\|\s*(\d+)\s*\|\s*(\d+)\s*\|\s*(\w+)\s*\|\s*(\w+)\s*\|")
            .expect("event pattern is a valid regex")
    })
}

impl TransitionEvent {
    /// Extract an event from a log line, if it carries one
    pub fn from_line(line: &str) -> Option<Self> {
        let caps = event_pattern().captures(line)?;

        Some(Self {
            time: caps[1].parse().ok()?,
            pid: caps[2].parse().ok()?,
            from: caps[3].parse().ok(),
            to: caps[4].parse().ok()?,
        })
    }
}

/// Parse log contents into events, in file order
pub fn parse_log_str(contents: &str) -> Vec<TransitionEvent> {
    contents
        .lines()
        .filter_map(|line| {
            let event = TransitionEvent::from_line(line);
            if event.is_none() && event_pattern().is_match(line) {
                tracing::debug!("Ignoring log line with unrecognized fields: {:?}", line);
            }
            event
        })
        .collect()
}

/// Read and parse an execution log
///
/// A missing or unreadable log is not fatal: it yields a warning and no events.
pub fn parse_log_file<P: AsRef<Path>>(path: P) -> Vec<TransitionEvent> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(contents) => parse_log_str(&contents),
        Err(e) => {
            tracing::warn!("{} not readable: {}", path.display(), e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_round_trips_through_display() {
        for state in [
            ProcessState::New,
            ProcessState::Ready,
            ProcessState::Running,
            ProcessState::Waiting,
            ProcessState::Terminated,
        ] {
            assert_eq!(state.to_string().parse::<ProcessState>(), Ok(state));
        }
    }

    #[test]
    fn test_state_is_case_sensitive() {
        assert!("running".parse::<ProcessState>().is_err());
    }

    #[test]
    fn test_event_from_padded_line() {
        let event = TransitionEvent::from_line("|                 25 |   3 |   RUNNING |   WAITING |")
            .unwrap();
        assert_eq!(
            event,
            TransitionEvent {
                time: 25,
                pid: 3,
                from: Some(ProcessState::Running),
                to: ProcessState::Waiting,
            }
        );
    }

    #[test]
    fn test_event_from_compact_line() {
        let event = TransitionEvent::from_line("|0|1|NEW|READY|").unwrap();
        assert_eq!(event.to, ProcessState::Ready);
    }

    #[test]
    fn test_header_and_borders_ignored() {
        assert!(TransitionEvent::from_line(
            "| Time of Transition | PID | Old State | New State |"
        )
        .is_none());
        assert!(TransitionEvent::from_line("+------------------------+").is_none());
        assert!(TransitionEvent::from_line("").is_none());
    }

    #[test]
    fn test_unknown_new_state_ignored() {
        assert!(TransitionEvent::from_line("| 5 | 1 | READY | SLEEPING |").is_none());
    }

    #[test]
    fn test_unknown_old_state_kept() {
        let event = TransitionEvent::from_line("| 5 | 1 | BLOCKED | TERMINATED |").unwrap();
        assert_eq!(
            event,
            TransitionEvent {
                time: 5,
                pid: 1,
                from: None,
                to: ProcessState::Terminated,
            }
        );
    }

    #[test]
    fn test_unknown_old_state_line_in_log() {
        let events = parse_log_str("| 0 | 1 | READY | RUNNING |\n| 5 | 1 | BLOCKED | TERMINATED |");
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].from, Some(ProcessState::Ready));
        assert_eq!(events[1].from, None);
        assert_eq!(events[1].to, ProcessState::Terminated);
    }

    #[test]
    fn test_parse_log_str_keeps_order() {
        let log = "\
+---------------------------------------------------+
| Time of Transition | PID | Old State | New State |
+---------------------------------------------------+
|                  0 |   1 |       NEW |     READY |
|                  0 |   1 |     READY |   RUNNING |
|                 10 |   1 |   RUNNING | TERMINATED |
+---------------------------------------------------+
";
        let events = parse_log_str(log);
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].to, ProcessState::Ready);
        assert_eq!(events[2].time, 10);
        assert_eq!(events[2].to, ProcessState::Terminated);
    }

    #[test]
    fn test_missing_log_file_yields_no_events() {
        assert!(parse_log_file("/nonexistent/rr_test1_execution.txt").is_empty());
    }
}
