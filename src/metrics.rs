//! Scheduling metrics from recorded state transitions
//!
//! For every process that reached TERMINATED:
//!
//! - turnaround = completion - arrival
//! - response   = first dispatch - arrival
//! - wait       = turnaround - cpu_burst - io_count * io_duration (floored at 0)
//!
//! Throughput is completed processes divided by the latest completion time.
//!
//! Per-process times and their totals are kept in `i128`: every input is a
//! `u64`, and pids are `u32`, so no sum of up to `u32::MAX` processes can
//! overflow.

use crate::exec_log::{ProcessState, TransitionEvent};
use crate::trace::ProcessTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Observed lifetime of one process in an execution log
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessTimeline {
    /// First transition into RUNNING
    pub first_run: Option<u64>,
    /// Last transition into TERMINATED
    pub completion: Option<u64>,
    /// Transitions into WAITING
    pub io_count: u64,
}

impl ProcessTimeline {
    /// Fold one transition into the timeline
    pub fn record(&mut self, event: &TransitionEvent) {
        match event.to {
            ProcessState::Running if self.first_run.is_none() => {
                self.first_run = Some(event.time);
            }
            ProcessState::Terminated => self.completion = Some(event.time),
            ProcessState::Waiting => self.io_count += 1,
            _ => {}
        }
    }
}

/// Aggregate metrics for one (scheduler, trace) pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SchedulerMetrics {
    /// Number of processes that terminated
    pub completed: usize,
    /// Latest completion time
    pub makespan: u64,
    pub throughput: f64,
    pub avg_turnaround: f64,
    pub avg_wait: f64,
    pub avg_response: f64,
}

/// Per-process timing derived from a timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ProcessTimes {
    turnaround: i128,
    wait: i128,
    response: i128,
}

/// Build a timeline for every process in the table
///
/// Events for pids not in the table are dropped.
pub fn build_timelines(
    procs: &ProcessTable,
    events: &[TransitionEvent],
) -> BTreeMap<u32, ProcessTimeline> {
    let mut timelines: BTreeMap<u32, ProcessTimeline> = procs
        .keys()
        .map(|&pid| (pid, ProcessTimeline::default()))
        .collect();

    for event in events {
        match timelines.get_mut(&event.pid) {
            Some(timeline) => timeline.record(event),
            None => tracing::trace!("Event for unknown pid {} ignored", event.pid),
        }
    }

    timelines
}

/// Compute the four scheduling metrics
///
/// Returns `None` when no process terminated.
pub fn calculate_metrics(
    procs: &ProcessTable,
    events: &[TransitionEvent],
) -> Option<SchedulerMetrics> {
    let timelines = build_timelines(procs, events);

    let mut total_turnaround: i128 = 0;
    let mut total_wait: i128 = 0;
    let mut total_response: i128 = 0;
    let mut completed = 0usize;
    let mut makespan = 0u64;

    for (pid, timeline) in &timelines {
        let Some(end) = timeline.completion else {
            continue;
        };
        let spec = &procs[pid];

        let times = process_times(
            spec.arrival,
            spec.cpu_burst,
            spec.io_duration,
            timeline.first_run,
            end,
            timeline.io_count,
        );

        total_turnaround += times.turnaround;
        total_wait += times.wait;
        total_response += times.response;
        completed += 1;
        makespan = makespan.max(end);
    }

    if completed == 0 {
        return None;
    }

    let n = completed as f64;
    Some(SchedulerMetrics {
        completed,
        makespan,
        throughput: if makespan > 0 {
            n / makespan as f64
        } else {
            0.0
        },
        avg_turnaround: total_turnaround as f64 / n,
        avg_wait: total_wait as f64 / n,
        avg_response: total_response as f64 / n,
    })
}

fn process_times(
    arrival: u64,
    cpu_burst: u64,
    io_duration: u64,
    first_run: Option<u64>,
    end: u64,
    io_count: u64,
) -> ProcessTimes {
    let arrival = i128::from(arrival);
    let turnaround = i128::from(end) - arrival;
    let response = first_run.map_or(arrival, i128::from) - arrival;
    // saturates only past i128::MAX, far beyond any turnaround, so wait stays 0
    let io_total = i128::from(io_count).saturating_mul(i128::from(io_duration));
    let wait = (turnaround - i128::from(cpu_burst) - io_total).max(0);

    ProcessTimes {
        turnaround,
        wait,
        response,
    }
}
