//! Execution trace (Gantt chart) model.
//!
//! A Gantt chart is the ordered record of scheduling events produced by
//! one simulation run. Run-to-completion policies contribute one entry
//! per dispatched process; tick-based policies contribute one entry per
//! consumed time unit or quantum slice. Entry order is execution order.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3

use serde::{Deserialize, Serialize};

/// One scheduling event: a process occupying the CPU over `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttEntry {
    /// Process that held the CPU.
    pub process_id: String,
    /// Event start time (ticks).
    pub start: i64,
    /// Event end time (ticks).
    pub end: i64,
}

impl GanttEntry {
    /// Creates a new entry.
    pub fn new(process_id: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            process_id: process_id.into(),
            start,
            end,
        }
    }

    /// Time consumed by this event (ticks).
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}

/// A complete execution trace in dispatch order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GanttChart {
    /// Scheduling events in execution order.
    pub entries: Vec<GanttEntry>,
}

impl GanttChart {
    /// Creates an empty chart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a scheduling event.
    pub fn record(&mut self, process_id: impl Into<String>, start: i64, end: i64) {
        self.entries.push(GanttEntry::new(process_id, start, end));
    }

    /// The bare process-id sequence, one per scheduling event.
    pub fn pids(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.process_id.as_str()).collect()
    }

    /// Latest end time across all events; 0 for an empty chart.
    pub fn makespan(&self) -> i64 {
        self.entries.iter().map(|e| e.end).max().unwrap_or(0)
    }

    /// Total CPU time consumed by one process across all of its events.
    pub fn busy_time(&self, process_id: &str) -> i64 {
        self.entries
            .iter()
            .filter(|e| e.process_id == process_id)
            .map(|e| e.duration())
            .sum()
    }

    /// Number of scheduling events.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Whether the chart has no events.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
