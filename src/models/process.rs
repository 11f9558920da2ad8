//! Process model.
//!
//! A process is the unit of scheduling: it arrives at a fixed time,
//! requires a fixed amount of CPU time (its burst), and optionally
//! carries a priority. `ProcessRecord` is the immutable input entity;
//! `ProcessState` is the per-run working copy that a simulation mutates.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 3.1

use serde::{Deserialize, Serialize};

use crate::validation::{ValidationError, ValidationErrorKind};

/// A process submitted for scheduling.
///
/// All fields are fixed at creation. `burst_time` is the *original*
/// burst and is never mutated by a simulation: per-run bookkeeping
/// lives on [`ProcessState`], so the same record can be submitted to
/// any number of independent runs.
///
/// # Time Representation
/// Arrival and burst times are integer simulation ticks relative to the
/// simulation epoch (t=0). The consumer defines what one tick means.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessRecord {
    /// Unique process identifier.
    pub id: String,
    /// Time at which the process becomes eligible to run (>= 0).
    pub arrival_time: i64,
    /// Total CPU time required (> 0). Immutable original value.
    pub burst_time: i64,
    /// Scheduling priority. Lower value = higher priority; 0 = none.
    pub priority: i32,
}

impl ProcessRecord {
    /// Creates a new process with priority 0.
    pub fn new(id: impl Into<String>, arrival_time: i64, burst_time: i64) -> Self {
        Self {
            id: id.into(),
            arrival_time,
            burst_time,
            priority: 0,
        }
    }

    /// Sets the scheduling priority (lower value = higher priority).
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Builds records from parallel arrival/burst/priority columns.
    ///
    /// Ids are generated as `P0, P1, …` in column order. The priority
    /// column may be shorter than the others; missing entries default
    /// to 0 (no priority differentiation). Arrival and burst columns
    /// must have equal lengths.
    pub fn from_columns(
        arrivals: &[i64],
        bursts: &[i64],
        priorities: &[i32],
    ) -> Result<Vec<Self>, Vec<ValidationError>> {
        if arrivals.len() != bursts.len() || priorities.len() > arrivals.len() {
            return Err(vec![ValidationError::new(
                ValidationErrorKind::MismatchedColumnLengths,
                format!(
                    "Column lengths differ: {} arrivals, {} bursts, {} priorities",
                    arrivals.len(),
                    bursts.len(),
                    priorities.len()
                ),
            )]);
        }

        Ok(arrivals
            .iter()
            .zip(bursts)
            .enumerate()
            .map(|(i, (&arrival, &burst))| {
                Self::new(format!("P{i}"), arrival, burst)
                    .with_priority(priorities.get(i).copied().unwrap_or(0))
            })
            .collect())
    }
}

/// Per-run working copy of a process.
///
/// Declares upfront every transient field a simulation touches, so a
/// run never contaminates the input records or a concurrent run. The
/// lifecycle is: created from a [`ProcessRecord`] at the start of one
/// simulation, mutated by exactly that simulation, then read by the
/// metrics calculator.
#[derive(Debug, Clone)]
pub struct ProcessState {
    /// The immutable input record.
    pub record: ProcessRecord,
    /// CPU time still required. Starts at `record.burst_time`.
    pub remaining_time: i64,
    /// Set exactly once, when `remaining_time` reaches 0.
    pub completion_time: Option<i64>,
    /// Whether the process has entered the HRRN ready queue.
    pub enqueued: bool,
}

impl ProcessState {
    /// Creates a fresh working copy for one simulation run.
    pub fn new(record: ProcessRecord) -> Self {
        let remaining_time = record.burst_time;
        Self {
            record,
            remaining_time,
            completion_time: None,
            enqueued: false,
        }
    }

    /// Whether the process has finished all of its burst.
    #[inline]
    pub fn is_completed(&self) -> bool {
        self.completion_time.is_some()
    }

    /// Whether the process has arrived by `now`.
    #[inline]
    pub fn has_arrived(&self, now: i64) -> bool {
        self.record.arrival_time <= now
    }

    /// Marks the process finished at `now`.
    pub fn complete_at(&mut self, now: i64) {
        self.remaining_time = 0;
        self.completion_time = Some(now);
    }
}
