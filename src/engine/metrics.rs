//! Timing metrics.
//!
//! Derives per-process waiting and turnaround times from completion
//! times, plus batch averages. All values come from three inputs only
//! (completion, arrival, original burst), so recalculating over an
//! unchanged batch is idempotent.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Turnaround | completion - arrival |
//! | Waiting | turnaround - original burst |
//! | Averages | arithmetic mean, rounded half-up to 2 decimals |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::SimulationError;
use crate::models::ProcessState;
use crate::validation::{ValidationError, ValidationErrorKind};

/// Timing metrics for one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessTiming {
    /// Time at which the process finished its burst.
    pub completion_time: i64,
    /// Time spent ready but not running.
    pub waiting_time: i64,
    /// Time from arrival to completion.
    pub turnaround_time: i64,
}

/// Timing metrics for a completed batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingReport {
    /// Per-process timings, keyed by process id.
    pub per_process: HashMap<String, ProcessTiming>,
    /// Mean waiting time, rounded half-up to 2 decimals.
    pub average_waiting_time: f64,
    /// Mean turnaround time, rounded half-up to 2 decimals.
    pub average_turnaround_time: f64,
}

impl TimingReport {
    /// Computes the report for a finished simulation.
    ///
    /// # Errors
    /// `InvalidInput` for an empty batch (the averages would divide by
    /// zero); `InvariantViolation` if any process lacks a completion
    /// time (the simulation did not finish it, an engine bug).
    pub fn calculate(states: &[ProcessState]) -> Result<Self, SimulationError> {
        if states.is_empty() {
            return Err(SimulationError::InvalidInput(vec![ValidationError::new(
                ValidationErrorKind::EmptyProcessList,
                "Cannot average over an empty process list",
            )]));
        }

        let mut per_process = HashMap::with_capacity(states.len());
        let mut total_waiting: i64 = 0;
        let mut total_turnaround: i64 = 0;

        for state in states {
            let completion_time = state.completion_time.ok_or_else(|| {
                SimulationError::InvariantViolation(format!(
                    "Process '{}' never reached completion",
                    state.record.id
                ))
            })?;

            let turnaround_time = completion_time - state.record.arrival_time;
            let waiting_time = turnaround_time - state.record.burst_time;
            total_waiting += waiting_time;
            total_turnaround += turnaround_time;

            per_process.insert(
                state.record.id.clone(),
                ProcessTiming {
                    completion_time,
                    waiting_time,
                    turnaround_time,
                },
            );
        }

        let count = states.len() as f64;
        Ok(Self {
            per_process,
            average_waiting_time: round2(total_waiting as f64 / count),
            average_turnaround_time: round2(total_turnaround as f64 / count),
        })
    }

    /// Timing for one process, if present.
    pub fn timing_for(&self, process_id: &str) -> Option<&ProcessTiming> {
        self.per_process.get(process_id)
    }
}

/// Rounds half-up to 2 decimal places.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
