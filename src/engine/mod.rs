//! Simulation engine.
//!
//! Validates a request, clones the input batch into per-run working
//! copies, dispatches on the policy to one of seven simulation
//! procedures, and derives the timing report from the completion times.
//!
//! # Families
//!
//! - **Run-to-completion** (FCFS, SJF, priority, HRRN): a dispatched
//!   process runs its whole burst; the clock jumps by the full burst.
//! - **Tick-based** (round-robin, SRTF, preemptive priority): the
//!   dispatch decision is re-evaluated after every consumed unit (or
//!   quantum slice).
//!
//! Every simulation is single-threaded, deterministic, and pure from
//! the caller's perspective: the request is never mutated, so the same
//! request may be submitted to any number of concurrent runs.

mod metrics;
mod nonpreemptive;
mod preemptive;

pub use metrics::{ProcessTiming, TimingReport};

use log::debug;
use thiserror::Error;

use crate::models::{GanttChart, ProcessRecord, ProcessState};
use crate::policy::{self, Policy, SelectionRule, SimulationContext, TieBreak};
use crate::validation::{self, ValidationError};

/// Simulation failure.
#[derive(Debug, Clone, Error)]
pub enum SimulationError {
    /// The request was malformed. Detected before any simulation work.
    #[error("invalid input: {}", format_errors(.0))]
    InvalidInput(Vec<ValidationError>),
    /// An internal invariant broke mid-simulation. Unreachable for
    /// validated input; indicates an algorithm bug.
    #[error("scheduling invariant violated: {0}")]
    InvariantViolation(String),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Input batch for one simulation.
#[derive(Debug, Clone)]
pub struct SimulationRequest {
    /// Processes to schedule.
    pub processes: Vec<ProcessRecord>,
    /// Scheduling policy.
    pub policy: Policy,
    /// Time quantum; required for round-robin, ignored otherwise.
    pub time_quantum: Option<i64>,
}

impl SimulationRequest {
    /// Creates a request with no quantum.
    pub fn new(processes: Vec<ProcessRecord>, policy: Policy) -> Self {
        Self {
            processes,
            policy,
            time_quantum: None,
        }
    }

    /// Sets the round-robin time quantum.
    pub fn with_quantum(mut self, quantum: i64) -> Self {
        self.time_quantum = Some(quantum);
        self
    }
}

/// Result of one simulation run.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SimulationOutcome {
    /// Execution trace in dispatch order.
    pub gantt: GanttChart,
    /// Per-process and aggregate timing metrics.
    pub report: TimingReport,
}

/// Runs one complete simulation.
///
/// Validates the request, simulates under the requested policy, and
/// computes the timing report. The request is read-only; each run
/// operates on its own working copies.
///
/// # Errors
/// [`SimulationError::InvalidInput`] for malformed requests;
/// [`SimulationError::InvariantViolation`] if a simulation loop fails
/// to make progress (an internal bug, not a caller error).
pub fn simulate(request: &SimulationRequest) -> Result<SimulationOutcome, SimulationError> {
    validation::validate_input(&request.processes, request.policy, request.time_quantum)
        .map_err(SimulationError::InvalidInput)?;

    debug!(
        "Simulating {} processes under {}",
        request.processes.len(),
        request.policy
    );

    let mut states: Vec<ProcessState> = request
        .processes
        .iter()
        .cloned()
        .map(ProcessState::new)
        .collect();

    let gantt = match request.policy {
        Policy::Fcfs => nonpreemptive::fcfs(&mut states)?,
        Policy::Sjf => nonpreemptive::shortest_job_first(&mut states)?,
        Policy::Priority => nonpreemptive::priority(&mut states)?,
        Policy::Hrrn => nonpreemptive::highest_response_ratio_next(&mut states)?,
        Policy::RoundRobin => {
            let quantum = request.time_quantum.ok_or_else(|| {
                SimulationError::InvariantViolation(
                    "round-robin dispatched without a quantum".into(),
                )
            })?;
            preemptive::round_robin(&mut states, quantum)?
        }
        Policy::Srtf => preemptive::shortest_remaining_time_first(&mut states)?,
        Policy::PreemptivePriority => preemptive::preemptive_priority(&mut states)?,
    };

    let report = TimingReport::calculate(&states)?;
    Ok(SimulationOutcome { gantt, report })
}

/// Loop budget turning a stalled simulation into a reported error.
///
/// Every simulation loop makes progress each iteration (advances the
/// clock or completes work), so `n + Σburst + max arrival + 1`
/// iterations always suffice for validated input.
pub(crate) struct IterationGuard {
    remaining: i64,
}

impl IterationGuard {
    pub(crate) fn new(states: &[ProcessState]) -> Self {
        let total_burst: i64 = states.iter().map(|s| s.record.burst_time).sum();
        let max_arrival = states
            .iter()
            .map(|s| s.record.arrival_time)
            .max()
            .unwrap_or(0);
        Self {
            remaining: states.len() as i64 + total_burst + max_arrival + 1,
        }
    }

    pub(crate) fn check(&mut self, algorithm: &str) -> Result<(), SimulationError> {
        self.remaining -= 1;
        if self.remaining < 0 {
            return Err(SimulationError::InvariantViolation(format!(
                "{algorithm} exceeded its iteration budget without completing"
            )));
        }
        Ok(())
    }
}

/// [`policy::select_best`] over a ready set that must be non-empty.
pub(crate) fn pick(
    candidates: &[usize],
    states: &[ProcessState],
    rule: &dyn SelectionRule,
    tie_break: TieBreak,
    context: &SimulationContext,
) -> Result<usize, SimulationError> {
    policy::select_best(candidates, states, rule, tie_break, context).ok_or_else(|| {
        SimulationError::InvariantViolation(format!(
            "{} selection over an empty ready set",
            rule.name()
        ))
    })
}
