//! Tick-based policies: round-robin, SRTF, preemptive priority.
//!
//! Execution proceeds in fixed units: the quantum for round-robin, a
//! single time unit for SRTF and preemptive priority. One Gantt entry
//! is emitted per consumed unit/slice and the dispatch decision is
//! re-evaluated after each one. Idle ticks advance the clock by one
//! unit (round-robin never idles: its queue starts full).
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3.3-5.3.5

use std::collections::VecDeque;

use super::{pick, IterationGuard, SimulationError};
use crate::models::{GanttChart, ProcessState};
use crate::policy::{rules, SimulationContext, TieBreak};

/// Round-robin over a static ready queue.
///
/// The queue is seeded with every process in input order and arrival
/// times play no part in dispatch: a process can be sliced onto the CPU
/// before it would have arrived. This mirrors the classroom variant
/// being simulated; callers wanting textbook behavior should submit
/// batches that all arrive at t=0.
pub(crate) fn round_robin(
    states: &mut [ProcessState],
    quantum: i64,
) -> Result<GanttChart, SimulationError> {
    let mut queue: VecDeque<usize> = (0..states.len()).collect();
    let mut chart = GanttChart::new();
    let mut now = 0;
    let mut guard = IterationGuard::new(states);

    while let Some(idx) = queue.pop_front() {
        guard.check("round-robin")?;

        let state = &mut states[idx];
        if state.remaining_time > quantum {
            chart.record(state.record.id.clone(), now, now + quantum);
            state.remaining_time -= quantum;
            now += quantum;
            queue.push_back(idx);
        } else {
            let start = now;
            now += state.remaining_time;
            state.complete_at(now);
            chart.record(state.record.id.clone(), start, now);
        }
    }

    Ok(chart)
}

/// Shortest-remaining-time-first.
///
/// Every unit, the arrived process with the least remaining work runs;
/// remaining-time ties go to the earlier arrival. A newly arrived short
/// job therefore preempts a long one mid-burst.
pub(crate) fn shortest_remaining_time_first(
    states: &mut [ProcessState],
) -> Result<GanttChart, SimulationError> {
    tick_loop(states, &rules::ShortestRemaining, "SRTF")
}

/// Preemptive priority.
///
/// Every unit, the arrived process with the smallest priority value
/// runs; priority ties go to the earlier arrival. Priorities are fixed
/// for a process's lifetime.
pub(crate) fn preemptive_priority(
    states: &mut [ProcessState],
) -> Result<GanttChart, SimulationError> {
    tick_loop(states, &rules::PriorityValue, "preemptive priority")
}

/// Shared unit-tick loop for SRTF and preemptive priority.
fn tick_loop(
    states: &mut [ProcessState],
    rule: &dyn crate::policy::SelectionRule,
    name: &str,
) -> Result<GanttChart, SimulationError> {
    let mut chart = GanttChart::new();
    let mut now = 0;
    let mut completed = 0;
    let mut guard = IterationGuard::new(states);

    while completed < states.len() {
        guard.check(name)?;

        let candidates: Vec<usize> = (0..states.len())
            .filter(|&i| states[i].has_arrived(now) && !states[i].is_completed())
            .collect();

        if candidates.is_empty() {
            now += 1;
            continue;
        }

        let context = SimulationContext::at_time(now);
        let idx = pick(&candidates, states, rule, TieBreak::EarliestArrival, &context)?;

        let state = &mut states[idx];
        chart.record(state.record.id.clone(), now, now + 1);
        state.remaining_time -= 1;
        now += 1;

        if state.remaining_time == 0 {
            state.complete_at(now);
            completed += 1;
        }
    }

    Ok(chart)
}
