//! Run-to-completion policies: FCFS, SJF, priority, HRRN.
//!
//! A dispatched process occupies the CPU for its whole burst, so each
//! selection emits exactly one Gantt entry and advances the clock by
//! the full burst. When nothing has arrived yet the clock jumps to the
//! next arrival among incomplete processes. HRRN is the exception: it
//! ticks forward one unit at a time while its ready queue is empty.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3.1-5.3.4

use log::trace;

use super::{pick, IterationGuard, SimulationError};
use crate::models::{GanttChart, ProcessState};
use crate::policy::{rules, SimulationContext, TieBreak};

/// Indices sorted by arrival time, stable on ties (input order wins).
fn arrival_order(states: &[ProcessState]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..states.len()).collect();
    order.sort_by_key(|&i| states[i].record.arrival_time);
    order
}

/// Earliest arrival among incomplete processes.
fn next_arrival(states: &[ProcessState]) -> Result<i64, SimulationError> {
    states
        .iter()
        .filter(|s| !s.is_completed())
        .map(|s| s.record.arrival_time)
        .min()
        .ok_or_else(|| {
            SimulationError::InvariantViolation(
                "idle advance requested with every process complete".into(),
            )
        })
}

/// Arrived, incomplete processes in the given scan order.
fn ready_set(states: &[ProcessState], order: &[usize], now: i64) -> Vec<usize> {
    order
        .iter()
        .copied()
        .filter(|&i| states[i].has_arrived(now) && !states[i].is_completed())
        .collect()
}

/// First-come-first-served.
///
/// Processes run in arrival order; equal arrivals keep input order.
pub(crate) fn fcfs(states: &mut [ProcessState]) -> Result<GanttChart, SimulationError> {
    let mut chart = GanttChart::new();
    let mut now = 0;

    for idx in arrival_order(states) {
        let state = &mut states[idx];
        now = now.max(state.record.arrival_time);
        let start = now;
        now += state.record.burst_time;
        state.complete_at(now);
        chart.record(state.record.id.clone(), start, now);
    }

    Ok(chart)
}

/// Shortest-job-first, non-preemptive.
///
/// Dispatches the arrived process with the smallest burst; burst ties
/// keep the earliest position in arrival order.
pub(crate) fn shortest_job_first(
    states: &mut [ProcessState],
) -> Result<GanttChart, SimulationError> {
    run_to_completion(states, &rules::ShortestBurst, TieBreak::FirstCandidate, "SJF")
}

/// Priority, non-preemptive.
///
/// Dispatches the arrived process with the smallest priority value;
/// priority ties go to the earlier arrival.
pub(crate) fn priority(states: &mut [ProcessState]) -> Result<GanttChart, SimulationError> {
    run_to_completion(
        states,
        &rules::PriorityValue,
        TieBreak::EarliestArrival,
        "priority",
    )
}

/// Shared loop for the key-based run-to-completion policies.
fn run_to_completion(
    states: &mut [ProcessState],
    rule: &dyn crate::policy::SelectionRule,
    tie_break: TieBreak,
    name: &str,
) -> Result<GanttChart, SimulationError> {
    let order = arrival_order(states);
    let mut chart = GanttChart::new();
    let mut now = 0;
    let mut completed = 0;
    let mut guard = IterationGuard::new(states);

    while completed < states.len() {
        guard.check(name)?;

        let candidates = ready_set(states, &order, now);
        if candidates.is_empty() {
            now = next_arrival(states)?;
            trace!("{name}: idle, clock jumped to t={now}");
            continue;
        }

        let context = SimulationContext::at_time(now);
        let idx = pick(&candidates, states, rule, tie_break, &context)?;

        let state = &mut states[idx];
        let start = now;
        now += state.record.burst_time;
        state.complete_at(now);
        chart.record(state.record.id.clone(), start, now);
        completed += 1;
    }

    Ok(chart)
}

/// Highest-response-ratio-next.
///
/// Arrived processes enter a ready queue once, in arrival order. Each
/// selection round recomputes every queued process's response ratio
/// `(wait + burst) / burst` and dispatches the maximum; ratio ties keep
/// the first-enqueued process. An empty queue advances the clock by a
/// single unit rather than jumping to the next arrival.
pub(crate) fn highest_response_ratio_next(
    states: &mut [ProcessState],
) -> Result<GanttChart, SimulationError> {
    let order = arrival_order(states);
    let mut queue: Vec<usize> = Vec::new();
    let mut chart = GanttChart::new();
    let mut now = 0;
    let mut completed = 0;
    let mut guard = IterationGuard::new(states);

    while completed < states.len() {
        guard.check("HRRN")?;

        for &i in &order {
            if states[i].has_arrived(now) && !states[i].is_completed() && !states[i].enqueued {
                states[i].enqueued = true;
                queue.push(i);
            }
        }

        if queue.is_empty() {
            now += 1;
            continue;
        }

        let context = SimulationContext::at_time(now);
        let idx = pick(
            &queue,
            states,
            &rules::ResponseRatio,
            TieBreak::FirstCandidate,
            &context,
        )?;
        queue.retain(|&i| i != idx);

        let state = &mut states[idx];
        let start = now;
        now += state.record.burst_time;
        state.complete_at(now);
        chart.record(state.record.id.clone(), start, now);
        completed += 1;
    }

    Ok(chart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProcessRecord;

    fn states(specs: &[(&str, i64, i64, i32)]) -> Vec<ProcessState> {
        specs
            .iter()
            .map(|&(id, arrival, burst, priority)| {
                ProcessState::new(ProcessRecord::new(id, arrival, burst).with_priority(priority))
            })
            .collect()
    }

    fn completion(states: &[ProcessState], id: &str) -> i64 {
        states
            .iter()
            .find(|s| s.record.id == id)
            .and_then(|s| s.completion_time)
            .unwrap()
    }

    #[test]
    fn test_fcfs_reference_batch() {
        let mut batch = states(&[("A", 0, 5, 0), ("B", 1, 3, 0), ("C", 2, 8, 0)]);
        let chart = fcfs(&mut batch).unwrap();

        assert_eq!(chart.pids(), vec!["A", "B", "C"]);
        assert_eq!(completion(&batch, "A"), 5);
        assert_eq!(completion(&batch, "B"), 8);
        assert_eq!(completion(&batch, "C"), 16);
    }

    #[test]
    fn test_fcfs_waits_for_late_arrival() {
        let mut batch = states(&[("A", 0, 2, 0), ("B", 10, 3, 0)]);
        let chart = fcfs(&mut batch).unwrap();

        // CPU idles over [2, 10); B starts at its arrival.
        assert_eq!(chart.entries[1].start, 10);
        assert_eq!(completion(&batch, "B"), 13);
    }

    #[test]
    fn test_fcfs_equal_arrivals_keep_input_order() {
        let mut batch = states(&[("X", 3, 2, 0), ("Y", 3, 2, 0), ("Z", 3, 2, 0)]);
        let chart = fcfs(&mut batch).unwrap();
        assert_eq!(chart.pids(), vec!["X", "Y", "Z"]);
    }

    #[test]
    fn test_sjf_picks_shortest_available() {
        // At t=7 (after A), both B and C have arrived; C is shorter.
        let mut batch = states(&[("A", 0, 7, 0), ("B", 1, 5, 0), ("C", 2, 3, 0)]);
        let chart = shortest_job_first(&mut batch).unwrap();

        assert_eq!(chart.pids(), vec!["A", "C", "B"]);
        assert_eq!(completion(&batch, "C"), 10);
        assert_eq!(completion(&batch, "B"), 15);
    }

    #[test]
    fn test_sjf_does_not_preempt() {
        // B (burst 1) arrives while A runs; A still finishes first.
        let mut batch = states(&[("A", 0, 6, 0), ("B", 1, 1, 0)]);
        let chart = shortest_job_first(&mut batch).unwrap();
        assert_eq!(chart.pids(), vec!["A", "B"]);
    }

    #[test]
    fn test_sjf_burst_tie_keeps_arrival_order() {
        let mut batch = states(&[("L", 0, 9, 0), ("M", 1, 4, 0), ("N", 2, 4, 0)]);
        let chart = shortest_job_first(&mut batch).unwrap();
        // M and N tie on burst; M is earlier in arrival order.
        assert_eq!(chart.pids(), vec!["L", "M", "N"]);
    }

    #[test]
    fn test_sjf_idle_jumps_to_next_arrival() {
        let mut batch = states(&[("A", 5, 2, 0), ("B", 6, 1, 0)]);
        let chart = shortest_job_first(&mut batch).unwrap();
        assert_eq!(chart.entries[0].start, 5);
        assert_eq!(completion(&batch, "A"), 7);
        assert_eq!(completion(&batch, "B"), 8);
    }

    #[test]
    fn test_priority_selects_lowest_value() {
        let mut batch = states(&[("A", 0, 4, 3), ("B", 0, 4, 1), ("C", 0, 4, 2)]);
        let chart = priority(&mut batch).unwrap();
        assert_eq!(chart.pids(), vec!["B", "C", "A"]);
    }

    #[test]
    fn test_priority_tie_goes_to_earlier_arrival() {
        // B and C share priority 1; C arrived earlier.
        let mut batch = states(&[("A", 0, 6, 0), ("C", 1, 4, 1), ("B", 2, 4, 1)]);
        let chart = priority(&mut batch).unwrap();
        assert_eq!(chart.pids(), vec!["A", "C", "B"]);
    }

    #[test]
    fn test_priority_only_considers_arrived() {
        // The top-priority process hasn't arrived at t=0; A runs first.
        let mut batch = states(&[("A", 0, 3, 5), ("B", 5, 2, 1)]);
        let chart = priority(&mut batch).unwrap();
        assert_eq!(chart.pids(), vec!["A", "B"]);
        assert_eq!(completion(&batch, "B"), 7);
    }

    #[test]
    fn test_hrrn_favors_long_waiters() {
        // After A's long burst, B has waited far longer relative to its
        // burst than C: B ratio (9+2)/2 = 5.5, C ratio (8+2)/2 = 5.0.
        let mut batch = states(&[("A", 0, 10, 0), ("B", 1, 2, 0), ("C", 2, 2, 0)]);
        let chart = highest_response_ratio_next(&mut batch).unwrap();
        assert_eq!(chart.pids(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_hrrn_ratio_overtakes_short_job() {
        // At t=6: B ratio (5+6)/6 ≈ 1.83, C ratio (2+3)/3 ≈ 1.67 → B wins
        // despite the longer burst.
        let mut batch = states(&[("A", 0, 6, 0), ("B", 1, 6, 0), ("C", 4, 3, 0)]);
        let chart = highest_response_ratio_next(&mut batch).unwrap();
        assert_eq!(chart.pids(), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_hrrn_ratio_tie_keeps_enqueue_order() {
        // Identical arrival/burst → identical ratios; first enqueued wins.
        let mut batch = states(&[("X", 0, 4, 0), ("Y", 0, 4, 0)]);
        let chart = highest_response_ratio_next(&mut batch).unwrap();
        assert_eq!(chart.pids(), vec!["X", "Y"]);
    }

    #[test]
    fn test_hrrn_idle_advances_one_unit() {
        let mut batch = states(&[("A", 3, 2, 0)]);
        let chart = highest_response_ratio_next(&mut batch).unwrap();
        // Clock ticked 0→1→2→3 before dispatch.
        assert_eq!(chart.entries[0].start, 3);
        assert_eq!(completion(&batch, "A"), 5);
    }

    #[test]
    fn test_completion_never_before_minimum_finish() {
        let mut batch = states(&[("A", 2, 3, 0), ("B", 0, 4, 0)]);
        fcfs(&mut batch).unwrap();
        for state in &batch {
            let completion = state.completion_time.unwrap();
            assert!(completion >= state.record.arrival_time + state.record.burst_time);
        }
    }
}
