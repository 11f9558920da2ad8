//! Built-in selection rules.
//!
//! Each key-based policy dispatches whichever ready process scores
//! lowest under its rule:
//!
//! - **SJF**: [`ShortestBurst`]
//! - **Priority / Preemptive Priority**: [`PriorityValue`]
//! - **HRRN**: [`ResponseRatio`]
//! - **SRTF**: [`ShortestRemaining`]
//!
//! # Score Convention
//! Lower score = scheduled first.

use super::{RuleScore, SelectionRule, SimulationContext};
use crate::models::ProcessState;

/// Shortest original burst first.
///
/// The non-preemptive SJF key: the full burst, not the remaining time,
/// since a dispatched process always runs to completion.
#[derive(Debug, Clone, Copy)]
pub struct ShortestBurst;

impl SelectionRule for ShortestBurst {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn evaluate(&self, process: &ProcessState, _context: &SimulationContext) -> RuleScore {
        process.record.burst_time as f64
    }
}

/// Smallest priority value first (lower value = higher priority).
#[derive(Debug, Clone, Copy)]
pub struct PriorityValue;

impl SelectionRule for PriorityValue {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, process: &ProcessState, _context: &SimulationContext) -> RuleScore {
        process.record.priority as f64
    }
}

/// Highest response ratio first.
///
/// `ratio = (wait + burst) / burst` where `wait` is the time elapsed
/// since arrival. The ratio grows as a process waits, so long-waiting
/// short jobs overtake newly arrived ones. Negated to fit the
/// lower-score-first convention.
#[derive(Debug, Clone, Copy)]
pub struct ResponseRatio;

impl SelectionRule for ResponseRatio {
    fn name(&self) -> &'static str {
        "HRRN"
    }

    fn evaluate(&self, process: &ProcessState, context: &SimulationContext) -> RuleScore {
        let burst = process.record.burst_time as f64;
        let wait = (context.current_time - process.record.arrival_time) as f64;
        -((wait + burst) / burst)
    }
}

/// Shortest remaining time first (the preemptive SJF key).
#[derive(Debug, Clone, Copy)]
pub struct ShortestRemaining;

impl SelectionRule for ShortestRemaining {
    fn name(&self) -> &'static str {
        "SRTF"
    }

    fn evaluate(&self, process: &ProcessState, _context: &SimulationContext) -> RuleScore {
        process.remaining_time as f64
    }
}
