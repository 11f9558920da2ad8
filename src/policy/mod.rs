//! Scheduling policies and selection rules.
//!
//! Provides the closed set of supported policies and the rule machinery
//! shared by the key-based ones (SJF, priority, HRRN, SRTF): a rule
//! scores every ready process and the lowest score is dispatched next.
//!
//! # Score Convention
//! **Lower score = scheduled first.** Rules return smaller values for
//! processes that should run sooner.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3
//! - Haupt (1989), "A Survey of Priority Rule-Based Scheduling"

pub mod rules;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Debug;

use crate::models::ProcessState;

/// A scheduling policy.
///
/// Run-to-completion policies dispatch a process for its whole burst;
/// preemptive policies re-evaluate the dispatch decision every time
/// unit (or quantum slice for round-robin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// First-come-first-served.
    Fcfs,
    /// Shortest-job-first, non-preemptive.
    Sjf,
    /// Priority, non-preemptive (lower value = higher priority).
    Priority,
    /// Round-robin with a fixed time quantum.
    RoundRobin,
    /// Highest-response-ratio-next.
    Hrrn,
    /// Shortest-remaining-time-first (preemptive SJF).
    Srtf,
    /// Preemptive priority.
    PreemptivePriority,
}

impl Policy {
    /// All policies, in presentation order.
    pub const ALL: [Policy; 7] = [
        Policy::Fcfs,
        Policy::Sjf,
        Policy::Priority,
        Policy::RoundRobin,
        Policy::Hrrn,
        Policy::Srtf,
        Policy::PreemptivePriority,
    ];

    /// Parses a policy name.
    ///
    /// Accepts the canonical camelCase names plus snake_case aliases,
    /// case-insensitively.
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "fcfs" => Ok(Self::Fcfs),
            "sjf" => Ok(Self::Sjf),
            "priority" => Ok(Self::Priority),
            "roundrobin" | "round_robin" | "rr" => Ok(Self::RoundRobin),
            "hrrn" => Ok(Self::Hrrn),
            "srtf" => Ok(Self::Srtf),
            "preemptivepriority" | "preemptive_priority" => Ok(Self::PreemptivePriority),
            _ => Err(format!(
                "Invalid policy '{s}'. Valid: fcfs, sjf, priority, roundRobin, hrrn, srtf, preemptivePriority"
            )),
        }
    }

    /// Canonical string representation.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::Sjf => "sjf",
            Self::Priority => "priority",
            Self::RoundRobin => "roundRobin",
            Self::Hrrn => "hrrn",
            Self::Srtf => "srtf",
            Self::PreemptivePriority => "preemptivePriority",
        }
    }

    /// Whether a running process can be interrupted before completion.
    pub const fn is_preemptive(&self) -> bool {
        matches!(self, Self::RoundRobin | Self::Srtf | Self::PreemptivePriority)
    }

    /// Whether the policy needs a time quantum.
    pub const fn requires_quantum(&self) -> bool {
        matches!(self, Self::RoundRobin)
    }
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Policy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Policy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Score returned by a selection rule. Lower = scheduled first.
pub type RuleScore = f64;

/// Simulation state visible to selection rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulationContext {
    /// Current simulation time (ticks).
    pub current_time: i64,
}

impl SimulationContext {
    /// Creates a context at the given time.
    pub fn at_time(current_time: i64) -> Self {
        Self { current_time }
    }
}

/// A rule scoring ready processes for dispatch.
///
/// # Score Convention
/// **Lower score = scheduled first.**
pub trait SelectionRule: Debug {
    /// Rule name (e.g. "SJF", "SRTF").
    fn name(&self) -> &'static str;

    /// Scores a process given the current simulation state.
    fn evaluate(&self, process: &ProcessState, context: &SimulationContext) -> RuleScore;
}

/// How exact score ties are resolved.
///
/// Ties are compared exactly (scores here are integer-valued keys or a
/// strictly-compared ratio), so which candidate wins a tie is part of
/// each policy's contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// Keep the first candidate in scan order.
    #[default]
    FirstCandidate,
    /// Prefer the earlier arrival; equal arrivals keep the first candidate.
    EarliestArrival,
}

/// Picks the best candidate under a rule.
///
/// Scans `candidates` (indices into `states`) in order and returns the
/// index with the strictly lowest score; ties resolve per `tie_break`.
/// Returns `None` for an empty candidate list.
pub fn select_best(
    candidates: &[usize],
    states: &[ProcessState],
    rule: &dyn SelectionRule,
    tie_break: TieBreak,
    context: &SimulationContext,
) -> Option<usize> {
    let mut best: Option<(usize, RuleScore)> = None;

    for &idx in candidates {
        let score = rule.evaluate(&states[idx], context);
        match best {
            None => best = Some((idx, score)),
            Some((best_idx, best_score)) => {
                let wins = score < best_score
                    || (score == best_score
                        && tie_break == TieBreak::EarliestArrival
                        && states[idx].record.arrival_time
                            < states[best_idx].record.arrival_time);
                if wins {
                    best = Some((idx, score));
                }
            }
        }
    }

    best.map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProcessRecord;
    use crate::policy::rules;

    fn state(id: &str, arrival: i64, burst: i64, priority: i32) -> ProcessState {
        ProcessState::new(ProcessRecord::new(id, arrival, burst).with_priority(priority))
    }

    #[test]
    fn test_parse_canonical_names() {
        assert_eq!(Policy::parse("fcfs").unwrap(), Policy::Fcfs);
        assert_eq!(Policy::parse("sjf").unwrap(), Policy::Sjf);
        assert_eq!(Policy::parse("priority").unwrap(), Policy::Priority);
        assert_eq!(Policy::parse("roundRobin").unwrap(), Policy::RoundRobin);
        assert_eq!(Policy::parse("hrrn").unwrap(), Policy::Hrrn);
        assert_eq!(Policy::parse("srtf").unwrap(), Policy::Srtf);
        assert_eq!(
            Policy::parse("preemptivePriority").unwrap(),
            Policy::PreemptivePriority
        );
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(Policy::parse("round_robin").unwrap(), Policy::RoundRobin);
        assert_eq!(Policy::parse("RR").unwrap(), Policy::RoundRobin);
        assert_eq!(
            Policy::parse("preemptive_priority").unwrap(),
            Policy::PreemptivePriority
        );
        assert_eq!(Policy::parse("FCFS").unwrap(), Policy::Fcfs);
    }

    #[test]
    fn test_parse_unknown() {
        assert!(Policy::parse("mlfq").is_err());
        assert!(Policy::parse("").is_err());
    }

    #[test]
    fn test_as_str_roundtrip() {
        for policy in Policy::ALL {
            assert_eq!(Policy::parse(policy.as_str()).unwrap(), policy);
        }
    }

    #[test]
    fn test_policy_classification() {
        assert!(!Policy::Fcfs.is_preemptive());
        assert!(!Policy::Hrrn.is_preemptive());
        assert!(Policy::RoundRobin.is_preemptive());
        assert!(Policy::Srtf.is_preemptive());
        assert!(Policy::PreemptivePriority.is_preemptive());

        assert!(Policy::RoundRobin.requires_quantum());
        assert!(!Policy::Srtf.requires_quantum());
    }

    #[test]
    fn test_policy_serde() {
        let json = serde_json::to_string(&Policy::PreemptivePriority).unwrap();
        assert_eq!(json, "\"preemptivePriority\"");
        let back: Policy = serde_json::from_str("\"roundRobin\"").unwrap();
        assert_eq!(back, Policy::RoundRobin);
        assert!(serde_json::from_str::<Policy>("\"bogus\"").is_err());
    }

    #[test]
    fn test_select_best_lowest_score() {
        let states = vec![state("A", 0, 5, 0), state("B", 0, 3, 0), state("C", 0, 8, 0)];
        let ctx = SimulationContext::at_time(0);
        let best = select_best(
            &[0, 1, 2],
            &states,
            &rules::ShortestBurst,
            TieBreak::FirstCandidate,
            &ctx,
        );
        assert_eq!(best, Some(1));
    }

    #[test]
    fn test_select_best_tie_keeps_first_candidate() {
        let states = vec![state("A", 2, 4, 0), state("B", 1, 4, 0)];
        let ctx = SimulationContext::at_time(5);
        // Equal bursts; FirstCandidate keeps scan order regardless of arrival.
        let best = select_best(
            &[0, 1],
            &states,
            &rules::ShortestBurst,
            TieBreak::FirstCandidate,
            &ctx,
        );
        assert_eq!(best, Some(0));
    }

    #[test]
    fn test_select_best_tie_earliest_arrival() {
        let states = vec![state("A", 2, 4, 1), state("B", 1, 4, 1)];
        let ctx = SimulationContext::at_time(5);
        let best = select_best(
            &[0, 1],
            &states,
            &rules::PriorityValue,
            TieBreak::EarliestArrival,
            &ctx,
        );
        assert_eq!(best, Some(1));
    }

    #[test]
    fn test_select_best_equal_arrival_tie_keeps_first() {
        let states = vec![state("A", 1, 4, 1), state("B", 1, 4, 1)];
        let ctx = SimulationContext::at_time(5);
        let best = select_best(
            &[0, 1],
            &states,
            &rules::PriorityValue,
            TieBreak::EarliestArrival,
            &ctx,
        );
        assert_eq!(best, Some(0));
    }

    #[test]
    fn test_select_best_empty() {
        let states: Vec<ProcessState> = Vec::new();
        let ctx = SimulationContext::at_time(0);
        assert_eq!(
            select_best(&[], &states, &rules::ShortestBurst, TieBreak::FirstCandidate, &ctx),
            None
        );
    }
}
