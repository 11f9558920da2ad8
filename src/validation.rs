//! Input validation for simulation requests.
//!
//! Checks the integrity of a process batch before any simulation loop
//! runs, so malformed input is rejected at the boundary rather than
//! discovered mid-loop. Detects:
//! - Empty process lists
//! - Duplicate process ids
//! - Negative arrival times and non-positive burst times
//! - Missing or non-positive round-robin quantum
//! - Mismatched parallel input columns (via record assembly)
//!
//! All violations are collected and reported together.

use std::collections::HashSet;

use crate::models::ProcessRecord;
use crate::policy::Policy;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// The process list is empty.
    EmptyProcessList,
    /// Two processes share the same id.
    DuplicateId,
    /// A process arrives before t=0.
    NegativeArrivalTime,
    /// A process requires zero or negative CPU time.
    NonPositiveBurstTime,
    /// Round-robin was requested without a quantum.
    MissingQuantum,
    /// The round-robin quantum is zero or negative.
    NonPositiveQuantum,
    /// Parallel input columns have different lengths.
    MismatchedColumnLengths,
    /// The policy name is not in the supported set.
    UnknownPolicy,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Resolves a policy name from the closed supported set.
///
/// Wraps [`Policy::parse`] in the validation error shape so adapters
/// can report unknown names alongside other input errors.
pub fn validate_policy_name(name: &str) -> Result<Policy, Vec<ValidationError>> {
    Policy::parse(name).map_err(|message| {
        vec![ValidationError::new(
            ValidationErrorKind::UnknownPolicy,
            message,
        )]
    })
}

/// Validates a simulation input batch.
///
/// Checks:
/// 1. The process list is non-empty (averages need at least one process)
/// 2. No duplicate process ids
/// 3. Every arrival time is >= 0
/// 4. Every burst time is > 0
/// 5. Round-robin carries a quantum > 0
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    processes: &[ProcessRecord],
    policy: Policy,
    time_quantum: Option<i64>,
) -> ValidationResult {
    let mut errors = Vec::new();

    if processes.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyProcessList,
            "No processes to schedule",
        ));
    }

    let mut seen_ids = HashSet::new();
    for process in processes {
        if !seen_ids.insert(process.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate process id: {}", process.id),
            ));
        }

        if process.arrival_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrivalTime,
                format!(
                    "Process '{}' has negative arrival time {}",
                    process.id, process.arrival_time
                ),
            ));
        }

        if process.burst_time <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurstTime,
                format!(
                    "Process '{}' has non-positive burst time {}",
                    process.id, process.burst_time
                ),
            ));
        }
    }

    if policy.requires_quantum() {
        match time_quantum {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::MissingQuantum,
                "Round-robin requires a time quantum",
            )),
            Some(q) if q <= 0 => errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveQuantum,
                format!("Time quantum must be positive, got {q}"),
            )),
            Some(_) => {}
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
