//! CPU scheduling simulation.
//!
//! Computes complete single-core schedules for a fixed batch of processes
//! under classic dispatch policies, producing a Gantt execution trace and
//! per-process timing metrics (completion, waiting, turnaround).
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ProcessRecord`, `ProcessState`,
//!   `GanttChart`, `GanttEntry`
//! - **`policy`**: The `Policy` enum and selection-rule machinery shared
//!   by the key-based policies
//! - **`engine`**: The simulation procedures and the `TimingReport`
//!   metrics calculator
//! - **`validation`**: Boundary input checks (ids, time values, quantum)
//!
//! # Policies
//!
//! FCFS, SJF (non-preemptive), priority (non-preemptive), round-robin,
//! HRRN, SRTF, and preemptive priority. The run-to-completion policies
//! emit one trace entry per dispatched process; the tick-based policies
//! emit one entry per consumed time unit (or quantum slice).
//!
//! # Usage
//!
//! ```
//! use cpu_schedule::engine::{simulate, SimulationRequest};
//! use cpu_schedule::models::ProcessRecord;
//! use cpu_schedule::policy::Policy;
//!
//! let processes = vec![
//!     ProcessRecord::new("P0", 0, 5),
//!     ProcessRecord::new("P1", 1, 3),
//! ];
//! let request = SimulationRequest::new(processes, Policy::Fcfs);
//! let outcome = simulate(&request).unwrap();
//! assert_eq!(outcome.gantt.pids(), vec!["P0", "P1"]);
//! ```
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2015), "Modern Operating Systems", Ch. 2.4
//! - Stallings (2018), "Operating Systems: Internals and Design Principles", Ch. 9

pub mod engine;
pub mod models;
pub mod policy;
pub mod validation;

pub use engine::{simulate, SimulationError, SimulationOutcome, SimulationRequest, TimingReport};
pub use models::{GanttChart, GanttEntry, ProcessRecord};
pub use policy::Policy;
