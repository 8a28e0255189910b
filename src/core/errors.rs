/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use crate::core::types::Pid;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Admission errors with serialization support
///
/// Every variant is non-fatal and fully recoverable: a rejected mutating call
/// is a strict no-op on the ledger.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum WardenError {
    #[error("Vector has {actual} resource kinds, ledger tracks {expected}")]
    #[diagnostic(
        code(admission::dimension_mismatch),
        help("All vectors must match the resource-kind count fixed at ledger creation.")
    )]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Declared maximum for {resource} exceeds the total pool")]
    #[diagnostic(
        code(admission::capacity_exceeded),
        help("A process may never declare more of a resource than the system owns.")
    )]
    CapacityExceeded { resource: String },

    #[error("Process {0} not found")]
    #[diagnostic(
        code(admission::process_not_found),
        help("The process was never registered or has been removed. Check the pid.")
    )]
    ProcessNotFound(Pid),

    #[error("Process {0} is already registered")]
    #[diagnostic(
        code(admission::duplicate_process_id),
        help("Pids must be unique while registered. Remove the process first to reuse its id.")
    )]
    DuplicateProcessId(Pid),

    #[error("Request exceeds remaining need for {resource}")]
    #[diagnostic(
        code(admission::exceeds_need),
        help("A process cannot request beyond its declared maximum demand.")
    )]
    ExceedsNeed { resource: String },

    #[error("Request exceeds available {resource}")]
    #[diagnostic(
        code(admission::exceeds_available),
        help("Not enough free resources right now. Retry after a release.")
    )]
    ExceedsAvailable { resource: String },

    #[error("Request denied: granting it would leave the system in an unsafe state")]
    #[diagnostic(
        code(admission::unsafe_state),
        help("Granting this request could lead to deadlock. Retry after other processes release.")
    )]
    WouldCauseUnsafeState,

    #[error("Cannot release more {resource} than currently allocated")]
    #[diagnostic(
        code(admission::exceeds_allocated),
        help("Release amounts are capped by the process's current allocation.")
    )]
    ExceedsAllocated { resource: String },
}
