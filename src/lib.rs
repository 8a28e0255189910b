/*!
 * Resource Warden Library
 * Deadlock-avoidance admission control for typed resource pools
 */

pub mod admission;
pub mod core;
pub mod demo;
pub mod diagnostics;
pub mod history;
pub mod ledger;
pub mod safety;

// Re-exports
pub use crate::admission::{
    AdmissionController, ProcessSnapshot, ResourceUtilization, SimulationOutcome, SimulationStep,
    StateSnapshot, StepOutcome,
};
pub use crate::core::errors::WardenError;
pub use crate::core::types::{Pid, WardenResult};
pub use crate::diagnostics::DeadlockReport;
pub use crate::history::{HistoryLog, HistoryRecord, OpKind, RequestStats};
pub use crate::ledger::{ProcessEntry, ResourceLedger, ResourceVector};
pub use crate::safety::SafetyReport;
