/*!
 * Admission Control
 * Transactional grant/release orchestration gated by the safety check
 */

mod controller;
mod simulation;
mod snapshot;

pub use controller::AdmissionController;
pub use simulation::{SimulationOutcome, SimulationStep, StepOutcome};
pub use snapshot::{ProcessSnapshot, ResourceUtilization, StateSnapshot};
