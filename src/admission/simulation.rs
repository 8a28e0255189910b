/*!
 * Scenario Simulation
 * What-if request sequences against a scratch copy of the ledger
 */

use super::snapshot::StateSnapshot;
use crate::core::errors::WardenError;
use crate::core::types::Pid;
use crate::ledger::ResourceVector;
use serde::{Deserialize, Serialize};

/// One request in a simulated scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationStep {
    pub pid: Pid,
    pub request: ResourceVector,
}

impl SimulationStep {
    pub fn new(pid: Pid, request: ResourceVector) -> Self {
        Self { pid, request }
    }
}

impl From<(Pid, ResourceVector)> for SimulationStep {
    fn from((pid, request): (Pid, ResourceVector)) -> Self {
        Self { pid, request }
    }
}

/// Result of one simulated request, with the scratch state after it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub pid: Pid,
    pub request: ResourceVector,
    pub outcome: Result<Vec<Pid>, WardenError>,
    pub state_after: StateSnapshot,
}

impl StepOutcome {
    pub fn granted(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Per-step outcomes plus the final scratch state.
///
/// The simulation stops at the first rejection; steps after it are not
/// attempted and do not appear in `steps`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    pub steps: Vec<StepOutcome>,
    pub final_state: StateSnapshot,
}

impl SimulationOutcome {
    /// True when every submitted step was attempted and granted
    pub fn all_granted(&self) -> bool {
        self.steps.iter().all(StepOutcome::granted)
    }
}
