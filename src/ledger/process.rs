/*!
 * Process Entry
 * Resource state of a single registered process
 */

use super::vector::ResourceVector;
use crate::core::types::Pid;
use serde::{Deserialize, Serialize};

/// Per-process allocation state.
///
/// `need = max - allocated` holds elementwise at all times; the ledger is the
/// only writer and keeps the three vectors in lockstep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessEntry {
    pub pid: Pid,
    pub name: String,
    pub max: ResourceVector,
    pub allocated: ResourceVector,
    pub need: ResourceVector,
}

impl ProcessEntry {
    pub(crate) fn new(pid: Pid, name: String, max: ResourceVector) -> Self {
        let allocated = ResourceVector::zeros(max.len());
        let need = max.clone();
        Self {
            pid,
            name,
            max,
            allocated,
            need,
        }
    }

    /// True when the remaining need fits into `work` elementwise
    pub fn can_finish_with(&self, work: &ResourceVector) -> bool {
        self.need.fits_within(work)
    }
}
