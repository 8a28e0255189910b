/*!
 * Deadlock Diagnostics
 * Best-effort stuck-process analysis for unsafe states
 */

use crate::core::types::Pid;
use crate::ledger::ResourceLedger;
use crate::safety;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlockReport {
    pub is_deadlock: bool,
    pub stuck: Vec<Pid>,
}

impl DeadlockReport {
    fn clear() -> Self {
        Self {
            is_deadlock: false,
            stuck: Vec::new(),
        }
    }
}

/// Report processes that currently appear unable to proceed.
///
/// A safe state is never a deadlock. In an unsafe state, every process with
/// nonzero remaining need that does not fit into `available` is reported, in
/// registration order. This is a single-pass availability heuristic, not
/// wait-for-graph cycle detection: it can both under- and over-report
/// relative to true circular-wait analysis.
pub fn detect(ledger: &ResourceLedger) -> DeadlockReport {
    if safety::check(ledger).is_safe {
        return DeadlockReport::clear();
    }

    let available = ledger.available();
    let stuck: Vec<Pid> = ledger
        .entries_in_order()
        .filter(|entry| !entry.need.is_zero() && !entry.need.fits_within(&available))
        .map(|entry| entry.pid)
        .collect();

    DeadlockReport {
        is_deadlock: !stuck.is_empty(),
        stuck,
    }
}
