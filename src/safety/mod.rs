/*!
 * Safety Checker
 * Pure safe-state analysis over a ledger snapshot
 */

use crate::core::types::Pid;
use crate::ledger::ResourceLedger;
use serde::{Deserialize, Serialize};

/// Outcome of a safety scan.
///
/// `safe_order` is one completion order in which every process can obtain its
/// full declared maximum and finish; empty when the state is unsafe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyReport {
    pub is_safe: bool,
    pub safe_order: Vec<Pid>,
}

/// Classic safety scan, O(n^2 * K).
///
/// `work` starts as the available vector. The scan walks processes in
/// registration order, finishes the first unfinished one whose remaining need
/// fits into `work`, folds its allocation back into `work`, and restarts from
/// the first process. The state is unsafe iff a full scan finishes nobody.
/// The registration-order tie-break makes the returned order deterministic.
///
/// Reads the ledger, mutates nothing.
pub fn check(ledger: &ResourceLedger) -> SafetyReport {
    let rows: Vec<_> = ledger.entries_in_order().collect();
    let mut work = ledger.available();
    let mut finished = vec![false; rows.len()];
    let mut order = Vec::with_capacity(rows.len());

    loop {
        let mut advanced = false;
        for (i, entry) in rows.iter().enumerate() {
            if finished[i] {
                continue;
            }
            if entry.can_finish_with(&work) {
                work += &entry.allocated;
                finished[i] = true;
                order.push(entry.pid);
                advanced = true;
                break;
            }
        }
        if !advanced {
            break;
        }
    }

    if order.len() == rows.len() {
        SafetyReport {
            is_safe: true,
            safe_order: order,
        }
    } else {
        SafetyReport {
            is_safe: false,
            safe_order: Vec::new(),
        }
    }
}
