/*!
 * History Log
 * Append-only audit trail of accepted and rejected operations
 */

use crate::core::types::Pid;
use crate::ledger::ResourceVector;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpKind {
    Add,
    Remove,
    Grant,
    Reject,
    Release,
}

/// One audit record.
///
/// `amount` is the vector the operation carried: declared max for Add, the
/// request for Grant/Reject, the released amount for Release, and the freed
/// allocation for Remove. `safe_order` is present on grants only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub seq: u64,
    pub timestamp: SystemTime,
    pub kind: OpKind,
    pub pid: Pid,
    pub amount: Option<ResourceVector>,
    pub safe_order: Option<Vec<Pid>>,
    pub reason: Option<String>,
}

/// Append-only operation log.
///
/// Purely observational: decision logic never reads it. Consumers use it for
/// audit trails and the request statistics the dashboard shows.
#[derive(Debug, Clone, Default)]
pub struct HistoryLog {
    records: Vec<HistoryRecord>,
    next_seq: u64,
}

/// Request counters derived from the log
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestStats {
    pub requests: u64,
    pub granted: u64,
    pub rejected: u64,
}

impl RequestStats {
    /// Fraction of requests granted, in `0.0..=1.0`; 1.0 when none were made
    pub fn success_rate(&self) -> f64 {
        if self.requests == 0 {
            1.0
        } else {
            self.granted as f64 / self.requests as f64
        }
    }
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(
        &mut self,
        kind: OpKind,
        pid: Pid,
        amount: Option<ResourceVector>,
        safe_order: Option<Vec<Pid>>,
        reason: Option<String>,
    ) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.records.push(HistoryRecord {
            seq,
            timestamp: SystemTime::now(),
            kind,
            pid,
            amount,
            safe_order,
            reason,
        });
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    /// The most recent `n` records, oldest first
    pub fn recent(&self, n: usize) -> &[HistoryRecord] {
        let start = self.records.len().saturating_sub(n);
        &self.records[start..]
    }

    /// Counters over Grant/Reject records
    pub fn stats(&self) -> RequestStats {
        let mut stats = RequestStats::default();
        for record in &self.records {
            match record.kind {
                OpKind::Grant => {
                    stats.requests += 1;
                    stats.granted += 1;
                }
                OpKind::Reject => {
                    stats.requests += 1;
                    stats.rejected += 1;
                }
                _ => {}
            }
        }
        stats
    }
}
