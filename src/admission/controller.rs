/*!
 * Admission Controller
 * Atomic grant/release transactions over an exclusively owned ledger
 */

use super::simulation::{SimulationOutcome, SimulationStep, StepOutcome};
use super::snapshot::StateSnapshot;
use crate::core::errors::WardenError;
use crate::core::types::{Pid, WardenResult};
use crate::diagnostics::{self, DeadlockReport};
use crate::history::{HistoryLog, HistoryRecord, OpKind, RequestStats};
use crate::ledger::{ResourceLedger, ResourceVector};
use crate::safety;
use log::{info, warn};
use parking_lot::RwLock;

struct Inner {
    ledger: ResourceLedger,
    history: HistoryLog,
}

/// The admission engine.
///
/// Owns the ledger exclusively behind one lock; every operation runs its full
/// validate / apply / check / commit span inside a single lock acquisition,
/// so callers never observe a tentative or invariant-violating state. The
/// controller is an explicitly constructed instance, never ambient global
/// state; independent ledgers coexist by constructing more controllers.
pub struct AdmissionController {
    inner: RwLock<Inner>,
}

impl AdmissionController {
    /// Create a controller over a fresh ledger with generated resource names
    pub fn new(total: ResourceVector) -> Self {
        Self::from_ledger(ResourceLedger::new(total))
    }

    /// Create a controller with caller-supplied resource names
    pub fn with_names(total: ResourceVector, names: Vec<String>) -> WardenResult<Self> {
        Ok(Self::from_ledger(ResourceLedger::with_names(total, names)?))
    }

    fn from_ledger(ledger: ResourceLedger) -> Self {
        info!(
            "Admission controller initialized: {} resource kinds, pool {}",
            ledger.kinds(),
            ledger.total()
        );
        Self {
            inner: RwLock::new(Inner {
                ledger,
                history: HistoryLog::new(),
            }),
        }
    }

    /// Register a process with its declared maximum demand
    pub fn add_process(
        &self,
        pid: Pid,
        name: impl Into<String>,
        max: ResourceVector,
    ) -> WardenResult<()> {
        let name = name.into();
        let mut inner = self.inner.write();
        inner.ledger.add_process(pid, name.clone(), max.clone())?;
        inner.history.push(OpKind::Add, pid, Some(max), None, None);
        info!("Registered process {} ({})", pid, name);
        Ok(())
    }

    /// Deregister a process, returning its entire allocation to the pool
    pub fn remove_process(&self, pid: Pid) -> WardenResult<()> {
        let mut inner = self.inner.write();
        let entry = inner.ledger.remove_process(pid)?;
        info!(
            "Removed process {} ({}); returned {} to the pool",
            pid, entry.name, entry.allocated
        );
        inner
            .history
            .push(OpKind::Remove, pid, Some(entry.allocated), None, None);
        Ok(())
    }

    /// Grant `request` to `pid` iff the resulting state is safe.
    ///
    /// The grant is applied to a private copy of the ledger and the safety
    /// check runs against that copy; only a safe copy replaces the live
    /// ledger. On any rejection the live ledger is bit-identical to before
    /// the call. Returns the completion order the safety scan found.
    pub fn request_resources(&self, pid: Pid, request: ResourceVector) -> WardenResult<Vec<Pid>> {
        let mut inner = self.inner.write();
        match Self::admit(&mut inner.ledger, pid, &request) {
            Ok(order) => {
                info!(
                    "Granted {} to process {}; completion order {:?}",
                    request, pid, order
                );
                inner
                    .history
                    .push(OpKind::Grant, pid, Some(request), Some(order.clone()), None);
                Ok(order)
            }
            Err(e) => {
                warn!("Rejected request {} by process {}: {}", request, pid, e);
                inner
                    .history
                    .push(OpKind::Reject, pid, Some(request), None, Some(e.to_string()));
                Err(e)
            }
        }
    }

    /// Release part of a process's allocation back to the pool.
    ///
    /// Validated fully up front, then applied unconditionally: releasing can
    /// only move the system toward safety, so no safety re-check is run.
    pub fn release_resources(&self, pid: Pid, release: ResourceVector) -> WardenResult<()> {
        let mut inner = self.inner.write();
        match inner.ledger.release(pid, &release) {
            Ok(()) => {
                info!("Process {} released {}", pid, release);
                inner
                    .history
                    .push(OpKind::Release, pid, Some(release), None, None);
                Ok(())
            }
            Err(e) => {
                warn!("Rejected release {} by process {}: {}", release, pid, e);
                Err(e)
            }
        }
    }

    /// Serializable snapshot of the complete system state
    pub fn state(&self) -> StateSnapshot {
        StateSnapshot::capture(&self.inner.read().ledger)
    }

    /// Best-effort stuck-process report; see [`diagnostics::detect`]
    pub fn detect_deadlock(&self) -> DeadlockReport {
        diagnostics::detect(&self.inner.read().ledger)
    }

    /// Run a request sequence against a scratch copy of the ledger.
    ///
    /// Stops at the first rejection and captures a snapshot after every
    /// attempted step. The live ledger and the history log are untouched, so
    /// no rollback is ever needed after exploring a scenario.
    pub fn simulate(&self, steps: &[SimulationStep]) -> SimulationOutcome {
        let mut scratch = self.inner.read().ledger.clone();
        let mut outcomes = Vec::with_capacity(steps.len());

        for step in steps {
            let outcome = Self::admit(&mut scratch, step.pid, &step.request);
            let rejected = outcome.is_err();
            outcomes.push(StepOutcome {
                pid: step.pid,
                request: step.request.clone(),
                outcome,
                state_after: StateSnapshot::capture(&scratch),
            });
            if rejected {
                break;
            }
        }

        SimulationOutcome {
            steps: outcomes,
            final_state: StateSnapshot::capture(&scratch),
        }
    }

    /// Full audit trail, oldest first
    pub fn history(&self) -> Vec<HistoryRecord> {
        self.inner.read().history.records().to_vec()
    }

    /// The most recent `n` audit records, oldest first
    pub fn recent_history(&self, n: usize) -> Vec<HistoryRecord> {
        self.inner.read().history.recent(n).to_vec()
    }

    /// Grant/reject counters derived from the audit trail
    pub fn request_stats(&self) -> RequestStats {
        self.inner.read().history.stats()
    }

    /// The shared grant path: validate against `ledger`, apply to a private
    /// copy, gate on the safety check, and commit the copy on success.
    fn admit(
        ledger: &mut ResourceLedger,
        pid: Pid,
        request: &ResourceVector,
    ) -> WardenResult<Vec<Pid>> {
        let mut candidate = ledger.clone();
        candidate.grant(pid, request)?;

        let report = safety::check(&candidate);
        if !report.is_safe {
            return Err(WardenError::WouldCauseUnsafeState);
        }

        *ledger = candidate;
        Ok(report.safe_order)
    }
}
