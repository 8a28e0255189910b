/*!
 * Ledger Table
 * Insertion-ordered process table with invariant maintenance
 */

use super::process::ProcessEntry;
use super::vector::ResourceVector;
use crate::core::errors::WardenError;
use crate::core::types::{Pid, WardenResult};
use ahash::AHashMap;

/// The resource ledger: total/available vectors plus every registered process.
///
/// The hash table gives O(1) pid lookup; `order` keeps registration order,
/// which the safety scan's tie-break depends on. Mutating entry points are
/// crate-private so only the admission controller can reach them; public
/// accessors hand out clones, never internal storage.
#[derive(Debug, Clone)]
pub struct ResourceLedger {
    total: ResourceVector,
    available: ResourceVector,
    resource_names: Vec<String>,
    entries: AHashMap<Pid, ProcessEntry>,
    order: Vec<Pid>,
}

impl ResourceLedger {
    /// Create a ledger with generated resource names (`R0`, `R1`, ...)
    pub fn new(total: ResourceVector) -> Self {
        let names = (0..total.len()).map(|i| format!("R{}", i)).collect();
        Self::build(total, names)
    }

    /// Create a ledger with caller-supplied resource names
    pub fn with_names(total: ResourceVector, names: Vec<String>) -> WardenResult<Self> {
        if names.len() != total.len() {
            return Err(WardenError::DimensionMismatch {
                expected: total.len(),
                actual: names.len(),
            });
        }
        Ok(Self::build(total, names))
    }

    fn build(total: ResourceVector, resource_names: Vec<String>) -> Self {
        let available = total.clone();
        Self {
            total,
            available,
            resource_names,
            entries: AHashMap::new(),
            order: Vec::new(),
        }
    }

    /// Number of resource kinds tracked by this ledger
    pub fn kinds(&self) -> usize {
        self.total.len()
    }

    pub fn total(&self) -> ResourceVector {
        self.total.clone()
    }

    pub fn available(&self) -> ResourceVector {
        self.available.clone()
    }

    pub fn resource_names(&self) -> &[String] {
        &self.resource_names
    }

    /// Number of registered processes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, pid: Pid) -> bool {
        self.entries.contains_key(&pid)
    }

    pub fn process(&self, pid: Pid) -> Option<ProcessEntry> {
        self.entries.get(&pid).cloned()
    }

    /// All registered processes, cloned, in registration order
    pub fn processes(&self) -> Vec<ProcessEntry> {
        self.entries_in_order().cloned().collect()
    }

    pub(crate) fn entries_in_order(&self) -> impl Iterator<Item = &ProcessEntry> {
        self.order.iter().filter_map(|pid| self.entries.get(pid))
    }

    /// Register a process with zero allocation and `need = max`.
    ///
    /// Fails without mutation on dimension mismatch, per-kind capacity excess,
    /// or duplicate pid.
    pub fn add_process(
        &mut self,
        pid: Pid,
        name: impl Into<String>,
        max: ResourceVector,
    ) -> WardenResult<()> {
        if max.len() != self.total.len() {
            return Err(WardenError::DimensionMismatch {
                expected: self.total.len(),
                actual: max.len(),
            });
        }
        if let Some(i) = max.first_excess(&self.total) {
            return Err(WardenError::CapacityExceeded {
                resource: self.resource_names[i].clone(),
            });
        }
        if self.entries.contains_key(&pid) {
            return Err(WardenError::DuplicateProcessId(pid));
        }

        self.entries.insert(pid, ProcessEntry::new(pid, name.into(), max));
        self.order.push(pid);
        self.debug_assert_invariants();
        Ok(())
    }

    /// Deregister a process, folding its allocation back into `available`
    pub fn remove_process(&mut self, pid: Pid) -> WardenResult<ProcessEntry> {
        let entry = self
            .entries
            .remove(&pid)
            .ok_or(WardenError::ProcessNotFound(pid))?;
        self.available += &entry.allocated;
        self.order.retain(|p| *p != pid);
        self.debug_assert_invariants();
        Ok(entry)
    }

    /// Move `request` from `available` into the process's allocation.
    ///
    /// Validates fully before touching any vector; a returned error means the
    /// ledger is unchanged. Safety gating is the caller's job.
    pub(crate) fn grant(&mut self, pid: Pid, request: &ResourceVector) -> WardenResult<()> {
        let kinds = self.total.len();
        let entry = self
            .entries
            .get_mut(&pid)
            .ok_or(WardenError::ProcessNotFound(pid))?;
        if request.len() != kinds {
            return Err(WardenError::DimensionMismatch {
                expected: kinds,
                actual: request.len(),
            });
        }
        if let Some(i) = request.first_excess(&entry.need) {
            return Err(WardenError::ExceedsNeed {
                resource: self.resource_names[i].clone(),
            });
        }
        if let Some(i) = request.first_excess(&self.available) {
            return Err(WardenError::ExceedsAvailable {
                resource: self.resource_names[i].clone(),
            });
        }

        self.available -= request;
        entry.allocated += request;
        entry.need -= request;
        self.debug_assert_invariants();
        Ok(())
    }

    /// Return `release` from the process's allocation to `available`.
    ///
    /// Validates fully before touching any vector; always succeeds once
    /// validated.
    pub(crate) fn release(&mut self, pid: Pid, release: &ResourceVector) -> WardenResult<()> {
        let kinds = self.total.len();
        let entry = self
            .entries
            .get_mut(&pid)
            .ok_or(WardenError::ProcessNotFound(pid))?;
        if release.len() != kinds {
            return Err(WardenError::DimensionMismatch {
                expected: kinds,
                actual: release.len(),
            });
        }
        if let Some(i) = release.first_excess(&entry.allocated) {
            return Err(WardenError::ExceedsAllocated {
                resource: self.resource_names[i].clone(),
            });
        }

        self.available += release;
        entry.allocated -= release;
        entry.need += release;
        self.debug_assert_invariants();
        Ok(())
    }

    /// Invariant corruption is a programming defect, not a runtime error
    fn debug_assert_invariants(&self) {
        #[cfg(debug_assertions)]
        {
            let kinds = self.total.len();
            debug_assert_eq!(self.available.len(), kinds);
            let mut accounted = self.available.clone();
            for entry in self.entries_in_order() {
                debug_assert_eq!(entry.max.len(), kinds);
                debug_assert_eq!(entry.allocated.len(), kinds);
                debug_assert_eq!(entry.need.len(), kinds);
                for i in 0..kinds {
                    debug_assert_eq!(entry.need[i], entry.max[i] - entry.allocated[i]);
                    debug_assert!(entry.allocated[i] <= entry.max[i]);
                    debug_assert!(entry.max[i] <= self.total[i]);
                }
                accounted += &entry.allocated;
            }
            debug_assert_eq!(
                accounted, self.total,
                "available + sum of allocations must equal total"
            );
            debug_assert_eq!(self.order.len(), self.entries.len());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ledger() -> ResourceLedger {
        ResourceLedger::new(ResourceVector::from([10, 5, 7]))
    }

    #[test]
    fn test_new_ledger_fully_available() {
        let ledger = ledger();
        assert_eq!(ledger.total(), ledger.available());
        assert_eq!(ledger.resource_names(), ["R0", "R1", "R2"]);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_with_names_rejects_wrong_arity() {
        let err = ResourceLedger::with_names(
            ResourceVector::from([10, 5, 7]),
            vec!["CPU".to_string(), "Memory".to_string()],
        )
        .unwrap_err();
        assert_eq!(
            err,
            WardenError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_add_process() {
        let mut ledger = ledger();
        ledger.add_process(0, "P0", ResourceVector::from([7, 5, 3])).unwrap();

        let entry = ledger.process(0).unwrap();
        assert_eq!(entry.name, "P0");
        assert_eq!(entry.allocated, ResourceVector::zeros(3));
        assert_eq!(entry.need, ResourceVector::from([7, 5, 3]));
        // Registration alone allocates nothing
        assert_eq!(ledger.available(), ResourceVector::from([10, 5, 7]));
    }

    #[test]
    fn test_add_process_rejects_capacity_excess() {
        let mut ledger = ledger();
        let err = ledger
            .add_process(0, "P0", ResourceVector::from([15, 5, 3]))
            .unwrap_err();
        assert_eq!(
            err,
            WardenError::CapacityExceeded {
                resource: "R0".to_string()
            }
        );
        assert!(!ledger.contains(0));
    }

    #[test]
    fn test_add_process_rejects_wrong_dimensions() {
        let mut ledger = ledger();
        let err = ledger
            .add_process(0, "P0", ResourceVector::from([7, 5]))
            .unwrap_err();
        assert_eq!(
            err,
            WardenError::DimensionMismatch {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn test_add_process_rejects_duplicate_pid() {
        let mut ledger = ledger();
        ledger.add_process(0, "P0", ResourceVector::from([7, 5, 3])).unwrap();
        let err = ledger
            .add_process(0, "P0again", ResourceVector::from([1, 1, 1]))
            .unwrap_err();
        assert_eq!(err, WardenError::DuplicateProcessId(0));
    }

    #[test]
    fn test_grant_and_release_roundtrip() {
        let mut ledger = ledger();
        ledger.add_process(0, "P0", ResourceVector::from([7, 5, 3])).unwrap();

        ledger.grant(0, &ResourceVector::from([2, 2, 2])).unwrap();
        assert_eq!(ledger.available(), ResourceVector::from([8, 3, 5]));
        let entry = ledger.process(0).unwrap();
        assert_eq!(entry.allocated, ResourceVector::from([2, 2, 2]));
        assert_eq!(entry.need, ResourceVector::from([5, 3, 1]));

        ledger.release(0, &ResourceVector::from([1, 1, 1])).unwrap();
        assert_eq!(ledger.available(), ResourceVector::from([9, 4, 6]));
        let entry = ledger.process(0).unwrap();
        assert_eq!(entry.allocated, ResourceVector::from([1, 1, 1]));
        assert_eq!(entry.need, ResourceVector::from([6, 4, 2]));
    }

    #[test]
    fn test_grant_rejects_exceeds_need() {
        let mut ledger = ledger();
        ledger.add_process(0, "P0", ResourceVector::from([7, 5, 3])).unwrap();
        let err = ledger.grant(0, &ResourceVector::from([8, 0, 0])).unwrap_err();
        assert_eq!(
            err,
            WardenError::ExceedsNeed {
                resource: "R0".to_string()
            }
        );
    }

    #[test]
    fn test_release_rejects_exceeds_allocated() {
        let mut ledger = ledger();
        ledger.add_process(0, "P0", ResourceVector::from([7, 5, 3])).unwrap();
        ledger.grant(0, &ResourceVector::from([2, 2, 2])).unwrap();
        let err = ledger
            .release(0, &ResourceVector::from([3, 0, 0]))
            .unwrap_err();
        assert_eq!(
            err,
            WardenError::ExceedsAllocated {
                resource: "R0".to_string()
            }
        );
    }

    #[test]
    fn test_remove_process_returns_allocation() {
        let mut ledger = ledger();
        ledger.add_process(0, "P0", ResourceVector::from([7, 5, 3])).unwrap();
        ledger.grant(0, &ResourceVector::from([2, 2, 2])).unwrap();

        let entry = ledger.remove_process(0).unwrap();
        assert_eq!(entry.allocated, ResourceVector::from([2, 2, 2]));
        assert_eq!(ledger.available(), ResourceVector::from([10, 5, 7]));
        assert!(!ledger.contains(0));
    }

    #[test]
    fn test_remove_unknown_process() {
        let mut ledger = ledger();
        assert_eq!(
            ledger.remove_process(99).unwrap_err(),
            WardenError::ProcessNotFound(99)
        );
    }

    #[test]
    fn test_processes_preserve_registration_order() {
        let mut ledger = ledger();
        for pid in [3, 1, 2] {
            ledger
                .add_process(pid, format!("P{}", pid), ResourceVector::from([1, 1, 1]))
                .unwrap();
        }
        let pids: Vec<_> = ledger.processes().iter().map(|p| p.pid).collect();
        assert_eq!(pids, vec![3, 1, 2]);

        ledger.remove_process(1).unwrap();
        let pids: Vec<_> = ledger.processes().iter().map(|p| p.pid).collect();
        assert_eq!(pids, vec![3, 2]);
    }
}
