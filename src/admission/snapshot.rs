/*!
 * State Snapshot
 * Serializable view of the ledger for dashboards and export
 */

use crate::core::types::Pid;
use crate::ledger::{ProcessEntry, ResourceLedger, ResourceVector};
use crate::safety;
use serde::{Deserialize, Serialize};

/// Complete system state at one point in time.
///
/// Field names are stable: collaborators persist and re-import this record,
/// so renames are breaking changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub total: ResourceVector,
    pub available: ResourceVector,
    pub resource_names: Vec<String>,
    pub processes: Vec<ProcessSnapshot>,
    pub is_safe: bool,
    pub safe_order: Vec<Pid>,
    pub utilization: Vec<ResourceUtilization>,
}

/// Per-process row of a snapshot, in registration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSnapshot {
    pub pid: Pid,
    pub name: String,
    pub max: ResourceVector,
    pub allocated: ResourceVector,
    pub need: ResourceVector,
}

impl From<&ProcessEntry> for ProcessSnapshot {
    fn from(entry: &ProcessEntry) -> Self {
        Self {
            pid: entry.pid,
            name: entry.name.clone(),
            max: entry.max.clone(),
            allocated: entry.allocated.clone(),
            need: entry.need.clone(),
        }
    }
}

/// Per-kind usage summary for dashboards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceUtilization {
    pub name: String,
    pub total: u64,
    pub used: u64,
    pub available: u64,
    pub percent: f64,
}

impl StateSnapshot {
    pub(crate) fn capture(ledger: &ResourceLedger) -> Self {
        let report = safety::check(ledger);
        let total = ledger.total();
        let available = ledger.available();

        let utilization = ledger
            .resource_names()
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let used = total[i] - available[i];
                ResourceUtilization {
                    name: name.clone(),
                    total: total[i],
                    used,
                    available: available[i],
                    percent: if total[i] > 0 {
                        used as f64 / total[i] as f64 * 100.0
                    } else {
                        0.0
                    },
                }
            })
            .collect();

        Self {
            total,
            available,
            resource_names: ledger.resource_names().to_vec(),
            processes: ledger.entries_in_order().map(ProcessSnapshot::from).collect(),
            is_safe: report.is_safe,
            safe_order: report.safe_order,
            utilization,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> StateSnapshot {
        let mut ledger = ResourceLedger::with_names(
            ResourceVector::from([10, 5, 7]),
            vec!["CPU".to_string(), "Memory".to_string(), "Disk".to_string()],
        )
        .unwrap();
        ledger.add_process(0, "P0", ResourceVector::from([7, 5, 3])).unwrap();
        ledger.grant(0, &ResourceVector::from([2, 2, 2])).unwrap();
        StateSnapshot::capture(&ledger)
    }

    #[test]
    fn test_capture_reflects_ledger() {
        let snap = snapshot();
        assert_eq!(snap.total, ResourceVector::from([10, 5, 7]));
        assert_eq!(snap.available, ResourceVector::from([8, 3, 5]));
        assert!(snap.is_safe);
        assert_eq!(snap.safe_order, vec![0]);
        assert_eq!(snap.processes.len(), 1);
        assert_eq!(snap.processes[0].need, ResourceVector::from([5, 3, 1]));
    }

    #[test]
    fn test_utilization_rows() {
        let snap = snapshot();
        let cpu = &snap.utilization[0];
        assert_eq!(cpu.name, "CPU");
        assert_eq!(cpu.used, 2);
        assert_eq!(cpu.available, 8);
        assert!((cpu.percent - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_json_field_names_are_stable() {
        let json = snapshot().to_json().unwrap();
        for field in [
            "\"total\"",
            "\"available\"",
            "\"resource_names\"",
            "\"processes\"",
            "\"is_safe\"",
            "\"safe_order\"",
            "\"utilization\"",
        ] {
            assert!(json.contains(field), "missing {} in {}", field, json);
        }
    }

    #[test]
    fn test_json_roundtrip() {
        let snap = snapshot();
        let back: StateSnapshot = serde_json::from_str(&snap.to_json().unwrap()).unwrap();
        assert_eq!(back, snap);
    }
}
