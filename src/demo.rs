/*!
 * Example Cluster
 * The five-job textbook instance used by the demo binary and tests
 */

use crate::admission::AdmissionController;
use crate::ledger::ResourceVector;

/// Build the textbook cluster: pool `[10, 5, 7]` of CPU/Memory/Disk, five
/// jobs with their declared maxima, and the standard initial grants. The
/// resulting state is safe.
pub fn example_cluster() -> AdmissionController {
    let warden = AdmissionController::with_names(
        ResourceVector::from([10, 5, 7]),
        vec!["CPU".to_string(), "Memory".to_string(), "Disk".to_string()],
    )
    .expect("name arity matches the pool");

    let jobs: [(u32, &str, [u64; 3], [u64; 3]); 5] = [
        (0, "WebServer", [7, 5, 3], [0, 1, 0]),
        (1, "Database", [3, 2, 2], [2, 0, 0]),
        (2, "Cache", [9, 0, 2], [3, 0, 2]),
        (3, "Worker", [2, 2, 2], [2, 1, 1]),
        (4, "Monitor", [4, 3, 3], [0, 0, 2]),
    ];

    for (pid, name, max, _) in &jobs {
        warden
            .add_process(*pid, *name, ResourceVector::from(*max))
            .expect("example pids are fresh");
    }
    for (pid, _, _, initial) in &jobs {
        warden
            .request_resources(*pid, ResourceVector::from(*initial))
            .expect("the textbook allocation is safe");
    }

    warden
}
