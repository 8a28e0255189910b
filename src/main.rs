/*!
 * Resource Warden - Demo Entry Point
 *
 * Walks the textbook cluster through a grant/release/diagnose cycle and
 * exports the final state snapshot as JSON.
 */

use log::{info, warn};
use resource_warden::{demo, ResourceVector, SimulationStep};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Resource warden starting...");
    info!("================================================");

    let warden = demo::example_cluster();

    let state = warden.state();
    info!(
        "System state: {}",
        if state.is_safe { "SAFE" } else { "UNSAFE" }
    );
    info!("Completion order: {:?}", state.safe_order);
    for row in &state.utilization {
        info!(
            "  {}: {}/{} used ({:.0}%)",
            row.name, row.used, row.total, row.percent
        );
    }

    // What-if exploration first; the live ledger stays untouched
    let plan = [
        SimulationStep::new(1, ResourceVector::from([1, 0, 2])),
        SimulationStep::new(4, ResourceVector::from([4, 3, 1])),
    ];
    let outcome = warden.simulate(&plan);
    info!(
        "Simulated {} of {} planned requests; all granted: {}",
        outcome.steps.len(),
        plan.len(),
        outcome.all_granted()
    );

    // Now for real
    match warden.request_resources(1, ResourceVector::from([1, 0, 2])) {
        Ok(order) => info!("Granted [1, 0, 2] to Database; completion order {:?}", order),
        Err(e) => warn!("Database request denied: {}", e),
    }
    warden.release_resources(2, ResourceVector::from([1, 0, 0]))?;

    let deadlock = warden.detect_deadlock();
    info!(
        "Deadlock check: deadlocked={}, stuck={:?}",
        deadlock.is_deadlock, deadlock.stuck
    );

    let stats = warden.request_stats();
    info!(
        "Requests: {} granted, {} rejected ({:.0}% success)",
        stats.granted,
        stats.rejected,
        stats.success_rate() * 100.0
    );

    let snapshot = warden.state().to_json_pretty()?;
    if let Ok(path) = std::env::var("WARDEN_EXPORT_PATH") {
        std::fs::write(&path, &snapshot)?;
        info!("Exported snapshot to {}", path);
    } else {
        println!("{}", snapshot);
    }

    Ok(())
}
