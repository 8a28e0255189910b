/*!
 * Resource Ledger
 * Total/available accounting and per-process allocation state
 */

mod process;
mod table;
mod vector;

pub use process::ProcessEntry;
pub use table::ResourceLedger;
pub use vector::ResourceVector;
