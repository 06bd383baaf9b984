/// Monitoring engine module - keeps stored availability in line with reality
///
/// This module is responsible for:
/// - Probing TCP reachability of a single target
/// - Running the reconciliation loop that writes availability transitions
pub mod checker;
pub mod scheduler;
pub mod types;

pub use checker::{Prober, TcpProber};
pub use scheduler::{Reconciler, ReconcilerHandle};
pub use types::{CycleReport, LoopState};
