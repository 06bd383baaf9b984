//! Availability-monitoring engine for service-status.
//!
//! A background [`Reconciler`](monitoring::Reconciler) probes every stored
//! target over TCP and writes availability transitions back to the
//! [`TargetStore`](database::TargetStore); the [`QueryService`](query::QueryService)
//! serves the stored state without probing.

pub mod config;
pub mod database;
pub mod monitoring;
pub mod pool;
pub mod query;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use database::{LibsqlTargetStore, ServiceTarget, StoreError, TargetStore};
pub use monitoring::{LoopState, Prober, Reconciler, ReconcilerHandle, TcpProber};
pub use query::{QueryError, QueryService, TargetStatus};
