/// Database abstraction layer
///
/// The `TargetStore` trait is what the monitor and the query path depend on;
/// `LibsqlTargetStore` implements it over a pooled LibSQL database.
pub mod migrations;
pub mod models;
pub mod repository;

pub use models::ServiceTarget;
pub use repository::{LibsqlTargetStore, StoreError, TargetStore};

use anyhow::Result;

/// Initialize database with schema
pub async fn initialize_database(conn: &libsql::Connection) -> Result<()> {
    migrations::run_migrations(conn).await
}
