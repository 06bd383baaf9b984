use async_trait::async_trait;
use libsql::params;
use thiserror::Error;
use tracing::debug;

use super::models::ServiceTarget;
use crate::pool::{LibsqlManager, LibsqlPool};

const SELECT_TARGETS: &str = "SELECT id, ip, port, available FROM service_targets";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database query failed: {0}")]
    Query(#[from] libsql::Error),

    #[error("database connection unavailable: {0}")]
    Pool(#[from] deadpool::managed::PoolError<libsql::Error>),
}

/// Durable table of monitored targets.
///
/// Every call goes to the backend; nothing is cached between calls.
#[async_trait]
pub trait TargetStore: Send + Sync {
    /// Every stored target, in no particular order
    async fn list_all(&self) -> Result<Vec<ServiceTarget>, StoreError>;

    /// All targets with the given ip, empty when none match
    async fn find_by_ip(&self, ip: &str) -> Result<Vec<ServiceTarget>, StoreError>;

    /// All targets matching both ip and port
    async fn find_by_ip_port(&self, ip: &str, port: u16) -> Result<Vec<ServiceTarget>, StoreError>;

    /// Set `available` for the row with `id`. A missing row is not an error.
    async fn update_availability(&self, id: i64, available: bool) -> Result<(), StoreError>;
}

/// LibSQL-backed target store
pub struct LibsqlTargetStore {
    pool: LibsqlPool,
}

impl LibsqlTargetStore {
    /// Create a new store from a pool
    pub fn new_from_pool(pool: LibsqlPool) -> Self {
        Self { pool }
    }

    /// Get a connection from the pool; it goes back when the guard drops.
    async fn get_conn(&self) -> Result<deadpool::managed::Object<LibsqlManager>, StoreError> {
        Ok(self.pool.get().await?)
    }

    async fn query_targets(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<Vec<ServiceTarget>, StoreError> {
        let conn = self.get_conn().await?;
        let mut rows = conn.query(sql, params).await?;
        let mut targets = Vec::new();

        while let Some(row) = rows.next().await? {
            if let Some(target) = ServiceTarget::from_row(&row)? {
                targets.push(target);
            }
        }

        Ok(targets)
    }

    /// Provision a target row. Targets are normally provisioned by external
    /// tooling; the monitor itself never inserts.
    pub async fn insert_target(&self, ip: &str, port: u16, available: bool) -> Result<i64, StoreError> {
        let conn = self.get_conn().await?;
        conn.execute(
            "INSERT INTO service_targets (ip, port, available) VALUES (?, ?, ?)",
            params![ip, port as i64, available as i64],
        )
        .await?;

        Ok(conn.last_insert_rowid())
    }
}

#[async_trait]
impl TargetStore for LibsqlTargetStore {
    async fn list_all(&self) -> Result<Vec<ServiceTarget>, StoreError> {
        self.query_targets(SELECT_TARGETS, ()).await
    }

    async fn find_by_ip(&self, ip: &str) -> Result<Vec<ServiceTarget>, StoreError> {
        self.query_targets(&format!("{SELECT_TARGETS} WHERE ip = ? ORDER BY id"), params![ip])
            .await
    }

    async fn find_by_ip_port(&self, ip: &str, port: u16) -> Result<Vec<ServiceTarget>, StoreError> {
        self.query_targets(
            &format!("{SELECT_TARGETS} WHERE ip = ? AND port = ? ORDER BY id"),
            params![ip, port as i64],
        )
        .await
    }

    async fn update_availability(&self, id: i64, available: bool) -> Result<(), StoreError> {
        let conn = self.get_conn().await?;
        let changed = conn
            .execute(
                "UPDATE service_targets SET available = ? WHERE id = ?",
                params![available as i64, id],
            )
            .await?;

        if changed == 0 {
            debug!(id, "Availability update matched no row");
        }

        Ok(())
    }
}
