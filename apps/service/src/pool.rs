use anyhow::{Context, Result};
use deadpool::managed::{self, Pool, PoolConfig, RecycleError, RecycleResult};
use libsql::{Builder, Connection, Database, Error as LibsqlError};
use tracing::info;

use crate::config::DatabaseConfig;

pub struct LibsqlManager {
    database: Database,
}

impl LibsqlManager {
    pub fn new(database: Database) -> Self {
        Self { database }
    }
}

impl managed::Manager for LibsqlManager {
    type Type = Connection;
    type Error = LibsqlError;

    async fn create(&self) -> Result<Self::Type, Self::Error> {
        self.database.connect()
    }

    async fn recycle(
        &self,
        conn: &mut Self::Type,
        _: &managed::Metrics,
    ) -> RecycleResult<Self::Error> {
        conn.query("SELECT 1", ())
            .await?
            .next()
            .await?
            .ok_or_else(|| RecycleError::Message("liveness query returned no rows".into()))?;
        Ok(())
    }
}

pub type LibsqlPool = Pool<LibsqlManager>;

/// Open the configured database and wrap it in a connection pool.
pub async fn connect_pool(config: &DatabaseConfig) -> Result<LibsqlPool> {
    let database = match (&config.url, &config.auth_token) {
        (Some(url), token) => {
            info!("Connecting to remote database at {}", url);
            Builder::new_remote(url.clone(), token.clone().unwrap_or_default())
                .build()
                .await
                .with_context(|| format!("failed to connect to remote database {url}"))?
        }
        (None, _) => {
            info!("Opening local database {}", config.path.display());
            Builder::new_local(&config.path)
                .build()
                .await
                .with_context(|| format!("failed to open database {}", config.path.display()))?
        }
    };

    let pool = Pool::builder(LibsqlManager::new(database))
        .config(PoolConfig::new(config.max_connections.max(1)))
        .build()
        .context("failed to build connection pool")?;

    Ok(pool)
}
