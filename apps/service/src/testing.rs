//! Shared test fixtures: temporary libsql databases plus in-memory store and
//! prober doubles.

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use deadpool::managed::PoolError;
use tempfile::{TempDir, tempdir};

use crate::config::DatabaseConfig;
use crate::database::{LibsqlTargetStore, ServiceTarget, StoreError, TargetStore, initialize_database};
use crate::monitoring::Prober;
use crate::pool::{LibsqlPool, connect_pool};

/// Migrated database in a temp dir. Keep the `TempDir` alive for the test.
pub async fn create_test_pool() -> Result<(LibsqlPool, TempDir)> {
    let dir = tempdir()?;
    let config = DatabaseConfig {
        path: dir.path().join("test.db"),
        max_connections: 4,
        ..DatabaseConfig::default()
    };

    let pool = connect_pool(&config).await?;
    {
        let conn = pool.get().await?;
        initialize_database(&conn).await?;
    }

    Ok((pool, dir))
}

pub async fn create_test_store() -> Result<(LibsqlTargetStore, TempDir)> {
    let (pool, dir) = create_test_pool().await?;
    Ok((LibsqlTargetStore::new_from_pool(pool), dir))
}

fn unavailable() -> StoreError {
    StoreError::Pool(PoolError::Closed)
}

/// In-memory `TargetStore` with call counters and failure switches.
/// Ids are assigned from 1 in insertion order.
#[derive(Default)]
pub struct MemoryStore {
    targets: Mutex<Vec<ServiceTarget>>,
    reads: AtomicUsize,
    writes: AtomicUsize,
    fail_listing: AtomicBool,
    fail_reads: AtomicBool,
    failing_ids: Mutex<HashSet<i64>>,
}

impl MemoryStore {
    pub fn with_targets(rows: &[(&str, u16, bool)]) -> Self {
        let targets = rows
            .iter()
            .zip(1..)
            .map(|(&(ip, port, available), id)| ServiceTarget { id, ip: ip.into(), port, available })
            .collect();

        Self { targets: Mutex::new(targets), ..Self::default() }
    }

    pub fn target(&self, id: i64) -> ServiceTarget {
        self.targets
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .expect("no such target")
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn set_fail_listing(&self, fail: bool) {
        self.fail_listing.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_updates_for(&self, id: i64) {
        self.failing_ids.lock().unwrap().insert(id);
    }

    fn select(&self, keep: impl Fn(&ServiceTarget) -> bool) -> Result<Vec<ServiceTarget>, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        Ok(self.targets.lock().unwrap().iter().filter(|t| keep(*t)).cloned().collect())
    }
}

#[async_trait]
impl TargetStore for MemoryStore {
    async fn list_all(&self) -> Result<Vec<ServiceTarget>, StoreError> {
        if self.fail_listing.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.select(|_| true)
    }

    async fn find_by_ip(&self, ip: &str) -> Result<Vec<ServiceTarget>, StoreError> {
        self.select(|t| t.ip == ip)
    }

    async fn find_by_ip_port(&self, ip: &str, port: u16) -> Result<Vec<ServiceTarget>, StoreError> {
        self.select(|t| t.ip == ip && t.port == port)
    }

    async fn update_availability(&self, id: i64, available: bool) -> Result<(), StoreError> {
        if self.failing_ids.lock().unwrap().contains(&id) {
            return Err(unavailable());
        }
        self.writes.fetch_add(1, Ordering::SeqCst);
        if let Some(target) = self.targets.lock().unwrap().iter_mut().find(|t| t.id == id) {
            target.available = available;
        }
        Ok(())
    }
}

/// Prober answering from a fixed reachable set, optionally after a delay.
#[derive(Default)]
pub struct ScriptedProber {
    reachable: Mutex<HashSet<(String, u16)>>,
    calls: AtomicUsize,
    delay: Option<Duration>,
}

impl ScriptedProber {
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay: Some(delay), ..Self::default() }
    }

    pub fn set_reachable(&self, ip: &str, port: u16, reachable: bool) {
        let mut set = self.reachable.lock().unwrap();
        if reachable {
            set.insert((ip.to_string(), port));
        } else {
            set.remove(&(ip.to_string(), port));
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Prober for ScriptedProber {
    async fn probe(&self, ip: &str, port: u16) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.reachable.lock().unwrap().contains(&(ip.to_string(), port))
    }
}
