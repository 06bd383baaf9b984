use std::sync::Arc;

use actix_web::web;
use service_status::database::initialize_database;
use service_status::pool::{LibsqlPool, connect_pool};
use service_status::config::DatabaseConfig;
use service_status::{Config, LibsqlTargetStore, TargetStore};
use tempfile::{TempDir, tempdir};

use crate::context::AppContext;

/// Migrated temp database seeded with `rows`
pub async fn test_store(rows: &[(&str, u16, bool)]) -> (Arc<dyn TargetStore>, LibsqlPool, TempDir) {
    let dir = tempdir().unwrap();
    let config = DatabaseConfig { path: dir.path().join("server.db"), ..DatabaseConfig::default() };
    let pool = connect_pool(&config).await.unwrap();
    initialize_database(&pool.get().await.unwrap()).await.unwrap();

    let store = LibsqlTargetStore::new_from_pool(pool.clone());
    for &(ip, port, available) in rows {
        store.insert_target(ip, port, available).await.unwrap();
    }

    (Arc::new(store), pool, dir)
}

pub async fn test_context(rows: &[(&str, u16, bool)]) -> (web::Data<AppContext>, LibsqlPool, TempDir) {
    let (store, pool, dir) = test_store(rows).await;
    (web::Data::new(AppContext::new(Config::default(), store)), pool, dir)
}
