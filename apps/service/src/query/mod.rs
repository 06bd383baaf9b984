//! Read-only lookups of last-known target availability.
//!
//! Queries never probe; they return whatever the reconciliation loop last
//! stored, which can be up to one interval stale.

pub mod validation;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::database::{ServiceTarget, StoreError, TargetStore};

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no matching records")]
    NotFound,

    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] StoreError),
}

/// Wire representation of a target's status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetStatus {
    pub ip: String,
    pub port: u16,
    pub available: bool,
}

impl From<ServiceTarget> for TargetStatus {
    fn from(target: ServiceTarget) -> Self {
        Self { ip: target.ip, port: target.port, available: target.available }
    }
}

#[derive(Clone)]
pub struct QueryService {
    store: Arc<dyn TargetStore>,
}

impl QueryService {
    pub fn new(store: Arc<dyn TargetStore>) -> Self {
        Self { store }
    }

    /// All records for `ip`, in store order
    pub async fn get_by_ip(&self, ip: &str) -> Result<Vec<TargetStatus>, QueryError> {
        validation::parse_ip(ip)?;

        let targets = self.store.find_by_ip(ip).await?;
        into_statuses(targets)
    }

    /// All records for `ip` on exactly `port`
    pub async fn get_by_ip_port(&self, ip: &str, port: &str) -> Result<Vec<TargetStatus>, QueryError> {
        validation::parse_ip(ip)?;
        let port = validation::parse_port(port)?;

        let targets = self
            .store
            .find_by_ip_port(ip, port)
            .await?
            .into_iter()
            .filter(|target| target.port == port)
            .collect();
        into_statuses(targets)
    }
}

fn into_statuses(targets: Vec<ServiceTarget>) -> Result<Vec<TargetStatus>, QueryError> {
    if targets.is_empty() {
        return Err(QueryError::NotFound);
    }
    Ok(targets.into_iter().map(TargetStatus::from).collect())
}
