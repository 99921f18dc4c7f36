//! Persistence abstraction layer
//!
//! Provides a unified interface over PostgreSQL and in-memory storage.

use async_trait::async_trait;

use crate::types::{NewOwner, NewProperty, Owner, Property};
use crate::Result;

pub mod memory;
pub mod postgres;

/// Store backend trait
///
/// One method per operation the API performs: list-all and single-row insert
/// for each resource, plus a connectivity probe for the health endpoint.
#[async_trait]
pub trait Store: Send + Sync {
    /// All stored properties in insertion order
    async fn list_properties(&self) -> Result<Vec<Property>>;

    /// Insert one validated property
    async fn insert_property(&self, property: &NewProperty) -> Result<()>;

    /// All stored owners in insertion order
    async fn list_owners(&self) -> Result<Vec<Owner>>;

    /// Insert one validated owner
    async fn insert_owner(&self, owner: &NewOwner) -> Result<()>;

    /// Cheap round-trip to verify the backend is reachable
    async fn ping(&self) -> Result<()>;
}

/// Store configuration
#[derive(Debug, Clone)]
pub enum StoreConfig {
    Postgres {
        url: String,
        max_connections: u32,
        acquire_timeout_secs: u64,
    },
    Memory,
}

/// Create a store backend from config
pub async fn create_store(config: StoreConfig) -> Result<Box<dyn Store>> {
    match config {
        StoreConfig::Postgres {
            url,
            max_connections,
            acquire_timeout_secs,
        } => {
            let backend =
                postgres::PostgresStore::connect(&url, max_connections, acquire_timeout_secs)
                    .await?;
            Ok(Box::new(backend))
        }
        StoreConfig::Memory => {
            tracing::info!("Using in-memory store; records will not survive restarts");
            Ok(Box::new(memory::MemoryStore::new()))
        }
    }
}
