//! # Sharded Cache Service
//!
//! The facade implementing [`ShardedCacheApi`].
//!
//! ## Architecture
//!
//! This service:
//! 1. Parses the topology up front, before any network activity
//! 2. Opens shard connections once, in order, on `initialize`
//! 3. Resolves the owning shard on every call and runs the container
//!    operation against it

mod container_cache;
mod registry;

pub use container_cache::ContainerCache;
pub use registry::{ShardConnection, ShardRegistry};

use crate::algorithms::parse_topology;
use crate::config::PartitionerConfig;
use crate::domain::{DeleteAck, ShardError, ShardRoute, Topology, WriteAck};
use crate::ports::inbound::ShardedCacheApi;
use crate::ports::outbound::StorageConnector;
use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::OnceCell;

/// Sharded cache over a fixed set of storage accounts.
///
/// The registry is filled once by `initialize` and only read afterwards.
pub struct ShardedCache<S: StorageConnector> {
    topology: Topology,
    connector: S,
    registry: OnceCell<ShardRegistry<S::Client>>,
}

impl<S: StorageConnector> ShardedCache<S> {
    /// Create a cache for an already parsed topology.
    pub fn new(topology: Topology, connector: S) -> Self {
        Self {
            topology,
            connector,
            registry: OnceCell::new(),
        }
    }

    /// Create a cache from an `account:key;account:key` string.
    pub fn from_storages(storages: &str, connector: S) -> Result<Self, ShardError> {
        Ok(Self::new(parse_topology(storages)?, connector))
    }

    /// Create a cache from loaded configuration.
    pub fn from_config(config: &PartitionerConfig, connector: S) -> Result<Self, ShardError> {
        Ok(Self::new(config.topology()?, connector))
    }

    /// The topology this cache routes over.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    /// The backing store connector.
    pub fn connector(&self) -> &S {
        &self.connector
    }

    /// Whether `initialize` has completed.
    pub fn is_initialized(&self) -> bool {
        self.registry.initialized()
    }

    /// The shard registry, once initialized.
    pub fn registry(&self) -> Result<&ShardRegistry<S::Client>, ShardError> {
        self.registry.get().ok_or(ShardError::NotInitialized)
    }

    fn shard_for(&self, id: &str) -> Result<&ShardConnection<S::Client>, ShardError> {
        self.registry()?.resolve(id)
    }
}

#[async_trait]
impl<S: StorageConnector> ShardedCacheApi for ShardedCache<S> {
    async fn initialize(&self) -> Result<(), ShardError> {
        self.registry
            .get_or_try_init(|| ShardRegistry::initialize(&self.topology, &self.connector))
            .await?;
        Ok(())
    }

    async fn store(&self, content: Bytes, filename: &str, id: &str) -> Result<WriteAck, ShardError> {
        self.shard_for(id)?
            .containers()
            .store(id, filename, content)
            .await
    }

    async fn load(&self, filename: &str, id: &str) -> Result<Bytes, ShardError> {
        self.shard_for(id)?.containers().load(id, filename).await
    }

    async fn load_string(&self, filename: &str, id: &str) -> Result<String, ShardError> {
        self.shard_for(id)?
            .containers()
            .load_string(id, filename)
            .await
    }

    async fn delete(&self, id: &str) -> Result<DeleteAck, ShardError> {
        self.shard_for(id)?.containers().delete(id).await
    }

    fn route(&self, id: &str) -> Result<ShardRoute, ShardError> {
        self.topology.route(id)
    }

    fn shard_count(&self) -> usize {
        self.topology.len()
    }
}
