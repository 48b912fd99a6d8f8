//! # Blob Partitioner
//!
//! Deterministic sharding of cached content across several independent blob
//! storage accounts.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Give callers one logical cache keyed by `(id, filename)` while spreading
//! containers over many accounts:
//! - Topology from `account1:key1;account2:key2;...`, order preserved
//! - Hex-mod-n partitioning of UUID-shaped identifiers
//! - Sequential, write-once initialization of shard connections
//! - Create-if-absent containers per identifier
//!
//! ## Routing
//!
//! | Step | Input | Output |
//! |------|-------|--------|
//! | Parse | `"s0:k0;s1:k1;s2:k2"` | `Topology` of 3 descriptors |
//! | Partition | `id`, shard count | `hex(id without '-') % n` |
//! | Resolve | shard index | `ShardConnection` at that index |
//!
//! Changing the number of shards remaps almost every identifier. There is no
//! rebalancing; a topology change needs an out-of-band data migration.
//!
//! ## Module Structure
//!
//! ```text
//! blob-partitioner/
//! ├── domain/          # Descriptors, topology, errors, invariants
//! ├── algorithms/      # Topology parser, partition function
//! ├── ports/           # Cache API + backing store traits
//! ├── adapters/        # In-memory backing store
//! ├── service/         # Registry, container cache, facade
//! ├── config.rs        # Environment configuration
//! └── telemetry.rs     # Log subscriber setup
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use blob_partitioner::{InMemoryConnector, ShardedCache, ShardedCacheApi};
//!
//! let cache = ShardedCache::from_storages("s0:k0;s1:k1;s2:k2", InMemoryConnector::new())?;
//! cache.initialize().await?;
//!
//! cache.store("my content".into(), "test_file.txt", &id).await?;
//! let content = cache.load_string("test_file.txt", &id).await?;
//! cache.delete(&id).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;
pub mod telemetry;

// Re-exports
pub use adapters::{InMemoryClient, InMemoryConnector};
pub use algorithms::{parse_topology, partition_index, partition_uuid};
pub use config::PartitionerConfig;
pub use domain::{
    invariant_connection_order, invariant_deterministic_partition, invariant_partition_in_range,
    DeleteAck, ShardDescriptor, ShardError, ShardIndex, ShardRoute, Topology, WriteAck,
    MIN_SHARD_COUNT,
};
pub use ports::{ContainerClient, ObjectBody, ShardedCacheApi, StorageConnector};
pub use service::{ContainerCache, ShardConnection, ShardRegistry, ShardedCache};
pub use telemetry::{init_logging, TelemetryError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
    }
}
