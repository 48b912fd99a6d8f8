//! # Inbound Ports
//!
//! API trait defining what the sharded cache can do.

use crate::domain::{DeleteAck, ShardError, ShardRoute, WriteAck};
use async_trait::async_trait;
use bytes::Bytes;

/// Sharded cache API - inbound port.
///
/// Every operation resolves its shard once, from the identifier, and never
/// reuses a resolution across calls.
#[async_trait]
pub trait ShardedCacheApi: Send + Sync {
    /// Connect to every shard, in topology order. Idempotent.
    async fn initialize(&self) -> Result<(), ShardError>;

    /// Store `content` as `filename` under `id`, creating the container if
    /// needed.
    async fn store(&self, content: Bytes, filename: &str, id: &str) -> Result<WriteAck, ShardError>;

    /// Load `filename` under `id`, fully buffered.
    async fn load(&self, filename: &str, id: &str) -> Result<Bytes, ShardError>;

    /// Load `filename` under `id` as UTF-8 text.
    async fn load_string(&self, filename: &str, id: &str) -> Result<String, ShardError>;

    /// Delete everything stored under `id`.
    async fn delete(&self, id: &str) -> Result<DeleteAck, ShardError>;

    /// Shard that owns `id`. No network activity.
    fn route(&self, id: &str) -> Result<ShardRoute, ShardError>;

    /// Number of shards in the topology.
    fn shard_count(&self) -> usize;
}
