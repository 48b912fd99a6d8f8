//! # Outbound Ports
//!
//! The backing store capability set. Transport, authentication, TLS and
//! retries live behind these traits; the core only routes.

use crate::domain::{DeleteAck, ShardDescriptor, ShardError, WriteAck};
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

/// Object content as delivered by the backing store, chunk by chunk.
pub type ObjectBody = BoxStream<'static, Result<Bytes, ShardError>>;

/// Opens one client per storage account.
#[async_trait]
pub trait StorageConnector: Send + Sync {
    /// Client handle for a single account.
    type Client: ContainerClient;

    /// Connect to the account described by `descriptor`.
    ///
    /// Fails with [`ShardError::Auth`] on rejected credentials and
    /// [`ShardError::Connection`] on an unreachable endpoint.
    async fn connect(&self, descriptor: &ShardDescriptor) -> Result<Self::Client, ShardError>;
}

/// Container and object operations against one account.
#[async_trait]
pub trait ContainerClient: Send + Sync {
    /// Create `container`.
    ///
    /// May answer [`ShardError::ContainerExists`] if it is already there;
    /// callers treat that as success.
    async fn ensure_container(&self, container: &str) -> Result<(), ShardError>;

    /// Write `content` as `object`, replacing any previous object.
    async fn write_object(
        &self,
        container: &str,
        object: &str,
        content: Bytes,
    ) -> Result<WriteAck, ShardError>;

    /// Open `object` for reading.
    async fn read_object(&self, container: &str, object: &str) -> Result<ObjectBody, ShardError>;

    /// Delete `container` together with every object in it.
    async fn delete_container(&self, container: &str) -> Result<DeleteAck, ShardError>;
}
