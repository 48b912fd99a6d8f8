//! # Container Cache
//!
//! Create-if-absent, write, read and delete against one shard. The
//! identifier names the container, the filename names the object.

use super::registry::ShardConnection;
use crate::domain::{DeleteAck, ShardError, ShardIndex, WriteAck};
use crate::ports::outbound::ContainerClient;
use bytes::{Bytes, BytesMut};
use futures::TryStreamExt;
use tracing::{debug, warn};

/// Container operations bound to one shard connection.
pub struct ContainerCache<'a, C> {
    shard: &'a ShardConnection<C>,
}

impl<'a, C: ContainerClient> ContainerCache<'a, C> {
    pub(crate) fn new(shard: &'a ShardConnection<C>) -> Self {
        Self { shard }
    }

    /// Shard these operations run against.
    pub fn shard_index(&self) -> ShardIndex {
        self.shard.index()
    }

    /// Ensure container `id` exists, then write `content` as `filename`.
    ///
    /// An existing container is accepted silently. Any other failure is
    /// returned unchanged and nothing is retried.
    pub async fn store(&self, id: &str, filename: &str, content: Bytes) -> Result<WriteAck, ShardError> {
        let client = self.shard.client();

        match client.ensure_container(id).await {
            Ok(()) => debug!(
                "[partitioner] Created container {} on shard {}",
                id,
                self.shard.index()
            ),
            Err(ShardError::ContainerExists(_)) => {}
            Err(e) => return Err(self.surface("ensure_container", e)),
        }

        let ack = client
            .write_object(id, filename, content)
            .await
            .map_err(|e| self.surface("write_object", e))?;

        debug!(
            "[partitioner] Stored {}/{} ({} bytes) on shard {}",
            id,
            filename,
            ack.content_length,
            self.shard.index()
        );
        Ok(ack)
    }

    /// Read `filename` from container `id` fully into memory.
    pub async fn load(&self, id: &str, filename: &str) -> Result<Bytes, ShardError> {
        let mut body = self
            .shard
            .client()
            .read_object(id, filename)
            .await
            .map_err(|e| self.surface("read_object", e))?;

        let mut buffer = BytesMut::new();
        while let Some(chunk) = body
            .try_next()
            .await
            .map_err(|e| self.surface("read_object", e))?
        {
            buffer.extend_from_slice(&chunk);
        }

        debug!(
            "[partitioner] Loaded {}/{} ({} bytes) from shard {}",
            id,
            filename,
            buffer.len(),
            self.shard.index()
        );
        Ok(buffer.freeze())
    }

    /// [`load`](Self::load) decoded as UTF-8.
    pub async fn load_string(&self, id: &str, filename: &str) -> Result<String, ShardError> {
        let content = self.load(id, filename).await?;
        String::from_utf8(content.to_vec()).map_err(|e| ShardError::Read {
            container: id.to_string(),
            object: filename.to_string(),
            reason: format!("content is not valid UTF-8: {}", e),
        })
    }

    /// Delete container `id` and every object in it.
    pub async fn delete(&self, id: &str) -> Result<DeleteAck, ShardError> {
        let ack = self
            .shard
            .client()
            .delete_container(id)
            .await
            .map_err(|e| self.surface("delete_container", e))?;

        debug!(
            "[partitioner] Deleted container {} on shard {}",
            id,
            self.shard.index()
        );
        Ok(ack)
    }

    fn surface(&self, operation: &'static str, error: ShardError) -> ShardError {
        warn!(
            shard = self.shard.index(),
            account = self.shard.account(),
            operation,
            error = %error,
            "[partitioner] Backing store call failed"
        );
        error
    }
}
