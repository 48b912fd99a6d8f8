//! # Domain Value Objects
//!
//! Acknowledgements returned by the backing store and routing results.

use super::errors::ShardIndex;
use serde::{Deserialize, Serialize};

/// Acknowledgement of a successful object write.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteAck {
    /// Request id assigned by the backing store, if any.
    pub request_id: Option<String>,
    /// Number of bytes accepted.
    pub content_length: u64,
}

impl WriteAck {
    /// Create a write acknowledgement.
    pub fn new(request_id: Option<String>, content_length: u64) -> Self {
        Self {
            request_id,
            content_length,
        }
    }
}

/// Acknowledgement of a successful container delete.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteAck {
    /// Request id assigned by the backing store, if any.
    pub request_id: Option<String>,
}

/// Which shard an identifier is routed to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShardRoute {
    /// The identifier that was routed.
    pub id: String,
    /// Partition index in topology order.
    pub shard_index: ShardIndex,
    /// Account backing that shard.
    pub account: String,
}

impl ShardRoute {
    /// Create a route.
    pub fn new(id: impl Into<String>, shard_index: ShardIndex, account: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            shard_index,
            account: account.into(),
        }
    }
}
