//! # Domain Entities
//!
//! Shard descriptors and the ordered topology they form.

use super::errors::{ShardError, ShardIndex};
use super::value_objects::ShardRoute;
use crate::algorithms::partition_index;
use std::fmt;

/// One backing storage account acting as a partition target.
///
/// Immutable once parsed. The account key is a credential and is redacted
/// from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct ShardDescriptor {
    account: String,
    account_key: String,
}

impl ShardDescriptor {
    /// Create a descriptor from an account name and its key.
    pub fn new(account: impl Into<String>, account_key: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            account_key: account_key.into(),
        }
    }

    /// Account name.
    pub fn account(&self) -> &str {
        &self.account
    }

    /// Shared account key.
    pub fn account_key(&self) -> &str {
        &self.account_key
    }
}

impl fmt::Debug for ShardDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShardDescriptor")
            .field("account", &self.account)
            .field("account_key", &"<redacted>")
            .finish()
    }
}

/// Ordered list of shard descriptors.
///
/// Position in the list is the partition index. Descriptors are never
/// reordered, deduplicated or dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Topology {
    shards: Vec<ShardDescriptor>,
}

impl Topology {
    /// Build a topology from descriptors in partition order.
    ///
    /// Fails with [`ShardError::Config`] when `shards` is empty.
    pub fn new(shards: Vec<ShardDescriptor>) -> Result<Self, ShardError> {
        if shards.is_empty() {
            return Err(ShardError::config("topology must contain at least one shard"));
        }
        Ok(Self { shards })
    }

    /// Number of shards.
    pub fn len(&self) -> usize {
        self.shards.len()
    }

    /// Always false; a topology holds at least one shard.
    pub fn is_empty(&self) -> bool {
        self.shards.is_empty()
    }

    /// Descriptor at `index`.
    pub fn get(&self, index: ShardIndex) -> Option<&ShardDescriptor> {
        self.shards.get(index)
    }

    /// Descriptors in partition order.
    pub fn iter(&self) -> impl Iterator<Item = &ShardDescriptor> {
        self.shards.iter()
    }

    /// Account names in partition order.
    pub fn accounts(&self) -> Vec<&str> {
        self.shards.iter().map(ShardDescriptor::account).collect()
    }

    /// Where `id` lives, computed without any connection.
    pub fn route(&self, id: &str) -> Result<ShardRoute, ShardError> {
        let shard_index = partition_index(id, self.len())?;
        Ok(ShardRoute::new(id, shard_index, self.shards[shard_index].account()))
    }
}

impl<'a> IntoIterator for &'a Topology {
    type Item = &'a ShardDescriptor;
    type IntoIter = std::slice::Iter<'a, ShardDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.shards.iter()
    }
}
