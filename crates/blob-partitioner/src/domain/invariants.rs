//! # Domain Invariants
//!
//! Rules that must always hold for routing.

use super::entities::Topology;
use super::errors::{ShardError, ShardIndex};

/// Minimum shard count.
pub const MIN_SHARD_COUNT: usize = 1;

/// Invariant: partitioning is deterministic.
///
/// Same identifier + same shard count = same index.
pub fn invariant_deterministic_partition<F>(partition_fn: F, id: &str, shard_count: usize) -> bool
where
    F: Fn(&str, usize) -> Result<ShardIndex, ShardError>,
{
    let first = partition_fn(id, shard_count);
    let second = partition_fn(id, shard_count);
    first == second
}

/// Invariant: a partition index addresses an existing shard.
pub fn invariant_partition_in_range(index: ShardIndex, shard_count: usize) -> Result<(), ShardError> {
    if index >= shard_count {
        return Err(ShardError::config(format!(
            "partition index {} out of range for {} shards",
            index, shard_count
        )));
    }
    Ok(())
}

/// Invariant: connection `k` belongs to descriptor `k`.
///
/// `connected` lists the accounts of the connection list in its order.
pub fn invariant_connection_order(topology: &Topology, connected: &[&str]) -> Result<(), ShardError> {
    if connected.len() != topology.len() {
        return Err(ShardError::config(format!(
            "{} connections for {} shards",
            connected.len(),
            topology.len()
        )));
    }

    for (index, (descriptor, got)) in topology.iter().zip(connected).enumerate() {
        if descriptor.account() != *got {
            return Err(ShardError::OrderViolation {
                index,
                expected: descriptor.account().to_string(),
                got: got.to_string(),
            });
        }
    }

    Ok(())
}
