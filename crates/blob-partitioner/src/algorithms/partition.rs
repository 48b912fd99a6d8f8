//! # Partition Function
//!
//! Deterministic identifier-to-shard mapping: strip hyphens, read the rest as
//! a base-16 integer, reduce modulo the shard count.
//!
//! Works directly on UUID-shaped identifiers without hashing. Changing the
//! shard count changes the divisor and remaps nearly every identifier; there
//! is no rebalancing.

use crate::domain::{ShardError, ShardIndex, MIN_SHARD_COUNT};
use uuid::Uuid;

/// Map `id` to a shard index in `0..shard_count`.
///
/// All hyphens are ignored. Parsing consumes the leading run of hexadecimal
/// digits and stops at the first other character. The remainder is computed
/// digit by digit, so identifiers longer than 128 bits stay exact.
///
/// Fails with [`ShardError::Config`] for a zero shard count and with
/// [`ShardError::InvalidIdentifier`] when there is no leading hex digit.
pub fn partition_index(id: &str, shard_count: usize) -> Result<ShardIndex, ShardError> {
    if shard_count < MIN_SHARD_COUNT {
        return Err(ShardError::config("shard count must be at least 1"));
    }

    let modulus = shard_count as u128;
    let mut remainder: u128 = 0;
    let mut digits = 0usize;

    for c in id.chars().filter(|c| *c != '-') {
        let Some(digit) = c.to_digit(16) else {
            break;
        };
        // remainder < modulus <= 2^64, so this cannot overflow
        remainder = (remainder * 16 + u128::from(digit)) % modulus;
        digits += 1;
    }

    if digits == 0 {
        return Err(ShardError::InvalidIdentifier(id.to_string()));
    }

    Ok(remainder as ShardIndex)
}

/// [`partition_index`] for an already parsed UUID.
///
/// Equal to `partition_index(&uuid.to_string(), shard_count)`.
pub fn partition_uuid(uuid: &Uuid, shard_count: usize) -> Result<ShardIndex, ShardError> {
    if shard_count < MIN_SHARD_COUNT {
        return Err(ShardError::config("shard count must be at least 1"));
    }
    Ok((uuid.as_u128() % shard_count as u128) as ShardIndex)
}
