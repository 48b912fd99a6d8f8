//! # Topology Parser
//!
//! Parses `account1:key1;account2:key2;...;accountN:keyN` into an ordered
//! [`Topology`].

use crate::domain::{ShardDescriptor, ShardError, Topology};
use std::str::FromStr;

/// Separates shard entries.
pub const SHARD_SEPARATOR: char = ';';

/// Separates an account from its key inside one entry.
pub const CREDENTIAL_SEPARATOR: char = ':';

/// Parse a shard list into a topology.
///
/// Structural validation only: the string must be non-empty and hold exactly
/// one more `:` than `;`, with one `:` per entry. Account names and keys are
/// taken verbatim and checked by the connector.
pub fn parse_topology(storages: &str) -> Result<Topology, ShardError> {
    if storages.is_empty() {
        return Err(ShardError::config(
            r#"storages need to be provided as a string like "account:accountKey;account2:accountKey2""#,
        ));
    }

    let colons = storages.matches(CREDENTIAL_SEPARATOR).count();
    let semicolons = storages.matches(SHARD_SEPARATOR).count();
    if colons != semicolons + 1 {
        return Err(ShardError::config(format!(
            "malformed storages string: {} ':' for {} ';'. Account and key are separated by ':', \
             storages by ';', and the string must not end with ';'",
            colons, semicolons
        )));
    }

    let shards = storages
        .split(SHARD_SEPARATOR)
        .enumerate()
        .map(|(index, entry)| {
            entry
                .split_once(CREDENTIAL_SEPARATOR)
                .filter(|(_, key)| !key.contains(CREDENTIAL_SEPARATOR))
                .map(|(account, key)| ShardDescriptor::new(account, key))
                .ok_or_else(|| {
                    ShardError::config(format!(
                        "storage entry {} must be exactly one account:accountKey pair",
                        index
                    ))
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Topology::new(shards)
}

impl FromStr for Topology {
    type Err = ShardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_topology(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_shard_accepted() {
        let topology = parse_topology("account:key").unwrap();
        assert_eq!(topology.len(), 1);
        assert_eq!(topology.get(0).unwrap().account(), "account");
        assert_eq!(topology.get(0).unwrap().account_key(), "key");
    }

    #[test]
    fn test_multiple_shards_in_order() {
        let topology = parse_topology(
            "mystorageaccount0:accessKey0;mystorageaccount1:accessKey1;mystorageaccount2:accessKey2",
        )
        .unwrap();
        assert_eq!(
            topology.accounts(),
            vec!["mystorageaccount0", "mystorageaccount1", "mystorageaccount2"]
        );
    }

    #[test]
    fn test_empty_rejected() {
        assert!(matches!(parse_topology(""), Err(ShardError::Config(_))));
    }

    #[test]
    fn test_trailing_semicolon_rejected() {
        assert!(matches!(
            parse_topology("account:key;"),
            Err(ShardError::Config(_))
        ));
    }

    #[test]
    fn test_missing_separator_rejected() {
        assert!(matches!(parse_topology("accountkey"), Err(ShardError::Config(_))));
        assert!(matches!(
            parse_topology("a:k a2:k2"),
            Err(ShardError::Config(_))
        ));
    }

    #[test]
    fn test_misplaced_colon_rejected() {
        // Counts balance, but the second entry has no key.
        assert!(matches!(
            parse_topology("a:k:x;b"),
            Err(ShardError::Config(_))
        ));
    }

    #[test]
    fn test_keys_taken_verbatim() {
        let topology = parse_topology("acct:abc+/=;acct2:").unwrap();
        assert_eq!(topology.get(0).unwrap().account_key(), "abc+/=");
        assert_eq!(topology.get(1).unwrap().account_key(), "");
    }

    #[test]
    fn test_from_str() {
        let topology: Topology = "s0:k0;s1:k1".parse().unwrap();
        assert_eq!(topology.len(), 2);
    }
}
