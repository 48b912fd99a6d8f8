//! # Shard Registry
//!
//! Owns the ordered shard connections and resolves identifiers to them.
//!
//! Connections are opened one after another in topology order so that
//! connection `k` always belongs to descriptor `k`. Opening them concurrently
//! would let completion order leak into the list and silently remap every
//! identifier.

use super::container_cache::ContainerCache;
use crate::algorithms::partition_index;
use crate::domain::{invariant_connection_order, ShardError, ShardIndex, Topology};
use crate::ports::outbound::{ContainerClient, StorageConnector};
use tracing::{debug, info, warn};

/// A live client for one shard, created once during initialization.
pub struct ShardConnection<C> {
    index: ShardIndex,
    account: String,
    client: C,
}

impl<C> ShardConnection<C> {
    pub(crate) fn new(index: ShardIndex, account: impl Into<String>, client: C) -> Self {
        Self {
            index,
            account: account.into(),
            client,
        }
    }

    /// Position in the topology.
    pub fn index(&self) -> ShardIndex {
        self.index
    }

    /// Account backing this shard.
    pub fn account(&self) -> &str {
        &self.account
    }

    /// Underlying backing store client.
    pub fn client(&self) -> &C {
        &self.client
    }
}

impl<C: ContainerClient> ShardConnection<C> {
    /// Container operations scoped to this shard.
    pub fn containers(&self) -> ContainerCache<'_, C> {
        ContainerCache::new(self)
    }
}

/// Ordered, write-once list of shard connections.
pub struct ShardRegistry<C> {
    connections: Vec<ShardConnection<C>>,
}

impl<C: ContainerClient> ShardRegistry<C> {
    /// Connect to every shard of `topology`, strictly in order.
    ///
    /// The first failing connection aborts initialization and is returned
    /// unchanged.
    pub async fn initialize<S>(topology: &Topology, connector: &S) -> Result<Self, ShardError>
    where
        S: StorageConnector<Client = C>,
    {
        info!(
            shards = topology.len(),
            "[partitioner] Initializing shard connections"
        );

        let mut connections = Vec::with_capacity(topology.len());
        for (index, descriptor) in topology.iter().enumerate() {
            let client = connector.connect(descriptor).await.map_err(|e| {
                warn!(
                    shard = index,
                    account = descriptor.account(),
                    error = %e,
                    "[partitioner] Shard connection failed"
                );
                e
            })?;

            info!(
                shard = index,
                account = descriptor.account(),
                "[partitioner] Shard connected"
            );
            connections.push(ShardConnection::new(index, descriptor.account(), client));
        }

        let registry = Self { connections };
        invariant_connection_order(topology, &registry.accounts())?;

        info!(
            shards = registry.len(),
            "[partitioner] ✓ Shard registry ready"
        );
        Ok(registry)
    }

    /// Connection that owns `id`.
    ///
    /// Recomputed on every call; nothing is cached.
    pub fn resolve(&self, id: &str) -> Result<&ShardConnection<C>, ShardError> {
        if self.connections.is_empty() {
            return Err(ShardError::config("shard registry holds no connections"));
        }

        let index = partition_index(id, self.connections.len())?;
        let connection = &self.connections[index];
        debug!(
            "[partitioner] Routed {} to shard {} ({})",
            id,
            index,
            connection.account()
        );
        Ok(connection)
    }
}

impl<C> ShardRegistry<C> {
    /// Number of connections.
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    /// Whether the registry holds no connections.
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }

    /// Connection at `index`.
    pub fn get(&self, index: ShardIndex) -> Option<&ShardConnection<C>> {
        self.connections.get(index)
    }

    /// Connections in topology order.
    pub fn iter(&self) -> impl Iterator<Item = &ShardConnection<C>> {
        self.connections.iter()
    }

    /// Connected accounts in topology order.
    pub fn accounts(&self) -> Vec<&str> {
        self.connections.iter().map(ShardConnection::account).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryClient, InMemoryConnector};
    use crate::algorithms::parse_topology;
    use std::time::Duration;

    fn topology() -> Topology {
        parse_topology("s0:k0;s1:k1;s2:k2").unwrap()
    }

    #[tokio::test]
    async fn test_initialize_preserves_order() {
        let connector = InMemoryConnector::new();
        let registry = ShardRegistry::initialize(&topology(), &connector)
            .await
            .unwrap();

        assert_eq!(registry.accounts(), vec!["s0", "s1", "s2"]);
        assert_eq!(connector.connected_accounts(), vec!["s0", "s1", "s2"]);
        for (index, connection) in registry.iter().enumerate() {
            assert_eq!(connection.index(), index);
        }
    }

    #[tokio::test]
    async fn test_slow_first_shard_keeps_index_zero() {
        let connector = InMemoryConnector::new();
        connector.delay_connect("s0", Duration::from_millis(20));

        let registry = ShardRegistry::initialize(&topology(), &connector)
            .await
            .unwrap();
        assert_eq!(registry.get(0).unwrap().account(), "s0");
    }

    #[tokio::test]
    async fn test_reinitialize_same_mapping() {
        let connector = InMemoryConnector::new();
        let first = ShardRegistry::initialize(&topology(), &connector)
            .await
            .unwrap();
        let second = ShardRegistry::initialize(&topology(), &connector)
            .await
            .unwrap();

        for _ in 0..50 {
            let id = uuid::Uuid::new_v4().to_string();
            assert_eq!(
                first.resolve(&id).unwrap().index(),
                second.resolve(&id).unwrap().index()
            );
        }
    }

    #[tokio::test]
    async fn test_initialize_stops_at_failing_shard() {
        let connector = InMemoryConnector::new();
        connector.reject_account("s1");

        let result = ShardRegistry::initialize(&topology(), &connector).await;
        assert!(matches!(result, Err(ShardError::Auth { ref account, .. }) if account == "s1"));
        assert_eq!(connector.connected_accounts(), vec!["s0"]);
    }

    #[tokio::test]
    async fn test_resolve_scenario() {
        let connector = InMemoryConnector::new();
        let registry = ShardRegistry::initialize(&topology(), &connector)
            .await
            .unwrap();

        let zero = registry
            .resolve("00000000-0000-0000-0000-000000000000")
            .unwrap();
        assert_eq!(zero.account(), "s0");

        // 0x...0004 % 3 == 1
        let four = registry
            .resolve("00000000-0000-0000-0000-000000000004")
            .unwrap();
        assert_eq!(four.account(), "s1");
    }

    #[test]
    fn test_resolve_empty_registry() {
        let registry: ShardRegistry<InMemoryClient> = ShardRegistry {
            connections: Vec::new(),
        };
        assert!(matches!(
            registry.resolve("00000000-0000-0000-0000-000000000000"),
            Err(ShardError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_resolve_invalid_identifier() {
        let connector = InMemoryConnector::new();
        let registry = ShardRegistry::initialize(&topology(), &connector)
            .await
            .unwrap();
        assert!(matches!(
            registry.resolve("not-an-id"),
            Err(ShardError::InvalidIdentifier(_))
        ));
    }
}
