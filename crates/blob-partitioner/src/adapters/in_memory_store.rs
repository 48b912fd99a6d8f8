//! In-Memory Blob Store Adapter
//!
//! Implements `StorageConnector` and `ContainerClient` over process memory.
//! Accounts keep their data across reconnects, so a second initialization
//! against the same connector sees what the first one wrote.

use crate::domain::{DeleteAck, ShardDescriptor, ShardError, WriteAck};
use crate::ports::outbound::{ContainerClient, ObjectBody, StorageConnector};
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{self, StreamExt};
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// Default read chunk size (4 KiB).
pub const DEFAULT_CHUNK_SIZE: usize = 4 * 1024;

type Containers = HashMap<String, HashMap<String, Bytes>>;

/// Injected failures, shared between the connector and its clients.
#[derive(Default)]
struct FailurePlan {
    rejected_accounts: HashSet<String>,
    unreachable_accounts: HashSet<String>,
    connect_delays: HashMap<String, Duration>,
    failing_writes: HashSet<String>,
    failing_reads: HashSet<String>,
    failing_deletes: HashSet<String>,
}

/// In-memory storage accounts for tests and local runs.
pub struct InMemoryConnector {
    /// Account name -> containers.
    accounts: RwLock<HashMap<String, Arc<RwLock<Containers>>>>,
    /// Accounts in the order `connect` was called.
    connect_log: RwLock<Vec<String>>,
    failures: Arc<RwLock<FailurePlan>>,
    chunk_size: usize,
}

impl InMemoryConnector {
    /// Create a connector with no accounts.
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
            connect_log: RwLock::new(Vec::new()),
            failures: Arc::new(RwLock::new(FailurePlan::default())),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Serve object bodies in chunks of `chunk_size` bytes.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Reject the credentials of `account`.
    pub fn reject_account(&self, account: impl Into<String>) {
        self.failures.write().rejected_accounts.insert(account.into());
    }

    /// Make `account` unreachable.
    pub fn make_unreachable(&self, account: impl Into<String>) {
        self.failures.write().unreachable_accounts.insert(account.into());
    }

    /// Delay connecting to `account`.
    pub fn delay_connect(&self, account: impl Into<String>, delay: Duration) {
        self.failures.write().connect_delays.insert(account.into(), delay);
    }

    /// Fail every write of an object named `object`.
    pub fn fail_writes_of(&self, object: impl Into<String>) {
        self.failures.write().failing_writes.insert(object.into());
    }

    /// Fail every read of an object named `object`.
    pub fn fail_reads_of(&self, object: impl Into<String>) {
        self.failures.write().failing_reads.insert(object.into());
    }

    /// Fail every delete of a container named `container`.
    pub fn fail_deletes_of(&self, container: impl Into<String>) {
        self.failures.write().failing_deletes.insert(container.into());
    }

    /// Accounts in the order they were connected.
    pub fn connected_accounts(&self) -> Vec<String> {
        self.connect_log.read().clone()
    }

    /// Number of containers held by `account`.
    pub fn container_count(&self, account: &str) -> usize {
        self.accounts
            .read()
            .get(account)
            .map(|containers| containers.read().len())
            .unwrap_or(0)
    }

    /// Whether `account` holds `container`.
    pub fn has_container(&self, account: &str, container: &str) -> bool {
        self.accounts
            .read()
            .get(account)
            .map(|containers| containers.read().contains_key(container))
            .unwrap_or(false)
    }

    /// Raw object content, bypassing routing.
    pub fn object(&self, account: &str, container: &str, object: &str) -> Option<Bytes> {
        let accounts = self.accounts.read();
        let containers = accounts.get(account)?.read();
        containers.get(container)?.get(object).cloned()
    }
}

impl Default for InMemoryConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageConnector for InMemoryConnector {
    type Client = InMemoryClient;

    async fn connect(&self, descriptor: &ShardDescriptor) -> Result<InMemoryClient, ShardError> {
        let account = descriptor.account();

        let delay = self.failures.read().connect_delays.get(account).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        {
            let failures = self.failures.read();
            if failures.unreachable_accounts.contains(account) {
                return Err(ShardError::Connection {
                    account: account.to_string(),
                    reason: "endpoint unreachable".to_string(),
                });
            }
            if descriptor.account_key().is_empty() || failures.rejected_accounts.contains(account)
            {
                return Err(ShardError::Auth {
                    account: account.to_string(),
                    reason: "shared key rejected".to_string(),
                });
            }
        }

        let containers = self
            .accounts
            .write()
            .entry(account.to_string())
            .or_default()
            .clone();
        self.connect_log.write().push(account.to_string());

        debug!("[partitioner] In-memory account {} connected", account);

        Ok(InMemoryClient {
            account: account.to_string(),
            containers,
            failures: Arc::clone(&self.failures),
            chunk_size: self.chunk_size,
        })
    }
}

/// Client for one in-memory account.
pub struct InMemoryClient {
    account: String,
    containers: Arc<RwLock<Containers>>,
    failures: Arc<RwLock<FailurePlan>>,
    chunk_size: usize,
}

impl InMemoryClient {
    /// Account this client is bound to.
    pub fn account(&self) -> &str {
        &self.account
    }
}

#[async_trait]
impl ContainerClient for InMemoryClient {
    async fn ensure_container(&self, container: &str) -> Result<(), ShardError> {
        let mut containers = self.containers.write();
        if containers.contains_key(container) {
            return Err(ShardError::ContainerExists(container.to_string()));
        }
        containers.insert(container.to_string(), HashMap::new());
        Ok(())
    }

    async fn write_object(
        &self,
        container: &str,
        object: &str,
        content: Bytes,
    ) -> Result<WriteAck, ShardError> {
        if self.failures.read().failing_writes.contains(object) {
            return Err(ShardError::Write {
                container: container.to_string(),
                object: object.to_string(),
                reason: "Saving failed".to_string(),
            });
        }

        let mut containers = self.containers.write();
        let objects = containers
            .get_mut(container)
            .ok_or_else(|| ShardError::NotFound {
                container: container.to_string(),
                object: None,
            })?;

        let content_length = content.len() as u64;
        objects.insert(object.to_string(), content);

        Ok(WriteAck::new(Some(Uuid::new_v4().to_string()), content_length))
    }

    async fn read_object(&self, container: &str, object: &str) -> Result<ObjectBody, ShardError> {
        if self.failures.read().failing_reads.contains(object) {
            return Err(ShardError::Read {
                container: container.to_string(),
                object: object.to_string(),
                reason: "Reading failed".to_string(),
            });
        }

        let content = self
            .containers
            .read()
            .get(container)
            .and_then(|objects| objects.get(object))
            .cloned()
            .ok_or_else(|| ShardError::NotFound {
                container: container.to_string(),
                object: Some(object.to_string()),
            })?;

        let chunks: Vec<Result<Bytes, ShardError>> = (0..content.len())
            .step_by(self.chunk_size)
            .map(|start| Ok(content.slice(start..(start + self.chunk_size).min(content.len()))))
            .collect();

        Ok(stream::iter(chunks).boxed())
    }

    async fn delete_container(&self, container: &str) -> Result<DeleteAck, ShardError> {
        if self.failures.read().failing_deletes.contains(container) {
            return Err(ShardError::Delete {
                container: container.to_string(),
                reason: "Deletion failed".to_string(),
            });
        }

        self.containers
            .write()
            .remove(container)
            .ok_or_else(|| ShardError::NotFound {
                container: container.to_string(),
                object: None,
            })?;

        Ok(DeleteAck {
            request_id: Some(Uuid::new_v4().to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::TryStreamExt;

    async fn client(connector: &InMemoryConnector, account: &str) -> InMemoryClient {
        connector
            .connect(&ShardDescriptor::new(account, "key"))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_connect_records_order() {
        let connector = InMemoryConnector::new();
        client(&connector, "b").await;
        client(&connector, "a").await;
        assert_eq!(connector.connected_accounts(), vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_empty_key_rejected() {
        let connector = InMemoryConnector::new();
        let result = connector.connect(&ShardDescriptor::new("a", "")).await;
        assert!(matches!(result, Err(ShardError::Auth { .. })));
        assert!(connector.connected_accounts().is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_account() {
        let connector = InMemoryConnector::new();
        connector.make_unreachable("a");
        let result = connector.connect(&ShardDescriptor::new("a", "k")).await;
        assert!(matches!(result, Err(ShardError::Connection { .. })));
    }

    #[tokio::test]
    async fn test_ensure_container_reports_existing() {
        let connector = InMemoryConnector::new();
        let client = client(&connector, "a").await;
        assert!(client.ensure_container("c").await.is_ok());
        assert!(matches!(
            client.ensure_container("c").await,
            Err(ShardError::ContainerExists(_))
        ));
    }

    #[tokio::test]
    async fn test_write_requires_container() {
        let connector = InMemoryConnector::new();
        let client = client(&connector, "a").await;
        let result = client.write_object("missing", "f", Bytes::from("x")).await;
        assert!(matches!(result, Err(ShardError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_read_is_chunked() {
        let connector = InMemoryConnector::new().with_chunk_size(3);
        let client = client(&connector, "a").await;
        client.ensure_container("c").await.unwrap();
        client
            .write_object("c", "f", Bytes::from("abcdefgh"))
            .await
            .unwrap();

        let chunks: Vec<Bytes> = client
            .read_object("c", "f")
            .await
            .unwrap()
            .try_collect()
            .await
            .unwrap();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2], Bytes::from("gh"));
    }

    #[tokio::test]
    async fn test_data_survives_reconnect() {
        let connector = InMemoryConnector::new();
        let first = client(&connector, "a").await;
        first.ensure_container("c").await.unwrap();
        first.write_object("c", "f", Bytes::from("v")).await.unwrap();

        let second = client(&connector, "a").await;
        assert!(second.read_object("c", "f").await.is_ok());
        assert_eq!(connector.object("a", "c", "f"), Some(Bytes::from("v")));
    }

    #[tokio::test]
    async fn test_delete_missing_container() {
        let connector = InMemoryConnector::new();
        let client = client(&connector, "a").await;
        let result = client.delete_container("nope").await;
        assert!(matches!(result, Err(ShardError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let connector = InMemoryConnector::new();
        connector.fail_writes_of("saving_fails.txt");
        connector.fail_deletes_of("fails");
        let client = client(&connector, "a").await;
        client.ensure_container("fails").await.unwrap();

        let write = client
            .write_object("fails", "saving_fails.txt", Bytes::from("x"))
            .await;
        assert!(matches!(write, Err(ShardError::Write { .. })));

        let delete = client.delete_container("fails").await;
        assert!(matches!(delete, Err(ShardError::Delete { .. })));
        assert!(connector.has_container("a", "fails"));
    }
}
