//! # Domain Errors
//!
//! Error types for the partitioner.
//!
//! Configuration errors are raised before any network activity. Every other
//! variant comes from the backing store and is surfaced to the caller as is.

use thiserror::Error;

/// Index of a shard inside the topology (0-based, topology order).
pub type ShardIndex = usize;

/// Partitioner error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShardError {
    /// Malformed topology, zero shards or an invalid shard count.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Routing was attempted before the registry was initialized.
    #[error("Shard registry is not initialized")]
    NotInitialized,

    /// The identifier has no leading hexadecimal digit to partition on.
    #[error("Invalid identifier {0:?}: no leading hexadecimal digits")]
    InvalidIdentifier(String),

    /// Credentials were rejected while connecting to an account.
    #[error("Authentication failed for account {account}: {reason}")]
    Auth {
        /// Account that rejected the credentials
        account: String,
        /// Reason reported by the backing store
        reason: String,
    },

    /// The account endpoint could not be reached.
    #[error("Connection to account {account} failed: {reason}")]
    Connection {
        /// Account being connected
        account: String,
        /// Reason reported by the transport
        reason: String,
    },

    /// The backing store rejected a write.
    #[error("Write of {container}/{object} failed: {reason}")]
    Write {
        /// Container being written to
        container: String,
        /// Object being written
        object: String,
        /// Reason reported by the backing store
        reason: String,
    },

    /// The backing store failed while reading.
    #[error("Read of {container}/{object} failed: {reason}")]
    Read {
        /// Container being read from
        container: String,
        /// Object being read
        object: String,
        /// Reason reported by the backing store
        reason: String,
    },

    /// The backing store failed to delete a container.
    #[error("Delete of container {container} failed: {reason}")]
    Delete {
        /// Container being deleted
        container: String,
        /// Reason reported by the backing store
        reason: String,
    },

    /// No such container, or no such object inside it.
    #[error("Not found: {container}{}", object_suffix(.object))]
    NotFound {
        /// Container that was addressed
        container: String,
        /// Object that was addressed, if any
        object: Option<String>,
    },

    /// Container already exists. Absorbed by create-if-absent.
    #[error("Container already exists: {0}")]
    ContainerExists(String),

    /// A connection does not sit at the index of its descriptor.
    #[error("Connection order violated at index {index}: expected {expected}, got {got}")]
    OrderViolation {
        /// Position in the connection list
        index: ShardIndex,
        /// Account of the descriptor at that position
        expected: String,
        /// Account of the connection at that position
        got: String,
    },
}

fn object_suffix(object: &Option<String>) -> String {
    object.as_ref().map(|o| format!("/{o}")).unwrap_or_default()
}

impl ShardError {
    /// Configuration error from anything printable.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this error was raised by configuration validation.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Whether the addressed container or object does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
