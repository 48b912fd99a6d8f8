//! # Ports Layer
//!
//! - `inbound.rs` - Driving port (the sharded cache API)
//! - `outbound.rs` - Driven ports (the backing store client)

pub mod inbound;
pub mod outbound;

pub use inbound::ShardedCacheApi;
pub use outbound::{ContainerClient, ObjectBody, StorageConnector};
