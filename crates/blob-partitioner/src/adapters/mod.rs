//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements the outbound backing store ports.

mod in_memory_store;

pub use in_memory_store::{InMemoryClient, InMemoryConnector, DEFAULT_CHUNK_SIZE};
