//! # Algorithms Module
//!
//! Topology parsing and the partition function.

pub mod partition;
pub mod topology_parser;

pub use partition::{partition_index, partition_uuid};
pub use topology_parser::{parse_topology, CREDENTIAL_SEPARATOR, SHARD_SEPARATOR};
