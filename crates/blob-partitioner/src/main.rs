//! # Partition Probe
//!
//! Prints the shard each identifier on the command line routes to, one JSON
//! object per line. Reads the topology from `PARTITIONER_STORAGES` and never
//! connects to any account.
//!
//! ```text
//! PARTITIONER_STORAGES="s0:k0;s1:k1;s2:k2" partition-probe 00000000-0000-0000-0000-000000000005
//! {"id":"00000000-0000-0000-0000-000000000005","shard_index":2,"account":"s2"}
//! ```

use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use tracing::info;

use blob_partitioner::{init_logging, PartitionerConfig};

fn main() -> Result<()> {
    let config = PartitionerConfig::from_env().context("Failed to load configuration")?;
    init_logging(&config).context("Failed to initialize logging")?;

    let topology = config
        .topology()
        .context("Failed to parse PARTITIONER_STORAGES")?;
    info!(
        shards = topology.len(),
        "[partitioner] Topology loaded"
    );

    let ids: Vec<String> = std::env::args().skip(1).collect();
    if ids.is_empty() {
        bail!("usage: partition-probe <id> [<id> ...]");
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for id in &ids {
        let route = topology
            .route(id)
            .with_context(|| format!("Failed to route {}", id))?;
        writeln!(out, "{}", serde_json::to_string(&route)?)?;
    }

    Ok(())
}
