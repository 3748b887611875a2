//! Status command implementation

use anyhow::{bail, Context, Result};
use durapool::prelude::*;

pub fn execute(uri: &str) -> Result<()> {
    let config = PoolConfig::from_uri(uri).context("Invalid pool URI")?;
    if !uri.to_ascii_lowercase().starts_with(&format!("{}://", LMDB_SCHEME)) {
        bail!("status is only available for {}:// pools", LMDB_SCHEME);
    }

    tracing::info!("Checking pool status: {}", config.dsn.display());

    let pool = LmdbPool::open_with_config(config).context("Failed to open pool")?;
    let meta = pool.meta().context("Failed to read pool metadata")?;

    println!("\nPool Status");
    println!("{}", "=".repeat(60));
    println!("Path: {}", pool.path().display());
    println!("Bucket: {}", meta.bucket);
    println!("Codec: {}", pool.codec().name());
    println!("Length: {}", meta.length);
    println!("Last Sequence: {}", meta.last_sequence);
    match meta.head {
        Some(head) => println!("Head Sequence: {}", head),
        None => println!("Head Sequence: (empty)"),
    }

    Ok(())
}
