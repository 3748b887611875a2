//! durapool: durable FIFO item pools
//!
//! durapool provides:
//! - **Pool items**: a closed [`PoolItem`] type (text, integer, bytes)
//! - **Codecs**: pluggable item ↔ bytes conversion ([`ItemCodec`])
//! - **LMDB backend**: [`LmdbPool`], a crash-safe FIFO stored in one LMDB file
//! - **Registry**: explicit scheme → backend registration ([`PoolRegistry`])
//!
//! # Quick Start
//!
//! ```no_run
//! use durapool::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let registry = durapool::default_registry()?;
//! let pool = registry.open("lmdb://jobs?dsn=/tmp/jobs.mdb")?;
//!
//! pool.push(&PoolItem::from("a"))?;
//! pool.push(&PoolItem::Int(2))?;
//!
//! assert_eq!(pool.pop()?, Some(PoolItem::from("a")));
//! assert_eq!(pool.length(), 1);
//! # Ok(())
//! # }
//! ```

pub mod prelude;

// Re-export core types
pub use durapool_core::{
    codec::{BincodeCodec, CodecKind, ItemCodec, JsonCodec, TextCodec},
    config::{PoolConfig, SyncMode},
    error::{PoolError, Result, StoreStep},
    item::PoolItem,
    registry::{PoolConstructor, PoolRegistry},
    traits::Pool,
    types::{PoolMeta, Sequence},
};

// Re-export implementations
pub use durapool_lmdb::{LmdbPool, LMDB_SCHEME};

/// Register every backend this crate ships with
pub fn register_backends(registry: &mut PoolRegistry) -> Result<()> {
    durapool_lmdb::register(registry)?;
    Ok(())
}

/// A registry with every bundled backend registered
pub fn default_registry() -> Result<PoolRegistry> {
    let mut registry = PoolRegistry::new();
    register_backends(&mut registry)?;
    Ok(registry)
}

/// Open a pool through the default registry
pub fn open(uri: &str) -> Result<Box<dyn Pool>> {
    default_registry()?.open(uri)
}
