//! LMDB-backed durable pool
//!
//! Maps a FIFO queue onto LMDB's ordered key-value primitives.
//!
//! Key features:
//! - One named database ("bucket") per pool, in a single store file
//! - Fixed-width decimal sequence keys, so key order is arrival order
//! - Per-bucket sequence counter that is never reused
//! - Push and pop each run in one write transaction (single-writer)
//! - Length scans run in a read transaction and never block writers

pub mod iter;
pub mod keys;
pub mod store;
pub mod txn;

pub use iter::RecordScan;
pub use store::LmdbPool;
pub use txn::PoolWriteTxn;

use durapool_core::{Pool, PoolRegistry, Result};

/// URI scheme this backend registers under
pub const LMDB_SCHEME: &str = "lmdb";

/// Registry constructor: open an [`LmdbPool`] using the codec named in the URI
pub fn open_pool(uri: &str) -> Result<Box<dyn Pool>> {
    Ok(Box::new(LmdbPool::open(uri)?))
}

/// Register this backend under [`LMDB_SCHEME`]
pub fn register(registry: &mut PoolRegistry) -> Result<()> {
    registry.register(LMDB_SCHEME, open_pool)
}
