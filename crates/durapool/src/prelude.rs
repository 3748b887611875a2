//! durapool Prelude
//!
//! Import this to get all commonly used types and traits:
//!
//! ```
//! use durapool::prelude::*;
//! ```

// Core types
pub use crate::{PoolError, PoolItem, PoolMeta, Result, Sequence, StoreStep};

// Configs
pub use crate::{PoolConfig, SyncMode};

// Traits
pub use crate::{ItemCodec, Pool};

// Codecs
pub use crate::{BincodeCodec, CodecKind, JsonCodec, TextCodec};

// Implementations and registry
pub use crate::{LmdbPool, PoolRegistry, LMDB_SCHEME};

// Re-export common external deps
pub use std::sync::Arc;
pub use tracing;
