//! durapool core: traits and types shared by pool backends
//!
//! This crate defines:
//! - [`PoolItem`]: the closed set of values a pool carries
//! - [`ItemCodec`]: conversion between items and stored bytes
//! - [`Pool`]: the push/pop/length capability every backend implements
//! - [`PoolRegistry`]: explicit scheme → constructor registration
//! - [`PoolConfig`]: connection settings parsed from a pool URI

pub mod codec;
pub mod config;
pub mod error;
pub mod item;
pub mod observe;
pub mod registry;
pub mod traits;
pub mod types;

pub use codec::{BincodeCodec, CodecKind, ItemCodec, JsonCodec, TextCodec};
pub use config::{PoolConfig, SyncMode};
pub use error::{PoolError, Result, StoreStep};
pub use item::PoolItem;
pub use registry::{PoolConstructor, PoolRegistry};
pub use traits::Pool;
pub use types::{PoolMeta, Sequence};
