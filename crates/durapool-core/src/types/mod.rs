pub mod meta;

pub use meta::{PoolMeta, Sequence};
