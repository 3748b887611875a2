use crate::error::Result;
use crate::item::PoolItem;

/// FIFO pool capability shared by every backend
///
/// Backends are registered by URI scheme in a
/// [`PoolRegistry`](crate::registry::PoolRegistry).
pub trait Pool: Send + Sync {
    /// Append an item to the tail of the pool
    fn push(&self, item: &PoolItem) -> Result<()>;

    /// Remove and return the oldest item
    ///
    /// Returns `Ok(None)` when the pool is empty; emptiness is not an error.
    fn pop(&self) -> Result<Option<PoolItem>>;

    /// Number of items currently held
    ///
    /// Best effort: backends that hit an error while counting return what
    /// they counted so far.
    fn length(&self) -> u64;

    /// Whether the pool currently holds no items
    fn is_empty(&self) -> bool {
        self.length() == 0
    }
}
