use serde::{Deserialize, Serialize};

/// Per-bucket sequence number assigned to each pushed record
pub type Sequence = u64;

/// Snapshot of a pool's bookkeeping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolMeta {
    /// Bucket the pool writes to
    pub bucket: String,

    /// Records currently stored
    pub length: u64,

    /// Last sequence number handed out (0 if nothing was ever pushed)
    pub last_sequence: Sequence,

    /// Sequence of the oldest record still present
    pub head: Option<Sequence>,
}
