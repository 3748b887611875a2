use durapool_core::{PoolError, StoreStep};
use lmdb::{Cursor, Database, Transaction};

/// Result of walking a bucket from its first key to its last
#[derive(Debug)]
pub struct RecordScan {
    /// Records visited before the scan finished or stopped
    pub count: u64,

    /// The error that stopped the scan early, if any
    pub error: Option<PoolError>,
}

impl RecordScan {
    fn stopped(count: u64, error: PoolError) -> Self {
        Self {
            count,
            error: Some(error),
        }
    }
}

/// Count the records of `db` visible to `txn`
///
/// Walks the cursor with `MDB_FIRST`/`MDB_NEXT` rather than `Cursor::iter`,
/// which panics on unexpected cursor errors.
pub fn count_records<T: Transaction>(txn: &T, db: Database) -> RecordScan {
    let cursor = match txn.open_ro_cursor(db) {
        Ok(cursor) => cursor,
        Err(e) => return RecordScan::stopped(0, PoolError::store(StoreStep::OpenCursor, e)),
    };

    let mut count = 0;
    let mut op = lmdb_sys::MDB_FIRST;
    loop {
        match cursor.get(None, None, op) {
            Ok(_) => {
                count += 1;
                op = lmdb_sys::MDB_NEXT;
            }
            Err(lmdb::Error::NotFound) => break,
            Err(e) => return RecordScan::stopped(count, PoolError::store(StoreStep::ReadRecord, e)),
        }
    }

    RecordScan { count, error: None }
}
