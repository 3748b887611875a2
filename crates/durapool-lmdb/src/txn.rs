use durapool_core::{PoolError, Result, Sequence, StoreStep};
use lmdb::{Cursor, Database, RwTransaction, Transaction, WriteFlags};

use crate::keys::sequence_to_key;

/// Read the last sequence number issued to `bucket`
///
/// A bucket that never had a counter written reads as 0.
pub(crate) fn read_last_sequence<T: Transaction>(
    txn: &T,
    sequences: Database,
    bucket: &str,
) -> Result<Sequence> {
    match txn.get(sequences, &bucket) {
        Ok(bytes) => {
            let seq_str = std::str::from_utf8(bytes).map_err(|e| {
                PoolError::Codec(format!("corrupt sequence for bucket '{}': {}", bucket, e))
            })?;
            seq_str.parse::<Sequence>().map_err(|e| {
                PoolError::Codec(format!("corrupt sequence for bucket '{}': {}", bucket, e))
            })
        }
        Err(lmdb::Error::NotFound) => Ok(0),
        Err(e) => Err(PoolError::store(StoreStep::ReadSequence, e)),
    }
}

/// Return the oldest record of `records`, copied out of the transaction
pub(crate) fn first_record<T: Transaction>(
    txn: &T,
    records: Database,
) -> Result<Option<(Vec<u8>, Vec<u8>)>> {
    let cursor = txn
        .open_ro_cursor(records)
        .map_err(|e| PoolError::store(StoreStep::OpenCursor, e))?;

    match cursor.get(None, None, lmdb_sys::MDB_FIRST) {
        Ok((Some(key), value)) => Ok(Some((key.to_vec(), value.to_vec()))),
        Ok((None, _)) | Err(lmdb::Error::NotFound) => Ok(None),
        Err(e) => Err(PoolError::store(StoreStep::ReadRecord, e)),
    }
}

/// Write transaction scoped to one bucket
///
/// Dropping it without calling [`PoolWriteTxn::commit`] aborts every change
/// made through it, including on early return via `?` or on panic.
pub struct PoolWriteTxn<'env> {
    txn: RwTransaction<'env>,
    records: Database,
    sequences: Database,
    bucket: &'env str,
}

impl<'env> PoolWriteTxn<'env> {
    pub(crate) fn new(
        txn: RwTransaction<'env>,
        records: Database,
        sequences: Database,
        bucket: &'env str,
    ) -> Self {
        Self {
            txn,
            records,
            sequences,
            bucket,
        }
    }

    /// Write the counter for this bucket if none exists yet
    pub fn init_sequence(&mut self) -> Result<Sequence> {
        match self.txn.get(self.sequences, &self.bucket) {
            Ok(_) => read_last_sequence(&self.txn, self.sequences, self.bucket),
            Err(lmdb::Error::NotFound) => {
                self.write_sequence(0)?;
                Ok(0)
            }
            Err(e) => Err(PoolError::store(StoreStep::ReadSequence, e)),
        }
    }

    /// Allocate the next sequence number for this bucket
    ///
    /// Numbers start at 1 and are never handed out twice, even after the
    /// records that carried them are popped.
    pub fn next_sequence(&mut self) -> Result<Sequence> {
        let last = read_last_sequence(&self.txn, self.sequences, self.bucket)?;
        let next = last.checked_add(1).ok_or_else(|| {
            PoolError::store(
                StoreStep::WriteSequence,
                std::io::Error::other(format!("sequence exhausted for bucket '{}'", self.bucket)),
            )
        })?;

        self.write_sequence(next)?;
        Ok(next)
    }

    fn write_sequence(&mut self, seq: Sequence) -> Result<()> {
        self.txn
            .put(
                self.sequences,
                &self.bucket,
                &seq.to_string(),
                WriteFlags::empty(),
            )
            .map_err(|e| PoolError::store(StoreStep::WriteSequence, e))
    }

    pub fn put_record(&mut self, seq: Sequence, value: &[u8]) -> Result<()> {
        self.txn
            .put(
                self.records,
                &sequence_to_key(seq),
                &value,
                WriteFlags::NO_OVERWRITE,
            )
            .map_err(|e| PoolError::store(StoreStep::WriteRecord, e))
    }

    pub fn first_record(&self) -> Result<Option<(Vec<u8>, Vec<u8>)>> {
        first_record(&self.txn, self.records)
    }

    pub fn delete_record(&mut self, key: &[u8]) -> Result<()> {
        self.txn
            .del(self.records, &key, None)
            .map_err(|e| PoolError::store(StoreStep::DeleteRecord, e))
    }

    pub fn commit(self) -> Result<()> {
        self.txn
            .commit()
            .map_err(|e| PoolError::store(StoreStep::Commit, e))
    }
}
