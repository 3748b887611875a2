use durapool_core::{
    observe::{self, PopOutcome},
    ItemCodec, Pool, PoolConfig, PoolError, PoolItem, PoolMeta, Result, Sequence,
    StoreStep, SyncMode,
};
use lmdb::{DatabaseFlags, Environment, EnvironmentFlags};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use crate::iter::{count_records, RecordScan};
use crate::keys::{key_to_sequence, SEQUENCE_DB};
use crate::txn::{first_record, read_last_sequence, PoolWriteTxn};

/// Permissions for a newly created store file (owner read/write only)
const STORE_FILE_MODE: u32 = 0o600;

/// LMDB-backed FIFO pool
///
/// Records live in one named database (the bucket), keyed by fixed-width
/// sequence numbers so the first key is always the oldest item. Each push and
/// each pop is a single LMDB write transaction; LMDB's single-writer lock
/// serializes them across threads.
pub struct LmdbPool {
    env: Environment,
    records: lmdb::Database,
    sequences: lmdb::Database,
    bucket: String,
    path: PathBuf,
    codec: Arc<dyn ItemCodec>,
}

impl LmdbPool {
    /// Open a pool from a connection URI (`lmdb://<bucket>?dsn=<path>`)
    pub fn open(uri: &str) -> Result<Self> {
        Self::open_with_config(PoolConfig::from_uri(uri)?)
    }

    /// Open a pool from a URI, storing items with `codec` instead of the
    /// codec named in the URI
    pub fn open_with_codec(uri: &str, codec: Arc<dyn ItemCodec>) -> Result<Self> {
        Self::open_with(PoolConfig::from_uri(uri)?, codec)
    }

    pub fn open_with_config(config: PoolConfig) -> Result<Self> {
        let codec = config.codec.build();
        Self::open_with(config, codec)
    }

    /// Open a pool from an explicit configuration and codec
    ///
    /// Creates the store file (mode `0600`) and the bucket if they do not
    /// exist yet. Fails without returning a pool if any step fails.
    ///
    /// Bucket creation and counter initialisation commit separately, so a
    /// failed counter write can leave an empty bucket with no counter. The
    /// next open initialises the missing counter.
    pub fn open_with(config: PoolConfig, codec: Arc<dyn ItemCodec>) -> Result<Self> {
        config.validate()?;
        if config.bucket == SEQUENCE_DB {
            return Err(PoolError::Config(format!(
                "bucket name '{}' is reserved",
                SEQUENCE_DB
            )));
        }

        if let Some(parent) = config.dsn.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut env_builder = Environment::new();
        env_builder.set_max_dbs(2); // bucket, sequences
        env_builder.set_map_size(config.map_size);
        env_builder.set_max_readers(config.max_readers);

        // Single data file at `dsn` (plus `<dsn>-lock`), not a directory
        let mut flags = EnvironmentFlags::NO_SUB_DIR;
        match config.sync_mode {
            SyncMode::Full => {}
            SyncMode::NoMetaSync => {
                flags.insert(EnvironmentFlags::NO_META_SYNC);
            }
            SyncMode::NoSync => {
                flags.insert(EnvironmentFlags::NO_SYNC);
            }
        }
        env_builder.set_flags(flags);

        let env = env_builder
            .open_with_permissions(&config.dsn, STORE_FILE_MODE as _)
            .map_err(|e| PoolError::store(StoreStep::OpenEnvironment, e))?;

        // create_db runs in its own write transaction, committed on success
        // and aborted on failure
        let records = env
            .create_db(Some(config.bucket.as_str()), DatabaseFlags::empty())
            .map_err(|e| PoolError::store(StoreStep::CreateBucket, e))?;
        let sequences = env
            .create_db(Some(SEQUENCE_DB), DatabaseFlags::empty())
            .map_err(|e| PoolError::store(StoreStep::CreateBucket, e))?;

        let last_sequence = {
            let txn = env
                .begin_rw_txn()
                .map_err(|e| PoolError::store(StoreStep::BeginTransaction, e))?;
            let mut txn = PoolWriteTxn::new(txn, records, sequences, &config.bucket);
            let last = txn.init_sequence()?;
            txn.commit()?;
            last
        };

        tracing::info!(
            bucket = %config.bucket,
            path = %config.dsn.display(),
            codec = codec.name(),
            last_sequence,
            "LMDB pool opened"
        );

        Ok(Self {
            env,
            records,
            sequences,
            bucket: config.bucket,
            path: config.dsn,
            codec,
        })
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Path of the store's data file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn codec(&self) -> &Arc<dyn ItemCodec> {
        &self.codec
    }

    fn begin_write(&self) -> Result<PoolWriteTxn<'_>> {
        let txn = self
            .env
            .begin_rw_txn()
            .map_err(|e| PoolError::store(StoreStep::BeginTransaction, e))?;
        Ok(PoolWriteTxn::new(
            txn,
            self.records,
            self.sequences,
            &self.bucket,
        ))
    }

    fn push_record(&self, item: &PoolItem) -> Result<Sequence> {
        // Encode before taking the writer lock; nothing is written on failure
        let value = self.codec.deflate(item)?;

        let mut txn = self.begin_write()?;
        let seq = txn.next_sequence()?;
        txn.put_record(seq, &value)?;
        txn.commit()?;

        tracing::debug!(bucket = %self.bucket, seq, kind = item.kind(), "pushed item");
        Ok(seq)
    }

    fn pop_record(&self) -> Result<Option<PoolItem>> {
        let mut txn = self.begin_write()?;

        let Some((key, value)) = txn.first_record()? else {
            return Ok(None);
        };

        // A record that does not decode stays where it is: returning here
        // drops the transaction, which aborts it.
        let item = self.codec.inflate(&value).map_err(|e| {
            tracing::warn!(
                bucket = %self.bucket,
                key = %String::from_utf8_lossy(&key),
                error = %e,
                "failed to decode head of pool"
            );
            e
        })?;

        txn.delete_record(&key)?;
        txn.commit()?;

        tracing::debug!(
            bucket = %self.bucket,
            seq = ?key_to_sequence(&key),
            kind = item.kind(),
            "popped item"
        );
        Ok(Some(item))
    }

    fn scan(&self) -> RecordScan {
        match self.env.begin_ro_txn() {
            Ok(txn) => count_records(&txn, self.records),
            Err(e) => RecordScan {
                count: 0,
                error: Some(PoolError::store(StoreStep::BeginTransaction, e)),
            },
        }
    }

    /// Count records, failing on any store error
    ///
    /// Unlike [`Pool::length`], which returns a partial count when the scan
    /// hits an error, this surfaces the error.
    pub fn try_length(&self) -> Result<u64> {
        let scan = self.scan();
        match scan.error {
            Some(e) => Err(e),
            None => Ok(scan.count),
        }
    }

    /// Snapshot of the bucket's length, counter and head
    pub fn meta(&self) -> Result<PoolMeta> {
        let txn = self
            .env
            .begin_ro_txn()
            .map_err(|e| PoolError::store(StoreStep::BeginTransaction, e))?;

        let last_sequence = read_last_sequence(&txn, self.sequences, &self.bucket)?;
        let head = first_record(&txn, self.records)?.and_then(|(key, _)| key_to_sequence(&key));
        let scan = count_records(&txn, self.records);
        if let Some(e) = scan.error {
            return Err(e);
        }

        Ok(PoolMeta {
            bucket: self.bucket.clone(),
            length: scan.count,
            last_sequence,
            head,
        })
    }
}

impl Pool for LmdbPool {
    fn push(&self, item: &PoolItem) -> Result<()> {
        let start = Instant::now();
        let result = self.push_record(item);
        observe::record_push(start.elapsed(), result.is_ok());
        result.map(|_| ())
    }

    fn pop(&self) -> Result<Option<PoolItem>> {
        let start = Instant::now();
        let result = self.pop_record();
        let outcome = match &result {
            Ok(Some(_)) => PopOutcome::Item,
            Ok(None) => PopOutcome::Empty,
            Err(_) => PopOutcome::Failed,
        };
        observe::record_pop(start.elapsed(), outcome);
        result
    }

    fn length(&self) -> u64 {
        let scan = self.scan();
        if let Some(e) = scan.error {
            tracing::warn!(
                bucket = %self.bucket,
                counted = scan.count,
                error = %e,
                "length scan stopped early"
            );
        }
        observe::set_length(scan.count);
        scan.count
    }
}

impl std::fmt::Debug for LmdbPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LmdbPool")
            .field("bucket", &self.bucket)
            .field("path", &self.path)
            .field("codec", &self.codec.name())
            .finish()
    }
}
