use crate::codec::CodecKind;
use crate::{PoolError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use percent_encoding::percent_decode_str;
use std::str::FromStr;
use url::Url;

/// Configuration for a durable pool
///
/// Usually built from a connection URI of the form
/// `<scheme>://<bucket>?dsn=<path>`, see [`PoolConfig::from_uri`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Name of the bucket (named database) holding this pool's records
    pub bucket: String,

    /// Path to the store's data file
    pub dsn: PathBuf,

    /// Maximum map size for LMDB (in bytes)
    /// Default: 1GB
    #[serde(default = "default_map_size")]
    pub map_size: usize,

    /// Maximum number of concurrent read transactions
    /// Default: 126
    #[serde(default = "default_max_readers")]
    pub max_readers: u32,

    /// Sync mode for durability
    #[serde(default)]
    pub sync_mode: SyncMode,

    /// Codec used to store items (default: bincode)
    #[serde(default)]
    pub codec: CodecKind,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SyncMode {
    /// `fsync()` on every commit.
    ///
    /// Committed pushes and pops survive power loss and OS crashes.
    Full,

    /// Skips syncing the meta page on each commit (default).
    ///
    /// Data pages are still synced. An OS crash may lose the last committed
    /// transaction but leaves the store consistent.
    #[default]
    NoMetaSync,

    /// No `fsync()` at all. Only for tests and throwaway pools.
    NoSync,
}

impl FromStr for SyncMode {
    type Err = PoolError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "full" => Ok(SyncMode::Full),
            "no_meta_sync" => Ok(SyncMode::NoMetaSync),
            "no_sync" => Ok(SyncMode::NoSync),
            other => Err(PoolError::Config(format!(
                "unknown sync mode '{}' (expected full, no_meta_sync or no_sync)",
                other
            ))),
        }
    }
}

fn default_map_size() -> usize {
    1024 * 1024 * 1024 // 1GB
}

fn default_max_readers() -> u32 {
    126
}

impl PoolConfig {
    pub fn new(bucket: impl Into<String>, dsn: impl Into<PathBuf>) -> Self {
        Self {
            bucket: bucket.into(),
            dsn: dsn.into(),
            map_size: default_map_size(),
            max_readers: default_max_readers(),
            sync_mode: SyncMode::default(),
            codec: CodecKind::default(),
        }
    }

    pub fn with_map_size(mut self, map_size: usize) -> Self {
        self.map_size = map_size;
        self
    }

    pub fn with_max_readers(mut self, max_readers: u32) -> Self {
        self.max_readers = max_readers;
        self
    }

    pub fn with_sync_mode(mut self, sync_mode: SyncMode) -> Self {
        self.sync_mode = sync_mode;
        self
    }

    pub fn with_codec(mut self, codec: CodecKind) -> Self {
        self.codec = codec;
        self
    }

    /// Parse a connection URI
    ///
    /// The authority is the bucket name and the `dsn` query parameter is the
    /// store path; both are required. Optional parameters: `map_size`,
    /// `max_readers`, `sync` (`full`, `no_meta_sync`, `no_sync`) and `codec`
    /// (`bincode`, `json`, `text`).
    pub fn from_uri(uri: &str) -> Result<Self> {
        let url = Url::parse(uri)
            .map_err(|e| PoolError::Config(format!("invalid pool URI '{}': {}", uri, e)))?;

        // Non-special schemes keep the host percent-encoded
        let bucket = percent_decode_str(url.host_str().unwrap_or_default())
            .decode_utf8()
            .map_err(|e| PoolError::Config(format!("invalid bucket name in '{}': {}", uri, e)))?;
        if bucket.is_empty() {
            return Err(PoolError::Config("Missing bucket".into()));
        }

        let mut dsn = None;
        let mut config = Self::new(bucket.into_owned(), PathBuf::new());

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "dsn" => dsn = Some(value.into_owned()),
                "map_size" => {
                    config.map_size = parse_param("map_size", &value)?;
                }
                "max_readers" => {
                    config.max_readers = parse_param("max_readers", &value)?;
                }
                "sync" => config.sync_mode = value.parse()?,
                "codec" => config.codec = value.parse()?,
                other => {
                    tracing::warn!(param = other, "ignoring unknown pool URI parameter");
                }
            }
        }

        match dsn {
            Some(dsn) if !dsn.is_empty() => config.dsn = PathBuf::from(dsn),
            _ => return Err(PoolError::Config("Missing dsn".into())),
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the invariants `open` relies on
    pub fn validate(&self) -> Result<()> {
        if self.bucket.is_empty() {
            return Err(PoolError::Config("Missing bucket".into()));
        }
        if self.dsn.as_os_str().is_empty() {
            return Err(PoolError::Config("Missing dsn".into()));
        }
        if self.map_size == 0 {
            return Err(PoolError::Config("map_size must be greater than 0".into()));
        }
        if self.max_readers == 0 {
            return Err(PoolError::Config(
                "max_readers must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

fn parse_param<T: FromStr>(name: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| PoolError::Config(format!("invalid {} '{}': {}", name, value, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_uri_minimal() {
        let config = PoolConfig::from_uri("lmdb://test?dsn=/tmp/pool.mdb").unwrap();
        assert_eq!(config.bucket, "test");
        assert_eq!(config.dsn, PathBuf::from("/tmp/pool.mdb"));
        assert_eq!(config.map_size, default_map_size());
        assert_eq!(config.sync_mode, SyncMode::NoMetaSync);
    }

    #[test]
    fn test_from_uri_with_options() {
        let config = PoolConfig::from_uri(
            "lmdb://jobs?dsn=%2Fvar%2Fdata%2Fjobs.mdb&map_size=1048576&max_readers=8&sync=full&codec=json",
        )
        .unwrap();
        assert_eq!(config.bucket, "jobs");
        assert_eq!(config.dsn, PathBuf::from("/var/data/jobs.mdb"));
        assert_eq!(config.map_size, 1_048_576);
        assert_eq!(config.max_readers, 8);
        assert_eq!(config.sync_mode, SyncMode::Full);
        assert_eq!(config.codec, CodecKind::Json);
    }

    #[test]
    fn test_bucket_is_percent_decoded() {
        let config = PoolConfig::from_uri("lmdb://my%20jobs?dsn=/tmp/pool.mdb").unwrap();
        assert_eq!(config.bucket, "my jobs");

        let err = PoolConfig::from_uri("lmdb://bad%FF?dsn=/tmp/pool.mdb").unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_missing_bucket() {
        let err = PoolConfig::from_uri("lmdb://?dsn=/tmp/pool.mdb").unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("Missing bucket"));
    }

    #[test]
    fn test_missing_or_empty_dsn() {
        let err = PoolConfig::from_uri("lmdb://test").unwrap_err();
        assert!(err.to_string().contains("Missing dsn"));

        let err = PoolConfig::from_uri("lmdb://test?dsn=").unwrap_err();
        assert!(err.to_string().contains("Missing dsn"));
    }

    #[test]
    fn test_malformed_uri() {
        assert!(PoolConfig::from_uri("not a uri").unwrap_err().is_config());
    }

    #[test]
    fn test_invalid_options() {
        assert!(PoolConfig::from_uri("lmdb://t?dsn=x&map_size=big").is_err());
        assert!(PoolConfig::from_uri("lmdb://t?dsn=x&sync=sometimes").is_err());
        assert!(PoolConfig::from_uri("lmdb://t?dsn=x&max_readers=0").is_err());
        assert!(PoolConfig::from_uri("lmdb://t?dsn=x&codec=xml").is_err());
    }

    #[test]
    fn test_config_serde_defaults() {
        let config: PoolConfig =
            serde_json::from_str(r#"{"bucket": "b", "dsn": "/tmp/b.mdb"}"#).unwrap();
        assert_eq!(config, PoolConfig::new("b", "/tmp/b.mdb"));

        let config: PoolConfig =
            serde_json::from_str(r#"{"bucket": "b", "dsn": "x", "sync_mode": "no_sync"}"#)
                .unwrap();
        assert_eq!(config.sync_mode, SyncMode::NoSync);
    }
}
