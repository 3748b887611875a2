//! Item codecs
//!
//! A codec converts a [`PoolItem`] to the bytes written to the store
//! ("deflate") and parses stored bytes back into an item ("inflate").
//!
//! # Example
//!
//! ```
//! use durapool_core::{BincodeCodec, ItemCodec, PoolItem};
//!
//! # fn main() -> durapool_core::Result<()> {
//! let codec = BincodeCodec;
//! let bytes = codec.deflate(&PoolItem::Int(7))?;
//! assert_eq!(codec.inflate(&bytes)?, PoolItem::Int(7));
//! # Ok(())
//! # }
//! ```

use crate::{PoolError, PoolItem, Result};
use bincode::Options;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// Converts pool items to and from their stored byte form
pub trait ItemCodec: Send + Sync {
    /// Serialize an item for writing
    fn deflate(&self, item: &PoolItem) -> Result<Vec<u8>>;

    /// Parse stored bytes back into an item
    fn inflate(&self, bytes: &[u8]) -> Result<PoolItem>;

    /// Codec name, used in logs
    fn name(&self) -> &str;
}

/// Compact binary codec that preserves the item variant (default)
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeCodec;

fn bincode_options() -> impl Options {
    bincode::DefaultOptions::new().with_fixint_encoding()
}

impl ItemCodec for BincodeCodec {
    fn deflate(&self, item: &PoolItem) -> Result<Vec<u8>> {
        bincode_options()
            .serialize(item)
            .map_err(|e| PoolError::Codec(e.to_string()))
    }

    fn inflate(&self, bytes: &[u8]) -> Result<PoolItem> {
        // Bounding reads by the input length keeps corrupt length prefixes
        // from triggering huge allocations.
        bincode_options()
            .with_limit(bytes.len() as u64)
            .deserialize(bytes)
            .map_err(|e| PoolError::Codec(e.to_string()))
    }

    fn name(&self) -> &str {
        "bincode"
    }
}

/// JSON codec (human-readable records)
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl ItemCodec for JsonCodec {
    fn deflate(&self, item: &PoolItem) -> Result<Vec<u8>> {
        serde_json::to_vec(item).map_err(|e| PoolError::Codec(e.to_string()))
    }

    fn inflate(&self, bytes: &[u8]) -> Result<PoolItem> {
        serde_json::from_slice(bytes).map_err(|e| PoolError::Codec(e.to_string()))
    }

    fn name(&self) -> &str {
        "json"
    }
}

/// Plain-text codec
///
/// Stores the canonical textual form of an item. On inflate, text that parses
/// as an `i64` comes back as [`PoolItem::Int`], anything else as
/// [`PoolItem::Text`]. The variant is therefore not preserved for numeric
/// text or for byte items, but the textual form always is.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextCodec;

impl ItemCodec for TextCodec {
    fn deflate(&self, item: &PoolItem) -> Result<Vec<u8>> {
        Ok(item.as_text()?.into_owned().into_bytes())
    }

    fn inflate(&self, bytes: &[u8]) -> Result<PoolItem> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| PoolError::Codec(format!("stored value is not UTF-8: {}", e)))?;

        // Only canonical decimal ("7", not "+7" or "007") becomes an Int
        Ok(match text.parse::<i64>() {
            Ok(v) if v.to_string() == text => PoolItem::Int(v),
            _ => PoolItem::Text(text.to_string()),
        })
    }

    fn name(&self) -> &str {
        "text"
    }
}

/// Built-in codecs, selectable by name (e.g. `?codec=json` in a pool URI)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodecKind {
    #[default]
    Bincode,
    Json,
    Text,
}

impl CodecKind {
    pub fn build(self) -> Arc<dyn ItemCodec> {
        match self {
            CodecKind::Bincode => Arc::new(BincodeCodec),
            CodecKind::Json => Arc::new(JsonCodec),
            CodecKind::Text => Arc::new(TextCodec),
        }
    }
}

impl FromStr for CodecKind {
    type Err = PoolError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bincode" => Ok(CodecKind::Bincode),
            "json" => Ok(CodecKind::Json),
            "text" => Ok(CodecKind::Text),
            other => Err(PoolError::Config(format!(
                "unknown codec '{}' (expected bincode, json or text)",
                other
            ))),
        }
    }
}
