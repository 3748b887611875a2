//! Pool items
//!
//! A [`PoolItem`] is the value type that flows through every pool. It is a
//! closed set of shapes; callers convert out of it with the checked `as_*`
//! accessors, which return [`PoolError::Codec`] when the shape does not match.

use crate::{PoolError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PoolItem {
    Text(String),
    Int(i64),
    Bytes(Vec<u8>),
}

impl PoolItem {
    /// Short name of the variant, used in error messages and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PoolItem::Text(_) => "text",
            PoolItem::Int(_) => "int",
            PoolItem::Bytes(_) => "bytes",
        }
    }

    /// Canonical integer form.
    ///
    /// Text and UTF-8 bytes are accepted when they parse as a base-10 `i64`.
    pub fn as_int(&self) -> Result<i64> {
        match self {
            PoolItem::Int(v) => Ok(*v),
            PoolItem::Text(s) => parse_int(s),
            PoolItem::Bytes(b) => {
                let s = std::str::from_utf8(b)
                    .map_err(|e| PoolError::Codec(format!("bytes are not UTF-8: {}", e)))?;
                parse_int(s)
            }
        }
    }

    /// Borrow the text of a `Text` item, or UTF-8 bytes as text.
    pub fn as_text(&self) -> Result<Cow<'_, str>> {
        match self {
            PoolItem::Text(s) => Ok(Cow::Borrowed(s)),
            PoolItem::Int(v) => Ok(Cow::Owned(v.to_string())),
            PoolItem::Bytes(b) => std::str::from_utf8(b)
                .map(Cow::Borrowed)
                .map_err(|e| PoolError::Codec(format!("bytes are not UTF-8: {}", e))),
        }
    }

    /// Raw byte view. Integers are rendered in decimal.
    pub fn as_bytes(&self) -> Cow<'_, [u8]> {
        match self {
            PoolItem::Text(s) => Cow::Borrowed(s.as_bytes()),
            PoolItem::Int(v) => Cow::Owned(v.to_string().into_bytes()),
            PoolItem::Bytes(b) => Cow::Borrowed(b),
        }
    }
}

fn parse_int(s: &str) -> Result<i64> {
    s.trim()
        .parse::<i64>()
        .map_err(|e| PoolError::Codec(format!("'{}' is not an integer: {}", s, e)))
}

impl fmt::Display for PoolItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolItem::Text(s) => f.write_str(s),
            PoolItem::Int(v) => write!(f, "{}", v),
            PoolItem::Bytes(b) => f.write_str(&String::from_utf8_lossy(b)),
        }
    }
}

impl From<&str> for PoolItem {
    fn from(value: &str) -> Self {
        PoolItem::Text(value.to_string())
    }
}

impl From<String> for PoolItem {
    fn from(value: String) -> Self {
        PoolItem::Text(value)
    }
}

impl From<i64> for PoolItem {
    fn from(value: i64) -> Self {
        PoolItem::Int(value)
    }
}

impl From<Vec<u8>> for PoolItem {
    fn from(value: Vec<u8>) -> Self {
        PoolItem::Bytes(value)
    }
}

impl From<&[u8]> for PoolItem {
    fn from(value: &[u8]) -> Self {
        PoolItem::Bytes(value.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_int_accepts_numeric_text() {
        assert_eq!(PoolItem::Int(7).as_int().unwrap(), 7);
        assert_eq!(PoolItem::from("42").as_int().unwrap(), 42);
        assert_eq!(PoolItem::from(b"-3".as_slice()).as_int().unwrap(), -3);
    }

    #[test]
    fn test_as_int_rejects_non_numeric() {
        let err = PoolItem::from("a").as_int().unwrap_err();
        assert!(err.is_codec());

        let err = PoolItem::Bytes(vec![0xff, 0xfe]).as_int().unwrap_err();
        assert!(err.is_codec());
    }

    #[test]
    fn test_as_text() {
        assert_eq!(PoolItem::from("hello").as_text().unwrap(), "hello");
        assert_eq!(PoolItem::Int(12).as_text().unwrap(), "12");
        assert!(PoolItem::Bytes(vec![0xc3, 0x28]).as_text().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(PoolItem::from("b").to_string(), "b");
        assert_eq!(PoolItem::Int(-9).to_string(), "-9");
        assert_eq!(PoolItem::from(b"raw".to_vec()).to_string(), "raw");
    }

    #[test]
    fn test_as_bytes() {
        assert_eq!(PoolItem::Int(10).as_bytes().as_ref(), b"10");
        assert_eq!(PoolItem::from("x").as_bytes().as_ref(), b"x");
    }
}
