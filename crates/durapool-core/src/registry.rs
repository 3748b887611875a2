//! Scheme-based pool registry
//!
//! Maps a URI scheme (`lmdb`, ...) to the constructor that opens a pool for
//! that scheme. Registration is explicit: nothing is added until a caller
//! invokes [`PoolRegistry::register`], so the set of available backends is
//! always visible at the call site.
//!
//! # Example
//!
//! ```
//! use durapool_core::{Pool, PoolRegistry, Result};
//!
//! fn open_nothing(_uri: &str) -> Result<Box<dyn Pool>> {
//!     Err(durapool_core::PoolError::Config("unavailable".into()))
//! }
//!
//! let mut registry = PoolRegistry::new();
//! registry.register("null", open_nothing).unwrap();
//! assert!(registry.contains("null"));
//! ```

use crate::{Pool, PoolError, Result};
use std::collections::BTreeMap;

/// Opens a pool from its full connection URI
pub type PoolConstructor = fn(&str) -> Result<Box<dyn Pool>>;

#[derive(Default)]
pub struct PoolRegistry {
    constructors: BTreeMap<String, PoolConstructor>,
}

impl PoolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor for a scheme
    ///
    /// Schemes are case-insensitive. Registering the same scheme twice is a
    /// configuration error.
    pub fn register(&mut self, scheme: &str, constructor: PoolConstructor) -> Result<()> {
        let scheme = scheme.to_ascii_lowercase();
        if self.constructors.contains_key(&scheme) {
            return Err(PoolError::Config(format!(
                "pool scheme '{}' is already registered",
                scheme
            )));
        }

        tracing::debug!(scheme = %scheme, "registered pool backend");
        self.constructors.insert(scheme, constructor);
        Ok(())
    }

    pub fn contains(&self, scheme: &str) -> bool {
        self.constructors
            .contains_key(&scheme.to_ascii_lowercase())
    }

    /// Registered schemes, sorted
    pub fn schemes(&self) -> Vec<&str> {
        self.constructors.keys().map(String::as_str).collect()
    }

    /// Open a pool, dispatching on the URI scheme
    pub fn open(&self, uri: &str) -> Result<Box<dyn Pool>> {
        let scheme = scheme_of(uri)?;
        let constructor = self.constructors.get(&scheme).ok_or_else(|| {
            PoolError::Config(format!("no pool backend registered for scheme '{}'", scheme))
        })?;

        constructor(uri)
    }
}

fn scheme_of(uri: &str) -> Result<String> {
    match uri.split_once("://") {
        Some((scheme, _)) if !scheme.is_empty() => Ok(scheme.to_ascii_lowercase()),
        _ => Err(PoolError::Config(format!(
            "pool URI '{}' has no scheme",
            uri
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PoolItem;
    use std::sync::Mutex;

    /// Single-item pool used to exercise dispatch
    struct SlotPool(Mutex<Option<PoolItem>>);

    impl Pool for SlotPool {
        fn push(&self, item: &PoolItem) -> Result<()> {
            *self.0.lock().unwrap() = Some(item.clone());
            Ok(())
        }

        fn pop(&self) -> Result<Option<PoolItem>> {
            Ok(self.0.lock().unwrap().take())
        }

        fn length(&self) -> u64 {
            self.0.lock().unwrap().is_some() as u64
        }
    }

    fn open_slot(_uri: &str) -> Result<Box<dyn Pool>> {
        Ok(Box::new(SlotPool(Mutex::new(None))))
    }

    #[test]
    fn test_open_dispatches_on_scheme() {
        let mut registry = PoolRegistry::new();
        registry.register("slot", open_slot).unwrap();

        let pool = registry.open("SLOT://anything").unwrap();
        assert!(pool.is_empty());
        pool.push(&PoolItem::from("a")).unwrap();
        assert_eq!(pool.length(), 1);
        assert_eq!(pool.pop().unwrap(), Some(PoolItem::from("a")));
    }

    #[test]
    fn test_unknown_scheme() {
        let registry = PoolRegistry::new();
        let err = registry.open("lmdb://test?dsn=x").err().unwrap();
        assert!(err.is_config());
    }

    #[test]
    fn test_missing_scheme() {
        let mut registry = PoolRegistry::new();
        registry.register("slot", open_slot).unwrap();
        assert!(registry.open("no-scheme-here").is_err());
        assert!(registry.open("://bucket").is_err());
    }

    #[test]
    fn test_duplicate_registration() {
        let mut registry = PoolRegistry::new();
        registry.register("slot", open_slot).unwrap();
        assert!(registry.register("Slot", open_slot).is_err());
        assert_eq!(registry.schemes(), vec!["slot"]);
    }
}
