//! Best-score storage
//!
//! A store is an integer key-value map. Missing keys read as zero. Values are
//! written as decimal strings so they stay readable in browser dev tools.

#[cfg(target_arch = "wasm32")]
pub mod local;

use std::collections::HashMap;

use thiserror::Error;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;

/// Storage failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("storage is unavailable")]
    Unavailable,
    #[error("storage access failed: {0}")]
    Access(String),
    #[error("stored value for {key:?} is not an integer: {value:?}")]
    Corrupt { key: String, value: String },
}

/// Integer key-value storage
pub trait ScoreStore {
    /// Read `key`, zero if absent
    fn get(&self, key: &str) -> Result<u64, StoreError>;
    /// Write `key`
    fn set(&mut self, key: &str, value: u64) -> Result<(), StoreError>;
}

/// Parse a stored value
pub fn parse_stored(key: &str, raw: &str) -> Result<u64, StoreError> {
    raw.trim().parse().map_err(|_| StoreError::Corrupt {
        key: key.to_string(),
        value: raw.to_string(),
    })
}

/// Volatile store for tests and native runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with a single value
    pub fn with_value(key: &str, value: u64) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }

    /// Put a raw string in place (simulates foreign or damaged data)
    pub fn insert_raw(&mut self, key: &str, raw: &str) {
        self.values.insert(key.to_string(), raw.to_string());
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Result<u64, StoreError> {
        match self.values.get(key) {
            Some(raw) => parse_stored(key, raw),
            None => Ok(0),
        }
    }

    fn set(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_reads_zero() {
        let store = MemoryStore::new();
        assert_eq!(store.get("orb_pop_best"), Ok(0));
    }

    #[test]
    fn test_set_then_get() {
        let mut store = MemoryStore::new();
        store.set("k", 420).unwrap();
        assert_eq!(store.get("k"), Ok(420));
    }

    #[test]
    fn test_corrupt_value() {
        let mut store = MemoryStore::new();
        store.insert_raw("k", "lots");
        assert!(matches!(store.get("k"), Err(StoreError::Corrupt { .. })));
        assert_eq!(parse_stored("k", " 15 "), Ok(15));
    }
}
