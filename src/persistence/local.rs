//! Browser LocalStorage backend

use super::{ScoreStore, StoreError, parse_stored};
use crate::platform::storage::local_storage;

/// [`ScoreStore`] over `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl LocalStore {
    pub fn new() -> Self {
        Self
    }
}

impl ScoreStore for LocalStore {
    fn get(&self, key: &str) -> Result<u64, StoreError> {
        let storage = local_storage().ok_or(StoreError::Unavailable)?;
        let raw = storage
            .get_item(key)
            .map_err(|e| StoreError::Access(format!("{:?}", e)))?;
        match raw {
            Some(raw) => parse_stored(key, &raw),
            None => Ok(0),
        }
    }

    fn set(&mut self, key: &str, value: u64) -> Result<(), StoreError> {
        let storage = local_storage().ok_or(StoreError::Unavailable)?;
        storage
            .set_item(key, &value.to_string())
            .map_err(|e| StoreError::Access(format!("{:?}", e)))
    }
}
