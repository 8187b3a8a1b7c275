//! Best score tracking
//!
//! Persisted through a [`ScoreStore`] under [`BEST_SCORE_KEY`].

use crate::consts::BEST_SCORE_KEY;
use crate::persistence::ScoreStore;

/// Best score across sessions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BestScore {
    value: u64,
}

impl BestScore {
    /// Read the stored best, falling back to zero on storage trouble
    pub fn load(store: &dyn ScoreStore) -> Self {
        match store.get(BEST_SCORE_KEY) {
            Ok(value) => {
                log::info!("Loaded best score {}", value);
                Self { value }
            }
            Err(e) => {
                log::warn!("Could not read best score ({}), starting from 0", e);
                Self::default()
            }
        }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    /// Check if a score beats the best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.value
    }

    /// Record a finished round's score
    ///
    /// Returns true if it became the new best. The in-memory best is updated
    /// even if the store rejects the write.
    pub fn submit(&mut self, score: u64, store: &mut dyn ScoreStore) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.value = score;
        match store.set(BEST_SCORE_KEY, score) {
            Ok(()) => log::info!("New best score {} saved", score),
            Err(e) => log::error!("New best score {} not saved: {}", score, e),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, StoreError};

    struct BrokenStore;

    impl ScoreStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<u64, StoreError> {
            Err(StoreError::Unavailable)
        }
        fn set(&mut self, _key: &str, _value: u64) -> Result<(), StoreError> {
            Err(StoreError::Access("quota exceeded".into()))
        }
    }

    #[test]
    fn test_higher_score_replaces_best() {
        let mut store = MemoryStore::with_value(BEST_SCORE_KEY, 50);
        let mut best = BestScore::load(&store);
        assert_eq!(best.value(), 50);

        assert!(best.submit(80, &mut store));
        assert_eq!(best.value(), 80);
        assert_eq!(store.get(BEST_SCORE_KEY), Ok(80));
    }

    #[test]
    fn test_equal_or_lower_score_keeps_best() {
        let mut store = MemoryStore::with_value(BEST_SCORE_KEY, 50);
        let mut best = BestScore::load(&store);

        assert!(!best.submit(50, &mut store));
        assert!(!best.submit(10, &mut store));
        assert_eq!(store.get(BEST_SCORE_KEY), Ok(50));
    }

    #[test]
    fn test_broken_store_is_not_fatal() {
        let mut store = BrokenStore;
        let mut best = BestScore::load(&store);
        assert_eq!(best.value(), 0);
        assert!(best.submit(30, &mut store));
        assert_eq!(best.value(), 30);
    }

    #[test]
    fn test_corrupt_value_loads_as_zero() {
        let mut store = MemoryStore::new();
        store.insert_raw(BEST_SCORE_KEY, "not-a-number");
        assert_eq!(BestScore::load(&store).value(), 0);
    }

    #[test]
    fn test_zero_never_qualifies_over_zero() {
        let best = BestScore::default();
        assert!(!best.qualifies(0));
        assert!(best.qualifies(1));
    }
}
