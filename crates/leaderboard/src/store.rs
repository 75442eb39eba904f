use thiserror::Error;

use crate::entry::ScoreEntry;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed timestamp in store: {0}")]
    Timestamp(#[from] chrono::ParseError),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Append-only score storage.
///
/// `top_k` returns at most `k` entries, highest score first; equal scores
/// keep submission order.
pub trait ScoreStore {
    fn append(&mut self, entry: &ScoreEntry) -> Result<(), StoreError>;
    fn top_k(&self, k: usize) -> Result<Vec<ScoreEntry>, StoreError>;
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn append(&mut self, entry: &ScoreEntry) -> Result<(), StoreError> {
        (**self).append(entry)
    }

    fn top_k(&self, k: usize) -> Result<Vec<ScoreEntry>, StoreError> {
        (**self).top_k(k)
    }
}

/// In-memory store for tests and offline play.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: Vec<ScoreEntry>,
    failure: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following call fail with `reason` (or succeed again with `None`).
    pub fn set_failure(&mut self, reason: Option<&str>) {
        self.failure = reason.map(str::to_string);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn check(&self) -> Result<(), StoreError> {
        match &self.failure {
            Some(reason) => Err(StoreError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

impl ScoreStore for MemoryStore {
    fn append(&mut self, entry: &ScoreEntry) -> Result<(), StoreError> {
        self.check()?;
        self.entries.push(entry.clone());
        Ok(())
    }

    fn top_k(&self, k: usize) -> Result<Vec<ScoreEntry>, StoreError> {
        self.check()?;
        let mut sorted = self.entries.clone();
        // stable: ties stay in submission order
        sorted.sort_by(|a, b| b.score.cmp(&a.score));
        sorted.truncate(k);
        Ok(sorted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn entry(name: &str, score: u64) -> ScoreEntry {
        ScoreEntry::new(name, score, Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap())
    }

    #[test]
    fn top_k_orders_by_score_then_submission() {
        let mut store = MemoryStore::new();
        for (name, score) in [("a", 100), ("b", 300), ("c", 100), ("d", 200)] {
            store.append(&entry(name, score)).unwrap();
        }
        let names: Vec<String> = store.top_k(10).unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, ["b", "d", "a", "c"]);
        assert_eq!(store.top_k(2).unwrap().len(), 2);
        assert!(store.top_k(0).unwrap().is_empty());
    }

    #[test]
    fn failure_switch_blocks_reads_and_writes() {
        let mut store = MemoryStore::new();
        store.set_failure(Some("offline"));
        assert!(matches!(store.append(&entry("a", 1)), Err(StoreError::Unavailable(r)) if r == "offline"));
        assert!(store.top_k(10).is_err());
        assert!(store.is_empty());
        store.set_failure(None);
        store.append(&entry("a", 1)).unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn boxed_store_delegates() {
        let mut store: Box<dyn ScoreStore> = Box::new(MemoryStore::new());
        store.append(&entry("x", 5)).unwrap();
        assert_eq!(store.top_k(1).unwrap()[0].name, "x");
    }
}
