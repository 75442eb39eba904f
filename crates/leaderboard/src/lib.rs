//! Leaderboard for finished games.
//!
//! - [`ScoreEntry`]: one submitted score with its timestamp and display date
//! - [`ScoreStore`]: the storage seam (`append` + `top_k`), with an in-memory
//!   [`MemoryStore`] and a file-backed [`SqliteStore`]
//! - [`Leaderboard`]: submits scores and reads the top list through a store

pub mod entry;
pub mod sqlite;
pub mod store;

use chrono::{DateTime, Local};
use log::{info, warn};

pub use entry::{DEFAULT_NAME, ScoreEntry, normalize_name};
pub use sqlite::SqliteStore;
pub use store::{MemoryStore, ScoreStore, StoreError};

/// Number of entries shown on the board.
pub const DEFAULT_TOP_K: usize = 10;

pub struct Leaderboard<S> {
    store: S,
    top_k: usize,
    placeholder: String,
}

impl<S: ScoreStore> Leaderboard<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            top_k: DEFAULT_TOP_K,
            placeholder: DEFAULT_NAME.to_string(),
        }
    }

    /// Change how many entries `top` returns (at least one).
    pub fn with_top_k(mut self, k: usize) -> Self {
        self.top_k = k.max(1);
        self
    }

    /// Name used for blank submissions.
    pub fn with_placeholder(mut self, name: impl Into<String>) -> Self {
        self.placeholder = name.into();
        self
    }

    /// Store `score` under `name` at the current local time.
    pub fn submit(&mut self, name: &str, score: u64) -> Result<ScoreEntry, StoreError> {
        self.submit_at(name, score, Local::now())
    }

    pub fn submit_at<Tz: chrono::TimeZone>(
        &mut self,
        name: &str,
        score: u64,
        now: DateTime<Tz>,
    ) -> Result<ScoreEntry, StoreError>
    where
        Tz::Offset: std::fmt::Display,
    {
        let entry = ScoreEntry::with_placeholder(name, &self.placeholder, score, now);
        match self.store.append(&entry) {
            Ok(()) => {
                info!("saved score {} for {}", entry.score, entry.name);
                Ok(entry)
            }
            Err(e) => {
                warn!("saving score {} for {} failed: {e}", entry.score, entry.name);
                Err(e)
            }
        }
    }

    /// Highest scores, at most `top_k` of them.
    pub fn top(&self) -> Result<Vec<ScoreEntry>, StoreError> {
        self.store.top_k(self.top_k)
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn submit_then_top() {
        let mut board = Leaderboard::new(MemoryStore::new()).with_top_k(2);
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();
        board.submit_at("  ", 300, at).unwrap();
        board.submit_at("eve", 500, at).unwrap();
        board.submit_at("max", 100, at).unwrap();
        let top = board.top().unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "eve");
        assert_eq!(top[1].name, "Anonim");
    }

    #[test]
    fn custom_placeholder_and_minimum_k() {
        let mut board = Leaderboard::new(MemoryStore::new())
            .with_top_k(0)
            .with_placeholder("player");
        assert_eq!(board.top_k(), 1);
        let entry = board.submit("", 8).unwrap();
        assert_eq!(entry.name, "player");
        assert_eq!(board.store().len(), 1);
    }

    #[test]
    fn failed_submit_is_reported_and_not_stored() {
        let mut board = Leaderboard::new(MemoryStore::new());
        board.store_mut().set_failure(Some("network down"));
        let err = board.submit("zed", 64).unwrap_err();
        assert!(err.to_string().contains("network down"));
        board.store_mut().set_failure(None);
        assert!(board.top().unwrap().is_empty());
        board.submit("zed", 64).unwrap();
        assert_eq!(board.top().unwrap().len(), 1);
    }
}
