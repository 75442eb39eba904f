use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, params};

use crate::entry::ScoreEntry;
use crate::store::{ScoreStore, StoreError};

/// Score store backed by a single SQLite file.
///
/// Schema:
/// - scores(id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT, score INT, timestamp TEXT, display_date TEXT)
///
/// `timestamp` is RFC 3339 in UTC; `id` gives submission order for ties.
pub struct SqliteStore {
    path: Option<PathBuf>,
    conn: Connection,
}

impl SqliteStore {
    /// Open or create the database at `path`, ensure schema exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;
        Self::init(conn, Some(path))
    }

    /// Private in-memory database; nothing survives the connection.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?, None)
    }

    fn init(conn: Connection, path: Option<PathBuf>) -> Result<Self, StoreError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS scores (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                score INT NOT NULL,
                timestamp TEXT NOT NULL,
                display_date TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS scores_by_score ON scores (score DESC, id ASC);
            "#,
        )?;
        Ok(Self { path, conn })
    }

    /// Number of stored entries.
    pub fn len(&self) -> Result<usize, StoreError> {
        let n: i64 = self.conn.query_row("SELECT COUNT(*) FROM scores", [], |row| row.get(0))?;
        Ok(n as usize)
    }

    /// Database file, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl ScoreStore for SqliteStore {
    fn append(&mut self, entry: &ScoreEntry) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO scores (name, score, timestamp, display_date) VALUES (?1, ?2, ?3, ?4)",
            params![
                entry.name,
                entry.score as i64,
                entry.timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true),
                entry.display_date,
            ],
        )?;
        Ok(())
    }

    fn top_k(&self, k: usize) -> Result<Vec<ScoreEntry>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT name, score, timestamp, display_date FROM scores
             ORDER BY score DESC, id ASC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![k as i64], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;
        let mut entries = Vec::new();
        for row in rows {
            let (name, score, timestamp, display_date) = row?;
            entries.push(ScoreEntry {
                name,
                score: score as u64,
                timestamp: DateTime::parse_from_rfc3339(&timestamp)?.with_timezone(&Utc),
                display_date,
            });
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::tempdir;

    fn entry(name: &str, score: u64, minute: u32) -> ScoreEntry {
        ScoreEntry::new(name, score, Utc.with_ymd_and_hms(2026, 10, 19, 12, minute, 0).unwrap())
    }

    #[test]
    fn basic_store_roundtrip() {
        let td = tempdir().unwrap();
        let path = td.path().join("nested").join("scores.db");
        {
            let mut store = SqliteStore::open(&path).expect("open store");
            assert_eq!(store.path(), Some(path.as_path()));
            store.append(&entry("ana", 1024, 1)).unwrap();
            store.append(&entry("", 4096, 2)).unwrap();
            store.append(&entry("dan", 1024, 3)).unwrap();
            assert_eq!(store.len().unwrap(), 3);
        }

        // Reopen and read back
        let store = SqliteStore::open(&path).unwrap();
        let top = store.top_k(10).unwrap();
        let names: Vec<&str> = top.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Anonim", "ana", "dan"]);
        assert_eq!(top[0].score, 4096);
        assert_eq!(top[0].display_date, "19.10.2026");
        assert_eq!(top[0].timestamp, Utc.with_ymd_and_hms(2026, 10, 19, 12, 2, 0).unwrap());
    }

    #[test]
    fn top_k_caps_results() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        for i in 0..15u32 {
            store.append(&entry(&format!("p{i}"), u64::from(i) * 10, i)).unwrap();
        }
        let top = store.top_k(10).unwrap();
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].name, "p14");
        assert_eq!(top[9].name, "p5");
        assert!(top.windows(2).all(|w| w[0].score >= w[1].score));
        assert!(store.path().is_none());
    }

    #[test]
    fn stored_entry_reads_back_unchanged() {
        let mut store = SqliteStore::open_in_memory().unwrap();
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap() + chrono::Duration::nanoseconds(123_456_789);
        let saved = entry("nina", 2048, 0);
        let saved = ScoreEntry { timestamp: at, ..saved };
        store.append(&saved).unwrap();
        assert_eq!(store.top_k(1).unwrap(), vec![saved]);
    }

    #[test]
    fn submitted_entry_matches_board() {
        let mut board = crate::Leaderboard::new(SqliteStore::open_in_memory().unwrap());
        let returned = board.submit("ivo", 512).unwrap();
        assert_eq!(board.top().unwrap(), vec![returned]);
    }

    #[test]
    fn empty_store_has_no_scores() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.top_k(10).unwrap().is_empty());
        assert_eq!(store.len().unwrap(), 0);
    }
}
