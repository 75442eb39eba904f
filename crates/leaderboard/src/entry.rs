use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Name stored when the player leaves the name blank.
pub const DEFAULT_NAME: &str = "Anonim";

/// Day-first date shown next to each score, e.g. `19.10.2026`.
pub const DISPLAY_DATE_FORMAT: &str = "%d.%m.%Y";

/// One submitted score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub score: u64,
    pub timestamp: DateTime<Utc>,
    pub display_date: String,
}

impl ScoreEntry {
    /// Build an entry at `now`, trimming the name and falling back to
    /// [`DEFAULT_NAME`] when it is blank. The display date is taken in `now`'s
    /// own time zone.
    pub fn new<Tz: TimeZone>(name: &str, score: u64, now: DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self::with_placeholder(name, DEFAULT_NAME, score, now)
    }

    pub fn with_placeholder<Tz: TimeZone>(
        name: &str,
        placeholder: &str,
        score: u64,
        now: DateTime<Tz>,
    ) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            name: normalize_name(name, placeholder),
            score,
            display_date: now.format(DISPLAY_DATE_FORMAT).to_string(),
            timestamp: now.with_timezone(&Utc),
        }
    }
}

/// Trimmed `name`, or `placeholder` if nothing is left.
pub fn normalize_name(name: &str, placeholder: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        placeholder.to_string()
    } else {
        trimmed.to_string()
    }
}
