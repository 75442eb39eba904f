use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use twenty48_engine::{SpawnTable, WeightError};

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
pub struct SpawnWeight {
    pub value: u32,
    pub weight: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
pub struct Spawn {
    /// Tile values and their relative weights, in draw order.
    #[serde(default = "defaults::weights")]
    pub weights: Vec<SpawnWeight>,
}

impl Default for Spawn {
    fn default() -> Self {
        Self { weights: defaults::weights() }
    }
}

impl Spawn {
    pub fn table(&self) -> Result<SpawnTable, WeightError> {
        SpawnTable::new(self.weights.iter().map(|w| (w.value, w.weight)))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize)]
pub struct Leaderboard {
    #[serde(default = "defaults::db_path")]
    pub db_path: PathBuf,
    #[serde(default = "defaults::top_k")]
    pub top_k: usize,
    /// Stored when the player submits a blank name.
    #[serde(default = "defaults::default_name")]
    pub default_name: String,
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self {
            db_path: defaults::db_path(),
            top_k: defaults::top_k(),
            default_name: defaults::default_name(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Default, serde::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub spawn: Spawn,
    #[serde(default)]
    pub leaderboard: Leaderboard,
}

impl Config {
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(contents)?;
        cfg.spawn.table().context("invalid [spawn] weights")?;
        Ok(cfg)
    }

    /// Load `path` if given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_toml(p),
            None => Ok(Self::default()),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    use super::SpawnWeight;
    use twenty48_engine::engine::DEFAULT_SPAWN_WEIGHTS;

    pub fn weights() -> Vec<SpawnWeight> {
        DEFAULT_SPAWN_WEIGHTS
            .iter()
            .map(|&(value, weight)| SpawnWeight { value, weight })
            .collect()
    }
    pub fn db_path() -> PathBuf { PathBuf::from("scores.db") }
    pub fn top_k() -> usize { leaderboard::DEFAULT_TOP_K }
    pub fn default_name() -> String { leaderboard::DEFAULT_NAME.to_string() }
}
