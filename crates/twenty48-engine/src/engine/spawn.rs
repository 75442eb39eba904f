use rand::Rng;
use thiserror::Error;

use super::state::{Cell, is_tile_value};

/// Spawn weights used when no table is configured: 2 (60%), 4 (30%), 8 (10%).
pub const DEFAULT_SPAWN_WEIGHTS: [(Cell, u32); 3] = [(2, 6), (4, 3), (8, 1)];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WeightError {
    #[error("weight table has no entries")]
    Empty,
    #[error("entry {index} has zero weight")]
    ZeroWeight { index: usize },
    #[error("spawn value {value} is not a power of two in 2..=2^30")]
    InvalidValue { value: Cell },
}

/// Discrete distribution over `T` given as ordered `(item, weight)` pairs.
///
/// An item's probability is its weight over the sum of all weights. Sampling
/// draws `r` uniformly from `[0, total)` and walks the table in order,
/// subtracting each weight until `r <= 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedTable<T> {
    entries: Vec<(T, u32)>,
    total: u64,
}

impl<T> WeightedTable<T> {
    pub fn new(entries: Vec<(T, u32)>) -> Result<Self, WeightError> {
        if entries.is_empty() {
            return Err(WeightError::Empty);
        }
        if let Some(index) = entries.iter().position(|(_, w)| *w == 0) {
            return Err(WeightError::ZeroWeight { index });
        }
        let total = entries.iter().map(|(_, w)| u64::from(*w)).sum();
        Ok(Self { entries, total })
    }

    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    #[inline]
    pub fn entries(&self) -> &[(T, u32)] {
        &self.entries
    }

    /// Walk the table with a draw `r` in `[0, total)`.
    ///
    /// Falls back to the last entry if rounding leaves `r` positive.
    pub fn pick(&self, mut r: f64) -> &T {
        let idx = self
            .entries
            .iter()
            .position(|(_, weight)| {
                r -= f64::from(*weight);
                r <= 0.0
            })
            .unwrap_or(self.entries.len() - 1);
        &self.entries[idx].0
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> &T {
        self.pick(rng.gen_range(0.0..self.total as f64))
    }
}

/// Weighted table of tile values that may appear after a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnTable(WeightedTable<Cell>);

impl SpawnTable {
    /// Build a spawn table; every value must be a tile value and every weight positive.
    ///
    /// ```
    /// use twenty48_engine::SpawnTable;
    /// assert!(SpawnTable::new([(2, 9), (4, 1)]).is_ok());
    /// assert!(SpawnTable::new([(3, 1)]).is_err());
    /// ```
    pub fn new<I>(entries: I) -> Result<Self, WeightError>
    where
        I: IntoIterator<Item = (Cell, u32)>,
    {
        let entries: Vec<(Cell, u32)> = entries.into_iter().collect();
        if let Some(&(value, _)) = entries.iter().find(|(v, _)| !is_tile_value(*v)) {
            return Err(WeightError::InvalidValue { value });
        }
        WeightedTable::new(entries).map(SpawnTable)
    }

    #[inline]
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Cell {
        *self.0.sample(rng)
    }

    #[inline]
    pub fn weights(&self) -> &[(Cell, u32)] {
        self.0.entries()
    }

    #[inline]
    pub fn table(&self) -> &WeightedTable<Cell> {
        &self.0
    }
}

impl Default for SpawnTable {
    fn default() -> Self {
        let entries = DEFAULT_SPAWN_WEIGHTS.to_vec();
        let total = entries.iter().map(|(_, w)| u64::from(*w)).sum();
        SpawnTable(WeightedTable { entries, total })
    }
}
