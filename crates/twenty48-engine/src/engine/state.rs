use rand::Rng;
use std::fmt;

use super::ops;
use super::spawn::SpawnTable;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Side length of the square grid.
pub const SIZE: usize = 4;

/// A single cell: 0 for empty, otherwise a power of two in `2..=MAX_TILE`.
pub type Cell = u32;
pub type Row = [Cell; SIZE];
pub type Score = u64;

/// Largest tile a cell may hold. Two of them never merge, so a move cannot
/// leave the valid range.
pub const MAX_TILE: Cell = 1 << 30;

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Move::Up => "up",
            Move::Down => "down",
            Move::Left => "left",
            Move::Right => "right",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("cell ({row}, {col}) holds {value}; expected 0 or a power of two in 2..=2^30")]
    InvalidCell { row: usize, col: usize, value: Cell },
    #[error("expected {expected} cells, got {actual}")]
    WrongShape { expected: usize, actual: usize },
}

/// A tile placed by a successful spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawn {
    pub row: usize,
    pub col: usize,
    pub value: Cell,
}

/// True for values a tile may hold (powers of two in `2..=MAX_TILE`).
#[inline]
pub fn is_tile_value(value: Cell) -> bool {
    (2..=MAX_TILE).contains(&value) && value.is_power_of_two()
}

/// 4x4 2048 grid stored row-major as plain tile values.
///
/// Every cell is 0 or a tile value (see [`is_tile_value`]); the validated constructors keep it
/// that way and every move preserves it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "[Row; SIZE]", into = "[Row; SIZE]")]
pub struct Board(pub(crate) [Row; SIZE]);

impl Board {
    /// A constant empty board (all zeros).
    pub const EMPTY: Board = Board([[0; SIZE]; SIZE]);

    /// Build a board from rows, rejecting values that are not tiles.
    ///
    /// ```
    /// use twenty48_engine::Board;
    /// let b = Board::from_rows([[2, 0, 0, 2], [0; 4], [0; 4], [0; 4]]).unwrap();
    /// assert_eq!(b.count_empty(), 14);
    /// assert!(Board::from_rows([[3, 0, 0, 0], [0; 4], [0; 4], [0; 4]]).is_err());
    /// ```
    pub fn from_rows(rows: [Row; SIZE]) -> Result<Self, BoardError> {
        for (r, row) in rows.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                if value != 0 && !is_tile_value(value) {
                    return Err(BoardError::InvalidCell { row: r, col: c, value });
                }
            }
        }
        Ok(Board(rows))
    }

    /// Build a board from 16 row-major cells.
    pub fn from_cells(cells: &[Cell]) -> Result<Self, BoardError> {
        if cells.len() != SIZE * SIZE {
            return Err(BoardError::WrongShape {
                expected: SIZE * SIZE,
                actual: cells.len(),
            });
        }
        let mut rows = [[0; SIZE]; SIZE];
        for (idx, &value) in cells.iter().enumerate() {
            rows[idx / SIZE][idx % SIZE] = value;
        }
        Self::from_rows(rows)
    }

    /// Borrow the rows of this board.
    #[inline]
    pub fn rows(&self) -> &[Row; SIZE] {
        &self.0
    }

    /// Consume this `Board`, returning its rows.
    #[inline]
    pub fn into_rows(self) -> [Row; SIZE] {
        self.0
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.0[row][col]
    }

    /// Return the board resulting from sliding/merging tiles in `dir` (no random insert).
    ///
    /// ```
    /// use twenty48_engine::{Board, Move};
    /// let b = Board::from_rows([[0, 2, 0, 2], [0; 4], [0; 4], [0; 4]]).unwrap();
    /// assert_eq!(b.shift(Move::Left).rows()[0], [4, 0, 0, 0]);
    /// ```
    #[inline]
    pub fn shift(self, dir: Move) -> Self {
        ops::shift(self, dir).0
    }

    /// Like `shift`, also returning the score gained from merges.
    #[inline]
    pub fn shift_with_score(self, dir: Move) -> (Self, Score) {
        ops::shift(self, dir)
    }

    /// True if sliding in `dir` would change the board.
    #[inline]
    pub fn can_move(self, dir: Move) -> bool {
        self.shift(dir) != self
    }

    /// Place one tile drawn from `table` into a uniformly chosen empty cell.
    ///
    /// Returns `None` and leaves the board untouched when no cell is empty.
    ///
    /// ```
    /// use twenty48_engine::{Board, SpawnTable};
    /// use rand::{SeedableRng, rngs::StdRng};
    /// let mut rng = StdRng::seed_from_u64(123);
    /// let mut b = Board::EMPTY;
    /// let spawned = b.spawn_tile(&SpawnTable::default(), &mut rng).unwrap();
    /// assert_eq!(b.get(spawned.row, spawned.col), spawned.value);
    /// assert_eq!(b.count_empty(), 15);
    /// ```
    pub fn spawn_tile<R: Rng + ?Sized>(&mut self, table: &SpawnTable, rng: &mut R) -> Option<Spawn> {
        let empty = self.empty_cells();
        if empty.is_empty() {
            return None;
        }
        let (row, col) = empty[rng.gen_range(0..empty.len())];
        let value = table.sample(rng);
        self.0[row][col] = value;
        Some(Spawn { row, col, value })
    }

    /// Return true if the grid is full and no two neighbours are equal.
    ///
    /// ```
    /// use twenty48_engine::Board;
    /// assert!(!Board::EMPTY.is_terminal());
    /// ```
    #[inline]
    pub fn is_terminal(self) -> bool {
        ops::is_terminal(self)
    }

    /// Return the highest tile value (e.g., 2048) present on the board, 0 if empty.
    #[inline]
    pub fn highest_tile(self) -> Cell {
        ops::get_highest_tile_val(self)
    }

    /// Count the number of empty cells on the board.
    #[inline]
    pub fn count_empty(self) -> usize {
        ops::count_empty(self)
    }

    /// Coordinates of every empty cell in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        let mut cells = Vec::with_capacity(SIZE * SIZE);
        for (r, row) in self.0.iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                if value == 0 {
                    cells.push((r, c));
                }
            }
        }
        cells
    }

    /// Get the value at a row-major index (0..16).
    #[inline]
    pub fn tile_value(self, idx: usize) -> Cell {
        self.0[idx / SIZE][idx % SIZE]
    }

    /// Iterate over tile values in row-major order (0 for empty).
    #[inline]
    pub fn tiles(self) -> TilesIter {
        TilesIter { board: self, idx: 0 }
    }

    /// Convenience: collect tile values into a `Vec`.
    #[inline]
    pub fn to_vec(self) -> Vec<Cell> {
        self.tiles().collect()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({:?})", self.0)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = "-".repeat(SIZE * 8);
        for (r, row) in self.0.iter().enumerate() {
            if r > 0 {
                writeln!(f, "{separator}")?;
            }
            let cells: Vec<String> = row.iter().map(|&v| ops::format_val(v)).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

impl TryFrom<[Row; SIZE]> for Board {
    type Error = BoardError;
    fn try_from(rows: [Row; SIZE]) -> Result<Self, Self::Error> {
        Board::from_rows(rows)
    }
}

impl From<Board> for [Row; SIZE] {
    fn from(b: Board) -> Self {
        b.into_rows()
    }
}

/// Iterator over board tiles in row-major order.
pub struct TilesIter {
    board: Board,
    idx: usize,
}

impl Iterator for TilesIter {
    type Item = Cell;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= SIZE * SIZE {
            return None;
        }
        let v = self.board.tile_value(self.idx);
        self.idx += 1;
        Some(v)
    }
}

impl IntoIterator for Board {
    type Item = Cell;
    type IntoIter = TilesIter;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.tiles()
    }
}

impl IntoIterator for &Board {
    type Item = Cell;
    type IntoIter = TilesIter;
    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.tiles()
    }
}
