use serde::{Deserialize, Serialize};

use crate::engine::{Board, Cell, Row, SIZE, Score};
use crate::game::GameStatus;

/// Visual category of a cell, keyed by its value. Styling only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileClass {
    Empty,
    Tile(Cell),
}

impl TileClass {
    pub fn for_value(value: Cell) -> Self {
        if value == 0 {
            TileClass::Empty
        } else {
            TileClass::Tile(value)
        }
    }

    /// Text shown in the cell: blank when empty.
    pub fn label(self) -> String {
        match self {
            TileClass::Empty => String::new(),
            TileClass::Tile(v) => v.to_string(),
        }
    }

    /// Position of the tile in the 2, 4, 8, ... sequence (2 -> 1), 0 when empty.
    pub fn rank(self) -> u32 {
        match self {
            TileClass::Empty => 0,
            TileClass::Tile(v) => v.trailing_zeros(),
        }
    }
}

/// Everything a front end needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridView {
    pub cells: [Row; SIZE],
    pub score: Score,
    pub status: GameStatus,
}

impl GridView {
    pub fn new(board: Board, score: Score, status: GameStatus) -> Self {
        Self {
            cells: board.into_rows(),
            score,
            status,
        }
    }

    /// Cell categories row by row.
    pub fn classes(&self) -> [[TileClass; SIZE]; SIZE] {
        self.cells.map(|row| row.map(TileClass::for_value))
    }
}
