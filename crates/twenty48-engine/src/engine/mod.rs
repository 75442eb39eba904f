//! Engine module: the 4x4 board, row-level slide/merge ops, and weighted
//! tile spawning. Public API stays small and ergonomic.
//!
//! - `Board` is the grid state with useful methods.
//! - Free functions in `ops` expose the row algorithm (`compress_row`,
//!   `merge_row`, `shift_row_left`) and mirror the board methods.
//! - `spawn` holds the weighted-choice utility and the spawn table.

pub mod ops;
pub mod spawn;
pub mod state;

pub use state::{Board, BoardError, Cell, Move, Row, SIZE, Score, Spawn, MAX_TILE, is_tile_value};

pub use spawn::{DEFAULT_SPAWN_WEIGHTS, SpawnTable, WeightError, WeightedTable};

pub use ops::{
    compress_row, count_empty, get_highest_tile_val, is_terminal, merge_row, shift,
    shift_row_left, shift_row_right,
};
