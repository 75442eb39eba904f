//! twenty48-engine: the 2048 grid engine.
//!
//! This crate provides:
//! - A 4x4 `Board` of tile values with slide/merge moves and terminal detection
//! - Weighted tile spawning (`engine::spawn`) over a configurable value table
//! - A `Game` state object that owns board, score and status, and drives
//!   move -> spawn -> terminal check for each accepted move
//! - A `GridView` snapshot for whatever front end draws the grid
//!
//! Quick start:
//! ```
//! use twenty48_engine::{Game, GameStatus, Move, SpawnTable};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut game = Game::new(SpawnTable::default(), StdRng::seed_from_u64(42));
//! assert_eq!(game.board().count_empty(), 14);
//! let outcome = game.apply(Move::Left);
//! assert_eq!(outcome.status, GameStatus::Active);
//! ```
pub mod engine;
pub mod game;
pub mod view;

pub use engine::{Board, BoardError, Cell, Move, Row, MAX_TILE, SIZE, Score, Spawn, SpawnTable, WeightError};
pub use game::{Game, GameStatus, MoveOutcome};
pub use view::{GridView, TileClass};
