use log::debug;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::engine::{Board, Move, Score, Spawn, SpawnTable};
use crate::view::GridView;

/// Whether moves are still accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Active,
    /// No empty cell and no equal neighbours. Absorbing for moves.
    Terminal,
}

/// What happened when a move was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    /// True if any cell changed; only then is a tile spawned.
    pub moved: bool,
    pub score_delta: Score,
    pub spawned: Option<Spawn>,
    pub status: GameStatus,
}

impl MoveOutcome {
    fn unchanged(status: GameStatus) -> Self {
        Self {
            moved: false,
            score_delta: 0,
            spawned: None,
            status,
        }
    }
}

/// A single game: board, score and status, plus the spawn table and RNG that
/// drive tile placement.
pub struct Game<R = StdRng> {
    board: Board,
    score: Score,
    status: GameStatus,
    moves: u64,
    spawn: SpawnTable,
    rng: R,
}

impl Game<StdRng> {
    /// Start a game with a deterministic RNG.
    pub fn seeded(spawn: SpawnTable, seed: u64) -> Self {
        Self::new(spawn, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    /// Start a game: empty grid plus two spawned tiles.
    pub fn new(spawn: SpawnTable, rng: R) -> Self {
        let mut game = Self {
            board: Board::EMPTY,
            score: 0,
            status: GameStatus::Active,
            moves: 0,
            spawn,
            rng,
        };
        game.reset();
        game
    }

    /// Resume from an existing board and score. Status is derived from the board.
    pub fn from_board(board: Board, score: Score, spawn: SpawnTable, rng: R) -> Self {
        let status = if board.is_terminal() {
            GameStatus::Terminal
        } else {
            GameStatus::Active
        };
        Self {
            board,
            score,
            status,
            moves: 0,
            spawn,
            rng,
        }
    }

    /// Throw the current game away and start over with two fresh tiles.
    pub fn reset(&mut self) {
        self.board = Board::EMPTY;
        self.score = 0;
        self.moves = 0;
        self.status = GameStatus::Active;
        self.board.spawn_tile(&self.spawn, &mut self.rng);
        self.board.spawn_tile(&self.spawn, &mut self.rng);
    }

    /// Apply one move: slide/merge, then spawn and check for a terminal board
    /// only if something changed.
    pub fn apply(&mut self, direction: Move) -> MoveOutcome {
        if self.status == GameStatus::Terminal {
            return MoveOutcome::unchanged(self.status);
        }
        let (next, delta) = self.board.shift_with_score(direction);
        if next == self.board {
            return MoveOutcome::unchanged(self.status);
        }
        self.board = next;
        self.score += delta;
        self.moves += 1;
        let spawned = self.board.spawn_tile(&self.spawn, &mut self.rng);
        if self.board.is_terminal() {
            self.status = GameStatus::Terminal;
            debug!(
                "game over after {} moves: score {}, highest tile {}",
                self.moves,
                self.score,
                self.board.highest_tile()
            );
        }
        MoveOutcome {
            moved: true,
            score_delta: delta,
            spawned,
            status: self.status,
        }
    }

    #[inline]
    pub fn board(&self) -> Board {
        self.board
    }

    #[inline]
    pub fn score(&self) -> Score {
        self.score
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.status == GameStatus::Terminal
    }

    /// Number of accepted moves since the last reset.
    #[inline]
    pub fn moves(&self) -> u64 {
        self.moves
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> GridView {
        GridView::new(self.board, self.score, self.status)
    }
}
