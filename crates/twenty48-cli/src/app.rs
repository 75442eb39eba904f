use std::io;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent};
use leaderboard::{Leaderboard, ScoreEntry, ScoreStore};
use log::{debug, info, warn};
use rand::{Rng, rngs::StdRng};
use twenty48_engine::{Game, GameStatus};

use crate::input::{PanelCommand, PlayCommand, panel_command, play_command};
use crate::panel::GameOverPanel;
use crate::render::{self, Screen};

/// What the run loop should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// The panel entered `Saving`; redraw, then call [`App::complete_submission`].
    Submit,
    Quit,
}

/// Last read of the leaderboard.
#[derive(Debug, Clone, PartialEq)]
pub enum HighScores {
    Loaded(Vec<ScoreEntry>),
    Failed,
}

pub struct App<S, R = StdRng> {
    game: Game<R>,
    leaderboard: Leaderboard<S>,
    panel: Option<GameOverPanel>,
    scores: HighScores,
    /// The current game's score is on the board; no further submissions.
    saved: bool,
}

impl<S: ScoreStore, R: Rng> App<S, R> {
    pub fn new(game: Game<R>, leaderboard: Leaderboard<S>) -> Self {
        let mut app = Self {
            game,
            leaderboard,
            panel: None,
            scores: HighScores::Loaded(Vec::new()),
            saved: false,
        };
        app.refresh_scores();
        app
    }

    pub fn refresh_scores(&mut self) {
        self.scores = match self.leaderboard.top() {
            Ok(entries) => HighScores::Loaded(entries),
            Err(e) => {
                warn!("could not read high scores: {e}");
                HighScores::Failed
            }
        };
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if let Some(panel) = self.panel.as_mut() {
            match panel_command(key) {
                Some(PanelCommand::Type(c)) => panel.push(c),
                Some(PanelCommand::Backspace) => panel.backspace(),
                Some(PanelCommand::Submit) => {
                    if panel.begin_submit() {
                        return Flow::Submit;
                    }
                    debug!("submit ignored, already saving");
                }
                Some(PanelCommand::Close) => self.panel = None,
                Some(PanelCommand::Quit) => return Flow::Quit,
                None => {}
            }
            return Flow::Continue;
        }

        match play_command(key) {
            Some(PlayCommand::Move(dir)) => {
                let outcome = self.game.apply(dir);
                if outcome.moved && outcome.status == GameStatus::Terminal {
                    info!(
                        "game over: score {}, highest tile {}, {} moves",
                        self.game.score(),
                        self.game.board().highest_tile(),
                        self.game.moves()
                    );
                    self.panel = Some(GameOverPanel::new());
                }
            }
            Some(PlayCommand::SaveScore) => {
                if self.can_save() {
                    self.panel = Some(GameOverPanel::new());
                }
            }
            Some(PlayCommand::NewGame) => {
                self.game.reset();
                self.panel = None;
                self.saved = false;
            }
            Some(PlayCommand::Quit) => return Flow::Quit,
            None => {}
        }
        Flow::Continue
    }

    /// Store the pending name with the current score. On success the panel
    /// closes and the board is re-read; on failure the panel stays open for a retry.
    pub fn complete_submission(&mut self) {
        let Some(name) = self
            .panel
            .as_ref()
            .and_then(|p| p.pending_name())
            .map(str::to_string)
        else {
            return;
        };
        let result = self.leaderboard.submit(&name, self.game.score());
        match result {
            Ok(_) => {
                self.panel = None;
                self.saved = true;
                self.refresh_scores();
            }
            Err(_) => {
                if let Some(panel) = self.panel.as_mut() {
                    panel.submit_failed();
                }
            }
        }
    }

    /// A finished game whose score has not been stored yet.
    pub fn can_save(&self) -> bool {
        self.game.is_terminal() && !self.saved
    }

    pub fn screen(&self) -> Screen<'_> {
        Screen {
            view: self.game.view(),
            panel: self.panel.as_ref(),
            scores: &self.scores,
            can_save: self.can_save(),
        }
    }

    pub fn game(&self) -> &Game<R> {
        &self.game
    }

    pub fn panel(&self) -> Option<&GameOverPanel> {
        self.panel.as_ref()
    }

    pub fn scores(&self) -> &HighScores {
        &self.scores
    }

    #[cfg(test)]
    pub fn leaderboard_mut(&mut self) -> &mut Leaderboard<S> {
        &mut self.leaderboard
    }
}

/// Draw, wait for a key, repeat until the player quits.
pub fn run<S: ScoreStore, R: Rng>(app: &mut App<S, R>) -> Result<()> {
    let mut out = io::stdout();
    loop {
        render::draw(&mut out, &app.screen())?;
        let Event::Key(key) = event::read()? else {
            continue;
        };
        match app.handle_key(key) {
            Flow::Continue => {}
            Flow::Quit => return Ok(()),
            Flow::Submit => {
                render::draw(&mut out, &app.screen())?;
                app.complete_submission();
            }
        }
    }
}
