//! Key mapping for the two screens: playing and the game-over panel.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use twenty48_engine::Move;

/// What a key means while the board is in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayCommand {
    Move(Move),
    /// Reopen the game-over panel for a finished, unsaved game.
    SaveScore,
    NewGame,
    Quit,
}

/// What a key means while the game-over panel is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelCommand {
    Type(char),
    Backspace,
    Submit,
    Close,
    Quit,
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
}

/// Arrows and WASD (either case) move; Enter asks to save the score; `n` starts
/// over; `q`, Esc and Ctrl-C quit.
/// Everything else, including key releases, is ignored.
pub fn play_command(key: KeyEvent) -> Option<PlayCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if is_ctrl_c(&key) {
        return Some(PlayCommand::Quit);
    }
    let cmd = match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => PlayCommand::Move(Move::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => PlayCommand::Move(Move::Right),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => PlayCommand::Move(Move::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => PlayCommand::Move(Move::Down),
        KeyCode::Enter => PlayCommand::SaveScore,
        KeyCode::Char('n') | KeyCode::Char('N') => PlayCommand::NewGame,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => PlayCommand::Quit,
        _ => return None,
    };
    Some(cmd)
}

/// Typing edits the name, Enter submits, Esc closes the panel.
pub fn panel_command(key: KeyEvent) -> Option<PanelCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if is_ctrl_c(&key) {
        return Some(PanelCommand::Quit);
    }
    match key.code {
        KeyCode::Enter => Some(PanelCommand::Submit),
        KeyCode::Backspace => Some(PanelCommand::Backspace),
        KeyCode::Esc => Some(PanelCommand::Close),
        KeyCode::Char(c) if !c.is_control() => Some(PanelCommand::Type(c)),
        _ => None,
    }
}
