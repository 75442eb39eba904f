//! Terminal drawing. Everything is redrawn each frame; the grid is small.

use std::io::{self, Write};

use crossterm::{
    cursor, execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use twenty48_engine::{GameStatus, GridView, Score, TileClass};

use crate::app::HighScores;
use crate::panel::GameOverPanel;

const CELL_WIDTH: usize = 7;
const LEFT_MARGIN: u16 = 2;

/// Everything needed to draw one frame.
pub struct Screen<'a> {
    pub view: GridView,
    pub panel: Option<&'a GameOverPanel>,
    pub scores: &'a HighScores,
    /// The finished game can still be saved (Enter reopens the panel).
    pub can_save: bool,
}

/// Raw mode + alternate screen for as long as the guard lives.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, cursor::Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

pub fn cell_text(class: TileClass) -> String {
    format!("{:^width$}", class.label(), width = CELL_WIDTH)
}

/// Foreground/background per tile class, following the classic palette.
pub fn tile_colors(class: TileClass) -> (Color, Color) {
    let dark = Color::Rgb { r: 119, g: 110, b: 101 };
    let light = Color::Rgb { r: 249, g: 246, b: 242 };
    let bg = |r, g, b| Color::Rgb { r, g, b };
    match class.rank() {
        0 => (dark, bg(205, 193, 180)),
        1 => (dark, bg(238, 228, 218)),
        2 => (dark, bg(237, 224, 200)),
        3 => (light, bg(242, 177, 121)),
        4 => (light, bg(245, 149, 99)),
        5 => (light, bg(246, 124, 95)),
        6 => (light, bg(246, 94, 59)),
        7 => (light, bg(237, 207, 114)),
        8 => (light, bg(237, 204, 97)),
        9 => (light, bg(237, 200, 80)),
        10 => (light, bg(237, 197, 63)),
        11 => (light, bg(237, 194, 46)),
        _ => (light, bg(60, 58, 50)),
    }
}

pub fn score_line(score: Score) -> String {
    format!("Score: {score}")
}

pub fn high_score_lines(scores: &HighScores) -> Vec<String> {
    match scores {
        HighScores::Failed => vec!["error at displaying the scores.".to_string()],
        HighScores::Loaded(entries) if entries.is_empty() => {
            vec!["No scores available yet.".to_string()]
        }
        HighScores::Loaded(entries) => entries
            .iter()
            .map(|e| format!("{}: {}     <---->    {}", e.name, e.score, e.display_date))
            .collect(),
    }
}

pub fn game_over_line(can_save: bool) -> String {
    if can_save {
        "Game over!   Enter: save score   n: new game   q: quit".to_string()
    } else {
        "Game over!   n: new game   q: quit".to_string()
    }
}

fn put<W: Write>(out: &mut W, y: &mut u16, text: &str) -> io::Result<()> {
    queue!(out, cursor::MoveTo(0, *y), Print(text))?;
    *y += 1;
    Ok(())
}

pub fn draw<W: Write>(out: &mut W, screen: &Screen<'_>) -> io::Result<()> {
    queue!(out, Clear(ClearType::All))?;
    let mut y = 0;
    put(out, &mut y, "2048")?;
    put(out, &mut y, &score_line(screen.view.score))?;
    y += 1;

    for row in screen.view.classes() {
        queue!(out, cursor::MoveTo(LEFT_MARGIN, y))?;
        for class in row {
            let (fg, bg) = tile_colors(class);
            queue!(
                out,
                SetForegroundColor(fg),
                SetBackgroundColor(bg),
                Print(cell_text(class)),
                ResetColor,
                Print(" ")
            )?;
        }
        y += 2;
    }

    match (screen.view.status, screen.panel) {
        (GameStatus::Active, _) => put(out, &mut y, "arrows/WASD: move   n: new game   q: quit")?,
        (GameStatus::Terminal, Some(panel)) => {
            put(out, &mut y, "Game over! Enter your name:")?;
            put(out, &mut y, &format!("> {}_", panel.name()))?;
            put(out, &mut y, &format!("[ {} ]   Enter: send   Esc: close", panel.button_label()))?;
            if let Some(msg) = panel.message() {
                put(out, &mut y, msg)?;
            }
        }
        (GameStatus::Terminal, None) => put(out, &mut y, &game_over_line(screen.can_save))?,
    }
    y += 1;

    put(out, &mut y, "High Scores")?;
    for line in high_score_lines(screen.scores) {
        put(out, &mut y, &line)?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use leaderboard::ScoreEntry;
    use twenty48_engine::Board;

    fn entry(name: &str, score: u64) -> ScoreEntry {
        ScoreEntry {
            name: name.to_string(),
            score,
            timestamp: Default::default(),
            display_date: "19.10.2026".to_string(),
        }
    }

    #[test]
    fn cells_are_centered_and_blank_when_empty() {
        assert_eq!(cell_text(TileClass::Empty), "       ");
        assert_eq!(cell_text(TileClass::Tile(2)), "   2   ");
        assert_eq!(cell_text(TileClass::Tile(2048)).trim(), "2048");
        assert_eq!(cell_text(TileClass::Tile(2048)).len(), 7);
    }

    #[test]
    fn colors_differ_by_class() {
        assert_ne!(tile_colors(TileClass::Tile(2)), tile_colors(TileClass::Tile(4)));
        assert_ne!(tile_colors(TileClass::Empty), tile_colors(TileClass::Tile(2)));
        assert_eq!(tile_colors(TileClass::Tile(8192)), tile_colors(TileClass::Tile(65536)));
    }

    #[test]
    fn high_score_messages() {
        assert_eq!(high_score_lines(&HighScores::Loaded(vec![])), ["No scores available yet."]);
        assert_eq!(high_score_lines(&HighScores::Failed), ["error at displaying the scores."]);
        let lines = high_score_lines(&HighScores::Loaded(vec![entry("ana", 512), entry("Anonim", 64)]));
        assert_eq!(lines, ["ana: 512     <---->    19.10.2026", "Anonim: 64     <---->    19.10.2026"]);
    }

    #[test]
    fn closed_panel_footer_offers_saving() {
        assert!(game_over_line(true).contains("Enter: save score"));
        assert!(!game_over_line(false).contains("Enter"));

        let board = Board::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]).unwrap();
        let scores = HighScores::Failed;
        let screen = Screen {
            view: GridView::new(board, 64, GameStatus::Terminal),
            panel: None,
            scores: &scores,
            can_save: true,
        };
        let mut buf = Vec::new();
        draw(&mut buf, &screen).unwrap();
        let text = String::from_utf8_lossy(&buf);
        assert!(text.contains("Enter: save score"));
        assert!(text.contains("error at displaying the scores."));
    }

    #[test]
    fn frame_contains_score_grid_and_panel() {
        let board = Board::from_rows([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 1024]]).unwrap();
        let mut panel = GameOverPanel::new();
        panel.push('b');
        panel.push('o');
        let scores = HighScores::Loaded(vec![]);
        let screen = Screen {
            view: GridView::new(board, 1234, GameStatus::Terminal),
            panel: Some(&panel),
            scores: &scores,
            can_save: true,
        };
        let mut buf = Vec::new();
        draw(&mut buf, &screen).unwrap();
        let text = String::from_utf8_lossy(&buf);
        assert!(text.contains("Score: 1234"));
        assert!(text.contains("1024"));
        assert!(text.contains("> bo_"));
        assert!(text.contains("Send Score"));
        assert!(text.contains("No scores available yet."));
    }
}
