use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about = "Play 2048 in the terminal and keep a local high-score board")]
pub struct Cli {
    /// Optional TOML configuration file ([spawn], [leaderboard]).
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Score database; overrides `leaderboard.db_path`.
    #[arg(long, value_name = "FILE", global = true)]
    pub db: Option<PathBuf>,

    /// Write logs to this file (the game screen owns the terminal).
    #[arg(long, value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Subcommand, PartialEq, Eq)]
pub enum Command {
    /// Play a game (default).
    Play {
        /// Seed for reproducible tile spawns.
        #[arg(long, value_name = "N")]
        seed: Option<u64>,
    },
    /// Print the high-score board and exit.
    Scores {
        /// Emit entries as JSON.
        #[arg(long)]
        json: bool,
        /// Number of entries (defaults to `leaderboard.top_k`).
        #[arg(long, value_name = "N")]
        limit: Option<usize>,
    },
}

impl Cli {
    pub fn subcommand(&self) -> Command {
        self.command.clone().unwrap_or(Command::Play { seed: None })
    }
}
