mod app;
mod args;
mod config;
mod input;
mod panel;
mod render;

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::{Env, Target};
use leaderboard::{Leaderboard, SqliteStore};
use log::info;
use twenty48_engine::Game;

use crate::app::App;
use crate::args::{Cli, Command};
use crate::config::Config;

/// The game screen owns the terminal, so `play` only logs when given a file.
fn init_logging(log_file: Option<&Path>, default_filter: &str) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(default_filter));
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn open_leaderboard(cfg: &Config) -> Result<Leaderboard<SqliteStore>> {
    let lb = &cfg.leaderboard;
    let store = SqliteStore::open(&lb.db_path)
        .with_context(|| format!("failed to open score database {}", lb.db_path.display()))?;
    Ok(Leaderboard::new(store)
        .with_top_k(lb.top_k)
        .with_placeholder(lb.default_name.clone()))
}

fn play(cfg: &Config, seed: Option<u64>) -> Result<()> {
    let spawn = cfg.spawn.table().context("invalid [spawn] weights")?;
    let leaderboard = open_leaderboard(cfg)?;
    let seed = seed.unwrap_or_else(rand::random);
    info!("new game, seed {seed}");

    let mut app = App::new(Game::seeded(spawn, seed), leaderboard);
    {
        let _guard = render::TerminalGuard::enter().context("failed to set up terminal")?;
        app::run(&mut app)?;
    }
    let game = app.game();
    println!("Final score: {} ({} moves, seed {seed})", game.score(), game.moves());
    Ok(())
}

fn print_scores(cfg: &Config, json: bool, limit: Option<usize>) -> Result<()> {
    let mut leaderboard = open_leaderboard(cfg)?;
    if let Some(k) = limit {
        leaderboard = leaderboard.with_top_k(k);
    }
    let entries = leaderboard.top().context("failed to read scores")?;
    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else if entries.is_empty() {
        println!("No scores available yet.");
    } else {
        for (i, e) in entries.iter().enumerate() {
            println!("{:>2}. {}: {}     <---->    {}", i + 1, e.name, e.score, e.display_date);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.subcommand();
    let default_filter = match (&command, &cli.log_file) {
        (Command::Play { .. }, None) => "off",
        _ => "info",
    };
    init_logging(cli.log_file.as_deref(), default_filter)?;

    let mut cfg = Config::load(cli.config.as_deref())?;
    if let Some(db) = cli.db {
        cfg.leaderboard.db_path = db;
    }

    match command {
        Command::Play { seed } => play(&cfg, seed),
        Command::Scores { json, limit } => print_scores(&cfg, json, limit),
    }
}
