//! Headless blockfit runner (default binary).
//!
//! Plays one session with the greedy autoplay policy and prints a summary.
//! Set `RUST_LOG=debug` to follow round transitions.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};

use blockfit::core::Session;
use blockfit::engine::{apply_move, GreedyPolicy, Move, Policy};
use blockfit::settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "blockfit")]
#[command(about = "Play a block-placement puzzle session with the autoplay policy")]
struct Cli {
    /// Seed for the piece generator; defaults to the settings file, then the clock
    #[arg(long)]
    seed: Option<u32>,
    /// Stop after this many actions even if the game is not over
    #[arg(long)]
    max_turns: Option<u32>,
    /// TOML settings file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print the final session state as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref()).with_context(|| {
        format!(
            "failed to load settings from {}",
            cli.config.as_deref().map(|p| p.display().to_string()).unwrap_or_default()
        )
    })?;

    let seed = cli.seed.or(settings.seed).unwrap_or_else(clock_seed);
    let max_turns = cli.max_turns.unwrap_or(settings.max_turns);
    info!("starting session: seed={seed} max_turns={max_turns}");

    let mut session = Session::new(seed, settings.rules.clone());
    let mut policy = GreedyPolicy;
    let mut turns = 0u32;
    let mut lines = 0u32;
    let mut full_clears = 0u32;
    let mut unique_rounds = 0u32;

    while turns < max_turns {
        let Some(mv) = policy.choose_move(session.state()) else {
            break;
        };
        match mv {
            Move::Place { source, pos } => {
                if let Some(piece) = session.piece_at(source) {
                    debug!(
                        "turn {turns}: {} from {} at ({}, {})",
                        piece.id(),
                        source.as_str(),
                        pos.row,
                        pos.col
                    );
                }
            }
            Move::Hold { slot } => debug!("turn {turns}: hold slot {slot}"),
        }
        let events = apply_move(&mut session, mv).context("policy chose an illegal move")?;

        turns += 1;
        lines += events.lines_cleared;
        full_clears += u32::from(events.full_clear);
        unique_rounds += u32::from(events.unique_solution);
        if events.game_over {
            break;
        }
    }

    if cli.json {
        let json = serde_json::to_string_pretty(&session.snapshot())?;
        println!("{json}");
        return Ok(());
    }

    println!("{}", session.grid());
    println!("seed:            {seed}");
    println!("turns:           {turns}");
    println!("score:           {}", session.score());
    println!("rounds:          {}", session.completed_rounds());
    println!("lines cleared:   {lines}");
    println!("full clears:     {full_clears}");
    println!("unique rounds:   {unique_rounds}");
    println!("game over:       {}", session.game_over());
    Ok(())
}
