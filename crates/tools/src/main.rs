use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use maze_core::{MazeConfig, Session, TurnOutcome};
use maze_tools::config_file::{load_config, write_config};
use maze_tools::logging;
use maze_tools::report::RunReport;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// TOML session config; defaults are used when the file is missing
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Stop after this many cleared levels
    #[arg(short, long, default_value_t = 5)]
    levels: u32,
    /// Hard cap on turns across all levels
    #[arg(short = 't', long, default_value_t = 10_000)]
    max_turns: u64,
    /// Write a JSON run report here
    #[arg(short, long)]
    report: Option<PathBuf>,
    /// Write the effective config back to `--config` and exit
    #[arg(long, requires = "config")]
    init_config: bool,
}

fn main() -> Result<()> {
    logging::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => MazeConfig::default(),
    };
    if args.init_config
        && let Some(path) = &args.config
    {
        write_config(path, &config)?;
        println!("Wrote config to {}", path.display());
        return Ok(());
    }

    let mut session = Session::new(config, args.seed).context("start session")?;
    while session.levels_cleared() < args.levels && session.turn() < args.max_turns {
        match session.play_turn().with_context(|| format!("turn {}", session.turn()))? {
            TurnOutcome::Continue => {}
            outcome => info!(
                ?outcome,
                level = session.level(),
                score = session.score(),
                "board finished"
            ),
        }
    }

    let report = RunReport::from_session(&session);
    println!("Exploration complete.");
    println!("Turns: {}", report.turns);
    println!("Levels cleared: {}", report.levels_cleared);
    println!("Deaths: {}", report.deaths);
    println!("Exhausted boards: {}", report.exhausted);
    println!("Score: {}", report.score);
    println!("Snapshot Hash: {}", report.snapshot_hash);

    if let Some(path) = &args.report {
        report.save(path)?;
    }
    Ok(())
}
