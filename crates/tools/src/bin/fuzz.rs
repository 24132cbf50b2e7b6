use std::collections::BTreeSet;

use anyhow::{Result, bail};
use clap::Parser;
use maze_core::{Cell, LogEvent, MazeConfig, PlacementPolicy, Pos, Session, TurnOutcome};
use maze_tools::logging;
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Number of sessions, each with a seed drawn from `--seed`
    #[arg(short, long, default_value_t = 200)]
    runs: u32,
    #[arg(short, long, default_value_t = 500)]
    turns: u32,
}

fn main() -> Result<()> {
    logging::init();
    let args = Args::parse();

    println!("Starting Fuzz harness on seed {} for {} runs...", args.seed, args.runs);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    for run in 0..args.runs {
        let session_seed = rng.next_u64();
        let placement = if rng.next_u64() % 2 == 0 {
            PlacementPolicy::default()
        } else {
            PlacementPolicy::Quota
        };
        let config = MazeConfig {
            base_height: 2 + (rng.next_u64() % 5) as usize,
            base_width: 2 + (rng.next_u64() % 5) as usize,
            placement,
            ..MazeConfig::default()
        };
        if let Err(err) = fuzz_session(config.clone(), session_seed, args.turns) {
            bail!("run {run} (seed {session_seed}, config {config:?}) failed: {err:#}");
        }
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}

fn fuzz_session(config: MazeConfig, seed: u64, turns: u32) -> Result<()> {
    let mut session = Session::new(config, seed)?;
    for _ in 0..turns {
        let level_before = session.level();
        let outcome = session.play_turn()?;
        if outcome == TurnOutcome::Continue {
            assert_eq!(session.level(), level_before, "level changed on a continuing turn");
        } else {
            assert_eq!(session.level(), level_before + 1, "finished board was not replaced");
        }
        check_invariants(&session);
    }
    Ok(())
}

fn check_invariants(session: &Session) {
    let grid = session.grid();
    let agent = grid.cell(session.agent()).expect("agent stays on the board");
    assert!(!agent.has_hazard(), "Invariant failed: agent alive on a hazard");

    let portals = grid.cells().filter(|cell| cell.portal).count();
    assert_eq!(portals, 1, "Invariant failed: board must hold exactly one portal");

    for cell in grid.cells() {
        assert!(!(cell.monster && cell.crevasse), "Invariant failed: two hazards on {}", cell.pos);
        let near = |hazard: fn(&Cell) -> bool| {
            grid.neighbors(cell.pos)
                .into_iter()
                .any(|pos| grid.cell(pos).is_ok_and(|neighbor| hazard(neighbor)))
        };
        assert_eq!(cell.windy, near(|c| c.crevasse), "Invariant failed: wind cue at {}", cell.pos);
        assert_eq!(cell.smelly, near(|c| c.monster), "Invariant failed: smell cue at {}", cell.pos);
    }

    let frontier = session.explorer().frontier();
    assert!(frontier.is_discovered(session.agent()), "Invariant failed: agent cell undiscovered");
    let mut bucketed: BTreeSet<Pos> = BTreeSet::new();
    for cells in frontier.frontier_cells().values() {
        assert!(!cells.is_empty(), "Invariant failed: empty bucket kept");
        for cell in cells {
            assert!(!frontier.is_discovered(*cell), "Invariant failed: discovered cell bucketed");
            assert!(bucketed.insert(*cell), "Invariant failed: {cell} in two buckets");
        }
    }

    if let Some(LogEvent::GoalSelected { target, .. }) = session.log().last() {
        assert!(grid.in_bounds(*target), "Invariant failed: goal off the board");
    }
}
