//! Multi-level driver: generates boards, plays explorer turns and keeps the score.
//! This module exists to own terminal-cell detection and level transitions.
//! It does not reason about risk; the explorer does.

mod hash;

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use tracing::{debug, info, warn};

use crate::config::MazeConfig;
use crate::effector::{self, ActionOutcome};
use crate::explorer::Explorer;
use crate::grid::{Grid, Level, generate_level};
use crate::types::*;

const MOVE_COST: i64 = 1;
const THROW_COST: i64 = 10;
/// Multiplied by the board area for both the death penalty and the portal reward.
const AREA_FACTOR: i64 = 10;

pub struct Session {
    config: MazeConfig,
    seed: u64,
    rng: ChaCha8Rng,
    /// One-based index of the board being played; every new board counts.
    level: u32,
    /// Consecutive clears since the last death; drives board growth.
    streak: u32,
    cleared: u32,
    deaths: u32,
    turn: u64,
    level_turns: u32,
    score: i64,
    grid: Grid,
    agent: Pos,
    explorer: Explorer,
    log: Vec<LogEvent>,
}

impl Session {
    pub fn new(config: MazeConfig, seed: u64) -> Result<Self, MazeError> {
        config.validate()?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let (height, width) = config.level_dims(0);
        let level = generate_level(height, width, config.placement, &mut rng)?;
        Self::assemble(config, seed, rng, level)
    }

    /// Starts on a prepared board instead of a generated one. Later boards are generated.
    pub fn with_level(config: MazeConfig, seed: u64, level: Level) -> Result<Self, MazeError> {
        config.validate()?;
        let rng = ChaCha8Rng::seed_from_u64(seed);
        Self::assemble(config, seed, rng, level)
    }

    fn assemble(
        config: MazeConfig,
        seed: u64,
        rng: ChaCha8Rng,
        level: Level,
    ) -> Result<Self, MazeError> {
        let Level { grid, start } = level;
        let portals = grid.cells().filter(|cell| cell.portal).count();
        if portals != 1 {
            return Err(MazeError::InvalidConfig(format!(
                "a board needs exactly one portal, found {portals}"
            )));
        }
        let start_cell = grid.cell(start)?;
        if start_cell.has_item() {
            return Err(MazeError::InvalidConfig(format!("start cell {start} is not empty")));
        }
        let explorer = Explorer::new(&grid, start)?;
        info!(seed, height = grid.height(), width = grid.width(), "session started");
        Ok(Self {
            config,
            seed,
            rng,
            level: 1,
            streak: 0,
            cleared: 0,
            deaths: 0,
            turn: 0,
            level_turns: 0,
            score: 0,
            grid,
            agent: start,
            explorer,
            log: Vec::new(),
        })
    }

    /// Plans one route and walks it until it ends or the agent reaches a terminal cell.
    ///
    /// Actions queued after a terminal cell are dropped.
    pub fn play_turn(&mut self) -> Result<TurnOutcome, MazeError> {
        if self.level_turns >= self.config.max_turns_per_level {
            return self.abandon_level();
        }
        self.turn += 1;
        self.level_turns += 1;

        let plan = match self.explorer.on_turn(&self.grid, &mut self.rng) {
            Ok(plan) => plan,
            Err(MazeError::NoGoal) => return self.abandon_level(),
            Err(err @ (MazeError::Disconnected { .. } | MazeError::EmptyPath)) => {
                warn!(turn = self.turn, %err, "no route this turn");
                return Ok(TurnOutcome::Continue);
            }
            Err(err) => return Err(err),
        };
        self.log.push(LogEvent::GoalSelected {
            target: plan.target,
            risk: plan.risk,
            path_len: u16::try_from(plan.actions.len()).unwrap_or(u16::MAX),
        });

        for action in plan.actions {
            match effector::apply(&mut self.grid, &mut self.agent, action)? {
                ActionOutcome::Moved { to } => {
                    self.score -= MOVE_COST;
                    if let Some(outcome) = self.resolve_arrival(to)? {
                        return Ok(outcome);
                    }
                    self.explorer.on_cell_entered(&self.grid, to)?;
                }
                ActionOutcome::MonsterSlain { at } => {
                    self.score -= THROW_COST;
                    self.log.push(LogEvent::MonsterSlain { at });
                }
                ActionOutcome::ThrowMissed { at } => {
                    self.score -= THROW_COST;
                    self.log.push(LogEvent::ThrowMissed { at });
                }
                ActionOutcome::Refused => debug!(?action, "action refused at the board edge"),
            }
        }
        Ok(TurnOutcome::Continue)
    }

    fn resolve_arrival(&mut self, at: Pos) -> Result<Option<TurnOutcome>, MazeError> {
        let cell = *self.grid.cell(at)?;
        let area = self.area_value();
        let cause = if cell.crevasse {
            Some(DeathCause::Fell)
        } else if cell.monster {
            Some(DeathCause::Caught)
        } else {
            None
        };

        if let Some(cause) = cause {
            self.score -= area;
            self.deaths += 1;
            self.streak = 0;
            self.log.push(LogEvent::AgentDied { at, cause });
            info!(level = self.level, %at, ?cause, score = self.score, "agent died");
            self.next_level()?;
            return Ok(Some(TurnOutcome::Died(cause)));
        }

        if cell.portal {
            self.score += area;
            self.cleared += 1;
            self.streak += 1;
            self.log.push(LogEvent::LevelCleared { level: self.level, score: self.score });
            info!(level = self.level, score = self.score, "level cleared");
            self.next_level()?;
            return Ok(Some(TurnOutcome::LevelCleared));
        }
        Ok(None)
    }

    fn abandon_level(&mut self) -> Result<TurnOutcome, MazeError> {
        self.log.push(LogEvent::ExplorationExhausted { level: self.level });
        info!(level = self.level, turns = self.level_turns, "exploration exhausted");
        self.next_level()?;
        Ok(TurnOutcome::Exhausted)
    }

    fn next_level(&mut self) -> Result<(), MazeError> {
        let (height, width) = self.config.level_dims(self.streak);
        let Level { grid, start } =
            generate_level(height, width, self.config.placement, &mut self.rng)?;
        self.explorer.on_level_start(&grid, start)?;
        self.grid = grid;
        self.agent = start;
        self.level += 1;
        self.level_turns = 0;
        debug!(level = self.level, height, width, %start, "level started");
        Ok(())
    }

    fn area_value(&self) -> i64 {
        AREA_FACTOR * self.grid.area() as i64
    }

    pub fn config(&self) -> &MazeConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn levels_cleared(&self) -> u32 {
        self.cleared
    }

    pub fn deaths(&self) -> u32 {
        self.deaths
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn agent(&self) -> Pos {
        self.agent
    }

    pub fn explorer(&self) -> &Explorer {
        &self.explorer
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }
}
