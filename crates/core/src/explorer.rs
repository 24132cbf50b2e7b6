//! The exploring agent: owns its belief about the board and turns it into routes.
//! This module exists so the shell only has to report cell entries and ask for actions.
//! It does not apply actions or detect terminal cells; the session does.

use rand_chacha::ChaCha8Rng;

use crate::frontier::FrontierModel;
use crate::grid::Grid;
use crate::pathfinding::{RoutePlan, plan_route};
use crate::policy::select_goal;
use crate::types::{MazeError, Pos};

#[derive(Clone, Debug)]
pub struct Explorer {
    current: Pos,
    frontier: FrontierModel,
}

impl Explorer {
    pub fn new(grid: &Grid, start: Pos) -> Result<Self, MazeError> {
        let mut explorer = Self { current: start, frontier: FrontierModel::new() };
        explorer.on_level_start(grid, start)?;
        Ok(explorer)
    }

    /// Forgets the previous board and discovers the start cell of the new one.
    pub fn on_level_start(&mut self, grid: &Grid, start: Pos) -> Result<(), MazeError> {
        grid.cell(start)?;
        self.frontier.reset();
        self.current = start;
        self.frontier.discover(grid, start)
    }

    pub fn on_cell_entered(&mut self, grid: &Grid, pos: Pos) -> Result<(), MazeError> {
        self.frontier.discover(grid, pos)?;
        self.current = pos;
        Ok(())
    }

    /// Picks the next goal and plans the actions that reach it.
    pub fn on_turn(&self, grid: &Grid, rng: &mut ChaCha8Rng) -> Result<RoutePlan, MazeError> {
        let goal = select_goal(&self.frontier, rng)?;
        plan_route(grid, &self.frontier, self.current, goal)
    }

    pub fn current(&self) -> Pos {
        self.current
    }

    pub fn frontier(&self) -> &FrontierModel {
        &self.frontier
    }
}
