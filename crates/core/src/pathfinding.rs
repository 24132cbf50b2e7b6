//! Bidirectional search over discovered cells and translation of routes into actions.
//! This module exists so routing stays independent from goal choice and belief upkeep.
//! It does not mutate the grid or the frontier model.

use std::collections::BTreeSet;

use tracing::debug;

use crate::frontier::FrontierModel;
use crate::grid::Grid;
use crate::search_tree::SearchTree;
use crate::types::{Action, Direction, MazeError, Pos, Risk};

/// A concrete route to a goal cell and the actions that walk it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoutePlan {
    pub target: Pos,
    /// Discovered cell the search actually ran to; equals `target` when it is discovered.
    pub anchor: Pos,
    pub risk: Risk,
    pub path: Vec<Pos>,
    pub actions: Vec<Action>,
}

/// Grows trees from both endpoints through discovered cells until they share a cell.
///
/// The returned path starts at `start`, ends at `goal`, and every hop is orthogonal.
pub fn find_path(
    grid: &Grid,
    frontier: &FrontierModel,
    start: Pos,
    goal: Pos,
) -> Result<Vec<Pos>, MazeError> {
    if start == goal {
        return Err(MazeError::EmptyPath);
    }

    let mut from_start = SearchTree::new(start);
    let mut from_goal = SearchTree::new(goal);
    let mut seen_start = BTreeSet::from([start]);
    let mut seen_goal = BTreeSet::from([goal]);

    loop {
        let grown_start = from_start
            .propagate(|cell| unseen_discovered_neighbors(grid, frontier, cell, &mut seen_start));
        let grown_goal = from_goal
            .propagate(|cell| unseen_discovered_neighbors(grid, frontier, cell, &mut seen_goal));

        if let Some(common) = from_start.common_node(&from_goal) {
            return Ok(merge_paths(&from_start, &from_goal, common));
        }
        if grown_start == 0 || grown_goal == 0 {
            return Err(MazeError::Disconnected { start, goal });
        }
    }
}

/// Plans the actions that take the agent from `start` onto `target`.
///
/// An undiscovered target is approached through its most informative discovered
/// neighbour, with a throw ahead of the last step when its risk smells of a monster.
pub fn plan_route(
    grid: &Grid,
    frontier: &FrontierModel,
    start: Pos,
    target: Pos,
) -> Result<RoutePlan, MazeError> {
    grid.cell(target)?;
    if start == target {
        return Err(MazeError::EmptyPath);
    }

    if frontier.is_discovered(target) {
        let path = find_path(grid, frontier, start, target)?;
        let actions = path_to_actions(&path);
        return Ok(RoutePlan { target, anchor: target, risk: Risk::SAFE, path, actions });
    }

    let anchor = anchor_for(grid, frontier, target)
        .ok_or(MazeError::Disconnected { start, goal: target })?;
    let mut path =
        if anchor == start { vec![start] } else { find_path(grid, frontier, start, anchor)? };
    path.push(target);

    let risk = frontier.risk_of(target).unwrap_or(Risk::SAFE);
    let mut actions = path_to_actions(&path);
    if risk.has_monster_signature()
        && let Some(Action::Move(last)) = actions.last().copied()
    {
        actions.insert(actions.len() - 1, Action::Throw(last));
    }

    debug!(%target, %anchor, %risk, steps = actions.len(), "route planned");
    Ok(RoutePlan { target, anchor, risk, path, actions })
}

/// One move per consecutive pair of cells.
///
/// Panics if two consecutive cells are not orthogonally adjacent.
pub fn path_to_actions(path: &[Pos]) -> Vec<Action> {
    path.windows(2)
        .map(|pair| {
            let direction = Direction::between(pair[0], pair[1])
                .expect("consecutive path cells must be orthogonally adjacent");
            Action::Move(direction)
        })
        .collect()
}

/// First clean discovered neighbour of `target` in discovery order, otherwise the
/// most recently discovered cue-bearing one.
fn anchor_for(grid: &Grid, frontier: &FrontierModel, target: Pos) -> Option<Pos> {
    let adjacent: Vec<Pos> = grid.neighbors(target);
    let mut fallback = None;
    for pos in frontier.discovered().iter().copied().filter(|pos| adjacent.contains(pos)) {
        if grid.cell(pos).is_ok_and(|cell| !cell.has_cue()) {
            return Some(pos);
        }
        fallback = Some(pos);
    }
    fallback
}

fn unseen_discovered_neighbors(
    grid: &Grid,
    frontier: &FrontierModel,
    cell: Pos,
    seen: &mut BTreeSet<Pos>,
) -> Vec<Pos> {
    grid.neighbors(cell)
        .into_iter()
        .filter(|neighbor| frontier.is_discovered(*neighbor) && seen.insert(*neighbor))
        .collect()
}

fn merge_paths(from_start: &SearchTree, from_goal: &SearchTree, common: Pos) -> Vec<Pos> {
    let mut path = from_start.path_to(common).expect("common node belongs to the start tree");
    let mut tail = from_goal.path_to(common).expect("common node belongs to the goal tree");
    tail.reverse();
    path.extend(tail.into_iter().skip(1));
    path
}
