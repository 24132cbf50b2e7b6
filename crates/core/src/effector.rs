//! Applies agent actions to the board: moves change position, throws clear monsters.

use tracing::debug;

use crate::grid::Grid;
use crate::types::{Action, MazeError, Pos};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Moved { to: Pos },
    /// Move or throw past the board edge; nothing changes.
    Refused,
    MonsterSlain { at: Pos },
    ThrowMissed { at: Pos },
}

pub fn apply(grid: &mut Grid, agent: &mut Pos, action: Action) -> Result<ActionOutcome, MazeError> {
    let target = agent.step(action.direction());
    if !grid.in_bounds(target) {
        return Ok(ActionOutcome::Refused);
    }
    match action {
        Action::Move(_) => {
            *agent = target;
            Ok(ActionOutcome::Moved { to: target })
        }
        Action::Throw(direction) => {
            if grid.remove_monster(target)? {
                debug!(at = %target, ?direction, "monster slain");
                Ok(ActionOutcome::MonsterSlain { at: target })
            } else {
                Ok(ActionOutcome::ThrowMissed { at: target })
            }
        }
    }
}
