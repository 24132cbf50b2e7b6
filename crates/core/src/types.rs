use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Pos {
    pub row: i32,
    pub col: i32,
}

impl Pos {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn step(self, direction: Direction) -> Pos {
        let (d_row, d_col) = direction.delta();
        Pos { row: self.row + d_row, col: self.col + d_col }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Direction of a single orthogonal step from `from` to `to`, if they are 4-adjacent.
    pub fn between(from: Pos, to: Pos) -> Option<Direction> {
        Direction::ALL.into_iter().find(|direction| from.step(*direction) == to)
    }
}

/// The agent's eight-symbol action vocabulary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Move(Direction),
    Throw(Direction),
}

impl Action {
    pub fn direction(self) -> Direction {
        match self {
            Action::Move(direction) | Action::Throw(direction) => direction,
        }
    }
}

/// Risk estimate for a frontier cell, stored in tenths so it can key ordered buckets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Risk(u8);

impl Risk {
    pub const SAFE: Risk = Risk(0);
    pub const CERTAIN: Risk = Risk(10);

    /// Estimates that carry a monster signature and justify a pre-emptive throw.
    const MONSTER_SIGNATURES: [u8; 4] = [2, 5, 7, 9];

    pub fn from_tenths(tenths: u8) -> Self {
        debug_assert!(tenths <= 10, "risk above certainty: {tenths}");
        Risk(tenths.min(10))
    }

    pub fn tenths(self) -> u8 {
        self.0
    }

    pub fn probability(self) -> f64 {
        f64::from(self.0) / 10.0
    }

    pub fn is_safe(self) -> bool {
        self == Risk::SAFE
    }

    pub fn has_monster_signature(self) -> bool {
        Self::MONSTER_SIGNATURES.contains(&self.0)
    }
}

impl fmt::Display for Risk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.probability())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Fell,
    Caught,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    Continue,
    LevelCleared,
    Died(DeathCause),
    Exhausted,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("cell ({row}, {col}) is outside the grid")]
    OutOfBounds { row: i32, col: i32 },
    #[error("no frontier cell left to explore")]
    NoGoal,
    #[error("no discovered route between {start} and {goal}")]
    Disconnected { start: Pos, goal: Pos },
    #[error("start and goal are the same cell")]
    EmptyPath,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogEvent {
    GoalSelected { target: Pos, risk: Risk, path_len: u16 },
    MonsterSlain { at: Pos },
    ThrowMissed { at: Pos },
    LevelCleared { level: u32, score: i64 },
    AgentDied { at: Pos, cause: DeathCause },
    ExplorationExhausted { level: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_between_only_accepts_orthogonal_steps() {
        let origin = Pos::new(2, 2);
        assert_eq!(Direction::between(origin, Pos::new(1, 2)), Some(Direction::Up));
        assert_eq!(Direction::between(origin, Pos::new(3, 2)), Some(Direction::Down));
        assert_eq!(Direction::between(origin, Pos::new(2, 1)), Some(Direction::Left));
        assert_eq!(Direction::between(origin, Pos::new(2, 3)), Some(Direction::Right));
        assert_eq!(Direction::between(origin, Pos::new(3, 3)), None);
        assert_eq!(Direction::between(origin, origin), None);
    }

    #[test]
    fn default_position_is_the_top_left_corner() {
        assert_eq!(Pos::default(), Pos::new(0, 0));
    }

    #[test]
    fn monster_signature_matches_smell_tiers_only() {
        let flagged: Vec<u8> =
            (0..=10).filter(|t| Risk::from_tenths(*t).has_monster_signature()).collect();
        assert_eq!(flagged, vec![2, 5, 7, 9]);
    }

    #[test]
    fn risk_displays_as_probability() {
        assert_eq!(Risk::from_tenths(3).to_string(), "0.3");
        assert_eq!(Risk::CERTAIN.to_string(), "1.0");
    }
}
