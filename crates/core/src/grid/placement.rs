//! Hazard, portal and start placement for a fresh level.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Grid;
use crate::types::{MazeError, Pos};

pub const DEFAULT_HAZARD_PROBABILITY: f64 = 0.20;

/// How hazards are scattered over a new board.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlacementPolicy {
    /// Every cell independently becomes a hazard with `hazard_probability`,
    /// split evenly between crevasses and monsters.
    PerCell { hazard_probability: f64 },
    /// `height - 2` monsters and `height - 2` crevasses on random empty cells.
    Quota,
}

impl Default for PlacementPolicy {
    fn default() -> Self {
        PlacementPolicy::PerCell { hazard_probability: DEFAULT_HAZARD_PROBABILITY }
    }
}

#[derive(Clone, Debug)]
pub struct Level {
    pub grid: Grid,
    pub start: Pos,
}

/// Builds a populated board: hazards, exactly one portal, and an empty start cell.
pub fn generate_level(
    height: usize,
    width: usize,
    policy: PlacementPolicy,
    rng: &mut ChaCha8Rng,
) -> Result<Level, MazeError> {
    if height * width < 2 {
        return Err(MazeError::InvalidConfig(format!(
            "a {height}x{width} board cannot hold both a portal and the agent"
        )));
    }

    let mut grid = Grid::new(height, width);
    // Two cells always stay free: one for the portal, one for the agent.
    let hazard_cap = grid.area() - 2;

    match policy {
        PlacementPolicy::PerCell { hazard_probability } => {
            scatter_per_cell(&mut grid, hazard_probability, hazard_cap, rng)?;
        }
        PlacementPolicy::Quota => {
            let quota = height.saturating_sub(2);
            let monsters = quota.min(hazard_cap);
            let crevasses = quota.min(hazard_cap - monsters);
            for _ in 0..monsters {
                let pos = pick_empty(&grid, rng)?;
                grid.place_monster(pos)?;
            }
            for _ in 0..crevasses {
                let pos = pick_empty(&grid, rng)?;
                grid.place_crevasse(pos)?;
            }
        }
    }

    let portal = pick_empty(&grid, rng)?;
    grid.place_portal(portal)?;
    let start = pick_empty(&grid, rng)?;

    debug!(height, width, %portal, %start, "level generated");
    Ok(Level { grid, start })
}

fn scatter_per_cell(
    grid: &mut Grid,
    hazard_probability: f64,
    hazard_cap: usize,
    rng: &mut ChaCha8Rng,
) -> Result<(), MazeError> {
    let positions: Vec<Pos> = grid.cells().map(|cell| cell.pos).collect();
    let mut placed = 0usize;
    for pos in positions {
        // Rolls are drawn for every cell so the stream does not depend on the cap.
        let hazardous = unit_roll(rng) < hazard_probability;
        let crevasse = rng.next_u64() & 1 == 0;
        if !hazardous || placed >= hazard_cap {
            continue;
        }
        if crevasse {
            grid.place_crevasse(pos)?;
        } else {
            grid.place_monster(pos)?;
        }
        placed += 1;
    }
    Ok(())
}

/// Uniform pick among cells with no hazard and no portal, scanned in row-major order.
fn pick_empty(grid: &Grid, rng: &mut ChaCha8Rng) -> Result<Pos, MazeError> {
    let candidates: Vec<Pos> =
        grid.cells().filter(|cell| !cell.has_item()).map(|cell| cell.pos).collect();
    if candidates.is_empty() {
        return Err(MazeError::InvalidConfig("no empty cell left on the board".to_string()));
    }
    Ok(candidates[rng.next_u64() as usize % candidates.len()])
}

fn unit_roll(rng: &mut ChaCha8Rng) -> f64 {
    (rng.next_u64() >> 11) as f64 / (1u64 << 53) as f64
}

#[cfg(test)]
mod tests {
    use rand_chacha::rand_core::SeedableRng;

    use super::*;
    use crate::grid::Cell;

    fn count(grid: &Grid, pred: impl Fn(&Cell) -> bool) -> usize {
        grid.cells().filter(|cell| pred(cell)).count()
    }

    #[test]
    fn every_level_has_one_portal_and_an_empty_start() {
        for seed in 0..64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let level =
                generate_level(4, 5, PlacementPolicy::default(), &mut rng).expect("level builds");
            assert_eq!(count(&level.grid, |cell| cell.portal), 1, "seed {seed}");
            let start = level.grid.cell(level.start).expect("start in bounds");
            assert!(!start.has_item(), "seed {seed}: start must be empty");
        }
    }

    #[test]
    fn cells_never_host_two_hazards() {
        for seed in 0..64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let policy = PlacementPolicy::PerCell { hazard_probability: 0.6 };
            let level = generate_level(6, 6, policy, &mut rng).expect("level builds");
            assert_eq!(count(&level.grid, |cell| cell.monster && cell.crevasse), 0);
            assert_eq!(count(&level.grid, |cell| cell.has_hazard() && cell.portal), 0);
        }
    }

    #[test]
    fn saturated_probability_still_leaves_room_for_portal_and_agent() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let policy = PlacementPolicy::PerCell { hazard_probability: 1.0 };
        let level = generate_level(3, 3, policy, &mut rng).expect("level builds");
        assert_eq!(count(&level.grid, |cell| cell.has_hazard()), 7);
        assert!(level.grid.portal().is_some());
    }

    #[test]
    fn quota_places_height_minus_two_of_each_hazard() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let level = generate_level(5, 5, PlacementPolicy::Quota, &mut rng).expect("level builds");
        assert_eq!(count(&level.grid, |cell| cell.monster), 3);
        assert_eq!(count(&level.grid, |cell| cell.crevasse), 3);
    }

    #[test]
    fn same_seed_produces_the_same_board() {
        let layout = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let level =
                generate_level(5, 4, PlacementPolicy::default(), &mut rng).expect("level builds");
            let hazards: Vec<(Pos, bool, bool)> =
                level.grid.cells().map(|cell| (cell.pos, cell.monster, cell.crevasse)).collect();
            (hazards, level.grid.portal(), level.start)
        };
        assert_eq!(layout(99), layout(99));
    }

    #[test]
    fn single_cell_board_is_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(matches!(
            generate_level(1, 1, PlacementPolicy::default(), &mut rng),
            Err(MazeError::InvalidConfig(_))
        ));
    }
}
