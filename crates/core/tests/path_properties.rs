use std::collections::BTreeSet;

use maze_core::frontier::{NeighborCue, risk_of};
use maze_core::{
    Action, Direction, FrontierModel, Grid, PlacementPolicy, Pos, Risk, find_path,
    generate_level, path_to_actions,
};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

/// Discovers the cells of a border-clipped random walk so the discovered set stays connected.
fn walk_discovery(grid: &Grid, start: Pos, steps: &[u8]) -> FrontierModel {
    let mut model = FrontierModel::new();
    model.discover(grid, start).expect("start in bounds");
    let mut at = start;
    for step in steps {
        let next = at.step(Direction::ALL[usize::from(*step) % 4]);
        if grid.in_bounds(next) {
            at = next;
            model.discover(grid, at).expect("in bounds");
        }
    }
    model
}

fn replay(start: Pos, actions: &[Action]) -> Vec<Pos> {
    let mut cells = vec![start];
    let mut at = start;
    for action in actions {
        if let Action::Move(direction) = action {
            at = at.step(*direction);
            cells.push(at);
        }
    }
    cells
}

fn manhattan(a: Pos, b: Pos) -> usize {
    (a.row.abs_diff(b.row) + a.col.abs_diff(b.col)) as usize
}

/// Every estimate is the fresh classification of its discovered neighbours, except that a
/// cell once seen at zero stays there.
fn check_estimates(
    grid: &Grid,
    model: &FrontierModel,
    resolved_safe: &mut BTreeSet<Pos>,
) -> Result<(), TestCaseError> {
    for cell in resolved_safe.iter() {
        if let Some(risk) = model.risk_of(*cell) {
            prop_assert_eq!(risk, Risk::SAFE, "{} left the safe bucket", cell);
        }
    }
    for (risk, cells) in model.frontier_cells() {
        for cell in cells {
            let cues: Vec<NeighborCue> = grid
                .neighbors(*cell)
                .into_iter()
                .filter(|neighbor| model.is_discovered(*neighbor))
                .map(|neighbor| NeighborCue::of(grid.cell(neighbor).expect("in bounds")))
                .collect();
            let fresh = risk_of(&cues);
            prop_assert!(
                *risk == fresh || (risk.is_safe() && resolved_safe.contains(cell)),
                "{} holds {} but its neighbours say {}",
                cell,
                risk,
                fresh
            );
        }
    }
    for (risk, cells) in model.frontier_cells() {
        if risk.is_safe() {
            resolved_safe.extend(cells.iter().copied());
        }
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]
    #[test]
    fn search_over_discovered_cells_returns_adjacent_steps(
        height in 2_usize..7,
        width in 2_usize..7,
        steps in prop::collection::vec(0_u8..4, 1..60),
        pick_start in any::<usize>(),
        pick_goal in any::<usize>(),
    ) {
        let grid = Grid::new(height, width);
        let model = walk_discovery(&grid, Pos::new(0, 0), &steps);
        let discovered = model.discovered();
        let start = discovered[pick_start % discovered.len()];
        let goal = discovered[pick_goal % discovered.len()];
        prop_assume!(start != goal);

        let path = find_path(&grid, &model, start, goal).expect("walked cells are connected");
        prop_assert_eq!(path.first(), Some(&start));
        prop_assert_eq!(path.last(), Some(&goal));
        for pair in path.windows(2) {
            prop_assert!(Direction::between(pair[0], pair[1]).is_some(), "{:?} not adjacent", pair);
        }
        for cell in &path {
            prop_assert!(model.is_discovered(*cell), "{} was never discovered", cell);
        }
        let unique: BTreeSet<Pos> = path.iter().copied().collect();
        prop_assert_eq!(unique.len(), path.len(), "path revisits a cell");

        let actions = path_to_actions(&path);
        prop_assert_eq!(replay(start, &actions), path);
    }

    #[test]
    fn open_boards_get_shortest_paths(
        height in 2_usize..8,
        width in 2_usize..8,
        from in any::<(usize, usize)>(),
        to in any::<(usize, usize)>(),
    ) {
        let grid = Grid::new(height, width);
        let mut model = FrontierModel::new();
        for cell in grid.cells() {
            model.discover(&grid, cell.pos).expect("in bounds");
        }
        let start = Pos::new((from.0 % height) as i32, (from.1 % width) as i32);
        let goal = Pos::new((to.0 % height) as i32, (to.1 % width) as i32);
        prop_assume!(start != goal);

        let path = find_path(&grid, &model, start, goal).expect("open board is connected");
        prop_assert_eq!(path.len(), manhattan(start, goal) + 1);
    }

    #[test]
    fn safe_estimates_never_turn_positive(
        seed in any::<u64>(),
        size in 3_usize..7,
        steps in prop::collection::vec(0_u8..4, 1..80),
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let level = generate_level(size, size, PlacementPolicy::default(), &mut rng)
            .expect("board is large enough");
        let grid = level.grid;

        let mut model = FrontierModel::new();
        let mut resolved_safe: BTreeSet<Pos> = BTreeSet::new();
        model.discover(&grid, level.start).expect("start in bounds");
        check_estimates(&grid, &model, &mut resolved_safe)?;

        let mut at = level.start;
        for step in &steps {
            let next = at.step(Direction::ALL[usize::from(*step) % 4]);
            if !grid.in_bounds(next) {
                continue;
            }
            at = next;
            model.discover(&grid, at).expect("in bounds");
            check_estimates(&grid, &model, &mut resolved_safe)?;
        }
    }
}
