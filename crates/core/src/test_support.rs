//! Shared fixtures for the crate's unit test suites.
//! This module exists to avoid repeating grid and discovery setup across tests.
//! It does not own production exploration logic.

use crate::frontier::FrontierModel;
use crate::grid::Grid;
use crate::types::Pos;

pub(crate) fn open_grid(height: usize, width: usize) -> Grid {
    Grid::new(height, width)
}

/// 3x3 board with a single crevasse in the middle; the agent starts in the top-left corner.
pub(crate) fn center_crevasse_fixture() -> (Grid, Pos) {
    let mut grid = Grid::new(3, 3);
    grid.place_crevasse(Pos::new(1, 1)).expect("center is in bounds");
    grid.place_portal(Pos::new(2, 2)).expect("corner is in bounds");
    (grid, Pos::new(0, 0))
}

pub(crate) fn discovered_in_order(grid: &Grid, cells: &[Pos]) -> FrontierModel {
    let mut model = FrontierModel::new();
    for cell in cells {
        model.discover(grid, *cell).expect("fixture cells are in bounds");
    }
    model
}

/// Hazard-free board where every cell has been visited in row-major order.
pub(crate) fn fully_discovered(height: usize, width: usize) -> (Grid, FrontierModel) {
    let grid = Grid::new(height, width);
    let cells: Vec<Pos> = grid.cells().map(|cell| cell.pos).collect();
    let model = discovered_in_order(&grid, &cells);
    (grid, model)
}
