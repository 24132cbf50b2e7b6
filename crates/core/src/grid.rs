//! Static maze grid: cell attributes, orthogonal adjacency and hazard cues.
//! This module exists so every other component queries the board through one surface.
//! It does not own risk estimates; those belong to the frontier model.

mod placement;

pub use placement::{Level, PlacementPolicy, generate_level};

use crate::types::{MazeError, Pos};

/// One square of the maze. Equality is positional so cells behave as set members.
#[derive(Clone, Copy, Debug, Default)]
pub struct Cell {
    pub pos: Pos,
    pub monster: bool,
    pub crevasse: bool,
    pub portal: bool,
    pub windy: bool,
    pub smelly: bool,
}

impl Cell {
    pub fn has_hazard(&self) -> bool {
        self.monster || self.crevasse
    }

    pub fn has_item(&self) -> bool {
        self.has_hazard() || self.portal
    }

    pub fn has_cue(&self) -> bool {
        self.windy || self.smelly
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl Eq for Cell {}

#[derive(Clone, Debug)]
pub struct Grid {
    height: usize,
    width: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(height: usize, width: usize) -> Self {
        let mut cells = Vec::with_capacity(height * width);
        for row in 0..height {
            for col in 0..width {
                cells.push(Cell { pos: Pos::new(row as i32, col as i32), ..Cell::default() });
            }
        }
        Self { height, width, cells }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn area(&self) -> usize {
        self.height * self.width
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.row >= 0
            && pos.col >= 0
            && (pos.row as usize) < self.height
            && (pos.col as usize) < self.width
    }

    pub fn cell_at(&self, row: i32, col: i32) -> Result<&Cell, MazeError> {
        self.cell(Pos::new(row, col))
    }

    pub fn cell(&self, pos: Pos) -> Result<&Cell, MazeError> {
        let index = self.index(pos)?;
        Ok(&self.cells[index])
    }

    /// Row-major iteration over every cell.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Orthogonal neighbours clipped to the board, in up, right, down, left order.
    pub fn neighbors(&self, pos: Pos) -> Vec<Pos> {
        [
            Pos { row: pos.row - 1, col: pos.col },
            Pos { row: pos.row, col: pos.col + 1 },
            Pos { row: pos.row + 1, col: pos.col },
            Pos { row: pos.row, col: pos.col - 1 },
        ]
        .into_iter()
        .filter(|neighbor| self.in_bounds(*neighbor))
        .collect()
    }

    pub fn portal(&self) -> Option<Pos> {
        self.cells.iter().find(|cell| cell.portal).map(|cell| cell.pos)
    }

    pub fn place_monster(&mut self, pos: Pos) -> Result<(), MazeError> {
        self.cell_mut(pos)?.monster = true;
        for neighbor in self.neighbors(pos) {
            let index = self.index(neighbor)?;
            self.cells[index].smelly = true;
        }
        Ok(())
    }

    pub fn place_crevasse(&mut self, pos: Pos) -> Result<(), MazeError> {
        self.cell_mut(pos)?.crevasse = true;
        for neighbor in self.neighbors(pos) {
            let index = self.index(neighbor)?;
            self.cells[index].windy = true;
        }
        Ok(())
    }

    pub fn place_portal(&mut self, pos: Pos) -> Result<(), MazeError> {
        self.cell_mut(pos)?.portal = true;
        Ok(())
    }

    /// Clears a monster and re-derives the smell of the surrounding cells.
    ///
    /// Returns `false` when there was no monster to remove.
    pub fn remove_monster(&mut self, pos: Pos) -> Result<bool, MazeError> {
        let cell = self.cell_mut(pos)?;
        if !cell.monster {
            return Ok(false);
        }
        cell.monster = false;
        for neighbor in self.neighbors(pos) {
            let still_smelly = self
                .neighbors(neighbor)
                .into_iter()
                .any(|around| self.cells[self.index_unchecked(around)].monster);
            let index = self.index_unchecked(neighbor);
            self.cells[index].smelly = still_smelly;
        }
        Ok(true)
    }

    fn cell_mut(&mut self, pos: Pos) -> Result<&mut Cell, MazeError> {
        let index = self.index(pos)?;
        Ok(&mut self.cells[index])
    }

    fn index(&self, pos: Pos) -> Result<usize, MazeError> {
        if !self.in_bounds(pos) {
            return Err(MazeError::OutOfBounds { row: pos.row, col: pos.col });
        }
        Ok(self.index_unchecked(pos))
    }

    fn index_unchecked(&self, pos: Pos) -> usize {
        (pos.row as usize) * self.width + (pos.col as usize)
    }
}
