//! Incremental risk model over the undiscovered cells bordering explored territory.
//! This module exists so belief maintenance stays separate from goal choice and routing.
//! It does not own the grid; cues are read from it on every recomputation.

mod classify;

pub use classify::{CueClass, NeighborCue, classify, risk_for, risk_of};

use std::collections::{BTreeMap, BTreeSet};

use tracing::trace;

use crate::grid::Grid;
use crate::types::{MazeError, Pos, Risk};

/// Discovered cells plus a risk-bucketed view of the frontier.
///
/// Every frontier cell sits in exactly one bucket; empty buckets are dropped.
#[derive(Clone, Debug, Default)]
pub struct FrontierModel {
    discovered: Vec<Pos>,
    discovered_set: BTreeSet<Pos>,
    buckets: BTreeMap<Risk, BTreeSet<Pos>>,
    estimates: BTreeMap<Pos, Risk>,
}

impl FrontierModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets everything; used on level transitions.
    pub fn reset(&mut self) {
        self.discovered.clear();
        self.discovered_set.clear();
        self.buckets.clear();
        self.estimates.clear();
    }

    /// Marks `pos` as visited and re-derives the estimate of every frontier cell.
    ///
    /// Re-discovering a known cell is a no-op.
    pub fn discover(&mut self, grid: &Grid, pos: Pos) -> Result<(), MazeError> {
        grid.cell(pos)?;
        if !self.discovered_set.insert(pos) {
            return Ok(());
        }
        self.discovered.push(pos);
        self.unbucket(pos);
        self.recompute(grid);
        trace!(%pos, frontier = self.estimates.len(), "cell discovered");
        Ok(())
    }

    pub fn is_discovered(&self, pos: Pos) -> bool {
        self.discovered_set.contains(&pos)
    }

    /// Discovered cells in the order they were first visited.
    pub fn discovered(&self) -> &[Pos] {
        &self.discovered
    }

    pub fn frontier_cells(&self) -> &BTreeMap<Risk, BTreeSet<Pos>> {
        &self.buckets
    }

    pub fn risk_of(&self, pos: Pos) -> Option<Risk> {
        self.estimates.get(&pos).copied()
    }

    pub fn lowest_bucket(&self) -> Option<(Risk, &BTreeSet<Pos>)> {
        self.buckets.iter().next().map(|(risk, cells)| (*risk, cells))
    }

    pub fn frontier_len(&self) -> usize {
        self.estimates.len()
    }

    fn recompute(&mut self, grid: &Grid) {
        let candidates: BTreeSet<Pos> = self
            .discovered
            .iter()
            .flat_map(|pos| grid.neighbors(*pos))
            .filter(|neighbor| !self.discovered_set.contains(neighbor))
            .collect();

        for cell in candidates {
            let cues: Vec<NeighborCue> = grid
                .neighbors(cell)
                .into_iter()
                .filter(|neighbor| self.discovered_set.contains(neighbor))
                .filter_map(|neighbor| grid.cell(neighbor).ok().map(NeighborCue::of))
                .collect();
            let risk = risk_of(&cues);

            // A cell resolved as safe is never pushed back into a positive bucket.
            let resolved_safe = self.estimates.get(&cell).is_some_and(|current| current.is_safe());
            if resolved_safe && !risk.is_safe() {
                continue;
            }
            self.assign(cell, risk);
        }
    }

    fn assign(&mut self, cell: Pos, risk: Risk) {
        if self.estimates.get(&cell) == Some(&risk) {
            return;
        }
        self.unbucket(cell);
        self.buckets.entry(risk).or_default().insert(cell);
        self.estimates.insert(cell, risk);
    }

    fn unbucket(&mut self, cell: Pos) {
        let Some(previous) = self.estimates.remove(&cell) else {
            return;
        };
        if let Some(bucket) = self.buckets.get_mut(&previous) {
            bucket.remove(&cell);
            if bucket.is_empty() {
                self.buckets.remove(&previous);
            }
        }
    }
}
