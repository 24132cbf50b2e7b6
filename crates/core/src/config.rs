//! Session parameters: board size, hazard placement and turn limits.

use serde::{Deserialize, Serialize};

use crate::grid::PlacementPolicy;
use crate::types::MazeError;

/// Tunables for a run. Missing fields fall back to the defaults below.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MazeConfig {
    /// Board height of the first level and after every death.
    pub base_height: usize,
    pub base_width: usize,
    /// Grow the board by one row and one column for every cleared level.
    pub grow_on_clear: bool,
    /// Turns a level may take before it is abandoned as exhausted.
    pub max_turns_per_level: u32,
    pub placement: PlacementPolicy,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            base_height: 3,
            base_width: 3,
            grow_on_clear: true,
            max_turns_per_level: 256,
            placement: PlacementPolicy::default(),
        }
    }
}

impl MazeConfig {
    pub fn validate(&self) -> Result<(), MazeError> {
        if self.base_height < 2 || self.base_width < 2 {
            return Err(MazeError::InvalidConfig(format!(
                "board must be at least 2x2, got {}x{}",
                self.base_height, self.base_width
            )));
        }
        if let PlacementPolicy::PerCell { hazard_probability } = self.placement
            && !(0.0..1.0).contains(&hazard_probability)
        {
            return Err(MazeError::InvalidConfig(format!(
                "hazard_probability must be in [0, 1), got {hazard_probability}"
            )));
        }
        if self.max_turns_per_level == 0 {
            return Err(MazeError::InvalidConfig("max_turns_per_level must be > 0".to_string()));
        }
        Ok(())
    }

    /// Board dimensions for the `streak`-th consecutive cleared level (0 = base size).
    pub fn level_dims(&self, streak: u32) -> (usize, usize) {
        let growth = if self.grow_on_clear { streak as usize } else { 0 };
        (self.base_height + growth, self.base_width + growth)
    }
}
