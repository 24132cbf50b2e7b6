//! Goal selection: which frontier cell to pursue next.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;

use crate::frontier::FrontierModel;
use crate::types::{MazeError, Pos};

/// Picks uniformly among the cells of the lowest-risk non-empty bucket.
pub fn select_goal(frontier: &FrontierModel, rng: &mut ChaCha8Rng) -> Result<Pos, MazeError> {
    let (_, candidates) = frontier.lowest_bucket().ok_or(MazeError::NoGoal)?;
    if candidates.is_empty() {
        return Err(MazeError::NoGoal);
    }
    let index = rng.next_u64() as usize % candidates.len();
    candidates.iter().nth(index).copied().ok_or(MazeError::NoGoal)
}
