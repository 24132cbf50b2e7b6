pub mod config;
pub mod effector;
pub mod explorer;
pub mod frontier;
pub mod grid;
pub mod pathfinding;
pub mod policy;
pub mod search_tree;
pub mod session;
pub mod types;

#[cfg(test)]
mod test_support;

pub use config::MazeConfig;
pub use explorer::Explorer;
pub use frontier::FrontierModel;
pub use grid::{Cell, Grid, Level, PlacementPolicy, generate_level};
pub use pathfinding::{RoutePlan, find_path, path_to_actions, plan_route};
pub use policy::select_goal;
pub use search_tree::SearchTree;
pub use session::Session;
pub use types::*;
