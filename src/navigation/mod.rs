//! Step-map planning for the maze solver
//!
//! Floods a cost field outward from a set of destination cells, then reads routes
//! and next-move candidates back out of it. Straight runs are costed with a
//! trapezoidal velocity profile so long straights beat zigzags of equal length.

/// Ranked next moves at the edge of the sensed region
pub mod candidates;
/// Planner configuration and YAML persistence
pub mod config;
/// Straight-run time costs
pub mod cost_table;
/// Route extraction by descending the field
pub mod descent;
/// Goal run-out
pub mod smoothing;
/// The flooded distance field
pub mod step_map;

pub use config::{DescentStrategy, KinematicConfig, QueueKind, StepMapConfig};
pub use cost_table::{CostTable, STEP_MAX, Step};
pub use descent::NextDirections;
pub use smoothing::append_straight_directions;
pub use step_map::StepMap;

use crate::core::{Direction, Position, WallMap};

/// Whether the planner may cross the wall between `p` and `p.next(d)`
pub(crate) fn is_passable<M: WallMap + ?Sized>(
    maze: &M,
    p: Position,
    d: Direction,
    known_only: bool,
) -> bool {
    !maze.is_wall(p, d) && (!known_only || maze.is_known(p, d))
}
