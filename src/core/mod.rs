//! Grid primitives and wall knowledge shared by the planner
//!
//! Headings, cell coordinates, poses and the maze wall store.

/// Absolute and relative headings
pub mod direction;
/// Wall queries and the in-memory wall store
pub mod maze;
/// Cells, poses and wall addresses
pub mod position;

pub use direction::{Direction, Directions, RelativeDirection};
pub use maze::{FieldBounds, Maze, WallMap};
pub use position::{CELL_COUNT, MAZE_SIZE, Pose, Position, WallIndex};

#[cfg(test)]
pub use maze::MockWallMap;
