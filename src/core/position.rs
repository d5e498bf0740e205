// core/position.rs

// Cell coordinates, robot poses and wall addresses for a MAZE_SIZE x MAZE_SIZE maze.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::direction::Direction;

/// Number of cells along one side of the maze
pub const MAZE_SIZE: i8 = 32;

/// Number of cells in the maze
pub const CELL_COUNT: usize = MAZE_SIZE as usize * MAZE_SIZE as usize;

/// Grid cell coordinate. May point one cell outside the field while walking.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Column, growing East
    pub x: i8,
    /// Row, growing North
    pub y: i8,
}

impl Position {
    /// Cell (`x`, `y`)
    pub const fn new(x: i8, y: i8) -> Self {
        Position { x, y }
    }

    /// Neighbouring cell in the given heading
    pub fn next(self, d: Direction) -> Position {
        let (dx, dy) = d.delta();
        Position {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Whether the cell lies on the `MAZE_SIZE` x `MAZE_SIZE` field
    pub fn is_inside_of_field(self) -> bool {
        (0..MAZE_SIZE).contains(&self.x) && (0..MAZE_SIZE).contains(&self.y)
    }

    /// Linear cell index; only meaningful inside the field
    pub fn index(self) -> usize {
        debug_assert!(self.is_inside_of_field(), "{} is outside of the field", self);
        self.x as usize + self.y as usize * MAZE_SIZE as usize
    }

    /// Inverse of `index`
    pub fn from_index(index: usize) -> Self {
        let size = MAZE_SIZE as usize;
        Position::new((index % size) as i8, (index / size) as i8)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Position plus heading
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pose {
    /// Cell
    pub p: Position,
    /// Heading
    pub d: Direction,
}

impl Pose {
    /// Pose at `p` facing `d`
    pub const fn new(p: Position, d: Direction) -> Self {
        Pose { p, d }
    }

    /// Moves one cell in `d` and faces `d`
    pub fn next(self, d: Direction) -> Pose {
        Pose { p: self.p.next(d), d }
    }
}

/// Canonical address of a wall segment: the east (`z == 0`) or north (`z == 1`)
/// wall of cell (x, y)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WallIndex {
    /// Column of the owning cell
    pub x: i8,
    /// Row of the owning cell
    pub y: i8,
    /// 0 for the east wall, 1 for the north wall
    pub z: u8,
}

impl WallIndex {
    /// Wall crossed when leaving `p` in the axis-aligned heading `d`.
    /// Returns `None` for diagonal headings.
    pub fn new(p: Position, d: Direction) -> Option<Self> {
        match d {
            Direction::East => Some(WallIndex { x: p.x, y: p.y, z: 0 }),
            Direction::North => Some(WallIndex { x: p.x, y: p.y, z: 1 }),
            Direction::West => Some(WallIndex { x: p.x.saturating_sub(1), y: p.y, z: 0 }),
            Direction::South => Some(WallIndex { x: p.x, y: p.y.saturating_sub(1), z: 1 }),
            _ => None,
        }
    }

    /// Interior walls only; the outer boundary is never inside
    pub fn is_inside_of_field(self) -> bool {
        let x_max = if self.z == 0 { MAZE_SIZE - 1 } else { MAZE_SIZE };
        let y_max = if self.z == 0 { MAZE_SIZE } else { MAZE_SIZE - 1 };
        (0..x_max).contains(&self.x) && (0..y_max).contains(&self.y) && self.z < 2
    }

    /// Slot in a `SIZE`-long wall bit vector
    pub fn index(self) -> usize {
        let size = MAZE_SIZE as usize;
        self.z as usize * size * size + self.y as usize * size + self.x as usize
    }

    /// Number of distinct wall slots
    pub const SIZE: usize = CELL_COUNT * 2;
}
