// core/direction.rs

// Absolute and relative headings on the maze grid. Absolute directions are counted
// counter-clockwise in 45 degree steps starting from East, so turning is plain
// modular arithmetic on the index.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Absolute heading on the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// +x
    East,
    /// +x +y
    NorthEast,
    /// +y
    North,
    /// -x +y
    NorthWest,
    /// -x
    West,
    /// -x -y
    SouthWest,
    /// -y
    South,
    /// +x -y
    SouthEast,
}

/// Heading relative to the current one
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RelativeDirection {
    /// No turn
    Front,
    /// 45 degrees counter-clockwise
    Left45,
    /// 90 degrees counter-clockwise
    Left,
    /// 135 degrees counter-clockwise
    Left135,
    /// Half turn
    Back,
    /// 135 degrees clockwise
    Right135,
    /// 90 degrees clockwise
    Right,
    /// 45 degrees clockwise
    Right45,
}

/// Ordered list of single-cell moves
pub type Directions = Vec<Direction>;

impl Direction {
    /// All eight headings in index order
    pub const ALL: [Direction; 8] = [
        Direction::East,
        Direction::NorthEast,
        Direction::North,
        Direction::NorthWest,
        Direction::West,
        Direction::SouthWest,
        Direction::South,
        Direction::SouthEast,
    ];

    /// The four axis-aligned headings, in scan order
    pub const fn along4() -> [Direction; 4] {
        [Direction::East, Direction::North, Direction::West, Direction::South]
    }

    /// Builds a heading from its index, wrapping modulo 8
    pub fn from_index(index: u8) -> Self {
        Self::ALL[(index & 7) as usize]
    }

    /// Counter-clockwise 45 degree steps from East
    pub fn index(self) -> u8 {
        self as u8
    }

    /// True for East, North, West and South
    pub fn is_along(self) -> bool {
        self.index() % 2 == 0
    }

    /// Cell offset of one step in this heading
    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::East => (1, 0),
            Direction::NorthEast => (1, 1),
            Direction::North => (0, 1),
            Direction::NorthWest => (-1, 1),
            Direction::West => (-1, 0),
            Direction::SouthWest => (-1, -1),
            Direction::South => (0, -1),
            Direction::SouthEast => (1, -1),
        }
    }
}

impl RelativeDirection {
    /// Builds a turn from its counter-clockwise 45 degree count, wrapping modulo 8
    pub fn from_index(index: u8) -> Self {
        match index & 7 {
            0 => RelativeDirection::Front,
            1 => RelativeDirection::Left45,
            2 => RelativeDirection::Left,
            3 => RelativeDirection::Left135,
            4 => RelativeDirection::Back,
            5 => RelativeDirection::Right135,
            6 => RelativeDirection::Right,
            _ => RelativeDirection::Right45,
        }
    }

    /// Counter-clockwise 45 degree steps
    pub fn index(self) -> u8 {
        self as u8
    }
}

impl Add<RelativeDirection> for Direction {
    type Output = Direction;

    fn add(self, rel: RelativeDirection) -> Direction {
        Direction::from_index(self.index().wrapping_add(rel.index()))
    }
}

impl Sub for Direction {
    type Output = RelativeDirection;

    /// Turn needed to go from `rhs` to `self`
    fn sub(self, rhs: Direction) -> RelativeDirection {
        RelativeDirection::from_index(self.index().wrapping_sub(rhs.index()))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let symbol = match self {
            Direction::East => ">",
            Direction::NorthEast => "'",
            Direction::North => "^",
            Direction::NorthWest => "`",
            Direction::West => "<",
            Direction::SouthWest => ",",
            Direction::South => "v",
            Direction::SouthEast => ".",
        };
        write!(f, "{}", symbol)
    }
}
