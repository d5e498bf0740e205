// core/maze.rs

// Wall knowledge consumed by the planner. `WallMap` is the read-only view the
// navigation code borrows for one planning cycle; `Maze` is the in-memory store the
// robot fills in as it senses walls.

use log::trace;
use serde::{Deserialize, Serialize};

use super::direction::Direction;
use super::position::{Position, WallIndex};

/// Inclusive bounding box of the explored region
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldBounds {
    /// Westmost explored column
    pub min_x: i8,
    /// Eastmost explored column
    pub max_x: i8,
    /// Southmost explored row
    pub min_y: i8,
    /// Northmost explored row
    pub max_y: i8,
}

impl FieldBounds {
    /// Box containing only `p`
    pub fn around(p: Position) -> Self {
        FieldBounds { min_x: p.x, max_x: p.x, min_y: p.y, max_y: p.y }
    }

    /// Grows the box so it contains `p`
    pub fn include(&mut self, p: Position) {
        self.min_x = self.min_x.min(p.x);
        self.max_x = self.max_x.max(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_y = self.max_y.max(p.y);
    }
}

/// Read-only wall queries used by the planner
#[cfg_attr(test, mockall::automock)]
pub trait WallMap {
    /// Whether a wall blocks leaving `p` towards `d`
    fn is_wall(&self, p: Position, d: Direction) -> bool;
    /// Whether the wall between `p` and `p.next(d)` has been sensed
    fn is_known(&self, p: Position, d: Direction) -> bool;
    /// Number of unsensed walls around `p`
    fn unknown_count(&self, p: Position) -> usize;
    /// Explored region
    fn bounds(&self) -> FieldBounds;
    /// Start cell of the run
    fn start(&self) -> Position;
}

/// Bit-vector wall store.
///
/// Every interior wall starts open and unknown; the outer boundary is always a known
/// wall, and so is any diagonal query.
#[derive(Clone, Debug)]
pub struct Maze {
    walls: Vec<bool>,
    known: Vec<bool>,
    bounds: FieldBounds,
    start: Position,
    goals: Vec<Position>,
}

impl Maze {
    /// Empty maze starting at (0, 0)
    pub fn new(goals: Vec<Position>) -> Self {
        Self::with_start(Position::new(0, 0), goals)
    }

    /// Empty maze starting at `start`
    pub fn with_start(start: Position, goals: Vec<Position>) -> Self {
        Maze {
            walls: vec![false; WallIndex::SIZE],
            known: vec![false; WallIndex::SIZE],
            bounds: FieldBounds::around(start),
            start,
            goals,
        }
    }

    /// Forgets all sensed walls
    pub fn reset(&mut self) {
        self.walls.fill(false);
        self.known.fill(false);
        self.bounds = FieldBounds::around(self.start);
    }

    /// Goal cells of the run
    pub fn goals(&self) -> &[Position] {
        &self.goals
    }

    /// Records a sensed wall and widens the explored region.
    /// Returns false if the wall is on the boundary or not axis-aligned.
    pub fn update_wall(&mut self, p: Position, d: Direction, is_wall: bool) -> bool {
        let Some(i) = Self::interior(p, d) else {
            return false;
        };
        self.walls[i.index()] = is_wall;
        self.known[i.index()] = true;
        self.bounds.include(p);
        trace!("Wall {} {:?} sensed as {}", p, d, if is_wall { "closed" } else { "open" });
        true
    }

    /// Sets the knowledge bit without touching the wall or bounds
    pub fn set_known(&mut self, p: Position, d: Direction, is_known: bool) -> bool {
        match Self::interior(p, d) {
            Some(i) => {
                self.known[i.index()] = is_known;
                true
            }
            None => false,
        }
    }

    fn interior(p: Position, d: Direction) -> Option<WallIndex> {
        WallIndex::new(p, d).filter(|i| i.is_inside_of_field())
    }
}

impl WallMap for Maze {
    fn is_wall(&self, p: Position, d: Direction) -> bool {
        Self::interior(p, d).is_none_or(|i| self.walls[i.index()])
    }

    fn is_known(&self, p: Position, d: Direction) -> bool {
        Self::interior(p, d).is_none_or(|i| self.known[i.index()])
    }

    fn unknown_count(&self, p: Position) -> usize {
        Direction::along4()
            .into_iter()
            .filter(|&d| !self.is_known(p, d))
            .count()
    }

    fn bounds(&self) -> FieldBounds {
        self.bounds
    }

    fn start(&self) -> Position {
        self.start
    }
}
