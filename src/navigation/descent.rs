// src/navigation/descent.rs
// Reads a route back out of a flooded step map by walking downhill from a start pose.

use log::trace;

use super::config::DescentStrategy;
use super::cost_table::{STEP_MAX, Step};
use super::is_passable;
use super::step_map::StepMap;
use crate::core::{Direction, Directions, Pose, Position, WallMap};

/// Result of `StepMap::calc_next_directions`
#[derive(Debug, Clone, PartialEq)]
pub struct NextDirections {
    /// Pose where the trusted part of the route ends and exploration begins
    pub end: Pose,
    /// Moves through fully sensed cells
    pub known: Directions,
    /// Ranked single-step options at `end`
    pub candidates: Directions,
}

impl StepMap {
    /// Descends the field from `start` until a zero cell is reached.
    ///
    /// Returns the moves taken and the final pose. With `break_unknown`, stops at the
    /// first cell that still has an unsensed wall. The flags must match those of the
    /// `update` that produced the field.
    pub fn step_down_directions<M: WallMap + ?Sized>(
        &self,
        maze: &M,
        start: Pose,
        known_only: bool,
        simple: bool,
        break_unknown: bool,
    ) -> (Directions, Pose) {
        if !start.p.is_inside_of_field() {
            return (Directions::new(), start);
        }
        let mut directions = Directions::new();
        let mut focus = start;
        loop {
            let focus_step = self.step(focus.p);
            let next = match self.descent {
                DescentStrategy::EdgeMatch => {
                    if focus_step == 0 {
                        break;
                    }
                    self.matching_edge(maze, focus.p, focus_step, known_only, simple)
                }
                DescentStrategy::SteepestStep => self.steepest_step(maze, focus.p, known_only),
            };
            let Some((target, d)) = next else {
                trace!("Descent stuck at {} (step {})", focus.p, focus_step);
                break;
            };
            if focus_step <= self.step(target) {
                break;
            }
            while focus.p != target {
                if break_unknown && maze.unknown_count(focus.p) > 0 {
                    return (directions, focus);
                }
                focus = focus.next(d);
                directions.push(d);
            }
        }
        (directions, focus)
    }

    /// First straight-run cell whose value is exactly `focus_step` minus the run cost
    fn matching_edge<M: WallMap + ?Sized>(
        &self,
        maze: &M,
        focus: Position,
        focus_step: Step,
        known_only: bool,
        simple: bool,
    ) -> Option<(Position, Direction)> {
        for d in Direction::along4() {
            let mut next = focus;
            for i in 1usize.. {
                if !is_passable(maze, next, d, known_only) {
                    break;
                }
                next = next.next(d);
                if !next.is_inside_of_field() {
                    break;
                }
                let expected = focus_step.checked_sub(self.increment(i, simple));
                if expected == Some(self.step(next)) {
                    return Some((next, d));
                }
            }
        }
        None
    }

    /// Cheapest cell reachable in one straight run; each run stops once values stop
    /// falling below the best seen so far
    fn steepest_step<M: WallMap + ?Sized>(
        &self,
        maze: &M,
        focus: Position,
        known_only: bool,
    ) -> Option<(Position, Direction)> {
        let mut min_step = STEP_MAX;
        let mut best = None;
        for d in Direction::along4() {
            let mut next = focus;
            loop {
                if !is_passable(maze, next, d, known_only) {
                    break;
                }
                next = next.next(d);
                if !next.is_inside_of_field() {
                    break;
                }
                let next_step = self.step(next);
                if min_step <= next_step {
                    break;
                }
                min_step = next_step;
                best = Some((next, d));
            }
        }
        best
    }

    /// Descends through sensed cells, then ranks the moves available where the
    /// sensed part ends. Expects a field built with the kinematic cost model.
    pub fn calc_next_directions<M: WallMap + ?Sized>(&self, maze: &M, start: Pose) -> NextDirections {
        let (known, end) = self.step_down_directions(maze, start, false, false, true);
        let candidates = self.next_direction_candidates(maze, end);
        NextDirections { end, known, candidates }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MAZE_SIZE, Maze};
    use crate::navigation::config::StepMapConfig;

    fn open_maze() -> Maze {
        let mut maze = Maze::new(vec![]);
        for x in 0..MAZE_SIZE {
            for y in 0..MAZE_SIZE {
                maze.update_wall(Position::new(x, y), Direction::East, false);
                maze.update_wall(Position::new(x, y), Direction::North, false);
            }
        }
        maze
    }

    fn walk(start: Position, dirs: &[Direction]) -> Position {
        dirs.iter().fold(start, |p, &d| p.next(d))
    }

    #[test]
    fn two_by_two_descent() {
        let maze = open_maze();
        let mut map = StepMap::new();
        map.update(&maze, &[Position::new(0, 0)], true, true);
        let start = Pose::new(Position::new(1, 1), Direction::North);
        let (dirs, end) = map.step_down_directions(&maze, start, true, true, false);
        assert_eq!(dirs.len(), 2);
        assert_eq!(end.p, Position::new(0, 0));
        assert_eq!(walk(start.p, &dirs), end.p);
    }

    #[test]
    fn scan_order_prefers_west_before_south() {
        let maze = open_maze();
        let mut map = StepMap::new();
        map.update(&maze, &[Position::new(0, 0)], true, true);
        let start = Pose::new(Position::new(1, 1), Direction::North);
        let (dirs, _) = map.step_down_directions(&maze, start, true, true, false);
        assert_eq!(dirs, vec![Direction::West, Direction::South]);
    }

    #[test]
    fn start_outside_the_field_is_empty() {
        let maze = open_maze();
        let mut map = StepMap::new();
        map.update(&maze, &[Position::new(0, 0)], true, true);
        let start = Pose::new(Position::new(-1, 4), Direction::East);
        let (dirs, end) = map.step_down_directions(&maze, start, true, true, false);
        assert!(dirs.is_empty());
        assert_eq!(end, start);
    }

    #[test]
    fn breaks_at_first_unknown_cell() {
        let mut maze = Maze::new(vec![]);
        // known corridor (0,0) -> (3,0); everything else unknown
        for x in 0..3 {
            maze.update_wall(Position::new(x, 0), Direction::East, false);
            maze.update_wall(Position::new(x, 0), Direction::North, true);
        }
        maze.update_wall(Position::new(3, 0), Direction::North, true);
        let mut map = StepMap::new();
        map.update(&maze, &[Position::new(6, 0)], false, false);
        let start = Pose::new(Position::new(0, 0), Direction::East);
        let (dirs, end) = map.step_down_directions(&maze, start, false, false, true);
        assert_eq!(dirs, vec![Direction::East; 3]);
        assert_eq!(end, Pose::new(Position::new(3, 0), Direction::East));
    }

    #[test]
    fn kinematic_descent_reaches_the_goal() {
        let mut maze = open_maze();
        maze.update_wall(Position::new(0, 3), Direction::East, true);
        let mut map = StepMap::new();
        map.update(&maze, &[Position::new(5, 5)], false, false);
        let start = Pose::new(Position::new(0, 0), Direction::North);
        let (dirs, end) = map.step_down_directions(&maze, start, false, false, false);
        assert_eq!(end.p, Position::new(5, 5));
        assert_eq!(walk(start.p, &dirs), end.p);
        assert_eq!(map.step(end.p), 0);
    }

    #[test]
    fn steepest_step_strategy_also_reaches_the_goal() {
        let maze = open_maze();
        let config = StepMapConfig {
            descent: DescentStrategy::SteepestStep,
            ..StepMapConfig::default()
        };
        let mut map = StepMap::with_config(&config).unwrap();
        map.update(&maze, &[Position::new(4, 0)], false, true);
        let start = Pose::new(Position::new(0, 3), Direction::North);
        let (dirs, end) = map.step_down_directions(&maze, start, false, true, false);
        assert_eq!(end.p, Position::new(4, 0));
        assert_eq!(dirs.len(), 7);
    }

    #[test]
    fn unreachable_start_stays_put() {
        let mut maze = open_maze();
        let pocket = Position::new(10, 10);
        for d in Direction::along4() {
            maze.update_wall(pocket, d, true);
        }
        let mut map = StepMap::new();
        map.update(&maze, &[Position::new(0, 0)], false, true);
        let (dirs, end) =
            map.step_down_directions(&maze, Pose::new(pocket, Direction::East), false, true, false);
        assert!(dirs.is_empty());
        assert_eq!(end.p, pocket);
    }
}
