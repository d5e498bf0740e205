// src/navigation/candidates.rs
// Orders the single-step moves available where the trusted route runs out.

use super::cost_table::STEP_MAX;
use super::step_map::StepMap;
use crate::core::{Directions, Pose, RelativeDirection, WallMap};

impl StepMap {
    /// Open, reachable moves from `focus`, best first.
    ///
    /// Starting from front, left, right, back: cheaper targets first, then targets
    /// with unsensed walls ahead of fully sensed ones, then going straight ahead of
    /// everything. Each criterion is a stable re-sort of the previous order.
    /// Empty when every neighbour is walled or unreached.
    pub fn next_direction_candidates<M: WallMap + ?Sized>(&self, maze: &M, focus: Pose) -> Directions {
        let mut dirs: Directions = [
            RelativeDirection::Front,
            RelativeDirection::Left,
            RelativeDirection::Right,
            RelativeDirection::Back,
        ]
        .into_iter()
        .map(|rel| focus.d + rel)
        .filter(|&d| !maze.is_wall(focus.p, d) && self.step(focus.p.next(d)) != STEP_MAX)
        .collect();

        dirs.sort_by_key(|&d| self.step(focus.p.next(d)));
        dirs.sort_by_key(|&d| maze.unknown_count(focus.p.next(d)) == 0);
        dirs.sort_by_key(|&d| d != focus.d);
        dirs
    }
}
