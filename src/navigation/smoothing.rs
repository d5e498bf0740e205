// src/navigation/smoothing.rs
// Extends a finished route inside the goal area so the robot can keep running
// straight (or on a diagonal zigzag) instead of braking at the first goal cell.

use log::trace;

use super::is_passable;
use crate::core::{Direction, Directions, RelativeDirection, WallMap};

/// Appends moves to `directions` for as long as the route can continue straight.
///
/// The route is replayed from `maze.start()`. When `diag_enabled` and the last move
/// was a 90 degree turn, the zigzag continuation is tried before plain straight.
/// Routes shorter than two moves are left untouched.
pub fn append_straight_directions<M: WallMap + ?Sized>(
    maze: &M,
    directions: &mut Directions,
    known_only: bool,
    diag_enabled: bool,
) {
    if directions.len() < 2 {
        return;
    }
    let mut p = directions.iter().fold(maze.start(), |p, &d| p.next(d));
    let mut prev = directions[directions.len() - 2];
    let mut dir = directions[directions.len() - 1];
    let before = directions.len();

    loop {
        let candidates: Vec<Direction> = match dir - prev {
            RelativeDirection::Left if diag_enabled => vec![dir + RelativeDirection::Right, dir],
            RelativeDirection::Right if diag_enabled => vec![dir + RelativeDirection::Left, dir],
            _ => vec![dir],
        };
        let Some(d) = candidates
            .into_iter()
            .find(|&d| is_passable(maze, p, d, known_only) && p.next(d).is_inside_of_field())
        else {
            break;
        };
        directions.push(d);
        p = p.next(d);
        prev = dir;
        dir = d;
    }
    trace!("Appended {} straight moves ending at {}", directions.len() - before, p);
}
