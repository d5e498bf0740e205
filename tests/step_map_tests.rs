// tests/step_map_tests.rs
// Field-level properties of the step map on fixed maze layouts.

use rstest::{fixture, rstest};
use stepmap::core::{CELL_COUNT, MAZE_SIZE};
use stepmap::{
    Direction, Maze, Pose, Position, QueueKind, STEP_MAX, StepMap, StepMapConfig, WallMap,
};

/// Fully sensed maze with a fixed scatter of interior walls
#[fixture]
fn scattered_maze() -> Maze {
    let mut maze = Maze::new(vec![]);
    for x in 0..MAZE_SIZE {
        for y in 0..MAZE_SIZE {
            let p = Position::new(x, y);
            let h = (x as i32 * 7 + y as i32 * 13) % 5;
            maze.update_wall(p, Direction::East, h == 0);
            maze.update_wall(p, Direction::North, h == 3);
        }
    }
    maze
}

fn passable(maze: &Maze, p: Position, d: Direction, known_only: bool) -> bool {
    !maze.is_wall(p, d) && (!known_only || maze.is_known(p, d))
}

fn increment(map: &StepMap, i: usize, simple: bool) -> u16 {
    if simple { i as u16 } else { map.cost_table().get(i) }
}

/// Some straight run from `p` lands on a cell exactly one edge cost cheaper
fn has_downhill_edge(map: &StepMap, maze: &Maze, p: Position, known_only: bool, simple: bool) -> bool {
    let v = map.step(p);
    Direction::along4().into_iter().any(|d| {
        let mut next = p;
        for i in 1usize.. {
            if !passable(maze, next, d, known_only) {
                return false;
            }
            next = next.next(d);
            if v.checked_sub(increment(map, i, simple)) == Some(map.step(next)) {
                return true;
            }
        }
        false
    })
}

#[rstest]
#[case(false, false)]
#[case(false, true)]
#[case(true, false)]
#[case(true, true)]
fn every_reached_cell_has_a_downhill_edge(
    scattered_maze: Maze,
    #[case] known_only: bool,
    #[case] simple: bool,
) {
    let mut map = StepMap::new();
    map.update(&scattered_maze, &[Position::new(15, 15), Position::new(16, 16)], known_only, simple);
    for i in 0..CELL_COUNT {
        let p = Position::from_index(i);
        let v = map.step(p);
        if v == 0 || v == STEP_MAX {
            continue;
        }
        assert!(
            has_downhill_edge(&map, &scattered_maze, p, known_only, simple),
            "no downhill edge at {} (step {})",
            p,
            v
        );
    }
}

#[rstest]
fn destinations_are_zero(scattered_maze: Maze) {
    let dest = [Position::new(7, 7), Position::new(7, 8), Position::new(8, 7), Position::new(8, 8)];
    let mut map = StepMap::new();
    map.update(&scattered_maze, &dest, false, false);
    for p in dest {
        assert_eq!(map.step(p), 0);
    }
    let zeros = map.step_map().iter().filter(|&&s| s == 0).count();
    assert_eq!(zeros, dest.len());
}

#[rstest]
fn update_is_idempotent(scattered_maze: Maze) {
    let dest = [Position::new(3, 20)];
    let mut map = StepMap::new();
    map.update(&scattered_maze, &dest, true, false);
    let first = map.step_map().to_vec();
    map.update(&scattered_maze, &dest, true, false);
    assert_eq!(first, map.step_map());
}

#[rstest]
fn known_only_never_lowers_a_value(scattered_maze: Maze) {
    let mut maze = scattered_maze;
    // forget a band of walls without changing the explored bounds
    for x in 0..MAZE_SIZE {
        for y in 10..14 {
            maze.set_known(Position::new(x, y), Direction::East, false);
            maze.set_known(Position::new(x, y), Direction::North, false);
        }
    }
    let dest = [Position::new(2, 2)];
    let mut open = StepMap::new();
    open.update(&maze, &dest, false, true);
    let mut restricted = StepMap::new();
    restricted.update(&maze, &dest, true, true);
    for (i, (&a, &b)) in open.step_map().iter().zip(restricted.step_map()).enumerate() {
        assert!(b >= a, "cell {} restricted {} < open {}", Position::from_index(i), b, a);
    }
}

#[rstest]
#[case(true, true)]
#[case(true, false)]
#[case(false, false)]
fn descent_only_crosses_allowed_walls(
    scattered_maze: Maze,
    #[case] known_only: bool,
    #[case] simple: bool,
) {
    let mut maze = scattered_maze;
    maze.set_known(Position::new(20, 20), Direction::East, false);
    let mut map = StepMap::new();
    map.update(&maze, &[Position::new(0, 0)], known_only, simple);
    let start = Pose::new(Position::new(25, 28), Direction::North);
    let (dirs, end) = map.step_down_directions(&maze, start, known_only, simple, false);
    let mut p = start.p;
    for d in &dirs {
        assert!(passable(&maze, p, *d, known_only), "crossed wall at {} {:?}", p, d);
        p = p.next(*d);
    }
    assert_eq!(p, end.p);
    assert!(map.step(end.p) <= map.step(start.p));
}

#[rstest]
fn fifo_kinematic_field_descends_to_the_goal(scattered_maze: Maze) {
    let dest = [Position::new(15, 15), Position::new(16, 16)];
    let config = StepMapConfig { queue: QueueKind::Fifo, ..StepMapConfig::default() };
    let mut map = StepMap::with_config(&config).unwrap();
    map.update(&scattered_maze, &dest, false, false);

    for p in dest {
        assert_eq!(map.step(p), 0);
    }
    let reached: Vec<Position> = (0..CELL_COUNT)
        .map(Position::from_index)
        .filter(|&p| map.step(p) != 0 && map.step(p) != STEP_MAX)
        .collect();
    assert!(!reached.is_empty());
    for &p in &reached {
        assert!(has_downhill_edge(&map, &scattered_maze, p, false, false), "no downhill edge at {}", p);
        let (_, end) = map.step_down_directions(&scattered_maze, Pose::new(p, Direction::North), false, false, false);
        assert_eq!(map.step(end.p), 0, "descent from {} stopped at {}", p, end.p);
    }

    let start = reached[0];
    let dirs = map.calc_shortest_directions(&scattered_maze, start, &dest, false, false);
    let end = dirs.iter().fold(start, |p, &d| p.next(d));
    assert!(dest.contains(&end), "route from {} ends at {}", start, end);
}
