// src/main.rs
// Demo run: explores a small hidden maze with the step-map planner, then plans the
// fastest known route back over what was sensed.
//
// Usage: stepmap [config.yaml]

use log::{info, warn};
use std::error::Error;

use stepmap::{
    Direction, Directions, Maze, Pose, Position, StepMap, StepMapConfig, WallMap,
    append_straight_directions,
};

/// Moves allowed before the demo gives up
const MAX_MOVES: usize = 200;

/// 4x4 walled room with the goal in the far corner
fn hidden_maze() -> Maze {
    let goal = Position::new(3, 3);
    let mut maze = Maze::new(vec![goal]);
    for x in 0..4 {
        for y in 0..4 {
            let p = Position::new(x, y);
            maze.update_wall(p, Direction::East, x == 3);
            maze.update_wall(p, Direction::North, y == 3);
        }
    }
    for (x, y, d) in [
        (0, 0, Direction::East),
        (0, 1, Direction::East),
        (1, 1, Direction::North),
        (2, 1, Direction::North),
        (2, 2, Direction::East),
        (1, 3, Direction::East),
        (3, 1, Direction::North),
    ] {
        maze.update_wall(Position::new(x, y), d, true);
    }
    maze
}

/// Copies the four walls around `p` from the hidden maze
fn sense(truth: &Maze, known: &mut Maze, p: Position) {
    for d in Direction::along4() {
        known.update_wall(p, d, truth.is_wall(p, d));
    }
}

fn route_string(dirs: &Directions) -> String {
    dirs.iter().map(|d| d.to_string()).collect()
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    info!("Starting step map demo...");

    let config = match std::env::args().nth(1) {
        Some(path) => StepMapConfig::load(path)?,
        None => StepMapConfig::default(),
    };
    let mut map = StepMap::with_config(&config)?;
    info!(
        "Cost table scaling factor {}, first entries {:?}",
        map.scaling_factor(),
        &map.cost_table().as_slice()[..4]
    );

    let truth = hidden_maze();
    let goals = truth.goals().to_vec();
    let mut known = Maze::new(goals.clone());
    let mut pose = Pose::new(known.start(), Direction::North);
    sense(&truth, &mut known, pose.p);

    let mut moves = 0;
    while !goals.contains(&pose.p) {
        if moves >= MAX_MOVES {
            return Err(format!("goal not reached after {} moves", MAX_MOVES).into());
        }
        map.update(&known, &goals, false, false);
        let next = map.calc_next_directions(&known, pose);
        for &d in &next.known {
            pose = pose.next(d);
            sense(&truth, &mut known, pose.p);
            moves += 1;
        }
        if goals.contains(&pose.p) {
            break;
        }
        let Some(&d) = next.candidates.first() else {
            warn!("No safe move from {}", pose.p);
            return Err("goal unreachable".into());
        };
        pose = pose.next(d);
        sense(&truth, &mut known, pose.p);
        moves += 1;
        info!("Exploring: moved {} to {} (step {})", d, pose.p, map.step(pose.p));
    }
    info!("Reached goal {} after {} moves", pose.p, moves);

    let mut route = map.calc_shortest_directions(&known, known.start(), &goals, true, false);
    if route.is_empty() {
        warn!("No fully sensed route to the goal yet");
        return Ok(());
    }
    info!("Shortest known route: {} ({} moves)", route_string(&route), route.len());
    append_straight_directions(&known, &mut route, true, true);
    info!("With goal run-out: {}", route_string(&route));
    info!("Peak queue length {}", map.queue_size_max());

    Ok(())
}
