// src/navigation/step_map.rs
// Distance field over the maze: every cell holds the cheapest known cost to the
// nearest destination, flooded outward along straight runs.

use log::{debug, trace};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use super::config::{DescentStrategy, QueueKind, StepMapConfig};
use super::cost_table::{CostTable, STEP_MAX, Step};
use super::is_passable;
use crate::StepMapError;
use crate::core::{CELL_COUNT, Direction, Directions, Pose, Position, WallMap};

/// Per-cell travel cost to the destination set, plus the tables used to build it
#[derive(Debug, Clone)]
pub struct StepMap {
    step_map: Vec<Step>,
    cost_table: CostTable,
    queue_kind: QueueKind,
    pub(super) descent: DescentStrategy,
    queue_size_max: usize,
}

/// Pending cell expansion
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct QueueEntry {
    step: Step,
    p: Position,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other.step.cmp(&self.step).then_with(|| other.p.cmp(&self.p))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

enum WorkQueue {
    Priority(BinaryHeap<QueueEntry>),
    Fifo(VecDeque<QueueEntry>),
}

impl WorkQueue {
    fn new(kind: QueueKind) -> Self {
        match kind {
            QueueKind::Priority => WorkQueue::Priority(BinaryHeap::with_capacity(CELL_COUNT)),
            QueueKind::Fifo => WorkQueue::Fifo(VecDeque::with_capacity(CELL_COUNT)),
        }
    }

    fn push(&mut self, entry: QueueEntry) {
        match self {
            WorkQueue::Priority(q) => q.push(entry),
            WorkQueue::Fifo(q) => q.push_back(entry),
        }
    }

    fn pop(&mut self) -> Option<QueueEntry> {
        match self {
            WorkQueue::Priority(q) => q.pop(),
            WorkQueue::Fifo(q) => q.pop_front(),
        }
    }

    fn len(&self) -> usize {
        match self {
            WorkQueue::Priority(q) => q.len(),
            WorkQueue::Fifo(q) => q.len(),
        }
    }
}

impl Default for StepMap {
    fn default() -> Self {
        Self::new()
    }
}

impl StepMap {
    /// Step map with the default kinematics
    pub fn new() -> Self {
        Self::from_config(&StepMapConfig::default())
    }

    /// Step map with custom kinematics and queue/descent choices
    pub fn with_config(config: &StepMapConfig) -> Result<Self, StepMapError> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: &StepMapConfig) -> Self {
        StepMap {
            step_map: vec![STEP_MAX; CELL_COUNT],
            cost_table: CostTable::build(&config.kinematics, config.table_size),
            queue_kind: config.queue,
            descent: config.descent,
            queue_size_max: 0,
        }
    }

    /// Sets every cell to `step`
    pub fn reset(&mut self, step: Step) {
        self.step_map.fill(step);
    }

    /// Value of cell `p`; `STEP_MAX` outside the field
    pub fn step(&self, p: Position) -> Step {
        if p.is_inside_of_field() {
            self.step_map[p.index()]
        } else {
            STEP_MAX
        }
    }

    /// Value of cell (`x`, `y`)
    pub fn step_at(&self, x: i8, y: i8) -> Step {
        self.step(Position::new(x, y))
    }

    /// Overwrites one cell; ignored outside the field
    pub fn set_step(&mut self, p: Position, step: Step) {
        if p.is_inside_of_field() {
            self.step_map[p.index()] = step;
        }
    }

    /// Raw field, indexed by `Position::index`
    pub fn step_map(&self) -> &[Step] {
        &self.step_map
    }

    /// Straight-run costs used by kinematic floods
    pub fn cost_table(&self) -> &CostTable {
        &self.cost_table
    }

    /// Divisor applied to raw millisecond costs
    pub fn scaling_factor(&self) -> Step {
        self.cost_table.scaling_factor()
    }

    /// Peak work queue length seen by the last `update`
    pub fn queue_size_max(&self) -> usize {
        self.queue_size_max
    }

    /// Cost of a straight run of `i` cells under the chosen cost model
    pub(super) fn increment(&self, i: usize, simple: bool) -> Step {
        if simple {
            Step::try_from(i).unwrap_or(STEP_MAX)
        } else {
            self.cost_table.get(i)
        }
    }

    /// Recomputes the field for the given destinations.
    ///
    /// `known_only` forbids crossing unsensed walls; `simple` charges one step per
    /// cell instead of the kinematic cost table. Only cells inside the explored
    /// bounds, grown to cover `dest` and padded by one cell below and two above, are
    /// expanded. Cells beyond the padding can still be given a value by a run that
    /// starts inside it.
    pub fn update<M: WallMap + ?Sized>(
        &mut self,
        maze: &M,
        dest: &[Position],
        known_only: bool,
        simple: bool,
    ) {
        // Limit expansion to the explored region plus the destinations
        let mut bounds = maze.bounds();
        for &p in dest {
            bounds.include(p);
        }
        let min_x = bounds.min_x.saturating_sub(1);
        let min_y = bounds.min_y.saturating_sub(1);
        let max_x = bounds.max_x.saturating_add(2);
        let max_y = bounds.max_y.saturating_add(2);

        self.reset(STEP_MAX);
        self.queue_size_max = 0;

        // The heap finalises a cell when it pops it, so a run can stop at the first
        // cell that is already as cheap. FIFO re-expands cells whose value dropped
        // and has to relax every cell of the run.
        let prune_runs = self.queue_kind == QueueKind::Priority;
        let mut queue = WorkQueue::new(self.queue_kind);
        for &p in dest.iter().filter(|p| p.is_inside_of_field()) {
            self.step_map[p.index()] = 0;
            queue.push(QueueEntry { step: 0, p });
        }

        while let Some(QueueEntry { step: queued, p: focus }) = queue.pop() {
            if focus.x < min_x || focus.x > max_x || focus.y < min_y || focus.y > max_y {
                continue;
            }
            let focus_step = self.step_map[focus.index()];
            // Stale entry: a cheaper value was recorded after it was queued
            if self.queue_kind == QueueKind::Priority && focus_step < queued {
                continue;
            }
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
                    let next_step = focus_step.saturating_add(self.increment(i, simple));
                    let next_index = next.index();
                    if self.step_map[next_index] <= next_step {
                        if prune_runs {
                            break;
                        }
                        continue;
                    }
                    self.step_map[next_index] = next_step;
                    queue.push(QueueEntry { step: next_step, p: next });
                }
            }
            self.queue_size_max = self.queue_size_max.max(queue.len());
        }
        trace!(
            "Step map updated: {} destinations, known_only={}, simple={}, peak queue {}",
            dest.len(),
            known_only,
            simple,
            self.queue_size_max
        );
    }

    /// Floods from `dest` and descends from `start`.
    /// Empty if the destinations cannot be reached under the policy.
    pub fn calc_shortest_directions<M: WallMap + ?Sized>(
        &mut self,
        maze: &M,
        start: Position,
        dest: &[Position],
        known_only: bool,
        simple: bool,
    ) -> Directions {
        self.update(maze, dest, known_only, simple);
        let (directions, end) = self.step_down_directions(
            maze,
            Pose::new(start, Direction::North),
            known_only,
            simple,
            false,
        );
        if self.step(end.p) == 0 {
            directions
        } else {
            debug!("No route from {} to {:?} (known_only={})", start, dest, known_only);
            Directions::new()
        }
    }
}
