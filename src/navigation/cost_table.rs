// src/navigation/cost_table.rs
// Time cost of straight runs under a trapezoidal velocity profile.

use log::{debug, warn};

use super::config::KinematicConfig;
use crate::core::CELL_COUNT;

/// Step-map value type
pub type Step = u16;

/// Sentinel for cells not reached under the current policy
pub const STEP_MAX: Step = Step::MAX;

/// Cumulative cost of a straight run, indexed by run length in cells.
///
/// Entry `i` is the time to turn 90 degrees and then travel `i - 1` further cells,
/// divided by `scaling_factor`. Entry 0 is unused and zero.
#[derive(Debug, Clone, PartialEq)]
pub struct CostTable {
    steps: Vec<Step>,
    scaling_factor: Step,
}

/// Travel time [ms] for `cells` cells starting and ending at `vs`
fn straight_cost(cells: usize, am: f32, vs: f32, vm: f32, seg: f32) -> f32 {
    let d = seg * cells as f32;
    let d_thr = (vm * vm - vs * vs) / am;
    if d < d_thr {
        // triangular: never reaches vm
        2.0 * ((vs * vs + am * d).sqrt() - vs) / am * 1000.0
    } else {
        (am * d + (vm - vs) * (vm - vs)) / (am * vm) * 1000.0
    }
}

impl CostTable {
    /// Builds a table with `table_size` entries.
    ///
    /// A route visits at most `CELL_COUNT` cells and no run is cheaper per cell than
    /// the worst `raw[i] / i`, so the scaling factor is chosen to keep
    /// `CELL_COUNT * max_i(raw[i] / i)` below `STEP_MAX`.
    pub fn build(k: &KinematicConfig, table_size: usize) -> Self {
        let table_size = table_size.max(2);
        let raw: Vec<f32> = (0..table_size)
            .map(|i| match i {
                0 => 0.0,
                _ => {
                    k.turn_time
                        + straight_cost(
                            i - 1,
                            k.max_acceleration,
                            k.base_velocity,
                            k.saturation_velocity,
                            k.segment_length,
                        )
                }
            })
            .collect();

        if raw.iter().any(|c| !c.is_finite() || *c < 0.0) {
            warn!("Degenerate kinematics {:?}; straight costs are not finite", k);
        }

        let per_cell_max = raw
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, c)| c / i as f32)
            .filter(|c| c.is_finite())
            .fold(0.0f32, f32::max);
        let worst_route = per_cell_max * CELL_COUNT as f32;
        let scaling_factor = (worst_route / (STEP_MAX - 1) as f32).ceil().max(1.0) as Step;

        let steps: Vec<Step> = raw
            .iter()
            .map(|c| (c / scaling_factor as f32) as Step)
            .collect();
        debug!(
            "Cost table: {} entries, scaling factor {}, first {:?}",
            steps.len(),
            scaling_factor,
            &steps[..steps.len().min(4)]
        );

        CostTable { steps, scaling_factor }
    }

    /// Cost of a straight run of `i` cells; `STEP_MAX` past the end of the table
    pub fn get(&self, i: usize) -> Step {
        self.steps.get(i).copied().unwrap_or(STEP_MAX)
    }

    /// Every entry, indexed by run length
    pub fn as_slice(&self) -> &[Step] {
        &self.steps
    }

    /// Divisor applied to raw millisecond costs
    pub fn scaling_factor(&self) -> Step {
        self.scaling_factor
    }
}
