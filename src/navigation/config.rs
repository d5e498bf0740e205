// src/navigation/config.rs
// Tunable parameters of the step-map planner, loadable from YAML.

use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

use crate::StepMapError;
use crate::core::MAZE_SIZE;

/// Straight-run kinematics of the robot, in millimetres and milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KinematicConfig {
    /// Speed at the start and end of a straight run [mm/s]
    pub base_velocity: f32,
    /// Maximum acceleration [mm/s/s]
    pub max_acceleration: f32,
    /// Saturation speed [mm/s]
    pub saturation_velocity: f32,
    /// Length of one cell [mm]
    pub segment_length: f32,
    /// Duration of a 90 degree in-place turn [ms]
    pub turn_time: f32,
}

impl Default for KinematicConfig {
    fn default() -> Self {
        KinematicConfig {
            base_velocity: 420.0,
            max_acceleration: 4200.0,
            saturation_velocity: 1500.0,
            segment_length: 90.0,
            turn_time: 287.0,
        }
    }
}

/// Work queue used while flooding the step map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueKind {
    /// Min-priority queue with lazy deletion of stale entries
    Priority,
    /// Plain FIFO; cells are re-expanded until no value improves.
    ///
    /// Settles on the exact cheapest cost over straight runs. That equals the heap's
    /// field with unit costs; with kinematic costs it can be lower in some cells,
    /// since the heap stops a run at the first cell that is already as cheap.
    Fifo,
}

/// How a route is read back out of the step map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DescentStrategy {
    /// Follow the first straight-run edge whose cost matches the table exactly
    EdgeMatch,
    /// Jump to the cheapest cell reachable by one straight run
    SteepestStep,
}

/// Step-map planner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepMapConfig {
    /// Robot kinematics behind the cost table
    pub kinematics: KinematicConfig,
    /// Number of cost table entries; must cover the longest straight run
    pub table_size: usize,
    /// Flood work queue
    pub queue: QueueKind,
    /// Route extraction
    pub descent: DescentStrategy,
}

impl Default for StepMapConfig {
    fn default() -> Self {
        StepMapConfig {
            kinematics: KinematicConfig::default(),
            table_size: MAZE_SIZE as usize * 2,
            queue: QueueKind::Priority,
            descent: DescentStrategy::EdgeMatch,
        }
    }
}

impl StepMapConfig {
    /// Loads and validates a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, StepMapError> {
        let file = File::open(path.as_ref())?;
        let config: StepMapConfig = serde_yaml::from_reader(file)?;
        config.validate()?;
        info!("Loaded step map config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Parses and validates a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self, StepMapError> {
        let config: StepMapConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Writes the configuration as YAML
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), StepMapError> {
        let file = File::create(path.as_ref())?;
        serde_yaml::to_writer(file, self)?;
        info!("Saved step map config to {}", path.as_ref().display());
        Ok(())
    }

    /// Rejects non-finite or out-of-range kinematics and too small tables
    pub fn validate(&self) -> Result<(), StepMapError> {
        let k = &self.kinematics;
        let finite = [
            k.base_velocity,
            k.max_acceleration,
            k.saturation_velocity,
            k.segment_length,
            k.turn_time,
        ]
        .iter()
        .all(|v| v.is_finite());
        if !finite {
            return Err(StepMapError::InvalidConfig("kinematics must be finite".into()));
        }
        if k.max_acceleration <= 0.0 || k.saturation_velocity <= 0.0 || k.segment_length <= 0.0 {
            return Err(StepMapError::InvalidConfig(
                "acceleration, saturation velocity and segment length must be positive".into(),
            ));
        }
        if k.base_velocity < 0.0 || k.turn_time < 0.0 {
            return Err(StepMapError::InvalidConfig(
                "base velocity and turn time must not be negative".into(),
            ));
        }
        if k.saturation_velocity < k.base_velocity {
            return Err(StepMapError::InvalidConfig(format!(
                "saturation velocity {} is below base velocity {}",
                k.saturation_velocity, k.base_velocity
            )));
        }
        if self.table_size < MAZE_SIZE as usize {
            return Err(StepMapError::InvalidConfig(format!(
                "table size {} cannot cover a {} cell straight",
                self.table_size, MAZE_SIZE
            )));
        }
        Ok(())
    }
}
