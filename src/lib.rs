//! Stepmap - planning core for a micromouse maze solver
//!
//! This library computes a cost-annotated distance field ("step map") over a square
//! grid maze and derives travel directions from it: shortest known routes to the goal,
//! the trusted prefix of a route during exploration, ranked next moves, and straight
//! extensions inside the goal area.

#![warn(missing_docs)]
#![warn(unused_extern_crates)]

pub mod core;
pub mod navigation;

// Re-export commonly used items for easier access
pub use crate::core::{Direction, Directions, FieldBounds, Maze, Pose, Position, RelativeDirection, WallMap};
pub use navigation::{
    CostTable, DescentStrategy, KinematicConfig, NextDirections, QueueKind, STEP_MAX, Step,
    StepMap, StepMapConfig, append_straight_directions,
};

/// Stepmap error types
#[derive(Debug)]
pub enum StepMapError {
    /// Configuration file could not be read or written
    Io(std::io::Error),
    /// Configuration file is not valid YAML for `StepMapConfig`
    Yaml(serde_yaml::Error),
    /// Configuration values are out of range
    InvalidConfig(String),
}

impl std::fmt::Display for StepMapError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            StepMapError::Io(e) => write!(f, "I/O error: {}", e),
            StepMapError::Yaml(e) => write!(f, "YAML error: {}", e),
            StepMapError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for StepMapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StepMapError::Io(e) => Some(e),
            StepMapError::Yaml(e) => Some(e),
            StepMapError::InvalidConfig(_) => None,
        }
    }
}

impl From<std::io::Error> for StepMapError {
    fn from(e: std::io::Error) -> Self {
        StepMapError::Io(e)
    }
}

impl From<serde_yaml::Error> for StepMapError {
    fn from(e: serde_yaml::Error) -> Self {
        StepMapError::Yaml(e)
    }
}
