//! High-level runtime engine settings
//!
//! Selects which broad phase runs and the population size at which `auto`
//! switches from all-pairs to the uniform grid

use crate::configuration::config::BroadPhaseConfig;

#[derive(Debug, Clone)]
pub struct Engine {
    pub broad_phase: BroadPhaseConfig, // auto, all-pairs or grid
    pub grid_threshold: usize, // auto uses the grid at or above this many bodies
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            broad_phase: BroadPhaseConfig::Auto,
            grid_threshold: 64,
        }
    }
}
