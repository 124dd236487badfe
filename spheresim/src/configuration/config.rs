//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – broad-phase selection
//! - [`ParametersConfig`] – physical constants and the reset interval
//! - [`PopulationConfig`] – body count, radius policy and seed
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! An example scenario YAML matching these types:
//!
//! ```yaml
//! engine:
//!   broad_phase: "auto"     # "auto", "all_pairs" or "grid"
//!   grid_threshold: 64      # auto switches to the grid at this many bodies
//!
//! parameters:
//!   cube_size: 1.0          # side of the bounding cube
//!   gravity: 0.9            # gravity magnitude along -y
//!   elasticity: 0.9         # restitution, in [0, 1]
//!   max_speed: 3.0          # hard speed cap
//!   reset_interval: 15.0    # seconds between population resets
//!   spawn_speed: 0.2        # initial velocity range per axis
//!   eps: 1.0e-4             # overlap tolerance (optional)
//!   floor_friction: 1.0     # x/z damping on floor contact (optional)
//!
//! population:
//!   count: 50
//!   fixed_radius: 0.075     # omit for size-scaled random radii
//!   seed: 42                # omit for a random seed
//! ```
//!
//! Unknown keys are rejected, so a misspelled field fails to load instead of
//! silently falling back to its default.
//!
//! The engine maps this into its runtime `Simulation`, validated once up front.

use serde::Deserialize;

use crate::error::SimError;

/// Which broad phase generates collision candidates
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BroadPhaseConfig {
    #[default]
    #[serde(rename = "auto")] // all-pairs for small populations, grid for large ones
    Auto,

    #[serde(rename = "all_pairs")] // direct O(N²) scan
    AllPairs,

    #[serde(rename = "grid")] // uniform hash grid
    Grid,
}

fn default_grid_threshold() -> usize {
    64
}

fn default_eps() -> f64 {
    1.0e-4
}

fn default_floor_friction() -> f64 {
    1.0
}

/// Engine configuration
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    #[serde(default)]
    pub broad_phase: BroadPhaseConfig,
    #[serde(default = "default_grid_threshold")]
    pub grid_threshold: usize,
}

/// Global physical parameters for a scenario
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ParametersConfig {
    pub cube_size: f64,
    pub gravity: f64,
    pub elasticity: f64,
    pub max_speed: f64,
    pub reset_interval: f64,
    pub spawn_speed: f64,
    #[serde(default = "default_eps")]
    pub eps: f64,
    #[serde(default = "default_floor_friction")]
    pub floor_friction: f64,
}

/// How the body population is generated at startup and on every reset
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct PopulationConfig {
    pub count: i64, // signed so a negative count reaches validation instead of failing to parse
    #[serde(default)]
    pub fixed_radius: Option<f64>, // `None` - variable radius scaled by count
    #[serde(default)]
    pub seed: Option<u64>, // `None` - seeded from the OS
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub population: PopulationConfig,
}

fn check(name: &'static str, value: f64, ok: bool) -> Result<(), SimError> {
    if ok && value.is_finite() {
        Ok(())
    } else {
        Err(SimError::InvalidParameter { name, value })
    }
}

impl ScenarioConfig {
    /// Parse a scenario from a YAML document
    pub fn from_yaml(s: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SimError> {
        let p = &self.parameters;
        check("cube_size", p.cube_size, p.cube_size > 0.0)?;
        check("gravity", p.gravity, p.gravity >= 0.0)?;
        check("elasticity", p.elasticity, (0.0..=1.0).contains(&p.elasticity))?;
        check("max_speed", p.max_speed, p.max_speed > 0.0)?;
        check("reset_interval", p.reset_interval, p.reset_interval > 0.0)?;
        check("spawn_speed", p.spawn_speed, p.spawn_speed >= 0.0)?;
        check("eps", p.eps, p.eps >= 0.0)?;
        check("floor_friction", p.floor_friction, (0.0..=1.0).contains(&p.floor_friction))?;

        if self.population.count < 1 {
            return Err(SimError::InvalidBodyCount(self.population.count));
        }

        if let Some(r) = self.population.fixed_radius {
            check("fixed_radius", r, r > 0.0 && 2.0 * r < p.cube_size)?;
        }

        Ok(())
    }
}

impl Default for ScenarioConfig {
    /// Many-spheres preset: 50 variable-radius bodies in a unit cube
    fn default() -> Self {
        Self {
            engine: EngineConfig {
                broad_phase: BroadPhaseConfig::Auto,
                grid_threshold: default_grid_threshold(),
            },
            parameters: ParametersConfig {
                cube_size: 1.0,
                gravity: 0.9,
                elasticity: 0.9,
                max_speed: 3.0,
                reset_interval: 15.0,
                spawn_speed: 0.2,
                eps: default_eps(),
                floor_friction: default_floor_friction(),
            },
            population: PopulationConfig {
                count: 50,
                fixed_radius: None,
                seed: None,
            },
        }
    }
}
