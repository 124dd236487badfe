//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds the fixed runtime settings:
//! - gravity, elasticity and speed cap,
//! - cube size (walls sit at +/- cube_size / 2),
//! - reset interval and positional-correction epsilon,
//! - spawn velocity range and optional floor friction

#[derive(Debug, Clone)]
pub struct Parameters {
    pub cube_size: f64, // side length of the bounding cube
    pub gravity: f64, // gravity magnitude, applied along -y
    pub elasticity: f64, // restitution for walls and pairs, in [0, 1]
    pub max_speed: f64, // hard speed cap
    pub reset_interval: f64, // seconds between population resets
    pub eps: f64, // overlap tolerance for positional correction
    pub spawn_speed: f64, // initial velocity drawn from [-spawn_speed, spawn_speed] per axis
    pub floor_friction: f64, // tangential velocity factor on floor contact, 1.0 = none
}

impl Parameters {
    /// Half-width of the cube
    pub fn bound(&self) -> f64 {
        0.5 * self.cube_size
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            cube_size: 1.0,
            gravity: 0.9,
            elasticity: 0.9,
            max_speed: 3.0,
            reset_interval: 15.0,
            eps: 1.0e-4,
            spawn_speed: 0.2,
            floor_friction: 1.0,
        }
    }
}
