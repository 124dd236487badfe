//! Core state types for the sphere simulation.
//!
//! Defines the body/system structs:
//! - `Body` is one rigid sphere using `NVec3`
//! - `System` holds the population and the simulated time since the last reset

use std::f64::consts::PI;

use nalgebra::Vector3;
pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub x: NVec3, // position (sphere center)
    pub v: NVec3, // velocity
    pub color: [f32; 3], // rgb in [0, 1], only read by the renderer
    pub radius: f64, // radius, > 0
    pub m: f64, // mass, unit density
    pub index: usize, // stable identity, used to order pairs
}

impl Body {
    /// Create a body, deriving its mass from the radius
    pub fn new(x: NVec3, v: NVec3, color: [f32; 3], radius: f64, index: usize) -> Self {
        Self {
            x,
            v,
            color,
            radius,
            m: sphere_mass(radius),
            index,
        }
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.m * self.v.norm_squared()
    }
}

/// Mass of a unit-density sphere: (4/3) pi r^3
pub fn sphere_mass(radius: f64) -> f64 {
    (4.0 / 3.0) * PI * radius.powi(3)
}

/// Largest radius in `bodies`, 0 when empty
pub fn max_radius(bodies: &[Body]) -> f64 {
    bodies.iter().fold(0.0_f64, |r, b| r.max(b.radius))
}

#[derive(Debug, Clone, Default)]
pub struct System {
    pub bodies: Vec<Body>, // collection of spheres
    pub t: f64, // simulated time since last reset
}

impl System {
    pub fn new(bodies: Vec<Body>) -> Self {
        Self { bodies, t: 0.0 }
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    pub fn momentum(&self) -> NVec3 {
        self.bodies.iter().fold(NVec3::zeros(), |p, b| p + b.v * b.m)
    }
}
