//! Population generation
//!
//! Bodies are drawn uniformly inside the cube, inset by their own radius so
//! nothing starts overlapping a wall. Every draw goes through the caller's
//! rng so a seeded `StdRng` reproduces a population exactly.

use log::info;
use rand::Rng;

use crate::error::SimError;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec3};

/// How each body's radius is chosen at creation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RadiusPolicy {
    /// Every body shares this radius
    Fixed(f64),
    /// `(U(0,1) + 0.25) * 0.75 / n^(1/3)`, scaled by the cube size
    Variable,
}

impl RadiusPolicy {
    /// Draw a radius for a population of `n` bodies.
    /// Variable radii are capped at the cube half-width so they always fit.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, n: usize, params: &Parameters) -> f64 {
        match *self {
            RadiusPolicy::Fixed(r) => r,
            RadiusPolicy::Variable => {
                let u: f64 = rng.gen();
                let r = (u + 0.25) * 0.75 / (n as f64).cbrt() * params.cube_size;
                r.min(params.bound())
            }
        }
    }
}

/// Uniform coordinate in `[-bound + r, bound - r]`
fn inset_coord<R: Rng + ?Sized>(rng: &mut R, bound: f64, r: f64) -> f64 {
    let lo = -bound + r;
    let hi = bound - r;
    if lo >= hi {
        return 0.0;
    }
    rng.gen_range(lo..=hi)
}

/// Create body `index` of a population of `n`
pub fn spawn_body<R: Rng + ?Sized>(rng: &mut R, index: usize, n: usize, params: &Parameters, policy: &RadiusPolicy) -> Body {
    let radius = policy.sample(rng, n, params);
    let bound = params.bound();

    let x = NVec3::new(
        inset_coord(rng, bound, radius),
        inset_coord(rng, bound, radius),
        inset_coord(rng, bound, radius),
    );

    let s = params.spawn_speed;
    let v = if s > 0.0 {
        NVec3::new(rng.gen_range(-s..=s), rng.gen_range(-s..=s), rng.gen_range(-s..=s))
    } else {
        NVec3::zeros()
    };

    let color = [rng.gen::<f32>(), rng.gen::<f32>(), rng.gen::<f32>()];

    Body::new(x, v, color, radius, index)
}

/// Generate a fresh population of `n` bodies with indices `0..n`
pub fn spawn_population<R: Rng + ?Sized>(rng: &mut R, n: usize, params: &Parameters, policy: &RadiusPolicy) -> Result<Vec<Body>, SimError> {
    if n < 1 {
        return Err(SimError::InvalidBodyCount(n as i64));
    }

    let bodies: Vec<Body> = (0..n).map(|i| spawn_body(rng, i, n, params, policy)).collect();

    info!("spawned {} bodies ({:?} radius)", bodies.len(), policy);
    Ok(bodies)
}
