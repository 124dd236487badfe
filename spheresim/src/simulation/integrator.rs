//! Fixed-step explicit Euler integrator for the sphere system
//!
//! One call advances every body by `dt`: gravity, speed cap, position update,
//! wall reflection, then broad phase + pairwise resolution. No substeps, so a
//! large `dt` can tunnel a body through a wall or another body.

use log::debug;

use super::broad_phase::BroadPhase;
use super::collision::resolve_candidates;
use super::params::Parameters;
use super::states::{Body, System};
use super::vecmath::{magnitude, mul, normalize};

/// Per-step summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    pub candidate_pairs: usize, // pairs produced by the broad phase
    pub contacts: usize, // pairs that received an impulse
    pub wall_hits: usize, // axis reflections this step
}

/// Rescale `v` to `max_speed` if it is faster, keeping direction
pub fn clamp_speed(b: &mut Body, max_speed: f64) {
    if magnitude(&b.v) > max_speed {
        b.v = mul(&normalize(&b.v), max_speed);
    }
}

/// Enforce the cube walls on one body, axis by axis.
///
/// A face past `±bound` is clamped back to `±(bound - r)` and the velocity on
/// that axis becomes `-e·v`. Floor (−y) contacts additionally scale the x/z
/// velocity by `floor_friction`. Returns the number of axes reflected.
pub fn apply_walls(b: &mut Body, params: &Parameters) -> usize {
    let bound = params.bound();
    let e = params.elasticity;
    let r = b.radius;
    let mut hits = 0;

    for axis in 0..3 {
        if b.x[axis] - r < -bound {
            b.x[axis] = -bound + r;
            b.v[axis] = -e * b.v[axis];
            hits += 1;

            if axis == 1 {
                b.v.x *= params.floor_friction;
                b.v.z *= params.floor_friction;
            }
        } else if b.x[axis] + r > bound {
            b.x[axis] = bound - r;
            b.v[axis] = -e * b.v[axis];
            hits += 1;
        }
    }

    hits
}

/// Clamp a body's center back inside the walls without touching its velocity.
/// Positional correction between pairs can push a body past a wall.
pub fn contain(b: &mut Body, bound: f64) {
    let lim = (bound - b.radius).max(0.0);
    for axis in 0..3 {
        b.x[axis] = b.x[axis].clamp(-lim, lim);
    }
}

/// Advance the system by one step of size `dt` (seconds).
///
/// `dt` must be positive and finite; validating it is the caller's job.
pub fn euler_step(sys: &mut System, broad_phase: &mut dyn BroadPhase, params: &Parameters, dt: f64) -> StepStats {
    let mut stats = StepStats::default();
    if sys.bodies.is_empty() {
        return stats;
    }

    for b in sys.bodies.iter_mut() {
        // gravity along -y
        b.v.y -= params.gravity * dt;

        clamp_speed(b, params.max_speed);

        // x_n+1 = x_n + dt v_n+1
        b.x += dt * b.v;

        stats.wall_hits += apply_walls(b, params);
    }

    let mut pairs = Vec::new();
    broad_phase.candidate_pairs(&sys.bodies, &mut pairs);
    stats.candidate_pairs = pairs.len();
    stats.contacts = resolve_candidates(&mut sys.bodies, &pairs, params.elasticity, params.eps);

    let bound = params.bound();
    for b in sys.bodies.iter_mut() {
        contain(b, bound);
    }

    sys.t += dt;

    debug!(
        "step dt={:.4} via {}: {} candidates, {} contacts, {} wall hits",
        dt,
        broad_phase.name(),
        stats.candidate_pairs,
        stats.contacts,
        stats.wall_hits
    );

    stats
}
