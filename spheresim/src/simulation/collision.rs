//! Narrow-phase sphere-sphere collision response
//!
//! Stateless: each call looks only at the two bodies' current state. Velocity
//! is changed by a mass-weighted impulse along the contact normal, then any
//! remaining overlap is removed by moving the centers apart, heavier bodies
//! moving less.

use log::trace;

use crate::simulation::states::Body;
use crate::simulation::vecmath::{div, dot, mul};

/// Outcome of resolving one candidate pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Contact {
    /// Spheres do not overlap, nothing changed
    Apart,
    /// Centers coincide exactly, no normal exists; left for a later step
    Coincident,
    /// Overlapping but already moving apart along the normal
    Separating,
    /// Impulse applied; `overlap` is the penetration depth before correction
    Resolved { impulse: f64, overlap: f64 },
}

impl Contact {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Contact::Resolved { .. })
    }
}

/// Resolve a collision between `a` and `b`.
///
/// - no-op unless `|a.x - b.x|² < (ra + rb)²`
/// - skipped when the centers coincide exactly
/// - no impulse when the closing speed `s = (va - vb)·d` is `>= 0`
/// - impulse `j = -(1 + e) s / (1/ma + 1/mb)` applied as `va += j/ma d`, `vb -= j/mb d`
/// - when `overlap > eps`, `a` moves by `overlap · mb/(ma+mb)` along `d`
///   and `b` by `overlap · ma/(ma+mb)` against it
pub fn resolve_pair(a: &mut Body, b: &mut Body, elasticity: f64, eps: f64) -> Contact {
    let rel = a.x - b.x;
    let dist2 = dot(&rel, &rel);
    let min_dist = a.radius + b.radius;

    if dist2 >= min_dist * min_dist {
        return Contact::Apart;
    }

    let dist = dist2.sqrt();
    if dist == 0.0 {
        trace!("bodies {} and {} share a center, skipping", a.index, b.index);
        return Contact::Coincident;
    }

    // contact normal, pointing from b to a
    let d = div(&rel, dist);

    let s = dot(&a.v, &d) - dot(&b.v, &d);
    if s >= 0.0 {
        return Contact::Separating;
    }

    let (ma, mb) = (a.m, b.m);
    let j = -(1.0 + elasticity) * s / (1.0 / ma + 1.0 / mb);

    a.v += mul(&d, j / ma);
    b.v -= mul(&d, j / mb);

    let overlap = min_dist - dist;
    if overlap > eps {
        let total = ma + mb;
        a.x += mul(&d, overlap * (mb / total));
        b.x -= mul(&d, overlap * (ma / total));
    }

    Contact::Resolved { impulse: j, overlap }
}

/// Borrow two distinct bodies mutably. `None` if `i == j` or either is out of range.
pub fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> Option<(&mut Body, &mut Body)> {
    if i == j || i >= bodies.len() || j >= bodies.len() {
        return None;
    }

    if i < j {
        let (lo, hi) = bodies.split_at_mut(j);
        Some((&mut lo[i], &mut hi[0]))
    } else {
        let (lo, hi) = bodies.split_at_mut(i);
        Some((&mut hi[0], &mut lo[j]))
    }
}

/// Resolve every candidate pair in order, returning how many received an impulse
pub fn resolve_candidates(bodies: &mut [Body], pairs: &[(usize, usize)], elasticity: f64, eps: f64) -> usize {
    let mut contacts = 0;
    for &(i, j) in pairs {
        if let Some((a, b)) = pair_mut(bodies, i, j) {
            if resolve_pair(a, b, elasticity, eps).is_resolved() {
                contacts += 1;
            }
        }
    }
    contacts
}
