//! Broad-phase strategies for sphere-sphere collisions
//!
//! Defines the [`BroadPhase`] trait and two interchangeable implementations:
//! a direct all-pairs scan and a uniform-grid lookup. Both report the same
//! colliding pairs; the grid just skips pairs that cannot touch.

use crate::configuration::config::BroadPhaseConfig;
use crate::simulation::spatial_grid::SpatialGrid;
use crate::simulation::states::Body;

/// Trait for candidate-pair generators operating on a body slice.
///
/// Implementations append `(i, j)` storage indices to `out`, where
/// `bodies[i].index < bodies[j].index`. Every unordered pair is reported at
/// most once and never paired with itself. Output is sorted by body index
/// so resolution order does not depend on hash iteration order.
pub trait BroadPhase {
    fn candidate_pairs(&mut self, bodies: &[Body], out: &mut Vec<(usize, usize)>);

    fn name(&self) -> &'static str;
}

/// Order a storage-index pair by stable body identity
#[inline]
fn ordered(bodies: &[Body], i: usize, j: usize) -> (usize, usize) {
    if bodies[i].index < bodies[j].index { (i, j) } else { (j, i) }
}

fn sort_by_identity(bodies: &[Body], out: &mut [(usize, usize)]) {
    out.sort_unstable_by_key(|&(i, j)| (bodies[i].index, bodies[j].index));
}

/// Direct O(N²) scan over every unordered pair
#[derive(Debug, Default, Clone, Copy)]
pub struct AllPairs;

impl BroadPhase for AllPairs {
    fn candidate_pairs(&mut self, bodies: &[Body], out: &mut Vec<(usize, usize)>) {
        out.clear();
        let n = bodies.len();

        for i in 0..n {
            for j in (i + 1)..n {
                out.push(ordered(bodies, i, j));
            }
        }

        sort_by_identity(bodies, out);
    }

    fn name(&self) -> &'static str {
        "all-pairs"
    }
}

/// Uniform hash grid broad phase, wraps [`SpatialGrid`]
#[derive(Debug, Clone)]
pub struct UniformGrid {
    pub grid: SpatialGrid,
}

impl UniformGrid {
    /// Grid covering a cube of half-width `bound` around the origin
    pub fn new(bound: f64) -> Self {
        Self {
            grid: SpatialGrid::for_cube(bound),
        }
    }
}

impl BroadPhase for UniformGrid {
    /// Rebuild the grid, then pair every body with the bodies in its 3×3×3 block.
    ///
    /// A pair spanning two cells is seen from both sides; the
    /// `index_a < index_b` filter keeps exactly one of them.
    fn candidate_pairs(&mut self, bodies: &[Body], out: &mut Vec<(usize, usize)>) {
        out.clear();
        self.grid.rebuild(bodies);

        for (&key, bucket) in self.grid.cells() {
            for &i in bucket {
                for j in self.grid.query(key) {
                    if bodies[i].index < bodies[j].index {
                        out.push((i, j));
                    }
                }
            }
        }

        sort_by_identity(bodies, out);
    }

    fn name(&self) -> &'static str {
        "uniform-grid"
    }
}

/// Pick the broad phase for a population of `n` bodies.
///
/// `Auto` scans all pairs for small populations and switches to the grid at
/// `grid_threshold` bodies.
pub fn select_broad_phase(config: BroadPhaseConfig, grid_threshold: usize, n: usize, bound: f64) -> Box<dyn BroadPhase + Send + Sync> {
    let use_grid = match config {
        BroadPhaseConfig::AllPairs => false,
        BroadPhaseConfig::Grid => true,
        BroadPhaseConfig::Auto => n >= grid_threshold,
    };

    if use_grid {
        Box::new(UniformGrid::new(bound))
    } else {
        Box::new(AllPairs)
    }
}
