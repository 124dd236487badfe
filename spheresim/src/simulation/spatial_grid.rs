//! # Uniform Spatial Grid (3D)
//!
//! This module implements a **uniform hash grid** used as the broad phase for
//! sphere-sphere collisions. Instead of testing every pair of bodies
//! (`O(N²)`), bodies are bucketed by the grid cell containing their center and
//! only bodies in the same or an adjacent cell are considered as candidates.
//!
//! ## Core Concepts
//!
//! - Space is split into cubic cells of side `cell_size`, starting at `grid_min`.
//! - A cell is addressed by a [`CellKey`], the integer triple
//!   `floor((p - grid_min) / cell_size)` per axis.
//! - `cell_size` is twice the largest radius in the population, so any two
//!   touching spheres have centers at most one cell apart on every axis.
//!   Checking the 3×3×3 block around a cell therefore finds every contact.
//! - The grid is rebuilt from scratch every step. There is no incremental
//!   insert/remove, so arbitrary per-step displacement is always handled.
//!
//! Cells are stored sparsely in a `HashMap`, only occupied cells exist.

use std::collections::HashMap;

use crate::simulation::states::{max_radius, Body, NVec3};

/// Integer address of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl CellKey {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Key shifted by `(dx, dy, dz)` cells
    pub const fn offset(self, (dx, dy, dz): (i32, i32, i32)) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }
}

/// The 27 offsets of the 3×3×3 block centered on a cell (including the cell itself)
pub const NEIGHBOR_OFFSETS: [(i32, i32, i32); 27] = neighbor_offsets();

const fn neighbor_offsets() -> [(i32, i32, i32); 27] {
    let mut out = [(0, 0, 0); 27];
    let mut i = 0;
    let mut dx = -1;
    while dx <= 1 {
        let mut dy = -1;
        while dy <= 1 {
            let mut dz = -1;
            while dz <= 1 {
                out[i] = (dx, dy, dz);
                i += 1;
                dz += 1;
            }
            dy += 1;
        }
        dx += 1;
    }
    out
}

/// Sparse uniform grid mapping cell keys to body storage indices.
///
/// The grid stores indices into the `bodies` slice it was last rebuilt from,
/// never references, so it can live next to the body list without borrowing it.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    pub cell_size: f64,
    pub grid_min: NVec3,
    cells: HashMap<CellKey, Vec<usize>>,
}

impl SpatialGrid {
    /// Create an empty grid anchored at `grid_min` (the cube's minimum corner).
    ///
    /// `cell_size` is recomputed on every [`SpatialGrid::rebuild`].
    pub fn new(grid_min: NVec3) -> Self {
        Self {
            cell_size: 1.0,
            grid_min,
            cells: HashMap::new(),
        }
    }

    /// Grid for a cube of half-width `bound` centered at the origin
    pub fn for_cube(bound: f64) -> Self {
        Self::new(NVec3::new(-bound, -bound, -bound))
    }

    /// Clear the grid and re-bucket every body by its current position.
    ///
    /// This:
    /// 1. Drops all previous cell contents.
    /// 2. Sets `cell_size = 2 × max radius` over `bodies`.
    /// 3. Appends each body's storage index to the list for its cell.
    ///
    /// An empty slice leaves the grid empty and `cell_size` untouched.
    pub fn rebuild(&mut self, bodies: &[Body]) {
        self.cells.clear();

        let r_max = max_radius(bodies);
        if r_max <= 0.0 {
            return;
        }
        self.cell_size = 2.0 * r_max;

        for (i, b) in bodies.iter().enumerate() {
            let key = self.cell_key(&b.x);
            self.cells.entry(key).or_default().push(i);
        }
    }

    /// Compute the cell containing point `p`.
    ///
    /// Points below `grid_min` get negative coordinates; the grid is unbounded.
    pub fn cell_key(&self, p: &NVec3) -> CellKey {
        let rel = (p - self.grid_min) / self.cell_size;
        CellKey::new(
            rel.x.floor() as i32,
            rel.y.floor() as i32,
            rel.z.floor() as i32,
        )
    }

    /// Bodies stored in exactly this cell
    pub fn cell(&self, key: CellKey) -> &[usize] {
        self.cells.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Candidate bodies for `key`: everything in the cell and its 26 neighbors.
    pub fn query(&self, key: CellKey) -> impl Iterator<Item = usize> + '_ {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(move |&o| self.cells.get(&key.offset(o)))
            .flat_map(|bucket| bucket.iter().copied())
    }

    /// Iterate over occupied cells
    pub fn cells(&self) -> impl Iterator<Item = (&CellKey, &[usize])> {
        self.cells.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Number of occupied cells
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }
}
