pub mod states;
pub mod vecmath;
pub mod params;
pub mod engine;
pub mod spawn;
pub mod spatial_grid;
pub mod broad_phase;
pub mod collision;
pub mod integrator;
pub mod lifecycle;
