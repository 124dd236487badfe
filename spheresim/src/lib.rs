pub mod error;
pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use error::SimError;

pub use simulation::states::{Body, System, NVec3};
pub use simulation::params::Parameters;
pub use simulation::spawn::{spawn_population, RadiusPolicy};
pub use simulation::spatial_grid::{CellKey, SpatialGrid};
pub use simulation::broad_phase::{AllPairs, BroadPhase, UniformGrid};
pub use simulation::collision::{resolve_pair, Contact};
pub use simulation::integrator::{euler_step, StepStats};
pub use simulation::lifecycle::{Simulation, TickOutcome};

pub use configuration::config::{BroadPhaseConfig, EngineConfig, ParametersConfig, PopulationConfig, ScenarioConfig};

pub use visualization::spheresim_vis3d::run_3d;

pub use benchmark::benchmark::{bench_broad_phase, bench_step};
