//! Simulation lifecycle: population ownership, periodic resets and the
//! per-frame contract with the host loop
//!
//! `Simulation` is built from a `ScenarioConfig` and owns:
//! - engine settings (`Engine`) and physical parameters (`Parameters`)
//! - the current population (`System`)
//! - the active broad phase
//! - the rng, frame clock and reset clock
//!
//! It is inserted into Bevy as a `Resource`; the viewer calls [`Simulation::tick`]
//! once per frame and reads `bodies()` afterwards.

use bevy::prelude::Resource;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::configuration::config::ScenarioConfig;
use crate::error::SimError;
use crate::simulation::broad_phase::{select_broad_phase, BroadPhase};
use crate::simulation::engine::Engine;
use crate::simulation::integrator::{euler_step, StepStats};
use crate::simulation::params::Parameters;
use crate::simulation::spawn::{spawn_population, RadiusPolicy};
use crate::simulation::states::{Body, NVec3, System};

/// Population settings, read only when bodies are (re)generated
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Population {
    pub count: usize,
    pub radius: RadiusPolicy,
}

/// What a call to [`Simulation::tick`] did
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// First frame: timestamp recorded, nothing stepped
    Started,
    Stepped(StepStats),
    /// Reset interval elapsed: population regenerated, then stepped
    Reset(StepStats),
    /// Invalid frame; state left untouched
    Skipped(SimError),
}

/// Frames-per-second over a rolling one-second window
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    frames: u32,
    window: f64,
    fps: f64,
    pub total_frames: u64,
}

impl FrameStats {
    pub fn record(&mut self, dt: f64) {
        self.frames += 1;
        self.total_frames += 1;
        self.window += dt;

        if self.window >= 1.0 {
            self.fps = self.frames as f64 / self.window;
            self.frames = 0;
            self.window = 0.0;
        }
    }

    /// Last completed window's rate, 0 until one second has been recorded
    pub fn fps(&self) -> f64 {
        self.fps
    }
}

/// Reject time steps that are NaN, infinite, zero or negative
pub fn validate_dt(dt: f64) -> Result<f64, SimError> {
    if dt.is_finite() && dt > 0.0 {
        Ok(dt)
    } else {
        Err(SimError::InvalidTimeStep(dt))
    }
}

#[derive(Resource)]
pub struct Simulation {
    pub engine: Engine,
    pub parameters: Parameters,
    pub population: Population,
    pub system: System,
    broad_phase: Box<dyn BroadPhase + Send + Sync>,
    rng: StdRng,
    last_timestamp: Option<f64>, // ms
    time_since_reset: f64, // s
    generation: u64,
    pub stats: FrameStats,
}

impl Simulation {
    /// Camera eye used by the viewer
    pub const EYE_POSITION: [f64; 3] = [2.0, 2.0, 2.0];
    /// Camera up vector used by the viewer
    pub const UP: [f64; 3] = [0.0, 1.0, 0.0];

    pub fn new(cfg: ScenarioConfig) -> Result<Self, SimError> {
        cfg.validate()?;

        // Parameters (runtime) from ParametersConfig
        let p = cfg.parameters;
        let parameters = Parameters {
            cube_size: p.cube_size,
            gravity: p.gravity,
            elasticity: p.elasticity,
            max_speed: p.max_speed,
            reset_interval: p.reset_interval,
            eps: p.eps,
            spawn_speed: p.spawn_speed,
            floor_friction: p.floor_friction,
        };

        // Engine (runtime) from EngineConfig
        let engine = Engine {
            broad_phase: cfg.engine.broad_phase,
            grid_threshold: cfg.engine.grid_threshold,
        };

        let population = Population {
            count: cfg.population.count as usize,
            radius: match cfg.population.fixed_radius {
                Some(r) => RadiusPolicy::Fixed(r),
                None => RadiusPolicy::Variable,
            },
        };

        let rng = match cfg.population.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut sim = Self {
            broad_phase: select_broad_phase(engine.broad_phase, engine.grid_threshold, population.count, parameters.bound()),
            engine,
            parameters,
            population,
            system: System::default(),
            rng,
            last_timestamp: None,
            time_since_reset: 0.0,
            generation: 0,
            stats: FrameStats::default(),
        };
        sim.reset()?;
        Ok(sim)
    }

    /// Discard every body and spawn a fresh population; zeroes the reset clock
    pub fn reset(&mut self) -> Result<(), SimError> {
        let bodies = spawn_population(&mut self.rng, self.population.count, &self.parameters, &self.population.radius)?;

        self.broad_phase = select_broad_phase(
            self.engine.broad_phase,
            self.engine.grid_threshold,
            bodies.len(),
            self.parameters.bound(),
        );
        self.system = System::new(bodies);
        self.time_since_reset = 0.0;
        self.generation += 1;

        info!(
            "population #{} ready: {} bodies, broad phase {}",
            self.generation,
            self.system.bodies.len(),
            self.broad_phase.name()
        );
        Ok(())
    }

    /// Change the population size and regenerate immediately
    pub fn set_body_count(&mut self, count: i64) -> Result<(), SimError> {
        if count < 1 {
            warn!("rejected body count {count}");
            return Err(SimError::InvalidBodyCount(count));
        }
        self.population.count = count as usize;
        self.reset()
    }

    /// Advance one step of `dt` seconds without touching the reset clock
    pub fn step(&mut self, dt: f64) -> Result<StepStats, SimError> {
        let dt = validate_dt(dt)?;
        Ok(euler_step(&mut self.system, self.broad_phase.as_mut(), &self.parameters, dt))
    }

    /// Host frame callback, `timestamp_ms` in milliseconds.
    ///
    /// Invalid frames are logged and skipped with bodies untouched; the host
    /// keeps calling regardless. A non-finite timestamp is not remembered, so
    /// the next valid one steps normally.
    pub fn tick(&mut self, timestamp_ms: f64) -> TickOutcome {
        if !timestamp_ms.is_finite() {
            warn!("invalid frame timestamp {timestamp_ms}, skipping");
            return TickOutcome::Skipped(SimError::InvalidTimeStep(timestamp_ms));
        }

        let Some(last) = self.last_timestamp.replace(timestamp_ms) else {
            debug!("first frame at {timestamp_ms} ms");
            return TickOutcome::Started;
        };

        let dt = match validate_dt((timestamp_ms - last) / 1000.0) {
            Ok(dt) => dt,
            Err(e) => {
                warn!("{e}, skipping frame");
                return TickOutcome::Skipped(e);
            }
        };

        self.time_since_reset += dt;
        let mut did_reset = false;
        if self.time_since_reset >= self.parameters.reset_interval {
            if let Err(e) = self.reset() {
                warn!("reset failed: {e}");
                return TickOutcome::Skipped(e);
            }
            did_reset = true;
        }

        let stats = euler_step(&mut self.system, self.broad_phase.as_mut(), &self.parameters, dt);
        self.stats.record(dt);

        if did_reset {
            TickOutcome::Reset(stats)
        } else {
            TickOutcome::Stepped(stats)
        }
    }

    /// Read-only body view for renderers
    pub fn bodies(&self) -> &[Body] {
        &self.system.bodies
    }

    /// Increments on every (re)generation so renderers can rebuild their scene
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn time_since_reset(&self) -> f64 {
        self.time_since_reset
    }

    pub fn broad_phase_name(&self) -> &'static str {
        self.broad_phase.name()
    }

    pub fn eye_position(&self) -> NVec3 {
        NVec3::from(Self::EYE_POSITION)
    }

    pub fn up(&self) -> NVec3 {
        NVec3::from(Self::UP)
    }
}
