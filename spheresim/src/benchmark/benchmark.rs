use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::simulation::broad_phase::{AllPairs, BroadPhase, UniformGrid};
use crate::simulation::integrator::euler_step;
use crate::simulation::params::Parameters;
use crate::simulation::spawn::{spawn_population, RadiusPolicy};
use crate::simulation::states::System;

/// Helper to build a seeded variable-radius System of size `n`
fn make_system(n: usize, params: &Parameters) -> System {
    let mut rng = StdRng::seed_from_u64(42);
    // n >= 1 for every caller below
    let bodies = spawn_population(&mut rng, n.max(1), params, &RadiusPolicy::Variable).unwrap_or_default();
    System::new(bodies)
}

/// Time candidate-pair generation alone for both broad phases
pub fn bench_broad_phase() {
    let ns = [50, 100, 200, 400, 800, 1600, 3200, 6400];
    let params = Parameters::default();

    for n in ns {
        let sys = make_system(n, &params);
        let mut pairs = Vec::new();

        let mut direct = AllPairs;
        let mut grid = UniformGrid::new(params.bound());

        // Warm up
        direct.candidate_pairs(&sys.bodies, &mut pairs);
        grid.candidate_pairs(&sys.bodies, &mut pairs);

        let t0 = Instant::now();
        direct.candidate_pairs(&sys.bodies, &mut pairs);
        let dt_direct = t0.elapsed().as_secs_f64();
        let n_direct = pairs.len();

        let t1 = Instant::now();
        grid.candidate_pairs(&sys.bodies, &mut pairs);
        let dt_grid = t1.elapsed().as_secs_f64();
        let n_grid = pairs.len();

        println!(
            "N = {n:5}, all-pairs = {:8.6} s ({n_direct:8} pairs), grid = {:8.6} s ({n_grid:6} pairs)",
            dt_direct, dt_grid
        );
    }
}

/// Time a full simulation step per broad phase
/// Paste output directly into a spreadsheet to graph
pub fn bench_step() {
    let steps = 10;
    let dt = 1.0 / 60.0;
    let params = Parameters::default();

    println!("N,all_pairs_ms,grid_ms");

    for n in (100..=3200).step_by(100) {
        let template = make_system(n, &params);

        let mut sys_direct = template.clone();
        let mut direct = AllPairs;
        let t0 = Instant::now();
        for _ in 0..steps {
            euler_step(&mut sys_direct, &mut direct, &params, dt);
        }
        let ms_direct = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        let mut sys_grid = template.clone();
        let mut grid = UniformGrid::new(params.bound());
        let t1 = Instant::now();
        for _ in 0..steps {
            euler_step(&mut sys_grid, &mut grid, &params, dt);
        }
        let ms_grid = t1.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6},{:.6}", n, ms_direct, ms_grid);
    }
}
