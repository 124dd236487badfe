use bevy::prelude::*;
use bevy::math::primitives::{Sphere, Cuboid};
use bevy::window::PrimaryWindow;

use crate::simulation::lifecycle::{Simulation, TickOutcome};

/// Component tagging each sphere with its storage index into `Simulation::bodies()`
#[derive(Component)]
struct BodyIndex(pub usize);

/// Population generation the spawned sphere entities belong to
#[derive(Resource, Default)]
struct SpawnedGeneration(u64);

/// World-space → screen-space scaling factor for positions and radii
const SCALE3D: f32 = 100.0;

/// Open the Bevy viewer; the simulation is ticked once per rendered frame
pub fn run_3d(sim: Simulation) {
    println!("run_3d: starting Bevy 3D viewer with {} bodies", sim.bodies().len());

    App::new()
        .insert_resource(sim)
        .init_resource::<SpawnedGeneration>()
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, setup_3d)
        .add_systems(Update, (tick_simulation, respawn_bodies, sync_transforms_3d, update_title).chain())
        .run();
}

fn to_screen(v: [f64; 3]) -> Vec3 {
    Vec3::new(v[0] as f32, v[1] as f32, v[2] as f32) * SCALE3D
}

/// Startup system: spawn camera, light and the cube outline
fn setup_3d(mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    sim: Res<Simulation>,
) {
    commands.spawn(Camera3dBundle {
        camera: Camera {
            clear_color: ClearColorConfig::Custom(Color::srgb(0.8, 0.8, 0.8)),
            ..Default::default()
        },
        transform: Transform::from_translation(to_screen(Simulation::EYE_POSITION))
            .looking_at(Vec3::ZERO, to_screen(Simulation::UP).normalize()),
        ..Default::default()
    });

    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 4_000_000.0,
            range: 2000.0,
            ..Default::default()
        },
        transform: Transform::from_xyz(3.0 * SCALE3D, 3.0 * SCALE3D, 3.0 * SCALE3D),
        ..Default::default()
    });

    spawn_cube_edges(&mut commands, &mut meshes, &mut materials, sim.parameters.bound() as f32);
}

/// Host frame callback: forward the frame clock to the simulation
fn tick_simulation(time: Res<Time>, mut sim: ResMut<Simulation>) {
    if let TickOutcome::Reset(_) = sim.tick(time.elapsed_seconds_f64() * 1000.0) {
        debug!("population reset at {:.2} s", time.elapsed_seconds_f64());
    }
}

/// Rebuild sphere entities whenever the simulation regenerated its population
fn respawn_bodies(mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    sim: Res<Simulation>,
    mut spawned: ResMut<SpawnedGeneration>,
    existing: Query<Entity, With<BodyIndex>>,
) {
    if spawned.0 == sim.generation() {
        return;
    }

    for e in &existing {
        commands.entity(e).despawn();
    }

    for (i, b) in sim.bodies().iter().enumerate() {
        let [r, g, bl] = b.color;
        commands.spawn((
            PbrBundle {
                mesh: meshes.add(Sphere::new(b.radius as f32 * SCALE3D).mesh()),
                material: materials.add(StandardMaterial {
                    base_color: Color::srgb(r, g, bl),
                    ..Default::default()
                }),
                transform: Transform::from_translation(to_screen([b.x.x, b.x.y, b.x.z])),
                ..Default::default()
            },
            BodyIndex(i),
        ));
    }

    spawned.0 = sim.generation();
}

fn sync_transforms_3d(sim: Res<Simulation>, mut query: Query<(&BodyIndex, &mut Transform)>) {
    let bodies = sim.bodies();
    for (BodyIndex(i), mut transform) in &mut query {
        if let Some(b) = bodies.get(*i) {
            transform.translation = to_screen([b.x.x, b.x.y, b.x.z]);
        }
    }
}

fn update_title(sim: Res<Simulation>, mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = windows.get_single_mut() {
        window.title = format!(
            "spheresim - {} bodies - {:.0} fps - reset in {:.1} s",
            sim.bodies().len(),
            sim.stats.fps(),
            (sim.parameters.reset_interval - sim.time_since_reset()).max(0.0),
        );
    }
}

// =========================================================================================
// Cube outline: 12 thin boxes along the walls' edges
// =========================================================================================

fn spawn_cube_edges(commands: &mut Commands, meshes: &mut Assets<Mesh>, materials: &mut Assets<StandardMaterial>, bound: f32) {
    let len = 2.0 * bound * SCALE3D;
    let thickness = 0.005 * SCALE3D;
    let h = bound * SCALE3D;

    let material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.1, 0.1, 0.1),
        unlit: true,
        ..Default::default()
    });

    let along_x = meshes.add(Cuboid::new(len, thickness, thickness).mesh());
    let along_y = meshes.add(Cuboid::new(thickness, len, thickness).mesh());
    let along_z = meshes.add(Cuboid::new(thickness, thickness, len).mesh());

    for a in [-h, h] {
        for b in [-h, h] {
            for (mesh, pos) in [
                (&along_x, Vec3::new(0.0, a, b)),
                (&along_y, Vec3::new(a, 0.0, b)),
                (&along_z, Vec3::new(a, b, 0.0)),
            ] {
                commands.spawn(PbrBundle {
                    mesh: mesh.clone(),
                    material: material.clone(),
                    transform: Transform::from_translation(pos),
                    ..Default::default()
                });
            }
        }
    }
}
