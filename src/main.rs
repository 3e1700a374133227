// Headless cloth run: blows on the sheet, tears a slit down the middle and
// logs surface statistics until it exits.
use bevy::log::LogPlugin;
use bevy::prelude::*;
use clothtear::{
    ClothCommands, ClothControl, ClothParams, ClothPlugin, ClothSim, SphereObstacle, SurfaceMesh,
};

const TEAR_FRAME: u32 = 120;
const EXIT_FRAME: u32 = 600;

fn setup_obstacle(mut control: ResMut<ClothControl>) {
    control.obstacle = Some(SphereObstacle {
        center: Vec3::new(2.25, -3.0, 1.5),
        velocity: Vec3::new(0.0, 0.0, -0.5),
        radius: 1.0,
    });
}

fn drive_scene(
    time: Res<Time>,
    sim: Res<ClothSim>,
    mut control: ResMut<ClothControl>,
    mut queue: ResMut<ClothCommands>,
    mut frame: Local<u32>,
) {
    *frame += 1;

    // Gust on and off every two seconds at the fixed rate.
    control.blowing = (*frame / 100) % 2 == 1;

    if let Some(obstacle) = control.obstacle.as_mut() {
        obstacle.center += obstacle.velocity * time.delta_secs();
    }

    if *frame == TEAR_FRAME {
        let grid = sim.state().grid();
        let col = grid.cols() / 2;
        for row in 1..grid.rows() {
            queue.request_tear(grid.index(row, col - 1), grid.index(row, col));
            queue.request_tear(grid.index(row, col - 1), grid.index(row - 1, col));
            queue.request_tear(grid.index(row - 1, col - 1), grid.index(row, col));
        }
        info!("queued slit along column {}", col);
    }
}

fn report_surface(sim: Res<ClothSim>, surface: Res<SurfaceMesh>, mut frame: Local<u32>) {
    const SAMPLE_PERIOD: u32 = 60;

    *frame += 1;
    if *frame % SAMPLE_PERIOD == 0 {
        let state = sim.state();
        let lowest = state
            .positions()
            .iter()
            .map(|p| p.y)
            .fold(f32::INFINITY, f32::min);
        info!(
            "[frame {:04}] springs={} triangles={} vertices={} lowest_y={:.3}",
            *frame,
            state.edge_count(),
            surface.triangle_count(),
            surface.vertex_count(),
            lowest
        );
    }

    if *frame > EXIT_FRAME {
        std::process::exit(0);
    }
}

fn main() {
    let params = ClothParams::default().with_grid(16, 16).with_passes(10);

    App::new()
        .add_plugins(MinimalPlugins)
        .add_plugins(LogPlugin::default())
        .add_plugins(ClothPlugin { params })
        .add_systems(Startup, setup_obstacle)
        .add_systems(FixedUpdate, (drive_scene, report_surface).chain())
        .run();
}
