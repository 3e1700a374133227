/// Simple custom benchmarking without criterion
use std::time::Instant;

use bevy::prelude::*;
use clothtear::core::{ClothState, tear_edge};
use clothtear::solver::{FrameForcing, SpringKernel, SubstepDriver};
use clothtear::{ClothParams, SurfaceMesh};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn time_it<F: FnMut()>(name: &str, iterations: usize, mut f: F) {
    // Warmup
    for _ in 0..5 {
        f();
    }

    let start = Instant::now();
    for _ in 0..iterations {
        f();
    }
    let elapsed = start.elapsed();

    let avg_ms = elapsed.as_secs_f64() * 1000.0 / iterations as f64;
    println!("{}: {:.3}ms avg ({} iterations)", name, avg_ms, iterations);
}

fn create_cloth(params: &ClothParams) -> ClothState {
    let mut rng = StdRng::seed_from_u64(17);
    ClothState::new(
        params.rows,
        params.cols,
        &params.layout(),
        params.anchor_policy,
        &mut rng,
    )
    .expect("benchmark parameters are valid")
}

fn main() {
    println!("\n=== Cloth Benchmarks ===\n");

    println!("--- Frame Step (10 passes) ---");
    for &side in &[16, 32, 64, 128] {
        let params = ClothParams::default().with_grid(side, side);
        let mut state = create_cloth(&params);
        let driver = SubstepDriver::new(&params).expect("benchmark parameters are valid");
        let mut kernel = SpringKernel::new();
        let forcing = FrameForcing {
            wind: Vec3::new(0.0, 0.0, -5.0),
            obstacle: None,
        };

        time_it(&format!("advance_frame (n={})", side * side), 20, || {
            driver
                .advance_frame(&mut state, &mut kernel, 0.02, &forcing)
                .expect("cpu kernel does not fail");
        });
    }

    println!("\n--- Surface Rebuild ---");
    for &side in &[16, 32, 64, 128] {
        let params = ClothParams::default().with_grid(side, side);
        let mut state = create_cloth(&params);
        for col in 0..side - 1 {
            tear_edge(&mut state, col + side, col + side + 1)
                .expect("row neighbours are adjacent");
        }
        let mut mesh = SurfaceMesh::default();

        time_it(&format!("rebuild (n={})", side * side), 50, || {
            mesh.rebuild(&state);
        });
    }

    println!("\n=== Benchmark Complete ===\n");
}
