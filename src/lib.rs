use std::time::Duration;

use bevy::prelude::*;

pub mod config;
pub mod core;
pub mod error;
pub mod math;
pub mod simulation;
pub mod solver;
pub mod surface;

// Public re-exports for clean API
pub use crate::config::{ClothParams, FRAME_DT};
pub use crate::core::{
    AnchorPolicy, ClothState, Direction, GridIndex, NeighborMask, NodeLayout, detach_node,
    tear_edge,
};
pub use crate::error::{ClothError, ClothResult};
pub use crate::simulation::{ClothCommand, ClothCommands, ClothControl, ClothSim};
pub use crate::solver::{
    FrameForcing, KernelParams, NodeStepKernel, SphereObstacle, SpringKernel, SubstepDriver,
};
pub use crate::surface::SurfaceMesh;

use crate::simulation::{apply_cloth_commands, rebuild_cloth_surface, step_cloth};

/// Registers one cloth and steps it on the fixed schedule.
///
/// Each fixed frame runs queued topology commands, then all substeps, then the
/// surface rebuild, in that order.
#[derive(Default)]
pub struct ClothPlugin {
    pub params: ClothParams,
}

impl Plugin for ClothPlugin {
    fn build(&self, app: &mut App) {
        let sim = match ClothSim::new(self.params.clone()) {
            Ok(sim) => sim,
            Err(err) => panic!("invalid cloth configuration: {}", err),
        };
        let surface = SurfaceMesh::from_state(sim.state());

        app.insert_resource(sim)
            .insert_resource(surface)
            .insert_resource(ClothControl::default())
            .insert_resource(ClothCommands::default())
            .insert_resource(Time::<Fixed>::from_duration(Duration::from_secs_f32(FRAME_DT)))
            .add_systems(
                FixedUpdate,
                (apply_cloth_commands, step_cloth, rebuild_cloth_surface).chain(),
            );
    }
}
