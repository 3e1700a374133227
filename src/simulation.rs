use std::time::Instant;

use bevy::prelude::*;
use rand::Rng;

use crate::config::ClothParams;
use crate::core::{ClothState, tear_edge};
use crate::error::ClothResult;
use crate::math::{Real, Vector};
use crate::solver::{
    FrameForcing, NodeStepKernel, SphereObstacle, SpringKernel, SubstepDriver, WindParams,
};
use crate::surface::SurfaceMesh;

/// One cloth instance: node buffers, the frame driver and the kernel it dispatches to.
#[derive(Resource)]
pub struct ClothSim {
    params: ClothParams,
    state: ClothState,
    driver: SubstepDriver,
    wind: WindParams,
    kernel: Box<dyn NodeStepKernel>,
}

impl ClothSim {
    /// Build a cloth stepped by the CPU spring kernel.
    pub fn new(params: ClothParams) -> ClothResult<Self> {
        Self::with_kernel(params, Box::new(SpringKernel::new()), &mut rand::rng())
    }

    pub fn with_kernel<R: Rng + ?Sized>(
        params: ClothParams,
        kernel: Box<dyn NodeStepKernel>,
        rng: &mut R,
    ) -> ClothResult<Self> {
        let driver = SubstepDriver::new(&params)?;
        let state = ClothState::new(
            params.rows,
            params.cols,
            &params.layout(),
            params.anchor_policy,
            rng,
        )?;
        info!(
            "cloth ready: {}x{} nodes, {} passes, kernel `{}`",
            params.rows,
            params.cols,
            driver.passes(),
            kernel.name()
        );

        Ok(Self {
            wind: WindParams::from_params(&params),
            params,
            state,
            driver,
            kernel,
        })
    }

    pub fn params(&self) -> &ClothParams {
        &self.params
    }

    pub fn state(&self) -> &ClothState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ClothState {
        &mut self.state
    }

    pub fn driver(&self) -> &SubstepDriver {
        &self.driver
    }

    pub fn wind(&self) -> &WindParams {
        &self.wind
    }

    /// Change the substep count used from the next frame on.
    pub fn set_passes(&mut self, passes: u32) -> ClothResult<()> {
        self.driver.set_passes(passes)?;
        self.params.passes = passes;
        Ok(())
    }

    /// Restore the initial layout and every torn edge.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) -> ClothResult<()> {
        let layout = self.params.layout();
        self.state.reinitialize(&layout, rng)?;
        info!("cloth reset: {} nodes", self.state.node_count());
        Ok(())
    }

    /// Remove the spring between two neighbouring nodes.
    pub fn tear(&mut self, a: usize, b: usize) -> ClothResult<bool> {
        tear_edge(&mut self.state, a, b)
    }

    /// Advance one frame of `frame_dt` seconds.
    pub fn step(&mut self, frame_dt: Real, forcing: &FrameForcing) -> ClothResult<()> {
        self.driver
            .advance_frame(&mut self.state, self.kernel.as_mut(), frame_dt, forcing)
    }
}

/// Runtime inputs that external controls (keyboard, UI, scripts) drive.
#[derive(Resource, Clone, Debug)]
pub struct ClothControl {
    pub paused: bool,
    pub blowing: bool,
    pub wind_direction: Vector,
    pub obstacle: Option<SphereObstacle>,
}

impl Default for ClothControl {
    fn default() -> Self {
        Self {
            paused: false,
            blowing: false,
            wind_direction: Vector::NEG_Z,
            obstacle: None,
        }
    }
}

impl ClothControl {
    pub fn forcing(&self, wind: &WindParams, time: Real) -> FrameForcing {
        FrameForcing {
            wind: if self.blowing {
                wind.sample(self.wind_direction, time)
            } else {
                Vector::ZERO
            },
            obstacle: self.obstacle,
        }
    }
}

/// One queued topology request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClothCommand {
    Reset,
    Tear(usize, usize),
}

/// Topology requests queued between frames, kept in request order.
#[derive(Resource, Default, Debug)]
pub struct ClothCommands {
    pending: Vec<ClothCommand>,
}

impl ClothCommands {
    pub fn request_reset(&mut self) {
        self.pending.push(ClothCommand::Reset);
    }

    pub fn request_tear(&mut self, a: usize, b: usize) {
        self.pending.push(ClothCommand::Tear(a, b));
    }

    pub fn pending(&self) -> &[ClothCommand] {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Apply queued resets and tears, in request order, before the frame's first substep.
pub fn apply_cloth_commands(mut sim: ResMut<ClothSim>, mut queue: ResMut<ClothCommands>) {
    if queue.is_empty() {
        return;
    }

    // Everything before the last reset is undone by it.
    let skip = queue
        .pending
        .iter()
        .rposition(|command| *command == ClothCommand::Reset)
        .unwrap_or(0);
    if skip > 0 {
        debug!("{} queued commands superseded by a reset", skip);
    }

    for command in queue.pending.drain(..).skip(skip) {
        match command {
            ClothCommand::Reset => {
                if let Err(err) = sim.reset(&mut rand::rng()) {
                    warn!("reset rejected: {}", err);
                }
            }
            ClothCommand::Tear(a, b) => match sim.tear(a, b) {
                Ok(true) => debug!("tear applied: {} - {}", a, b),
                Ok(false) => debug!("tear ignored, edge {} - {} already gone", a, b),
                Err(err) => warn!("tear rejected: {}", err),
            },
        }
    }
}

pub fn step_cloth(time: Res<Time>, control: Res<ClothControl>, mut sim: ResMut<ClothSim>) {
    if control.paused {
        return;
    }

    let start = Instant::now();
    let forcing = control.forcing(sim.wind(), time.elapsed_secs());
    if let Err(err) = sim.step(time.delta_secs(), &forcing) {
        error!("cloth step failed: {}", err);
        return;
    }

    let elapsed = start.elapsed().as_secs_f32() * 1000.0;
    debug!("cloth_step: {:.3}ms", elapsed);
}

pub fn rebuild_cloth_surface(sim: Res<ClothSim>, mut surface: ResMut<SurfaceMesh>) {
    surface.rebuild(sim.state());
}
