//! Frame driver: splits one frame into `passes` equal substeps and hands each
//! one to the step kernel, strictly in sequence.

use bevy::prelude::*;

use crate::config::ClothParams;
use crate::core::ClothState;
use crate::error::{ClothError, ClothResult};
use crate::math::{Real, Vector};

use super::kernel::{KernelParams, NodeStepKernel, SphereObstacle};

/// External forcing for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameForcing {
    /// Already sampled for this frame; zero when nobody is blowing.
    pub wind: Vector,
    /// Obstacle state at the start of the frame.
    pub obstacle: Option<SphereObstacle>,
}

#[derive(Clone, Debug)]
pub struct SubstepDriver {
    passes: u32,
    base: KernelParams,
}

impl SubstepDriver {
    pub fn new(params: &ClothParams) -> ClothResult<Self> {
        params.validate()?;
        Ok(Self {
            passes: params.passes,
            base: KernelParams::from_params(params),
        })
    }

    pub fn passes(&self) -> u32 {
        self.passes
    }

    pub fn set_passes(&mut self, passes: u32) -> ClothResult<()> {
        if passes < 1 {
            return Err(ClothError::InvalidPasses(passes));
        }
        self.passes = passes;
        Ok(())
    }

    pub fn base_params(&self) -> &KernelParams {
        &self.base
    }

    /// Substep length for a frame of `frame_dt` seconds.
    #[inline]
    pub fn substep_dt(&self, frame_dt: Real) -> Real {
        frame_dt / self.passes as Real
    }

    /// Uniforms for substep `substep` (0-based) of a frame.
    pub fn substep_params(
        &self,
        substep: u32,
        frame_dt: Real,
        forcing: &FrameForcing,
    ) -> KernelParams {
        let dt = self.substep_dt(frame_dt);
        KernelParams {
            dt,
            wind: forcing.wind,
            obstacle: forcing
                .obstacle
                .map(|obstacle| obstacle.advanced(substep as Real * dt)),
            ..self.base
        }
    }

    /// Advance `state` by one frame.
    ///
    /// Each kernel call sees the buffers left by the previous one; a kernel
    /// failure aborts the frame and is returned as-is.
    pub fn advance_frame(
        &self,
        state: &mut ClothState,
        kernel: &mut dyn NodeStepKernel,
        frame_dt: Real,
        forcing: &FrameForcing,
    ) -> ClothResult<()> {
        for substep in 0..self.passes {
            let params = self.substep_params(substep, frame_dt, forcing);
            if let Err(err) = kernel.step(state.buffers_mut(), &params) {
                warn!(
                    "kernel `{}` failed on substep {}/{}: {}",
                    kernel.name(),
                    substep + 1,
                    self.passes,
                    err
                );
                return Err(err);
            }
        }
        Ok(())
    }
}
