//! Contract between the substep driver and whatever advances the nodes.
//!
//! A kernel may run on a GPU, a thread pool or a single thread. The driver only
//! relies on the post-condition: after `step` returns, `prev_*` hold the state
//! that entered the substep and `positions`/`velocities` the state leaving it,
//! with anchored nodes untouched.

use crate::config::ClothParams;
use crate::core::NodeBuffers;
use crate::error::ClothResult;
use crate::math::{Real, Vector};

/// Moving sphere the cloth collides with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereObstacle {
    pub center: Vector,
    pub velocity: Vector,
    pub radius: Real,
}

impl SphereObstacle {
    /// Center after `elapsed` seconds of straight-line motion.
    #[inline]
    pub fn advanced(&self, elapsed: Real) -> Self {
        Self {
            center: self.center + self.velocity * elapsed,
            ..*self
        }
    }
}

/// Uniforms for one kernel invocation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KernelParams {
    pub dt: Real,
    pub rest_length: Real,
    /// Spring stiffness divided by node mass
    pub spring_stiffness: Real,
    /// Structural drag divided by node mass
    pub structural_drag: Real,
    /// Aerodynamic drag divided by node mass
    pub aerodynamic_drag: Real,
    pub gravity: Real,
    pub absorption: Real,
    pub node_radius: Real,
    pub tear_threshold: Real,
    pub wind: Vector,
    pub obstacle: Option<SphereObstacle>,
}

impl KernelParams {
    /// Frame-constant uniforms; `dt`, `wind` and `obstacle` are filled in per substep.
    pub fn from_params(params: &ClothParams) -> Self {
        let inv_mass = 1.0 / params.mass;
        Self {
            dt: 0.0,
            rest_length: params.rest_length,
            spring_stiffness: params.spring_stiffness * inv_mass,
            structural_drag: params.structural_drag * inv_mass,
            aerodynamic_drag: params.aerodynamic_drag * inv_mass,
            gravity: params.gravity,
            absorption: params.absorption,
            node_radius: params.node_radius,
            tear_threshold: params.tear_threshold,
            wind: Vector::ZERO,
            obstacle: None,
        }
    }
}

/// One data-parallel integration step over every node.
pub trait NodeStepKernel: Send + Sync {
    fn step(&mut self, buffers: NodeBuffers<'_>, params: &KernelParams) -> ClothResult<()>;

    fn name(&self) -> &str;
}
