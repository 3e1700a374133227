// src/solver/mod.rs
pub mod kernel;
pub mod spring_kernel;
pub mod substep;
pub mod wind;

// Re-export from the solver module
pub use kernel::{KernelParams, NodeStepKernel, SphereObstacle};
pub use spring_kernel::SpringKernel;
pub use substep::{FrameForcing, SubstepDriver};
pub use wind::WindParams;
