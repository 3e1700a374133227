//! Configuration and parameters
//!
//! Default constants and the per-cloth parameter resource.

pub mod cloth_params;
pub mod constants;

pub use cloth_params::*;
pub use constants::*;
