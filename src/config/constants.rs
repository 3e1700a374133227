// Default physical constants for the cloth scene
use bevy::prelude::*;

// Grid layout
pub const DEFAULT_ROWS: usize = 10;
pub const DEFAULT_COLS: usize = 10;
pub const DEFAULT_ORIGIN: Vec3 = Vec3::ZERO;
pub const DEFAULT_SPACING: f32 = 0.5;
pub const DEFAULT_Z_JITTER: f32 = 0.05;

// Stepping
pub const DEFAULT_PASSES: u32 = 10;
pub const FRAME_DT: f32 = 0.02;

// Spring network
pub const DEFAULT_REST_LENGTH: f32 = 1.0;
pub const DEFAULT_SPRING_STIFFNESS: f32 = 10.0;
pub const DEFAULT_STRUCTURAL_DRAG: f32 = 10.0;
pub const DEFAULT_AERODYNAMIC_DRAG: f32 = 10.0;
pub const DEFAULT_MASS: f32 = 1.0;
pub const DEFAULT_GRAVITY: f32 = 1.0;

// Wind and collisions
pub const DEFAULT_WIND_SPEED: f32 = 5.0;
pub const DEFAULT_WIND_NOISE: f32 = 1.0;
pub const DEFAULT_ABSORPTION: f32 = 0.5;
pub const DEFAULT_NODE_RADIUS: f32 = 0.05;
pub const DEFAULT_TEAR_THRESHOLD: f32 = 0.5;
