use bevy::prelude::*;

use crate::core::{AnchorPolicy, NodeLayout};
use crate::error::{ClothError, ClothResult};

use super::constants::*;

/// Parameters for one cloth instance: grid shape, spring network and forcing.
#[derive(Resource, Clone, Debug)]
pub struct ClothParams {
    /// Position of node (0, 0); rows grow along -Y, columns along +X.
    pub origin: Vec3,
    pub rows: usize,
    pub cols: usize,

    /// Substeps per rendered frame
    pub passes: u32,

    pub row_spacing: f32,
    pub col_spacing: f32,
    /// Initial positions get a uniform z offset in `[-z_jitter, z_jitter]`
    pub z_jitter: f32,

    /// Rest length of axis-aligned springs (diagonals use `rest_length * sqrt(2)`)
    pub rest_length: f32,
    pub spring_stiffness: f32,
    pub structural_drag: f32,
    pub aerodynamic_drag: f32,
    pub mass: f32,
    pub gravity: f32,

    pub wind_speed: f32,
    /// Amplitude of the gust jitter added on top of the steady wind
    pub wind_noise: f32,

    /// Fraction of normal velocity lost on obstacle contact (0.0 = elastic bounce)
    pub absorption: f32,
    pub node_radius: f32,
    /// Forwarded to the step kernel; nothing tears automatically.
    pub tear_threshold: f32,

    pub anchor_policy: AnchorPolicy,
}

impl Default for ClothParams {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN,
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            passes: DEFAULT_PASSES,
            row_spacing: DEFAULT_SPACING,
            col_spacing: DEFAULT_SPACING,
            z_jitter: DEFAULT_Z_JITTER,
            rest_length: DEFAULT_REST_LENGTH,
            spring_stiffness: DEFAULT_SPRING_STIFFNESS,
            structural_drag: DEFAULT_STRUCTURAL_DRAG,
            aerodynamic_drag: DEFAULT_AERODYNAMIC_DRAG,
            mass: DEFAULT_MASS,
            gravity: DEFAULT_GRAVITY,
            wind_speed: DEFAULT_WIND_SPEED,
            wind_noise: DEFAULT_WIND_NOISE,
            absorption: DEFAULT_ABSORPTION,
            node_radius: DEFAULT_NODE_RADIUS,
            tear_threshold: DEFAULT_TEAR_THRESHOLD,
            anchor_policy: AnchorPolicy::TopRow,
        }
    }
}

impl ClothParams {
    pub fn with_grid(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_passes(mut self, passes: u32) -> Self {
        self.passes = passes;
        self
    }

    /// Same spacing along rows and columns
    pub fn with_spacing(mut self, spacing: f32) -> Self {
        self.row_spacing = spacing;
        self.col_spacing = spacing;
        self
    }

    pub fn with_z_jitter(mut self, z_jitter: f32) -> Self {
        self.z_jitter = z_jitter;
        self
    }

    pub fn with_anchor_policy(mut self, anchor_policy: AnchorPolicy) -> Self {
        self.anchor_policy = anchor_policy;
        self
    }

    pub fn with_wind(mut self, speed: f32, noise: f32) -> Self {
        self.wind_speed = speed;
        self.wind_noise = noise;
        self
    }

    /// Set absorption (clamped to 0.0 to 1.0)
    pub fn with_absorption(mut self, absorption: f32) -> Self {
        self.absorption = absorption.clamp(0.0, 1.0);
        self
    }

    pub fn node_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Initial placement of the nodes described by these parameters.
    pub fn layout(&self) -> NodeLayout {
        NodeLayout {
            origin: self.origin,
            row_spacing: self.row_spacing,
            col_spacing: self.col_spacing,
            z_jitter: self.z_jitter,
        }
    }

    /// Reject configurations that cannot be simulated, before anything runs.
    pub fn validate(&self) -> ClothResult<()> {
        if self.rows < 1 || self.cols < 1 {
            return Err(ClothError::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.passes < 1 {
            return Err(ClothError::InvalidPasses(self.passes));
        }
        if !(self.mass > 0.0 && self.mass.is_finite()) {
            return Err(ClothError::InvalidParameter {
                name: "mass",
                value: self.mass,
            });
        }

        self.layout().validate()?;

        let non_negative = [
            ("rest_length", self.rest_length),
            ("spring_stiffness", self.spring_stiffness),
            ("structural_drag", self.structural_drag),
            ("aerodynamic_drag", self.aerodynamic_drag),
            ("node_radius", self.node_radius),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(ClothError::InvalidParameter { name, value });
            }
        }

        if !(0.0..=1.0).contains(&self.absorption) {
            return Err(ClothError::InvalidParameter {
                name: "absorption",
                value: self.absorption,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ClothParams::default().validate().is_ok());
    }

    #[test]
    fn empty_grid_is_rejected() {
        let params = ClothParams::default().with_grid(0, 4);
        assert_eq!(
            params.validate(),
            Err(ClothError::InvalidDimensions { rows: 0, cols: 4 })
        );
    }

    #[test]
    fn zero_passes_is_rejected() {
        let params = ClothParams::default().with_passes(0);
        assert_eq!(params.validate(), Err(ClothError::InvalidPasses(0)));
    }

    #[test]
    fn non_positive_mass_is_rejected() {
        let mut params = ClothParams::default();
        params.mass = 0.0;
        assert!(matches!(
            params.validate(),
            Err(ClothError::InvalidParameter { name: "mass", .. })
        ));
    }

    #[test]
    fn absorption_builder_clamps() {
        let params = ClothParams::default().with_absorption(3.0);
        assert_eq!(params.absorption, 1.0);
    }
}
