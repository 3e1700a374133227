use crate::config::ClothParams;
use crate::math::{Real, Vector, value_noise};

/// Steady wind along a direction plus a smooth gust jitter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindParams {
    pub speed: Real,
    pub noise: Real,
}

impl WindParams {
    pub fn from_params(params: &ClothParams) -> Self {
        Self {
            speed: params.wind_speed,
            noise: params.wind_noise,
        }
    }

    /// Wind vector at `time` seconds while blowing along `direction`.
    pub fn sample(&self, direction: Vector, time: Real) -> Vector {
        let gust = 2.0 * value_noise(3.0 * time, time) - 1.0;
        direction.normalize_or_zero() * self.speed + Vector::ONE * self.noise * gust
    }
}
