//! Configuration for hover thrust.

use bevy::prelude::*;

use crate::error::ConfigError;

/// Configuration for hover thrust.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct HoverConfig {
    /// Height above ground the vehicle settles at (world units).
    pub target_height: f32,

    /// Thrust applied when the best sample point touches the ground.
    /// Scales linearly to zero at `target_height` and goes negative above it.
    pub max_thrust: f32,

    /// Sample ray length multiplier (multiplied by `target_height`).
    pub sensor_range_multiplier: f32,
}

impl HoverConfig {
    /// Length of each downward sample ray.
    pub fn sensor_range(&self) -> f32 {
        self.target_height * self.sensor_range_multiplier
    }

    /// Check every field against its accepted range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.target_height > 0.0) {
            return Err(ConfigError::NonPositiveTargetHeight(self.target_height));
        }
        if !(self.max_thrust >= 0.0) {
            return Err(ConfigError::NegativeThrust(self.max_thrust));
        }
        if !(self.sensor_range_multiplier > 0.0) {
            return Err(ConfigError::NonPositiveSensorRange(
                self.sensor_range_multiplier,
            ));
        }
        Ok(())
    }
}

impl Default for HoverConfig {
    fn default() -> Self {
        Self {
            target_height: 4.0,
            max_thrust: 30.0,
            sensor_range_multiplier: 1.0,
        }
    }
}
