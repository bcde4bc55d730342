//! Configuration for horizontal movement and obstacle avoidance.

use bevy::prelude::*;

use crate::detection::HoverLayers;
use crate::error::ConfigError;

/// Configuration for horizontal movement and obstacle avoidance.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct MovementConfig {
    /// Whether movement intent is applied at all.
    pub enabled: bool,

    /// Thrust along the input direction.
    pub move_speed: f32,

    /// Whether to probe ahead for obstacles.
    pub obstacle_avoidance: bool,

    /// Surfaces treated as obstacles.
    pub obstacle_layers: HoverLayers,

    /// How far ahead of the footprint edge obstacles are detected.
    pub obstacle_detection_range: f32,

    /// Push-back applied against the move direction near steep obstacles.
    pub repulsion_speed: f32,

    /// Upward thrust applied to rise over an oncoming obstacle.
    pub hover_boost: f32,
}

impl MovementConfig {
    /// Check every field against its accepted range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.obstacle_avoidance && !(self.obstacle_detection_range > 0.0) {
            return Err(ConfigError::NonPositiveDetectionRange(
                self.obstacle_detection_range,
            ));
        }
        Ok(())
    }
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            move_speed: 10.0,
            obstacle_avoidance: true,
            obstacle_layers: HoverLayers::DEFAULT,
            obstacle_detection_range: 10.0,
            repulsion_speed: 10.0,
            hover_boost: 30.0,
        }
    }
}
