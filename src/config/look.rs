//! Configuration for turn torque.

use bevy::prelude::*;

/// Configuration for turn torque.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct LookConfig {
    /// Whether turn intent is applied at all.
    pub enabled: bool,

    /// Yaw torque per unit of horizontal input.
    pub horizontal_turn_speed: f32,

    /// Pitch torque per unit of vertical input.
    pub vertical_turn_speed: f32,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            horizontal_turn_speed: 5.0,
            vertical_turn_speed: 5.0,
        }
    }
}
