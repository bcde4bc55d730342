//! Configuration for leveling torque.

use bevy::prelude::*;

use crate::error::ConfigError;

/// Which rotation axes the leveling torque acts on.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StabilizeAxes {
    /// Correct rotation about the vehicle's forward axis.
    pub roll: bool,
    /// Correct rotation about the vehicle's right axis.
    pub pitch: bool,
}

impl StabilizeAxes {
    /// Both axes.
    pub const BOTH: Self = Self {
        roll: true,
        pitch: true,
    };
    /// No correction at all.
    pub const NONE: Self = Self {
        roll: false,
        pitch: false,
    };

    /// Whether at least one axis is enabled.
    pub fn any(&self) -> bool {
        self.roll || self.pitch
    }
}

impl Default for StabilizeAxes {
    fn default() -> Self {
        Self {
            roll: true,
            pitch: false,
        }
    }
}

/// Normal the vehicle's up axis is leveled against.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StabilizationReference {
    /// Always level against world up.
    #[default]
    WorldUp,
    /// Level against the terrain normal straight below the vehicle origin,
    /// falling back to world up when nothing is in sensor range.
    GroundNormal,
}

/// Configuration for leveling torque.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct StabilizationConfig {
    /// Torque magnitude per unit of misalignment.
    pub force: f32,

    /// Axes to correct.
    pub axes: StabilizeAxes,

    /// What "level" means.
    pub reference: StabilizationReference,
}

impl StabilizationConfig {
    /// Check every field against its accepted range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.force >= 0.0) {
            return Err(ConfigError::NegativeStabilizeForce(self.force));
        }
        Ok(())
    }
}

impl Default for StabilizationConfig {
    fn default() -> Self {
        Self {
            force: 10.0,
            axes: StabilizeAxes::default(),
            reference: StabilizationReference::WorldUp,
        }
    }
}
