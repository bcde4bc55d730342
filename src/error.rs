//! Error types for controller initialization and configuration.
//!
//! Runtime sensing never fails: a ray that finds nothing is a valid sensor
//! state. Only startup faults are represented here, and they are reported
//! once before the affected vehicle is made inert.

use bevy::prelude::*;
use thiserror::Error;

/// A configuration value outside its accepted range.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Target hover height must be strictly positive.
    #[error("target hover height must be > 0, got {0}")]
    NonPositiveTargetHeight(f32),

    /// Maximum hover thrust must not be negative.
    #[error("max hover thrust must be >= 0, got {0}")]
    NegativeThrust(f32),

    /// Sensor range multiplier must be strictly positive.
    #[error("sensor range multiplier must be > 0, got {0}")]
    NonPositiveSensorRange(f32),

    /// Grid footprint width and depth must be strictly positive.
    #[error("grid footprint must have positive width and depth, got {0}")]
    InvalidGridSize(Vec3),

    /// Column or row count outside `1..=MAX_DIVISIONS`.
    #[error("{axis} count must be within 1..={max}, got {value}")]
    DivisionsOutOfRange {
        /// Either `"column"` or `"row"`.
        axis: &'static str,
        /// The rejected value.
        value: u32,
        /// Upper bound.
        max: u32,
    },

    /// Stabilization force must not be negative.
    #[error("stabilize force must be >= 0, got {0}")]
    NegativeStabilizeForce(f32),

    /// Obstacle detection range must be strictly positive.
    #[error("obstacle detection range must be > 0, got {0}")]
    NonPositiveDetectionRange(f32),
}

/// Startup fault that leaves a vehicle permanently inert.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HoverError {
    /// No rigid body on the vehicle entity or any of its ancestors.
    #[error(
        "hover vehicle {vehicle} has no rigid body on itself or any ancestor; \
         add one so forces can be applied"
    )]
    MissingBody {
        /// The vehicle entity that failed to resolve.
        vehicle: Entity,
    },

    /// The vehicle's configuration was rejected.
    #[error("hover vehicle {vehicle} has an invalid configuration: {source}")]
    InvalidConfig {
        /// The vehicle entity carrying the configuration.
        vehicle: Entity,
        /// What was wrong with it.
        #[source]
        source: ConfigError,
    },
}
