//! Vehicle marker and link components.

use bevy::prelude::*;

use crate::config::HoverControllerConfig;
use crate::error::HoverError;
use crate::field::HoverSampleField;
use crate::intent::HoverIntent;

/// Marks an entity as a hover vehicle.
///
/// The vehicle entity carries the sample field and the pose it is sampled
/// from. Forces go to the rigid body found on the vehicle itself or its
/// nearest ancestor, so a hover pad can be a child of a larger body.
///
/// # Example
///
/// ```rust,ignore
/// commands.spawn((
///     HoverVehicle,
///     HoverControllerConfig::default().with_target_height(2.0),
///     Transform::from_xyz(0.0, 3.0, 0.0),
///     // plus whatever rigid body components the backend needs
/// ));
/// ```
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
#[require(HoverControllerConfig, HoverIntent, HoverSampleField, Transform)]
pub struct HoverVehicle;

/// Rigid body a vehicle applies its forces to.
///
/// Inserted once the vehicle has been resolved; vehicles without it are
/// ignored by the force systems.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component)]
pub struct HoverBodyLink {
    /// The rigid body entity.
    pub body: Entity,
}

/// A vehicle that failed to initialize.
///
/// The fault has already been logged. The vehicle never samples or applies
/// forces again. Resolution is not retried unless this component is removed.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct HoverInert {
    /// Why the vehicle was disabled.
    pub reason: HoverError,
}
