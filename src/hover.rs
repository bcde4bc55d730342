//! Hover thrust and leveling torque.
//!
//! The hover controller has no state of its own. Each tick it reads the
//! field's best distance and the vehicle orientation and produces a force and
//! a torque.

use bevy::prelude::*;

use crate::config::{
    ForceMode, HoverConfig, StabilizationConfig, StabilizationReference,
};
use crate::detection::{HoverLayers, RayQuery, RaycastOracle};
use crate::field::HoverSampleField;
use crate::frame::VehicleFrame;

/// Force and torque one controller contributes to a body this tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BodyContribution {
    /// Linear force (already scaled for the force mode).
    pub force: Vec3,
    /// Torque (already scaled for the force mode).
    pub torque: Vec3,
}

impl BodyContribution {
    /// Convert raw controller outputs according to `mode`.
    pub fn scaled(force: Vec3, torque: Vec3, mode: ForceMode, mass: f32) -> Self {
        Self {
            force: mode.scale(force, mass),
            torque: mode.scale(torque, mass),
        }
    }
}

/// Body properties the controllers need each tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    /// Pose of the vehicle (the entity carrying the sample field).
    pub frame: VehicleFrame,
    /// Mass of the rigid body.
    pub mass: f32,
    /// The rigid body itself, excluded from ground rays.
    pub body: Option<Entity>,
}

/// Upward thrust for a best-point distance, before force-mode scaling.
///
/// `max_thrust × (1 − distance / target_height)`, deliberately unclamped:
/// negative above the target height, above `max_thrust` right at the ground.
/// `None` when the distance is unbounded or the target height is not
/// positive.
pub fn hover_thrust(distance: f32, config: &HoverConfig) -> Option<f32> {
    if !distance.is_finite() || config.target_height <= 0.0 {
        return None;
    }
    Some(config.max_thrust * (1.0 - distance / config.target_height))
}

/// Leveling torque that turns the vehicle's up axis toward `ground_normal`.
///
/// The correction axis `up × ground_normal` is split into its components
/// along the vehicle's forward (roll) and right (pitch) axes; each enabled
/// axis gets an independent torque of `component × config.force`.
pub fn stabilization_torque(
    frame: &VehicleFrame,
    ground_normal: Vec3,
    config: &StabilizationConfig,
) -> Vec3 {
    if !config.axes.any() {
        return Vec3::ZERO;
    }

    let cross = frame.up().cross(ground_normal);
    let turn = frame.inverse_transform_direction(cross);

    let mut torque = Vec3::ZERO;
    if config.axes.roll {
        // Local forward is -Z, so the roll component is -turn.z.
        torque += frame.forward() * -turn.z * config.force;
    }
    if config.axes.pitch {
        torque += frame.right() * turn.x * config.force;
    }
    torque
}

/// Normal the vehicle should level against this tick.
pub fn reference_normal(
    oracle: &impl RaycastOracle,
    state: &BodyState,
    reference: StabilizationReference,
    max_distance: f32,
    layers: HoverLayers,
) -> Vec3 {
    match reference {
        StabilizationReference::WorldUp => Vec3::Y,
        StabilizationReference::GroundNormal => {
            let query = RayQuery::downward(state.frame.translation, max_distance, layers)
                .excluding(state.body);
            oracle
                .cast_ray(&query)
                .map(|hit| hit.normal.normalize_or(Vec3::Y))
                .unwrap_or(Vec3::Y)
        }
    }
}

/// Settings the hover tick reads, borrowed from the vehicle config.
#[derive(Debug, Clone, Copy)]
pub struct HoverSettings<'a> {
    /// Thrust settings.
    pub hover: &'a HoverConfig,
    /// Leveling settings.
    pub stabilization: &'a StabilizationConfig,
    /// Layers for the terrain-normal probe.
    pub layers: HoverLayers,
    /// Acceleration or force semantics.
    pub force_mode: ForceMode,
}

/// One hover tick: evaluate the field, then compute thrust and leveling.
///
/// The field is fully evaluated before its best point is read.
pub fn hover_tick(
    field: &mut HoverSampleField,
    oracle: &impl RaycastOracle,
    state: &BodyState,
    settings: HoverSettings<'_>,
) -> BodyContribution {
    field.find_best(oracle, &state.frame, settings.hover.sensor_range(), state.body);
    hover_contribution(field, oracle, state, settings)
}

/// Thrust and leveling from an already evaluated field.
///
/// Thrust is skipped when there is no best point or it found no ground;
/// leveling is computed regardless.
pub fn hover_contribution(
    field: &HoverSampleField,
    oracle: &impl RaycastOracle,
    state: &BodyState,
    settings: HoverSettings<'_>,
) -> BodyContribution {
    let thrust = field
        .best()
        .and_then(|best| hover_thrust(best.distance(), settings.hover))
        .map(|thrust| Vec3::Y * thrust)
        .unwrap_or(Vec3::ZERO);

    let normal = reference_normal(
        oracle,
        state,
        settings.stabilization.reference,
        settings.hover.sensor_range(),
        settings.layers,
    );
    let torque = stabilization_torque(&state.frame, normal, settings.stabilization);

    BodyContribution::scaled(thrust, torque, settings.force_mode, state.mass)
}
