//! Turn torque from look input.

use bevy::prelude::*;

use crate::config::LookConfig;
use crate::frame::VehicleFrame;

/// Torque for a 2D turn input, before force-mode scaling.
///
/// Yaw turns about world up with the horizontal input, positive input turning
/// right. Pitch turns about the vehicle's right axis flattened onto the
/// horizontal plane, positive input lifting the nose. In Bevy's right-handed
/// frame a right turn is a negative rotation about `+Y`, hence the sign flip
/// on yaw.
pub fn look_torque(frame: &VehicleFrame, input: Vec2, config: &LookConfig) -> Vec3 {
    if !config.enabled {
        return Vec3::ZERO;
    }

    let yaw = Vec3::Y * input.x * config.horizontal_turn_speed * -1.0;
    let right = frame.right().with_y(0.0);
    let pitch = right * input.y * config.vertical_turn_speed;

    yaw + pitch
}
