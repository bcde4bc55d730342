//! Horizontal thrust with obstacle avoidance.

use bevy::prelude::*;

use crate::config::MovementConfig;
use crate::detection::{RayHit, RayQuery, RaycastOracle};
use crate::field::HoverSampleField;
use crate::frame::VehicleFrame;

/// World-space move direction for a 2D input (`x` = right, `y` = forward).
///
/// The vehicle's forward and right axes are flattened onto the horizontal
/// plane and normalized separately, then weighted by the input.
pub fn move_direction(frame: &VehicleFrame, input: Vec2) -> Vec3 {
    let forward = frame.forward().with_y(0.0).normalize_or_zero();
    let right = frame.right().with_y(0.0).normalize_or_zero();
    forward * input.y + right * input.x
}

/// Force for an obstacle hit `hit` while moving along `direction`.
///
/// Closeness ramps linearly from 0 at the detection range to 1 at contact.
/// Repulsion also scales with steepness so flat ramps barely push back.
pub fn avoidance_force(direction: Vec3, hit: &RayHit, config: &MovementConfig) -> Vec3 {
    let closeness = 1.0 - hit.distance / config.obstacle_detection_range;
    let steepness = 1.0 - hit.normal.dot(Vec3::Y).clamp(0.0, 1.0);

    let move_force = direction * config.move_speed;
    let repulsion = -direction * closeness * config.repulsion_speed * steepness;
    let boost = Vec3::Y * config.hover_boost * closeness;

    move_force + repulsion + boost
}

/// Movement force for this tick, before force-mode scaling.
///
/// Zero input yields zero force and no obstacle probe.
pub fn movement_force(
    field: &HoverSampleField,
    oracle: &impl RaycastOracle,
    frame: &VehicleFrame,
    input: Vec2,
    config: &MovementConfig,
    exclude: Option<Entity>,
) -> Vec3 {
    if !config.enabled {
        return Vec3::ZERO;
    }

    let direction = move_direction(frame, input);
    let Ok(ray_direction) = Dir3::new(direction) else {
        return Vec3::ZERO;
    };

    if !config.obstacle_avoidance {
        return direction * config.move_speed;
    }

    let query = RayQuery {
        origin: field.direction_point_on_bounds(frame, direction),
        direction: ray_direction,
        max_distance: config.obstacle_detection_range,
        layers: config.obstacle_layers,
        exclude,
    };

    match oracle.cast_ray(&query) {
        Some(hit) => avoidance_force(direction, &hit, config),
        None => direction * config.move_speed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfig;
    use crate::detection::HoverLayers;
    use crate::sample::test_support::Void;
    use std::cell::Cell;

    const EPS: f32 = 1e-5;

    /// A wall with a fixed normal `distance` ahead of any ray; counts casts.
    struct Wall {
        distance: f32,
        normal: Vec3,
        casts: Cell<u32>,
    }

    impl Wall {
        fn new(distance: f32, normal: Vec3) -> Self {
            Self {
                distance,
                normal,
                casts: Cell::new(0),
            }
        }
    }

    impl RaycastOracle for Wall {
        fn cast_ray(&self, query: &RayQuery) -> Option<RayHit> {
            self.casts.set(self.casts.get() + 1);
            (self.distance <= query.max_distance).then(|| {
                RayHit::new(
                    self.distance,
                    query.origin + query.direction * self.distance,
                    self.normal,
                    None,
                )
            })
        }
    }

    fn field() -> HoverSampleField {
        HoverSampleField::new(&GridConfig {
            layers: HoverLayers::ALL,
            ..default()
        })
    }

    #[test]
    fn direction_follows_heading_on_horizontal_plane() {
        let frame = VehicleFrame::IDENTITY.with_rotation(Quat::from_rotation_x(-0.4));
        let dir = move_direction(&frame, Vec2::new(0.0, 1.0));
        assert!(dir.y.abs() < EPS);
        assert!((dir - Vec3::NEG_Z).length() < EPS);

        let dir = move_direction(&VehicleFrame::IDENTITY, Vec2::new(1.0, 0.0));
        assert!((dir - Vec3::X).length() < EPS);
    }

    #[test]
    fn diagonal_is_sum_of_axes() {
        let input = Vec2::new(1.0, 1.0).normalize();
        let dir = move_direction(&VehicleFrame::IDENTITY, input);
        assert!((dir.length() - 1.0).abs() < EPS);
    }

    #[test]
    fn free_path_applies_move_force() {
        let config = MovementConfig::default();
        let force = movement_force(
            &field(),
            &Void,
            &VehicleFrame::IDENTITY,
            Vec2::Y,
            &config,
            None,
        );
        assert!((force - Vec3::NEG_Z * config.move_speed).length() < EPS);
    }

    #[test]
    fn zero_input_skips_probe() {
        let wall = Wall::new(1.0, Vec3::Z);
        let force = movement_force(
            &field(),
            &wall,
            &VehicleFrame::IDENTITY,
            Vec2::ZERO,
            &MovementConfig::default(),
            None,
        );
        assert_eq!(force, Vec3::ZERO);
        assert_eq!(wall.casts.get(), 0);
    }

    #[test]
    fn disabled_movement_applies_nothing() {
        let config = MovementConfig {
            enabled: false,
            ..default()
        };
        let force = movement_force(&field(), &Void, &VehicleFrame::IDENTITY, Vec2::Y, &config, None);
        assert_eq!(force, Vec3::ZERO);
    }

    #[test]
    fn vertical_wall_repels_and_boosts() {
        let config = MovementConfig::default();
        // Facing a vertical wall at 2.5 of a 10 unit range: closeness 0.75.
        let wall = Wall::new(2.5, Vec3::Z);

        let force = movement_force(&field(), &wall, &VehicleFrame::IDENTITY, Vec2::Y, &config, None);

        let closeness = 0.75;
        let expected = Vec3::NEG_Z * config.move_speed
            + Vec3::Z * closeness * config.repulsion_speed
            + Vec3::Y * config.hover_boost * closeness;
        assert!((force - expected).length() < EPS);
        assert_eq!(wall.casts.get(), 1);
    }

    #[test]
    fn flat_ramp_only_boosts() {
        let config = MovementConfig::default();
        let ramp = Wall::new(5.0, Vec3::Y);

        let force = movement_force(&field(), &ramp, &VehicleFrame::IDENTITY, Vec2::Y, &config, None);

        let expected = Vec3::NEG_Z * config.move_speed + Vec3::Y * config.hover_boost * 0.5;
        assert!((force - expected).length() < EPS);
    }

    #[test]
    fn avoidance_disabled_skips_probe() {
        let config = MovementConfig {
            obstacle_avoidance: false,
            ..default()
        };
        let wall = Wall::new(1.0, Vec3::Z);
        let force = movement_force(&field(), &wall, &VehicleFrame::IDENTITY, Vec2::Y, &config, None);
        assert!((force - Vec3::NEG_Z * config.move_speed).length() < EPS);
        assert_eq!(wall.casts.get(), 0);
    }

    #[test]
    fn repulsion_scales_with_steepness() {
        let config = MovementConfig::default();
        let steep = RayHit::new(5.0, Vec3::ZERO, Vec3::Z, None);
        let gentle = RayHit::new(5.0, Vec3::ZERO, Vec3::new(0.0, 1.0, 1.0).normalize(), None);

        let steep_force = avoidance_force(Vec3::NEG_Z, &steep, &config);
        let gentle_force = avoidance_force(Vec3::NEG_Z, &gentle, &config);

        // Less push-back against the gentle slope means more net forward force.
        assert!(gentle_force.z < steep_force.z);
        assert_eq!(steep_force.y, gentle_force.y);
    }
}
