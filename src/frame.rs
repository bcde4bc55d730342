//! Rigid vehicle pose used by the pure controller math.

use bevy::prelude::*;

/// Position and orientation of a vehicle, without scale.
///
/// Local axes follow Bevy conventions: forward is `-Z`, right is `+X`,
/// up is `+Y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleFrame {
    /// World-space origin.
    pub translation: Vec3,
    /// World-space orientation.
    pub rotation: Quat,
}

impl VehicleFrame {
    /// Identity frame at the world origin.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// Unrotated frame at `(x, y, z)`.
    pub fn from_xyz(x: f32, y: f32, z: f32) -> Self {
        Self {
            translation: Vec3::new(x, y, z),
            rotation: Quat::IDENTITY,
        }
    }

    /// Replace the orientation.
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Map a vehicle-local point to world space.
    pub fn transform_point(&self, local: Vec3) -> Vec3 {
        self.translation + self.rotation * local
    }

    /// Map a world direction into the vehicle frame.
    pub fn inverse_transform_direction(&self, direction: Vec3) -> Vec3 {
        self.rotation.inverse() * direction
    }

    /// Vehicle up axis in world space.
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// Vehicle forward axis in world space.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// Vehicle right axis in world space.
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }
}

impl Default for VehicleFrame {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<&GlobalTransform> for VehicleFrame {
    fn from(transform: &GlobalTransform) -> Self {
        let (_, rotation, translation) = transform.to_scale_rotation_translation();
        Self {
            translation,
            rotation,
        }
    }
}

impl From<&Transform> for VehicleFrame {
    fn from(transform: &Transform) -> Self {
        Self {
            translation: transform.translation,
            rotation: transform.rotation,
        }
    }
}
