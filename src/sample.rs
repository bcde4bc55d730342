//! Single downward ground-distance sensor.

use bevy::prelude::*;

use crate::detection::{HoverLayers, RayQuery, RaycastOracle};
use crate::frame::VehicleFrame;

/// One ground-distance sensor at a fixed offset from the vehicle origin.
///
/// `distance` is `f32::INFINITY` whenever nothing was found in range. The hit
/// point and normal are only meaningful while the distance is finite; on a
/// miss the point is parked at the end of the ray so it can still be drawn.
#[derive(Reflect, Debug, Clone, PartialEq)]
pub struct HoverSamplePoint {
    serial: u32,
    local_offset: Vec3,
    layers: HoverLayers,
    distance: f32,
    hit_point: Vec3,
    hit_normal: Vec3,
}

impl HoverSamplePoint {
    pub(crate) fn new(serial: u32, local_offset: Vec3, layers: HoverLayers) -> Self {
        Self {
            serial,
            local_offset,
            layers,
            distance: f32::INFINITY,
            hit_point: local_offset,
            hit_normal: Vec3::Y,
        }
    }

    /// Identity assigned when the point was created. Survives reuse.
    pub fn serial(&self) -> u32 {
        self.serial
    }

    /// Offset from the vehicle origin in the vehicle frame.
    pub fn local_offset(&self) -> Vec3 {
        self.local_offset
    }

    /// Surfaces this point detects.
    pub fn layers(&self) -> HoverLayers {
        self.layers
    }

    /// Last measured ground distance, `f32::INFINITY` when nothing was hit.
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Whether the last recalculation found ground in range.
    pub fn is_grounded(&self) -> bool {
        self.distance.is_finite()
    }

    /// Last hit position, or the end of the ray on a miss.
    pub fn hit_point(&self) -> Vec3 {
        self.hit_point
    }

    /// Last hit surface normal. World up on a miss.
    pub fn hit_normal(&self) -> Vec3 {
        self.hit_normal
    }

    /// Current world-space position of the sensor.
    pub fn world_position(&self, frame: &VehicleFrame) -> Vec3 {
        frame.transform_point(self.local_offset)
    }

    pub(crate) fn place(&mut self, local_offset: Vec3, layers: HoverLayers) {
        self.local_offset = local_offset;
        self.layers = layers;
    }

    /// Cast straight down from the sensor and cache the result.
    ///
    /// Hits on `exclude` (the vehicle's own body) are ignored.
    pub fn recalculate(
        &mut self,
        oracle: &impl RaycastOracle,
        frame: &VehicleFrame,
        max_distance: f32,
        exclude: Option<Entity>,
    ) {
        let origin = self.world_position(frame);
        let query = RayQuery::downward(origin, max_distance, self.layers).excluding(exclude);

        match oracle.cast_ray(&query) {
            Some(hit) => {
                self.distance = hit.distance;
                self.hit_point = hit.point;
                self.hit_normal = hit.normal;
            }
            None => {
                self.distance = f32::INFINITY;
                self.hit_point = origin + Vec3::NEG_Y * max_distance;
                self.hit_normal = Vec3::Y;
            }
        }
    }
}
