//! Gizmo visualization of sample fields.
//!
//! Drawing is fed by the field's [`SampleObserver`] hook after selection; the
//! sampling code itself knows nothing about gizmos. Add [`HoverDebugPlugin`]
//! next to `DefaultPlugins` (it needs Bevy's gizmo plugin).

use bevy::prelude::*;

use crate::field::HoverSampleField;
use crate::frame::VehicleFrame;
use crate::sample::HoverSamplePoint;
use crate::vehicle::HoverVehicle;

/// Opt a single vehicle into gizmo drawing.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct HoverGizmos;

/// Colors and switches for sample field gizmos.
#[derive(Resource, Reflect, Debug, Clone, Copy)]
#[reflect(Resource)]
pub struct HoverGizmoConfig {
    /// Draw every vehicle, not only those marked with [`HoverGizmos`].
    pub always_render: bool,
    /// Draw the cell boxes around each point.
    pub draw_cells: bool,
    /// Ray from point to hit.
    pub ray_color: Color,
    /// Hit marker of the best point, when it found ground.
    pub best_color: Color,
    /// Hit marker of other grounded points.
    pub grounded_color: Color,
    /// Marker at the fallback position of points that hit nothing.
    pub miss_color: Color,
    /// Cell box outline.
    pub cell_color: Color,
    /// Hit marker radius.
    pub marker_radius: f32,
    /// Cell boxes are drawn at this fraction of the cell bounds.
    pub cell_scale: f32,
}

impl Default for HoverGizmoConfig {
    fn default() -> Self {
        Self {
            always_render: false,
            draw_cells: true,
            ray_color: Color::WHITE,
            best_color: Color::srgb(0.0, 1.0, 0.0),
            grounded_color: Color::srgb(1.0, 0.92, 0.016),
            miss_color: Color::WHITE,
            cell_color: Color::srgba(0.0, 1.0, 1.0, 0.5),
            marker_radius: 1.0,
            cell_scale: 0.95,
        }
    }
}

/// What to draw for one sample point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleMarker {
    /// Cell of the point.
    pub cell: UVec2,
    /// World position of the point.
    pub origin: Vec3,
    /// Hit position, or the fallback below the point on a miss.
    pub hit: Vec3,
    /// Color of the hit marker.
    pub marker_color: Color,
    /// Cell box placement; its scale is the box size.
    pub cell_box: Transform,
}

/// Markers for every point of `field`, in scan order.
pub fn sample_markers(
    field: &HoverSampleField,
    frame: &VehicleFrame,
    config: &HoverGizmoConfig,
) -> Vec<SampleMarker> {
    let cell_size = field.cell_bounds() * config.cell_scale;
    let mut markers = Vec::with_capacity(field.len());

    field.notify(&mut |cell: UVec2, point: &HoverSamplePoint, is_best: bool| {
        let origin = point.world_position(frame);
        let marker_color = if is_best && point.is_grounded() {
            config.best_color
        } else if point.is_grounded() {
            config.grounded_color
        } else {
            config.miss_color
        };

        markers.push(SampleMarker {
            cell,
            origin,
            hit: point.hit_point(),
            marker_color,
            cell_box: Transform {
                translation: origin,
                rotation: frame.rotation,
                scale: cell_size,
            },
        });
    });

    markers
}

/// Plugin drawing sample fields with gizmos.
pub struct HoverDebugPlugin;

impl Plugin for HoverDebugPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<HoverGizmos>();
        app.register_type::<HoverGizmoConfig>();
        app.init_resource::<HoverGizmoConfig>();
        app.add_systems(Update, draw_sample_fields);
    }
}

fn draw_sample_fields(
    config: Res<HoverGizmoConfig>,
    q: Query<(&HoverSampleField, &GlobalTransform, Has<HoverGizmos>), With<HoverVehicle>>,
    mut gizmos: Gizmos,
) {
    for (field, transform, opted_in) in &q {
        if !(config.always_render || opted_in) {
            continue;
        }

        let frame = VehicleFrame::from(transform);
        for marker in sample_markers(field, &frame, &config) {
            gizmos.line(marker.origin, marker.hit, config.ray_color);
            gizmos.sphere(
                Isometry3d::from_translation(marker.hit),
                config.marker_radius,
                marker.marker_color,
            );
            if config.draw_cells {
                gizmos.cuboid(marker.cell_box, config.cell_color);
            }
        }
    }
}
