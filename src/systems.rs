//! Controller systems.
//!
//! All controllers run in `FixedUpdate`. Systems that cast rays are
//! exclusive: the backend answers queries from `&World`, and the results are
//! written back once every query for that vehicle is done.

use bevy::prelude::*;

use crate::actuator::HoverActuator;
use crate::backend::{HoverPhysicsBackend, WorldRaycaster};
use crate::config::HoverControllerConfig;
use crate::error::HoverError;
use crate::field::HoverSampleField;
use crate::frame::VehicleFrame;
use crate::hover::{hover_contribution, BodyState, HoverSettings};
use crate::intent::HoverIntent;
use crate::look::look_torque;
use crate::movement::movement_force;
use crate::vehicle::{HoverBodyLink, HoverInert, HoverVehicle};

/// Walk from `vehicle` up the hierarchy to the first rigid body.
pub fn find_body<B: HoverPhysicsBackend>(world: &World, vehicle: Entity) -> Option<Entity> {
    let mut current = Some(vehicle);
    while let Some(entity) = current {
        if B::is_rigid_body(world, entity) {
            return Some(entity);
        }
        current = world.get::<ChildOf>(entity).map(|child_of| child_of.parent());
    }
    None
}

/// Link new vehicles to their rigid body, or disable them.
///
/// Runs every tick but only looks at vehicles that are neither linked nor
/// inert, so each fault is reported exactly once.
pub fn resolve_vehicles<B: HoverPhysicsBackend>(world: &mut World) {
    let pending: Vec<(Entity, HoverControllerConfig)> = world
        .query_filtered::<(Entity, &HoverControllerConfig), (
            With<HoverVehicle>,
            Without<HoverBodyLink>,
            Without<HoverInert>,
        )>()
        .iter(world)
        .map(|(entity, config)| (entity, *config))
        .collect();

    for (vehicle, config) in pending {
        match resolve_vehicle::<B>(world, vehicle, &config) {
            Ok(body) => {
                debug!("hover vehicle {vehicle} linked to body {body}");
                if world.get::<HoverActuator>(body).is_none() {
                    world.entity_mut(body).insert(HoverActuator::default());
                }
                B::set_center_of_mass(world, body, Vec3::ZERO);
                world.entity_mut(vehicle).insert(HoverBodyLink { body });
            }
            Err(reason) => {
                error!("{reason}");
                world.entity_mut(vehicle).insert(HoverInert { reason });
            }
        }
    }
}

fn resolve_vehicle<B: HoverPhysicsBackend>(
    world: &World,
    vehicle: Entity,
    config: &HoverControllerConfig,
) -> Result<Entity, HoverError> {
    config
        .validate()
        .map_err(|source| HoverError::InvalidConfig { vehicle, source })?;
    find_body::<B>(world, vehicle).ok_or(HoverError::MissingBody { vehicle })
}

/// Regenerate sample fields whose grid settings changed.
///
/// Compares the generated layout every tick, so edits made through
/// reflection or the inspector are picked up as well.
pub fn sync_sample_fields(
    mut q: Query<(Entity, &HoverControllerConfig, &mut HoverSampleField), With<HoverBodyLink>>,
) {
    for (entity, config, mut field) in &mut q {
        if field.needs_regeneration(&config.grid) {
            if let Err(err) = config.grid.validate() {
                warn!("hover vehicle {entity}: {err}; regenerating with clamped divisions");
            }
            field.sync(&config.grid);
            debug!(
                "hover vehicle {entity}: sample grid regenerated to {}x{}",
                field.columns(),
                field.rows()
            );
        }
    }
}

/// Recalculate every sample point and select the best one.
pub fn evaluate_sample_fields<B: HoverPhysicsBackend>(world: &mut World) {
    for (vehicle, body, frame, range) in linked_vehicles(world, |config| {
        config.hover.sensor_range()
    }) {
        let Some(mut slot) = world.get_mut::<HoverSampleField>(vehicle) else {
            continue;
        };
        let mut field = std::mem::take(&mut *slot);

        field.find_best(
            &WorldRaycaster::<B>::new(world),
            &frame,
            range,
            Some(body),
        );

        if let Some(mut slot) = world.get_mut::<HoverSampleField>(vehicle) {
            *slot = field;
        }
    }
}

/// Hover thrust and leveling torque.
pub fn apply_hover_forces<B: HoverPhysicsBackend>(world: &mut World) {
    for (vehicle, body, frame, config) in linked_vehicles(world, |config| *config) {
        let Some(field) = world.get::<HoverSampleField>(vehicle) else {
            continue;
        };
        let state = BodyState {
            frame,
            mass: B::get_mass(world, body),
            body: Some(body),
        };
        let settings = HoverSettings {
            hover: &config.hover,
            stabilization: &config.stabilization,
            layers: config.grid.layers,
            force_mode: config.force_mode,
        };

        let out = hover_contribution(field, &WorldRaycaster::<B>::new(world), &state, settings);

        B::apply_force(world, body, out.force);
        B::apply_torque(world, body, out.torque);
    }
}

/// Horizontal thrust toward the movement intent, with obstacle avoidance.
pub fn apply_movement_forces<B: HoverPhysicsBackend>(world: &mut World) {
    for (vehicle, body, frame, config) in linked_vehicles(world, |config| *config) {
        let Some(intent) = world.get::<HoverIntent>(vehicle) else {
            continue;
        };
        let Some(field) = world.get::<HoverSampleField>(vehicle) else {
            continue;
        };

        let force = movement_force(
            field,
            &WorldRaycaster::<B>::new(world),
            &frame,
            intent.movement,
            &config.movement,
            Some(body),
        );
        if force == Vec3::ZERO {
            continue;
        }

        let force = config.force_mode.scale(force, B::get_mass(world, body));
        B::apply_force(world, body, force);
    }
}

/// Turn torque from the turn intent.
pub fn apply_look_torque<B: HoverPhysicsBackend>(world: &mut World) {
    for (vehicle, body, frame, config) in linked_vehicles(world, |config| *config) {
        let Some(intent) = world.get::<HoverIntent>(vehicle) else {
            continue;
        };

        let torque = look_torque(&frame, intent.turn, &config.look);
        if torque == Vec3::ZERO {
            continue;
        }

        let torque = config.force_mode.scale(torque, B::get_mass(world, body));
        B::apply_torque(world, body, torque);
    }
}

/// Snapshot of every linked vehicle, with `extract` applied to its config.
fn linked_vehicles<T>(
    world: &mut World,
    extract: impl Fn(&HoverControllerConfig) -> T,
) -> Vec<(Entity, Entity, VehicleFrame, T)> {
    world
        .query_filtered::<(
            Entity,
            &HoverBodyLink,
            &GlobalTransform,
            &HoverControllerConfig,
        ), (With<HoverVehicle>, Without<HoverInert>)>()
        .iter(world)
        .map(|(entity, link, transform, config)| {
            (entity, link.body, VehicleFrame::from(transform), extract(config))
        })
        .collect()
}
