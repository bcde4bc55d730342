//! Avian3D physics backend implementation.
//!
//! This module provides the physics backend for Avian3D. Enable with the
//! `avian3d` feature.

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::actuator::HoverActuator;
use crate::backend::HoverPhysicsBackend;
use crate::detection::{nearest_hit, RayHit, RayQuery};
use crate::HoverControllerSet;

/// Avian3D physics backend for the hover controller.
///
/// Ground and obstacle rays go through the [`SpatialQueryPipeline`]
/// resource. Accumulated forces are written into [`ConstantForce`] and
/// [`ConstantTorque`], so they are integrated by Avian's physics step.
pub struct Avian3dBackend;

impl HoverPhysicsBackend for Avian3dBackend {
    fn plugin() -> impl Plugin {
        Avian3dBackendPlugin
    }

    fn is_rigid_body(world: &World, entity: Entity) -> bool {
        world.get::<RigidBody>(entity).is_some()
    }

    fn get_mass(world: &World, entity: Entity) -> f32 {
        let Some(computed_mass) = world.get::<ComputedMass>(entity) else {
            return 0.0;
        };
        let mass = computed_mass.value();
        if mass <= 0.0 || !mass.is_finite() {
            return 0.0;
        }
        mass
    }

    fn set_center_of_mass(world: &mut World, entity: Entity, local: Vec3) {
        if let Ok(mut body) = world.get_entity_mut(entity) {
            body.insert(CenterOfMass(local));
        }
    }

    fn cast_ray(world: &World, query: &RayQuery) -> Option<RayHit> {
        let pipeline = world.get_resource::<SpatialQueryPipeline>()?;

        let mut filter = SpatialQueryFilter::from_mask(LayerMask(query.layers.0));
        if let Some(body) = query.exclude {
            filter = filter.with_excluded_entities([body]);
        }

        // Colliders can be children of the excluded body, so every hit is
        // mapped back to its body before the nearest one is picked.
        let hits = pipeline
            .ray_hits(
                query.origin,
                query.direction,
                query.max_distance,
                u32::MAX,
                true,
                &filter,
            )
            .into_iter()
            .map(|hit| {
                let body = world
                    .get::<ColliderOf>(hit.entity)
                    .map(|collider_of| collider_of.body)
                    .unwrap_or(hit.entity);
                RayHit::new(
                    hit.distance,
                    query.origin + query.direction * hit.distance,
                    hit.normal,
                    Some(body),
                )
            });

        nearest_hit(hits, query.exclude)
    }
}

/// Plugin that sets up Avian3D-specific systems for the hover controller.
pub struct Avian3dBackendPlugin;

impl Plugin for Avian3dBackendPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            clear_actuator_forces.in_set(HoverControllerSet::Preparation),
        );
        app.add_systems(
            FixedUpdate,
            apply_actuator_forces.in_set(HoverControllerSet::FinalApplication),
        );
    }
}

/// Remove last tick's hover forces and reset the accumulators.
///
/// Only the share this controller added is subtracted, so user forces on
/// the same [`ConstantForce`] survive.
pub fn clear_actuator_forces(
    mut q: Query<(
        &mut HoverActuator,
        Option<&mut ConstantForce>,
        Option<&mut ConstantTorque>,
    )>,
) {
    for (mut actuator, constant_force, constant_torque) in &mut q {
        let (force_to_subtract, torque_to_subtract) = actuator.prepare_new_frame();

        if let Some(mut force) = constant_force {
            force.0 -= force_to_subtract;
        }
        if let Some(mut torque) = constant_torque {
            torque.0 -= torque_to_subtract;
        }
    }
}

/// Hand the accumulated totals to Avian.
///
/// Bodies without [`ConstantForce`] or [`ConstantTorque`] get them inserted
/// with this tick's totals.
pub fn apply_actuator_forces(
    mut commands: Commands,
    mut q: Query<(
        Entity,
        &mut HoverActuator,
        Option<&mut ConstantForce>,
        Option<&mut ConstantTorque>,
    )>,
) {
    for (entity, mut actuator, constant_force, constant_torque) in &mut q {
        let (force_to_apply, torque_to_apply) = actuator.finalize_frame();

        match constant_force {
            Some(mut force) => force.0 += force_to_apply,
            None => {
                commands.entity(entity).insert(ConstantForce(force_to_apply));
            }
        }
        match constant_torque {
            Some(mut torque) => torque.0 += torque_to_apply,
            None => {
                commands.entity(entity).insert(ConstantTorque(torque_to_apply));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HoverControllerPlugin;
    use crate::vehicle::{HoverBodyLink, HoverVehicle};

    fn create_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(bevy::transform::TransformPlugin);
        // Insert SceneSpawner resource required by Avian's ColliderHierarchyPlugin
        app.insert_resource(bevy::scene::SceneSpawner::default());
        // Register the mesh assets and messages read by Avian's 3D collider backend
        app.add_message::<AssetEvent<Mesh>>();
        app.init_resource::<Assets<Mesh>>();
        app.add_plugins(PhysicsPlugins::default());
        app.add_plugins(HoverControllerPlugin::<Avian3dBackend>::default());
        app.insert_resource(Time::<Fixed>::from_hz(60.0));
        app.insert_resource(bevy::time::TimeUpdateStrategy::ManualDuration(
            std::time::Duration::from_secs_f64(1.0 / 60.0),
        ));
        app.finish();
        app.cleanup();
        app
    }

    fn tick(app: &mut App) {
        let timestep = std::time::Duration::from_secs_f64(1.0 / 60.0);
        app.world_mut()
            .resource_mut::<Time<Virtual>>()
            .advance_by(timestep);
        app.update();
    }

    #[test]
    fn rigid_body_detection() {
        let mut app = create_test_app();
        let body = app.world_mut().spawn(RigidBody::Dynamic).id();
        let plain = app.world_mut().spawn(Transform::default()).id();

        assert!(Avian3dBackend::is_rigid_body(app.world(), body));
        assert!(!Avian3dBackend::is_rigid_body(app.world(), plain));
    }

    #[test]
    fn mass_of_non_body_is_zero() {
        let mut app = create_test_app();
        let plain = app.world_mut().spawn(Transform::default()).id();
        assert_eq!(Avian3dBackend::get_mass(app.world(), plain), 0.0);
    }

    #[test]
    fn forces_accumulate_on_actuator() {
        let mut app = create_test_app();
        let body = app.world_mut().spawn(HoverActuator::default()).id();

        Avian3dBackend::apply_force(app.world_mut(), body, Vec3::Y);
        Avian3dBackend::apply_force(app.world_mut(), body, Vec3::X);
        Avian3dBackend::apply_torque(app.world_mut(), body, Vec3::Z);

        let actuator = app.world().get::<HoverActuator>(body).unwrap();
        assert_eq!(actuator.accumulated_force(), Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(actuator.accumulated_torque(), Vec3::Z);
    }

    #[test]
    fn vehicle_links_and_gets_constant_force() {
        let mut app = create_test_app();

        let vehicle = app
            .world_mut()
            .spawn((
                HoverVehicle,
                RigidBody::Dynamic,
                Collider::cuboid(2.0, 0.5, 2.0),
                Transform::from_xyz(0.0, 3.0, 0.0),
            ))
            .id();

        for _ in 0..3 {
            tick(&mut app);
        }

        let link = app.world().get::<HoverBodyLink>(vehicle).unwrap();
        assert_eq!(link.body, vehicle);
        assert!(app.world().get::<HoverActuator>(vehicle).is_some());
        assert!(app.world().get::<ConstantForce>(vehicle).is_some());
        assert!(app.world().get::<ConstantTorque>(vehicle).is_some());
        assert_eq!(
            app.world().get::<CenterOfMass>(vehicle).map(|c| c.0),
            Some(Vec3::ZERO)
        );
    }
}
