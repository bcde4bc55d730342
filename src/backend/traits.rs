//! Physics backend abstraction.
//!
//! This module defines the trait that physics backends must implement to
//! drive a hover vehicle. The controller only needs to cast rays, read a
//! body's mass, reset its center of mass once, and hand over accumulated
//! forces; everything else stays in the physics engine.

use std::marker::PhantomData;

use bevy::prelude::*;

use crate::actuator::HoverActuator;
use crate::detection::{RayHit, RayQuery, RaycastOracle};

/// Trait for physics backend implementations.
///
/// Implement this trait to integrate a physics engine with the hover
/// controller. The backend's [`plugin`](Self::plugin) is responsible for
/// calling [`HoverActuator::prepare_new_frame`] in
/// [`HoverControllerSet::Preparation`](crate::HoverControllerSet::Preparation)
/// and [`HoverActuator::finalize_frame`] in
/// [`HoverControllerSet::FinalApplication`](crate::HoverControllerSet::FinalApplication),
/// applying the returned totals to its bodies.
///
/// # Example
///
/// See the `avian` module's `Avian3dBackend` (feature `avian3d`).
pub trait HoverPhysicsBackend: 'static + Send + Sync {
    /// Returns the plugin that sets up this backend.
    fn plugin() -> impl Plugin;

    /// Whether `entity` is a rigid body forces can be applied to.
    fn is_rigid_body(world: &World, entity: Entity) -> bool;

    /// Get the mass of a body.
    ///
    /// Returns 0 when the mass is unknown; callers treat that as 1.
    fn get_mass(world: &World, entity: Entity) -> f32;

    /// Move a body's center of mass to `local` (body frame).
    ///
    /// Called once when a vehicle is linked to its body.
    fn set_center_of_mass(world: &mut World, entity: Entity, local: Vec3);

    /// Nearest hit along `query`, honouring its layers and excluded body.
    fn cast_ray(world: &World, query: &RayQuery) -> Option<RayHit>;

    /// Apply a force to a body.
    ///
    /// Accumulates into the body's [`HoverActuator`]; the backend applies the
    /// total at the end of the tick.
    fn apply_force(world: &mut World, entity: Entity, force: Vec3) {
        if let Some(mut actuator) = world.get_mut::<HoverActuator>(entity) {
            actuator.add_force(force);
        }
    }

    /// Apply a torque to a body.
    ///
    /// Accumulates into the body's [`HoverActuator`]; the backend applies the
    /// total at the end of the tick.
    fn apply_torque(world: &mut World, entity: Entity, torque: Vec3) {
        if let Some(mut actuator) = world.get_mut::<HoverActuator>(entity) {
            actuator.add_torque(torque);
        }
    }
}

/// [`RaycastOracle`] answering through a backend against a world snapshot.
pub struct WorldRaycaster<'w, B: HoverPhysicsBackend> {
    world: &'w World,
    _backend: PhantomData<B>,
}

impl<'w, B: HoverPhysicsBackend> WorldRaycaster<'w, B> {
    /// Borrow `world` for ray casts.
    pub fn new(world: &'w World) -> Self {
        Self {
            world,
            _backend: PhantomData,
        }
    }
}

impl<B: HoverPhysicsBackend> RaycastOracle for WorldRaycaster<'_, B> {
    fn cast_ray(&self, query: &RayQuery) -> Option<RayHit> {
        B::cast_ray(self.world, query)
    }
}
