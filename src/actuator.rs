//! Per-body force accumulation.
//!
//! Hover, movement and look controllers never touch the physics body
//! directly. They add into a [`HoverActuator`] on the body, and the backend
//! applies the total once at the end of the tick. Several vehicles may share
//! one body; their contributions simply add up.

use bevy::prelude::*;

/// Force and torque accumulated for one rigid body this tick.
///
/// The backend calls [`prepare_new_frame`](Self::prepare_new_frame) before
/// any controller runs and [`finalize_frame`](Self::finalize_frame) after all
/// of them; the pair lets a backend that uses persistent forces remove last
/// tick's contribution without disturbing forces it does not own.
#[derive(Component, Reflect, Debug, Clone, Copy, Default, PartialEq)]
#[reflect(Component)]
pub struct HoverActuator {
    force: Vec3,
    torque: Vec3,
    applied_force: Vec3,
    applied_torque: Vec3,
}

impl HoverActuator {
    /// Add a force for this tick.
    pub fn add_force(&mut self, force: Vec3) {
        self.force += force;
    }

    /// Add a torque for this tick.
    pub fn add_torque(&mut self, torque: Vec3) {
        self.torque += torque;
    }

    /// Force accumulated so far this tick.
    pub fn accumulated_force(&self) -> Vec3 {
        self.force
    }

    /// Torque accumulated so far this tick.
    pub fn accumulated_torque(&self) -> Vec3 {
        self.torque
    }

    /// Force handed to the physics body at the end of the last tick.
    pub fn applied_force(&self) -> Vec3 {
        self.applied_force
    }

    /// Torque handed to the physics body at the end of the last tick.
    pub fn applied_torque(&self) -> Vec3 {
        self.applied_torque
    }

    /// Start a tick: clear the accumulators and return what was applied last
    /// tick so it can be subtracted.
    pub fn prepare_new_frame(&mut self) -> (Vec3, Vec3) {
        self.force = Vec3::ZERO;
        self.torque = Vec3::ZERO;
        (self.applied_force, self.applied_torque)
    }

    /// End a tick: record and return the totals to apply.
    pub fn finalize_frame(&mut self) -> (Vec3, Vec3) {
        self.applied_force = self.force;
        self.applied_torque = self.torque;
        (self.force, self.torque)
    }
}
