//! Movement and turn intent components.
//!
//! Intents carry the desired direction from player input or AI. The
//! controller systems read them every fixed tick; nothing here polls input.

use bevy::prelude::*;

/// Desired movement and turn direction for a hover vehicle.
///
/// Both vectors are normalized on write, so any non-zero input means full
/// thrust in that direction.
///
/// Intents are never consumed by the controller: a movement or turn input
/// keeps acting every fixed tick until it is written again. Callers that feed
/// per-frame input should write zero (or call [`clear`](Self::clear)) when the
/// input is released.
///
/// # Example
///
/// ```rust
/// use bevy::prelude::*;
/// use hovercraft_controller::prelude::*;
///
/// let mut intent = HoverIntent::new();
/// intent.set_move(Vec2::new(0.0, 0.3));
/// assert!(intent.is_moving());
/// assert!((intent.movement - Vec2::Y).length() < 1e-6);
///
/// intent.set_turn(Vec2::new(-2.0, 0.0));
/// assert_eq!(intent.turn, Vec2::NEG_X);
///
/// intent.clear();
/// assert!(!intent.is_moving());
/// assert!(!intent.is_turning());
/// ```
#[derive(Component, Reflect, Debug, Clone, Copy, Default, PartialEq)]
#[reflect(Component)]
pub struct HoverIntent {
    /// Move direction: `x` = right, `y` = forward.
    pub movement: Vec2,
    /// Turn direction: `x` = yaw right, `y` = pitch up.
    pub turn: Vec2,
}

impl HoverIntent {
    /// Create a new empty intent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the move direction. Normalized; zero stays zero.
    pub fn set_move(&mut self, direction: Vec2) {
        self.movement = direction.normalize_or_zero();
    }

    /// Set the turn direction. Normalized; zero stays zero.
    pub fn set_turn(&mut self, direction: Vec2) {
        self.turn = direction.normalize_or_zero();
    }

    /// Clear both intents.
    pub fn clear(&mut self) {
        self.movement = Vec2::ZERO;
        self.turn = Vec2::ZERO;
    }

    /// Check if there is active move input.
    pub fn is_moving(&self) -> bool {
        self.movement.length_squared() > 1e-6
    }

    /// Check if there is active turn input.
    pub fn is_turning(&self) -> bool {
        self.turn.length_squared() > 1e-6
    }
}
