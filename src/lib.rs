//! # Hovercraft Controller
//!
//! A grid-sampled hover controller for Bevy.
//!
//! A hover vehicle probes the ground with a grid of downward rays spread over
//! its footprint, keeps the point closest to the ground as its height
//! reference, and pushes up proportionally to how far below the target height
//! that point is. On top of the hover thrust it provides:
//!
//! - **Leveling** torque about the roll and pitch axes
//! - **Movement** thrust with obstacle avoidance (repel and climb)
//! - **Look** torque for yaw and pitch input
//!
//! Forces are accumulated per tick and handed to a physics backend through
//! [`HoverPhysicsBackend`](backend::HoverPhysicsBackend). An Avian3D backend
//! ships behind the `avian3d` feature.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use bevy::prelude::*;
//! use hovercraft_controller::prelude::*;
//! use hovercraft_controller::avian::Avian3dBackend;
//!
//! App::new()
//!     .add_plugins(HoverControllerPlugin::<Avian3dBackend>::default())
//!     .add_systems(Startup, |mut commands: Commands| {
//!         commands.spawn((
//!             HoverVehicle,
//!             HoverControllerConfig::default(),
//!             RigidBody::Dynamic,
//!             Collider::cuboid(10.0, 1.0, 10.0),
//!             Transform::from_xyz(0.0, 3.0, 0.0),
//!         ));
//!     });
//! ```
//!
//! Drive it by writing to [`HoverIntent`](intent::HoverIntent) from input or AI.

use std::marker::PhantomData;

use bevy::prelude::*;

pub mod actuator;
pub mod backend;
pub mod config;
pub mod debug;
pub mod detection;
pub mod error;
pub mod field;
pub mod frame;
pub mod hover;
pub mod intent;
pub mod look;
pub mod movement;
pub mod sample;
pub mod systems;
pub mod vehicle;

#[cfg(feature = "avian3d")]
pub mod avian;

use backend::HoverPhysicsBackend;

/// Commonly used types.
pub mod prelude {
    pub use crate::actuator::HoverActuator;
    pub use crate::backend::HoverPhysicsBackend;
    pub use crate::config::{
        ForceMode, GridConfig, HoverConfig, HoverControllerConfig, LookConfig, MovementConfig,
        StabilizationConfig, StabilizationReference, StabilizeAxes,
    };
    pub use crate::debug::{HoverDebugPlugin, HoverGizmoConfig, HoverGizmos};
    pub use crate::detection::{HoverLayers, RayHit, RayQuery, RaycastOracle};
    pub use crate::error::{ConfigError, HoverError};
    pub use crate::field::{HoverSampleField, SampleObserver};
    pub use crate::frame::VehicleFrame;
    pub use crate::intent::HoverIntent;
    pub use crate::sample::HoverSamplePoint;
    pub use crate::vehicle::{HoverBodyLink, HoverInert, HoverVehicle};
    pub use crate::{HoverControllerPlugin, HoverControllerSet};
}

/// System sets for the hover controller.
///
/// All sets run in `FixedUpdate`, chained in declaration order:
///
/// 1. **Preparation**: link new vehicles, clear last tick's forces
/// 2. **Sensors**: regenerate changed grids, sample the ground
/// 3. **Forces**: hover, movement and look contributions
/// 4. **FinalApplication**: the backend applies the accumulated totals
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum HoverControllerSet {
    /// Vehicle resolution and force clearing.
    Preparation,
    /// Ground sampling. Every field is fully evaluated here.
    Sensors,
    /// Controller outputs accumulate into actuators.
    Forces,
    /// Accumulated forces reach the physics engine.
    FinalApplication,
}

/// Main plugin for the hover controller.
///
/// Generic over the physics backend `B`, whose own plugin is added too.
pub struct HoverControllerPlugin<B: HoverPhysicsBackend> {
    _marker: PhantomData<B>,
}

impl<B: HoverPhysicsBackend> Default for HoverControllerPlugin<B> {
    fn default() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<B: HoverPhysicsBackend> Plugin for HoverControllerPlugin<B> {
    fn build(&self, app: &mut App) {
        app.register_type::<vehicle::HoverVehicle>();
        app.register_type::<vehicle::HoverBodyLink>();
        app.register_type::<config::HoverControllerConfig>();
        app.register_type::<field::HoverSampleField>();
        app.register_type::<intent::HoverIntent>();
        app.register_type::<actuator::HoverActuator>();

        app.configure_sets(
            FixedUpdate,
            (
                HoverControllerSet::Preparation,
                HoverControllerSet::Sensors,
                HoverControllerSet::Forces,
                HoverControllerSet::FinalApplication,
            )
                .chain(),
        );

        app.add_plugins(B::plugin());

        app.add_systems(
            FixedUpdate,
            systems::resolve_vehicles::<B>.in_set(HoverControllerSet::Preparation),
        );
        app.add_systems(
            FixedUpdate,
            (
                systems::sync_sample_fields,
                systems::evaluate_sample_fields::<B>,
            )
                .chain()
                .in_set(HoverControllerSet::Sensors),
        );
        app.add_systems(
            FixedUpdate,
            (
                systems::apply_hover_forces::<B>,
                systems::apply_movement_forces::<B>,
                systems::apply_look_torque::<B>,
            )
                .chain()
                .in_set(HoverControllerSet::Forces),
        );
    }
}
