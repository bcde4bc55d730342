//! Integration tests for the hover controller with the Avian3D backend.
//!
//! These run the real physics step, so assertions are about ranges the body
//! stays within rather than exact forces.

#![cfg(feature = "avian3d")]

use avian3d::prelude::*;
use bevy::prelude::*;
use hovercraft_controller::avian::Avian3dBackend;
use hovercraft_controller::prelude::*;

const FIXED_UPDATE_HZ: f64 = 60.0;

/// Create a minimal test app with physics and the hover controller.
fn create_test_app() -> App {
    let mut app = App::new();

    app.add_plugins(MinimalPlugins);
    app.add_plugins(TransformPlugin);
    // Insert SceneSpawner resource to satisfy Avian's ColliderHierarchyPlugin
    app.insert_resource(bevy::scene::SceneSpawner::default());
    // Register the mesh assets and messages read by Avian's 3D collider backend
    app.add_message::<AssetEvent<Mesh>>();
    app.init_resource::<Assets<Mesh>>();
    app.add_plugins(PhysicsPlugins::default());
    app.add_plugins(HoverControllerPlugin::<Avian3dBackend>::default());
    app.insert_resource(Time::<Fixed>::from_hz(FIXED_UPDATE_HZ));
    app.insert_resource(bevy::time::TimeUpdateStrategy::ManualDuration(
        std::time::Duration::from_secs_f64(1.0 / FIXED_UPDATE_HZ),
    ));

    app.finish();
    app.cleanup();
    app
}

/// Spawn a static ground slab whose top face is at `y = 0`.
fn spawn_ground(app: &mut App) -> Entity {
    let transform = Transform::from_xyz(0.0, -0.5, 0.0);
    app.world_mut()
        .spawn((
            transform,
            GlobalTransform::from(transform),
            RigidBody::Static,
            Collider::cuboid(200.0, 1.0, 200.0),
        ))
        .id()
}

/// Spawn a hover vehicle with a dynamic body.
fn spawn_vehicle(app: &mut App, position: Vec3, config: HoverControllerConfig) -> Entity {
    let transform = Transform::from_translation(position);
    app.world_mut()
        .spawn((
            HoverVehicle,
            config,
            transform,
            GlobalTransform::from(transform),
            RigidBody::Dynamic,
            Collider::cuboid(2.0, 0.5, 2.0),
            LockedAxes::ROTATION_LOCKED,
        ))
        .id()
}

/// Advance time by one fixed timestep and run one update.
fn tick(app: &mut App) {
    let timestep = std::time::Duration::from_secs_f64(1.0 / FIXED_UPDATE_HZ);
    app.world_mut()
        .resource_mut::<Time<Virtual>>()
        .advance_by(timestep);
    app.update();
}

fn height(app: &App, entity: Entity) -> f32 {
    app.world()
        .get::<Transform>(entity)
        .map(|t| t.translation.y)
        .unwrap_or(f32::NAN)
}

#[test]
fn vehicle_lifts_off_the_ground() {
    let mut app = create_test_app();
    spawn_ground(&mut app);
    let vehicle = spawn_vehicle(
        &mut app,
        Vec3::new(0.0, 1.0, 0.0),
        HoverControllerConfig::default(),
    );

    let mut max_height = f32::MIN;
    let mut min_height = f32::MAX;
    for _ in 0..120 {
        tick(&mut app);
        let y = height(&app, vehicle);
        max_height = max_height.max(y);
        min_height = min_height.min(y);
    }

    assert!(app.world().get::<HoverBodyLink>(vehicle).is_some());
    // Thrust at 1 unit is well above gravity, so the vehicle climbs.
    assert!(max_height > 1.5, "vehicle never climbed: max {max_height}");
    assert!(min_height > 0.0, "vehicle sank into the ground: min {min_height}");
}

#[test]
fn own_collider_is_not_ground() {
    let mut app = create_test_app();
    spawn_ground(&mut app);
    let vehicle = spawn_vehicle(
        &mut app,
        Vec3::new(0.0, 2.0, 0.0),
        HoverControllerConfig::default(),
    );

    for _ in 0..5 {
        tick(&mut app);
    }

    // Sample points sit inside the vehicle's own collider; the hit must be
    // the ground below, not the body itself.
    let field = app.world().get::<HoverSampleField>(vehicle).unwrap();
    let best = field.best().unwrap();
    assert!(best.is_grounded());
    assert!(best.distance() > 1.0, "hit own collider at {}", best.distance());
}

#[test]
fn vehicle_without_body_is_inert() {
    let mut app = create_test_app();
    let vehicle = app
        .world_mut()
        .spawn((HoverVehicle, Transform::from_xyz(0.0, 2.0, 0.0)))
        .id();

    for _ in 0..3 {
        tick(&mut app);
    }

    assert!(app.world().get::<HoverInert>(vehicle).is_some());
    assert!(app.world().get::<HoverActuator>(vehicle).is_none());
}
