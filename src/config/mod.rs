//! Controller configuration.
//!
//! Each concern has its own config struct with documented defaults. They are
//! aggregated in [`HoverControllerConfig`], the component placed on a vehicle.

mod grid;
mod hover;
mod look;
mod movement;
mod stabilization;

pub use grid::{GridConfig, MAX_DIVISIONS};
pub use hover::HoverConfig;
pub use look::LookConfig;
pub use movement::MovementConfig;
pub use stabilization::{StabilizationConfig, StabilizationReference, StabilizeAxes};

use bevy::prelude::*;

use crate::error::ConfigError;

/// How controller outputs reach the rigid body.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForceMode {
    /// Outputs are accelerations; they are multiplied by body mass before
    /// being applied, so the response does not depend on mass.
    #[default]
    Acceleration,
    /// Outputs are raw forces and torques; heavier bodies respond less.
    Force,
}

impl ForceMode {
    /// Convert a controller output into the force or torque to apply.
    ///
    /// Non-positive or non-finite masses are treated as 1.
    pub fn scale(self, value: Vec3, mass: f32) -> Vec3 {
        match self {
            ForceMode::Acceleration if mass > 0.0 && mass.is_finite() => value * mass,
            ForceMode::Acceleration | ForceMode::Force => value,
        }
    }
}

/// Full configuration for one hover vehicle.
///
/// ```rust
/// use hovercraft_controller::prelude::*;
///
/// let config = HoverControllerConfig::default()
///     .with_target_height(3.0)
///     .with_divisions(5, 4)
///     .with_force_mode(ForceMode::Force);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.grid.columns, 5);
/// ```
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Default)]
#[reflect(Component)]
pub struct HoverControllerConfig {
    /// Hover thrust settings.
    pub hover: HoverConfig,
    /// Sample grid layout.
    pub grid: GridConfig,
    /// Leveling torque settings.
    pub stabilization: StabilizationConfig,
    /// Movement and obstacle avoidance settings.
    pub movement: MovementConfig,
    /// Turn torque settings.
    pub look: LookConfig,
    /// Acceleration or force semantics for every output.
    pub force_mode: ForceMode,
}

impl HoverControllerConfig {
    /// Check every sub-configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.hover.validate()?;
        self.grid.validate()?;
        self.stabilization.validate()?;
        self.movement.validate()?;
        Ok(())
    }

    /// Set the hover target height.
    pub fn with_target_height(mut self, target_height: f32) -> Self {
        self.hover.target_height = target_height;
        self
    }

    /// Set the maximum hover thrust.
    pub fn with_max_thrust(mut self, max_thrust: f32) -> Self {
        self.hover.max_thrust = max_thrust;
        self
    }

    /// Set the sensor range multiplier.
    pub fn with_sensor_range_multiplier(mut self, multiplier: f32) -> Self {
        self.hover.sensor_range_multiplier = multiplier;
        self
    }

    /// Set the grid footprint size.
    pub fn with_grid_size(mut self, size: Vec3) -> Self {
        self.grid.size = size;
        self
    }

    /// Set the grid column and row counts.
    pub fn with_divisions(mut self, columns: u32, rows: u32) -> Self {
        self.grid.columns = columns;
        self.grid.rows = rows;
        self
    }

    /// Replace the stabilization settings.
    pub fn with_stabilization(mut self, stabilization: StabilizationConfig) -> Self {
        self.stabilization = stabilization;
        self
    }

    /// Replace the movement settings.
    pub fn with_movement(mut self, movement: MovementConfig) -> Self {
        self.movement = movement;
        self
    }

    /// Replace the look settings.
    pub fn with_look(mut self, look: LookConfig) -> Self {
        self.look = look;
        self
    }

    /// Choose acceleration or force semantics.
    pub fn with_force_mode(mut self, force_mode: ForceMode) -> Self {
        self.force_mode = force_mode;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = HoverControllerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.hover.target_height, 4.0);
        assert_eq!(config.hover.max_thrust, 30.0);
        assert_eq!(config.grid.size, Vec3::new(10.0, 0.2, 10.0));
        assert_eq!(config.grid.divisions(), UVec2::new(3, 3));
        assert!(config.stabilization.axes.roll);
        assert!(!config.stabilization.axes.pitch);
        assert_eq!(config.force_mode, ForceMode::Acceleration);
    }

    #[test]
    fn sensor_range_follows_target_height() {
        let config = HoverControllerConfig::default()
            .with_target_height(4.0)
            .with_sensor_range_multiplier(2.5);
        assert_eq!(config.hover.sensor_range(), 10.0);
    }

    #[test]
    fn rejects_bad_hover_values() {
        let config = HoverControllerConfig::default().with_target_height(0.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveTargetHeight(0.0))
        );

        let config = HoverControllerConfig::default().with_max_thrust(-1.0);
        assert_eq!(config.validate(), Err(ConfigError::NegativeThrust(-1.0)));

        let config = HoverControllerConfig::default().with_target_height(f32::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_bad_grid_values() {
        let config = HoverControllerConfig::default().with_divisions(0, 3);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DivisionsOutOfRange { axis: "column", .. })
        ));

        let config = HoverControllerConfig::default().with_divisions(3, MAX_DIVISIONS + 1);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DivisionsOutOfRange { axis: "row", .. })
        ));

        let config = HoverControllerConfig::default().with_grid_size(Vec3::new(10.0, 0.2, 0.0));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidGridSize(_))
        ));
    }

    #[test]
    fn divisions_are_clamped() {
        let grid = GridConfig {
            columns: 0,
            rows: 500,
            ..default()
        };
        assert_eq!(grid.divisions(), UVec2::new(1, MAX_DIVISIONS));
    }

    #[test]
    fn detection_range_only_checked_when_avoiding() {
        let movement = MovementConfig {
            obstacle_avoidance: false,
            obstacle_detection_range: 0.0,
            ..default()
        };
        assert!(movement.validate().is_ok());

        let movement = MovementConfig {
            obstacle_detection_range: 0.0,
            ..default()
        };
        assert_eq!(
            movement.validate(),
            Err(ConfigError::NonPositiveDetectionRange(0.0))
        );
    }

    #[test]
    fn force_mode_scaling() {
        let accel = Vec3::new(0.0, 2.0, 0.0);
        assert_eq!(ForceMode::Acceleration.scale(accel, 3.0), Vec3::new(0.0, 6.0, 0.0));
        assert_eq!(ForceMode::Force.scale(accel, 3.0), accel);
        assert_eq!(ForceMode::Acceleration.scale(accel, 0.0), accel);
    }

    #[test]
    fn stabilize_axes_any() {
        assert!(StabilizeAxes::default().any());
        assert!(StabilizeAxes::BOTH.any());
        assert!(!StabilizeAxes::NONE.any());
    }
}
