//! Configuration for the sample grid under the vehicle footprint.

use bevy::prelude::*;

use crate::detection::HoverLayers;
use crate::error::ConfigError;

/// Largest column or row count a grid accepts.
pub const MAX_DIVISIONS: u32 = 100;

/// Configuration for the sample grid under the vehicle footprint.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    /// Footprint size: width (x), cell height (y), depth (z).
    pub size: Vec3,

    /// Number of columns along local x.
    pub columns: u32,

    /// Number of rows along local z.
    pub rows: u32,

    /// Surfaces the sample rays can hover over.
    pub layers: HoverLayers,
}

impl GridConfig {
    /// Column and row counts clamped into `1..=MAX_DIVISIONS`.
    pub fn divisions(&self) -> UVec2 {
        UVec2::new(
            self.columns.clamp(1, MAX_DIVISIONS),
            self.rows.clamp(1, MAX_DIVISIONS),
        )
    }

    /// Check every field against its accepted range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.size.x > 0.0 && self.size.z > 0.0) {
            return Err(ConfigError::InvalidGridSize(self.size));
        }
        for (axis, value) in [("column", self.columns), ("row", self.rows)] {
            if !(1..=MAX_DIVISIONS).contains(&value) {
                return Err(ConfigError::DivisionsOutOfRange {
                    axis,
                    value,
                    max: MAX_DIVISIONS,
                });
            }
        }
        Ok(())
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            size: Vec3::new(10.0, 0.2, 10.0),
            columns: 3,
            rows: 3,
            layers: HoverLayers::DEFAULT,
        }
    }
}
