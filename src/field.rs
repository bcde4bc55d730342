//! Grid of sample points under the vehicle footprint.
//!
//! The field owns a dense array of [`HoverSamplePoint`]s laid out in
//! `columns × rows` cells centered on the vehicle origin, and tracks the
//! point that is currently closest to the ground.
//!
//! Cells are addressed `(i, j)` with `i` the column (local x) and `j` the row
//! (local z). Storage and scan order are row-major in that tuple: index
//! `i * rows + j`.

use bevy::prelude::*;

use crate::config::GridConfig;
use crate::detection::{HoverLayers, RaycastOracle};
use crate::frame::VehicleFrame;
use crate::sample::HoverSamplePoint;

/// Receives every sample after the best point has been selected.
///
/// Used for visualization. The field never branches on observers.
pub trait SampleObserver {
    /// Called once per cell in scan order.
    fn observe(&mut self, cell: UVec2, point: &HoverSamplePoint, is_best: bool);
}

impl SampleObserver for () {
    fn observe(&mut self, _cell: UVec2, _point: &HoverSamplePoint, _is_best: bool) {}
}

impl<F: FnMut(UVec2, &HoverSamplePoint, bool)> SampleObserver for F {
    fn observe(&mut self, cell: UVec2, point: &HoverSamplePoint, is_best: bool) {
        self(cell, point, is_best)
    }
}

/// Layout a field was last generated with, compared by value every tick.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
struct GeneratedLayout {
    size: Vec3,
    divisions: UVec2,
    layers: HoverLayers,
}

/// Grid of ground sensors under a hover vehicle.
#[derive(Component, Reflect, Debug, Clone, Default)]
#[reflect(Component)]
pub struct HoverSampleField {
    points: Vec<HoverSamplePoint>,
    columns: u32,
    rows: u32,
    size: Vec3,
    cell_bounds: Vec3,
    best: Option<usize>,
    layout: Option<GeneratedLayout>,
    next_serial: u32,
}

impl HoverSampleField {
    /// Create a field already generated from `grid`.
    pub fn new(grid: &GridConfig) -> Self {
        let mut field = Self::default();
        field.regenerate(grid.size, grid.columns, grid.rows, grid.layers);
        field
    }

    /// Number of columns (local x).
    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows (local z).
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Footprint size used by the last regeneration.
    pub fn size(&self) -> Vec3 {
        self.size
    }

    /// Extent of one cell: `(size.x / columns, size.y, size.z / rows)`.
    pub fn cell_bounds(&self) -> Vec3 {
        self.cell_bounds
    }

    /// Number of live sample points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the field holds no points (never generated).
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Point at column `i`, row `j`.
    pub fn point(&self, i: u32, j: u32) -> Option<&HoverSamplePoint> {
        if i >= self.columns || j >= self.rows {
            return None;
        }
        self.points.get(self.index(i, j))
    }

    /// All points with their cell, in scan order.
    pub fn iter(&self) -> impl Iterator<Item = (UVec2, &HoverSamplePoint)> {
        self.points
            .iter()
            .enumerate()
            .map(|(index, point)| (self.cell(index), point))
    }

    /// The point closest to the ground as of the last evaluation.
    pub fn best(&self) -> Option<&HoverSamplePoint> {
        self.best.and_then(|index| self.points.get(index))
    }

    /// Cell of the best point.
    pub fn best_cell(&self) -> Option<UVec2> {
        self.best.map(|index| self.cell(index))
    }

    /// Whether `grid` differs from the layout this field was generated with.
    pub fn needs_regeneration(&self, grid: &GridConfig) -> bool {
        self.layout != Some(Self::layout_for(grid))
    }

    /// Regenerate if `grid` changed since the last regeneration.
    ///
    /// Returns whether a regeneration happened.
    pub fn sync(&mut self, grid: &GridConfig) -> bool {
        if !self.needs_regeneration(grid) {
            return false;
        }
        self.regenerate(grid.size, grid.columns, grid.rows, grid.layers);
        true
    }

    /// Lay out `columns × rows` points across the footprint.
    ///
    /// Existing points are reused in storage order before new ones are
    /// created; points beyond the new count are dropped. Each point sits at
    /// the centroid of its cell at local height zero. The best point is
    /// always reset. Counts are clamped into `1..=MAX_DIVISIONS`.
    pub fn regenerate(&mut self, size: Vec3, columns: u32, rows: u32, layers: HoverLayers) {
        let layout = Self::layout_for(&GridConfig {
            size,
            columns,
            rows,
            layers,
        });
        let divisions = layout.divisions;

        self.columns = divisions.x;
        self.rows = divisions.y;
        self.size = size;
        self.cell_bounds = Vec3::new(
            size.x / divisions.x as f32,
            size.y,
            size.z / divisions.y as f32,
        );
        self.best = None;

        let count = (divisions.x * divisions.y) as usize;
        self.points.truncate(count);

        let min = -size / 2.0;
        for i in 0..divisions.x {
            let x = min.x + (i as f32 + 0.5) * self.cell_bounds.x;
            for j in 0..divisions.y {
                let z = min.z + (j as f32 + 0.5) * self.cell_bounds.z;
                let offset = Vec3::new(x, 0.0, z);
                let index = self.index(i, j);

                match self.points.get_mut(index) {
                    Some(point) => point.place(offset, layers),
                    None => {
                        let serial = self.next_serial;
                        self.next_serial = self.next_serial.wrapping_add(1);
                        self.points.push(HoverSamplePoint::new(serial, offset, layers));
                    }
                }
            }
        }

        self.layout = Some(layout);
    }

    /// Recalculate every point and select the one closest to the ground.
    ///
    /// The previous best is recalculated first since it is the likely winner,
    /// but every point is visited. Selection uses strict `<` over scan order,
    /// so ties go to the lowest `(i, j)`. Returns `None` only for an empty
    /// field; an all-miss field returns its first point with an infinite
    /// distance.
    pub fn find_best(
        &mut self,
        oracle: &impl RaycastOracle,
        frame: &VehicleFrame,
        max_distance: f32,
        exclude: Option<Entity>,
    ) -> Option<&HoverSamplePoint> {
        self.find_best_with(oracle, frame, max_distance, exclude, &mut ())
    }

    /// [`find_best`](Self::find_best), then report every sample to `observer`.
    pub fn find_best_with(
        &mut self,
        oracle: &impl RaycastOracle,
        frame: &VehicleFrame,
        max_distance: f32,
        exclude: Option<Entity>,
        observer: &mut impl SampleObserver,
    ) -> Option<&HoverSamplePoint> {
        let previous = self.best.filter(|&index| index < self.points.len());
        if let Some(index) = previous {
            self.points[index].recalculate(oracle, frame, max_distance, exclude);
        }

        let mut best: Option<usize> = None;
        for index in 0..self.points.len() {
            if Some(index) != previous {
                self.points[index].recalculate(oracle, frame, max_distance, exclude);
            }
            let closer = match best {
                None => true,
                Some(current) => self.points[index].distance() < self.points[current].distance(),
            };
            if closer {
                best = Some(index);
            }
        }
        self.best = best;

        if let Some(index) = best {
            trace!(
                "best hover point {:?} at distance {}",
                self.cell(index),
                self.points[index].distance()
            );
        }

        self.notify(observer);
        self.best()
    }

    /// Report every sample to `observer` without recalculating.
    pub fn notify(&self, observer: &mut impl SampleObserver) {
        for (index, point) in self.points.iter().enumerate() {
            observer.observe(self.cell(index), point, self.best == Some(index));
        }
    }

    /// Point on the footprint edge in world direction `direction`.
    ///
    /// Used as the origin of the obstacle probe so the ray starts at the
    /// leading edge of the vehicle rather than its center.
    pub fn direction_point_on_bounds(&self, frame: &VehicleFrame, direction: Vec3) -> Vec3 {
        frame.translation
            + Vec3::new(
                direction.x * (self.size.x / 2.0),
                0.0,
                direction.z * (self.size.z / 2.0),
            )
    }

    fn layout_for(grid: &GridConfig) -> GeneratedLayout {
        GeneratedLayout {
            size: grid.size,
            divisions: grid.divisions(),
            layers: grid.layers,
        }
    }

    fn index(&self, i: u32, j: u32) -> usize {
        (i * self.rows + j) as usize
    }

    fn cell(&self, index: usize) -> UVec2 {
        let rows = self.rows.max(1) as usize;
        UVec2::new((index / rows) as u32, (index % rows) as u32)
    }
}
