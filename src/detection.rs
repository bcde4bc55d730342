//! Ray query and hit structures.
//!
//! These types are the boundary between the controller and whatever answers
//! ray casts. Sample points, obstacle detection and terrain-normal
//! stabilization all go through [`RaycastOracle`].

use bevy::prelude::*;

/// Bit set of surface categories a ray is allowed to hit.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HoverLayers(pub u32);

impl HoverLayers {
    /// Matches every layer.
    pub const ALL: Self = Self(u32::MAX);
    /// Matches nothing.
    pub const NONE: Self = Self(0);
    /// Only the first layer. This is what a freshly configured grid uses.
    pub const DEFAULT: Self = Self(1);

    /// Layer set containing only `layer` (0-based).
    pub const fn layer(layer: u32) -> Self {
        Self(1 << layer)
    }

    /// Whether any bit of `other` is also set here.
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl Default for HoverLayers {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A single ray cast request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayQuery {
    /// World-space ray origin.
    pub origin: Vec3,
    /// World-space ray direction.
    pub direction: Dir3,
    /// Maximum distance along `direction`.
    pub max_distance: f32,
    /// Layers the ray may hit.
    pub layers: HoverLayers,
    /// Hits belonging to this body are ignored.
    pub exclude: Option<Entity>,
}

impl RayQuery {
    /// Ray straight down (world `-Y`) from `origin`.
    pub fn downward(origin: Vec3, max_distance: f32, layers: HoverLayers) -> Self {
        Self {
            origin,
            direction: Dir3::NEG_Y,
            max_distance,
            layers,
            exclude: None,
        }
    }

    /// Ignore hits on `body`.
    pub fn excluding(mut self, body: Option<Entity>) -> Self {
        self.exclude = body;
        self
    }
}

/// Information about a ray cast hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance from the ray origin to the hit point.
    pub distance: f32,
    /// World position of the hit point.
    pub point: Vec3,
    /// Surface normal at the hit point.
    pub normal: Vec3,
    /// Rigid body the hit collider belongs to, if any.
    pub body: Option<Entity>,
}

impl RayHit {
    /// Create a hit result.
    pub fn new(distance: f32, point: Vec3, normal: Vec3, body: Option<Entity>) -> Self {
        Self {
            distance,
            point,
            normal,
            body,
        }
    }
}

/// Anything that can answer "what is the nearest surface along this ray".
///
/// Implementors must honour [`RayQuery::layers`] and [`RayQuery::exclude`].
/// When the underlying engine can only report every hit along the ray,
/// [`nearest_hit`] does the exclusion and selection.
pub trait RaycastOracle {
    /// Nearest hit along `query`, or `None`.
    fn cast_ray(&self, query: &RayQuery) -> Option<RayHit>;
}

impl<T: RaycastOracle + ?Sized> RaycastOracle for &T {
    fn cast_ray(&self, query: &RayQuery) -> Option<RayHit> {
        (**self).cast_ray(query)
    }
}

/// Pick the nearest hit that does not belong to `exclude`.
///
/// Every candidate is compared against the running minimum after the
/// exclusion filter, so an excluded hit never shadows a farther valid one and
/// a farther valid hit never replaces a nearer one.
pub fn nearest_hit(
    hits: impl IntoIterator<Item = RayHit>,
    exclude: Option<Entity>,
) -> Option<RayHit> {
    hits.into_iter()
        .filter(|hit| exclude.is_none() || hit.body != exclude)
        .fold(None, |closest: Option<RayHit>, hit| match closest {
            Some(current) if current.distance <= hit.distance => Some(current),
            _ => Some(hit),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit_at(distance: f32, body: Option<Entity>) -> RayHit {
        RayHit::new(distance, Vec3::new(0.0, -distance, 0.0), Vec3::Y, body)
    }

    #[test]
    fn layers_intersect() {
        let terrain = HoverLayers::layer(3);
        assert!(HoverLayers::ALL.intersects(terrain));
        assert!(!HoverLayers::DEFAULT.intersects(terrain));
        assert!(!HoverLayers::NONE.intersects(HoverLayers::ALL));
    }

    #[test]
    fn downward_query_points_down() {
        let query = RayQuery::downward(Vec3::new(1.0, 2.0, 3.0), 4.0, HoverLayers::ALL);
        assert_eq!(query.direction, Dir3::NEG_Y);
        assert_eq!(query.max_distance, 4.0);
        assert!(query.exclude.is_none());
    }

    #[test]
    fn nearest_hit_skips_own_body() {
        let mut world = World::new();
        let own = world.spawn_empty().id();
        let ground = world.spawn_empty().id();

        let hits = [hit_at(0.5, Some(own)), hit_at(3.0, Some(ground)), hit_at(2.0, None)];
        let nearest = nearest_hit(hits, Some(own)).expect("a non-excluded hit exists");
        assert_eq!(nearest.distance, 2.0);
    }

    #[test]
    fn nearest_hit_keeps_minimum_regardless_of_order() {
        // A farther hit reported later must not replace the nearer one.
        let hits = [hit_at(1.0, None), hit_at(4.0, None), hit_at(2.5, None)];
        assert_eq!(nearest_hit(hits, None).map(|h| h.distance), Some(1.0));
    }

    #[test]
    fn nearest_hit_none_when_only_self() {
        let mut world = World::new();
        let own = world.spawn_empty().id();
        assert!(nearest_hit([hit_at(1.0, Some(own))], Some(own)).is_none());
        assert!(nearest_hit([], None).is_none());
    }
}
