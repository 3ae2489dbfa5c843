//! Tolerance-based vertex lookup for geometric graph assembly
//!
//! Raw geometric input is noisy: the endpoint of one segment rarely matches
//! the endpoint of the next bit-for-bit. While a graph is being assembled
//! from such primitives, this cache resolves each coordinate to an already
//! registered vertex, first by exact identity, then by a linear scan within
//! the tolerance. It is transient construction state, not part of the graph.

use super::types::EntityId;
use crate::geom::{Point, PointKey};
use rustc_hash::FxHashMap;

/// Coordinate-keyed vertex lookup with optional nearness tolerance
#[derive(Debug, Clone)]
pub struct ToleranceVertexCache {
    tolerance: f64,
    entries: FxHashMap<PointKey, (EntityId, Point)>,
}

impl ToleranceVertexCache {
    pub fn new(tolerance: f64) -> Self {
        ToleranceVertexCache {
            tolerance,
            entries: FxHashMap::default(),
        }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Resolve a coordinate to a cached vertex
    ///
    /// The exact hash hit is O(1). On a miss with a positive tolerance the
    /// whole cache is scanned by 3D distance and the first vertex within
    /// tolerance wins; acceptable for bounded one-time construction, not for
    /// per-step repeated queries. `None` means the caller must create and
    /// register a new vertex.
    pub fn lookup(&self, point: &Point) -> Option<EntityId> {
        if let Some((entity, _)) = self.entries.get(&point.key()) {
            return Some(*entity);
        }
        if self.tolerance <= 0.0 {
            return None;
        }
        self.entries
            .values()
            .find(|(_, cached)| point.distance_3d(cached) <= self.tolerance)
            .map(|(entity, _)| *entity)
    }

    /// Register a vertex under its coordinate
    pub fn insert(&mut self, point: Point, entity: EntityId) {
        self.entries.insert(point.key(), (entity, point));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_hit() {
        let mut cache = ToleranceVertexCache::new(0.0);
        cache.insert(Point::new(1.0, 2.0), EntityId::new(7));

        assert_eq!(cache.lookup(&Point::new(1.0, 2.0)), Some(EntityId::new(7)));
        assert_eq!(cache.lookup(&Point::new(1.0, 2.000001)), None);
    }

    #[test]
    fn test_tolerance_scan() {
        let mut cache = ToleranceVertexCache::new(0.5);
        cache.insert(Point::new(10.0, 10.0), EntityId::new(1));

        // within tolerance resolves to the cached vertex
        assert_eq!(
            cache.lookup(&Point::new(10.0, 10.3)),
            Some(EntityId::new(1))
        );
        // beyond tolerance is a total miss
        assert_eq!(cache.lookup(&Point::new(10.0, 11.0)), None);
    }

    #[test]
    fn test_tolerance_uses_3d_distance() {
        let mut cache = ToleranceVertexCache::new(0.5);
        cache.insert(Point::new_3d(0.0, 0.0, 0.0), EntityId::new(1));

        // planar match but far away along z
        assert_eq!(cache.lookup(&Point::new_3d(0.0, 0.0, 2.0)), None);
        assert_eq!(
            cache.lookup(&Point::new_3d(0.0, 0.0, 0.4)),
            Some(EntityId::new(1))
        );
    }

    #[test]
    fn test_zero_tolerance_never_scans() {
        let mut cache = ToleranceVertexCache::new(0.0);
        cache.insert(Point::new(0.0, 0.0), EntityId::new(1));
        assert_eq!(cache.lookup(&Point::new(0.0, 1e-9)), None);
        assert_eq!(cache.len(), 1);
    }
}
