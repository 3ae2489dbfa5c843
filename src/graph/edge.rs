//! Edge records for the spatial graph
//!
//! An edge wraps either a caller-supplied spatial entity (a road segment,
//! a corridor) or a link the graph synthesized between two vertices. The
//! weight defaults to the geometric length of the underlying shape when the
//! edge is derived from geometry; a weight set explicitly is marked so it
//! is never replaced by a geometric default afterwards.

use super::types::EntityId;
use serde::{Deserialize, Serialize};

/// A graph edge with resolved endpoints and a numeric weight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Identity of the wrapped entity (synthetic for generated links)
    pub entity: EntityId,

    /// Resolved source vertex
    pub source: EntityId,

    /// Resolved target vertex
    pub target: EntityId,

    /// Edge weight
    weight: f64,

    /// Whether the weight was supplied by a caller rather than derived
    explicit_weight: bool,
}

impl Edge {
    /// Create an edge with a geometry-derived default weight
    pub fn new(entity: EntityId, source: EntityId, target: EntityId, weight: f64) -> Self {
        Edge {
            entity,
            source,
            target,
            weight,
            explicit_weight: false,
        }
    }

    /// Create an edge with an explicit, caller-supplied weight
    pub fn with_weight(entity: EntityId, source: EntityId, target: EntityId, weight: f64) -> Self {
        Edge {
            entity,
            source,
            target,
            weight,
            explicit_weight: true,
        }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Replace the weight explicitly; explicit weights stick
    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
        self.explicit_weight = true;
    }

    /// Whether the weight was supplied explicitly rather than derived
    pub fn has_explicit_weight(&self) -> bool {
        self.explicit_weight
    }

    /// Whether this edge connects two specific vertices, in either direction
    pub fn connects(&self, v1: EntityId, v2: EntityId) -> bool {
        (self.source == v1 && self.target == v2) || (self.source == v2 && self.target == v1)
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.entity == other.entity
    }
}

impl Eq for Edge {}

impl std::hash::Hash for Edge {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.entity.hash(state);
    }
}
