//! Vertex records for the spatial graph
//!
//! A vertex wraps a reference to a spatial entity. Equality and hashing go
//! through the entity identity, never the location, so two agents standing
//! on the same coordinate remain distinct vertices.

use super::types::EntityId;
use crate::geom::Point;
use serde::{Deserialize, Serialize};

/// A graph vertex wrapping a spatial entity reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vertex {
    /// Identity of the wrapped entity
    pub entity: EntityId,

    /// Location of the entity in 2D/3D space
    pub location: Point,

    /// Vertex weight, 1 unless set explicitly
    pub(crate) weight: f64,

    /// Edges resolved with this vertex as their target
    pub(crate) incoming: Vec<EntityId>,

    /// Edges resolved with this vertex as their source
    pub(crate) outgoing: Vec<EntityId>,
}

impl Vertex {
    pub fn new(entity: EntityId, location: Point) -> Self {
        Vertex {
            entity,
            location,
            weight: 1.0,
            incoming: Vec::new(),
            outgoing: Vec::new(),
        }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Edges arriving at this vertex
    pub fn incoming(&self) -> &[EntityId] {
        &self.incoming
    }

    /// Edges leaving this vertex
    pub fn outgoing(&self) -> &[EntityId] {
        &self.outgoing
    }

    /// Number of incident edges
    pub fn degree(&self) -> usize {
        self.incoming.len() + self.outgoing.len()
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.entity == other.entity
    }
}

impl Eq for Vertex {}

impl std::hash::Hash for Vertex {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.entity.hash(state);
    }
}
