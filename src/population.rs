//! Bridge from population lifecycle notifications to graph mutation
//!
//! The agent-lifecycle collaborator emits add/remove/bulk/clear events
//! carrying the affected entities; the graph maps them 1:1 onto vertex
//! mutation. When the graph carries a relationship predicate, every arrival
//! induces its edges and every departure takes its incident edges with it.

use crate::geom::Point;
use crate::graph::{EntityId, SpatialGraph};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A population lifecycle notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PopulationEvent {
    /// A single agent entered the population
    AgentAdded { entity: EntityId, location: Point },
    /// A single agent left the population
    AgentRemoved { entity: EntityId },
    /// A batch of agents entered at once
    AgentsAdded(Vec<(EntityId, Point)>),
    /// A batch of agents left at once
    AgentsRemoved(Vec<EntityId>),
    /// The whole population was discarded
    Cleared,
}

impl SpatialGraph {
    /// Apply a population notification to the vertex registry
    pub fn on_population_event(&mut self, event: &PopulationEvent) {
        match event {
            PopulationEvent::AgentAdded { entity, location } => {
                self.add_vertex(*entity, *location);
            }
            PopulationEvent::AgentRemoved { entity } => {
                self.remove_vertex(*entity);
            }
            PopulationEvent::AgentsAdded(agents) => {
                for (entity, location) in agents {
                    self.add_vertex(*entity, *location);
                }
            }
            PopulationEvent::AgentsRemoved(agents) => {
                for entity in agents {
                    self.remove_vertex(*entity);
                }
            }
            PopulationEvent::Cleared => {
                debug!(graph = %self.label(), "population cleared");
                self.remove_all_vertices();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DistanceRelationship;

    fn id(n: u64) -> EntityId {
        EntityId::new(n)
    }

    #[test]
    fn test_single_add_and_remove() {
        let mut graph = SpatialGraph::new(false);
        graph.on_population_event(&PopulationEvent::AgentAdded {
            entity: id(1),
            location: Point::new(0.0, 0.0),
        });
        assert_eq!(graph.vertex_count(), 1);

        graph.on_population_event(&PopulationEvent::AgentRemoved { entity: id(1) });
        assert_eq!(graph.vertex_count(), 0);
    }

    #[test]
    fn test_bulk_events_drive_induction() {
        let mut graph = SpatialGraph::with_relationship(false, DistanceRelationship::new(5.0), 0.0);
        graph.on_population_event(&PopulationEvent::AgentsAdded(vec![
            (id(1), Point::new(0.0, 0.0)),
            (id(2), Point::new(3.0, 0.0)),
            (id(3), Point::new(100.0, 0.0)),
        ]));

        assert_eq!(graph.vertex_count(), 3);
        assert!(graph.contains_edge_between(id(1), id(2)));

        graph.on_population_event(&PopulationEvent::AgentsRemoved(vec![id(1), id(3)]));
        assert_eq!(graph.vertex_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_cleared_empties_the_graph() {
        let mut graph = SpatialGraph::with_relationship(false, DistanceRelationship::new(5.0), 0.0);
        for n in 0..4 {
            graph.add_vertex(id(n + 1), Point::new(n as f64, 0.0));
        }
        assert!(graph.edge_count() > 0);

        graph.on_population_event(&PopulationEvent::Cleared);
        assert_eq!(graph.vertex_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }
}
