//! Topograph
//!
//! A spatial relationship substrate for agent-based simulations: it turns a
//! population of located entities into a queryable topology, either as a
//! dynamic graph whose edges are induced by a pluggable relationship
//! predicate, or as a regular grid with analytically computed neighbor
//! sets.
//!
//! # Architecture
//!
//! - `geom`: points, paths and the ring-normalization contract shapes are
//!   built on.
//! - `graph`: the dynamic spatial graph with entity-keyed vertex/edge
//!   registries, automatic edge induction, cancellable full reconciliation,
//!   driving-edge resolution from line geometry, and a lazily built dense
//!   topology snapshot.
//! - `grid`: row-major grid addressing and diamond-ring (von Neumann)
//!   neighbor computation.
//! - `population`: lifecycle notifications mapped 1:1 onto vertex
//!   mutation.
//!
//! All mutation happens on a single logical thread; the only cross-thread
//! type is the cooperative [`InterruptFlag`](graph::InterruptFlag) polled
//! by long scans.
//!
//! # Example Usage
//!
//! ```rust
//! use topograph::geom::Point;
//! use topograph::graph::{DistanceRelationship, EntityId, SpatialGraph};
//!
//! // An undirected graph that connects entities within distance 10
//! let mut graph = SpatialGraph::with_relationship(false, DistanceRelationship::new(10.0), 0.0);
//!
//! graph.add_vertex(EntityId::new(1), Point::new(0.0, 0.0));
//! graph.add_vertex(EntityId::new(2), Point::new(3.0, 4.0));
//!
//! // the edge was induced automatically
//! assert!(graph.contains_edge_between(EntityId::new(1), EntityId::new(2)));
//! assert_eq!(graph.edge_count(), 1);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod geom;
pub mod graph;
pub mod grid;
pub mod population;

// Re-export main types for convenience
pub use geom::{GeomError, GeomResult, Point, PointKey, Polyline};
pub use graph::{
    DistanceRelationship, Edge, EntityId, GraphError, GraphEvent, GraphListener, GraphResult,
    InterruptFlag, NodeMap, RefreshOutcome, SpatialGraph, ToleranceVertexCache, Topology, Vertex,
    VertexRelationship,
};
pub use grid::{Grid, GridNeighborhood, VonNeumannNeighborhood};
pub use population::PopulationEvent;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
