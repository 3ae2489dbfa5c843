//! The dynamic spatial graph
//!
//! Vertices wrap spatially located entities; edges are either induced
//! automatically by a pluggable relationship predicate, synthesized links
//! between two vertices, or directed driving edges resolved from line
//! geometry against a node map. All registries are entity-keyed in-memory
//! maps; a dense topology snapshot is built lazily on demand and thrown
//! away on every structural mutation.
//!
//! Mutation is single-logical-thread by contract. The only long-running
//! operations, the full reconciliation scan and by-vertex construction,
//! poll a cooperative interrupt and keep partial progress when cancelled.

use super::cache::ToleranceVertexCache;
use super::edge::Edge;
use super::event::{GraphEvent, GraphListener};
use super::relationship::VertexRelationship;
use super::topology::Topology;
use super::types::{EntityId, InterruptFlag, RefreshOutcome};
use super::vertex::Vertex;
use crate::geom::{GeomError, Point, PointKey, Polyline};
use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, trace};

/// Errors that can occur during graph construction
#[derive(Error, Debug)]
pub enum GraphError {
    /// An edge or vertex record could not be built from its entity
    #[error("failed to build an edge from {entity} in graph '{graph}'")]
    Construction {
        entity: EntityId,
        graph: String,
        #[source]
        source: GeomError,
    },
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Exact-coordinate map from endpoint to a registered node vertex
pub type NodeMap = FxHashMap<PointKey, EntityId>;

/// A dynamic graph over spatially located entities
///
/// The directed/undirected flag and the relationship predicate are fixed at
/// construction. The version counter increments on every change to vertex
/// or edge membership, and only on those.
pub struct SpatialGraph {
    label: String,
    directed: bool,
    tolerance: f64,
    relationship: Option<Arc<dyn VertexRelationship>>,

    /// Vertex registry; membership is entity identity
    vertices: IndexMap<EntityId, Vertex>,
    /// Edge registry, keyed by the wrapped entity
    edges: IndexMap<EntityId, Edge>,
    /// Endpoint-pair index (pair normalized when undirected)
    by_endpoints: FxHashMap<(EntityId, EntityId), Vec<EntityId>>,

    listeners: Vec<Box<dyn GraphListener>>,
    version: u64,
    /// Lazily built adjacency snapshot, cleared on every structural mutation
    topology: Option<Topology>,
    next_synthetic: u64,
}

impl SpatialGraph {
    /// Create an empty graph with no relationship predicate
    pub fn new(directed: bool) -> Self {
        SpatialGraph {
            label: "spatial-graph".to_string(),
            directed,
            tolerance: 0.0,
            relationship: None,
            vertices: IndexMap::new(),
            edges: IndexMap::new(),
            by_endpoints: FxHashMap::default(),
            listeners: Vec::new(),
            version: 1,
            topology: None,
            next_synthetic: 0,
        }
    }

    /// Create an empty graph whose edges are induced by a predicate
    pub fn with_relationship(
        directed: bool,
        relationship: impl VertexRelationship + 'static,
        tolerance: f64,
    ) -> Self {
        let mut graph = Self::new(directed);
        graph.relationship = Some(Arc::new(relationship));
        graph.tolerance = tolerance.max(0.0);
        graph
    }

    /// Seed a graph from a vertex collection, then induce all edges
    ///
    /// Every vertex is registered first; the pairwise induction pass runs
    /// afterwards over the complete set. O(V²); large populations should
    /// prefer the grid topology instead.
    pub fn from_vertices<I>(
        items: I,
        relationship: impl VertexRelationship + 'static,
        directed: bool,
        tolerance: f64,
    ) -> Self
    where
        I: IntoIterator<Item = (EntityId, Point)>,
    {
        let rel: Arc<dyn VertexRelationship> = Arc::new(relationship);
        let mut graph = Self::new(directed);
        graph.relationship = Some(rel.clone());
        graph.tolerance = tolerance.max(0.0);

        let mut ids = Vec::new();
        for (entity, location) in items {
            if graph.insert_vertex_raw(entity, location) {
                ids.push(entity);
            }
        }
        for &o1 in &ids {
            let mut to_link = Vec::new();
            {
                let a = &graph.vertices[&o1];
                for &o2 in &ids {
                    if o1 == o2 {
                        continue;
                    }
                    let b = &graph.vertices[&o2];
                    if rel.equivalent(a, b) {
                        continue;
                    }
                    if rel.related(a, b) {
                        to_link.push(o2);
                    }
                }
            }
            for o2 in to_link {
                graph.add_edge(o1, o2);
            }
        }
        graph
    }

    /// Assemble a graph incrementally from line-shaped entities
    ///
    /// Endpoint coordinates resolve to vertices through a tolerance cache,
    /// so near-duplicate endpoints of adjacent segments collapse onto one
    /// vertex. Vertices minted for unresolved endpoints carry synthetic
    /// identities; each edge keeps its entity and gets the path length as
    /// its weight.
    pub fn from_edge_geometries<I>(items: I, directed: bool, tolerance: f64) -> Self
    where
        I: IntoIterator<Item = (EntityId, Polyline)>,
    {
        let mut graph = Self::new(directed);
        graph.tolerance = tolerance.max(0.0);
        let mut cache = ToleranceVertexCache::new(graph.tolerance);

        for (entity, line) in items {
            if graph.edges.contains_key(&entity) {
                trace!(%entity, "edge entity already registered, skipped");
                continue;
            }
            let source = graph.resolve_endpoint(&mut cache, line.first());
            let target = graph.resolve_endpoint(&mut cache, line.last());
            graph.insert_edge_record(Edge::new(entity, source, target, line.length()));
        }
        graph
    }

    /// Build a directed network from explicit nodes and edge geometries
    ///
    /// Nodes are registered as vertices and indexed by exact coordinate;
    /// every edge geometry is then resolved through [`add_driving_edge`].
    /// Edges whose endpoints do not land exactly on a node are dropped,
    /// which is the expected outcome for noisy or partial network data.
    ///
    /// [`add_driving_edge`]: SpatialGraph::add_driving_edge
    pub fn from_node_edge_geometries<N, E>(nodes: N, edge_paths: E) -> GraphResult<Self>
    where
        N: IntoIterator<Item = (EntityId, Point)>,
        E: IntoIterator<Item = (EntityId, Vec<Point>)>,
    {
        let mut graph = Self::new(true);
        let mut node_map = NodeMap::default();
        for (entity, location) in nodes {
            graph.insert_vertex_raw(entity, location);
            node_map.insert(location.key(), entity);
        }
        for (entity, path) in edge_paths {
            graph.add_driving_edge(entity, &path, &node_map)?;
        }
        Ok(graph)
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn set_tolerance(&mut self, tolerance: f64) {
        self.tolerance = tolerance.max(0.0);
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Version counter; changes iff vertex or edge membership changed
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Register an observer for committed structural changes
    pub fn add_listener(&mut self, listener: Box<dyn GraphListener>) {
        self.listeners.push(listener);
    }

    // ------------------------------------------------------------------
    // Vertex mutation
    // ------------------------------------------------------------------

    /// Add a vertex for an entity; returns false if already a member
    ///
    /// When a relationship predicate is configured, the existing vertex set
    /// is walked once and an edge is induced towards every vertex that is
    /// related but not equivalent. O(|V|) per call.
    pub fn add_vertex(&mut self, entity: EntityId, location: Point) -> bool {
        if !self.insert_vertex_raw(entity, location) {
            return false;
        }
        if let Some(rel) = self.relationship.clone() {
            let mut to_link = Vec::new();
            {
                let v = &self.vertices[&entity];
                for (oid, o) in &self.vertices {
                    if *oid == entity || rel.equivalent(v, o) {
                        continue;
                    }
                    if rel.related(v, o) {
                        to_link.push(*oid);
                    }
                }
            }
            for oid in to_link {
                self.add_edge(entity, oid);
            }
        }
        true
    }

    /// Remove a vertex and every incident edge; no-op if absent
    pub fn remove_vertex(&mut self, entity: EntityId) -> bool {
        let Some(vertex) = self.vertices.get(&entity) else {
            return false;
        };
        let incident: Vec<EntityId> = vertex
            .outgoing
            .iter()
            .chain(vertex.incoming.iter())
            .copied()
            .collect();
        for edge in incident {
            self.remove_edge_entity(edge);
        }
        self.vertices.shift_remove(&entity);
        self.touch();
        self.dispatch(GraphEvent::VertexRemoved { entity });
        true
    }

    /// Remove every vertex (and with them, every edge)
    pub fn remove_all_vertices(&mut self) {
        let ids: Vec<EntityId> = self.vertices.keys().copied().collect();
        debug!(graph = %self.label, count = ids.len(), "removing all vertices");
        for entity in ids {
            self.remove_vertex(entity);
        }
    }

    // ------------------------------------------------------------------
    // Edge mutation
    // ------------------------------------------------------------------

    /// Connect two member vertices with a synthesized link
    ///
    /// Returns the link's entity, or `None` when either vertex is absent or
    /// the pair already carries an edge. The link weight defaults to the
    /// straight-line distance between the vertex locations.
    pub fn add_edge(&mut self, v1: EntityId, v2: EntityId) -> Option<EntityId> {
        let weight = self.link_weight(v1, v2)?;
        let key = self.pair_key(v1, v2);
        if self.by_endpoints.get(&key).is_some_and(|list| !list.is_empty()) {
            return None;
        }
        let entity = self.mint();
        self.insert_edge_record(Edge::new(entity, v1, v2, weight));
        Some(entity)
    }

    /// Connect two member vertices with an explicit weight
    pub fn add_edge_with_weight(
        &mut self,
        v1: EntityId,
        v2: EntityId,
        weight: f64,
    ) -> Option<EntityId> {
        self.link_weight(v1, v2)?;
        let key = self.pair_key(v1, v2);
        if self.by_endpoints.get(&key).is_some_and(|list| !list.is_empty()) {
            return None;
        }
        let entity = self.mint();
        self.insert_edge_record(Edge::with_weight(entity, v1, v2, weight));
        Some(entity)
    }

    /// Register a directed driving edge resolved from line geometry
    ///
    /// The endpoints of `path` are looked up in `nodes` by exact coordinate
    /// (no tolerance at this stage). A missing resolution rejects the edge
    /// with `Ok(false)` and leaves the graph completely unchanged; this is
    /// an expected outcome for noisy or partial network data, not an error.
    /// On success the edge lands on the source's outgoing and the target's
    /// incoming adjacency list, both nodes are ensured as vertices, and the
    /// edge weight is the geometric path length.
    pub fn add_driving_edge(
        &mut self,
        entity: EntityId,
        path: &[Point],
        nodes: &NodeMap,
    ) -> GraphResult<bool> {
        if self.edges.contains_key(&entity) {
            return Ok(false);
        }
        let line = Polyline::new(path.to_vec()).map_err(|source| GraphError::Construction {
            entity,
            graph: self.label.clone(),
            source,
        })?;

        let Some(&source) = nodes.get(&line.first().key()) else {
            trace!(%entity, "driving edge rejected: source endpoint resolves to no node");
            return Ok(false);
        };
        let Some(&target) = nodes.get(&line.last().key()) else {
            trace!(%entity, "driving edge rejected: target endpoint resolves to no node");
            return Ok(false);
        };

        self.insert_vertex_raw(source, line.first());
        self.insert_vertex_raw(target, line.last());
        self.insert_edge_record(Edge::new(entity, source, target, line.length()));
        Ok(true)
    }

    /// Remove the edge between two vertices, if any
    pub fn remove_edge(&mut self, v1: EntityId, v2: EntityId) -> bool {
        let key = self.pair_key(v1, v2);
        let Some(entity) = self.by_endpoints.get(&key).and_then(|list| list.first().copied())
        else {
            return false;
        };
        self.remove_edge_entity(entity)
    }

    /// Remove an edge by its entity; no-op if absent
    pub fn remove_edge_entity(&mut self, entity: EntityId) -> bool {
        let Some(edge) = self.edges.shift_remove(&entity) else {
            return false;
        };
        let key = self.pair_key(edge.source, edge.target);
        if let Some(list) = self.by_endpoints.get_mut(&key) {
            list.retain(|e| *e != entity);
            if list.is_empty() {
                self.by_endpoints.remove(&key);
            }
        }
        if let Some(v) = self.vertices.get_mut(&edge.source) {
            v.outgoing.retain(|e| *e != entity);
        }
        if let Some(v) = self.vertices.get_mut(&edge.target) {
            v.incoming.retain(|e| *e != entity);
        }
        self.touch();
        self.dispatch(GraphEvent::EdgeRemoved { entity });
        true
    }

    // ------------------------------------------------------------------
    // Reconciliation
    // ------------------------------------------------------------------

    /// Reconcile the full edge set against the relationship predicate
    ///
    /// Every pair of vertices distinct under `equivalent` is examined:
    /// related pairs gain their missing edge, no-longer-related pairs lose
    /// theirs. The interrupt flag is polled once per outer vertex; on
    /// cancellation the scan stops where it is and whatever was already
    /// reconciled stays in place.
    pub fn refresh_edges(&mut self, interrupt: &InterruptFlag) -> RefreshOutcome {
        let Some(rel) = self.relationship.clone() else {
            return RefreshOutcome::Complete;
        };
        let ids: Vec<EntityId> = self.vertices.keys().copied().collect();
        for &s1 in &ids {
            if interrupt.is_set() {
                debug!(graph = %self.label, "edge reconciliation interrupted");
                return RefreshOutcome::Interrupted;
            }
            for &s2 in &ids {
                if s1 == s2 {
                    continue;
                }
                let related = {
                    let a = &self.vertices[&s1];
                    let b = &self.vertices[&s2];
                    if rel.equivalent(a, b) {
                        continue;
                    }
                    rel.related(a, b)
                };
                let already = self.contains_edge_between(s1, s2);
                if related && !already {
                    self.add_edge(s1, s2);
                } else if already && !related {
                    self.remove_edge(s1, s2);
                }
            }
        }
        RefreshOutcome::Complete
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub fn contains_vertex(&self, entity: EntityId) -> bool {
        self.vertices.contains_key(&entity)
    }

    pub fn get_vertex(&self, entity: EntityId) -> Option<&Vertex> {
        self.vertices.get(&entity)
    }

    /// Whether an entity is registered as an edge
    pub fn contains_edge(&self, entity: EntityId) -> bool {
        self.edges.contains_key(&entity)
    }

    pub fn get_edge(&self, entity: EntityId) -> Option<&Edge> {
        self.edges.get(&entity)
    }

    /// Whether any edge connects the two vertices
    pub fn contains_edge_between(&self, v1: EntityId, v2: EntityId) -> bool {
        self.by_endpoints
            .get(&self.pair_key(v1, v2))
            .is_some_and(|list| !list.is_empty())
    }

    /// The first edge registered between two vertices, if any
    pub fn edge_between(&self, v1: EntityId, v2: EntityId) -> Option<&Edge> {
        self.by_endpoints
            .get(&self.pair_key(v1, v2))
            .and_then(|list| list.first())
            .and_then(|entity| self.edges.get(entity))
    }

    /// Source vertex of a registered edge; absent if not registered
    pub fn edge_source(&self, entity: EntityId) -> Option<EntityId> {
        self.edges.get(&entity).map(|edge| edge.source)
    }

    /// Target vertex of a registered edge; absent if not registered
    pub fn edge_target(&self, entity: EntityId) -> Option<EntityId> {
        self.edges.get(&entity).map(|edge| edge.target)
    }

    pub fn edge_weight(&self, entity: EntityId) -> Option<f64> {
        self.edges.get(&entity).map(|edge| edge.weight())
    }

    /// Set an explicit edge weight; returns false if the edge is absent
    ///
    /// Membership is unchanged so the version counter does not move, but a
    /// cached topology snapshot would serve the stale weight and is dropped.
    pub fn set_edge_weight(&mut self, entity: EntityId, weight: f64) -> bool {
        match self.edges.get_mut(&entity) {
            Some(edge) => {
                edge.set_weight(weight);
                self.topology = None;
                true
            }
            None => false,
        }
    }

    pub fn vertex_weight(&self, entity: EntityId) -> Option<f64> {
        self.vertices.get(&entity).map(|vertex| vertex.weight())
    }

    /// Set a vertex weight; returns false if the vertex is absent
    pub fn set_vertex_weight(&mut self, entity: EntityId, weight: f64) -> bool {
        match self.vertices.get_mut(&entity) {
            Some(vertex) => {
                vertex.weight = weight;
                true
            }
            None => false,
        }
    }

    /// Driving edges leaving a vertex
    pub fn outgoing_edges(&self, entity: EntityId) -> &[EntityId] {
        self.vertices
            .get(&entity)
            .map(|v| v.outgoing())
            .unwrap_or(&[])
    }

    /// Driving edges arriving at a vertex
    pub fn incoming_edges(&self, entity: EntityId) -> &[EntityId] {
        self.vertices
            .get(&entity)
            .map(|v| v.incoming())
            .unwrap_or(&[])
    }

    /// Read-only view of the vertex registry
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.values()
    }

    /// Read-only view of the edge registry
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// The adjacency snapshot, rebuilt lazily after structural mutations
    pub fn topology(&mut self) -> &Topology {
        &*self
            .topology
            .get_or_insert_with(|| Topology::build(self.directed, &self.vertices, &self.edges))
    }

    /// Clone the graph configuration and membership
    ///
    /// Vertices are carried over first, then all current edges, preserving
    /// adjacency and edge identity. The cached topology and the registered
    /// listeners do not carry over; the relationship predicate is shared.
    pub fn copy(&self) -> SpatialGraph {
        let mut graph = SpatialGraph::new(self.directed);
        graph.label = self.label.clone();
        graph.tolerance = self.tolerance;
        graph.relationship = self.relationship.clone();
        graph.next_synthetic = self.next_synthetic;

        for vertex in self.vertices.values() {
            graph.insert_vertex_raw(vertex.entity, vertex.location);
            if let Some(copied) = graph.vertices.get_mut(&vertex.entity) {
                copied.weight = vertex.weight;
            }
        }
        for edge in self.edges.values() {
            graph.insert_edge_record(edge.clone());
        }
        graph
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn pair_key(&self, a: EntityId, b: EntityId) -> (EntityId, EntityId) {
        if self.directed || a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    fn mint(&mut self) -> EntityId {
        let id = EntityId::synthetic(self.next_synthetic);
        self.next_synthetic += 1;
        id
    }

    /// Weight of a prospective link; `None` when either vertex is absent
    fn link_weight(&self, v1: EntityId, v2: EntityId) -> Option<f64> {
        let a = self.vertices.get(&v1)?;
        let b = self.vertices.get(&v2)?;
        Some(a.location.distance_3d(&b.location))
    }

    fn resolve_endpoint(&mut self, cache: &mut ToleranceVertexCache, point: Point) -> EntityId {
        if let Some(entity) = cache.lookup(&point) {
            return entity;
        }
        let entity = self.mint();
        self.insert_vertex_raw(entity, point);
        cache.insert(point, entity);
        entity
    }

    /// Idempotent vertex insert without edge induction
    fn insert_vertex_raw(&mut self, entity: EntityId, location: Point) -> bool {
        if self.vertices.contains_key(&entity) {
            return false;
        }
        self.vertices.insert(entity, Vertex::new(entity, location));
        self.touch();
        self.dispatch(GraphEvent::VertexAdded { entity });
        true
    }

    /// Commit an edge record and index it; dispatches after commit
    fn insert_edge_record(&mut self, edge: Edge) {
        let entity = edge.entity;
        let key = self.pair_key(edge.source, edge.target);
        if let Some(v) = self.vertices.get_mut(&edge.source) {
            v.outgoing.push(entity);
        }
        if let Some(v) = self.vertices.get_mut(&edge.target) {
            v.incoming.push(entity);
        }
        self.by_endpoints.entry(key).or_default().push(entity);
        self.edges.insert(entity, edge);
        self.touch();
        self.dispatch(GraphEvent::EdgeAdded { entity });
    }

    /// Record a membership change: bump the version, drop the snapshot
    fn touch(&mut self) {
        self.version += 1;
        self.topology = None;
    }

    fn dispatch(&self, event: GraphEvent) {
        for listener in &self.listeners {
            listener.on_graph_event(&event);
        }
    }
}

impl fmt::Debug for SpatialGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpatialGraph")
            .field("label", &self.label)
            .field("directed", &self.directed)
            .field("tolerance", &self.tolerance)
            .field("vertices", &self.vertices.len())
            .field("edges", &self.edges.len())
            .field("version", &self.version)
            .finish()
    }
}
