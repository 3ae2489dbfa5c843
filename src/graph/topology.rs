//! Dense adjacency view over the graph registries
//!
//! Downstream consumers (routing, rendering) want integer-indexed adjacency,
//! not entity-keyed registries. The topology is a read-only Compressed
//! Sparse Row snapshot built lazily by the graph on first access after a
//! structural mutation; it never exposes the registries themselves.

use super::edge::Edge;
use super::types::EntityId;
use super::vertex::Vertex;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;

/// A dense, integer-indexed snapshot of the graph adjacency (CSR format)
#[derive(Debug, Clone)]
pub struct Topology {
    /// Number of vertices in the snapshot
    pub node_count: usize,
    /// Mapping from dense index (0..N) back to entity identity
    pub index_to_entity: Vec<EntityId>,
    /// Mapping from entity identity to dense index
    pub entity_to_index: FxHashMap<EntityId, usize>,

    /// Offsets into `out_targets`. Size = node_count + 1
    out_offsets: Vec<usize>,
    /// Contiguous array of successor indices
    out_targets: Vec<usize>,
    /// Edge weights aligned with `out_targets`
    out_weights: Vec<f64>,

    /// Offsets into `in_sources`. Size = node_count + 1
    in_offsets: Vec<usize>,
    /// Contiguous array of predecessor indices
    in_sources: Vec<usize>,
}

impl Topology {
    /// Snapshot the current registries
    ///
    /// Undirected graphs contribute each edge in both directions, so the
    /// successor view is symmetric.
    pub(crate) fn build(
        directed: bool,
        vertices: &IndexMap<EntityId, Vertex>,
        edges: &IndexMap<EntityId, Edge>,
    ) -> Self {
        let node_count = vertices.len();
        let index_to_entity: Vec<EntityId> = vertices.keys().copied().collect();
        let entity_to_index: FxHashMap<EntityId, usize> = index_to_entity
            .iter()
            .enumerate()
            .map(|(i, e)| (*e, i))
            .collect();

        let mut outgoing: Vec<Vec<(usize, f64)>> = vec![Vec::new(); node_count];
        let mut incoming: Vec<Vec<usize>> = vec![Vec::new(); node_count];

        for edge in edges.values() {
            let s = entity_to_index[&edge.source];
            let t = entity_to_index[&edge.target];
            outgoing[s].push((t, edge.weight()));
            incoming[t].push(s);
            if !directed {
                outgoing[t].push((s, edge.weight()));
                incoming[s].push(t);
            }
        }

        let mut out_offsets = Vec::with_capacity(node_count + 1);
        let mut out_targets = Vec::new();
        let mut out_weights = Vec::new();
        out_offsets.push(0);
        for neighbors in outgoing {
            for (target, weight) in neighbors {
                out_targets.push(target);
                out_weights.push(weight);
            }
            out_offsets.push(out_targets.len());
        }

        let mut in_offsets = Vec::with_capacity(node_count + 1);
        let mut in_sources = Vec::new();
        in_offsets.push(0);
        for sources in incoming {
            in_sources.extend(sources);
            in_offsets.push(in_sources.len());
        }

        Topology {
            node_count,
            index_to_entity,
            entity_to_index,
            out_offsets,
            out_targets,
            out_weights,
            in_offsets,
            in_sources,
        }
    }

    /// Out-degree of a vertex (by dense index)
    pub fn out_degree(&self, idx: usize) -> usize {
        self.out_offsets[idx + 1] - self.out_offsets[idx]
    }

    /// In-degree of a vertex (by dense index)
    pub fn in_degree(&self, idx: usize) -> usize {
        self.in_offsets[idx + 1] - self.in_offsets[idx]
    }

    /// Successor indices of a vertex
    pub fn successors(&self, idx: usize) -> &[usize] {
        &self.out_targets[self.out_offsets[idx]..self.out_offsets[idx + 1]]
    }

    /// Predecessor indices of a vertex
    pub fn predecessors(&self, idx: usize) -> &[usize] {
        &self.in_sources[self.in_offsets[idx]..self.in_offsets[idx + 1]]
    }

    /// Weights of the outgoing edges of a vertex, aligned with `successors`
    pub fn weights(&self, idx: usize) -> &[f64] {
        &self.out_weights[self.out_offsets[idx]..self.out_offsets[idx + 1]]
    }
}
