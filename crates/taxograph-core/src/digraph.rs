//! Directed graph with O(1) vertex lookup by integer id.
//!
//! The digraph is built once by a loader and treated as read-only afterwards:
//! there are no removal operations and no mutation path once construction
//! completes. Adjacency is kept in insertion order on both sides of every
//! edge, which makes traversal order (and therefore SAP tie-breaking)
//! deterministic.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{GraphError, Result};

// ============================================================================
// Vertex identity
// ============================================================================

/// Vertex id: the taxonomy's own integer id (4 bytes, copyable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct VertexId(u32);

impl VertexId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for VertexId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for VertexId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

// ============================================================================
// Digraph (adjacency storage)
// ============================================================================

/// Per-vertex record: label payload plus both adjacency directions.
#[derive(Debug, Clone, Default)]
struct VertexRecord {
    label: String,
    /// Outgoing neighbors, insertion order. Multi-edges are kept as-is.
    out: Vec<VertexId>,
    /// Incoming neighbors, insertion order.
    incoming: Vec<VertexId>,
}

/// Directed graph over integer-identified, string-labeled vertices.
///
/// Edges are unit-distance `(from, to)` relations ("from is-a to").
/// Both endpoints must exist before an edge can be inserted. Multi-edges and
/// self-loops are accepted at this layer; the DAG validator flags self-loops
/// as cycles.
#[derive(Debug, Default)]
pub struct Digraph {
    /// Single id -> vertex index; no external parallel bookkeeping.
    vertices: HashMap<VertexId, VertexRecord>,
    /// Vertex ids in insertion order, for deterministic whole-graph scans.
    order: Vec<VertexId>,
    edge_count: usize,
}

impl Digraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-sized constructor for loaders that know the vertex count up front.
    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            vertices: HashMap::with_capacity(vertices),
            order: Vec::with_capacity(vertices),
            edge_count: 0,
        }
    }

    /// Add a vertex. Insertion is strict: a repeated id is an error, not an
    /// upsert, so loaders see duplicate records in their input.
    pub fn insert_vertex(&mut self, id: VertexId, label: impl Into<String>) -> Result<VertexId> {
        if self.vertices.contains_key(&id) {
            return Err(GraphError::DuplicateVertex { id });
        }
        self.vertices.insert(
            id,
            VertexRecord {
                label: label.into(),
                ..VertexRecord::default()
            },
        );
        self.order.push(id);
        Ok(id)
    }

    /// Add a directed edge `from -> to`. Fails if either endpoint is absent;
    /// on failure neither adjacency list is touched.
    pub fn insert_edge(&mut self, from: VertexId, to: VertexId) -> Result<()> {
        if !self.vertices.contains_key(&from) {
            return Err(GraphError::UnknownVertex { id: from });
        }
        if !self.vertices.contains_key(&to) {
            return Err(GraphError::UnknownVertex { id: to });
        }

        if let Some(rec) = self.vertices.get_mut(&from) {
            rec.out.push(to);
        }
        if let Some(rec) = self.vertices.get_mut(&to) {
            rec.incoming.push(from);
        }

        self.edge_count += 1;
        Ok(())
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    pub fn contains(&self, id: VertexId) -> bool {
        self.vertices.contains_key(&id)
    }

    /// Resolve a raw taxonomy id to a vertex, if inserted.
    pub fn vertex_by_id(&self, raw: u32) -> Option<VertexId> {
        let id = VertexId::new(raw);
        self.vertices.contains_key(&id).then_some(id)
    }

    /// Label payload of a vertex, if present.
    pub fn label(&self, id: VertexId) -> Option<&str> {
        self.vertices.get(&id).map(|rec| rec.label.as_str())
    }

    /// Outgoing neighbors of `id` in insertion order.
    ///
    /// Returns an empty slice for unknown vertices; callers that need to
    /// distinguish should check `contains` first.
    pub fn out_neighbors(&self, id: VertexId) -> &[VertexId] {
        self.vertices
            .get(&id)
            .map(|rec| rec.out.as_slice())
            .unwrap_or(&[])
    }

    /// Incoming neighbors of `id` in insertion order.
    pub fn in_neighbors(&self, id: VertexId) -> &[VertexId] {
        self.vertices
            .get(&id)
            .map(|rec| rec.incoming.as_slice())
            .unwrap_or(&[])
    }

    pub fn out_degree(&self, id: VertexId) -> usize {
        self.out_neighbors(id).len()
    }

    pub fn in_degree(&self, id: VertexId) -> usize {
        self.in_neighbors(id).len()
    }

    /// All vertex ids in insertion order.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.order.iter().copied()
    }

    pub fn vertex_count(&self) -> usize {
        self.order.len()
    }

    /// Edge count, multi-edges included.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
