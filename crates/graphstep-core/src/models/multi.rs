//! Multigraph: vertex pairs may be joined by several parallel edges.

use super::adjacency::Adjacency;
use super::any::AnyGraph;
use super::graph::{Graph, GraphKind};
use super::ids::{Edge, VertexId};
use super::serialized::{AdjacencyDocument, EdgeData, SerializedGraph};
use crate::error::Result;

/// Unweighted graph storing an edge multiplicity per neighbor entry.
///
/// Adding an edge increments the count; removing one decrements it and drops
/// the entry only when the count reaches zero.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiGraph {
    inner: Adjacency<u32>,
}

impl MultiGraph {
    /// Create an empty multigraph.
    pub fn new(directed: bool) -> Self {
        Self {
            inner: Adjacency::new(directed),
        }
    }

    /// Insert a vertex with a chosen id; the label defaults to the id.
    pub fn insert_vertex(&mut self, id: VertexId, label: Option<String>) {
        self.inner.insert_vertex(id, label);
    }

    /// Number of parallel edges between `a` and `b`.
    pub fn multiplicity(&self, a: VertexId, b: VertexId) -> u32 {
        self.inner.get(a, b).copied().unwrap_or(0)
    }
}

impl Graph for MultiGraph {
    fn kind(&self) -> GraphKind {
        GraphKind::Multi
    }

    fn is_directed(&self) -> bool {
        self.inner.is_directed()
    }

    fn vertices(&self) -> Vec<VertexId> {
        self.inner.vertices()
    }

    fn vertex_count(&self) -> usize {
        self.inner.vertex_count()
    }

    fn contains_vertex(&self, v: VertexId) -> bool {
        self.inner.contains(v)
    }

    fn vertex_label(&self, v: VertexId) -> Option<&str> {
        self.inner.label(v)
    }

    fn set_vertex_label(&mut self, v: VertexId, label: String) -> Result<()> {
        self.inner.set_label(v, label)
    }

    fn neighbors(&self, v: VertexId) -> Vec<VertexId> {
        self.inner.neighbors(v)
    }

    fn neighbors_with_reverse(&self, v: VertexId) -> Vec<VertexId> {
        self.inner.neighbors_with_reverse(v)
    }

    fn degree(&self, v: VertexId) -> usize {
        self.inner.out_entries(v).map(|(_, &c)| c as usize).sum()
    }

    /// Each parallel edge is reported separately.
    fn edges(&self) -> Vec<Edge> {
        self.inner
            .entries()
            .into_iter()
            .flat_map(|(a, b, count)| (0..count).map(move |_| Edge::new(a, b)))
            .collect()
    }

    fn are_adjacent(&self, a: VertexId, b: VertexId) -> bool {
        self.multiplicity(a, b) > 0
    }

    fn add_vertex(&mut self) -> VertexId {
        self.inner.add_vertex()
    }

    fn remove_vertex(&mut self, v: VertexId) -> Result<()> {
        self.inner.remove_vertex(v)
    }

    fn add_edge(&mut self, a: VertexId, b: VertexId, _weight: Option<f64>) -> Result<()> {
        let count = self.multiplicity(a, b);
        self.inner.put(a, b, count + 1)
    }

    fn remove_edge(&mut self, a: VertexId, b: VertexId) -> Result<()> {
        let count = self.inner.take(a, b)?;
        if count > 1 {
            self.inner.put(a, b, count - 1)?;
        }
        Ok(())
    }

    fn to_serialized(&self) -> SerializedGraph {
        let mut doc = AdjacencyDocument::new(self.is_directed(), false);
        doc.multigraph = true;
        for v in self.inner.vertices() {
            let neighbors = self
                .inner
                .out_entries(v)
                .map(|(w, &count)| (w, EdgeData::with_count(count)))
                .collect();
            doc.adjacencies.insert(v, neighbors);
        }
        doc.vertex_labels = self.inner.labels().clone();
        SerializedGraph::Adjacency(doc)
    }

    fn to_any(&self) -> AnyGraph {
        AnyGraph::Multi(self.clone())
    }
}
