//! Graph with a weight on every edge.

use super::adjacency::Adjacency;
use super::any::AnyGraph;
use super::graph::{Graph, GraphKind, Weighted};
use super::ids::{Edge, VertexId};
use super::serialized::{AdjacencyDocument, EdgeData, SerializedGraph};
use crate::error::{GraphError, Result};

/// Directed or undirected graph with `f64` edge weights.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedGraph {
    inner: Adjacency<f64>,
}

impl WeightedGraph {
    /// Create an empty graph.
    pub fn new(directed: bool) -> Self {
        Self {
            inner: Adjacency::new(directed),
        }
    }

    /// Create an undirected graph with vertices `0..n` and the given weighted edges.
    ///
    /// # Example
    ///
    /// ```
    /// use graphstep_core::models::{Graph, Weighted, WeightedGraph, VertexId};
    ///
    /// let g = WeightedGraph::from_edges(3, &[(0, 1, 2.0), (1, 2, 0.5)]).unwrap();
    /// assert_eq!(g.edge_weight(VertexId(2), VertexId(1)), Some(0.5));
    /// ```
    pub fn from_edges(n: u32, edges: &[(u32, u32, f64)]) -> Result<Self> {
        Self::from_edges_directed(n, edges, false)
    }

    /// Like [`WeightedGraph::from_edges`] with a choice of directedness.
    pub fn from_edges_directed(n: u32, edges: &[(u32, u32, f64)], directed: bool) -> Result<Self> {
        let mut graph = Self::new(directed);
        for id in 0..n {
            graph.insert_vertex(VertexId(id), None);
        }
        for &(a, b, w) in edges {
            graph.add_edge(VertexId(a), VertexId(b), Some(w))?;
        }
        Ok(graph)
    }

    /// Insert a vertex with a chosen id; the label defaults to the id.
    pub fn insert_vertex(&mut self, id: VertexId, label: Option<String>) {
        self.inner.insert_vertex(id, label);
    }

    /// Change the weight of an existing edge.
    pub fn set_edge_weight(&mut self, a: VertexId, b: VertexId, weight: f64) -> Result<()> {
        if self.inner.get(a, b).is_none() {
            return Err(GraphError::MissingEdge(a, b));
        }
        self.inner.put(a, b, weight)
    }
}

impl Graph for WeightedGraph {
    fn kind(&self) -> GraphKind {
        GraphKind::Weighted
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

    fn edges(&self) -> Vec<Edge> {
        self.inner
            .entries()
            .into_iter()
            .map(|(a, b, w)| Edge::weighted(a, b, w))
            .collect()
    }

    fn are_adjacent(&self, a: VertexId, b: VertexId) -> bool {
        self.inner.get(a, b).is_some()
    }

    fn add_vertex(&mut self) -> VertexId {
        self.inner.add_vertex()
    }

    fn remove_vertex(&mut self, v: VertexId) -> Result<()> {
        self.inner.remove_vertex(v)
    }

    /// Adds (or re-weights) an edge; a missing weight defaults to 1.
    fn add_edge(&mut self, a: VertexId, b: VertexId, weight: Option<f64>) -> Result<()> {
        self.inner.put(a, b, weight.unwrap_or(1.0))
    }

    fn remove_edge(&mut self, a: VertexId, b: VertexId) -> Result<()> {
        self.inner.take(a, b).map(|_| ())
    }

    fn as_weighted(&self) -> Option<&dyn Weighted> {
        Some(self)
    }

    fn to_serialized(&self) -> SerializedGraph {
        let mut doc = AdjacencyDocument::new(self.is_directed(), true);
        for v in self.inner.vertices() {
            let neighbors = self
                .inner
                .out_entries(v)
                .map(|(w, &weight)| (w, EdgeData::with_weight(weight)))
                .collect();
            doc.adjacencies.insert(v, neighbors);
        }
        doc.vertex_labels = self.inner.labels().clone();
        SerializedGraph::Adjacency(doc)
    }

    fn to_any(&self) -> AnyGraph {
        AnyGraph::Weighted(self.clone())
    }
}

impl Weighted for WeightedGraph {
    fn edge_weight(&self, a: VertexId, b: VertexId) -> Option<f64> {
        self.inner.get(a, b).copied()
    }
}
