//! Graph without edge data.

use super::adjacency::Adjacency;
use super::any::AnyGraph;
use super::graph::{Graph, GraphKind};
use super::ids::{Edge, VertexId};
use super::serialized::{AdjacencyDocument, EdgeData, SerializedGraph};
use crate::error::Result;

/// Directed or undirected graph whose edges carry no data.
#[derive(Debug, Clone, PartialEq)]
pub struct UnweightedGraph {
    inner: Adjacency<()>,
}

impl UnweightedGraph {
    /// Create an empty graph.
    pub fn new(directed: bool) -> Self {
        Self {
            inner: Adjacency::new(directed),
        }
    }

    /// Create an undirected graph with vertices `0..n` and the given edges.
    ///
    /// # Example
    ///
    /// ```
    /// use graphstep_core::models::{Graph, UnweightedGraph};
    ///
    /// // Path: 0 - 1 - 2
    /// let g = UnweightedGraph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
    /// assert_eq!(g.edge_count(), 2);
    /// ```
    pub fn from_edges(n: u32, edges: &[(u32, u32)]) -> Result<Self> {
        let mut graph = Self::new(false);
        for id in 0..n {
            graph.insert_vertex(VertexId(id), None);
        }
        for &(a, b) in edges {
            graph.add_edge(VertexId(a), VertexId(b), None)?;
        }
        Ok(graph)
    }

    /// Insert a vertex with a chosen id; the label defaults to the id.
    pub fn insert_vertex(&mut self, id: VertexId, label: Option<String>) {
        self.inner.insert_vertex(id, label);
    }
}

impl Graph for UnweightedGraph {
    fn kind(&self) -> GraphKind {
        GraphKind::Unweighted
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
            .map(|(a, b, ())| Edge::new(a, b))
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

    fn add_edge(&mut self, a: VertexId, b: VertexId, _weight: Option<f64>) -> Result<()> {
        self.inner.put(a, b, ())
    }

    fn remove_edge(&mut self, a: VertexId, b: VertexId) -> Result<()> {
        self.inner.take(a, b)
    }

    fn to_serialized(&self) -> SerializedGraph {
        let mut doc = AdjacencyDocument::new(self.is_directed(), false);
        for v in self.inner.vertices() {
            let neighbors = self
                .inner
                .out_entries(v)
                .map(|(w, ())| (w, EdgeData::default()))
                .collect();
            doc.adjacencies.insert(v, neighbors);
        }
        doc.vertex_labels = self.inner.labels().clone();
        SerializedGraph::Adjacency(doc)
    }

    fn to_any(&self) -> AnyGraph {
        AnyGraph::Unweighted(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_edges() {
        let g = UnweightedGraph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.edge_count(), 4);
        assert!(g.are_adjacent(VertexId(0), VertexId(3)));
        assert!(g.are_adjacent(VertexId(3), VertexId(0)));
        assert!(!g.is_weighted());
    }

    #[test]
    fn test_edges_reported_once_ascending() {
        let g = UnweightedGraph::from_edges(3, &[(2, 0), (1, 2)]).unwrap();
        let edges: Vec<_> = g.edges().iter().map(Edge::endpoints).collect();
        assert_eq!(
            edges,
            vec![(VertexId(0), VertexId(2)), (VertexId(1), VertexId(2))]
        );
    }

    #[test]
    fn test_remove_edge() {
        let mut g = UnweightedGraph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        g.remove_edge(VertexId(1), VertexId(0)).unwrap();
        assert!(!g.are_adjacent(VertexId(0), VertexId(1)));
        assert!(g.remove_edge(VertexId(0), VertexId(1)).is_err());
        assert_eq!(g.degree(VertexId(1)), 1);
    }
}
