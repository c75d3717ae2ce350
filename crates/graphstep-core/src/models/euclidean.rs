//! Implicit complete graph over points in the plane.

use std::collections::BTreeMap;

use super::any::AnyGraph;
use super::graph::{next_vertex_id, Graph, GraphKind, Weighted};
use super::ids::{Edge, Point, VertexId};
use super::serialized::{EuclideanDocument, SerializedGraph};
use crate::error::{GraphError, Result};

/// Complete undirected graph whose edge weights are the distances between
/// vertex positions.
///
/// There is no edge storage: every pair of distinct vertices is adjacent.
/// Adding an edge between existing vertices is accepted and changes nothing;
/// removing one is unsupported since it would make the graph incomplete.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EuclideanGraph {
    positions: BTreeMap<VertexId, Point>,
    labels: BTreeMap<VertexId, String>,
}

impl EuclideanGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph with vertices `0..points.len()` at the given coordinates.
    ///
    /// # Example
    ///
    /// ```
    /// use graphstep_core::models::{EuclideanGraph, Graph, VertexId};
    ///
    /// let g = EuclideanGraph::from_points(&[(0.0, 0.0), (3.0, 4.0)]);
    /// assert_eq!(g.distance(VertexId(0), VertexId(1)), Some(5.0));
    /// assert_eq!(g.edge_count(), 1);
    /// ```
    pub fn from_points(points: &[(f64, f64)]) -> Self {
        let mut graph = Self::new();
        for &(x, y) in points {
            graph.add_point(x, y);
        }
        graph
    }

    /// Add a vertex at `(x, y)` and return its id.
    pub fn add_point(&mut self, x: f64, y: f64) -> VertexId {
        let id = next_vertex_id(self.positions.keys().copied());
        self.insert_point(id, Point::new(x, y), None);
        id
    }

    /// Insert a vertex with a chosen id; the label defaults to the id.
    pub fn insert_point(&mut self, id: VertexId, position: Point, label: Option<String>) {
        self.positions.insert(id, position);
        self.labels
            .entry(id)
            .or_insert_with(|| label.unwrap_or_else(|| id.to_string()));
    }

    /// Position of a vertex.
    pub fn position(&self, v: VertexId) -> Option<Point> {
        self.positions.get(&v).copied()
    }

    /// Move a vertex.
    pub fn set_position(&mut self, v: VertexId, position: Point) -> Result<()> {
        let slot = self
            .positions
            .get_mut(&v)
            .ok_or(GraphError::UnknownVertex(v))?;
        *slot = position;
        Ok(())
    }

    /// Distance between two vertices.
    pub fn distance(&self, a: VertexId, b: VertexId) -> Option<f64> {
        Some(self.positions.get(&a)?.distance(self.positions.get(&b)?))
    }
}

impl Graph for EuclideanGraph {
    fn kind(&self) -> GraphKind {
        GraphKind::Euclidean
    }

    fn is_directed(&self) -> bool {
        false
    }

    fn vertices(&self) -> Vec<VertexId> {
        self.positions.keys().copied().collect()
    }

    fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    fn contains_vertex(&self, v: VertexId) -> bool {
        self.positions.contains_key(&v)
    }

    fn vertex_label(&self, v: VertexId) -> Option<&str> {
        self.labels.get(&v).map(String::as_str)
    }

    fn set_vertex_label(&mut self, v: VertexId, label: String) -> Result<()> {
        if !self.contains_vertex(v) {
            return Err(GraphError::UnknownVertex(v));
        }
        self.labels.insert(v, label);
        Ok(())
    }

    fn neighbors(&self, v: VertexId) -> Vec<VertexId> {
        if !self.contains_vertex(v) {
            return Vec::new();
        }
        self.positions.keys().copied().filter(|&w| w != v).collect()
    }

    fn degree(&self, v: VertexId) -> usize {
        if self.contains_vertex(v) {
            self.positions.len() - 1
        } else {
            0
        }
    }

    fn edges(&self) -> Vec<Edge> {
        let points: Vec<_> = self.positions.iter().collect();
        let mut edges = Vec::with_capacity(points.len() * points.len().saturating_sub(1) / 2);
        for (i, (&a, pa)) in points.iter().enumerate() {
            for (&b, pb) in &points[i + 1..] {
                edges.push(Edge::weighted(a, b, pa.distance(pb)));
            }
        }
        edges
    }

    fn edge_count(&self) -> usize {
        let n = self.positions.len();
        n * n.saturating_sub(1) / 2
    }

    fn are_adjacent(&self, a: VertexId, b: VertexId) -> bool {
        a != b && self.contains_vertex(a) && self.contains_vertex(b)
    }

    /// Adds a vertex at the origin; use [`EuclideanGraph::add_point`] to place it.
    fn add_vertex(&mut self) -> VertexId {
        self.add_point(0.0, 0.0)
    }

    fn remove_vertex(&mut self, v: VertexId) -> Result<()> {
        if self.positions.remove(&v).is_none() {
            return Err(GraphError::UnknownVertex(v));
        }
        self.labels.remove(&v);
        Ok(())
    }

    fn add_edge(&mut self, a: VertexId, b: VertexId, _weight: Option<f64>) -> Result<()> {
        for v in [a, b] {
            if !self.contains_vertex(v) {
                return Err(GraphError::UnknownVertex(v));
            }
        }
        if a == b {
            return Err(GraphError::SelfLoop(a));
        }
        Ok(())
    }

    fn remove_edge(&mut self, a: VertexId, b: VertexId) -> Result<()> {
        Err(GraphError::unsupported(format!(
            "cannot remove edge {a}-{b} from a complete Euclidean graph"
        )))
    }

    fn as_weighted(&self) -> Option<&dyn Weighted> {
        Some(self)
    }

    fn as_euclidean(&self) -> Option<&EuclideanGraph> {
        Some(self)
    }

    fn to_serialized(&self) -> SerializedGraph {
        SerializedGraph::Euclidean(EuclideanDocument {
            positions: self.positions.clone(),
            vertex_labels: self.labels.clone(),
            is_euclidean: true,
        })
    }

    fn to_any(&self) -> AnyGraph {
        AnyGraph::Euclidean(self.clone())
    }
}

impl Weighted for EuclideanGraph {
    fn edge_weight(&self, a: VertexId, b: VertexId) -> Option<f64> {
        if a == b {
            return None;
        }
        self.distance(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> EuclideanGraph {
        EuclideanGraph::from_points(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
    }

    #[test]
    fn test_complete_adjacency() {
        let g = square();
        assert_eq!(g.vertex_count(), 4);
        assert_eq!(g.edge_count(), 6);
        assert_eq!(g.edges().len(), 6);
        assert_eq!(g.neighbors(VertexId(2)), vec![VertexId(0), VertexId(1), VertexId(3)]);
        assert!(g.are_adjacent(VertexId(0), VertexId(2)));
        assert!(!g.are_adjacent(VertexId(0), VertexId(0)));
    }

    #[test]
    fn test_weights_are_distances() {
        let g = square();
        let diagonal = g.edge_weight(VertexId(0), VertexId(2)).unwrap();
        assert!((diagonal - 2f64.sqrt()).abs() < 1e-12);
        assert_eq!(g.edge_cost(VertexId(1), VertexId(0)), Some(1.0));
        assert!(g.is_weighted());
        assert!(!g.is_directed());
    }

    #[test]
    fn test_edge_mutation() {
        let mut g = square();
        g.add_edge(VertexId(0), VertexId(1), None).unwrap();
        assert_eq!(g.edge_count(), 6);
        assert!(matches!(
            g.remove_edge(VertexId(0), VertexId(1)),
            Err(GraphError::Unsupported(_))
        ));
        assert!(g.add_edge(VertexId(0), VertexId(9), None).is_err());
    }

    #[test]
    fn test_remove_vertex() {
        let mut g = square();
        g.remove_vertex(VertexId(1)).unwrap();
        assert_eq!(g.edge_count(), 3);
        assert!(g.vertex_label(VertexId(1)).is_none());
        assert_eq!(g.add_point(5.0, 5.0), VertexId(4));
    }
}
