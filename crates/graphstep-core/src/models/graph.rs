//! The graph contract shared by every graph kind.

use std::collections::{BTreeSet, VecDeque};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::any::AnyGraph;
use super::euclidean::EuclideanGraph;
use super::ids::{Edge, VertexId};
use super::serialized::SerializedGraph;
use crate::error::Result;

/// The concrete kind behind a [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GraphKind {
    /// Adjacency graph without edge data.
    Unweighted,
    /// Adjacency graph with a weight per edge.
    Weighted,
    /// Adjacency graph with an edge multiplicity per vertex pair.
    Multi,
    /// Implicit complete graph over points in the plane.
    Euclidean,
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphKind::Unweighted => write!(f, "unweighted"),
            GraphKind::Weighted => write!(f, "weighted"),
            GraphKind::Multi => write!(f, "multigraph"),
            GraphKind::Euclidean => write!(f, "Euclidean"),
        }
    }
}

/// Common contract of all graph kinds.
///
/// Vertex iteration is always in ascending id order so that algorithms built
/// on top of a graph step through the same sequence on every run.
pub trait Graph: fmt::Debug + Send + Sync {
    /// Concrete kind of this graph.
    fn kind(&self) -> GraphKind;

    /// Whether edges are directed.
    fn is_directed(&self) -> bool;

    /// Whether edges carry a weight.
    fn is_weighted(&self) -> bool {
        matches!(self.kind(), GraphKind::Weighted | GraphKind::Euclidean)
    }

    /// Whether a vertex pair may be joined by several edges.
    fn is_multigraph(&self) -> bool {
        self.kind() == GraphKind::Multi
    }

    /// All vertex ids, ascending.
    fn vertices(&self) -> Vec<VertexId>;

    /// Number of vertices.
    fn vertex_count(&self) -> usize {
        self.vertices().len()
    }

    /// Whether the vertex is part of the graph.
    fn contains_vertex(&self, v: VertexId) -> bool;

    /// Label of a vertex.
    fn vertex_label(&self, v: VertexId) -> Option<&str>;

    /// Replace the label of a vertex.
    fn set_vertex_label(&mut self, v: VertexId, label: String) -> Result<()>;

    /// Out-neighbors of a vertex (all neighbors for undirected graphs), ascending.
    fn neighbors(&self, v: VertexId) -> Vec<VertexId>;

    /// Neighbors including vertices with an edge pointing *to* `v`.
    ///
    /// Identical to [`Graph::neighbors`] for undirected graphs.
    fn neighbors_with_reverse(&self, v: VertexId) -> Vec<VertexId> {
        self.neighbors(v)
    }

    /// Number of edge endpoints at `v` (counting multiplicity).
    fn degree(&self, v: VertexId) -> usize {
        self.neighbors(v).len()
    }

    /// Every edge once; undirected edges oriented by ascending id.
    fn edges(&self) -> Vec<Edge>;

    /// Number of edges (counting multiplicity).
    fn edge_count(&self) -> usize {
        self.edges().len()
    }

    /// Whether an edge leads from `a` to `b` (in either direction if undirected).
    fn are_adjacent(&self, a: VertexId, b: VertexId) -> bool;

    /// Add a fresh vertex and return its id.
    fn add_vertex(&mut self) -> VertexId;

    /// Remove a vertex with all incident edges.
    fn remove_vertex(&mut self, v: VertexId) -> Result<()>;

    /// Add an edge. `weight` is ignored by unweighted kinds.
    fn add_edge(&mut self, a: VertexId, b: VertexId, weight: Option<f64>) -> Result<()>;

    /// Remove an edge (one instance of it for multigraphs).
    fn remove_edge(&mut self, a: VertexId, b: VertexId) -> Result<()>;

    /// Weight capability, when the kind has weighted edges.
    fn as_weighted(&self) -> Option<&dyn Weighted> {
        None
    }

    /// Geometry, when this is a Euclidean graph.
    fn as_euclidean(&self) -> Option<&EuclideanGraph> {
        None
    }

    /// Cost of travelling from `a` to `b`: the weight for weighted kinds,
    /// 1 for unweighted kinds, `None` if the vertices are not adjacent.
    fn edge_cost(&self, a: VertexId, b: VertexId) -> Option<f64> {
        if !self.are_adjacent(a, b) {
            return None;
        }
        match self.as_weighted() {
            Some(weighted) => weighted.edge_weight(a, b),
            None => Some(1.0),
        }
    }

    /// Persisted form of this graph.
    fn to_serialized(&self) -> SerializedGraph;

    /// Owned copy of this graph.
    fn to_any(&self) -> AnyGraph;
}

/// Capability of graph kinds whose edges carry weights.
pub trait Weighted: Graph {
    /// Weight of the edge from `a` to `b`, if present.
    fn edge_weight(&self, a: VertexId, b: VertexId) -> Option<f64>;
}

/// Connected components, treating directed edges as undirected.
///
/// Each component is returned as an ascending vertex list; components are
/// ordered by their smallest vertex.
pub fn connected_components(graph: &dyn Graph) -> Vec<Vec<VertexId>> {
    let mut seen = BTreeSet::new();
    let mut components = Vec::new();

    for start in graph.vertices() {
        if !seen.insert(start) {
            continue;
        }
        let mut component = vec![start];
        let mut queue = VecDeque::from([start]);
        while let Some(v) = queue.pop_front() {
            for w in graph.neighbors_with_reverse(v) {
                if seen.insert(w) {
                    component.push(w);
                    queue.push_back(w);
                }
            }
        }
        component.sort_unstable();
        components.push(component);
    }

    components
}

/// Number of connected components, treating directed edges as undirected.
pub fn component_count(graph: &dyn Graph) -> usize {
    connected_components(graph).len()
}

/// Whether the graph is a single connected component (vacuously true when empty).
pub fn is_connected(graph: &dyn Graph) -> bool {
    component_count(graph) <= 1
}

/// Vertices with odd degree, ascending.
pub fn odd_degree_vertices(graph: &dyn Graph) -> Vec<VertexId> {
    graph
        .vertices()
        .into_iter()
        .filter(|&v| graph.degree(v) % 2 == 1)
        .collect()
}

/// Smallest unused vertex id following the current largest one.
pub(crate) fn next_vertex_id(vertices: impl Iterator<Item = VertexId>) -> VertexId {
    vertices.max().map(|v| v.next()).unwrap_or_default()
}
