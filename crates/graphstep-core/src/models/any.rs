//! Owned sum type over the four graph kinds.

use super::euclidean::EuclideanGraph;
use super::graph::{Graph, GraphKind, Weighted};
use super::ids::{Edge, VertexId};
use super::multi::MultiGraph;
use super::serialized::SerializedGraph;
use super::unweighted::UnweightedGraph;
use super::weighted::WeightedGraph;
use crate::error::Result;

/// Any concrete graph, owned.
///
/// Implements [`Graph`] by delegating to the wrapped kind.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyGraph {
    /// Graph without edge data.
    Unweighted(UnweightedGraph),
    /// Graph with edge weights.
    Weighted(WeightedGraph),
    /// Graph with parallel edges.
    Multi(MultiGraph),
    /// Complete geometric graph.
    Euclidean(EuclideanGraph),
}

impl AnyGraph {
    /// Parse a persisted JSON document into the graph kind it describes.
    pub fn from_json(json: &str) -> Result<Self> {
        SerializedGraph::from_json(json)?.into_graph()
    }

    /// Encode as a persisted JSON document.
    pub fn to_json(&self) -> Result<String> {
        self.to_serialized().to_json()
    }

    fn inner(&self) -> &dyn Graph {
        match self {
            AnyGraph::Unweighted(g) => g,
            AnyGraph::Weighted(g) => g,
            AnyGraph::Multi(g) => g,
            AnyGraph::Euclidean(g) => g,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Graph {
        match self {
            AnyGraph::Unweighted(g) => g,
            AnyGraph::Weighted(g) => g,
            AnyGraph::Multi(g) => g,
            AnyGraph::Euclidean(g) => g,
        }
    }
}

impl Graph for AnyGraph {
    fn kind(&self) -> GraphKind {
        self.inner().kind()
    }

    fn is_directed(&self) -> bool {
        self.inner().is_directed()
    }

    fn vertices(&self) -> Vec<VertexId> {
        self.inner().vertices()
    }

    fn vertex_count(&self) -> usize {
        self.inner().vertex_count()
    }

    fn contains_vertex(&self, v: VertexId) -> bool {
        self.inner().contains_vertex(v)
    }

    fn vertex_label(&self, v: VertexId) -> Option<&str> {
        self.inner().vertex_label(v)
    }

    fn set_vertex_label(&mut self, v: VertexId, label: String) -> Result<()> {
        self.inner_mut().set_vertex_label(v, label)
    }

    fn neighbors(&self, v: VertexId) -> Vec<VertexId> {
        self.inner().neighbors(v)
    }

    fn neighbors_with_reverse(&self, v: VertexId) -> Vec<VertexId> {
        self.inner().neighbors_with_reverse(v)
    }

    fn degree(&self, v: VertexId) -> usize {
        self.inner().degree(v)
    }

    fn edges(&self) -> Vec<Edge> {
        self.inner().edges()
    }

    fn edge_count(&self) -> usize {
        self.inner().edge_count()
    }

    fn are_adjacent(&self, a: VertexId, b: VertexId) -> bool {
        self.inner().are_adjacent(a, b)
    }

    fn add_vertex(&mut self) -> VertexId {
        self.inner_mut().add_vertex()
    }

    fn remove_vertex(&mut self, v: VertexId) -> Result<()> {
        self.inner_mut().remove_vertex(v)
    }

    fn add_edge(&mut self, a: VertexId, b: VertexId, weight: Option<f64>) -> Result<()> {
        self.inner_mut().add_edge(a, b, weight)
    }

    fn remove_edge(&mut self, a: VertexId, b: VertexId) -> Result<()> {
        self.inner_mut().remove_edge(a, b)
    }

    fn as_weighted(&self) -> Option<&dyn Weighted> {
        self.inner().as_weighted()
    }

    fn as_euclidean(&self) -> Option<&EuclideanGraph> {
        self.inner().as_euclidean()
    }

    fn edge_cost(&self, a: VertexId, b: VertexId) -> Option<f64> {
        self.inner().edge_cost(a, b)
    }

    fn to_serialized(&self) -> SerializedGraph {
        self.inner().to_serialized()
    }

    fn to_any(&self) -> AnyGraph {
        self.clone()
    }
}

impl From<UnweightedGraph> for AnyGraph {
    fn from(g: UnweightedGraph) -> Self {
        AnyGraph::Unweighted(g)
    }
}

impl From<WeightedGraph> for AnyGraph {
    fn from(g: WeightedGraph) -> Self {
        AnyGraph::Weighted(g)
    }
}

impl From<MultiGraph> for AnyGraph {
    fn from(g: MultiGraph) -> Self {
        AnyGraph::Multi(g)
    }
}

impl From<EuclideanGraph> for AnyGraph {
    fn from(g: EuclideanGraph) -> Self {
        AnyGraph::Euclidean(g)
    }
}
