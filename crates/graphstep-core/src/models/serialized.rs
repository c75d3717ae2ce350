//! Persisted JSON form of a graph.
//!
//! Two document shapes exist:
//!
//! ```text
//! { "adjacencies": { "0": { "1": {} } }, "vertexLabels": { "0": "a" },
//!   "directed": false, "weighted": false }
//!
//! { "positions": { "0": { "x": 1.0, "y": 2.0 } }, "vertexLabels": { ... },
//!   "isEuclidean": true }
//! ```
//!
//! Edge data is `{}` for unweighted graphs, `{"weight": w}` for weighted ones
//! and `{"count": c}` for multigraphs (which also carry `"multigraph": true`).

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::any::AnyGraph;
use super::euclidean::EuclideanGraph;
use super::graph::Graph;
use super::ids::{Point, VertexId};
use super::multi::MultiGraph;
use super::unweighted::UnweightedGraph;
use super::weighted::WeightedGraph;
use crate::error::{GraphError, Result};

/// Data stored per adjacency entry.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EdgeData {
    /// Edge weight (weighted graphs only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    /// Edge multiplicity (multigraphs only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

impl EdgeData {
    /// Entry of a weighted graph.
    pub fn with_weight(weight: f64) -> Self {
        Self {
            weight: Some(weight),
            count: None,
        }
    }

    /// Entry of a multigraph.
    pub fn with_count(count: u32) -> Self {
        Self {
            weight: None,
            count: Some(count),
        }
    }
}

/// Document for the adjacency-backed kinds.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjacencyDocument {
    /// Vertex id to neighbor id to edge data.
    pub adjacencies: BTreeMap<VertexId, BTreeMap<VertexId, EdgeData>>,
    /// Vertex labels; missing entries default to the id.
    #[serde(default)]
    pub vertex_labels: BTreeMap<VertexId, String>,
    /// Whether edges are directed.
    #[serde(default)]
    pub directed: bool,
    /// Whether edges carry a weight.
    #[serde(default)]
    pub weighted: bool,
    /// Whether entries carry a multiplicity.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub multigraph: bool,
}

impl AdjacencyDocument {
    /// Empty document with the given flags.
    pub fn new(directed: bool, weighted: bool) -> Self {
        Self {
            directed,
            weighted,
            ..Self::default()
        }
    }

    fn into_graph(self) -> Result<AnyGraph> {
        if self.weighted && self.multigraph {
            return Err(GraphError::invalid_document(
                "a graph cannot be both weighted and a multigraph",
            ));
        }
        for (&v, neighbors) in &self.adjacencies {
            for &w in neighbors.keys() {
                if !self.adjacencies.contains_key(&w) {
                    return Err(GraphError::invalid_document(format!(
                        "vertex {v} lists unknown neighbor {w}"
                    )));
                }
            }
        }
        if let Some(v) = self
            .vertex_labels
            .keys()
            .find(|v| !self.adjacencies.contains_key(v))
        {
            return Err(GraphError::invalid_document(format!(
                "label given for unknown vertex {v}"
            )));
        }

        let mut graph = if self.multigraph {
            AnyGraph::Multi(MultiGraph::new(self.directed))
        } else if self.weighted {
            AnyGraph::Weighted(WeightedGraph::new(self.directed))
        } else {
            AnyGraph::Unweighted(UnweightedGraph::new(self.directed))
        };

        for &v in self.adjacencies.keys() {
            let label = self.vertex_labels.get(&v).cloned();
            match &mut graph {
                AnyGraph::Multi(g) => g.insert_vertex(v, label),
                AnyGraph::Weighted(g) => g.insert_vertex(v, label),
                AnyGraph::Unweighted(g) => g.insert_vertex(v, label),
                AnyGraph::Euclidean(_) => unreachable!("adjacency document never builds a Euclidean graph"),
            }
        }

        for (&a, neighbors) in &self.adjacencies {
            for (&b, data) in neighbors {
                let mirror = self.adjacencies.get(&b).and_then(|n| n.get(&a));
                if !self.directed && a > b {
                    if let Some(mirror) = mirror {
                        if mirror != data {
                            return Err(GraphError::invalid_document(format!(
                                "undirected edge {b}-{a} has differing data in each direction"
                            )));
                        }
                        continue;
                    }
                }
                self.insert_entry(&mut graph, a, b, data)?;
            }
        }

        Ok(graph)
    }

    fn insert_entry(&self, graph: &mut AnyGraph, a: VertexId, b: VertexId, data: &EdgeData) -> Result<()> {
        if self.multigraph {
            let count = data.count.unwrap_or(1);
            if count == 0 {
                return Err(GraphError::invalid_document(format!(
                    "edge {a}-{b} has zero multiplicity"
                )));
            }
            for _ in 0..count {
                graph.add_edge(a, b, None)?;
            }
            return Ok(());
        }
        if self.weighted && data.weight.is_none() {
            return Err(GraphError::invalid_document(format!(
                "edge {a}-{b} of a weighted graph has no weight"
            )));
        }
        graph.add_edge(a, b, data.weight)
    }
}

/// Document for Euclidean graphs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EuclideanDocument {
    /// Vertex positions.
    pub positions: BTreeMap<VertexId, Point>,
    /// Vertex labels; missing entries default to the id.
    #[serde(default)]
    pub vertex_labels: BTreeMap<VertexId, String>,
    /// Always `true`; distinguishes the document shape.
    #[serde(default)]
    pub is_euclidean: bool,
}

impl EuclideanDocument {
    fn into_graph(self) -> Result<AnyGraph> {
        if !self.is_euclidean {
            return Err(GraphError::invalid_document(
                "document with positions must set isEuclidean",
            ));
        }
        if let Some(v) = self
            .vertex_labels
            .keys()
            .find(|v| !self.positions.contains_key(v))
        {
            return Err(GraphError::invalid_document(format!(
                "label given for unknown vertex {v}"
            )));
        }
        let mut graph = EuclideanGraph::new();
        for (v, position) in self.positions {
            graph.insert_point(v, position, self.vertex_labels.get(&v).cloned());
        }
        Ok(AnyGraph::Euclidean(graph))
    }
}

/// Persisted form of any graph kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SerializedGraph {
    /// Positions document.
    Euclidean(EuclideanDocument),
    /// Adjacency document.
    Adjacency(AdjacencyDocument),
}

impl SerializedGraph {
    /// Rebuild the concrete graph kind described by this document.
    pub fn into_graph(self) -> Result<AnyGraph> {
        match self {
            SerializedGraph::Euclidean(doc) => doc.into_graph(),
            SerializedGraph::Adjacency(doc) => doc.into_graph(),
        }
    }

    /// Pick the document shape from its fields.
    pub fn from_value(value: Value) -> Result<Self> {
        let euclidean = value.get("positions").is_some()
            || value.get("isEuclidean").and_then(Value::as_bool) == Some(true);
        if euclidean {
            Ok(SerializedGraph::Euclidean(serde_json::from_value(value)?))
        } else {
            Ok(SerializedGraph::Adjacency(serde_json::from_value(value)?))
        }
    }

    /// Parse a JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Encode as compact JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Encode as indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// Integer map keys do not survive serde's buffered untagged decoding, so the
// shape is chosen on a `Value` whose map keys serde_json parses directly.
impl<'de> Deserialize<'de> for SerializedGraph {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(value).map_err(D::Error::custom)
    }
}
