//! Identifier and geometry types shared by every graph kind.
//!
//! - [`VertexId`]: unique integer identifier of a vertex
//! - [`Point`]: 2D position of a vertex in a Euclidean graph
//! - [`Edge`]: an edge as reported by [`Graph::edges`](super::Graph::edges)

use std::fmt;

use serde::{Deserialize, Serialize};

/// Vertex identifier.
///
/// Using a newtype prevents mixing up vertex ids with counts, indices and
/// weights. Serialized as a bare integer (and as a string when used as a JSON
/// object key).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
#[repr(transparent)]
pub struct VertexId(pub u32);

impl VertexId {
    /// Create a new vertex id.
    pub const fn new(id: u32) -> Self {
        VertexId(id)
    }

    /// Get the inner value.
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// The id following this one.
    pub const fn next(&self) -> Self {
        VertexId(self.0.saturating_add(1))
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for VertexId {
    fn from(id: u32) -> Self {
        VertexId(id)
    }
}

impl From<VertexId> for u32 {
    fn from(id: VertexId) -> Self {
        id.0
    }
}

/// Normalize an undirected vertex pair so the smaller id comes first.
pub fn ordered_pair(a: VertexId, b: VertexId) -> (VertexId, VertexId) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Position of a vertex in the plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// An edge as reported by a graph.
///
/// Undirected edges are reported once with `from < to`. `weight` is `None` for
/// unweighted graph kinds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Tail (or smaller endpoint for undirected graphs).
    pub from: VertexId,
    /// Head (or larger endpoint for undirected graphs).
    pub to: VertexId,
    /// Edge weight, if the graph is weighted.
    pub weight: Option<f64>,
}

impl Edge {
    /// Create an unweighted edge.
    pub const fn new(from: VertexId, to: VertexId) -> Self {
        Self {
            from,
            to,
            weight: None,
        }
    }

    /// Create a weighted edge.
    pub const fn weighted(from: VertexId, to: VertexId, weight: f64) -> Self {
        Self {
            from,
            to,
            weight: Some(weight),
        }
    }

    /// Weight of the edge, treating unweighted edges as unit cost.
    pub fn cost(&self) -> f64 {
        self.weight.unwrap_or(1.0)
    }

    /// Endpoints as a tuple.
    pub const fn endpoints(&self) -> (VertexId, VertexId) {
        (self.from, self.to)
    }
}

/// Sum of the weights of a set of edges (unit cost for unweighted edges).
pub fn total_weight(edges: &[Edge]) -> f64 {
    edges.iter().map(Edge::cost).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_id_basics() {
        let v = VertexId::new(42);
        assert_eq!(v.get(), 42);
        assert_eq!(v.next(), VertexId(43));
        assert_eq!(v.to_string(), "42");
    }

    #[test]
    fn test_vertex_id_conversions() {
        let v: VertexId = 100u32.into();
        let raw: u32 = v.into();
        assert_eq!(raw, 100);
    }

    #[test]
    fn test_vertex_id_as_json_key() {
        let mut map = std::collections::BTreeMap::new();
        map.insert(VertexId(3), "three");
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"3":"three"}"#);

        let back: std::collections::BTreeMap<VertexId, String> =
            serde_json::from_str(&json).unwrap();
        assert_eq!(back[&VertexId(3)], "three");
    }

    #[test]
    fn test_ordered_pair() {
        assert_eq!(
            ordered_pair(VertexId(5), VertexId(2)),
            (VertexId(2), VertexId(5))
        );
        assert_eq!(
            ordered_pair(VertexId(1), VertexId(2)),
            (VertexId(1), VertexId(2))
        );
    }

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_total_weight() {
        let edges = [
            Edge::weighted(VertexId(0), VertexId(1), 2.5),
            Edge::new(VertexId(1), VertexId(2)),
        ];
        assert!((total_weight(&edges) - 3.5).abs() < 1e-12);
    }
}
