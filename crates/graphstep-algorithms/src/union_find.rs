//! Disjoint-set forest over vertex ids.
//!
//! Every vertex maps directly to its set's representative:
//! - `find(v)`: one map lookup
//! - `union(a, b)`: relabels every member of one set, O(V) per merge

use std::collections::BTreeMap;

use graphstep_core::models::{Edge, VertexId};

/// Disjoint sets keyed by vertex id.
#[derive(Debug, Clone, Default)]
pub struct DisjointSet {
    representative: BTreeMap<VertexId, VertexId>,
    num_sets: usize,
}

impl DisjointSet {
    /// Create singleton sets for the given vertices.
    pub fn new(vertices: impl IntoIterator<Item = VertexId>) -> Self {
        let representative: BTreeMap<_, _> = vertices.into_iter().map(|v| (v, v)).collect();
        let num_sets = representative.len();
        Self {
            representative,
            num_sets,
        }
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.representative.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.representative.is_empty()
    }

    /// Number of disjoint sets.
    pub fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Representative of the vertex's set, `None` for unknown vertices.
    pub fn find(&self, v: VertexId) -> Option<VertexId> {
        self.representative.get(&v).copied()
    }

    /// Check if two vertices are in the same set.
    pub fn connected(&self, a: VertexId, b: VertexId) -> bool {
        match (self.find(a), self.find(b)) {
            (Some(ra), Some(rb)) => ra == rb,
            _ => false,
        }
    }

    /// Merge the sets of `a` and `b`.
    ///
    /// Returns true if a merge occurred (a and b were in different sets).
    pub fn union(&mut self, a: VertexId, b: VertexId) -> bool {
        let (Some(ra), Some(rb)) = (self.find(a), self.find(b)) else {
            return false;
        };
        if ra == rb {
            return false;
        }

        for rep in self.representative.values_mut() {
            if *rep == rb {
                *rep = ra;
            }
        }
        self.num_sets -= 1;
        true
    }
}

/// Number of connected components spanned by `vertices` and `edges`.
pub fn count_components(
    vertices: impl IntoIterator<Item = VertexId>,
    edges: impl IntoIterator<Item = (VertexId, VertexId)>,
) -> usize {
    let mut sets = DisjointSet::new(vertices);
    for (a, b) in edges {
        sets.union(a, b);
    }
    sets.num_sets()
}

/// Whether removing one instance of the edge `a`-`b` disconnects its endpoints.
///
/// Compares the component count with and without that edge instance, so a
/// parallel edge is never a bridge.
pub fn is_bridge(vertices: &[VertexId], edges: &[Edge], a: VertexId, b: VertexId) -> bool {
    let all = edges.iter().map(Edge::endpoints);
    let with = count_components(vertices.iter().copied(), all);

    let mut skipped = false;
    let without_edge = edges.iter().map(Edge::endpoints).filter(|&(x, y)| {
        let matches = (x, y) == (a, b) || (x, y) == (b, a);
        if matches && !skipped {
            skipped = true;
            return false;
        }
        true
    });
    let without = count_components(vertices.iter().copied(), without_edge);
    without > with
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: u32) -> Vec<VertexId> {
        (0..n).map(VertexId).collect()
    }

    #[test]
    fn test_singletons() {
        let sets = DisjointSet::new(ids(4));
        assert_eq!(sets.num_sets(), 4);
        assert_eq!(sets.find(VertexId(2)), Some(VertexId(2)));
        assert!(!sets.connected(VertexId(0), VertexId(1)));
    }

    #[test]
    fn test_union_relabels() {
        let mut sets = DisjointSet::new(ids(5));
        assert!(sets.union(VertexId(0), VertexId(1)));
        assert!(sets.union(VertexId(2), VertexId(3)));
        assert!(sets.union(VertexId(1), VertexId(3)));
        assert!(!sets.union(VertexId(0), VertexId(2)));

        assert_eq!(sets.num_sets(), 2);
        assert_eq!(sets.find(VertexId(3)), Some(VertexId(0)));
        assert!(sets.connected(VertexId(2), VertexId(1)));
        assert!(!sets.connected(VertexId(4), VertexId(0)));
    }

    #[test]
    fn test_unknown_vertices() {
        let mut sets = DisjointSet::new(ids(2));
        assert_eq!(sets.find(VertexId(9)), None);
        assert!(!sets.union(VertexId(0), VertexId(9)));
    }

    #[test]
    fn test_bridge_detection() {
        // Triangle 0-1-2 plus pendant edge 2-3.
        let edges = [
            Edge::new(VertexId(0), VertexId(1)),
            Edge::new(VertexId(1), VertexId(2)),
            Edge::new(VertexId(0), VertexId(2)),
            Edge::new(VertexId(2), VertexId(3)),
        ];
        let vertices = ids(4);
        assert!(!is_bridge(&vertices, &edges, VertexId(0), VertexId(1)));
        assert!(is_bridge(&vertices, &edges, VertexId(3), VertexId(2)));
    }

    #[test]
    fn test_parallel_edge_is_not_bridge() {
        let edges = [
            Edge::new(VertexId(0), VertexId(1)),
            Edge::new(VertexId(0), VertexId(1)),
        ];
        assert!(!is_bridge(&ids(2), &edges, VertexId(0), VertexId(1)));
        assert!(is_bridge(&ids(2), &edges[..1], VertexId(0), VertexId(1)));
    }
}
