//! Random graph generators shared by the integration suites.

#![allow(dead_code)]

use graphstep_core::prelude::*;
use rand::rngs::StdRng;
use rand::Rng;

/// Edge list of a random connected graph on `n` vertices.
///
/// A random spanning tree guarantees connectivity; every other pair is added
/// with probability `density`. Weights are small integers so sums are exact.
pub fn connected_edges(rng: &mut StdRng, n: u32, density: f64) -> Vec<(u32, u32, f64)> {
    let mut edges = Vec::new();
    for v in 1..n {
        let parent = rng.gen_range(0..v);
        edges.push((parent, v, rng.gen_range(1..=9) as f64));
    }
    for a in 0..n {
        for b in (a + 1)..n {
            let present = edges.iter().any(|&(x, y, _)| (x, y) == (a, b));
            if !present && rng.gen_bool(density) {
                edges.push((a, b, rng.gen_range(1..=9) as f64));
            }
        }
    }
    edges
}

/// Random connected weighted undirected graph.
pub fn connected_weighted(rng: &mut StdRng, n: u32, density: f64) -> WeightedGraph {
    WeightedGraph::from_edges(n, &connected_edges(rng, n, density)).unwrap()
}

/// Random directed weighted graph, not necessarily strongly connected.
pub fn random_directed(rng: &mut StdRng, n: u32, density: f64) -> WeightedGraph {
    let mut edges = Vec::new();
    for a in 0..n {
        for b in 0..n {
            if a != b && rng.gen_bool(density) {
                edges.push((a, b, rng.gen_range(1..=9) as f64));
            }
        }
    }
    WeightedGraph::from_edges_directed(n, &edges, true).unwrap()
}

/// Random unweighted undirected graph, possibly disconnected.
pub fn random_unweighted(rng: &mut StdRng, n: u32, density: f64) -> UnweightedGraph {
    let mut edges = Vec::new();
    for a in 0..n {
        for b in (a + 1)..n {
            if rng.gen_bool(density) {
                edges.push((a, b));
            }
        }
    }
    UnweightedGraph::from_edges(n, &edges).unwrap()
}

/// `n` random points in a 100 x 100 square.
pub fn random_points(rng: &mut StdRng, n: usize) -> EuclideanGraph {
    let points: Vec<_> = (0..n)
        .map(|_| (rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)))
        .collect();
    EuclideanGraph::from_points(&points)
}

/// All permutations of `items`, by Heap's algorithm.
pub fn permutations(items: &[VertexId]) -> Vec<Vec<VertexId>> {
    fn heap(k: usize, items: &mut Vec<VertexId>, out: &mut Vec<Vec<VertexId>>) {
        if k <= 1 {
            out.push(items.clone());
            return;
        }
        for i in 0..k {
            heap(k - 1, items, out);
            if k % 2 == 0 {
                items.swap(i, k - 1);
            } else {
                items.swap(0, k - 1);
            }
        }
    }
    let mut items = items.to_vec();
    let mut out = Vec::new();
    heap(items.len(), &mut items, &mut out);
    out
}

/// Assert that a closed sequence visits every vertex exactly once.
pub fn assert_closed_tour(graph: &dyn Graph, sequence: &[VertexId]) {
    assert!(sequence.len() >= 3, "tour too short: {sequence:?}");
    assert_eq!(sequence.first(), sequence.last(), "tour not closed: {sequence:?}");
    let mut visited = sequence[..sequence.len() - 1].to_vec();
    visited.sort_unstable();
    assert_eq!(visited, graph.vertices(), "tour does not visit every vertex once");
}
