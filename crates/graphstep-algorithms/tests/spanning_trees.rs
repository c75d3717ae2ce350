//! Spanning tree properties checked against exhaustive enumeration.

mod common;

use graphstep_algorithms::prelude::*;
use graphstep_algorithms::union_find::count_components;
use graphstep_core::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Minimum weight over every subset of `n - 1` edges that spans the graph.
fn brute_force_mst(graph: &dyn Graph) -> f64 {
    let edges = graph.edges();
    let n = graph.vertex_count();
    let mut best = f64::INFINITY;
    for mask in 0u32..(1 << edges.len()) {
        if mask.count_ones() as usize != n - 1 {
            continue;
        }
        let chosen: Vec<_> = edges
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, e)| *e)
            .collect();
        let spans = count_components(graph.vertices(), chosen.iter().map(Edge::endpoints)) == 1;
        if spans {
            best = best.min(total_weight(&chosen));
        }
    }
    best
}

fn tree_weight(output: AlgorithmOutput) -> f64 {
    total_weight(&output.graph.unwrap().edges())
}

/// Kruskal and Prim agree with each other and with brute force.
#[test]
fn test_kruskal_and_prim_match_brute_force() {
    let mut rng = StdRng::seed_from_u64(7);
    for round in 0..40 {
        let n = 2 + round % 7;
        let graph = common::connected_weighted(&mut rng, n, 0.4);
        if graph.edge_count() > 16 {
            continue;
        }

        let kruskal = tree_weight(run_headless(&mut Kruskal::new(), &graph, &AlgorithmInput::None).unwrap());
        let prim = tree_weight(
            run_headless(&mut Prim::new(), &graph, &AlgorithmInput::Vertex(VertexId(0))).unwrap(),
        );
        let expected = brute_force_mst(&graph);
        assert_eq!(kruskal, expected, "Kruskal on {graph:?}");
        assert_eq!(prim, expected, "Prim on {graph:?}");
    }
}

/// Prim reaches the same weight from every start vertex.
#[test]
fn test_prim_start_vertex_irrelevant() {
    let mut rng = StdRng::seed_from_u64(11);
    let graph = common::connected_weighted(&mut rng, 8, 0.5);
    let weights: Vec<_> = graph
        .vertices()
        .into_iter()
        .map(|v| tree_weight(run_headless(&mut Prim::new(), &graph, &AlgorithmInput::Vertex(v)).unwrap()))
        .collect();
    assert!(weights.windows(2).all(|w| w[0] == w[1]), "{weights:?}");
}

/// The output tree spans every vertex with exactly |V|-1 edges.
#[test]
fn test_output_is_spanning_tree() {
    let mut rng = StdRng::seed_from_u64(3);
    let graph = common::connected_weighted(&mut rng, 12, 0.3);
    for output in [
        run_headless(&mut Kruskal::new(), &graph, &AlgorithmInput::None).unwrap(),
        run_headless(&mut Prim::new(), &graph, &AlgorithmInput::Vertex(VertexId(5))).unwrap(),
    ] {
        let tree = output.graph.unwrap();
        assert_eq!(tree.vertices(), graph.vertices());
        assert_eq!(tree.edge_count(), 11);
        assert!(is_connected(&tree));
        assert_eq!(output.message.unwrap().level, MessageLevel::Success);
    }
}

/// Selected edges in the decoration are exactly the tree edges.
#[test]
fn test_selected_edges_form_tree() {
    let mut rng = StdRng::seed_from_u64(5);
    let graph = common::connected_weighted(&mut rng, 9, 0.4);
    let decorator = MemoryDecorator::new(graph.clone());
    let mut kruskal = Kruskal::new();
    let output = HeadlessRunner::new()
        .run(&mut kruskal, &mut decorator.clone(), &AlgorithmInput::None)
        .unwrap();

    let mut selected = decorator.snapshot().edges_in_state(DecorationState::Selected);
    selected.sort_unstable();
    let mut tree: Vec<_> = output.graph.unwrap().edges().iter().map(Edge::endpoints).collect();
    tree.sort_unstable();
    assert_eq!(selected, tree);
}
