//! Tour heuristics on random point sets, measured against the optimum.

mod common;

use graphstep_algorithms::prelude::*;
use graphstep_algorithms::tour_length;
use graphstep_core::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const EPSILON: f64 = 1e-6;

fn closed_length(graph: &EuclideanGraph, sequence: &[VertexId]) -> f64 {
    tour_length(graph, &sequence[..sequence.len() - 1])
}

fn optimum(graph: &EuclideanGraph) -> f64 {
    let output = run_headless(&mut HeldKarpTsp::new(), graph, &AlgorithmInput::None).unwrap();
    closed_length(graph, &output.sequence.unwrap())
}

fn heuristics() -> Vec<(Box<dyn Algorithm>, AlgorithmInput)> {
    let start = AlgorithmInput::Vertex(VertexId(0));
    let none = AlgorithmInput::None;
    vec![
        (Box::new(NearestNeighbor::new()) as Box<dyn Algorithm>, start),
        (Box::new(NearestInsertion::new()) as Box<dyn Algorithm>, none),
        (Box::new(CheapestInsertion::new()) as Box<dyn Algorithm>, none),
        (Box::new(MstShortcut::new()) as Box<dyn Algorithm>, none),
        (Box::new(Christofides::new()) as Box<dyn Algorithm>, none),
    ]
}

/// Every heuristic returns a closed tour through every point.
#[test]
fn test_heuristics_return_valid_tours() {
    let mut rng = StdRng::seed_from_u64(51);
    for _ in 0..10 {
        let n = rng.gen_range(3..=15);
        let graph = common::random_points(&mut rng, n);
        for (mut algorithm, input) in heuristics() {
            let output = run_headless(algorithm.as_mut(), &graph, &input).unwrap();
            let sequence = output.sequence.unwrap();
            common::assert_closed_tour(&graph, &sequence);
            assert_eq!(
                output.message.unwrap().level,
                MessageLevel::Success,
                "{}",
                algorithm.short_name()
            );
            let tour = output.graph.unwrap();
            assert_eq!(tour.edge_count(), n, "{}", algorithm.short_name());
        }
    }
}

/// No heuristic beats the optimum; the approximations stay within their bounds.
#[test]
fn test_approximation_ratios() {
    let mut rng = StdRng::seed_from_u64(52);
    for _ in 0..12 {
        let n = rng.gen_range(3..=8);
        let graph = common::random_points(&mut rng, n);
        let best = optimum(&graph);

        for (mut algorithm, input) in heuristics() {
            let output = run_headless(algorithm.as_mut(), &graph, &input).unwrap();
            let length = closed_length(&graph, &output.sequence.unwrap());
            assert!(length + EPSILON >= best, "{} beat the optimum", algorithm.short_name());
        }

        let mst = run_headless(&mut MstShortcut::new(), &graph, &AlgorithmInput::None).unwrap();
        let mst = closed_length(&graph, &mst.sequence.unwrap());
        assert!(mst <= 2.0 * best + EPSILON, "MST shortcut {mst} vs {best}");

        let chr = run_headless(&mut Christofides::new(), &graph, &AlgorithmInput::None).unwrap();
        let chr = closed_length(&graph, &chr.sequence.unwrap());
        assert!(chr <= 1.5 * best + EPSILON, "Christofides {chr} vs {best}");
    }
}

/// Points on a convex polygon have the perimeter as their unique optimum,
/// which nearest neighbor follows from any start.
#[test]
fn test_convex_polygon() {
    let points: Vec<_> = (0..8)
        .map(|i| {
            let angle = std::f64::consts::TAU / 8.0 * i as f64;
            (10.0 * angle.cos(), 10.0 * angle.sin())
        })
        .collect();
    let graph = EuclideanGraph::from_points(&points);
    let perimeter = optimum(&graph);
    let side = graph.distance(VertexId(0), VertexId(1)).unwrap();
    assert!((perimeter - 8.0 * side).abs() < EPSILON);

    let input = AlgorithmInput::Vertex(VertexId(3));
    let output = run_headless(&mut NearestNeighbor::new(), &graph, &input).unwrap();
    assert!((closed_length(&graph, &output.sequence.unwrap()) - perimeter).abs() < EPSILON);
}

/// A Christofides run above its exact matching limit still yields a valid
/// tour, and says that the matching was approximate.
#[test]
fn test_christofides_approximate_matching() {
    let mut rng = StdRng::seed_from_u64(53);
    let graph = common::random_points(&mut rng, 12);
    let config = ChristofidesConfig::new().with_exact_matching_limit(0);
    let output =
        run_headless(&mut Christofides::with_config(config), &graph, &AlgorithmInput::None).unwrap();
    common::assert_closed_tour(&graph, &output.sequence.unwrap());
    assert_eq!(output.message.unwrap().level, MessageLevel::Warning);
}
