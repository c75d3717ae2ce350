//! Kruskal's minimum spanning tree.
//!
//! Edges are sorted descending so the cheapest remaining edge is popped from
//! the end. Each edge takes two checkpoints: marked `Considering`, then
//! `Selected` (joins two sets) or `Disabled` (would close a cycle).

use graphstep_core::prelude::*;
use tracing::debug;

use crate::support::{add_output_edge, weighted_skeleton};
use crate::union_find::DisjointSet;

#[derive(Debug)]
struct KruskalState {
    /// Unconsidered edges, most expensive first.
    remaining: Vec<Edge>,
    sets: DisjointSet,
    tree: WeightedGraph,
    total: f64,
    accepted: usize,
    target: usize,
    /// Edge shown as `Considering`, resolved by the next step.
    considering: Option<Edge>,
}

/// Kruskal's minimum spanning tree.
#[derive(Debug, Default)]
pub struct Kruskal {
    run: RunState<KruskalState>,
}

impl Kruskal {
    /// Create the algorithm.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Algorithm for Kruskal {
    fn full_name(&self) -> &'static str {
        "Kruskal's minimum spanning tree"
    }

    fn short_name(&self) -> &'static str {
        "Kruskal"
    }

    fn input_kind(&self) -> InputKind {
        InputKind::None
    }

    fn initialize(&mut self, graph: &dyn Graph, input: &AlgorithmInput) -> AlgorithmResult<()> {
        precondition::check_input(graph, self.input_kind(), input)?;
        precondition::require_directed(graph, false)?;
        precondition::require_weighted(graph, true)?;
        precondition::require_connected(graph)?;

        let mut remaining = graph.edges();
        remaining.sort_by(|a, b| {
            b.cost()
                .total_cmp(&a.cost())
                .then_with(|| b.endpoints().cmp(&a.endpoints()))
        });
        debug!(
            "Kruskal over {} vertices and {} edges",
            graph.vertex_count(),
            remaining.len()
        );

        self.run.start(KruskalState {
            remaining,
            sets: DisjointSet::new(graph.vertices()),
            tree: weighted_skeleton(graph),
            total: 0.0,
            accepted: 0,
            target: graph.vertex_count().saturating_sub(1),
            considering: None,
        });
        Ok(())
    }

    fn step(&mut self, decorator: &mut dyn Decorator) -> AlgorithmResult<Step> {
        let state = self.run.running()?;

        if let Some(edge) = state.considering.take() {
            let (a, b) = edge.endpoints();
            if state.sets.union(a, b) {
                // Both endpoints are vertices of the tree skeleton.
                add_output_edge(&mut state.tree, a, b, Some(edge.cost()))?;
                state.total += edge.cost();
                state.accepted += 1;
                decorator.set_edge_state(a, b, DecorationState::Selected);
                decorator.set_vertex_state(a, DecorationState::Selected);
                decorator.set_vertex_state(b, DecorationState::Selected);
                decorator.set_status_line(&format!(
                    "Added edge {a}-{b} ({} of {} tree edges)",
                    state.accepted, state.target
                ));
            } else {
                decorator.set_edge_state(a, b, DecorationState::Disabled);
                decorator.set_status_line(&format!("Rejected edge {a}-{b}: it would form a cycle"));
            }
            return Ok(Step::Pending);
        }

        if state.accepted < state.target {
            if let Some(edge) = state.remaining.pop() {
                let (a, b) = edge.endpoints();
                decorator.set_edge_state(a, b, DecorationState::Considering);
                decorator.set_status_line(&format!(
                    "Considering edge {a}-{b} with weight {}",
                    format_distance(edge.cost())
                ));
                state.considering = Some(edge);
                return Ok(Step::Pending);
            }
        }

        let total = state.total;
        let tree = std::mem::replace(&mut state.tree, WeightedGraph::new(false));
        decorator.set_status_line(&format!(
            "Minimum spanning tree complete, total weight {}",
            format_distance(total)
        ));
        let output = AlgorithmOutput::new()
            .with_graph(tree)
            .with_name("Minimum spanning tree (Kruskal)")
            .with_message(Message::success(
                "Minimum spanning tree",
                format!("Total weight: {}", format_distance(total)),
            ));
        Ok(self.run.complete(output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_with_diagonal() -> WeightedGraph {
        WeightedGraph::from_edges(
            4,
            &[(0, 1, 1.0), (1, 2, 1.0), (0, 2, 1.5), (2, 3, 2.0), (3, 0, 3.0)],
        )
        .unwrap()
    }

    #[test]
    fn test_minimum_tree() {
        let g = square_with_diagonal();
        let output = run_headless(&mut Kruskal::new(), &g, &AlgorithmInput::None).unwrap();
        let tree = output.graph.unwrap();

        assert_eq!(tree.edge_count(), 3);
        assert_eq!(total_weight(&tree.edges()), 4.0);
        assert!(tree.are_adjacent(VertexId(2), VertexId(3)));
        assert!(!tree.are_adjacent(VertexId(0), VertexId(2)));
        assert!(is_connected(&tree));
    }

    #[test]
    fn test_decoration_stages() {
        let g = square_with_diagonal();
        let mut d = MemoryDecorator::new(g.clone());
        let mut alg = Kruskal::new();
        alg.initialize(&g, &AlgorithmInput::None).unwrap();

        // Cheapest edge, tie broken by ascending endpoints.
        alg.step(&mut d).unwrap();
        assert_eq!(d.edge_state(VertexId(0), VertexId(1)), DecorationState::Considering);
        alg.step(&mut d).unwrap();
        assert_eq!(d.edge_state(VertexId(0), VertexId(1)), DecorationState::Selected);

        let output = HeadlessRunner::new().drain(&mut alg, &mut d).unwrap();
        assert!(output.graph.is_some());
        assert_eq!(d.edge_state(VertexId(2), VertexId(0)), DecorationState::Disabled);
        // Stopped after |V|-1 edges: the heaviest edge was never considered.
        assert_eq!(d.edge_state(VertexId(0), VertexId(3)), DecorationState::Default);
    }

    #[test]
    fn test_preconditions() {
        let unweighted = UnweightedGraph::from_edges(2, &[(0, 1)]).unwrap();
        assert!(matches!(
            run_headless(&mut Kruskal::new(), &unweighted, &AlgorithmInput::None),
            Err(AlgorithmError::WrongWeighting { .. })
        ));

        let directed = WeightedGraph::from_edges_directed(2, &[(0, 1, 1.0)], true).unwrap();
        assert!(matches!(
            run_headless(&mut Kruskal::new(), &directed, &AlgorithmInput::None),
            Err(AlgorithmError::WrongDirectedness { .. })
        ));

        let split = WeightedGraph::from_edges(3, &[(0, 1, 1.0)]).unwrap();
        assert_eq!(
            run_headless(&mut Kruskal::new(), &split, &AlgorithmInput::None),
            Err(AlgorithmError::Disconnected { components: 2 })
        );
    }

    #[test]
    fn test_euclidean_input() {
        let g = EuclideanGraph::from_points(&[(0.0, 0.0), (1.0, 0.0), (5.0, 0.0)]);
        let output = run_headless(&mut Kruskal::new(), &g, &AlgorithmInput::None).unwrap();
        assert_eq!(total_weight(&output.graph.unwrap().edges()), 5.0);
    }
}
