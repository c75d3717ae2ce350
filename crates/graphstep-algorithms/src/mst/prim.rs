//! Prim's minimum spanning tree.

use std::cmp::Ordering;
use std::collections::{BTreeSet, BinaryHeap};

use graphstep_core::prelude::*;
use tracing::debug;

use crate::support::{add_output_edge, weighted_skeleton};

/// Candidate edge from a tree vertex to a vertex outside the tree.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Candidate {
    weight: f64,
    inside: VertexId,
    outside: VertexId,
}

impl Eq for Candidate {}

impl Ord for Candidate {
    // Reversed so the max-heap pops the lightest edge, ties by ascending ids.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.outside.cmp(&self.outside))
            .then_with(|| other.inside.cmp(&self.inside))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug)]
struct PrimState {
    graph: AnyGraph,
    start: VertexId,
    started: bool,
    heap: BinaryHeap<Candidate>,
    in_tree: BTreeSet<VertexId>,
    tree: WeightedGraph,
    total: f64,
    considering: Option<Candidate>,
}

impl PrimState {
    fn include(&mut self, v: VertexId) {
        self.in_tree.insert(v);
        for w in self.graph.neighbors(v) {
            if self.in_tree.contains(&w) {
                continue;
            }
            if let Some(weight) = self.graph.edge_cost(v, w) {
                self.heap.push(Candidate {
                    weight,
                    inside: v,
                    outside: w,
                });
            }
        }
    }
}

/// Prim's minimum spanning tree, grown from a start vertex.
#[derive(Debug, Default)]
pub struct Prim {
    run: RunState<PrimState>,
}

impl Prim {
    /// Create the algorithm.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Algorithm for Prim {
    fn full_name(&self) -> &'static str {
        "Prim's minimum spanning tree"
    }

    fn short_name(&self) -> &'static str {
        "Prim"
    }

    fn input_kind(&self) -> InputKind {
        InputKind::Vertex
    }

    fn initialize(&mut self, graph: &dyn Graph, input: &AlgorithmInput) -> AlgorithmResult<()> {
        let (start, _) = precondition::start_vertex(graph, self.input_kind(), input)?;
        precondition::require_directed(graph, false)?;
        precondition::require_weighted(graph, true)?;
        precondition::require_connected(graph)?;
        debug!("Prim from {} over {} vertices", start, graph.vertex_count());

        self.run.start(PrimState {
            graph: graph.to_any(),
            start,
            started: false,
            heap: BinaryHeap::new(),
            in_tree: BTreeSet::new(),
            tree: weighted_skeleton(graph),
            total: 0.0,
            considering: None,
        });
        Ok(())
    }

    fn step(&mut self, decorator: &mut dyn Decorator) -> AlgorithmResult<Step> {
        let state = self.run.running()?;

        if !state.started {
            state.started = true;
            let start = state.start;
            state.include(start);
            decorator.set_vertex_state(start, DecorationState::Selected);
            decorator.set_status_line(&format!("Growing the tree from vertex {start}"));
            return Ok(Step::Pending);
        }

        if let Some(candidate) = state.considering.take() {
            let Candidate {
                weight,
                inside,
                outside,
            } = candidate;
            if state.in_tree.contains(&outside) {
                decorator.set_edge_state(inside, outside, DecorationState::Disabled);
                decorator.set_status_line(&format!(
                    "Discarded edge {inside}-{outside}: {outside} is already in the tree"
                ));
            } else {
                add_output_edge(&mut state.tree, inside, outside, Some(weight))?;
                state.total += weight;
                state.include(outside);
                decorator.set_edge_state(inside, outside, DecorationState::Selected);
                decorator.set_vertex_state(outside, DecorationState::Selected);
                decorator.set_status_line(&format!("Added vertex {outside} via edge {inside}-{outside}"));
            }
            return Ok(Step::Pending);
        }

        if state.in_tree.len() < state.graph.vertex_count() {
            if let Some(candidate) = state.heap.pop() {
                decorator.set_edge_state(candidate.inside, candidate.outside, DecorationState::Considering);
                decorator.set_status_line(&format!(
                    "Considering edge {}-{} with weight {}",
                    candidate.inside,
                    candidate.outside,
                    format_distance(candidate.weight)
                ));
                state.considering = Some(candidate);
                return Ok(Step::Pending);
            }
        }

        let total = state.total;
        let tree = std::mem::replace(&mut state.tree, WeightedGraph::new(false));
        decorator.set_status_line(&format!(
            "Minimum spanning tree complete, total weight {}",
            format_distance(total)
        ));
        Ok(self.run.complete(
            AlgorithmOutput::new()
                .with_graph(tree)
                .with_name("Minimum spanning tree (Prim)")
                .with_message(Message::success(
                    "Minimum spanning tree",
                    format!("Total weight: {}", format_distance(total)),
                )),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_order() {
        let mut heap = BinaryHeap::new();
        for (weight, outside) in [(2.0, 1), (1.0, 3), (1.0, 2)] {
            heap.push(Candidate {
                weight,
                inside: VertexId(0),
                outside: VertexId(outside),
            });
        }
        assert_eq!(heap.pop().unwrap().outside, VertexId(2));
        assert_eq!(heap.pop().unwrap().outside, VertexId(3));
        assert_eq!(heap.pop().unwrap().outside, VertexId(1));
    }

    #[test]
    fn test_minimum_tree() {
        let g = WeightedGraph::from_edges(
            4,
            &[(0, 1, 1.0), (1, 2, 1.0), (0, 2, 1.5), (2, 3, 2.0), (3, 0, 3.0)],
        )
        .unwrap();
        let output = run_headless(&mut Prim::new(), &g, &AlgorithmInput::Vertex(VertexId(3))).unwrap();
        let tree = output.graph.unwrap();
        assert_eq!(tree.edge_count(), 3);
        assert_eq!(total_weight(&tree.edges()), 4.0);
    }

    #[test]
    fn test_rejects_stale_candidates() {
        // Triangle: after 0-1 and 0-2 join, edge 1-2 is discarded if popped.
        let g = WeightedGraph::from_edges(3, &[(0, 1, 1.0), (0, 2, 2.0), (1, 2, 5.0)]).unwrap();
        let mut d = MemoryDecorator::new(g.clone());
        let mut alg = Prim::new();
        alg.initialize(&g, &AlgorithmInput::Vertex(VertexId(0))).unwrap();
        HeadlessRunner::new().drain(&mut alg, &mut d).unwrap();

        assert_eq!(d.edge_state(VertexId(0), VertexId(1)), DecorationState::Selected);
        assert_eq!(d.edge_state(VertexId(0), VertexId(2)), DecorationState::Selected);
        assert_ne!(d.edge_state(VertexId(1), VertexId(2)), DecorationState::Selected);
    }

    #[test]
    fn test_requires_start_vertex() {
        let g = WeightedGraph::from_edges(2, &[(0, 1, 1.0)]).unwrap();
        assert!(matches!(
            run_headless(&mut Prim::new(), &g, &AlgorithmInput::None),
            Err(AlgorithmError::InvalidInput(_))
        ));
        assert_eq!(
            run_headless(&mut Prim::new(), &g, &AlgorithmInput::Vertex(VertexId(4))),
            Err(AlgorithmError::UnknownVertex(VertexId(4)))
        );
    }
}
