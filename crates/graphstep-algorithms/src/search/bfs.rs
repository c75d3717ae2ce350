//! Breadth-first traversal.

use std::collections::{BTreeMap, VecDeque};

use graphstep_core::prelude::*;
use tracing::{debug, trace};

use super::{highlight_path, tree_path};
use crate::support::{add_output_edge, describe_sequence, unweighted_skeleton, weighted_skeleton};

#[derive(Debug)]
struct BfsState {
    graph: AnyGraph,
    source: VertexId,
    sink: Option<VertexId>,
    queue: VecDeque<VertexId>,
    depth: BTreeMap<VertexId, usize>,
    parent: BTreeMap<VertexId, VertexId>,
    order: Vec<VertexId>,
    tree: AnyGraph,
}

/// Breadth-first traversal from a start vertex.
///
/// Vertices are labelled with their depth. The output tree is weighted when
/// the searched graph is, and its edges keep their weights.
#[derive(Debug, Default)]
pub struct BreadthFirstSearch {
    run: RunState<BfsState>,
    depths: BTreeMap<VertexId, usize>,
}

impl BreadthFirstSearch {
    /// Create the algorithm.
    pub fn new() -> Self {
        Self::default()
    }

    /// Depth of every discovered vertex from the last completed run.
    pub fn depths(&self) -> &BTreeMap<VertexId, usize> {
        &self.depths
    }

    fn finish(&mut self, decorator: &mut dyn Decorator) -> AlgorithmResult<Step> {
        let Some(state) = self.run.take() else {
            return Err(AlgorithmError::NotInitialized);
        };
        let BfsState {
            graph,
            source,
            sink,
            depth,
            parent,
            order,
            tree,
            ..
        } = state;

        let output = AlgorithmOutput::new()
            .with_name("Breadth-first search tree")
            .with_graph(tree);
        let output = match sink {
            Some(sink) => match tree_path(&parent, source, sink) {
                Some(path) => {
                    highlight_path(decorator, &parent, &path);
                    let text = format!(
                        "{} ({} edges)",
                        describe_sequence(&graph, &path),
                        path.len() - 1
                    );
                    decorator.set_status_line(&text);
                    output
                        .with_message(Message::success("Fewest-edges path", text))
                        .with_sequence(path)
                }
                None => {
                    decorator.set_status_line(&format!("Vertex {sink} is unreachable"));
                    output.with_message(Message::warning(
                        "No path",
                        format!("There is no path from {source} to {sink}"),
                    ))
                }
            },
            None => {
                let text = format!(
                    "Visited {} of {} vertices: {}",
                    order.len(),
                    graph.vertex_count(),
                    describe_sequence(&graph, &order)
                );
                decorator.set_status_line(&text);
                output
                    .with_message(Message::success("Breadth-first search", text))
                    .with_sequence(order)
            }
        };

        self.depths = depth;
        Ok(Step::Complete(output))
    }
}

impl Algorithm for BreadthFirstSearch {
    fn full_name(&self) -> &'static str {
        "Breadth-first search"
    }

    fn short_name(&self) -> &'static str {
        "BFS"
    }

    fn input_kind(&self) -> InputKind {
        InputKind::VertexOrSourceSink
    }

    fn initialize(&mut self, graph: &dyn Graph, input: &AlgorithmInput) -> AlgorithmResult<()> {
        let (source, sink) = precondition::start_vertex(graph, self.input_kind(), input)?;
        debug!("BFS from {} over {} vertices", source, graph.vertex_count());

        let tree: AnyGraph = if graph.is_weighted() {
            weighted_skeleton(graph).into()
        } else {
            unweighted_skeleton(graph).into()
        };
        self.depths.clear();
        self.run.start(BfsState {
            graph: graph.to_any(),
            source,
            sink,
            queue: VecDeque::from([source]),
            depth: BTreeMap::from([(source, 0)]),
            parent: BTreeMap::new(),
            order: vec![source],
            tree,
        });
        Ok(())
    }

    fn step(&mut self, decorator: &mut dyn Decorator) -> AlgorithmResult<Step> {
        let state = self.run.running()?;

        let Some(v) = state.queue.pop_front() else {
            return self.finish(decorator);
        };
        let depth = state.depth.get(&v).copied().unwrap_or_default();
        trace!("BFS dequeued {} at depth {}", v, depth);
        decorator.set_vertex_state(v, DecorationState::Selected);
        decorator.set_vertex_external_label(v, &depth.to_string());
        if Some(v) == state.sink {
            return self.finish(decorator);
        }

        let mut discovered = 0;
        for w in state.graph.neighbors(v) {
            if state.depth.contains_key(&w) {
                let tree_edge = !state.graph.is_directed() && state.parent.get(&v) == Some(&w);
                if !tree_edge {
                    decorator.set_edge_state(v, w, DecorationState::Disabled);
                }
                continue;
            }
            state.depth.insert(w, depth + 1);
            state.parent.insert(w, v);
            state.order.push(w);
            state.queue.push_back(w);
            let weight = state.graph.edge_cost(v, w);
            add_output_edge(&mut state.tree, v, w, weight)?;
            decorator.set_vertex_state(w, DecorationState::Selected);
            decorator.set_edge_state(v, w, DecorationState::Selected);
            decorator.set_vertex_external_label(w, &(depth + 1).to_string());
            discovered += 1;
        }
        decorator.set_status_line(&format!(
            "Visited vertex {v} at depth {depth}, discovered {discovered} new vertices"
        ));
        Ok(Step::Pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depths_and_order() {
        // 0-1, 0-2, 1-3, 2-3, 3-4
        let g = UnweightedGraph::from_edges(5, &[(0, 1), (0, 2), (1, 3), (2, 3), (3, 4)]).unwrap();
        let mut alg = BreadthFirstSearch::new();
        let output = run_headless(&mut alg, &g, &AlgorithmInput::Vertex(VertexId(0))).unwrap();

        let depths: Vec<_> = alg.depths().values().copied().collect();
        assert_eq!(depths, vec![0, 1, 1, 2, 3]);
        assert_eq!(
            output.sequence,
            Some((0..5).map(VertexId).collect::<Vec<_>>())
        );
        let tree = output.graph.unwrap();
        assert_eq!(tree.kind(), GraphKind::Unweighted);
        assert_eq!(tree.edge_count(), 4);
    }

    #[test]
    fn test_rejected_edges_disabled() {
        let g = UnweightedGraph::from_edges(4, &[(0, 1), (0, 2), (1, 3), (2, 3)]).unwrap();
        let mut d = MemoryDecorator::new(g.clone());
        let mut alg = BreadthFirstSearch::new();
        alg.initialize(&g, &AlgorithmInput::Vertex(VertexId(0))).unwrap();

        // One checkpoint per dequeued vertex.
        let mut runner = HeadlessRunner::new();
        runner.drain(&mut alg, &mut d).unwrap();
        assert_eq!(runner.steps_taken(), 5);

        assert_eq!(d.edge_state(VertexId(0), VertexId(1)), DecorationState::Selected);
        assert_eq!(d.edge_state(VertexId(1), VertexId(3)), DecorationState::Selected);
        assert_eq!(d.edge_state(VertexId(2), VertexId(3)), DecorationState::Disabled);
        assert_eq!(d.vertex_state(VertexId(3)), DecorationState::Selected);
        assert_eq!(d.vertex_external_label(VertexId(3)).as_deref(), Some("2"));
    }

    #[test]
    fn test_weighted_tree_keeps_weights() {
        let g = WeightedGraph::from_edges(3, &[(0, 1, 2.5), (1, 2, 4.0)]).unwrap();
        let output = run_headless(
            &mut BreadthFirstSearch::new(),
            &g,
            &AlgorithmInput::Vertex(VertexId(0)),
        )
        .unwrap();
        let tree = output.graph.unwrap();
        assert_eq!(tree.kind(), GraphKind::Weighted);
        assert_eq!(total_weight(&tree.edges()), 6.5);
    }

    #[test]
    fn test_stops_at_sink() {
        let g = UnweightedGraph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]).unwrap();
        let mut alg = BreadthFirstSearch::new();
        let input = AlgorithmInput::SourceSink {
            source: VertexId(0),
            sink: VertexId(2),
        };
        let output = run_headless(&mut alg, &g, &input).unwrap();
        assert_eq!(
            output.sequence,
            Some(vec![VertexId(0), VertexId(1), VertexId(2)])
        );
        assert!(!alg.depths().contains_key(&VertexId(3)));
    }
}
