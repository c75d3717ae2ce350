//! MST-shortcut tour: walk around a minimum spanning tree and skip repeats.
//!
//! The tree comes from [`Kruskal`] run headless. A depth-first full walk of
//! the tree crosses every tree edge twice; keeping only the first visit of
//! each vertex gives a tour at most twice the optimum.

use std::collections::BTreeSet;

use graphstep_core::prelude::*;
use tracing::debug;

use super::{finish_tour, require_euclidean, TourView};
use crate::mst::Kruskal;
use crate::support::hide_edge;

/// Full depth-first walk of a tree from `root`, returning to `root`.
///
/// Children are visited in ascending id order; every step moves along one
/// tree edge.
pub(crate) fn full_walk(tree: &dyn Graph, root: VertexId) -> Vec<VertexId> {
    let mut walk = vec![root];
    let mut visited = BTreeSet::from([root]);
    let mut stack = vec![(root, tree.neighbors(root), 0usize)];

    while let Some((_, neighbors, next)) = stack.last_mut() {
        match neighbors.get(*next).copied() {
            Some(w) => {
                *next += 1;
                if visited.insert(w) {
                    walk.push(w);
                    let children = tree.neighbors(w);
                    stack.push((w, children, 0));
                }
            }
            None => {
                stack.pop();
                if let Some((parent, _, _)) = stack.last() {
                    walk.push(*parent);
                }
            }
        }
    }
    walk
}

/// First occurrence of each vertex, in walk order.
pub(crate) fn shortcut(walk: &[VertexId]) -> Vec<VertexId> {
    let mut seen = BTreeSet::new();
    walk.iter().copied().filter(|&v| seen.insert(v)).collect()
}

#[derive(Debug)]
enum Phase {
    Tree,
    Walk { index: usize },
    Shortcut,
}

#[derive(Debug)]
struct MstShortcutState {
    graph: EuclideanGraph,
    phase: Phase,
    tree_edges: Vec<(VertexId, VertexId)>,
    walk: Vec<VertexId>,
}

/// Tour built by shortcutting a depth-first walk of a minimum spanning tree.
#[derive(Debug, Default)]
pub struct MstShortcut {
    run: RunState<MstShortcutState>,
}

impl MstShortcut {
    /// Create the algorithm.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Algorithm for MstShortcut {
    fn full_name(&self) -> &'static str {
        "Minimum spanning tree shortcut tour"
    }

    fn short_name(&self) -> &'static str {
        "MST shortcut"
    }

    fn input_kind(&self) -> InputKind {
        InputKind::None
    }

    fn initialize(&mut self, graph: &dyn Graph, input: &AlgorithmInput) -> AlgorithmResult<()> {
        precondition::check_input(graph, self.input_kind(), input)?;
        let graph = require_euclidean(graph)?;
        debug!("MST shortcut over {} points", graph.vertex_count());
        self.run.start(MstShortcutState {
            graph,
            phase: Phase::Tree,
            tree_edges: Vec::new(),
            walk: Vec::new(),
        });
        Ok(())
    }

    fn step(&mut self, decorator: &mut dyn Decorator) -> AlgorithmResult<Step> {
        let state = self.run.running()?;

        match state.phase {
            Phase::Tree => {
                let output = run_headless(&mut Kruskal::new(), &state.graph, &AlgorithmInput::None)?;
                let tree = output
                    .graph
                    .ok_or_else(|| AlgorithmError::invalid_input("spanning tree missing"))?;
                state.tree_edges = tree.edges().iter().map(Edge::endpoints).collect();
                for &(a, b) in &state.tree_edges {
                    decorator.set_edge_state(a, b, DecorationState::Auxiliary(0));
                }
                let root = state.graph.vertices().first().copied().unwrap_or_default();
                state.walk = full_walk(&tree, root);
                decorator.set_status_line("Built the minimum spanning tree");
                state.phase = Phase::Walk { index: 0 };
                Ok(Step::Pending)
            }
            Phase::Walk { index } => {
                let v = state.walk[index];
                decorator.set_vertex_state(v, DecorationState::Considering);
                if index > 0 {
                    let prev = state.walk[index - 1];
                    decorator.set_edge_state(prev, v, DecorationState::Considering);
                }
                decorator.set_status_line(&format!("Walking the tree: at {v}"));
                state.phase = if index + 1 < state.walk.len() {
                    Phase::Walk { index: index + 1 }
                } else {
                    Phase::Shortcut
                };
                Ok(Step::Pending)
            }
            Phase::Shortcut => {
                for &(a, b) in &state.tree_edges {
                    hide_edge(decorator, a, b);
                }
                let order = shortcut(&state.walk);
                TourView::default().show(decorator, &order, true);
                let output = finish_tour("MST shortcut tour", &state.graph, order, decorator)?;
                Ok(self.run.complete(output))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_walk_and_shortcut() {
        // Star centred at 0 with a tail 2-3.
        let tree = UnweightedGraph::from_edges(4, &[(0, 1), (0, 2), (2, 3)]).unwrap();
        let walk = full_walk(&tree, VertexId(0));
        let ids = |v: &[u32]| v.iter().copied().map(VertexId).collect::<Vec<_>>();
        assert_eq!(walk, ids(&[0, 1, 0, 2, 3, 2, 0]));
        assert_eq!(shortcut(&walk), ids(&[0, 1, 2, 3]));
    }

    #[test]
    fn test_tour() {
        let g = EuclideanGraph::from_points(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (2.0, 1.0)]);
        let mut d = MemoryDecorator::new(g.clone());
        let mut runner = HeadlessRunner::new();
        let output = runner
            .run(&mut MstShortcut::new(), &mut d, &AlgorithmInput::None)
            .unwrap();
        assert_eq!(
            output.sequence.unwrap(),
            vec![VertexId(0), VertexId(1), VertexId(2), VertexId(3), VertexId(0)]
        );
        // Tree, seven walk positions, shortcut.
        assert_eq!(runner.steps_taken(), 9);
        assert_eq!(d.materialized_edges().len(), 4);
    }
}
