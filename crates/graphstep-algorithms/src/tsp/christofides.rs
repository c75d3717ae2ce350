//! Christofides tour, at most 1.5 times the optimum on metric instances.
//!
//! Threads three sub-runs into one observable run:
//! 1. [`Kruskal`] steps are forwarded one by one, decorations included
//! 2. the tree's odd-degree vertices are paired by a minimum-weight perfect
//!    matching
//! 3. [`MultiFleury`] walks the tree-plus-matching multigraph one edge per step
//!
//! The Euler circuit is then shortcut into a tour, one tour edge per step.

use std::collections::BTreeSet;
use std::sync::Arc;

use graphstep_core::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::mst_shortcut::shortcut;
use super::{distance, finish_tour, require_euclidean};
use crate::euler::MultiFleury;
use crate::matching::{
    DefaultMatcher, PerfectMatcher, DEFAULT_EXACT_MATCHING_LIMIT, MAX_EXACT_MATCHING_LIMIT,
};
use crate::mst::Kruskal;
use crate::support::hide_edge;

/// Configuration for [`Christofides`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChristofidesConfig {
    /// Largest odd-vertex set matched exactly, never above
    /// [`MAX_EXACT_MATCHING_LIMIT`]. Larger sets get an approximate matching
    /// and the run ends with a warning.
    pub exact_matching_limit: usize,
}

impl Default for ChristofidesConfig {
    fn default() -> Self {
        Self {
            exact_matching_limit: DEFAULT_EXACT_MATCHING_LIMIT,
        }
    }
}

impl ChristofidesConfig {
    /// Create a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the exact matching limit, clamped to [`MAX_EXACT_MATCHING_LIMIT`].
    pub fn with_exact_matching_limit(mut self, limit: usize) -> Self {
        self.exact_matching_limit = limit.min(MAX_EXACT_MATCHING_LIMIT);
        self
    }
}

#[derive(Debug)]
enum Phase {
    Tree(Kruskal),
    OddVertices,
    Matching,
    Euler {
        fleury: MultiFleury,
        circuit: MultiGraph,
    },
    Shortcut {
        order: Vec<VertexId>,
        index: usize,
    },
}

#[derive(Debug)]
struct ChristofidesState {
    graph: EuclideanGraph,
    phase: Phase,
    tree: Vec<(VertexId, VertexId)>,
    odd: Vec<VertexId>,
    matching: Vec<(VertexId, VertexId)>,
    /// The matcher could not guarantee a minimum-weight matching.
    approximate_matching: bool,
    /// Edges given a visible state by the sub-runs.
    drawn: BTreeSet<(VertexId, VertexId)>,
}

impl ChristofidesState {
    fn union_multigraph(&self) -> AlgorithmResult<MultiGraph> {
        let mut multi = MultiGraph::new(false);
        for v in self.graph.vertices() {
            multi.insert_vertex(v, self.graph.vertex_label(v).map(str::to_owned));
        }
        for &(a, b) in self.tree.iter().chain(&self.matching) {
            multi
                .add_edge(a, b, None)
                .map_err(|e| AlgorithmError::invalid_input(e.to_string()))?;
        }
        Ok(multi)
    }
}

/// Christofides approximation of the travelling-salesman tour.
#[derive(Debug)]
pub struct Christofides {
    matcher: Arc<dyn PerfectMatcher>,
    run: RunState<ChristofidesState>,
}

impl Default for Christofides {
    fn default() -> Self {
        Self::with_config(ChristofidesConfig::default())
    }
}

impl Christofides {
    /// Create the algorithm with the default matcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the algorithm with a configured default matcher.
    pub fn with_config(config: ChristofidesConfig) -> Self {
        Self::with_matcher(Arc::new(DefaultMatcher::new(config.exact_matching_limit)))
    }

    /// Create the algorithm with a custom matching collaborator.
    pub fn with_matcher(matcher: Arc<dyn PerfectMatcher>) -> Self {
        Self {
            matcher,
            run: RunState::default(),
        }
    }
}

impl Algorithm for Christofides {
    fn full_name(&self) -> &'static str {
        "Christofides tour"
    }

    fn short_name(&self) -> &'static str {
        "Christofides"
    }

    fn input_kind(&self) -> InputKind {
        InputKind::None
    }

    fn initialize(&mut self, graph: &dyn Graph, input: &AlgorithmInput) -> AlgorithmResult<()> {
        precondition::check_input(graph, self.input_kind(), input)?;
        let graph = require_euclidean(graph)?;
        let mut kruskal = Kruskal::new();
        kruskal.initialize(&graph, &AlgorithmInput::None)?;
        debug!("Christofides over {} points", graph.vertex_count());

        self.run.start(ChristofidesState {
            graph,
            phase: Phase::Tree(kruskal),
            tree: Vec::new(),
            odd: Vec::new(),
            matching: Vec::new(),
            approximate_matching: false,
            drawn: BTreeSet::new(),
        });
        Ok(())
    }

    fn step(&mut self, decorator: &mut dyn Decorator) -> AlgorithmResult<Step> {
        let state = self.run.running()?;

        match &mut state.phase {
            Phase::Tree(kruskal) => {
                let Step::Complete(output) = kruskal.step(decorator)? else {
                    return Ok(Step::Pending);
                };
                let tree = output
                    .graph
                    .ok_or_else(|| AlgorithmError::invalid_input("spanning tree missing"))?;
                state.tree = tree.edges().iter().map(Edge::endpoints).collect();
                state.odd = odd_degree_vertices(&tree);
                state.drawn.extend(state.tree.iter().copied());
                info!(
                    "Christofides tree has {} edges, {} odd vertices",
                    state.tree.len(),
                    state.odd.len()
                );
                state.phase = Phase::OddVertices;
                Ok(Step::Pending)
            }
            Phase::OddVertices => {
                for &v in &state.odd {
                    decorator.set_vertex_state(v, DecorationState::Considering);
                }
                decorator.set_status_line(&format!(
                    "{} vertices have odd degree in the tree",
                    state.odd.len()
                ));
                state.phase = Phase::Matching;
                Ok(Step::Pending)
            }
            Phase::Matching => {
                let graph = &state.graph;
                let cost = |a: VertexId, b: VertexId| distance(graph, a, b);
                state.matching = self.matcher.perfect_matching(&state.odd, &cost);
                state.approximate_matching = !self.matcher.is_exact(state.odd.len());
                if state.approximate_matching {
                    warn!(
                        "Matched {} odd vertices approximately, the 1.5 bound may not hold",
                        state.odd.len()
                    );
                }
                for &(a, b) in &state.matching {
                    decorator.set_edge_state(a, b, DecorationState::Auxiliary(0));
                    state.drawn.insert(ordered_pair(a, b));
                }
                decorator.set_status_line(&format!(
                    "Matched odd vertices with {} edges",
                    state.matching.len()
                ));

                let circuit = state.union_multigraph()?;
                let mut fleury = MultiFleury::new();
                fleury.initialize(&circuit, &AlgorithmInput::None)?;
                state.phase = Phase::Euler { fleury, circuit };
                Ok(Step::Pending)
            }
            Phase::Euler { fleury, circuit } => {
                let step = fleury.step(&mut NullDecorator::new(&*circuit))?;
                let Step::Complete(output) = step else {
                    if let Some((a, b)) = fleury.last_edge() {
                        decorator.set_edge_state(a, b, DecorationState::Considering);
                        decorator.set_status_line(&format!("Euler circuit crosses {a}-{b}"));
                    }
                    return Ok(Step::Pending);
                };

                let euler = output.sequence.unwrap_or_default();
                for &(a, b) in &state.drawn {
                    hide_edge(decorator, a, b);
                }
                for v in state.graph.vertices() {
                    decorator.set_vertex_state(v, DecorationState::Default);
                }
                decorator.set_status_line("Shortcutting the Euler circuit");
                state.phase = Phase::Shortcut {
                    order: shortcut(&euler),
                    index: 0,
                };
                Ok(Step::Pending)
            }
            Phase::Shortcut { order, index } => {
                if *index < order.len() {
                    let a = order[*index];
                    let b = order[(*index + 1) % order.len()];
                    decorator.set_vertex_state(a, DecorationState::Selected);
                    decorator.set_edge_state(a, b, DecorationState::Selected);
                    decorator.set_status_line(&format!("Tour edge {a}-{b}"));
                    *index += 1;
                    return Ok(Step::Pending);
                }
                let order = std::mem::take(order);
                let mut output = finish_tour("Christofides tour", &state.graph, order, decorator)?;
                if state.approximate_matching {
                    if let Some(message) = output.message.take() {
                        output.message = Some(Message::warning(
                            message.title,
                            format!(
                                "{}; the odd vertices were matched approximately, \
                                 so the tour may exceed 1.5 times the optimum",
                                message.text
                            ),
                        ));
                    }
                }
                Ok(self.run.complete(output))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tsp::tour_length;

    fn hexagon() -> EuclideanGraph {
        let points: Vec<_> = (0..6)
            .map(|i| {
                let angle = std::f64::consts::PI / 3.0 * i as f64;
                (angle.cos(), angle.sin())
            })
            .collect();
        EuclideanGraph::from_points(&points)
    }

    #[test]
    fn test_valid_tour() {
        let g = hexagon();
        let output = run_headless(&mut Christofides::new(), &g, &AlgorithmInput::None).unwrap();
        let sequence = output.sequence.unwrap();
        assert_eq!(sequence.len(), 7);
        assert_eq!(sequence.first(), sequence.last());
        let distinct: BTreeSet<_> = sequence.iter().collect();
        assert_eq!(distinct.len(), 6);

        // Optimal tour is the perimeter, 6.
        let length = tour_length(&g, &sequence[..6]);
        assert!(length <= 9.0 + 1e-9, "tour length {length}");
    }

    #[test]
    fn test_two_points() {
        let g = EuclideanGraph::from_points(&[(0.0, 0.0), (3.0, 4.0)]);
        let output = run_headless(&mut Christofides::new(), &g, &AlgorithmInput::None).unwrap();
        assert_eq!(
            output.sequence.unwrap(),
            vec![VertexId(0), VertexId(1), VertexId(0)]
        );
    }

    #[test]
    fn test_final_decoration_is_tour() {
        let g = hexagon();
        let mut d = MemoryDecorator::new(g.clone());
        let mut alg = Christofides::new();
        alg.initialize(&g, &AlgorithmInput::None).unwrap();
        HeadlessRunner::new().drain(&mut alg, &mut d).unwrap();

        let snapshot = d.snapshot();
        assert_eq!(snapshot.edges_in_state(DecorationState::Selected).len(), 6);
        assert!(snapshot.edges_in_state(DecorationState::Auxiliary(0)).is_empty());
        assert!(snapshot.edges_in_state(DecorationState::Considering).is_empty());
    }

    #[test]
    fn test_custom_matcher() {
        #[derive(Debug)]
        struct Greedy;
        impl PerfectMatcher for Greedy {
            fn perfect_matching(
                &self,
                vertices: &[VertexId],
                cost: &dyn Fn(VertexId, VertexId) -> f64,
            ) -> Vec<(VertexId, VertexId)> {
                crate::matching::greedy_matching(vertices, cost)
            }
        }

        let g = hexagon();
        let mut alg = Christofides::with_matcher(Arc::new(Greedy));
        let output = run_headless(&mut alg, &g, &AlgorithmInput::None).unwrap();
        assert_eq!(output.sequence.unwrap().len(), 7);
    }

    #[test]
    fn test_approximate_matching_warns() {
        let g = hexagon();
        let config = ChristofidesConfig::new().with_exact_matching_limit(0);
        let mut alg = Christofides::with_config(config);
        let output = run_headless(&mut alg, &g, &AlgorithmInput::None).unwrap();
        let message = output.message.unwrap();
        assert_eq!(message.level, MessageLevel::Warning);
        assert!(message.text.contains("approximately"));
        assert_eq!(output.sequence.unwrap().len(), 7);

        let exact = run_headless(&mut Christofides::new(), &g, &AlgorithmInput::None).unwrap();
        assert_eq!(exact.message.unwrap().level, MessageLevel::Success);
    }

    #[test]
    fn test_matching_limit_is_clamped() {
        let config = ChristofidesConfig::new().with_exact_matching_limit(1000);
        assert_eq!(config.exact_matching_limit, MAX_EXACT_MATCHING_LIMIT);
    }

    #[test]
    fn test_rejects_non_euclidean() {
        let g = WeightedGraph::from_edges(2, &[(0, 1, 1.0)]).unwrap();
        assert!(matches!(
            run_headless(&mut Christofides::new(), &g, &AlgorithmInput::None),
            Err(AlgorithmError::WrongGraphKind { .. })
        ));
    }
}
