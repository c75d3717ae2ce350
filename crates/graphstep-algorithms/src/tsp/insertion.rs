//! Insertion heuristics: grow a partial tour one vertex at a time.
//!
//! Each round takes two checkpoints: the chosen vertex is shown as
//! `Considering`, then it is inserted where it lengthens the tour least.

use std::collections::BTreeSet;

use graphstep_core::prelude::*;
use tracing::debug;

use super::{distance, finish_tour, insertion_cost, require_euclidean, TourView};

/// How the next vertex is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    /// Vertex closest to any tour vertex.
    Nearest,
    /// Vertex and position with the smallest insertion cost.
    Cheapest,
}

#[derive(Debug)]
struct InsertionState {
    graph: EuclideanGraph,
    tour: Vec<VertexId>,
    remaining: BTreeSet<VertexId>,
    /// Vertex shown as `Considering` and the index it will be inserted at.
    chosen: Option<(VertexId, usize)>,
    view: TourView,
}

impl InsertionState {
    fn new(graph: EuclideanGraph) -> AlgorithmResult<Self> {
        let mut remaining: BTreeSet<_> = graph.vertices().into_iter().collect();
        let start = remaining
            .pop_first()
            .ok_or(AlgorithmError::NotEnoughVertices { min: 2, actual: 0 })?;
        Ok(Self {
            graph,
            tour: vec![start],
            remaining,
            chosen: None,
            view: TourView::default(),
        })
    }

    /// Cheapest insertion point for `v`: `(index, cost)` to insert before `tour[index]`.
    fn best_position(&self, v: VertexId) -> (usize, f64) {
        let n = self.tour.len();
        (0..n)
            .map(|i| {
                let prev = self.tour[i];
                let next = self.tour[(i + 1) % n];
                (i + 1, insertion_cost(&self.graph, prev, v, next))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .unwrap_or((n, 0.0))
    }

    fn choose(&self, rule: Rule) -> Option<(VertexId, usize)> {
        match rule {
            Rule::Nearest => {
                let v = self.remaining.iter().copied().min_by(|&a, &b| {
                    self.distance_to_tour(a).total_cmp(&self.distance_to_tour(b))
                })?;
                Some((v, self.best_position(v).0))
            }
            Rule::Cheapest => {
                let best = self
                    .remaining
                    .iter()
                    .map(|&v| {
                        let (index, cost) = self.best_position(v);
                        (v, index, cost)
                    })
                    .min_by(|a, b| a.2.total_cmp(&b.2));
                if !self.remaining.is_empty() && best.is_none() {
                    unreachable!("no cheapest insertion before the tour is complete");
                }
                best.map(|(v, index, _)| (v, index))
            }
        }
    }

    fn distance_to_tour(&self, v: VertexId) -> f64 {
        self.tour
            .iter()
            .map(|&t| distance(&self.graph, t, v))
            .fold(f64::INFINITY, f64::min)
    }
}

fn insertion_step(
    run: &mut RunState<InsertionState>,
    rule: Rule,
    name: &str,
    decorator: &mut dyn Decorator,
) -> AlgorithmResult<Step> {
    let state = run.running()?;

    if let Some((v, index)) = state.chosen.take() {
        state.remaining.remove(&v);
        state.tour.insert(index, v);
        state.view.show(decorator, &state.tour, true);
        decorator.set_status_line(&format!(
            "Inserted {v}, tour now visits {} vertices",
            state.tour.len()
        ));
        return Ok(Step::Pending);
    }

    if let Some((v, index)) = state.choose(rule) {
        state.chosen = Some((v, index));
        decorator.set_vertex_state(v, DecorationState::Considering);
        decorator.set_status_line(&format!("Next vertex to insert: {v}"));
        return Ok(Step::Pending);
    }

    let tour = std::mem::take(&mut state.tour);
    let output = finish_tour(name, &state.graph, tour, decorator)?;
    Ok(run.complete(output))
}

/// Nearest-insertion tour: insert the vertex closest to the partial tour.
#[derive(Debug, Default)]
pub struct NearestInsertion {
    run: RunState<InsertionState>,
}

impl NearestInsertion {
    /// Create the algorithm.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Algorithm for NearestInsertion {
    fn full_name(&self) -> &'static str {
        "Nearest-insertion tour"
    }

    fn short_name(&self) -> &'static str {
        "Nearest insertion"
    }

    fn input_kind(&self) -> InputKind {
        InputKind::None
    }

    fn initialize(&mut self, graph: &dyn Graph, input: &AlgorithmInput) -> AlgorithmResult<()> {
        precondition::check_input(graph, self.input_kind(), input)?;
        let graph = require_euclidean(graph)?;
        debug!("Nearest insertion over {} points", graph.vertex_count());
        self.run.start(InsertionState::new(graph)?);
        Ok(())
    }

    fn step(&mut self, decorator: &mut dyn Decorator) -> AlgorithmResult<Step> {
        insertion_step(&mut self.run, Rule::Nearest, "Nearest-insertion tour", decorator)
    }
}

/// Cheapest-insertion tour: insert the vertex whose best insertion costs least.
#[derive(Debug, Default)]
pub struct CheapestInsertion {
    run: RunState<InsertionState>,
}

impl CheapestInsertion {
    /// Create the algorithm.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Algorithm for CheapestInsertion {
    fn full_name(&self) -> &'static str {
        "Cheapest-insertion tour"
    }

    fn short_name(&self) -> &'static str {
        "Cheapest insertion"
    }

    fn input_kind(&self) -> InputKind {
        InputKind::None
    }

    fn initialize(&mut self, graph: &dyn Graph, input: &AlgorithmInput) -> AlgorithmResult<()> {
        precondition::check_input(graph, self.input_kind(), input)?;
        let graph = require_euclidean(graph)?;
        debug!("Cheapest insertion over {} points", graph.vertex_count());
        self.run.start(InsertionState::new(graph)?);
        Ok(())
    }

    fn step(&mut self, decorator: &mut dyn Decorator) -> AlgorithmResult<Step> {
        insertion_step(&mut self.run, Rule::Cheapest, "Cheapest-insertion tour", decorator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tsp::tour_length;

    fn points() -> EuclideanGraph {
        EuclideanGraph::from_points(&[
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 3.0),
            (0.0, 3.0),
            (2.0, 1.0),
        ])
    }

    fn assert_valid_tour(g: &EuclideanGraph, sequence: &[VertexId]) {
        assert_eq!(sequence.first(), sequence.last());
        let visited: BTreeSet<_> = sequence[..sequence.len() - 1].iter().copied().collect();
        assert_eq!(visited.len(), g.vertex_count());
    }

    #[test]
    fn test_nearest_insertion_tour() {
        let g = points();
        let output = run_headless(&mut NearestInsertion::new(), &g, &AlgorithmInput::None).unwrap();
        let sequence = output.sequence.unwrap();
        assert_valid_tour(&g, &sequence);
        assert_eq!(sequence[0], VertexId(0));
    }

    #[test]
    fn test_cheapest_insertion_tour() {
        let g = points();
        let output = run_headless(&mut CheapestInsertion::new(), &g, &AlgorithmInput::None).unwrap();
        let sequence = output.sequence.unwrap();
        assert_valid_tour(&g, &sequence);
        // The rectangle plus a detour through the inner point.
        let length = tour_length(&g, &sequence[..sequence.len() - 1]);
        assert!(length < 14.0 + 2.0, "tour length {length}");
    }

    #[test]
    fn test_two_checkpoints_per_insertion() {
        let g = points();
        let mut runner = HeadlessRunner::new();
        let mut d = MemoryDecorator::new(g.clone());
        runner
            .run(&mut CheapestInsertion::new(), &mut d, &AlgorithmInput::None)
            .unwrap();
        // Four insertions of two checkpoints each, then completion.
        assert_eq!(runner.steps_taken(), 9);
        assert_eq!(d.materialized_edges().len(), 5);
    }

    #[test]
    fn test_best_position_on_single_vertex_tour() {
        let mut state = InsertionState::new(points()).unwrap();
        assert_eq!(state.best_position(VertexId(1)), (1, 8.0));
        state.tour.push(VertexId(1));
        assert_eq!(state.best_position(VertexId(2)).1, 3.0 + 5.0 - 4.0);
    }
}
