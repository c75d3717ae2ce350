//! Nearest-neighbor tour: always travel to the closest unvisited vertex.

use std::collections::BTreeSet;

use graphstep_core::prelude::*;
use tracing::debug;

use super::{distance, finish_tour, require_euclidean, TourView};

#[derive(Debug)]
struct NearestNeighborState {
    graph: EuclideanGraph,
    started: bool,
    order: Vec<VertexId>,
    unvisited: BTreeSet<VertexId>,
    view: TourView,
}

/// Nearest-neighbor tour from a start vertex, O(n^2).
#[derive(Debug, Default)]
pub struct NearestNeighbor {
    run: RunState<NearestNeighborState>,
}

impl NearestNeighbor {
    /// Create the algorithm.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Algorithm for NearestNeighbor {
    fn full_name(&self) -> &'static str {
        "Nearest-neighbor tour"
    }

    fn short_name(&self) -> &'static str {
        "Nearest neighbor"
    }

    fn input_kind(&self) -> InputKind {
        InputKind::Vertex
    }

    fn initialize(&mut self, graph: &dyn Graph, input: &AlgorithmInput) -> AlgorithmResult<()> {
        let graph = require_euclidean(graph)?;
        let (start, _) = precondition::start_vertex(&graph, self.input_kind(), input)?;
        debug!("Nearest neighbor from {} over {} points", start, graph.vertex_count());

        let mut unvisited: BTreeSet<_> = graph.vertices().into_iter().collect();
        unvisited.remove(&start);
        self.run.start(NearestNeighborState {
            graph,
            started: false,
            order: vec![start],
            unvisited,
            view: TourView::default(),
        });
        Ok(())
    }

    fn step(&mut self, decorator: &mut dyn Decorator) -> AlgorithmResult<Step> {
        let state = self.run.running()?;

        if !state.started {
            state.started = true;
            let start = state.order[0];
            state.view.show(decorator, &state.order, false);
            decorator.set_status_line(&format!("Starting the tour at {start}"));
            return Ok(Step::Pending);
        }

        let Some(&last) = state.order.last() else {
            return Err(AlgorithmError::NotInitialized);
        };
        let graph = &state.graph;
        let nearest = state
            .unvisited
            .iter()
            .copied()
            .min_by(|&a, &b| distance(graph, last, a).total_cmp(&distance(graph, last, b)));

        match nearest {
            Some(next) => {
                state.unvisited.remove(&next);
                state.order.push(next);
                state.view.show(decorator, &state.order, false);
                decorator.set_status_line(&format!(
                    "Travelled from {last} to nearest unvisited vertex {next}"
                ));
                Ok(Step::Pending)
            }
            None => {
                state.view.show(decorator, &state.order, true);
                let order = std::mem::take(&mut state.order);
                let output = finish_tour("Nearest-neighbor tour", &state.graph, order, decorator)?;
                Ok(self.run.complete(output))
            }
        }
    }
}
