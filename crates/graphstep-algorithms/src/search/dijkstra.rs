//! Dijkstra's shortest paths with lazy deletion.
//!
//! The queue may hold several entries per vertex. An entry whose distance is
//! worse than the best known distance, or whose vertex is already settled, is
//! skipped when popped.
//!
//! Checkpoints:
//! 1. all distances shown as `∞`, the source as `0`
//! 2. each settled vertex (selected together with its tree edge)
//! 3. each edge relaxation (`Considering` if it improved a distance,
//!    `Disabled` otherwise)

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, VecDeque};

use graphstep_core::prelude::*;
use tracing::{debug, trace};

use super::{highlight_path, tree_path};
use crate::support::{add_output_edge, describe_sequence, weighted_skeleton};

#[derive(Debug, Clone, Copy, PartialEq)]
struct QueueEntry {
    distance: f64,
    vertex: VertexId,
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.vertex.cmp(&self.vertex))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug)]
enum Phase {
    Start,
    Pop,
    Relax {
        from: VertexId,
        pending: VecDeque<VertexId>,
    },
}

#[derive(Debug)]
struct DijkstraState {
    graph: AnyGraph,
    source: VertexId,
    sink: Option<VertexId>,
    phase: Phase,
    queue: BinaryHeap<QueueEntry>,
    distance: BTreeMap<VertexId, f64>,
    parent: BTreeMap<VertexId, VertexId>,
    settled: BTreeSet<VertexId>,
}

impl DijkstraState {
    fn best(&self, v: VertexId) -> f64 {
        self.distance.get(&v).copied().unwrap_or(f64::INFINITY)
    }

    /// Pop the next non-stale entry.
    fn pop_fresh(&mut self) -> Option<QueueEntry> {
        while let Some(entry) = self.queue.pop() {
            if self.settled.contains(&entry.vertex) || entry.distance > self.best(entry.vertex) {
                trace!("Skipping stale entry for {}", entry.vertex);
                continue;
            }
            return Some(entry);
        }
        None
    }
}

/// Dijkstra's single-source shortest paths.
#[derive(Debug, Default)]
pub struct Dijkstra {
    run: RunState<DijkstraState>,
    distances: BTreeMap<VertexId, f64>,
}

impl Dijkstra {
    /// Create the algorithm.
    pub fn new() -> Self {
        Self::default()
    }

    /// Final distances of the settled vertices from the last completed run.
    pub fn distances(&self) -> &BTreeMap<VertexId, f64> {
        &self.distances
    }

    fn settle(state: &mut DijkstraState, v: VertexId, decorator: &mut dyn Decorator) {
        state.settled.insert(v);
        decorator.set_vertex_state(v, DecorationState::Selected);
        if let Some(&p) = state.parent.get(&v) {
            decorator.set_edge_state(p, v, DecorationState::Selected);
        }
        decorator.set_status_line(&format!(
            "Settled vertex {v} at distance {}",
            format_distance(state.best(v))
        ));
    }

    fn finish(&mut self, decorator: &mut dyn Decorator) -> AlgorithmResult<Step> {
        let state = self.run.running()?;

        // Unsettled vertices still show their tentative edge as considering.
        let mut tree = weighted_skeleton(&state.graph);
        let mut kept = BTreeMap::new();
        for (&child, &p) in &state.parent {
            if state.settled.contains(&child) {
                let weight = state.graph.edge_cost(p, child);
                add_output_edge(&mut tree, p, child, weight)?;
                kept.insert(child, p);
            } else {
                decorator.set_edge_state(p, child, DecorationState::Disabled);
            }
        }

        self.distances = state
            .settled
            .iter()
            .map(|&v| (v, state.best(v)))
            .collect();

        let mut output = AlgorithmOutput::new()
            .with_name("Shortest path tree (Dijkstra)")
            .with_graph(tree);

        output = match state.sink {
            Some(sink) => match tree_path(&kept, state.source, sink) {
                Some(path) => {
                    highlight_path(decorator, &kept, &path);
                    let length = state.best(sink);
                    let text = format!(
                        "{} (length {})",
                        describe_sequence(&state.graph, &path),
                        format_distance(length)
                    );
                    decorator.set_status_line(&text);
                    output
                        .with_message(Message::success("Shortest path", text))
                        .with_sequence(path)
                }
                None => {
                    decorator.set_status_line(&format!("Vertex {sink} is unreachable"));
                    output.with_message(Message::warning(
                        "No path",
                        format!("There is no path from {} to {}", state.source, sink),
                    ))
                }
            },
            None => {
                let text = format!(
                    "Reached {} of {} vertices from {}",
                    state.settled.len(),
                    state.graph.vertex_count(),
                    state.source
                );
                decorator.set_status_line(&text);
                output.with_message(Message::success("Shortest path tree", text))
            }
        };

        Ok(self.run.complete(output))
    }
}

impl Algorithm for Dijkstra {
    fn full_name(&self) -> &'static str {
        "Dijkstra's shortest paths"
    }

    fn short_name(&self) -> &'static str {
        "Dijkstra"
    }

    fn input_kind(&self) -> InputKind {
        InputKind::VertexOrSourceSink
    }

    fn initialize(&mut self, graph: &dyn Graph, input: &AlgorithmInput) -> AlgorithmResult<()> {
        let (source, sink) = precondition::start_vertex(graph, self.input_kind(), input)?;
        precondition::require_weighted(graph, true)?;
        precondition::require_non_negative_weights(graph)?;
        debug!(
            "Dijkstra from {} over {} vertices (sink: {:?})",
            source,
            graph.vertex_count(),
            sink
        );

        self.distances.clear();
        self.run.start(DijkstraState {
            graph: graph.to_any(),
            source,
            sink,
            phase: Phase::Start,
            queue: BinaryHeap::new(),
            distance: BTreeMap::new(),
            parent: BTreeMap::new(),
            settled: BTreeSet::new(),
        });
        Ok(())
    }

    fn step(&mut self, decorator: &mut dyn Decorator) -> AlgorithmResult<Step> {
        let state = self.run.running()?;

        loop {
            match &mut state.phase {
                Phase::Start => {
                    for v in state.graph.vertices() {
                        decorator.set_vertex_external_label(v, &format_distance(f64::INFINITY));
                    }
                    let source = state.source;
                    state.distance.insert(source, 0.0);
                    state.queue.push(QueueEntry {
                        distance: 0.0,
                        vertex: source,
                    });
                    decorator.set_vertex_external_label(source, &format_distance(0.0));
                    decorator.set_status_line(&format!("Searching from vertex {source}"));
                    state.phase = Phase::Pop;
                    return Ok(Step::Pending);
                }
                Phase::Pop => {
                    let Some(entry) = state.pop_fresh() else {
                        return self.finish(decorator);
                    };
                    let v = entry.vertex;
                    Self::settle(state, v, decorator);
                    if Some(v) == state.sink {
                        return self.finish(decorator);
                    }
                    let pending = state
                        .graph
                        .neighbors(v)
                        .into_iter()
                        .filter(|w| !state.settled.contains(w))
                        .collect();
                    state.phase = Phase::Relax { from: v, pending };
                    return Ok(Step::Pending);
                }
                Phase::Relax { from, pending } => {
                    let from = *from;
                    let Some(w) = pending.pop_front() else {
                        state.phase = Phase::Pop;
                        continue;
                    };
                    let cost = state.graph.edge_cost(from, w).unwrap_or(f64::INFINITY);
                    let candidate = state.best(from) + cost;
                    if candidate < state.best(w) {
                        if let Some(old) = state.parent.insert(w, from) {
                            decorator.set_edge_state(old, w, DecorationState::Disabled);
                        }
                        state.distance.insert(w, candidate);
                        state.queue.push(QueueEntry {
                            distance: candidate,
                            vertex: w,
                        });
                        decorator.set_edge_state(from, w, DecorationState::Considering);
                        decorator.set_vertex_external_label(w, &format_distance(candidate));
                        decorator.set_status_line(&format!(
                            "Improved distance of {w} to {} via {from}",
                            format_distance(candidate)
                        ));
                    } else {
                        decorator.set_edge_state(from, w, DecorationState::Disabled);
                        decorator.set_status_line(&format!(
                            "Edge {from}-{w} does not improve the distance of {w}"
                        ));
                    }
                    return Ok(Step::Pending);
                }
            }
        }
    }
}
