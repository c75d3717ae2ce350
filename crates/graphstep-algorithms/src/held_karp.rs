//! Exact Hamiltonian paths and travelling-salesman tours (Held-Karp).
//!
//! Dynamic program over vertex subsets: `best[(mask, end)]` is the cheapest
//! path visiting exactly the vertices in `mask` and ending at `end`. Layers
//! are expanded in order of subset size, so every state is final before it
//! is extended. O(n^2 * 2^n) time, hence the vertex ceiling.
//!
//! Checkpoints:
//! 1. each state taken from the current layer (its partial path is shown)
//! 2. each candidate extension edge (`Considering`)

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use graphstep_core::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::support::{
    add_output_edge, describe_sequence, hide_edge, select_path, unweighted_skeleton,
    weighted_skeleton,
};

/// Largest vertex count the exact search accepts.
pub const HELD_KARP_MAX_VERTICES: usize = 50;

/// Configuration for the exact search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldKarpConfig {
    /// Vertex ceiling, never above [`HELD_KARP_MAX_VERTICES`].
    pub max_vertices: usize,
}

impl Default for HeldKarpConfig {
    fn default() -> Self {
        Self {
            max_vertices: HELD_KARP_MAX_VERTICES,
        }
    }
}

impl HeldKarpConfig {
    /// Create a default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the vertex ceiling, clamped to [`HELD_KARP_MAX_VERTICES`].
    pub fn with_max_vertices(mut self, max_vertices: usize) -> Self {
        self.max_vertices = max_vertices.min(HELD_KARP_MAX_VERTICES);
        self
    }
}

/// State key: visited subset, end vertex index, and whether the path starts
/// at index 0.
type Key = (u64, usize, bool);

#[derive(Debug, Clone, Copy)]
struct Entry {
    cost: f64,
    prev: Option<Key>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Tour,
    Path,
}

#[derive(Debug)]
enum Phase {
    Expand,
    Candidates { key: Key, pending: VecDeque<usize> },
}

#[derive(Debug)]
struct Search {
    mode: Mode,
    graph: AnyGraph,
    ids: Vec<VertexId>,
    /// `cost[i][j]`: cost of the edge from `ids[i]` to `ids[j]`.
    cost: Vec<Vec<Option<f64>>>,
    full: u64,
    table: BTreeMap<Key, Entry>,
    frontier: VecDeque<Key>,
    next_layer: BTreeSet<Key>,
    phase: Phase,
    shown_edges: Vec<(VertexId, VertexId)>,
    shown_vertices: Vec<VertexId>,
}

impl Search {
    fn new(mode: Mode, graph: &dyn Graph) -> Self {
        let ids = graph.vertices();
        let n = ids.len();
        let cost = ids
            .iter()
            .map(|&a| {
                ids.iter()
                    .map(|&b| match mode {
                        Mode::Tour => graph.edge_cost(a, b),
                        Mode::Path => graph.are_adjacent(a, b).then_some(1.0),
                    })
                    .collect()
            })
            .collect();

        let mut seeds = vec![(1u64, 0usize, true)];
        if mode == Mode::Path {
            seeds.extend((0..n).map(|i| (1u64 << i, i, false)));
        }
        let table = seeds
            .iter()
            .map(|&key| (key, Entry { cost: 0.0, prev: None }))
            .collect();

        Self {
            mode,
            graph: graph.to_any(),
            ids,
            cost,
            full: if n == 64 { u64::MAX } else { (1u64 << n) - 1 },
            table,
            frontier: seeds.into(),
            next_layer: BTreeSet::new(),
            phase: Phase::Expand,
            shown_edges: Vec::new(),
            shown_vertices: Vec::new(),
        }
    }

    fn path_of(&self, key: Key) -> Vec<VertexId> {
        let mut path = Vec::new();
        let mut cursor = Some(key);
        while let Some(k) = cursor {
            path.push(self.ids[k.1]);
            cursor = self.table.get(&k).and_then(|e| e.prev);
        }
        path.reverse();
        path
    }

    fn clear_shown(&mut self, decorator: &mut dyn Decorator) {
        for (a, b) in self.shown_edges.drain(..) {
            hide_edge(decorator, a, b);
        }
        for v in self.shown_vertices.drain(..) {
            decorator.set_vertex_state(v, DecorationState::Default);
        }
    }

    fn show_path(&mut self, decorator: &mut dyn Decorator, path: &[VertexId]) {
        select_path(decorator, path);
        self.shown_vertices.extend_from_slice(path);
        self.shown_edges.extend(path.windows(2).map(|p| (p[0], p[1])));
    }

    fn step(&mut self, decorator: &mut dyn Decorator) -> AlgorithmResult<Option<AlgorithmOutput>> {
        loop {
            match &mut self.phase {
                Phase::Expand => {
                    let Some(key) = self.frontier.pop_front() else {
                        if self.next_layer.is_empty() {
                            return self.close(decorator).map(Some);
                        }
                        self.frontier = std::mem::take(&mut self.next_layer).into_iter().collect();
                        continue;
                    };
                    let (mask, end, _) = key;
                    let pending = (0..self.ids.len())
                        .filter(|&c| mask & (1 << c) == 0 && self.cost[end][c].is_some())
                        .collect();
                    let path = self.path_of(key);
                    self.clear_shown(decorator);
                    self.show_path(decorator, &path);
                    decorator.set_status_line(&format!(
                        "Extending path {}",
                        describe_sequence(&self.graph, &path)
                    ));
                    self.phase = Phase::Candidates { key, pending };
                    return Ok(None);
                }
                Phase::Candidates { key, pending } => {
                    let key = *key;
                    let Some(c) = pending.pop_front() else {
                        self.phase = Phase::Expand;
                        continue;
                    };
                    let (mask, end, anchored) = key;
                    let weight = self.cost[end][c].unwrap_or(f64::INFINITY);
                    let base = self.table.get(&key).map_or(f64::INFINITY, |e| e.cost);
                    let next = (mask | (1 << c), c, anchored);
                    let candidate = base + weight;
                    let improved = self
                        .table
                        .get(&next)
                        .map_or(true, |existing| candidate < existing.cost);
                    if improved {
                        self.table.insert(
                            next,
                            Entry {
                                cost: candidate,
                                prev: Some(key),
                            },
                        );
                        self.next_layer.insert(next);
                    }
                    let (a, b) = (self.ids[end], self.ids[c]);
                    decorator.set_edge_state(a, b, DecorationState::Considering);
                    self.shown_edges.push((a, b));
                    trace!("Held-Karp candidate {}-{} (improved: {})", a, b, improved);
                    return Ok(None);
                }
            }
        }
    }

    fn best_full(&self) -> Option<(Key, f64)> {
        self.table
            .iter()
            .filter(|&(&(mask, _, _), _)| mask == self.full)
            .map(|(&key, entry)| (key, entry.cost))
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    fn close(&mut self, decorator: &mut dyn Decorator) -> AlgorithmResult<AlgorithmOutput> {
        self.clear_shown(decorator);
        match self.mode {
            Mode::Tour => self.close_tour(decorator),
            Mode::Path => self.close_path(decorator),
        }
    }

    fn close_tour(&mut self, decorator: &mut dyn Decorator) -> AlgorithmResult<AlgorithmOutput> {
        let best = self
            .table
            .iter()
            .filter(|&(&(mask, _, anchored), _)| mask == self.full && anchored)
            .filter_map(|(&key, entry)| {
                let back = self.cost[key.1][0]?;
                Some((key, entry.cost + back))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1));

        let output = AlgorithmOutput::new().with_name("Optimal tour (Held-Karp)");
        let Some((key, total)) = best else {
            decorator.set_status_line("No tour exists");
            return Ok(output.with_message(Message::failure(
                "No tour",
                "The graph has no Hamiltonian cycle",
            )));
        };

        let mut tour = self.path_of(key);
        tour.push(self.ids[0]);
        select_path(decorator, &tour);
        let text = format!(
            "{} (length {})",
            describe_sequence(&self.graph, &tour),
            format_distance(total)
        );
        decorator.set_status_line(&text);
        Ok(output
            .with_graph(self.sequence_graph(&tour)?)
            .with_message(Message::success("Optimal tour", text))
            .with_sequence(tour))
    }

    fn close_path(&mut self, decorator: &mut dyn Decorator) -> AlgorithmResult<AlgorithmOutput> {
        let circuit = if self.ids.len() >= 3 {
            self.table
                .keys()
                .find(|&&(mask, end, anchored)| {
                    mask == self.full && anchored && self.cost[end][0].is_some()
                })
                .copied()
        } else {
            None
        };

        let output = AlgorithmOutput::new().with_name("Hamiltonian path");
        if let Some(key) = circuit {
            let mut cycle = self.path_of(key);
            cycle.push(self.ids[0]);
            select_path(decorator, &cycle);
            let text = describe_sequence(&self.graph, &cycle);
            decorator.set_status_line(&format!("Hamiltonian circuit: {text}"));
            return Ok(output
                .with_name("Hamiltonian circuit")
                .with_graph(self.sequence_graph(&cycle)?)
                .with_message(Message::success("Hamiltonian circuit", text))
                .with_sequence(cycle));
        }

        let Some((key, _)) = self.best_full() else {
            decorator.set_status_line("No Hamiltonian path exists");
            return Ok(output.with_message(Message::failure(
                "No Hamiltonian path",
                "No path visits every vertex exactly once",
            )));
        };
        let path = self.path_of(key);
        select_path(decorator, &path);
        let text = describe_sequence(&self.graph, &path);
        decorator.set_status_line(&format!("Hamiltonian path: {text}"));
        Ok(output
            .with_graph(self.sequence_graph(&path)?)
            .with_message(Message::success("Hamiltonian path", text))
            .with_sequence(path))
    }

    fn sequence_graph(&self, sequence: &[VertexId]) -> AlgorithmResult<AnyGraph> {
        let mut graph: AnyGraph = if self.graph.is_weighted() {
            weighted_skeleton(&self.graph).into()
        } else {
            unweighted_skeleton(&self.graph).into()
        };
        for pair in sequence.windows(2) {
            let weight = self.graph.edge_cost(pair[0], pair[1]);
            add_output_edge(&mut graph, pair[0], pair[1], weight)?;
        }
        Ok(graph)
    }
}

fn step_search(run: &mut RunState<Search>, decorator: &mut dyn Decorator) -> AlgorithmResult<Step> {
    match run.running()?.step(decorator)? {
        Some(output) => Ok(run.complete(output)),
        None => Ok(Step::Pending),
    }
}

/// Optimal travelling-salesman tour by exhaustive dynamic programming.
#[derive(Debug, Default)]
pub struct HeldKarpTsp {
    config: HeldKarpConfig,
    run: RunState<Search>,
}

impl HeldKarpTsp {
    /// Create the algorithm with the default vertex ceiling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the algorithm with a custom configuration.
    pub fn with_config(config: HeldKarpConfig) -> Self {
        Self {
            config,
            run: RunState::default(),
        }
    }
}

impl Algorithm for HeldKarpTsp {
    fn full_name(&self) -> &'static str {
        "Held-Karp optimal travelling salesman tour"
    }

    fn short_name(&self) -> &'static str {
        "Held-Karp"
    }

    fn input_kind(&self) -> InputKind {
        InputKind::None
    }

    fn initialize(&mut self, graph: &dyn Graph, input: &AlgorithmInput) -> AlgorithmResult<()> {
        precondition::check_input(graph, self.input_kind(), input)?;
        precondition::require_weighted(graph, true)?;
        precondition::require_min_vertices(graph, 2)?;
        precondition::require_max_vertices(graph, self.config.max_vertices)?;
        precondition::require_connected(graph)?;
        debug!("Held-Karp tour over {} vertices", graph.vertex_count());
        self.run.start(Search::new(Mode::Tour, graph));
        Ok(())
    }

    fn step(&mut self, decorator: &mut dyn Decorator) -> AlgorithmResult<Step> {
        step_search(&mut self.run, decorator)
    }
}

/// Hamiltonian circuit or path by exhaustive dynamic programming.
///
/// Reports a circuit when one exists, otherwise an open path, otherwise a
/// failure message. Edge weights are ignored.
#[derive(Debug, Default)]
pub struct HamiltonianPath {
    config: HeldKarpConfig,
    run: RunState<Search>,
}

impl HamiltonianPath {
    /// Create the algorithm with the default vertex ceiling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the algorithm with a custom configuration.
    pub fn with_config(config: HeldKarpConfig) -> Self {
        Self {
            config,
            run: RunState::default(),
        }
    }
}

impl Algorithm for HamiltonianPath {
    fn full_name(&self) -> &'static str {
        "Held-Karp Hamiltonian path"
    }

    fn short_name(&self) -> &'static str {
        "Hamiltonian path"
    }

    fn input_kind(&self) -> InputKind {
        InputKind::None
    }

    fn initialize(&mut self, graph: &dyn Graph, input: &AlgorithmInput) -> AlgorithmResult<()> {
        precondition::check_input(graph, self.input_kind(), input)?;
        precondition::require_min_vertices(graph, 1)?;
        precondition::require_max_vertices(graph, self.config.max_vertices)?;
        precondition::require_connected(graph)?;
        debug!("Held-Karp Hamiltonian path over {} vertices", graph.vertex_count());
        self.run.start(Search::new(Mode::Path, graph));
        Ok(())
    }

    fn step(&mut self, decorator: &mut dyn Decorator) -> AlgorithmResult<Step> {
        step_search(&mut self.run, decorator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence_cost(graph: &dyn Graph, sequence: &[VertexId]) -> f64 {
        sequence
            .windows(2)
            .map(|p| graph.edge_cost(p[0], p[1]).unwrap())
            .sum()
    }

    #[test]
    fn test_unit_k4_tour() {
        let edges: Vec<_> = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]
            .iter()
            .map(|&(a, b)| (a, b, 1.0))
            .collect();
        let g = WeightedGraph::from_edges(4, &edges).unwrap();
        let output = run_headless(&mut HeldKarpTsp::new(), &g, &AlgorithmInput::None).unwrap();
        let tour = output.sequence.unwrap();
        assert_eq!(tour.len(), 5);
        assert_eq!(tour.first(), tour.last());
        assert_eq!(sequence_cost(&g, &tour), 4.0);
        assert_eq!(output.message.unwrap().level, MessageLevel::Success);
    }

    #[test]
    fn test_picks_cheapest_tour() {
        // Square 0-1-2-3 with cheap sides and expensive diagonals.
        let g = WeightedGraph::from_edges(
            4,
            &[
                (0, 1, 1.0),
                (1, 2, 1.0),
                (2, 3, 1.0),
                (3, 0, 1.0),
                (0, 2, 5.0),
                (1, 3, 5.0),
            ],
        )
        .unwrap();
        let output = run_headless(&mut HeldKarpTsp::new(), &g, &AlgorithmInput::None).unwrap();
        assert_eq!(sequence_cost(&g, &output.sequence.unwrap()), 4.0);
        assert_eq!(total_weight(&output.graph.unwrap().edges()), 4.0);
    }

    #[test]
    fn test_no_tour_on_tree() {
        let g = WeightedGraph::from_edges(3, &[(0, 1, 1.0), (1, 2, 1.0)]).unwrap();
        let output = run_headless(&mut HeldKarpTsp::new(), &g, &AlgorithmInput::None).unwrap();
        assert_eq!(output.sequence, None);
        assert_eq!(output.message.unwrap().level, MessageLevel::Failure);
    }

    #[test]
    fn test_vertex_ceiling() {
        let g = EuclideanGraph::from_points(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)]);
        let mut alg = HeldKarpTsp::with_config(HeldKarpConfig::new().with_max_vertices(3));
        assert_eq!(
            run_headless(&mut alg, &g, &AlgorithmInput::None),
            Err(AlgorithmError::TooManyVertices { limit: 3, actual: 4 })
        );
        assert_eq!(
            HeldKarpConfig::new().with_max_vertices(80).max_vertices,
            HELD_KARP_MAX_VERTICES
        );
    }

    #[test]
    fn test_hamiltonian_circuit() {
        let g = UnweightedGraph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
        let output = run_headless(&mut HamiltonianPath::new(), &g, &AlgorithmInput::None).unwrap();
        let cycle = output.sequence.unwrap();
        assert_eq!(cycle.len(), 5);
        assert_eq!(cycle.first(), cycle.last());
        assert_eq!(output.name.as_deref(), Some("Hamiltonian circuit"));
    }

    #[test]
    fn test_hamiltonian_open_path() {
        // Path 1-0-2: the only Hamiltonian path does not start at vertex 0.
        let g = UnweightedGraph::from_edges(3, &[(0, 1), (0, 2)]).unwrap();
        let output = run_headless(&mut HamiltonianPath::new(), &g, &AlgorithmInput::None).unwrap();
        let path = output.sequence.unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path[1], VertexId(0));
        assert_eq!(output.name.as_deref(), Some("Hamiltonian path"));
    }

    #[test]
    fn test_no_hamiltonian_path() {
        // Star with three leaves.
        let g = UnweightedGraph::from_edges(4, &[(0, 1), (0, 2), (0, 3)]).unwrap();
        let output = run_headless(&mut HamiltonianPath::new(), &g, &AlgorithmInput::None).unwrap();
        assert_eq!(output.sequence, None);
        assert_eq!(output.message.unwrap().level, MessageLevel::Failure);
    }

    #[test]
    fn test_partial_paths_are_cleared() {
        let g = EuclideanGraph::from_points(&[(0.0, 0.0), (3.0, 0.0), (3.0, 4.0)]);
        let mut d = MemoryDecorator::new(g.clone());
        let mut alg = HeldKarpTsp::new();
        alg.initialize(&g, &AlgorithmInput::None).unwrap();
        HeadlessRunner::new().drain(&mut alg, &mut d).unwrap();
        // Only the final triangle tour is drawn.
        assert_eq!(d.materialized_edges().len(), 3);
    }
}
