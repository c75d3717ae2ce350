//! Articulation points and biconnected components (Hopcroft-Tarjan).
//!
//! Iterative depth-first search. Each vertex gets a discovery number `dfn`
//! and a low-link `low`, the smallest `dfn` reachable through its subtree and
//! one back edge. Tree and back edges go on an edge stack; when a child `c`
//! of `v` finishes with `low[c] >= dfn[v]`, the edges down to `v-c` are
//! popped as one biconnected component and `v` separates it from the rest.
//!
//! Parallel edges are ignored: a second edge to the DFS parent is not a back
//! edge.

use std::collections::{BTreeMap, BTreeSet};

use graphstep_core::prelude::*;
use tracing::{debug, trace};

/// DFS stack frame.
#[derive(Debug)]
struct Frame {
    vertex: VertexId,
    parent: Option<VertexId>,
    neighbors: Vec<VertexId>,
    next: usize,
}

#[derive(Debug)]
struct ArticulationState {
    graph: AnyGraph,
    root: VertexId,
    started: bool,
    dfs: Vec<Frame>,
    dfn: BTreeMap<VertexId, usize>,
    low: BTreeMap<VertexId, usize>,
    edge_stack: Vec<(VertexId, VertexId)>,
    root_children: usize,
    articulation: BTreeSet<VertexId>,
    components: Vec<Vec<VertexId>>,
}

impl ArticulationState {
    fn discover(&mut self, v: VertexId, parent: Option<VertexId>) {
        let number = self.dfn.len();
        self.dfn.insert(v, number);
        self.low.insert(v, number);
        self.dfs.push(Frame {
            vertex: v,
            parent,
            neighbors: self.graph.neighbors(v),
            next: 0,
        });
    }

    fn dfn(&self, v: VertexId) -> usize {
        self.dfn.get(&v).copied().unwrap_or_default()
    }

    fn low(&self, v: VertexId) -> usize {
        self.low.get(&v).copied().unwrap_or_default()
    }

    fn lower(&mut self, v: VertexId, value: usize) {
        if value < self.low(v) {
            self.low.insert(v, value);
        }
    }

    /// Pop edges up to and including `parent-child` as one component.
    fn pop_component(&mut self, parent: VertexId, child: VertexId) -> Vec<(VertexId, VertexId)> {
        let mut edges = Vec::new();
        while let Some(edge) = self.edge_stack.pop() {
            edges.push(edge);
            if edge == (parent, child) {
                break;
            }
        }
        edges
    }
}

/// Articulation points and biconnected components of a connected undirected graph.
///
/// Components are coloured with distinct auxiliary states; articulation
/// points end up `Selected`.
#[derive(Debug, Default)]
pub struct ArticulationPoints {
    run: RunState<ArticulationState>,
    articulation: Vec<VertexId>,
    components: Vec<Vec<VertexId>>,
}

impl ArticulationPoints {
    /// Create the algorithm.
    pub fn new() -> Self {
        Self::default()
    }

    /// Articulation points found by the last completed run, ascending.
    pub fn articulation_points(&self) -> &[VertexId] {
        &self.articulation
    }

    /// Vertex sets of the biconnected components, in the order they were found.
    pub fn components(&self) -> &[Vec<VertexId>] {
        &self.components
    }

    fn finish(&mut self, decorator: &mut dyn Decorator) -> AlgorithmResult<Step> {
        let Some(mut state) = self.run.take() else {
            return Err(AlgorithmError::NotInitialized);
        };
        if state.root_children > 1 {
            state.articulation.insert(state.root);
        }
        for &v in &state.articulation {
            decorator.set_vertex_state(v, DecorationState::Selected);
        }

        self.articulation = state.articulation.into_iter().collect();
        self.components = state.components;
        let text = format!(
            "{} articulation points, {} biconnected components",
            self.articulation.len(),
            self.components.len()
        );
        decorator.set_status_line(&text);
        Ok(Step::Complete(
            AlgorithmOutput::new()
                .with_name("Articulation points")
                .with_message(Message::success("Biconnected components", text)),
        ))
    }
}

impl Algorithm for ArticulationPoints {
    fn full_name(&self) -> &'static str {
        "Articulation points and biconnected components (Hopcroft-Tarjan)"
    }

    fn short_name(&self) -> &'static str {
        "Articulation points"
    }

    fn input_kind(&self) -> InputKind {
        InputKind::None
    }

    fn initialize(&mut self, graph: &dyn Graph, input: &AlgorithmInput) -> AlgorithmResult<()> {
        precondition::check_input(graph, self.input_kind(), input)?;
        precondition::require_directed(graph, false)?;
        precondition::require_min_vertices(graph, 1)?;
        precondition::require_connected(graph)?;

        let root = graph
            .vertices()
            .first()
            .copied()
            .ok_or(AlgorithmError::NotEnoughVertices { min: 1, actual: 0 })?;
        debug!("Hopcroft-Tarjan from root {}", root);

        self.articulation.clear();
        self.components.clear();
        self.run.start(ArticulationState {
            graph: graph.to_any(),
            root,
            started: false,
            dfs: Vec::new(),
            dfn: BTreeMap::new(),
            low: BTreeMap::new(),
            edge_stack: Vec::new(),
            root_children: 0,
            articulation: BTreeSet::new(),
            components: Vec::new(),
        });
        Ok(())
    }

    fn step(&mut self, decorator: &mut dyn Decorator) -> AlgorithmResult<Step> {
        let state = self.run.running()?;

        if !state.started {
            state.started = true;
            let root = state.root;
            state.discover(root, None);
            decorator.set_vertex_state(root, DecorationState::Considering);
            decorator.set_vertex_external_label(root, "0");
            decorator.set_status_line(&format!("Starting the search at {root}"));
            return Ok(Step::Pending);
        }

        loop {
            let Some(frame) = state.dfs.last_mut() else {
                return self.finish(decorator);
            };
            let v = frame.vertex;
            let parent = frame.parent;

            if let Some(&w) = frame.neighbors.get(frame.next) {
                frame.next += 1;
                if !state.dfn.contains_key(&w) {
                    if v == state.root {
                        state.root_children += 1;
                    }
                    state.edge_stack.push((v, w));
                    state.discover(w, Some(v));
                    let number = state.dfn(w);
                    decorator.set_edge_state(v, w, DecorationState::Considering);
                    decorator.set_vertex_state(w, DecorationState::Considering);
                    decorator.set_vertex_external_label(w, &number.to_string());
                    decorator.set_status_line(&format!("Discovered {w} from {v}"));
                    return Ok(Step::Pending);
                }
                if Some(w) != parent && state.dfn(w) < state.dfn(v) {
                    trace!("Back edge {}-{}", v, w);
                    state.edge_stack.push((v, w));
                    let target = state.dfn(w);
                    state.lower(v, target);
                }
                continue;
            }

            state.dfs.pop();
            let low_v = state.low(v);
            decorator.set_vertex_external_label(v, &format!("{} / {}", state.dfn(v), low_v));
            let Some(p) = parent else {
                continue;
            };
            state.lower(p, low_v);
            if low_v < state.dfn(p) {
                continue;
            }

            if p != state.root {
                state.articulation.insert(p);
            }
            let edges = state.pop_component(p, v);
            let index = state.components.len() as u32;
            let aux = DecorationState::Auxiliary(index);
            let mut vertices = BTreeSet::new();
            for &(a, b) in &edges {
                decorator.set_edge_state(a, b, aux);
                vertices.insert(a);
                vertices.insert(b);
            }
            for &u in &vertices {
                decorator.set_vertex_state(u, aux);
            }
            decorator.set_status_line(&format!(
                "Biconnected component {} with {} vertices, separated at {p}",
                index + 1,
                vertices.len()
            ));
            state.components.push(vertices.into_iter().collect());
            return Ok(Step::Pending);
        }
    }
}
