//! Euler trails with Fleury's rule: never cross a bridge unless forced.
//!
//! The walk runs on an owned clone of the graph and removes each edge as it
//! is crossed. Bridge tests compare the component count with and without the
//! candidate edge, O(V + E) per test.

use graphstep_core::prelude::*;
use tracing::{debug, trace};

use crate::support::describe_sequence;
use crate::union_find::is_bridge;

/// Edge-consuming walk shared by [`Fleury`] and [`MultiFleury`].
#[derive(Debug, Clone)]
pub struct FleuryWalk {
    graph: AnyGraph,
    current: VertexId,
    trail: Vec<VertexId>,
    last_edge: Option<(VertexId, VertexId)>,
}

impl FleuryWalk {
    /// Start a walk at the smallest odd-degree vertex, or the smallest vertex.
    ///
    /// Returns `None` for a graph without vertices.
    pub fn new(graph: AnyGraph) -> Option<Self> {
        let start = odd_degree_vertices(&graph)
            .first()
            .copied()
            .or_else(|| graph.vertices().first().copied())?;
        Some(Self {
            graph,
            current: start,
            trail: vec![start],
            last_edge: None,
        })
    }

    /// Vertex the walk stands on.
    pub fn current(&self) -> VertexId {
        self.current
    }

    /// Vertices visited so far, in order.
    pub fn trail(&self) -> &[VertexId] {
        &self.trail
    }

    /// Most recently crossed edge.
    pub fn last_edge(&self) -> Option<(VertexId, VertexId)> {
        self.last_edge
    }

    /// Whether every edge has been crossed.
    pub fn is_done(&self) -> bool {
        self.graph.edge_count() == 0
    }

    /// Next vertex by Fleury's rule: the first non-bridge neighbor in id
    /// order, or the only remaining neighbor.
    pub fn choose(&self) -> Option<VertexId> {
        let neighbors = self.graph.neighbors(self.current);
        if neighbors.len() <= 1 {
            return neighbors.first().copied();
        }
        let vertices = self.graph.vertices();
        let edges = self.graph.edges();
        neighbors
            .iter()
            .copied()
            .find(|&w| !is_bridge(&vertices, &edges, self.current, w))
            .or_else(|| neighbors.first().copied())
    }

    /// Cross one instance of the edge to `next`.
    pub fn traverse(&mut self, next: VertexId) -> AlgorithmResult<()> {
        self.graph
            .remove_edge(self.current, next)
            .map_err(|e| AlgorithmError::invalid_input(e.to_string()))?;
        trace!("Fleury crossed {}-{}", self.current, next);
        self.last_edge = Some((self.current, next));
        self.current = next;
        self.trail.push(next);
        Ok(())
    }

    /// Choose and cross in one move; `false` once no edge remains.
    pub fn advance(&mut self) -> AlgorithmResult<bool> {
        match self.choose() {
            Some(next) => self.traverse(next).map(|()| true),
            None => Ok(false),
        }
    }
}

fn require_euler_conditions(graph: &dyn Graph) -> AlgorithmResult<()> {
    precondition::require_directed(graph, false)?;
    precondition::require_min_vertices(graph, 1)?;
    precondition::require_connected(graph)?;
    let odd = odd_degree_vertices(graph).len();
    if odd > 2 {
        return Err(AlgorithmError::TooManyOddVertices { count: odd });
    }
    Ok(())
}

fn trail_message(graph: &dyn Graph, trail: &[VertexId]) -> Message {
    let closed = trail.len() > 1 && trail.first() == trail.last();
    let title = if closed { "Euler circuit" } else { "Euler trail" };
    Message::success(title, describe_sequence(graph, trail))
}

#[derive(Debug)]
struct FleuryState {
    source: AnyGraph,
    walk: FleuryWalk,
    chosen: Option<VertexId>,
    crossed: usize,
}

/// Fleury's Euler trail on a simple undirected unweighted graph.
///
/// Each edge takes two checkpoints: chosen (`Considering`), then crossed
/// (`Selected`, labelled with its position in the trail).
#[derive(Debug, Default)]
pub struct Fleury {
    run: RunState<FleuryState>,
}

impl Fleury {
    /// Create the algorithm.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Algorithm for Fleury {
    fn full_name(&self) -> &'static str {
        "Fleury's Euler trail"
    }

    fn short_name(&self) -> &'static str {
        "Fleury"
    }

    fn input_kind(&self) -> InputKind {
        InputKind::None
    }

    fn initialize(&mut self, graph: &dyn Graph, input: &AlgorithmInput) -> AlgorithmResult<()> {
        precondition::check_input(graph, self.input_kind(), input)?;
        if graph.is_multigraph() {
            return Err(AlgorithmError::wrong_kind("simple"));
        }
        precondition::require_weighted(graph, false)?;
        require_euler_conditions(graph)?;

        let source = graph.to_any();
        let walk = FleuryWalk::new(source.clone())
            .ok_or(AlgorithmError::NotEnoughVertices { min: 1, actual: 0 })?;
        debug!("Fleury starting at {}", walk.current());
        self.run.start(FleuryState {
            source,
            walk,
            chosen: None,
            crossed: 0,
        });
        Ok(())
    }

    fn step(&mut self, decorator: &mut dyn Decorator) -> AlgorithmResult<Step> {
        let state = self.run.running()?;
        let current = state.walk.current();

        if state.crossed == 0 && state.chosen.is_none() {
            decorator.set_vertex_state(current, DecorationState::Selected);
        }

        if let Some(next) = state.chosen.take() {
            state.walk.traverse(next)?;
            state.crossed += 1;
            decorator.set_edge_state(current, next, DecorationState::Selected);
            decorator.set_edge_label(current, next, &state.crossed.to_string());
            decorator.set_vertex_state(next, DecorationState::Selected);
            decorator.set_status_line(&format!("Crossed edge {current}-{next}"));
            return Ok(Step::Pending);
        }

        if let Some(next) = state.walk.choose() {
            state.chosen = Some(next);
            decorator.set_edge_state(current, next, DecorationState::Considering);
            decorator.set_status_line(&format!("Next edge from {current}: {current}-{next}"));
            return Ok(Step::Pending);
        }

        let trail = state.walk.trail().to_vec();
        let message = trail_message(&state.source, &trail);
        decorator.set_status_line(&message.text);
        Ok(self.run.complete(
            AlgorithmOutput::new()
                .with_name(message.title.clone())
                .with_message(message)
                .with_sequence(trail),
        ))
    }
}

#[derive(Debug)]
struct MultiFleuryState {
    source: AnyGraph,
    walk: FleuryWalk,
}

/// Undecorated Fleury over undirected multigraphs, one edge per step.
///
/// Used as a sub-routine: the caller decorates [`MultiFleury::last_edge`]
/// itself. Parallel edges are never bridges, so repeated edges are crossed
/// freely.
#[derive(Debug, Default)]
pub struct MultiFleury {
    run: RunState<MultiFleuryState>,
    last_edge: Option<(VertexId, VertexId)>,
}

impl MultiFleury {
    /// Create the algorithm.
    pub fn new() -> Self {
        Self::default()
    }

    /// Edge crossed by the most recent step.
    pub fn last_edge(&self) -> Option<(VertexId, VertexId)> {
        self.last_edge
    }
}

impl Algorithm for MultiFleury {
    fn full_name(&self) -> &'static str {
        "Fleury's Euler trail on a multigraph"
    }

    fn short_name(&self) -> &'static str {
        "MultiFleury"
    }

    fn input_kind(&self) -> InputKind {
        InputKind::None
    }

    fn initialize(&mut self, graph: &dyn Graph, input: &AlgorithmInput) -> AlgorithmResult<()> {
        precondition::check_input(graph, self.input_kind(), input)?;
        require_euler_conditions(graph)?;
        let source = graph.to_any();
        let walk = FleuryWalk::new(source.clone())
            .ok_or(AlgorithmError::NotEnoughVertices { min: 1, actual: 0 })?;
        self.last_edge = None;
        self.run.start(MultiFleuryState { source, walk });
        Ok(())
    }

    fn step(&mut self, _decorator: &mut dyn Decorator) -> AlgorithmResult<Step> {
        let state = self.run.running()?;
        if state.walk.advance()? {
            self.last_edge = state.walk.last_edge();
            return Ok(Step::Pending);
        }

        let trail = state.walk.trail().to_vec();
        let message = trail_message(&state.source, &trail);
        Ok(self.run.complete(
            AlgorithmOutput::new()
                .with_name(message.title.clone())
                .with_message(message)
                .with_sequence(trail),
        ))
    }
}
