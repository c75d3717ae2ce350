//! Decorator without any observable effect.

use super::decorator::Decorator;
use super::state::DecorationState;
use crate::models::{Graph, VertexId};

/// Accepts every call and records nothing.
///
/// Used to run an algorithm headless, e.g. as a sub-routine of another one.
#[derive(Debug, Clone, Copy)]
pub struct NullDecorator<'g> {
    graph: &'g dyn Graph,
}

impl<'g> NullDecorator<'g> {
    /// Create a no-op decorator bound to a graph.
    pub fn new(graph: &'g dyn Graph) -> Self {
        Self { graph }
    }
}

impl Decorator for NullDecorator<'_> {
    fn graph(&self) -> &dyn Graph {
        self.graph
    }

    fn vertex_state(&self, _v: VertexId) -> DecorationState {
        DecorationState::Default
    }

    fn set_vertex_state(&mut self, _v: VertexId, _state: DecorationState) {}

    fn edge_state(&self, _a: VertexId, _b: VertexId) -> DecorationState {
        DecorationState::Default
    }

    fn set_edge_state(&mut self, _a: VertexId, _b: VertexId, _state: DecorationState) {}

    fn set_vertex_external_label(&mut self, _v: VertexId, _text: &str) {}

    fn clear_vertex_external_label(&mut self, _v: VertexId) {}

    fn set_edge_label(&mut self, _a: VertexId, _b: VertexId, _text: &str) {}

    fn clear_edge_label(&mut self, _a: VertexId, _b: VertexId) {}

    fn set_status_line(&mut self, _text: &str) {}

    fn clear_all_decoration(&mut self) {}
}
