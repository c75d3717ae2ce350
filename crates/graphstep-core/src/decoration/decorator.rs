//! The contract through which algorithms report visual state.

use super::state::DecorationState;
use crate::models::{Graph, VertexId};

/// Receives vertex/edge states, labels and a status line from a running algorithm.
///
/// Edge lookups are symmetric for undirected graphs. For Euclidean graphs an
/// edge in the [`DecorationState::Disabled`] state is not drawn, and setting
/// any other state draws it.
pub trait Decorator: Send {
    /// The graph being decorated.
    fn graph(&self) -> &dyn Graph;

    /// Current state of a vertex.
    fn vertex_state(&self, v: VertexId) -> DecorationState;

    /// Set the state of a vertex.
    fn set_vertex_state(&mut self, v: VertexId, state: DecorationState);

    /// Current state of an edge.
    fn edge_state(&self, a: VertexId, b: VertexId) -> DecorationState;

    /// Set the state of an edge.
    fn set_edge_state(&mut self, a: VertexId, b: VertexId, state: DecorationState);

    /// Show a label next to a vertex.
    fn set_vertex_external_label(&mut self, v: VertexId, text: &str);

    /// Remove the label next to a vertex.
    fn clear_vertex_external_label(&mut self, v: VertexId);

    /// Show a label on an edge.
    fn set_edge_label(&mut self, a: VertexId, b: VertexId, text: &str);

    /// Remove the label of an edge.
    fn clear_edge_label(&mut self, a: VertexId, b: VertexId);

    /// Replace the status line.
    fn set_status_line(&mut self, text: &str);

    /// Reset every state to default and drop all labels and the status line.
    fn clear_all_decoration(&mut self);
}

/// Format a tentative distance for a vertex label.
///
/// Infinite distances render as `∞`; finite ones with at most two fractional
/// digits and no trailing zeros.
pub fn format_distance(distance: f64) -> String {
    if distance.is_infinite() {
        return "∞".to_string();
    }
    let text = format!("{distance:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}
