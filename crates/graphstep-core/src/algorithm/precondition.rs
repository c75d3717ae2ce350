//! Precondition checks shared by algorithm `initialize` implementations.

use crate::error::{AlgorithmError, AlgorithmResult};
use crate::models::{component_count, Graph, GraphKind, VertexId};

use super::io::{AlgorithmInput, InputKind};

/// Fail unless the graph's directedness matches.
pub fn require_directed(graph: &dyn Graph, directed: bool) -> AlgorithmResult<()> {
    if graph.is_directed() != directed {
        return Err(AlgorithmError::WrongDirectedness {
            expected_directed: directed,
        });
    }
    Ok(())
}

/// Fail unless the graph's weighting matches.
pub fn require_weighted(graph: &dyn Graph, weighted: bool) -> AlgorithmResult<()> {
    if graph.is_weighted() != weighted {
        return Err(AlgorithmError::WrongWeighting {
            expected_weighted: weighted,
        });
    }
    Ok(())
}

/// Fail unless the graph is a single connected component.
pub fn require_connected(graph: &dyn Graph) -> AlgorithmResult<()> {
    let components = component_count(graph);
    if components > 1 {
        return Err(AlgorithmError::Disconnected { components });
    }
    Ok(())
}

/// Fail when the graph has more than `limit` vertices.
pub fn require_max_vertices(graph: &dyn Graph, limit: usize) -> AlgorithmResult<()> {
    let actual = graph.vertex_count();
    if actual > limit {
        return Err(AlgorithmError::TooManyVertices { limit, actual });
    }
    Ok(())
}

/// Fail when the graph has fewer than `min` vertices.
pub fn require_min_vertices(graph: &dyn Graph, min: usize) -> AlgorithmResult<()> {
    let actual = graph.vertex_count();
    if actual < min {
        return Err(AlgorithmError::NotEnoughVertices { min, actual });
    }
    Ok(())
}

/// Fail unless the graph is of the given kind.
pub fn require_kind(graph: &dyn Graph, kind: GraphKind) -> AlgorithmResult<()> {
    if graph.kind() != kind {
        return Err(AlgorithmError::wrong_kind(kind.to_string()));
    }
    Ok(())
}

/// Fail when any edge weight is negative.
pub fn require_non_negative_weights(graph: &dyn Graph) -> AlgorithmResult<()> {
    match graph.edges().into_iter().find(|e| e.cost() < 0.0) {
        Some(edge) => Err(AlgorithmError::NegativeWeight {
            from: edge.from,
            to: edge.to,
            weight: edge.cost(),
        }),
        None => Ok(()),
    }
}

/// Fail unless the vertex is part of the graph.
pub fn require_vertex(graph: &dyn Graph, v: VertexId) -> AlgorithmResult<VertexId> {
    if graph.contains_vertex(v) {
        Ok(v)
    } else {
        Err(AlgorithmError::UnknownVertex(v))
    }
}

/// Check the input shape, and that every vertex it names exists.
///
/// Returns the start vertex and optional sink (`None` start for no input).
pub fn check_input(
    graph: &dyn Graph,
    kind: InputKind,
    input: &AlgorithmInput,
) -> AlgorithmResult<(Option<VertexId>, Option<VertexId>)> {
    if !kind.accepts(input) {
        return Err(AlgorithmError::invalid_input(format!(
            "expected {}, got {}",
            describe_kind(kind),
            describe_input(input)
        )));
    }
    match *input {
        AlgorithmInput::None => Ok((None, None)),
        AlgorithmInput::Vertex(v) => Ok((Some(require_vertex(graph, v)?), None)),
        AlgorithmInput::SourceSink { source, sink } => Ok((
            Some(require_vertex(graph, source)?),
            Some(require_vertex(graph, sink)?),
        )),
    }
}

/// Like [`check_input`] for algorithms that need a start vertex.
pub fn start_vertex(
    graph: &dyn Graph,
    kind: InputKind,
    input: &AlgorithmInput,
) -> AlgorithmResult<(VertexId, Option<VertexId>)> {
    match check_input(graph, kind, input)? {
        (Some(start), sink) => Ok((start, sink)),
        (None, _) => Err(AlgorithmError::invalid_input("a start vertex is required")),
    }
}

fn describe_kind(kind: InputKind) -> &'static str {
    match kind {
        InputKind::None => "no input",
        InputKind::Vertex => "a start vertex",
        InputKind::SourceSink => "a source and a sink",
        InputKind::VertexOrSourceSink => "a start vertex or a source and a sink",
    }
}

fn describe_input(input: &AlgorithmInput) -> &'static str {
    match input {
        AlgorithmInput::None => "no input",
        AlgorithmInput::Vertex(_) => "a vertex",
        AlgorithmInput::SourceSink { .. } => "a source and a sink",
    }
}
