//! Error types for graph manipulation, algorithm preconditions and runners.

use thiserror::Error;

use crate::models::VertexId;

/// Result type for graph operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors raised by graph mutation, lookup and the persisted form.
#[derive(Error, Debug)]
pub enum GraphError {
    /// Vertex is not part of the graph.
    #[error("Unknown vertex: {0}")]
    UnknownVertex(VertexId),

    /// Self loops are not allowed in any graph kind.
    #[error("Self loops are not allowed (vertex {0})")]
    SelfLoop(VertexId),

    /// Edge is not part of the graph.
    #[error("No edge between {0} and {1}")]
    MissingEdge(VertexId, VertexId),

    /// Operation not supported by this graph kind.
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    /// Persisted graph document is structurally invalid.
    #[error("Invalid graph document: {0}")]
    InvalidDocument(String),

    /// JSON encoding/decoding failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GraphError {
    /// Create an unsupported-operation error.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    /// Create an invalid-document error.
    pub fn invalid_document(msg: impl Into<String>) -> Self {
        Self::InvalidDocument(msg.into())
    }
}

/// Result type for algorithm operations.
pub type AlgorithmResult<T> = std::result::Result<T, AlgorithmError>;

/// A violated algorithm precondition.
///
/// This is the only error kind crossing the algorithm boundary. The display
/// text is meant to be shown to the user verbatim as the failure reason.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlgorithmError {
    /// Graph directedness does not match the algorithm.
    #[error("This algorithm requires {} graph", directedness(.expected_directed))]
    WrongDirectedness {
        /// Whether the algorithm expects a directed graph.
        expected_directed: bool,
    },

    /// Graph weighting does not match the algorithm.
    #[error("This algorithm requires {} graph", weighting(.expected_weighted))]
    WrongWeighting {
        /// Whether the algorithm expects a weighted graph.
        expected_weighted: bool,
    },

    /// Graph is not a single connected component.
    #[error("The graph must be connected, but it has {components} components")]
    Disconnected {
        /// Number of connected components found.
        components: usize,
    },

    /// Graph exceeds the vertex ceiling of an exponential algorithm.
    #[error("This algorithm supports at most {limit} vertices, but the graph has {actual}")]
    TooManyVertices {
        /// Maximum supported vertex count.
        limit: usize,
        /// Vertex count of the graph.
        actual: usize,
    },

    /// Graph has too few vertices.
    #[error("This algorithm needs at least {min} vertices, but the graph has {actual}")]
    NotEnoughVertices {
        /// Minimum required vertex count.
        min: usize,
        /// Vertex count of the graph.
        actual: usize,
    },

    /// Graph is not of the kind the algorithm works on.
    #[error("This algorithm requires a {expected} graph")]
    WrongGraphKind {
        /// Human readable name of the expected kind.
        expected: String,
    },

    /// More than two vertices have odd degree, so no Euler trail exists.
    #[error("An Euler trail needs 0 or 2 vertices of odd degree, but the graph has {count}")]
    TooManyOddVertices {
        /// Number of odd-degree vertices.
        count: usize,
    },

    /// Edge with a negative weight where only non-negative weights are valid.
    #[error("Edge {from}-{to} has negative weight {weight}")]
    NegativeWeight {
        /// Edge tail.
        from: VertexId,
        /// Edge head.
        to: VertexId,
        /// Offending weight.
        weight: f64,
    },

    /// Input has the wrong shape for the algorithm.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Input references a vertex that is not in the graph.
    #[error("Vertex {0} is not part of the graph")]
    UnknownVertex(VertexId),

    /// `step` was called before a successful `initialize`.
    #[error("Algorithm has not been initialized")]
    NotInitialized,

    /// `step` was called after the algorithm produced its output.
    #[error("Algorithm has already completed")]
    AlreadyComplete,
}

fn directedness(directed: &bool) -> &'static str {
    if *directed {
        "a directed"
    } else {
        "an undirected"
    }
}

fn weighting(weighted: &bool) -> &'static str {
    if *weighted {
        "a weighted"
    } else {
        "an unweighted"
    }
}

impl AlgorithmError {
    /// Create an invalid-input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a wrong-graph-kind error.
    pub fn wrong_kind(expected: impl Into<String>) -> Self {
        Self::WrongGraphKind {
            expected: expected.into(),
        }
    }
}

/// Errors raised by runner control operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RunnerError {
    /// Resume or single-step requested while the runner is not paused.
    #[error("Runner is not paused (state: {0})")]
    NotPaused(String),

    /// Pause requested while the runner is not running.
    #[error("Runner is not running (state: {0})")]
    NotRunning(String),

    /// Execute requested while a run is in flight.
    #[error("Runner is already executing (state: {0})")]
    AlreadyActive(String),

    /// The run was abandoned by `stop` before producing a result.
    #[error("Run was stopped before completion")]
    Stopped,

    /// The algorithm rejected its input.
    #[error(transparent)]
    Algorithm(#[from] AlgorithmError),
}
