//! Algorithm inputs and outputs.

use serde::{Deserialize, Serialize};

use crate::models::{AnyGraph, VertexId};

/// Input handed to [`Algorithm::initialize`](super::Algorithm::initialize).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlgorithmInput {
    /// No input.
    #[default]
    None,
    /// A start vertex.
    Vertex(VertexId),
    /// A source and a sink vertex.
    SourceSink {
        /// Start vertex.
        source: VertexId,
        /// Target vertex.
        sink: VertexId,
    },
}

/// Shape of input an algorithm expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputKind {
    /// No input.
    None,
    /// A start vertex.
    Vertex,
    /// A source and a sink vertex.
    SourceSink,
    /// A start vertex, optionally with a sink.
    VertexOrSourceSink,
}

impl InputKind {
    /// Whether an input has an acceptable shape.
    pub fn accepts(&self, input: &AlgorithmInput) -> bool {
        matches!(
            (self, input),
            (InputKind::None, AlgorithmInput::None)
                | (InputKind::Vertex, AlgorithmInput::Vertex(_))
                | (InputKind::SourceSink, AlgorithmInput::SourceSink { .. })
                | (
                    InputKind::VertexOrSourceSink,
                    AlgorithmInput::Vertex(_) | AlgorithmInput::SourceSink { .. }
                )
        )
    }
}

/// Severity of a [`Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    /// The algorithm found what it was looking for.
    Success,
    /// The algorithm finished but the result is partial or absent.
    Warning,
    /// The algorithm could not produce a result.
    Failure,
}

/// User-facing summary of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Severity.
    pub level: MessageLevel,
    /// Short title.
    pub title: String,
    /// Body text.
    pub text: String,
}

impl Message {
    /// Create a message.
    pub fn new(level: MessageLevel, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            text: text.into(),
        }
    }

    /// Create a success message.
    pub fn success(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(MessageLevel::Success, title, text)
    }

    /// Create a warning message.
    pub fn warning(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(MessageLevel::Warning, title, text)
    }

    /// Create a failure message.
    pub fn failure(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(MessageLevel::Failure, title, text)
    }
}

/// Result of a completed run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlgorithmOutput {
    /// Derived graph (spanning tree, tour, ...).
    pub graph: Option<AnyGraph>,
    /// Name for the derived graph.
    pub name: Option<String>,
    /// Summary for the user.
    pub message: Option<Message>,
    /// Vertex order produced by the run (tour, trail, discovery order).
    pub sequence: Option<Vec<VertexId>>,
}

impl AlgorithmOutput {
    /// Empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a derived graph.
    pub fn with_graph(mut self, graph: impl Into<AnyGraph>) -> Self {
        self.graph = Some(graph.into());
        self
    }

    /// Attach a name for the derived graph.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach a message.
    pub fn with_message(mut self, message: Message) -> Self {
        self.message = Some(message);
        self
    }

    /// Attach a vertex sequence.
    pub fn with_sequence(mut self, sequence: Vec<VertexId>) -> Self {
        self.sequence = Some(sequence);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_kind_accepts() {
        let vertex = AlgorithmInput::Vertex(VertexId(0));
        let pair = AlgorithmInput::SourceSink {
            source: VertexId(0),
            sink: VertexId(1),
        };
        assert!(InputKind::None.accepts(&AlgorithmInput::None));
        assert!(!InputKind::None.accepts(&vertex));
        assert!(InputKind::Vertex.accepts(&vertex));
        assert!(!InputKind::Vertex.accepts(&pair));
        assert!(InputKind::VertexOrSourceSink.accepts(&vertex));
        assert!(InputKind::VertexOrSourceSink.accepts(&pair));
        assert!(!InputKind::VertexOrSourceSink.accepts(&AlgorithmInput::None));
    }

    #[test]
    fn test_message_serialization() {
        let msg = Message::warning("No path", "Sink is unreachable");
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(
            json,
            r#"{"level":"warning","title":"No path","text":"Sink is unreachable"}"#
        );
    }

    #[test]
    fn test_output_builder() {
        let output = AlgorithmOutput::new()
            .with_name("Tour")
            .with_sequence(vec![VertexId(0), VertexId(1)]);
        assert_eq!(output.name.as_deref(), Some("Tour"));
        assert!(output.graph.is_none());
        assert_eq!(output.sequence.unwrap().len(), 2);
    }
}
