//! In-memory decorator whose state can be snapshotted by a renderer.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::decorator::Decorator;
use super::state::DecorationState;
use crate::models::{ordered_pair, AnyGraph, Graph, GraphKind, VertexId};

type EdgeKey = (VertexId, VertexId);

#[derive(Debug, Default)]
struct DecorationStore {
    vertex_states: BTreeMap<VertexId, DecorationState>,
    edge_states: BTreeMap<EdgeKey, DecorationState>,
    vertex_labels: BTreeMap<VertexId, String>,
    edge_labels: BTreeMap<EdgeKey, String>,
    status_line: Option<String>,
    /// Drawn edges of a Euclidean graph.
    materialized: BTreeSet<EdgeKey>,
}

/// Decorator keeping all state in memory.
///
/// Cloning yields another handle onto the same state, so a host can keep one
/// handle for rendering while a runner drives the algorithm through another.
#[derive(Debug, Clone)]
pub struct MemoryDecorator {
    graph: Arc<AnyGraph>,
    store: Arc<RwLock<DecorationStore>>,
}

impl MemoryDecorator {
    /// Create a decorator bound to a graph, with every element in the default state.
    pub fn new(graph: impl Into<AnyGraph>) -> Self {
        Self {
            graph: Arc::new(graph.into()),
            store: Arc::new(RwLock::new(DecorationStore::default())),
        }
    }

    /// The decorated graph.
    pub fn shared_graph(&self) -> Arc<AnyGraph> {
        Arc::clone(&self.graph)
    }

    /// Current status line.
    pub fn status_line(&self) -> Option<String> {
        self.store.read().status_line.clone()
    }

    /// External label of a vertex.
    pub fn vertex_external_label(&self, v: VertexId) -> Option<String> {
        self.store.read().vertex_labels.get(&v).cloned()
    }

    /// Label of an edge.
    pub fn edge_label(&self, a: VertexId, b: VertexId) -> Option<String> {
        let key = self.key(a, b);
        self.store.read().edge_labels.get(&key).cloned()
    }

    /// Drawn edges of a Euclidean graph, ascending.
    pub fn materialized_edges(&self) -> Vec<(VertexId, VertexId)> {
        self.store.read().materialized.iter().copied().collect()
    }

    /// Copy of the full decoration state.
    pub fn snapshot(&self) -> DecorationSnapshot {
        let store = self.store.read();
        let vertices = self
            .graph
            .vertices()
            .into_iter()
            .filter_map(|id| {
                let state = store.vertex_states.get(&id).copied().unwrap_or_default();
                let label = store.vertex_labels.get(&id).cloned();
                (!state.is_default() || label.is_some()).then_some(VertexDecoration {
                    id,
                    state,
                    label,
                })
            })
            .collect();

        let mut keys: BTreeSet<EdgeKey> = store.edge_states.keys().copied().collect();
        keys.extend(store.edge_labels.keys().copied());
        keys.extend(store.materialized.iter().copied());
        let edges = keys
            .into_iter()
            .map(|(from, to)| EdgeDecoration {
                from,
                to,
                state: self.stored_edge_state(&store, (from, to)),
                label: store.edge_labels.get(&(from, to)).cloned(),
            })
            .collect();

        DecorationSnapshot {
            vertices,
            edges,
            status_line: store.status_line.clone(),
        }
    }

    fn is_euclidean(&self) -> bool {
        self.graph.kind() == GraphKind::Euclidean
    }

    fn key(&self, a: VertexId, b: VertexId) -> EdgeKey {
        if self.graph.is_directed() {
            (a, b)
        } else {
            ordered_pair(a, b)
        }
    }

    fn stored_edge_state(&self, store: &DecorationStore, key: EdgeKey) -> DecorationState {
        if self.is_euclidean() && !store.materialized.contains(&key) {
            return DecorationState::Disabled;
        }
        store.edge_states.get(&key).copied().unwrap_or_default()
    }
}

impl Decorator for MemoryDecorator {
    fn graph(&self) -> &dyn Graph {
        &*self.graph
    }

    fn vertex_state(&self, v: VertexId) -> DecorationState {
        self.store
            .read()
            .vertex_states
            .get(&v)
            .copied()
            .unwrap_or_default()
    }

    fn set_vertex_state(&mut self, v: VertexId, state: DecorationState) {
        let mut store = self.store.write();
        if state.is_default() {
            store.vertex_states.remove(&v);
        } else {
            store.vertex_states.insert(v, state);
        }
    }

    fn edge_state(&self, a: VertexId, b: VertexId) -> DecorationState {
        let key = self.key(a, b);
        self.stored_edge_state(&self.store.read(), key)
    }

    fn set_edge_state(&mut self, a: VertexId, b: VertexId, state: DecorationState) {
        let key = self.key(a, b);
        let euclidean = self.is_euclidean();
        let mut store = self.store.write();
        if euclidean {
            if state == DecorationState::Disabled {
                store.materialized.remove(&key);
                store.edge_states.remove(&key);
                return;
            }
            store.materialized.insert(key);
        }
        if state.is_default() {
            store.edge_states.remove(&key);
        } else {
            store.edge_states.insert(key, state);
        }
    }

    fn set_vertex_external_label(&mut self, v: VertexId, text: &str) {
        self.store.write().vertex_labels.insert(v, text.to_string());
    }

    fn clear_vertex_external_label(&mut self, v: VertexId) {
        self.store.write().vertex_labels.remove(&v);
    }

    fn set_edge_label(&mut self, a: VertexId, b: VertexId, text: &str) {
        let key = self.key(a, b);
        self.store.write().edge_labels.insert(key, text.to_string());
    }

    fn clear_edge_label(&mut self, a: VertexId, b: VertexId) {
        let key = self.key(a, b);
        self.store.write().edge_labels.remove(&key);
    }

    fn set_status_line(&mut self, text: &str) {
        trace!(status = text, "Status line");
        self.store.write().status_line = Some(text.to_string());
    }

    fn clear_all_decoration(&mut self) {
        *self.store.write() = DecorationStore::default();
    }
}

/// Decoration of one vertex in a [`DecorationSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VertexDecoration {
    /// Vertex.
    pub id: VertexId,
    /// State.
    pub state: DecorationState,
    /// External label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Decoration of one edge in a [`DecorationSnapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeDecoration {
    /// Tail, or smaller endpoint when undirected.
    pub from: VertexId,
    /// Head, or larger endpoint when undirected.
    pub to: VertexId,
    /// State.
    pub state: DecorationState,
    /// Label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Point-in-time copy of a [`MemoryDecorator`].
///
/// Only elements with a non-default state or a label are listed, plus every
/// drawn edge of a Euclidean graph.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DecorationSnapshot {
    /// Decorated vertices, ascending.
    pub vertices: Vec<VertexDecoration>,
    /// Decorated edges, ascending.
    pub edges: Vec<EdgeDecoration>,
    /// Status line.
    pub status_line: Option<String>,
}

impl DecorationSnapshot {
    /// State of a vertex in this snapshot.
    pub fn vertex_state(&self, v: VertexId) -> DecorationState {
        self.vertices
            .iter()
            .find(|d| d.id == v)
            .map(|d| d.state)
            .unwrap_or_default()
    }

    /// Edges in the given state.
    pub fn edges_in_state(&self, state: DecorationState) -> Vec<(VertexId, VertexId)> {
        self.edges
            .iter()
            .filter(|d| d.state == state)
            .map(|d| (d.from, d.to))
            .collect()
    }
}
