//! Adjacency-map storage backing the unweighted, weighted and multigraph kinds.
//!
//! Memory layout:
//! - `adjacency[v]` = map of out-neighbor id to edge data
//! - undirected graphs store every edge in both directions, and every
//!   mutation keeps the two entries identical

use std::collections::BTreeMap;

use super::graph::next_vertex_id;
use super::ids::VertexId;
use crate::error::{GraphError, Result};

/// Adjacency map keyed by vertex id, generic over the per-edge data.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Adjacency<E> {
    directed: bool,
    adjacency: BTreeMap<VertexId, BTreeMap<VertexId, E>>,
    labels: BTreeMap<VertexId, String>,
}

impl<E: Clone> Adjacency<E> {
    pub(crate) fn new(directed: bool) -> Self {
        Self {
            directed,
            adjacency: BTreeMap::new(),
            labels: BTreeMap::new(),
        }
    }

    pub(crate) fn is_directed(&self) -> bool {
        self.directed
    }

    pub(crate) fn vertices(&self) -> Vec<VertexId> {
        self.adjacency.keys().copied().collect()
    }

    pub(crate) fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub(crate) fn contains(&self, v: VertexId) -> bool {
        self.adjacency.contains_key(&v)
    }

    pub(crate) fn label(&self, v: VertexId) -> Option<&str> {
        self.labels.get(&v).map(String::as_str)
    }

    pub(crate) fn labels(&self) -> &BTreeMap<VertexId, String> {
        &self.labels
    }

    pub(crate) fn set_label(&mut self, v: VertexId, label: String) -> Result<()> {
        if !self.contains(v) {
            return Err(GraphError::UnknownVertex(v));
        }
        self.labels.insert(v, label);
        Ok(())
    }

    /// Add a vertex with the next free id, labelled with its id.
    pub(crate) fn add_vertex(&mut self) -> VertexId {
        let id = next_vertex_id(self.adjacency.keys().copied());
        self.insert_vertex(id, None);
        id
    }

    /// Insert a vertex with a caller-chosen id (no-op if present).
    pub(crate) fn insert_vertex(&mut self, id: VertexId, label: Option<String>) {
        self.adjacency.entry(id).or_default();
        self.labels
            .entry(id)
            .or_insert_with(|| label.unwrap_or_else(|| id.to_string()));
    }

    pub(crate) fn remove_vertex(&mut self, v: VertexId) -> Result<()> {
        if self.adjacency.remove(&v).is_none() {
            return Err(GraphError::UnknownVertex(v));
        }
        self.labels.remove(&v);
        for neighbors in self.adjacency.values_mut() {
            neighbors.remove(&v);
        }
        Ok(())
    }

    pub(crate) fn neighbors(&self, v: VertexId) -> Vec<VertexId> {
        self.adjacency
            .get(&v)
            .map(|n| n.keys().copied().collect())
            .unwrap_or_default()
    }

    pub(crate) fn neighbors_with_reverse(&self, v: VertexId) -> Vec<VertexId> {
        let mut result = self.neighbors(v);
        if self.directed {
            result.extend(
                self.adjacency
                    .iter()
                    .filter(|(_, n)| n.contains_key(&v))
                    .map(|(&u, _)| u),
            );
            result.sort_unstable();
            result.dedup();
        }
        result
    }

    pub(crate) fn out_entries(&self, v: VertexId) -> impl Iterator<Item = (VertexId, &E)> {
        self.adjacency
            .get(&v)
            .into_iter()
            .flat_map(|n| n.iter().map(|(&w, e)| (w, e)))
    }

    pub(crate) fn get(&self, a: VertexId, b: VertexId) -> Option<&E> {
        self.adjacency.get(&a).and_then(|n| n.get(&b))
    }

    /// Every stored edge once: undirected edges only as `(min, max)`.
    pub(crate) fn entries(&self) -> Vec<(VertexId, VertexId, E)> {
        let mut result = Vec::new();
        for (&a, neighbors) in &self.adjacency {
            for (&b, data) in neighbors {
                if self.directed || a < b {
                    result.push((a, b, data.clone()));
                }
            }
        }
        result
    }

    fn check_endpoints(&self, a: VertexId, b: VertexId) -> Result<()> {
        if !self.contains(a) {
            return Err(GraphError::UnknownVertex(a));
        }
        if !self.contains(b) {
            return Err(GraphError::UnknownVertex(b));
        }
        if a == b {
            return Err(GraphError::SelfLoop(a));
        }
        Ok(())
    }

    /// Store edge data for `a -> b` (and `b -> a` when undirected).
    pub(crate) fn put(&mut self, a: VertexId, b: VertexId, data: E) -> Result<()> {
        self.check_endpoints(a, b)?;
        if !self.directed {
            self.adjacency
                .entry(b)
                .or_default()
                .insert(a, data.clone());
        }
        self.adjacency.entry(a).or_default().insert(b, data);
        Ok(())
    }

    /// Remove the edge `a -> b` (and its mirror when undirected).
    pub(crate) fn take(&mut self, a: VertexId, b: VertexId) -> Result<E> {
        let data = self
            .adjacency
            .get_mut(&a)
            .and_then(|n| n.remove(&b))
            .ok_or(GraphError::MissingEdge(a, b))?;
        if !self.directed {
            if let Some(n) = self.adjacency.get_mut(&b) {
                n.remove(&a);
            }
        }
        Ok(data)
    }
}
