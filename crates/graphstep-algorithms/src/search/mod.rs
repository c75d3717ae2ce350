//! Single-source searches: breadth-first traversal and Dijkstra.
//!
//! Both accept either a start vertex or a `{source, sink}` pair. With a sink
//! the search stops once the sink is reached and the tree path to it is
//! highlighted.

mod bfs;
mod dijkstra;

pub use bfs::BreadthFirstSearch;
pub use dijkstra::Dijkstra;

use std::collections::BTreeMap;

use graphstep_core::prelude::*;

use crate::support::select_path;

/// Walk parent links back from `sink`; `None` if `sink` was never reached.
pub(crate) fn tree_path(
    parent: &BTreeMap<VertexId, VertexId>,
    source: VertexId,
    sink: VertexId,
) -> Option<Vec<VertexId>> {
    let mut path = vec![sink];
    let mut current = sink;
    while current != source {
        current = *parent.get(&current)?;
        path.push(current);
    }
    path.reverse();
    Some(path)
}

/// Select the path and disable every other tree edge.
pub(crate) fn highlight_path(
    decorator: &mut dyn Decorator,
    parent: &BTreeMap<VertexId, VertexId>,
    path: &[VertexId],
) {
    for (&child, &p) in parent {
        let on_path = path
            .windows(2)
            .any(|pair| pair[0] == p && pair[1] == child);
        if !on_path {
            decorator.set_edge_state(p, child, DecorationState::Disabled);
        }
    }
    select_path(decorator, path);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_path() {
        let parent = BTreeMap::from([
            (VertexId(1), VertexId(0)),
            (VertexId(2), VertexId(1)),
            (VertexId(3), VertexId(0)),
        ]);
        assert_eq!(
            tree_path(&parent, VertexId(0), VertexId(2)),
            Some(vec![VertexId(0), VertexId(1), VertexId(2)])
        );
        assert_eq!(tree_path(&parent, VertexId(0), VertexId(0)), Some(vec![VertexId(0)]));
        assert_eq!(tree_path(&parent, VertexId(0), VertexId(4)), None);
    }

    #[test]
    fn test_highlight_path() {
        let g = UnweightedGraph::from_edges(4, &[(0, 1), (1, 2), (0, 3)]).unwrap();
        let mut d = MemoryDecorator::new(g);
        let parent = BTreeMap::from([
            (VertexId(1), VertexId(0)),
            (VertexId(2), VertexId(1)),
            (VertexId(3), VertexId(0)),
        ]);
        highlight_path(&mut d, &parent, &[VertexId(0), VertexId(1), VertexId(2)]);
        assert_eq!(d.edge_state(VertexId(2), VertexId(1)), DecorationState::Selected);
        assert_eq!(d.edge_state(VertexId(0), VertexId(3)), DecorationState::Disabled);
        assert_eq!(d.vertex_state(VertexId(2)), DecorationState::Selected);
    }
}
