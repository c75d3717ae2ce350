//! Helpers shared by the algorithm implementations.

use graphstep_core::decoration::{DecorationState, Decorator};
use graphstep_core::models::{Graph, GraphKind, UnweightedGraph, VertexId, WeightedGraph};
use graphstep_core::{AlgorithmError, AlgorithmResult};

/// Weighted graph with the same vertices, labels and directedness, no edges.
pub(crate) fn weighted_skeleton(graph: &dyn Graph) -> WeightedGraph {
    let mut skeleton = WeightedGraph::new(graph.is_directed());
    for v in graph.vertices() {
        skeleton.insert_vertex(v, graph.vertex_label(v).map(str::to_owned));
    }
    skeleton
}

/// Unweighted graph with the same vertices, labels and directedness, no edges.
pub(crate) fn unweighted_skeleton(graph: &dyn Graph) -> UnweightedGraph {
    let mut skeleton = UnweightedGraph::new(graph.is_directed());
    for v in graph.vertices() {
        skeleton.insert_vertex(v, graph.vertex_label(v).map(str::to_owned));
    }
    skeleton
}

/// Add an edge to a derived output graph.
///
/// Output graphs are built over a skeleton of the input, so a rejected edge
/// means the algorithm state is inconsistent and the run must fail.
pub(crate) fn add_output_edge(
    graph: &mut dyn Graph,
    a: VertexId,
    b: VertexId,
    weight: Option<f64>,
) -> AlgorithmResult<()> {
    graph
        .add_edge(a, b, weight)
        .map_err(|e| AlgorithmError::invalid_input(e.to_string()))
}

/// Return an edge to its resting look: undrawn for Euclidean graphs, default otherwise.
pub(crate) fn hide_edge(decorator: &mut dyn Decorator, a: VertexId, b: VertexId) {
    let state = if decorator.graph().kind() == GraphKind::Euclidean {
        DecorationState::Disabled
    } else {
        DecorationState::Default
    };
    decorator.set_edge_state(a, b, state);
}

/// Decorate a vertex sequence as a path of selected edges and vertices.
pub(crate) fn select_path(decorator: &mut dyn Decorator, path: &[VertexId]) {
    for &v in path {
        decorator.set_vertex_state(v, DecorationState::Selected);
    }
    for pair in path.windows(2) {
        decorator.set_edge_state(pair[0], pair[1], DecorationState::Selected);
    }
}

/// Human-readable vertex sequence using vertex labels, e.g. `a → b → c`.
pub(crate) fn describe_sequence(graph: &dyn Graph, sequence: &[VertexId]) -> String {
    sequence
        .iter()
        .map(|&v| {
            graph
                .vertex_label(v)
                .map(str::to_owned)
                .unwrap_or_else(|| v.to_string())
        })
        .collect::<Vec<_>>()
        .join(" → ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphstep_core::decoration::MemoryDecorator;
    use graphstep_core::models::EuclideanGraph;

    #[test]
    fn test_skeleton_keeps_vertices_and_labels() {
        let mut g = WeightedGraph::from_edges(3, &[(0, 1, 1.0)]).unwrap();
        g.set_vertex_label(VertexId(2), "c".into()).unwrap();
        let skeleton = weighted_skeleton(&g);
        assert_eq!(skeleton.vertices(), g.vertices());
        assert_eq!(skeleton.vertex_label(VertexId(2)), Some("c"));
        assert_eq!(skeleton.edge_count(), 0);
    }

    #[test]
    fn test_output_edge_outside_skeleton_fails() {
        let g = WeightedGraph::from_edges(2, &[(0, 1, 1.0)]).unwrap();
        let mut tree = weighted_skeleton(&g);
        add_output_edge(&mut tree, VertexId(0), VertexId(1), Some(1.0)).unwrap();
        assert_eq!(tree.edge_count(), 1);

        let result = add_output_edge(&mut tree, VertexId(0), VertexId(7), Some(1.0));
        assert!(matches!(result, Err(AlgorithmError::InvalidInput(_))));
        assert_eq!(tree.edge_count(), 1);
    }

    #[test]
    fn test_hide_edge_on_euclidean() {
        let mut d = MemoryDecorator::new(EuclideanGraph::from_points(&[(0.0, 0.0), (1.0, 1.0)]));
        d.set_edge_state(VertexId(0), VertexId(1), DecorationState::Selected);
        hide_edge(&mut d, VertexId(0), VertexId(1));
        assert!(d.materialized_edges().is_empty());
    }

    #[test]
    fn test_describe_sequence() {
        let mut g = WeightedGraph::from_edges(2, &[]).unwrap();
        g.set_vertex_label(VertexId(0), "start".into()).unwrap();
        assert_eq!(describe_sequence(&g, &[VertexId(0), VertexId(1)]), "start → 1");
    }
}
