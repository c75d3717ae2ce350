//! Travelling-salesman approximations on Euclidean graphs.
//!
//! Every approximation needs a Euclidean graph with at least two vertices and
//! produces a closed tour that visits each vertex exactly once. Tour edges are
//! drawn `Selected`; edges that leave the tour are undrawn again.

mod christofides;
mod insertion;
mod mst_shortcut;
mod nearest_neighbor;

pub use christofides::{Christofides, ChristofidesConfig};
pub use insertion::{CheapestInsertion, NearestInsertion};
pub use mst_shortcut::MstShortcut;
pub use nearest_neighbor::NearestNeighbor;

use std::collections::BTreeSet;

use graphstep_core::prelude::*;

use crate::support::{add_output_edge, describe_sequence, hide_edge, weighted_skeleton};

/// Owned copy of the Euclidean graph, after checking the shared preconditions.
pub(crate) fn require_euclidean(graph: &dyn Graph) -> AlgorithmResult<EuclideanGraph> {
    precondition::require_kind(graph, GraphKind::Euclidean)?;
    precondition::require_min_vertices(graph, 2)?;
    graph
        .as_euclidean()
        .cloned()
        .ok_or_else(|| AlgorithmError::wrong_kind(GraphKind::Euclidean.to_string()))
}

/// Distance between two points of the graph.
pub(crate) fn distance(graph: &EuclideanGraph, a: VertexId, b: VertexId) -> f64 {
    graph.distance(a, b).unwrap_or(f64::INFINITY)
}

/// Length of the closed tour through `order`.
pub fn tour_length(graph: &EuclideanGraph, order: &[VertexId]) -> f64 {
    if order.len() < 2 {
        return 0.0;
    }
    let open: f64 = order.windows(2).map(|p| distance(graph, p[0], p[1])).sum();
    let closing = match (order.first(), order.last()) {
        (Some(&first), Some(&last)) => distance(graph, last, first),
        _ => 0.0,
    };
    open + closing
}

/// Cost of inserting `v` between `prev` and `next`.
pub(crate) fn insertion_cost(graph: &EuclideanGraph, prev: VertexId, v: VertexId, next: VertexId) -> f64 {
    distance(graph, prev, v) + distance(graph, v, next) - distance(graph, prev, next)
}

/// Keep the drawn tour edges in sync with a changing tour.
#[derive(Debug, Default)]
pub(crate) struct TourView {
    drawn: BTreeSet<(VertexId, VertexId)>,
}

impl TourView {
    /// Draw `order` as a path, closed into a cycle if `closed`.
    pub(crate) fn show(&mut self, decorator: &mut dyn Decorator, order: &[VertexId], closed: bool) {
        let mut edges: BTreeSet<_> = order
            .windows(2)
            .map(|p| ordered_pair(p[0], p[1]))
            .collect();
        if closed && order.len() > 2 {
            if let (Some(&first), Some(&last)) = (order.first(), order.last()) {
                edges.insert(ordered_pair(last, first));
            }
        }

        for &(a, b) in self.drawn.difference(&edges) {
            hide_edge(decorator, a, b);
        }
        for &(a, b) in &edges {
            decorator.set_edge_state(a, b, DecorationState::Selected);
        }
        for &v in order {
            decorator.set_vertex_state(v, DecorationState::Selected);
        }
        self.drawn = edges;
    }

    /// Undraw every edge drawn so far.
    pub(crate) fn clear(&mut self, decorator: &mut dyn Decorator) {
        for (a, b) in std::mem::take(&mut self.drawn) {
            hide_edge(decorator, a, b);
        }
    }
}

/// Final output for a tour given in visiting order (not yet closed).
pub(crate) fn finish_tour(
    name: &str,
    graph: &EuclideanGraph,
    order: Vec<VertexId>,
    decorator: &mut dyn Decorator,
) -> AlgorithmResult<AlgorithmOutput> {
    let length = tour_length(graph, &order);
    let mut closed = order;
    if let Some(&first) = closed.first() {
        closed.push(first);
    }

    let mut tour = weighted_skeleton(graph);
    for pair in closed.windows(2) {
        add_output_edge(&mut tour, pair[0], pair[1], graph.distance(pair[0], pair[1]))?;
    }

    let text = format!(
        "{} (length {})",
        describe_sequence(graph, &closed),
        format_distance(length)
    );
    decorator.set_status_line(&text);
    Ok(AlgorithmOutput::new()
        .with_graph(tour)
        .with_name(name)
        .with_message(Message::success("Tour", text))
        .with_sequence(closed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> EuclideanGraph {
        EuclideanGraph::from_points(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)])
    }

    #[test]
    fn test_tour_length() {
        let g = square();
        let order: Vec<_> = (0..4).map(VertexId).collect();
        assert_eq!(tour_length(&g, &order), 4.0);
        assert_eq!(tour_length(&g, &order[..1]), 0.0);
        assert_eq!(tour_length(&g, &order[..2]), 2.0);
    }

    #[test]
    fn test_insertion_cost() {
        let g = square();
        assert_eq!(insertion_cost(&g, VertexId(0), VertexId(1), VertexId(2)), 1.0);
    }

    #[test]
    fn test_tour_view_diff() {
        let g = square();
        let mut d = MemoryDecorator::new(g);
        let mut view = TourView::default();
        view.show(&mut d, &[VertexId(0), VertexId(1), VertexId(2)], true);
        assert_eq!(d.materialized_edges().len(), 3);

        view.show(&mut d, &[VertexId(0), VertexId(1), VertexId(2), VertexId(3)], true);
        assert_eq!(d.materialized_edges().len(), 4);
        assert_eq!(d.edge_state(VertexId(0), VertexId(2)), DecorationState::Disabled);

        view.clear(&mut d);
        assert!(d.materialized_edges().is_empty());
    }

    #[test]
    fn test_requires_euclidean() {
        let g = WeightedGraph::from_edges(2, &[(0, 1, 1.0)]).unwrap();
        assert!(matches!(
            require_euclidean(&g),
            Err(AlgorithmError::WrongGraphKind { .. })
        ));
        let single = EuclideanGraph::from_points(&[(0.0, 0.0)]);
        assert_eq!(
            require_euclidean(&single).err(),
            Some(AlgorithmError::NotEnoughVertices { min: 2, actual: 1 })
        );
    }
}
