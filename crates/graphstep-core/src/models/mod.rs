//! Graph data model.
//!
//! Four graph kinds share the [`Graph`] contract:
//! - [`UnweightedGraph`] and [`WeightedGraph`]: adjacency maps
//! - [`MultiGraph`]: adjacency map with edge multiplicities
//! - [`EuclideanGraph`]: implicit complete graph over points in the plane
//!
//! [`AnyGraph`] owns any of them and [`SerializedGraph`] is their persisted form.

mod adjacency;
mod any;
mod euclidean;
mod graph;
mod ids;
mod multi;
mod serialized;
mod unweighted;
mod weighted;

pub use any::AnyGraph;
pub use euclidean::EuclideanGraph;
pub use graph::{
    component_count, connected_components, is_connected, odd_degree_vertices, Graph, GraphKind,
    Weighted,
};
pub use ids::{ordered_pair, total_weight, Edge, Point, VertexId};
pub use multi::MultiGraph;
pub use serialized::{AdjacencyDocument, EdgeData, EuclideanDocument, SerializedGraph};
pub use unweighted::UnweightedGraph;
pub use weighted::WeightedGraph;
