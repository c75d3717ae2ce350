//! Step-by-step graph algorithm engine: the framework.
//!
//! This crate provides everything an algorithm needs to run one observable
//! checkpoint at a time:
//!
//! - **Graph model**: unweighted, weighted, multigraph and Euclidean graphs
//!   behind one [`Graph`](models::Graph) trait, with a JSON persisted form
//! - **Decoration**: the [`Decorator`](decoration::Decorator) contract through
//!   which algorithms report vertex/edge states and status text
//! - **Algorithm**: the pausable [`Algorithm`](algorithm::Algorithm) contract
//! - **Runners**: a timed, pausable driver and a headless drain-to-completion one
//!
//! # Example
//!
//! ```
//! use graphstep_core::prelude::*;
//!
//! let graph = WeightedGraph::from_edges(3, &[(0, 1, 2.0), (1, 2, 1.0)]).unwrap();
//! let json = graph.to_serialized().to_json().unwrap();
//! let restored = AnyGraph::from_json(&json).unwrap();
//! assert_eq!(restored.edges(), graph.edges());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithm;
pub mod decoration;
pub mod error;
pub mod models;
pub mod runner;

pub use error::{AlgorithmError, AlgorithmResult, GraphError, Result, RunnerError};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::algorithm::precondition;
    pub use crate::algorithm::{
        Algorithm, AlgorithmInput, AlgorithmOutput, InputKind, Message, MessageLevel, RunState,
        Step,
    };
    pub use crate::decoration::{
        format_distance, DecorationSnapshot, DecorationState, Decorator, MemoryDecorator,
        NullDecorator,
    };
    pub use crate::error::{AlgorithmError, AlgorithmResult, GraphError, RunnerError};
    pub use crate::models::{
        component_count, connected_components, is_connected, odd_degree_vertices, ordered_pair,
        total_weight, AnyGraph, Edge, EuclideanGraph, Graph, GraphKind, MultiGraph, Point,
        SerializedGraph, UnweightedGraph, VertexId, Weighted, WeightedGraph,
    };
    pub use crate::runner::{
        run_headless, HeadlessRunner, PendingResult, RunnerConfig, RunnerState, TimedRunner,
    };
}
