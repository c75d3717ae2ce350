//! Step-by-step graph algorithms for graphstep.
//!
//! Every algorithm implements [`Algorithm`](graphstep_core::algorithm::Algorithm)
//! and reports its progress through a decorator, one checkpoint per step:
//!
//! - **Spanning trees**: Kruskal, Prim
//! - **Searches**: breadth-first search, Dijkstra
//! - **Euler trails**: Fleury, plus an undecorated multigraph variant
//! - **Biconnectivity**: articulation points (Hopcroft-Tarjan)
//! - **Exact search**: Held-Karp tours and Hamiltonian paths
//! - **Tour heuristics**: nearest neighbor, nearest and cheapest insertion,
//!   MST shortcut, Christofides
//!
//! # Example
//!
//! ```
//! use graphstep_algorithms::prelude::*;
//! use graphstep_core::prelude::*;
//!
//! let graph = WeightedGraph::from_edges(3, &[(0, 1, 2.0), (1, 2, 1.0), (0, 2, 4.0)]).unwrap();
//! let output = run_headless(&mut Kruskal::new(), &graph, &AlgorithmInput::None).unwrap();
//! assert_eq!(total_weight(&output.graph.unwrap().edges()), 3.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod articulation;
pub mod catalog;
pub mod euler;
pub mod held_karp;
pub mod matching;
pub mod mst;
pub mod search;
pub mod tsp;
pub mod union_find;

mod support;

pub use articulation::ArticulationPoints;
pub use catalog::AlgorithmKind;
pub use euler::{Fleury, FleuryWalk, MultiFleury};
pub use held_karp::{HamiltonianPath, HeldKarpConfig, HeldKarpTsp, HELD_KARP_MAX_VERTICES};
pub use matching::{DefaultMatcher, PerfectMatcher};
pub use mst::{Kruskal, Prim};
pub use search::{BreadthFirstSearch, Dijkstra};
pub use tsp::{
    tour_length, CheapestInsertion, Christofides, ChristofidesConfig, MstShortcut,
    NearestInsertion, NearestNeighbor,
};
pub use union_find::DisjointSet;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        AlgorithmKind, ArticulationPoints, BreadthFirstSearch, CheapestInsertion, Christofides,
        ChristofidesConfig, DefaultMatcher, Dijkstra, Fleury, HamiltonianPath, HeldKarpConfig,
        HeldKarpTsp, Kruskal, MstShortcut, MultiFleury, NearestInsertion, NearestNeighbor,
        PerfectMatcher, Prim,
    };
}
