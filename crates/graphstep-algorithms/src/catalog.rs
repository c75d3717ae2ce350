//! Catalog of every algorithm a host can offer.

use std::fmt;

use graphstep_core::algorithm::{Algorithm, InputKind};
use serde::{Deserialize, Serialize};

use crate::articulation::ArticulationPoints;
use crate::euler::Fleury;
use crate::held_karp::{HamiltonianPath, HeldKarpTsp};
use crate::mst::{Kruskal, Prim};
use crate::search::{BreadthFirstSearch, Dijkstra};
use crate::tsp::{CheapestInsertion, Christofides, MstShortcut, NearestInsertion, NearestNeighbor};

/// Identifies an algorithm without naming its concrete type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlgorithmKind {
    /// Kruskal's minimum spanning tree.
    Kruskal,
    /// Prim's minimum spanning tree.
    Prim,
    /// Dijkstra's shortest paths.
    Dijkstra,
    /// Breadth-first search.
    BreadthFirstSearch,
    /// Fleury's Euler trail.
    Fleury,
    /// Articulation points and biconnected components.
    ArticulationPoints,
    /// Held-Karp optimal tour.
    HeldKarp,
    /// Held-Karp Hamiltonian path or circuit.
    HamiltonianPath,
    /// Nearest-neighbor tour.
    NearestNeighbor,
    /// Nearest-insertion tour.
    NearestInsertion,
    /// Cheapest-insertion tour.
    CheapestInsertion,
    /// Minimum spanning tree shortcut tour.
    MstShortcut,
    /// Christofides tour.
    Christofides,
}

impl AlgorithmKind {
    /// Every algorithm, in menu order.
    pub const ALL: [AlgorithmKind; 13] = [
        AlgorithmKind::Kruskal,
        AlgorithmKind::Prim,
        AlgorithmKind::Dijkstra,
        AlgorithmKind::BreadthFirstSearch,
        AlgorithmKind::Fleury,
        AlgorithmKind::ArticulationPoints,
        AlgorithmKind::HeldKarp,
        AlgorithmKind::HamiltonianPath,
        AlgorithmKind::NearestNeighbor,
        AlgorithmKind::NearestInsertion,
        AlgorithmKind::CheapestInsertion,
        AlgorithmKind::MstShortcut,
        AlgorithmKind::Christofides,
    ];

    /// Every algorithm, in menu order.
    pub fn all() -> &'static [AlgorithmKind] {
        &Self::ALL
    }

    /// A fresh, uninitialized instance.
    pub fn create(self) -> Box<dyn Algorithm> {
        match self {
            AlgorithmKind::Kruskal => Box::new(Kruskal::new()),
            AlgorithmKind::Prim => Box::new(Prim::new()),
            AlgorithmKind::Dijkstra => Box::new(Dijkstra::new()),
            AlgorithmKind::BreadthFirstSearch => Box::new(BreadthFirstSearch::new()),
            AlgorithmKind::Fleury => Box::new(Fleury::new()),
            AlgorithmKind::ArticulationPoints => Box::new(ArticulationPoints::new()),
            AlgorithmKind::HeldKarp => Box::new(HeldKarpTsp::new()),
            AlgorithmKind::HamiltonianPath => Box::new(HamiltonianPath::new()),
            AlgorithmKind::NearestNeighbor => Box::new(NearestNeighbor::new()),
            AlgorithmKind::NearestInsertion => Box::new(NearestInsertion::new()),
            AlgorithmKind::CheapestInsertion => Box::new(CheapestInsertion::new()),
            AlgorithmKind::MstShortcut => Box::new(MstShortcut::new()),
            AlgorithmKind::Christofides => Box::new(Christofides::new()),
        }
    }

    /// Short menu name.
    pub fn short_name(self) -> &'static str {
        self.create().short_name()
    }

    /// Descriptive name.
    pub fn full_name(self) -> &'static str {
        self.create().full_name()
    }

    /// Input the algorithm expects.
    pub fn input_kind(self) -> InputKind {
        self.create().input_kind()
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.full_name())
    }
}
