//! Minimum spanning trees.

mod kruskal;
mod prim;

pub use kruskal::Kruskal;
pub use prim::Prim;
