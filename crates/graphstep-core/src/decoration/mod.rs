//! Decoration contract between algorithms and whatever renders them.

mod decorator;
mod memory;
mod null;
mod state;

pub use decorator::{format_distance, Decorator};
pub use memory::{DecorationSnapshot, EdgeDecoration, MemoryDecorator, VertexDecoration};
pub use null::NullDecorator;
pub use state::{palette_color, DecorationState, AUXILIARY_PALETTE};
