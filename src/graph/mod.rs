//! Graph structures and the expansion engine
//!
//! The expansion engine mutates an externally owned graph through the
//! [`GraphHandle`] trait; [`DirectedGraph`] is the in-memory implementation
//! used by the CLI and tests. A rendering collaborator supplies its own.

mod directed;
mod expand;
mod handle;

pub use directed::DirectedGraph;
pub use expand::expand;
pub use handle::{EdgeAttributes, EdgeKind, GraphHandle, NodeAttributes};
