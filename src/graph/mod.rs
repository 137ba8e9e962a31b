// Tue Jan 13 2026 - Alex

pub mod edge;
pub mod epoch;
pub mod error;
pub mod dependency;

pub use edge::{DeferReason, Edge, EdgeKind, EdgeSite};
pub use epoch::Epoch;
pub use error::{CycleError, GraphError};
pub use dependency::{CyclePolicy, DependencyGraph, Visitor, Walk};

use std::fmt::Debug;

/// Opaque dense index usable as a graph vertex.
pub trait GraphIndex: Copy + Eq + Ord + Debug {
    fn index(self) -> usize;
}

impl GraphIndex for usize {
    fn index(self) -> usize {
        self
    }
}

impl GraphIndex for u32 {
    fn index(self) -> usize {
        self as usize
    }
}
