// Tue Jan 13 2026 - Alex

use crate::graph::{EdgeKind, EdgeSite};
use std::fmt;
use thiserror::Error;

/// A cycle made only of edges that need full definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleError<I> {
    pub from: I,
    pub to: I,
    pub kind: EdgeKind,
    pub site: EdgeSite,
}

impl<I: fmt::Debug> fmt::Display for CycleError<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} -> {:?} ({:?} via {:?})", self.from, self.to, self.kind, self.site)
    }
}

#[derive(Error, Debug)]
pub enum GraphError<I: fmt::Debug, E: fmt::Debug + fmt::Display> {
    #[error("Unbreakable cycle: {0}")]
    Cycle(CycleError<I>),
    #[error("Visitor failed: {0}")]
    Visitor(E),
}
