// Tue Jan 13 2026 - Alex

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Inherits,
    MemberValue,
    MemberPointer,
}

impl EdgeKind {
    /// Whether the target's full definition must be emitted first.
    pub fn is_gating(self) -> bool {
        !matches!(self, Self::MemberPointer)
    }
}

/// Which declaration produced an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeSite {
    Super,
    Member(u32),
    Function(u32),
    Dependency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge<I> {
    pub from: I,
    pub to: I,
    pub kind: EdgeKind,
    /// The declaration is a pointer or reference and can be satisfied by a
    /// forward declaration if it closes a cycle.
    pub indirect: bool,
    pub site: EdgeSite,
}

impl<I> Edge<I> {
    pub fn new(from: I, to: I, kind: EdgeKind, site: EdgeSite) -> Self {
        Self {
            from,
            to,
            kind,
            indirect: kind == EdgeKind::MemberPointer,
            site,
        }
    }

    pub fn inherits(from: I, to: I) -> Self {
        Self::new(from, to, EdgeKind::Inherits, EdgeSite::Super)
    }

    pub fn value(from: I, to: I, site: EdgeSite) -> Self {
        Self::new(from, to, EdgeKind::MemberValue, site)
    }

    pub fn pointer(from: I, to: I, site: EdgeSite) -> Self {
        Self::new(from, to, EdgeKind::MemberPointer, site)
    }

    pub fn with_indirect(mut self, indirect: bool) -> Self {
        self.indirect = indirect;
        self
    }
}

/// Why an edge has to be satisfied by a forward declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeferReason {
    /// The edge closed a cycle and was broken there.
    CycleBroken,
    /// The target is simply emitted later.
    EmittedLater,
}
