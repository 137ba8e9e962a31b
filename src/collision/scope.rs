// Tue Jan 13 2026 - Alex

use crate::model::{NodeIndex, PackageIndex};
use std::fmt;

/// Namespace in which identifiers must be unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Scope {
    Packages,
    Types(PackageIndex),
    Members(NodeIndex),
    Functions(NodeIndex),
    Parameters(NodeIndex, u32),
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Packages => write!(f, "packages"),
            Self::Types(package) => write!(f, "types of {}", package),
            Self::Members(node) => write!(f, "members of {}", node),
            Self::Functions(node) => write!(f, "functions of {}", node),
            Self::Parameters(node, function) => write!(f, "parameters of {} function {}", node, function),
        }
    }
}

/// The logical entity asking for a name. Asking again for the same entity
/// in the same scope returns the name it already holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityKey {
    Package(PackageIndex),
    Node(NodeIndex),
    Member(NodeIndex, u32),
    Padding(NodeIndex, u32),
    BitPadding(NodeIndex, u32, u8),
    Function(NodeIndex, u32),
    Parameter(NodeIndex, u32, u32),
}
