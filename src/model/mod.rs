// Tue Jan 13 2026 - Alex

pub mod index;
pub mod type_info;
pub mod member;
pub mod function;
pub mod node;
pub mod package;
pub mod node_set;

pub use index::{NodeIndex, PackageIndex};
pub use type_info::{PrimitiveType, TypeRef};
pub use member::{BitField, Member, Origin, Storage};
pub use function::{Function, FunctionFlags, ParamDirection, Parameter};
pub use node::{Layer, Node, NodeFlags, NodeKind};
pub use package::Package;
pub use node_set::NodeSet;
