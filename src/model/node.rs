// Tue Jan 13 2026 - Alex

use crate::model::{Function, Member, NodeIndex, PackageIndex};
use crate::names::NameId;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Struct,
    Class,
    /// Members share storage and may overlap.
    Union,
    Enum,
    FunctionParameters,
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct NodeFlags: u8 {
        /// An incomplete declaration of this type is legal.
        const FORWARD_DECLARABLE = 1 << 0;
        const FINAL = 1 << 1;
    }
}

/// File a node is emitted into, within its package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Structs,
    Classes,
    Parameters,
}

impl Layer {
    pub const ALL: [Layer; 3] = [Layer::Structs, Layer::Classes, Layer::Parameters];

    pub fn ordinal(self) -> usize {
        match self {
            Self::Structs => 0,
            Self::Classes => 1,
            Self::Parameters => 2,
        }
    }
}

/// One reflected struct, class, enum or parameter block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub index: NodeIndex,
    pub package: PackageIndex,
    pub name: NameId,
    pub kind: NodeKind,
    pub size: u32,
    pub alignment: u32,
    pub super_node: Option<NodeIndex>,
    pub members: Vec<Member>,
    pub functions: Vec<Function>,
    pub flags: NodeFlags,
}

impl Node {
    /// Index and package are filled in when the node enters a `NodeSet`.
    pub fn new(kind: NodeKind, name: NameId, size: u32) -> Self {
        Self {
            index: NodeIndex::new(0),
            package: PackageIndex::new(0),
            name,
            kind,
            size,
            alignment: 1,
            super_node: None,
            members: Vec::new(),
            functions: Vec::new(),
            flags: NodeFlags::FORWARD_DECLARABLE,
        }
    }

    pub fn with_alignment(mut self, alignment: u32) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_super(mut self, super_node: NodeIndex) -> Self {
        self.super_node = Some(super_node);
        self
    }

    pub fn with_member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_function(mut self, function: Function) -> Self {
        self.functions.push(function);
        self
    }

    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn is_class(&self) -> bool {
        self.kind == NodeKind::Class
    }

    pub fn is_union(&self) -> bool {
        self.kind == NodeKind::Union
    }

    pub fn is_enum(&self) -> bool {
        self.kind == NodeKind::Enum
    }

    pub fn is_function_parameters(&self) -> bool {
        self.kind == NodeKind::FunctionParameters
    }

    pub fn is_forward_declarable(&self) -> bool {
        self.flags.contains(NodeFlags::FORWARD_DECLARABLE)
    }

    pub fn layer(&self) -> Layer {
        match self.kind {
            NodeKind::Struct | NodeKind::Union | NodeKind::Enum => Layer::Structs,
            NodeKind::Class => Layer::Classes,
            NodeKind::FunctionParameters => Layer::Parameters,
        }
    }
}
