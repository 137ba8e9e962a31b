// Tue Jan 13 2026 - Alex

use crate::graph::{DeferReason, EdgeSite};
use crate::model::{
    FunctionFlags, Layer, NodeIndex, NodeKind, Origin, PackageIndex, ParamDirection, PrimitiveType, Storage, TypeRef,
};
use serde::Serialize;

/// Everything an emitter needs, in the order it has to write it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationPlan {
    /// Packages in emission order, packages without nodes last.
    pub packages: Vec<ResolvedPackage>,
    pub units: Vec<EmissionUnit>,
    /// Same order as `units`.
    pub types: Vec<ResolvedType>,
    pub forward_declarations: Vec<ForwardDeclaration>,
    #[serde(skip)]
    positions: Vec<Option<usize>>,
}

impl GenerationPlan {
    pub(crate) fn with_node_count(count: usize) -> Self {
        Self {
            positions: vec![None; count],
            ..Self::default()
        }
    }

    pub(crate) fn push(&mut self, layer: Layer, resolved: ResolvedType) {
        if let Some(slot) = self.positions.get_mut(resolved.node.as_usize()) {
            *slot = Some(self.units.len());
        }
        self.units.push(EmissionUnit {
            package: resolved.package,
            node: resolved.node,
            layer,
        });
        self.types.push(resolved);
    }

    /// Emission position of `node`.
    pub fn position(&self, node: NodeIndex) -> Option<usize> {
        self.positions.get(node.as_usize()).copied().flatten()
    }

    pub fn type_of(&self, node: NodeIndex) -> Option<&ResolvedType> {
        self.position(node).map(|p| &self.types[p])
    }

    pub fn type_name(&self, node: NodeIndex) -> Option<&str> {
        self.type_of(node).map(|t| t.name.as_str())
    }

    pub fn package(&self, index: PackageIndex) -> Option<&ResolvedPackage> {
        self.packages.iter().find(|p| p.index == index)
    }

    pub fn forward_declarations_of(&self, node: NodeIndex) -> impl Iterator<Item = &ForwardDeclaration> {
        self.forward_declarations.iter().filter(move |f| f.node == node)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EmissionUnit {
    pub package: PackageIndex,
    pub node: NodeIndex,
    pub layer: Layer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPackage {
    pub index: PackageIndex,
    pub name: String,
    pub is_empty: bool,
    pub structs: Vec<NodeIndex>,
    pub classes: Vec<NodeIndex>,
    pub parameters: Vec<NodeIndex>,
    pub struct_deps: Vec<PackageIndex>,
    pub class_deps: Vec<PackageIndex>,
}

impl ResolvedPackage {
    pub fn nodes(&self, layer: Layer) -> &[NodeIndex] {
        match layer {
            Layer::Structs => &self.structs,
            Layer::Classes => &self.classes,
            Layer::Parameters => &self.parameters,
        }
    }
}

/// A node with its layout normalized and every identifier final.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedType {
    pub node: NodeIndex,
    pub package: PackageIndex,
    pub kind: NodeKind,
    pub name: String,
    pub size: u32,
    pub alignment: u32,
    pub explicit_alignment: bool,
    pub super_node: Option<NodeIndex>,
    pub super_name: Option<String>,
    /// Offset the own members start at.
    pub base: u32,
    pub statics: Vec<ResolvedMember>,
    pub members: Vec<ResolvedEntry>,
    pub functions: Vec<ResolvedFunction>,
}

impl ResolvedType {
    pub fn member_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.statics.iter().map(|m| m.name.as_str()).collect();
        for entry in &self.members {
            match entry {
                ResolvedEntry::Member(member) => names.push(&member.name),
                ResolvedEntry::Padding { name, .. } => names.push(name),
                ResolvedEntry::BitFields { fields, .. } => names.extend(fields.iter().map(ResolvedBit::name)),
            }
        }
        names
    }

    pub fn padding_bytes(&self) -> u32 {
        self.members
            .iter()
            .filter_map(|e| match e {
                ResolvedEntry::Padding { size, .. } => Some(*size),
                _ => None,
            })
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedMember {
    pub slot: u32,
    pub name: String,
    pub type_ref: TypeRef,
    pub storage: Storage,
    pub offset: u32,
    pub size: u32,
    pub array_dim: u32,
    pub origin: Origin,
    /// Declared through a forward declaration of its type.
    pub forward_declared: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolvedEntry {
    Member(ResolvedMember),
    Padding {
        name: String,
        offset: u32,
        size: u32,
    },
    BitFields {
        offset: u32,
        size: u32,
        backing: PrimitiveType,
        fields: Vec<ResolvedBit>,
    },
}

impl ResolvedEntry {
    pub fn offset(&self) -> u32 {
        match self {
            Self::Member(member) => member.offset,
            Self::Padding { offset, .. } | Self::BitFields { offset, .. } => *offset,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolvedBit {
    Member {
        slot: u32,
        name: String,
        bit_index: u8,
        bit_width: u8,
    },
    Padding {
        name: String,
        bit_index: u8,
        bit_width: u8,
    },
}

impl ResolvedBit {
    pub fn name(&self) -> &str {
        match self {
            Self::Member { name, .. } | Self::Padding { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedFunction {
    pub slot: u32,
    pub name: String,
    pub flags: FunctionFlags,
    pub origin: Origin,
    pub params_node: Option<NodeIndex>,
    pub parameters: Vec<ResolvedParameter>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedParameter {
    pub name: String,
    pub type_ref: TypeRef,
    pub storage: Storage,
    pub direction: ParamDirection,
}

/// A use of `target` inside `node` that is satisfied by declaring the
/// target ahead of `node`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForwardDeclaration {
    pub node: NodeIndex,
    pub target: NodeIndex,
    pub target_name: String,
    pub site: EdgeSite,
    pub reason: DeferReason,
}
