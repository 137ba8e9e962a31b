// Tue Jan 13 2026 - Alex

use crate::error::{GeneratorError, Result};
use crate::model::{
    BitField, Function, FunctionFlags, Member, Node, NodeFlags, NodeIndex, NodeKind, NodeSet, Origin, ParamDirection,
    Parameter, PrimitiveType, Storage, TypeRef,
};
use ahash::AHashMap;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Reflection data as written by the scanner.
///
/// Nodes refer to each other by scanner id. Ids only need to be unique,
/// not dense; `into_node_set` maps them onto arena indices in ascending id
/// order, so the same snapshot always yields the same indices.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanSnapshot {
    pub packages: Vec<PackageRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageRecord {
    pub name: String,
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: u64,
    pub name: String,
    pub kind: NodeKind,
    pub size: u32,
    #[serde(default = "default_alignment")]
    pub alignment: u32,
    #[serde(default)]
    pub super_id: Option<u64>,
    #[serde(default)]
    pub members: Vec<MemberRecord>,
    #[serde(default)]
    pub functions: Vec<FunctionRecord>,
    #[serde(default = "default_true")]
    pub forward_declarable: bool,
    #[serde(default, rename = "final")]
    pub is_final: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRecord {
    Primitive(PrimitiveType),
    Node(u64),
    Named(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub type_record: TypeRecord,
    #[serde(default)]
    pub storage: Storage,
    pub offset: u32,
    pub size: u32,
    #[serde(default = "default_array_dim")]
    pub array_dim: u32,
    #[serde(default)]
    pub alignment: Option<u32>,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub bit_field: Option<BitField>,
    #[serde(default)]
    pub predefined: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub type_record: TypeRecord,
    #[serde(default)]
    pub storage: Storage,
    pub direction: ParamDirection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionRecord {
    pub name: String,
    #[serde(default)]
    pub parameters: Vec<ParameterRecord>,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_const: bool,
    #[serde(default)]
    pub is_inline: bool,
    #[serde(default)]
    pub params_id: Option<u64>,
    #[serde(default)]
    pub predefined: bool,
}

fn default_alignment() -> u32 {
    1
}

fn default_array_dim() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

impl ScanSnapshot {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn node_count(&self) -> usize {
        self.packages.iter().map(|p| p.nodes.len()).sum()
    }

    /// Builds the arena, translating scanner ids into node indices.
    pub fn into_node_set(self) -> Result<NodeSet> {
        let mut set = NodeSet::new();
        let mut records = Vec::with_capacity(self.node_count());
        for package in self.packages {
            let index = set.add_package(&package.name);
            records.extend(package.nodes.into_iter().map(|node| (index, node)));
        }
        records.sort_by_key(|(_, node)| node.id);

        if let Some(((_, first), (_, second))) = records.iter().tuple_windows().find(|((_, a), (_, b))| a.id == b.id) {
            return Err(GeneratorError::InvalidSnapshot(format!(
                "node id {} is used by both {} and {}",
                first.id, first.name, second.name
            )));
        }

        let ids: AHashMap<u64, NodeIndex> = records
            .iter()
            .enumerate()
            .map(|(position, (_, node))| (node.id, NodeIndex::new(position as u32)))
            .collect();

        let translator = IdTranslator { ids: &ids };
        for (package, record) in records {
            let node = translator.node(&mut set, record)?;
            set.add_node(package, node);
        }

        log::debug!("Loaded {} nodes in {} packages", set.node_count(), set.packages().len());
        Ok(set)
    }
}

struct IdTranslator<'a> {
    ids: &'a AHashMap<u64, NodeIndex>,
}

impl IdTranslator<'_> {
    fn lookup(&self, node: &str, member: &str, id: u64) -> Result<NodeIndex> {
        self.ids.get(&id).copied().ok_or_else(|| GeneratorError::DanglingReference {
            node: node.to_string(),
            member: member.to_string(),
            target: id,
        })
    }

    fn type_ref(&self, set: &mut NodeSet, node: &str, member: &str, record: &TypeRecord) -> Result<TypeRef> {
        Ok(match record {
            TypeRecord::Primitive(primitive) => TypeRef::Primitive(*primitive),
            TypeRecord::Node(id) => TypeRef::Node(self.lookup(node, member, *id)?),
            TypeRecord::Named(text) => TypeRef::Named(set.intern(text)),
        })
    }

    fn node(&self, set: &mut NodeSet, record: NodeRecord) -> Result<Node> {
        let name = set.intern(&record.name);
        let mut flags = NodeFlags::empty();
        flags.set(NodeFlags::FORWARD_DECLARABLE, record.forward_declarable);
        flags.set(NodeFlags::FINAL, record.is_final);

        let mut node = Node::new(record.kind, name, record.size)
            .with_alignment(record.alignment.max(1))
            .with_flags(flags);
        if let Some(super_id) = record.super_id {
            node = node.with_super(self.lookup(&record.name, "<super>", super_id)?);
        }

        for member in &record.members {
            node = node.with_member(self.member(set, &record.name, member)?);
        }
        for function in &record.functions {
            node = node.with_function(self.function(set, &record.name, function)?);
        }
        Ok(node)
    }

    fn member(&self, set: &mut NodeSet, node: &str, record: &MemberRecord) -> Result<Member> {
        let type_ref = self.type_ref(set, node, &record.name, &record.type_record)?;
        let mut member = Member::new(set.intern(&record.name), type_ref, record.offset, record.size)
            .with_storage(record.storage)
            .with_array_dim(record.array_dim);
        if let Some(alignment) = record.alignment {
            member = member.with_alignment(alignment);
        }
        if record.is_static {
            member = member.with_static();
        }
        if let Some(bits) = record.bit_field {
            member = member.with_bit_field(bits.bit_index, bits.bit_width);
        }
        if record.predefined {
            member = member.with_origin(Origin::Predefined);
        }
        Ok(member)
    }

    fn function(&self, set: &mut NodeSet, node: &str, record: &FunctionRecord) -> Result<Function> {
        let mut flags = FunctionFlags::empty();
        flags.set(FunctionFlags::STATIC, record.is_static);
        flags.set(FunctionFlags::CONST, record.is_const);
        flags.set(FunctionFlags::INLINE, record.is_inline);

        // Owner is fixed up when the node is added to the set.
        let mut function = Function::new(set.intern(&record.name), NodeIndex::new(0)).with_flags(flags);
        if let Some(params_id) = record.params_id {
            function = function.with_params_node(self.lookup(node, &record.name, params_id)?);
        }
        if record.predefined {
            function = function.with_origin(Origin::Predefined);
        }

        for parameter in &record.parameters {
            let label = format!("{}::{}", record.name, parameter.name);
            let type_ref = self.type_ref(set, node, &label, &parameter.type_record)?;
            function = function.with_parameter(
                Parameter::new(set.intern(&parameter.name), type_ref, parameter.direction).with_storage(parameter.storage),
            );
        }
        Ok(function)
    }
}
