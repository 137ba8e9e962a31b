// Tue Jan 13 2026 - Alex

use crate::error::{GeneratorError, Result};
use crate::model::{Function, Member, Node, NodeIndex, Origin, Package, PackageIndex, TypeRef};
use crate::names::{NameId, NameTable};

/// Arena holding everything one generation run works on.
///
/// Cross references are indices into this arena, so inserting padding or
/// reordering never invalidates them. Entities are created in bulk and
/// dropped together with the set.
#[derive(Debug, Clone, Default)]
pub struct NodeSet {
    names: NameTable,
    packages: Vec<Package>,
    nodes: Vec<Node>,
}

impl NodeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, name: &str) -> NameId {
        self.names.intern(name)
    }

    pub fn names(&self) -> &NameTable {
        &self.names
    }

    pub fn name(&self, id: NameId) -> &str {
        self.names.resolve(id)
    }

    pub fn add_package(&mut self, name: &str) -> PackageIndex {
        let index = PackageIndex::new(self.packages.len() as u32);
        let name = self.names.intern(name);
        self.packages.push(Package::new(index, name));
        index
    }

    /// Adds a node to `package` and returns its stable index.
    pub fn add_node(&mut self, package: PackageIndex, mut node: Node) -> NodeIndex {
        let index = NodeIndex::new(self.nodes.len() as u32);
        node.index = index;
        node.package = package;
        for function in &mut node.functions {
            function.owner = index;
        }
        let layer = node.layer();
        self.nodes.push(node);
        if let Some(owner) = self.packages.get_mut(package.as_usize()) {
            owner.register(index, layer);
        }
        index
    }

    pub fn add_member(&mut self, node: NodeIndex, member: Member) {
        if let Some(target) = self.nodes.get_mut(node.as_usize()) {
            target.members.push(member);
        }
    }

    pub fn add_function(&mut self, node: NodeIndex, mut function: Function) {
        if let Some(target) = self.nodes.get_mut(node.as_usize()) {
            function.owner = node;
            target.functions.push(function);
        }
    }

    /// Injects a hand-written member into a reflected node.
    pub fn add_predefined_member(&mut self, node: NodeIndex, member: Member) {
        self.add_member(node, member.with_origin(Origin::Predefined));
    }

    pub fn add_predefined_function(&mut self, node: NodeIndex, function: Function) {
        self.add_function(node, function.with_origin(Origin::Predefined));
    }

    pub fn get_node(&self, index: NodeIndex) -> Option<&Node> {
        self.nodes.get(index.as_usize())
    }

    /// Panics on an index outside the set; call `validate_references` first.
    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.nodes[index.as_usize()]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node_name(&self, index: NodeIndex) -> &str {
        self.get_node(index).map(|n| self.names.resolve(n.name)).unwrap_or("<unknown>")
    }

    pub fn get_package(&self, index: PackageIndex) -> Option<&Package> {
        self.packages.get(index.as_usize())
    }

    pub fn package(&self, index: PackageIndex) -> &Package {
        &self.packages[index.as_usize()]
    }

    pub(crate) fn package_mut(&mut self, index: PackageIndex) -> &mut Package {
        &mut self.packages[index.as_usize()]
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn package_name(&self, index: PackageIndex) -> &str {
        self.get_package(index).map(|p| self.names.resolve(p.name)).unwrap_or("<unknown>")
    }

    /// Size of the super node, or zero when there is none.
    pub fn super_size(&self, node: &Node) -> u32 {
        node.super_node.and_then(|s| self.get_node(s)).map(|s| s.size).unwrap_or(0)
    }

    /// Checks that every reference stays inside the set.
    pub fn validate_references(&self) -> Result<()> {
        for node in &self.nodes {
            if self.get_package(node.package).is_none() {
                return Err(self.dangling(node, "<package>", node.package.as_u32() as u64));
            }
            if let Some(super_node) = node.super_node {
                self.check_target(node, "<super>", super_node)?;
            }
            for member in &node.members {
                if let TypeRef::Node(target) = member.type_ref {
                    self.check_target(node, self.names.resolve(member.name), target)?;
                }
            }
            for function in &node.functions {
                let function_name = self.names.resolve(function.name);
                if let Some(params) = function.params_node {
                    self.check_target(node, function_name, params)?;
                }
                for parameter in &function.parameters {
                    if let TypeRef::Node(target) = parameter.type_ref {
                        let label = format!("{}::{}", function_name, self.names.resolve(parameter.name));
                        self.check_target(node, &label, target)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn check_target(&self, node: &Node, member: &str, target: NodeIndex) -> Result<()> {
        if self.get_node(target).is_none() {
            return Err(self.dangling(node, member, target.as_u32() as u64));
        }
        Ok(())
    }

    fn dangling(&self, node: &Node, member: &str, target: u64) -> GeneratorError {
        GeneratorError::DanglingReference {
            node: self.names.resolve(node.name).to_string(),
            member: member.to_string(),
            target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NodeKind, PrimitiveType, Layer};

    #[test]
    fn test_nodes_register_in_package_layers() {
        let mut set = NodeSet::new();
        let core = set.add_package("CoreUObject");
        let name = set.intern("FVector");
        let vector = set.add_node(core, Node::new(NodeKind::Struct, name, 12));
        let name = set.intern("UObject");
        let object = set.add_node(core, Node::new(NodeKind::Class, name, 0x28));

        let package = set.package(core);
        assert_eq!(package.nodes(Layer::Structs), &[vector]);
        assert_eq!(package.nodes(Layer::Classes), &[object]);
        assert_eq!(set.node(object).package, core);
        assert_eq!(set.node_name(vector), "FVector");
    }

    #[test]
    fn test_dangling_member_reference() {
        let mut set = NodeSet::new();
        let core = set.add_package("Core");
        let name = set.intern("FBroken");
        let broken = set.add_node(core, Node::new(NodeKind::Struct, name, 8));
        let member = set.intern("Target");
        set.add_member(broken, Member::new(member, TypeRef::Node(NodeIndex::new(42)), 0, 8));

        let err = set.validate_references().unwrap_err();
        match err {
            GeneratorError::DanglingReference { node, member, target } => {
                assert_eq!(node, "FBroken");
                assert_eq!(member, "Target");
                assert_eq!(target, 42);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_predefined_member_is_marked() {
        let mut set = NodeSet::new();
        let core = set.add_package("Core");
        let name = set.intern("UObject");
        let object = set.add_node(core, Node::new(NodeKind::Class, name, 0x28));
        let vft = set.intern("VTable");
        set.add_predefined_member(object, Member::new(vft, TypeRef::Primitive(PrimitiveType::Ptr), 0, 8));

        assert_eq!(set.node(object).members[0].origin, Origin::Predefined);
        assert!(set.validate_references().is_ok());
    }
}
