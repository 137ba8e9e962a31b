// Tue Jan 13 2026 - Alex

use crate::graph::{Edge, EdgeSite};
use crate::model::{Layer, Member, NodeIndex, NodeSet, TypeRef};

/// Collects every node-to-node edge of the set: supers, member types and
/// parameter types.
pub fn build_node_edges(set: &NodeSet) -> Vec<Edge<NodeIndex>> {
    let mut edges = Vec::new();

    for node in set.nodes() {
        if let Some(super_node) = node.super_node {
            edges.push(Edge::inherits(node.index, super_node));
        }

        for (slot, member) in node.members.iter().enumerate() {
            if let TypeRef::Node(target) = member.type_ref {
                edges.push(member_edge(set, node.index, target, member, slot as u32));
            }
        }

        for (slot, function) in node.functions.iter().enumerate() {
            for parameter in &function.parameters {
                if let TypeRef::Node(target) = parameter.type_ref {
                    edges.push(classify(
                        set,
                        node.index,
                        target,
                        true,
                        EdgeSite::Function(slot as u32),
                    ));
                }
            }
        }
    }

    edges
}

fn member_edge(set: &NodeSet, from: NodeIndex, to: NodeIndex, member: &Member, slot: u32) -> Edge<NodeIndex> {
    // A static member is only declared inside the type.
    let indirect = member.storage.is_indirect() || member.is_static;
    classify(set, from, to, indirect, EdgeSite::Member(slot))
}

/// Indirect uses of forward-declarable targets never gate ordering. Any
/// other use needs the full definition first, but an indirect one may
/// still be broken if it closes a cycle.
fn classify(set: &NodeSet, from: NodeIndex, to: NodeIndex, indirect: bool, site: EdgeSite) -> Edge<NodeIndex> {
    if indirect && set.node(to).is_forward_declarable() {
        Edge::pointer(from, to, site)
    } else {
        Edge::value(from, to, site).with_indirect(indirect)
    }
}

/// Fills each package's struct-layer and class-layer dependency sets from
/// the edges that leave it.
pub fn apply_package_dependencies(set: &mut NodeSet, edges: &[Edge<NodeIndex>]) {
    let mut additions = Vec::new();
    for edge in edges {
        let from = set.node(edge.from);
        let to = set.node(edge.to);
        if from.package != to.package {
            additions.push((from.package, from.layer(), to.package));
        }
    }

    for (package, layer, dependency) in additions {
        let package = set.package_mut(package);
        match layer {
            Layer::Structs => package.struct_deps.insert(dependency),
            Layer::Classes | Layer::Parameters => package.class_deps.insert(dependency),
        };
    }
}
