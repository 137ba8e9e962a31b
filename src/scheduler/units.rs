// Tue Jan 13 2026 - Alex

use crate::graph::{CyclePolicy, DependencyGraph, Edge, EdgeSite, GraphIndex, Visitor};
use crate::model::{Layer, NodeIndex, NodeSet, PackageIndex};
use std::convert::Infallible;
use std::fmt;

/// One layer file of one package, the unit packages are ordered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerUnit(u32);

impl LayerUnit {
    const LAYERS: u32 = Layer::ALL.len() as u32;

    pub fn new(package: PackageIndex, layer: Layer) -> Self {
        Self(package.as_u32() * Self::LAYERS + layer.ordinal() as u32)
    }

    pub fn package(self) -> PackageIndex {
        PackageIndex::new(self.0 / Self::LAYERS)
    }

    pub fn layer(self) -> Layer {
        Layer::ALL[(self.0 % Self::LAYERS) as usize]
    }
}

impl GraphIndex for LayerUnit {
    fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for LayerUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{:?}", self.package(), self.layer())
    }
}

struct UnitCollector<'a> {
    set: &'a NodeSet,
    order: Vec<LayerUnit>,
}

impl Visitor<LayerUnit> for UnitCollector<'_> {
    type Error = Infallible;

    fn visit(&mut self, unit: LayerUnit) -> Result<(), Infallible> {
        self.order.push(unit);
        Ok(())
    }

    fn cycle_ignored(&mut self, edge: &Edge<LayerUnit>) {
        log::warn!(
            "Package cycle between {} ({:?}) and {} ({:?}), ordering by index",
            self.set.package_name(edge.from.package()),
            edge.from.layer(),
            self.set.package_name(edge.to.package()),
            edge.to.layer()
        );
    }
}

/// Orders every layer of every package so that a unit follows the units
/// its nodes need full definitions from.
///
/// Inside a package, classes follow structs and parameter blocks follow
/// classes. Package-level cycles are tolerated: the closing edge is dropped
/// and the node walk settles the actual order.
pub fn order_units(set: &NodeSet, edges: &[Edge<NodeIndex>]) -> Vec<LayerUnit> {
    let unit_count = set.packages().len() * Layer::ALL.len();
    let mut graph = DependencyGraph::with_capacity(unit_count);

    for package in set.packages() {
        let structs = LayerUnit::new(package.index, Layer::Structs);
        let classes = LayerUnit::new(package.index, Layer::Classes);
        let parameters = LayerUnit::new(package.index, Layer::Parameters);
        graph.add_edge(Edge::value(classes, structs, EdgeSite::Dependency));
        graph.add_edge(Edge::value(parameters, classes, EdgeSite::Dependency));
    }

    for edge in edges.iter().filter(|e| e.kind.is_gating()) {
        let from = set.node(edge.from);
        let to = set.node(edge.to);
        let from_unit = LayerUnit::new(from.package, from.layer());
        let to_unit = LayerUnit::new(to.package, to.layer());
        if from_unit != to_unit {
            graph.add_edge(Edge::value(from_unit, to_unit, EdgeSite::Dependency));
        }
    }

    let roots: Vec<LayerUnit> = (0..unit_count as u32).map(LayerUnit).collect();
    let mut collector = UnitCollector {
        set,
        order: Vec::with_capacity(unit_count),
    };
    if let Err(err) = graph.walk(CyclePolicy::Lenient).visit(&roots, &mut collector) {
        log::warn!("Package ordering stopped early: {}", err);
    }

    log::debug!("Ordered {} layer units", collector.order.len());
    collector.order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Member, Node, NodeKind, TypeRef};
    use crate::scheduler::edges::build_node_edges;

    fn add(set: &mut NodeSet, package: PackageIndex, kind: NodeKind, name: &str) -> NodeIndex {
        let name = set.intern(name);
        set.add_node(package, Node::new(kind, name, 8))
    }

    fn embed(set: &mut NodeSet, from: NodeIndex, to: NodeIndex) {
        let name = set.intern("Value");
        set.add_member(from, Member::new(name, TypeRef::Node(to), 0, 8));
    }

    fn position(order: &[LayerUnit], package: PackageIndex, layer: Layer) -> usize {
        let unit = LayerUnit::new(package, layer);
        order.iter().position(|&u| u == unit).unwrap()
    }

    #[test]
    fn test_unit_index_round_trip() {
        let unit = LayerUnit::new(PackageIndex::new(7), Layer::Classes);
        assert_eq!(unit.package(), PackageIndex::new(7));
        assert_eq!(unit.layer(), Layer::Classes);
        assert_eq!(unit.index(), 22);
    }

    #[test]
    fn test_dependency_packages_come_first() {
        let mut set = NodeSet::new();
        let a = set.add_package("A");
        let b = set.add_package("B");
        let c = set.add_package("C");
        let na = add(&mut set, a, NodeKind::Struct, "FA");
        let nb = add(&mut set, b, NodeKind::Struct, "FB");
        let nc = add(&mut set, c, NodeKind::Struct, "FC");
        embed(&mut set, na, nb);
        embed(&mut set, nb, nc);

        let order = order_units(&set, &build_node_edges(&set));
        assert_eq!(order.len(), 9);
        assert!(position(&order, c, Layer::Structs) < position(&order, b, Layer::Structs));
        assert!(position(&order, b, Layer::Structs) < position(&order, a, Layer::Structs));
    }

    #[test]
    fn test_layers_inside_package() {
        let mut set = NodeSet::new();
        let core = set.add_package("Core");
        add(&mut set, core, NodeKind::Class, "UObject");

        let order = order_units(&set, &build_node_edges(&set));
        assert_eq!(
            order,
            vec![
                LayerUnit::new(core, Layer::Structs),
                LayerUnit::new(core, Layer::Classes),
                LayerUnit::new(core, Layer::Parameters),
            ]
        );
    }

    #[test]
    fn test_package_cycle_is_tolerated() {
        let mut set = NodeSet::new();
        let a = set.add_package("A");
        let b = set.add_package("B");
        let a1 = add(&mut set, a, NodeKind::Struct, "FA1");
        let a2 = add(&mut set, a, NodeKind::Struct, "FA2");
        let b1 = add(&mut set, b, NodeKind::Struct, "FB1");
        embed(&mut set, a1, b1);
        embed(&mut set, b1, a2);

        let order = order_units(&set, &build_node_edges(&set));
        assert_eq!(order.len(), 6);
        assert!(position(&order, b, Layer::Structs) < position(&order, a, Layer::Structs));
    }
}
