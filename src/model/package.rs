// Tue Jan 13 2026 - Alex

use crate::model::{Layer, NodeIndex, PackageIndex};
use crate::names::NameId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A named group of nodes mirroring one runtime module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Package {
    pub index: PackageIndex,
    pub name: NameId,
    /// Packages whose definitions the struct layer needs.
    pub struct_deps: BTreeSet<PackageIndex>,
    /// Packages whose definitions the class and parameter layers need.
    pub class_deps: BTreeSet<PackageIndex>,
    pub structs: Vec<NodeIndex>,
    pub classes: Vec<NodeIndex>,
    pub parameters: Vec<NodeIndex>,
}

impl Package {
    pub fn new(index: PackageIndex, name: NameId) -> Self {
        Self {
            index,
            name,
            struct_deps: BTreeSet::new(),
            class_deps: BTreeSet::new(),
            structs: Vec::new(),
            classes: Vec::new(),
            parameters: Vec::new(),
        }
    }

    pub fn nodes(&self, layer: Layer) -> &[NodeIndex] {
        match layer {
            Layer::Structs => &self.structs,
            Layer::Classes => &self.classes,
            Layer::Parameters => &self.parameters,
        }
    }

    pub fn deps(&self, layer: Layer) -> &BTreeSet<PackageIndex> {
        match layer {
            Layer::Structs => &self.struct_deps,
            Layer::Classes | Layer::Parameters => &self.class_deps,
        }
    }

    pub(crate) fn register(&mut self, node: NodeIndex, layer: Layer) {
        match layer {
            Layer::Structs => self.structs.push(node),
            Layer::Classes => self.classes.push(node),
            Layer::Parameters => self.parameters.push(node),
        }
    }

    pub fn node_count(&self) -> usize {
        self.structs.len() + self.classes.len() + self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }
}
