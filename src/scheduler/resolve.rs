// Tue Jan 13 2026 - Alex

use crate::collision::{CollisionResolver, EntityKey, Scope};
use crate::config::Config;
use crate::error::{GeneratorError, Result};
use crate::graph::{DeferReason, Edge, EdgeSite, Visitor};
use crate::layout::{order_functions, BitSlot, LayoutEntry, LayoutNormalizer};
use crate::model::{Layer, Node, NodeIndex, NodeSet, PackageIndex};
use crate::scheduler::plan::{
    ForwardDeclaration, GenerationPlan, ResolvedBit, ResolvedEntry, ResolvedFunction, ResolvedMember,
    ResolvedPackage, ResolvedParameter, ResolvedType,
};

/// Walk visitor that turns every emitted node into a `ResolvedType`.
///
/// Names are requested strictly in emission order: package, type, members
/// in layout order, then functions and their parameters.
pub(crate) struct TypeResolver<'a> {
    set: &'a NodeSet,
    config: &'a Config,
    normalizer: LayoutNormalizer,
    names: CollisionResolver,
    plan: GenerationPlan,
    package_positions: Vec<Option<usize>>,
}

impl<'a> TypeResolver<'a> {
    pub(crate) fn new(set: &'a NodeSet, config: &'a Config) -> Self {
        Self {
            set,
            config,
            normalizer: LayoutNormalizer::new(),
            names: CollisionResolver::new(config),
            plan: GenerationPlan::with_node_count(set.node_count()),
            package_positions: vec![None; set.packages().len()],
        }
    }

    /// Names the packages that never emitted a node and fills in the names
    /// of forward-declared targets.
    pub(crate) fn finish(mut self) -> Result<GenerationPlan> {
        let set = self.set;
        for package in set.packages() {
            if self.package_positions[package.index.as_usize()].is_none() {
                let position = self.open_package(package.index)?;
                self.plan.packages[position].is_empty = package.is_empty();
            }
        }

        let mut declarations = std::mem::take(&mut self.plan.forward_declarations);
        for declaration in &mut declarations {
            declaration.target_name = match self.plan.type_name(declaration.target) {
                Some(name) => name.to_string(),
                None => set.node_name(declaration.target).to_string(),
            };
            if let (EdgeSite::Member(slot), Some(position)) = (declaration.site, self.plan.position(declaration.node)) {
                mark_forward_declared(&mut self.plan.types[position], slot);
            }
        }
        self.plan.forward_declarations = declarations;

        Ok(self.plan)
    }

    fn open_package(&mut self, index: PackageIndex) -> Result<usize> {
        if let Some(position) = self.package_positions[index.as_usize()] {
            return Ok(position);
        }

        let package = self.set.package(index);
        let name = self
            .names
            .resolve(Scope::Packages, EntityKey::Package(index), self.set.name(package.name))?;
        log::debug!("Opening package {} as {}", self.set.name(package.name), name);

        let position = self.plan.packages.len();
        self.plan.packages.push(ResolvedPackage {
            index,
            name,
            is_empty: false,
            structs: Vec::new(),
            classes: Vec::new(),
            parameters: Vec::new(),
            struct_deps: package.struct_deps.iter().copied().collect(),
            class_deps: package.class_deps.iter().copied().collect(),
        });
        self.package_positions[index.as_usize()] = Some(position);
        Ok(position)
    }

    fn resolve_member(&mut self, node: &Node, slot: u32) -> Result<ResolvedMember> {
        let member = &node.members[slot as usize];
        let name = self.names.resolve(
            Scope::Members(node.index),
            EntityKey::Member(node.index, slot),
            self.set.name(member.name),
        )?;
        Ok(ResolvedMember {
            slot,
            name,
            type_ref: member.type_ref,
            storage: member.storage,
            offset: member.offset,
            size: member.size,
            array_dim: member.array_dim,
            origin: member.origin,
            forward_declared: false,
        })
    }

    /// Reflected member names are settled before any synthesized padding
    /// name, so a clash always renames the padding.
    fn claim_member_names(&mut self, node: &Node, entries: &[LayoutEntry]) -> Result<()> {
        for entry in entries {
            match entry {
                LayoutEntry::Member { slot, .. } => {
                    self.resolve_member(node, *slot)?;
                }
                LayoutEntry::BitFieldUnit { slots, .. } => {
                    for bit in slots {
                        if let BitSlot::Member { slot, .. } = *bit {
                            self.resolve_member(node, slot)?;
                        }
                    }
                }
                LayoutEntry::Padding { .. } => {}
            }
        }
        Ok(())
    }

    fn resolve_entry(&mut self, node: &Node, entry: &LayoutEntry) -> Result<ResolvedEntry> {
        let scope = Scope::Members(node.index);
        match entry {
            LayoutEntry::Member { slot, .. } => Ok(ResolvedEntry::Member(self.resolve_member(node, *slot)?)),
            LayoutEntry::Padding { offset, size } => {
                let proposed = format!("{}{:X}", self.config.padding_prefix, offset);
                let name = self
                    .names
                    .resolve(scope, EntityKey::Padding(node.index, *offset), &proposed)?;
                Ok(ResolvedEntry::Padding {
                    name,
                    offset: *offset,
                    size: *size,
                })
            }
            LayoutEntry::BitFieldUnit {
                offset,
                size,
                backing,
                slots,
            } => {
                let mut fields = Vec::with_capacity(slots.len());
                for bit in slots {
                    fields.push(match *bit {
                        BitSlot::Member {
                            slot,
                            bit_index,
                            bit_width,
                        } => ResolvedBit::Member {
                            slot,
                            name: self.resolve_member(node, slot)?.name,
                            bit_index,
                            bit_width,
                        },
                        BitSlot::Padding { bit_index, bit_width } => {
                            let proposed = format!("{}{:X}_{}", self.config.bit_padding_prefix, offset, bit_index);
                            let name = self.names.resolve(
                                scope,
                                EntityKey::BitPadding(node.index, *offset, bit_index),
                                &proposed,
                            )?;
                            ResolvedBit::Padding {
                                name,
                                bit_index,
                                bit_width,
                            }
                        }
                    });
                }
                Ok(ResolvedEntry::BitFields {
                    offset: *offset,
                    size: *size,
                    backing: *backing,
                    fields,
                })
            }
        }
    }

    fn resolve_functions(&mut self, node: &Node, resolved: &ResolvedType) -> Result<Vec<ResolvedFunction>> {
        let scope = Scope::Functions(node.index);
        if self.config.reserve_type_name_in_scope {
            self.names.reserve(scope, &resolved.name);
        }
        for member_name in resolved.member_names() {
            self.names.reserve(scope, member_name);
        }

        let order = order_functions(self.set.names(), &node.functions);
        let mut functions = Vec::with_capacity(order.len());
        for slot in order {
            let function = &node.functions[slot as usize];
            let name = self
                .names
                .resolve(scope, EntityKey::Function(node.index, slot), self.set.name(function.name))?;

            let mut parameters = Vec::with_capacity(function.parameters.len());
            for (position, parameter) in function.parameters.iter().enumerate() {
                let name = self.names.resolve(
                    Scope::Parameters(node.index, slot),
                    EntityKey::Parameter(node.index, slot, position as u32),
                    self.set.name(parameter.name),
                )?;
                parameters.push(ResolvedParameter {
                    name,
                    type_ref: parameter.type_ref,
                    storage: parameter.storage,
                    direction: parameter.direction,
                });
            }

            functions.push(ResolvedFunction {
                slot,
                name,
                flags: function.flags,
                origin: function.origin,
                params_node: function.params_node,
                parameters,
            });
        }
        Ok(functions)
    }
}

impl Visitor<NodeIndex> for TypeResolver<'_> {
    type Error = GeneratorError;

    fn visit(&mut self, index: NodeIndex) -> Result<()> {
        let set = self.set;
        let node = set.node(index);
        let package_position = self.open_package(node.package)?;

        let name = self
            .names
            .resolve(Scope::Types(node.package), EntityKey::Node(index), set.name(node.name))?;
        let layout = self.normalizer.normalize(set, index)?;

        if self.config.reserve_type_name_in_scope {
            self.names.reserve(Scope::Members(index), &name);
        }

        let mut statics = Vec::with_capacity(layout.statics.len());
        for &slot in &layout.statics {
            statics.push(self.resolve_member(node, slot)?);
        }
        self.claim_member_names(node, &layout.entries)?;
        let mut members = Vec::with_capacity(layout.entries.len());
        for entry in &layout.entries {
            members.push(self.resolve_entry(node, entry)?);
        }

        let super_name = node.super_node.and_then(|s| {
            self.names
                .lookup(Scope::Types(set.node(s).package), EntityKey::Node(s))
                .map(str::to_string)
        });

        let mut resolved = ResolvedType {
            node: index,
            package: node.package,
            kind: node.kind,
            name,
            size: node.size,
            alignment: node.alignment,
            explicit_alignment: layout.explicit_alignment,
            super_node: node.super_node,
            super_name,
            base: layout.base,
            statics,
            members,
            functions: Vec::new(),
        };
        resolved.functions = self.resolve_functions(node, &resolved)?;

        let layer = node.layer();
        log::trace!("Emitting {} as {} ({:?})", set.name(node.name), resolved.name, layer);
        let package = &mut self.plan.packages[package_position];
        match layer {
            Layer::Structs => package.structs.push(index),
            Layer::Classes => package.classes.push(index),
            Layer::Parameters => package.parameters.push(index),
        }
        self.plan.push(layer, resolved);
        Ok(())
    }

    fn defer(&mut self, edge: &Edge<NodeIndex>, reason: DeferReason) -> Result<()> {
        if reason == DeferReason::CycleBroken {
            log::debug!(
                "Forward declaring {} in {} to break a cycle",
                self.set.node_name(edge.to),
                self.set.node_name(edge.from)
            );
        }
        self.plan.forward_declarations.push(ForwardDeclaration {
            node: edge.from,
            target: edge.to,
            target_name: String::new(),
            site: edge.site,
            reason,
        });
        Ok(())
    }
}

fn mark_forward_declared(resolved: &mut ResolvedType, slot: u32) {
    let statics = resolved.statics.iter_mut();
    let instance = resolved.members.iter_mut().filter_map(|e| match e {
        ResolvedEntry::Member(member) => Some(member),
        _ => None,
    });
    if let Some(member) = statics.chain(instance).find(|m| m.slot == slot) {
        member.forward_declared = true;
    }
}
