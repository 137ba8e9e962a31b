// Tue Jan 13 2026 - Alex

use crate::error::{GeneratorError, Result};
use crate::layout::{order_members, BitFieldUnit, LayoutEntry, NormalizedLayout};
use crate::model::{Node, NodeIndex, NodeSet};

/// Rebuilds byte-exact member sequences from reflected offsets and sizes.
///
/// Reflection data never describes unused bytes, so every gap between
/// members, and between the last member and the node size, is filled with
/// an opaque padding entry. Inconsistent input is fatal.
#[derive(Debug, Clone, Default)]
pub struct LayoutNormalizer;

impl LayoutNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, set: &NodeSet, index: NodeIndex) -> Result<NormalizedLayout> {
        let node = set.node(index);
        let names = set.names();
        let node_name = names.resolve(node.name);
        let order = order_members(names, &node.members);

        if node.is_enum() {
            let mut layout = NormalizedLayout::empty(index, node.size);
            layout.statics = order.statics;
            return Ok(layout);
        }

        let base = set.super_size(node);
        if base > node.size {
            return Err(GeneratorError::layout(
                node_name,
                "<super>",
                format!("super size 0x{:X} exceeds node size 0x{:X}", base, node.size),
            ));
        }

        let mut max_alignment = node
            .super_node
            .and_then(|s| set.get_node(s))
            .map(|s| s.alignment)
            .unwrap_or(1);
        if node.is_union() {
            return Self::normalize_union(set, index, base, max_alignment);
        }

        let mut entries = Vec::with_capacity(order.instance.len() + 2);
        let mut cursor = base;
        let mut position = 0;

        while position < order.instance.len() {
            let slot = order.instance[position];
            let member = &node.members[slot as usize];
            let member_name = names.resolve(member.name);

            if member.offset < cursor {
                let reason = if member.offset < base {
                    format!("offset 0x{:X} lies inside the super (size 0x{:X})", member.offset, base)
                } else {
                    format!("offset 0x{:X} overlaps previous member ending at 0x{:X}", member.offset, cursor)
                };
                return Err(GeneratorError::layout(node_name, member_name, reason));
            }

            if let Some(first) = member.bit_field {
                let mut group = vec![(slot, first)];
                let mut next = position + 1;
                while let Some(&other_slot) = order.instance.get(next) {
                    let other = &node.members[other_slot as usize];
                    match other.bit_field {
                        Some(bits) if other.offset == member.offset => {
                            group.push((other_slot, bits));
                            next += 1;
                        }
                        _ => break,
                    }
                }

                let unit = BitFieldUnit::build(member.offset, &group).map_err(|e| {
                    let culprit = names.resolve(node.members[e.slot() as usize].name);
                    GeneratorError::layout(node_name, culprit, e.to_string())
                })?;
                Self::check_fits(node, node_name, member_name, member.offset, unit.size())?;
                Self::pad(&mut entries, cursor, member.offset);

                max_alignment = max_alignment.max(unit.backing.alignment());
                cursor = member.offset + unit.size();
                entries.push(unit.into_entry());
                position = next;
                continue;
            }

            let extent = member.extent();
            Self::check_fits(node, node_name, member_name, member.offset, extent)?;
            Self::pad(&mut entries, cursor, member.offset);

            if extent > 0 {
                max_alignment = max_alignment.max(member.alignment);
            }
            cursor = member.offset + extent;
            entries.push(LayoutEntry::Member {
                slot,
                offset: member.offset,
                size: extent,
            });
            position += 1;
        }

        Self::pad(&mut entries, cursor, node.size);

        let layout = NormalizedLayout {
            node: index,
            base,
            size: node.size,
            statics: order.statics,
            entries,
            explicit_alignment: node.alignment > max_alignment,
        };

        if layout.covered_bytes() != node.size || !layout.is_contiguous() {
            return Err(GeneratorError::layout(
                node_name,
                "<layout>",
                format!("entries cover 0x{:X} of 0x{:X} bytes", layout.covered_bytes(), node.size),
            ));
        }

        log::trace!(
            "Normalized {} ({} entries, {} padding bytes)",
            node_name,
            layout.entries.len(),
            layout.padding_bytes()
        );
        Ok(layout)
    }

    /// Union members share storage, so overlap is allowed and no padding is
    /// synthesized. Each member must still lie inside `[base, size)`.
    fn normalize_union(
        set: &NodeSet,
        index: NodeIndex,
        base: u32,
        mut max_alignment: u32,
    ) -> Result<NormalizedLayout> {
        let node = set.node(index);
        let names = set.names();
        let node_name = names.resolve(node.name);
        let order = order_members(names, &node.members);

        let mut entries = Vec::with_capacity(order.instance.len());
        for &slot in &order.instance {
            let member = &node.members[slot as usize];
            let member_name = names.resolve(member.name);

            if member.offset < base {
                return Err(GeneratorError::layout(
                    node_name,
                    member_name,
                    format!("offset 0x{:X} lies inside the super (size 0x{:X})", member.offset, base),
                ));
            }
            if member.is_bit_field() {
                return Err(GeneratorError::layout(node_name, member_name, "bit-field inside a union"));
            }

            let extent = member.extent();
            Self::check_fits(node, node_name, member_name, member.offset, extent)?;
            if extent > 0 {
                max_alignment = max_alignment.max(member.alignment);
            }
            entries.push(LayoutEntry::Member {
                slot,
                offset: member.offset,
                size: extent,
            });
        }

        log::trace!("Normalized union {} ({} members)", node_name, entries.len());
        Ok(NormalizedLayout {
            node: index,
            base,
            size: node.size,
            statics: order.statics,
            entries,
            explicit_alignment: node.alignment > max_alignment,
        })
    }

    fn check_fits(node: &Node, node_name: &str, member_name: &str, offset: u32, size: u32) -> Result<()> {
        match offset.checked_add(size) {
            Some(end) if end <= node.size => Ok(()),
            _ => Err(GeneratorError::layout(
                node_name,
                member_name,
                format!("[0x{:X}, +0x{:X}) exceeds node size 0x{:X}", offset, size, node.size),
            )),
        }
    }

    fn pad(entries: &mut Vec<LayoutEntry>, cursor: u32, offset: u32) {
        if offset > cursor {
            entries.push(LayoutEntry::Padding {
                offset: cursor,
                size: offset - cursor,
            });
        }
    }
}
