// Tue Jan 13 2026 - Alex

use crate::model::{NodeIndex, PrimitiveType};
use serde::Serialize;

/// One bit range inside a bit-field backing unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BitSlot {
    Member { slot: u32, bit_index: u8, bit_width: u8 },
    Padding { bit_index: u8, bit_width: u8 },
}

impl BitSlot {
    pub fn bit_index(&self) -> u8 {
        match self {
            Self::Member { bit_index, .. } | Self::Padding { bit_index, .. } => *bit_index,
        }
    }

    pub fn bit_width(&self) -> u8 {
        match self {
            Self::Member { bit_width, .. } | Self::Padding { bit_width, .. } => *bit_width,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutEntry {
    /// A member at `slot` in the node's member list.
    Member { slot: u32, offset: u32, size: u32 },
    /// Synthesized opaque bytes.
    Padding { offset: u32, size: u32 },
    /// Bit-fields sharing one storage unit.
    BitFieldUnit {
        offset: u32,
        size: u32,
        backing: PrimitiveType,
        slots: Vec<BitSlot>,
    },
}

impl LayoutEntry {
    pub fn offset(&self) -> u32 {
        match self {
            Self::Member { offset, .. } | Self::Padding { offset, .. } | Self::BitFieldUnit { offset, .. } => *offset,
        }
    }

    pub fn size(&self) -> u32 {
        match self {
            Self::Member { size, .. } | Self::Padding { size, .. } | Self::BitFieldUnit { size, .. } => *size,
        }
    }

    pub fn end(&self) -> u32 {
        self.offset() + self.size()
    }

    pub fn is_padding(&self) -> bool {
        matches!(self, Self::Padding { .. })
    }
}

/// Gap-free, offset-ordered member sequence of one node.
///
/// Instance entries cover `[base, size)`; `[0, base)` belongs to the super.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedLayout {
    pub node: NodeIndex,
    pub base: u32,
    pub size: u32,
    /// Static member slots, lexically ordered.
    pub statics: Vec<u32>,
    pub entries: Vec<LayoutEntry>,
    pub explicit_alignment: bool,
}

impl NormalizedLayout {
    pub fn empty(node: NodeIndex, size: u32) -> Self {
        Self {
            node,
            base: 0,
            size,
            statics: Vec::new(),
            entries: Vec::new(),
            explicit_alignment: false,
        }
    }

    pub fn padding_bytes(&self) -> u32 {
        self.entries.iter().filter(|e| e.is_padding()).map(LayoutEntry::size).sum()
    }

    pub fn covered_bytes(&self) -> u32 {
        self.base + self.entries.iter().map(LayoutEntry::size).sum::<u32>()
    }

    /// True when entries run from `base` to `size` without gap or overlap.
    pub fn is_contiguous(&self) -> bool {
        let mut cursor = self.base;
        for entry in &self.entries {
            if entry.offset() != cursor {
                return false;
            }
            cursor = entry.end();
        }
        cursor == self.size
    }
}
