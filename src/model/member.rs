// Tue Jan 13 2026 - Alex

use crate::model::TypeRef;
use crate::names::NameId;
use serde::{Deserialize, Serialize};

/// How a member holds its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Storage {
    #[default]
    Value,
    Pointer,
    Reference,
}

impl Storage {
    pub fn is_indirect(self) -> bool {
        !matches!(self, Self::Value)
    }
}

/// Where a member or function came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    #[default]
    Reflected,
    Predefined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitField {
    pub bit_index: u8,
    pub bit_width: u8,
}

impl BitField {
    pub fn end_bit(&self) -> u32 {
        self.bit_index as u32 + self.bit_width as u32
    }
}

/// A data member as reported by the scanner. `size` is the element size;
/// the member occupies `size * array_dim` bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub name: NameId,
    pub type_ref: TypeRef,
    pub storage: Storage,
    pub offset: u32,
    pub size: u32,
    pub array_dim: u32,
    pub alignment: u32,
    pub is_static: bool,
    pub bit_field: Option<BitField>,
    pub origin: Origin,
}

impl Member {
    pub fn new(name: NameId, type_ref: TypeRef, offset: u32, size: u32) -> Self {
        Self {
            name,
            type_ref,
            storage: Storage::Value,
            offset,
            size,
            array_dim: 1,
            alignment: size.clamp(1, 8).next_power_of_two(),
            is_static: false,
            bit_field: None,
            origin: Origin::Reflected,
        }
    }

    pub fn with_storage(mut self, storage: Storage) -> Self {
        self.storage = storage;
        self
    }

    pub fn with_array_dim(mut self, array_dim: u32) -> Self {
        self.array_dim = array_dim;
        self
    }

    pub fn with_alignment(mut self, alignment: u32) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn with_bit_field(mut self, bit_index: u8, bit_width: u8) -> Self {
        self.bit_field = Some(BitField { bit_index, bit_width });
        self
    }

    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    /// Bytes covered by the member, array extent included.
    pub fn extent(&self) -> u32 {
        self.size.saturating_mul(self.array_dim)
    }

    pub fn end_offset(&self) -> u32 {
        self.offset.saturating_add(self.extent())
    }

    pub fn is_bit_field(&self) -> bool {
        self.bit_field.is_some()
    }

    pub fn is_zero_size(&self) -> bool {
        self.extent() == 0
    }

    pub fn bit_index(&self) -> u8 {
        self.bit_field.map(|b| b.bit_index).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PrimitiveType;
    use crate::names::NameTable;

    #[test]
    fn test_member_extent() {
        let mut names = NameTable::new();
        let member = Member::new(names.intern("Values"), TypeRef::Primitive(PrimitiveType::F32), 0x10, 4)
            .with_array_dim(3);

        assert_eq!(member.extent(), 12);
        assert_eq!(member.end_offset(), 0x1C);
        assert_eq!(member.alignment, 4);
        assert!(!member.is_zero_size());
    }

    #[test]
    fn test_member_storage_and_bits() {
        let mut names = NameTable::new();
        let member = Member::new(names.intern("bHidden"), TypeRef::Primitive(PrimitiveType::Bool), 8, 1)
            .with_bit_field(3, 1);

        assert!(member.is_bit_field());
        assert_eq!(member.bit_index(), 3);
        assert_eq!(member.bit_field.map(|b| b.end_bit()), Some(4));
        assert!(!member.storage.is_indirect());
        assert!(Storage::Pointer.is_indirect());
    }
}
