// Tue Jan 13 2026 - Alex

use crate::model::NodeIndex;
use crate::names::NameId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a member or parameter refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRef {
    Primitive(PrimitiveType),
    Node(NodeIndex),
    /// Textual type spelled verbatim by the emitter (predefined members).
    Named(NameId),
}

impl TypeRef {
    pub fn node(&self) -> Option<NodeIndex> {
        match self {
            Self::Node(index) => Some(*index),
            _ => None,
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Self::Primitive(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveType {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Ptr,
    Bool,
}

impl PrimitiveType {
    pub fn size(self) -> u32 {
        match self {
            Self::U8 | Self::I8 | Self::Bool => 1,
            Self::U16 | Self::I16 => 2,
            Self::U32 | Self::I32 | Self::F32 => 4,
            Self::U64 | Self::I64 | Self::F64 | Self::Ptr => 8,
        }
    }

    pub fn alignment(self) -> u32 {
        self.size()
    }

    pub fn bits(self) -> u32 {
        self.size() * 8
    }

    /// Smallest unsigned integer able to hold `bits` bits.
    pub fn smallest_unsigned_for_bits(bits: u32) -> Option<Self> {
        match bits {
            0..=8 => Some(Self::U8),
            9..=16 => Some(Self::U16),
            17..=32 => Some(Self::U32),
            33..=64 => Some(Self::U64),
            _ => None,
        }
    }

    pub fn is_signed(self) -> bool {
        matches!(self, Self::I8 | Self::I16 | Self::I32 | Self::I64)
    }

    pub fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// C++ spelling used by the generated SDK.
    pub fn cpp_name(self) -> &'static str {
        match self {
            Self::U8 => "uint8",
            Self::U16 => "uint16",
            Self::U32 => "uint32",
            Self::U64 => "uint64",
            Self::I8 => "int8",
            Self::I16 => "int16",
            Self::I32 => "int32",
            Self::I64 => "int64",
            Self::F32 => "float",
            Self::F64 => "double",
            Self::Ptr => "void*",
            Self::Bool => "bool",
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cpp_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smallest_unsigned_for_bits() {
        assert_eq!(PrimitiveType::smallest_unsigned_for_bits(1), Some(PrimitiveType::U8));
        assert_eq!(PrimitiveType::smallest_unsigned_for_bits(8), Some(PrimitiveType::U8));
        assert_eq!(PrimitiveType::smallest_unsigned_for_bits(9), Some(PrimitiveType::U16));
        assert_eq!(PrimitiveType::smallest_unsigned_for_bits(33), Some(PrimitiveType::U64));
        assert_eq!(PrimitiveType::smallest_unsigned_for_bits(65), None);
    }

    #[test]
    fn test_primitive_sizes() {
        assert_eq!(PrimitiveType::Bool.size(), 1);
        assert_eq!(PrimitiveType::F32.alignment(), 4);
        assert_eq!(PrimitiveType::Ptr.size(), 8);
        assert!(PrimitiveType::I16.is_signed());
        assert!(PrimitiveType::F64.is_float());
    }
}
