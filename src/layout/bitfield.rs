// Tue Jan 13 2026 - Alex

use crate::layout::{BitSlot, LayoutEntry};
use crate::model::{BitField, PrimitiveType};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitFieldError {
    #[error("bit-field ends at bit {end_bit}, wider than any backing integer")]
    TooWide { slot: u32, end_bit: u32 },
    #[error("bit {bit_index} overlaps a previous bit-field")]
    Overlap { slot: u32, bit_index: u8 },
    #[error("bit-field has zero width")]
    ZeroWidth { slot: u32 },
}

impl BitFieldError {
    pub fn slot(&self) -> u32 {
        match self {
            Self::TooWide { slot, .. } | Self::Overlap { slot, .. } | Self::ZeroWidth { slot } => *slot,
        }
    }
}

/// Bit-fields sharing one offset, packed into the smallest integer that
/// holds the highest used bit. Gaps between fields become padding bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitFieldUnit {
    pub offset: u32,
    pub backing: PrimitiveType,
    pub slots: Vec<BitSlot>,
}

impl BitFieldUnit {
    pub fn build(offset: u32, fields: &[(u32, BitField)]) -> Result<Self, BitFieldError> {
        let mut sorted = fields.to_vec();
        sorted.sort_by_key(|(_, bits)| bits.bit_index);

        let mut highest = 0;
        for (slot, bits) in &sorted {
            if bits.bit_width == 0 {
                return Err(BitFieldError::ZeroWidth { slot: *slot });
            }
            highest = highest.max(bits.end_bit());
        }
        let backing = PrimitiveType::smallest_unsigned_for_bits(highest).ok_or_else(|| {
            let (slot, bits) = sorted
                .iter()
                .max_by_key(|(_, bits)| bits.end_bit())
                .copied()
                .unwrap_or((0, BitField { bit_index: 0, bit_width: 0 }));
            BitFieldError::TooWide { slot, end_bit: bits.end_bit() }
        })?;

        let mut slots = Vec::with_capacity(sorted.len());
        let mut cursor: u32 = 0;
        for (slot, bits) in sorted {
            let start = bits.bit_index as u32;
            if start < cursor {
                return Err(BitFieldError::Overlap { slot, bit_index: bits.bit_index });
            }
            if start > cursor {
                slots.push(BitSlot::Padding {
                    bit_index: cursor as u8,
                    bit_width: (start - cursor) as u8,
                });
            }
            slots.push(BitSlot::Member {
                slot,
                bit_index: bits.bit_index,
                bit_width: bits.bit_width,
            });
            cursor = bits.end_bit();
        }

        Ok(Self { offset, backing, slots })
    }

    pub fn size(&self) -> u32 {
        self.backing.size()
    }

    pub fn used_bits(&self) -> u32 {
        self.slots.last().map(|s| s.bit_index() as u32 + s.bit_width() as u32).unwrap_or(0)
    }

    pub fn into_entry(self) -> LayoutEntry {
        LayoutEntry::BitFieldUnit {
            offset: self.offset,
            size: self.backing.size(),
            backing: self.backing,
            slots: self.slots,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bits(bit_index: u8, bit_width: u8) -> BitField {
        BitField { bit_index, bit_width }
    }

    #[test]
    fn test_bool_flags_share_a_byte() {
        let unit = BitFieldUnit::build(0x30, &[(2, bits(1, 1)), (1, bits(0, 1)), (3, bits(2, 1))]).unwrap();

        assert_eq!(unit.backing, PrimitiveType::U8);
        assert_eq!(unit.size(), 1);
        assert_eq!(unit.used_bits(), 3);
        assert!(unit.slots.iter().all(|s| matches!(s, BitSlot::Member { .. })));
    }

    #[test]
    fn test_gap_between_bits_is_padded() {
        let unit = BitFieldUnit::build(0, &[(0, bits(1, 2)), (1, bits(6, 1))]).unwrap();

        assert_eq!(
            unit.slots,
            vec![
                BitSlot::Padding { bit_index: 0, bit_width: 1 },
                BitSlot::Member { slot: 0, bit_index: 1, bit_width: 2 },
                BitSlot::Padding { bit_index: 3, bit_width: 3 },
                BitSlot::Member { slot: 1, bit_index: 6, bit_width: 1 },
            ]
        );
    }

    #[test]
    fn test_backing_grows_with_highest_bit() {
        let unit = BitFieldUnit::build(0, &[(0, bits(0, 4)), (1, bits(10, 3))]).unwrap();
        assert_eq!(unit.backing, PrimitiveType::U16);

        let unit = BitFieldUnit::build(0, &[(0, bits(30, 4))]).unwrap();
        assert_eq!(unit.backing, PrimitiveType::U64);
    }

    #[test]
    fn test_invalid_bit_fields() {
        assert_eq!(
            BitFieldUnit::build(0, &[(0, bits(0, 3)), (1, bits(2, 1))]),
            Err(BitFieldError::Overlap { slot: 1, bit_index: 2 })
        );
        assert_eq!(
            BitFieldUnit::build(0, &[(4, bits(60, 8))]),
            Err(BitFieldError::TooWide { slot: 4, end_bit: 68 })
        );
        assert_eq!(BitFieldUnit::build(0, &[(7, bits(0, 0))]), Err(BitFieldError::ZeroWidth { slot: 7 }));
    }
}
