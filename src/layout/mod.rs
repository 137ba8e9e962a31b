// Tue Jan 13 2026 - Alex

pub mod entry;
pub mod ordering;
pub mod bitfield;
pub mod normalizer;

pub use entry::{BitSlot, LayoutEntry, NormalizedLayout};
pub use ordering::{order_functions, order_members, MemberOrder};
pub use bitfield::BitFieldUnit;
pub use normalizer::LayoutNormalizer;
