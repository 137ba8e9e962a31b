// Tue Jan 13 2026 - Alex

pub mod table;
pub mod identifier;

pub use table::{NameId, NameTable};
pub use identifier::sanitize_identifier;
