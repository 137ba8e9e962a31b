// Tue Jan 13 2026 - Alex

pub mod scope;
pub mod reserved;
pub mod resolver;

pub use scope::{EntityKey, Scope};
pub use reserved::{ReservedWords, DEFAULT_RESERVED_WORDS};
pub use resolver::CollisionResolver;
