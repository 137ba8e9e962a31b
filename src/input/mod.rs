// Tue Jan 13 2026 - Alex

pub mod snapshot;

pub use snapshot::{FunctionRecord, MemberRecord, NodeRecord, PackageRecord, ParameterRecord, ScanSnapshot, TypeRecord};
