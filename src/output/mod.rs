// Tue Jan 13 2026 - Alex

pub mod json;
pub mod summary;

pub use json::PlanWriter;
pub use summary::PlanSummary;
