// Tue Jan 13 2026 - Alex

pub mod edges;
pub mod pipeline;
pub mod plan;
mod resolve;
pub mod units;

pub use edges::{apply_package_dependencies, build_node_edges};
pub use pipeline::Scheduler;
pub use plan::{
    EmissionUnit, ForwardDeclaration, GenerationPlan, ResolvedBit, ResolvedEntry, ResolvedFunction, ResolvedMember,
    ResolvedPackage, ResolvedParameter, ResolvedType,
};
pub use units::{order_units, LayerUnit};
