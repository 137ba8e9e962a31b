// Tue Jan 15 2026 - Alex

pub mod cli;
pub mod collision;
pub mod config;
pub mod error;
pub mod graph;
pub mod input;
pub mod layout;
pub mod model;
pub mod names;
pub mod output;
pub mod scheduler;

pub use collision::CollisionResolver;
pub use config::Config;
pub use error::{GeneratorError, Result};
pub use graph::DependencyGraph;
pub use input::ScanSnapshot;
pub use layout::LayoutNormalizer;
pub use model::NodeSet;
pub use output::{PlanSummary, PlanWriter};
pub use scheduler::{GenerationPlan, Scheduler};

/// Runs the full pipeline over `set` with `config`.
pub fn generate(set: &mut NodeSet, config: &Config) -> Result<GenerationPlan> {
    config.validate().map_err(GeneratorError::InvalidConfig)?;
    Scheduler::new(config).schedule(set)
}
