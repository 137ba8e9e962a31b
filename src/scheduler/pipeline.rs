// Tue Jan 13 2026 - Alex

use crate::config::Config;
use crate::error::{GeneratorError, Result};
use crate::graph::{CycleError, CyclePolicy, DependencyGraph, EdgeSite, GraphError};
use crate::model::{NodeIndex, NodeSet};
use crate::scheduler::edges::{apply_package_dependencies, build_node_edges};
use crate::scheduler::plan::GenerationPlan;
use crate::scheduler::resolve::TypeResolver;
use crate::scheduler::units::order_units;

/// Drives one generation run over a `NodeSet`.
pub struct Scheduler<'c> {
    config: &'c Config,
}

impl<'c> Scheduler<'c> {
    pub fn new(config: &'c Config) -> Self {
        Self { config }
    }

    /// Orders, lays out and names every node of `set`.
    ///
    /// Fills the package dependency sets of `set` as a side effect. Any
    /// fault aborts the run and no partial plan is returned.
    pub fn schedule(&self, set: &mut NodeSet) -> Result<GenerationPlan> {
        set.validate_references()?;

        let edges = build_node_edges(set);
        apply_package_dependencies(set, &edges);
        log::info!(
            "Scheduling {} nodes in {} packages ({} edges)",
            set.node_count(),
            set.packages().len(),
            edges.len()
        );

        let set: &NodeSet = set;
        let units = order_units(set, &edges);

        let mut graph = DependencyGraph::with_capacity(set.node_count());
        for edge in edges {
            graph.add_edge(edge);
        }

        let mut resolver = TypeResolver::new(set, self.config);
        let mut walk = graph.walk(CyclePolicy::Strict);
        for unit in units {
            let roots = set.package(unit.package()).nodes(unit.layer());
            if roots.is_empty() {
                continue;
            }
            walk.visit(roots, &mut resolver).map_err(|err| graph_error(set, err))?;
        }

        let plan = resolver.finish()?;
        log::info!(
            "Planned {} types, {} forward declarations",
            plan.types.len(),
            plan.forward_declarations.len()
        );
        Ok(plan)
    }
}

fn graph_error(set: &NodeSet, err: GraphError<NodeIndex, GeneratorError>) -> GeneratorError {
    match err {
        GraphError::Visitor(err) => err,
        GraphError::Cycle(cycle) => cycle_error(set, cycle),
    }
}

fn cycle_error(set: &NodeSet, cycle: CycleError<NodeIndex>) -> GeneratorError {
    let node = set.node(cycle.from);
    let via = match cycle.site {
        EdgeSite::Super => "super".to_string(),
        EdgeSite::Member(slot) => set.name(node.members[slot as usize].name).to_string(),
        EdgeSite::Function(slot) => format!("{}()", set.name(node.functions[slot as usize].name)),
        EdgeSite::Dependency => "dependency".to_string(),
    };
    log::error!("Cycle of full definitions through {}::{}", set.node_name(cycle.from), via);
    GeneratorError::UnresolvableCycle {
        from: set.node_name(cycle.from).to_string(),
        to: set.node_name(cycle.to).to_string(),
        via,
    }
}
