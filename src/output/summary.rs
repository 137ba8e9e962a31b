// Tue Jan 13 2026 - Alex

use crate::graph::DeferReason;
use crate::model::NodeKind;
use crate::scheduler::{GenerationPlan, ResolvedEntry};
use std::fmt;

/// Counters printed after a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanSummary {
    pub packages: usize,
    pub empty_packages: usize,
    pub structs: usize,
    pub classes: usize,
    pub unions: usize,
    pub enums: usize,
    pub parameter_blocks: usize,
    pub functions: usize,
    pub padding_bytes: u64,
    pub bit_field_units: usize,
    pub explicitly_aligned: usize,
    pub forward_declarations: usize,
    pub broken_cycles: usize,
}

impl PlanSummary {
    pub fn from_plan(plan: &GenerationPlan) -> Self {
        let mut summary = Self {
            packages: plan.packages.len(),
            empty_packages: plan.packages.iter().filter(|p| p.is_empty).count(),
            forward_declarations: plan.forward_declarations.len(),
            broken_cycles: plan
                .forward_declarations
                .iter()
                .filter(|f| f.reason == DeferReason::CycleBroken)
                .count(),
            ..Self::default()
        };

        for resolved in &plan.types {
            match resolved.kind {
                NodeKind::Struct => summary.structs += 1,
                NodeKind::Class => summary.classes += 1,
                NodeKind::Union => summary.unions += 1,
                NodeKind::Enum => summary.enums += 1,
                NodeKind::FunctionParameters => summary.parameter_blocks += 1,
            }
            summary.functions += resolved.functions.len();
            summary.padding_bytes += resolved.padding_bytes() as u64;
            summary.bit_field_units += resolved
                .members
                .iter()
                .filter(|e| matches!(e, ResolvedEntry::BitFields { .. }))
                .count();
            if resolved.explicit_alignment {
                summary.explicitly_aligned += 1;
            }
        }

        summary
    }

    pub fn type_count(&self) -> usize {
        self.structs + self.classes + self.unions + self.enums + self.parameter_blocks
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Packages:             {} ({} empty)", self.packages, self.empty_packages)?;
        writeln!(
            f,
            "Types:                {} ({} structs, {} classes, {} unions, {} enums, {} parameter blocks)",
            self.type_count(),
            self.structs,
            self.classes,
            self.unions,
            self.enums,
            self.parameter_blocks
        )?;
        writeln!(f, "Functions:            {}", self.functions)?;
        writeln!(f, "Padding bytes:        {}", self.padding_bytes)?;
        writeln!(f, "Bit-field units:      {}", self.bit_field_units)?;
        writeln!(f, "Explicitly aligned:   {}", self.explicitly_aligned)?;
        write!(
            f,
            "Forward declarations: {} ({} breaking cycles)",
            self.forward_declarations, self.broken_cycles
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::model::{Member, Node, NodeSet, Storage, TypeRef};
    use crate::scheduler::Scheduler;

    #[test]
    fn test_summary_counts() {
        let mut set = NodeSet::new();
        let core = set.add_package("Core");
        set.add_package("Unused");
        let name = set.intern("FX");
        let x = set.add_node(core, Node::new(NodeKind::Struct, name, 16));
        let name = set.intern("UY");
        let y = set.add_node(core, Node::new(NodeKind::Class, name, 8));
        let name = set.intern("Target");
        set.add_member(x, Member::new(name, TypeRef::Node(y), 0, 8).with_storage(Storage::Pointer));
        set.add_member(y, Member::new(name, TypeRef::Node(x), 0, 8).with_storage(Storage::Pointer));

        let plan = Scheduler::new(&Config::default()).schedule(&mut set).unwrap();
        let summary = PlanSummary::from_plan(&plan);

        assert_eq!(summary.packages, 2);
        assert_eq!(summary.empty_packages, 1);
        assert_eq!(summary.type_count(), 2);
        assert_eq!(summary.padding_bytes, 8);
        assert_eq!(summary.forward_declarations, 1);
        assert_eq!(summary.broken_cycles, 0);
        assert!(summary.to_string().contains("Packages:             2 (1 empty)"));
    }
}
