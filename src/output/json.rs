// Tue Jan 13 2026 - Alex

use crate::error::Result;
use crate::scheduler::GenerationPlan;
use serde_json::{to_string, to_string_pretty};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes a `GenerationPlan` as JSON for the emitter.
pub struct PlanWriter {
    pretty_print: bool,
}

impl PlanWriter {
    pub fn new() -> Self {
        Self { pretty_print: true }
    }

    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    pub fn write_to_string(&self, plan: &GenerationPlan) -> Result<String> {
        if self.pretty_print {
            Ok(to_string_pretty(plan)?)
        } else {
            Ok(to_string(plan)?)
        }
    }

    pub fn write_to_file<P: AsRef<Path>>(&self, plan: &GenerationPlan, path: P) -> Result<()> {
        let text = self.write_to_string(plan)?;
        let file = File::create(path.as_ref())?;
        let mut writer = BufWriter::new(file);
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
        log::info!("Wrote plan to {}", path.as_ref().display());
        Ok(())
    }
}

impl Default for PlanWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::model::{Member, Node, NodeKind, NodeSet, PrimitiveType, TypeRef};
    use crate::scheduler::Scheduler;

    fn plan() -> GenerationPlan {
        let mut set = NodeSet::new();
        let core = set.add_package("Core");
        let name = set.intern("FColor");
        let color = set.add_node(core, Node::new(NodeKind::Struct, name, 4));
        let name = set.intern("B");
        set.add_member(color, Member::new(name, TypeRef::Primitive(PrimitiveType::U8), 0, 1));
        Scheduler::new(&Config::default()).schedule(&mut set).unwrap()
    }

    #[test]
    fn test_plan_json_shape() {
        let text = PlanWriter::new().with_pretty_print(false).write_to_string(&plan()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value["packages"][0]["name"], "Core");
        assert_eq!(value["types"][0]["name"], "FColor");
        assert_eq!(value["types"][0]["members"][0]["kind"], "member");
        assert_eq!(value["types"][0]["members"][1]["kind"], "padding");
        assert_eq!(value["types"][0]["members"][1]["name"], "Pad_1");
        assert!(value.get("positions").is_none());
        assert!(!text.contains('\n'));
    }

    #[test]
    fn test_pretty_output_is_indented() {
        let text = PlanWriter::default().write_to_string(&plan()).unwrap();
        assert!(text.contains("\n  \"packages\""));
    }
}
