// Tue Jan 13 2026 - Alex

use crate::model::{NodeIndex, Origin, Storage, TypeRef};
use crate::names::NameId;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct FunctionFlags: u8 {
        const STATIC = 1 << 0;
        const CONST = 1 << 1;
        const INLINE = 1 << 2;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamDirection {
    In,
    Out,
    InOut,
    Return,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: NameId,
    pub type_ref: TypeRef,
    pub storage: Storage,
    pub direction: ParamDirection,
}

impl Parameter {
    pub fn new(name: NameId, type_ref: TypeRef, direction: ParamDirection) -> Self {
        Self {
            name,
            type_ref,
            storage: Storage::Value,
            direction,
        }
    }

    pub fn with_storage(mut self, storage: Storage) -> Self {
        self.storage = storage;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: NameId,
    pub owner: NodeIndex,
    pub parameters: Vec<Parameter>,
    pub flags: FunctionFlags,
    pub origin: Origin,
    /// Parameter block node, when the runtime reflects one.
    pub params_node: Option<NodeIndex>,
}

impl Function {
    pub fn new(name: NameId, owner: NodeIndex) -> Self {
        Self {
            name,
            owner,
            parameters: Vec::new(),
            flags: FunctionFlags::empty(),
            origin: Origin::Reflected,
            params_node: None,
        }
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_flags(mut self, flags: FunctionFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_params_node(mut self, node: NodeIndex) -> Self {
        self.params_node = Some(node);
        self
    }

    pub fn is_static(&self) -> bool {
        self.flags.contains(FunctionFlags::STATIC)
    }

    pub fn is_const(&self) -> bool {
        self.flags.contains(FunctionFlags::CONST)
    }

    pub fn is_inline(&self) -> bool {
        self.flags.contains(FunctionFlags::INLINE)
    }

    pub fn return_parameter(&self) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.direction == ParamDirection::Return)
    }
}
