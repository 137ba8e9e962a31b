// Tue Jan 13 2026 - Alex

use crate::model::{Function, Member, Origin};
use crate::names::NameTable;

/// Member slots split the way the emitter prints them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberOrder {
    pub statics: Vec<u32>,
    pub instance: Vec<u32>,
}

/// Statics lexically by name, instance members by offset then bit index.
/// Zero-size members sort first at their offset. Declaration order breaks ties.
pub fn order_members(names: &NameTable, members: &[Member]) -> MemberOrder {
    let (mut statics, mut instance): (Vec<u32>, Vec<u32>) =
        (0..members.len() as u32).partition(|&slot| members[slot as usize].is_static);

    statics.sort_by(|&a, &b| {
        names
            .resolve(members[a as usize].name)
            .cmp(names.resolve(members[b as usize].name))
    });
    instance.sort_by_key(|&slot| {
        let member = &members[slot as usize];
        (member.offset, !member.is_zero_size(), member.bit_index())
    });

    MemberOrder { statics, instance }
}

/// Reflected functions: static first, const last, then declaration order.
/// Predefined functions follow: non-inline first, static first, const last,
/// then lexical by name.
pub fn order_functions(names: &NameTable, functions: &[Function]) -> Vec<u32> {
    let mut slots: Vec<u32> = (0..functions.len() as u32).collect();
    slots.sort_by(|&a, &b| {
        let left = &functions[a as usize];
        let right = &functions[b as usize];
        let left_predefined = left.origin == Origin::Predefined;
        let right_predefined = right.origin == Origin::Predefined;

        left_predefined
            .cmp(&right_predefined)
            .then_with(|| {
                if left_predefined {
                    left.is_inline().cmp(&right.is_inline())
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .then_with(|| right.is_static().cmp(&left.is_static()))
            .then_with(|| left.is_const().cmp(&right.is_const()))
            .then_with(|| {
                if left_predefined {
                    names.resolve(left.name).cmp(names.resolve(right.name))
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .then_with(|| a.cmp(&b))
    });
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FunctionFlags, NodeIndex, PrimitiveType, TypeRef};

    fn int(names: &mut NameTable, name: &str, offset: u32) -> Member {
        Member::new(names.intern(name), TypeRef::Primitive(PrimitiveType::I32), offset, 4)
    }

    #[test]
    fn test_member_order() {
        let mut names = NameTable::new();
        let members = vec![
            int(&mut names, "Z", 8),
            int(&mut names, "Zeta", 0).with_static(),
            Member::new(names.intern("bB"), TypeRef::Primitive(PrimitiveType::Bool), 4, 1).with_bit_field(2, 1),
            int(&mut names, "Alpha", 0).with_static(),
            Member::new(names.intern("bA"), TypeRef::Primitive(PrimitiveType::Bool), 4, 1).with_bit_field(0, 1),
            int(&mut names, "A", 0),
        ];

        let order = order_members(&names, &members);
        assert_eq!(order.statics, vec![3, 1]);
        assert_eq!(order.instance, vec![5, 4, 2, 0]);
    }

    #[test]
    fn test_zero_size_member_sorts_first_at_offset() {
        let mut names = NameTable::new();
        let members = vec![
            int(&mut names, "A", 0),
            int(&mut names, "B", 4),
            Member::new(names.intern("bFlag"), TypeRef::Primitive(PrimitiveType::Bool), 8, 1).with_bit_field(0, 1),
            Member::new(names.intern("Marker"), TypeRef::Primitive(PrimitiveType::U8), 4, 0),
            Member::new(names.intern("Tail"), TypeRef::Primitive(PrimitiveType::U8), 8, 0),
        ];

        let order = order_members(&names, &members);
        assert_eq!(order.instance, vec![0, 3, 1, 4, 2]);
    }

    #[test]
    fn test_function_order() {
        let mut names = NameTable::new();
        let owner = NodeIndex::new(0);
        let functions = vec![
            Function::new(names.intern("GetName"), owner).with_flags(FunctionFlags::CONST),
            Function::new(names.intern("Tick"), owner),
            Function::new(names.intern("StaticClass"), owner).with_flags(FunctionFlags::STATIC),
            Function::new(names.intern("Zoom"), owner).with_origin(Origin::Predefined),
            Function::new(names.intern("IsA"), owner)
                .with_flags(FunctionFlags::INLINE | FunctionFlags::CONST)
                .with_origin(Origin::Predefined),
            Function::new(names.intern("Apply"), owner).with_origin(Origin::Predefined),
            Function::new(names.intern("Get"), owner)
                .with_flags(FunctionFlags::INLINE | FunctionFlags::STATIC)
                .with_origin(Origin::Predefined),
        ];

        assert_eq!(order_functions(&names, &functions), vec![2, 1, 0, 5, 3, 6, 4]);
    }
}
