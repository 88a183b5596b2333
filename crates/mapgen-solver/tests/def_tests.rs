use super::*;
use crate::TypeInterner;
use crate::types::{ParamInfo, TypeId};

#[test]
fn test_def_id_validity() {
    assert!(!DefId::INVALID.is_valid());
    assert!(DefId(1).is_valid());
    assert!(DefId(100).is_valid());
}

#[test]
fn test_definition_store_basic() {
    let interner = TypeInterner::new();
    let store = DefinitionStore::new();

    let name = interner.intern_string("Customer");
    let def_id = store.register(DefinitionInfo::class(name));

    assert!(def_id.is_valid());
    assert!(store.get(def_id).is_some());
    assert_eq!(store.get_name(def_id), Some(name));
    assert_eq!(store.get_kind(def_id), Some(DefKind::Class));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_members_keep_declaration_order() {
    let interner = TypeInterner::new();
    let store = DefinitionStore::new();

    let id = interner.intern_string("Id");
    let name = interner.intern_string("Name");
    let def_id = store.register(
        DefinitionInfo::class(interner.intern_string("Customer"))
            .with_member(MemberInfo::property(id, TypeId::INT32))
            .with_member(MemberInfo::field(name, TypeId::STRING)),
    );

    let info = store.get(def_id).expect("definition exists");
    let names: Vec<_> = info.members.iter().map(|m| m.name).collect();
    assert_eq!(names, vec![id, name]);
}

#[test]
fn test_self_referencing_members_added_after_register() {
    let interner = TypeInterner::new();
    let store = DefinitionStore::new();

    let node = store.register(DefinitionInfo::class(interner.intern_string("Node")));
    let node_type = interner.named(node);
    store.add_member(
        node,
        MemberInfo::property(interner.intern_string("Parent"), node_type),
    );

    let info = store.get(node).expect("definition exists");
    assert_eq!(info.members.len(), 1);
    assert_eq!(info.members[0].type_id, node_type);
}

#[test]
fn test_method_refs_index_their_list() {
    let interner = TypeInterner::new();
    let store = DefinitionStore::new();
    let mapper = store.register(DefinitionInfo::class(interner.intern_string("Mapper")));

    let ctor = store.add_constructor(mapper, MethodInfo::constructor(vec![]));
    let map = store.add_method(
        mapper,
        MethodInfo::new(
            interner.intern_string("Map"),
            vec![ParamInfo::new(interner.intern_string("value"), TypeId::INT32)],
            TypeId::STRING,
        ),
    );
    let other = store.add_method(
        mapper,
        MethodInfo::new(interner.intern_string("Other"), vec![], TypeId::VOID),
    );

    assert_eq!(ctor, MethodRef::constructor(mapper, 0));
    assert_eq!(map, MethodRef::method(mapper, 0));
    assert_eq!(other, MethodRef::method(mapper, 1));
    assert_eq!(
        store.method(map).map(|m| m.return_type),
        Some(TypeId::STRING)
    );
    assert!(store.method(ctor).is_some());
    assert!(store.method(MethodRef::method(mapper, 7)).is_none());
}

#[test]
fn test_constructibility() {
    let interner = TypeInterner::new();
    let name = interner.intern_string("T");

    assert!(DefinitionInfo::class(name).is_constructible());
    assert!(DefinitionInfo::structure(name).is_constructible());
    assert!(!DefinitionInfo::interface(name).is_constructible());
    assert!(!DefinitionInfo::class(name).abstract_type().is_constructible());
}

#[test]
fn test_set_extends_and_nesting() {
    let interner = TypeInterner::new();
    let store = DefinitionStore::new();

    let outer = store.register(DefinitionInfo::class(interner.intern_string("Outer")));
    let base = store.register(DefinitionInfo::class(interner.intern_string("Base")));
    let inner = store.register(
        DefinitionInfo::class(interner.intern_string("Inner"))
            .nested_in(outer)
            .with_visibility(Visibility::Private),
    );
    store.set_extends(inner, base);

    assert_eq!(store.get_extends(inner), Some(base));
    assert_eq!(store.get_containing_type(inner), Some(outer));
    assert_eq!(store.get_extends(outer), None);
}
