use super::*;
use crate::def::DefinitionInfo;
use crate::test_fixtures::Fixture;

fn names(fx: &Fixture, fields: &[ObjectField]) -> Vec<String> {
    fields.iter().map(|f| fx.text(f.name)).collect()
}

#[test]
fn test_properties_and_fields_are_merged_in_declaration_order() {
    let fx = Fixture::new();
    let (def, ty) = fx.class("Customer", &[("Id", TypeId::INT32)]);
    fx.member(def, MemberInfo::field(fx.atom("Name"), TypeId::STRING));
    fx.prop(def, "Email", TypeId::STRING);

    let fields = get_object_fields(&fx.db, ty);
    assert_eq!(names(&fx, &fields), vec!["Id", "Name", "Email"]);
    assert_eq!(fields[0].origin, FieldOrigin::Property);
    assert_eq!(fields[1].origin, FieldOrigin::Field);
    assert!(fields.iter().all(|f| f.declaring_type == def));
}

#[test]
fn test_static_indexer_and_implicit_members_are_excluded() {
    let fx = Fixture::new();
    let (def, ty) = fx.class("Order", &[("Id", TypeId::INT32)]);
    fx.member(
        def,
        MemberInfo::property(fx.atom("Count"), TypeId::INT32).static_member(),
    );
    fx.member(
        def,
        MemberInfo::property(fx.atom("Item"), TypeId::STRING).indexer(),
    );
    fx.member(
        def,
        MemberInfo::field(fx.atom("<Id>k__BackingField"), TypeId::INT32).implicit(),
    );

    let fields = get_object_fields(&fx.db, ty);
    assert_eq!(names(&fx, &fields), vec!["Id"]);
}

#[test]
fn test_read_only_members_are_kept_but_not_writable() {
    let fx = Fixture::new();
    let (def, ty) = fx.class("Invoice", &[]);
    fx.member(
        def,
        MemberInfo::property(fx.atom("Total"), TypeId::DECIMAL).read_only(),
    );
    fx.member(
        def,
        MemberInfo::property(fx.atom("Secret"), TypeId::STRING).write_only(),
    );

    let fields = get_object_fields(&fx.db, ty);
    assert_eq!(fields.len(), 2);
    assert!(fields[0].is_readable());
    assert!(!fields[0].is_writable());
    assert!(!fields[1].is_readable());
    assert!(fields[1].is_writable());
}

#[test]
fn test_base_members_follow_own_members_and_are_hidden_by_name() {
    let fx = Fixture::new();
    let (base, _) = fx.class("Entity", &[("Id", TypeId::INT32), ("Name", TypeId::STRING)]);
    let (derived, ty) = fx.declare(DefinitionInfo::class(fx.atom("Customer")).with_extends(base));
    fx.prop(derived, "Name", TypeId::OBJECT);
    fx.prop(derived, "Email", TypeId::STRING);

    let fields = get_object_fields(&fx.db, ty);
    assert_eq!(names(&fx, &fields), vec!["Name", "Email", "Id"]);
    assert_eq!(fields[0].type_id, TypeId::OBJECT);
    assert_eq!(fields[0].declaring_type, derived);
    assert_eq!(fields[2].declaring_type, base);
}

#[test]
fn test_interfaces_collect_inherited_interface_members() {
    let fx = Fixture::new();
    let (named, _) = fx.declare(DefinitionInfo::interface(fx.atom("INamed")));
    fx.prop(named, "Name", TypeId::STRING);
    let (keyed, _) = fx.declare(DefinitionInfo::interface(fx.atom("IKeyed")));
    fx.prop(keyed, "Id", TypeId::INT32);
    let (entity, ty) = fx.declare(
        DefinitionInfo::interface(fx.atom("IEntity")).with_implements(vec![named, keyed]),
    );
    fx.prop(entity, "Version", TypeId::INT64);

    let fields = get_object_fields(&fx.db, ty);
    assert_eq!(names(&fx, &fields), vec!["Version", "Name", "Id"]);
}

#[test]
fn test_cyclic_base_chain_is_walked_once() {
    let fx = Fixture::new();
    let (a, a_ty) = fx.class("A", &[("X", TypeId::INT32)]);
    let (b, _) = fx.declare(DefinitionInfo::class(fx.atom("B")).with_extends(a));
    fx.prop(b, "Y", TypeId::INT32);
    fx.db.defs.set_extends(a, b);

    let fields = get_object_fields(&fx.db, a_ty);
    assert_eq!(names(&fx, &fields), vec!["X", "Y"]);
    assert_eq!(ancestry(&fx.db, a).as_slice(), &[a, b]);
}

#[test]
fn test_nullable_exposes_inner_members() {
    let fx = Fixture::new();
    let (_, ty) = fx.class("Point", &[("X", TypeId::FLOAT64)]);
    let nullable = fx.db.types.nullable(ty);

    assert_eq!(get_object_fields(&fx.db, nullable).len(), 1);
}

#[test]
fn test_non_object_types_have_no_fields() {
    let fx = Fixture::new();
    let list = fx.list(TypeId::STRING);

    assert!(get_object_fields(&fx.db, TypeId::STRING).is_empty());
    assert!(get_object_fields(&fx.db, list).is_empty());
    assert!(get_object_fields(&fx.db, TypeId::ERROR).is_empty());
}
