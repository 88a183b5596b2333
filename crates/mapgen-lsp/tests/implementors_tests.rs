use super::*;
use mapgen_solver::{DefId, DefinitionInfo, MemberInfo, ParamInfo, TargetSlot};

struct Universe {
    db: TypeDatabase,
    mapper: DefId,
    mapper_type: TypeId,
    order: TypeId,
    order_dto: TypeId,
}

fn universe() -> Universe {
    let db = TypeDatabase::new();
    let class = |name: &str| {
        db.declare(
            DefinitionInfo::class(db.intern_string(name))
                .with_member(MemberInfo::property(db.intern_string("Id"), TypeId::INT32)),
        )
    };
    let (mapper, mapper_type) = class("Mapper");
    let (_, order) = class("Order");
    let (_, order_dto) = class("OrderDto");
    Universe {
        db,
        mapper,
        mapper_type,
        order,
        order_dto,
    }
}

impl Universe {
    fn method(&self, name: &str, params: &[(&str, TypeId)], ret: TypeId) -> MethodInfo {
        let params = params
            .iter()
            .map(|(n, t)| ParamInfo::new(self.db.intern_string(n), *t))
            .collect();
        MethodInfo::new(self.db.intern_string(name), params, ret)
    }

    fn add(&self, info: MethodInfo) -> MethodRef {
        self.db.defs.add_method(self.mapper, info)
    }

    fn add_ctor(&self, params: &[(&str, TypeId)]) -> MethodRef {
        let info = self.method("", params, TypeId::VOID);
        self.db
            .defs
            .add_constructor(self.mapper, MethodInfo::constructor(info.params))
    }

    fn shape(&self, method: MethodRef) -> Option<MethodShape> {
        let info = self.db.defs.method(method)?;
        classify(&self.db, method, &info)
    }

    fn slot_names(&self, slots: &[TargetSlot]) -> Vec<String> {
        slots
            .iter()
            .map(|s| self.db.resolve_atom(s.name).to_string())
            .collect()
    }
}

#[test]
fn test_constructor_shapes() {
    let u = universe();
    assert_eq!(
        u.shape(u.add_ctor(&[("order", u.order)])),
        Some(MethodShape::ConstructorFromObject)
    );
    assert_eq!(
        u.shape(u.add_ctor(&[("id", TypeId::INT32)])),
        Some(MethodShape::ConstructorFromParameters)
    );
    assert_eq!(
        u.shape(u.add_ctor(&[("order", u.order), ("id", TypeId::INT32)])),
        Some(MethodShape::ConstructorFromParameters)
    );
    assert_eq!(u.shape(u.add_ctor(&[])), None);
}

#[test]
fn test_method_shapes() {
    let u = universe();
    let list = u.db.types.list(u.order);

    let cases = [
        (u.method("Map", &[("order", u.order)], u.order_dto), Some(MethodShape::ConvertObject)),
        (
            u.method("Make", &[("id", TypeId::INT32), ("name", TypeId::STRING)], u.order_dto),
            Some(MethodShape::ConvertParameters),
        ),
        (u.method("ToDto", &[], u.order_dto), Some(MethodShape::ConvertThis)),
        (
            u.method("Copy", &[("from", u.order), ("to", u.order_dto)], TypeId::VOID),
            Some(MethodShape::CopyBetweenParameters),
        ),
        (u.method("Update", &[("order", u.order)], TypeId::VOID), Some(MethodShape::UpdateThis)),
        (u.method("Text", &[("id", TypeId::INT32)], TypeId::STRING), None),
        (u.method("Run", &[], TypeId::VOID), None),
        (u.method("Count", &[("items", list)], TypeId::VOID), None),
        (
            u.method("Three", &[("a", u.order), ("b", u.order), ("c", u.order)], TypeId::VOID),
            None,
        ),
    ];
    for (info, expected) in cases {
        let name = u.db.resolve_atom(info.name).to_string();
        let method = u.add(info);
        assert_eq!(u.shape(method), expected, "{name}");
    }
}

#[test]
fn test_static_methods_without_receiver() {
    let u = universe();
    let to_dto = u.add(u.method("ToDto", &[], u.order_dto).static_method());
    let update = u.add(u.method("Update", &[("order", u.order)], TypeId::VOID).static_method());
    let copy = u.add(
        u.method("Copy", &[("from", u.order), ("to", u.order_dto)], TypeId::VOID)
            .static_method(),
    );
    assert_eq!(u.shape(to_dto), None);
    assert_eq!(u.shape(update), None);
    assert_eq!(u.shape(copy), Some(MethodShape::CopyBetweenParameters));
}

#[test]
fn test_copy_between_parameters_assigns_into_second() {
    let u = universe();
    let copy = u.add(u.method("Copy", &[("from", u.order), ("to", u.order_dto)], TypeId::VOID));

    let implementation = implement(&u.db, copy).expect("implementation");
    assert_eq!(implementation.form, BodyForm::AssignTo(IRNode::id("to")));
    assert_eq!(implementation.target.target_type(), Some(u.order_dto));
    assert_eq!(implementation.source.origin, Some(u.order));
    let TargetShape::Slots { slots, .. } = &implementation.target else {
        panic!("expected slots");
    };
    assert_eq!(u.slot_names(slots), vec!["Id"]);
}

#[test]
fn test_constructor_from_parameters_targets_own_members() {
    let u = universe();
    let ctor = u.add_ctor(&[("id", TypeId::INT32)]);

    let implementation = implement(&u.db, ctor).expect("implementation");
    assert_eq!(implementation.form, BodyForm::AssignTo(IRNode::This));
    assert_eq!(implementation.target.target_type(), Some(u.mapper_type));
    assert_eq!(implementation.source.len(), 1);
    assert_eq!(implementation.source.origin, None);
}

#[test]
fn test_convert_this_reads_own_members() {
    let u = universe();
    let to_dto = u.add(u.method("ToDto", &[], u.order_dto));

    let implementation = implement(&u.db, to_dto).expect("implementation");
    assert_eq!(implementation.form, BodyForm::Return);
    assert_eq!(implementation.target, TargetShape::construct(u.order_dto));
    assert_eq!(implementation.source.candidates[0].expr, SourceExpr::This.member(u.db.intern_string("Id")));
}
