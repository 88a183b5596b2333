use super::*;
use crate::ir_printer::IRPrinter;
use mapgen_solver::{
    DefId, DefinitionInfo, MappingContext, MappingOptions, MemberInfo, MethodInfo, ParamInfo,
    SourceShape, TargetShape, TypeId, generate_mapping,
};

struct Universe {
    db: TypeDatabase,
    mapper: DefId,
}

impl Universe {
    fn new() -> Self {
        let db = TypeDatabase::new();
        let (mapper, _) = db.declare(DefinitionInfo::class(db.intern_string("Mapper")));
        Self { db, mapper }
    }

    fn class(&self, name: &str, props: &[(&str, TypeId)]) -> (DefId, TypeId) {
        let mut info = DefinitionInfo::class(self.db.intern_string(name));
        for (prop, ty) in props {
            info = info.with_member(MemberInfo::property(self.db.intern_string(prop), *ty));
        }
        self.db.declare(info)
    }

    fn ident(&self, name: &str) -> SourceExpr {
        SourceExpr::Identifier(self.db.intern_string(name))
    }

    fn construct(&self, param: &str, source: TypeId, target: TypeId) -> MappingPlan {
        let mut ctx = MappingContext::new(self.mapper, MappingOptions::default());
        self.construct_in(&mut ctx, param, source, target)
    }

    fn construct_in(
        &self,
        ctx: &mut MappingContext,
        param: &str,
        source: TypeId,
        target: TypeId,
    ) -> MappingPlan {
        let source = SourceShape::members_of(&self.db, self.ident(param), source, self.mapper);
        generate_mapping(&self.db, &TargetShape::construct(target), &source, ctx).expect("plan")
    }

    fn print(&self, plan: &MappingPlan, form: &BodyForm, policy: UnmappedPolicy) -> String {
        let statements = PlanLowering::new(&self.db, policy).lower_body(plan, form);
        IRPrinter::print_statements(&statements, "    ", 0)
    }
}

#[test]
fn test_return_form_with_nested_object_and_projection() {
    let u = Universe::new();
    let (_, customer) = u.class("Customer", &[("Name", TypeId::STRING)]);
    let (_, customer_dto) = u.class("CustomerDto", &[("Name", TypeId::STRING)]);
    let (_, line) = u.class("OrderLine", &[("Sku", TypeId::STRING)]);
    let (_, line_dto) = u.class("OrderLineDto", &[("Sku", TypeId::STRING)]);
    let (_, order) = u.class(
        "Order",
        &[
            ("Id", TypeId::INT32),
            ("Customer", customer),
            ("Lines", u.db.types.list(line)),
        ],
    );
    let (_, order_dto) = u.class(
        "OrderDto",
        &[
            ("Id", TypeId::INT32),
            ("Customer", customer_dto),
            ("Lines", u.db.types.list(line_dto)),
        ],
    );

    let plan = u.construct("order", order, order_dto);
    let text = u.print(&plan, &BodyForm::Return, UnmappedPolicy::Omit);

    assert_eq!(
        text,
        "return new OrderDto\n\
         {\n\
         \x20   Id = order.Id,\n\
         \x20   Customer = new CustomerDto\n\
         \x20   {\n\
         \x20       Name = order.Customer.Name\n\
         \x20   },\n\
         \x20   Lines = order.Lines.Select(orderLine => new OrderLineDto\n\
         \x20   {\n\
         \x20       Sku = orderLine.Sku\n\
         \x20   }).ToList()\n\
         };\n"
    );
}

#[test]
fn test_assign_form_omits_or_comments_unmapped_members() {
    let u = Universe::new();
    let (_, source) = u.class("Source", &[("Id", TypeId::INT32)]);
    let (_, target) = u.class("Target", &[("Id", TypeId::INT32), ("Extra", TypeId::STRING)]);
    let mut ctx = MappingContext::new(u.mapper, MappingOptions::default());
    let shape = TargetShape::writable_members(&u.db, target, u.mapper);
    let source = SourceShape::members_of(&u.db, u.ident("src"), source, u.mapper);
    let plan = generate_mapping(&u.db, &shape, &source, &mut ctx).expect("plan");

    let form = BodyForm::AssignTo(IRNode::This);
    assert_eq!(
        u.print(&plan, &form, UnmappedPolicy::Omit),
        "this.Id = src.Id;\n"
    );
    assert_eq!(
        u.print(&plan, &form, UnmappedPolicy::Placeholder),
        "this.Id = src.Id;\n// Unmapped: Extra (no matching source member)\n"
    );
}

#[test]
fn test_constructor_arguments_are_positional_with_defaults() {
    let u = Universe::new();
    let (_, source) = u.class("Person", &[("Id", TypeId::INT32), ("Name", TypeId::STRING)]);
    let (target_def, target) = u.class("PersonDto", &[]);
    u.db.defs.add_constructor(
        target_def,
        MethodInfo::constructor(vec![
            ParamInfo::new(u.db.intern_string("id"), TypeId::INT32),
            ParamInfo::new(u.db.intern_string("nickname"), TypeId::STRING),
        ]),
    );

    let plan = u.construct("person", source, target);
    assert_eq!(
        u.print(&plan, &BodyForm::Return, UnmappedPolicy::Omit),
        "return new PersonDto(person.Id, default);\n"
    );
    assert_eq!(
        u.print(&plan, &BodyForm::Return, UnmappedPolicy::Placeholder),
        "return new PersonDto(person.Id, default /* nickname: no matching source member */);\n"
    );
}

#[test]
fn test_conversion_call() {
    let u = Universe::new();
    let (_, address) = u.class("Address", &[("City", TypeId::STRING)]);
    let (_, person) = u.class("Person", &[("Home", address)]);
    let (_, dto) = u.class("PersonDto", &[("Home", TypeId::STRING)]);
    let format = u.db.defs.add_method(
        u.mapper,
        MethodInfo::new(
            u.db.intern_string("FormatAddress"),
            vec![ParamInfo::new(u.db.intern_string("a"), address)],
            TypeId::STRING,
        ),
    );
    let generating = u.db.defs.add_method(
        u.mapper,
        MethodInfo::new(
            u.db.intern_string("Map"),
            vec![ParamInfo::new(u.db.intern_string("person"), person)],
            dto,
        ),
    );
    let mut ctx = MappingContext::for_method(&u.db, generating, true, MappingOptions::default());
    assert_eq!(ctx.conversions.iter().next().map(|c| c.method), Some(format));

    let plan = u.construct_in(&mut ctx, "person", person, dto);
    assert_eq!(
        u.print(&plan, &BodyForm::Return, UnmappedPolicy::Omit),
        "return new PersonDto\n{\n    Home = FormatAddress(person.Home)\n};\n"
    );
}

#[test]
fn test_projection_materializers_and_casts() {
    let u = Universe::new();
    let (_, source) = u.class(
        "Source",
        &[
            ("Tags", u.db.types.array(TypeId::STRING)),
            ("Scores", u.db.types.list(TypeId::INT32)),
            ("Codes", u.db.types.list(TypeId::STRING)),
        ],
    );
    let (_, target) = u.class(
        "Target",
        &[
            ("Tags", u.db.types.list(TypeId::STRING)),
            ("Scores", u.db.types.array(TypeId::INT64)),
            (
                "Codes",
                u.db.types.collection(CollectionKind::Set, TypeId::STRING),
            ),
        ],
    );

    let plan = u.construct("src", source, target);
    assert_eq!(
        u.print(&plan, &BodyForm::Return, UnmappedPolicy::Omit),
        "return new Target\n\
         {\n\
         \x20   Tags = src.Tags.ToList(),\n\
         \x20   Scores = src.Scores.Select(item => (long)item).ToArray(),\n\
         \x20   Codes = src.Codes.ToHashSet()\n\
         };\n"
    );
}

#[test]
fn test_unmapped_policy_deserializes_from_camel_case() {
    let policy: UnmappedPolicy = serde_json::from_str("\"placeholder\"").expect("policy");
    assert_eq!(policy, UnmappedPolicy::Placeholder);
    assert_eq!(UnmappedPolicy::default(), UnmappedPolicy::Omit);
}
