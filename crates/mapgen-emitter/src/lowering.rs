//! Plan lowering: `MappingPlan` -> IR statements.
//!
//! The engine decides *what* each slot receives; this pass decides how it is
//! written. It also owns the unmapped policy: whether slots the engine could
//! not fill disappear from the output or stay visible as comments.

use crate::ir::{IRInitializer, IRNode};
use mapgen_common::Atom;
use mapgen_solver::{
    CollectionKind, Construction, MappingEntry, MappingPlan, MappingValue, Projection, SourceExpr,
    TypeDatabase, UnmappedReason,
};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// What happens to slots the engine left unmapped.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UnmappedPolicy {
    /// Leave them out of the generated code.
    #[default]
    Omit,
    /// Keep a comment naming the slot and the reason.
    Placeholder,
}

/// Shape of the generated body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BodyForm {
    /// `return new T(...) { ... };`
    Return,
    /// One `receiver.Member = value;` statement per member entry.
    AssignTo(IRNode),
}

pub struct PlanLowering<'a> {
    db: &'a TypeDatabase,
    policy: UnmappedPolicy,
}

impl<'a> PlanLowering<'a> {
    pub fn new(db: &'a TypeDatabase, policy: UnmappedPolicy) -> Self {
        Self { db, policy }
    }

    /// Statements making up the body for `plan`.
    pub fn lower_body(&self, plan: &MappingPlan, form: &BodyForm) -> Vec<IRNode> {
        match form {
            BodyForm::Return => {
                let value = match &plan.construction {
                    Some(construction) => self.lower_construction(construction, plan),
                    None => IRNode::Default,
                };
                vec![IRNode::ret(Some(value))]
            }
            BodyForm::AssignTo(receiver) => plan
                .member_entries()
                .filter_map(|entry| self.lower_assignment(receiver, entry))
                .collect(),
        }
    }

    fn lower_assignment(&self, receiver: &IRNode, entry: &MappingEntry) -> Option<IRNode> {
        let member = self.name(entry.target.name);
        match &entry.value {
            MappingValue::Unmapped(reason) => {
                trace!(member = %member, %reason, "unmapped member");
                self.unmapped_comment(&member, *reason).map(IRNode::comment)
            }
            value => Some(IRNode::assign(
                IRNode::prop(receiver.clone(), member),
                self.lower_value(value),
            )),
        }
    }

    /// `new T(args) { Member = value, ... }` for a plan with a construction.
    pub fn lower_construction(&self, construction: &Construction, plan: &MappingPlan) -> IRNode {
        let type_name = self.db.display(construction.type_id);
        let arguments = self.lower_arguments(plan);
        let initializers = plan
            .member_entries()
            .filter_map(|entry| {
                let member = self.name(entry.target.name);
                match &entry.value {
                    MappingValue::Unmapped(reason) => self
                        .unmapped_comment(&member, *reason)
                        .map(|comment| IRInitializer::placeholder(member, comment)),
                    value => Some(IRInitializer::assign(member, self.lower_value(value))),
                }
            })
            .collect();
        IRNode::new_expr(type_name, arguments, initializers)
    }

    /// Positional constructor arguments. Unmapped parameters still need a
    /// value, so they receive `default`.
    pub fn lower_arguments(&self, plan: &MappingPlan) -> Vec<IRNode> {
        plan.constructor_arguments()
            .map(|entry| match &entry.value {
                MappingValue::Unmapped(reason) => match self.policy {
                    UnmappedPolicy::Omit => IRNode::Default,
                    UnmappedPolicy::Placeholder => IRNode::Default.annotated(format!(
                        "{}: {reason}",
                        self.name(entry.target.name)
                    )),
                },
                value => self.lower_value(value),
            })
            .collect()
    }

    pub fn lower_value(&self, value: &MappingValue) -> IRNode {
        match value {
            MappingValue::Direct(expr) => self.lower_source(expr),
            MappingValue::Conversion {
                conversion,
                argument,
            } => IRNode::call(
                IRNode::id(self.name(conversion.name)),
                vec![self.lower_source(argument)],
            ),
            MappingValue::Nested { plan, .. } => match &plan.construction {
                Some(construction) => self.lower_construction(construction, plan),
                None => IRNode::Default,
            },
            MappingValue::Projection(projection) => self.lower_projection(projection),
            MappingValue::Unmapped(_) => IRNode::Default,
        }
    }

    /// `source.Select(v => element).ToList()`, with the `Select` dropped when
    /// elements pass through unchanged.
    fn lower_projection(&self, projection: &Projection) -> IRNode {
        let mut expr = self.lower_source(&projection.source);
        if !projection.is_reshape_only() {
            let element = match &projection.element {
                MappingValue::Direct(read) if projection.source_element != projection.target_element => {
                    IRNode::cast(self.db.display(projection.target_element), self.lower_source(read))
                }
                element => self.lower_value(element),
            };
            let lambda = IRNode::lambda(self.name(projection.variable), element);
            expr = IRNode::method_call(expr, "Select", vec![lambda]);
        }
        match materializer(projection.target_kind) {
            Some(method) => IRNode::method_call(expr, method, Vec::new()),
            None => expr,
        }
    }

    pub fn lower_source(&self, expr: &SourceExpr) -> IRNode {
        match expr {
            SourceExpr::This => IRNode::This,
            SourceExpr::Identifier(name) => IRNode::id(self.name(*name)),
            SourceExpr::Member { object, name } => {
                IRNode::prop(self.lower_source(object), self.name(*name))
            }
        }
    }

    fn unmapped_comment(&self, member: &str, reason: UnmappedReason) -> Option<String> {
        match self.policy {
            UnmappedPolicy::Omit => None,
            UnmappedPolicy::Placeholder => Some(format!("Unmapped: {member} ({reason})")),
        }
    }

    fn name(&self, atom: Atom) -> String {
        self.db.resolve_atom(atom).to_string()
    }
}

/// LINQ call turning a lazy `Select` into the target collection kind.
fn materializer(kind: CollectionKind) -> Option<&'static str> {
    match kind {
        CollectionKind::Array => Some("ToArray"),
        CollectionKind::List | CollectionKind::ReadOnlyList => Some("ToList"),
        CollectionKind::Set => Some("ToHashSet"),
        CollectionKind::Enumerable => None,
    }
}

#[cfg(test)]
#[path = "../tests/lowering_tests.rs"]
mod tests;
