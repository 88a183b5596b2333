//! Method shapes the driver knows how to implement.
//!
//! Each shape fixes three things: which slots are filled, what they are
//! filled from, and how the body is written. Shapes are tried in order;
//! the first that fits wins.

use mapgen_common::Atom;
use mapgen_emitter::{BodyForm, IRNode};
use mapgen_solver::{
    MethodInfo, MethodRef, SourceExpr, SourceShape, TargetShape, TypeDatabase, TypeId,
};
use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MethodShape {
    /// `Ctor(Source s)`: `this.X = s.X`
    ConstructorFromObject,
    /// `Ctor(int id, string name)`: `this.Id = id`
    ConstructorFromParameters,
    /// `Target Map(Source s)`: `return new Target { X = s.X }`
    ConvertObject,
    /// `Target Map(int id, string name)`: `return new Target { Id = id }`
    ConvertParameters,
    /// `Target ToTarget()`: `return new Target { X = this.X }`
    ConvertThis,
    /// `void Copy(Source s, Target t)`: `t.X = s.X`
    CopyBetweenParameters,
    /// `void Update(Source s)`: `this.X = s.X`
    UpdateThis,
}

/// Engine inputs plus body form for one method.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Implementation {
    pub shape: MethodShape,
    pub target: TargetShape,
    pub source: SourceShape,
    pub form: BodyForm,
    /// Every parameter of the method; generated lambdas must not reuse them.
    pub parameters: Vec<Atom>,
}

fn is_object_typed(db: &TypeDatabase, type_id: TypeId) -> bool {
    !db.types.is_collection(db.types.non_nullable(type_id)) && db.definition_of(type_id).is_some()
}

pub fn classify(db: &TypeDatabase, method: MethodRef, info: &MethodInfo) -> Option<MethodShape> {
    let params = &info.params;
    let single_object = params.len() == 1 && is_object_typed(db, params[0].type_id);

    if method.is_constructor() {
        return match params.len() {
            0 => None,
            _ if single_object => Some(MethodShape::ConstructorFromObject),
            _ => Some(MethodShape::ConstructorFromParameters),
        };
    }

    if !info.returns_void() {
        return match params.len() {
            0 if !info.is_static => Some(MethodShape::ConvertThis),
            0 => None,
            _ if single_object => Some(MethodShape::ConvertObject),
            1 => None,
            _ => Some(MethodShape::ConvertParameters),
        };
    }

    match params.len() {
        2 if params.iter().all(|p| is_object_typed(db, p.type_id)) => {
            Some(MethodShape::CopyBetweenParameters)
        }
        1 if single_object && !info.is_static => Some(MethodShape::UpdateThis),
        _ => None,
    }
}

/// Build the engine inputs for `method`, or `None` when no shape fits.
pub fn implement(db: &TypeDatabase, method: MethodRef) -> Option<Implementation> {
    let info = db.defs.method(method)?;
    let shape = classify(db, method, &info)?;
    let owner = method.owner;
    let owner_type = db.types.named(owner);
    let params = &info.params;
    let param_expr = |i: usize| SourceExpr::Identifier(params[i].name);

    let (target, source, form) = match shape {
        MethodShape::ConstructorFromObject | MethodShape::UpdateThis => (
            TargetShape::writable_members(db, owner_type, owner),
            SourceShape::members_of(db, param_expr(0), params[0].type_id, owner),
            BodyForm::AssignTo(IRNode::This),
        ),
        MethodShape::ConstructorFromParameters => (
            TargetShape::writable_members(db, owner_type, owner),
            SourceShape::from_parameters(params),
            BodyForm::AssignTo(IRNode::This),
        ),
        MethodShape::ConvertObject => (
            TargetShape::construct(info.return_type),
            SourceShape::members_of(db, param_expr(0), params[0].type_id, owner),
            BodyForm::Return,
        ),
        MethodShape::ConvertParameters => (
            TargetShape::construct(info.return_type),
            SourceShape::from_parameters(params),
            BodyForm::Return,
        ),
        MethodShape::ConvertThis => (
            TargetShape::construct(info.return_type),
            SourceShape::members_of(db, SourceExpr::This, owner_type, owner),
            BodyForm::Return,
        ),
        MethodShape::CopyBetweenParameters => {
            let receiver = db.resolve_atom(params[1].name).to_string();
            (
                TargetShape::writable_members(db, params[1].type_id, owner),
                SourceShape::members_of(db, param_expr(0), params[0].type_id, owner),
                BodyForm::AssignTo(IRNode::id(receiver)),
            )
        }
    };

    Some(Implementation {
        shape,
        target,
        source,
        form,
        parameters: params.iter().map(|p| p.name).collect(),
    })
}

#[cfg(test)]
#[path = "../tests/implementors_tests.rs"]
mod tests;
