//! Source and target shapes handed to the engine.
//!
//! A source shape is an ordered list of named values the generated code can
//! read; a target shape is either a list of slots to fill or a request to
//! construct a value of some type.

use crate::accessibility::AccessibilityResolver;
use crate::db::TypeDatabase;
use crate::def::DefId;
use crate::objects::get_object_fields;
use crate::options::NameMatching;
use crate::types::{MethodRef, ParamInfo, TypeId};
use mapgen_common::Atom;
use serde::Serialize;

// =============================================================================
// Source side
// =============================================================================

/// Expression that reads a source value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum SourceExpr {
    This,
    /// A parameter or lambda variable.
    Identifier(Atom),
    Member { object: Box<SourceExpr>, name: Atom },
}

impl SourceExpr {
    pub fn member(self, name: Atom) -> Self {
        SourceExpr::Member {
            object: Box::new(self),
            name,
        }
    }

    /// The identifier the expression starts from, if any.
    pub fn root_identifier(&self) -> Option<Atom> {
        match self {
            SourceExpr::This => None,
            SourceExpr::Identifier(name) => Some(*name),
            SourceExpr::Member { object, .. } => object.root_identifier(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceCandidate {
    pub name: Atom,
    pub type_id: TypeId,
    pub expr: SourceExpr,
}

/// Ordered values available to the generated code.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceShape {
    pub candidates: Vec<SourceCandidate>,
    /// The type whose members make up this shape, when there is one.
    pub origin: Option<TypeId>,
}

impl SourceShape {
    /// Each parameter is a candidate, read by its own name.
    pub fn from_parameters(params: &[ParamInfo]) -> Self {
        Self {
            candidates: params
                .iter()
                .map(|p| SourceCandidate {
                    name: p.name,
                    type_id: p.type_id,
                    expr: SourceExpr::Identifier(p.name),
                })
                .collect(),
            origin: None,
        }
    }

    /// The members of `type_id` readable from `viewing` through `expr`.
    pub fn members_of(
        db: &TypeDatabase,
        expr: SourceExpr,
        type_id: TypeId,
        viewing: DefId,
    ) -> Self {
        let access = AccessibilityResolver::new(&db.defs);
        let receiver = db.definition_of(type_id).map(|(def, _)| def);
        let candidates = get_object_fields(db, type_id)
            .into_iter()
            .filter(|field| access.can_read(field, viewing, receiver))
            .map(|field| SourceCandidate {
                name: field.name,
                type_id: field.type_id,
                expr: expr.clone().member(field.name),
            })
            .collect();
        Self {
            candidates,
            origin: Some(db.types.non_nullable(type_id)),
        }
    }

    /// Find the candidate for a target named `name`.
    ///
    /// An exact match always wins. Case-insensitive matching then takes the
    /// first candidate in declaration order whose name folds equal.
    pub fn find(
        &self,
        db: &TypeDatabase,
        name: Atom,
        matching: NameMatching,
    ) -> Option<&SourceCandidate> {
        if let Some(exact) = self.candidates.iter().find(|c| c.name == name) {
            return Some(exact);
        }
        match matching {
            NameMatching::CaseSensitive => None,
            NameMatching::CaseInsensitive => self
                .candidates
                .iter()
                .find(|c| db.types.string_interner.eq_ignore_case(c.name, name)),
        }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

// =============================================================================
// Target side
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TargetSlotKind {
    /// Positional constructor argument.
    ConstructorParameter { index: usize },
    /// Assignable property or field.
    Member,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct TargetSlot {
    pub name: Atom,
    pub type_id: TypeId,
    pub kind: TargetSlotKind,
}

impl TargetSlot {
    #[inline]
    pub fn is_constructor_parameter(&self) -> bool {
        matches!(self.kind, TargetSlotKind::ConstructorParameter { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TargetShape {
    /// Fill these slots, in order.
    Slots {
        target_type: Option<TypeId>,
        slots: Vec<TargetSlot>,
    },
    /// Build a new value of `target_type`.
    Construct { target_type: TypeId },
}

impl TargetShape {
    /// The parameters of `constructor`, matched by name and passed
    /// positionally.
    pub fn constructor_parameters(db: &TypeDatabase, constructor: MethodRef) -> Self {
        let params = db
            .defs
            .method(constructor)
            .map(|info| info.params)
            .unwrap_or_default();
        Self::Slots {
            target_type: Some(db.types.named(constructor.owner)),
            slots: params
                .into_iter()
                .enumerate()
                .map(|(index, p)| TargetSlot {
                    name: p.name,
                    type_id: p.type_id,
                    kind: TargetSlotKind::ConstructorParameter { index },
                })
                .collect(),
        }
    }

    /// The members of `type_id` assignable from `viewing`.
    pub fn writable_members(db: &TypeDatabase, type_id: TypeId, viewing: DefId) -> Self {
        Self::Slots {
            target_type: Some(type_id),
            slots: writable_slots(db, type_id, viewing),
        }
    }

    pub fn construct(type_id: TypeId) -> Self {
        Self::Construct {
            target_type: type_id,
        }
    }

    pub fn target_type(&self) -> Option<TypeId> {
        match self {
            TargetShape::Slots { target_type, .. } => *target_type,
            TargetShape::Construct { target_type } => Some(*target_type),
        }
    }
}

/// Writable, accessible members of `type_id` as member slots.
pub(crate) fn writable_slots(db: &TypeDatabase, type_id: TypeId, viewing: DefId) -> Vec<TargetSlot> {
    let access = AccessibilityResolver::new(&db.defs);
    let receiver = db.definition_of(type_id).map(|(def, _)| def);
    get_object_fields(db, type_id)
        .into_iter()
        .filter(|field| access.can_write(field, viewing, receiver))
        .map(|field| TargetSlot {
            name: field.name,
            type_id: field.type_id,
            kind: TargetSlotKind::Member,
        })
        .collect()
}
