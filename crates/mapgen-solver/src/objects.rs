//! Object fields: the unified member surface of a type.
//!
//! Properties and data fields are merged into one `ObjectField` record so
//! the matcher never has to care which one it is looking at. Static
//! members, indexers and compiler-synthesized fields are not part of the
//! surface.

use crate::db::TypeDatabase;
use crate::def::{DefId, DefKind};
use crate::types::{MemberFlags, MemberInfo, MemberKind, TypeId, Visibility};
use indexmap::IndexMap;
use mapgen_common::Atom;
use mapgen_common::limits::MAX_BASE_CHAIN_DEPTH;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;
use std::collections::VecDeque;
use tracing::trace;

/// How the member behind an `ObjectField` was declared.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldOrigin {
    Property,
    Field,
}

impl From<MemberKind> for FieldOrigin {
    fn from(kind: MemberKind) -> Self {
        match kind {
            MemberKind::Property => FieldOrigin::Property,
            MemberKind::Field => FieldOrigin::Field,
        }
    }
}

/// A readable and/or assignable member of a type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectField {
    pub name: Atom,
    pub type_id: TypeId,
    pub origin: FieldOrigin,
    /// Visibility of the read path; `None` when the member cannot be read.
    pub read_visibility: Option<Visibility>,
    /// Visibility of the write path; `None` when the member is read-only.
    pub write_visibility: Option<Visibility>,
    /// The type (possibly a base type) that declares this member.
    pub declaring_type: DefId,
}

impl ObjectField {
    fn from_member(member: &MemberInfo, declaring_type: DefId) -> Self {
        Self {
            name: member.name,
            type_id: member.type_id,
            origin: member.kind.into(),
            read_visibility: member.getter,
            write_visibility: member.setter,
            declaring_type,
        }
    }

    #[inline]
    pub fn is_readable(&self) -> bool {
        self.read_visibility.is_some()
    }

    #[inline]
    pub fn is_writable(&self) -> bool {
        self.write_visibility.is_some()
    }
}

const EXCLUDED: MemberFlags = MemberFlags::STATIC
    .union(MemberFlags::INDEXER)
    .union(MemberFlags::IMPLICIT);

/// Collect the object fields of `type_id`.
///
/// Own members come first in declaration order, then each ancestor's. A
/// name already produced by a more-derived type hides the ancestor's
/// member. Nullable types expose their inner type's members; intrinsics,
/// collections and unknown types expose none.
pub fn get_object_fields(db: &TypeDatabase, type_id: TypeId) -> Vec<ObjectField> {
    let Some((root, _)) = db.definition_of(type_id) else {
        return Vec::new();
    };

    let mut fields: IndexMap<Atom, ObjectField> = IndexMap::new();
    for def in ancestry(db, root) {
        let Some(info) = db.defs.get(def) else {
            continue;
        };
        for member in &info.members {
            if member.flags.intersects(EXCLUDED) {
                continue;
            }
            fields
                .entry(member.name)
                .or_insert_with(|| ObjectField::from_member(member, def));
        }
    }

    trace!(
        type_id = type_id.0,
        count = fields.len(),
        "get_object_fields"
    );
    fields.into_values().collect()
}

/// `def` followed by its ancestors, each at most once.
///
/// Classes and structs follow the base-class chain; interfaces walk the
/// interfaces they extend breadth-first.
pub fn ancestry(db: &TypeDatabase, def: DefId) -> SmallVec<[DefId; 4]> {
    let mut order: SmallVec<[DefId; 4]> = SmallVec::new();
    let mut seen: FxHashSet<DefId> = FxHashSet::default();

    if db.defs.get_kind(def) == Some(DefKind::Interface) {
        let mut queue = VecDeque::from([def]);
        while let Some(current) = queue.pop_front() {
            if order.len() >= MAX_BASE_CHAIN_DEPTH || !seen.insert(current) {
                continue;
            }
            order.push(current);
            if let Some(info) = db.defs.get(current) {
                queue.extend(info.implements.iter().copied());
            }
        }
        return order;
    }

    let mut current = Some(def);
    while let Some(id) = current {
        if order.len() >= MAX_BASE_CHAIN_DEPTH || !seen.insert(id) {
            break;
        }
        order.push(id);
        current = db.defs.get_extends(id);
    }
    order
}

#[cfg(test)]
#[path = "../tests/objects_tests.rs"]
mod tests;
