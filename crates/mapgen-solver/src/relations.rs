//! Type relations: inheritance and implicit convertibility.
//!
//! This is the slice of the host type system the matcher needs to decide
//! whether a source value can be assigned to a target slot as-is.

use crate::db::TypeDatabase;
use crate::def::{DefId, DefKind, DefinitionStore};
use crate::types::{CollectionKind, IntrinsicKind, TypeData, TypeId};
use mapgen_common::limits::MAX_BASE_CHAIN_DEPTH;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

/// Whether `derived` is `base` or inherits from it, through base classes or
/// implemented interfaces.
pub fn is_same_or_derived(store: &DefinitionStore, derived: DefId, base: DefId) -> bool {
    if derived == base {
        return true;
    }
    let mut seen: FxHashSet<DefId> = FxHashSet::default();
    let mut stack: SmallVec<[DefId; 8]> = SmallVec::new();
    stack.push(derived);
    while let Some(current) = stack.pop() {
        if !seen.insert(current) || seen.len() > MAX_BASE_CHAIN_DEPTH * 4 {
            continue;
        }
        let Some(info) = store.get(current) else {
            continue;
        };
        if info.extends == Some(base) || info.implements.contains(&base) {
            return true;
        }
        stack.extend(info.extends);
        stack.extend(info.implements.iter().copied());
    }
    false
}

/// Implicit numeric conversions (`int` to `long`, `float` to `double`, ...).
fn is_numeric_widening(source: IntrinsicKind, target: IntrinsicKind) -> bool {
    use IntrinsicKind::*;
    match source {
        Byte => matches!(target, Int16 | Int32 | Int64 | Float32 | Float64 | Decimal),
        Char | Int16 => matches!(target, Int32 | Int64 | Float32 | Float64 | Decimal),
        Int32 => matches!(target, Int64 | Float32 | Float64 | Decimal),
        Int64 => matches!(target, Float32 | Float64 | Decimal),
        Float32 => matches!(target, Float64),
        _ => false,
    }
}

/// Whether values of `type_id` are references (as opposed to values that
/// need boxing). Only reference types take part in variance.
pub fn is_reference_type(db: &TypeDatabase, type_id: TypeId) -> bool {
    match db.types.lookup(type_id) {
        Some(TypeData::Intrinsic(kind)) => !kind.is_value_type() && kind != IntrinsicKind::Void,
        Some(TypeData::Named { def, .. }) => db.defs.get_kind(def) != Some(DefKind::Struct),
        Some(TypeData::Collection { .. }) => true,
        _ => false,
    }
}

/// Whether a value of `source` can be assigned to `target` without any
/// generated code.
///
/// Covers identity, numeric widening, conversion to `object`, nullable
/// lifting, derived-to-base, and covariance of read-only collection views
/// and arrays. Generic arguments must match exactly. The error type is never
/// convertible, not even to itself.
pub fn is_implicitly_convertible(db: &TypeDatabase, source: TypeId, target: TypeId) -> bool {
    if source.is_error() || target.is_error() || source == TypeId::VOID || target == TypeId::VOID
    {
        return false;
    }
    if source == target || target == TypeId::OBJECT {
        return true;
    }

    let (Some(source_data), Some(target_data)) = (db.types.lookup(source), db.types.lookup(target))
    else {
        return false;
    };

    match (source_data, target_data) {
        (TypeData::Nullable(s), TypeData::Nullable(t)) => is_implicitly_convertible(db, s, t),
        (_, TypeData::Nullable(t)) => is_implicitly_convertible(db, source, t),
        (TypeData::Nullable(_), _) => false,
        (TypeData::Intrinsic(s), TypeData::Intrinsic(t)) => is_numeric_widening(s, t),
        (
            TypeData::Named {
                def: s,
                args: source_args,
            },
            TypeData::Named {
                def: t,
                args: target_args,
            },
        ) => source_args.is_empty() && target_args.is_empty() && is_same_or_derived(&db.defs, s, t),
        (
            TypeData::Collection {
                kind: source_kind,
                element: source_element,
            },
            TypeData::Collection {
                kind: target_kind,
                element: target_element,
            },
        ) => {
            let view_ok = match target_kind {
                CollectionKind::Enumerable => true,
                CollectionKind::ReadOnlyList => matches!(
                    source_kind,
                    CollectionKind::Array | CollectionKind::List | CollectionKind::ReadOnlyList
                ),
                CollectionKind::Array => source_kind == CollectionKind::Array,
                CollectionKind::List | CollectionKind::Set => false,
            };
            if !view_ok {
                return false;
            }
            source_element == target_element
                || (is_reference_type(db, source_element)
                    && is_reference_type(db, target_element)
                    && is_implicitly_convertible(db, source_element, target_element))
        }
        _ => false,
    }
}

#[cfg(test)]
#[path = "../tests/relations_tests.rs"]
mod tests;
