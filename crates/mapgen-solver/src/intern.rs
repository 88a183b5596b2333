//! Type interning for structural deduplication.
//!
//! Converts `TypeData` structures into `TypeId` handles so that type
//! identity during matching is an integer comparison. Intrinsics are
//! pre-registered at the fixed ids declared on `TypeId`.

use crate::def::DefId;
use crate::types::{CollectionKind, IntrinsicKind, TypeData, TypeId};
use mapgen_common::{Atom, Interner};
use rustc_hash::FxHashMap;
use std::sync::{Arc, RwLock};

#[derive(Default)]
struct TypeTable {
    data_to_id: FxHashMap<TypeData, TypeId>,
    id_to_data: Vec<TypeData>,
}

impl TypeTable {
    fn insert(&mut self, data: TypeData) -> TypeId {
        if let Some(&id) = self.data_to_id.get(&data) {
            return id;
        }
        let id = TypeId(self.id_to_data.len() as u32);
        self.id_to_data.push(data.clone());
        self.data_to_id.insert(data, id);
        id
    }
}

/// Type interning table.
/// Thread-safe via RwLock; one interner is shared by everything that
/// describes the types of a single generation request.
pub struct TypeInterner {
    table: RwLock<TypeTable>,
    /// String interner for type, member and parameter names
    pub string_interner: Interner,
}

impl TypeInterner {
    /// Create a new type interner with pre-registered intrinsics.
    pub fn new() -> Self {
        let mut table = TypeTable::default();
        let error = table.insert(TypeData::Error);
        debug_assert_eq!(error, TypeId::ERROR);
        for kind in IntrinsicKind::ALL {
            let id = table.insert(TypeData::Intrinsic(kind));
            debug_assert_eq!(id, kind.type_id());
        }
        debug_assert_eq!(table.id_to_data.len() as u32, TypeId::FIRST_USER);

        let string_interner = Interner::new();
        string_interner.intern_common();
        TypeInterner {
            table: RwLock::new(table),
            string_interner,
        }
    }

    pub fn intern_string(&self, s: &str) -> Atom {
        self.string_interner.intern(s)
    }

    pub fn resolve_atom(&self, atom: Atom) -> Arc<str> {
        self.string_interner.resolve(atom)
    }

    /// Intern a type structure.
    pub fn intern(&self, data: TypeData) -> TypeId {
        if let Some(&id) = self
            .table
            .read()
            .expect("type table lock poisoned")
            .data_to_id
            .get(&data)
        {
            return id;
        }
        self.table
            .write()
            .expect("type table lock poisoned")
            .insert(data)
    }

    /// Look up the structure behind a `TypeId`.
    pub fn lookup(&self, id: TypeId) -> Option<TypeData> {
        self.table
            .read()
            .expect("type table lock poisoned")
            .id_to_data
            .get(id.0 as usize)
            .cloned()
    }

    // -------------------------------------------------------------------------
    // Constructors
    // -------------------------------------------------------------------------

    pub fn named(&self, def: DefId) -> TypeId {
        self.intern(TypeData::Named {
            def,
            args: Vec::new(),
        })
    }

    pub fn generic(&self, def: DefId, args: Vec<TypeId>) -> TypeId {
        self.intern(TypeData::Named { def, args })
    }

    pub fn collection(&self, kind: CollectionKind, element: TypeId) -> TypeId {
        self.intern(TypeData::Collection { kind, element })
    }

    pub fn array(&self, element: TypeId) -> TypeId {
        self.collection(CollectionKind::Array, element)
    }

    pub fn list(&self, element: TypeId) -> TypeId {
        self.collection(CollectionKind::List, element)
    }

    pub fn enumerable(&self, element: TypeId) -> TypeId {
        self.collection(CollectionKind::Enumerable, element)
    }

    /// `T?`. Nullable is idempotent, and the error type stays the error type.
    pub fn nullable(&self, inner: TypeId) -> TypeId {
        if inner.is_error() {
            return inner;
        }
        if let Some(TypeData::Nullable(_)) = self.lookup(inner) {
            return inner;
        }
        self.intern(TypeData::Nullable(inner))
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Strip one nullable wrapper, if present.
    pub fn non_nullable(&self, id: TypeId) -> TypeId {
        match self.lookup(id) {
            Some(TypeData::Nullable(inner)) => inner,
            _ => id,
        }
    }

    pub fn is_nullable(&self, id: TypeId) -> bool {
        matches!(self.lookup(id), Some(TypeData::Nullable(_)))
    }

    pub fn intrinsic_kind(&self, id: TypeId) -> Option<IntrinsicKind> {
        match self.lookup(id) {
            Some(TypeData::Intrinsic(kind)) => Some(kind),
            _ => None,
        }
    }

    /// Declaration behind a named type (not looking through nullable).
    pub fn named_def(&self, id: TypeId) -> Option<DefId> {
        match self.lookup(id) {
            Some(TypeData::Named { def, .. }) => Some(def),
            _ => None,
        }
    }

    /// `(kind, element)` for collection-like types.
    pub fn collection_element(&self, id: TypeId) -> Option<(CollectionKind, TypeId)> {
        match self.lookup(id) {
            Some(TypeData::Collection { kind, element }) => Some((kind, element)),
            _ => None,
        }
    }

    #[inline]
    pub fn is_collection(&self, id: TypeId) -> bool {
        self.collection_element(id).is_some()
    }
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "../tests/intern_tests.rs"]
mod tests;
