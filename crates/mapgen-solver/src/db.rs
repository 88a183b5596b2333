//! The resolved type universe of one generation request.

use crate::def::{DefId, DefinitionInfo, DefinitionStore};
use crate::format::TypeFormatter;
use crate::intern::TypeInterner;
use crate::types::TypeId;
use mapgen_common::Atom;
use std::sync::Arc;

/// Interned types plus the definitions they refer to.
///
/// Built fresh by the driver from the host's semantic state for each
/// request and dropped afterwards.
#[derive(Default)]
pub struct TypeDatabase {
    pub types: TypeInterner,
    pub defs: DefinitionStore,
}

impl TypeDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern_string(&self, s: &str) -> Atom {
        self.types.intern_string(s)
    }

    pub fn resolve_atom(&self, atom: Atom) -> Arc<str> {
        self.types.resolve_atom(atom)
    }

    /// Register a definition and return the named type for it.
    pub fn declare(&self, info: DefinitionInfo) -> (DefId, TypeId) {
        let def = self.defs.register(info);
        (def, self.types.named(def))
    }

    /// Definition behind a named type, looking through one nullable wrapper.
    pub fn definition_of(&self, type_id: TypeId) -> Option<(DefId, Arc<DefinitionInfo>)> {
        let def = self.types.named_def(self.types.non_nullable(type_id))?;
        self.defs.get(def).map(|info| (def, info))
    }

    /// Human-readable type name, as it would be spelled in source.
    pub fn display(&self, type_id: TypeId) -> String {
        TypeFormatter::new(self).format(type_id)
    }
}
