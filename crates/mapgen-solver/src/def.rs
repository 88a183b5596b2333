//! Type definitions and their storage.
//!
//! A `DefId` names one declared class, struct or interface. The
//! `DefinitionStore` holds what the host's semantic resolver reported about
//! it: name, nesting, base type, members, methods and constructors, all in
//! declaration order.
//!
//! Definitions are registered first and filled in afterwards, because
//! members routinely refer back to the type that declares them
//! (`Node.Parent: Node`).

use crate::types::{MemberInfo, MethodInfo, MethodKind, MethodRef, Visibility};
use dashmap::DashMap;
use mapgen_common::Atom;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::trace;

// =============================================================================
// Identifiers
// =============================================================================

/// Identifier of a declared type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct DefId(pub u32);

impl DefId {
    /// Sentinel value for invalid `DefId`.
    pub const INVALID: Self = Self(0);

    /// First valid `DefId`.
    pub const FIRST_VALID: u32 = 1;

    pub const fn is_valid(self) -> bool {
        self.0 >= Self::FIRST_VALID
    }
}

/// Compilation unit a type belongs to; the scope of `internal`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default, Serialize)]
pub struct AssemblyId(pub u32);

/// Kind of type definition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum DefKind {
    Class,
    Struct,
    /// Never constructible; members come from the interface and the
    /// interfaces it extends.
    Interface,
}

// =============================================================================
// DefinitionInfo
// =============================================================================

/// Everything the matcher needs to know about one declared type.
#[derive(Clone, Debug)]
pub struct DefinitionInfo {
    pub kind: DefKind,
    pub name: Atom,
    pub visibility: Visibility,
    pub assembly: AssemblyId,
    /// Outer type for nested declarations.
    pub containing_type: Option<DefId>,
    /// Base class.
    pub extends: Option<DefId>,
    /// Implemented (or, for interfaces, extended) interfaces.
    pub implements: Vec<DefId>,
    pub is_abstract: bool,
    /// Properties and fields in declaration order.
    pub members: Vec<MemberInfo>,
    pub methods: Vec<MethodInfo>,
    pub constructors: Vec<MethodInfo>,
}

impl DefinitionInfo {
    fn new(kind: DefKind, name: Atom) -> Self {
        Self {
            kind,
            name,
            visibility: Visibility::Public,
            assembly: AssemblyId::default(),
            containing_type: None,
            extends: None,
            implements: Vec::new(),
            is_abstract: false,
            members: Vec::new(),
            methods: Vec::new(),
            constructors: Vec::new(),
        }
    }

    pub fn class(name: Atom) -> Self {
        Self::new(DefKind::Class, name)
    }

    pub fn structure(name: Atom) -> Self {
        Self::new(DefKind::Struct, name)
    }

    pub fn interface(name: Atom) -> Self {
        Self::new(DefKind::Interface, name)
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn in_assembly(mut self, assembly: AssemblyId) -> Self {
        self.assembly = assembly;
        self
    }

    pub fn nested_in(mut self, outer: DefId) -> Self {
        self.containing_type = Some(outer);
        self
    }

    pub fn with_extends(mut self, parent: DefId) -> Self {
        self.extends = Some(parent);
        self
    }

    pub fn with_implements(mut self, interfaces: Vec<DefId>) -> Self {
        self.implements = interfaces;
        self
    }

    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    pub fn with_member(mut self, member: MemberInfo) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_method(mut self, method: MethodInfo) -> Self {
        self.methods.push(method);
        self
    }

    pub fn with_constructor(mut self, constructor: MethodInfo) -> Self {
        self.constructors.push(constructor);
        self
    }

    /// Whether instances can be created with `new`.
    pub fn is_constructible(&self) -> bool {
        self.kind != DefKind::Interface && !self.is_abstract
    }
}

// =============================================================================
// DefinitionStore
// =============================================================================

/// Storage for type definitions of one request.
pub struct DefinitionStore {
    definitions: DashMap<DefId, Arc<DefinitionInfo>>,
    next_id: AtomicU32,
}

impl Default for DefinitionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DefinitionStore {
    pub fn new() -> Self {
        Self {
            definitions: DashMap::new(),
            next_id: AtomicU32::new(DefId::FIRST_VALID),
        }
    }

    /// Register a new definition and return its `DefId`.
    pub fn register(&self, info: DefinitionInfo) -> DefId {
        let id = DefId(self.next_id.fetch_add(1, Ordering::SeqCst));
        trace!(def_id = id.0, kind = ?info.kind, "DefinitionStore::register");
        self.definitions.insert(id, Arc::new(info));
        id
    }

    pub fn get(&self, id: DefId) -> Option<Arc<DefinitionInfo>> {
        self.definitions.get(&id).map(|r| Arc::clone(r.value()))
    }

    pub fn get_name(&self, id: DefId) -> Option<Atom> {
        self.definitions.get(&id).map(|r| r.name)
    }

    pub fn get_kind(&self, id: DefId) -> Option<DefKind> {
        self.definitions.get(&id).map(|r| r.kind)
    }

    pub fn get_extends(&self, id: DefId) -> Option<DefId> {
        self.definitions.get(&id).and_then(|r| r.extends)
    }

    pub fn get_containing_type(&self, id: DefId) -> Option<DefId> {
        self.definitions.get(&id).and_then(|r| r.containing_type)
    }

    pub fn get_assembly(&self, id: DefId) -> Option<AssemblyId> {
        self.definitions.get(&id).map(|r| r.assembly)
    }

    /// Look up a method or constructor by reference.
    pub fn method(&self, method: MethodRef) -> Option<MethodInfo> {
        let def = self.definitions.get(&method.owner)?;
        let list = match method.kind {
            MethodKind::Method => &def.methods,
            MethodKind::Constructor => &def.constructors,
        };
        list.get(method.index as usize).cloned()
    }

    fn update(&self, id: DefId, f: impl FnOnce(&mut DefinitionInfo)) {
        if let Some(mut entry) = self.definitions.get_mut(&id) {
            f(Arc::make_mut(entry.value_mut()));
        }
    }

    pub fn add_member(&self, id: DefId, member: MemberInfo) {
        self.update(id, |def| def.members.push(member));
    }

    /// Append a method and return its reference.
    pub fn add_method(&self, id: DefId, method: MethodInfo) -> MethodRef {
        let mut index = 0;
        self.update(id, |def| {
            index = def.methods.len() as u32;
            def.methods.push(method);
        });
        MethodRef::method(id, index)
    }

    /// Append a constructor and return its reference.
    pub fn add_constructor(&self, id: DefId, constructor: MethodInfo) -> MethodRef {
        let mut index = 0;
        self.update(id, |def| {
            index = def.constructors.len() as u32;
            def.constructors.push(constructor);
        });
        MethodRef::constructor(id, index)
    }

    pub fn set_extends(&self, id: DefId, parent: DefId) {
        self.update(id, |def| def.extends = Some(parent));
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
#[path = "../tests/def_tests.rs"]
mod tests;
