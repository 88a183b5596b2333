//! Accessibility checks for members, constructors, methods and types.
//!
//! Every reference the generator emits is checked here first, from the
//! point of view of the type that declares the method being generated.
//!
//! Rules:
//! - `public`: always.
//! - `internal`: the viewing type is in the declaring type's assembly.
//! - `protected`: the viewing type (or a type enclosing it) is the declaring
//!   type or derives from it; for instance members the receiver must also be
//!   that type or derive from it.
//! - `protected internal`: either of the above.
//! - `private protected`: both.
//! - `private`: the viewing type is the declaring type or nested inside it.

use crate::def::{DefId, DefinitionStore};
use crate::objects::ObjectField;
use crate::relations::is_same_or_derived;
use crate::types::{MethodRef, Visibility};
use mapgen_common::limits::MAX_BASE_CHAIN_DEPTH;
use smallvec::SmallVec;

pub struct AccessibilityResolver<'a> {
    store: &'a DefinitionStore,
}

impl<'a> AccessibilityResolver<'a> {
    pub fn new(store: &'a DefinitionStore) -> Self {
        Self { store }
    }

    /// `from` followed by the types lexically enclosing it.
    fn enclosing_chain(&self, from: DefId) -> SmallVec<[DefId; 4]> {
        let mut chain = SmallVec::new();
        let mut current = Some(from);
        while let Some(id) = current {
            if chain.len() >= MAX_BASE_CHAIN_DEPTH || chain.contains(&id) {
                break;
            }
            chain.push(id);
            current = self.store.get_containing_type(id);
        }
        chain
    }

    fn same_assembly(&self, declaring: DefId, from: DefId) -> bool {
        match (
            self.store.get_assembly(declaring),
            self.store.get_assembly(from),
        ) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }

    fn protected_ok(&self, declaring: DefId, from: DefId, receiver: Option<DefId>) -> bool {
        self.enclosing_chain(from).into_iter().any(|viewer| {
            if !is_same_or_derived(self.store, viewer, declaring) {
                return false;
            }
            match receiver {
                Some(receiver) => is_same_or_derived(self.store, receiver, viewer),
                None => true,
            }
        })
    }

    /// Whether a member of `declaring` with `visibility` can be referenced
    /// from code inside `from`.
    ///
    /// `receiver` is the static type of the instance the member is accessed
    /// through, or `None` for static access.
    pub fn is_accessible(
        &self,
        declaring: DefId,
        visibility: Visibility,
        from: DefId,
        receiver: Option<DefId>,
    ) -> bool {
        match visibility {
            Visibility::Public => true,
            Visibility::Internal => self.same_assembly(declaring, from),
            Visibility::Protected => self.protected_ok(declaring, from, receiver),
            Visibility::ProtectedInternal => {
                self.same_assembly(declaring, from) || self.protected_ok(declaring, from, receiver)
            }
            Visibility::PrivateProtected => {
                self.same_assembly(declaring, from) && self.protected_ok(declaring, from, receiver)
            }
            Visibility::Private => self.enclosing_chain(from).contains(&declaring),
        }
    }

    /// Can `field` be read from `from` through an instance of `receiver`?
    pub fn can_read(&self, field: &ObjectField, from: DefId, receiver: Option<DefId>) -> bool {
        field.read_visibility.is_some_and(|visibility| {
            self.is_accessible(field.declaring_type, visibility, from, receiver)
        })
    }

    /// Can `field` be assigned from `from` through an instance of `receiver`?
    pub fn can_write(&self, field: &ObjectField, from: DefId, receiver: Option<DefId>) -> bool {
        field.write_visibility.is_some_and(|visibility| {
            self.is_accessible(field.declaring_type, visibility, from, receiver)
        })
    }

    /// Whether `method` can be called from `from`.
    ///
    /// Constructors are invoked on the type they build. Instance methods are
    /// called on `this`, so the receiver is `from`. Static methods have none.
    pub fn is_method_accessible(&self, method: MethodRef, from: DefId) -> bool {
        let Some(info) = self.store.method(method) else {
            return false;
        };
        let receiver = if method.is_constructor() {
            Some(method.owner)
        } else if info.is_static {
            None
        } else {
            Some(from)
        };
        self.is_accessible(method.owner, info.visibility, from, receiver)
    }

    /// Whether the type `def` can be named from `from`.
    pub fn is_type_accessible(&self, def: DefId, from: DefId) -> bool {
        let mut current = def;
        for _ in 0..MAX_BASE_CHAIN_DEPTH {
            let Some(info) = self.store.get(current) else {
                return false;
            };
            let ok = match info.containing_type {
                Some(outer) => self.is_accessible(outer, info.visibility, from, None),
                None => match info.visibility {
                    Visibility::Public => true,
                    _ => self.same_assembly(current, from),
                },
            };
            if !ok {
                return false;
            }
            match info.containing_type {
                Some(outer) => current = outer,
                None => return true,
            }
        }
        false
    }
}

#[cfg(test)]
#[path = "../tests/accessibility_tests.rs"]
mod tests;
